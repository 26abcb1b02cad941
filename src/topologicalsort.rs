use std::collections::VecDeque;

use super::graph::Edge;

/// Kahnの方法でトポロジカルソートをする.
///
/// `adj[v]`は`v`から出る辺の列. 成功すれば`Ok(順序)`, 閉路があれば`Err(途中までの順序)`を返す.
/// 入次数0の頂点は番号の小さい順に, 見つかった順に取り出す.
///
/// # Time complexity
///
/// - *O*(*V* + *E*)
pub fn topological_sort<T>(adj: &[Vec<Edge<T>>]) -> Result<Vec<usize>, Vec<usize>> {
    kahn(adj, false)
}

/// トポロジカル順序が一意に定まるときだけ成功するトポロジカルソートをする.
///
/// 取り出し待ちの頂点が2つ以上になった時点で`Err(途中までの順序)`を返す.
///
/// # Time complexity
///
/// - *O*(*V* + *E*)
pub fn unique_topological_sort<T>(adj: &[Vec<Edge<T>>]) -> Result<Vec<usize>, Vec<usize>> {
    kahn(adj, true)
}

fn kahn<T>(adj: &[Vec<Edge<T>>], unique: bool) -> Result<Vec<usize>, Vec<usize>> {
    let n = adj.len();
    let mut count = vec![0usize; n].into_boxed_slice();
    for e in adj.iter().flatten() {
        count[e.to] += 1;
    }
    let mut queue = (0..n).filter(|&v| count[v] == 0).collect::<VecDeque<_>>();
    let mut order = Vec::with_capacity(n);
    loop {
        if unique && queue.len() > 1 {
            return Err(order);
        }
        let Some(v) = queue.pop_front() else {
            break;
        };
        order.push(v);
        for e in &adj[v] {
            // 入次数が負になるのは隣接リストが壊れているときだけ
            let Some(c) = count[e.to].checked_sub(1) else {
                return Err(order);
            };
            count[e.to] = c;
            if c == 0 {
                queue.push_back(e.to);
            }
        }
    }
    if order.len() == n {
        Ok(order)
    } else {
        Err(order)
    }
}
