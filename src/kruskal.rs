use std::cmp::Reverse;

use super::graph::Edge;
use super::unionfind::UnionFind;

/// 最小全域木を構築する. 連結でないグラフが与えられた場合は最小全域森 (連結成分数を変えないまま辺のコストの和を最小化したもの) を構築する.
///
/// * `n` - グラフの頂点数
/// * `edges` - 辺の列
///
/// 返り値は採用した辺の`edges`での添字を, コストの小さい順に吐き出すイテレータ.
///
/// # Time complexity
///
/// - *O*(*E* log *E*)
#[must_use]
pub fn kruskal<'a, T: Ord>(
    n: usize,
    edges: &'a [Edge<T>],
) -> impl Iterator<Item = usize> + use<'a, T> {
    let mut iv = (0..edges.len()).collect::<Vec<_>>();
    iv.sort_by_key(|&i| &edges[i].weight);
    select(n, edges, iv)
}

/// 最大全域木 (森) を構築する. 返り値は採用した辺の添字を, コストの大きい順に吐き出すイテレータ.
///
/// # Time complexity
///
/// - *O*(*E* log *E*)
#[must_use]
pub fn kruskal_max<'a, T: Ord>(
    n: usize,
    edges: &'a [Edge<T>],
) -> impl Iterator<Item = usize> + use<'a, T> {
    let mut iv = (0..edges.len()).collect::<Vec<_>>();
    iv.sort_by_key(|&i| Reverse(&edges[i].weight));
    select(n, edges, iv)
}

fn select<'a, T>(
    n: usize,
    edges: &'a [Edge<T>],
    order: Vec<usize>,
) -> impl Iterator<Item = usize> + use<'a, T> {
    let mut uf = UnionFind::new(n);
    order.into_iter().filter(move |&i| {
        let edge = &edges[i];
        if uf.same(edge.from, edge.to) {
            false
        } else {
            uf.unite(edge.from, edge.to);
            true
        }
    })
}
