//! 隣接リスト上の最短経路の計算
//!
//! 無向グラフと有向グラフの両方から使う. `adj[v]`の各辺について, `v`の反対側の端点
//! (`Edge::opposite`) へ進めるものとして扱う.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use super::error::{Error, Result};
use super::graph::{Edge, Weight};

/// Floyd–Warshall法を許す頂点数の上限
pub const FLOYD_WARSHALL_MAX_VERTICES: usize = 800;

/// BinaryHeapに距離と頂点番号をセットで入れるための型. 距離だけで比較する.
#[derive(Clone, Copy)]
struct DijkstraItem<T: Weight>(T, usize);
impl<T: Weight> PartialEq for DijkstraItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T: Weight> PartialOrd for DijkstraItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: Weight> Eq for DijkstraItem<T> {}
impl<T: Weight> Ord for DijkstraItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// ダイクストラ法を用いて`start`から各頂点への最短距離を求める.
///
/// 到達できない頂点の距離は`T::max_value()`になる.
///
/// # Constraints
///
/// - 辺のコストは非負
/// - `start < adj.len()`
///
/// # Time complexity
///
/// - *O*(*E* log *V*)
#[must_use]
pub fn dijkstra<T: Weight>(adj: &[Vec<Edge<T>>], start: usize) -> Box<[T]> {
    debug_assert!(start < adj.len());
    let mut dist = vec![T::max_value(); adj.len()].into_boxed_slice();
    let mut seen = vec![false; adj.len()].into_boxed_slice();
    let mut heap = BinaryHeap::new();
    dist[start] = T::zero();
    heap.push(Reverse(DijkstraItem(T::zero(), start)));
    while let Some(Reverse(DijkstraItem(distance, v))) = heap.pop() {
        if seen[v] {
            continue;
        }
        seen[v] = true;
        for e in &adj[v] {
            let u = e.opposite(v);
            let distance = distance + e.weight;
            if distance < dist[u] {
                dist[u] = distance;
                heap.push(Reverse(DijkstraItem(distance, u)));
            }
        }
    }
    dist
}

/// `start`から幅優先探索を行い, 最初に見つけた経路に沿った辺のコストの和を返す.
///
/// 到達できない頂点は`None`. 辺の本数が最小の経路のうち最初に見つかったものの和なので,
/// 全ての辺のコストが等しい場合や木の上でなければ最短距離とは限らない.
///
/// # Constraints
///
/// - `start < adj.len()`
///
/// # Time complexity
///
/// - *O*(*V* + *E*)
#[must_use]
pub fn bfs<T: Weight>(adj: &[Vec<Edge<T>>], start: usize) -> Box<[Option<T>]> {
    debug_assert!(start < adj.len());
    let mut dist = vec![None; adj.len()].into_boxed_slice();
    let mut queue = VecDeque::new();
    dist[start] = Some(T::zero());
    queue.push_back((start, T::zero()));
    while let Some((v, d)) = queue.pop_front() {
        for e in &adj[v] {
            let u = e.opposite(v);
            if dist[u].is_none() {
                let d = d + e.weight;
                dist[u] = Some(d);
                queue.push_back((u, d));
            }
        }
    }
    dist
}

/// Floyd–Warshall法で全点対の最短距離を求める. 到達できない組は`T::max_value()`.
///
/// 頂点数が`FLOYD_WARSHALL_MAX_VERTICES`を超えるときは`Error::InvalidArgument`を返す.
///
/// # Constraints
///
/// - 負の閉路がない
///
/// # Time complexity
///
/// - *O*(*V*³)
pub fn floyd_warshall<T: Weight>(adj: &[Vec<Edge<T>>]) -> Result<Vec<Vec<T>>> {
    let n = adj.len();
    if n > FLOYD_WARSHALL_MAX_VERTICES {
        log::debug!("floyd-warshall rejected: {n} vertices");
        return Err(Error::invalid(format!(
            "floyd-warshall supports at most {FLOYD_WARSHALL_MAX_VERTICES} vertices, got {n}"
        )));
    }
    let inf = T::max_value();
    let mut dist = vec![vec![inf; n]; n];
    for (v, edges) in adj.iter().enumerate() {
        dist[v][v] = T::zero();
        for e in edges {
            let u = e.opposite(v);
            dist[v][u] = dist[v][u].min(e.weight);
        }
    }
    for k in 0..n {
        for i in 0..n {
            if dist[i][k] == inf {
                continue;
            }
            for j in 0..n {
                if dist[k][j] != inf {
                    let d = dist[i][k] + dist[k][j];
                    if d < dist[i][j] {
                        dist[i][j] = d;
                    }
                }
            }
        }
    }
    Ok(dist)
}
