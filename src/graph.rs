use std::collections::{HashMap, HashSet};
use std::ops::Add;

use super::dijkstra::{bfs, dijkstra, floyd_warshall};
use super::error::{Error, Result};
use super::kruskal::{kruskal, kruskal_max};
use super::unionfind::UnionFind;
use super::util::{HasMax, HasZero};

/// 辺のコストとして使える型
///
/// `T::max_value()`は到達不能を表す値として使われる.
pub trait Weight: Copy + Ord + Add<Output = Self> + HasZero + HasMax {}
impl<T: Copy + Ord + Add<Output = T> + HasZero + HasMax> Weight for T {}

/// 重み付きの辺
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge<T> {
    pub from: usize,
    pub to: usize,
    pub weight: T,
}

impl<T> Edge<T> {
    /// 端点`v`の反対側の端点を返す
    #[must_use]
    pub fn opposite(&self, v: usize) -> usize {
        if self.from == v {
            self.to
        } else {
            self.from
        }
    }
}

/// 頂点`0..n`を持つ重み付き無向グラフ
///
/// 辺は`from <= to`に揃えて記録され, 両端の隣接リストに入る.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    adj: Vec<Vec<Edge<T>>>,
    edges: Vec<Edge<T>>,
    dsu: Option<UnionFind>,
}

impl<T: Weight> Graph<T> {
    /// 頂点数`n`の辺の無いグラフを作る
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![vec![]; n],
            edges: vec![],
            dsu: None,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 追加された順の辺の列
    #[must_use]
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// 頂点`v`に接する辺の列
    #[must_use]
    pub fn adjacency(&self, v: usize) -> &[Edge<T>] {
        &self.adj[v]
    }

    fn check_vertex(&self, v: usize) -> Result<()> {
        if v >= self.vertex_count() {
            return Err(Error::out_of_range(v, self.vertex_count()));
        }
        Ok(())
    }

    /// 頂点`a`, `b`を結ぶコスト`weight`の辺を追加する.
    ///
    /// 端点が範囲外なら`Error::OutOfRange`を返し, グラフは変わらない.
    /// `setup_dsu`の後なら素集合データ構造にも反映する.
    ///
    /// # Time complexity
    ///
    /// - 償却 *O*(α(*n*))
    pub fn add_edge(&mut self, a: usize, b: usize, weight: T) -> Result<()> {
        if let Err(e) = self.check_vertex(a).and(self.check_vertex(b)) {
            log::debug!("graph: rejected edge ({a}, {b}) with {} vertices", self.vertex_count());
            return Err(e);
        }
        let edge = Edge {
            from: a.min(b),
            to: a.max(b),
            weight,
        };
        self.adj[a].push(edge);
        if a != b {
            self.adj[b].push(edge);
        }
        self.edges.push(edge);
        if let Some(dsu) = &mut self.dsu {
            dsu.unite(a, b);
        }
        Ok(())
    }

    /// 頂点`start`からの最短距離をダイクストラ法で求める. 到達できない頂点は`T::max_value()`.
    ///
    /// # Constraints
    ///
    /// - 辺のコストは非負
    ///
    /// # Time complexity
    ///
    /// - *O*(*E* log *V*)
    pub fn dijkstra_from(&self, start: usize) -> Result<Box<[T]>> {
        self.check_vertex(start)?;
        Ok(dijkstra(&self.adj, start))
    }

    /// 全点対の最短距離を求める. 到達できない組は`T::max_value()`.
    ///
    /// 頂点数が800を超えるなら`Error::InvalidArgument`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(*V*³)
    pub fn floyd_warshall(&self) -> Result<Vec<Vec<T>>> {
        floyd_warshall(&self.adj)
    }

    /// 頂点`start`から幅優先探索し, 最初に見つけた経路のコストの和を返す. 到達できない頂点は`None`.
    ///
    /// 木の上や全ての辺のコストが等しいときは最短距離に一致するが, 一般には一致しない.
    ///
    /// # Time complexity
    ///
    /// - *O*(*V* + *E*)
    pub fn bfs_from(&self, start: usize) -> Result<Box<[Option<T>]>> {
        self.check_vertex(start)?;
        Ok(bfs(&self.adj, start))
    }

    /// 二部グラフかどうか判定する. 自己ループがあれば二部グラフではない.
    ///
    /// # Time complexity
    ///
    /// - *O*(*V* + *E*)
    #[must_use]
    pub fn is_bipartite(&self) -> bool {
        let n = self.vertex_count();
        let mut color: Vec<Option<bool>> = vec![None; n];
        let mut stack = vec![];
        for s in 0..n {
            if color[s].is_some() {
                continue;
            }
            color[s] = Some(false);
            stack.push(s);
            while let Some(v) = stack.pop() {
                let c = color[v] == Some(true);
                for e in &self.adj[v] {
                    let u = e.opposite(v);
                    match color[u] {
                        None => {
                            color[u] = Some(!c);
                            stack.push(u);
                        }
                        Some(d) if d == c => return false,
                        Some(_) => {}
                    }
                }
            }
        }
        true
    }

    /// 木の直径 (最も遠い2頂点間の経路のコストの和) を求める.
    ///
    /// 辺の数が`n - 1`でないか, 連結でないなら`Error::InvalidArgument`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(*V*)
    pub fn tree_diameter(&self) -> Result<T> {
        let n = self.vertex_count();
        if n == 0 || self.edges.len() != n - 1 {
            return Err(Error::invalid(format!(
                "a tree with {n} vertices cannot have {} edges",
                self.edges.len()
            )));
        }
        let farthest = |start: usize| -> Result<(usize, T)> {
            let mut best = (start, T::zero());
            for (v, d) in bfs(&self.adj, start).iter().copied().enumerate() {
                let d = d.ok_or_else(|| Error::invalid("the graph is not connected"))?;
                if d > best.1 {
                    best = (v, d);
                }
            }
            Ok(best)
        };
        let (v, _) = farthest(0)?;
        Ok(farthest(v)?.1)
    }

    /// 最小全域木 (森) のコストの和を求める.
    ///
    /// # Time complexity
    ///
    /// - *O*(*E* log *E*)
    #[must_use]
    pub fn min_spanning_tree_weight(&self) -> T {
        kruskal(self.vertex_count(), &self.edges)
            .fold(T::zero(), |acc, i| acc + self.edges[i].weight)
    }

    /// 最大全域木 (森) のコストの和を求める.
    ///
    /// # Time complexity
    ///
    /// - *O*(*E* log *E*)
    #[must_use]
    pub fn max_spanning_tree_weight(&self) -> T {
        kruskal_max(self.vertex_count(), &self.edges)
            .fold(T::zero(), |acc, i| acc + self.edges[i].weight)
    }

    /// 補グラフを作る. 新しい辺のコストは全て0.
    ///
    /// # Time complexity
    ///
    /// - *O*(*V*² + *E*)
    #[must_use]
    pub fn complement(&self) -> Self {
        let n = self.vertex_count();
        let present = self
            .edges
            .iter()
            .map(|e| (e.from, e.to))
            .collect::<HashSet<_>>();
        let mut g = Self::new(n);
        for i in 0..n {
            for j in i + 1..n {
                if !present.contains(&(i, j)) {
                    log::trace!("complement edge ({i}, {j})");
                    let edge = Edge {
                        from: i,
                        to: j,
                        weight: T::zero(),
                    };
                    g.adj[i].push(edge);
                    g.adj[j].push(edge);
                    g.edges.push(edge);
                }
            }
        }
        g
    }

    /// 現在の辺から連結成分を管理する素集合データ構造を作る. 以降に追加した辺も反映される.
    ///
    /// # Time complexity
    ///
    /// - *O*(*V* + *E* α(*V*))
    pub fn setup_dsu(&mut self) {
        log::debug!(
            "graph: building disjoint set over {} vertices and {} edges",
            self.vertex_count(),
            self.edges.len()
        );
        let mut dsu = UnionFind::new(self.vertex_count());
        for e in &self.edges {
            dsu.unite(e.from, e.to);
        }
        self.dsu = Some(dsu);
    }

    /// `setup_dsu`で作った素集合データ構造
    #[must_use]
    pub fn disjoint_set(&self) -> Option<&UnionFind> {
        self.dsu.as_ref()
    }

    fn dsu_mut(&mut self) -> Result<&mut UnionFind> {
        self.dsu
            .as_mut()
            .ok_or(Error::PreconditionFailed("Graph::setup_dsu has not been called"))
    }

    /// 頂点`a`, `b`が連結か判定する.
    ///
    /// `setup_dsu`の前なら`Error::PreconditionFailed`を返す.
    pub fn same(&mut self, a: usize, b: usize) -> Result<bool> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        Ok(self.dsu_mut()?.same(a, b))
    }

    /// 連結成分を`代表 -> 頂点の列 (昇順)`の形で列挙する.
    ///
    /// `setup_dsu`の前なら`Error::PreconditionFailed`を返す.
    pub fn connected_components(&mut self) -> Result<HashMap<usize, Vec<usize>>> {
        Ok(self.dsu_mut()?.find_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn edges_and_errors() {
        let mut g = Graph::new(3);
        g.add_edge(2, 0, 5i64).unwrap();
        g.add_edge(1, 1, 1).unwrap();
        assert_eq!(g.add_edge(0, 3, 1), Err(Error::out_of_range(3, 3)));
        assert_eq!(
            g.edges(),
            &[
                Edge { from: 0, to: 2, weight: 5 },
                Edge { from: 1, to: 1, weight: 1 }
            ]
        );
        assert_eq!(g.adjacency(2).len(), 1);
        assert_eq!(g.adjacency(1).len(), 1);
        assert_eq!(g.edge_count(), 2);
        assert!(g.dijkstra_from(3).is_err());
    }

    #[test]
    fn shortest_paths() {
        let mut g = Graph::new(5);
        for (a, b, w) in [(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 5)] {
            g.add_edge(a, b, w).unwrap();
        }
        assert_eq!(g.dijkstra_from(0).unwrap().as_ref(), &[0, 3, 1, 8, i32::MAX]);
        assert_eq!(g.dijkstra_from(3).unwrap().as_ref(), &[8, 5, 7, 0, i32::MAX]);
        let d = g.floyd_warshall().unwrap();
        for (s, row) in d.iter().enumerate() {
            assert_eq!(row.as_slice(), g.dijkstra_from(s).unwrap().as_ref());
        }
        assert_eq!(
            g.bfs_from(0).unwrap().as_ref(),
            &[Some(0), Some(4), Some(1), Some(9), None]
        );
    }

    #[test]
    fn bipartite() {
        let mut g = Graph::new(6);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (4, 5)] {
            g.add_edge(a, b, 1u32).unwrap();
        }
        assert!(g.is_bipartite());
        g.add_edge(0, 2, 1).unwrap();
        assert!(!g.is_bipartite());
        let mut h = Graph::new(2);
        h.add_edge(1, 1, 0u32).unwrap();
        assert!(!h.is_bipartite());
    }

    #[test]
    fn diameter() {
        let mut g = Graph::new(6);
        for (a, b, w) in [(0, 1, 3), (1, 2, 4), (1, 3, 1), (3, 4, 7), (0, 5, 2)] {
            g.add_edge(a, b, w).unwrap();
        }
        assert_eq!(g.tree_diameter(), Ok(7 + 1 + 3 + 2));
        g.add_edge(2, 5, 1).unwrap();
        assert!(matches!(g.tree_diameter(), Err(Error::InvalidArgument(_))));

        let mut h = Graph::new(4);
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            h.add_edge(a, b, 1u64).unwrap();
        }
        assert!(matches!(h.tree_diameter(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn spanning_trees() {
        let mut g = Graph::new(4);
        for (a, b, w) in [(0, 1, 4), (0, 2, 2), (0, 3, 3), (1, 2, 6), (1, 3, 8), (2, 3, 1)] {
            g.add_edge(a, b, w).unwrap();
        }
        assert_eq!(g.min_spanning_tree_weight(), 1 + 2 + 4);
        assert_eq!(g.max_spanning_tree_weight(), 8 + 6 + 4);
    }

    #[test]
    fn complement() {
        let mut g = Graph::new(4);
        g.add_edge(1, 0, 7u8).unwrap();
        g.add_edge(2, 3, 7).unwrap();
        let c = g.complement();
        let pairs = c.edges().iter().map(|e| (e.from, e.to, e.weight)).collect::<Vec<_>>();
        assert_eq!(pairs, [(0, 2, 0), (0, 3, 0), (1, 2, 0), (1, 3, 0)]);
        assert_eq!(c.adjacency(0).len(), 2);
    }

    #[test]
    fn components() {
        let mut g = Graph::new(6);
        for (a, b) in [(0, 1), (2, 3), (1, 3), (4, 5)] {
            g.add_edge(a, b, 1i32).unwrap();
        }
        assert!(g.disjoint_set().is_none());
        assert!(matches!(g.same(0, 3), Err(Error::PreconditionFailed(_))));
        assert!(matches!(g.connected_components(), Err(Error::PreconditionFailed(_))));
        g.setup_dsu();
        assert_eq!(g.same(0, 3), Ok(true));
        assert_eq!(g.same(0, 4), Ok(false));
        let mut sizes = g
            .connected_components()
            .unwrap()
            .into_values()
            .map(|v| v.len())
            .collect::<Vec<_>>();
        sizes.sort_unstable();
        assert_eq!(sizes, [2, 4]);
        g.add_edge(3, 4, 1).unwrap();
        assert_eq!(g.same(0, 5), Ok(true));
        assert_eq!(g.disjoint_set().map(UnionFind::count), Some(1));
    }

    /// 素朴なプリム法
    fn prim(n: usize, edges: &[Edge<u64>]) -> u64 {
        let mut used = vec![false; n];
        used[0] = true;
        let mut total = 0;
        for _ in 1..n {
            let best = edges
                .iter()
                .filter(|e| used[e.from] != used[e.to])
                .min_by_key(|e| e.weight)
                .copied();
            let Some(e) = best else { break };
            used[e.from] = true;
            used[e.to] = true;
            total += e.weight;
        }
        total
    }

    #[test]
    fn kruskal_matches_prim() {
        let mut rng = ChaCha20Rng::from_seed([7; 32]);
        for _ in 0..100 {
            let n = rng.gen_range(1..12);
            let mut g = Graph::new(n);
            // 連結にするための道
            for v in 1..n {
                g.add_edge(v - 1, v, rng.gen_range(0..100u64)).unwrap();
            }
            for _ in 0..rng.gen_range(0..30) {
                let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
                g.add_edge(a, b, rng.gen_range(0..100)).unwrap();
            }
            assert_eq!(g.min_spanning_tree_weight(), prim(n, g.edges()));
        }
    }
}
