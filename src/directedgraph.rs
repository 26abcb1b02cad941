use super::dijkstra::{bfs, dijkstra, floyd_warshall};
use super::error::{Error, Result};
use super::graph::{Edge, Weight};
use super::topologicalsort::{topological_sort, unique_topological_sort};

/// 頂点`0..n`を持つ重み付き有向グラフ
///
/// 逆向きの隣接リストも持つ. `reverse_adjacency(v)`の辺は向きを変えずに記録され, `to == v`である.
#[derive(Clone, Debug)]
pub struct DirectedGraph<T> {
    adj: Vec<Vec<Edge<T>>>,
    radj: Vec<Vec<Edge<T>>>,
    edges: Vec<Edge<T>>,
}

impl<T: Weight> DirectedGraph<T> {
    /// 頂点数`n`の辺の無いグラフを作る
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![vec![]; n],
            radj: vec![vec![]; n],
            edges: vec![],
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

    /// 頂点`v`から出る辺の列
    #[must_use]
    pub fn adjacency(&self, v: usize) -> &[Edge<T>] {
        &self.adj[v]
    }

    /// 頂点`v`に入る辺の列
    #[must_use]
    pub fn reverse_adjacency(&self, v: usize) -> &[Edge<T>] {
        &self.radj[v]
    }

    fn check_vertex(&self, v: usize) -> Result<()> {
        if v >= self.vertex_count() {
            return Err(Error::out_of_range(v, self.vertex_count()));
        }
        Ok(())
    }

    /// `from`から`to`へのコスト`weight`の辺を追加する.
    ///
    /// 端点が範囲外なら`Error::OutOfRange`を返し, グラフは変わらない.
    ///
    /// # Time complexity
    ///
    /// - 償却 *O*(1)
    pub fn add_edge(&mut self, from: usize, to: usize, weight: T) -> Result<()> {
        if let Err(e) = self.check_vertex(from).and(self.check_vertex(to)) {
            log::debug!(
                "directed graph: rejected edge ({from} -> {to}) with {} vertices",
                self.vertex_count()
            );
            return Err(e);
        }
        let edge = Edge { from, to, weight };
        self.adj[from].push(edge);
        self.radj[to].push(edge);
        self.edges.push(edge);
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

    /// 各頂点から頂点`goal`への最短距離を, 逆向きの辺を辿るダイクストラ法で求める.
    ///
    /// # Time complexity
    ///
    /// - *O*(*E* log *V*)
    pub fn dijkstra_to(&self, goal: usize) -> Result<Box<[T]>> {
        self.check_vertex(goal)?;
        Ok(dijkstra(&self.radj, goal))
    }

    /// 全点対の最短距離を求める. `result[i][j]`は`i`から`j`への距離.
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
    /// # Time complexity
    ///
    /// - *O*(*V* + *E*)
    pub fn bfs_from(&self, start: usize) -> Result<Box<[Option<T>]>> {
        self.check_vertex(start)?;
        Ok(bfs(&self.adj, start))
    }

    /// トポロジカルソートをする. 閉路があれば`Err(途中までの順序)`.
    pub fn try_topological_sort(&self) -> std::result::Result<Vec<usize>, Vec<usize>> {
        topological_sort(&self.adj)
    }

    /// 順序が一意に定まるときだけ成功するトポロジカルソートをする.
    pub fn try_unique_topological_sort(&self) -> std::result::Result<Vec<usize>, Vec<usize>> {
        unique_topological_sort(&self.adj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_paths() {
        let mut g = DirectedGraph::new(4);
        for (a, b, w) in [(0, 1, 2i64), (0, 2, 5), (1, 2, 1), (2, 3, 2)] {
            g.add_edge(a, b, w).unwrap();
        }
        assert_eq!(g.dijkstra_from(0).unwrap().as_ref(), &[0, 2, 3, 5]);
        assert_eq!(g.dijkstra_from(2).unwrap().as_ref(), &[i64::MAX, i64::MAX, 0, 2]);
        assert_eq!(g.dijkstra_to(3).unwrap().as_ref(), &[5, 3, 2, 0]);
        assert_eq!(g.floyd_warshall().unwrap()[0], [0, 2, 3, 5]);
        assert_eq!(
            g.bfs_from(0).unwrap().as_ref(),
            &[Some(0), Some(2), Some(5), Some(7)]
        );
        assert_eq!(g.reverse_adjacency(2).len(), 2);
        assert_eq!(g.adjacency(0).len(), 2);
        assert_eq!(g.add_edge(4, 0, 1), Err(Error::out_of_range(4, 4)));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn unique_order() {
        let mut g = DirectedGraph::new(4);
        for (a, b) in [(0, 1), (1, 2), (0, 2), (1, 3), (2, 3)] {
            g.add_edge(a, b, 1u32).unwrap();
        }
        assert_eq!(g.try_unique_topological_sort(), Ok(vec![0, 1, 2, 3]));

        let mut g = DirectedGraph::new(4);
        for (a, b) in [(0, 1), (1, 2), (0, 2), (0, 3)] {
            g.add_edge(a, b, 1u32).unwrap();
        }
        assert_eq!(g.try_unique_topological_sort(), Err(vec![0]));
        assert_eq!(g.try_topological_sort(), Ok(vec![0, 1, 3, 2]));

        g.add_edge(2, 0, 1).unwrap();
        assert_eq!(g.try_topological_sort(), Err(vec![]));
    }
}
