use std::collections::HashMap;

/// 群を表すトレイト
pub trait Group {
    /// 群の元を表現する型
    type T: Eq + Clone;

    /// 群の単位元を返す
    #[must_use]
    fn e(&self) -> Self::T;

    /// 逆元を求める
    #[must_use]
    fn inv(&self, a: &Self::T) -> Self::T;

    /// 群の演算
    ///
    /// 以下の条件を満たす.
    /// - 任意の `x`, `y`, `z` について `self.op(&self.op(&x, &y), &z) == self.op(&x, &self.op(&y, &z))`
    /// - 任意の `x` について `self.op(&self.e(), &x) == x && self.op(&x, &self.e()) == x`
    #[must_use]
    fn op(&self, a: &Self::T, b: &Self::T) -> Self::T;

    /// 逆元との積を求める
    ///
    /// `self.op(a, &self.inv(b))` と同じ
    #[must_use]
    fn opinv(&self, a: &Self::T, b: &Self::T) -> Self::T {
        self.op(a, &self.inv(b))
    }

    /// 逆元の積を求める
    ///
    /// `self.op(&self.inv(a), b)` と同じ
    #[must_use]
    fn invop(&self, a: &Self::T, b: &Self::T) -> Self::T {
        self.op(&self.inv(a), b)
    }
}

/// ポテンシャル付き素集合データ構造
///
/// 各要素`x`に群`group`の元`p(x)`が仮想的に割り当てられていて,
/// 「`p(x)⁻¹ p(y) == w`」という制約を追加しながら, 同じグループ内の差を求められる.
/// 加法群なら`p(y) - p(x) == w`という制約になる.
pub struct WeightedUnionFind<G: Group> {
    // 根なら -(要素数), そうでなければ親
    parent: Box<[isize]>,
    // 親から見た差: p(x) = p(parent) * weight[x]
    weight: Box<[G::T]>,
    group: G,
}

impl<G: Group> WeightedUnionFind<G> {
    /// `n`個の要素からなる群`group`による`WeightedUnionFind`を作成する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(group: G, n: usize) -> Self {
        Self {
            parent: vec![-1; n].into_boxed_slice(),
            weight: std::iter::repeat_with(|| group.e()).take(n).collect(),
            group,
        }
    }

    /// 要素数を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// 要素`a`が属するグループの代表を返す. 経路上の差を根からの差に書き換える.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    #[must_use]
    pub fn root(&mut self, a: usize) -> usize {
        debug_assert!(a < self.len());
        if self.parent[a] < 0 {
            return a;
        }
        let p = self.parent[a] as usize;
        let r = self.root(p);
        // この時点で weight[p] は根からの差
        if p != r {
            self.weight[a] = self.group.op(&self.weight[p], &self.weight[a]);
            self.parent[a] = r as isize;
        }
        r
    }

    /// 根から見た`p(a)`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    #[must_use]
    pub fn weight(&mut self, a: usize) -> G::T {
        let r = self.root(a);
        if r == a {
            self.group.e()
        } else {
            self.weight[a].clone()
        }
    }

    /// `p(a)⁻¹ p(b)` (加法群なら`p(b) - p(a)`) を返す. 別のグループに属するなら`None`.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    #[must_use]
    pub fn weight_difference(&mut self, a: usize, b: usize) -> Option<G::T> {
        if !self.same(a, b) {
            return None;
        }
        let wa = self.weight(a);
        let wb = self.weight(b);
        Some(self.group.invop(&wa, &wb))
    }

    /// `p(a)⁻¹ p(b) == w`という制約を追加し, 2つのグループをマージする.
    ///
    /// 既に同じグループに属していて制約が矛盾するときは何もせずに`false`を返す.
    /// それ以外 (新たにマージした, または既存の情報と整合した) は`true`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    pub fn unite(&mut self, a: usize, b: usize, w: &G::T) -> bool {
        debug_assert!(a < self.len());
        debug_assert!(b < self.len());
        let ra = self.root(a);
        let rb = self.root(b);
        let wa = self.weight(a);
        let wb = self.weight(b);
        if ra == rb {
            let consistent = &self.group.invop(&wa, &wb) == w;
            if !consistent {
                log::debug!("weighted union-find: contradicting constraint between {a} and {b}");
            }
            return consistent;
        }
        if self.parent[ra] <= self.parent[rb] {
            // rb を ra の下に: p(rb) = p(ra) * wa * w * wb⁻¹
            let d = self.group.opinv(&self.group.op(&wa, w), &wb);
            self.parent[ra] += self.parent[rb];
            self.parent[rb] = ra as isize;
            self.weight[rb] = d;
        } else {
            // ra を rb の下に: p(ra) = p(rb) * wb * w⁻¹ * wa⁻¹
            let d = self.group.opinv(&self.group.opinv(&wb, w), &wa);
            self.parent[rb] += self.parent[ra];
            self.parent[ra] = rb as isize;
            self.weight[ra] = d;
        }
        true
    }

    /// 要素`a`, `b`が同じグループに属するか判定する.
    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }

    /// 要素`a`が属するグループの要素数を返す.
    #[must_use]
    pub fn size(&mut self, a: usize) -> usize {
        let r = self.root(a);
        -self.parent[r] as usize
    }

    /// 要素`a`と同じグループに属する要素を昇順に列挙する.
    #[must_use]
    pub fn members(&mut self, a: usize) -> Vec<usize> {
        let r = self.root(a);
        (0..self.len()).filter(|&i| self.root(i) == r).collect()
    }

    /// 全てのグループを`代表 -> 要素の列 (昇順)`の形で列挙する.
    #[must_use]
    pub fn find_all(&mut self) -> HashMap<usize, Vec<usize>> {
        let mut sets: HashMap<usize, Vec<usize>> = HashMap::new();
        for i in 0..self.len() {
            let r = self.root(i);
            sets.entry(r).or_default().push(i);
        }
        sets
    }

    /// 全ての要素を別々のグループに戻し, 差の情報も消す.
    pub fn clear(&mut self) {
        self.parent.fill(-1);
        for w in self.weight.iter_mut() {
            *w = self.group.e();
        }
    }
}
