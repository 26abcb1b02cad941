use std::collections::HashMap;

/// 素集合データ構造
///
/// 幾つかのグループのマージとグループの所属判定を高速に行える.
/// 経路圧縮とサイズによる併合 (union by size) を行う.
///
/// 内部では各要素について, 根なら`-(グループの要素数)`, そうでなければ親の番号を持つ.
#[derive(Clone)]
pub struct UnionFind(Box<[isize]>, usize);

impl UnionFind {
    /// `n`個の要素があり, それぞれ別のグループに属しているUnionFindを作る.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self(vec![-1; n].into_boxed_slice(), n)
    }

    /// 要素の総数を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 連結成分の数を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn count(&self) -> usize {
        self.1
    }

    /// 要素`a`が属するグループと要素`b`が属するグループを1つのグループにマージし, 新しいグループの代表を返す.
    /// 最初から同じグループに属していた場合は, 何もせずにそのグループの代表を返す.
    ///
    /// 要素数の小さい方の根を大きい方の根の下に繋ぐ.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    pub fn unite(&mut self, a: usize, b: usize) -> usize {
        debug_assert!(a < self.len());
        debug_assert!(b < self.len());
        let a = self.root(a);
        let b = self.root(b);
        if a == b {
            return a;
        }
        self.1 -= 1;
        // 根の値は -size なので, 値が小さい方が大きいグループ
        let (big, small) = if self.0[a] <= self.0[b] { (a, b) } else { (b, a) };
        self.0[big] += self.0[small];
        self.0[small] = big as isize;
        big
    }

    /// 要素`a`が属するグループの代表を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    #[must_use]
    pub fn root(&mut self, mut a: usize) -> usize {
        debug_assert!(a < self.len());
        let mut b = a;
        while self.0[b] >= 0 {
            b = self.0[b] as usize;
        }
        while a != b {
            let tmp = self.0[a];
            self.0[a] = b as isize;
            a = tmp as usize;
        }
        a
    }

    /// 要素`a`が属するグループの代表を返す. 経路圧縮をしない.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn root_imu(&self, mut a: usize) -> usize {
        debug_assert!(a < self.len());
        while self.0[a] >= 0 {
            a = self.0[a] as usize;
        }
        a
    }

    /// 要素`a`が属するグループの要素数を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    #[must_use]
    pub fn size(&mut self, a: usize) -> usize {
        debug_assert!(a < self.len());
        let r = self.root(a);
        -self.0[r] as usize
    }

    /// 要素`a`が属するグループの要素数を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn size_imu(&self, a: usize) -> usize {
        debug_assert!(a < self.len());
        -self.0[self.root_imu(a)] as usize
    }

    /// 要素`a`, `b`が同じグループに属するか判定する.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    pub fn same(&mut self, a: usize, b: usize) -> bool {
        debug_assert!(a < self.len());
        debug_assert!(b < self.len());
        self.root(a) == self.root(b)
    }

    /// 要素`a`, `b`が同じグループに属するか判定する.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn same_imu(&self, a: usize, b: usize) -> bool {
        debug_assert!(a < self.len());
        debug_assert!(b < self.len());
        self.root_imu(a) == self.root_imu(b)
    }

    /// 要素`a`と同じグループに属する要素を昇順に列挙する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n* α(*n*))
    #[must_use]
    pub fn members(&mut self, a: usize) -> Vec<usize> {
        let r = self.root(a);
        (0..self.len()).filter(|&i| self.root(i) == r).collect()
    }

    /// 全てのグループを`代表 -> 要素の列 (昇順)`の形で列挙する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n* α(*n*))
    #[must_use]
    pub fn find_all(&mut self) -> HashMap<usize, Vec<usize>> {
        let mut sets: HashMap<usize, Vec<usize>> = HashMap::with_capacity(self.1);
        for i in 0..self.len() {
            let r = self.root(i);
            sets.entry(r).or_default().push(i);
        }
        sets
    }

    /// 全ての要素を別々のグループに戻す.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    pub fn clear(&mut self) {
        self.0.fill(-1);
        self.1 = self.0.len();
    }
}

impl std::fmt::Debug for UnionFind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        struct VecSet(Vec<usize>);
        impl std::fmt::Debug for VecSet {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_set().entries(&self.0).finish()
            }
        }

        let mut q = vec![vec![]; self.len()];
        for i in 0..self.len() {
            q[self.root_imu(i)].push(i);
        }
        f.debug_set()
            .entries(
                q.into_iter()
                    .filter_map(|v| if v.is_empty() { None } else { Some(VecSet(v)) }),
            )
            .finish()
    }
}

impl Default for UnionFind {
    fn default() -> Self {
        Self(vec![].into(), 0)
    }
}
