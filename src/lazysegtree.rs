use std::ops::RangeBounds;

use super::error::{Error, Result};
use super::segmenttree::Monoid;
use super::util::resolve;

/// 作用付きモノイド
///
/// 以下の条件を満たす.
/// - `self.map(&self.map(x, a, len), b, len) == self.map(x, &self.comp(a, b), len)`
/// - 長さの等しい区間について`map`は`op`と可換である
pub trait LazyMonoid: Monoid {
    /// 作用素の型
    type F: Clone;

    /// `older`を作用させてから`newer`を作用させる作用素を返す
    fn comp(&self, older: &Self::F, newer: &Self::F) -> Self::F;
    /// 長さ`len`の区間の値`x`に`f`を作用させる
    fn map(&self, x: &Self::T, f: &Self::F, len: usize) -> Self::T;
}

/// 遅延伝搬セグメントツリー
///
/// 特定の条件を満たすクエリの区間更新・区間取得が可能である.
///
/// `SegmentTree`と同じく葉の数`size`を2冪に切り上げた完全二分木で,
/// ノード`k`の子は`2k + 1`, `2k + 2`. 未伝搬の作用素を`lazy[k]`に持つ.
pub struct LazySegmentTree<M: LazyMonoid> {
    data: Box<[M::T]>,
    lazy: Box<[Option<M::F>]>,
    size: usize,
    len: usize,
    monoid: M,
}

impl<M: LazyMonoid> LazySegmentTree<M> {
    /// 全ての要素が`monoid.e()`で初期化された長さ`n`のLazySegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(monoid: M, n: usize) -> Self {
        let size = n.next_power_of_two();
        Self {
            data: (0..2 * size - 1).map(|_| monoid.e()).collect(),
            lazy: (0..2 * size - 1).map(|_| None).collect(),
            size,
            len: n,
            monoid,
        }
    }

    /// 配列`vec`からLazySegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn from_vec(monoid: M, vec: Vec<M::T>) -> Self {
        let mut seg = Self::new(monoid, vec.len());
        for (i, v) in vec.into_iter().enumerate() {
            seg.data[seg.size - 1 + i] = v;
        }
        seg.rebuild();
        seg
    }

    /// 全ての値を`values`で置き換える. 未伝搬の作用素は捨てられる.
    ///
    /// 長さが`self.len()`と異なるときは`Error::InvalidArgument`を返し, 何も変更しない.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    pub fn build(&mut self, values: &[M::T]) -> Result<()> {
        if values.len() != self.len {
            return Err(Error::invalid(format!(
                "lazy segment tree of length {} cannot be built from {} values",
                self.len,
                values.len()
            )));
        }
        let offset = self.size - 1;
        self.data[offset..offset + self.len].clone_from_slice(values);
        for v in &mut self.data[offset + self.len..] {
            *v = self.monoid.e();
        }
        self.lazy.fill(None);
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        for k in (0..self.size - 1).rev() {
            self.data[k] = self.monoid.op(&self.data[2 * k + 1], &self.data[2 * k + 2]);
        }
    }

    /// 列の長さを返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 列が空かどうか判定する
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// ノード`k` (長さ`width`) の作用素を自身に適用し, 子に積む.
    fn evaluate(&mut self, k: usize, width: usize) {
        let Some(f) = self.lazy[k].take() else {
            return;
        };
        self.data[k] = self.monoid.map(&self.data[k], &f, width);
        if k < self.size - 1 {
            for c in [2 * k + 1, 2 * k + 2] {
                self.lazy[c] = Some(match self.lazy[c].take() {
                    Some(g) => self.monoid.comp(&g, &f),
                    None => f.clone(),
                });
            }
        }
    }

    /// 子を評価してからノード`k`の値を計算し直す.
    fn pull(&mut self, k: usize, width: usize) {
        let half = width / 2;
        self.evaluate(2 * k + 1, half);
        self.evaluate(2 * k + 2, half);
        self.data[k] = self.monoid.op(&self.data[2 * k + 1], &self.data[2 * k + 2]);
    }

    /// 指定した区間に作用素`f`を適用する. 空区間なら何もしない.
    ///
    /// # Constraints
    ///
    /// - `range`の右端は`self.len()`以下である.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn apply(&mut self, range: impl RangeBounds<usize>, f: &M::F) {
        let (a, b) = resolve(&range, self.len());
        debug_assert!(b <= self.len());
        if a >= b {
            return;
        }
        self.apply_rec(0, 0, self.size, a, b, f);
    }

    fn apply_rec(&mut self, k: usize, l: usize, r: usize, a: usize, b: usize, f: &M::F) {
        self.evaluate(k, r - l);
        if b <= l || r <= a {
            return;
        }
        if a <= l && r <= b {
            self.lazy[k] = Some(f.clone());
            self.evaluate(k, r - l);
            return;
        }
        let mid = (l + r) / 2;
        self.apply_rec(2 * k + 1, l, mid, a, b, f);
        self.apply_rec(2 * k + 2, mid, r, a, b, f);
        self.data[k] = self.monoid.op(&self.data[2 * k + 1], &self.data[2 * k + 2]);
    }

    /// 指定した区間の値の総積を計算する. 空区間なら単位元.
    ///
    /// # Constraints
    ///
    /// - `range`の右端は`self.len()`以下である.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn prod(&mut self, range: impl RangeBounds<usize>) -> M::T {
        let (a, b) = resolve(&range, self.len());
        debug_assert!(b <= self.len());
        if a >= b {
            return self.monoid.e();
        }
        self.prod_rec(0, 0, self.size, a, b)
    }

    fn prod_rec(&mut self, k: usize, l: usize, r: usize, a: usize, b: usize) -> M::T {
        self.evaluate(k, r - l);
        if b <= l || r <= a {
            return self.monoid.e();
        }
        if a <= l && r <= b {
            return self.data[k].clone();
        }
        let mid = (l + r) / 2;
        let left = self.prod_rec(2 * k + 1, l, mid, a, b);
        let right = self.prod_rec(2 * k + 2, mid, r, a, b);
        self.monoid.op(&left, &right)
    }

    /// 指定した位置の値を取得する.
    ///
    /// `index >= self.len()`なら`Error::OutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn get(&mut self, index: usize) -> Result<M::T> {
        if index >= self.len {
            return Err(Error::out_of_range(index, self.len));
        }
        let (mut k, mut l, mut r) = (0, 0, self.size);
        loop {
            self.evaluate(k, r - l);
            if r - l == 1 {
                return Ok(self.data[k].clone());
            }
            let mid = (l + r) / 2;
            if index < mid {
                (k, r) = (2 * k + 1, mid);
            } else {
                (k, l) = (2 * k + 2, mid);
            }
        }
    }

    /// 指定した位置の値を変更する.
    ///
    /// `index >= self.len()`なら`Error::OutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn set(&mut self, index: usize, item: M::T) -> Result<()> {
        if index >= self.len {
            return Err(Error::out_of_range(index, self.len));
        }
        self.set_rec(0, 0, self.size, index, item);
        Ok(())
    }

    fn set_rec(&mut self, k: usize, l: usize, r: usize, index: usize, item: M::T) {
        self.evaluate(k, r - l);
        if r - l == 1 {
            self.data[k] = item;
            return;
        }
        let mid = (l + r) / 2;
        if index < mid {
            self.set_rec(2 * k + 1, l, mid, index, item);
        } else {
            self.set_rec(2 * k + 2, mid, r, index, item);
        }
        self.pull(k, r - l);
    }
}

#[cfg(test)]
mod tests {
    use super::super::modint::ModInt;
    use super::super::util::{Associativity, Identity, Magma};
    use super::*;
    use proptest::prelude::*;

    /// 区間加算・区間最小値
    struct MinAdd;
    impl Magma for MinAdd {
        type T = i64;
        fn op(&self, a: &i64, b: &i64) -> i64 {
            *a.min(b)
        }
    }
    impl Identity for MinAdd {
        fn e(&self) -> i64 {
            i64::MAX
        }
    }
    impl Associativity for MinAdd {}
    impl LazyMonoid for MinAdd {
        type F = i64;
        fn comp(&self, a: &i64, b: &i64) -> i64 {
            a + b
        }
        fn map(&self, &x: &i64, f: &i64, _len: usize) -> i64 {
            if x == i64::MAX {
                x
            } else {
                x + f
            }
        }
    }

    #[test]
    fn range_add_range_min() {
        let mut seg = LazySegmentTree::new(MinAdd, 5);
        seg.build(&[5, 3, 4, 1, 2]).unwrap();
        assert_eq!(seg.prod(0..5), 1);
        seg.apply(0..3, &10);
        assert_eq!(seg.prod(0..5), 1);
        assert_eq!(seg.prod(0..3), 13);
        assert_eq!(seg.get(0), Ok(15));
        assert_eq!(seg.get(5), Err(Error::out_of_range(5, 5)));
        assert!(matches!(seg.build(&[0; 4]), Err(Error::InvalidArgument(_))));
        assert_eq!(seg.prod(3..3), i64::MAX);
    }

    #[test]
    fn minmax_add() {
        struct TestMonoid;
        impl Magma for TestMonoid {
            type T = (i32, i32);
            fn op(&self, &a: &(i32, i32), &b: &(i32, i32)) -> (i32, i32) {
                (a.0.min(b.0), a.1.max(b.1))
            }
        }
        impl Identity for TestMonoid {
            fn e(&self) -> (i32, i32) {
                (i32::MAX, i32::MIN)
            }
        }
        impl Associativity for TestMonoid {}
        impl LazyMonoid for TestMonoid {
            type F = i32;
            fn comp(&self, &g: &i32, &f: &i32) -> i32 {
                g + f
            }
            fn map(&self, &x: &(i32, i32), &f: &i32, _len: usize) -> (i32, i32) {
                (
                    if x.0 == i32::MAX { i32::MAX } else { x.0 + f },
                    if x.1 == i32::MIN { i32::MIN } else { x.1 + f },
                )
            }
        }

        let mut seg = LazySegmentTree::from_vec(TestMonoid, (0..10).map(|i| (i, i)).collect());
        assert_eq!(seg.prod(2..7), (2, 6));
        assert_eq!(seg.prod(5..), (5, 9));
        seg.apply(1..4, &12);
        assert_eq!(seg.prod(2..7), (4, 15));
        assert_eq!(seg.prod(5..), (5, 9));
        seg.apply(3..8, &-20);
        assert_eq!(seg.prod(2..7), (-16, 14));
        assert_eq!(seg.prod(5..), (-15, 9));
        seg.set(4, (100, 100)).unwrap();
        assert_eq!(seg.prod(2..7), (-15, 100));
        assert_eq!(seg.get(3), Ok((-5, -5)));
    }

    type Mint = ModInt<998_244_353>;

    /// 区間アフィン変換・区間和
    struct AffineSum;
    impl Magma for AffineSum {
        type T = Mint;
        fn op(&self, a: &Mint, b: &Mint) -> Mint {
            *a + *b
        }
    }
    impl Identity for AffineSum {
        fn e(&self) -> Mint {
            Mint::new(0)
        }
    }
    impl Associativity for AffineSum {}
    impl LazyMonoid for AffineSum {
        type F = (Mint, Mint);
        fn comp(&self, &(a1, b1): &(Mint, Mint), &(a2, b2): &(Mint, Mint)) -> (Mint, Mint) {
            (a2 * a1, a2 * b1 + b2)
        }
        fn map(&self, &x: &Mint, &(a, b): &(Mint, Mint), len: usize) -> Mint {
            a * x + b * Mint::from(len)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn affine_matches_naive(
            init in proptest::collection::vec(0u32..1000, 1..30),
            ops in proptest::collection::vec((0u8..3, 0usize..30, 0usize..31, 0u32..1000, 0u32..1000), 0..50),
        ) {
            let n = init.len();
            let init = init.into_iter().map(Mint::new).collect::<Vec<_>>();
            let mut seg = LazySegmentTree::from_vec(AffineSum, init.clone());
            let mut naive = init;
            for &(kind, i, j, a, b) in &ops {
                let i = i % n;
                let j = j.min(n);
                let (a, b) = (Mint::new(a), Mint::new(b));
                match kind {
                    0 => {
                        seg.apply(i..j, &(a, b));
                        for x in naive.iter_mut().take(j).skip(i) {
                            *x = a * *x + b;
                        }
                    }
                    1 => {
                        seg.set(i, a).unwrap();
                        naive[i] = a;
                    }
                    _ => {
                        let expected = naive
                            .iter()
                            .take(j)
                            .skip(i)
                            .fold(Mint::new(0), |acc, &x| acc + x);
                        prop_assert_eq!(seg.prod(i..j), expected);
                    }
                }
                for (k, &x) in naive.iter().enumerate() {
                    prop_assert_eq!(seg.get(k).unwrap(), x);
                }
            }
        }
    }
}
