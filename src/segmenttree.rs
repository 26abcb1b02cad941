use std::ops::RangeBounds;

use super::error::{Error, Result};
use super::util::{resolve, Associativity, Identity};

pub trait Monoid: Associativity + Identity {}
impl<T: Associativity + Identity> Monoid for T {}

/// 点更新の方法を表すトレイト
///
/// `SegmentTree::apply`で, 葉の古い値`old`に`value`を作用させた新しい値を返す.
pub trait PointApply: Monoid {
    fn apply(&self, old: &Self::T, value: &Self::T) -> Self::T;
}

/// セグメント木
///
/// 1-indexedの完全二分木をそのまま平坦な配列に並べたもの.
/// 葉の数`size`は`n`以上の最小の2冪で, ノード`k`(1-indexed)は`data[k - 1]`に,
/// `i`番目の葉は`data[size - 1 + i]`に置かれる. 余った葉は単位元で埋まっている.
#[derive(Clone)]
pub struct SegmentTree<M: Monoid> {
    data: Box<[M::T]>,
    size: usize,
    len: usize,
    monoid: M,
}

impl<M: Monoid> SegmentTree<M> {
    /// 全ての要素が`monoid.e()`で初期化された長さ`n`のSegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(monoid: M, n: usize) -> Self {
        let size = n.next_power_of_two();
        Self {
            data: (0..2 * size - 1).map(|_| monoid.e()).collect(),
            size,
            len: n,
            monoid,
        }
    }

    /// 配列`vec`からSegmentTreeを構築する.
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

    /// 全ての葉を`values`で置き換え, 内部ノードを下から計算し直す.
    ///
    /// 長さが`self.len()`と異なるときは`Error::InvalidArgument`を返し, 何も変更しない.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    pub fn build(&mut self, values: &[M::T]) -> Result<()> {
        if values.len() != self.len {
            return Err(Error::invalid(format!(
                "segment tree of length {} cannot be built from {} values",
                self.len,
                values.len()
            )));
        }
        let offset = self.size - 1;
        self.data[offset..offset + self.len].clone_from_slice(values);
        for v in &mut self.data[offset + self.len..] {
            *v = self.monoid.e();
        }
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        for k in (1..self.size).rev() {
            self.data[k - 1] = self.monoid.op(&self.data[2 * k - 1], &self.data[2 * k]);
        }
    }

    /// SegmentTreeの長さを返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// SegmentTreeが空かどうか調べる
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// SegmentTreeの`index`番目の値を`value`に設定する.
    ///
    /// # Constraints
    ///
    /// - `index < self.len()`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn set(&mut self, index: usize, value: M::T) {
        debug_assert!(index < self.len());
        self.data[self.size - 1 + index] = value;
        self.update(index);
    }

    /// SegmentTreeの`index`番目の値を取得する.
    ///
    /// # Constraints
    ///
    /// - `index < self.len()`
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn get(&self, index: usize) -> &M::T {
        debug_assert!(index < self.len());
        &self.data[self.size - 1 + index]
    }

    fn update(&mut self, index: usize) {
        let mut k = (self.size + index) >> 1;
        while k > 0 {
            self.data[k - 1] = self.monoid.op(&self.data[2 * k - 1], &self.data[2 * k]);
            k >>= 1;
        }
    }

    /// SegmentTreeの`range`の範囲の要素の総積を計算する. 空区間なら単位元.
    ///
    /// # Constraints
    ///
    /// - `range`の右端は`self.len()`以下である.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn prod(&self, range: impl RangeBounds<usize>) -> M::T {
        let (l, r) = resolve(&range, self.len());
        debug_assert!(r <= self.len());
        if l >= r {
            return self.monoid.e();
        }
        let mut l = l + self.size;
        let mut r = r + self.size;
        let mut left_val = self.monoid.e();
        let mut right_val = self.monoid.e();
        while l < r {
            if l & 1 == 1 {
                left_val = self.monoid.op(&left_val, &self.data[l - 1]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                right_val = self.monoid.op(&self.data[r - 1], &right_val);
            }
            l >>= 1;
            r >>= 1;
        }
        self.monoid.op(&left_val, &right_val)
    }

    /// `f(self.prod(index..x))`だが`!f(self.prod(index..=x))`な最小の`x`を見つけるような二分探索を行う.
    ///
    /// 見つからなかった場合は`self.len()`を返す.
    ///
    /// # Constraints
    ///
    /// - `f(monoid.e())`は`true`である.
    /// - `index <= self.len()`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn binary_search(&self, index: usize, f: impl Fn(&M::T) -> bool) -> usize {
        debug_assert!(f(&self.monoid.e()));
        debug_assert!(index <= self.len());
        if index == self.len {
            return self.len;
        }
        let mut k = index + self.size;
        let mut acc = self.monoid.e();
        loop {
            while k & 1 == 0 {
                k >>= 1;
            }
            let temp = self.monoid.op(&acc, &self.data[k - 1]);
            if !f(&temp) {
                while k < self.size {
                    k <<= 1;
                    let temp = self.monoid.op(&acc, &self.data[k - 1]);
                    if f(&temp) {
                        acc = temp;
                        k += 1;
                    }
                }
                return k - self.size;
            }
            acc = temp;
            k += 1;
            if k.is_power_of_two() {
                return self.len;
            }
        }
    }
}

impl<M: PointApply> SegmentTree<M> {
    /// `index`番目の値`old`を`monoid.apply(old, value)`で更新する.
    ///
    /// # Constraints
    ///
    /// - `index < self.len()`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn apply(&mut self, index: usize, value: &M::T) {
        debug_assert!(index < self.len());
        let leaf = self.size - 1 + index;
        self.data[leaf] = self.monoid.apply(&self.data[leaf], value);
        self.update(index);
    }
}

impl<M: Monoid + Default> From<Vec<M::T>> for SegmentTree<M> {
    fn from(value: Vec<M::T>) -> Self {
        Self::from_vec(M::default(), value)
    }
}

impl<M: Monoid> AsRef<[M::T]> for SegmentTree<M> {
    fn as_ref(&self) -> &[M::T] {
        &self.data[self.size - 1..self.size - 1 + self.len]
    }
}

impl<M: Monoid> std::ops::Index<usize> for SegmentTree<M> {
    type Output = M::T;

    fn index(&self, index: usize) -> &M::T {
        self.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::super::util::Magma;
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct SumMonoid;
    impl Magma for SumMonoid {
        type T = i64;
        fn op(&self, a: &i64, b: &i64) -> i64 {
            a + b
        }
    }
    impl Associativity for SumMonoid {}
    impl Identity for SumMonoid {
        fn e(&self) -> i64 {
            0
        }
    }
    impl PointApply for SumMonoid {
        fn apply(&self, old: &i64, value: &i64) -> i64 {
            old + value
        }
    }

    /// 文字列の連結 (非可換)
    struct Concat;
    impl Magma for Concat {
        type T = String;
        fn op(&self, a: &String, b: &String) -> String {
            format!("{a}{b}")
        }
    }
    impl Associativity for Concat {}
    impl Identity for Concat {
        fn e(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn range_sum() {
        let mut seg = SegmentTree::new(SumMonoid, 5);
        seg.build(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(seg.prod(0..5), 15);
        assert_eq!(seg.prod(1..4), 9);
        seg.apply(2, &10);
        assert_eq!(seg.prod(0..5), 25);
        assert_eq!(seg.prod(0..2), 3);
        assert_eq!(seg[2], 13);
        assert_eq!(seg.prod(4..2), 0);
        assert!(matches!(seg.build(&[1, 2]), Err(Error::InvalidArgument(_))));
        assert_eq!(seg.as_ref(), &[1, 2, 13, 4, 5]);
    }

    #[test]
    fn sum() {
        let mut seg: SegmentTree<SumMonoid> = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3].into();

        assert_eq!(seg.prod(0..3), 8);
        assert_eq!(seg.prod(1..8), 28);
        assert_eq!(seg.prod(..), 39);
        assert_eq!(seg.prod(4..4), 0);
        assert_eq!(seg.binary_search(0, |&v| v < 22), 5);
        assert_eq!(seg.binary_search(1, |&v| v < 22), 6);
        assert_eq!(seg.binary_search(10, |&v| v < 22), 10);

        seg.set(4, -100);

        assert_eq!(seg.prod(0..3), 8);
        assert_eq!(seg.prod(1..8), -77);
        assert_eq!(seg.prod(..), -66);
        assert_eq!(seg.prod(4..4), 0);
        assert_eq!(seg.binary_search(0, |&v| v < 22), 10);
        assert_eq!(seg.binary_search(1, |&v| v < 22), 10);
    }

    #[test]
    fn order_is_kept() {
        let words = ["a", "b", "c", "d", "e", "f", "g"];
        let seg = SegmentTree::from_vec(Concat, words.iter().map(|s| s.to_string()).collect());
        assert_eq!(seg.prod(..), "abcdefg");
        assert_eq!(seg.prod(1..6), "bcdef");
        assert_eq!(seg.prod(3..=3), "d");
    }

    #[test]
    fn empty() {
        let seg = SegmentTree::new(SumMonoid, 0);
        assert!(seg.is_empty());
        assert_eq!(seg.prod(..), 0);
        assert_eq!(seg.binary_search(0, |_| true), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn matches_naive(
            init in proptest::collection::vec(-100i64..100, 1..40),
            ops in proptest::collection::vec((0u8..3, 0usize..40, 0usize..41, -100i64..100), 0..60),
        ) {
            let n = init.len();
            let mut seg = SegmentTree::from_vec(SumMonoid, init.clone());
            let mut naive = init;
            for &(kind, i, j, v) in &ops {
                let i = i % n;
                match kind {
                    0 => {
                        seg.set(i, v);
                        naive[i] = v;
                    }
                    1 => {
                        seg.apply(i, &v);
                        naive[i] += v;
                    }
                    _ => {
                        let j = j.min(n);
                        let expected: i64 = if i < j { naive[i..j].iter().sum() } else { 0 };
                        prop_assert_eq!(seg.prod(i..j), expected);
                    }
                }
            }
        }

        #[test]
        fn search_matches_naive(
            v in proptest::collection::vec(0i64..50, 1..40),
            start in 0usize..40,
            bound in 1i64..500,
        ) {
            let n = v.len();
            let start = start.min(n);
            let seg = SegmentTree::from_vec(SumMonoid, v.clone());
            let mut x = start;
            let mut acc = 0;
            while x < n && acc + v[x] < bound {
                acc += v[x];
                x += 1;
            }
            prop_assert_eq!(seg.binary_search(start, |&s| s < bound), x);
        }
    }
}
