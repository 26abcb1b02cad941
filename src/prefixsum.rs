use std::ops::{Add, RangeBounds, Sub};

use super::util::{resolve, HasZero};

/// 1次元累積和
///
/// 前計算 *O*(*n*) で区間和を *O*(1) で求める.
#[derive(Clone, Debug)]
pub struct PrefixSum<T>(Box<[T]>);

impl<T: Copy + HasZero + Add<Output = T> + Sub<Output = T>> PrefixSum<T> {
    /// 列`seq`の累積和を構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(seq: &[T]) -> Self {
        let mut sums = Vec::with_capacity(seq.len() + 1);
        sums.push(T::zero());
        for (i, &v) in seq.iter().enumerate() {
            sums.push(sums[i] + v);
        }
        Self(sums.into_boxed_slice())
    }

    /// 元の列の長さを返す
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `range`の範囲の和を返す. 空区間なら0.
    ///
    /// # Constraints
    ///
    /// - `range`は`0..self.len()`に含まれる区間である.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn sum(&self, range: impl RangeBounds<usize>) -> T {
        let (l, r) = resolve(&range, self.len());
        debug_assert!(r <= self.len());
        if l >= r {
            return T::zero();
        }
        self.0[r] - self.0[l]
    }

    /// 列全体の和を返す
    #[must_use]
    pub fn all_sum(&self) -> T {
        self.0[self.0.len() - 1]
    }

    /// 長さ`n + 1`の累積和の配列そのものを返す
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

/// 2次元累積和
///
/// 前計算 *O*(*HW*) で長方形領域の和を *O*(1) で求める.
#[derive(Clone, Debug)]
pub struct PrefixSum2D<T> {
    sums: Box<[T]>,
    height: usize,
    width: usize,
}

impl<T: Copy + HasZero + Add<Output = T> + Sub<Output = T>> PrefixSum2D<T> {
    /// `grid[y][x]`の2次元累積和を構築する.
    ///
    /// # Constraints
    ///
    /// - 全ての行の長さが等しい
    ///
    /// # Time complexity
    ///
    /// - *O*(*HW*)
    #[must_use]
    pub fn new<R: AsRef<[T]>>(grid: &[R]) -> Self {
        let height = grid.len();
        let width = grid.first().map_or(0, |row| row.as_ref().len());
        let stride = width + 1;
        let mut sums = vec![T::zero(); (height + 1) * stride];
        for (y, row) in grid.iter().enumerate() {
            let row = row.as_ref();
            debug_assert_eq!(row.len(), width);
            for (x, &v) in row.iter().enumerate() {
                sums[(y + 1) * stride + x + 1] =
                    sums[(y + 1) * stride + x] + sums[y * stride + x + 1] - sums[y * stride + x] + v;
            }
        }
        Self {
            sums: sums.into_boxed_slice(),
            height,
            width,
        }
    }

    /// 行数を返す
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// 列数を返す
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    fn at(&self, y: usize, x: usize) -> T {
        self.sums[y * (self.width + 1) + x]
    }

    /// `xs × ys`の長方形領域の和を返す. 空の領域なら0.
    ///
    /// # Constraints
    ///
    /// - `xs`は`0..self.width()`, `ys`は`0..self.height()`に含まれる.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn sum(&self, xs: impl RangeBounds<usize>, ys: impl RangeBounds<usize>) -> T {
        let (x0, x1) = resolve(&xs, self.width);
        let (y0, y1) = resolve(&ys, self.height);
        debug_assert!(x1 <= self.width && y1 <= self.height);
        if x0 >= x1 || y0 >= y1 {
            return T::zero();
        }
        self.at(y1, x1) + self.at(y0, x0) - self.at(y0, x1) - self.at(y1, x0)
    }

    /// 全体の和を返す
    #[must_use]
    pub fn all_sum(&self) -> T {
        self.at(self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::modint::ModInt;
    use proptest::prelude::*;

    #[test]
    fn one_dim() {
        let ps = PrefixSum::new(&[3, 1, 4, 1, 5, 9, 2, 6]);
        assert_eq!(ps.len(), 8);
        assert_eq!(ps.sum(..), 31);
        assert_eq!(ps.all_sum(), 31);
        assert_eq!(ps.sum(2..5), 10);
        assert_eq!(ps.sum(3..3), 0);
        assert_eq!(ps.sum(..=1), 4);
        assert_eq!(ps.as_slice(), &[0, 3, 4, 8, 9, 14, 23, 25, 31]);
    }

    #[test]
    fn empty() {
        let ps = PrefixSum::<i64>::new(&[]);
        assert!(ps.is_empty());
        assert_eq!(ps.all_sum(), 0);
        assert_eq!(ps.sum(..), 0);
    }

    #[test]
    fn modint_values() {
        type Mint = ModInt<7>;
        let ps = PrefixSum::new(&[Mint::new(5), Mint::new(6), Mint::new(3)]);
        assert_eq!(ps.sum(..).val(), 0);
        assert_eq!(ps.sum(1..).val(), 2);
    }

    #[test]
    fn two_dim() {
        let grid = [vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9], vec![10, 11, 12]];
        let ps = PrefixSum2D::new(&grid);
        assert_eq!(ps.height(), 4);
        assert_eq!(ps.width(), 3);
        assert_eq!(ps.all_sum(), 78);
        assert_eq!(ps.sum(0..2, 0..2), 12);
        assert_eq!(ps.sum(1..3, 1..4), 5 + 6 + 8 + 9 + 11 + 12);
        assert_eq!(ps.sum(2..2, ..), 0);
        assert_eq!(ps.sum(.., 3..), 33);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn sums_split(v in proptest::collection::vec(-1000i64..1000, 0..60), a in 0usize..61, b in 0usize..61, c in 0usize..61) {
            let n = v.len();
            let mut idx = [a.min(n), b.min(n), c.min(n)];
            idx.sort_unstable();
            let [l, r, s] = idx;
            let ps = PrefixSum::new(&v);
            prop_assert_eq!(ps.sum(l..r) + ps.sum(r..s), ps.sum(l..s));
            prop_assert_eq!(ps.sum(l..l), 0);
            prop_assert_eq!(ps.sum(l..s), v[l..s].iter().sum::<i64>());
        }

        #[test]
        fn rectangles(
            grid in proptest::collection::vec(proptest::collection::vec(-50i64..50, 5), 1..6),
            x0 in 0usize..6, x1 in 0usize..6, y0 in 0usize..7, y1 in 0usize..7,
        ) {
            let h = grid.len();
            let (x0, x1) = (x0.min(5), x1.min(5));
            let (y0, y1) = (y0.min(h), y1.min(h));
            let ps = PrefixSum2D::new(&grid);
            let mut naive = 0;
            for row in grid.iter().take(y1).skip(y0) {
                for &v in row.iter().take(x1).skip(x0) {
                    naive += v;
                }
            }
            prop_assert_eq!(ps.sum(x0..x1, y0..y1), naive);
        }
    }
}
