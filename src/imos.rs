use std::ops::{AddAssign, RangeBounds, SubAssign};

use super::util::{resolve, HasZero};

/// 1次元のいもす法 (差分配列)
///
/// 区間加算を *O*(1) で積んでおき, 最後に一度だけ`accumulate`で各点の値に直す.
/// `accumulate`は`self`を消費するので, 確定後に加算することは出来ない.
#[derive(Clone, Debug)]
pub struct Imos<T>(Box<[T]>);

impl<T: Copy + HasZero + AddAssign + SubAssign> Imos<T> {
    /// 全て0の長さ`len`の差分配列を作る
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self(vec![T::zero(); len].into_boxed_slice())
    }

    /// 初期値`vec`の上に加算を積む差分配列を作る.
    ///
    /// `vec`は差分の表現として扱われる (`accumulate`で累積される).
    #[must_use]
    pub fn from_vec(vec: Vec<T>) -> Self {
        Self(vec.into_boxed_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `range`の範囲に`value`を加える. 配列の外にはみ出した端は無視される.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    pub fn add(&mut self, range: impl RangeBounds<usize>, value: T) {
        let (start, end) = resolve(&range, self.len());
        if start >= end || start >= self.len() {
            return;
        }
        self.0[start] += value;
        if end < self.len() {
            self.0[end] -= value;
        }
    }

    /// `start`から長さ`len`の範囲に`value`を加える.
    pub fn add_len(&mut self, start: usize, len: usize, value: T) {
        self.add(start..start + len, value);
    }

    /// 積んだ加算を確定させ, 各点の値の列を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn accumulate(mut self) -> Box<[T]> {
        for i in 1..self.0.len() {
            let prev = self.0[i - 1];
            self.0[i] += prev;
        }
        self.0
    }
}

/// 2次元のいもす法 (差分配列)
///
/// 長方形領域への加算を *O*(1) で積んでおき, 最後に一度だけ`accumulate`で各点の値に直す.
#[derive(Clone, Debug)]
pub struct Imos2D<T> {
    data: Box<[T]>,
    height: usize,
    width: usize,
}

impl<T: Copy + HasZero + AddAssign + SubAssign> Imos2D<T> {
    /// 全て0の`height`行`width`列の差分配列を作る
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            data: vec![T::zero(); height * width].into_boxed_slice(),
            height,
            width,
        }
    }

    /// 初期値`grid`の上に加算を積む差分配列を作る.
    ///
    /// # Constraints
    ///
    /// - 全ての行の長さが等しい
    #[must_use]
    pub fn from_grid(grid: Vec<Vec<T>>) -> Self {
        let height = grid.len();
        let width = grid.first().map_or(0, Vec::len);
        debug_assert!(grid.iter().all(|row| row.len() == width));
        Self {
            data: grid.into_iter().flatten().collect(),
            height,
            width,
        }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// `xs × ys`の長方形領域に`value`を加える. 配列の外にはみ出した角は無視される.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    pub fn add(&mut self, xs: impl RangeBounds<usize>, ys: impl RangeBounds<usize>, value: T) {
        let (x0, x1) = resolve(&xs, self.width);
        let (y0, y1) = resolve(&ys, self.height);
        if x0 >= x1 || y0 >= y1 || x0 >= self.width || y0 >= self.height {
            return;
        }
        let w = self.width;
        self.data[y0 * w + x0] += value;
        if x1 < self.width {
            self.data[y0 * w + x1] -= value;
        }
        if y1 < self.height {
            self.data[y1 * w + x0] -= value;
        }
        if x1 < self.width && y1 < self.height {
            self.data[y1 * w + x1] += value;
        }
    }

    /// 左上が`(x, y)`で幅`w`, 高さ`h`の長方形領域に`value`を加える.
    pub fn add_len(&mut self, x: usize, y: usize, w: usize, h: usize, value: T) {
        self.add(x..x + w, y..y + h, value);
    }

    /// 積んだ加算を確定させ, `result[y][x]`の形で各点の値を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(*HW*)
    #[must_use]
    pub fn accumulate(mut self) -> Vec<Vec<T>> {
        let w = self.width;
        for y in 0..self.height {
            for x in 1..w {
                let prev = self.data[y * w + x - 1];
                self.data[y * w + x] += prev;
            }
        }
        for y in 1..self.height {
            for x in 0..w {
                let prev = self.data[(y - 1) * w + x];
                self.data[y * w + x] += prev;
            }
        }
        if w == 0 {
            return vec![Vec::new(); self.height];
        }
        self.data.chunks(w).map(<[T]>::to_vec).collect()
    }
}
