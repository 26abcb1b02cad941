use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::error::{Error, Result};
use super::util::{HasOne, HasZero};

/// ビルド時に選ばれる既定の素数の法
///
/// feature `mod1000000007` が有効なら 1000000007, そうでなければ 998244353
pub const MOD: u32 = if cfg!(feature = "mod1000000007") {
    1_000_000_007
} else {
    998_244_353
};

/// 既定の法での`ModInt`
pub type Mint = ModInt<MOD>;

/// 計算すると自動で mod `N` での値をとる数値型
///
/// `N`は素数でなければならない. 値は常に`0..N`に正規化されている.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModInt<const N: u32 = MOD>(u32);

impl<const N: u32> ModInt<N> {
    /// `val`を`N`で割って`ModInt<N>`を作る
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn new(val: u32) -> Self {
        Self(val % N)
    }

    /// `N`で割った値をu32で取り出す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn val(self) -> u32 {
        self.0
    }

    fn mul_pow(self, mut b: Self, mut s: u64) -> Self {
        let mut r = if s & 1 == 1 { self * b } else { self };
        loop {
            s >>= 1;
            if s == 0 {
                return r;
            }
            b *= b;
            if s & 1 == 1 {
                r *= b;
            }
        }
    }

    /// 値を`s`乗する
    ///
    /// # Time complexity
    ///
    /// - *O*(log *s*)
    #[must_use]
    pub fn pow(&self, s: u64) -> Self {
        Self(1 % N).mul_pow(*self, s)
    }

    /// 値を符号付きの`exp`乗する. 負の指数では逆数の`-exp`乗になる.
    ///
    /// 値が0で`exp`が負のときは`Error::InvalidArgument`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log |*exp*| + log *N*)
    pub fn powi(&self, exp: i64) -> Result<Self> {
        if exp < 0 {
            Ok(self.inv()?.pow(exp.unsigned_abs()))
        } else {
            Ok(self.pow(exp as u64))
        }
    }

    /// 値の逆数をフェルマーの小定理で求める
    ///
    /// 値が0のときは`Error::InvalidArgument`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *N*)
    pub fn inv(&self) -> Result<Self> {
        if self.0 == 0 {
            return Err(Error::invalid("inverse of zero"));
        }
        Ok(self.inv_unchecked())
    }

    fn inv_unchecked(&self) -> Self {
        Self(1).mul_pow(*self, N as u64 - 2)
    }

    /// `self / rhs`を計算する. `rhs`が0のときは`Error::InvalidArgument`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *N*)
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        Ok(self * rhs.inv()?)
    }

    /// 前置インクリメント. 1を足した後の値を返す.
    pub fn pre_inc(&mut self) -> Self {
        *self += Self(1 % N);
        *self
    }

    /// 後置インクリメント. 1を足す前の値を返す.
    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        *self += Self(1 % N);
        old
    }

    /// 前置デクリメント. 1を引いた後の値を返す.
    pub fn pre_dec(&mut self) -> Self {
        *self -= Self(1 % N);
        *self
    }

    /// 後置デクリメント. 1を引く前の値を返す.
    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        *self -= Self(1 % N);
        old
    }

    /// 前計算なしで二項係数 *nCr* を計算する.
    ///
    /// `r > n`のときは0を返す.
    ///
    /// # Constraints
    ///
    /// - `r < N`
    ///
    /// # Time complexity
    ///
    /// - *O*(*r* + log *N*)
    #[must_use]
    pub fn combination(n: u64, r: u64) -> Self {
        debug_assert!(r < N as u64);
        if r > n {
            return Self(0);
        }
        let mut num = Self(1 % N);
        let mut den = Self(1 % N);
        for i in 1..=r {
            num *= Self::from(n - i + 1);
            den *= Self::from(i);
        }
        num * den.inv_unchecked()
    }
}

impl<const N: u32> Add for ModInt<N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let (r, f) = self.0.overflowing_add(rhs.0);
        Self(if f || r >= N { r.wrapping_sub(N) } else { r })
    }
}
impl<const N: u32> Sub for ModInt<N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let (r, f) = self.0.overflowing_sub(rhs.0);
        Self(if f { r.wrapping_add(N) } else { r })
    }
}
impl<const N: u32> Mul for ModInt<N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self((self.0 as u64 * rhs.0 as u64 % N as u64) as u32)
    }
}

/// # Panics
///
/// `rhs`が0のときpanicする. 失敗を値で受け取りたいときは`checked_div`を使う.
impl<const N: u32> Div for ModInt<N> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        assert!(rhs.0 != 0, "division by zero in ModInt");
        self * rhs.inv_unchecked()
    }
}

impl<const N: u32> Neg for ModInt<N> {
    type Output = Self;
    fn neg(self) -> Self {
        Self(if self.0 == 0 { 0 } else { N - self.0 })
    }
}
impl<const N: u32> Neg for &ModInt<N> {
    type Output = ModInt<N>;
    fn neg(self) -> ModInt<N> {
        -*self
    }
}

macro_rules! impl_ops {
    ($({$tr: ident, $mt: ident, $tr2: ident, $mt2: ident}),*$(,)?) => {$(
        impl<const N: u32> $tr for &ModInt<N> {
            type Output = ModInt<N>;
            fn $mt(self, rhs: Self) -> ModInt<N> {
                (*self).$mt(*rhs)
            }
        }
        impl<const N: u32> $tr<&Self> for ModInt<N> {
            type Output = Self;
            fn $mt(self, rhs: &Self) -> Self {
                self.$mt(*rhs)
            }
        }
        impl<const N: u32> $tr<ModInt<N>> for &ModInt<N> {
            type Output = ModInt<N>;
            fn $mt(self, rhs: ModInt<N>) -> ModInt<N> {
                (*self).$mt(rhs)
            }
        }
        impl<const N: u32> $tr2 for ModInt<N> {
            fn $mt2(&mut self, rhs: Self) {
                *self = self.$mt(rhs);
            }
        }
        impl<const N: u32> $tr2<&Self> for ModInt<N> {
            fn $mt2(&mut self, rhs: &Self) {
                *self = self.$mt(rhs);
            }
        }
    )*};
}

impl_ops! {
    { Add, add, AddAssign, add_assign },
    { Sub, sub, SubAssign, sub_assign },
    { Mul, mul, MulAssign, mul_assign },
    { Div, div, DivAssign, div_assign },
}

macro_rules! impl_cast_uint {
    ($($t: ty),*$(,)?) => {$(
        impl<const N: u32> From<$t> for ModInt<N> {
            fn from(value: $t) -> Self {
                if const { <$t>::BITS > u32::BITS } {
                    Self((value % N as $t) as u32)
                } else {
                    Self(value as u32 % N)
                }
            }
        }
    )*};
}
impl_cast_uint! { u8, u16, u32, u64, u128, usize }

macro_rules! impl_cast_int {
    ($($t: ty),*$(,)?) => {$(
        impl<const N: u32> From<$t> for ModInt<N> {
            fn from(value: $t) -> Self {
                Self((value as i128).rem_euclid(N as i128) as u32)
            }
        }
    )*};
}
impl_cast_int! { i8, i16, i32, i64, i128, isize }

impl<const N: u32> HasZero for ModInt<N> {
    fn zero() -> Self {
        Self(0)
    }
}
impl<const N: u32> HasOne for ModInt<N> {
    fn one() -> Self {
        Self(1 % N)
    }
}

impl<const N: u32> std::fmt::Debug for ModInt<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
impl<const N: u32> std::fmt::Display for ModInt<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
