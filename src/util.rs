use std::ops::{Bound, RangeBounds};

/// 「0」に相当する値が存在することを表すトレイト
pub trait HasZero {
    /// 0の値を返す
    fn zero() -> Self;
}
/// 「1」に相当する値が存在することを表すトレイト
pub trait HasOne {
    /// 1の値を返す
    fn one() -> Self;
}
/// その型に最大値が存在することを表すトレイト
pub trait HasMax {
    /// その型が取り得る最も大きい値を返す
    fn max_value() -> Self;
}

/// 整数型にHasZero, HasOne, HasMaxを実装するマクロ
macro_rules! impl_zero {
    ($($t: ty),*) => {$(
        impl HasZero for $t {
            fn zero() -> $t { 0 }
        }
        impl HasOne for $t {
            fn one() -> $t { 1 }
        }
        impl HasMax for $t {
            fn max_value() -> $t { Self::MAX }
        }
    )*};
}

impl_zero! { u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize }

/// マグマ. 二項演算で閉じている代数構造
pub trait Magma {
    /// マグマの元の型
    type T;
    /// 二項演算
    fn op(&self, lhs: &Self::T, rhs: &Self::T) -> Self::T;
}

/// マグマに単位元があることを表すトレイト
pub trait Identity: Magma<T: Clone> {
    /// 単位元を構築して返す
    fn e(&self) -> Self::T;
}

/// マグマが結合律が成り立つことを表すトレイト
pub trait Associativity: Magma {}

/// `range`を`0..len`の中の半開区間`(l, r)`に直す.
///
/// `l > r`となるような区間はそのまま返すので, 呼び出し側で空区間として扱う.
pub(crate) fn resolve(range: &impl RangeBounds<usize>, len: usize) -> (usize, usize) {
    let l = match range.start_bound() {
        Bound::Included(&i) => i,
        Bound::Excluded(&i) => i + 1,
        Bound::Unbounded => 0,
    };
    let r = match range.end_bound() {
        Bound::Included(&i) => i + 1,
        Bound::Excluded(&i) => i,
        Bound::Unbounded => len,
    };
    (l, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_bounds() {
        assert_eq!(resolve(&(..), 7), (0, 7));
        assert_eq!(resolve(&(2..5), 7), (2, 5));
        assert_eq!(resolve(&(2..=5), 7), (2, 6));
        assert_eq!(resolve(&(3..), 7), (3, 7));
        assert_eq!(resolve(&(..=0), 7), (0, 1));
    }

    #[test]
    fn extremes() {
        assert_eq!(<i64 as HasMax>::max_value(), i64::MAX);
        assert_eq!(<u8 as HasMax>::max_value(), 255);
        assert_eq!(<usize as HasZero>::zero() + <usize as HasOne>::one(), 1);
    }
}
