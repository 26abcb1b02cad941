//! 拡張ユークリッドの互除法と中国剰余定理
//!
//! 全ての関数は`i64`で値を受け渡しする. 余りは先に各法で正規化し, 中間の積は`i128`で計算するので,
//! 法が正で, 結果の法 (lcm) が`i64`に収まる範囲なら余りの値によらず溢れない.

/// `x`を`m`で割った非負の余りを返す.
///
/// # Constraints
///
/// - `m > 0`
#[must_use]
pub fn safe_mod(x: i64, m: i64) -> i64 {
    debug_assert!(m > 0);
    x.rem_euclid(m)
}

/// `a * p + b * q == g`を満たす`(g, p, q)`を返す. `g`は`a`と`b`の最大公約数.
///
/// # Time complexity
///
/// - *O*(log min(*a*, *b*))
#[must_use]
pub fn ext_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    if b == 0 {
        return (a, 1, 0);
    }
    let (g, q, p) = ext_gcd(b, a % b);
    (g, p, q - a / b * p)
}

/// `r ≡ x1 (mod m1)`かつ`r ≡ x2 (mod m2)`を満たす`(r, lcm(m1, m2))`を返す.
///
/// 解が存在しないときは`(0, -1)`を返す.
///
/// # Constraints
///
/// - `m1 > 0`, `m2 > 0`
///
/// # Time complexity
///
/// - *O*(log min(*m1*, *m2*))
#[must_use]
pub fn crt(x1: i64, m1: i64, x2: i64, m2: i64) -> (i64, i64) {
    debug_assert!(m1 > 0 && m2 > 0);
    let (x1, x2) = (safe_mod(x1, m1), safe_mod(x2, m2));
    let (d, p, _) = ext_gcd(m1, m2);
    if (x2 - x1) % d != 0 {
        return (0, -1);
    }
    let m = m1 * (m2 / d);
    let temp = ((x2 - x1) / d) as i128 * p as i128 % (m2 / d) as i128;
    let r = (x1 as i128 + m1 as i128 * temp).rem_euclid(m as i128);
    (r as i64, m)
}

/// `(x, m)`の列について連立合同式を解き, `(r, lcm(m...))`を返す.
///
/// 解が存在しないときは`(0, -1)`を返す. 空の列には`(0, 1)`を返す.
///
/// # Constraints
///
/// - 全ての`m > 0`
///
/// # Time complexity
///
/// - *O*(*n* log max *m*)
#[must_use]
pub fn crt_all(congruences: &[(i64, i64)]) -> (i64, i64) {
    let mut r = 0i64;
    let mut m = 1i64;
    for &(x, mi) in congruences {
        debug_assert!(mi > 0);
        let x = safe_mod(x, mi);
        let (d, p, _) = ext_gcd(m, mi);
        if (x - r) % d != 0 {
            return (0, -1);
        }
        let temp = ((x - r) / d) as i128 * p as i128 % (mi / d) as i128;
        let nm = m * (mi / d);
        r = (r as i128 + m as i128 * temp).rem_euclid(nm as i128) as i64;
        m = nm;
    }
    (r, m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ext_gcd_identity() {
        for &(a, b) in &[(240, 46), (46, 240), (17, 5), (12, 18), (7, 0), (0, 7), (1, 1)] {
            let (g, p, q) = ext_gcd(a, b);
            assert_eq!(a * p + b * q, g, "a = {a}, b = {b}");
        }
        assert_eq!(ext_gcd(240, 46).0, 2);
        assert_eq!(ext_gcd(17, 5).0, 1);
    }

    #[test]
    fn crt_pair() {
        assert_eq!(crt(2, 3, 3, 5), (8, 15));
        assert_eq!(crt(1, 4, 3, 6), (9, 12));
        assert_eq!(crt(1, 4, 2, 6), (0, -1));
        assert_eq!(crt(-1, 7, 0, 1), (6, 7));
    }

    #[test]
    fn crt_list() {
        assert_eq!(crt_all(&[(2, 3), (3, 5), (2, 7)]), (23, 105));
        assert_eq!(crt_all(&[(1, 4), (3, 6), (1, 8)]), (9, 24));
        assert_eq!(crt_all(&[(1, 2), (0, 4)]), (0, -1));
        assert_eq!(crt_all(&[]), (0, 1));
    }

    #[test]
    fn extreme_residues() {
        assert_eq!(crt(i64::MAX, 3, -5, 5), (10, 15));
        assert_eq!(crt(i64::MIN, 7, i64::MAX, 2), (13, 14));
        assert_eq!(crt(i64::MIN, 2, i64::MAX, 4), (0, -1));
        assert_eq!(crt_all(&[(i64::MAX, 3), (i64::MIN, 7), (-5, 5)]), (55, 105));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn crt_solves_both(x1 in -1000i64..1000, m1 in 1i64..1000, x2 in -1000i64..1000, m2 in 1i64..1000) {
            let (r, m) = crt(x1, m1, x2, m2);
            if m == -1 {
                let g = ext_gcd(m1, m2).0;
                prop_assert_ne!(safe_mod(x1 - x2, g), 0);
            } else {
                prop_assert_eq!(safe_mod(r, m1), safe_mod(x1, m1));
                prop_assert_eq!(safe_mod(r, m2), safe_mod(x2, m2));
                prop_assert_eq!(m, m1 / ext_gcd(m1, m2).0 * m2);
                prop_assert!((0..m).contains(&r));
            }
        }

        #[test]
        fn crt_any_residue(x1 in any::<i64>(), m1 in 1i64..1_000_000_000, x2 in any::<i64>(), m2 in 1i64..1_000_000_000) {
            let (r, m) = crt(x1, m1, x2, m2);
            let g = ext_gcd(m1, m2).0;
            if m == -1 {
                prop_assert_ne!((x1 as i128 - x2 as i128).rem_euclid(g as i128), 0);
            } else {
                prop_assert_eq!(m, m1 / g * m2);
                prop_assert_eq!(safe_mod(r, m1), safe_mod(x1, m1));
                prop_assert_eq!(safe_mod(r, m2), safe_mod(x2, m2));
                prop_assert_eq!(crt_all(&[(x1, m1), (x2, m2)]), (r, m));
            }
        }
    }
}
