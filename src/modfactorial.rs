use super::modint::{ModInt, MOD};
use super::error::{Error, Result};

/// 階乗・階乗の逆元・逆元を前計算した表
///
/// 二項係数や順列の数を *O*(1) で求められる.
#[derive(Clone)]
pub struct ModFactorial<const N: u32 = MOD> {
    fact: Box<[ModInt<N>]>,
    inv_fact: Box<[ModInt<N>]>,
    inv: Box<[ModInt<N>]>,
}

impl<const N: u32> ModFactorial<N> {
    /// `0..=max`について階乗とその逆元を前計算する.
    ///
    /// # Constraints
    ///
    /// - `max < N`
    ///
    /// # Time complexity
    ///
    /// - *O*(`max` + log *N*)
    #[must_use]
    pub fn new(max: usize) -> Self {
        debug_assert!((max as u64) < N as u64);
        let mut fact = Vec::with_capacity(max + 1);
        let mut inv = Vec::with_capacity(max + 1);
        let mut inv_fact = Vec::with_capacity(max + 1);
        fact.push(ModInt::<N>::from(1u32));
        inv.push(ModInt::<N>::from(0u32));
        inv_fact.push(ModInt::<N>::from(1u32));
        for p in 1..=max {
            fact.push(fact[p - 1] * ModInt::from(p));
            // inv[p] = -(N / p) * inv[N % p]
            let ip = if p == 1 {
                ModInt::from(1u32)
            } else {
                -(ModInt::from(N as usize / p) * inv[N as usize % p])
            };
            inv.push(ip);
            inv_fact.push(inv_fact[p - 1] * ip);
        }
        Self {
            fact: fact.into_boxed_slice(),
            inv_fact: inv_fact.into_boxed_slice(),
            inv: inv.into_boxed_slice(),
        }
    }

    /// 前計算した最大値を返す
    #[must_use]
    pub fn max(&self) -> usize {
        self.fact.len() - 1
    }

    fn check(&self, n: usize) -> Result<()> {
        if n < self.fact.len() {
            Ok(())
        } else {
            Err(Error::out_of_range(n, self.fact.len()))
        }
    }

    /// 二項係数 *nCr* を返す.
    ///
    /// `r <= n <= self.max()`でなければ`Error::OutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    pub fn combination(&self, n: usize, r: usize) -> Result<ModInt<N>> {
        self.check(n)?;
        if r > n {
            return Err(Error::out_of_range(r, n + 1));
        }
        Ok(self.fact[n] * (self.inv_fact[n - r] * self.inv_fact[r]))
    }

    /// 順列の数 *nPr* を返す.
    ///
    /// `r <= n <= self.max()`でなければ`Error::OutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    pub fn permutation(&self, n: usize, r: usize) -> Result<ModInt<N>> {
        self.check(n)?;
        if r > n {
            return Err(Error::out_of_range(r, n + 1));
        }
        Ok(self.fact[n] * self.inv_fact[n - r])
    }

    /// *n*! を返す.
    pub fn factorial(&self, n: usize) -> Result<ModInt<N>> {
        self.check(n)?;
        Ok(self.fact[n])
    }

    /// (*n*!)⁻¹ を返す.
    pub fn inverse_factorial(&self, n: usize) -> Result<ModInt<N>> {
        self.check(n)?;
        Ok(self.inv_fact[n])
    }

    /// *n*⁻¹ を返す. `n == 0`のときは`Error::InvalidArgument`を返す.
    pub fn inverse(&self, n: usize) -> Result<ModInt<N>> {
        self.check(n)?;
        if n == 0 {
            return Err(Error::invalid("inverse of zero"));
        }
        Ok(self.inv[n])
    }
}
