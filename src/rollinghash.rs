//! 2つの法によるローリングハッシュ
//!
//! 冪乗のテーブルはプロセス全体で共有せず, `RabinKarp`が持つ. 文字列の長さに応じて
//! `RabinKarp::setup`で先に伸ばしておく必要がある.

use std::ops::RangeBounds;

use super::error::{Error, Result};
use super::util::resolve;

/// 1つ目のハッシュの既定の基数
pub const BASE_A: u64 = 3491;
/// 1つ目のハッシュの法
pub const MOD_A: u64 = 481_840_747;
/// 2つ目のハッシュの既定の基数
pub const BASE_B: u64 = 8761;
/// 2つ目のハッシュの法
pub const MOD_B: u64 = 999_750_347;

/// ローリングハッシュの型
///
/// 2つのハッシュ値と列の長さの組. 3つ全てが等しいときに等しいとみなす.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RollingHash {
    a: u64,
    b: u64,
    len: usize,
}

impl RollingHash {
    /// 空の列のRollingHashを得る
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// 1文字だけの列のRollingHashを得る
    #[must_use]
    pub fn from_byte(c: u8) -> Self {
        Self {
            a: u64::from(c),
            b: u64::from(c),
            len: 1,
        }
    }

    #[must_use]
    pub fn hash_a(&self) -> u64 {
        self.a
    }

    #[must_use]
    pub fn hash_b(&self) -> u64 {
        self.b
    }

    /// 元の列の長さ
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Debug for RollingHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {:?} ({})", self.a, self.b, self.len)
    }
}

/// 基数と冪乗のテーブルを持ち, RollingHashの計算をするハンドル
///
/// 長さ`k`の列を後ろに繋ぐには`base^k`が必要になるので, 扱う列の最大の長さまで
/// `setup`でテーブルを伸ばしておく. テーブルは縮まない.
#[derive(Clone, Debug)]
pub struct RabinKarp {
    base_a: u64,
    base_b: u64,
    pow_a: Vec<u64>,
    pow_b: Vec<u64>,
}

impl RabinKarp {
    /// 既定の基数`BASE_A`, `BASE_B`で, 空列だけを扱えるハンドルを作る.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bases(BASE_A, BASE_B)
    }

    /// 基数を指定してハンドルを作る. 衝突を狙った入力に備えるなら起動時に乱数で選ぶ.
    ///
    /// # Constraints
    ///
    /// - `1 < base_a < MOD_A`
    /// - `1 < base_b < MOD_B`
    #[must_use]
    pub fn with_bases(base_a: u64, base_b: u64) -> Self {
        debug_assert!(1 < base_a && base_a < MOD_A);
        debug_assert!(1 < base_b && base_b < MOD_B);
        Self {
            base_a,
            base_b,
            pow_a: vec![1],
            pow_b: vec![1],
        }
    }

    /// 既定の基数で, 長さ`max_len`までの列を扱えるハンドルを作る.
    #[must_use]
    pub fn with_capacity(max_len: usize) -> Self {
        let mut rk = Self::new();
        rk.setup(max_len);
        rk
    }

    /// 扱える列の最大の長さを返す
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pow_a.len() - 1
    }

    /// 長さ`max_len`までの列を扱えるように冪乗のテーブルを伸ばす. 既に足りていれば何もしない.
    ///
    /// # Time complexity
    ///
    /// - 償却 *O*(`max_len`)
    pub fn setup(&mut self, max_len: usize) {
        let old = self.capacity();
        if max_len <= old {
            return;
        }
        log::debug!("rolling hash: growing power tables from {old} to {max_len}");
        self.pow_a.reserve_exact(max_len - old);
        self.pow_b.reserve_exact(max_len - old);
        for i in old..max_len {
            self.pow_a.push(self.pow_a[i] * self.base_a % MOD_A);
            self.pow_b.push(self.pow_b[i] * self.base_b % MOD_B);
        }
    }

    fn check(&self, len: usize) -> Result<()> {
        if len > self.capacity() {
            return Err(Error::PreconditionFailed(
                "RabinKarp::setup must cover the length of every hashed string",
            ));
        }
        Ok(())
    }

    /// 列`s`のRollingHashを先頭から計算する. テーブルは使わない.
    ///
    /// # Time complexity
    ///
    /// - *O*(`s.len()`)
    #[must_use]
    pub fn hash(&self, s: &[u8]) -> RollingHash {
        let (mut a, mut b) = (0, 0);
        for &c in s {
            a = (a * self.base_a + u64::from(c)) % MOD_A;
            b = (b * self.base_b + u64::from(c)) % MOD_B;
        }
        RollingHash { a, b, len: s.len() }
    }

    /// 列`left`の後ろに列`right`を繋いだ列のRollingHashを返す.
    ///
    /// `right.len()`がテーブルの長さを超えていたら`Error::PreconditionFailed`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    pub fn concat(&self, left: RollingHash, right: RollingHash) -> Result<RollingHash> {
        self.check(right.len)?;
        Ok(RollingHash {
            a: (left.a * self.pow_a[right.len] + right.a) % MOD_A,
            b: (left.b * self.pow_b[right.len] + right.b) % MOD_B,
            len: left.len + right.len,
        })
    }

    /// `prefix`が`whole`の接頭辞のRollingHashであるとき, 残りの接尾辞のRollingHashを返す.
    ///
    /// `prefix`の方が長ければ`Error::InvalidArgument`,
    /// 差がテーブルの長さを超えていたら`Error::PreconditionFailed`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    pub fn prefix_diff(&self, prefix: RollingHash, whole: RollingHash) -> Result<RollingHash> {
        if prefix.len > whole.len {
            return Err(Error::invalid(format!(
                "prefix of length {} is longer than the whole of length {}",
                prefix.len, whole.len
            )));
        }
        self.check(whole.len - prefix.len)?;
        Ok(self.strip_prefix(prefix, whole))
    }

    /// 長さとテーブルの検査を済ませた`prefix_diff`
    fn strip_prefix(&self, prefix: RollingHash, whole: RollingHash) -> RollingHash {
        let diff = whole.len - prefix.len;
        RollingHash {
            a: (whole.a + MOD_A - prefix.a * self.pow_a[diff] % MOD_A) % MOD_A,
            b: (whole.b + MOD_B - prefix.b * self.pow_b[diff] % MOD_B) % MOD_B,
            len: diff,
        }
    }
}

impl Default for RabinKarp {
    fn default() -> Self {
        Self::new()
    }
}

/// 列の全ての接頭辞のRollingHashを前計算し, 任意の部分列のRollingHashを *O*(1) で求める.
#[derive(Clone, Debug)]
pub struct RollingHashString<'a> {
    rk: &'a RabinKarp,
    prefix: Box<[RollingHash]>,
}

impl<'a> RollingHashString<'a> {
    /// 列`s`の接頭辞のRollingHashを前計算する.
    ///
    /// `rk`のテーブルが`s.len()`より短ければ`Error::PreconditionFailed`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(`s.len()`)
    pub fn new(rk: &'a RabinKarp, s: &[u8]) -> Result<Self> {
        rk.check(s.len())?;
        let mut prefix = Vec::with_capacity(s.len() + 1);
        let mut h = RollingHash::zero();
        prefix.push(h);
        for &c in s {
            h = rk.concat(h, RollingHash::from_byte(c))?;
            prefix.push(h);
        }
        Ok(Self {
            rk,
            prefix: prefix.into_boxed_slice(),
        })
    }

    /// 元の列の長さを返す
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefix.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 長さ`len`の接頭辞のRollingHashを返す.
    ///
    /// # Constraints
    ///
    /// - `len <= self.len()`
    #[must_use]
    pub fn prefix(&self, len: usize) -> RollingHash {
        debug_assert!(len <= self.len());
        self.prefix[len]
    }

    /// `range`の範囲の部分列のRollingHashを返す. 空区間なら空列のRollingHash.
    ///
    /// # Constraints
    ///
    /// - `range`の右端は`self.len()`以下である.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn get_hash(&self, range: impl RangeBounds<usize>) -> RollingHash {
        let (l, r) = resolve(&range, self.len());
        debug_assert!(r <= self.len());
        if l >= r {
            return RollingHash::zero();
        }
        // r <= self.len() なのでテーブルは足りている
        self.rk.strip_prefix(self.prefix[l], self.prefix[r])
    }
}
