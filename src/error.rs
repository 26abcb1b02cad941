/// このクレートの失敗を表すエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 呼び出し側で防げたはずの構造的な誤り (長さの不一致, 上限を超える頂点数など)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// 添字が有効な範囲 `0..len` の外にある
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// 事前に必要な準備 (セットアップ) がされていない
    #[error("precondition failed: {0}")]
    PreconditionFailed(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::out_of_range(5, 3).to_string(),
            "index 5 is out of range for length 3"
        );
        assert_eq!(
            Error::invalid("size mismatch").to_string(),
            "invalid argument: size mismatch"
        );
        assert_eq!(
            Error::PreconditionFailed("setup_dsu").to_string(),
            "precondition failed: setup_dsu"
        );
    }
}
