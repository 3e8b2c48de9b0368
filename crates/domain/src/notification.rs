//! # 通知
//!
//! メール送信に関するドメインエラーを定義する。
//!
//! 送信はリトライやバッチ化を行わない 1 回きりの試行であり、
//! トランスポートが返したエラーはそのまま [`TransportError`] に包んで呼び出し元に返す。

use std::error::Error as StdError;

use thiserror::Error;

/// メール送信エラー
///
/// トランスポート（SMTP 等）自身のエラーを `source` として保持する。
#[derive(Debug, Error)]
#[error("メール送信に失敗: {source}")]
pub struct TransportError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_メッセージにトランスポートのエラーがそのまま含まれる() {
        let err = TransportError::new("535 Authentication failed");

        assert_eq!(err.to_string(), "メール送信に失敗: 535 Authentication failed");
    }

    #[test]
    fn test_sourceでトランスポートのエラーを取り出せる() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "接続拒否");
        let err = TransportError::new(io);

        let source = err.source().expect("source を保持していること");
        assert_eq!(source.to_string(), "接続拒否");
    }
}
