//! # Notifier エラー定義

use alertmail_domain::{RegistryError, TransportError};
use thiserror::Error;

/// ユースケースで発生するエラー
#[derive(Debug, Error)]
pub enum NotifierError {
    /// 登録簿の事前チェック違反
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// メール送信の失敗
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// 内部エラー（ロックの破損など）
    #[error("内部エラー: {0}")]
    Internal(String),
}
