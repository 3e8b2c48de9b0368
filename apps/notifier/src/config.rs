//! # Notifier 設定
//!
//! 環境変数から送信バックエンドと初期登録アドレスを読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFICATION_BACKEND` | No | `smtp` または `noop`（デフォルト: `noop`） |
//! | `SMTP_USER` | smtp 時 | SMTP 認証ユーザー |
//! | `SMTP_PASSWORD` | smtp 時 | SMTP 認証パスワード |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元アドレス |
//! | `SEED_EMAIL` | No | 起動時に登録するアドレス（デフォルト: `prueba@prueba.com`） |

use std::{env, str::FromStr};

use alertmail_domain::EmailAddress;
use alertmail_infra::DispatchConfig;
use thiserror::Error;

const DEFAULT_SEED_EMAIL: &str = "prueba@prueba.com";
const DEFAULT_FROM_ADDRESS: &str = "noreply@alertmail.example.com";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("SMTP_PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),

    #[error("NOTIFICATION_BACKEND は smtp または noop である必要があります: {0}")]
    UnknownBackend(String),
}

/// 送信バックエンドの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    Smtp,
    Noop,
}

/// 送信バックエンドの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// SMTP サーバー経由で送信
    Smtp(DispatchConfig),
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// Notifier の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// 送信バックエンド
    pub backend:    BackendConfig,
    /// 起動時に通知有効で登録するアドレス
    pub seed_email: EmailAddress,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 未設定の変数に対しては `None` を返すこと。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let kind = match lookup("NOTIFICATION_BACKEND") {
            Some(value) => {
                BackendKind::from_str(&value).map_err(|_| ConfigError::UnknownBackend(value))?
            }
            None => BackendKind::Noop,
        };

        let backend = match kind {
            BackendKind::Smtp => BackendConfig::Smtp(dispatch_config(&lookup)?),
            BackendKind::Noop => BackendConfig::Noop,
        };

        let seed_email = lookup("SEED_EMAIL")
            .map(EmailAddress::from)
            .unwrap_or_else(|| EmailAddress::from(DEFAULT_SEED_EMAIL));

        Ok(Self {
            backend,
            seed_email,
        })
    }
}

fn dispatch_config(lookup: &impl Fn(&str) -> Option<String>) -> Result<DispatchConfig, ConfigError> {
    let user = lookup("SMTP_USER").ok_or(ConfigError::Missing("SMTP_USER"))?;
    let secret = lookup("SMTP_PASSWORD").ok_or(ConfigError::Missing("SMTP_PASSWORD"))?;
    let host = lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = match lookup("SMTP_PORT") {
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(value))?,
        None => 1025,
    };
    let from_address =
        lookup("NOTIFICATION_FROM_ADDRESS").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string());

    Ok(DispatchConfig::new(user, secret, host, port, from_address))
}
