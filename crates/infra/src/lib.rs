//! # AlertMail インフラ層
//!
//! メール送信など外部システムとの通信を担当する。
//!
//! ## 設計方針
//!
//! ドメイン層の型（[`EmailAddress`](alertmail_domain::EmailAddress),
//! [`TransportError`](alertmail_domain::TransportError)）を使って送信インターフェースを定義し、
//! SMTP の詳細はこのクレートの中に閉じ込める。
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信（ディスパッチャ、トランスポート、送信設定）
//! - `mock` - テスト用の記録付きモック（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;

pub use notification::{
    DispatchConfig,
    EmailDispatcher,
    LettreMailTransport,
    MailTransport,
    NoopEmailDispatcher,
    PlainAuth,
    SmtpEmailDispatcher,
};
