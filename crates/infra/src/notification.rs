//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **2 段の抽象化**: 宛先と本文を受け取る [`EmailDispatcher`] と、
//!   SMTP への送信そのものを行う [`MailTransport`] を分ける
//! - **2 つの実装**: SMTP（[`SmtpEmailDispatcher`]）、Noop（[`NoopEmailDispatcher`]）
//! - **1 回きりの送信**: リトライ・バッチ化・流量制限は行わない

mod config;
mod noop;
mod smtp;
mod transport;

use alertmail_domain::{EmailAddress, TransportError};
use async_trait::async_trait;
pub use config::DispatchConfig;
pub use noop::NoopEmailDispatcher;
pub use smtp::SmtpEmailDispatcher;
pub use transport::{LettreMailTransport, MailTransport, PlainAuth};

/// メール送信トレイト
///
/// 宛先は呼び出し側で登録簿から絞り込み済みであること。
/// 送信後に状態を持たないため、複数の呼び出し元から同時に使用できる。
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    /// 本文を宛先全員に 1 通のメールとして送信する
    async fn send_email(
        &self,
        recipients: &[EmailAddress],
        body: &[u8],
    ) -> Result<(), TransportError>;
}
