//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 開発環境や通知無効化時に使用する。

use alertmail_domain::{EmailAddress, TransportError};
use async_trait::async_trait;

use super::EmailDispatcher;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmailDispatcher;

#[async_trait]
impl EmailDispatcher for NoopEmailDispatcher {
    async fn send_email(
        &self,
        recipients: &[EmailAddress],
        body: &[u8],
    ) -> Result<(), TransportError> {
        tracing::info!(
            recipients = recipients.len(),
            body_bytes = body.len(),
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_emailがエラーを返さない() {
        let dispatcher = NoopEmailDispatcher;

        let result = dispatcher
            .send_email(&[EmailAddress::from("test@example.com")], b"test")
            .await;
        assert!(result.is_ok());
    }
}
