//! SMTP 通知送信実装
//!
//! 送信設定から接続先と PLAIN 認証情報を組み立て、[`MailTransport`] に委譲する。

use std::sync::Arc;

use alertmail_domain::{EmailAddress, TransportError};
use async_trait::async_trait;

use super::{DispatchConfig, EmailDispatcher, LettreMailTransport, MailTransport, PlainAuth};

/// SMTP 通知送信
///
/// 生成後は設定を変更しない。デフォルトのトランスポートは [`LettreMailTransport`]。
pub struct SmtpEmailDispatcher {
    config:    DispatchConfig,
    transport: Arc<dyn MailTransport>,
}

impl SmtpEmailDispatcher {
    /// lettre による SMTP 送信を使うディスパッチャを作成する
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_transport(config, Arc::new(LettreMailTransport))
    }

    /// トランスポートを指定してディスパッチャを作成する（テスト用の差し替えに使う）
    pub fn with_transport(config: DispatchConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    fn auth(&self) -> PlainAuth {
        PlainAuth::new(self.config.user(), self.config.secret(), self.config.host())
    }
}

#[async_trait]
impl EmailDispatcher for SmtpEmailDispatcher {
    async fn send_email(
        &self,
        recipients: &[EmailAddress],
        body: &[u8],
    ) -> Result<(), TransportError> {
        let server_address = self.config.server_address();

        tracing::debug!(
            server = %server_address,
            from = %self.config.from_address(),
            recipients = recipients.len(),
            "SMTP: メール送信"
        );

        self.transport
            .send(
                &server_address,
                &self.auth(),
                self.config.from_address(),
                recipients,
                body,
            )
            .await
            .inspect_err(|e| {
                tracing::error!(
                    server = %server_address,
                    error = %e,
                    "SMTP: メール送信に失敗"
                );
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::RecordingTransport;

    fn config() -> DispatchConfig {
        DispatchConfig::new(
            "alerts",
            "s3cr3t",
            "smtp.example.com",
            587,
            "noreply@example.com",
        )
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpEmailDispatcher>();
    }

    #[tokio::test]
    async fn test_宛先と本文をそのままトランスポートに渡す() {
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = SmtpEmailDispatcher::with_transport(config(), transport.clone());

        let result = dispatcher
            .send_email(&[EmailAddress::from("a@a.com")], b"Subject: M5.1\r\n\r\nsismo")
            .await;

        assert!(result.is_ok());
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipients, vec![EmailAddress::from("a@a.com")]);
        assert_eq!(sent[0].body, b"Subject: M5.1\r\n\r\nsismo".to_vec());
    }

    #[tokio::test]
    async fn test_接続先と認証情報を設定から組み立てる() {
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = SmtpEmailDispatcher::with_transport(config(), transport.clone());

        dispatcher
            .send_email(&[EmailAddress::from("a@a.com")], b"body")
            .await
            .unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].server_address, "smtp.example.com:587");
        assert_eq!(sent[0].from, "noreply@example.com");
        assert_eq!(
            sent[0].auth,
            PlainAuth::new("alerts", "s3cr3t", "smtp.example.com")
        );
    }

    #[tokio::test]
    async fn test_トランスポートのエラーをそのまま返す() {
        let transport = Arc::new(RecordingTransport::failing("421 Service not available"));
        let dispatcher = SmtpEmailDispatcher::with_transport(config(), transport.clone());

        let err = dispatcher
            .send_email(&[EmailAddress::from("a@a.com")], b"body")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "メール送信に失敗: 421 Service not available");
        assert_eq!(transport.sent().len(), 1, "リトライしないこと");
    }
}
