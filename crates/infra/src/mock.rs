//! # テスト用モック
//!
//! 送信内容を記録するインメモリのトランスポートとディスパッチャ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! alertmail-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use alertmail_domain::{EmailAddress, TransportError};
use async_trait::async_trait;

use crate::notification::{EmailDispatcher, MailTransport, PlainAuth};

// ===== RecordingTransport =====

/// [`RecordingTransport`] が受け取った 1 回分の送信内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub server_address: String,
    pub auth:           PlainAuth,
    pub from:           String,
    pub recipients:     Vec<EmailAddress>,
    pub body:           Vec<u8>,
}

#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent:    Arc<Mutex<Vec<SentMail>>>,
    failure: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録したうえで常に失敗するトランスポート
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent:    Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(
        &self,
        server_address: &str,
        auth: &PlainAuth,
        from: &str,
        recipients: &[EmailAddress],
        body: &[u8],
    ) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(SentMail {
            server_address: server_address.to_string(),
            auth:           auth.clone(),
            from:           from.to_string(),
            recipients:     recipients.to_vec(),
            body:           body.to_vec(),
        });

        match &self.failure {
            Some(message) => Err(TransportError::new(message.clone())),
            None => Ok(()),
        }
    }
}

// ===== MockEmailDispatcher =====

/// [`MockEmailDispatcher`] が受け取った 1 回分の送信内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedMail {
    pub recipients: Vec<EmailAddress>,
    pub body:       Vec<u8>,
}

#[derive(Clone, Default)]
pub struct MockEmailDispatcher {
    dispatched: Arc<Mutex<Vec<DispatchedMail>>>,
    failure:    Option<String>,
}

impl MockEmailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録したうえで常に失敗するディスパッチャ
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            dispatched: Arc::default(),
            failure:    Some(message.into()),
        }
    }

    pub fn dispatched(&self) -> Vec<DispatchedMail> {
        self.dispatched.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailDispatcher for MockEmailDispatcher {
    async fn send_email(
        &self,
        recipients: &[EmailAddress],
        body: &[u8],
    ) -> Result<(), TransportError> {
        self.dispatched.lock().unwrap().push(DispatchedMail {
            recipients: recipients.to_vec(),
            body:       body.to_vec(),
        });

        match &self.failure {
            Some(message) => Err(TransportError::new(message.clone())),
            None => Ok(()),
        }
    }
}
