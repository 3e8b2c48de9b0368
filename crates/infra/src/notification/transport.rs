//! SMTP トランスポート
//!
//! ディスパッチャが組み立てた接続先・認証情報・宛先・本文を受け取り、
//! 実際にメールサーバーへ送信する境界。テストではモックに差し替える。

use std::fmt;

use alertmail_domain::{EmailAddress, TransportError};
use async_trait::async_trait;
use lettre::{
    Address,
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    address::Envelope,
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{Tls, TlsParameters},
    },
};

/// PLAIN 認証の認証情報
///
/// `host` は認証を許可する接続先ホスト。接続先と一致しない場合は送信しない。
#[derive(Clone, PartialEq, Eq)]
pub struct PlainAuth {
    username: String,
    secret:   String,
    host:     String,
}

impl PlainAuth {
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            secret:   secret.into(),
            host:     host.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Debug for PlainAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainAuth")
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .field("host", &self.host)
            .finish()
    }
}

/// メール送信トランスポート
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// `server_address`（`host:port`）へ接続し、PLAIN 認証のうえ本文をそのまま送信する
    async fn send(
        &self,
        server_address: &str,
        auth: &PlainAuth,
        from: &str,
        recipients: &[EmailAddress],
        body: &[u8],
    ) -> Result<(), TransportError>;
}

/// lettre による SMTP トランスポート
///
/// 呼び出しごとに `AsyncSmtpTransport<Tokio1Executor>` を組み立て、
/// エンベロープを明示して `send_raw` で本文を送る。
/// 本文はヘッダを含む完成したメッセージとして扱い、加工しない。
#[derive(Debug, Clone, Copy, Default)]
pub struct LettreMailTransport;

impl LettreMailTransport {
    fn build_envelope(from: &str, recipients: &[EmailAddress]) -> Result<Envelope, TransportError> {
        let from: Address = from
            .parse()
            .map_err(|e| TransportError::new(format!("送信元アドレス不正: {e}")))?;
        let to = recipients
            .iter()
            .map(|recipient| {
                recipient
                    .as_str()
                    .parse::<Address>()
                    .map_err(|e| TransportError::new(format!("宛先アドレス不正 '{recipient}': {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Envelope::new(Some(from), to).map_err(TransportError::new)
    }
}

/// 接続時の TLS 方針
///
/// PLAIN 認証はパスワードを平文で送るため、暗号化されない接続で認証してよいのは
/// ループバック（`localhost`, `127.0.0.1`, `::1`）だけに限る。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TlsPolicy {
    /// STARTTLS が提供されていれば使い、なければ平文のまま認証する
    Opportunistic,
    /// STARTTLS を必須とし、提供されなければ認証前にエラーにする
    Required,
}

impl TlsPolicy {
    fn for_host(host: &str) -> Self {
        match host {
            "localhost" | "127.0.0.1" | "::1" => Self::Opportunistic,
            _ => Self::Required,
        }
    }

    fn into_tls(self, host: &str) -> Result<Tls, TransportError> {
        let parameters = TlsParameters::new(host.to_string())
            .map_err(|e| TransportError::new(format!("TLS 設定の作成に失敗: {e}")))?;
        Ok(match self {
            Self::Opportunistic => Tls::Opportunistic(parameters),
            Self::Required => Tls::Required(parameters),
        })
    }
}

/// `host:port` を分解する
fn split_server_address(server_address: &str) -> Result<(&str, u16), TransportError> {
    let (host, port) = server_address
        .rsplit_once(':')
        .ok_or_else(|| TransportError::new(format!("接続先にポートがありません: {server_address}")))?;
    let port = port
        .parse()
        .map_err(|e| TransportError::new(format!("ポート番号不正 '{port}': {e}")))?;
    Ok((host, port))
}

#[async_trait]
impl MailTransport for LettreMailTransport {
    async fn send(
        &self,
        server_address: &str,
        auth: &PlainAuth,
        from: &str,
        recipients: &[EmailAddress],
        body: &[u8],
    ) -> Result<(), TransportError> {
        let (host, port) = split_server_address(server_address)?;
        if auth.host() != host {
            return Err(TransportError::new(format!(
                "認証先ホストが接続先と一致しません: {} != {host}",
                auth.host()
            )));
        }

        let envelope = Self::build_envelope(from, recipients)?;

        let tls = TlsPolicy::for_host(host).into_tls(host)?;

        // 平文で接続し、STARTTLS で昇格する（暗号化の要否は TlsPolicy が決める）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .tls(tls)
            .credentials(Credentials::new(
                auth.username().to_string(),
                auth.secret().to_string(),
            ))
            .authentication(vec![Mechanism::Plain])
            .build();

        transport
            .send_raw(&envelope, body)
            .await
            .map_err(TransportError::new)?;

        Ok(())
    }
}
