//! 送信設定

use std::fmt;

/// SMTP 送信設定
///
/// 生成後は変更できない。ディスパッチャが排他的に所有する。
/// `Debug` 出力ではパスワードをマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    user:         String,
    secret:       String,
    host:         String,
    port:         u16,
    from_address: String,
}

impl DispatchConfig {
    /// 新しい送信設定を作成する
    ///
    /// # 引数
    ///
    /// - `user`: SMTP 認証ユーザー
    /// - `secret`: SMTP 認証パスワード
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    /// - `from_address`: 送信元メールアドレス
    pub fn new(
        user: impl Into<String>,
        secret: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        from_address: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            secret: secret.into(),
            host: host.into(),
            port,
            from_address: from_address.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// 接続先アドレス（`host:port`）
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for DispatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchConfig")
            .field("user", &self.user)
            .field("secret", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("from_address", &self.from_address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_addressはホストとポートを連結する() {
        let config = DispatchConfig::new("user", "pw", "smtp.example.com", 587, "from@example.com");

        assert_eq!(config.server_address(), "smtp.example.com:587");
    }

    #[test]
    fn test_debug出力でパスワードがマスクされる() {
        let config = DispatchConfig::new("user", "s3cr3t", "localhost", 1025, "from@example.com");

        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[REDACTED]"));
    }
}
