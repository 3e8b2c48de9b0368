//! # AlertMail Notifier
//!
//! 標準入力から読み込んだ本文を、通知が有効な全アドレスへ送信する。
//!
//! ## 処理の流れ
//!
//! 1. `.env` と環境変数から設定を読み込む
//! 2. 初期アドレス（`SEED_EMAIL`）を登録した登録簿を作成する
//! 3. `NOTIFICATION_BACKEND` に応じたディスパッチャで一斉送信する
//!
//! ## 起動方法
//!
//! ```bash
//! # ログ出力のみ
//! echo "Subject: test" | cargo run -p alertmail-notifier
//!
//! # Mailpit 経由で送信
//! NOTIFICATION_BACKEND=smtp SMTP_USER=u SMTP_PASSWORD=p \
//!   cargo run -p alertmail-notifier < message.eml
//! ```

use std::sync::Arc;

use alertmail_domain::SubscriberRegistry;
use alertmail_infra::{EmailDispatcher, NoopEmailDispatcher, SmtpEmailDispatcher};
use alertmail_notifier::{
    config::{BackendConfig, NotifierConfig},
    telemetry::{LogFormat, init_tracing},
    usecase::SubscriptionUseCase,
};
use anyhow::Context as _;
use tokio::io::AsyncReadExt as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;

    let dispatcher: Arc<dyn EmailDispatcher> = match config.backend {
        BackendConfig::Smtp(dispatch) => {
            tracing::info!(server = %dispatch.server_address(), "SMTP で送信します");
            Arc::new(SmtpEmailDispatcher::new(dispatch))
        }
        BackendConfig::Noop => {
            tracing::info!("Noop: メールは送信しません");
            Arc::new(NoopEmailDispatcher)
        }
    };

    tracing::info!(email = %config.seed_email, "初期アドレスを登録します");
    let usecase = SubscriptionUseCase::new(SubscriberRegistry::seeded(config.seed_email), dispatcher);

    let mut body = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut body)
        .await
        .context("本文の読み込みに失敗しました")?;

    let sent = usecase.broadcast(&body).await?;
    tracing::info!(recipients = sent, "送信処理が完了しました");

    Ok(())
}
