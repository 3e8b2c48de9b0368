//! # ログ初期化
//!
//! 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替えと、
//! `RUST_LOG` によるフィルタを設定する。
//!
//! 単一プロセスの CLI 向けに絞っており、サービス名やリクエスト単位の
//! span フィールドは付与しない。span は JSON 出力時に現在の span だけを出す。

use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` 未設定時のフィルタ
const DEFAULT_FILTER: &str = "info,alertmail=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する。
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            eprintln!("WARNING: unknown LOG_FORMAT={s:?}, falling back to pretty");
            Self::Pretty
        })
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// トレーシングを初期化する
///
/// 二重に初期化した場合はパニックする。プロセス起動時に 1 回だけ呼ぶこと。
pub fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
