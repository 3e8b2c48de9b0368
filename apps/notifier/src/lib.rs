//! # AlertMail Notifier ライブラリ
//!
//! 設定読み込み、ログ初期化、登録簿とメール送信を束ねるユースケースを公開する。
//! バイナリ（`main.rs`）と結合テストから利用する。

pub mod config;
pub mod error;
pub mod telemetry;
pub mod usecase;
