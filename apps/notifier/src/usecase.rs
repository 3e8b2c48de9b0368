//! # ユースケース層
//!
//! 登録簿の操作とメール送信を束ねる。
//!
//! - `subscription`: 通知先の登録・変更・有効/無効化と一斉送信

pub mod subscription;

pub use subscription::SubscriptionUseCase;
