//! # AlertMail ドメイン層
//!
//! 通知先メールアドレスの登録簿と、その状態遷移ルールを定義する。
//!
//! ## 設計方針
//!
//! - **登録簿は値として所有する**: グローバル状態を持たず、呼び出し側が
//!   [`SubscriberRegistry`] を所有・共有する
//! - **事前チェックの注入**: 存在確認・有効確認はトレイトで抽象化し、
//!   操作ごとに引数で渡す（テストで固定値に差し替え可能）
//! - **同期・ロックなし**: 登録簿は内部でロックを取らない。
//!   並行アクセスが必要な場合は呼び出し側で排他制御する
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ドメイン層はメール送信の具体的な方法（SMTP 等）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`subscriber`] - メールアドレスと登録簿、事前チェック、登録簿操作
//! - [`notification`] - メール送信エラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use alertmail_domain::subscriber::{EmailAddress, FixedCheck, SubscriberRegistry};
//!
//! let mut registry = SubscriberRegistry::seeded(EmailAddress::from("prueba@prueba.com"));
//! let address = EmailAddress::from("x@x.com");
//!
//! assert!(registry.exists(&address).is_err());
//! registry.add(address.clone(), &FixedCheck(false)).unwrap();
//! assert!(registry.is_activated(&address).is_ok());
//! ```

pub mod notification;
pub mod subscriber;

pub use notification::TransportError;
pub use subscriber::{EmailAddress, RegistryError, SubscriberRegistry};
