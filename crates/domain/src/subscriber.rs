//! # 通知先登録簿
//!
//! メールアドレスと通知有効フラグの対応を保持する登録簿を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`EmailAddress`] | 通知先メールアドレス | 大文字小文字を区別し、与えられた文字列のまま扱う |
//! | [`SubscriberRegistry`] | 登録簿 | メールアドレス → 通知有効フラグ |
//! | [`RegistryError`] | 登録簿エラー | 事前チェック違反 |
//!
//! ## 状態遷移
//!
//! ```text
//! 未登録 --add--> 有効 --deactivate--> 無効 --activate--> 有効
//! 有効/無効 --rename--> （新しいキー、同じ状態）
//! ```
//!
//! 削除操作は存在しない。エントリが消えるのは rename による旧キーの削除のみ。
//!
//! ## 並行性
//!
//! 登録簿は内部でロックを取らない。複数スレッドから操作する場合は
//! 呼び出し側で `Mutex` 等により直列化すること。

mod operations;
pub mod precheck;

use std::collections::HashMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use precheck::{ActivationCheck, ExistenceCheck, FixedCheck, LiveCheck};

/// 通知先メールアドレス（値オブジェクト）
///
/// 形式の検証や正規化は行わない。`A@example.com` と `a@example.com` は
/// 別のアドレスとして扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display("{_0}")]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for EmailAddress {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EmailAddress {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// 登録簿の操作で発生するエラー
///
/// いずれも業務上想定される結果であり、内部でリトライや回復は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// メールアドレスが登録されていない
    #[error("メールアドレス '{0}' は登録されていません")]
    NotFound(EmailAddress),

    /// 通知が有効になっていない（未登録の場合も含む）
    #[error("メールアドレス '{0}' は通知が有効になっていません")]
    NotActivated(EmailAddress),

    /// 既に登録済み
    #[error("メールアドレス '{0}' は既に登録されています")]
    AlreadyRegistered(EmailAddress),

    /// 既に通知が無効
    #[error("メールアドレス '{0}' は既に通知が無効になっています")]
    AlreadyDeactivated(EmailAddress),

    /// 既に通知が有効
    #[error("メールアドレス '{0}' は既に通知が有効になっています")]
    AlreadyActivated(EmailAddress),
}

impl RegistryError {
    /// エラーの対象となったメールアドレスを返す
    pub fn address(&self) -> &EmailAddress {
        match self {
            Self::NotFound(address)
            | Self::NotActivated(address)
            | Self::AlreadyRegistered(address)
            | Self::AlreadyDeactivated(address)
            | Self::AlreadyActivated(address) => address,
        }
    }
}

/// 通知先登録簿
///
/// メールアドレスごとに通知有効フラグを 1 つだけ持つ。
/// 未登録のアドレスはエントリ自体が存在しない。
///
/// 変更操作（[`add`](Self::add), [`rename`](Self::rename),
/// [`deactivate`](Self::deactivate), [`activate`](Self::activate)）は
/// 事前チェックを引数で受け取る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberRegistry {
    entries: HashMap<EmailAddress, bool>,
}

impl SubscriberRegistry {
    /// 空の登録簿を作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 通知有効なアドレスを 1 件だけ持つ登録簿を作成する
    ///
    /// プロセス起動時の初期データ投入に使用する。
    pub fn seeded(address: EmailAddress) -> Self {
        let mut entries = HashMap::new();
        entries.insert(address, true);
        Self { entries }
    }

    /// アドレスが登録されていることを確認する
    ///
    /// # エラー
    ///
    /// 未登録の場合は [`RegistryError::NotFound`] を返す。
    pub fn exists(&self, address: &EmailAddress) -> Result<(), RegistryError> {
        if !self.contains(address) {
            return Err(RegistryError::NotFound(address.clone()));
        }
        Ok(())
    }

    /// アドレスの通知が有効であることを確認する
    ///
    /// 未登録と無効を区別しない。区別が必要な場合は先に
    /// [`exists`](Self::exists) を呼ぶこと。
    ///
    /// # エラー
    ///
    /// 無効または未登録の場合は [`RegistryError::NotActivated`] を返す。
    pub fn is_activated(&self, address: &EmailAddress) -> Result<(), RegistryError> {
        if !self.activation(address).unwrap_or(false) {
            return Err(RegistryError::NotActivated(address.clone()));
        }
        Ok(())
    }

    pub fn contains(&self, address: &EmailAddress) -> bool {
        self.entries.contains_key(address)
    }

    /// 通知有効フラグを返す（未登録なら `None`）
    pub fn activation(&self, address: &EmailAddress) -> Option<bool> {
        self.entries.get(address).copied()
    }

    /// 通知が有効なアドレスをソート済みで返す
    ///
    /// メール送信前の宛先絞り込みに使用する。
    pub fn activated_addresses(&self) -> Vec<EmailAddress> {
        let mut addresses: Vec<EmailAddress> = self
            .entries
            .iter()
            .filter(|(_, activated)| **activated)
            .map(|(address, _)| address.clone())
            .collect();
        addresses.sort();
        addresses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全エントリを（アドレス, 通知有効フラグ）で列挙する。順序は不定。
    pub fn iter(&self) -> impl Iterator<Item = (&EmailAddress, bool)> {
        self.entries
            .iter()
            .map(|(address, activated)| (address, *activated))
    }
}
