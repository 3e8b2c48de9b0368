//! # 事前チェック
//!
//! 登録簿を変更する前に参照する存在確認・有効確認の抽象化。
//! 操作ごとに引数で渡し、登録簿やグローバル状態には保持しない。
//!
//! - [`LiveCheck`]: 渡された登録簿を実際に参照する
//! - [`FixedCheck`]: 登録簿を見ずに固定値を返すテスト用実装

use super::{EmailAddress, SubscriberRegistry};

/// アドレスの存在確認
pub trait ExistenceCheck: Send + Sync {
    fn exists(&self, registry: &SubscriberRegistry, address: &EmailAddress) -> bool;
}

/// アドレスの通知有効確認
///
/// 未登録のアドレスは無効として扱う。
pub trait ActivationCheck: Send + Sync {
    fn is_activated(&self, registry: &SubscriberRegistry, address: &EmailAddress) -> bool;
}

/// 登録簿の現在の状態を返す実装
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveCheck;

impl ExistenceCheck for LiveCheck {
    fn exists(&self, registry: &SubscriberRegistry, address: &EmailAddress) -> bool {
        registry.contains(address)
    }
}

impl ActivationCheck for LiveCheck {
    fn is_activated(&self, registry: &SubscriberRegistry, address: &EmailAddress) -> bool {
        registry.activation(address).unwrap_or(false)
    }
}

/// 常に同じ値を返すテスト用実装
///
/// 登録簿の状態と無関係に前提条件を組み立てたい場合に使用する
/// （例: 削除済みのアドレスを再登録するケース）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCheck(pub bool);

impl ExistenceCheck for FixedCheck {
    fn exists(&self, _registry: &SubscriberRegistry, _address: &EmailAddress) -> bool {
        self.0
    }
}

impl ActivationCheck for FixedCheck {
    fn is_activated(&self, _registry: &SubscriberRegistry, _address: &EmailAddress) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn registry() -> SubscriberRegistry {
        let mut registry = SubscriberRegistry::seeded(EmailAddress::from("on@example.com"));
        registry
            .entries
            .insert(EmailAddress::from("off@example.com"), false);
        registry
    }

    #[rstest]
    #[case("on@example.com", true, true)]
    #[case("off@example.com", true, false)]
    #[case("none@example.com", false, false)]
    fn test_live_checkは登録簿の状態を返す(
        #[case] address: &str,
        #[case] exists: bool,
        #[case] activated: bool,
    ) {
        let registry = registry();
        let address = EmailAddress::from(address);

        assert_eq!(LiveCheck.exists(&registry, &address), exists);
        assert_eq!(LiveCheck.is_activated(&registry, &address), activated);
    }

    #[rstest]
    fn test_fixed_checkは登録簿に関係なく固定値を返す(#[values(true, false)] value: bool) {
        let registry = registry();
        let check = FixedCheck(value);

        for address in ["on@example.com", "off@example.com", "none@example.com"] {
            let address = EmailAddress::from(address);
            assert_eq!(check.exists(&registry, &address), value);
            assert_eq!(check.is_activated(&registry, &address), value);
        }
    }
}
