//! 登録簿の変更操作
//!
//! 各操作は渡された事前チェックの結果だけで可否を判断し、
//! 成功した場合にのみ登録簿を変更する。

use super::{
    EmailAddress,
    RegistryError,
    SubscriberRegistry,
    precheck::{ActivationCheck, ExistenceCheck},
};

impl SubscriberRegistry {
    /// アドレスを通知有効の状態で登録する
    ///
    /// # エラー
    ///
    /// `check` が登録済みと判定した場合は [`RegistryError::AlreadyRegistered`]
    /// を返し、登録簿は変更しない。
    pub fn add(
        &mut self,
        address: EmailAddress,
        check: &dyn ExistenceCheck,
    ) -> Result<(), RegistryError> {
        if check.exists(self, &address) {
            return Err(RegistryError::AlreadyRegistered(address));
        }

        self.entries.insert(address, true);
        Ok(())
    }

    /// アドレスを変更する（通知有効フラグは引き継ぐ）
    ///
    /// 変更先のアドレスが既に登録されている場合、その状態は上書きされる。
    /// 変更元と変更先が同じ場合は何も変わらない。
    ///
    /// # エラー
    ///
    /// `check` が変更元を未登録と判定した場合は [`RegistryError::NotFound`] を返す。
    pub fn rename(
        &mut self,
        old: &EmailAddress,
        new: EmailAddress,
        check: &dyn ExistenceCheck,
    ) -> Result<(), RegistryError> {
        if !check.exists(self, old) {
            return Err(RegistryError::NotFound(old.clone()));
        }

        // 登録簿に無い場合は無効扱いで引き継ぐ
        let activated = self.entries.remove(old).unwrap_or(false);
        self.entries.insert(new, activated);
        Ok(())
    }

    /// 通知を無効にする
    ///
    /// # エラー
    ///
    /// - `exists` が未登録と判定した場合は [`RegistryError::NotFound`]
    /// - `activated` が既に無効と判定した場合は [`RegistryError::AlreadyDeactivated`]
    pub fn deactivate(
        &mut self,
        address: &EmailAddress,
        exists: &dyn ExistenceCheck,
        activated: &dyn ActivationCheck,
    ) -> Result<(), RegistryError> {
        if !exists.exists(self, address) {
            return Err(RegistryError::NotFound(address.clone()));
        }
        if !activated.is_activated(self, address) {
            return Err(RegistryError::AlreadyDeactivated(address.clone()));
        }

        self.entries.insert(address.clone(), false);
        Ok(())
    }

    /// 通知を有効にする
    ///
    /// # エラー
    ///
    /// - `exists` が未登録と判定した場合は [`RegistryError::NotFound`]
    /// - `activated` が既に有効と判定した場合は [`RegistryError::AlreadyActivated`]
    pub fn activate(
        &mut self,
        address: &EmailAddress,
        exists: &dyn ExistenceCheck,
        activated: &dyn ActivationCheck,
    ) -> Result<(), RegistryError> {
        if !exists.exists(self, address) {
            return Err(RegistryError::NotFound(address.clone()));
        }
        if activated.is_activated(self, address) {
            return Err(RegistryError::AlreadyActivated(address.clone()));
        }

        self.entries.insert(address.clone(), true);
        Ok(())
    }
}
