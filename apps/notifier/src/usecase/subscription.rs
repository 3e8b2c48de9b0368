//! # 通知先ユースケース
//!
//! 登録簿を `Mutex` で保護して所有し、登録簿の操作と一斉送信を提供する。
//!
//! ## 設計方針
//!
//! - **排他制御は呼び出し側で行う**: 登録簿自体はロックを持たないため、
//!   このユースケースが `Mutex` で直列化する
//! - **ロックを await 越しに保持しない**: 送信前に宛先を確定してロックを解放する
//! - **依存性注入**: 送信は `Arc<dyn EmailDispatcher>` で外部から注入する

use std::sync::{Arc, Mutex, MutexGuard};

use alertmail_domain::{
    EmailAddress,
    RegistryError,
    SubscriberRegistry,
    subscriber::LiveCheck,
};
use alertmail_infra::EmailDispatcher;

use crate::error::NotifierError;

/// 通知先ユースケース
pub struct SubscriptionUseCase {
    registry:   Mutex<SubscriberRegistry>,
    dispatcher: Arc<dyn EmailDispatcher>,
}

impl SubscriptionUseCase {
    pub fn new(registry: SubscriberRegistry, dispatcher: Arc<dyn EmailDispatcher>) -> Self {
        Self {
            registry: Mutex::new(registry),
            dispatcher,
        }
    }

    fn registry(&self) -> Result<MutexGuard<'_, SubscriberRegistry>, NotifierError> {
        self.registry
            .lock()
            .map_err(|e| NotifierError::Internal(format!("登録簿のロックに失敗: {e}")))
    }

    /// アドレスが登録されていることを確認する
    pub fn exists(&self, address: &EmailAddress) -> Result<(), NotifierError> {
        Ok(self.registry()?.exists(address)?)
    }

    /// アドレスの通知が有効であることを確認する
    pub fn is_activated(&self, address: &EmailAddress) -> Result<(), NotifierError> {
        Ok(self.registry()?.is_activated(address)?)
    }

    /// アドレスを通知有効で登録する
    pub fn add(&self, address: EmailAddress) -> Result<(), NotifierError> {
        let result = self.registry()?.add(address.clone(), &LiveCheck);
        log_outcome("add", &address, result)
    }

    /// アドレスを変更する
    pub fn rename(&self, old: &EmailAddress, new: EmailAddress) -> Result<(), NotifierError> {
        let result = self.registry()?.rename(old, new.clone(), &LiveCheck);
        log_outcome("rename", old, result)?;
        tracing::debug!(email = %old, new_email = %new, "アドレス変更");
        Ok(())
    }

    /// 通知を無効にする
    pub fn deactivate(&self, address: &EmailAddress) -> Result<(), NotifierError> {
        let result = self
            .registry()?
            .deactivate(address, &LiveCheck, &LiveCheck);
        log_outcome("deactivate", address, result)
    }

    /// 通知を有効にする
    pub fn activate(&self, address: &EmailAddress) -> Result<(), NotifierError> {
        let result = self.registry()?.activate(address, &LiveCheck, &LiveCheck);
        log_outcome("activate", address, result)
    }

    /// 現在の登録簿の複製を返す
    pub fn snapshot(&self) -> Result<SubscriberRegistry, NotifierError> {
        Ok(self.registry()?.clone())
    }

    /// 通知が有効な全アドレスに本文を送信する
    ///
    /// 宛先が 0 件の場合は送信せずに 0 を返す。
    /// 送信に失敗した場合はリトライせず、そのままエラーを返す。
    ///
    /// # 戻り値
    ///
    /// 送信した宛先の件数
    pub async fn broadcast(&self, body: &[u8]) -> Result<usize, NotifierError> {
        let recipients = self.registry()?.activated_addresses();
        if recipients.is_empty() {
            tracing::info!("通知が有効な宛先がないため送信をスキップ");
            return Ok(0);
        }

        match self.dispatcher.send_email(&recipients, body).await {
            Ok(()) => {
                tracing::info!(recipients = recipients.len(), "通知メール送信成功");
                Ok(recipients.len())
            }
            Err(e) => {
                tracing::error!(
                    recipients = recipients.len(),
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(e.into())
            }
        }
    }
}

fn log_outcome(
    action: &'static str,
    address: &EmailAddress,
    result: Result<(), RegistryError>,
) -> Result<(), NotifierError> {
    match &result {
        Ok(()) => tracing::info!(action, email = %address, "登録簿を更新しました"),
        Err(e) => tracing::warn!(action, email = %address, error = %e, "登録簿の更新を拒否しました"),
    }
    result.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use alertmail_infra::mock::MockEmailDispatcher;
    use pretty_assertions::assert_eq;

    use super::*;

    const SEED: &str = "prueba@prueba.com";

    fn addr(value: &str) -> EmailAddress {
        EmailAddress::from(value)
    }

    fn setup(dispatcher: MockEmailDispatcher) -> SubscriptionUseCase {
        SubscriptionUseCase::new(
            SubscriberRegistry::seeded(addr(SEED)),
            Arc::new(dispatcher),
        )
    }

    #[test]
    fn test_登録済みアドレスのaddはalready_registeredになる() {
        let sut = setup(MockEmailDispatcher::new());

        let err = sut.add(addr(SEED)).unwrap_err();

        assert!(matches!(
            err,
            NotifierError::Registry(RegistryError::AlreadyRegistered(ref a)) if a.as_str() == SEED
        ));
    }

    #[test]
    fn test_add_rename_deactivate_activateが登録簿に反映される() {
        let sut = setup(MockEmailDispatcher::new());

        sut.add(addr("x@x.com")).unwrap();
        sut.rename(&addr("x@x.com"), addr("y@y.com")).unwrap();
        sut.deactivate(&addr("y@y.com")).unwrap();

        assert!(sut.exists(&addr("x@x.com")).is_err());
        assert!(sut.exists(&addr("y@y.com")).is_ok());
        assert!(sut.is_activated(&addr("y@y.com")).is_err());

        sut.activate(&addr("y@y.com")).unwrap();
        assert!(sut.is_activated(&addr("y@y.com")).is_ok());
        assert_eq!(sut.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn test_deactivateを2回続けると2回目はエラーになる() {
        let sut = setup(MockEmailDispatcher::new());

        sut.deactivate(&addr(SEED)).unwrap();
        let err = sut.deactivate(&addr(SEED)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "メールアドレス 'prueba@prueba.com' は既に通知が無効になっています"
        );
    }

    #[tokio::test]
    async fn test_broadcastは通知有効な宛先にのみ送信する() {
        let dispatcher = MockEmailDispatcher::new();
        let sut = setup(dispatcher.clone());
        sut.add(addr("a@a.com")).unwrap();
        sut.add(addr("b@b.com")).unwrap();
        sut.deactivate(&addr("b@b.com")).unwrap();

        let sent = sut.broadcast(b"sismo M5.1").await.unwrap();

        assert_eq!(sent, 2);
        let dispatched = dispatcher.dispatched();
        assert_eq!(dispatched.len(), 1);
        assert_eq!(dispatched[0].recipients, vec![addr("a@a.com"), addr(SEED)]);
        assert_eq!(dispatched[0].body, b"sismo M5.1".to_vec());
    }

    #[tokio::test]
    async fn test_宛先がなければ送信しない() {
        let dispatcher = MockEmailDispatcher::new();
        let sut = setup(dispatcher.clone());
        sut.deactivate(&addr(SEED)).unwrap();

        let sent = sut.broadcast(b"body").await.unwrap();

        assert_eq!(sent, 0);
        assert!(dispatcher.dispatched().is_empty());
    }

    #[tokio::test]
    async fn test_送信失敗はtransportエラーとして返す() {
        let sut = setup(MockEmailDispatcher::failing("connection refused"));

        let err = sut.broadcast(b"body").await.unwrap_err();

        assert!(matches!(err, NotifierError::Transport(_)));
        assert_eq!(err.to_string(), "メール送信に失敗: connection refused");
    }
}
