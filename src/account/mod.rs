//! Player account collaborators
//!
//! The engine never owns balances. It reads and writes them through a
//! [`BalanceProvider`] and reports problems through a [`Notifier`]. An in-memory
//! ledger and two notifiers are provided for local play and tests.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Network + currency pair selecting one balance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BalanceKey {
    pub network: String,
    pub currency: String,
}

impl BalanceKey {
    pub fn new(network: &str, currency: &str) -> Self {
        Self {
            network: network.to_string(),
            currency: currency.to_string(),
        }
    }

    /// Key used in [`UserRecord::balances`]
    pub fn storage_key(&self) -> String {
        format!("{}/{}", self.network, self.currency)
    }
}

impl fmt::Display for BalanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.currency, self.network)
    }
}

/// Authoritative user record as returned by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub address: String,
    /// Balances keyed by [`BalanceKey::storage_key`]
    pub balances: BTreeMap<String, f64>,
}

impl UserRecord {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            balances: BTreeMap::new(),
        }
    }

    pub fn with_balance(mut self, key: &BalanceKey, amount: f64) -> Self {
        self.balances.insert(key.storage_key(), amount);
        self
    }

    pub fn balance(&self, key: &BalanceKey) -> Option<f64> {
        self.balances.get(&key.storage_key()).copied()
    }
}

/// Balance lookups and updates for the signed-in player
pub trait BalanceProvider {
    /// Available balance for a network/currency
    fn balance(&self, key: &BalanceKey) -> Result<f64, AccountError>;

    /// Overwrite a balance, returning the updated record
    fn update_balance(&mut self, key: &BalanceKey, amount: f64) -> Result<UserRecord, AccountError>;

    /// Re-fetch the authoritative record
    fn refresh_user(&mut self, address: &str) -> Result<UserRecord, AccountError>;
}

/// Fire-and-forget player notifications
pub trait Notifier {
    fn report_validation_error(&mut self, title: &str, message: &str);
    fn report_sync_failure(&mut self, title: &str, message: &str);
}

/// In-memory balance store for a single user
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    record: UserRecord,
    /// Simulate a backend outage: updates and refreshes fail
    pub offline: bool,
}

impl MemoryLedger {
    pub fn new(record: UserRecord) -> Self {
        Self {
            record,
            offline: false,
        }
    }

    pub fn record(&self) -> &UserRecord {
        &self.record
    }
}

impl BalanceProvider for MemoryLedger {
    fn balance(&self, key: &BalanceKey) -> Result<f64, AccountError> {
        self.record
            .balance(key)
            .ok_or_else(|| AccountError::UnknownBalance(key.to_string()))
    }

    fn update_balance(&mut self, key: &BalanceKey, amount: f64) -> Result<UserRecord, AccountError> {
        if self.offline {
            return Err(AccountError::Sync("ledger offline".into()));
        }
        self.record.balances.insert(key.storage_key(), amount);
        Ok(self.record.clone())
    }

    fn refresh_user(&mut self, address: &str) -> Result<UserRecord, AccountError> {
        if self.offline {
            return Err(AccountError::Sync("ledger offline".into()));
        }
        if address != self.record.address {
            return Err(AccountError::UnknownUser(address.to_string()));
        }
        Ok(self.record.clone())
    }
}

/// Notifier that writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report_validation_error(&mut self, title: &str, message: &str) {
        log::warn!("{title}: {message}");
    }

    fn report_sync_failure(&mut self, title: &str, message: &str) {
        log::error!("{title}: {message}");
    }
}

/// Kind of a recorded notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    SyncFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

/// Notifier that keeps every notice for later display
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl NoticeLog {
    fn push(&mut self, kind: NoticeKind, title: &str, message: &str) {
        self.notices.push(Notice {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    pub fn count(&self, kind: NoticeKind) -> usize {
        self.notices.iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for NoticeLog {
    fn report_validation_error(&mut self, title: &str, message: &str) {
        self.push(NoticeKind::Validation, title, message);
    }

    fn report_sync_failure(&mut self, title: &str, message: &str) {
        self.push(NoticeKind::SyncFailure, title, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usdt() -> BalanceKey {
        BalanceKey::new("tron", "USDT")
    }

    #[test]
    fn test_ledger_balance_lookup() {
        let ledger = MemoryLedger::new(UserRecord::new("0xabc").with_balance(&usdt(), 25.0));
        assert_eq!(ledger.balance(&usdt()), Ok(25.0));
        assert_eq!(
            ledger.balance(&BalanceKey::new("eth", "USDC")),
            Err(AccountError::UnknownBalance("USDC on eth".into()))
        );
    }

    #[test]
    fn test_ledger_update_and_refresh() {
        let mut ledger = MemoryLedger::new(UserRecord::new("0xabc").with_balance(&usdt(), 25.0));
        let record = ledger.update_balance(&usdt(), 30.0).unwrap();
        assert_eq!(record.balance(&usdt()), Some(30.0));
        assert_eq!(ledger.refresh_user("0xabc").unwrap().balance(&usdt()), Some(30.0));
        assert!(matches!(ledger.refresh_user("0xdef"), Err(AccountError::UnknownUser(_))));
    }

    #[test]
    fn test_offline_ledger_fails_sync() {
        let mut ledger = MemoryLedger::new(UserRecord::new("0xabc").with_balance(&usdt(), 25.0));
        ledger.offline = true;
        assert!(matches!(ledger.update_balance(&usdt(), 1.0), Err(AccountError::Sync(_))));
        assert_eq!(ledger.record().balance(&usdt()), Some(25.0));
    }

    #[test]
    fn test_notice_log() {
        let mut log = NoticeLog::default();
        log.report_validation_error("Deposit", "too small");
        log.report_sync_failure("Sync", "offline");
        assert_eq!(log.count(NoticeKind::Validation), 1);
        assert_eq!(log.count(NoticeKind::SyncFailure), 1);
        assert_eq!(log.notices[0].title, "Deposit");
    }
}
