//! Reward settlement
//!
//! Runs once per game, after the engine has already entered `finished`. Writes the
//! escrowed balance plus the reward back to the provider, then replaces the local
//! user record with a fresh copy. A failure is reported but never rolls the game
//! back.

use crate::account::{BalanceKey, BalanceProvider, Notifier, UserRecord};
use crate::error::AccountError;

/// Everything needed to pay out one finished game
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub key: BalanceKey,
    /// Balance after the deposit was escrowed
    pub current_balance: f64,
    pub reward: f64,
}

impl Settlement {
    pub fn new_balance(&self) -> f64 {
        self.current_balance + self.reward
    }
}

/// Push the new balance and re-fetch the user record
pub fn settle<B, N>(
    settlement: &Settlement,
    address: &str,
    provider: &mut B,
    notifier: &mut N,
) -> Result<UserRecord, AccountError>
where
    B: BalanceProvider + ?Sized,
    N: Notifier + ?Sized,
{
    let result = provider
        .update_balance(&settlement.key, settlement.new_balance())
        .and_then(|_| provider.refresh_user(address));

    match &result {
        Ok(_) => log::info!(
            "Settled {} reward {} -> balance {}",
            settlement.key,
            settlement.reward,
            settlement.new_balance()
        ),
        Err(e) => {
            log::warn!("Settlement for {} failed: {e}", settlement.key);
            notifier.report_sync_failure("Balance sync failed", &e.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{MemoryLedger, NoticeKind, NoticeLog};

    fn key() -> BalanceKey {
        BalanceKey::new("tron", "USDT")
    }

    fn settlement() -> Settlement {
        Settlement {
            key: key(),
            current_balance: 90.0,
            reward: 5.0,
        }
    }

    #[test]
    fn test_settle_writes_balance_plus_reward() {
        let mut ledger = MemoryLedger::new(UserRecord::new("0xabc").with_balance(&key(), 100.0));
        let mut notices = NoticeLog::default();
        let record = settle(&settlement(), "0xabc", &mut ledger, &mut notices).unwrap();
        assert_eq!(record.balance(&key()), Some(95.0));
        assert!(notices.notices.is_empty());
    }

    #[test]
    fn test_settle_failure_is_reported() {
        let mut ledger = MemoryLedger::new(UserRecord::new("0xabc").with_balance(&key(), 100.0));
        ledger.offline = true;
        let mut notices = NoticeLog::default();
        let result = settle(&settlement(), "0xabc", &mut ledger, &mut notices);
        assert!(result.is_err());
        assert_eq!(notices.count(NoticeKind::SyncFailure), 1);
        assert_eq!(ledger.record().balance(&key()), Some(100.0));
    }

    #[test]
    fn test_refresh_failure_is_reported() {
        let mut ledger = MemoryLedger::new(UserRecord::new("0xabc").with_balance(&key(), 100.0));
        let mut notices = NoticeLog::default();
        let result = settle(&settlement(), "0xother", &mut ledger, &mut notices);
        assert!(matches!(result, Err(AccountError::UnknownUser(_))));
        assert_eq!(notices.count(NoticeKind::SyncFailure), 1);
    }
}
