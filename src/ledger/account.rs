//! Account balances and payload delivery
//!
//! Provides the `AccountLedger` trait the treasury executes against, plus an
//! in-memory implementation for tests and embedding.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Ledger-side errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Payload rejected by {0}")]
    PayloadRejected(String),
}

/// The runtime capability that holds per-identity balances
///
/// A credit carries the transfer amount and the attached call payload as one
/// atomic interaction: if the destination rejects the payload, the whole
/// credit fails and no balance changes. Implementations must uphold that
/// atomicity; the treasury relies on it for all-or-nothing execution.
pub trait AccountLedger {
    /// Get the balance held by an account
    fn balance_of(&self, account: &str) -> u128;

    /// Credit an account and deliver the attached payload
    ///
    /// The payload may be empty (a plain transfer).
    fn credit(&mut self, account: &str, amount: u128, payload: &[u8]) -> Result<(), LedgerError>;

    /// Debit an account
    ///
    /// Fails with `InsufficientBalance` if the account holds less than
    /// `amount`; the balance is unchanged on failure.
    fn debit(&mut self, account: &str, amount: u128) -> Result<(), LedgerError>;
}

/// In-memory account ledger
///
/// Accounts are created implicitly on first credit. Destinations registered
/// via [`refuse_payloads`](Self::refuse_payloads) reject any payload-carrying
/// credit, modeling a recipient whose receive hook fails.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    /// Balances: account -> amount
    balances: HashMap<String, u128>,
    /// Accounts that reject payload-carrying credits
    refusing: HashSet<String>,
}

impl InMemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger seeded with opening balances
    pub fn with_balances<I, S>(balances: I) -> Self
    where
        I: IntoIterator<Item = (S, u128)>,
        S: Into<String>,
    {
        Self {
            balances: balances
                .into_iter()
                .map(|(account, amount)| (account.into(), amount))
                .collect(),
            refusing: HashSet::new(),
        }
    }

    /// Mark an account as refusing payload-carrying credits
    ///
    /// Plain transfers (empty payload) to the account still succeed.
    pub fn refuse_payloads(&mut self, account: &str) {
        self.refusing.insert(account.to_string());
    }

    /// Sum of all account balances
    pub fn total_balance(&self) -> u128 {
        self.balances.values().sum()
    }

    /// Get accounts holding a non-zero balance
    pub fn holders(&self) -> Vec<(&String, &u128)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }
}

impl AccountLedger for InMemoryLedger {
    fn balance_of(&self, account: &str) -> u128 {
        *self.balances.get(account).unwrap_or(&0)
    }

    fn credit(&mut self, account: &str, amount: u128, payload: &[u8]) -> Result<(), LedgerError> {
        // Reject before touching the balance so a failed credit has no effect
        if !payload.is_empty() && self.refusing.contains(account) {
            return Err(LedgerError::PayloadRejected(account.to_string()));
        }

        *self.balances.entry(account.to_string()).or_insert(0) += amount;
        Ok(())
    }

    fn debit(&mut self, account: &str, amount: u128) -> Result<(), LedgerError> {
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: balance,
                need: amount,
            });
        }

        *self.balances.entry(account.to_string()).or_insert(0) -= amount;
        Ok(())
    }
}
