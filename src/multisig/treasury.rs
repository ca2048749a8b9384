//! Treasury engine
//!
//! Owns the transaction registry, the id counter, the pooled balance, and
//! the event log, and coordinates the propose/confirm/execute lifecycle.

use crate::ledger::{AccountLedger, LedgerError};
use crate::multisig::events::WalletEvent;
use crate::multisig::transaction::Transaction;
use crate::multisig::wallet::{ExecutionPolicy, MultisigError, WalletConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A quorum-governed pool of funds
///
/// Every mutating operation is an atomic unit of work: it either commits
/// fully or fails with a typed error and no state change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigTreasury {
    /// Owner set, quorum, and execution policy (fixed at construction)
    config: WalletConfig,
    /// Transaction registry by id; append-only, entries are never removed
    transactions: BTreeMap<u64, Transaction>,
    /// Next id to assign; ids start at 1 and are never reused
    next_id: u64,
    /// Pooled treasury balance in native units
    balance: u128,
    /// Append-only event log
    events: Vec<WalletEvent>,
}

impl MultisigTreasury {
    /// Create a new treasury from a validated configuration
    pub fn new(config: WalletConfig) -> Self {
        Self {
            config,
            transactions: BTreeMap::new(),
            next_id: 1,
            balance: 0,
            events: Vec::new(),
        }
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Fund the treasury
    ///
    /// Any account may deposit; there is no owner restriction. The attached
    /// value is debited from the depositor's ledger account in the same
    /// call, so a depositor without sufficient funds fails before any state
    /// changes.
    pub fn deposit(
        &mut self,
        from: &str,
        amount: u128,
        ledger: &mut dyn AccountLedger,
    ) -> Result<(), MultisigError> {
        ledger.debit(from, amount).map_err(|err| match err {
            LedgerError::InsufficientBalance { have, need } => {
                MultisigError::InsufficientFunds { have, need }
            }
            other => MultisigError::ExternalCallFailed(other),
        })?;

        self.balance += amount;
        self.events.push(WalletEvent::FundsDeposited {
            from: from.to_string(),
            amount,
        });

        log::info!("Deposit of {} from {}; treasury now {}", amount, from, self.balance);

        Ok(())
    }

    /// Propose a transfer out of the treasury
    ///
    /// Returns the new transaction's id. Proposing does not confirm; the
    /// proposer must call [`confirm_transaction`](Self::confirm_transaction)
    /// for their vote to count.
    pub fn create_transaction(
        &mut self,
        caller: &str,
        to: &str,
        value: u128,
        data: Vec<u8>,
    ) -> Result<u64, MultisigError> {
        if !self.config.is_owner(caller) {
            return Err(MultisigError::Unauthorized(caller.to_string()));
        }

        if to.is_empty() {
            return Err(MultisigError::InvalidRecipient(
                "destination identity must not be empty".to_string(),
            ));
        }

        let id = self.next_id;
        let tx = Transaction::new(id, caller.to_string(), to.to_string(), value, data.clone());
        self.transactions.insert(id, tx);
        self.next_id += 1;

        self.events.push(WalletEvent::TransactionCreated {
            id,
            proposer: caller.to_string(),
            to: to.to_string(),
            value,
            data,
        });

        log::info!("Transaction {} created by {}: {} -> {}", id, caller, value, to);

        Ok(id)
    }

    /// Confirm a proposed transfer
    ///
    /// One confirmation per owner per transaction; a repeat confirmation is
    /// rejected rather than silently ignored. Never auto-executes.
    pub fn confirm_transaction(&mut self, caller: &str, id: u64) -> Result<(), MultisigError> {
        if !self.config.is_owner(caller) {
            return Err(MultisigError::Unauthorized(caller.to_string()));
        }

        let tx = self
            .transactions
            .get_mut(&id)
            .ok_or(MultisigError::NotFound(id))?;

        tx.record_confirmation(caller)?;
        let count = tx.confirmation_count();

        self.events.push(WalletEvent::TransactionConfirmed {
            id,
            confirmer: caller.to_string(),
        });

        log::info!(
            "Transaction {} confirmed by {} ({}/{})",
            id,
            caller,
            count,
            self.config.quorum()
        );

        Ok(())
    }

    /// Execute a quorum-approved transfer
    ///
    /// Internal bookkeeping (the `executed` flag and the treasury debit) is
    /// finalized before the ledger call, so a destination capable of
    /// re-entering observes the transaction as already executed. If the
    /// ledger rejects the transfer, both are restored and the call has no
    /// effect.
    pub fn execute_transaction(
        &mut self,
        caller: &str,
        id: u64,
        ledger: &mut dyn AccountLedger,
    ) -> Result<(), MultisigError> {
        if self.config.execution_policy() == ExecutionPolicy::OwnersOnly
            && !self.config.is_owner(caller)
        {
            return Err(MultisigError::Unauthorized(caller.to_string()));
        }

        let quorum = self.config.quorum();
        let tx = self
            .transactions
            .get_mut(&id)
            .ok_or(MultisigError::NotFound(id))?;

        if tx.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        if !tx.meets_quorum(quorum) {
            return Err(MultisigError::QuorumNotMet {
                have: tx.confirmation_count(),
                need: quorum,
            });
        }

        if self.balance < tx.value {
            return Err(MultisigError::InsufficientFunds {
                have: self.balance,
                need: tx.value,
            });
        }

        // Checks-effects-interactions: flip the flag and debit the treasury
        // before touching the ledger.
        tx.executed = true;
        let (to, value, data) = (tx.to.clone(), tx.value, tx.data.clone());
        self.balance -= value;

        match ledger.credit(&to, value, &data) {
            Ok(()) => {
                self.events.push(WalletEvent::TransactionExecuted { id });
                log::info!("Transaction {} executed: {} -> {}", id, value, to);
                Ok(())
            }
            Err(source) => {
                // The transfer reverted; restore internal state so the call
                // has no effect.
                self.balance += value;
                if let Some(tx) = self.transactions.get_mut(&id) {
                    tx.executed = false;
                }
                log::warn!(
                    "Transaction {} rolled back: ledger rejected transfer to {} (payload 0x{})",
                    id,
                    to,
                    hex::encode(&data)
                );
                Err(MultisigError::ExternalCallFailed(source))
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Get the confirmation quorum (M)
    pub fn quorum(&self) -> u32 {
        self.config.quorum()
    }

    /// Get the owner list in declaration order
    pub fn owners(&self) -> &[String] {
        self.config.owners()
    }

    /// Get the owner at a given index
    pub fn owner(&self, index: usize) -> Option<&str> {
        self.config.owner(index)
    }

    /// Check if an identity is a member of the owner set
    pub fn is_owner(&self, identity: &str) -> bool {
        self.config.is_owner(identity)
    }

    /// Get the full record for a transaction id
    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.get(&id)
    }

    /// Get the number of transactions ever created
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Get all transactions in id order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// Get the pooled treasury balance
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Get the event log in emission order
    pub fn events(&self) -> &[WalletEvent] {
        &self.events
    }
}
