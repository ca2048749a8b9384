//! Transaction records and confirmation bookkeeping
//!
//! A transaction is created by a proposal, accumulates one confirmation per
//! distinct owner, and is executed exactly once. Records are never deleted;
//! the registry doubles as an audit log.

use crate::multisig::wallet::MultisigError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single confirmation vote from an owner
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Confirmation {
    /// Identity of the confirming owner
    pub owner: String,
    /// When the confirmation was recorded
    pub confirmed_at: DateTime<Utc>,
}

impl Confirmation {
    /// Create a new confirmation stamped with the current time
    pub fn new(owner: String) -> Self {
        Self {
            owner,
            confirmed_at: Utc::now(),
        }
    }
}

/// A proposed transfer out of the treasury
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Monotonic id, assigned at creation, never reused
    pub id: u64,
    /// Identity that proposed the transfer
    pub proposer: String,
    /// Destination identity
    pub to: String,
    /// Transfer amount in native units
    pub value: u128,
    /// Opaque call payload forwarded to the destination (may be empty)
    pub data: Vec<u8>,
    /// True once the transfer has executed; permanent
    pub executed: bool,
    /// Collected confirmations, one per distinct owner, in arrival order
    pub confirmations: Vec<Confirmation>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new unconfirmed, unexecuted transaction
    ///
    /// Proposing does not confirm: the proposer's vote is only counted once
    /// they confirm explicitly.
    pub fn new(id: u64, proposer: String, to: String, value: u128, data: Vec<u8>) -> Self {
        Self {
            id,
            proposer,
            to,
            value,
            data,
            executed: false,
            confirmations: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Record a confirmation from an owner
    ///
    /// The caller is responsible for owner-set membership; this enforces the
    /// per-record rules: no confirmations after execution, at most one
    /// confirmation per owner.
    pub fn record_confirmation(&mut self, owner: &str) -> Result<(), MultisigError> {
        if self.executed {
            return Err(MultisigError::AlreadyExecuted(self.id));
        }

        if self.is_confirmed_by(owner) {
            return Err(MultisigError::AlreadyConfirmed {
                id: self.id,
                owner: owner.to_string(),
            });
        }

        self.confirmations.push(Confirmation::new(owner.to_string()));
        Ok(())
    }

    /// Get the number of confirmations collected
    pub fn confirmation_count(&self) -> usize {
        self.confirmations.len()
    }

    /// Check if a specific owner has confirmed
    pub fn is_confirmed_by(&self, owner: &str) -> bool {
        self.confirmations.iter().any(|c| c.owner == owner)
    }

    /// Get the owners who have confirmed, in arrival order
    pub fn confirmed_by(&self) -> Vec<&str> {
        self.confirmations.iter().map(|c| c.owner.as_str()).collect()
    }

    /// Check if the confirmation count meets a quorum
    pub fn meets_quorum(&self, quorum: u32) -> bool {
        self.confirmations.len() >= quorum as usize
    }

    /// Render the call payload as 0x-prefixed hex
    pub fn data_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }
}
