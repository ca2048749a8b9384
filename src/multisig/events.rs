//! Observable treasury events
//!
//! Every state transition appends an event to the treasury's log, carrying
//! the same arguments an external observer would need to mirror the state.

use serde::{Deserialize, Serialize};

/// An entry in the treasury's append-only event log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WalletEvent {
    /// The treasury received funds
    FundsDeposited { from: String, amount: u128 },
    /// A transfer was proposed
    TransactionCreated {
        id: u64,
        proposer: String,
        to: String,
        value: u128,
        data: Vec<u8>,
    },
    /// An owner confirmed a proposed transfer
    TransactionConfirmed { id: u64, confirmer: String },
    /// A transfer executed and funds left the treasury
    TransactionExecuted { id: u64 },
}
