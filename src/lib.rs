//! Multisig-Treasury: a quorum-governed treasury engine in Rust
//!
//! This crate provides a custodial multi-party approval engine featuring:
//! - A fixed owner set with an M-of-N confirmation quorum
//! - An append-only transaction registry with monotonic ids
//! - Exactly-once execution with checks-effects-interactions ordering
//! - All-or-nothing rollback when the destination rejects a call payload
//! - A pluggable account ledger seam with an in-memory reference implementation
//! - JSON persistence with atomic writes and rotating backups
//!
//! # Example
//!
//! ```rust
//! use multisig_treasury::ledger::{AccountLedger, InMemoryLedger};
//! use multisig_treasury::multisig::{MultisigTreasury, WalletConfig};
//!
//! // Create a 2-of-3 treasury
//! let config = WalletConfig::new(
//!     2,
//!     vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
//! )
//! .unwrap();
//! let mut treasury = MultisigTreasury::new(config);
//!
//! // Fund it from Alice's ledger account
//! let mut ledger = InMemoryLedger::with_balances([("alice", 1_000u128)]);
//! treasury.deposit("alice", 500, &mut ledger).unwrap();
//!
//! // Propose, gather a quorum of confirmations, execute
//! let id = treasury
//!     .create_transaction("alice", "dave", 300, Vec::new())
//!     .unwrap();
//! treasury.confirm_transaction("alice", id).unwrap();
//! treasury.confirm_transaction("bob", id).unwrap();
//! treasury.execute_transaction("alice", id, &mut ledger).unwrap();
//!
//! assert_eq!(ledger.balance_of("dave"), 300);
//! assert_eq!(treasury.balance(), 200);
//! ```

pub mod ledger;
pub mod multisig;
pub mod storage;

// Re-export commonly used types
pub use ledger::{AccountLedger, InMemoryLedger, LedgerError};
pub use multisig::{
    Confirmation, ExecutionPolicy, MultisigError, MultisigTreasury, Transaction, WalletConfig,
    WalletEvent,
};
pub use storage::{Persistence, StorageConfig, StorageError};
