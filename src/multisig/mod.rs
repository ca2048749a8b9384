//! Quorum-governed treasury core
//!
//! Provides the multi-party approval engine: a fixed owner set where a
//! quorum of M distinct confirmations from N owners is required before a
//! proposed transfer may execute.
//!
//! # Example
//!
//! ```ignore
//! use multisig_treasury::multisig::{MultisigTreasury, WalletConfig};
//!
//! // Create a 2-of-3 treasury
//! let config = WalletConfig::new(2, vec![alice, bob, carol])?;
//! let mut treasury = MultisigTreasury::new(config);
//!
//! // Propose a transfer
//! let id = treasury.create_transaction(&alice, &recipient, amount, data)?;
//!
//! // Collect confirmations
//! treasury.confirm_transaction(&alice, id)?;
//! treasury.confirm_transaction(&bob, id)?;
//!
//! // Quorum met; execute against the account ledger
//! treasury.execute_transaction(&alice, id, &mut ledger)?;
//! ```

pub mod events;
pub mod transaction;
pub mod treasury;
pub mod wallet;

pub use events::WalletEvent;
pub use transaction::{Confirmation, Transaction};
pub use treasury::MultisigTreasury;
pub use wallet::{ExecutionPolicy, MultisigError, WalletConfig};
