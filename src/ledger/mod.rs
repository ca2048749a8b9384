//! Account ledger seam
//!
//! The treasury core does not hold per-identity balances itself; it calls
//! into an external ledger capability to credit and debit accounts and to
//! deliver call payloads. This module defines that seam and ships an
//! in-memory reference implementation.

pub mod account;

pub use account::{AccountLedger, InMemoryLedger, LedgerError};
