//! Durable state for the treasury
//!
//! The owner set, quorum, transaction registry, id counter, balance, and
//! event log all outlive any single call; this module persists them as JSON
//! with atomic writes and rotating backups.

pub mod persistence;

pub use persistence::{
    load_from_file, save_to_file, Persistence, StorageConfig, StorageError,
};
