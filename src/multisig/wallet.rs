//! Wallet configuration and error taxonomy
//!
//! Defines the fixed owner set, the confirmation quorum, and the execution
//! authorization policy for a treasury.

use crate::ledger::LedgerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to treasury operations
#[derive(Error, Debug)]
pub enum MultisigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Not an owner: {0}")]
    Unauthorized(String),
    #[error("Transaction not found: {0}")]
    NotFound(u64),
    #[error("Transaction {0} already executed")]
    AlreadyExecuted(u64),
    #[error("Transaction {id} already confirmed by {owner}")]
    AlreadyConfirmed { id: u64, owner: String },
    #[error("Quorum not met: have {have}, need {need}")]
    QuorumNotMet { have: usize, need: u32 },
    #[error("Insufficient funds: have {have}, need {need}")]
    InsufficientFunds { have: u128, need: u128 },
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
    #[error("External call failed: {0}")]
    ExternalCallFailed(#[from] LedgerError),
}

/// Who may trigger execution once quorum is met
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExecutionPolicy {
    /// Only members of the owner set may execute (default)
    #[default]
    OwnersOnly,
    /// Any account may execute; quorum gating still applies
    Anyone,
}

/// Configuration for a quorum-governed treasury
///
/// The owner set and quorum are fixed at construction and never change for
/// the life of the treasury.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WalletConfig {
    /// Minimum distinct confirmations required (M in M-of-N)
    quorum: u32,
    /// Identities authorized to propose and confirm (N), in declaration order
    owners: Vec<String>,
    /// Execution authorization policy
    #[serde(default)]
    execution_policy: ExecutionPolicy,
}

impl WalletConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `quorum` - Minimum confirmations required (M)
    /// * `owners` - Authorized owner identities (N)
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the owner list is empty or contains
    /// duplicates, or if the quorum is outside `1..=owners.len()`.
    pub fn new(quorum: u32, owners: Vec<String>) -> Result<Self, MultisigError> {
        if owners.is_empty() {
            return Err(MultisigError::InvalidConfiguration(
                "owner list must not be empty".to_string(),
            ));
        }

        if quorum == 0 {
            return Err(MultisigError::InvalidConfiguration(
                "quorum must be at least 1".to_string(),
            ));
        }

        if quorum as usize > owners.len() {
            return Err(MultisigError::InvalidConfiguration(format!(
                "quorum {} exceeds owner count {}",
                quorum,
                owners.len()
            )));
        }

        // Check for duplicates
        let mut sorted_owners = owners.clone();
        sorted_owners.sort();
        for i in 1..sorted_owners.len() {
            if sorted_owners[i] == sorted_owners[i - 1] {
                return Err(MultisigError::InvalidConfiguration(format!(
                    "duplicate owner: {}",
                    sorted_owners[i]
                )));
            }
        }

        Ok(Self {
            quorum,
            owners,
            execution_policy: ExecutionPolicy::default(),
        })
    }

    /// Set the execution authorization policy
    pub fn with_execution_policy(mut self, policy: ExecutionPolicy) -> Self {
        self.execution_policy = policy;
        self
    }

    /// Get the quorum (M)
    pub fn quorum(&self) -> u32 {
        self.quorum
    }

    /// Get the owner list in declaration order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Get the owner at a given index
    pub fn owner(&self, index: usize) -> Option<&str> {
        self.owners.get(index).map(String::as_str)
    }

    /// Get the total owner count (N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Check if an identity is a member of the owner set
    pub fn is_owner(&self, identity: &str) -> bool {
        self.owners.iter().any(|o| o == identity)
    }

    /// Get the execution authorization policy
    pub fn execution_policy(&self) -> ExecutionPolicy {
        self.execution_policy
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.quorum, self.owners.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_owners() -> Vec<String> {
        vec![
            "alice".to_string(),
            "bob".to_string(),
            "carol".to_string(),
        ]
    }

    #[test]
    fn test_config_creation() {
        let config = WalletConfig::new(2, sample_owners()).unwrap();

        assert_eq!(config.quorum(), 2);
        assert_eq!(config.owner_count(), 3);
        assert_eq!(config.description(), "2-of-3");
        assert_eq!(config.execution_policy(), ExecutionPolicy::OwnersOnly);
    }

    #[test]
    fn test_config_validation() {
        // Empty owner list
        assert!(matches!(
            WalletConfig::new(1, vec![]),
            Err(MultisigError::InvalidConfiguration(_))
        ));

        // Zero quorum
        assert!(matches!(
            WalletConfig::new(0, sample_owners()),
            Err(MultisigError::InvalidConfiguration(_))
        ));

        // Quorum > owners
        assert!(matches!(
            WalletConfig::new(4, sample_owners()),
            Err(MultisigError::InvalidConfiguration(_))
        ));

        // Duplicate owners
        assert!(matches!(
            WalletConfig::new(2, vec!["same".to_string(), "same".to_string()]),
            Err(MultisigError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_single_owner_quorum_of_one() {
        let config = WalletConfig::new(1, vec!["solo".to_string()]).unwrap();
        assert_eq!(config.description(), "1-of-1");
    }

    #[test]
    fn test_owner_queries() {
        let owners = sample_owners();
        let config = WalletConfig::new(2, owners.clone()).unwrap();

        for (i, owner) in owners.iter().enumerate() {
            assert_eq!(config.owner(i), Some(owner.as_str()));
            assert!(config.is_owner(owner));
        }
        assert_eq!(config.owner(3), None);
        assert!(!config.is_owner("mallory"));
    }

    #[test]
    fn test_execution_policy_override() {
        let config = WalletConfig::new(2, sample_owners())
            .unwrap()
            .with_execution_policy(ExecutionPolicy::Anyone);
        assert_eq!(config.execution_policy(), ExecutionPolicy::Anyone);
    }
}
