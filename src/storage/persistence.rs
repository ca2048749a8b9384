//! Treasury persistence layer
//!
//! Provides save/load functionality for the full treasury state.

use crate::multisig::MultisigTreasury;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: std::path::PathBuf,
    pub wallet_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".treasury_data"),
            wallet_file: "treasury.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Treasury storage manager
pub struct Persistence {
    config: StorageConfig,
}

impl Persistence {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the treasury file path
    fn wallet_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.wallet_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> std::path::PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.wallet_file, index))
    }

    /// Save the treasury to disk
    pub fn save(&self, treasury: &MultisigTreasury) -> Result<(), StorageError> {
        let path = self.wallet_path();

        // Create backup if enabled
        if self.config.backup_enabled && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("treasury.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, treasury)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the treasury from disk
    pub fn load(&self) -> Result<MultisigTreasury, StorageError> {
        let path = self.wallet_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Treasury file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let treasury: MultisigTreasury = serde_json::from_reader(reader)?;

        Ok(treasury)
    }

    /// Check if a saved treasury exists
    pub fn exists(&self) -> bool {
        self.wallet_path().exists()
    }

    /// Delete the saved treasury
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.wallet_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                let next = self.backup_path(i + 1);
                fs::rename(&current, &next)?;
            }
        }

        Ok(())
    }

    /// Restore from a backup
    pub fn restore_backup(&self, backup_index: usize) -> Result<MultisigTreasury, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        let file = fs::File::open(&backup_path)?;
        let reader = BufReader::new(file);

        let treasury: MultisigTreasury = serde_json::from_reader(reader)?;

        Ok(treasury)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        let mut backups = Vec::new();

        for i in 0..self.config.max_backups {
            if self.backup_path(i).exists() {
                backups.push(i);
            }
        }

        backups
    }
}

/// Save a treasury to a specific file path
pub fn save_to_file(treasury: &MultisigTreasury, path: &Path) -> Result<(), StorageError> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, treasury)?;
    Ok(())
}

/// Load a treasury from a specific file path
pub fn load_from_file(path: &Path) -> Result<MultisigTreasury, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let treasury: MultisigTreasury = serde_json::from_reader(reader)?;
    Ok(treasury)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{AccountLedger, InMemoryLedger};
    use crate::multisig::WalletConfig;

    fn sample_treasury() -> (MultisigTreasury, InMemoryLedger) {
        let config = WalletConfig::new(
            2,
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
        )
        .unwrap();
        let mut treasury = MultisigTreasury::new(config);
        let mut ledger = InMemoryLedger::with_balances([("alice", 1_000u128)]);

        treasury.deposit("alice", 600, &mut ledger).unwrap();
        treasury
            .create_transaction("alice", "dave", 400, vec![0x01])
            .unwrap();
        treasury.confirm_transaction("alice", 1).unwrap();
        treasury.confirm_transaction("bob", 1).unwrap();

        (treasury, ledger)
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Persistence::new(config).unwrap();
        let (treasury, _) = sample_treasury();

        // Save
        storage.save(&treasury).unwrap();
        assert!(storage.exists());

        // Load
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.quorum(), treasury.quorum());
        assert_eq!(loaded.owners(), treasury.owners());
        assert_eq!(loaded.balance(), treasury.balance());
        assert_eq!(loaded.transaction_count(), 1);
        assert_eq!(loaded.transaction(1), treasury.transaction(1));
        assert_eq!(loaded.events(), treasury.events());
    }

    #[test]
    fn test_loaded_state_continues_the_lifecycle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Persistence::new(config).unwrap();
        let (treasury, mut ledger) = sample_treasury();
        storage.save(&treasury).unwrap();

        // Ids and quorum state survive the reload
        let mut loaded = storage.load().unwrap();
        loaded.execute_transaction("alice", 1, &mut ledger).unwrap();
        assert_eq!(ledger.balance_of("dave"), 400);

        let id = loaded
            .create_transaction("bob", "dave", 100, Vec::new())
            .unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_backup_rotation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            max_backups: 3,
            ..Default::default()
        };

        let storage = Persistence::new(config).unwrap();
        let (mut treasury, mut ledger) = sample_treasury();

        // Save multiple times
        for _ in 0..5 {
            storage.save(&treasury).unwrap();
            treasury.deposit("alice", 10, &mut ledger).unwrap();
        }

        // Should have 3 backups (max)
        let backups = storage.list_backups();
        assert!(backups.len() <= 3);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Persistence::new(config).unwrap();
        assert!(!storage.exists());
        assert!(matches!(
            storage.load(),
            Err(StorageError::InvalidData(_))
        ));
    }
}
