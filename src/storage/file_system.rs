use std::fs;
use std::path::PathBuf;

use bip39::Mnemonic;

use super::models::SimulatedAccount;
use crate::error::StorageError;

const MNEMONIC_FILE: &str = "mnemonic.txt";
const ACCOUNTS_FILE: &str = "accounts.json";

#[derive(Clone)]
pub struct Storage {
    base_path: PathBuf,
}

impl Storage {
    /// Create a new storage instance with the default base directory ("./web-wallet")
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::from("./web-wallet"),
        }
    }

    /// Create storage with custom base directory (for testing)
    pub fn new_with_base_dir(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_path
    }

    /// Save the recovery phrase, replacing any previous one
    pub fn save_mnemonic(&self, mnemonic: &Mnemonic) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.base_path.join(MNEMONIC_FILE), mnemonic.to_string())?;
        Ok(())
    }

    /// Load the recovery phrase, or None if no wallet was ever created
    pub fn load_mnemonic(&self) -> Result<Option<Mnemonic>, StorageError> {
        let path = self.base_path.join(MNEMONIC_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        let mnemonic = Mnemonic::parse(contents.trim())
            .map_err(|e| StorageError::InvalidMnemonic(e.to_string()))?;
        Ok(Some(mnemonic))
    }

    /// Save the simulated account list, overwriting it wholesale
    pub fn save_accounts(&self, accounts: &[SimulatedAccount]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        let json = serde_json::to_string_pretty(accounts)?;
        fs::write(self.base_path.join(ACCOUNTS_FILE), json)?;
        Ok(())
    }

    /// Load the simulated account list, empty if never saved
    pub fn load_accounts(&self) -> Result<Vec<SimulatedAccount>, StorageError> {
        let path = self.base_path.join(ACCOUNTS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)?;
        let accounts = serde_json::from_str(&contents)?;
        Ok(accounts)
    }

    /// Remove the persisted account list (used when a new wallet replaces
    /// the old one)
    pub fn clear_accounts(&self) -> Result<(), StorageError> {
        let path = self.base_path.join(ACCOUNTS_FILE);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
