use bip39::Mnemonic;
use rand::RngCore;
use serde::Serialize;

use crate::error::AppError;
use crate::gate::{ConfirmGate, GateState};
use crate::storage::{SimulatedAccount, Storage};

/// Result of a `create_wallet` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CreateWalletOutcome {
    /// A fresh recovery phrase was generated and persisted.
    Created { word_count: usize },
    /// A phrase already exists; overwriting it needs explicit confirmation.
    ConfirmationRequired,
}

/// One recovery-phrase word as rendered: blurred unless the reveal gate is
/// in the Revealed state.
#[derive(Debug, Clone, Serialize)]
pub struct PhraseWord {
    pub word: String,
    pub blurred: bool,
}

/// The web-wallet page: a locally generated recovery phrase plus simulated
/// accounts, persisted to local storage. No network interaction.
pub struct WalletCreatorPage {
    storage: Storage,
    mnemonic: Option<Mnemonic>,
    accounts: Vec<SimulatedAccount>,
    reveal: ConfirmGate,
    overwrite: ConfirmGate,
}

impl WalletCreatorPage {
    /// Loads persisted state, the equivalent of the page mounting.
    /// Gate states are session-only and always start Hidden.
    pub fn load(storage: Storage) -> Result<Self, AppError> {
        let mnemonic = storage.load_mnemonic()?;
        let accounts = storage.load_accounts()?;
        Ok(Self {
            storage,
            mnemonic,
            accounts,
            reveal: ConfirmGate::new(),
            overwrite: ConfirmGate::new(),
        })
    }

    pub fn has_wallet(&self) -> bool {
        self.mnemonic.is_some()
    }

    pub fn accounts(&self) -> &[SimulatedAccount] {
        &self.accounts
    }

    pub fn reveal_state(&self) -> GateState {
        self.reveal.state()
    }

    pub fn overwrite_pending(&self) -> bool {
        self.overwrite.is_pending()
    }

    /// Generates a new recovery phrase. If a phrase already exists this arms
    /// the overwrite gate instead of silently destroying it; the overwrite
    /// only happens through [`Self::confirm_create_wallet`].
    pub fn create_wallet(&mut self) -> Result<CreateWalletOutcome, AppError> {
        if self.mnemonic.is_some() {
            self.overwrite.request();
            log::warn!("Wallet already exists; awaiting explicit overwrite confirmation");
            return Ok(CreateWalletOutcome::ConfirmationRequired);
        }
        self.generate_wallet()
    }

    /// Confirms a pending destructive overwrite.
    pub fn confirm_create_wallet(&mut self) -> Result<CreateWalletOutcome, AppError> {
        if !self.overwrite.is_pending() {
            return Err(AppError::Validation(
                "no wallet overwrite is awaiting confirmation".to_string(),
            ));
        }
        self.overwrite.reset();
        self.generate_wallet()
    }

    /// Dismisses a pending overwrite prompt, keeping the old phrase.
    pub fn cancel_create_wallet(&mut self) {
        self.overwrite.cancel();
    }

    fn generate_wallet(&mut self) -> Result<CreateWalletOutcome, AppError> {
        // 16 bytes of entropy yields the 12-word phrase the page shows.
        let mut entropy = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut entropy);
        let mnemonic = Mnemonic::from_entropy(&entropy)
            .map_err(|e| AppError::Internal(format!("mnemonic generation failed: {}", e)))?;

        self.storage.save_mnemonic(&mnemonic)?;
        self.storage.clear_accounts()?;
        self.accounts.clear();
        self.reveal.reset();

        let word_count = mnemonic.word_count();
        self.mnemonic = Some(mnemonic);
        log::info!(
            "New recovery phrase generated ({} words); account list reset",
            word_count
        );

        Ok(CreateWalletOutcome::Created { word_count })
    }

    /// Appends a simulated account with a pseudo-random balance. Ids are
    /// strictly increasing from 1. No real balance query occurs.
    pub fn create_account(&mut self) -> Result<SimulatedAccount, AppError> {
        if self.mnemonic.is_none() {
            return Err(AppError::Validation(
                "create a wallet before adding accounts".to_string(),
            ));
        }

        let id = self.accounts.len() as u32 + 1;
        let balance = (rand::thread_rng().next_u32() % 10_000) as f64 / 100.0;
        let account = SimulatedAccount::new(id, balance);

        self.accounts.push(account.clone());
        self.storage.save_accounts(&self.accounts)?;

        Ok(account)
    }

    /// First step of the reveal gate: opens the confirmation prompt, or
    /// hides an already revealed phrase (toggle).
    pub fn reveal_phrase(&mut self) -> Result<GateState, AppError> {
        if self.mnemonic.is_none() {
            return Err(AppError::Validation("no wallet to reveal".to_string()));
        }
        Ok(self.reveal.request())
    }

    /// Second step: the phrase is rendered unblurred only after this.
    pub fn confirm_reveal(&mut self) -> Result<GateState, AppError> {
        if self.mnemonic.is_none() {
            return Err(AppError::Validation("no wallet to reveal".to_string()));
        }
        Ok(self.reveal.confirm())
    }

    pub fn cancel_reveal(&mut self) -> GateState {
        self.reveal.cancel()
    }

    /// The phrase as rendered: every word blurred unless revealed.
    pub fn phrase_words(&self) -> Vec<PhraseWord> {
        let Some(mnemonic) = &self.mnemonic else {
            return Vec::new();
        };
        let blurred = !self.reveal.is_revealed();
        mnemonic
            .to_string()
            .split_whitespace()
            .map(|word| PhraseWord {
                word: word.to_string(),
                blurred,
            })
            .collect()
    }
}
