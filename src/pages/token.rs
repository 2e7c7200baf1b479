use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chain::{
    derive_associated_token_address, generate_address, supply_to_base_units, ChainClient,
    Identity, Instruction, SigningWallet, Transaction, LAMPORTS_PER_SOL,
};
use crate::error::AppError;
use crate::guard::{ActionGuard, ActionKind, ActionState};

/// Minimum balance required before attempting token creation (0.05 SOL).
pub const MIN_CREATE_BALANCE_LAMPORTS: u64 = LAMPORTS_PER_SOL / 20;

/// Token form contents, consumed at submit and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDetails {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub supply: u64,
    pub description: String,
}

impl Default for TokenDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            decimals: 9,
            supply: 1000,
            description: String::new(),
        }
    }
}

/// Address of a newly created token type. Exists only after a successful
/// creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintRecord {
    pub mint_address: String,
}

/// Outcome of a successful mint action.
#[derive(Debug, Clone, Serialize)]
pub struct MintOutcome {
    pub txid: String,
    pub token_account: String,
    pub amount: u64,
}

/// One submitted transaction, kept in session history for the
/// transactions page.
#[derive(Debug, Clone, Serialize)]
pub struct TxEntry {
    pub kind: &'static str,
    pub txid: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot of the token page for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPageView {
    pub status: String,
    pub connected: Option<String>,
    pub mint_address: Option<String>,
    pub create_state: ActionState,
    pub mint_state: ActionState,
}

/// Orchestrates the create-token and mint-token user flows.
///
/// Every external call is attempted exactly once per user action; failures
/// are terminal for that action and require the user to re-trigger. Steps
/// within one flow run strictly sequentially: blockhash before construction,
/// sign before send, send before confirm.
pub struct TokenPage {
    wallet: Arc<dyn SigningWallet>,
    chain: Arc<dyn ChainClient>,
    guard: ActionGuard,
    status: Mutex<String>,
    mint: Mutex<Option<MintRecord>>,
    history: Mutex<Vec<TxEntry>>,
}

impl TokenPage {
    pub fn new(wallet: Arc<dyn SigningWallet>, chain: Arc<dyn ChainClient>) -> Self {
        Self {
            wallet,
            chain,
            guard: ActionGuard::new(),
            status: Mutex::new(String::new()),
            mint: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn status(&self) -> String {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_status(&self, status: impl Into<String>) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status.into();
    }

    pub fn identity(&self) -> Option<Identity> {
        self.wallet.identity()
    }

    pub fn mint_record(&self) -> Option<MintRecord> {
        self.mint
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn history(&self) -> Vec<TxEntry> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn view(&self) -> TokenPageView {
        TokenPageView {
            status: self.status(),
            connected: self.identity().map(|i| i.0),
            mint_address: self.mint_record().map(|r| r.mint_address),
            create_state: self.guard.state(ActionKind::CreateToken),
            mint_state: self.guard.state(ActionKind::MintTokens),
        }
    }

    /// Balance of the connected identity, if any. Used by the transactions
    /// page; a failed query is reported, not retried.
    pub async fn balance(&self) -> Result<Option<u64>, AppError> {
        match self.wallet.identity() {
            Some(identity) => Ok(Some(self.chain.get_balance(&identity).await?)),
            None => Ok(None),
        }
    }

    pub async fn connect_wallet(&self) -> Result<Identity, AppError> {
        let slot = self.guard.begin(ActionKind::Connect)?;
        let result = self.wallet.connect().await;
        slot.complete(result.is_ok());
        match &result {
            Ok(identity) => self.set_status(format!("✅ Connected: {}", identity.short())),
            Err(e) => {
                log::error!("Wallet connect failed: {}", e);
                self.set_status(format!("❌ {}", e));
            }
        }
        result
    }

    pub fn disconnect_wallet(&self) {
        self.wallet.disconnect();
        self.set_status("Wallet disconnected.");
    }

    /// Creates a new token type. Requires a connected identity and a balance
    /// above the creation threshold; on any external failure no MintRecord
    /// is produced.
    pub async fn create_token(&self, details: &TokenDetails) -> Result<MintRecord, AppError> {
        let slot = self.guard.begin(ActionKind::CreateToken)?;
        self.set_status("⏳ Creating token on the test network...");

        let result = self.create_token_inner(details).await;
        slot.complete(result.is_ok());

        match &result {
            Ok(record) => self.set_status(format!(
                "✅ Token created successfully! Mint address: {}",
                record.mint_address
            )),
            Err(e) => {
                log::error!("Token creation failed: {}", e);
                self.set_status(format!("❌ {}", e));
            }
        }
        result
    }

    async fn create_token_inner(&self, details: &TokenDetails) -> Result<MintRecord, AppError> {
        let identity = self.wallet.identity().ok_or(AppError::NotConnected)?;

        let balance = self
            .chain
            .get_balance(&identity)
            .await
            .map_err(|e| AppError::CreationFailed(e.to_string()))?;
        if balance < MIN_CREATE_BALANCE_LAMPORTS {
            return Err(AppError::InsufficientBalance {
                available: balance,
                required: MIN_CREATE_BALANCE_LAMPORTS,
            });
        }

        let mint_address = generate_address();
        log::info!(
            "Creating token {} ({}) with mint address {}",
            details.name,
            details.symbol,
            mint_address
        );

        let blockhash = self
            .chain
            .latest_blockhash()
            .await
            .map_err(|e| AppError::CreationFailed(e.to_string()))?;

        // The creator receives one whole token, matching the associated
        // account created alongside the mint.
        let token_account = derive_associated_token_address(&mint_address, identity.address());
        let initial_amount = supply_to_base_units(1, details.decimals)?;

        let tx = Transaction::new(blockhash, identity.address())
            .add(Instruction::initialize_mint(
                &mint_address,
                identity.address(),
                details.decimals,
            ))
            .add(Instruction::create_associated_account(
                &mint_address,
                identity.address(),
                identity.address(),
            ))
            .add(Instruction::mint_to(
                &mint_address,
                &token_account,
                identity.address(),
                initial_amount,
            ));

        let signed = self
            .wallet
            .sign_transaction(tx)
            .await
            .map_err(|e| AppError::CreationFailed(e.to_string()))?;
        let txid = self
            .chain
            .send_transaction(&signed)
            .await
            .map_err(|e| AppError::CreationFailed(e.to_string()))?;
        let confirmed = self
            .chain
            .confirm_transaction(&txid)
            .await
            .map_err(|e| AppError::CreationFailed(e.to_string()))?;
        if !confirmed {
            return Err(AppError::CreationFailed(format!(
                "transaction {} was not confirmed",
                txid
            )));
        }

        let record = MintRecord { mint_address };
        *self.mint.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
        self.push_history(TxEntry {
            kind: "create-token",
            txid,
            detail: format!("mint {} ({})", record.mint_address, details.symbol),
            timestamp: Utc::now(),
        });

        Ok(record)
    }

    /// Mints tokens to a recipient. Requires a non-empty recipient address
    /// and an existing MintRecord, in that order of validation.
    pub async fn mint_tokens(
        &self,
        recipient: &str,
        supply: u64,
        decimals: u8,
    ) -> Result<MintOutcome, AppError> {
        let slot = self.guard.begin(ActionKind::MintTokens)?;
        self.set_status("⏳ Minting tokens...");

        let result = self.mint_tokens_inner(recipient, supply, decimals).await;
        slot.complete(result.is_ok());

        match &result {
            Ok(outcome) => self.set_status(format!(
                "✅ Tokens minted successfully to {}! ({} base units)",
                recipient, outcome.amount
            )),
            Err(e) => {
                log::error!("Minting failed: {}", e);
                self.set_status(format!("❌ {}", e));
            }
        }
        result
    }

    async fn mint_tokens_inner(
        &self,
        recipient: &str,
        supply: u64,
        decimals: u8,
    ) -> Result<MintOutcome, AppError> {
        if recipient.trim().is_empty() {
            return Err(AppError::Validation(
                "recipient wallet address is required".to_string(),
            ));
        }
        let record = self.mint_record().ok_or_else(|| {
            AppError::Validation("create a token before minting".to_string())
        })?;
        let identity = self.wallet.identity().ok_or(AppError::NotConnected)?;

        let amount = supply_to_base_units(supply, decimals)?;
        let token_account = derive_associated_token_address(&record.mint_address, recipient);

        let blockhash = self
            .chain
            .latest_blockhash()
            .await
            .map_err(|e| AppError::MintFailed(e.to_string()))?;

        let tx = Transaction::new(blockhash, identity.address())
            .add(Instruction::create_associated_account(
                &record.mint_address,
                recipient,
                identity.address(),
            ))
            .add(Instruction::mint_to(
                &record.mint_address,
                &token_account,
                identity.address(),
                amount,
            ));

        let signed = self
            .wallet
            .sign_transaction(tx)
            .await
            .map_err(|e| AppError::MintFailed(e.to_string()))?;
        let txid = self
            .chain
            .send_transaction(&signed)
            .await
            .map_err(|e| AppError::MintFailed(e.to_string()))?;
        let confirmed = self
            .chain
            .confirm_transaction(&txid)
            .await
            .map_err(|e| AppError::MintFailed(e.to_string()))?;
        if !confirmed {
            return Err(AppError::MintFailed(format!(
                "transaction {} was not confirmed",
                txid
            )));
        }

        self.push_history(TxEntry {
            kind: "mint-tokens",
            txid: txid.clone(),
            detail: format!("{} base units to {}", amount, recipient),
            timestamp: Utc::now(),
        });

        Ok(MintOutcome {
            txid,
            token_account,
            amount,
        })
    }

    fn push_history(&self, entry: TxEntry) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}
