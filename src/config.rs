/// Application configuration from environment variables
///
/// Controls the RPC endpoint, the signing mode, and the optional pinning
/// service credentials.
use std::env;
use std::sync::Arc;

use crate::chain::{KeypairWallet, SigningWallet};
use crate::error::AppError;

const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Who pays and signs: the user's own wallet, or a server-custodied fee
/// payer key. Exactly one mode is active, selected explicitly by
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigningMode {
    UserWallet,
    FeePayer { secret_hex: String },
}

impl SigningMode {
    pub fn label(&self) -> &'static str {
        match self {
            SigningMode::UserWallet => "user",
            SigningMode::FeePayer { .. } => "fee-payer",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinningCredentials {
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Test-network JSON-RPC endpoint URL
    pub rpc_url: String,
    pub signing_mode: SigningMode,
    /// Optional pinning-service credentials, always configured as a pair
    pub pinning: Option<PinningCredentials>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `RPC_URL`: JSON-RPC endpoint (defaults to the devnet endpoint)
    /// - `SIGNING_MODE`: "user" (default) or "fee-payer"
    /// - `FEE_PAYER_KEY`: hex secp256k1 secret, required for fee-payer mode
    /// - `PINNING_API_KEY` / `PINNING_API_SECRET`: optional pair
    pub fn from_env() -> Result<Self, AppError> {
        let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| {
            log::info!("RPC_URL not set, using {}", DEFAULT_RPC_URL);
            DEFAULT_RPC_URL.to_string()
        });

        let mode = env::var("SIGNING_MODE").ok();
        let fee_payer_key = env::var("FEE_PAYER_KEY").ok().filter(|k| !k.is_empty());
        let signing_mode = resolve_signing_mode(mode.as_deref(), fee_payer_key)?;
        log::info!("Signing mode: {}", signing_mode.label());

        let pinning = resolve_pinning(
            env::var("PINNING_API_KEY").ok().filter(|k| !k.is_empty()),
            env::var("PINNING_API_SECRET").ok().filter(|k| !k.is_empty()),
        )?;
        if pinning.is_some() {
            log::info!("Pinning service credentials configured");
        }

        Ok(Self {
            rpc_url,
            signing_mode,
            pinning,
        })
    }

    /// Builds the wallet adapter for the configured signing mode.
    pub fn build_wallet(&self) -> Result<Arc<dyn SigningWallet>, AppError> {
        let wallet = match &self.signing_mode {
            SigningMode::UserWallet => KeypairWallet::generate(),
            SigningMode::FeePayer { secret_hex } => KeypairWallet::from_secret_hex(secret_hex)?,
        };
        Ok(Arc::new(wallet))
    }
}

fn resolve_signing_mode(
    mode: Option<&str>,
    fee_payer_key: Option<String>,
) -> Result<SigningMode, AppError> {
    match mode.map(str::to_lowercase).as_deref() {
        Some("fee-payer") | Some("fee_payer") => {
            let secret_hex = fee_payer_key.ok_or_else(|| {
                AppError::Config("SIGNING_MODE=fee-payer requires FEE_PAYER_KEY".to_string())
            })?;
            Ok(SigningMode::FeePayer { secret_hex })
        }
        Some("user") | None => {
            if fee_payer_key.is_some() {
                log::warn!("FEE_PAYER_KEY is set but SIGNING_MODE is 'user'; the key is ignored");
            }
            Ok(SigningMode::UserWallet)
        }
        Some(other) => Err(AppError::Config(format!(
            "unknown SIGNING_MODE '{}' (expected 'user' or 'fee-payer')",
            other
        ))),
    }
}

fn resolve_pinning(
    api_key: Option<String>,
    api_secret: Option<String>,
) -> Result<Option<PinningCredentials>, AppError> {
    match (api_key, api_secret) {
        (Some(api_key), Some(api_secret)) => Ok(Some(PinningCredentials {
            api_key,
            api_secret,
        })),
        (None, None) => Ok(None),
        _ => Err(AppError::Config(
            "PINNING_API_KEY and PINNING_API_SECRET must be set together".to_string(),
        )),
    }
}
