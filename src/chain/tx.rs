use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AppError;

const TOKEN_PROGRAM: &str = "spl-token";
const ASSOCIATED_TOKEN_PROGRAM: &str = "spl-associated-token-account";

/// A single program invocation inside a transaction. The instruction data
/// encoding belongs to the target program; this crate only sequences them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub program: String,
    pub accounts: Vec<String>,
    pub data: Vec<u8>,
}

impl Instruction {
    /// Creates the mint account for a new token type.
    pub fn initialize_mint(mint: &str, authority: &str, decimals: u8) -> Self {
        Self {
            program: TOKEN_PROGRAM.to_string(),
            accounts: vec![mint.to_string(), authority.to_string()],
            data: [&b"initialize_mint"[..], &[decimals][..]].concat(),
        }
    }

    /// Creates the associated token account holding `mint` tokens for `owner`.
    pub fn create_associated_account(mint: &str, owner: &str, payer: &str) -> Self {
        let token_account = derive_associated_token_address(mint, owner);
        Self {
            program: ASSOCIATED_TOKEN_PROGRAM.to_string(),
            accounts: vec![
                token_account,
                mint.to_string(),
                owner.to_string(),
                payer.to_string(),
            ],
            data: b"create".to_vec(),
        }
    }

    /// Mints `amount` base units to `token_account`.
    pub fn mint_to(mint: &str, token_account: &str, authority: &str, amount: u64) -> Self {
        Self {
            program: TOKEN_PROGRAM.to_string(),
            accounts: vec![
                mint.to_string(),
                token_account.to_string(),
                authority.to_string(),
            ],
            data: [&b"mint_to"[..], &amount.to_le_bytes()[..]].concat(),
        }
    }
}

/// An unsigned transaction: recent blockhash, fee payer, and an ordered
/// instruction list. Construction order is the caller's responsibility;
/// within one user flow instructions execute strictly sequentially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub recent_blockhash: String,
    pub fee_payer: String,
    pub instructions: Vec<Instruction>,
}

impl Transaction {
    pub fn new(recent_blockhash: impl Into<String>, fee_payer: impl Into<String>) -> Self {
        Self {
            recent_blockhash: recent_blockhash.into(),
            fee_payer: fee_payer.into(),
            instructions: Vec::new(),
        }
    }

    pub fn add(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    /// Canonical byte serialization used for signing and submission.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec(self).map_err(|e| AppError::Signing(e.to_string()))
    }
}

/// A transaction plus the signatures produced by the wallet adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub payload: Transaction,
    /// Hex-encoded signatures, fee payer first.
    pub signatures: Vec<String>,
}

impl SignedTransaction {
    pub fn to_bytes(&self) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec(self).map_err(|e| AppError::Signing(e.to_string()))
    }
}

/// Deterministic associated-token-account derivation: a domain-separated
/// SHA-256 over mint and owner. The real program-derived address lives in
/// the external SDK; only determinism matters to this layer.
pub fn derive_associated_token_address(mint: &str, owner: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"associated-token-account");
    hasher.update(mint.as_bytes());
    hasher.update(owner.as_bytes());
    hex::encode(hasher.finalize())
}

/// Scales a whole-token supply to base units, e.g. 1000 tokens at 9
/// decimals = 10^12 base units.
pub fn supply_to_base_units(supply: u64, decimals: u8) -> Result<u64, AppError> {
    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| AppError::Validation(format!("decimals too large: {}", decimals)))?;
    supply.checked_mul(scale).ok_or_else(|| {
        AppError::Validation(format!(
            "supply {} at {} decimals overflows the amount field",
            supply, decimals
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_associated_address_is_deterministic() {
        let a = derive_associated_token_address("mint-1", "owner-1");
        let b = derive_associated_token_address("mint-1", "owner-1");
        assert_eq!(a, b);

        let c = derive_associated_token_address("mint-1", "owner-2");
        assert_ne!(a, c);
    }

    #[test]
    fn test_supply_scaling() {
        assert_eq!(supply_to_base_units(1000, 9).unwrap(), 1_000_000_000_000);
        assert_eq!(supply_to_base_units(1, 0).unwrap(), 1);
    }

    #[test]
    fn test_supply_scaling_overflow() {
        let result = supply_to_base_units(u64::MAX, 9);
        assert!(matches!(result, Err(crate::error::AppError::Validation(_))));
    }

    #[test]
    fn test_transaction_round_trip() {
        let tx = Transaction::new("hash-1", "payer-1")
            .add(Instruction::initialize_mint("mint-1", "payer-1", 9));
        let bytes = tx.to_bytes().unwrap();
        let parsed: Transaction = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, tx);
    }
}
