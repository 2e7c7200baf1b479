//! External capability boundary
//!
//! The application never talks to the network or touches key material
//! directly. Everything goes through two object-safe traits:
//!
//! - [`SigningWallet`] - a connected public identity plus a signing capability
//! - [`ChainClient`] - balance, blockhash, submission and confirmation
//!
//! Both have thin production implementations here ([`KeypairWallet`],
//! [`RpcChainClient`]) and substitutable fakes in tests.

mod keypair;
mod rpc;
mod tx;

pub use keypair::{generate_address, KeypairWallet};
pub use rpc::RpcChainClient;
pub use tx::{
    derive_associated_token_address, supply_to_base_units, Instruction, SignedTransaction,
    Transaction,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Public address of a connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity(pub String);

impl Identity {
    pub fn address(&self) -> &str {
        &self.0
    }

    /// Shortened form for status messages, e.g. "a1b2...f9e8".
    pub fn short(&self) -> String {
        if self.0.len() <= 8 {
            return self.0.clone();
        }
        format!("{}...{}", &self.0[..4], &self.0[self.0.len() - 4..])
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wallet adapter boundary: a nullable public identity and a signing
/// capability. Connecting creates the identity, disconnecting clears it.
#[async_trait]
pub trait SigningWallet: Send + Sync {
    /// Currently connected identity, if any.
    fn identity(&self) -> Option<Identity>;

    async fn connect(&self) -> Result<Identity, AppError>;

    fn disconnect(&self);

    async fn sign_transaction(&self, tx: Transaction) -> Result<SignedTransaction, AppError>;
}

/// RPC boundary: a single test-network endpoint, treated as opaque.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Account balance in lamports.
    async fn get_balance(&self, identity: &Identity) -> Result<u64, AppError>;

    async fn latest_blockhash(&self) -> Result<String, AppError>;

    /// Submits a signed transaction, returning its id.
    async fn send_transaction(&self, tx: &SignedTransaction) -> Result<String, AppError>;

    /// Polls the endpoint once for confirmation status.
    async fn confirm_transaction(&self, txid: &str) -> Result<bool, AppError>;
}
