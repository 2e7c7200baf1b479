use serde::{Deserialize, Serialize};

use crate::gate::GateState;
use crate::nav::{Fade, NavLink};
use crate::pages::wallet_creator::PhraseWord;
use crate::pages::TxEntry;
use crate::storage::SimulatedAccount;

fn default_decimals() -> u8 {
    9
}

fn default_supply() -> u64 {
    1000
}

#[derive(Debug, Deserialize)]
pub struct CreateTokenRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default = "default_supply")]
    pub supply: u64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct MintTokensRequest {
    pub recipient: String,
    #[serde(default = "default_supply")]
    pub supply: u64,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

/// User-visible outcome of a token page action. Errors never escape as
/// HTTP failures here; they become the status string.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub status: String,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub routes: Vec<NavLink>,
    pub connected: Option<String>,
    pub signing_mode: &'static str,
    pub pinning_configured: bool,
    pub transition: Option<Fade>,
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub address: Option<String>,
    pub balance_lamports: Option<u64>,
    pub history: Vec<TxEntry>,
}

#[derive(Debug, Serialize)]
pub struct WebWalletView {
    pub has_wallet: bool,
    pub reveal_state: GateState,
    pub overwrite_pending: bool,
    pub words: Vec<PhraseWord>,
    pub accounts: Vec<SimulatedAccount>,
}

#[derive(Debug, Serialize)]
pub struct CreateWalletResponse {
    pub status: String,
    pub confirmation_required: bool,
}

#[derive(Debug, Serialize)]
pub struct AccountCreatedResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<SimulatedAccount>,
}

#[derive(Debug, Serialize)]
pub struct RevealResponse {
    pub state: GateState,
    pub words: Vec<PhraseWord>,
}
