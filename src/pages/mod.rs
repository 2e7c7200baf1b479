//! Page components
//!
//! - `token` - token creation and minting flows
//! - `wallet_creator` - local web wallet with recovery phrase and
//!   simulated accounts

pub mod token;
pub mod wallet_creator;

pub use token::{MintOutcome, MintRecord, TokenDetails, TokenPage, TxEntry};
pub use wallet_creator::{CreateWalletOutcome, PhraseWord, WalletCreatorPage};
