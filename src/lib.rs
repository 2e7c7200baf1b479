//! token-studio: test-network token creation and minting with a local
//! web wallet.
//!
//! The crate is an orchestration layer. All cryptography, transaction wire
//! formats, and network protocol live behind two opaque capabilities
//! ([`chain::SigningWallet`], [`chain::ChainClient`]); the pages sequence
//! calls into them exactly once per user action, with no retries.
//!
//! - `pages::token` - create-token and mint-token flows
//! - `pages::wallet_creator` - recovery phrase, simulated accounts,
//!   reveal gate
//! - `nav` - navigation shell and page transition controller
//! - `api` - HTTP surface mirroring the client routes

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod gate;
pub mod guard;
pub mod nav;
pub mod pages;
pub mod storage;

pub use config::{AppConfig, SigningMode};
pub use error::{AppError, StorageError};
