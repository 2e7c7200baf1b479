//! Local persistent storage
//!
//! File-backed analogue of the browser's local storage: two keys,
//! `mnemonic` and `accounts`, overwritten wholesale on each mutation.

mod file_system;
mod models;

pub use file_system::Storage;
pub use models::{SimulatedAccount, EXAMPLE_TOKENS};
