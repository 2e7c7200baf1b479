//! HTTP surface exposing the page operations.

pub mod handlers;
pub mod server;
pub mod types;

use std::sync::Mutex;

use crate::nav::PageTransition;
use crate::pages::{TokenPage, WalletCreatorPage};

/// Shared application state. Page-local state sits behind short-lived
/// mutexes, never held across an await; external calls stay sequential
/// within one handler.
pub struct AppState {
    pub token_page: TokenPage,
    pub wallet_creator: Mutex<WalletCreatorPage>,
    pub nav: Mutex<PageTransition>,
    pub signing_mode: &'static str,
    pub pinning_configured: bool,
}
