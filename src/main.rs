use std::env;
use std::sync::{Arc, Mutex};

use token_studio::api::{server, AppState};
use token_studio::chain::RpcChainClient;
use token_studio::config::AppConfig;
use token_studio::nav::PageTransition;
use token_studio::pages::{TokenPage, WalletCreatorPage};
use token_studio::storage::Storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    let addr = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let wallet = config.build_wallet()?;
    let chain = Arc::new(RpcChainClient::new(config.rpc_url.clone()));
    log::info!("Chain RPC endpoint: {}", config.rpc_url);

    let storage = Storage::new();
    let wallet_creator = WalletCreatorPage::load(storage)?;

    let state = Arc::new(AppState {
        token_page: TokenPage::new(wallet, chain),
        wallet_creator: Mutex::new(wallet_creator),
        nav: Mutex::new(PageTransition::new()),
        signing_mode: config.signing_mode.label(),
        pinning_configured: config.pinning.is_some(),
    });

    log::info!("Starting token studio on {}", addr);
    server::start_server(&addr, state).await?;
    Ok(())
}
