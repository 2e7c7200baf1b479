use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::{handlers, AppState};

pub async fn start_server(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    // Configure CORS based on environment.
    // Set ALLOWED_ORIGINS="https://your-app.example" for production; if not
    // set, any origin is allowed (development mode).
    let cors = match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list: Vec<_> = origins
                .split(',')
                .map(|s| s.trim().parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => {
            log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS env var for production.");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = Router::new()
        // Navigation shell
        .route("/", get(handlers::home_handler))
        // Wallet adapter
        .route("/api/wallet/connect", post(handlers::connect_wallet_handler))
        .route(
            "/api/wallet/disconnect",
            post(handlers::disconnect_wallet_handler),
        )
        // Token page
        .route("/api/tokens", get(handlers::token_page_handler))
        .route("/api/tokens/create", post(handlers::create_token_handler))
        .route("/api/tokens/mint", post(handlers::mint_tokens_handler))
        // Transactions page
        .route("/api/transactions", get(handlers::transactions_handler))
        // Web wallet page
        .route("/api/web-wallet", get(handlers::web_wallet_handler))
        .route(
            "/api/web-wallet/create",
            post(handlers::create_wallet_handler),
        )
        .route(
            "/api/web-wallet/create/confirm",
            post(handlers::confirm_create_wallet_handler),
        )
        .route(
            "/api/web-wallet/create/cancel",
            post(handlers::cancel_create_wallet_handler),
        )
        .route(
            "/api/web-wallet/accounts",
            post(handlers::create_account_handler),
        )
        .route(
            "/api/web-wallet/reveal",
            post(handlers::reveal_phrase_handler),
        )
        .route(
            "/api/web-wallet/reveal/confirm",
            post(handlers::confirm_reveal_handler),
        )
        .route(
            "/api/web-wallet/reveal/cancel",
            post(handlers::cancel_reveal_handler),
        )
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
