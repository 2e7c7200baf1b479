use std::sync::{Arc, PoisonError};

use axum::{extract::State, Json};

use super::types::*;
use super::AppState;
use crate::error::AppError;
use crate::nav::{nav_links, Route};
use crate::pages::token::TokenPageView;
use crate::pages::{CreateWalletOutcome, TokenDetails};

// Every flow error is caught here and converted to a user-visible status
// string; nothing is re-thrown past the triggering action. The one
// exception is a second trigger racing an in-flight action, which is
// rejected with 409 so clients can keep the control disabled.

pub async fn home_handler(State(state): State<Arc<AppState>>) -> Json<HomeResponse> {
    let transition = {
        let mut nav = state.nav.lock().unwrap_or_else(PoisonError::into_inner);
        Some(nav.navigate(Route::Home))
    };

    Json(HomeResponse {
        routes: nav_links(),
        connected: state.token_page.identity().map(|i| i.0),
        signing_mode: state.signing_mode,
        pinning_configured: state.pinning_configured,
        transition,
    })
}

pub async fn connect_wallet_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConnectResponse>, AppError> {
    let address = match state.token_page.connect_wallet().await {
        Ok(identity) => Some(identity.0),
        Err(e @ AppError::ActionInFlight(_)) => return Err(e),
        Err(_) => None,
    };
    Ok(Json(ConnectResponse {
        status: state.token_page.status(),
        address,
    }))
}

pub async fn disconnect_wallet_handler(
    State(state): State<Arc<AppState>>,
) -> Json<ConnectResponse> {
    state.token_page.disconnect_wallet();
    Json(ConnectResponse {
        status: state.token_page.status(),
        address: None,
    })
}

pub async fn token_page_handler(State(state): State<Arc<AppState>>) -> Json<TokenPageView> {
    state
        .nav
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .navigate(Route::Tokens);
    Json(state.token_page.view())
}

pub async fn create_token_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTokenRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let details = TokenDetails {
        name: req.name,
        symbol: req.symbol,
        decimals: req.decimals,
        supply: req.supply,
        description: req.description,
    };

    let mint_address = match state.token_page.create_token(&details).await {
        Ok(record) => Some(record.mint_address),
        Err(e @ AppError::ActionInFlight(_)) => return Err(e),
        Err(_) => None,
    };

    Ok(Json(StatusResponse {
        status: state.token_page.status(),
        mint_address,
        txid: None,
    }))
}

pub async fn mint_tokens_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MintTokensRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let txid = match state
        .token_page
        .mint_tokens(&req.recipient, req.supply, req.decimals)
        .await
    {
        Ok(outcome) => Some(outcome.txid),
        Err(e @ AppError::ActionInFlight(_)) => return Err(e),
        Err(_) => None,
    };

    Ok(Json(StatusResponse {
        status: state.token_page.status(),
        mint_address: state.token_page.mint_record().map(|r| r.mint_address),
        txid,
    }))
}

pub async fn transactions_handler(
    State(state): State<Arc<AppState>>,
) -> Json<TransactionsResponse> {
    state
        .nav
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .navigate(Route::Transactions);

    let balance_lamports = match state.token_page.balance().await {
        Ok(balance) => balance,
        Err(e) => {
            log::error!("Balance query failed: {}", e);
            None
        }
    };

    Json(TransactionsResponse {
        address: state.token_page.identity().map(|i| i.0),
        balance_lamports,
        history: state.token_page.history(),
    })
}

pub async fn web_wallet_handler(State(state): State<Arc<AppState>>) -> Json<WebWalletView> {
    state
        .nav
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .navigate(Route::WebWallet);

    let page = state
        .wallet_creator
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Json(WebWalletView {
        has_wallet: page.has_wallet(),
        reveal_state: page.reveal_state(),
        overwrite_pending: page.overwrite_pending(),
        words: page.phrase_words(),
        accounts: page.accounts().to_vec(),
    })
}

pub async fn create_wallet_handler(
    State(state): State<Arc<AppState>>,
) -> Json<CreateWalletResponse> {
    let mut page = state
        .wallet_creator
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let (status, confirmation_required) = match page.create_wallet() {
        Ok(CreateWalletOutcome::Created { word_count }) => (
            format!("✅ New wallet created ({}-word recovery phrase).", word_count),
            false,
        ),
        Ok(CreateWalletOutcome::ConfirmationRequired) => (
            "⚠️ A wallet already exists. Confirm to overwrite it; the old phrase is \
             unrecoverable."
                .to_string(),
            true,
        ),
        Err(e) => {
            log::error!("Wallet creation failed: {}", e);
            (format!("❌ {}", e), false)
        }
    };

    Json(CreateWalletResponse {
        status,
        confirmation_required,
    })
}

pub async fn confirm_create_wallet_handler(
    State(state): State<Arc<AppState>>,
) -> Json<CreateWalletResponse> {
    let mut page = state
        .wallet_creator
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let status = match page.confirm_create_wallet() {
        Ok(CreateWalletOutcome::Created { word_count }) => {
            format!("✅ New wallet created ({}-word recovery phrase).", word_count)
        }
        Ok(CreateWalletOutcome::ConfirmationRequired) => {
            // confirm never re-arms the gate
            "⚠️ Overwrite still pending confirmation.".to_string()
        }
        Err(e) => {
            log::error!("Wallet overwrite failed: {}", e);
            format!("❌ {}", e)
        }
    };

    Json(CreateWalletResponse {
        status,
        confirmation_required: false,
    })
}

pub async fn cancel_create_wallet_handler(
    State(state): State<Arc<AppState>>,
) -> Json<CreateWalletResponse> {
    state
        .wallet_creator
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .cancel_create_wallet();

    Json(CreateWalletResponse {
        status: "Wallet overwrite cancelled; existing phrase kept.".to_string(),
        confirmation_required: false,
    })
}

pub async fn create_account_handler(
    State(state): State<Arc<AppState>>,
) -> Json<AccountCreatedResponse> {
    let mut page = state
        .wallet_creator
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    match page.create_account() {
        Ok(account) => Json(AccountCreatedResponse {
            status: format!("✅ Account {} created.", account.id),
            account: Some(account),
        }),
        Err(e) => {
            log::error!("Account creation failed: {}", e);
            Json(AccountCreatedResponse {
                status: format!("❌ {}", e),
                account: None,
            })
        }
    }
}

fn reveal_response(
    page: &crate::pages::WalletCreatorPage,
    result: Result<crate::gate::GateState, AppError>,
) -> RevealResponse {
    match result {
        Ok(gate_state) => RevealResponse {
            state: gate_state,
            words: page.phrase_words(),
        },
        Err(e) => {
            log::error!("Reveal gate: {}", e);
            RevealResponse {
                state: page.reveal_state(),
                words: page.phrase_words(),
            }
        }
    }
}

pub async fn reveal_phrase_handler(State(state): State<Arc<AppState>>) -> Json<RevealResponse> {
    let mut page = state
        .wallet_creator
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let result = page.reveal_phrase();
    Json(reveal_response(&page, result))
}

pub async fn confirm_reveal_handler(State(state): State<Arc<AppState>>) -> Json<RevealResponse> {
    let mut page = state
        .wallet_creator
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let result = page.confirm_reveal();
    Json(reveal_response(&page, result))
}

pub async fn cancel_reveal_handler(State(state): State<Arc<AppState>>) -> Json<RevealResponse> {
    let mut page = state
        .wallet_creator
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let gate_state = page.cancel_reveal();
    Json(reveal_response(&page, Ok(gate_state)))
}
