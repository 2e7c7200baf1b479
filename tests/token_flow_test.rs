//! Integration tests for the create-token and mint-token flows, run against
//! in-memory capability fakes.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{FakeChainClient, FakeSigningWallet, TEST_ADDRESS};
use token_studio::chain::{derive_associated_token_address, LAMPORTS_PER_SOL};
use token_studio::error::AppError;
use token_studio::guard::ActionState;
use token_studio::pages::{TokenDetails, TokenPage};

fn test_details() -> TokenDetails {
    TokenDetails {
        name: "Test Token".to_string(),
        symbol: "TST".to_string(),
        description: "integration test token".to_string(),
        ..TokenDetails::default()
    }
}

fn test_page(wallet: FakeSigningWallet, chain: Arc<FakeChainClient>) -> TokenPage {
    TokenPage::new(Arc::new(wallet), chain)
}

#[tokio::test]
async fn test_create_token_requires_connection() {
    let chain = Arc::new(FakeChainClient::new());
    let page = test_page(FakeSigningWallet::new(), Arc::clone(&chain));

    let result = page.create_token(&test_details()).await;
    assert!(matches!(result, Err(AppError::NotConnected)));

    // Nothing was submitted and no mint record exists.
    assert_eq!(chain.sent_count(), 0);
    assert!(page.mint_record().is_none());
    assert!(page.status().starts_with("❌"));
}

#[tokio::test]
async fn test_create_token_rejects_low_balance() {
    // 0.01 SOL, below the 0.05 SOL creation threshold.
    let chain = Arc::new(FakeChainClient::with_balance(LAMPORTS_PER_SOL / 100));
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));

    let result = page.create_token(&test_details()).await;
    assert!(matches!(
        result,
        Err(AppError::InsufficientBalance { .. })
    ));

    assert_eq!(chain.sent_count(), 0);
    assert!(page.mint_record().is_none());
    assert!(page.status().contains("insufficient balance"));
    assert_eq!(page.view().create_state, ActionState::Failed);
}

#[tokio::test]
async fn test_create_token_happy_path() {
    let chain = Arc::new(FakeChainClient::new());
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));

    let record = page.create_token(&test_details()).await.unwrap();
    assert!(!record.mint_address.is_empty());

    assert_eq!(page.mint_record(), Some(record.clone()));
    assert!(page.status().contains(&record.mint_address));
    assert_eq!(page.view().create_state, ActionState::Done);

    // One transaction with the full three-instruction sequence.
    assert_eq!(chain.sent_count(), 1);
    let sent = chain.sent.lock().unwrap();
    assert_eq!(sent[0].payload.instructions.len(), 3);
    assert_eq!(sent[0].payload.fee_payer, TEST_ADDRESS);

    let history = page.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, "create-token");
}

#[tokio::test]
async fn test_create_token_send_failure_leaves_no_record() {
    let chain = Arc::new(FakeChainClient::new());
    chain.fail_send.store(true, Ordering::SeqCst);
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));

    let result = page.create_token(&test_details()).await;
    assert!(matches!(result, Err(AppError::CreationFailed(_))));
    assert!(page.mint_record().is_none());
    assert!(page.history().is_empty());
}

#[tokio::test]
async fn test_create_token_unconfirmed_is_failure() {
    let chain = Arc::new(FakeChainClient::new());
    chain.confirm.store(false, Ordering::SeqCst);
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));

    let result = page.create_token(&test_details()).await;
    assert!(matches!(result, Err(AppError::CreationFailed(_))));
    assert!(page.mint_record().is_none());
}

#[tokio::test]
async fn test_mint_requires_recipient() {
    let chain = Arc::new(FakeChainClient::new());
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));
    page.create_token(&test_details()).await.unwrap();

    // An all-whitespace recipient counts as empty.
    let result = page.mint_tokens("   ", 500, 9).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(chain.sent_count(), 1);
}

#[tokio::test]
async fn test_mint_requires_created_token() {
    let chain = Arc::new(FakeChainClient::new());
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));

    let result = page.mint_tokens("recipient-address", 500, 9).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(chain.sent_count(), 0);
}

#[tokio::test]
async fn test_create_then_mint_flow() {
    let chain = Arc::new(FakeChainClient::new());
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));

    let record = page.create_token(&test_details()).await.unwrap();
    let outcome = page.mint_tokens("recipient-address", 500, 9).await.unwrap();

    assert_eq!(outcome.amount, 500 * 10u64.pow(9));
    assert_eq!(
        outcome.token_account,
        derive_associated_token_address(&record.mint_address, "recipient-address")
    );
    assert_eq!(chain.sent_count(), 2);

    let history = page.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].kind, "mint-tokens");
    assert_eq!(history[1].txid, outcome.txid);

    assert_eq!(page.view().mint_state, ActionState::Done);
    assert!(page.status().starts_with("✅"));
}

#[tokio::test]
async fn test_mint_send_failure_keeps_record() {
    let chain = Arc::new(FakeChainClient::new());
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));
    page.create_token(&test_details()).await.unwrap();

    chain.fail_send.store(true, Ordering::SeqCst);
    let result = page.mint_tokens("recipient-address", 10, 9).await;
    assert!(matches!(result, Err(AppError::MintFailed(_))));
    assert_eq!(page.view().mint_state, ActionState::Failed);
    // The record from the successful creation survives a failed mint.
    assert!(page.mint_record().is_some());
}

#[tokio::test]
async fn test_second_create_while_pending_is_rejected() {
    let chain = Arc::new(FakeChainClient::new());
    chain.balance_delay_ms.store(50, Ordering::SeqCst);
    let page = test_page(FakeSigningWallet::connected(), Arc::clone(&chain));

    let details = test_details();
    let (first, second) = tokio::join!(page.create_token(&details), page.create_token(&details));

    let in_flight = [&first, &second]
        .iter()
        .filter(|r| matches!(r, Err(AppError::ActionInFlight(_))))
        .count();
    assert_eq!(in_flight, 1);
    assert!(first.is_ok() || second.is_ok());

    // Only the winning submission reached the chain.
    assert_eq!(chain.sent_count(), 1);
}

#[tokio::test]
async fn test_connect_and_disconnect_update_status() {
    let chain = Arc::new(FakeChainClient::new());
    let page = test_page(FakeSigningWallet::new(), Arc::clone(&chain));

    assert!(page.identity().is_none());
    let identity = page.connect_wallet().await.unwrap();
    assert_eq!(identity.address(), TEST_ADDRESS);
    assert!(page.status().contains(&identity.short()));

    page.disconnect_wallet();
    assert!(page.identity().is_none());
    assert_eq!(page.status(), "Wallet disconnected.");
}

#[tokio::test]
async fn test_balance_reported_for_connected_identity_only() {
    let chain = Arc::new(FakeChainClient::with_balance(42));
    let page = test_page(FakeSigningWallet::new(), Arc::clone(&chain));

    assert_eq!(page.balance().await.unwrap(), None);
    page.connect_wallet().await.unwrap();
    assert_eq!(page.balance().await.unwrap(), Some(42));
}
