//! Common test utilities for token flow integration tests.
//!
//! Provides in-memory fakes for the two external capabilities so the page
//! flows can be exercised without a wallet extension or an RPC endpoint.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use token_studio::chain::{
    ChainClient, Identity, SignedTransaction, SigningWallet, Transaction, LAMPORTS_PER_SOL,
};
use token_studio::error::AppError;

pub const TEST_ADDRESS: &str = "4fYNw3dojWmQ4dXtSGE9epjRGy9pFSx62YypT7avPYvA";

/// Signing wallet fake: a fixed address, an explicit connected flag, and a
/// switch to make signing fail.
pub struct FakeSigningWallet {
    address: String,
    connected: Mutex<Option<Identity>>,
    pub fail_signing: AtomicBool,
}

impl FakeSigningWallet {
    pub fn new() -> Self {
        Self {
            address: TEST_ADDRESS.to_string(),
            connected: Mutex::new(None),
            fail_signing: AtomicBool::new(false),
        }
    }

    /// A wallet that is already connected, for tests past the connect step.
    pub fn connected() -> Self {
        let wallet = Self::new();
        *wallet.connected.lock().unwrap() = Some(Identity(TEST_ADDRESS.to_string()));
        wallet
    }
}

#[async_trait]
impl SigningWallet for FakeSigningWallet {
    fn identity(&self) -> Option<Identity> {
        self.connected.lock().unwrap().clone()
    }

    async fn connect(&self) -> Result<Identity, AppError> {
        let identity = Identity(self.address.clone());
        *self.connected.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }

    fn disconnect(&self) {
        *self.connected.lock().unwrap() = None;
    }

    async fn sign_transaction(&self, tx: Transaction) -> Result<SignedTransaction, AppError> {
        if self.fail_signing.load(Ordering::SeqCst) {
            return Err(AppError::Signing("user rejected the request".to_string()));
        }
        Ok(SignedTransaction {
            payload: tx,
            signatures: vec!["fake-signature".to_string()],
        })
    }
}

/// Chain client fake: configurable balance, failure switches, and a record
/// of every submitted transaction.
pub struct FakeChainClient {
    pub balance: AtomicU64,
    pub fail_send: AtomicBool,
    pub confirm: AtomicBool,
    /// Delay applied to balance queries, to hold a flow open while a second
    /// trigger races it.
    pub balance_delay_ms: AtomicU64,
    pub sent: Mutex<Vec<SignedTransaction>>,
}

impl FakeChainClient {
    /// A healthy client with a 1 SOL balance.
    pub fn new() -> Self {
        Self {
            balance: AtomicU64::new(LAMPORTS_PER_SOL),
            fail_send: AtomicBool::new(false),
            confirm: AtomicBool::new(true),
            balance_delay_ms: AtomicU64::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_balance(lamports: u64) -> Self {
        let client = Self::new();
        client.balance.store(lamports, Ordering::SeqCst);
        client
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainClient for FakeChainClient {
    async fn get_balance(&self, _identity: &Identity) -> Result<u64, AppError> {
        let delay = self.balance_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        Ok(self.balance.load(Ordering::SeqCst))
    }

    async fn latest_blockhash(&self) -> Result<String, AppError> {
        Ok("fake-blockhash".to_string())
    }

    async fn send_transaction(&self, tx: &SignedTransaction) -> Result<String, AppError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(AppError::Rpc("node rejected the transaction".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(tx.clone());
        Ok(format!("fake-txid-{}", sent.len()))
    }

    async fn confirm_transaction(&self, _txid: &str) -> Result<bool, AppError> {
        Ok(self.confirm.load(Ordering::SeqCst))
    }
}
