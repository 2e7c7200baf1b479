use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use secp256k1::rand::thread_rng;
use secp256k1::{All, Message, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use super::{Identity, SignedTransaction, SigningWallet, Transaction};
use crate::error::AppError;

/// A secp256k1 keypair wallet behind the [`SigningWallet`] boundary.
///
/// Covers both signing modes: `generate()` stands in for a user's browser
/// wallet (fresh identity per process), `from_secret_hex()` loads a
/// server-custodied fee-payer key from configuration.
pub struct KeypairWallet {
    secp: Secp256k1<All>,
    secret: SecretKey,
    address: String,
    connected: Mutex<Option<Identity>>,
}

impl KeypairWallet {
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret, public) = secp.generate_keypair(&mut thread_rng());
        let address = hex::encode(public.serialize());
        Self {
            secp,
            secret,
            address,
            connected: Mutex::new(None),
        }
    }

    pub fn from_secret_hex(secret_hex: &str) -> Result<Self, AppError> {
        let bytes = hex::decode(secret_hex)
            .map_err(|e| AppError::Config(format!("fee payer key is not valid hex: {}", e)))?;
        let secret = SecretKey::from_slice(&bytes)
            .map_err(|e| AppError::Config(format!("fee payer key is invalid: {}", e)))?;
        let secp = Secp256k1::new();
        let address = hex::encode(secret.public_key(&secp).serialize());
        Ok(Self {
            secp,
            secret,
            address,
            connected: Mutex::new(None),
        })
    }
}

#[async_trait]
impl SigningWallet for KeypairWallet {
    fn identity(&self) -> Option<Identity> {
        self.connected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn connect(&self) -> Result<Identity, AppError> {
        let identity = Identity(self.address.clone());
        *self
            .connected
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(identity.clone());
        log::info!("Wallet connected: {}", identity.short());
        Ok(identity)
    }

    fn disconnect(&self) {
        *self
            .connected
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
        log::info!("Wallet disconnected");
    }

    async fn sign_transaction(&self, tx: Transaction) -> Result<SignedTransaction, AppError> {
        if self.identity().is_none() {
            return Err(AppError::NotConnected);
        }

        let digest: [u8; 32] = Sha256::digest(tx.to_bytes()?).into();
        let message = Message::from_digest(digest);
        let signature = self.secp.sign_ecdsa(&message, &self.secret);

        Ok(SignedTransaction {
            payload: tx,
            signatures: vec![hex::encode(signature.serialize_compact())],
        })
    }
}

/// Generates a fresh address for a new mint account. The secret never leaves
/// this function; only the address participates in the orchestration layer.
pub fn generate_address() -> String {
    let secp = Secp256k1::new();
    let (_, public) = secp.generate_keypair(&mut thread_rng());
    hex::encode(public.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_requires_connection() {
        let wallet = KeypairWallet::generate();
        let tx = Transaction::new("hash", "payer");
        let result = wallet.sign_transaction(tx).await;
        assert!(matches!(result, Err(AppError::NotConnected)));
    }

    #[tokio::test]
    async fn test_connect_then_sign() {
        let wallet = KeypairWallet::generate();
        let identity = wallet.connect().await.unwrap();
        assert_eq!(wallet.identity(), Some(identity.clone()));

        let tx = Transaction::new("hash", identity.address());
        let signed = wallet.sign_transaction(tx).await.unwrap();
        assert_eq!(signed.signatures.len(), 1);

        wallet.disconnect();
        assert!(wallet.identity().is_none());
    }

    #[test]
    fn test_from_secret_hex_rejects_garbage() {
        assert!(KeypairWallet::from_secret_hex("not hex").is_err());
        assert!(KeypairWallet::from_secret_hex("abcd").is_err());
    }
}
