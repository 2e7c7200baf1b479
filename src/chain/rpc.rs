use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ChainClient, Identity, SignedTransaction};
use crate::error::AppError;

/// JSON-RPC 2.0 client against a single test-network endpoint.
///
/// The endpoint is opaque: this client marshals the four calls the pages
/// need and surfaces everything else as [`AppError::Rpc`]. No retries, no
/// backoff; a failed call ends the triggering action.
pub struct RpcChainClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RpcChainClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, AppError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        log::debug!("RPC {} -> {}", method, self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Rpc(format!("{}: {}", method, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Rpc(format!(
                "{}: endpoint returned HTTP {}",
                method,
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Rpc(format!("{}: invalid response body: {}", method, e)))?;

        if let Some(error) = body.get("error") {
            return Err(AppError::Rpc(format!("{}: {}", method, error)));
        }

        body.get("result")
            .cloned()
            .ok_or_else(|| AppError::Rpc(format!("{}: response missing result", method)))
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_balance(&self, identity: &Identity) -> Result<u64, AppError> {
        let result = self
            .call("getBalance", json!([identity.address()]))
            .await?;

        // Endpoints answer either a bare number or {"value": n}
        result
            .as_u64()
            .or_else(|| result.get("value").and_then(Value::as_u64))
            .ok_or_else(|| AppError::Rpc("getBalance: non-numeric balance".to_string()))
    }

    async fn latest_blockhash(&self) -> Result<String, AppError> {
        let result = self.call("getLatestBlockhash", json!([])).await?;

        result
            .as_str()
            .or_else(|| {
                result
                    .pointer("/value/blockhash")
                    .or_else(|| result.get("blockhash"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
            .ok_or_else(|| AppError::Rpc("getLatestBlockhash: missing blockhash".to_string()))
    }

    async fn send_transaction(&self, tx: &SignedTransaction) -> Result<String, AppError> {
        let encoded = hex::encode(tx.to_bytes()?);
        let result = self
            .call("sendTransaction", json!([encoded, { "encoding": "hex" }]))
            .await?;

        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Rpc("sendTransaction: missing transaction id".to_string()))
    }

    async fn confirm_transaction(&self, txid: &str) -> Result<bool, AppError> {
        let result = self.call("confirmTransaction", json!([txid])).await?;

        result
            .as_bool()
            .or_else(|| {
                result
                    .pointer("/value/confirmed")
                    .or_else(|| result.get("confirmed"))
                    .and_then(Value::as_bool)
            })
            .ok_or_else(|| AppError::Rpc("confirmTransaction: missing status".to_string()))
    }
}
