// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Blockchain endpoint abstraction and the JSON-RPC over HTTP provider

use std::{
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::config::{DEFAULT_RPC_TIMEOUT_MS, StablepayConfig};

/// JSON-RPC error code used by geth-compatible nodes for reverted calls
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Failure kinds raised by endpoints and protocol libraries
///
/// The transaction handle branches on the kind, never on message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
	#[error("Connection error: {0}")]
	Connectivity(String),
	#[error("Contract call reverted: {0}")]
	Reverted(String),
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
	#[error("{0}")]
	Other(String),
}

impl RpcError {
	pub fn is_connectivity(&self) -> bool {
		matches!(self, RpcError::Connectivity(_))
	}
}

/// A live connection to a blockchain node
#[async_trait]
pub trait Endpoint: Send + Sync {
	/// URI the connection was opened against
	fn uri(&self) -> &str;

	/// Chain ID reported by the node at connect time, if it reported one
	fn chain_id(&self) -> Option<u64>;

	/// Execute a read-only contract call (`eth_call` at the latest block)
	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError>;
}

/// Opens endpoint connections
#[async_trait]
pub trait Connector: Send + Sync {
	async fn connect(&self, uri: &str) -> Result<Arc<dyn Endpoint>, RpcError>;
}

/// Connector for JSON-RPC 2.0 nodes reachable over HTTP(S)
///
/// Connecting probes `eth_chainId`, so an unreachable or misbehaving node
/// fails at connect time rather than on the first contract read.
#[derive(Clone)]
pub struct HttpConnector {
	client: ReqwestClient,
}

impl HttpConnector {
	/// Create a connector with the default request timeout
	pub fn new() -> Result<Self, RpcError> {
		Self::with_timeout(Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS))
	}

	/// Create a connector with a custom request timeout
	pub fn with_timeout(timeout: Duration) -> Result<Self, RpcError> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| RpcError::Other(format!("Failed to create HTTP client: {}", e)))?;

		Ok(Self { client })
	}

	pub fn from_config(config: &StablepayConfig) -> Result<Self, RpcError> {
		Self::with_timeout(config.rpc_timeout())
	}
}

#[async_trait]
impl Connector for HttpConnector {
	async fn connect(&self, uri: &str) -> Result<Arc<dyn Endpoint>, RpcError> {
		let mut endpoint = HttpEndpoint {
			uri: uri.to_string(),
			client: self.client.clone(),
			chain_id: None,
			next_id: AtomicU64::new(1),
		};

		let result = endpoint.request("eth_chainId", json!([])).await?;
		let chain_id = parse_quantity(&result)?;
		debug!(uri, chain_id, "Connected to RPC endpoint");

		endpoint.chain_id = Some(chain_id);
		Ok(Arc::new(endpoint))
	}
}

/// Endpoint opened by [`HttpConnector`]
pub struct HttpEndpoint {
	uri: String,
	client: ReqwestClient,
	chain_id: Option<u64>,
	next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
	#[serde(default)]
	result: Option<Value>,
	#[serde(default)]
	error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
	code: i64,
	message: String,
}

impl HttpEndpoint {
	async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let body = json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": method,
			"params": params,
		});

		let response = self
			.client
			.post(&self.uri)
			.json(&body)
			.send()
			.await
			.map_err(|e| RpcError::Connectivity(format!("Request failed: {}", e)))?;

		if !response.status().is_success() {
			let status = response.status();
			let error_text = response
				.text()
				.await
				.unwrap_or_else(|_| format!("HTTP {}", status));
			return Err(RpcError::Connectivity(format!("{}: {}", status, error_text)));
		}

		let envelope: JsonRpcResponse = response
			.json()
			.await
			.map_err(|e| RpcError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

		if let Some(error) = envelope.error {
			return Err(classify_error_object(error));
		}

		envelope
			.result
			.ok_or_else(|| RpcError::InvalidResponse(format!("{} returned no result", method)))
	}
}

#[async_trait]
impl Endpoint for HttpEndpoint {
	fn uri(&self) -> &str {
		&self.uri
	}

	fn chain_id(&self) -> Option<u64> {
		self.chain_id
	}

	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
		let result = self
			.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
			.await?;

		serde_json::from_value(result)
			.map_err(|e| RpcError::InvalidResponse(format!("eth_call result is not hex data: {}", e)))
	}
}

fn classify_error_object(error: JsonRpcErrorObject) -> RpcError {
	if error.code == EXECUTION_REVERTED_CODE || error.message.contains("execution reverted") {
		RpcError::Reverted(error.message)
	} else {
		RpcError::Other(format!("JSON-RPC error {}: {}", error.code, error.message))
	}
}

/// Parse a hex-encoded JSON-RPC quantity such as `"0xaa36a7"`
fn parse_quantity(value: &Value) -> Result<u64, RpcError> {
	let text = value
		.as_str()
		.ok_or_else(|| RpcError::InvalidResponse(format!("Expected hex quantity, got {}", value)))?;
	let digits = text
		.strip_prefix("0x")
		.ok_or_else(|| RpcError::InvalidResponse(format!("Quantity is missing 0x prefix: {}", text)))?;

	u64::from_str_radix(digits, 16)
		.map_err(|e| RpcError::InvalidResponse(format!("Invalid quantity {}: {}", text, e)))
}
