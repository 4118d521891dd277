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

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::protocol::ProtocolTag;

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory component name
pub const LOG_COMPONENT_NAME: &str = "stablepay";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = false;

// Endpoint configuration constants
/// Default RPC endpoint used when none is configured
pub const DEFAULT_NETWORK_URI: &str = "http://localhost:8545";

/// Default per-request RPC timeout in milliseconds (can be overridden by STABLEPAY_RPC_TIMEOUT_MS)
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

/// Transaction handle configuration
///
/// `protocol` stays a string here so that an unknown value surfaces as
/// `UnsupportedProtocol` when the handle is built, not as a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StablepayConfig {
	/// RPC endpoint URI
	pub network_uri: String,
	/// Main protocol contract address
	pub contract_address: String,
	/// Protocol tag (`djed` or `gluon`)
	#[serde(default = "default_protocol")]
	pub protocol: String,
	/// Gluon router contract address
	#[serde(default)]
	pub router_address: Option<String>,
	/// Per-request RPC timeout
	#[serde(default = "default_rpc_timeout_ms")]
	pub rpc_timeout_ms: u64,
}

fn default_protocol() -> String {
	ProtocolTag::default().to_string()
}

fn default_rpc_timeout_ms() -> u64 {
	DEFAULT_RPC_TIMEOUT_MS
}

impl Default for StablepayConfig {
	fn default() -> Self {
		Self {
			network_uri: DEFAULT_NETWORK_URI.to_string(),
			contract_address: String::new(),
			protocol: default_protocol(),
			router_address: None,
			rpc_timeout_ms: DEFAULT_RPC_TIMEOUT_MS,
		}
	}
}

impl StablepayConfig {
	/// Load configuration from environment variables
	pub fn from_env() -> Result<Self> {
		dotenv::dotenv().ok();

		let cfg = config::Config::builder()
			.add_source(config::Environment::with_prefix("STABLEPAY"))
			.build()?;

		Ok(cfg.try_deserialize()?)
	}

	/// Load configuration from file
	pub fn from_file(path: &str) -> Result<Self> {
		let cfg = config::Config::builder()
			.add_source(config::File::with_name(path))
			.add_source(config::Environment::with_prefix("STABLEPAY"))
			.build()?;

		Ok(cfg.try_deserialize()?)
	}

	pub fn rpc_timeout(&self) -> Duration {
		Duration::from_millis(self.rpc_timeout_ms)
	}
}
