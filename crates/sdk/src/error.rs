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

//! Error taxonomy surfaced by the transaction handle
//!
//! Connectivity and discovery failures are rewritten into caller-facing
//! diagnostics. Quote and build failures keep the delegate's message and
//! expose the delegate error through `source()`.

use thiserror::Error;

use crate::rpc::RpcError;

/// Result alias used throughout the SDK
pub type Result<T, E = StablepayError> = std::result::Result<T, E>;

/// Error types for transaction handle operations
#[derive(Debug, Error)]
pub enum StablepayError {
	#[error("Invalid configuration: {0}")]
	InvalidConfiguration(String),

	#[error("Unsupported protocol: {0} (expected one of: djed, gluon)")]
	UnsupportedProtocol(String),

	#[error(
		"Failed to connect to {network} RPC endpoint: {network_uri}\n\n\
		Possible causes:\n\
		- The RPC endpoint may be temporarily unavailable\n\
		- DNS resolution issue (check your internet connection)\n\
		- Network firewall blocking the connection\n\n\
		Please try again in a few moments or check the network status."
	)]
	ConnectivityFailure {
		network_uri: String,
		network: String,
		#[source]
		source: RpcError,
	},

	#[error(
		"Failed to interact with {protocol} contract at {contract_address} on {network}.\n\n\
		Possible causes:\n\
		- The contract address may be incorrect\n\
		- The contract may not be deployed on {network}\n\
		- The contract may not be a valid {protocol} contract\n\n\
		Please verify the contract address is correct for {network} (Chain ID: {chain_id})."
	)]
	ContractDiscoveryFailure {
		protocol: String,
		contract_address: String,
		network: String,
		chain_id: String,
		#[source]
		source: RpcError,
	},

	#[error("Stablecoin contract is not initialized; call init() first")]
	NotInitialized,

	#[error("Transaction handle is already initialized")]
	AlreadyInitialized,

	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	#[error("{0}")]
	QuoteFailed(#[source] RpcError),

	#[error("{0}")]
	BuildFailed(#[source] RpcError),

	#[error("Configuration error: {0}")]
	Config(#[from] config::ConfigError),
}
