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

//! Transaction handle: discovery state machine and protocol-neutral
//! quote / purchase operations

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::{debug, error, info};

use crate::adapters::{Backends, Deployment, DiscoveryTarget, ProtocolAdapter};
use crate::config::StablepayConfig;
use crate::error::{Result, StablepayError};
use crate::network::describe_network;
use crate::protocol::{ProtocolResolver, ProtocolTag};
use crate::rpc::{Connector, Endpoint, RpcError};
use crate::types::{
	BlockchainDetails, ContractHandle, DecimalsPair, NOT_AVAILABLE, Oracle, TransactionPayload,
};

/// Lifecycle of a transaction handle
enum HandleState {
	/// Nothing discovered yet
	Uninitialized,
	/// Endpoint connected but discovery has not succeeded
	Connected { endpoint: Arc<dyn Endpoint> },
	/// Discovery complete
	Ready {
		endpoint: Arc<dyn Endpoint>,
		deployment: Deployment,
	},
}

/// Stablecoin purchase handle for one (endpoint, contract, protocol) triple
///
/// Construct it, call [`init`](Self::init) once, then quote and build
/// purchases as often as needed. Every operation except `init` and
/// [`blockchain_details`](Self::blockchain_details) fails with
/// [`StablepayError::NotInitialized`] until `init` succeeds.
pub struct TransactionHandle {
	network_uri: String,
	contract_address: String,
	protocol: ProtocolTag,
	router_address: Option<String>,
	connector: Arc<dyn Connector>,
	adapter: Box<dyn ProtocolAdapter>,
	state: HandleState,
}

impl TransactionHandle {
	/// Create an uninitialized handle. No I/O happens until `init`.
	pub fn new(
		network_uri: impl Into<String>,
		contract_address: impl Into<String>,
		protocol: ProtocolTag,
		router_address: Option<String>,
		backends: &Backends,
	) -> Self {
		Self {
			network_uri: network_uri.into(),
			contract_address: contract_address.into(),
			protocol,
			router_address,
			connector: backends.connector.clone(),
			adapter: ProtocolResolver::select_adapter(protocol, backends),
			state: HandleState::Uninitialized,
		}
	}

	/// Create a handle from loaded configuration
	pub fn from_config(config: &StablepayConfig, backends: &Backends) -> Result<Self> {
		let protocol: ProtocolTag = config.protocol.parse()?;
		Ok(Self::new(
			config.network_uri.clone(),
			config.contract_address.clone(),
			protocol,
			config.router_address.clone(),
			backends,
		))
	}

	pub fn network_uri(&self) -> &str {
		&self.network_uri
	}

	pub fn contract_address(&self) -> &str {
		&self.contract_address
	}

	pub fn protocol(&self) -> ProtocolTag {
		self.protocol
	}

	pub fn router_address(&self) -> Option<&str> {
		self.router_address.as_deref()
	}

	pub fn is_ready(&self) -> bool {
		matches!(self.state, HandleState::Ready { .. })
	}

	pub fn endpoint(&self) -> Option<&Arc<dyn Endpoint>> {
		match &self.state {
			HandleState::Uninitialized => None,
			HandleState::Connected { endpoint } | HandleState::Ready { endpoint, .. } => {
				Some(endpoint)
			}
		}
	}

	pub fn main_contract(&self) -> Option<&ContractHandle> {
		self.ready().map(|d| &d.main_contract)
	}

	pub fn stable_coin(&self) -> Option<&ContractHandle> {
		self.ready().map(|d| &d.stable_coin)
	}

	pub fn reserve_coin(&self) -> Option<&ContractHandle> {
		self.ready().map(|d| &d.reserve_coin)
	}

	pub fn decimals(&self) -> Option<DecimalsPair> {
		self.ready().map(|d| d.decimals)
	}

	pub fn oracle(&self) -> Option<&Oracle> {
		self.ready().map(|d| &d.oracle)
	}

	pub fn router(&self) -> Option<&ContractHandle> {
		self.ready().and_then(|d| d.router.as_ref())
	}

	/// Connect to the endpoint and discover the protocol deployment
	///
	/// On failure the handle stays not ready. If the connection itself
	/// succeeded it is kept, and calling `init` again retries discovery on
	/// it. Once ready, further calls fail with `AlreadyInitialized`.
	pub async fn init(&mut self) -> Result<()> {
		if self.is_ready() {
			return Err(StablepayError::AlreadyInitialized);
		}
		let target = self.validate_configuration()?;

		let existing = match &self.state {
			HandleState::Connected { endpoint } => Some(endpoint.clone()),
			_ => None,
		};
		let endpoint = match existing {
			Some(endpoint) => endpoint,
			None => self.connect().await?,
		};

		let procedure = ProtocolResolver::select_initializer(self.protocol);
		debug!(
			contract = %self.contract_address,
			protocol = %self.adapter.protocol(),
			"Running {}",
			procedure
		);

		let deployment = self
			.adapter
			.discover(endpoint.clone(), &target)
			.await
			.map_err(|e| self.discovery_failure(e, endpoint.chain_id()))?;

		info!(
			contract = %self.contract_address,
			protocol = %self.protocol,
			stable_coin = %deployment.stable_coin.address,
			reserve_coin = %deployment.reserve_coin.address,
			"Transaction handle initialized"
		);
		self.state = HandleState::Ready {
			endpoint,
			deployment,
		};
		Ok(())
	}

	/// Base currency needed to buy `amount_scaled` stable-coin units
	///
	/// `amount_scaled` is a decimal integer string in the stable-coin's
	/// smallest unit; the result uses the same representation for the base
	/// currency.
	pub async fn quote_stablecoin_purchase(&self, amount_scaled: &str) -> Result<String> {
		let deployment = self.deployment()?;
		let amount = parse_scaled_amount(amount_scaled)?;

		deployment
			.market
			.quote_stablecoin_purchase(amount)
			.await
			.map_err(|e| {
				error!(
					protocol = %self.protocol,
					amount_scaled,
					"Error fetching trade data for buying stablecoins: {}",
					e
				);
				StablepayError::QuoteFailed(e)
			})
	}

	/// Build, without signing or sending, a stable-coin purchase transaction
	pub async fn build_stablecoin_purchase_transaction(
		&self,
		payer: Address,
		receiver: Address,
		value: U256,
	) -> Result<TransactionPayload> {
		let deployment = self.deployment()?;
		info!(
			"Building stablecoin purchase transaction from {} to {} with value {}",
			payer, receiver, value
		);

		let payload = deployment
			.market
			.build_stablecoin_purchase(payer, receiver, value)
			.await
			.map_err(|e| {
				error!(
					protocol = %self.protocol,
					%payer,
					%receiver,
					"Error building stablecoin purchase transaction: {}",
					e
				);
				StablepayError::BuildFailed(e)
			})?;

		debug!(to = %payload.to, "Transaction built");
		Ok(payload)
	}

	/// Snapshot of whatever state the handle currently holds
	pub fn blockchain_details(&self) -> BlockchainDetails {
		let deployment = self.ready();
		let address_or_na = |contract: Option<&ContractHandle>| {
			contract
				.map(|c| c.address.to_string())
				.unwrap_or_else(|| NOT_AVAILABLE.to_string())
		};
		let oracle = deployment.and_then(|d| d.oracle.contract());

		BlockchainDetails {
			protocol: self.protocol,
			endpoint_available: self.endpoint().is_some(),
			main_contract_available: deployment.is_some(),
			stable_coin_address: address_or_na(deployment.map(|d| &d.stable_coin)),
			reserve_coin_address: address_or_na(deployment.map(|d| &d.reserve_coin)),
			stable_coin_decimals: deployment.map(|d| d.decimals.stable_coin),
			reserve_coin_decimals: deployment.map(|d| d.decimals.reserve_coin),
			oracle_address: address_or_na(oracle),
			oracle_contract_available: oracle.is_some(),
		}
	}

	fn ready(&self) -> Option<&Deployment> {
		match &self.state {
			HandleState::Ready { deployment, .. } => Some(deployment),
			_ => None,
		}
	}

	fn deployment(&self) -> Result<&Deployment> {
		self.ready().ok_or(StablepayError::NotInitialized)
	}

	fn validate_configuration(&self) -> Result<DiscoveryTarget> {
		if self.network_uri.trim().is_empty() || self.contract_address.trim().is_empty() {
			return Err(StablepayError::InvalidConfiguration(
				"Network URI and contract address are required".to_string(),
			));
		}

		let contract_address = parse_address("contract address", &self.contract_address)?;
		// Only the Gluon discovery binds a router
		let router_address = match self.protocol {
			ProtocolTag::Gluon => self
				.router_address
				.as_deref()
				.map(|router| parse_address("router address", router))
				.transpose()?,
			ProtocolTag::Djed => None,
		};

		Ok(DiscoveryTarget {
			contract_address,
			router_address,
		})
	}

	async fn connect(&mut self) -> Result<Arc<dyn Endpoint>> {
		let endpoint = self
			.connector
			.connect(&self.network_uri)
			.await
			.map_err(|e| self.connectivity_failure(e))?;

		if let Some(chain_id) = endpoint.chain_id() {
			debug!(uri = %self.network_uri, chain_id, "Endpoint connected");
		}
		self.state = HandleState::Connected {
			endpoint: endpoint.clone(),
		};
		Ok(endpoint)
	}

	fn connectivity_failure(&self, source: RpcError) -> StablepayError {
		error!(uri = %self.network_uri, "Error initializing transaction: {}", source);
		StablepayError::ConnectivityFailure {
			network_uri: self.network_uri.clone(),
			network: describe_network(&self.network_uri).name.to_string(),
			source,
		}
	}

	fn discovery_failure(&self, source: RpcError, reported_chain_id: Option<u64>) -> StablepayError {
		if source.is_connectivity() {
			return self.connectivity_failure(source);
		}

		error!(
			contract = %self.contract_address,
			protocol = %self.protocol,
			"Error fetching contract details: {}",
			source
		);
		let mut network = describe_network(&self.network_uri);
		network.chain_id = network.chain_id.or(reported_chain_id);
		StablepayError::ContractDiscoveryFailure {
			protocol: self.protocol.display_name().to_string(),
			contract_address: self.contract_address.clone(),
			network: network.name.to_string(),
			chain_id: network.chain_id_label(),
			source,
		}
	}
}

fn parse_address(field: &str, value: &str) -> Result<Address> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(StablepayError::InvalidConfiguration(format!(
			"The {} must not be empty",
			field
		)));
	}

	trimmed.parse::<Address>().map_err(|e| {
		StablepayError::InvalidConfiguration(format!(
			"The {} {} is not a valid address: {}",
			field, value, e
		))
	})
}

/// Parse a scaled amount, rejecting anything but a plain decimal integer
fn parse_scaled_amount(amount_scaled: &str) -> Result<U256> {
	if amount_scaled.is_empty() || !amount_scaled.bytes().all(|b| b.is_ascii_digit()) {
		return Err(StablepayError::InvalidArgument(format!(
			"Amount must be a decimal integer string, got {:?}",
			amount_scaled
		)));
	}

	U256::from_str_radix(amount_scaled, 10).map_err(|e| {
		StablepayError::InvalidArgument(format!(
			"Amount {} does not fit in 256 bits: {}",
			amount_scaled, e
		))
	})
}
