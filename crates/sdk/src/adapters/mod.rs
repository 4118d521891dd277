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

//! Protocol adapters
//!
//! Each adapter wraps one protocol's helper library behind the same
//! discover / quote / build-purchase surface, so the transaction handle
//! never checks the protocol tag after construction.

pub mod djed;
pub mod gluon;

pub use djed::{BuyRequest, CoinContracts, DjedAdapter, DjedLibrary, UI_FEE_RECIPIENT};
pub use gluon::{GluonAdapter, GluonDecimals, GluonLibrary, GluonProtocol, GluonTokens};

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::protocol::ProtocolTag;
use crate::rpc::{Connector, Endpoint, RpcError};
use crate::types::{ContractHandle, DecimalsPair, Oracle, TransactionPayload};

/// External collaborators a transaction handle is built from
#[derive(Clone)]
pub struct Backends {
	/// Opens the endpoint connection during `init`
	pub connector: Arc<dyn Connector>,
	/// Classical protocol helper library
	pub djed: Arc<dyn DjedLibrary>,
	/// Dual-token protocol helper library
	pub gluon: Arc<dyn GluonLibrary>,
}

impl Backends {
	pub fn new(
		connector: Arc<dyn Connector>,
		djed: Arc<dyn DjedLibrary>,
		gluon: Arc<dyn GluonLibrary>,
	) -> Self {
		Self {
			connector,
			djed,
			gluon,
		}
	}
}

/// Validated addresses discovery starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryTarget {
	pub contract_address: Address,
	pub router_address: Option<Address>,
}

/// Everything discovery resolves for one protocol deployment
pub struct Deployment {
	pub main_contract: ContractHandle,
	pub stable_coin: ContractHandle,
	pub reserve_coin: ContractHandle,
	pub decimals: DecimalsPair,
	pub oracle: Oracle,
	pub router: Option<ContractHandle>,
	/// Pricing and purchase operations bound to this deployment
	pub market: Box<dyn StablecoinMarket>,
}

/// Discovery half of a protocol adapter
#[async_trait]
pub trait ProtocolAdapter: Send + Sync {
	fn protocol(&self) -> ProtocolTag;

	/// Resolve contract handles, decimals and oracle for `target`
	///
	/// Every step is a read against `endpoint` and may revert. Errors are
	/// returned as-is; the caller classifies them.
	async fn discover(
		&self,
		endpoint: Arc<dyn Endpoint>,
		target: &DiscoveryTarget,
	) -> Result<Deployment, RpcError>;
}

/// Pricing and purchase operations of a discovered deployment
#[async_trait]
pub trait StablecoinMarket: Send + Sync {
	/// Base currency required to receive `amount_scaled` stable-coin units,
	/// as a decimal integer string
	async fn quote_stablecoin_purchase(&self, amount_scaled: U256) -> Result<String, RpcError>;

	/// Build an unsigned stable-coin purchase transaction
	async fn build_stablecoin_purchase(
		&self,
		payer: Address,
		receiver: Address,
		value: U256,
	) -> Result<TransactionPayload, RpcError>;
}
