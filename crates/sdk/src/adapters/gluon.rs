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

//! Dual-token fission/fusion (Gluon) protocol adapter
//!
//! Neutron is always the stable asset and proton the volatile one. The
//! protocol prices from its own reserve, so there is no oracle.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use tracing::debug;

use super::{Deployment, DiscoveryTarget, ProtocolAdapter, StablecoinMarket};
use crate::protocol::ProtocolTag;
use crate::rpc::{Endpoint, RpcError};
use crate::types::{ContractHandle, DecimalsPair, Oracle, TransactionPayload};

/// Proton (volatile) and neutron (stable) token contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GluonTokens {
	pub proton: ContractHandle,
	pub neutron: ContractHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GluonDecimals {
	pub proton: u8,
	pub neutron: u8,
}

/// Binds the Gluon helper library to a deployed Gluon contract
pub trait GluonLibrary: Send + Sync {
	fn bind(
		&self,
		endpoint: Arc<dyn Endpoint>,
		address: Address,
		router: Option<Address>,
	) -> Result<Arc<dyn GluonProtocol>, RpcError>;
}

/// A Gluon contract bound to an endpoint
#[async_trait]
pub trait GluonProtocol: Send + Sync {
	fn contract(&self) -> ContractHandle;

	fn router(&self) -> Option<ContractHandle>;

	async fn resolve_coin_contracts(&self) -> Result<GluonTokens, RpcError>;

	async fn resolve_decimals(&self, tokens: &GluonTokens) -> Result<GluonDecimals, RpcError>;

	/// Base currency held by the protocol
	async fn reserve(&self) -> Result<U256, RpcError>;

	async fn total_supply(&self, token: &ContractHandle) -> Result<U256, RpcError>;

	async fn fission_fee(&self) -> Result<U256, RpcError>;

	/// Base currency that fission needs to mint `amount` neutrons
	fn compute_required_input_for_output(
		&self,
		amount: U256,
		reserve: U256,
		neutron_supply: U256,
		fission_fee: U256,
	) -> Result<U256, RpcError>;

	async fn build_fission_transaction(
		&self,
		payer: Address,
		value: U256,
		receiver: Address,
	) -> Result<TransactionPayload, RpcError>;
}

/// Adapter running Gluon discovery through a [`GluonLibrary`]
pub struct GluonAdapter {
	library: Arc<dyn GluonLibrary>,
}

impl GluonAdapter {
	pub fn new(library: Arc<dyn GluonLibrary>) -> Self {
		Self { library }
	}
}

#[async_trait]
impl ProtocolAdapter for GluonAdapter {
	fn protocol(&self) -> ProtocolTag {
		ProtocolTag::Gluon
	}

	async fn discover(
		&self,
		endpoint: Arc<dyn Endpoint>,
		target: &DiscoveryTarget,
	) -> Result<Deployment, RpcError> {
		let gluon = self
			.library
			.bind(endpoint, target.contract_address, target.router_address)?;

		let tokens = gluon.resolve_coin_contracts().await?;
		let decimals = gluon.resolve_decimals(&tokens).await?;
		debug!(
			neutron = %tokens.neutron.address,
			proton = %tokens.proton.address,
			"Resolved Gluon token contracts"
		);

		Ok(Deployment {
			main_contract: gluon.contract(),
			stable_coin: tokens.neutron,
			reserve_coin: tokens.proton,
			decimals: DecimalsPair {
				stable_coin: decimals.neutron,
				reserve_coin: decimals.proton,
			},
			oracle: Oracle::NotApplicable,
			router: gluon.router(),
			market: Box::new(GluonMarket {
				gluon,
				neutron: tokens.neutron,
			}),
		})
	}
}

struct GluonMarket {
	gluon: Arc<dyn GluonProtocol>,
	neutron: ContractHandle,
}

#[async_trait]
impl StablecoinMarket for GluonMarket {
	async fn quote_stablecoin_purchase(&self, amount_scaled: U256) -> Result<String, RpcError> {
		let reserve = self.gluon.reserve().await?;
		let neutron_supply = self.gluon.total_supply(&self.neutron).await?;
		let fission_fee = self.gluon.fission_fee().await?;

		let input = self.gluon.compute_required_input_for_output(
			amount_scaled,
			reserve,
			neutron_supply,
			fission_fee,
		)?;
		Ok(input.to_string())
	}

	async fn build_stablecoin_purchase(
		&self,
		payer: Address,
		receiver: Address,
		value: U256,
	) -> Result<TransactionPayload, RpcError> {
		self.gluon
			.build_fission_transaction(payer, value, receiver)
			.await
	}
}
