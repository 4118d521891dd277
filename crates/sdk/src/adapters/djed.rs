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

//! Classical reserve-ratio (Djed) protocol adapter

use std::sync::Arc;

use alloy_primitives::{Address, U256, address};
use async_trait::async_trait;
use tracing::debug;

use super::{Deployment, DiscoveryTarget, ProtocolAdapter, StablecoinMarket};
use crate::protocol::ProtocolTag;
use crate::rpc::{Endpoint, RpcError};
use crate::types::{ContractHandle, DecimalsPair, Oracle, TradeData, TransactionPayload};

/// Fee recipient credited as the UI on every classical purchase
pub const UI_FEE_RECIPIENT: Address = address!("0x0232556C83791b8291E9b23BfEa7d67405Bd9839");

/// Token contracts registered on a Djed contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinContracts {
	pub stable_coin: ContractHandle,
	pub reserve_coin: ContractHandle,
}

/// Arguments of a classical buy transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyRequest {
	pub payer: Address,
	pub receiver: Address,
	/// Base currency sent with the purchase
	pub value: U256,
	/// UI fee recipient
	pub ui: Address,
	/// Djed contract the purchase is sent to
	pub djed_address: Address,
}

/// Helper library for the classical protocol
///
/// Implementations own ABI encoding and the pricing math.
#[async_trait]
pub trait DjedLibrary: Send + Sync {
	async fn resolve_contract(
		&self,
		endpoint: &dyn Endpoint,
		address: Address,
	) -> Result<ContractHandle, RpcError>;

	async fn resolve_coin_contracts(
		&self,
		endpoint: &dyn Endpoint,
		djed: &ContractHandle,
	) -> Result<CoinContracts, RpcError>;

	async fn resolve_decimals(
		&self,
		endpoint: &dyn Endpoint,
		coins: &CoinContracts,
	) -> Result<DecimalsPair, RpcError>;

	async fn resolve_oracle_address(
		&self,
		endpoint: &dyn Endpoint,
		djed: &ContractHandle,
	) -> Result<Address, RpcError>;

	async fn resolve_oracle_contract(
		&self,
		endpoint: &dyn Endpoint,
		oracle: Address,
		djed: Address,
	) -> Result<ContractHandle, RpcError>;

	/// Price a stable-coin purchase of `amount_scaled` units
	async fn price_quote_for_buy(
		&self,
		endpoint: &dyn Endpoint,
		djed: &ContractHandle,
		stable_coin_decimals: u8,
		amount_scaled: U256,
	) -> Result<TradeData, RpcError>;

	async fn build_buy_transaction(
		&self,
		endpoint: &dyn Endpoint,
		djed: &ContractHandle,
		request: &BuyRequest,
	) -> Result<TransactionPayload, RpcError>;
}

/// Adapter running classical discovery through a [`DjedLibrary`]
pub struct DjedAdapter {
	library: Arc<dyn DjedLibrary>,
}

impl DjedAdapter {
	pub fn new(library: Arc<dyn DjedLibrary>) -> Self {
		Self { library }
	}
}

#[async_trait]
impl ProtocolAdapter for DjedAdapter {
	fn protocol(&self) -> ProtocolTag {
		ProtocolTag::Djed
	}

	async fn discover(
		&self,
		endpoint: Arc<dyn Endpoint>,
		target: &DiscoveryTarget,
	) -> Result<Deployment, RpcError> {
		let djed = self
			.library
			.resolve_contract(endpoint.as_ref(), target.contract_address)
			.await?;

		let coins = self
			.library
			.resolve_coin_contracts(endpoint.as_ref(), &djed)
			.await?;
		let decimals = self
			.library
			.resolve_decimals(endpoint.as_ref(), &coins)
			.await?;
		debug!(
			stable_coin = %coins.stable_coin.address,
			reserve_coin = %coins.reserve_coin.address,
			"Resolved Djed coin contracts"
		);

		let oracle_address = self
			.library
			.resolve_oracle_address(endpoint.as_ref(), &djed)
			.await?;
		let oracle = self
			.library
			.resolve_oracle_contract(endpoint.as_ref(), oracle_address, djed.address)
			.await?;
		debug!(oracle = %oracle.address, "Resolved Djed oracle");

		let market = DjedMarket {
			library: self.library.clone(),
			endpoint,
			djed,
			stable_coin_decimals: decimals.stable_coin,
			djed_address: target.contract_address,
		};

		Ok(Deployment {
			main_contract: djed,
			stable_coin: coins.stable_coin,
			reserve_coin: coins.reserve_coin,
			decimals,
			oracle: Oracle::Feed(oracle),
			router: None,
			market: Box::new(market),
		})
	}
}

struct DjedMarket {
	library: Arc<dyn DjedLibrary>,
	endpoint: Arc<dyn Endpoint>,
	djed: ContractHandle,
	stable_coin_decimals: u8,
	djed_address: Address,
}

#[async_trait]
impl StablecoinMarket for DjedMarket {
	async fn quote_stablecoin_purchase(&self, amount_scaled: U256) -> Result<String, RpcError> {
		let trade = self
			.library
			.price_quote_for_buy(
				self.endpoint.as_ref(),
				&self.djed,
				self.stable_coin_decimals,
				amount_scaled,
			)
			.await?;

		Ok(trade.total_bc_scaled)
	}

	async fn build_stablecoin_purchase(
		&self,
		payer: Address,
		receiver: Address,
		value: U256,
	) -> Result<TransactionPayload, RpcError> {
		let request = BuyRequest {
			payer,
			receiver,
			value,
			ui: UI_FEE_RECIPIENT,
			djed_address: self.djed_address,
		};

		self.library
			.build_buy_transaction(self.endpoint.as_ref(), &self.djed, &request)
			.await
	}
}
