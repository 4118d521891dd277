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

//! Recording test doubles for the SDK's external collaborators

#![allow(dead_code)]

use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use alloy_primitives::{Address, Bytes, U256, address};
use async_trait::async_trait;
use stablepay_sdk::adapters::{
	BuyRequest, CoinContracts, GluonDecimals, GluonLibrary, GluonProtocol, GluonTokens,
};
use stablepay_sdk::{
	Backends, Connector, ContractHandle, DecimalsPair, DjedLibrary, Endpoint, ProtocolTag,
	RpcError, TradeData, TransactionHandle, TransactionPayload,
};

pub const SEPOLIA_URI: &str = "https://ethereum-sepolia.publicnode.com";
pub const MORDOR_URI: &str = "https://rpc.mordor.etccooperative.org";

pub const DJED_ADDRESS: &str = "0x00000000000000000000000000000000000000d1";
pub const GLUON_ADDRESS: &str = "0x00000000000000000000000000000000000000a1";
pub const ROUTER_ADDRESS: &str = "0x00000000000000000000000000000000000000a2";

pub const STABLE_COIN: Address = address!("0x0000000000000000000000000000000000000051");
pub const RESERVE_COIN: Address = address!("0x0000000000000000000000000000000000000052");
pub const ORACLE: Address = address!("0x00000000000000000000000000000000000000c0");
pub const NEUTRON: Address = address!("0x00000000000000000000000000000000000000e1");
pub const PROTON: Address = address!("0x00000000000000000000000000000000000000e2");

pub const PAYER: Address = address!("0x1111111111111111111111111111111111111111");
pub const RECEIVER: Address = address!("0x2222222222222222222222222222222222222222");

/// Base currency per scaled stable-coin unit returned by [`MockDjed`] quotes
pub const DJED_PRICE: u64 = 1_500_000_000_000;

const WAD: u64 = 1_000_000_000_000_000_000;

pub fn addr(value: &str) -> Address {
	value.parse().unwrap()
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

pub struct MockEndpoint {
	uri: String,
}

#[async_trait]
impl Endpoint for MockEndpoint {
	fn uri(&self) -> &str {
		&self.uri
	}

	fn chain_id(&self) -> Option<u64> {
		None
	}

	async fn call(&self, _to: Address, _data: Bytes) -> Result<Bytes, RpcError> {
		Err(RpcError::Other(
			"eth_call is not supported by the mock endpoint".to_string(),
		))
	}
}

#[derive(Default)]
pub struct MockConnector {
	failure: Option<RpcError>,
	connects: AtomicUsize,
}

impl MockConnector {
	pub fn healthy() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn failing(error: RpcError) -> Arc<Self> {
		Arc::new(Self {
			failure: Some(error),
			connects: AtomicUsize::new(0),
		})
	}

	pub fn connect_count(&self) -> usize {
		self.connects.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Connector for MockConnector {
	async fn connect(&self, uri: &str) -> Result<Arc<dyn Endpoint>, RpcError> {
		self.connects.fetch_add(1, Ordering::SeqCst);
		if let Some(error) = &self.failure {
			return Err(error.clone());
		}
		Ok(Arc::new(MockEndpoint {
			uri: uri.to_string(),
		}))
	}
}

// ---------------------------------------------------------------------------
// Djed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DjedStep {
	ResolveContract,
	CoinContracts,
	Decimals,
	OracleAddress,
	OracleContract,
	PriceQuote,
	BuildBuy,
}

/// Djed library double that records every call
///
/// A configured failure fires once, the first time its step is reached.
#[derive(Default)]
pub struct MockDjed {
	calls: Mutex<Vec<DjedStep>>,
	failure: Mutex<Option<(DjedStep, RpcError)>>,
	quotes: Mutex<Vec<(u8, U256)>>,
	buy_requests: Mutex<Vec<BuyRequest>>,
}

impl MockDjed {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn failing_at(step: DjedStep, error: RpcError) -> Arc<Self> {
		let mock = Self::default();
		*mock.failure.lock().unwrap() = Some((step, error));
		Arc::new(mock)
	}

	pub fn calls(&self) -> Vec<DjedStep> {
		self.calls.lock().unwrap().clone()
	}

	pub fn quotes(&self) -> Vec<(u8, U256)> {
		self.quotes.lock().unwrap().clone()
	}

	pub fn buy_requests(&self) -> Vec<BuyRequest> {
		self.buy_requests.lock().unwrap().clone()
	}

	fn record(&self, step: DjedStep) -> Result<(), RpcError> {
		self.calls.lock().unwrap().push(step);
		let mut failure = self.failure.lock().unwrap();
		if matches!(&*failure, Some((failing, _)) if *failing == step) {
			let (_, error) = failure.take().unwrap();
			return Err(error);
		}
		Ok(())
	}
}

#[async_trait]
impl DjedLibrary for MockDjed {
	async fn resolve_contract(
		&self,
		_endpoint: &dyn Endpoint,
		address: Address,
	) -> Result<ContractHandle, RpcError> {
		self.record(DjedStep::ResolveContract)?;
		Ok(ContractHandle::new(address))
	}

	async fn resolve_coin_contracts(
		&self,
		_endpoint: &dyn Endpoint,
		_djed: &ContractHandle,
	) -> Result<CoinContracts, RpcError> {
		self.record(DjedStep::CoinContracts)?;
		Ok(CoinContracts {
			stable_coin: ContractHandle::new(STABLE_COIN),
			reserve_coin: ContractHandle::new(RESERVE_COIN),
		})
	}

	async fn resolve_decimals(
		&self,
		_endpoint: &dyn Endpoint,
		_coins: &CoinContracts,
	) -> Result<DecimalsPair, RpcError> {
		self.record(DjedStep::Decimals)?;
		Ok(DecimalsPair {
			stable_coin: 6,
			reserve_coin: 18,
		})
	}

	async fn resolve_oracle_address(
		&self,
		_endpoint: &dyn Endpoint,
		_djed: &ContractHandle,
	) -> Result<Address, RpcError> {
		self.record(DjedStep::OracleAddress)?;
		Ok(ORACLE)
	}

	async fn resolve_oracle_contract(
		&self,
		_endpoint: &dyn Endpoint,
		oracle: Address,
		_djed: Address,
	) -> Result<ContractHandle, RpcError> {
		self.record(DjedStep::OracleContract)?;
		Ok(ContractHandle::new(oracle))
	}

	async fn price_quote_for_buy(
		&self,
		_endpoint: &dyn Endpoint,
		_djed: &ContractHandle,
		stable_coin_decimals: u8,
		amount_scaled: U256,
	) -> Result<TradeData, RpcError> {
		self.record(DjedStep::PriceQuote)?;
		self.quotes
			.lock()
			.unwrap()
			.push((stable_coin_decimals, amount_scaled));

		let total = amount_scaled * U256::from(DJED_PRICE);
		Ok(TradeData {
			amount_scaled: amount_scaled.to_string(),
			total_bc_scaled: total.to_string(),
			total_bc_unscaled: (total / U256::from(WAD)).to_string(),
		})
	}

	async fn build_buy_transaction(
		&self,
		_endpoint: &dyn Endpoint,
		djed: &ContractHandle,
		request: &BuyRequest,
	) -> Result<TransactionPayload, RpcError> {
		self.record(DjedStep::BuildBuy)?;
		self.buy_requests.lock().unwrap().push(*request);

		Ok(TransactionPayload {
			from: request.payer,
			to: djed.address,
			value: request.value,
			data: Bytes::from(request.receiver.to_vec()),
		})
	}
}

// ---------------------------------------------------------------------------
// Gluon
// ---------------------------------------------------------------------------

/// Chain state shared by every protocol instance a [`MockGluon`] binds
pub struct GluonState {
	pub reserve: U256,
	pub neutron_supply: U256,
	pub fission_fee: U256,
	pub reads: AtomicUsize,
	pub discovery_failure: Mutex<Option<RpcError>>,
	pub read_failure: Mutex<Option<RpcError>>,
	pub binds: Mutex<Vec<(Address, Option<Address>)>>,
	pub fissions: Mutex<Vec<(Address, U256, Address)>>,
}

impl Default for GluonState {
	fn default() -> Self {
		Self {
			// 500 base currency backing 1000 neutrons, 0.5% fission fee
			reserve: U256::from(500u64) * U256::from(WAD),
			neutron_supply: U256::from(1_000u64) * U256::from(WAD),
			fission_fee: U256::from(5_000_000_000_000_000u64),
			reads: AtomicUsize::new(0),
			discovery_failure: Mutex::new(None),
			read_failure: Mutex::new(None),
			binds: Mutex::new(Vec::new()),
			fissions: Mutex::new(Vec::new()),
		}
	}
}

#[derive(Default)]
pub struct MockGluon {
	pub state: Arc<GluonState>,
}

impl MockGluon {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn with_state(state: GluonState) -> Arc<Self> {
		Arc::new(Self {
			state: Arc::new(state),
		})
	}

	pub fn read_count(&self) -> usize {
		self.state.reads.load(Ordering::SeqCst)
	}
}

impl GluonLibrary for MockGluon {
	fn bind(
		&self,
		_endpoint: Arc<dyn Endpoint>,
		address: Address,
		router: Option<Address>,
	) -> Result<Arc<dyn GluonProtocol>, RpcError> {
		self.state.binds.lock().unwrap().push((address, router));
		Ok(Arc::new(MockGluonProtocol {
			address,
			router,
			state: self.state.clone(),
		}))
	}
}

pub struct MockGluonProtocol {
	address: Address,
	router: Option<Address>,
	state: Arc<GluonState>,
}

impl MockGluonProtocol {
	fn read(&self, value: U256) -> Result<U256, RpcError> {
		self.state.reads.fetch_add(1, Ordering::SeqCst);
		match self.state.read_failure.lock().unwrap().clone() {
			Some(error) => Err(error),
			None => Ok(value),
		}
	}
}

#[async_trait]
impl GluonProtocol for MockGluonProtocol {
	fn contract(&self) -> ContractHandle {
		ContractHandle::new(self.address)
	}

	fn router(&self) -> Option<ContractHandle> {
		self.router.map(ContractHandle::new)
	}

	async fn resolve_coin_contracts(&self) -> Result<GluonTokens, RpcError> {
		if let Some(error) = self.state.discovery_failure.lock().unwrap().take() {
			return Err(error);
		}
		Ok(GluonTokens {
			proton: ContractHandle::new(PROTON),
			neutron: ContractHandle::new(NEUTRON),
		})
	}

	async fn resolve_decimals(&self, _tokens: &GluonTokens) -> Result<GluonDecimals, RpcError> {
		Ok(GluonDecimals {
			proton: 18,
			neutron: 12,
		})
	}

	async fn reserve(&self) -> Result<U256, RpcError> {
		self.read(self.state.reserve)
	}

	async fn total_supply(&self, token: &ContractHandle) -> Result<U256, RpcError> {
		assert_eq!(token.address, NEUTRON, "quotes read the neutron supply");
		self.read(self.state.neutron_supply)
	}

	async fn fission_fee(&self) -> Result<U256, RpcError> {
		self.read(self.state.fission_fee)
	}

	fn compute_required_input_for_output(
		&self,
		amount: U256,
		reserve: U256,
		neutron_supply: U256,
		fission_fee: U256,
	) -> Result<U256, RpcError> {
		let wad = U256::from(WAD);
		let denominator = neutron_supply * (wad - fission_fee);
		if denominator.is_zero() {
			return Err(RpcError::Other("neutron supply is zero".to_string()));
		}
		Ok(amount * reserve * wad / denominator)
	}

	async fn build_fission_transaction(
		&self,
		payer: Address,
		value: U256,
		receiver: Address,
	) -> Result<TransactionPayload, RpcError> {
		self.state
			.fissions
			.lock()
			.unwrap()
			.push((payer, value, receiver));

		Ok(TransactionPayload {
			from: payer,
			to: self.router.unwrap_or(self.address),
			value,
			data: Bytes::from(receiver.to_vec()),
		})
	}
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

pub fn backends(
	connector: Arc<MockConnector>,
	djed: Arc<MockDjed>,
	gluon: Arc<MockGluon>,
) -> Backends {
	Backends::new(connector, djed, gluon)
}

pub fn djed_handle(uri: &str, backends: &Backends) -> TransactionHandle {
	TransactionHandle::new(uri, DJED_ADDRESS, ProtocolTag::Djed, None, backends)
}

pub fn gluon_handle(uri: &str, backends: &Backends) -> TransactionHandle {
	TransactionHandle::new(
		uri,
		GLUON_ADDRESS,
		ProtocolTag::Gluon,
		Some(ROUTER_ADDRESS.to_string()),
		backends,
	)
}
