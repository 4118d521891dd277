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

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::protocol::ProtocolTag;

/// Placeholder reported for addresses that are absent or not applicable
pub const NOT_AVAILABLE: &str = "N/A";

/// Reference to a deployed contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractHandle {
	/// On-chain address
	pub address: Address,
}

impl ContractHandle {
	pub fn new(address: Address) -> Self {
		Self { address }
	}
}

/// Decimal exponents of the stable-coin and reserve-coin tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalsPair {
	pub stable_coin: u8,
	pub reserve_coin: u8,
}

/// Price oracle dependency of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oracle {
	/// External price feed contract
	Feed(ContractHandle),
	/// The protocol prices without an external oracle
	NotApplicable,
}

impl Oracle {
	pub fn address(&self) -> Option<Address> {
		match self {
			Oracle::Feed(contract) => Some(contract.address),
			Oracle::NotApplicable => None,
		}
	}

	pub fn contract(&self) -> Option<&ContractHandle> {
		match self {
			Oracle::Feed(contract) => Some(contract),
			Oracle::NotApplicable => None,
		}
	}
}

/// Unsigned transaction ready to be signed and sent by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
	/// Sender
	pub from: Address,
	/// Contract being called
	pub to: Address,
	/// Base currency attached to the call
	pub value: U256,
	/// ABI-encoded calldata
	pub data: Bytes,
}

/// Pricing result of the classical protocol's buy quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeData {
	/// Requested stable-coin amount, scaled
	pub amount_scaled: String,
	/// Base currency required including fees, scaled
	pub total_bc_scaled: String,
	/// Base currency required including fees, human-readable
	pub total_bc_unscaled: String,
}

/// Snapshot of a transaction handle's discovered state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainDetails {
	pub protocol: ProtocolTag,
	pub endpoint_available: bool,
	pub main_contract_available: bool,
	pub stable_coin_address: String,
	pub reserve_coin_address: String,
	pub stable_coin_decimals: Option<u8>,
	pub reserve_coin_decimals: Option<u8>,
	pub oracle_address: String,
	pub oracle_contract_available: bool,
}
