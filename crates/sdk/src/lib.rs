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

//! StablePay SDK - protocol-agnostic stablecoin purchases
//!
//! A [`TransactionHandle`] resolves one configured contract address into a
//! ready-to-use deployment (token contracts, decimals, oracle) of either the
//! classical Djed protocol or the dual-token Gluon protocol, then quotes and
//! builds purchase transactions through one interface.
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads
//! - No signing or broadcasting; transactions are returned unsigned
//! - Protocol helper libraries and the endpoint are pluggable via [`Backends`]

pub mod adapters;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod protocol;
pub mod rpc;
pub mod transaction;
pub mod types;

pub use adapters::{
	Backends, Deployment, DiscoveryTarget, DjedLibrary, GluonLibrary, GluonProtocol,
	ProtocolAdapter, StablecoinMarket, UI_FEE_RECIPIENT,
};
pub use config::StablepayConfig;
pub use error::{Result, StablepayError};
pub use network::{NetworkInfo, describe_network};
pub use protocol::{InitProcedure, ProtocolResolver, ProtocolTag};
pub use rpc::{Connector, Endpoint, HttpConnector, HttpEndpoint, RpcError};
pub use transaction::TransactionHandle;
pub use types::*;
