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

//! Protocol tags and the dispatch table that maps them to adapters

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::adapters::{Backends, DjedAdapter, GluonAdapter, ProtocolAdapter};
use crate::error::StablepayError;

/// Stablecoin protocol identifier
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolTag {
	/// Classical reserve-ratio protocol with an external price oracle
	#[default]
	Djed,
	/// Dual-token fission/fusion protocol
	Gluon,
}

impl ProtocolTag {
	/// Human-readable protocol name used in diagnostics
	pub fn display_name(&self) -> &'static str {
		match self {
			ProtocolTag::Djed => "Djed",
			ProtocolTag::Gluon => "Gluon",
		}
	}
}

impl fmt::Display for ProtocolTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProtocolTag::Djed => f.write_str("djed"),
			ProtocolTag::Gluon => f.write_str("gluon"),
		}
	}
}

impl FromStr for ProtocolTag {
	type Err = StablepayError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"djed" => Ok(ProtocolTag::Djed),
			"gluon" => Ok(ProtocolTag::Gluon),
			_ => Err(StablepayError::UnsupportedProtocol(s.to_string())),
		}
	}
}

/// Discovery procedure run by `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitProcedure {
	/// Main contract, coin contracts, decimals, oracle address, oracle contract
	ClassicalDiscovery,
	/// Bind the Gluon library, then proton/neutron tokens and decimals
	GluonDiscovery,
}

impl fmt::Display for InitProcedure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			InitProcedure::ClassicalDiscovery => f.write_str("classical discovery"),
			InitProcedure::GluonDiscovery => f.write_str("gluon discovery"),
		}
	}
}

/// Stateless mapping from protocol tag to behavior
pub struct ProtocolResolver;

impl ProtocolResolver {
	pub fn select_initializer(tag: ProtocolTag) -> InitProcedure {
		match tag {
			ProtocolTag::Gluon => InitProcedure::GluonDiscovery,
			ProtocolTag::Djed => InitProcedure::ClassicalDiscovery,
		}
	}

	/// Build the adapter that discovers, quotes and builds purchases for `tag`
	pub fn select_adapter(tag: ProtocolTag, backends: &Backends) -> Box<dyn ProtocolAdapter> {
		match tag {
			ProtocolTag::Gluon => Box::new(GluonAdapter::new(backends.gluon.clone())),
			ProtocolTag::Djed => Box::new(DjedAdapter::new(backends.djed.clone())),
		}
	}
}
