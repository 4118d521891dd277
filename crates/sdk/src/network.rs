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

//! Best-effort network identification for diagnostics
//!
//! Only used to word error messages. Nothing branches on the result.

/// Name used when the URI matches no known network
pub const UNKNOWN_NETWORK_NAME: &str = "the selected network";

/// Chain ID label used when the URI matches no known network
pub const UNKNOWN_CHAIN_ID: &str = "unknown";

/// URI substring -> (display name, chain ID)
const KNOWN_NETWORKS: &[(&str, &str, u64)] = &[
	("milkomeda", "Milkomeda", 2001),
	("mordor", "Mordor Testnet", 63),
	("sepolia", "Sepolia", 11155111),
	("etc.rivet.link", "Ethereum Classic", 61),
];

/// Network identified from an endpoint URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInfo {
	pub name: &'static str,
	pub chain_id: Option<u64>,
}

impl NetworkInfo {
	/// Chain ID as shown to users, `"unknown"` when not identified
	pub fn chain_id_label(&self) -> String {
		self.chain_id
			.map(|id| id.to_string())
			.unwrap_or_else(|| UNKNOWN_CHAIN_ID.to_string())
	}
}

/// Identify the network an endpoint URI most likely points at
pub fn describe_network(uri: &str) -> NetworkInfo {
	let uri = uri.to_ascii_lowercase();
	KNOWN_NETWORKS
		.iter()
		.find(|(needle, _, _)| uri.contains(needle))
		.map(|&(_, name, chain_id)| NetworkInfo {
			name,
			chain_id: Some(chain_id),
		})
		.unwrap_or(NetworkInfo {
			name: UNKNOWN_NETWORK_NAME,
			chain_id: None,
		})
}
