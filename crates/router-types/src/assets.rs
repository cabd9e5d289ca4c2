//! Stable-asset registry for multi-chain deposits.
//!
//! Resolution consults two tables: a project-specific table that overrides
//! entries for the chains the project cares about, and a broad generic table
//! of well-known USDC deployments. Addresses are always looked up, never derived.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Well-known native USDC deployments, keyed by chain ID.
pub const GENERIC_STABLE_ASSETS: [(u64, Address); 7] = [
	(1, address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")),
	(10, address!("0b2C639c533813f4Aa9D7837CAf62653d097Ff85")),
	(56, address!("8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d")),
	(137, address!("3c499c542cEF5E3811e1192ce70d8cC03d5c3359")),
	(8453, address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913")),
	(42161, address!("af88d065e77c8cC2239327C5EDb3A432268e5831")),
	(43114, address!("B97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E")),
];

/// Errors that can occur while resolving a chain's stable asset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// Neither table has an entry for the chain.
	#[error("Stable asset not configured for chain {0}")]
	NotConfigured(u64),
}

/// Two-table registry of stable-asset addresses.
///
/// Both tables are immutable after construction, so a registry can be shared
/// freely between concurrent deposit flows.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
	/// Broad table of generic deployments.
	generic: HashMap<u64, Address>,
	/// Narrower project-specific table; wins over `generic`.
	project: HashMap<u64, Address>,
}

impl TokenRegistry {
	/// Creates a registry from explicit generic and project tables.
	pub fn new(generic: HashMap<u64, Address>, project: HashMap<u64, Address>) -> Self {
		Self { generic, project }
	}

	/// Creates a registry backed by [`GENERIC_STABLE_ASSETS`] with the given
	/// project overrides layered on top.
	pub fn with_project_overrides(project: HashMap<u64, Address>) -> Self {
		Self::new(GENERIC_STABLE_ASSETS.into_iter().collect(), project)
	}

	/// Resolves the stable asset for `chain_id`.
	///
	/// Prefers the project-specific entry and falls back to the generic one.
	pub fn resolve_asset(&self, chain_id: u64) -> Result<Address, RegistryError> {
		self.project
			.get(&chain_id)
			.or_else(|| self.generic.get(&chain_id))
			.copied()
			.ok_or(RegistryError::NotConfigured(chain_id))
	}
}

/// Deserializes a chain-keyed table from TOML.
///
/// TOML tables cannot have numeric keys, so chain IDs arrive as strings and
/// are converted to `u64` here.
pub fn deserialize_chain_map<'de, D, V>(deserializer: D) -> Result<HashMap<u64, V>, D::Error>
where
	D: Deserializer<'de>,
	V: Deserialize<'de>,
{
	let string_map: HashMap<String, V> = HashMap::deserialize(deserializer)?;
	let mut result = HashMap::with_capacity(string_map.len());

	for (key, value) in string_map {
		let chain_id = u64::from_str(&key)
			.map_err(|e| serde::de::Error::custom(format!("Invalid chain_id '{}': {}", key, e)))?;
		result.insert(chain_id, value);
	}

	Ok(result)
}
