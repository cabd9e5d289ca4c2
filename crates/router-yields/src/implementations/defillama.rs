//! DefiLlama yields implementation.
//!
//! Reads `/pools` and keeps the USDC lending pools of Aave V3, Morpho and
//! Compound V3 on Ethereum. When a protocol has several matching pools the one
//! with the highest TVL wins.

use crate::{YieldError, YieldFeedInterface, YieldRates};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

const ETHEREUM_CHAINS: [&str; 2] = ["Ethereum", "ethereum"];

/// Longest symbol accepted for Morpho vaults; longer ones are exotic wrappers.
const MORPHO_MAX_SYMBOL_LEN: usize = 20;

/// A pool entry of the `/pools` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
	#[serde(default)]
	pub pool: Option<String>,
	#[serde(default)]
	pub chain: Option<String>,
	#[serde(default)]
	pub project: Option<String>,
	#[serde(default)]
	pub symbol: Option<String>,
	#[serde(default)]
	pub tvl_usd: Option<f64>,
	#[serde(default)]
	pub apy: Option<f64>,
	#[serde(default)]
	pub apy_base: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PoolsResponse {
	#[serde(default)]
	data: Vec<Pool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Protocol {
	Aave,
	Morpho,
	Compound,
}

impl Protocol {
	fn from_project(project: &str) -> Option<Self> {
		match project.to_lowercase().as_str() {
			"aave-v3" => Some(Protocol::Aave),
			"morpho-v1" | "morpho-blue" => Some(Protocol::Morpho),
			"compound-v3" => Some(Protocol::Compound),
			_ => None,
		}
	}

	fn name(self) -> &'static str {
		match self {
			Protocol::Aave => "Aave",
			Protocol::Morpho => "Morpho",
			Protocol::Compound => "Compound",
		}
	}

	fn accepts_symbol(self, symbol: &str) -> bool {
		match self {
			Protocol::Morpho => {
				let upper = symbol.to_uppercase();
				upper.contains("USDC") && upper.chars().count() <= MORPHO_MAX_SYMBOL_LEN
			},
			Protocol::Aave | Protocol::Compound => {
				matches!(
					symbol.trim().to_uppercase().as_str(),
					"USDC" | "USDC.E" | "USDBC"
				)
			},
		}
	}
}

/// Picks the best USDC lending rate per protocol from a pools listing.
pub fn select_usdc_yields(pools: &[Pool]) -> YieldRates {
	let mut best: HashMap<Protocol, (f64, f64)> = HashMap::new();

	for pool in pools {
		let chain = pool.chain.as_deref().unwrap_or_default();
		if !ETHEREUM_CHAINS.contains(&chain) {
			continue;
		}

		let Some(protocol) = Protocol::from_project(pool.project.as_deref().unwrap_or_default())
		else {
			continue;
		};

		if !protocol.accepts_symbol(pool.symbol.as_deref().unwrap_or_default()) {
			continue;
		}

		let apy = pool.apy.or(pool.apy_base).unwrap_or(0.0);
		let tvl = pool.tvl_usd.unwrap_or(0.0);
		if protocol == Protocol::Morpho && apy <= 0.0 {
			continue;
		}

		match best.get(&protocol) {
			Some((_, existing_tvl)) if tvl <= *existing_tvl => {},
			_ => {
				best.insert(protocol, (apy, tvl));
			},
		}
	}

	best.into_iter()
		.map(|(protocol, (apy, _))| (protocol.name().to_string(), format!("{:.2}%", apy)))
		.collect()
}

/// Yield feed backed by the DefiLlama yields API.
pub struct DefiLlamaYieldFeed {
	client: Client,
	url: String,
}

impl DefiLlamaYieldFeed {
	pub fn new(url: &str) -> Result<Self, YieldError> {
		let client = Client::builder()
			.timeout(std::time::Duration::from_secs(30))
			.build()?;
		Ok(Self {
			client,
			url: url.to_string(),
		})
	}
}

#[async_trait]
impl YieldFeedInterface for DefiLlamaYieldFeed {
	async fn fetch_yields(&self) -> Result<YieldRates, YieldError> {
		let response = self.client.get(&self.url).send().await?;
		if !response.status().is_success() {
			return Err(YieldError::HttpStatus(response.status().as_u16()));
		}

		let body: PoolsResponse = response
			.json()
			.await
			.map_err(|e| YieldError::InvalidResponse(format!("Failed to parse pools: {}", e)))?;

		Ok(select_usdc_yields(&body.data))
	}
}
