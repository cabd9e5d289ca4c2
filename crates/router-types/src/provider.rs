//! Request and response shapes of the bridge/quote provider boundary.
//!
//! Field names follow the provider's wire format so the same types can be
//! used both by the REST client and by the HTTP API.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::deposit::ContractCallSpec;
use crate::route::Route;

/// Slippage tolerance for the contract-calls quote.
pub const CONTRACT_CALLS_SLIPPAGE: f64 = 0.003;

/// Slippage tolerance for plain bridge-to-self routes.
pub const BRIDGE_TO_SELF_SLIPPAGE: f64 = 0.03;

/// Bridge-only estimate request (no destination call).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeEstimateRequest {
	pub from_chain: u64,
	pub to_chain: u64,
	pub from_token: Address,
	pub to_token: Address,
	pub from_amount: String,
	pub from_address: Address,
	pub to_address: Address,
}

/// Quote request that bundles destination contract calls with the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCallsQuoteRequest {
	pub from_chain: u64,
	pub from_token: Address,
	pub from_address: Address,
	pub from_amount: String,
	pub to_chain: u64,
	pub to_token: Address,
	pub contract_calls: Vec<ContractCallSpec>,
	/// Receives the funds if the destination call reverts.
	pub to_fallback_address: Address,
	pub slippage: f64,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub deny_exchanges: Vec<String>,
}

/// Ordering preference for route discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteOrder {
	Recommended,
	Fastest,
	Cheapest,
	Safest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptions {
	pub order: RouteOrder,
	pub slippage: f64,
	pub allow_switch_chain: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub integrator: Option<String>,
}

impl Default for RouteOptions {
	fn default() -> Self {
		Self {
			order: RouteOrder::Cheapest,
			slippage: BRIDGE_TO_SELF_SLIPPAGE,
			allow_switch_chain: false,
			integrator: None,
		}
	}
}

/// Multi-route discovery request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesRequest {
	pub from_chain_id: u64,
	pub from_amount: String,
	pub from_token_address: Address,
	pub from_address: Address,
	pub to_chain_id: u64,
	pub to_token_address: Address,
	pub to_address: Address,
	pub options: RouteOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesResponse {
	#[serde(default)]
	pub routes: Vec<Route>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unavailable_routes: Option<Value>,
}

/// Transfer status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
	pub tx_hash: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bridge: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from_chain: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_chain: Option<u64>,
}

/// Transfer status as reported by the provider; relayed without interpretation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub substatus: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub substatus_message: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Bridge or exchange metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
	pub key: String,
	pub name: String,
	#[serde(rename = "logoURI", default)]
	pub logo_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsResponse {
	#[serde(default)]
	pub bridges: Vec<ToolInfo>,
	#[serde(default)]
	pub exchanges: Vec<ToolInfo>,
}
