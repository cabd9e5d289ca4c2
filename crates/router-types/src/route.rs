//! Route types returned by the quote provider.
//!
//! A route is an opaque multi-step execution plan. The router only reads a
//! handful of fields from it; every other field is kept in `extra` so the
//! route can be handed to the execution engine exactly as it was received.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::utils::{parse_base_units, parse_usd};

/// Tag the provider attaches to its preferred route.
pub const RECOMMENDED_TAG: &str = "RECOMMENDED";

/// Errors raised while normalizing a provider step into a route.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
	#[error("Quote step has no action")]
	MissingAction,
	#[error("Quote step has no estimate")]
	MissingEstimate,
	#[error("Quote step has no {0}")]
	MissingField(&'static str),
}

/// Token metadata as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
	pub address: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub chain_id: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub symbol: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub decimals: Option<u8>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(
		rename = "priceUSD",
		default,
		deserialize_with = "deserialize_lenient_number",
		skip_serializing_if = "Option::is_none"
	)]
	pub price_usd: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Display metadata of the bridge or exchange used by a step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDetails {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(
		rename = "logoURI",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub logo_uri: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// What a step does: move `from_token` on one chain to `to_token` on another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAction {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from_chain_id: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_chain_id: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from_token: Option<Token>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_token: Option<Token>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from_amount: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from_address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slippage: Option<f64>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A single fee charged by a step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCost {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<String>,
	#[serde(
		rename = "amountUSD",
		default,
		deserialize_with = "deserialize_lenient_number",
		skip_serializing_if = "Option::is_none"
	)]
	pub amount_usd: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub included: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token: Option<Token>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Gas spent by a step, e.g. `SEND` or `APPROVE`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCost {
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub gas_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<String>,
	#[serde(
		rename = "amountUSD",
		default,
		deserialize_with = "deserialize_lenient_number",
		skip_serializing_if = "Option::is_none"
	)]
	pub amount_usd: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token: Option<Token>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// The provider's cost and time estimate for a step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepEstimate {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tool: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub approval_address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from_amount: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_amount: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_amount_min: Option<String>,
	#[serde(
		rename = "fromAmountUSD",
		default,
		deserialize_with = "deserialize_lenient_number",
		skip_serializing_if = "Option::is_none"
	)]
	pub from_amount_usd: Option<String>,
	#[serde(
		rename = "toAmountUSD",
		default,
		deserialize_with = "deserialize_lenient_number",
		skip_serializing_if = "Option::is_none"
	)]
	pub to_amount_usd: Option<String>,
	/// Seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub execution_duration: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fee_costs: Option<Vec<FeeCost>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_costs: Option<Vec<GasCost>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub skip_approval: Option<bool>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// One step of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub step_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tool: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tool_details: Option<ToolDetails>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub action: Option<StepAction>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub estimate: Option<StepEstimate>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A complete, costed route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
	pub id: String,
	pub from_chain_id: u64,
	pub from_amount: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from_token: Option<Token>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from_address: Option<String>,
	pub to_chain_id: u64,
	pub to_amount: String,
	#[serde(default)]
	pub to_amount_min: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_token: Option<Token>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_address: Option<String>,
	#[serde(
		rename = "gasCostUSD",
		default,
		deserialize_with = "deserialize_lenient_number",
		skip_serializing_if = "Option::is_none"
	)]
	pub gas_cost_usd: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	#[serde(default)]
	pub steps: Vec<RouteStep>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Route {
	/// Normalizes a single quoted step into a one-step route.
	///
	/// The route-level gas cost is the sum of the step's gas costs in USD.
	pub fn from_step(step: RouteStep) -> Result<Self, RouteError> {
		let action = step.action.as_ref().ok_or(RouteError::MissingAction)?;
		let estimate = step.estimate.as_ref().ok_or(RouteError::MissingEstimate)?;

		let from_chain_id = action
			.from_chain_id
			.ok_or(RouteError::MissingField("fromChainId"))?;
		let to_chain_id = action
			.to_chain_id
			.ok_or(RouteError::MissingField("toChainId"))?;
		let to_amount = estimate
			.to_amount
			.clone()
			.ok_or(RouteError::MissingField("toAmount"))?;

		let from_amount = action
			.from_amount
			.clone()
			.or_else(|| estimate.from_amount.clone())
			.unwrap_or_default();

		let gas_cost_usd = estimate.gas_costs.as_ref().map(|costs| {
			costs
				.iter()
				.filter_map(|c| c.amount_usd.as_deref())
				.filter_map(parse_usd)
				.sum::<rust_decimal::Decimal>()
				.to_string()
		});

		let mut extra = Map::new();
		if let Some(usd) = &estimate.from_amount_usd {
			extra.insert("fromAmountUSD".into(), Value::String(usd.clone()));
		}
		if let Some(usd) = &estimate.to_amount_usd {
			extra.insert("toAmountUSD".into(), Value::String(usd.clone()));
		}

		Ok(Route {
			id: step.id.clone().unwrap_or_default(),
			from_chain_id,
			from_amount,
			from_token: action.from_token.clone(),
			from_address: action.from_address.clone(),
			to_chain_id,
			to_amount,
			to_amount_min: estimate.to_amount_min.clone().unwrap_or_default(),
			to_token: action.to_token.clone(),
			to_address: action.to_address.clone(),
			gas_cost_usd,
			tags: None,
			steps: vec![step],
			extra,
		})
	}

	pub fn first_step(&self) -> Option<&RouteStep> {
		self.steps.first()
	}

	/// Execution duration of the first step in seconds; 0 when unknown.
	pub fn first_step_duration(&self) -> f64 {
		self.first_step()
			.and_then(|s| s.estimate.as_ref())
			.and_then(|e| e.execution_duration)
			.unwrap_or(0.0)
	}

	/// Destination amount as an integer; unparseable amounts count as zero.
	pub fn to_amount_value(&self) -> U256 {
		parse_base_units(&self.to_amount).unwrap_or(U256::ZERO)
	}

	pub fn has_tag(&self, tag: &str) -> bool {
		self.tags
			.as_ref()
			.is_some_and(|tags| tags.iter().any(|t| t == tag))
	}
}

/// Accepts a JSON string or number and keeps it as a string.
///
/// USD amounts are documented as strings but some endpoints emit numbers.
fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	match value {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(s)) => Ok(Some(s)),
		Some(Value::Number(n)) => Ok(Some(n.to_string())),
		Some(other) => Err(serde::de::Error::custom(format!(
			"expected string or number, got {}",
			other
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn quote_step() -> RouteStep {
		serde_json::from_value(json!({
			"id": "quote-1",
			"type": "lifi",
			"tool": "across",
			"toolDetails": {"key": "across", "name": "Across", "logoURI": "https://x/across.svg"},
			"action": {
				"fromChainId": 42161,
				"toChainId": 8453,
				"fromAmount": "1000000",
				"fromToken": {"address": "0xaf88d065e77c8cC2239327C5EDb3A432268e5831", "symbol": "USDC", "decimals": 6},
				"toToken": {"address": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913", "symbol": "USDC", "decimals": 6},
				"fromAddress": "0x00000000000000000000000000000000000000aa"
			},
			"estimate": {
				"toAmount": "998000",
				"toAmountMin": "995000",
				"executionDuration": 45,
				"gasCosts": [
					{"type": "SEND", "amountUSD": "0.10"},
					{"type": "APPROVE", "amountUSD": 0.05}
				],
				"fromAmountUSD": "1.00"
			},
			"transactionRequest": {"to": "0x1231DEB6f5749EF6cE6943a275A1D3E7486F4EaE", "data": "0x"}
		}))
		.unwrap()
	}

	#[test]
	fn test_from_step_normalizes() {
		let route = Route::from_step(quote_step()).unwrap();
		assert_eq!(route.id, "quote-1");
		assert_eq!(route.from_chain_id, 42161);
		assert_eq!(route.to_chain_id, 8453);
		assert_eq!(route.from_amount, "1000000");
		assert_eq!(route.to_amount, "998000");
		assert_eq!(route.to_amount_min, "995000");
		assert_eq!(route.gas_cost_usd.as_deref(), Some("0.15"));
		assert_eq!(route.steps.len(), 1);
		assert_eq!(route.first_step_duration(), 45.0);
	}

	#[test]
	fn test_from_step_sums_scientific_gas() {
		let mut step = quote_step();
		if let Some(estimate) = step.estimate.as_mut() {
			estimate.gas_costs = serde_json::from_value(json!([
				{"type": "SEND", "amountUSD": "0.1"},
				{"type": "SEND", "amountUSD": "4e-3"}
			]))
			.unwrap();
		}
		let route = Route::from_step(step).unwrap();
		assert_eq!(route.gas_cost_usd.as_deref(), Some("0.104"));
	}

	#[test]
	fn test_from_step_requires_estimate() {
		let mut step = quote_step();
		step.estimate = None;
		assert_eq!(Route::from_step(step), Err(RouteError::MissingEstimate));

		let mut step = quote_step();
		step.action = None;
		assert_eq!(Route::from_step(step), Err(RouteError::MissingAction));
	}

	#[test]
	fn test_unknown_fields_round_trip() {
		let step = quote_step();
		let value = serde_json::to_value(&step).unwrap();
		assert_eq!(
			value["transactionRequest"]["to"],
			"0x1231DEB6f5749EF6cE6943a275A1D3E7486F4EaE"
		);

		let route = Route::from_step(step).unwrap();
		let value = serde_json::to_value(&route).unwrap();
		assert_eq!(value["gasCostUSD"], "0.15");
		assert_eq!(value["fromAmountUSD"], "1.00");
		assert_eq!(value["steps"][0]["toolDetails"]["logoURI"], "https://x/across.svg");
	}

	#[test]
	fn test_to_amount_value() {
		let mut route = Route {
			to_amount: "123456789012345678901234567890".into(),
			..Default::default()
		};
		assert_eq!(
			route.to_amount_value().to_string(),
			"123456789012345678901234567890"
		);
		route.to_amount = "garbage".into();
		assert_eq!(route.to_amount_value(), U256::ZERO);
	}

	#[test]
	fn test_tags() {
		let route: Route = serde_json::from_value(json!({
			"id": "r",
			"fromChainId": 1,
			"fromAmount": "1",
			"toChainId": 8453,
			"toAmount": "1",
			"tags": ["RECOMMENDED", "CHEAPEST"],
			"steps": []
		}))
		.unwrap();
		assert!(route.has_tag(RECOMMENDED_TAG));
		assert!(!route.has_tag("FASTEST"));
		assert_eq!(route.first_step_duration(), 0.0);
	}
}
