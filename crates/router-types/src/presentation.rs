//! Presentation views derived from quoted routes.
//!
//! These are plain records; the functions that compute them live in the core
//! crate and never touch the network.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indices into a caller-supplied list of routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRankings {
	/// Route with the lowest first-step execution time.
	pub fastest_index: usize,
	/// Route with the highest destination amount.
	pub cheapest_index: usize,
	/// Route with the fewest steps.
	pub simplest_index: usize,
	/// Provider-tagged route, or the cheapest one.
	pub recommended_index: usize,
}

/// Classification of a fee line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeKind {
	Bridge,
	Swap,
	Gas,
	Integrator,
	Other,
}

/// One line of a route's fee breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdownLine {
	pub label: String,
	/// Rendered as `$X.XXXX`.
	#[serde(rename = "amountUSD")]
	pub amount_usd: String,
	#[serde(rename = "type")]
	pub kind: FeeKind,
}

/// Badge shown next to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteLabel {
	Recommended,
	Fastest,
	Cheapest,
	Simplest,
}

impl fmt::Display for RouteLabel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			RouteLabel::Recommended => "Recommended",
			RouteLabel::Fastest => "Fastest",
			RouteLabel::Cheapest => "Cheapest",
			RouteLabel::Simplest => "Simplest",
		};
		write!(f, "{}", label)
	}
}

/// Whether the first step needs a token approval, and for whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalInfo {
	pub required: bool,
	pub token_symbol: String,
	/// Shortened for display, e.g. `0x1231…4EaE`.
	pub spender_address: String,
	pub amount: String,
}

impl Default for ApprovalInfo {
	fn default() -> Self {
		Self {
			required: false,
			token_symbol: "USDC".to_string(),
			spender_address: String::new(),
			amount: String::new(),
		}
	}
}

/// Flattened view of a single route step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDetail {
	#[serde(rename = "type")]
	pub step_type: String,
	pub from_chain_id: u64,
	pub to_chain_id: u64,
	pub token_in: String,
	pub token_out: String,
	pub tool_name: String,
	pub tool_key: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub execution_duration_sec: Option<f64>,
}
