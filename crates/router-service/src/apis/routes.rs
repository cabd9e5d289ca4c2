//! Route discovery, status relay, tool metadata and yields.

use router_config::Config;
use router_core::{BridgeToSelfParams, DepositError, DepositRouter, RoutesView};
use router_types::{Address, ToolInfo};
use serde::Deserialize;

use crate::error::APIError;

/// Body of `POST /api/routes`.
///
/// The destination chain defaults to the configured one and the recipient to
/// the sender.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesRequestBody {
	pub from_chain_id: u64,
	#[serde(default)]
	pub to_chain_id: Option<u64>,
	pub from_amount: String,
	pub from_address: Address,
	#[serde(default)]
	pub to_address: Option<Address>,
}

impl RoutesRequestBody {
	pub fn into_params(self, default_to_chain: u64) -> BridgeToSelfParams {
		BridgeToSelfParams {
			from_chain_id: self.from_chain_id,
			to_chain_id: self.to_chain_id.unwrap_or(default_to_chain),
			from_amount: self.from_amount,
			from_address: self.from_address,
			to_address: self.to_address.unwrap_or(self.from_address),
		}
	}
}

pub async fn process_routes_request(
	body: RoutesRequestBody,
	router: &DepositRouter,
	config: &Config,
) -> Result<RoutesView, DepositError> {
	let params = body.into_params(config.destination.chain_id);
	router.bridge_to_self(&params).await
}

/// Looks up a bridge or exchange; unknown keys are a 404.
pub async fn get_tool(key: &str, router: &DepositRouter) -> Result<ToolInfo, APIError> {
	router
		.tool(key)
		.await?
		.ok_or_else(|| APIError::NotFound {
			error_type: "TOOL_NOT_FOUND".into(),
			message: format!("No bridge or exchange with key '{}'", key),
		})
}
