//! Plain bridge routes to the user's own address.
//!
//! Used to compare bridges without a destination call. Each returned route is
//! decorated with everything a route picker needs to render it.

use router_quote::QuoteProviderInterface;
use router_types::{
	parse_base_units, Address, ApprovalInfo, FeeBreakdownLine, Route, RouteLabel, RouteOptions,
	RouteRankings, RoutesRequest, StatusRequest, StatusResponse, StepDetail, TokenRegistry,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::fees::{fee_breakdown, total_fees_usd};
use crate::presentation::{approval_info, step_details};
use crate::ranking::{compute_rankings, route_explanation, route_labels};
use crate::DepositError;

/// Parameters of a bridge-to-self request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeToSelfParams {
	pub from_chain_id: u64,
	pub to_chain_id: u64,
	pub from_amount: String,
	pub from_address: Address,
	pub to_address: Address,
}

/// A route together with its presentation data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteView {
	pub route: Route,
	pub labels: Vec<RouteLabel>,
	pub explanation: String,
	pub fee_breakdown: Vec<FeeBreakdownLine>,
	#[serde(rename = "totalFeesUSD")]
	pub total_fees_usd: String,
	pub approval: ApprovalInfo,
	pub step_details: Vec<StepDetail>,
}

/// Ranked, decorated routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesView {
	pub routes: Vec<RouteView>,
	pub rankings: RouteRankings,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unavailable_routes: Option<Value>,
}

impl RoutesView {
	/// Ranks `routes` and attaches labels, fees, approval and step details.
	pub fn decorate(routes: Vec<Route>, unavailable_routes: Option<Value>) -> Self {
		let rankings = compute_rankings(&routes);
		let routes = routes
			.into_iter()
			.enumerate()
			.map(|(index, route)| RouteView {
				labels: route_labels(index, &rankings),
				explanation: route_explanation(index, &rankings).to_string(),
				fee_breakdown: fee_breakdown(&route),
				total_fees_usd: total_fees_usd(&route),
				approval: approval_info(&route),
				step_details: step_details(&route),
				route,
			})
			.collect();

		Self {
			routes,
			rankings,
			unavailable_routes,
		}
	}
}

pub struct RouteService {
	provider: Arc<dyn QuoteProviderInterface>,
	registry: Arc<TokenRegistry>,
}

impl RouteService {
	pub fn new(provider: Arc<dyn QuoteProviderInterface>, registry: Arc<TokenRegistry>) -> Self {
		Self { provider, registry }
	}

	/// Fetches the cheapest-first stable-asset routes between two chains.
	pub async fn bridge_to_self(
		&self,
		params: &BridgeToSelfParams,
	) -> Result<RoutesView, DepositError> {
		if parse_base_units(&params.from_amount).is_none() {
			return Err(DepositError::InvalidArgument(format!(
				"fromAmount '{}' is not an integer amount of base units",
				params.from_amount
			)));
		}
		let from_token = self.registry.resolve_asset(params.from_chain_id)?;
		let to_token = self.registry.resolve_asset(params.to_chain_id)?;

		let request = RoutesRequest {
			from_chain_id: params.from_chain_id,
			from_amount: params.from_amount.clone(),
			from_token_address: from_token,
			from_address: params.from_address,
			to_chain_id: params.to_chain_id,
			to_token_address: to_token,
			to_address: params.to_address,
			options: RouteOptions::default(),
		};
		debug!(
			from_chain = params.from_chain_id,
			to_chain = params.to_chain_id,
			"Requesting bridge-to-self routes"
		);
		let response = self.provider.get_routes(&request).await?;
		info!(count = response.routes.len(), "Received routes");

		Ok(RoutesView::decorate(
			response.routes,
			response.unavailable_routes,
		))
	}

	/// Relays a transfer status query to the provider.
	pub async fn get_status(&self, request: &StatusRequest) -> Result<StatusResponse, DepositError> {
		if request.tx_hash.trim().is_empty() {
			return Err(DepositError::InvalidArgument("txHash is required".into()));
		}
		Ok(self.provider.get_status(request).await?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::{route, MockQuoteProvider};
	use router_quote::QuoteProviderError;
	use router_types::{RouteOrder, RoutesResponse};
	use std::collections::HashMap;

	const USER: Address = Address::new([0xaa; 20]);

	fn service(provider: MockQuoteProvider) -> RouteService {
		RouteService::new(
			Arc::new(provider),
			Arc::new(TokenRegistry::with_project_overrides(HashMap::new())),
		)
	}

	fn params(from_chain_id: u64) -> BridgeToSelfParams {
		BridgeToSelfParams {
			from_chain_id,
			to_chain_id: 8453,
			from_amount: "5000000".into(),
			from_address: USER,
			to_address: USER,
		}
	}

	#[tokio::test]
	async fn test_bridge_to_self_decorates_routes() {
		let mut provider = MockQuoteProvider::new();
		provider
			.expect_get_routes()
			.withf(|req| {
				req.options.order == RouteOrder::Cheapest
					&& req.options.slippage == 0.03
					&& !req.options.allow_switch_chain
					&& req.from_chain_id == 10
					&& req.to_address == USER
			})
			.times(1)
			.returning(|_| {
				Ok(RoutesResponse {
					routes: vec![
						route("4990000", 2, Some(120.0), &[]),
						route("4995000", 1, Some(60.0), &["RECOMMENDED"]),
					],
					unavailable_routes: None,
				})
			});

		let view = service(provider).bridge_to_self(&params(10)).await.unwrap();
		assert_eq!(view.routes.len(), 2);
		assert_eq!(view.rankings.recommended_index, 1);
		assert_eq!(
			view.routes[1].labels,
			vec![
				RouteLabel::Recommended,
				RouteLabel::Fastest,
				RouteLabel::Cheapest,
				RouteLabel::Simplest
			]
		);
		assert_eq!(view.routes[0].explanation, "Alternative route.");
		assert_eq!(view.routes[0].total_fees_usd, "—");
		assert_eq!(view.routes[0].step_details.len(), 2);

		let value = serde_json::to_value(&view).unwrap();
		assert_eq!(value["routes"][1]["route"]["toAmount"], "4995000");
		assert_eq!(value["routes"][1]["totalFeesUSD"], "—");
		assert_eq!(value["rankings"]["cheapestIndex"], 1);
	}

	#[tokio::test]
	async fn test_unsupported_chain_skips_provider() {
		let mut provider = MockQuoteProvider::new();
		provider.expect_get_routes().times(0);
		let err = service(provider)
			.bridge_to_self(&params(12345))
			.await
			.unwrap_err();
		assert!(matches!(err, DepositError::NotConfigured(_)));
	}

	#[tokio::test]
	async fn test_status_relay() {
		let mut provider = MockQuoteProvider::new();
		provider
			.expect_get_status()
			.withf(|req| req.tx_hash == "0xabc" && req.bridge.as_deref() == Some("across"))
			.times(1)
			.returning(|_| {
				Ok(StatusResponse {
					status: Some("DONE".into()),
					..Default::default()
				})
			});
		let service = service(provider);

		let request = StatusRequest {
			tx_hash: "0xabc".into(),
			bridge: Some("across".into()),
			from_chain: Some(10),
			to_chain: Some(8453),
		};
		let status = service.get_status(&request).await.unwrap();
		assert_eq!(status.status.as_deref(), Some("DONE"));

		let empty = StatusRequest {
			tx_hash: " ".into(),
			bridge: None,
			from_chain: None,
			to_chain: None,
		};
		assert!(matches!(
			service.get_status(&empty).await.unwrap_err(),
			DepositError::InvalidArgument(_)
		));
	}

	#[tokio::test]
	async fn test_status_errors_surface() {
		let mut provider = MockQuoteProvider::new();
		provider.expect_get_status().times(1).returning(|_| {
			Err(QuoteProviderError::HttpStatus {
				status_code: 404,
				reason: "Not found".into(),
			})
		});
		let request = StatusRequest {
			tx_hash: "0xdef".into(),
			bridge: None,
			from_chain: None,
			to_chain: None,
		};
		let err = service(provider).get_status(&request).await.unwrap_err();
		assert!(matches!(err, DepositError::ProviderError(m) if m.contains("404")));
	}
}
