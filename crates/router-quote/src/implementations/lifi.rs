//! LI.FI REST implementation of the quote provider.
//!
//! Endpoints used (relative to the configured base URL, which includes `/v1`):
//! - `GET quote` for bridge-only estimates
//! - `POST quote/contractCalls` for quotes with destination calls
//! - `POST advanced/routes` for multi-route discovery
//! - `GET status` for transfer status
//! - `GET tools` for bridge and exchange metadata

use crate::{QuoteProviderError, QuoteProviderInterface};
use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Client, Response,
};
use router_types::{
	BridgeEstimate, BridgeEstimateRequest, ContractCallsQuoteRequest, RouteStep, RoutesRequest,
	RoutesResponse, SecretString, StatusRequest, StatusResponse, ToolsResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-lifi-api-key";

/// Quote provider backed by the LI.FI REST API.
#[derive(Debug, Clone)]
pub struct LifiQuoteProvider {
	client: Client,
	base_url: String,
	integrator: Option<String>,
}

impl LifiQuoteProvider {
	pub fn new(
		base_url: &str,
		api_key: Option<&SecretString>,
		integrator: Option<String>,
		timeout: Duration,
	) -> Result<Self, QuoteProviderError> {
		let mut headers = HeaderMap::new();
		headers.insert("Accept", HeaderValue::from_static("application/json"));
		headers.insert("User-Agent", HeaderValue::from_static("deposit-router/0.1"));

		if let Some(key) = api_key.filter(|k| !k.is_empty()) {
			let mut value = HeaderValue::from_str(key.expose_secret().trim()).map_err(|_| {
				QuoteProviderError::Configuration("API key is not a valid header value".into())
			})?;
			value.set_sensitive(true);
			headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
		}

		let client = Client::builder()
			.default_headers(headers)
			.timeout(timeout)
			.build()?;

		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
			integrator: integrator.filter(|i| !i.trim().is_empty()),
		})
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path)
	}

	/// Adds the integrator to a JSON body unless the caller already set one.
	fn with_integrator(&self, mut body: Value) -> Value {
		if let (Some(integrator), Some(object)) = (&self.integrator, body.as_object_mut()) {
			object
				.entry("integrator")
				.or_insert_with(|| Value::String(integrator.clone()));
		}
		body
	}

	fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, QuoteProviderError> {
		serde_json::to_value(value).map_err(|e| QuoteProviderError::InvalidResponse {
			reason: format!("Failed to encode request: {}", e),
		})
	}
}

/// Checks the status and decodes the JSON body.
async fn parse_response<T: DeserializeOwned>(
	response: Response,
	what: &str,
) -> Result<T, QuoteProviderError> {
	let status = response.status();
	if !status.is_success() {
		let body = response.text().await.unwrap_or_default();
		return Err(QuoteProviderError::HttpStatus {
			status_code: status.as_u16(),
			reason: error_message(&body).unwrap_or_else(|| format!("{} request failed", what)),
		});
	}

	response
		.json()
		.await
		.map_err(|e| QuoteProviderError::InvalidResponse {
			reason: format!("Failed to parse {} response: {}", what, e),
		})
}

/// Extracts `message` from a provider error body.
fn error_message(body: &str) -> Option<String> {
	let value: Value = serde_json::from_str(body).ok()?;
	value
		.get("message")
		.and_then(Value::as_str)
		.map(str::to_string)
}

#[async_trait]
impl QuoteProviderInterface for LifiQuoteProvider {
	async fn bridge_estimate(
		&self,
		request: &BridgeEstimateRequest,
	) -> Result<BridgeEstimate, QuoteProviderError> {
		debug!(
			"Requesting bridge estimate {}:{} -> {}:{} for {}",
			request.from_chain,
			request.from_token,
			request.to_chain,
			request.to_token,
			request.from_amount
		);

		let mut query = vec![
			("fromChain", request.from_chain.to_string()),
			("toChain", request.to_chain.to_string()),
			("fromToken", request.from_token.to_string()),
			("toToken", request.to_token.to_string()),
			("fromAmount", request.from_amount.clone()),
			("fromAddress", request.from_address.to_string()),
			("toAddress", request.to_address.to_string()),
		];
		if let Some(integrator) = &self.integrator {
			query.push(("integrator", integrator.clone()));
		}

		let response = self
			.client
			.get(self.endpoint("quote"))
			.query(&query)
			.send()
			.await?;
		let step: RouteStep = parse_response(response, "quote").await?;

		let estimate = step.estimate.as_ref();
		Ok(BridgeEstimate {
			to_amount_estimated: estimate.and_then(|e| e.to_amount.clone()),
			tool: step.tool.clone(),
			execution_duration: estimate.and_then(|e| e.execution_duration),
		})
	}

	async fn contract_calls_quote(
		&self,
		request: &ContractCallsQuoteRequest,
	) -> Result<RouteStep, QuoteProviderError> {
		debug!(
			"Requesting contract-calls quote {} -> {} with {} call(s)",
			request.from_chain,
			request.to_chain,
			request.contract_calls.len()
		);

		let body = self.with_integrator(Self::to_body(request)?);
		let response = self
			.client
			.post(self.endpoint("quote/contractCalls"))
			.json(&body)
			.send()
			.await?;
		parse_response(response, "contract-calls quote").await
	}

	async fn get_routes(
		&self,
		request: &RoutesRequest,
	) -> Result<RoutesResponse, QuoteProviderError> {
		debug!(
			"Requesting routes {} -> {} for {}",
			request.from_chain_id, request.to_chain_id, request.from_amount
		);

		let mut body = Self::to_body(request)?;
		if let Some(options) = body.get_mut("options") {
			*options = self.with_integrator(options.take());
		}
		let response = self
			.client
			.post(self.endpoint("advanced/routes"))
			.json(&body)
			.send()
			.await?;
		parse_response(response, "routes").await
	}

	async fn get_status(
		&self,
		request: &StatusRequest,
	) -> Result<StatusResponse, QuoteProviderError> {
		let mut query = vec![("txHash", request.tx_hash.clone())];
		if let Some(bridge) = &request.bridge {
			query.push(("bridge", bridge.clone()));
		}
		if let Some(from_chain) = request.from_chain {
			query.push(("fromChain", from_chain.to_string()));
		}
		if let Some(to_chain) = request.to_chain {
			query.push(("toChain", to_chain.to_string()));
		}

		let response = self
			.client
			.get(self.endpoint("status"))
			.query(&query)
			.send()
			.await?;
		parse_response(response, "status").await
	}

	async fn get_tools(&self) -> Result<ToolsResponse, QuoteProviderError> {
		let response = self.client.get(self.endpoint("tools")).send().await?;
		parse_response(response, "tools").await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{
		extract::Query,
		http::{HeaderMap as AxumHeaders, StatusCode},
		routing::{get, post},
		Json, Router,
	};
	use router_types::{Address, Bytes, ContractCallSpec, RouteOptions};
	use serde_json::json;
	use std::collections::HashMap;

	async fn quote_handler(
		headers: AxumHeaders,
		Query(params): Query<HashMap<String, String>>,
	) -> (StatusCode, Json<Value>) {
		if headers.get(API_KEY_HEADER).map(|v| v.as_bytes()) != Some(b"test-key".as_slice()) {
			return (
				StatusCode::UNAUTHORIZED,
				Json(json!({"message": "Missing API key", "code": 1001})),
			);
		}
		if params.get("fromAmount").map(String::as_str) == Some("0") {
			return (
				StatusCode::NOT_FOUND,
				Json(json!({"message": "No available quotes for the requested transfer", "code": 1002})),
			);
		}
		// Echo the amount minus a flat fee so the caller can see its params arrived.
		let from_amount: u64 = params["fromAmount"].parse().unwrap();
		(
			StatusCode::OK,
			Json(json!({
				"type": "lifi",
				"tool": "across",
				"action": {"fromChainId": params["fromChain"].parse::<u64>().unwrap(), "toChainId": 8453},
				"estimate": {
					"toAmount": (from_amount - 1_000).to_string(),
					"executionDuration": 30,
					"integratorEcho": params.get("integrator")
				}
			})),
		)
	}

	async fn contract_calls_handler(Json(body): Json<Value>) -> Json<Value> {
		Json(json!({
			"id": "cc-quote",
			"type": "lifi",
			"tool": "stargate",
			"action": {
				"fromChainId": body["fromChain"],
				"toChainId": body["toChain"],
				"fromAmount": body["fromAmount"]
			},
			"estimate": {
				"toAmount": body["contractCalls"][0]["fromAmount"],
				"integrator": body["integrator"],
				"slippage": body["slippage"],
				"denyExchanges": body["denyExchanges"]
			}
		}))
	}

	async fn routes_handler(Json(body): Json<Value>) -> Json<Value> {
		Json(json!({
			"routes": [{
				"id": "r1",
				"fromChainId": body["fromChainId"],
				"fromAmount": body["fromAmount"],
				"toChainId": body["toChainId"],
				"toAmount": "990",
				"steps": [],
				"echoOptions": body["options"]
			}]
		}))
	}

	async fn status_handler(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
		Json(json!({
			"status": "DONE",
			"substatus": "COMPLETED",
			"echoBridge": params.get("bridge"),
			"echoTx": params["txHash"]
		}))
	}

	async fn tools_handler() -> Json<Value> {
		Json(json!({
			"bridges": [{"key": "across", "name": "Across", "logoURI": "https://x/across.svg"}],
			"exchanges": [{"key": "1inch", "name": "1inch", "logoURI": "https://x/1inch.svg"}]
		}))
	}

	async fn spawn_stub() -> String {
		let app = Router::new()
			.route("/v1/quote", get(quote_handler))
			.route("/v1/quote/contractCalls", post(contract_calls_handler))
			.route("/v1/advanced/routes", post(routes_handler))
			.route("/v1/status", get(status_handler))
			.route("/v1/tools", get(tools_handler));
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});
		format!("http://{}/v1", addr)
	}

	fn provider(base_url: &str, key: Option<&str>) -> LifiQuoteProvider {
		let key = key.map(SecretString::from);
		LifiQuoteProvider::new(
			base_url,
			key.as_ref(),
			Some("vault-router".into()),
			Duration::from_secs(5),
		)
		.unwrap()
	}

	fn estimate_request(amount: &str) -> BridgeEstimateRequest {
		BridgeEstimateRequest {
			from_chain: 42161,
			to_chain: 8453,
			from_token: Address::repeat_byte(0x01),
			to_token: Address::repeat_byte(0x02),
			from_amount: amount.into(),
			from_address: Address::repeat_byte(0xaa),
			to_address: Address::repeat_byte(0xc1),
		}
	}

	#[tokio::test]
	async fn test_bridge_estimate() {
		let base = spawn_stub().await;
		let estimate = provider(&base, Some("test-key"))
			.bridge_estimate(&estimate_request("1000000"))
			.await
			.unwrap();
		assert_eq!(estimate.to_amount_estimated.as_deref(), Some("999000"));
		assert_eq!(estimate.tool.as_deref(), Some("across"));
		assert_eq!(estimate.execution_duration, Some(30.0));
	}

	#[tokio::test]
	async fn test_error_status_carries_provider_message() {
		let base = spawn_stub().await;

		let unauthorized = provider(&base, None)
			.bridge_estimate(&estimate_request("1000000"))
			.await
			.unwrap_err();
		match unauthorized {
			QuoteProviderError::HttpStatus {
				status_code,
				reason,
			} => {
				assert_eq!(status_code, 401);
				assert_eq!(reason, "Missing API key");
			},
			other => panic!("unexpected error: {other:?}"),
		}

		let no_quote = provider(&base, Some("test-key"))
			.bridge_estimate(&estimate_request("0"))
			.await
			.unwrap_err();
		assert!(matches!(
			no_quote,
			QuoteProviderError::HttpStatus { status_code: 404, .. }
		));
	}

	#[tokio::test]
	async fn test_contract_calls_quote_body() {
		let base = spawn_stub().await;
		let request = ContractCallsQuoteRequest {
			from_chain: 10,
			from_token: Address::repeat_byte(0x01),
			from_address: Address::repeat_byte(0xaa),
			from_amount: "5000000".into(),
			to_chain: 8453,
			to_token: Address::repeat_byte(0x02),
			contract_calls: vec![ContractCallSpec {
				from_amount: "4990000".into(),
				from_token: Address::repeat_byte(0x02),
				to_contract_address: Address::repeat_byte(0xc1),
				call_data: Bytes::from(vec![0x01]),
				gas_limit: "500000".into(),
				approval_address: None,
			}],
			to_fallback_address: Address::repeat_byte(0xaa),
			slippage: 0.003,
			deny_exchanges: vec!["all".into()],
		};

		let step = provider(&base, None)
			.contract_calls_quote(&request)
			.await
			.unwrap();
		let estimate = step.estimate.unwrap();
		assert_eq!(estimate.to_amount.as_deref(), Some("4990000"));
		assert_eq!(estimate.extra["integrator"], "vault-router");
		assert_eq!(estimate.extra["slippage"], 0.003);
		assert_eq!(estimate.extra["denyExchanges"], json!(["all"]));
		assert_eq!(step.action.unwrap().from_chain_id, Some(10));
	}

	#[tokio::test]
	async fn test_routes_status_and_tools() {
		let base = spawn_stub().await;
		let client = provider(&base, None);

		let routes = client
			.get_routes(&RoutesRequest {
				from_chain_id: 137,
				from_amount: "1000".into(),
				from_token_address: Address::repeat_byte(0x01),
				from_address: Address::repeat_byte(0xaa),
				to_chain_id: 8453,
				to_token_address: Address::repeat_byte(0x02),
				to_address: Address::repeat_byte(0xaa),
				options: RouteOptions::default(),
			})
			.await
			.unwrap();
		assert_eq!(routes.routes.len(), 1);
		let options = &routes.routes[0].extra["echoOptions"];
		assert_eq!(options["order"], "CHEAPEST");
		assert_eq!(options["integrator"], "vault-router");

		let status = client
			.get_status(&StatusRequest {
				tx_hash: "0xfeed".into(),
				bridge: Some("across".into()),
				from_chain: Some(137),
				to_chain: None,
			})
			.await
			.unwrap();
		assert_eq!(status.status.as_deref(), Some("DONE"));
		assert_eq!(status.extra["echoBridge"], "across");
		assert_eq!(status.extra["echoTx"], "0xfeed");

		let tools = client.get_tools().await.unwrap();
		assert_eq!(tools.bridges[0].key, "across");
		assert_eq!(tools.exchanges[0].name, "1inch");
	}

	#[tokio::test]
	async fn test_unreachable_provider() {
		let result = provider("http://127.0.0.1:9/v1", None).get_tools().await;
		assert!(matches!(result, Err(QuoteProviderError::Http(_))));
	}

	#[test]
	fn test_error_message_extraction() {
		assert_eq!(
			error_message(r#"{"message":"Invalid fromToken","code":1011}"#).as_deref(),
			Some("Invalid fromToken")
		);
		assert_eq!(error_message("<html>bad gateway</html>"), None);
	}
}
