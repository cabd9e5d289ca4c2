//! Bridge/quote provider boundary for the deposit router.
//!
//! The provider is a remote service that prices bridge transfers and returns
//! fully costed execution routes, optionally with destination contract calls
//! bundled in. This crate defines the interface the core relies on and a REST
//! implementation of it.

use async_trait::async_trait;
use router_config::ProviderConfig;
use router_types::{
	BridgeEstimate, BridgeEstimateRequest, ContractCallsQuoteRequest, RouteStep, RoutesRequest,
	RoutesResponse, StatusRequest, StatusResponse, ToolsResponse,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod lifi;
}

/// Errors that can occur while talking to the quote provider.
#[derive(Debug, Error)]
pub enum QuoteProviderError {
	/// The request never produced a response.
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),
	/// The provider answered with a non-success status.
	#[error("HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },
	/// The provider answered with a body that could not be decoded.
	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },
	/// The client could not be constructed from configuration.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Interface of a bridge/quote provider.
#[async_trait]
pub trait QuoteProviderInterface: Send + Sync {
	/// Prices a bridge-only transfer with no destination call.
	async fn bridge_estimate(
		&self,
		request: &BridgeEstimateRequest,
	) -> Result<BridgeEstimate, QuoteProviderError>;

	/// Quotes a bridge transfer with destination contract calls attached.
	///
	/// Returns the provider's single composite step.
	async fn contract_calls_quote(
		&self,
		request: &ContractCallsQuoteRequest,
	) -> Result<RouteStep, QuoteProviderError>;

	/// Discovers candidate routes for a plain transfer.
	async fn get_routes(&self, request: &RoutesRequest)
		-> Result<RoutesResponse, QuoteProviderError>;

	/// Looks up the status of a submitted transfer.
	async fn get_status(&self, request: &StatusRequest)
		-> Result<StatusResponse, QuoteProviderError>;

	/// Lists the bridges and exchanges the provider routes through.
	async fn get_tools(&self) -> Result<ToolsResponse, QuoteProviderError>;
}

/// Creates the quote provider described by `config`.
pub fn create_quote_provider(
	config: &ProviderConfig,
) -> Result<Arc<dyn QuoteProviderInterface>, QuoteProviderError> {
	let provider = implementations::lifi::LifiQuoteProvider::new(
		&config.base_url,
		config.api_key.as_ref(),
		config.integrator.clone(),
		Duration::from_secs(config.timeout_seconds),
	)?;
	Ok(Arc::new(provider))
}
