//! Core deposit routing engine.
//!
//! Builds cross-chain deposit quotes by composing a bridge-only estimate with a
//! destination-chain deposit call, re-derives that call once the bridged
//! amount is known, and ranks and explains candidate routes for display.
//! All remote work goes through the provider and chain-reader interfaces so
//! the engine itself holds no ambient state.

use router_chain::ChainError;
use router_config::ConfigError;
use router_deposit::{CalldataError, StrategyError, ValidatorError};
use router_quote::{QuoteProviderError, QuoteProviderInterface};
use router_types::{
	Address, ContractCallSpec, DepositQuote, DepositRequest, RegistryError, RouteError,
	StatusRequest, StatusResponse, ToolInfo,
};
use router_yields::{YieldError, YieldRates, YieldService};
use std::sync::Arc;
use thiserror::Error;

pub mod builder;
pub mod execution;
pub mod fees;
pub mod presentation;
pub mod quote;
pub mod ranking;
pub mod receiver;
pub mod routes;
pub mod tools;

pub use builder::{BuilderError, RouterBuilder};
pub use execution::ExecutionCallProvider;
pub use quote::QuoteBuilder;
pub use receiver::ReceiverDeposit;
pub use routes::{BridgeToSelfParams, RouteService, RouteView, RoutesView};
pub use tools::ToolCache;

/// Errors surfaced by a deposit flow.
///
/// Every failure is scoped to one attempt; none of them is fatal to the
/// process.
#[derive(Debug, Error)]
pub enum DepositError {
	/// A required address or asset mapping is absent.
	#[error("Not configured: {0}")]
	NotConfigured(String),
	/// The receiver contract is wired to a different asset.
	#[error("Asset mismatch: expected {expected}, contract reports {actual}")]
	AssetMismatch { expected: Address, actual: Address },
	/// The receiver has not been funded by the bridge yet.
	#[error("Contract {contract} holds no {asset} yet")]
	NotFunded { contract: Address, asset: Address },
	/// The bridge estimate carried no usable destination amount.
	#[error("Estimation failed: {0}")]
	EstimationFailed(String),
	/// A remote call failed or answered with something unusable.
	#[error("Provider error: {0}")]
	ProviderError(String),
	/// Malformed caller input.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}

impl From<RegistryError> for DepositError {
	fn from(err: RegistryError) -> Self {
		DepositError::NotConfigured(err.to_string())
	}
}

impl From<StrategyError> for DepositError {
	fn from(err: StrategyError) -> Self {
		DepositError::NotConfigured(err.to_string())
	}
}

impl From<ConfigError> for DepositError {
	fn from(err: ConfigError) -> Self {
		DepositError::NotConfigured(err.to_string())
	}
}

impl From<ValidatorError> for DepositError {
	fn from(err: ValidatorError) -> Self {
		match err {
			ValidatorError::AssetMismatch { expected, actual } => {
				DepositError::AssetMismatch { expected, actual }
			},
			ValidatorError::NotFunded { contract, asset } => {
				DepositError::NotFunded { contract, asset }
			},
			ValidatorError::Chain(e) => e.into(),
		}
	}
}

impl From<ChainError> for DepositError {
	fn from(err: ChainError) -> Self {
		DepositError::ProviderError(err.to_string())
	}
}

impl From<QuoteProviderError> for DepositError {
	fn from(err: QuoteProviderError) -> Self {
		DepositError::ProviderError(err.to_string())
	}
}

impl From<RouteError> for DepositError {
	fn from(err: RouteError) -> Self {
		DepositError::ProviderError(err.to_string())
	}
}

impl From<CalldataError> for DepositError {
	fn from(err: CalldataError) -> Self {
		match err {
			CalldataError::InvalidArgument(msg) => DepositError::InvalidArgument(msg),
		}
	}
}

impl From<YieldError> for DepositError {
	fn from(err: YieldError) -> Self {
		DepositError::ProviderError(err.to_string())
	}
}

/// Entry point tying the deposit flow, route discovery and the caches
/// together.
///
/// Cheap to clone; every component is shared behind an `Arc`.
#[derive(Clone)]
pub struct DepositRouter {
	/// Builds deposit quotes and execution-time calls.
	quotes: Arc<QuoteBuilder>,
	/// Completes receiver-mode deposits.
	receiver: Arc<ReceiverDeposit>,
	/// Plain bridge routes and status relay.
	routes: Arc<RouteService>,
	/// Provider used to populate the tool cache.
	provider: Arc<dyn QuoteProviderInterface>,
	/// Bridge and exchange metadata.
	tools: Arc<ToolCache>,
	/// Yield rates with a freshness window.
	yields: Arc<YieldService>,
}

impl DepositRouter {
	pub fn new(
		quotes: Arc<QuoteBuilder>,
		receiver: Arc<ReceiverDeposit>,
		routes: Arc<RouteService>,
		provider: Arc<dyn QuoteProviderInterface>,
		tools: Arc<ToolCache>,
		yields: Arc<YieldService>,
	) -> Self {
		Self {
			quotes,
			receiver,
			routes,
			provider,
			tools,
			yields,
		}
	}

	pub async fn build_deposit_quote(
		&self,
		request: &DepositRequest,
	) -> Result<DepositQuote, DepositError> {
		self.quotes.build_deposit_quote(request).await
	}

	/// Derives the deposit call for `request` from the amount the bridge
	/// actually delivered.
	pub fn derive_execution_call(
		&self,
		request: &DepositRequest,
		actual_amount: &str,
		from_address: Address,
	) -> Result<ContractCallSpec, DepositError> {
		let provider = self.quotes.execution_call_provider(request)?;
		Ok(provider.derive_execution_call(actual_amount, from_address))
	}

	pub async fn complete_receiver_deposit(
		&self,
		beneficiary: Address,
	) -> Result<ContractCallSpec, DepositError> {
		self.receiver.prepare(beneficiary).await
	}

	pub async fn bridge_to_self(
		&self,
		params: &BridgeToSelfParams,
	) -> Result<RoutesView, DepositError> {
		self.routes.bridge_to_self(params).await
	}

	pub async fn get_status(&self, request: &StatusRequest) -> Result<StatusResponse, DepositError> {
		self.routes.get_status(request).await
	}

	/// Looks up tool metadata, loading the cache on first use.
	pub async fn tool(&self, key: &str) -> Result<Option<ToolInfo>, DepositError> {
		if !self.tools.is_loaded() {
			self.tools.load(self.provider.as_ref()).await?;
		}
		Ok(self.tools.get(key))
	}

	pub async fn yields(&self) -> Result<YieldRates, DepositError> {
		Ok(self.yields.get_yields().await?)
	}

	pub fn yield_service(&self) -> Arc<YieldService> {
		self.yields.clone()
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validator_errors_keep_their_kind() {
		let expected = Address::repeat_byte(0x01);
		let actual = Address::repeat_byte(0x02);
		let err: DepositError = ValidatorError::AssetMismatch { expected, actual }.into();
		let message = err.to_string();
		assert!(matches!(err, DepositError::AssetMismatch { .. }));
		assert!(message.contains(&expected.to_string()));
		assert!(message.contains(&actual.to_string()));

		let err: DepositError = ValidatorError::Chain(ChainError::Network("timeout".into())).into();
		assert!(matches!(err, DepositError::ProviderError(m) if m.contains("timeout")));
	}

	#[test]
	fn test_local_errors_map_to_precondition_failures() {
		let err: DepositError = RegistryError::NotConfigured(999).into();
		assert_eq!(
			err.to_string(),
			"Not configured: Stable asset not configured for chain 999"
		);

		let err: DepositError = CalldataError::InvalidArgument("bad amount".into()).into();
		assert!(matches!(err, DepositError::InvalidArgument(m) if m == "bad amount"));

		let err: DepositError = RouteError::MissingEstimate.into();
		assert!(matches!(err, DepositError::ProviderError(_)));
	}
}
