//! Deposit quote construction.
//!
//! A quote is negotiated in two steps. A bridge-only estimate gives an
//! advisory destination amount, which is used to encode the deposit call.
//! The call is then bundled into a contract-calls quote, which the provider
//! answers with a single fully costed step.

use router_config::DestinationConfig;
use router_deposit::{create_strategy, DepositStrategy, DepositTargets, ReceiverValidator};
use router_quote::QuoteProviderInterface;
use router_types::{
	parse_base_units, BridgeEstimateRequest, ContractCallsQuoteRequest, DepositMode,
	DepositQuote, DepositRequest, Route, TokenRegistry, CONTRACT_CALLS_SLIPPAGE,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::execution::ExecutionCallProvider;
use crate::DepositError;

/// Exchanges the destination call must not route through.
const DENY_ALL_EXCHANGES: &str = "all";

pub struct QuoteBuilder {
	provider: Arc<dyn QuoteProviderInterface>,
	validator: Arc<ReceiverValidator>,
	registry: Arc<TokenRegistry>,
	destination: DestinationConfig,
}

impl QuoteBuilder {
	pub fn new(
		provider: Arc<dyn QuoteProviderInterface>,
		validator: Arc<ReceiverValidator>,
		registry: Arc<TokenRegistry>,
		destination: DestinationConfig,
	) -> Self {
		Self {
			provider,
			validator,
			registry,
			destination,
		}
	}

	/// Builds a deposit quote for `request`.
	///
	/// Local preconditions (amount, assets, configured target, receiver
	/// wiring) are checked before any quote is requested. Provider failures
	/// are returned as they are; nothing is retried.
	pub async fn build_deposit_quote(
		&self,
		request: &DepositRequest,
	) -> Result<DepositQuote, DepositError> {
		if parse_base_units(&request.from_amount).is_none() {
			return Err(DepositError::InvalidArgument(format!(
				"fromAmount '{}' is not an integer amount of base units",
				request.from_amount
			)));
		}

		let from_asset = self.registry.resolve_asset(request.from_chain_id)?;
		let to_asset = self.registry.resolve_asset(self.destination.chain_id)?;

		let strategy = create_strategy_for(&self.destination, request.mode, &self.validator)?;
		strategy.validate(to_asset).await?;

		let beneficiary = request.beneficiary();
		let estimate_request = BridgeEstimateRequest {
			from_chain: request.from_chain_id,
			to_chain: self.destination.chain_id,
			from_token: from_asset,
			to_token: to_asset,
			from_amount: request.from_amount.clone(),
			from_address: request.user_address,
			to_address: strategy.estimate_recipient(request.user_address),
		};
		debug!(
			from_chain = request.from_chain_id,
			mode = %request.mode,
			"Requesting bridge estimate"
		);
		let estimate = self
			.provider
			.bridge_estimate(&estimate_request)
			.await
			.inspect_err(|e| warn!(from_chain = request.from_chain_id, "Bridge estimate failed: {}", e))?;

		let advisory = estimate.to_amount_estimated.ok_or_else(|| {
			DepositError::EstimationFailed("bridge estimate has no destination amount".to_string())
		})?;
		let advisory_value = parse_base_units(&advisory).ok_or_else(|| {
			DepositError::EstimationFailed(format!(
				"bridge estimate destination amount '{}' is not an integer",
				advisory
			))
		})?;

		let call_data = strategy.encode(beneficiary, advisory_value);
		let call = strategy.contract_call(
			to_asset,
			advisory.clone(),
			call_data,
			self.destination.deposit_gas_limit,
		);

		let quote_request = ContractCallsQuoteRequest {
			from_chain: request.from_chain_id,
			from_token: from_asset,
			from_address: request.user_address,
			from_amount: request.from_amount.clone(),
			to_chain: self.destination.chain_id,
			to_token: to_asset,
			contract_calls: vec![call],
			to_fallback_address: beneficiary,
			slippage: CONTRACT_CALLS_SLIPPAGE,
			deny_exchanges: vec![DENY_ALL_EXCHANGES.to_string()],
		};
		debug!(advisory = %advisory, "Requesting contract-calls quote");
		let step = self
			.provider
			.contract_calls_quote(&quote_request)
			.await
			.inspect_err(|e| warn!(from_chain = request.from_chain_id, "Contract-calls quote failed: {}", e))?;

		let route = Route::from_step(step)?;
		info!(
			route_id = %route.id,
			from_chain = request.from_chain_id,
			to_amount = %route.to_amount,
			mode = %request.mode,
			"Built deposit quote"
		);

		Ok(DepositQuote {
			route,
			deposit_amount_out: advisory,
		})
	}

	/// Returns the execution-time call provider for `request`.
	///
	/// Performs no remote calls; the receiver wiring was checked when the
	/// quote was built.
	pub fn execution_call_provider(
		&self,
		request: &DepositRequest,
	) -> Result<ExecutionCallProvider, DepositError> {
		if parse_base_units(&request.from_amount).is_none() {
			return Err(DepositError::InvalidArgument(format!(
				"fromAmount '{}' is not an integer amount of base units",
				request.from_amount
			)));
		}
		let to_asset = self.registry.resolve_asset(self.destination.chain_id)?;
		let strategy = create_strategy_for(&self.destination, request.mode, &self.validator)?;

		Ok(ExecutionCallProvider::new(
			strategy,
			to_asset,
			request.beneficiary(),
			request.from_amount.clone(),
			self.destination.deposit_gas_limit,
		))
	}
}

/// Creates the strategy for `mode`, reading only the address that mode needs.
pub(crate) fn create_strategy_for(
	destination: &DestinationConfig,
	mode: DepositMode,
	validator: &Arc<ReceiverValidator>,
) -> Result<Box<dyn DepositStrategy>, DepositError> {
	let targets = match mode {
		DepositMode::Receiver => DepositTargets {
			receiver: destination.receiver()?,
			vault: None,
		},
		DepositMode::Vault => DepositTargets {
			receiver: None,
			vault: destination.vault()?,
		},
	};
	Ok(create_strategy(mode, targets, validator.clone())?)
}
