//! Deposit endpoints: quotes, execution-time calls and receiver completion.

use router_config::Config;
use router_core::{DepositError, DepositRouter};
use router_types::{Address, ContractCallSpec, DepositMode, DepositQuote, DepositRequest};
use serde::Deserialize;

/// Body of `POST /api/deposits/quote`.
///
/// `mode` falls back to the configured default; `beneficiary` (also accepted
/// as `receiverAddress`) falls back to the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestBody {
	pub from_chain_id: u64,
	pub from_amount: String,
	pub user_address: Address,
	#[serde(default, alias = "receiverAddress")]
	pub beneficiary: Option<Address>,
	#[serde(default)]
	pub mode: Option<DepositMode>,
}

impl QuoteRequestBody {
	pub fn into_request(self, default_mode: DepositMode) -> DepositRequest {
		DepositRequest {
			from_chain_id: self.from_chain_id,
			from_amount: self.from_amount,
			user_address: self.user_address,
			beneficiary: self.beneficiary,
			mode: self.mode.unwrap_or(default_mode),
		}
	}
}

/// Body of `POST /api/deposits/execution-call`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionCallBody {
	#[serde(flatten)]
	pub deposit: QuoteRequestBody,
	/// Amount the bridge delivered, in base units; may be `"0"` if unknown.
	#[serde(default)]
	pub actual_amount: String,
	pub from_address: Address,
}

/// Body of `POST /api/deposits/receiver/complete`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteReceiverBody {
	pub beneficiary: Address,
}

pub async fn process_quote_request(
	body: QuoteRequestBody,
	router: &DepositRouter,
	config: &Config,
) -> Result<DepositQuote, DepositError> {
	let request = body.into_request(config.destination.default_mode);
	router.build_deposit_quote(&request).await
}

pub fn process_execution_call(
	body: ExecutionCallBody,
	router: &DepositRouter,
	config: &Config,
) -> Result<ContractCallSpec, DepositError> {
	let request = body.deposit.into_request(config.destination.default_mode);
	router.derive_execution_call(&request, &body.actual_amount, body.from_address)
}

pub async fn process_receiver_completion(
	body: CompleteReceiverBody,
	router: &DepositRouter,
) -> Result<ContractCallSpec, DepositError> {
	router.complete_receiver_deposit(body.beneficiary).await
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_quote_body_defaults() {
		let body: QuoteRequestBody = serde_json::from_value(json!({
			"fromChainId": 10,
			"fromAmount": "1000000",
			"userAddress": "0x00000000000000000000000000000000000000aa"
		}))
		.unwrap();
		let request = body.into_request(DepositMode::Vault);
		assert_eq!(request.mode, DepositMode::Vault);
		assert_eq!(request.beneficiary(), request.user_address);
	}

	#[test]
	fn test_receiver_address_alias() {
		let body: QuoteRequestBody = serde_json::from_value(json!({
			"fromChainId": 10,
			"fromAmount": "1000000",
			"userAddress": "0x00000000000000000000000000000000000000aa",
			"receiverAddress": "0x00000000000000000000000000000000000000bb",
			"mode": "receiver"
		}))
		.unwrap();
		let request = body.into_request(DepositMode::Vault);
		assert_eq!(request.mode, DepositMode::Receiver);
		assert_eq!(request.beneficiary(), Address::repeat_byte(0xbb));
	}

	#[test]
	fn test_execution_call_body() {
		let body: ExecutionCallBody = serde_json::from_value(json!({
			"fromChainId": 10,
			"fromAmount": "1000000",
			"userAddress": "0x00000000000000000000000000000000000000aa",
			"actualAmount": "0",
			"fromAddress": "0x00000000000000000000000000000000000000ee"
		}))
		.unwrap();
		assert_eq!(body.actual_amount, "0");
		assert_eq!(body.deposit.from_chain_id, 10);
		assert_eq!(body.from_address, Address::repeat_byte(0xee));
	}
}
