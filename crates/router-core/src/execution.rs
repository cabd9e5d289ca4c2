//! Execution-time derivation of the deposit call.
//!
//! The call encoded for a quote uses the advisory bridge amount. Once the
//! execution engine knows how much actually arrived it asks for the call
//! again, and the amount it reports may still be zero if the bridge has not
//! settled.

use router_deposit::DepositStrategy;
use router_types::{
	parse_positive_amount, Address, ContractCallSpec, DepositMode, AMOUNT_PLACEHOLDER, U256,
};
use tracing::debug;

/// Re-derives the deposit call of one deposit from the realized amount.
pub struct ExecutionCallProvider {
	strategy: Box<dyn DepositStrategy>,
	destination_asset: Address,
	beneficiary: Address,
	/// Source amount of the original request, in base units.
	requested_amount: String,
	gas_limit: u64,
}

impl ExecutionCallProvider {
	pub fn new(
		strategy: Box<dyn DepositStrategy>,
		destination_asset: Address,
		beneficiary: Address,
		requested_amount: String,
		gas_limit: u64,
	) -> Self {
		Self {
			strategy,
			destination_asset,
			beneficiary,
			requested_amount,
			gas_limit,
		}
	}

	/// Returns the deposit call for an `actual_amount` of base units.
	///
	/// Receiver calls do not depend on the amount, so a non-positive amount
	/// falls back to the requested one. Vault calls encode the amount; a
	/// non-positive amount becomes [`AMOUNT_PLACEHOLDER`] for the engine to
	/// patch, never zero.
	pub fn derive_execution_call(&self, actual_amount: &str, from_address: Address) -> ContractCallSpec {
		let actual = parse_positive_amount(actual_amount);

		let (from_amount, assets) = match self.strategy.mode() {
			DepositMode::Receiver => {
				let from_amount = match actual {
					Some(amount) => amount.to_string(),
					None => self.requested_amount.clone(),
				};
				(from_amount, U256::ZERO)
			},
			DepositMode::Vault => {
				let assets = actual.unwrap_or(AMOUNT_PLACEHOLDER);
				(assets.to_string(), assets)
			},
		};

		debug!(
			mode = %self.strategy.mode(),
			%from_address,
			from_amount = %from_amount,
			placeholder = actual.is_none(),
			"Derived execution call"
		);

		let call_data = self.strategy.encode(self.beneficiary, assets);
		self.strategy
			.contract_call(self.destination_asset, from_amount, call_data, self.gas_limit)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::MockChainReader;
	use router_deposit::calldata::{encode_receiver_deposit, encode_vault_deposit};
	use router_deposit::{create_strategy, DepositTargets, ReceiverValidator};
	use std::sync::Arc;

	const USDC: Address = Address::new([0x01; 20]);
	const BENEFICIARY: Address = Address::new([0xbb; 20]);
	const EXECUTOR: Address = Address::new([0xee; 20]);
	const RECEIVER: Address = Address::new([0xc1; 20]);
	const VAULT: Address = Address::new([0xbe; 20]);

	fn provider(mode: DepositMode) -> ExecutionCallProvider {
		let validator = Arc::new(ReceiverValidator::new(Arc::new(MockChainReader::new())));
		let targets = DepositTargets {
			receiver: Some(RECEIVER),
			vault: Some(VAULT),
		};
		let strategy = create_strategy(mode, targets, validator).unwrap();
		ExecutionCallProvider::new(strategy, USDC, BENEFICIARY, "1000000".into(), 500_000)
	}

	#[test]
	fn test_receiver_uses_actual_amount() {
		let call = provider(DepositMode::Receiver).derive_execution_call("996500", EXECUTOR);
		assert_eq!(call.from_amount, "996500");
		assert_eq!(call.to_contract_address, RECEIVER);
		assert_eq!(call.call_data, encode_receiver_deposit(BENEFICIARY, None));
		assert_eq!(call.approval_address, None);
	}

	#[test]
	fn test_receiver_falls_back_to_requested_amount() {
		let provider = provider(DepositMode::Receiver);
		for actual in ["0", "", "pending"] {
			let call = provider.derive_execution_call(actual, EXECUTOR);
			assert_eq!(call.from_amount, "1000000");
			assert_eq!(call.call_data, encode_receiver_deposit(BENEFICIARY, Some(U256::ZERO)));
		}
	}

	#[test]
	fn test_vault_zero_amount_uses_placeholder() {
		let call = provider(DepositMode::Vault).derive_execution_call("0", EXECUTOR);
		assert_eq!(call.from_amount, AMOUNT_PLACEHOLDER.to_string());
		assert_ne!(call.from_amount, "0");
		assert_eq!(call.call_data, encode_vault_deposit(AMOUNT_PLACEHOLDER, BENEFICIARY));
		assert_eq!(call.approval_address, Some(VAULT));
	}

	#[test]
	fn test_vault_encodes_actual_amount() {
		let call = provider(DepositMode::Vault).derive_execution_call("996500", EXECUTOR);
		assert_eq!(call.from_amount, "996500");
		assert_eq!(
			call.call_data,
			encode_vault_deposit(U256::from(996_500u64), BENEFICIARY)
		);
		assert_eq!(call.to_contract_address, VAULT);
		assert_eq!(call.gas_limit, "500000");
	}
}
