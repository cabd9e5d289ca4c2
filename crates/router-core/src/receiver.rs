//! Completion of receiver-mode deposits.
//!
//! Once the bridge leg has landed, the receiver holds the funds and a
//! separate `depositToVault` call moves them into the vault. That call is
//! only handed out after the receiver is seen to be funded.

use router_config::DestinationConfig;
use router_deposit::calldata::encode_receiver_deposit;
use router_deposit::ReceiverValidator;
use router_types::{Address, ContractCallSpec, TokenRegistry};
use std::sync::Arc;
use tracing::info;

use crate::DepositError;

pub struct ReceiverDeposit {
	validator: Arc<ReceiverValidator>,
	registry: Arc<TokenRegistry>,
	destination: DestinationConfig,
}

impl ReceiverDeposit {
	pub fn new(
		validator: Arc<ReceiverValidator>,
		registry: Arc<TokenRegistry>,
		destination: DestinationConfig,
	) -> Self {
		Self {
			validator,
			registry,
			destination,
		}
	}

	/// Returns the `depositToVault(beneficiary, 0)` call once the receiver
	/// holds a nonzero balance of the destination asset.
	///
	/// Fails with `NotFunded` while the bridged funds have not arrived.
	pub async fn prepare(&self, beneficiary: Address) -> Result<ContractCallSpec, DepositError> {
		let receiver = self.destination.receiver()?.ok_or_else(|| {
			DepositError::NotConfigured("receiver mode requires a configured receiver address".into())
		})?;
		let asset = self.registry.resolve_asset(self.destination.chain_id)?;

		let balance = self.validator.validate_funded(receiver, asset).await?;
		info!(%receiver, %balance, %beneficiary, "Receiver funded, deposit call ready");

		Ok(ContractCallSpec {
			from_amount: balance.to_string(),
			from_token: asset,
			to_contract_address: receiver,
			call_data: encode_receiver_deposit(beneficiary, None),
			gas_limit: self.destination.deposit_gas_limit.to_string(),
			approval_address: None,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::MockChainReader;
	use mockall::predicate::eq;
	use router_types::U256;
	use std::collections::HashMap;

	const RECEIVER: Address = Address::new([0xc1; 20]);
	const BENEFICIARY: Address = Address::new([0xbb; 20]);
	const USDC: Address = Address::new([0x01; 20]);

	fn deposit(reader: MockChainReader, receiver: Option<Address>) -> ReceiverDeposit {
		ReceiverDeposit::new(
			Arc::new(ReceiverValidator::new(Arc::new(reader))),
			Arc::new(TokenRegistry::new(HashMap::new(), HashMap::from([(8453, USDC)]))),
			DestinationConfig {
				receiver_address: receiver.map(|a| a.to_string()),
				..Default::default()
			},
		)
	}

	#[tokio::test]
	async fn test_funded_receiver() {
		let mut reader = MockChainReader::new();
		reader
			.expect_token_balance()
			.with(eq(USDC), eq(RECEIVER))
			.times(1)
			.returning(|_, _| Ok(U256::from(998_000u64)));

		let call = deposit(reader, Some(RECEIVER))
			.prepare(BENEFICIARY)
			.await
			.unwrap();
		assert_eq!(call.from_amount, "998000");
		assert_eq!(call.to_contract_address, RECEIVER);
		assert_eq!(call.call_data, encode_receiver_deposit(BENEFICIARY, Some(U256::ZERO)));
		assert_eq!(call.approval_address, None);
	}

	#[tokio::test]
	async fn test_unfunded_receiver() {
		let mut reader = MockChainReader::new();
		reader
			.expect_token_balance()
			.times(1)
			.returning(|_, _| Ok(U256::ZERO));

		let err = deposit(reader, Some(RECEIVER))
			.prepare(BENEFICIARY)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			DepositError::NotFunded { contract, asset } if contract == RECEIVER && asset == USDC
		));
	}

	#[tokio::test]
	async fn test_missing_receiver() {
		let mut reader = MockChainReader::new();
		reader.expect_token_balance().times(0);

		let err = deposit(reader, None).prepare(BENEFICIARY).await.unwrap_err();
		assert!(matches!(err, DepositError::NotConfigured(_)));
	}
}
