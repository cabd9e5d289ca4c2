//! Receiver-mode deposits.
//!
//! Funds are bridged to an intermediary receiver contract, which then
//! deposits its entire balance into the vault for the beneficiary. The call
//! never depends on the delivered amount and needs no approval.

use crate::calldata::encode_receiver_deposit;
use crate::{DepositStrategy, ReceiverValidator, ValidatorError};
use async_trait::async_trait;
use router_types::{Address, Bytes, DepositMode, U256};
use std::sync::Arc;

pub struct ReceiverStrategy {
	receiver: Address,
	validator: Arc<ReceiverValidator>,
}

impl ReceiverStrategy {
	pub fn new(receiver: Address, validator: Arc<ReceiverValidator>) -> Self {
		Self { receiver, validator }
	}
}

#[async_trait]
impl DepositStrategy for ReceiverStrategy {
	fn mode(&self) -> DepositMode {
		DepositMode::Receiver
	}

	fn target(&self) -> Address {
		self.receiver
	}

	/// Estimates must reflect funds landing at the receiver.
	fn estimate_recipient(&self, _user: Address) -> Address {
		self.receiver
	}

	async fn validate(&self, destination_asset: Address) -> Result<(), ValidatorError> {
		self.validator
			.validate_asset_wiring(self.receiver, destination_asset)
			.await
	}

	fn encode(&self, beneficiary: Address, _assets: U256) -> Bytes {
		encode_receiver_deposit(beneficiary, None)
	}

	fn approval_spender(&self) -> Option<Address> {
		None
	}
}
