//! Read-only checks against the destination receiver contract.
//!
//! The wiring check belongs before quoting. The funding check only makes
//! sense once the bridge leg has delivered, right before the dependent
//! deposit call is sent. Neither mutates anything.

use router_chain::ChainReaderInterface;
use router_types::{Address, U256};
use std::sync::Arc;

use crate::ValidatorError;

pub struct ReceiverValidator {
	reader: Arc<dyn ChainReaderInterface>,
}

impl ReceiverValidator {
	pub fn new(reader: Arc<dyn ChainReaderInterface>) -> Self {
		Self { reader }
	}

	/// Fails with `AssetMismatch` unless `receiver.asset()` is `expected_asset`.
	pub async fn validate_asset_wiring(
		&self,
		receiver: Address,
		expected_asset: Address,
	) -> Result<(), ValidatorError> {
		let actual = self.reader.configured_asset(receiver).await?;
		if actual != expected_asset {
			tracing::warn!(
				%receiver,
				expected = %expected_asset,
				%actual,
				"Receiver is wired to an unexpected asset"
			);
			return Err(ValidatorError::AssetMismatch {
				expected: expected_asset,
				actual,
			});
		}
		Ok(())
	}

	/// Fails with `NotFunded` when `receiver` holds none of `asset`.
	///
	/// Returns the current balance otherwise.
	pub async fn validate_funded(
		&self,
		receiver: Address,
		asset: Address,
	) -> Result<U256, ValidatorError> {
		let balance = self.reader.token_balance(asset, receiver).await?;
		if balance.is_zero() {
			return Err(ValidatorError::NotFunded {
				contract: receiver,
				asset,
			});
		}
		Ok(balance)
	}
}
