//! Vault-mode deposits.
//!
//! The provider's call relay invokes ERC-4626 `deposit` on the vault, which
//! pulls the funds through an allowance. The call encodes the amount, so it
//! must be rebuilt once the delivered amount is known.

use crate::calldata::encode_vault_deposit;
use crate::{DepositStrategy, ValidatorError};
use async_trait::async_trait;
use router_types::{Address, Bytes, DepositMode, U256};

pub struct VaultStrategy {
	vault: Address,
}

impl VaultStrategy {
	pub fn new(vault: Address) -> Self {
		Self { vault }
	}
}

#[async_trait]
impl DepositStrategy for VaultStrategy {
	fn mode(&self) -> DepositMode {
		DepositMode::Vault
	}

	fn target(&self) -> Address {
		self.vault
	}

	/// The relay performs the destination call, so the transfer estimate
	/// targets the user.
	fn estimate_recipient(&self, user: Address) -> Address {
		user
	}

	async fn validate(&self, _destination_asset: Address) -> Result<(), ValidatorError> {
		Ok(())
	}

	fn encode(&self, beneficiary: Address, assets: U256) -> Bytes {
		encode_vault_deposit(assets, beneficiary)
	}

	fn approval_spender(&self) -> Option<Address> {
		Some(self.vault)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_vault_strategy() {
		let vault = Address::repeat_byte(0x0b);
		let user = Address::repeat_byte(0xaa);
		let strategy = VaultStrategy::new(vault);

		strategy.validate(Address::ZERO).await.unwrap();
		assert_eq!(strategy.estimate_recipient(user), user);
		assert_eq!(strategy.approval_spender(), Some(vault));
		assert_eq!(
			strategy.encode(user, U256::from(42u64)),
			encode_vault_deposit(U256::from(42u64), user)
		);
	}
}
