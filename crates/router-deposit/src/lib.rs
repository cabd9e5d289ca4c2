//! Deposit strategies for the router.
//!
//! A deposit lands bridged funds in the vault in one of two ways, selected by
//! [`DepositMode`]. Each mode is a [`DepositStrategy`] chosen once per request.

use async_trait::async_trait;
use router_chain::ChainError;
use router_types::{Address, Bytes, ContractCallSpec, DepositMode, U256};
use std::sync::Arc;
use thiserror::Error;

pub mod calldata;
pub mod validator;

/// Re-export implementations
pub mod implementations {
	pub mod strategies {
		pub mod receiver;
		pub mod vault;
	}
}

pub use validator::ReceiverValidator;

/// Errors raised by the calldata encoders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalldataError {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}

/// Errors raised by the on-chain receiver checks.
#[derive(Debug, Error)]
pub enum ValidatorError {
	/// The contract is wired to a different asset than expected.
	#[error("Asset mismatch: expected {expected}, contract reports {actual}")]
	AssetMismatch { expected: Address, actual: Address },
	/// The contract holds none of the asset yet.
	#[error("Contract {contract} holds no {asset}")]
	NotFunded { contract: Address, asset: Address },
	/// The read itself failed.
	#[error(transparent)]
	Chain(#[from] ChainError),
}

/// Errors that can occur while selecting a strategy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StrategyError {
	/// The contract the mode targets is not configured.
	#[error("{0} mode requires a configured {1} address")]
	MissingTarget(DepositMode, &'static str),
}

/// Mode-specific parts of a deposit.
#[async_trait]
pub trait DepositStrategy: Send + Sync {
	fn mode(&self) -> DepositMode;

	/// Contract invoked on the destination chain.
	fn target(&self) -> Address;

	/// Destination recipient used for the bridge-only estimate.
	fn estimate_recipient(&self, user: Address) -> Address;

	/// Checks run before any quote is requested.
	async fn validate(&self, destination_asset: Address) -> Result<(), ValidatorError>;

	/// Encodes the destination call. `assets` is ignored by modes whose call
	/// does not depend on the amount.
	fn encode(&self, beneficiary: Address, assets: U256) -> Bytes;

	/// Spender that must be approved for the destination call, if any.
	fn approval_spender(&self) -> Option<Address>;

	/// Assembles the destination call spec for this mode.
	fn contract_call(
		&self,
		from_token: Address,
		from_amount: String,
		call_data: Bytes,
		gas_limit: u64,
	) -> ContractCallSpec {
		ContractCallSpec {
			from_amount,
			from_token,
			to_contract_address: self.target(),
			call_data,
			gas_limit: gas_limit.to_string(),
			approval_address: self.approval_spender(),
		}
	}
}

/// Destination contracts available to the strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepositTargets {
	pub receiver: Option<Address>,
	pub vault: Option<Address>,
}

/// Creates the strategy for `mode`.
///
/// Fails only when the contract that mode needs is missing; the other mode
/// stays usable.
pub fn create_strategy(
	mode: DepositMode,
	targets: DepositTargets,
	validator: Arc<ReceiverValidator>,
) -> Result<Box<dyn DepositStrategy>, StrategyError> {
	use implementations::strategies::{receiver::ReceiverStrategy, vault::VaultStrategy};

	match mode {
		DepositMode::Receiver => {
			let receiver = targets
				.receiver
				.ok_or(StrategyError::MissingTarget(mode, "receiver"))?;
			Ok(Box::new(ReceiverStrategy::new(receiver, validator)))
		},
		DepositMode::Vault => {
			let vault = targets
				.vault
				.ok_or(StrategyError::MissingTarget(mode, "vault"))?;
			Ok(Box::new(VaultStrategy::new(vault)))
		},
	}
}
