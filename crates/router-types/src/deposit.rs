//! Deposit types for the router.
//!
//! This module defines the user-facing deposit request, the destination-chain
//! contract call that is bundled with the bridge leg, and the quote the router
//! hands back to its caller.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::route::Route;

/// Reserved amount that tells the execution engine to substitute the real
/// bridged amount immediately before sending the destination call.
pub const AMOUNT_PLACEHOLDER: U256 = U256::MAX;

/// Strategy used to land bridged funds in the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositMode {
	/// Funds land in an intermediary receiver contract which deposits its
	/// full balance on the beneficiary's behalf.
	Receiver,
	/// Funds are routed straight into the vault through the provider's call
	/// relay; the vault pulls them via allowance.
	Vault,
}

impl fmt::Display for DepositMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DepositMode::Receiver => write!(f, "receiver"),
			DepositMode::Vault => write!(f, "vault"),
		}
	}
}

impl std::str::FromStr for DepositMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"receiver" => Ok(DepositMode::Receiver),
			"vault" => Ok(DepositMode::Vault),
			other => Err(format!("Unknown deposit mode: {}", other)),
		}
	}
}

/// A request to deposit the stable asset from `from_chain_id` into the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
	/// Source chain of the funds.
	pub from_chain_id: u64,
	/// Amount in base units of the source asset, as a decimal string.
	pub from_amount: String,
	/// Address that signs the bridge leg.
	pub user_address: Address,
	/// Owner of the vault shares; defaults to `user_address`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub beneficiary: Option<Address>,
	/// Deposit strategy for this request.
	pub mode: DepositMode,
}

impl DepositRequest {
	pub fn new(
		from_chain_id: u64,
		from_amount: impl Into<String>,
		user_address: Address,
		mode: DepositMode,
	) -> Self {
		Self {
			from_chain_id,
			from_amount: from_amount.into(),
			user_address,
			beneficiary: None,
			mode,
		}
	}

	/// Sets an explicit beneficiary for the vault shares.
	pub fn with_beneficiary(mut self, beneficiary: Address) -> Self {
		self.beneficiary = Some(beneficiary);
		self
	}

	/// Returns the beneficiary, falling back to the user.
	pub fn beneficiary(&self) -> Address {
		self.beneficiary.unwrap_or(self.user_address)
	}
}

/// Bridge-only estimate of what will arrive on the destination chain.
///
/// The amount is advisory: the delivered amount may differ and must never be
/// trusted for final calldata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeEstimate {
	/// Predicted destination amount in base units.
	pub to_amount_estimated: Option<String>,
	/// Bridge tool the estimate was computed for.
	pub tool: Option<String>,
	/// Estimated execution duration in seconds.
	pub execution_duration: Option<f64>,
}

/// One destination-chain invocation executed atomically with the bridge leg.
///
/// Serialized with the provider's wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCallSpec {
	/// Amount routed through the call, in base units.
	#[serde(rename = "fromAmount")]
	pub from_amount: String,
	/// Token the call receives.
	#[serde(rename = "fromTokenAddress")]
	pub from_token: Address,
	/// Contract invoked on the destination chain.
	#[serde(rename = "toContractAddress")]
	pub to_contract_address: Address,
	/// ABI-encoded call.
	#[serde(rename = "toContractCallData")]
	pub call_data: Bytes,
	/// Gas limit for the call.
	#[serde(rename = "toContractGasLimit")]
	pub gas_limit: String,
	/// Spender that must be approved before the call, if any.
	#[serde(
		rename = "toApprovalAddress",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub approval_address: Option<Address>,
}

/// A fully costed deposit route plus the advisory amount its calldata was
/// built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositQuote {
	#[serde(flatten)]
	pub route: Route,
	/// Bridge estimate used to build the destination call; display only.
	pub deposit_amount_out: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_beneficiary_defaults_to_user() {
		let user = address!("00000000000000000000000000000000000000aa");
		let request = DepositRequest::new(10, "1000000", user, DepositMode::Receiver);
		assert_eq!(request.beneficiary(), user);

		let other = address!("00000000000000000000000000000000000000bb");
		assert_eq!(request.with_beneficiary(other).beneficiary(), other);
	}

	#[test]
	fn test_deposit_mode_parsing() {
		assert_eq!("Receiver".parse::<DepositMode>(), Ok(DepositMode::Receiver));
		assert_eq!("vault".parse::<DepositMode>(), Ok(DepositMode::Vault));
		assert!("direct".parse::<DepositMode>().is_err());
		assert_eq!(
			serde_json::to_string(&DepositMode::Vault).unwrap(),
			"\"vault\""
		);
	}

	#[test]
	fn test_request_deserialization() {
		let json = r#"{
			"fromChainId": 42161,
			"fromAmount": "2500000",
			"userAddress": "0x00000000000000000000000000000000000000aa",
			"mode": "receiver"
		}"#;
		let request: DepositRequest = serde_json::from_str(json).unwrap();
		assert_eq!(request.from_chain_id, 42161);
		assert_eq!(request.beneficiary, None);
		assert_eq!(request.mode, DepositMode::Receiver);
	}

	#[test]
	fn test_contract_call_wire_names() {
		let call = ContractCallSpec {
			from_amount: "100".into(),
			from_token: Address::ZERO,
			to_contract_address: Address::ZERO,
			call_data: Bytes::from(vec![0xde, 0xad]),
			gas_limit: "500000".into(),
			approval_address: None,
		};
		let value = serde_json::to_value(&call).unwrap();
		assert_eq!(value["fromAmount"], "100");
		assert_eq!(value["toContractCallData"], "0xdead");
		assert_eq!(value["toContractGasLimit"], "500000");
		assert!(value.get("toApprovalAddress").is_none());
	}
}
