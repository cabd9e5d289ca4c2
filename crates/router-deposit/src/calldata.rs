//! ABI encoding of the destination-chain deposit calls.
//!
//! Two calls are supported:
//! - `depositToVault(beneficiary, minSharesOut)` on the receiver contract,
//!   which deposits its whole balance and so never needs the bridged amount
//! - ERC-4626 `deposit(assets, receiver)` on the vault itself

use alloy_sol_types::{sol, SolCall};
use router_types::{parse_address, parse_base_units, Address, Bytes, U256};

use crate::CalldataError;

sol! {
	interface IVaultReceiver {
		function depositToVault(address beneficiary, uint256 minSharesOut) external;
	}

	interface IERC4626 {
		function deposit(uint256 assets, address receiver) external returns (uint256 shares);
	}
}

/// Encodes `depositToVault(beneficiary, minSharesOut)`.
///
/// An omitted `min_shares_out` encodes as zero.
pub fn encode_receiver_deposit(beneficiary: Address, min_shares_out: Option<U256>) -> Bytes {
	IVaultReceiver::depositToVaultCall {
		beneficiary,
		minSharesOut: min_shares_out.unwrap_or(U256::ZERO),
	}
	.abi_encode()
	.into()
}

/// Encodes `deposit(assets, receiver)`.
pub fn encode_vault_deposit(assets: U256, receiver: Address) -> Bytes {
	IERC4626::depositCall { assets, receiver }.abi_encode().into()
}

/// Like [`encode_receiver_deposit`], but parses string inputs and rejects
/// malformed ones with [`CalldataError::InvalidArgument`].
pub fn encode_receiver_deposit_from_str(
	beneficiary: &str,
	min_shares_out: Option<&str>,
) -> Result<Bytes, CalldataError> {
	let beneficiary = parse_address(beneficiary).map_err(CalldataError::InvalidArgument)?;
	let min_shares_out = min_shares_out.map(|raw| parse_amount(raw, "minSharesOut")).transpose()?;
	Ok(encode_receiver_deposit(beneficiary, min_shares_out))
}

/// Like [`encode_vault_deposit`], but parses string inputs and rejects
/// malformed ones with [`CalldataError::InvalidArgument`].
pub fn encode_vault_deposit_from_str(assets: &str, receiver: &str) -> Result<Bytes, CalldataError> {
	let assets = parse_amount(assets, "assets")?;
	let receiver = parse_address(receiver).map_err(CalldataError::InvalidArgument)?;
	Ok(encode_vault_deposit(assets, receiver))
}

fn parse_amount(raw: &str, field: &str) -> Result<U256, CalldataError> {
	parse_base_units(raw).ok_or_else(|| {
		CalldataError::InvalidArgument(format!("Invalid {} '{}': expected base units", field, raw))
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use router_types::AMOUNT_PLACEHOLDER;

	const BENEFICIARY: &str = "0x00000000000000000000000000000000000000aA";

	#[test]
	fn test_selectors() {
		assert_eq!(
			IVaultReceiver::depositToVaultCall::SIGNATURE,
			"depositToVault(address,uint256)"
		);
		assert_eq!(IERC4626::depositCall::SELECTOR, [0x6e, 0x55, 0x3f, 0x65]);
	}

	#[test]
	fn test_receiver_default_min_shares_is_zero() {
		let beneficiary = parse_address(BENEFICIARY).unwrap();
		assert_eq!(
			encode_receiver_deposit(beneficiary, None),
			encode_receiver_deposit(beneficiary, Some(U256::ZERO))
		);
		assert_eq!(
			encode_receiver_deposit_from_str(BENEFICIARY, None).unwrap(),
			encode_receiver_deposit_from_str(BENEFICIARY, Some("0")).unwrap()
		);
	}

	#[test]
	fn test_receiver_layout() {
		let beneficiary = parse_address(BENEFICIARY).unwrap();
		let data = encode_receiver_deposit(beneficiary, Some(U256::from(7u64)));
		assert_eq!(data.len(), 4 + 32 + 32);
		assert_eq!(&data[..4], IVaultReceiver::depositToVaultCall::SELECTOR.as_slice());
		assert_eq!(&data[16..36], beneficiary.as_slice());
		assert_eq!(data[67], 7);
	}

	#[test]
	fn test_vault_layout() {
		let receiver = parse_address(BENEFICIARY).unwrap();
		let data = encode_vault_deposit(U256::from(1_000_000u64), receiver);
		assert_eq!(&data[..4], [0x6e, 0x55, 0x3f, 0x65].as_slice());
		assert_eq!(U256::from_be_slice(&data[4..36]), U256::from(1_000_000u64));
		assert_eq!(&data[48..68], receiver.as_slice());
	}

	#[test]
	fn test_vault_placeholder_encodes_all_ones() {
		let receiver = parse_address(BENEFICIARY).unwrap();
		let data = encode_vault_deposit(AMOUNT_PLACEHOLDER, receiver);
		assert!(data[4..36].iter().all(|b| *b == 0xff));
	}

	#[test]
	fn test_case_insensitive_addresses() {
		assert_eq!(
			encode_vault_deposit_from_str("5", &BENEFICIARY.to_lowercase()).unwrap(),
			encode_vault_deposit_from_str("5", BENEFICIARY).unwrap()
		);
	}

	#[test]
	fn test_invalid_arguments() {
		assert!(matches!(
			encode_receiver_deposit_from_str("0xnothex", None),
			Err(CalldataError::InvalidArgument(_))
		));
		assert!(matches!(
			encode_receiver_deposit_from_str(BENEFICIARY, Some("-1")),
			Err(CalldataError::InvalidArgument(_))
		));
		assert!(matches!(
			encode_vault_deposit_from_str("1.5", BENEFICIARY),
			Err(CalldataError::InvalidArgument(_))
		));
		assert!(matches!(
			encode_vault_deposit_from_str("100", ""),
			Err(CalldataError::InvalidArgument(_))
		));
	}
}
