//! Conversion utilities for user-supplied values.
//!
//! Amounts travel as decimal strings of base units and may exceed 2^53, so
//! they are always parsed into `U256` and never through floating point.
//! USD values are parsed into `Decimal`.

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a hex address, accepting any letter case.
pub fn parse_address(value: &str) -> Result<Address, String> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err("Address is empty".to_string());
	}
	Address::from_str(trimmed).map_err(|e| format!("Invalid address '{}': {}", trimmed, e))
}

/// Parses a non-negative decimal integer of base units.
///
/// Returns `None` for empty strings, signs, decimal points, hex and any value
/// that does not fit in `uint256`.
pub fn parse_base_units(value: &str) -> Option<U256> {
	let trimmed = value.trim();
	if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	U256::from_str_radix(trimmed, 10).ok()
}

/// Parses a strictly positive decimal integer of base units.
pub fn parse_positive_amount(value: &str) -> Option<U256> {
	parse_base_units(value).filter(|amount| !amount.is_zero())
}

/// Parses a USD amount, accepting scientific notation for tiny values.
pub fn parse_usd(value: &str) -> Option<Decimal> {
	let value = value.trim();
	Decimal::from_str(value)
		.or_else(|_| Decimal::from_scientific(value))
		.ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_address_case_insensitive() {
		let lower = parse_address("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913").unwrap();
		let mixed = parse_address("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913").unwrap();
		assert_eq!(lower, mixed);
		assert!(parse_address("").is_err());
		assert!(parse_address("0x1234").is_err());
		assert!(parse_address("not-an-address").is_err());
	}

	#[test]
	fn test_parse_base_units() {
		assert_eq!(parse_base_units("0"), Some(U256::ZERO));
		assert_eq!(parse_base_units("1000000"), Some(U256::from(1_000_000u64)));
		assert_eq!(parse_base_units(""), None);
		assert_eq!(parse_base_units("-5"), None);
		assert_eq!(parse_base_units("1.5"), None);
		assert_eq!(parse_base_units("0x10"), None);
		assert_eq!(parse_base_units("abc"), None);
	}

	#[test]
	fn test_parse_beyond_f64_precision() {
		// 2^53 + 1 is not representable as an f64
		let amount = parse_base_units("9007199254740993").unwrap();
		assert_eq!(amount.to_string(), "9007199254740993");
	}

	#[test]
	fn test_parse_overflow() {
		let max = U256::MAX.to_string();
		assert_eq!(parse_base_units(&max), Some(U256::MAX));
		let too_big = format!("{}0", max);
		assert_eq!(parse_base_units(&too_big), None);
	}

	#[test]
	fn test_parse_positive_amount() {
		assert_eq!(parse_positive_amount("0"), None);
		assert_eq!(parse_positive_amount("000"), None);
		assert_eq!(parse_positive_amount("42"), Some(U256::from(42u64)));
		assert_eq!(parse_positive_amount("nope"), None);
	}

	#[test]
	fn test_parse_usd() {
		assert_eq!(parse_usd("0.15"), Decimal::from_str("0.15").ok());
		assert_eq!(parse_usd(" 4e-3 "), Decimal::from_str("0.004").ok());
		assert_eq!(parse_usd("n/a"), None);
		assert_eq!(parse_usd(""), None);
	}
}
