//! String formatting utilities for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a USD amount as `$X.XXXX`.
pub fn format_usd(amount: Decimal) -> String {
	let mut rounded = amount.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
	rounded.rescale(4);
	format!("${}", rounded)
}

/// Shortens an address to `0x1234…abcd` for display.
pub fn shorten_address(address: &str) -> String {
	let chars: Vec<char> = address.chars().collect();
	if chars.len() <= 10 {
		return address.to_string();
	}
	let head: String = chars[..6].iter().collect();
	let tail: String = chars[chars.len() - 4..].iter().collect();
	format!("{}…{}", head, tail)
}
