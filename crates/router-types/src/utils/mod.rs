//! Utility functions for common type conversions and transformations.
//!
//! Helpers for parsing user-supplied amounts and addresses, and for
//! formatting amounts and addresses for display.

pub mod conversion;
pub mod formatting;

pub use conversion::{parse_address, parse_base_units, parse_positive_amount, parse_usd};
pub use formatting::{format_usd, shorten_address};
