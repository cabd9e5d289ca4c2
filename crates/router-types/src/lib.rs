//! Common types module for the deposit router.
//!
//! This module defines the core data types shared by every router component:
//! deposit requests and contract call specifications, the provider's route
//! model, presentation views derived from routes, and the stable-asset
//! registry that maps chains to their deposit token.

/// Stable-asset registry mapping chains to their deposit token.
pub mod assets;
/// Deposit requests, quotes and destination contract calls.
pub mod deposit;
/// Presentation views derived from quoted routes.
pub mod presentation;
/// Request and response shapes of the bridge/quote provider boundary.
pub mod provider;
/// Multi-step execution routes returned by the quote provider.
pub mod route;
/// Secret handling for API keys.
pub mod secret_string;
/// Utility functions for common type conversions.
pub mod utils;

pub use alloy_primitives::{Address, Bytes, U256};
pub use assets::{deserialize_chain_map, RegistryError, TokenRegistry, GENERIC_STABLE_ASSETS};
pub use deposit::*;
pub use presentation::*;
pub use provider::*;
pub use route::*;
pub use secret_string::SecretString;
pub use utils::{
	format_usd, parse_address, parse_base_units, parse_positive_amount, parse_usd,
	shorten_address,
};
