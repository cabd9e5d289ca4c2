//! On-chain read boundary for the deposit router.
//!
//! The router never sends transactions. It only needs two view calls on the
//! destination chain: which asset a receiver contract is wired to, and how
//! much of that asset a contract currently holds.

use async_trait::async_trait;
use router_types::{Address, U256};
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Errors that can occur during on-chain reads.
#[derive(Debug, Error)]
pub enum ChainError {
	/// Transport or RPC failure.
	#[error("Network error: {0}")]
	Network(String),
	/// The contract answered with data that could not be decoded.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
}

/// Read-only view of the destination chain.
#[async_trait]
pub trait ChainReaderInterface: Send + Sync {
	/// Returns the asset `contract` reports through its `asset()` view.
	async fn configured_asset(&self, contract: Address) -> Result<Address, ChainError>;

	/// Returns the ERC-20 balance of `holder` in `token`.
	async fn token_balance(&self, token: Address, holder: Address) -> Result<U256, ChainError>;
}

/// Creates the default chain reader for an HTTP RPC endpoint.
pub fn create_chain_reader(rpc_url: &str) -> Result<Arc<dyn ChainReaderInterface>, ChainError> {
	let reader = implementations::evm::alloy::AlloyChainReader::new(rpc_url)?;
	Ok(Arc::new(reader))
}
