//! Alloy-based chain reader.

use crate::{ChainError, ChainReaderInterface};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use alloy_transport_http::Http;
use async_trait::async_trait;
use router_types::{Address, U256};
use std::sync::Arc;

sol! {
	/// ERC-4626 style contracts expose the asset they accept.
	interface IAssetHolder {
		function asset() external view returns (address);
	}

	interface IERC20 {
		function balanceOf(address account) external view returns (uint256);
	}
}

/// Chain reader backed by a single HTTP provider.
pub struct AlloyChainReader {
	provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
}

impl AlloyChainReader {
	pub fn new(rpc_url: &str) -> Result<Self, ChainError> {
		let url = rpc_url
			.parse()
			.map_err(|e| ChainError::Network(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

		let provider = ProviderBuilder::new().on_http(url);

		Ok(Self {
			provider: Arc::new(provider) as Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
		})
	}

	async fn view_call(&self, to: Address, call_data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
		let request = TransactionRequest::default().to(to).input(call_data.into());
		let result = self
			.provider
			.call(&request)
			.await
			.map_err(|e| ChainError::Network(format!("eth_call to {} failed: {}", to, e)))?;
		Ok(result.to_vec())
	}
}

#[async_trait]
impl ChainReaderInterface for AlloyChainReader {
	async fn configured_asset(&self, contract: Address) -> Result<Address, ChainError> {
		let call_data = IAssetHolder::assetCall {}.abi_encode();
		let result = self.view_call(contract, call_data).await?;
		let asset = decode_asset(&result)?;
		tracing::debug!(%contract, %asset, "Read configured asset");
		Ok(asset)
	}

	async fn token_balance(&self, token: Address, holder: Address) -> Result<U256, ChainError> {
		let call_data = IERC20::balanceOfCall { account: holder }.abi_encode();
		let result = self.view_call(token, call_data).await?;
		let balance = decode_balance(&result)?;
		tracing::debug!(%token, %holder, %balance, "Read token balance");
		Ok(balance)
	}
}

fn decode_asset(data: &[u8]) -> Result<Address, ChainError> {
	IAssetHolder::assetCall::abi_decode_returns(data, true)
		.map(|ret| ret._0)
		.map_err(|e| ChainError::InvalidResponse(format!("asset() returned bad data: {}", e)))
}

fn decode_balance(data: &[u8]) -> Result<U256, ChainError> {
	IERC20::balanceOfCall::abi_decode_returns(data, true)
		.map(|ret| ret._0)
		.map_err(|e| ChainError::InvalidResponse(format!("balanceOf() returned bad data: {}", e)))
}
