//! Construction of a [`DepositRouter`] from configuration.
//!
//! Each boundary (quote provider, chain reader, yield feed) comes from its
//! crate's factory. Tests and embedders can bypass the factories with
//! [`RouterBuilder::build_with`].

use router_chain::{create_chain_reader, ChainReaderInterface};
use router_config::Config;
use router_deposit::ReceiverValidator;
use router_quote::{create_quote_provider, QuoteProviderInterface};
use router_yields::{create_yield_feed, YieldFeedInterface, YieldService};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::{DepositRouter, QuoteBuilder, ReceiverDeposit, RouteService, ToolCache};

/// Errors that can occur while building the router.
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Failed to create {component}: {reason}")]
	Component {
		component: &'static str,
		reason: String,
	},
}

pub struct RouterBuilder {
	config: Config,
}

impl RouterBuilder {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Builds the router with the default boundary implementations.
	pub fn build(self) -> Result<DepositRouter, BuilderError> {
		let provider = create_quote_provider(&self.config.provider).map_err(|e| {
			BuilderError::Component {
				component: "quote provider",
				reason: e.to_string(),
			}
		})?;
		let reader = create_chain_reader(&self.config.destination.rpc_url).map_err(|e| {
			BuilderError::Component {
				component: "chain reader",
				reason: e.to_string(),
			}
		})?;
		let feed = create_yield_feed(&self.config.yields).map_err(|e| BuilderError::Component {
			component: "yield feed",
			reason: e.to_string(),
		})?;

		tracing::info!(component = "provider", url = %self.config.provider.base_url, "Loaded");
		tracing::info!(component = "chain", chain_id = self.config.destination.chain_id, "Loaded");
		tracing::info!(component = "yields", url = %self.config.yields.url, "Loaded");

		self.build_with(provider, reader, feed)
	}

	/// Builds the router around the given boundary implementations.
	pub fn build_with(
		self,
		provider: Arc<dyn QuoteProviderInterface>,
		reader: Arc<dyn ChainReaderInterface>,
		feed: Arc<dyn YieldFeedInterface>,
	) -> Result<DepositRouter, BuilderError> {
		if self.config.destination.chain_id == 0 {
			return Err(BuilderError::Config(
				"destination chain_id must be non-zero".into(),
			));
		}

		let registry = Arc::new(self.config.registry.build());
		let validator = Arc::new(ReceiverValidator::new(reader));

		let quotes = QuoteBuilder::new(
			provider.clone(),
			validator.clone(),
			registry.clone(),
			self.config.destination.clone(),
		);
		let receiver = ReceiverDeposit::new(validator, registry.clone(), self.config.destination.clone());
		let routes = RouteService::new(provider.clone(), registry);
		let yields = YieldService::new(
			feed,
			Duration::from_secs(self.config.yields.refresh_interval_seconds),
		);

		Ok(DepositRouter::new(
			Arc::new(quotes),
			Arc::new(receiver),
			Arc::new(routes),
			provider,
			Arc::new(ToolCache::new()),
			Arc::new(yields),
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::{MockChainReader, MockQuoteProvider};
	use router_types::{Address, DepositMode, DepositRequest, ToolInfo, ToolsResponse};
	use router_yields::YieldError;

	struct StaticFeed;

	#[async_trait::async_trait]
	impl YieldFeedInterface for StaticFeed {
		async fn fetch_yields(&self) -> Result<router_yields::YieldRates, YieldError> {
			Ok([("Aave".to_string(), "3.85%".to_string())].into_iter().collect())
		}
	}

	fn config() -> Config {
		r#"
[router]
id = "test-router"

[destination]
vault_address = "0x00000000000000000000000000000000000000be"
"#
		.parse()
		.unwrap()
	}

	#[tokio::test]
	async fn test_build_with_mocks() {
		let mut provider = MockQuoteProvider::new();
		provider.expect_get_tools().times(1).returning(|| {
			Ok(ToolsResponse {
				bridges: vec![ToolInfo {
					key: "across".into(),
					name: "Across".into(),
					logo_uri: String::new(),
				}],
				exchanges: vec![],
			})
		});

		let router = RouterBuilder::new(config())
			.build_with(
				Arc::new(provider),
				Arc::new(MockChainReader::new()),
				Arc::new(StaticFeed),
			)
			.unwrap();

		assert_eq!(router.tool("across").await.unwrap().unwrap().name, "Across");
		assert!(router.tool("stargate").await.unwrap().is_none());
		assert_eq!(router.yields().await.unwrap()["Aave"], "3.85%");

		let request = DepositRequest::new(
			10,
			"1000000",
			Address::new([0xaa; 20]),
			DepositMode::Vault,
		);
		let call = router.derive_execution_call(&request, "0", Address::ZERO).unwrap();
		assert_eq!(call.from_amount, router_types::AMOUNT_PLACEHOLDER.to_string());
	}

	#[tokio::test]
	async fn test_receiver_completion_requires_receiver() {
		let router = RouterBuilder::new(config())
			.build_with(
				Arc::new(MockQuoteProvider::new()),
				Arc::new(MockChainReader::new()),
				Arc::new(StaticFeed),
			)
			.unwrap();
		let err = router
			.complete_receiver_deposit(Address::new([0xbb; 20]))
			.await
			.unwrap_err();
		assert!(matches!(err, crate::DepositError::NotConfigured(_)));
	}
}
