//! Yield-rate feed for the deposit router.
//!
//! Rates are informational: they are fetched from an aggregator, cached for a
//! short freshness window, and never block a deposit flow.

use async_trait::async_trait;
use router_config::YieldsConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Re-export implementations
pub mod implementations {
	pub mod defillama;
}

/// Protocol name to APY string, e.g. `"Aave" -> "3.85%"`.
pub type YieldRates = HashMap<String, String>;

/// Errors that can occur while fetching yields.
#[derive(Debug, Error)]
pub enum YieldError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("Yield API returned status {0}")]
	HttpStatus(u16),
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
}

/// Source of yield rates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait YieldFeedInterface: Send + Sync {
	async fn fetch_yields(&self) -> Result<YieldRates, YieldError>;
}

/// Creates the default yield feed.
pub fn create_yield_feed(config: &YieldsConfig) -> Result<Arc<dyn YieldFeedInterface>, YieldError> {
	let feed = implementations::defillama::DefiLlamaYieldFeed::new(&config.url)?;
	Ok(Arc::new(feed))
}

struct CachedYields {
	data: YieldRates,
	last_refreshed_at: Instant,
}

/// Owned `{data, last_refreshed_at}` cache with a freshness window.
pub struct YieldCache {
	state: RwLock<Option<CachedYields>>,
	freshness: Duration,
}

impl YieldCache {
	pub fn new(freshness: Duration) -> Self {
		Self {
			state: RwLock::new(None),
			freshness,
		}
	}

	/// Returns the cached rates if they are still fresh.
	pub async fn fresh(&self) -> Option<YieldRates> {
		let state = self.state.read().await;
		state
			.as_ref()
			.filter(|cached| cached.last_refreshed_at.elapsed() < self.freshness)
			.map(|cached| cached.data.clone())
	}

	/// Returns the cached rates regardless of age.
	pub async fn last_known(&self) -> Option<YieldRates> {
		self.state.read().await.as_ref().map(|c| c.data.clone())
	}

	pub async fn store(&self, data: YieldRates) {
		*self.state.write().await = Some(CachedYields {
			data,
			last_refreshed_at: Instant::now(),
		});
	}
}

/// Serves yield rates through a [`YieldCache`].
pub struct YieldService {
	feed: Arc<dyn YieldFeedInterface>,
	cache: YieldCache,
	refresh_interval: Duration,
}

impl YieldService {
	pub fn new(feed: Arc<dyn YieldFeedInterface>, refresh_interval: Duration) -> Self {
		Self {
			feed,
			cache: YieldCache::new(refresh_interval),
			refresh_interval,
		}
	}

	/// Returns fresh rates, refetching when the cache has gone stale.
	///
	/// A failed refetch falls back to the last known rates when there are any.
	pub async fn get_yields(&self) -> Result<YieldRates, YieldError> {
		if let Some(rates) = self.cache.fresh().await {
			return Ok(rates);
		}

		match self.refresh().await {
			Ok(rates) => Ok(rates),
			Err(e) => match self.cache.last_known().await {
				Some(stale) => {
					tracing::warn!("Yield refresh failed, serving stale rates: {}", e);
					Ok(stale)
				},
				None => Err(e),
			},
		}
	}

	/// Fetches rates and stores them.
	pub async fn refresh(&self) -> Result<YieldRates, YieldError> {
		let rates = self.feed.fetch_yields().await?;
		tracing::debug!(protocols = rates.len(), "Refreshed yield rates");
		self.cache.store(rates.clone()).await;
		Ok(rates)
	}

	/// Spawns a task that refreshes the cache every refresh interval.
	pub fn spawn_refresh_loop(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
		tokio::spawn(async move {
			let mut interval = tokio::time::interval(self.refresh_interval);
			loop {
				interval.tick().await;
				if let Err(e) = self.refresh().await {
					tracing::warn!("Background yield refresh failed: {}", e);
				}
			}
		})
	}
}
