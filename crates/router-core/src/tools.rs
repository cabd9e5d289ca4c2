//! Process-wide cache of bridge and exchange metadata.
//!
//! Populated once from the provider and served read-only afterwards.
//! Concurrent first loads may race; they store equivalent tables, so the
//! last writer simply wins.

use arc_swap::ArcSwapOption;
use router_quote::{QuoteProviderError, QuoteProviderInterface};
use router_types::{ToolInfo, ToolsResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Tool metadata keyed by tool key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolTables {
	pub bridges: HashMap<String, ToolInfo>,
	pub exchanges: HashMap<String, ToolInfo>,
}

impl From<ToolsResponse> for ToolTables {
	fn from(response: ToolsResponse) -> Self {
		let index = |tools: Vec<ToolInfo>| {
			tools
				.into_iter()
				.map(|tool| (tool.key.clone(), tool))
				.collect::<HashMap<_, _>>()
		};
		Self {
			bridges: index(response.bridges),
			exchanges: index(response.exchanges),
		}
	}
}

#[derive(Default)]
pub struct ToolCache {
	tables: ArcSwapOption<ToolTables>,
}

impl ToolCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached tables, fetching them first if the cache is empty.
	pub async fn load(
		&self,
		provider: &dyn QuoteProviderInterface,
	) -> Result<Arc<ToolTables>, QuoteProviderError> {
		if let Some(tables) = self.tables.load_full() {
			return Ok(tables);
		}

		let tables = Arc::new(ToolTables::from(provider.get_tools().await?));
		debug!(
			bridges = tables.bridges.len(),
			exchanges = tables.exchanges.len(),
			"Loaded tool metadata"
		);
		self.tables.store(Some(tables.clone()));
		Ok(tables)
	}

	pub fn is_loaded(&self) -> bool {
		self.tables.load().is_some()
	}

	/// Looks up a tool by key, bridges first. `None` until loaded.
	pub fn get(&self, key: &str) -> Option<ToolInfo> {
		let tables = self.tables.load_full()?;
		tables
			.bridges
			.get(key)
			.or_else(|| tables.exchanges.get(key))
			.cloned()
	}

	pub fn clear(&self) {
		self.tables.store(None);
	}
}
