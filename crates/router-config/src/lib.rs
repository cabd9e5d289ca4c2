//! Configuration module for the deposit router.
//!
//! Configuration is loaded from TOML. String values may reference environment
//! variables with `${VAR}` or `${VAR:-default}`; placeholders are resolved
//! before parsing.
//!
//! ## Modular Configuration Support
//!
//! Configurations can be split into multiple files:
//! - Use `include = ["file1.toml", "file2.toml"]` to include other config files
//! - Each top-level section must be unique across all files (no duplicates allowed)
//!
//! Contract addresses are deliberately not required at load time. A deposit
//! mode whose address is missing fails when it is used, leaving the other mode
//! usable.

mod loader;

pub use loader::ConfigLoader;

use regex::Regex;
use router_types::{deserialize_chain_map, Address, DepositMode, SecretString, TokenRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the deposit router.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Identity of this router instance.
	pub router: RouterConfig,
	/// Destination chain and its contracts.
	#[serde(default)]
	pub destination: DestinationConfig,
	/// Project-specific stable-asset overrides.
	#[serde(default)]
	pub registry: RegistryConfig,
	/// Bridge/quote provider settings.
	#[serde(default)]
	pub provider: ProviderConfig,
	/// Yield-rate feed settings.
	#[serde(default)]
	pub yields: YieldsConfig,
	/// Configuration for the HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Configuration specific to the router instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
	/// Unique identifier for this router instance.
	pub id: String,
}

/// Destination chain configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DestinationConfig {
	/// Chain hosting the vault. Defaults to Base.
	#[serde(default = "default_destination_chain_id")]
	pub chain_id: u64,
	/// RPC endpoint used for read-only contract calls.
	#[serde(default = "default_rpc_url")]
	pub rpc_url: String,
	/// Intermediary receiver contract (receiver mode).
	#[serde(default)]
	pub receiver_address: Option<String>,
	/// Vault contract (vault mode).
	#[serde(default)]
	pub vault_address: Option<String>,
	/// Mode used when a request does not name one.
	#[serde(default = "default_mode")]
	pub default_mode: DepositMode,
	/// Gas limit attached to the destination call.
	#[serde(default = "default_deposit_gas_limit")]
	pub deposit_gas_limit: u64,
}

impl Default for DestinationConfig {
	fn default() -> Self {
		Self {
			chain_id: default_destination_chain_id(),
			rpc_url: default_rpc_url(),
			receiver_address: None,
			vault_address: None,
			default_mode: default_mode(),
			deposit_gas_limit: default_deposit_gas_limit(),
		}
	}
}

impl DestinationConfig {
	/// Returns the configured receiver, or `None` when unset or blank.
	pub fn receiver(&self) -> Result<Option<Address>, ConfigError> {
		optional_address(self.receiver_address.as_deref(), "receiver_address")
	}

	/// Returns the configured vault, or `None` when unset or blank.
	pub fn vault(&self) -> Result<Option<Address>, ConfigError> {
		optional_address(self.vault_address.as_deref(), "vault_address")
	}
}

fn default_destination_chain_id() -> u64 {
	8453
}

fn default_rpc_url() -> String {
	"https://mainnet.base.org".to_string()
}

fn default_mode() -> DepositMode {
	DepositMode::Receiver
}

fn default_deposit_gas_limit() -> u64 {
	500_000
}

/// Project-specific stable-asset table, keyed by chain ID.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistryConfig {
	#[serde(default, deserialize_with = "deserialize_chain_map")]
	pub project: HashMap<u64, Address>,
}

impl RegistryConfig {
	/// Builds the two-table registry with this project's overrides.
	pub fn build(&self) -> TokenRegistry {
		TokenRegistry::with_project_overrides(self.project.clone())
	}
}

/// Bridge/quote provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
	/// Base URL of the provider's REST API.
	#[serde(default = "default_provider_url")]
	pub base_url: String,
	/// Optional API key, sent as a request header.
	#[serde(default)]
	pub api_key: Option<SecretString>,
	/// Integrator name reported to the provider.
	#[serde(default)]
	pub integrator: Option<String>,
	/// Per-request timeout in seconds.
	#[serde(default = "default_provider_timeout")]
	pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
	fn default() -> Self {
		Self {
			base_url: default_provider_url(),
			api_key: None,
			integrator: None,
			timeout_seconds: default_provider_timeout(),
		}
	}
}

fn default_provider_url() -> String {
	"https://li.quest/v1".to_string()
}

fn default_provider_timeout() -> u64 {
	30
}

/// Yield feed configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YieldsConfig {
	/// Pools endpoint of the yield aggregator.
	#[serde(default = "default_yields_url")]
	pub url: String,
	/// Freshness window of cached yields in seconds.
	#[serde(default = "default_refresh_interval")]
	pub refresh_interval_seconds: u64,
}

impl Default for YieldsConfig {
	fn default() -> Self {
		Self {
			url: default_yields_url(),
			refresh_interval_seconds: default_refresh_interval(),
		}
	}
}

fn default_yields_url() -> String {
	"https://yields.llama.fi/pools".to_string()
}

fn default_refresh_interval() -> u64 {
	60
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the API server is enabled.
	#[serde(default)]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
	3000
}

/// Parses an optional address; blank strings count as unset.
fn optional_address(value: Option<&str>, field: &str) -> Result<Option<Address>, ConfigError> {
	match value.map(str::trim) {
		None | Some("") => Ok(None),
		Some(raw) => Address::from_str(raw)
			.map(Some)
			.map_err(|e| ConfigError::Validation(format!("Invalid {} '{}': {}", field, raw, e))),
	}
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of the environment variable
/// `VAR_NAME`, or with `default` for `${VAR_NAME:-default}`. Input is limited
/// to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)));
				},
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}
	result.push_str(&input[last_end..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, following `include` directives.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let path_buf = Path::new(path);
		let base_dir = path_buf.parent().unwrap_or_else(|| Path::new("."));

		let mut loader = ConfigLoader::new(base_dir);
		let file_name = path_buf
			.file_name()
			.ok_or_else(|| ConfigError::Validation(format!("Invalid path: {}", path)))?;
		loader.load_config(file_name).await
	}

	/// Structural validation. Contract addresses are checked at call time.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.router.id.trim().is_empty() {
			return Err(ConfigError::Validation("Router ID cannot be empty".into()));
		}
		if self.destination.chain_id == 0 {
			return Err(ConfigError::Validation(
				"Destination chain_id must be non-zero".into(),
			));
		}
		if self.destination.rpc_url.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Destination rpc_url cannot be empty".into(),
			));
		}
		if self.destination.deposit_gas_limit == 0 {
			return Err(ConfigError::Validation(
				"deposit_gas_limit must be greater than 0".into(),
			));
		}
		if self.provider.base_url.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Provider base_url cannot be empty".into(),
			));
		}
		if self.provider.timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"Provider timeout_seconds must be greater than 0".into(),
			));
		}
		if self.yields.refresh_interval_seconds == 0 {
			return Err(ConfigError::Validation(
				"Yields refresh_interval_seconds must be greater than 0".into(),
			));
		}
		if self.registry.project.contains_key(&0) {
			return Err(ConfigError::Validation(
				"Registry entries must use a non-zero chain ID".into(),
			));
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
