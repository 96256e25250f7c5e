//! Subgraph endpoint configuration.

use thiserror::Error;

/// Uniswap v4 subgraph on The Graph gateway.
pub const DEFAULT_SUBGRAPH_URL: &str =
    "https://gateway.thegraph.com/api/subgraphs/id/EoCvJ5tyMLMJcTnLQwWpjAtPdn74PcrZgzfcT5bYxNBH";

/// Largest `first` argument the gateway accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing {0} in environment variables")]
    MissingVar(&'static str),
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {name}: {value}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Configuration for the subgraph client.
#[derive(Debug, Clone)]
pub struct SubgraphConfig {
    /// GraphQL endpoint URL.
    pub url: String,
    /// Gateway API key sent as a bearer token.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Number of events requested per page.
    pub page_size: u32,
}

impl SubgraphConfig {
    /// Creates a configuration for the default endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_SUBGRAPH_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Sets the endpoint URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets the page size, clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Loads the configuration from process environment variables.
    ///
    /// Reads `SUBGRAPH_API_KEY` (required), `SUBGRAPH_URL`,
    /// `SUBGRAPH_TIMEOUT_SECS` and `SUBGRAPH_PAGE_SIZE`.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a numeric variable does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// See [`SubgraphConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("SUBGRAPH_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("SUBGRAPH_API_KEY"))?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup("SUBGRAPH_URL") {
            config = config.with_url(url);
        }
        if let Some(raw) = lookup("SUBGRAPH_TIMEOUT_SECS") {
            let secs = raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "SUBGRAPH_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config = config.with_timeout_secs(secs);
        }
        if let Some(raw) = lookup("SUBGRAPH_PAGE_SIZE") {
            let size = raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "SUBGRAPH_PAGE_SIZE",
                value: raw.clone(),
            })?;
            config = config.with_page_size(size);
        }

        Ok(config)
    }
}
