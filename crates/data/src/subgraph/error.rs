use thiserror::Error;

/// Errors raised by the subgraph client.
#[derive(Debug, Error)]
pub enum SubgraphError {
    /// Transport failure.
    #[error("Subgraph request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success HTTP status.
    #[error("Subgraph returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// The response carried GraphQL errors.
    #[error("Subgraph errors: {0}")]
    GraphQl(String),
    /// The response had neither data nor errors.
    #[error("Subgraph response contained no data")]
    MissingData,
    /// No pool exists with the requested address.
    #[error("Pool {0} not found")]
    PoolNotFound(String),
    /// A full page held only events already returned at the cursor
    /// timestamp, so paging cannot advance.
    #[error("More than one page of events share timestamp {timestamp}")]
    PageStalled {
        /// Cursor timestamp.
        timestamp: u64,
    },
    /// A required field was null.
    #[error("Missing field {0}")]
    MissingField(&'static str),
    /// A numeric field could not be parsed.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Raw value.
        value: String,
    },
}
