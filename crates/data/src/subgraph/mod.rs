//! Uniswap v4 subgraph access.
//!
//! - GraphQL queries for liquidity events and pool state
//! - Wire types mirroring the subgraph schema
//! - Conversion into domain entities

mod client;
mod error;
mod queries;
mod types;

pub use client::SubgraphClient;
pub use error::SubgraphError;
pub use types::{ModifyLiquidityDto, PoolDto, TokenDto, TransactionDto};
