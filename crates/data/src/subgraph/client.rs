//! HTTP client for the subgraph GraphQL endpoint.

use super::error::SubgraphError;
use super::queries;
use super::types::{ModifyLiquidityDto, PoolDto};
use crate::PositionDataSource;
use crate::config::SubgraphConfig;
use anyhow::Context;
use async_trait::async_trait;
use lp_metrics_domain::entities::{LiquidityEvent, PoolSnapshot};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct GraphQuery<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphError>>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ModifyLiquiditiesData {
    #[serde(rename = "modifyLiquidities")]
    modify_liquidities: Vec<ModifyLiquidityDto>,
}

#[derive(Debug, Deserialize)]
struct PoolData {
    pool: Option<PoolDto>,
}

impl<T> GraphResponse<T> {
    fn into_data(self) -> Result<T, SubgraphError> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(SubgraphError::GraphQl(messages.join("; ")));
        }
        self.data.ok_or(SubgraphError::MissingData)
    }
}

/// Subgraph client.
///
/// Holds only immutable configuration and a pooled HTTP client, so one
/// instance can be shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    client: Client,
    config: SubgraphConfig,
}

impl SubgraphClient {
    /// Creates a new client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SubgraphConfig) -> Result<Self, SubgraphError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &SubgraphConfig {
        &self.config
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, SubgraphError> {
        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&GraphQuery { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubgraphError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<GraphResponse<T>>().await?.into_data()
    }

    /// Fetches every page of a `modifyLiquidities` query.
    ///
    /// Pages with a timestamp cursor (`timestamp_lte`) rather than `skip`, so
    /// history is not capped by the gateway's `skip` limit. Events at the
    /// cursor timestamp that were already returned are dropped from the next
    /// page. `variables` must not contain `first` or `before`.
    async fn modify_liquidities(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Vec<LiquidityEvent>, SubgraphError> {
        let first = self.config.page_size;
        let mut before = u64::MAX;
        let mut seen_at_cursor: HashSet<String> = HashSet::new();
        let mut events = Vec::new();

        loop {
            let mut page_vars = variables.clone();
            page_vars["first"] = json!(first);
            page_vars["before"] = json!(before.to_string());

            let page: ModifyLiquiditiesData = self.query(query, page_vars).await?;
            let count = page.modify_liquidities.len();
            let mut added = 0usize;

            for dto in page.modify_liquidities {
                let event = LiquidityEvent::try_from(dto)?;
                if event.timestamp == before && seen_at_cursor.contains(&event.id) {
                    continue;
                }
                if event.timestamp < before {
                    before = event.timestamp;
                    seen_at_cursor.clear();
                }
                seen_at_cursor.insert(event.id.clone());
                events.push(event);
                added += 1;
            }
            debug!(before, count, added, "Fetched modifyLiquidities page");

            if count < first as usize {
                break;
            }
            if added == 0 {
                return Err(SubgraphError::PageStalled { timestamp: before });
            }
        }

        Ok(events)
    }

    /// Fetches a user's events in one pool, newest first.
    ///
    /// # Errors
    /// Returns an error on transport, GraphQL or parse failures.
    pub async fn user_pool_events(
        &self,
        user_address: &str,
        pool_address: &str,
    ) -> Result<Vec<LiquidityEvent>, SubgraphError> {
        let variables = json!({
            "origin": user_address.to_lowercase(),
            "pool": pool_address.to_lowercase(),
        });
        self.modify_liquidities(queries::USER_POOL_EVENTS, variables)
            .await
    }

    /// Fetches a user's events across all pools, newest first.
    ///
    /// # Errors
    /// Returns an error on transport, GraphQL or parse failures.
    pub async fn user_events(&self, user_address: &str) -> Result<Vec<LiquidityEvent>, SubgraphError> {
        let variables = json!({ "origin": user_address.to_lowercase() });
        self.modify_liquidities(queries::USER_EVENTS, variables).await
    }

    /// Fetches the current state of a pool.
    ///
    /// # Errors
    /// Returns [`SubgraphError::PoolNotFound`] if the pool does not exist.
    pub async fn pool(&self, pool_address: &str) -> Result<PoolSnapshot, SubgraphError> {
        let id = pool_address.to_lowercase();
        let data: PoolData = self.query(queries::POOL, json!({ "id": id })).await?;
        let dto = data.pool.ok_or(SubgraphError::PoolNotFound(id))?;
        dto.try_into()
    }
}

#[async_trait]
impl PositionDataSource for SubgraphClient {
    async fn fetch_events(
        &self,
        user_address: &str,
        pool_address: &str,
    ) -> anyhow::Result<Vec<LiquidityEvent>> {
        let events = self
            .user_pool_events(user_address, pool_address)
            .await
            .context("Failed to fetch user data")?;
        info!(
            user = user_address,
            pool = pool_address,
            count = events.len(),
            "Fetched liquidity events"
        );
        Ok(events)
    }

    async fn fetch_current_pool_state(&self, pool_address: &str) -> anyhow::Result<PoolSnapshot> {
        let pool = self
            .pool(pool_address)
            .await
            .context("Failed to fetch pool state")?;
        debug!(pool = pool_address, tick = pool.tick, "Fetched pool state");
        Ok(pool)
    }

    async fn fetch_user_events(&self, user_address: &str) -> anyhow::Result<Vec<LiquidityEvent>> {
        let events = self
            .user_events(user_address)
            .await
            .context("Failed to fetch user positions")?;
        info!(
            user = user_address,
            count = events.len(),
            "Fetched liquidity events across pools"
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subgraph::types::fixtures::event_json;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, page_size: u32) -> SubgraphClient {
        let config = SubgraphConfig::new("test-key")
            .with_url(server.uri())
            .with_page_size(page_size);
        SubgraphClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_events_sends_lowercased_variables() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "variables": {
                    "origin": "0xabcdef",
                    "pool": "0xpool",
                    "before": u64::MAX.to_string(),
                    "first": 100
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "modifyLiquidities": [
                    event_json("e2", "10", Some("100")),
                    event_json("e1", "20", Some("200")),
                ] }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 100);
        let events = client.fetch_events("0xABCDEF", "0xPOOL").await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "e2");
        assert_eq!(events[1].liquidity_delta, 20);
    }

    fn event_at(id: &str, timestamp: u64) -> Value {
        let mut event = event_json(id, "1", None);
        event["timestamp"] = json!(timestamp.to_string());
        event
    }

    async fn mount_page(server: &MockServer, before: &str, page: Vec<Value>) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": { "before": before } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "modifyLiquidities": page }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_pagination_follows_timestamp_cursor() {
        let server = MockServer::start().await;
        let newest = u64::MAX.to_string();
        mount_page(
            &server,
            &newest,
            vec![event_at("e5", 400), event_at("e4", 300), event_at("e3", 200)],
        )
        .await;
        mount_page(
            &server,
            "200",
            vec![event_at("e3", 200), event_at("e2", 200), event_at("e1", 100)],
        )
        .await;
        mount_page(&server, "100", vec![event_at("e1", 100)]).await;

        let client = client_for(&server, 3);
        let events = client.user_events("0xuser").await.unwrap();

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e5", "e4", "e3", "e2", "e1"]);
    }

    #[tokio::test]
    async fn test_history_ending_on_page_boundary_is_complete() {
        let server = MockServer::start().await;
        let newest = u64::MAX.to_string();
        mount_page(&server, &newest, vec![event_at("e2", 200), event_at("e1", 100)]).await;
        mount_page(&server, "100", vec![event_at("e1", 100)]).await;

        let client = client_for(&server, 2);
        let events = client.user_events("0xuser").await.unwrap();

        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn test_pagination_fails_when_cursor_cannot_advance() {
        let server = MockServer::start().await;
        let newest = u64::MAX.to_string();
        mount_page(&server, &newest, vec![event_at("e2", 200), event_at("e1", 200)]).await;
        mount_page(&server, "200", vec![event_at("e2", 200), event_at("e1", 200)]).await;

        let client = client_for(&server, 2);
        let err = client.user_events("0xuser").await.unwrap_err();

        assert!(matches!(err, SubgraphError::PageStalled { timestamp: 200 }));
    }

    #[tokio::test]
    async fn test_graphql_errors_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{ "message": "indexing error" }, { "message": "bad query" }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 100);
        let err = client.pool("0xpool").await.unwrap_err();

        match err {
            SubgraphError::GraphQl(message) => assert_eq!(message, "indexing error; bad query"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_pool() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "pool": null } })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, 100);
        let err = client.fetch_current_pool_state("0xPool").await.unwrap_err();

        assert!(err.to_string().contains("Failed to fetch pool state"));
        assert!(matches!(
            err.downcast_ref::<SubgraphError>(),
            Some(SubgraphError::PoolNotFound(id)) if id == "0xpool"
        ));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("auth error"))
            .mount(&server)
            .await;

        let client = client_for(&server, 100);
        let err = client.user_events("0xuser").await.unwrap_err();

        assert!(matches!(err, SubgraphError::Status { status: 401, .. }));
    }
}
