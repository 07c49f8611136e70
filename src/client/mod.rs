//! GraphQL client preconfigured for the subscription endpoint.
//!
//! Each client instance keeps its own in-memory cache of query results:
//!
//! - `FetchPolicy::CacheFirst` answers a repeated query from the cache;
//! - `FetchPolicy::NetworkOnly` always fetches and refreshes the cache;
//! - a successful mutation clears the cache;
//! - responses carrying errors are never cached.
//!
//! # Example
//!
//! ```ignore
//! let client = SubscriptionClient::new()?;
//! let categories = client.categories().await?;
//! let edited = client
//!     .edit_subscription("1", SubscriptionPatch::default().with_price(17.99))
//!     .await?;
//! ```

mod cache;
mod error;
mod operation;

pub use cache::{CacheKey, ResponseCache};
pub use error::{ClientError, GraphqlError, GraphqlErrorLocation};
pub use operation::{
    AddSubscriptionData, AddSubscriptionMutation, CategoriesData, CategoriesQuery,
    DeleteSubscriptionData, DeleteSubscriptionMutation, EditSubscriptionData,
    EditSubscriptionMutation, EditVariables, GraphqlOperation, IdVariables, NoVariables,
    OperationKind, SubscriptionData, SubscriptionQuery, SubscriptionsData, SubscriptionsQuery,
};

use crate::types::{NewSubscription, Subscription, SubscriptionId, SubscriptionPatch};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Endpoint the bundled server listens on by default.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";

/// How queries use the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    #[default]
    CacheFirst,
    NetworkOnly,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub cache_capacity: NonZeroUsize,
    pub fetch_policy: FetchPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            cache_capacity: NonZeroUsize::new(128).unwrap_or(NonZeroUsize::MIN),
            fetch_policy: FetchPolicy::CacheFirst,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a, V> {
    query: &'a str,
    variables: &'a V,
    operation_name: &'a str,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

/// Client for the subscription GraphQL endpoint.
///
/// Clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct SubscriptionClient {
    http: reqwest::Client,
    config: ClientConfig,
    cache: Arc<ResponseCache>,
}

impl SubscriptionClient {
    /// Client for [`DEFAULT_ENDPOINT`].
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    /// Client for a different endpoint, otherwise default settings.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let cache = Arc::new(ResponseCache::new(config.cache_capacity));
        Ok(Self {
            http,
            config,
            cache,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Number of cached query results.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Execute a typed operation using the configured fetch policy.
    pub async fn execute<O: GraphqlOperation>(
        &self,
        variables: &O::Variables,
    ) -> Result<O::ResponseData, ClientError> {
        self.execute_with_policy::<O>(variables, self.config.fetch_policy)
            .await
    }

    /// Execute a typed operation with an explicit fetch policy.
    pub async fn execute_with_policy<O: GraphqlOperation>(
        &self,
        variables: &O::Variables,
        policy: FetchPolicy,
    ) -> Result<O::ResponseData, ClientError> {
        let body = serde_json::to_vec(&RequestBody {
            query: O::QUERY,
            variables,
            operation_name: O::OPERATION_NAME,
        })?;
        let key = CacheKey::of(&body);

        if O::KIND == OperationKind::Query && policy == FetchPolicy::CacheFirst {
            if let Some(data) = self.cache.get(&key) {
                debug!(operation = O::OPERATION_NAME, key = ?key, "cache hit");
                return Ok(serde_json::from_value(data)?);
            }
        }

        let data = self.send(O::OPERATION_NAME, body).await?;

        match O::KIND {
            OperationKind::Query => self.cache.put(key, data.clone()),
            OperationKind::Mutation => self.cache.clear(),
        }

        Ok(serde_json::from_value(data)?)
    }

    async fn send(&self, operation: &str, body: Vec<u8>) -> Result<Value, ClientError> {
        debug!(operation, endpoint = %self.config.endpoint, "sending request");

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // A GraphQL error payload explains the failure better than the status.
            if let Ok(raw) = serde_json::from_slice::<RawResponse>(&bytes) {
                if !raw.errors.is_empty() {
                    return Err(ClientError::Graphql { errors: raw.errors });
                }
            }
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&bytes),
            });
        }

        let raw: RawResponse = serde_json::from_slice(&bytes)?;
        if !raw.errors.is_empty() {
            return Err(ClientError::Graphql { errors: raw.errors });
        }
        raw.data.ok_or_else(|| ClientError::Protocol {
            message: "missing GraphQL data".to_string(),
        })
    }

    // --- Typed operations ---

    pub async fn subscriptions(&self) -> Result<Vec<Subscription>, ClientError> {
        let data = self.execute::<SubscriptionsQuery>(&NoVariables {}).await?;
        Ok(data.subscriptions)
    }

    pub async fn subscription(
        &self,
        id: impl Into<SubscriptionId>,
    ) -> Result<Option<Subscription>, ClientError> {
        let vars = IdVariables { id: id.into() };
        let data = self.execute::<SubscriptionQuery>(&vars).await?;
        Ok(data.subscription)
    }

    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        let data = self.execute::<CategoriesQuery>(&NoVariables {}).await?;
        Ok(data.categories)
    }

    pub async fn add_subscription(
        &self,
        input: &NewSubscription,
    ) -> Result<Subscription, ClientError> {
        let data = self.execute::<AddSubscriptionMutation>(input).await?;
        Ok(data.add_subscription)
    }

    pub async fn edit_subscription(
        &self,
        id: impl Into<SubscriptionId>,
        patch: SubscriptionPatch,
    ) -> Result<Subscription, ClientError> {
        let vars = EditVariables {
            id: id.into(),
            patch,
        };
        let data = self.execute::<EditSubscriptionMutation>(&vars).await?;
        Ok(data.edit_subscription)
    }

    pub async fn delete_subscription(
        &self,
        id: impl Into<SubscriptionId>,
    ) -> Result<bool, ClientError> {
        let vars = IdVariables { id: id.into() };
        let data = self.execute::<DeleteSubscriptionMutation>(&vars).await?;
        Ok(data.delete_subscription)
    }
}

fn truncate_body(bytes: &[u8]) -> String {
    const MAX_LEN: usize = 4096;
    let mut body = String::from_utf8_lossy(bytes).to_string();
    if body.len() > MAX_LEN {
        let mut end = MAX_LEN;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push('…');
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_local_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:4000/graphql");
        assert_eq!(config.fetch_policy, FetchPolicy::CacheFirst);
        assert_eq!(config.cache_capacity.get(), 128);
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let long = "é".repeat(3000);
        let body = truncate_body(long.as_bytes());
        assert!(body.ends_with('…'));
        assert!(body.len() <= 4096 + '…'.len_utf8());
    }

    #[test]
    fn test_new_client_starts_with_empty_cache() {
        let client = SubscriptionClient::new().unwrap();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(client.cache_len(), 0);
    }
}
