//! HTTP transport: one GraphQL endpoint over axum.

use crate::error::ServerError;
use crate::service::{build_schema, SubscriptionSchema, SubscriptionService};
use crate::store::StoreConfig;
use async_graphql::http::GraphiQLSource;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Address the bundled client expects by default.
pub const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 4000);

/// Path of the GraphQL endpoint by default.
pub const DEFAULT_PATH: &str = "/graphql";

/// Server configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on. Port 0 picks a free port.
    pub bind: SocketAddr,

    /// HTTP path of the GraphQL endpoint.
    pub path: String,

    /// Serve GraphiQL on `GET <path>`.
    pub playground: bool,

    /// Store settings used when the binary builds its store.
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(DEFAULT_BIND),
            path: DEFAULT_PATH.to_string(),
            playground: true,
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.path.starts_with('/') {
            return Err(ServerError::Config(format!(
                "endpoint path must start with '/': {:?}",
                self.path
            )));
        }
        Ok(())
    }
}

/// Build the router serving `schema` at the configured path.
pub fn router(schema: SubscriptionSchema, config: &ServerConfig) -> Router {
    let mut endpoint = post(graphql_handler);
    if config.playground {
        let page = GraphiQLSource::build().endpoint(&config.path).finish();
        endpoint = endpoint.get(move || {
            let page = page.clone();
            async move { Html(page) }
        });
    }

    Router::new().route(&config.path, endpoint).with_state(schema)
}

async fn graphql_handler(
    State(schema): State<SubscriptionSchema>,
    request: Result<Json<async_graphql::Request>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "rejected malformed request body");
            let error = async_graphql::ServerError::new(rejection.body_text(), None);
            let response = async_graphql::Response::from_errors(vec![error]);
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    debug!(
        operation = request.operation_name.as_deref().unwrap_or("anonymous"),
        "graphql request"
    );
    Json(schema.execute(request).await).into_response()
}

/// A bound, not yet running server.
pub struct Server {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
    path: String,
}

impl Server {
    /// Bind the listener and build the schema around `service`.
    pub async fn bind(config: &ServerConfig, service: SubscriptionService) -> Result<Self, ServerError> {
        config.validate()?;

        let listener = TcpListener::bind(config.bind).await?;
        let local_addr = listener.local_addr()?;
        let router = router(build_schema(service), config);

        Ok(Self {
            listener,
            router,
            local_addr,
            path: config.path.clone(),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Full endpoint URL, e.g. `http://127.0.0.1:4000/graphql`.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.local_addr, self.path)
    }

    /// Serve until the process exits.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves, then drain open connections.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(url = %self.url(), "server ready");
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_client_endpoint() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.to_string(), "127.0.0.1:4000");
        assert_eq!(config.path, "/graphql");
        assert!(config.store.seed_fixtures);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let config = ServerConfig {
            path: "graphql".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }
}
