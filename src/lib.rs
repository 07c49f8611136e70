//! # Subscription Tracker
//!
//! An in-memory store of recurring subscriptions, served as a GraphQL
//! endpoint, plus a client preconfigured to talk to it.
//!
//! ## Core Concepts
//!
//! - **Records**: subscriptions with id, name, price, category, renewal date
//! - **Store**: the ordered, in-process collection of records
//! - **Service**: six named query/mutation operations over the store
//! - **Server**: the service's GraphQL schema behind one HTTP endpoint
//! - **Client**: typed operations with a per-instance response cache
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use subtrack::{Server, ServerConfig, Store, SubscriptionClient, SubscriptionService};
//!
//! let service = SubscriptionService::new(Arc::new(Store::seeded()));
//! let server = Server::bind(&ServerConfig::default(), service).await?;
//! tokio::spawn(server.run());
//!
//! let client = SubscriptionClient::new()?;
//! let categories = client.categories().await?;
//! ```

pub mod client;
pub mod error;
pub mod server;
pub mod service;
pub mod store;
pub mod types;

// Re-exports
pub use client::{ClientConfig, ClientError, FetchPolicy, SubscriptionClient, DEFAULT_ENDPOINT};
pub use error::{Result, ServerError, ServiceError, ServiceResult, StoreError, ValidationError};
pub use server::{router, Server, ServerConfig};
pub use service::{
    build_schema, EditSubscription, Operation, OperationOutput, SubscriptionLookup,
    SubscriptionSchema, SubscriptionService,
};
pub use store::{Store, StoreConfig};
pub use types::*;
