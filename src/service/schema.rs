//! GraphQL schema: `Query` and `Mutation` roots resolving through the service.

use super::{EditSubscription, SubscriptionService};
use crate::error::ServiceError;
use crate::types::{NewSubscription, Subscription, SubscriptionId};
use async_graphql::{Context, EmptySubscription, Error, ErrorExtensions, Object, Result, Schema, ID};

/// Schema type served at the GraphQL endpoint.
pub type SubscriptionSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema around an injected service.
pub fn build_schema(service: SubscriptionService) -> SubscriptionSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

fn service<'a>(ctx: &Context<'a>) -> Result<&'a SubscriptionService> {
    ctx.data::<SubscriptionService>()
}

fn service_error(err: ServiceError) -> Error {
    let code = err.code();
    Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}

/// GraphQL view of a record.
pub struct SubscriptionObject(pub Subscription);

#[Object(name = "Subscription")]
impl SubscriptionObject {
    async fn id(&self) -> ID {
        ID(self.0.id.0.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn price(&self) -> f64 {
        self.0.price
    }

    async fn category(&self) -> &str {
        &self.0.category
    }

    async fn renewal_date(&self) -> &str {
        &self.0.renewal_date
    }
}

#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// All subscriptions in insertion order.
    async fn subscriptions(&self, ctx: &Context<'_>) -> Result<Vec<SubscriptionObject>> {
        let records = service(ctx)?.subscriptions();
        Ok(records.into_iter().map(SubscriptionObject).collect())
    }

    async fn subscription(&self, ctx: &Context<'_>, id: ID) -> Result<Option<SubscriptionObject>> {
        let id = SubscriptionId(id.0);
        Ok(service(ctx)?.subscription(&id).map(SubscriptionObject))
    }

    /// Distinct categories across all subscriptions.
    async fn categories(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        Ok(service(ctx)?.categories())
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    async fn add_subscription(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: f64,
        category: String,
        renewal_date: String,
    ) -> Result<SubscriptionObject> {
        let input = NewSubscription {
            name,
            price,
            category,
            renewal_date,
        };
        Ok(SubscriptionObject(service(ctx)?.add_subscription(input)))
    }

    /// Overwrites only the supplied fields. Fails if `id` is unknown.
    async fn edit_subscription(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        price: Option<f64>,
        category: Option<String>,
        renewal_date: Option<String>,
    ) -> Result<SubscriptionObject> {
        let request = EditSubscription {
            id: SubscriptionId(id.0),
            name,
            price,
            category,
            renewal_date,
        };
        service(ctx)?
            .edit_subscription(request)
            .map(SubscriptionObject)
            .map_err(service_error)
    }

    /// Returns false when no subscription has that id.
    async fn delete_subscription(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        Ok(service(ctx)?.delete_subscription(&SubscriptionId(id.0)))
    }
}
