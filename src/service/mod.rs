//! Query/mutation service over the store.
//!
//! The service owns no state of its own. It holds the injected [`Store`] and
//! maps each named operation onto it:
//!
//! - `subscriptions`, `subscription`, `categories` (queries)
//! - `addSubscription`, `editSubscription`, `deleteSubscription` (mutations)
//!
//! Editing an unknown id is an error; deleting an unknown id returns `false`.

mod operation;
pub mod schema;

pub use operation::{
    EditSubscription, Operation, OperationOutput, SubscriptionLookup, ADD_SUBSCRIPTION,
    CATEGORIES, DELETE_SUBSCRIPTION, EDIT_SUBSCRIPTION, SUBSCRIPTION, SUBSCRIPTIONS,
};
pub use schema::{build_schema, MutationRoot, QueryRoot, SubscriptionObject, SubscriptionSchema};

use crate::error::ServiceResult;
use crate::store::Store;
use crate::types::{NewSubscription, Subscription, SubscriptionId};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Operation surface over a shared store.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<Store>,
}

impl SubscriptionService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// The store this service delegates to.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.store.list_all()
    }

    pub fn subscription(&self, id: &SubscriptionId) -> Option<Subscription> {
        self.store.find_by_id(id)
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.list_categories()
    }

    pub fn add_subscription(&self, input: NewSubscription) -> Subscription {
        self.store.insert(input)
    }

    pub fn edit_subscription(&self, request: EditSubscription) -> ServiceResult<Subscription> {
        let (id, patch) = request.into_parts();
        self.store.update(&id, patch).map_err(|err| {
            warn!(id = %id, "edit of unknown subscription");
            err.into()
        })
    }

    pub fn delete_subscription(&self, id: &SubscriptionId) -> bool {
        self.store.remove(id)
    }

    /// Run an already validated operation.
    pub fn execute(&self, operation: Operation) -> ServiceResult<OperationOutput> {
        debug!(operation = operation.name(), "executing operation");

        let output = match operation {
            Operation::Subscriptions => OperationOutput::Records(self.subscriptions()),
            Operation::Subscription(lookup) => {
                OperationOutput::MaybeRecord(self.subscription(&lookup.id))
            }
            Operation::Categories => OperationOutput::Categories(self.categories()),
            Operation::AddSubscription(input) => {
                OperationOutput::Record(self.add_subscription(input))
            }
            Operation::EditSubscription(request) => {
                OperationOutput::Record(self.edit_subscription(request)?)
            }
            Operation::DeleteSubscription(lookup) => {
                OperationOutput::Deleted(self.delete_subscription(&lookup.id))
            }
        };
        Ok(output)
    }

    /// Validate `arguments` for the named operation, then run it.
    pub fn call(&self, name: &str, arguments: Value) -> ServiceResult<OperationOutput> {
        let operation = Operation::parse(name, arguments)?;
        self.execute(operation)
    }
}
