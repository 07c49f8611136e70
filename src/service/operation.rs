//! Typed requests for the named operations.
//!
//! A caller names an operation and hands over JSON arguments; [`Operation::parse`]
//! checks the argument shape (required fields, scalar types, no extra fields)
//! and produces a typed request. Nothing here touches the store.

use crate::error::ValidationError;
use crate::types::{NewSubscription, Subscription, SubscriptionId, SubscriptionPatch};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUBSCRIPTIONS: &str = "subscriptions";
pub const SUBSCRIPTION: &str = "subscription";
pub const CATEGORIES: &str = "categories";
pub const ADD_SUBSCRIPTION: &str = "addSubscription";
pub const EDIT_SUBSCRIPTION: &str = "editSubscription";
pub const DELETE_SUBSCRIPTION: &str = "deleteSubscription";

/// Arguments naming a single record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionLookup {
    pub id: SubscriptionId,
}

impl SubscriptionLookup {
    pub fn new(id: impl Into<SubscriptionId>) -> Self {
        Self { id: id.into() }
    }
}

/// Arguments for `editSubscription`: a required id plus optional fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditSubscription {
    pub id: SubscriptionId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub renewal_date: Option<String>,
}

impl EditSubscription {
    pub fn new(id: impl Into<SubscriptionId>, patch: SubscriptionPatch) -> Self {
        Self {
            id: id.into(),
            name: patch.name,
            price: patch.price,
            category: patch.category,
            renewal_date: patch.renewal_date,
        }
    }

    pub fn into_parts(self) -> (SubscriptionId, SubscriptionPatch) {
        let patch = SubscriptionPatch {
            name: self.name,
            price: self.price,
            category: self.category,
            renewal_date: self.renewal_date,
        };
        (self.id, patch)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArguments {}

/// A validated request for one of the six operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Subscriptions,
    Subscription(SubscriptionLookup),
    Categories,
    AddSubscription(NewSubscription),
    EditSubscription(EditSubscription),
    DeleteSubscription(SubscriptionLookup),
}

impl Operation {
    /// Validate `arguments` against the shape of the named operation.
    ///
    /// `null` arguments are read as an empty argument object; any other
    /// non-object value (arrays included) is rejected.
    pub fn parse(name: &str, arguments: Value) -> Result<Self, ValidationError> {
        let operation = match name {
            SUBSCRIPTIONS => {
                decode::<NoArguments>(name, arguments)?;
                Operation::Subscriptions
            }
            SUBSCRIPTION => Operation::Subscription(decode(name, arguments)?),
            CATEGORIES => {
                decode::<NoArguments>(name, arguments)?;
                Operation::Categories
            }
            ADD_SUBSCRIPTION => Operation::AddSubscription(decode(name, arguments)?),
            EDIT_SUBSCRIPTION => Operation::EditSubscription(decode(name, arguments)?),
            DELETE_SUBSCRIPTION => Operation::DeleteSubscription(decode(name, arguments)?),
            other => return Err(ValidationError::UnknownOperation(other.to_string())),
        };
        Ok(operation)
    }

    /// The operation name as exposed in the schema.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Subscriptions => SUBSCRIPTIONS,
            Operation::Subscription(_) => SUBSCRIPTION,
            Operation::Categories => CATEGORIES,
            Operation::AddSubscription(_) => ADD_SUBSCRIPTION,
            Operation::EditSubscription(_) => EDIT_SUBSCRIPTION,
            Operation::DeleteSubscription(_) => DELETE_SUBSCRIPTION,
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::AddSubscription(_)
                | Operation::EditSubscription(_)
                | Operation::DeleteSubscription(_)
        )
    }
}

fn decode<T: DeserializeOwned>(operation: &str, arguments: Value) -> Result<T, ValidationError> {
    let arguments = match arguments {
        Value::Null => Value::Object(serde_json::Map::new()),
        Value::Object(map) => Value::Object(map),
        _ => {
            return Err(ValidationError::InvalidArguments {
                operation: operation.to_string(),
                message: "arguments must be an object".to_string(),
            })
        }
    };
    serde_json::from_value(arguments).map_err(|e| ValidationError::InvalidArguments {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

/// Result payload of an executed operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Records(Vec<Subscription>),
    Record(Subscription),
    MaybeRecord(Option<Subscription>),
    Categories(Vec<String>),
    Deleted(bool),
}

impl OperationOutput {
    /// JSON rendering, as it would appear under the operation's field.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
