//! Typed operations against the subscription schema.

use crate::types::{NewSubscription, Subscription, SubscriptionId, SubscriptionPatch};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Whether an operation reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Typed GraphQL operation definition.
///
/// Implement this trait for each query/mutation.
pub trait GraphqlOperation {
    type Variables: Serialize + Send + Sync;
    type ResponseData: DeserializeOwned + Send;

    /// GraphQL document text.
    const QUERY: &'static str;
    /// Operation name sent as `operationName`.
    const OPERATION_NAME: &'static str;
    /// Queries are cacheable; mutations invalidate the cache.
    const KIND: OperationKind;
}

/// Variables for operations without arguments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdVariables {
    pub id: SubscriptionId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditVariables {
    pub id: SubscriptionId,
    #[serde(flatten)]
    pub patch: SubscriptionPatch,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionsData {
    pub subscriptions: Vec<Subscription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionData {
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoriesData {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSubscriptionData {
    pub add_subscription: Subscription,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSubscriptionData {
    pub edit_subscription: Subscription,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubscriptionData {
    pub delete_subscription: bool,
}

pub struct SubscriptionsQuery;

impl GraphqlOperation for SubscriptionsQuery {
    type Variables = NoVariables;
    type ResponseData = SubscriptionsData;

    const QUERY: &'static str =
        "query Subscriptions { subscriptions { id name price category renewalDate } }";
    const OPERATION_NAME: &'static str = "Subscriptions";
    const KIND: OperationKind = OperationKind::Query;
}

pub struct SubscriptionQuery;

impl GraphqlOperation for SubscriptionQuery {
    type Variables = IdVariables;
    type ResponseData = SubscriptionData;

    const QUERY: &'static str = "query Subscription($id: ID!) { \
        subscription(id: $id) { id name price category renewalDate } }";
    const OPERATION_NAME: &'static str = "Subscription";
    const KIND: OperationKind = OperationKind::Query;
}

pub struct CategoriesQuery;

impl GraphqlOperation for CategoriesQuery {
    type Variables = NoVariables;
    type ResponseData = CategoriesData;

    const QUERY: &'static str = "query Categories { categories }";
    const OPERATION_NAME: &'static str = "Categories";
    const KIND: OperationKind = OperationKind::Query;
}

pub struct AddSubscriptionMutation;

impl GraphqlOperation for AddSubscriptionMutation {
    type Variables = NewSubscription;
    type ResponseData = AddSubscriptionData;

    const QUERY: &'static str = "mutation AddSubscription(\
        $name: String!, $price: Float!, $category: String!, $renewalDate: String!) { \
        addSubscription(name: $name, price: $price, category: $category, renewalDate: $renewalDate) \
        { id name price category renewalDate } }";
    const OPERATION_NAME: &'static str = "AddSubscription";
    const KIND: OperationKind = OperationKind::Mutation;
}

pub struct EditSubscriptionMutation;

impl GraphqlOperation for EditSubscriptionMutation {
    type Variables = EditVariables;
    type ResponseData = EditSubscriptionData;

    const QUERY: &'static str = "mutation EditSubscription(\
        $id: ID!, $name: String, $price: Float, $category: String, $renewalDate: String) { \
        editSubscription(id: $id, name: $name, price: $price, category: $category, renewalDate: $renewalDate) \
        { id name price category renewalDate } }";
    const OPERATION_NAME: &'static str = "EditSubscription";
    const KIND: OperationKind = OperationKind::Mutation;
}

pub struct DeleteSubscriptionMutation;

impl GraphqlOperation for DeleteSubscriptionMutation {
    type Variables = IdVariables;
    type ResponseData = DeleteSubscriptionData;

    const QUERY: &'static str =
        "mutation DeleteSubscription($id: ID!) { deleteSubscription(id: $id) }";
    const OPERATION_NAME: &'static str = "DeleteSubscription";
    const KIND: OperationKind = OperationKind::Mutation;
}
