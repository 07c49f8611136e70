//! Schema execution tests (in-process, no HTTP).

use async_graphql::{Request, Variables};
use serde_json::{json, Value};
use std::sync::Arc;
use subtrack::{build_schema, Store, SubscriptionSchema, SubscriptionService};

fn seeded_schema() -> (SubscriptionSchema, Arc<Store>) {
    let store = Arc::new(Store::seeded());
    let schema = build_schema(SubscriptionService::new(Arc::clone(&store)));
    (schema, store)
}

async fn run(schema: &SubscriptionSchema, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let response = schema.execute(request).await;
    serde_json::to_value(&response).unwrap()
}

// --- Queries ---

#[tokio::test]
async fn test_subscriptions_query() {
    let (schema, _) = seeded_schema();

    let response = run(
        &schema,
        "{ subscriptions { id name price category renewalDate } }",
        json!({}),
    )
    .await;

    assert_eq!(
        response["data"]["subscriptions"],
        json!([
            {"id": "1", "name": "Netflix", "price": 15.99, "category": "Entertainment", "renewalDate": "2025-09-01"},
            {"id": "2", "name": "Spotify", "price": 9.99, "category": "Music", "renewalDate": "2025-08-15"}
        ])
    );
    assert!(response.get("errors").is_none());
}

#[tokio::test]
async fn test_subscription_query_hit_and_miss() {
    let (schema, _) = seeded_schema();
    let query = "query ($id: ID!) { subscription(id: $id) { name } }";

    let hit = run(&schema, query, json!({"id": "2"})).await;
    assert_eq!(hit["data"]["subscription"]["name"], "Spotify");

    let miss = run(&schema, query, json!({"id": "3"})).await;
    assert!(miss["data"]["subscription"].is_null());
    assert!(miss.get("errors").is_none());
}

#[tokio::test]
async fn test_categories_query() {
    let (schema, store) = seeded_schema();
    store.insert(subtrack::NewSubscription::new(
        "Disney+",
        8.99,
        "Entertainment",
        "2025-11-20",
    ));

    let response = run(&schema, "{ categories }", json!({})).await;
    let mut categories: Vec<String> =
        serde_json::from_value(response["data"]["categories"].clone()).unwrap();
    categories.sort();
    assert_eq!(categories, vec!["Entertainment", "Music"]);
}

// --- Mutations ---

#[tokio::test]
async fn test_add_subscription_mutation() {
    let (schema, store) = seeded_schema();

    let response = run(
        &schema,
        "mutation ($name: String!, $price: Float!, $category: String!, $renewalDate: String!) {
            addSubscription(name: $name, price: $price, category: $category, renewalDate: $renewalDate) {
                id name price category renewalDate
            }
        }",
        json!({"name": "YouTube Premium", "price": 11.99, "category": "Video", "renewalDate": "2025-12-24"}),
    )
    .await;

    let added = &response["data"]["addSubscription"];
    assert_eq!(added["name"], "YouTube Premium");
    assert_eq!(added["price"], 11.99);
    assert_eq!(added["category"], "Video");
    assert_eq!(added["renewalDate"], "2025-12-24");

    let id = added["id"].as_str().unwrap();
    assert!(id != "1" && id != "2");
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_edit_subscription_mutation_partial() {
    let (schema, _) = seeded_schema();

    let response = run(
        &schema,
        r#"mutation { editSubscription(id: "1", price: 17.99) { id name price category renewalDate } }"#,
        json!({}),
    )
    .await;

    assert_eq!(
        response["data"]["editSubscription"],
        json!({"id": "1", "name": "Netflix", "price": 17.99, "category": "Entertainment", "renewalDate": "2025-09-01"})
    );
}

#[tokio::test]
async fn test_edit_unknown_id_returns_not_found_error() {
    let (schema, store) = seeded_schema();
    let before = store.list_all();

    let response = run(
        &schema,
        r#"mutation { editSubscription(id: "42", name: "Nope") { id } }"#,
        json!({}),
    )
    .await;

    let error = &response["errors"][0];
    assert_eq!(error["message"], "Subscription not found: 42");
    assert_eq!(error["extensions"]["code"], "NOT_FOUND");
    assert_eq!(error["path"], json!(["editSubscription"]));
    assert_eq!(store.list_all(), before);
}

#[tokio::test]
async fn test_delete_subscription_mutation() {
    let (schema, store) = seeded_schema();
    let query = "mutation ($id: ID!) { deleteSubscription(id: $id) }";

    let first = run(&schema, query, json!({"id": "2"})).await;
    assert_eq!(first["data"]["deleteSubscription"], true);

    let second = run(&schema, query, json!({"id": "2"})).await;
    assert_eq!(second["data"]["deleteSubscription"], false);
    assert!(second.get("errors").is_none());

    assert_eq!(store.len(), 1);
}

// --- Shape Validation ---

#[tokio::test]
async fn test_wrong_variable_type_is_rejected() {
    let (schema, store) = seeded_schema();

    let response = run(
        &schema,
        "mutation ($price: Float!) {
            addSubscription(name: \"Hulu\", price: $price, category: \"TV\", renewalDate: \"2025-10-10\") { id }
        }",
        json!({"price": "cheap"}),
    )
    .await;

    assert!(response["errors"].as_array().is_some_and(|e| !e.is_empty()));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let (schema, _) = seeded_schema();

    let response = run(&schema, "{ subscriptions { id currency } }", json!({})).await;

    let message = response["errors"][0]["message"].as_str().unwrap();
    assert!(message.contains("currency"), "{message}");
}
