//! Core types for the subscription store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque unique identifier for a subscription record.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub String);

impl SubscriptionId {
    pub fn new(id: impl Into<String>) -> Self {
        SubscriptionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubscriptionId {
    fn from(s: &str) -> Self {
        SubscriptionId(s.to_string())
    }
}

impl From<String> for SubscriptionId {
    fn from(s: String) -> Self {
        SubscriptionId(s)
    }
}

/// Milliseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Current time. A clock set before the epoch reads as zero.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp(millis)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// A single subscription record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Unique identifier (assigned by the store).
    pub id: SubscriptionId,

    /// Display name, e.g. "Netflix".
    pub name: String,

    /// Recurring price.
    pub price: f64,

    /// Free-text label used for grouping.
    pub category: String,

    /// Next renewal date. Stored as given, never parsed.
    pub renewal_date: String,
}

/// Input for creating a new record (before the id is assigned).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewSubscription {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub renewal_date: String,
}

impl NewSubscription {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        renewal_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            renewal_date: renewal_date.into(),
        }
    }

    /// Attach an id, producing the stored record.
    pub(crate) fn into_record(self, id: SubscriptionId) -> Subscription {
        Subscription {
            id,
            name: self.name,
            price: self.price,
            category: self.category,
            renewal_date: self.renewal_date,
        }
    }
}

/// Partial update. `None` fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubscriptionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<String>,
}

impl SubscriptionPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_renewal_date(mut self, renewal_date: impl Into<String>) -> Self {
        self.renewal_date = Some(renewal_date.into());
        self
    }

    /// True if no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.renewal_date.is_none()
    }

    /// Overwrite the supplied fields of `record`.
    pub fn apply_to(self, record: &mut Subscription) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(renewal_date) = self.renewal_date {
            record.renewal_date = renewal_date;
        }
    }
}

/// Records every fresh store starts with unless seeding is disabled.
pub fn fixtures() -> Vec<Subscription> {
    vec![
        Subscription {
            id: SubscriptionId::from("1"),
            name: "Netflix".to_string(),
            price: 15.99,
            category: "Entertainment".to_string(),
            renewal_date: "2025-09-01".to_string(),
        },
        Subscription {
            id: SubscriptionId::from("2"),
            name: "Spotify".to_string(),
            price: 9.99,
            category: "Music".to_string(),
            renewal_date: "2025-08-15".to_string(),
        },
    ]
}
