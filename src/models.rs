use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Stored Records
// ============================================================================
//
// These structs mirror the document layout of the two collections. Field
// renames (`_id`, `soldOut`) keep the documents compatible with the layout
// the frontend already reads.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CatalogItem {
    /// Assigned by the store on insert; `None` before the record is saved.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub category: String,
    pub item: String,
    pub price: f64,
    /// Durable URL from the upload gateway, never a local path.
    pub picture: String,
    #[serde(rename = "soldOut")]
    pub sold_out: bool,
}

/// One line of a submitted cart. Only `price` is required; every other
/// field the client sent is carried through verbatim.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CartLine {
    pub price: f64,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub items: Vec<CartLine>,
    /// Sum of `items[*].price` at creation time; immutable afterwards.
    pub total: f64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

// ============================================================================
// Unit Tests
// ============================================================================
