//! Parsing of the list-stores response envelope.
//!
//! The backend has returned the store collection in three different shapes
//! over time:
//!
//! ```text
//! [ {..}, {..} ]              -> Bare
//! { "data":   [ {..}, .. ] }  -> Data
//! { "stores": [ {..}, .. ] }  -> Stores
//! ```
//!
//! Anything else is `Unrecognized` and yields an empty collection. Inside a
//! recognised sequence each item is decoded on its own: items that are not
//! store records are skipped and the rest are kept.

use serde_json::Value;

use crate::types::Store;

/// The recognised shapes of a list-stores response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreListEnvelope {
    /// A bare JSON array of stores.
    Bare(Vec<Store>),
    /// An object with the stores under `data`.
    Data(Vec<Store>),
    /// An object with the stores under `stores`.
    Stores(Vec<Store>),
    /// Any other payload.
    Unrecognized,
}

impl StoreListEnvelope {
    /// Classify a raw response body.
    ///
    /// `data` wins over `stores` when both hold arrays. A `data` field that
    /// is not an array does not prevent a `stores` array from matching.
    #[must_use]
    pub fn parse(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Bare(decode(items)),
            Value::Object(mut fields) => {
                if let Some(Value::Array(items)) = fields.remove("data") {
                    return Self::Data(decode(items));
                }
                if let Some(Value::Array(items)) = fields.remove("stores") {
                    return Self::Stores(decode(items));
                }
                Self::Unrecognized
            }
            _ => Self::Unrecognized,
        }
    }

    /// Short name of the shape, for logging.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Bare(_) => "bare",
            Self::Data(_) => "data",
            Self::Stores(_) => "stores",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// The canonical store collection carried by this envelope.
    #[must_use]
    pub fn into_stores(self) -> Vec<Store> {
        match self {
            Self::Bare(stores) | Self::Data(stores) | Self::Stores(stores) => stores,
            Self::Unrecognized => Vec::new(),
        }
    }
}

fn decode(items: Vec<Value>) -> Vec<Store> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::debug!(index, "skipping non-object store list item");
                return None;
            }
            serde_json::from_value(item)
                .map_err(|e| tracing::debug!(index, error = %e, "skipping undecodable store"))
                .ok()
        })
        .collect()
}
