//! Store (tenant) records and the payloads that mutate them.

use serde::{Deserialize, Serialize};

use super::{Slug, SlugError, StoreId, StoreStatus};

/// A tenant's store as returned by the backend.
///
/// Every field except `name` is optional on the wire, and the backend sends
/// `""` for unset text fields. Use the accessor methods, which treat empty
/// strings as absent, rather than reading the raw fields in display code.
///
/// Decoding is lenient per field: `null` or a value of the wrong type reads
/// as absent instead of rejecting the record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Store {
    /// Absent until the backend has confirmed creation.
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<StoreId>,
    #[serde(default, deserialize_with = "lenient::name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub subdomain: Option<String>,
    /// Custom domain, if the owner configured one.
    #[serde(default, deserialize_with = "lenient::text")]
    pub domain: Option<String>,
    /// Logo asset URL.
    #[serde(default, deserialize_with = "lenient::text")]
    pub logo: Option<String>,
    /// Favicon asset URL.
    #[serde(default, deserialize_with = "lenient::text")]
    pub favicon: Option<String>,
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: Option<StoreStatus>,
    /// Raw creation timestamp; formatted with [`crate::display::format_created_date`].
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{StoreId, StoreStatus};

    /// Integer or numeric string.
    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<StoreId>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().map(StoreId::new),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Strings as-is, numbers as their decimal text.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text(deserializer).map(Option::unwrap_or_default)
    }

    pub fn status<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<StoreStatus>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            value => StoreStatus::deserialize(value).ok(),
        })
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

impl Store {
    /// Whether the backend has assigned an id to this record.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the record already carries every server-computed field.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.id.is_some() && self.created_at().is_some()
    }

    /// Strict status check; a missing status never matches.
    #[must_use]
    pub fn has_status(&self, status: StoreStatus) -> bool {
        self.status == Some(status)
    }

    /// Status used for badges and colors.
    #[must_use]
    pub const fn visual_status(&self) -> StoreStatus {
        StoreStatus::visual(self.status)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        present(self.description.as_ref())
    }

    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        present(self.slug.as_ref())
    }

    #[must_use]
    pub fn subdomain(&self) -> Option<&str> {
        present(self.subdomain.as_ref())
    }

    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        present(self.domain.as_ref())
    }

    #[must_use]
    pub fn logo(&self) -> Option<&str> {
        present(self.logo.as_ref())
    }

    #[must_use]
    pub fn favicon(&self) -> Option<&str> {
        present(self.favicon.as_ref())
    }

    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        present(self.created_at.as_ref())
    }
}

/// Errors raised while building a [`NewStore`] from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NewStoreError {
    /// The name was empty after trimming.
    #[error("Store name is required")]
    MissingName,
    /// The slug the user typed is not subdomain-safe.
    #[error("Invalid store URL: {0}")]
    InvalidSlug(#[from] SlugError),
    /// No slug was given and none could be derived from the name.
    #[error("Please choose a store URL")]
    UnderivableSlug,
}

/// Payload for creating a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStore {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub slug: Slug,
}

impl NewStore {
    /// Build a create payload from raw form input.
    ///
    /// The name is trimmed and required. An empty description is dropped.
    /// An empty slug is derived from the name.
    ///
    /// # Errors
    ///
    /// Returns [`NewStoreError`] when the name is blank or the slug is invalid.
    pub fn from_input(name: &str, description: &str, slug: &str) -> Result<Self, NewStoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NewStoreError::MissingName);
        }

        let slug = match slug.trim() {
            "" => Slug::from_name(name).ok_or(NewStoreError::UnderivableSlug)?,
            given => Slug::parse(given)?,
        };

        let description = Some(description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_owned);

        Ok(Self {
            name: name.to_owned(),
            description,
            slug,
        })
    }
}

/// Partial update for a store. Only the fields that are set are sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StorePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StoreStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

impl StorePatch {
    /// Patch that only changes the status.
    #[must_use]
    pub fn status(status: StoreStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that only changes the logo URL.
    #[must_use]
    pub fn logo(url: impl Into<String>) -> Self {
        Self {
            logo: Some(url.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the favicon URL.
    #[must_use]
    pub fn favicon(url: impl Into<String>) -> Self {
        Self {
            favicon: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Response of an asset upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_deserializes_sparse_record() {
        let store: Store = serde_json::from_value(json!({ "name": "Sparse" })).unwrap();
        assert_eq!(store.name, "Sparse");
        assert!(!store.is_persisted());
        assert_eq!(store.status, None);
        assert_eq!(store.visual_status(), StoreStatus::Draft);
    }

    #[test]
    fn test_store_deserializes_full_record() {
        let store: Store = serde_json::from_value(json!({
            "id": 3,
            "name": "Acme",
            "description": "Coffee",
            "slug": "acme",
            "subdomain": "acme",
            "domain": null,
            "logo": "https://cdn.example.com/logo.png",
            "favicon": "",
            "status": "active",
            "created_at": "2024-03-01T10:00:00Z",
            "owner_id": 99
        }))
        .unwrap();
        assert_eq!(store.id, Some(StoreId::new(3)));
        assert!(store.has_status(StoreStatus::Active));
        assert_eq!(store.domain(), None);
        assert_eq!(store.favicon(), None);
        assert_eq!(store.logo(), Some("https://cdn.example.com/logo.png"));
        assert!(store.is_complete());
    }

    #[test]
    fn test_wrongly_typed_fields_read_as_absent() {
        let store: Store = serde_json::from_value(json!({
            "id": "7",
            "name": null,
            "description": ["not", "text"],
            "status": 3,
            "created_at": 1_700_000_000
        }))
        .unwrap();
        assert_eq!(store.id, Some(StoreId::new(7)));
        assert_eq!(store.name, "");
        assert_eq!(store.description, None);
        assert_eq!(store.status, None);
        assert_eq!(store.created_at.as_deref(), Some("1700000000"));

        let store: Store = serde_json::from_value(json!({ "id": "abc", "name": 12 })).unwrap();
        assert_eq!(store.id, None);
        assert_eq!(store.name, "12");
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let store = Store {
            slug: Some(String::new()),
            description: Some("   ".to_string()),
            ..Store::default()
        };
        assert_eq!(store.slug(), None);
        assert_eq!(store.description(), None);
    }

    #[test]
    fn test_has_status_is_strict() {
        let store = Store {
            status: Some(StoreStatus::Unrecognized),
            ..Store::default()
        };
        assert!(!store.has_status(StoreStatus::Draft));
        assert_eq!(store.visual_status(), StoreStatus::Draft);
    }

    #[test]
    fn test_is_complete_requires_id_and_timestamp() {
        let mut store = Store {
            id: Some(StoreId::new(1)),
            ..Store::default()
        };
        assert!(!store.is_complete());
        store.created_at = Some("2024-01-01T00:00:00Z".to_string());
        assert!(store.is_complete());
    }

    #[test]
    fn test_new_store_from_input() {
        let new = NewStore::from_input("  Acme Coffee ", "", "").unwrap();
        assert_eq!(new.name, "Acme Coffee");
        assert_eq!(new.description, None);
        assert_eq!(new.slug.as_str(), "acme-coffee");

        let new = NewStore::from_input("Acme", " Beans ", "acme-beans").unwrap();
        assert_eq!(new.description.as_deref(), Some("Beans"));
        assert_eq!(new.slug.as_str(), "acme-beans");
    }

    #[test]
    fn test_new_store_rejects_bad_input() {
        assert_eq!(
            NewStore::from_input("   ", "", "").unwrap_err(),
            NewStoreError::MissingName
        );
        assert_eq!(
            NewStore::from_input("!!", "", "").unwrap_err(),
            NewStoreError::UnderivableSlug
        );
        assert!(matches!(
            NewStore::from_input("Acme", "", "Acme Store").unwrap_err(),
            NewStoreError::InvalidSlug(_)
        ));
    }

    #[test]
    fn test_new_store_serialization_skips_empty_description() {
        let new = NewStore::from_input("Acme", "", "acme").unwrap();
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            json!({ "name": "Acme", "slug": "acme" })
        );
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        assert_eq!(
            serde_json::to_value(StorePatch::status(StoreStatus::Active)).unwrap(),
            json!({ "status": "active" })
        );
        assert_eq!(
            serde_json::to_value(StorePatch::logo("https://x/logo.png")).unwrap(),
            json!({ "logo": "https://x/logo.png" })
        );
        assert_eq!(
            serde_json::to_value(StorePatch::favicon("https://x/f.ico")).unwrap(),
            json!({ "favicon": "https://x/f.ico" })
        );
    }
}
