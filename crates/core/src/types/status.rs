//! Store publication status.

use serde::{Deserialize, Serialize};

/// Publication lifecycle state of a store.
///
/// Only `Active` stores are publicly reachable. Any status string the
/// backend sends that is not one of the three known values deserializes to
/// `Unrecognized` instead of failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    /// Not publicly accessible yet.
    #[default]
    Draft,
    /// Live and reachable on its storefront.
    Active,
    /// Taken offline by the owner or the platform.
    Inactive,
    /// A status value this dashboard does not know about.
    #[serde(other)]
    Unrecognized,
}

impl StoreStatus {
    /// The wire value of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Status used for visual treatment.
    ///
    /// Missing and unrecognized statuses are shown exactly like `Draft`.
    #[must_use]
    pub const fn visual(status: Option<Self>) -> Self {
        match status {
            Some(Self::Active) => Self::Active,
            Some(Self::Inactive) => Self::Inactive,
            Some(Self::Draft | Self::Unrecognized) | None => Self::Draft,
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid store status: {s}")),
        }
    }
}
