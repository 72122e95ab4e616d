//! Core types for StoreMaker.
//!
//! This module provides type-safe wrappers for the dashboard's domain concepts.

pub mod id;
pub mod slug;
pub mod status;
pub mod store;
pub mod user;

pub use id::*;
pub use slug::{Slug, SlugError};
pub use status::*;
pub use store::{NewStore, NewStoreError, Store, StorePatch, UploadedAsset};
pub use user::UserProfile;
