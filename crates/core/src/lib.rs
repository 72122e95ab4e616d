//! StoreMaker Core - Shared types library.
//!
//! This crate provides the types used across the StoreMaker dashboard:
//! - `dashboard` - Store owner dashboard (list, detail, create, delete)
//! - `integration-tests` - End-to-end tests against a fake backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything that decides *what* the dashboard shows for a given
//! backend payload lives here so it can be tested without a server.
//!
//! # Modules
//!
//! - [`types`] - Store records, ids, statuses, slugs and user profiles
//! - [`envelope`] - Parsing of the list-stores response envelope
//! - [`display`] - Date and domain formatting for store summaries
//! - [`summary`] - Derived counts over a store collection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod display;
pub mod envelope;
pub mod summary;
pub mod types;

pub use envelope::StoreListEnvelope;
pub use summary::StoreSummary;
pub use types::*;
