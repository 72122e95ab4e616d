//! StoreMaker Dashboard library.
//!
//! Store owners sign in here to list, create, publish and brand their
//! stores. The crate is split in two layers:
//!
//! - [`views`] and [`components`] hold the page logic. They know nothing
//!   about HTTP and talk to the outside world only through the capabilities
//!   in [`services`] and the backend trait in [`api`].
//! - [`routes`] adapts those views to axum: one view per request, htmx
//!   fragments for partial updates, askama templates for markup.
//!
//! The backend is the StoreMaker REST API; this crate keeps no database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use routes::app;
