//! Tangelo Core - Shared types library.
//!
//! This crate provides common types used across all Tangelo components:
//! - `api` - The users/to-do REST service
//! - `integration-tests` - End-to-end tests against the api router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe record identifiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
