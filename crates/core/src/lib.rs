//! Ledger Core - Shared types library.
//!
//! This crate provides common types used across all Management Ledger
//! components:
//! - `dashboard` - Session store, access guard, and backend API client
//! - `integration-tests` - End-to-end tests against a mock backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, the role
//!   enum, and the user profile carried in the session record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
