//! FASCO Core - Shared types library.
//!
//! This crate provides common types used across all FASCO components:
//! - `storefront` - Storefront state-management core
//! - `cli` - Command-line entry points driving the storefront pages
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O, no
//! HTTP clients, no storage. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and money formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
