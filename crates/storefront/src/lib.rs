//! FASCO Storefront library.
//!
//! The state-management core behind the FASCO shop pages: a locally cached
//! product catalog, a persisted shopping cart, a filter/sort engine,
//! persisted product ratings, and the view models derived from them.
//!
//! # Architecture
//!
//! - [`storage`] - key-value persistence (file-backed, with an in-memory
//!   implementation for tests)
//! - [`catalog`] - catalog client with cache fallback on network failure
//! - [`cart`] - cart store: mutations persist synchronously, then notify
//!   subscribed observers
//! - [`filter`] - filter selection and the pure `apply` pipeline
//! - [`ratings`] - per-product persisted rating records
//! - [`views`] - pure projections of store state (grid, cart panel, chips)
//! - [`pages`] - page controllers wiring the stores together
//!
//! Stores are owned by page controllers and mutated from their handlers;
//! there is no ambient global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod pages;
pub mod ratings;
pub mod storage;
pub mod types;
pub mod views;
