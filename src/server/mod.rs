//! HTTP API of the book catalogue.
//!
//! # Layers
//!
//! - `controller/` - axum handlers: authenticate, validate the body, call a service, wrap the result
//! - `service/` - ownership rules, cascades and rating refreshes on top of the store
//! - `data/` - the `Store` trait with its document-store, JSON-file and failover implementations
//! - `model/` - domain types and validated input
//! - `error/` - `AppError` and its HTTP mapping
//! - `middleware/` - bearer token guard
//!
//! `config`, `state`, `startup` and `router` wire these together at boot.
//!
//! Every request reaches storage through `FallbackStore`: the document store while it is
//! configured and reachable, the local JSON files otherwise. Both backends share one definition
//! of listing semantics, so responses do not depend on which one served them.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
