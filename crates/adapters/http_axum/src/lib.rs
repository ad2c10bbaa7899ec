//! # recordhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON CRUD API** for one collection per deployment
//!   (`/cars` or `/employees`, plus `/{collection}/{id}`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses: validation failures
//!   become `400`, missing documents `404`, storage faults `500`
//!
//! ## Dependency rule
//! Depends on `recordhub-app` (for port traits and services) and `recordhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
