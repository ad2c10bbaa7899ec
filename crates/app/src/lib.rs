//! # recordhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CounterStore` — atomic increment-and-fetch of named sequences
//!   - `DocumentRepository` — lookup, insert, partial update, delete for one collection
//! - Define **driving/inbound ports** as use-case structs:
//!   - `IdAllocator` — mint strictly increasing identifiers
//!   - `DocumentService` — create, find, replace fields, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `recordhub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
