//! # recordhub-domain
//!
//! Pure domain model shared by the car and employee record services.
//!
//! ## Responsibilities
//! - Foundational types: numeric document identifiers, error conventions
//! - Define **Documents** (schemaless JSON records keyed by an integer `_id`)
//! - Define **Filters** (exact-match conditions built from query parameters)
//! - Define **Collection schemas** (collection name, counter key, required fields)
//! - Contain all invariant enforcement: required-field checks, `_id` immutability
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod document;
pub mod filter;
pub mod schema;
