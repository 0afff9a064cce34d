//! # devdepot-domain
//!
//! Pure domain model for the devdepot inventory service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (the managed inventory records), their lifecycle
//!   states, and the mutation guards tied to the current state
//! - Define **Filters** (composable search predicates over the record set)
//! - Define **Pages** (offset-based paging requests and result envelopes)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod filter;
pub mod page;
