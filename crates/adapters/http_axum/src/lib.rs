//! # devdepot-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the device inventory **REST JSON API**
//!   (`/api/devices`, `/api/devices/{id}`, `/api/devices/search`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and error kinds into HTTP responses
//!
//! ## Dependency rule
//! Depends on `devdepot-app` (for port traits and services) and
//! `devdepot-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
