//! # API Shared
//!
//! Shared request/response types and services for the Folio APIs.
//!
//! Contains:
//! - JSON request and response bodies (`types` module), with OpenAPI schemas
//! - `HealthService`, which reports status and process uptime
//!
//! Used by `api-rest` and by the front end's contract.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
