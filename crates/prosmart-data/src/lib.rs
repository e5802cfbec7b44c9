//! Catalog API access and load orchestration.
//!
//! This crate provides:
//! - `CatalogClient` - HTTP client for the catalog API
//! - `decode_envelope` - `{ success, data, message }` decoding
//! - `LoadOrchestrator` - timeout ceiling, minimum loading display, phases
//! - `DetailLoader` - detail-key lookup with redirect on failure

mod client;
mod detail;
mod envelope;
mod error;
mod orchestrator;
mod policy;
mod source;

pub use client::*;
pub use detail::*;
pub use envelope::*;
pub use error::*;
pub use orchestrator::*;
pub use policy::*;
pub use source::*;
