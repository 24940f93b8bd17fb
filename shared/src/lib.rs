//! Shared types and logic for the Harvest Guard platform
//!
//! This crate contains the domain types, the ETCL risk engine and the Bangla
//! advisory generator. It is used by the backend and, through WASM, by
//! offline clients.

pub mod advisory;
pub mod models;
pub mod risk;
pub mod types;
pub mod validation;

pub use advisory::*;
pub use models::*;
pub use risk::*;
pub use types::*;
pub use validation::*;
