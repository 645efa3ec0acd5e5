//! Nutri Clinic Shared Library
//!
//! This crate contains the pure calculations, domain models and API types
//! shared by the client library and the WASM bindings.

pub mod appointments;
pub mod errors;
pub mod intake;
pub mod models;
pub mod projection;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use appointments::*;
pub use errors::*;
pub use intake::*;
pub use models::*;
pub use projection::*;
