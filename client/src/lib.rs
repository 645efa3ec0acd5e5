//! Nutri Clinic Client Library
//!
//! Talks to the Nutri Clinic backend, keeps the signed-in session in local
//! storage, and feeds backend data through the shared calculations.
//!
//! ## Architecture
//!
//! - Api: typed REST calls to the backend
//! - Session: persisted session state and lifecycle events
//! - Services: screen-level operations built on the two above

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
