//! # Forum Core
//!
//! Core authentication layer for the forum backend.
//! This crate mints and verifies the compact signed access tokens that identify
//! a user and role, and issues the opaque refresh tokens handed out next to
//! them. It keeps no session store: verification is a pure function of the
//! configured secret, the token and the clock.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
