//! Domain-specific error types and error handling.

mod types;


pub use types::{ManagerError, TokenError, TokenResult};
