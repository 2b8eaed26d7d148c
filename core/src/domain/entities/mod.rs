//! Domain entities representing core business objects.

pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{Claims, Identity, TokenHeader, TOKEN_ALGORITHM, TOKEN_TYPE};
