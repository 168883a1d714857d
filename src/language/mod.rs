// The node model shared by tokens, syntax trees, and patterns

mod boxing;
mod error;
pub mod hash;
mod location;
mod types;

// Re-export all public symbols
pub use error::*;
pub use location::*;
pub use types::*;
