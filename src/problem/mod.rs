// Turning errors into messages for humans

mod format;
mod messages;

// Re-export all public symbols
pub use format::*;
pub use messages::*;
