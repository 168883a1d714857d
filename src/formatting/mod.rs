//! Rendering Nodes back to (optionally highlighted) source text

mod render;
mod syntax;
mod terminal;

pub use render::*;
pub use syntax::*;
pub use terminal::*;
