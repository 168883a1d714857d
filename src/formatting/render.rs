//! Turn Nodes back into source text.

use crate::language::{Kind, Node};

use super::syntax::{Highlight, Syntax};

/// Strategy for rendering a Node: the text before its children, how the
/// rendered children are combined, and the text after. The defaults
/// reproduce the original source exactly.
pub trait Render {
    fn pre(&self, node: &Node) -> String {
        node.prefix()
            .to_string()
    }

    fn join(&self, node: &Node, parts: Vec<String>) -> String {
        if node.kind() == Kind::Map && parts.is_empty() {
            // distinguishes `[:]` from an empty list `[]`
            return ":".to_string();
        }
        parts.join(node.joiner())
    }

    fn post(&self, node: &Node) -> String {
        node.suffix()
            .to_string()
    }
}

/// Renders exactly the source fragments held by each Node.
pub struct Verbatim;

impl Render for Verbatim {}

/// Renders source fragments with syntax highlighting applied to each one.
pub struct Highlighted<'h, H: Highlight>(pub &'h H);

impl<'h, H: Highlight> Highlighted<'h, H> {
    fn syntax(node: &Node) -> Syntax {
        match node.kind() {
            Kind::SpaceSymbol
                if node
                    .prefix()
                    .starts_with('#') =>
            {
                Syntax::Comment
            }
            kind => Syntax::of(kind),
        }
    }
}

impl<'h, H: Highlight> Render for Highlighted<'h, H> {
    fn pre(&self, node: &Node) -> String {
        self.0
            .style(Self::syntax(node), node.prefix())
    }

    fn post(&self, node: &Node) -> String {
        self.0
            .style(Self::syntax(node), node.suffix())
    }
}

pub fn render(renderer: &impl Render, node: &Node) -> String {
    let parts = node
        .children()
        .iter()
        .map(|child| render(renderer, child))
        .collect();

    let mut result = renderer.pre(node);
    result.push_str(&renderer.join(node, parts));
    result.push_str(&renderer.post(node));
    result
}

/// Render with the default strategy, giving back the original source.
pub fn unparse(node: &Node) -> String {
    render(&Verbatim, node)
}
