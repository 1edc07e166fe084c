//! emotify Parser
//!
//! Parses stylesheet source into a [`Stylesheet`] tree with parent links,
//! source lines and raw whitespace, and serializes (sub)trees back to text.
//!
//! The serializer reports every emitted fragment to a builder callback along
//! with the node that produced it, which lets callers filter a subtree while
//! it is being printed.

pub mod ast;
pub mod parser;
pub mod stringify;

pub use ast::{NodeData, NodeId, NodeKind, Raws, Stylesheet};
pub use parser::Parser;
pub use stringify::Edge;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
