//! emotify Lexer
//!
//! Tokenizes Sass (`.scss`) source into a flat stream of tokens.
//! Whitespace and comments are kept as tokens so the parser can rebuild
//! the source byte-for-byte when serializing a tree.
//!
//! # Example
//!
//! ```
//! use emotify_lexer::Scanner;
//!
//! let tokens = Scanner::tokenize("").unwrap();
//! assert_eq!(tokens.len(), 1); // Just EOF
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
