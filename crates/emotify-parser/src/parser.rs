//! Document parser for stylesheets.
//!
//! Parses the lossless token stream from `emotify-lexer` into a [`Stylesheet`]
//! tree. A statement is read up to the first `;`, `{` or `}` outside
//! parentheses: `{` opens a rule (or at-rule block), anything else is a
//! declaration split at its first `:`.
//!
//! Uses recursive descent, one level per block.

use crate::ast::{NodeId, NodeKind, Raws, Stylesheet};
use crate::ParseError;
use emotify_lexer::{Token, TokenKind};

/// How a statement ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    OpenBrace,
    /// `}` or end of input, left for the caller.
    None,
}

/// Stylesheet parser.
///
/// Converts a flat token stream into a [`Stylesheet`] arena with
/// parent links and source lines.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    sheet: Stylesheet,
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            sheet: Stylesheet::new(),
        }
    }

    /// Parse source text into a stylesheet.
    pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
        let tokens = emotify_lexer::Scanner::tokenize(source).map_err(|e| ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        })?;

        let mut parser = Parser::new(tokens);
        parser.parse_body(NodeId::ROOT)?;
        Ok(parser.sheet)
    }

    /// Parse the children of `parent` up to its closing `}` (or EOF for the root).
    fn parse_body(&mut self, parent: NodeId) -> Result<(), ParseError> {
        let mut before = String::new();

        loop {
            before.push_str(&self.collect_space());

            match &self.peek().kind {
                TokenKind::Eof => {
                    if parent != NodeId::ROOT {
                        return Err(ParseError {
                            message: "Unclosed block".into(),
                            line: self.sheet.line(parent),
                            column: 1,
                        });
                    }
                    self.sheet.node_mut(parent).raws.after = before;
                    return Ok(());
                }
                TokenKind::RBrace => {
                    if parent == NodeId::ROOT {
                        return Err(self.error("Unexpected '}'".into()));
                    }
                    self.advance();
                    self.sheet.node_mut(parent).raws.after = before;
                    return Ok(());
                }
                TokenKind::Semicolon => {
                    // Stray `;` between statements
                    self.advance();
                    before.push(';');
                }
                TokenKind::Comment(text) => {
                    let text = text.clone();
                    let line = self.peek().span.line;
                    self.advance();
                    let raws = Raws {
                        before: std::mem::take(&mut before),
                        ..Raws::default()
                    };
                    self.sheet
                        .append(parent, NodeKind::Comment { text }, line, raws);
                }
                TokenKind::AtWord(name) => {
                    let name = name.clone();
                    self.parse_at_rule(parent, name, std::mem::take(&mut before))?;
                }
                _ => {
                    self.parse_rule_or_decl(parent, std::mem::take(&mut before))?;
                }
            }
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse `@name params;` or `@name params { ... }`.
    fn parse_at_rule(
        &mut self,
        parent: NodeId,
        name: String,
        before: String,
    ) -> Result<(), ParseError> {
        let line = self.peek().span.line;
        self.advance(); // consume `@name`

        let after_name = self.collect_space();
        let (mut statement, terminator) = self.collect_statement();
        let between = split_trailing_space(&mut statement);
        let params = join(&statement);

        let has_block = terminator == Terminator::OpenBrace;
        let raws = Raws {
            before,
            between,
            after_name,
            semicolon: terminator == Terminator::Semicolon,
            ..Raws::default()
        };
        let id = self.sheet.append(
            parent,
            NodeKind::AtRule {
                name,
                params,
                has_block,
            },
            line,
            raws,
        );

        if has_block {
            self.parse_body(id)?;
        }
        Ok(())
    }

    /// Parse `selector { ... }` or `prop: value;`.
    fn parse_rule_or_decl(&mut self, parent: NodeId, before: String) -> Result<(), ParseError> {
        let (line, column) = (self.peek().span.line, self.peek().span.column);
        let (mut statement, terminator) = self.collect_statement();

        if terminator == Terminator::OpenBrace {
            let between = split_trailing_space(&mut statement);
            let raws = Raws {
                before,
                between,
                ..Raws::default()
            };
            let selector = join(&statement);
            let id = self
                .sheet
                .append(parent, NodeKind::Rule { selector }, line, raws);
            return self.parse_body(id);
        }

        let Some(colon) = statement
            .iter()
            .position(|t| t.kind == TokenKind::Colon)
        else {
            return Err(ParseError {
                message: format!("Unknown word '{}'", join(&statement).trim()),
                line,
                column,
            });
        };

        let mut value_tokens = statement.split_off(colon + 1);
        let mut prop_tokens = statement;
        prop_tokens.pop(); // the colon

        let mut between = split_trailing_space(&mut prop_tokens);
        between.push(':');
        let leading = value_tokens.iter().take_while(|t| t.is_space()).count();
        between.extend(value_tokens.drain(..leading).map(|t| t.text()));
        let after = split_trailing_space(&mut value_tokens);

        let raws = Raws {
            before,
            between,
            after,
            semicolon: terminator == Terminator::Semicolon,
            ..Raws::default()
        };
        self.sheet.append(
            parent,
            NodeKind::Decl {
                prop: join(&prop_tokens),
                value: join(&value_tokens),
            },
            line,
            raws,
        );
        Ok(())
    }

    /// Collect tokens up to the statement terminator at parenthesis depth 0.
    /// `;` and `{` are consumed; `}` and EOF are not.
    fn collect_statement(&mut self) -> (Vec<Token>, Terminator) {
        let mut tokens = Vec::new();
        let mut depth = 0usize;

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof => return (tokens, Terminator::None),
                TokenKind::RBrace if depth == 0 => return (tokens, Terminator::None),
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return (tokens, Terminator::Semicolon);
                }
                TokenKind::LBrace if depth == 0 => {
                    self.advance();
                    return (tokens, Terminator::OpenBrace);
                }
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            tokens.push(token.clone());
            self.advance();
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Consume consecutive whitespace tokens and return their text.
    fn collect_space(&mut self) -> String {
        let mut text = String::new();
        while let TokenKind::Space(s) = &self.peek().kind {
            text.push_str(s);
            self.advance();
        }
        text
    }

    fn peek(&self) -> &Token {
        // The lexer always ends the stream with EOF.
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn error(&self, message: String) -> ParseError {
        let token = self.peek();
        ParseError {
            message,
            line: token.span.line,
            column: token.span.column,
        }
    }
}

/// Concatenate token texts.
fn join(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}

/// Remove trailing whitespace tokens and return their text.
fn split_trailing_space(tokens: &mut Vec<Token>) -> String {
    let keep = tokens.len() - tokens.iter().rev().take_while(|t| t.is_space()).count();
    join(&tokens.split_off(keep))
}
