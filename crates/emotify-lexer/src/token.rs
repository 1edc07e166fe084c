/// A position in source text, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token classification for stylesheet source.
///
/// Text-carrying variants hold the raw source slice, so concatenating
/// `Token::text()` over a token stream reproduces the input.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Whitespace run, newlines included.
    Space(String),
    /// Selector fragment, property name, or value fragment.
    Word(String),
    /// `@name`, stored without the `@`.
    AtWord(String),
    /// Quoted string, quotes included.
    String(String),
    /// `/* block */` or `// line` comment, delimiters included.
    Comment(String),

    // Punctuation
    LBrace,
    RBrace,
    Semicolon,
    Colon,
    LParen,
    RParen,

    // End of input
    Eof,
}

/// A token produced by the stylesheet lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The source text this token was scanned from.
    pub fn text(&self) -> String {
        match &self.kind {
            TokenKind::Space(s)
            | TokenKind::Word(s)
            | TokenKind::String(s)
            | TokenKind::Comment(s) => s.clone(),
            TokenKind::AtWord(name) => format!("@{name}"),
            TokenKind::LBrace => "{".into(),
            TokenKind::RBrace => "}".into(),
            TokenKind::Semicolon => ";".into(),
            TokenKind::Colon => ":".into(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
            TokenKind::Eof => String::new(),
        }
    }

    pub fn is_space(&self) -> bool {
        matches!(self.kind, TokenKind::Space(_))
    }
}

/// Characters that end a word.
pub const WORD_TERMINATORS: &[char] = &['{', '}', ';', ':', '(', ')', '"', '\''];

/// Check if a character ends a word token.
pub fn is_word_terminator(c: char) -> bool {
    c.is_whitespace() || WORD_TERMINATORS.contains(&c)
}
