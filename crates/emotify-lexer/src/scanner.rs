use crate::token::{is_word_terminator, Span, Token, TokenKind};
use crate::LexerError;

/// Stylesheet source scanner.
///
/// Tokenizes `.scss` source into a lossless token stream.
/// Handles whitespace runs, block and line comments, quoted strings,
/// `@` keywords, `#{}` interpolation inside words, and `url(...)` bodies.
///
/// Concatenating every token's text reproduces the source exactly.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens()?;
        Ok(scanner.tokens)
    }

    /// Scan all tokens from the source.
    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.emit(TokenKind::Eof);
        Ok(())
    }

    /// Scan the next token.
    fn scan_token(&mut self) -> Result<(), LexerError> {
        let ch = self.peek();

        match ch {
            c if c.is_whitespace() => {
                self.scan_space();
                Ok(())
            }

            // Comments
            '/' if self.peek_next() == '*' => self.scan_block_comment(),
            '/' if self.peek_next() == '/' => {
                self.scan_line_comment();
                Ok(())
            }

            // Strings
            '"' | '\'' => self.scan_string(),

            // Punctuation
            '{' => {
                self.single(TokenKind::LBrace);
                Ok(())
            }
            '}' => {
                self.single(TokenKind::RBrace);
                Ok(())
            }
            ';' => {
                self.single(TokenKind::Semicolon);
                Ok(())
            }
            ':' => {
                self.single(TokenKind::Colon);
                Ok(())
            }
            '(' => {
                self.single(TokenKind::LParen);
                Ok(())
            }
            ')' => {
                self.single(TokenKind::RParen);
                Ok(())
            }

            '@' if Self::is_name_char(self.peek_next()) => {
                self.scan_at_word();
                Ok(())
            }

            _ => self.scan_word(),
        }
    }

    // --- Scanners ---

    fn scan_space(&mut self) {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);
        let mut text = String::new();

        while !self.is_at_end() && self.peek().is_whitespace() {
            text.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Space(text), span));
    }

    /// Scan a `/* ... */` comment. Block comments may span lines.
    fn scan_block_comment(&mut self) -> Result<(), LexerError> {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);
        let mut text = String::from("/*");
        self.advance();
        self.advance();

        loop {
            if self.is_at_end() {
                return Err(LexerError {
                    message: "Unterminated comment".into(),
                    line: start_line,
                    column: start_col,
                });
            }
            if self.peek() == '*' && self.peek_next() == '/' {
                text.push_str("*/");
                self.advance();
                self.advance();
                break;
            }
            text.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Comment(text), span));
        Ok(())
    }

    /// Scan a `// ...` comment up to (not including) the line break.
    fn scan_line_comment(&mut self) {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);
        let mut text = String::new();

        while !self.is_at_end() && self.peek() != '\n' && self.peek() != '\r' {
            text.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Comment(text), span));
    }

    /// Scan a quoted string. The raw text, quotes and escapes included, is kept.
    fn scan_string(&mut self) -> Result<(), LexerError> {
        let quote = self.peek();
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);
        let mut text = String::new();
        text.push(quote);
        self.advance(); // consume opening quote

        while !self.is_at_end() && self.peek() != quote {
            if self.peek() == '\\' {
                text.push('\\');
                self.advance();
                if self.is_at_end() {
                    break;
                }
            }
            text.push(self.peek());
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated string".into(),
                line: start_line,
                column: start_col,
            });
        }

        text.push(quote);
        self.advance(); // consume closing quote

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::String(text), span));
        Ok(())
    }

    /// Scan `@name`. The stored name excludes the `@`.
    fn scan_at_word(&mut self) {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);
        self.advance(); // consume `@`

        let mut name = String::new();
        while !self.is_at_end() && Self::is_name_char(self.peek()) {
            name.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::AtWord(name), span));
    }

    /// Scan a word: everything up to whitespace, punctuation, a quote or a comment.
    /// `#{...}` interpolation is absorbed whole, and `url(...)` keeps its body
    /// so protocol slashes are not read as a line comment.
    fn scan_word(&mut self) -> Result<(), LexerError> {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);
        let mut text = String::new();

        while !self.is_at_end() {
            let c = self.peek();
            if c == '#' && self.peek_next() == '{' {
                self.scan_interpolation(&mut text)?;
                continue;
            }
            if c == '/' && (self.peek_next() == '*' || self.peek_next() == '/') {
                break;
            }
            if is_word_terminator(c) {
                break;
            }
            text.push(c);
            self.advance();
        }

        if text.eq_ignore_ascii_case("url") && self.peek() == '(' {
            self.scan_url_body(&mut text)?;
        }

        // A lone `/` or `@` still has to make progress.
        if text.is_empty() {
            text.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Word(text), span));
        Ok(())
    }

    /// Append a `#{...}` interpolation to `text`. Tracks brace depth for nesting.
    fn scan_interpolation(&mut self, text: &mut String) -> Result<(), LexerError> {
        let (start_line, start_col) = (self.line, self.column);
        text.push('#');
        text.push('{');
        self.advance();
        self.advance();

        let mut depth = 1;
        while !self.is_at_end() && depth > 0 {
            let c = self.peek();
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            text.push(c);
            self.advance();
        }

        if depth > 0 {
            return Err(LexerError {
                message: "Unterminated interpolation".into(),
                line: start_line,
                column: start_col,
            });
        }
        Ok(())
    }

    /// Append a `(...)` url body to `text`, quotes and all.
    fn scan_url_body(&mut self, text: &mut String) -> Result<(), LexerError> {
        let (start_line, start_col) = (self.line, self.column);
        let mut quote: Option<char> = None;

        while !self.is_at_end() {
            let c = self.peek();
            text.push(c);
            self.advance();
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (None, '"' | '\'') => quote = Some(c),
                (None, ')') => return Ok(()),
                _ => {}
            }
        }

        Err(LexerError {
            message: "Unterminated url()".into(),
            line: start_line,
            column: start_col,
        })
    }

    // --- Helpers ---

    fn is_name_char(c: char) -> bool {
        c.is_alphanumeric() || c == '-' || c == '_'
    }

    fn single(&mut self, kind: TokenKind) {
        self.emit(kind);
        self.advance();
        if let Some(last) = self.tokens.last_mut() {
            last.span.end = self.pos;
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let span = Span::new(self.pos, self.pos, self.line, self.column);
        self.tokens.push(Token::new(kind, span));
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn peek_next(&self) -> char {
        if self.pos + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.pos + 1]
        }
    }

    /// Advance one character, keeping line and column in step.
    /// `\r\n` counts as a single line break.
    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        let c = self.chars[self.pos];
        self.pos += 1;
        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            '\r' if self.peek() != '\n' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}
