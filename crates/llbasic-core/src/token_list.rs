//! Cursor over a fixed token sequence.
//!
//! The parser is built on these primitives: bounded lookahead, unconditional
//! pop and conditional consumption with [`TokenList::found`]. The list always
//! ends with an [`TokenKind::Eof`] token and the cursor never moves past it.

use crate::{FailResult, Location, Token, TokenKind};

/// A token stream with a read cursor.
#[derive(Debug, Clone)]
pub struct TokenList {
    tokens: Vec<Token>,
    index: usize,
}

impl Default for TokenList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TokenList {
    /// Create a token list, appending an end-of-file marker if missing.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, location));
        }
        Self { tokens, index: 0 }
    }

    /// Append a token in front of the end-of-file marker.
    pub fn push(&mut self, token: Token) {
        let eof = self.tokens.len() - 1;
        self.tokens[eof].location = token.location;
        self.tokens.insert(eof, token);
    }

    /// Number of tokens, including the end-of-file marker.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the list holds only the end-of-file marker.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() == 1
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Whether the cursor sits on the end-of-file marker.
    pub fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// The token under the cursor.
    pub fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    /// Look `offset` tokens ahead of the cursor.
    ///
    /// Lookahead past the end yields the end-of-file marker.
    pub fn peek(&self, offset: usize) -> &Token {
        let at = (self.index + offset).min(self.tokens.len() - 1);
        &self.tokens[at]
    }

    /// Consume and return the current token.
    ///
    /// The cursor does not advance past the end-of-file marker.
    pub fn pop(&mut self) -> &Token {
        let at = self.index;
        if self.tokens[at].kind != TokenKind::Eof {
            self.index += 1;
        }
        &self.tokens[at]
    }

    /// Consume the current token if it has the expected kind.
    ///
    /// Otherwise the cursor is left in place and a located error is returned.
    pub fn pop_expect(&mut self, kind: TokenKind) -> FailResult<&Token> {
        let current = self.current();
        if current.kind != kind {
            return Err(current.fail(format!(
                "expected {}, found {}",
                kind.description(),
                current.kind.description()
            )));
        }
        Ok(self.pop())
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> Option<&Token> {
        self.index.checked_sub(1).map(|at| &self.tokens[at])
    }

    /// Consume the current token and return `true` if it has the given kind.
    ///
    /// Matching the end-of-file marker succeeds without moving the cursor.
    pub fn found(&mut self, kind: TokenKind) -> bool {
        if self.current().kind != kind {
            return false;
        }
        self.pop();
        true
    }

    /// Location of the token under the cursor.
    pub fn location(&self) -> Location {
        self.current().location
    }
}
