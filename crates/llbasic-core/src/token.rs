//! Token types for llbasic source code.
//!
//! A [`Token`] is a [`TokenKind`] tag plus at most one literal payload. The
//! payload that may be stored is decided by the tag: integers only on
//! `IntLiteral`, floats only on `FloatLiteral`, text only on `Identifier` and
//! `StringLiteral`. Touching a payload the tag does not allow is a compiler
//! bug and is reported as [`Fail::Internal`].

use std::fmt;

use crate::{Fail, FailResult, Location};

/// All token types of the llbasic language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Literals
    // =========================================
    /// Integer literal: `42`
    IntLiteral,
    /// Float literal: `3.14`
    FloatLiteral,
    /// String literal: `"hello"`
    StringLiteral,

    // =========================================
    // Identifiers
    // =========================================
    /// User-defined identifier or type name
    Identifier,

    // =========================================
    // Keywords
    // =========================================
    /// `function`
    Function,
    /// `end`
    End,
    /// `var`
    Var,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `return`
    Return,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,

    // =========================================
    // Operators
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `=`
    Assign,
    /// `==`
    EqualEqual,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // =========================================
    // Delimiters
    // =========================================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// End of line
    NewLine,

    // =========================================
    // Special
    // =========================================
    /// End of file
    Eof,
}

impl TokenKind {
    /// Look up the keyword spelled by `word`.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match word {
            "function" => Function,
            "end" => End,
            "var" => Var,
            "if" => If,
            "else" => Else,
            "while" => While,
            "return" => Return,
            "break" => Break,
            "continue" => Continue,
            "and" => And,
            "or" => Or,
            "not" => Not,
            _ => return None,
        })
    }

    /// Check if this token kind is a keyword.
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Function | End | Var | If | Else | While | Return | Break | Continue | And | Or | Not
        )
    }

    /// Check if this token kind is a literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral | TokenKind::FloatLiteral | TokenKind::StringLiteral
        )
    }

    /// Check if this token kind carries a text payload.
    pub fn has_text(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::StringLiteral)
    }

    /// Get the string representation of this token kind for error messages.
    pub fn description(self) -> &'static str {
        use TokenKind::*;
        match self {
            IntLiteral => "integer literal",
            FloatLiteral => "float literal",
            StringLiteral => "string literal",
            Identifier => "identifier",
            Function => "'function'",
            End => "'end'",
            Var => "'var'",
            If => "'if'",
            Else => "'else'",
            While => "'while'",
            Return => "'return'",
            Break => "'break'",
            Continue => "'continue'",
            And => "'and'",
            Or => "'or'",
            Not => "'not'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Assign => "'='",
            EqualEqual => "'=='",
            NotEqual => "'!='",
            Less => "'<'",
            LessEqual => "'<='",
            Greater => "'>'",
            GreaterEqual => "'>='",
            LeftParen => "'('",
            RightParen => "')'",
            Comma => "','",
            Colon => "':'",
            NewLine => "end of line",
            Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Literal payload of a token.
#[derive(Debug, Clone, PartialEq)]
enum TokenValue {
    None,
    Int(i32),
    Float(f32),
    Text(String),
}

impl TokenValue {
    fn default_for(kind: TokenKind) -> Self {
        match kind {
            TokenKind::IntLiteral => TokenValue::Int(0),
            TokenKind::FloatLiteral => TokenValue::Float(0.0),
            TokenKind::Identifier | TokenKind::StringLiteral => TokenValue::Text(String::new()),
            _ => TokenValue::None,
        }
    }
}

/// A lexical unit with its source location.
#[derive(Clone, PartialEq)]
pub struct Token {
    /// The type of token.
    pub kind: TokenKind,
    value: TokenValue,
    /// Location of the first character.
    pub location: Location,
}

impl Token {
    /// Create a token whose payload (if its kind allows one) is zero/empty.
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self {
            kind,
            value: TokenValue::default_for(kind),
            location,
        }
    }

    /// Create an integer literal token.
    pub fn int(value: i32, location: Location) -> Self {
        Self {
            kind: TokenKind::IntLiteral,
            value: TokenValue::Int(value),
            location,
        }
    }

    /// Create a float literal token.
    pub fn float(value: f32, location: Location) -> Self {
        Self {
            kind: TokenKind::FloatLiteral,
            value: TokenValue::Float(value),
            location,
        }
    }

    /// Create a string literal token holding the raw literal text.
    pub fn string(text: impl Into<String>, location: Location) -> Self {
        Self {
            kind: TokenKind::StringLiteral,
            value: TokenValue::Text(text.into()),
            location,
        }
    }

    /// Create an identifier token.
    pub fn identifier(name: impl Into<String>, location: Location) -> Self {
        Self {
            kind: TokenKind::Identifier,
            value: TokenValue::Text(name.into()),
            location,
        }
    }

    /// Read the integer payload.
    pub fn get_int(&self) -> FailResult<i32> {
        match (&self.value, self.kind) {
            (TokenValue::Int(value), TokenKind::IntLiteral) => Ok(*value),
            _ => Err(self.payload_mismatch("integer")),
        }
    }

    /// Replace the integer payload.
    pub fn set_int(&mut self, value: i32) -> FailResult<()> {
        if self.kind != TokenKind::IntLiteral {
            return Err(self.payload_mismatch("integer"));
        }
        self.value = TokenValue::Int(value);
        Ok(())
    }

    /// Read the float payload.
    pub fn get_float(&self) -> FailResult<f32> {
        match (&self.value, self.kind) {
            (TokenValue::Float(value), TokenKind::FloatLiteral) => Ok(*value),
            _ => Err(self.payload_mismatch("float")),
        }
    }

    /// Replace the float payload.
    pub fn set_float(&mut self, value: f32) -> FailResult<()> {
        if self.kind != TokenKind::FloatLiteral {
            return Err(self.payload_mismatch("float"));
        }
        self.value = TokenValue::Float(value);
        Ok(())
    }

    /// Read the text payload of an identifier or string literal.
    pub fn get_text(&self) -> FailResult<&str> {
        match &self.value {
            TokenValue::Text(text) if self.kind.has_text() => Ok(text),
            _ => Err(self.payload_mismatch("text")),
        }
    }

    /// Replace the text payload of an identifier or string literal.
    pub fn set_text(&mut self, text: impl Into<String>) -> FailResult<()> {
        if !self.kind.has_text() {
            return Err(self.payload_mismatch("text"));
        }
        self.value = TokenValue::Text(text.into());
        Ok(())
    }

    /// Build a source error blaming this token.
    pub fn fail(&self, message: impl Into<String>) -> Fail {
        Fail::from_token(message, self)
    }

    fn payload_mismatch(&self, wanted: &str) -> Fail {
        Fail::internal_at(
            format!("{} payload requested from {} token", wanted, self.kind),
            self.location,
        )
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{:?} @ {:?}", self.kind, self.location),
            TokenValue::Int(v) => write!(f, "{:?}({}) @ {:?}", self.kind, v, self.location),
            TokenValue::Float(v) => write!(f, "{:?}({:?}) @ {:?}", self.kind, v, self.location),
            TokenValue::Text(s) => write!(f, "{:?}({:?}) @ {:?}", self.kind, s, self.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::new(1, 1)
    }

    #[test]
    fn int_payload_roundtrip() {
        let mut tok = Token::int(42, loc());
        assert_eq!(tok.get_int().unwrap(), 42);
        tok.set_int(7).unwrap();
        assert_eq!(tok.get_int().unwrap(), 7);
    }

    #[test]
    fn new_token_has_default_payload() {
        assert_eq!(Token::new(TokenKind::IntLiteral, loc()).get_int().unwrap(), 0);
        assert_eq!(Token::new(TokenKind::FloatLiteral, loc()).get_float().unwrap(), 0.0);
        assert_eq!(Token::new(TokenKind::Identifier, loc()).get_text().unwrap(), "");
    }

    #[test]
    fn mismatched_payload_read_is_internal_failure() {
        let tok = Token::int(1, Location::new(5, 2));
        let err = tok.get_float().unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.location(), Some(Location::new(5, 2)));

        assert!(tok.get_text().unwrap_err().is_internal());
        assert!(Token::identifier("x", loc()).get_int().unwrap_err().is_internal());
        assert!(Token::new(TokenKind::Plus, loc()).get_text().is_err());
    }

    #[test]
    fn mismatched_payload_write_is_internal_failure() {
        let mut tok = Token::new(TokenKind::While, loc());
        assert!(tok.set_int(3).unwrap_err().is_internal());
        assert!(tok.set_float(1.5).unwrap_err().is_internal());
        assert!(tok.set_text("x").unwrap_err().is_internal());
        assert_eq!(tok, Token::new(TokenKind::While, loc()));
    }

    #[test]
    fn text_payload_on_string_and_identifier() {
        let mut s = Token::string("\"hi\"", loc());
        assert_eq!(s.get_text().unwrap(), "\"hi\"");
        s.set_text("\"yo\"").unwrap();
        assert_eq!(s.get_text().unwrap(), "\"yo\"");
        assert_eq!(Token::identifier("main", loc()).get_text().unwrap(), "main");
    }

    #[test]
    fn token_fail_is_located() {
        let tok = Token::identifier("foo", Location::new(9, 4));
        let fail = tok.fail("unknown function 'foo'");
        assert!(!fail.is_internal());
        assert_eq!(fail.location(), Some(Location::new(9, 4)));
    }

    #[test]
    fn keyword_lookup() {
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("function"), Some(TokenKind::Function));
        assert_eq!(TokenKind::keyword("whilst"), None);
        assert!(TokenKind::While.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
    }

    #[test]
    fn kind_classification() {
        assert!(TokenKind::FloatLiteral.is_literal());
        assert!(!TokenKind::Identifier.is_literal());
        assert!(TokenKind::StringLiteral.has_text());
        assert_eq!(TokenKind::Assign.to_string(), "'='");
        assert_eq!(TokenKind::Eof.description(), "end of file");
    }

    #[test]
    fn debug_format_includes_payload() {
        let tok = Token::int(42, Location::new(2, 3));
        assert_eq!(format!("{:?}", tok), "IntLiteral(42) @ 2:3");
    }
}
