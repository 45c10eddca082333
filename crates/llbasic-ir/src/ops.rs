//! Operator definitions for llbasic expressions.
//!
//! Operators are stored on [`BinaryOp`](crate::BinaryOp) and
//! [`UnaryOp`](crate::UnaryOp) nodes. Their `Display` output is the symbol
//! the C++ backend prints between operands.

use llbasic_core::TokenKind;
use std::fmt;

/// Binary operators in llbasic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `=`
    Assign,
    /// `or`
    LogicalOr,
    /// `and`
    LogicalAnd,
    /// `==`
    Equal,
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
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

impl BinaryOperator {
    /// Try to convert a token kind to a binary operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        use TokenKind::*;

        Some(match token {
            Assign => BinaryOperator::Assign,
            Or => BinaryOperator::LogicalOr,
            And => BinaryOperator::LogicalAnd,
            EqualEqual => BinaryOperator::Equal,
            NotEqual => BinaryOperator::NotEqual,
            Less => BinaryOperator::Less,
            LessEqual => BinaryOperator::LessEqual,
            Greater => BinaryOperator::Greater,
            GreaterEqual => BinaryOperator::GreaterEqual,
            Plus => BinaryOperator::Add,
            Minus => BinaryOperator::Sub,
            Star => BinaryOperator::Mul,
            Slash => BinaryOperator::Div,
            Percent => BinaryOperator::Mod,
            _ => return None,
        })
    }

    /// Printable symbol in the generated C++.
    pub fn symbol(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Assign => "=",
            LogicalOr => "||",
            LogicalAnd => "&&",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
        }
    }

    /// Whether this is the assignment operator.
    pub fn is_assignment(&self) -> bool {
        matches!(self, BinaryOperator::Assign)
    }

    /// Check if this operator produces a boolean.
    pub fn is_comparison(&self) -> bool {
        use BinaryOperator::*;
        matches!(
            self,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual | LogicalAnd | LogicalOr
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary (prefix) operators in llbasic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `-`
    Neg,
    /// `not`
    LogicalNot,
}

impl UnaryOperator {
    /// Try to convert a token kind to a prefix operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        match token {
            TokenKind::Minus => Some(UnaryOperator::Neg),
            TokenKind::Not => Some(UnaryOperator::LogicalNot),
            _ => None,
        }
    }

    /// Printable symbol in the generated C++.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Neg => "-",
            UnaryOperator::LogicalNot => "!",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_from_token() {
        assert_eq!(
            BinaryOperator::from_token(TokenKind::Plus),
            Some(BinaryOperator::Add)
        );
        assert_eq!(
            BinaryOperator::from_token(TokenKind::And),
            Some(BinaryOperator::LogicalAnd)
        );
        assert_eq!(
            BinaryOperator::from_token(TokenKind::Assign),
            Some(BinaryOperator::Assign)
        );
        assert_eq!(BinaryOperator::from_token(TokenKind::Comma), None);
    }

    #[test]
    fn word_operators_print_as_symbols() {
        assert_eq!(BinaryOperator::LogicalAnd.to_string(), "&&");
        assert_eq!(BinaryOperator::LogicalOr.to_string(), "||");
        assert_eq!(UnaryOperator::LogicalNot.to_string(), "!");
    }

    #[test]
    fn assignment_classification() {
        assert!(BinaryOperator::Assign.is_assignment());
        assert!(!BinaryOperator::Add.is_assignment());
        assert!(BinaryOperator::Less.is_comparison());
        assert!(!BinaryOperator::Mul.is_comparison());
    }

    #[test]
    fn unary_from_token() {
        assert_eq!(
            UnaryOperator::from_token(TokenKind::Minus),
            Some(UnaryOperator::Neg)
        );
        assert_eq!(
            UnaryOperator::from_token(TokenKind::Not),
            Some(UnaryOperator::LogicalNot)
        );
        assert_eq!(UnaryOperator::from_token(TokenKind::Plus), None);
    }
}
