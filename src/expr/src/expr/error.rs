//! Error types for scope expression parsing

use thiserror::Error;

use super::token::Operator;

/// Failures raised while turning expression text into a [`ScopeExpr`](super::ScopeExpr)
///
/// Evaluation of a compiled expression never fails, so this is the only
/// error an expression can produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing to compile (empty input, or only parentheses and whitespace)
    #[error("Expression contains no operands")]
    Empty,

    /// A `(` was never closed
    #[error("Unbalanced opening parenthesis")]
    UnmatchedOpen,

    /// A `)` without a matching `(` (strict mode only)
    #[error("Unbalanced closing parenthesis")]
    UnmatchedClose,

    /// An operator found fewer operands than it consumes
    #[error("Operator '{operator}' expects {expected} operand(s), found {found}")]
    MissingOperand {
        operator: Operator,
        expected: usize,
        found: usize,
    },

    /// A `!` placed after an operand instead of before one (strict mode only)
    #[error("Operator '!' must precede its operand")]
    MisplacedNegation,

    /// Operands left over with no operator joining them (strict mode only)
    #[error("{count} operand(s) not joined by any operator")]
    TrailingOperands { count: usize },
}

/// Result type for parse operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;
