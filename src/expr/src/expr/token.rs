//! Tokenizer for scope expressions

use std::fmt;

/// Literal reserved for the wildcard scope
pub const WILDCARD: &str = "*";

/// Operators recognised by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `|` - union
    Or,
    /// `&` - intersection
    And,
    /// `!` - negation
    Not,
}

impl Operator {
    /// Fixed binding strength: `|` < `&` < `!`
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Not => 3,
        }
    }

    /// Number of operands consumed by the operator
    pub fn arity(self) -> usize {
        match self {
            Self::Not => 1,
            Self::Or | Self::And => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Or => '|',
            Self::And => '&',
            Self::Not => '!',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single token of a scope expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// `(`
    Open,
    /// `)`
    Close,
    /// `|`, `&` or `!`
    Op(Operator),
    /// Any other trimmed, non-empty segment (including `*`)
    Literal(String),
}

impl Token {
    fn from_delimiter(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::Open),
            ')' => Some(Self::Close),
            '|' => Some(Self::Op(Operator::Or)),
            '&' => Some(Self::Op(Operator::And)),
            '!' => Some(Self::Op(Operator::Not)),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "("),
            Self::Close => write!(f, ")"),
            Self::Op(op) => write!(f, "{}", op),
            Self::Literal(s) => write!(f, "{}", s),
        }
    }
}

/// Splits an expression into tokens in input order
///
/// Every delimiter character becomes its own token. The text between
/// delimiters is trimmed and kept as a literal when something remains.
///
/// # Examples
///
/// ```
/// use fieldscope_expr::expr::{tokenize, Token, Operator};
///
/// let tokens = tokenize(" public & !secret ");
/// assert_eq!(tokens, vec![
///     Token::Literal("public".to_string()),
///     Token::Op(Operator::And),
///     Token::Op(Operator::Not),
///     Token::Literal("secret".to_string()),
/// ]);
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut segment_start = 0;

    for (idx, c) in input.char_indices() {
        if let Some(token) = Token::from_delimiter(c) {
            push_literal(&mut tokens, &input[segment_start..idx]);
            tokens.push(token);
            // All delimiters are single-byte ASCII
            segment_start = idx + 1;
        }
    }
    push_literal(&mut tokens, &input[segment_start..]);

    tokens
}

fn push_literal(tokens: &mut Vec<Token>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        tokens.push(Token::Literal(trimmed.to_string()));
    }
}
