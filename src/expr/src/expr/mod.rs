//! Scope expression compiler
//!
//! Turns text such as `public | (private & !sensitive)` into a [`ScopeExpr`]
//! tree in three passes:
//!
//! ```text
//! &str ─► tokenize ─► Vec<Token> ─► to_postfix ─► Vec<Postfix> ─► compile ─► ScopeExpr
//! ```
//!
//! Precedence is fixed: `!` binds tighter than `&`, which binds tighter
//! than `|`. Parentheses group. The literal `*` selects every field.
//!
//! # Examples
//!
//! ```
//! use fieldscope_expr::{parse, ScopeInfo};
//!
//! let info = ScopeInfo::new()
//!     .with_field("name", vec!["public"])
//!     .with_field("ssn", vec!["private", "sensitive"]);
//!
//! let expr = parse("public | (private & sensitive)").unwrap();
//! assert_eq!(expr.evaluate(&info, &["name", "ssn"]), vec!["name", "ssn"]);
//! ```

mod compiler;
mod error;
mod node;
mod precedence;
mod token;


use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use compiler::compile;
pub use error::{ParseError, ParseResult};
pub use node::ScopeExpr;
pub use precedence::{to_postfix, Postfix};
pub use token::{tokenize, Operator, Token, WILDCARD};

/// How malformed-but-recoverable input is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Lenient behavior kept for compatibility with existing expressions:
    /// stray `)` is ignored, leftover operands are dropped, and operators
    /// pending at the end are emitted bottom of stack first.
    #[default]
    Compatible,
    /// Standard shunting-yard: stray `)`, leftover operands and a `!` after
    /// its operand are errors, pending operators are popped top first and
    /// `!` nests (`!!a`).
    Strict,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compatible => "compatible",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compatible" | "lenient" => Ok(Self::Compatible),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown parse mode '{}'", other)),
        }
    }
}

/// Parses an expression in [`ParseMode::Compatible`]
///
/// # Errors
///
/// Returns [`ParseError`] for an unclosed `(`, an operator without enough
/// operands, or an expression with no operands.
pub fn parse(expression: &str) -> ParseResult<ScopeExpr> {
    parse_with(expression, ParseMode::Compatible)
}

/// Parses an expression in [`ParseMode::Strict`]
pub fn parse_strict(expression: &str) -> ParseResult<ScopeExpr> {
    parse_with(expression, ParseMode::Strict)
}

/// Parses an expression using the given mode
pub fn parse_with(expression: &str, mode: ParseMode) -> ParseResult<ScopeExpr> {
    let tokens = tokenize(expression);
    let postfix = to_postfix(tokens, mode)?;
    compile(postfix, mode)
}

impl FromStr for ScopeExpr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
