//! Postfix compiler: builds the expression tree with an operand stack

use tracing::debug;

use super::error::{ParseError, ParseResult};
use super::node::ScopeExpr;
use super::precedence::Postfix;
use super::token::{Operator, WILDCARD};
use super::ParseMode;

/// Compiles a postfix sequence into a single [`ScopeExpr`]
///
/// Binary nodes keep their operands in source order: the operand written
/// first becomes `left`.
///
/// # Errors
///
/// - [`ParseError::MissingOperand`] when an operator lacks operands
/// - [`ParseError::Empty`] when no operand was produced at all
/// - [`ParseError::TrailingOperands`] in strict mode when more than one
///   operand remains; compatible mode returns the topmost and drops the rest
pub fn compile(postfix: Vec<Postfix>, mode: ParseMode) -> ParseResult<ScopeExpr> {
    let mut operands: Vec<ScopeExpr> = Vec::with_capacity(postfix.len());

    for item in postfix {
        let node = match item {
            Postfix::Literal(literal) if literal == WILDCARD => ScopeExpr::Wildcard,
            Postfix::Literal(literal) => ScopeExpr::Literal(literal),
            Postfix::Op(op) => apply(op, &mut operands)?,
        };
        operands.push(node);
    }

    let root = operands.pop().ok_or(ParseError::Empty)?;

    if !operands.is_empty() {
        match mode {
            ParseMode::Strict => {
                return Err(ParseError::TrailingOperands {
                    count: operands.len(),
                });
            }
            ParseMode::Compatible => {
                debug!(
                    discarded = operands.len(),
                    "Discarding operands not joined by an operator"
                );
            }
        }
    }

    Ok(root)
}

/// Pops the operands of `op` and builds its node
fn apply(op: Operator, operands: &mut Vec<ScopeExpr>) -> ParseResult<ScopeExpr> {
    if operands.len() < op.arity() {
        return Err(ParseError::MissingOperand {
            operator: op,
            expected: op.arity(),
            found: operands.len(),
        });
    }

    let node = match op {
        Operator::Not => ScopeExpr::negate(pop_operand(op, operands)?),
        Operator::And | Operator::Or => {
            let right = pop_operand(op, operands)?;
            let left = pop_operand(op, operands)?;
            if op == Operator::And {
                ScopeExpr::intersect(left, right)
            } else {
                ScopeExpr::union(left, right)
            }
        }
    };

    Ok(node)
}

fn pop_operand(op: Operator, operands: &mut Vec<ScopeExpr>) -> ParseResult<ScopeExpr> {
    operands.pop().ok_or(ParseError::MissingOperand {
        operator: op,
        expected: op.arity(),
        found: 0,
    })
}
