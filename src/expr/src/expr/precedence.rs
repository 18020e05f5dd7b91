//! Infix to postfix conversion (shunting-yard)
//!
//! Two stacks are used: pending operators and the postfix output. Literals go
//! straight to the output, operators wait on the stack until an operator that
//! binds no tighter arrives.

use tracing::trace;

use super::error::{ParseError, ParseResult};
use super::token::{Operator, Token};
use super::ParseMode;

/// One entry of a postfix (reverse-polish) sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Postfix {
    Literal(String),
    Op(Operator),
}

/// Entries on the operator stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Open,
    Op(Operator),
}

/// Converts an infix token sequence into postfix order
///
/// In [`ParseMode::Compatible`] the lenient behaviors are kept as-is: a `)`
/// with nothing to close is ignored, and operators still pending at the end
/// are appended in stack order (bottom first) rather than popped.
///
/// [`ParseMode::Strict`] rejects an unmatched `)` and a postfix `!` (as in
/// `a!`), treats `!` as right-associative and pops pending operators top
/// first.
///
/// # Errors
///
/// Returns [`ParseError::UnmatchedOpen`] if a `(` is never closed, and
/// [`ParseError::UnmatchedClose`] or [`ParseError::MisplacedNegation`] in
/// strict mode.
pub fn to_postfix(tokens: Vec<Token>, mode: ParseMode) -> ParseResult<Vec<Postfix>> {
    let mut operators: Vec<Pending> = Vec::new();
    let mut output = Vec::with_capacity(tokens.len());
    // Whether the previous token completed an operand (literal or `)`)
    let mut after_operand = false;

    for token in tokens {
        match token {
            Token::Literal(literal) => {
                output.push(Postfix::Literal(literal));
                after_operand = true;
            }
            Token::Open => {
                operators.push(Pending::Open);
                after_operand = false;
            }
            Token::Close => {
                close_group(&mut operators, &mut output, mode)?;
                after_operand = true;
            }
            Token::Op(op) => {
                if mode == ParseMode::Strict && op == Operator::Not && after_operand {
                    return Err(ParseError::MisplacedNegation);
                }
                after_operand = false;

                while let Some(&Pending::Op(top)) = operators.last() {
                    if !yields_to(top, op, mode) {
                        break;
                    }
                    operators.pop();
                    output.push(Postfix::Op(top));
                }
                operators.push(Pending::Op(op));
            }
        }
    }

    if operators.contains(&Pending::Open) {
        return Err(ParseError::UnmatchedOpen);
    }

    let remaining = operators.into_iter().filter_map(|pending| match pending {
        Pending::Op(op) => Some(Postfix::Op(op)),
        Pending::Open => None,
    });

    match mode {
        ParseMode::Compatible => output.extend(remaining),
        ParseMode::Strict => output.extend(remaining.rev()),
    }

    trace!(mode = %mode, len = output.len(), "Resolved postfix order");
    Ok(output)
}

/// Whether the operator on top of the stack must be emitted before `incoming`
fn yields_to(top: Operator, incoming: Operator, mode: ParseMode) -> bool {
    match (mode, incoming) {
        // Prefix `!` never pops another `!`, so `!!a` nests
        (ParseMode::Strict, Operator::Not) => top.precedence() > incoming.precedence(),
        _ => top.precedence() >= incoming.precedence(),
    }
}

/// Pops operators into the output up to and including the nearest `(`
fn close_group(
    operators: &mut Vec<Pending>,
    output: &mut Vec<Postfix>,
    mode: ParseMode,
) -> ParseResult<()> {
    loop {
        match operators.pop() {
            Some(Pending::Open) => return Ok(()),
            Some(Pending::Op(op)) => output.push(Postfix::Op(op)),
            None => {
                return match mode {
                    ParseMode::Compatible => Ok(()),
                    ParseMode::Strict => Err(ParseError::UnmatchedClose),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::token::tokenize;

    fn render(postfix: &[Postfix]) -> String {
        postfix
            .iter()
            .map(|p| match p {
                Postfix::Literal(s) => s.clone(),
                Postfix::Op(op) => op.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn postfix(input: &str, mode: ParseMode) -> ParseResult<String> {
        to_postfix(tokenize(input), mode).map(|p| render(&p))
    }

    #[test]
    fn test_single_literal() {
        assert_eq!(postfix("a", ParseMode::Compatible).unwrap(), "a");
    }

    #[test]
    fn test_equal_precedence_pops_left_first() {
        assert_eq!(postfix("a|b|c", ParseMode::Compatible).unwrap(), "a b | c |");
        assert_eq!(postfix("a&b&c", ParseMode::Strict).unwrap(), "a b & c &");
    }

    #[test]
    fn test_higher_precedence_pops_lower() {
        assert_eq!(postfix("a&b|c", ParseMode::Compatible).unwrap(), "a b & c |");
        assert_eq!(postfix("!a|b", ParseMode::Compatible).unwrap(), "a ! b |");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(postfix("(a|b)&c", ParseMode::Compatible).unwrap(), "a b | c &");
        assert_eq!(postfix("a&(b|c)", ParseMode::Strict).unwrap(), "a b c | &");
    }

    #[test]
    fn test_compatible_drains_bottom_first() {
        // Stack holds [|, &] at the end; appended as-is
        assert_eq!(postfix("a|b&c", ParseMode::Compatible).unwrap(), "a b c | &");
        assert_eq!(postfix("a&!b", ParseMode::Compatible).unwrap(), "a b & !");
    }

    #[test]
    fn test_strict_drains_top_first() {
        assert_eq!(postfix("a|b&c", ParseMode::Strict).unwrap(), "a b c & |");
        assert_eq!(postfix("a&!b", ParseMode::Strict).unwrap(), "a b ! &");
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(postfix("!!a", ParseMode::Compatible).unwrap(), "! a !");
        assert_eq!(postfix("!!a", ParseMode::Strict).unwrap(), "a ! !");
    }

    #[test]
    fn test_unmatched_open() {
        assert_eq!(postfix("(a", ParseMode::Compatible), Err(ParseError::UnmatchedOpen));
        assert_eq!(postfix("((a)", ParseMode::Strict), Err(ParseError::UnmatchedOpen));
        assert_eq!(postfix("a&(b|(c)", ParseMode::Compatible), Err(ParseError::UnmatchedOpen));
    }

    #[test]
    fn test_unmatched_close() {
        assert_eq!(postfix("a)", ParseMode::Compatible).unwrap(), "a");
        assert_eq!(postfix("a&b)", ParseMode::Compatible).unwrap(), "a b &");
        assert_eq!(postfix("a)", ParseMode::Strict), Err(ParseError::UnmatchedClose));
    }

    #[test]
    fn test_postfix_negation() {
        assert_eq!(postfix("a!", ParseMode::Strict), Err(ParseError::MisplacedNegation));
        assert_eq!(postfix("a!&b", ParseMode::Strict), Err(ParseError::MisplacedNegation));
        assert_eq!(postfix("(a)!", ParseMode::Strict), Err(ParseError::MisplacedNegation));
        assert_eq!(postfix("a&!b", ParseMode::Strict).unwrap(), "a b ! &");
        assert_eq!(postfix("(!a)&!(b)", ParseMode::Strict).unwrap(), "a ! b ! &");

        // Compatible mode keeps accepting it
        assert_eq!(postfix("a!", ParseMode::Compatible).unwrap(), "a !");
    }
}
