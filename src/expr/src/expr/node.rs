//! Compiled expression tree and its evaluation

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scope::ScopeInfo;

/// A compiled scope expression
///
/// The tree is immutable once built and carries no evaluation state, so a
/// single instance can be shared across threads and evaluated against any
/// number of `(ScopeInfo, fields)` pairs.
///
/// Every node selects a subset of the `fields` it is given:
///
/// | Node | Selection |
/// |------|-----------|
/// | `Wildcard` | all fields |
/// | `Literal(s)` | fields carrying scope `s` |
/// | `Negate(c)` | fields not selected by `c` |
/// | `Union(a, b)` | `a`, then fields of `b` not already in `a` |
/// | `Intersect(a, b)` | fields of `a` also selected by `b` |
///
/// # Examples
///
/// ```
/// use fieldscope_expr::{parse, ScopeInfo};
///
/// let info = ScopeInfo::new()
///     .with_field("id", Vec::<String>::new())
///     .with_field("email", vec!["private"]);
///
/// let expr = parse("!private").unwrap();
/// assert_eq!(expr.evaluate(&info, &["id", "email"]), vec!["id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeExpr {
    /// Membership test for a single scope tag
    Literal(String),
    /// `*`, selects everything
    Wildcard,
    /// Complement relative to the evaluated fields
    Negate(Box<ScopeExpr>),
    /// Deduplicated concatenation
    Union(Box<ScopeExpr>, Box<ScopeExpr>),
    /// Common members, in left operand order
    Intersect(Box<ScopeExpr>, Box<ScopeExpr>),
}

impl ScopeExpr {
    pub fn literal(scope: impl Into<String>) -> Self {
        Self::Literal(scope.into())
    }

    pub fn negate(child: ScopeExpr) -> Self {
        Self::Negate(Box::new(child))
    }

    pub fn union(left: ScopeExpr, right: ScopeExpr) -> Self {
        Self::Union(Box::new(left), Box::new(right))
    }

    pub fn intersect(left: ScopeExpr, right: ScopeExpr) -> Self {
        Self::Intersect(Box::new(left), Box::new(right))
    }

    /// Evaluates the expression, returning the selected field names
    ///
    /// The result preserves the order of `fields` (see the type docs for
    /// `Union`) and never contains a name absent from `fields`. Fields
    /// missing from `info` are treated as having no scopes.
    pub fn evaluate<F: AsRef<str>>(&self, info: &ScopeInfo, fields: &[F]) -> Vec<String> {
        let fields: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
        self.select(info, &fields)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Borrowing variant of [`evaluate`](Self::evaluate)
    pub fn select<'f>(&self, info: &ScopeInfo, fields: &[&'f str]) -> Vec<&'f str> {
        match self {
            Self::Wildcard => fields.to_vec(),
            Self::Literal(scope) => fields
                .iter()
                .copied()
                .filter(|field| info.has_scope(field, scope))
                .collect(),
            Self::Negate(child) => {
                // Complement against the same `fields`, not a narrowed set
                let excluded: HashSet<&str> = child.select(info, fields).into_iter().collect();
                fields
                    .iter()
                    .copied()
                    .filter(|field| !excluded.contains(field))
                    .collect()
            }
            Self::Union(left, right) => {
                let mut selected = left.select(info, fields);
                let seen: HashSet<&str> = selected.iter().copied().collect();
                selected.extend(
                    right
                        .select(info, fields)
                        .into_iter()
                        .filter(|field| !seen.contains(field)),
                );
                selected
            }
            Self::Intersect(left, right) => {
                let keep: HashSet<&str> = right.select(info, fields).into_iter().collect();
                left.select(info, fields)
                    .into_iter()
                    .filter(|field| keep.contains(field))
                    .collect()
            }
        }
    }

    /// Nesting depth of the tree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Literal(_) | Self::Wildcard => 1,
            Self::Negate(child) => 1 + child.depth(),
            Self::Union(left, right) | Self::Intersect(left, right) => {
                1 + left.depth().max(right.depth())
            }
        }
    }

    /// Distinct scope tags referenced by the expression, in first-seen order
    pub fn scopes(&self) -> Vec<&str> {
        let mut scopes = Vec::new();
        self.collect_scopes(&mut scopes);
        scopes
    }

    fn collect_scopes<'a>(&'a self, scopes: &mut Vec<&'a str>) {
        match self {
            Self::Literal(scope) => {
                if !scopes.contains(&scope.as_str()) {
                    scopes.push(scope);
                }
            }
            Self::Wildcard => {}
            Self::Negate(child) => child.collect_scopes(scopes),
            Self::Union(left, right) | Self::Intersect(left, right) => {
                left.collect_scopes(scopes);
                right.collect_scopes(scopes);
            }
        }
    }
}

/// Canonical source form with every binary node parenthesized
///
/// Parsing the output of a tree produced by [`parse`](super::parse) or
/// [`parse_strict`](super::parse_strict) in strict mode yields an equal tree.
/// Literals built by hand are printed verbatim, so one spelled `*` or
/// containing `()&|!` or surrounding whitespace does not survive the trip.
impl fmt::Display for ScopeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(scope) => write!(f, "{}", scope),
            Self::Wildcard => write!(f, "*"),
            Self::Negate(child) => write!(f, "!{}", child),
            Self::Union(left, right) => write!(f, "({} | {})", left, right),
            Self::Intersect(left, right) => write!(f, "({} & {})", left, right),
        }
    }
}
