/// Scope declarations per field
///
/// Provides the `ScopeInfo` mapping consulted by literal membership tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Maps each field name to the scope tags declared on it
///
/// Tag order is irrelevant; only membership is tested. A field missing from
/// the mapping is treated as having no scopes.
///
/// # Examples
///
/// ```
/// use fieldscope_expr::ScopeInfo;
///
/// let info = ScopeInfo::new()
///     .with_field("email", vec!["private"])
///     .with_field("ssn", vec!["private", "sensitive"]);
///
/// assert!(info.has_scope("ssn", "sensitive"));
/// assert!(!info.has_scope("email", "sensitive"));
/// assert!(info.scopes("unknown").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeInfo {
    fields: HashMap<String, Vec<String>>,
}

impl ScopeInfo {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_field<I, S>(mut self, field: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(field, scopes);
        self
    }

    /// Sets the scopes of a field, returning the previous declaration
    pub fn insert<I, S>(&mut self, field: impl Into<String>, scopes: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(field.into(), scopes.into_iter().map(Into::into).collect())
    }

    /// Scope tags declared on `field`; empty when the field is unknown
    pub fn scopes(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `field` carries `scope`
    pub fn has_scope(&self, field: &str, scope: &str) -> bool {
        self.scopes(field).iter().any(|s| s == scope)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields with a declaration
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(field, scopes)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, scopes)| (field.as_str(), scopes.as_slice()))
    }
}

impl<K, I, S> FromIterator<(K, I)> for ScopeInfo
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut info = Self::new();
        for (field, scopes) in iter {
            info.insert(field, scopes);
        }
        info
    }
}

impl From<HashMap<String, Vec<String>>> for ScopeInfo {
    fn from(fields: HashMap<String, Vec<String>>) -> Self {
        Self { fields }
    }
}
