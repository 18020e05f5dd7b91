//! Field registry: ordered field declarations with their scopes

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::ScopedView;
use crate::engine::ScopeEngine;
use crate::error::{FieldscopeError, Result};
use crate::expr::ScopeExpr;
use crate::scope::ScopeInfo;

/// Declaration of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within a registry
    pub name: String,

    /// Scope tags the field belongs to
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Create a field with no scopes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scopes: Vec::new(),
            description: None,
        }
    }

    /// Add a scope tag (ignored if already present)
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Add several scope tags
    pub fn with_scopes<I, S>(self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        scopes.into_iter().fold(self, |field, scope| field.with_scope(scope))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Validate the field declaration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FieldscopeError::InvalidField(
                "Field name cannot be empty".to_string(),
            ));
        }

        for scope in &self.scopes {
            if scope.trim().is_empty() {
                return Err(FieldscopeError::InvalidField(format!(
                    "Field '{}' has an empty scope",
                    self.name
                )));
            }
        }

        Ok(())
    }
}

/// Ordered, duplicate-free set of field declarations
///
/// The registry is the explicit replacement for attaching per-field
/// accessors at runtime: each field name maps to its descriptor, and
/// declaration order is the order views report fields in.
///
/// # Examples
///
/// ```
/// use fieldscope_expr::{parse, FieldDescriptor, FieldRegistry};
///
/// let mut registry = FieldRegistry::new();
/// registry.declare(FieldDescriptor::new("id")).unwrap();
/// registry.declare(FieldDescriptor::new("email").with_scope("private")).unwrap();
///
/// let view = registry.view(&parse("!private").unwrap());
/// assert_eq!(view.field_names(), vec!["id"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    /// Declarations in declaration order
    fields: Vec<FieldDescriptor>,

    /// Field name to position in `fields`
    index: HashMap<String, usize>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors, rejecting duplicates
    pub fn from_fields<I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = FieldDescriptor>,
    {
        let mut registry = Self::new();
        for field in fields {
            registry.declare(field)?;
        }
        Ok(registry)
    }

    /// Declare a new field
    ///
    /// # Errors
    ///
    /// Returns [`FieldscopeError::DuplicateField`] if the name is taken and
    /// [`FieldscopeError::InvalidField`] if the declaration is invalid.
    pub fn declare(&mut self, field: FieldDescriptor) -> Result<()> {
        field.validate()?;

        if self.index.contains_key(&field.name) {
            return Err(FieldscopeError::DuplicateField(field.name));
        }

        self.index.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    /// Replace the scopes of a declared field
    pub fn set_scopes<I, S>(&mut self, name: &str, scopes: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let position = *self
            .index
            .get(name)
            .ok_or_else(|| FieldscopeError::UnknownField(name.to_string()))?;

        let field = &mut self.fields[position];
        let updated = FieldDescriptor::new(field.name.clone()).with_scopes(scopes);
        updated.validate()?;
        field.scopes = updated.scopes;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declared field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Scope mapping covering every declared field
    pub fn scope_info(&self) -> ScopeInfo {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.scopes.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Narrowed view holding the fields selected by `expr`
    pub fn view(&self, expr: &ScopeExpr) -> ScopedView {
        let info = self.scope_info();
        let selected = expr.select(&info, &self.field_names());

        let fields = selected
            .into_iter()
            .filter_map(|name| self.get(name).cloned())
            .collect::<Vec<_>>();

        debug!(
            "Scoped view '{}' selected {} of {} fields",
            expr,
            fields.len(),
            self.len()
        );

        ScopedView::new(fields)
    }

    /// Compile `expression` with `engine` and build the view
    pub fn view_str(&self, engine: &ScopeEngine, expression: &str) -> Result<ScopedView> {
        let expr = engine.compile(expression)?;
        Ok(self.view(&expr))
    }
}
