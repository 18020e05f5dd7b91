//! Scope documents: JSON files declaring fields and their scopes
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "id" },
//!     { "name": "email", "scopes": ["private"] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{FieldscopeError, Result};
use crate::view::{FieldDescriptor, FieldRegistry};

/// Serialized form of a [`FieldRegistry`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDocument {
    /// Field declarations in order
    pub fields: Vec<FieldDescriptor>,
}

impl ScopeDocument {
    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a document file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let document = Self::from_json(&contents)?;
        debug!(
            "Loaded scope document {} ({} fields)",
            path.display(),
            document.fields.len()
        );
        Ok(document)
    }

    /// Build a registry, validating every declaration
    ///
    /// # Errors
    ///
    /// Returns [`FieldscopeError::Document`] wrapping the first duplicate or
    /// invalid declaration.
    pub fn into_registry(self) -> Result<FieldRegistry> {
        FieldRegistry::from_fields(self.fields).map_err(|e| match e {
            FieldscopeError::DuplicateField(_) | FieldscopeError::InvalidField(_) => {
                FieldscopeError::Document(e.to_string())
            }
            other => other,
        })
    }
}

impl From<&FieldRegistry> for ScopeDocument {
    fn from(registry: &FieldRegistry) -> Self {
        Self {
            fields: registry.fields().to_vec(),
        }
    }
}
