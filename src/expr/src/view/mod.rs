//! Scoped views over a field registry
//!
//! A [`ScopedView`] is the projection a scope expression produces: the
//! descriptors of the selected fields, in declaration order, plus helpers to
//! narrow JSON records down to those fields.

mod registry;

#[cfg(test)]
mod tests;

pub use registry::{FieldDescriptor, FieldRegistry};

use serde::Serialize;
use serde_json::{Map, Value};

/// Projection of a registry restricted to the fields an expression selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedView {
    fields: Vec<FieldDescriptor>,
}

impl ScopedView {
    pub(crate) fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Selected field names, in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptor(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keeps only the selected keys of a JSON object
    ///
    /// Keys outside the view are dropped and missing keys are not added.
    /// Values that are not objects are returned unchanged.
    pub fn project(&self, record: &Value) -> Value {
        match record {
            Value::Object(object) => Value::Object(self.project_object(object)),
            other => other.clone(),
        }
    }

    /// Applies [`project`](Self::project) to every element of a slice
    pub fn project_all(&self, records: &[Value]) -> Vec<Value> {
        records.iter().map(|record| self.project(record)).collect()
    }

    fn project_object(&self, object: &Map<String, Value>) -> Map<String, Value> {
        self.fields
            .iter()
            .filter_map(|f| {
                object
                    .get(&f.name)
                    .map(|value| (f.name.clone(), value.clone()))
            })
            .collect()
    }
}
