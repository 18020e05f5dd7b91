/// Test suite for field registry and scoped views
///
/// Tests cover:
/// - Declaration validation
/// - View selection order
/// - JSON projection

use super::*;
use crate::engine::ScopeEngine;
use crate::error::FieldscopeError;
use crate::expr::{parse, ParseError};
use serde_json::json;

fn create_registry() -> FieldRegistry {
    FieldRegistry::from_fields(vec![
        FieldDescriptor::new("id"),
        FieldDescriptor::new("name").with_scope("public"),
        FieldDescriptor::new("email").with_scope("private"),
        FieldDescriptor::new("ssn")
            .with_scopes(vec!["private", "sensitive"])
            .with_description("Social security number"),
    ])
    .unwrap()
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_declaration_order_is_kept() {
    let registry = create_registry();
    assert_eq!(registry.field_names(), vec!["id", "name", "email", "ssn"]);
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_duplicate_field_rejected() {
    let mut registry = create_registry();
    let err = registry.declare(FieldDescriptor::new("email")).unwrap_err();
    assert!(matches!(err, FieldscopeError::DuplicateField(name) if name == "email"));
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_invalid_field_rejected() {
    let mut registry = FieldRegistry::new();
    assert!(matches!(
        registry.declare(FieldDescriptor::new("  ")),
        Err(FieldscopeError::InvalidField(_))
    ));
    assert!(matches!(
        registry.declare(FieldDescriptor::new("x").with_scope("")),
        Err(FieldscopeError::InvalidField(_))
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_duplicate_scope_ignored() {
    let field = FieldDescriptor::new("x").with_scopes(vec!["a", "b", "a"]);
    assert_eq!(field.scopes, vec!["a", "b"]);
}

#[test]
fn test_scope_info_covers_all_fields() {
    let info = create_registry().scope_info();
    assert_eq!(info.len(), 4);
    assert!(info.contains_field("id"));
    assert!(info.scopes("id").is_empty());
    assert!(info.has_scope("ssn", "sensitive"));
}

#[test]
fn test_set_scopes() {
    let mut registry = create_registry();
    registry.set_scopes("id", vec!["public"]).unwrap();
    assert!(registry.get("id").unwrap().has_scope("public"));

    let err = registry.set_scopes("missing", vec!["public"]).unwrap_err();
    assert!(matches!(err, FieldscopeError::UnknownField(name) if name == "missing"));
}

// ============================================================================
// View Tests
// ============================================================================

#[test]
fn test_view_follows_expression_order() {
    let registry = create_registry();

    // Union lists its left operand's fields first
    let view = registry.view(&parse("private|public").unwrap());
    assert_eq!(view.field_names(), vec!["email", "ssn", "name"]);

    let view = registry.view(&parse("!sensitive").unwrap());
    assert_eq!(view.field_names(), vec!["id", "name", "email"]);
}

#[test]
fn test_view_keeps_descriptors() {
    let registry = create_registry();
    let view = registry.view(&parse("sensitive").unwrap());

    assert_eq!(view.len(), 1);
    let ssn = view.descriptor("ssn").unwrap();
    assert_eq!(ssn.description.as_deref(), Some("Social security number"));
    assert!(!view.contains("email"));
}

#[test]
fn test_empty_view() {
    let registry = create_registry();
    let view = registry.view(&parse("admin").unwrap());
    assert!(view.is_empty());
}

#[test]
fn test_view_str() {
    let registry = create_registry();
    let engine = ScopeEngine::new();

    let view = registry.view_str(&engine, "(public|private)&!sensitive").unwrap();
    assert!(view.contains("name"));
    assert!(!view.contains("ssn"));

    let err = registry.view_str(&engine, "(public").unwrap_err();
    assert!(matches!(err, FieldscopeError::Parse(ParseError::UnmatchedOpen)));
}

// ============================================================================
// Projection Tests
// ============================================================================

#[test]
fn test_project_object() {
    let registry = create_registry();
    let view = registry.view(&parse("!private").unwrap());

    let record = json!({
        "id": 7,
        "name": "Ada",
        "email": "ada@example.com",
        "ssn": "000-00-0000",
        "extra": true
    });

    assert_eq!(view.project(&record), json!({ "id": 7, "name": "Ada" }));
}

#[test]
fn test_project_never_adds_keys() {
    let registry = create_registry();
    let view = registry.view(&parse("*").unwrap());

    let record = json!({ "name": "Ada" });
    assert_eq!(view.project(&record), json!({ "name": "Ada" }));
}

#[test]
fn test_project_non_object() {
    let registry = create_registry();
    let view = registry.view(&parse("*").unwrap());

    assert_eq!(view.project(&json!([1, 2])), json!([1, 2]));
    assert_eq!(view.project(&json!(null)), json!(null));
}

#[test]
fn test_project_all() {
    let registry = create_registry();
    let view = registry.view(&parse("public").unwrap());

    let records = vec![
        json!({ "id": 1, "name": "Ada" }),
        json!({ "id": 2, "name": "Grace" }),
    ];

    assert_eq!(
        view.project_all(&records),
        vec![json!({ "name": "Ada" }), json!({ "name": "Grace" })]
    );
}
