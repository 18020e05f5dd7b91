//! # Fieldscope Expression Engine
//!
//! Compiles scope expressions into reusable field filters.
//!
//! ## Features
//!
//! - **Scope expressions** over field scope tags: `&`, `|`, `!`, `*` and grouping
//! - **Compile once, evaluate many**: compiled trees are immutable and `Send + Sync`
//! - **Compatible and strict parsing** modes
//! - **Compiled expression caching** with TTL and capacity bounds
//! - **Field registry** producing scoped views and JSON projections
//!
//! ## Example
//!
//! ```rust
//! use fieldscope_expr::{parse, ScopeInfo};
//!
//! let info = ScopeInfo::new()
//!     .with_field("id", Vec::<String>::new())
//!     .with_field("name", vec!["public"])
//!     .with_field("email", vec!["private"])
//!     .with_field("ssn", vec!["private", "sensitive"]);
//!
//! let fields = ["id", "name", "email", "ssn"];
//!
//! let expr = parse("public|private").unwrap();
//! assert_eq!(expr.evaluate(&info, &fields), vec!["name", "email", "ssn"]);
//!
//! let expr = parse("*&!sensitive").unwrap();
//! assert_eq!(expr.evaluate(&info, &fields), vec!["id", "name", "email"]);
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod expr;
pub mod scope;
pub mod view;

// Re-export commonly used types
pub use document::ScopeDocument;
pub use engine::{CacheConfig, CacheStats, EngineConfig, ScopeEngine};
pub use error::{FieldscopeError, Result};
pub use expr::{parse, parse_strict, parse_with, ParseError, ParseMode, ScopeExpr};
pub use scope::ScopeInfo;
pub use view::{FieldDescriptor, FieldRegistry, ScopedView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
