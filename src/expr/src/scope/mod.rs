/// Field scope declarations
///
/// Holds the per-field scope mapping that scope expressions are evaluated
/// against.
///
/// # Examples
///
/// ```
/// use fieldscope_expr::scope::ScopeInfo;
///
/// let info = ScopeInfo::new().with_field("name", vec!["public"]);
/// assert!(info.has_scope("name", "public"));
/// ```

mod types;

pub use types::ScopeInfo;
