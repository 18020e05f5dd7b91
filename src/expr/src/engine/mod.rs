//! Expression engine
//!
//! Compiles scope expressions under a configured [`ParseMode`] and keeps the
//! compiled trees in an [`ExpressionCache`] so repeated filters skip parsing.

pub mod cache;

pub use cache::{CacheConfig, CacheStats, ExpressionCache};

use std::sync::Arc;
use tracing::{debug, info};

use crate::expr::{parse_with, ParseMode, ParseResult, ScopeExpr};
use crate::scope::ScopeInfo;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How recoverable syntax problems are handled
    pub mode: ParseMode,

    /// Keep compiled expressions between calls
    pub enable_cache: bool,

    /// Cache configuration
    pub cache_config: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::Compatible,
            enable_cache: true,
            cache_config: CacheConfig::default(),
        }
    }
}

/// Scope expression engine with compiled expression caching
///
/// # Examples
///
/// ```
/// use fieldscope_expr::{ScopeEngine, ScopeInfo};
///
/// let engine = ScopeEngine::new();
/// let info = ScopeInfo::new()
///     .with_field("name", vec!["public"])
///     .with_field("email", vec!["private"]);
///
/// let visible = engine.filter("public", &info, &["name", "email"]).unwrap();
/// assert_eq!(visible, vec!["name"]);
/// ```
pub struct ScopeEngine {
    /// Compiled expression cache (absent when caching is disabled)
    cache: Option<ExpressionCache>,

    /// Engine configuration
    config: EngineConfig,
}

impl ScopeEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let cache = if config.enable_cache {
            Some(ExpressionCache::new(config.cache_config.clone()))
        } else {
            None
        };

        info!(
            "ScopeEngine initialized with mode={}, cache={}",
            config.mode, config.enable_cache
        );

        Self { cache, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mode(&self) -> ParseMode {
        self.config.mode
    }

    /// Compile an expression, reusing a cached tree when available
    ///
    /// Parse failures are returned as-is and never cached.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`](crate::expr::ParseError) of the configured mode.
    pub fn compile(&self, expression: &str) -> ParseResult<Arc<ScopeExpr>> {
        let mode = self.config.mode;

        if let Some(cache) = &self.cache {
            if let Some(expr) = cache.get(mode, expression) {
                debug!("Cache hit for expression '{}'", expression);
                return Ok(expr);
            }
        }

        let expr = match parse_with(expression, mode) {
            Ok(expr) => Arc::new(expr),
            Err(e) => {
                debug!("Failed to compile '{}': {}", expression, e);
                return Err(e);
            }
        };

        debug!(
            "Compiled '{}' (depth={}, mode={})",
            expression,
            expr.depth(),
            mode
        );

        if let Some(cache) = &self.cache {
            cache.put(mode, expression, Arc::clone(&expr));
        }

        Ok(expr)
    }

    /// Compile and evaluate an expression in one call
    pub fn filter<F: AsRef<str>>(
        &self,
        expression: &str,
        info: &ScopeInfo,
        fields: &[F],
    ) -> ParseResult<Vec<String>> {
        let expr = self.compile(expression)?;
        Ok(expr.evaluate(info, fields))
    }

    /// Clear the compiled expression cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            info!("Expression cache cleared");
        }
    }

    /// Removes expired cache entries
    pub fn cleanup_expired(&self) {
        if let Some(cache) = &self.cache {
            cache.cleanup_expired();
        }
    }

    /// Cache statistics, or `None` when caching is disabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ExpressionCache::stats)
    }
}

impl Default for ScopeEngine {
    fn default() -> Self {
        Self::new()
    }
}
