/*
 * filter_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Context for filter execution: target format, configuration and diagnostics.

use crate::config::FilterConfig;
use crate::utils::diagnostic_collector::{Diagnostic, DiagnosticCollector};

/// Context for filter execution.
///
/// This context is threaded through filter traversal functions so handlers
/// can read the run's configuration and emit warnings without aborting.
pub struct FilterContext {
    /// Output format pandoc passed as the first argument, e.g. `latex`
    pub format: String,
    pub config: FilterConfig,
    /// Accumulated warnings
    pub diagnostics: DiagnosticCollector,
}

impl FilterContext {
    pub fn new(format: impl Into<String>, config: FilterConfig) -> Self {
        Self {
            format: format.into(),
            config,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Add a warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.warn(message);
    }

    /// Get reference to diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.diagnostics()
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new("latex", FilterConfig::default())
    }
}
