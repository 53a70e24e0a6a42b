/*
 * diagnostic_collector.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! DiagnosticCollector - collects warnings raised while filtering
//!
//! Filtering itself never fails; anything worth reporting is a warning that
//! is logged once the document has been traversed.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
}

/// Collector for diagnostic messages
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            message: message.into(),
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Emit every collected diagnostic as a tracing event
    pub fn log(&self) {
        for diagnostic in &self.diagnostics {
            tracing::warn!("{}", diagnostic.message);
        }
    }
}
