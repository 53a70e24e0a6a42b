/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Filter configuration.
//!
//! Values are layered: built-in defaults, then the `texfilter` map in the
//! document metadata, then command-line flags.

use crate::pandoc::{Meta, MetaValue};
use crate::utils::stringify::{stringify_blocks, stringify_inlines};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Metadata key holding filter options.
pub const META_KEY: &str = "texfilter";

/// Column letters accepted as the tabularx column type for default-aligned columns.
pub const COLUMN_LETTERS: &[char] = &['L', 'C', 'R', 'X', 'l', 'c', 'r', 'p'];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("table width must not be empty")]
    EmptyTableWidth,
    #[error("invalid default column '{0}', expected one of L C R X l c r p")]
    InvalidDefaultColumn(char),
    #[error("metadata key 'texfilter' must be a map")]
    NotAMap,
    #[error("invalid 'texfilter' metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Width handed to `\begin{tabularx}`
    pub table_width: String,
    /// Column letter used for `AlignDefault` columns
    pub default_column: char,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            table_width: "14cm".to_string(),
            default_column: 'L',
        }
    }
}

fn meta_to_json(value: &MetaValue) -> Value {
    match value {
        MetaValue::MetaString(s) => Value::String(s.clone()),
        MetaValue::MetaBool(b) => Value::Bool(*b),
        MetaValue::MetaInlines(inlines) => Value::String(stringify_inlines(inlines)),
        MetaValue::MetaBlocks(blocks) => Value::String(stringify_blocks(blocks)),
        MetaValue::MetaList(items) => Value::Array(items.iter().map(meta_to_json).collect()),
        MetaValue::MetaMap(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), meta_to_json(v)))
                .collect(),
        ),
    }
}

impl FilterConfig {
    /// Read options from the document metadata, falling back to defaults
    /// for anything not set there.
    pub fn from_meta(meta: &Meta) -> Result<Self, ConfigError> {
        let Some(value) = meta.get(META_KEY) else {
            return Ok(Self::default());
        };
        if !matches!(value, MetaValue::MetaMap(_)) {
            return Err(ConfigError::NotAMap);
        }
        let config: FilterConfig = serde_json::from_value(meta_to_json(value))?;
        config.validate()
    }

    /// Apply command-line overrides on top of this configuration.
    pub fn with_overrides(
        mut self,
        table_width: Option<String>,
        default_column: Option<char>,
    ) -> Result<Self, ConfigError> {
        if let Some(width) = table_width {
            self.table_width = width;
        }
        if let Some(column) = default_column {
            self.default_column = column;
        }
        self.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.table_width.trim().is_empty() {
            return Err(ConfigError::EmptyTableWidth);
        }
        if !COLUMN_LETTERS.contains(&self.default_column) {
            return Err(ConfigError::InvalidDefaultColumn(self.default_column));
        }
        Ok(self)
    }
}
