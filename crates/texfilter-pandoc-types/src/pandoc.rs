/*
 * pandoc.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::fmt;

pub use crate::block::Blocks;
pub use crate::meta::Meta;

/// The `pandoc-api-version` carried by every serialized document.
///
/// Kept as read so the filtered document is written back with the
/// version the calling pandoc expects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion(pub Vec<u64>);

impl ApiVersion {
    /// The version written for documents built from scratch.
    pub fn current() -> Self {
        ApiVersion(vec![1, 23, 1])
    }

    pub fn major(&self) -> u64 {
        self.0.first().copied().unwrap_or(0)
    }

    pub fn minor(&self) -> u64 {
        self.0.get(1).copied().unwrap_or(0)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/*
 * A data structure that mimics Pandoc's `data Pandoc` type.
 */

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pandoc {
    pub api_version: ApiVersion,
    pub meta: Meta,
    pub blocks: Blocks,
}
