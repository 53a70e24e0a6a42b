/*
 * errors.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::config::ConfigError;
use crate::pandoc::ApiVersion;
use crate::readers::json::JsonReadError;
use crate::writers::json::JsonWriteError;
use thiserror::Error;

/// Oldest pandoc API minor version with the current table model.
pub const MIN_API_MINOR: u64 = 21;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unsupported pandoc-api-version {0}, expected 1.21 or newer within 1.x")]
    UnsupportedApiVersion(ApiVersion),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Read(#[from] JsonReadError),
    #[error(transparent)]
    Write(#[from] JsonWriteError),
}

/// Reject documents whose table representation predates API 1.21.
pub fn check_api_version(version: &ApiVersion) -> Result<(), FilterError> {
    if version.major() != 1 || version.minor() < MIN_API_MINOR {
        return Err(FilterError::UnsupportedApiVersion(version.clone()));
    }
    Ok(())
}
