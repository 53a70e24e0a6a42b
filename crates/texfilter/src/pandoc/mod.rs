/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub use texfilter_pandoc_types::*;
