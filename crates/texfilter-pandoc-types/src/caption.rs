/*
 * caption.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::block::Blocks;
use crate::inline::Inlines;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Caption {
    pub short: Option<Inlines>,
    pub long: Blocks,
}
