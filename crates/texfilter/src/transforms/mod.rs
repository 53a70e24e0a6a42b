/*
 * transforms/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The LaTeX rewrites applied by the texfilter binaries.
 */

//! The LaTeX rewrites applied by the texfilter binaries.
//!
//! - [`heading_toc_filter`] - Replaces level 4 and 6 headings with starred
//!   `\part`/`\section` headings plus a table-of-contents entry
//! - [`tabularx_filter`] - Replaces tables with boxed `tabularx` environments
//!
//! Both return a [`Filter`](crate::filters::Filter) to be run with
//! [`topdown_traverse`](crate::filters::topdown_traverse).

mod heading_toc;
mod tabularx;

pub use heading_toc::{
    HeadingStyle, PART_HEADING, SECTION_HEADING, heading_toc_filter, rewrite_header,
};
pub use tabularx::{
    SimpleTable, body_block, caption_block, cell_inlines, column_spec, header_block,
    rewrite_table, tabularx_blocks, tabularx_filter,
};
