/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Pandoc JSON filters that emit LaTeX.
//!
//! `heading-to-toc` turns level 4 and 6 headings into unnumbered headings
//! with a table-of-contents entry, and `table-to-tabularx` turns tables into
//! boxed `tabularx` environments. Both read a document from stdin and write
//! the rewritten document to stdout, as pandoc's `--filter` expects.

pub mod cli;
pub mod config;
pub mod errors;
pub mod filter_context;
pub mod filters;
pub mod pandoc;
pub mod readers;
pub mod transforms;
pub mod utils;
pub mod writers;
