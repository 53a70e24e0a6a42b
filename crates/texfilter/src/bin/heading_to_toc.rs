/*
 * heading_to_toc.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! heading-to-toc - rewrite level 4 and 6 headings as LaTeX with TOC entries

fn main() -> anyhow::Result<()> {
    texfilter::cli::main_with(
        "heading-to-toc",
        texfilter::transforms::heading_toc_filter(),
    )
}
