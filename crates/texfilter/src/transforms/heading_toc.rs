/*
 * heading_toc.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Rewrites deep headings as unnumbered LaTeX headings with a TOC entry.
 */

//! Heading rewriter.
//!
//! Level 4 headings become starred `\part` headings and level 6 headings
//! become starred `\section` headings, each followed by an explicit
//! `\addcontentsline` so they still appear in the table of contents.
//! Every other level passes through untouched.
//!
//! The heading text is flattened to plain text first, so any inline
//! formatting inside the heading is lost.

use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn};
use crate::pandoc::{Block, Blocks, Header};
use crate::utils::stringify::stringify_inlines;

/// How one heading level is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingStyle {
    pub level: usize,
    /// Size switch placed inside `\textbf{...}`
    pub size: &'static str,
    /// Sectioning command, also used as the TOC entry type
    pub command: &'static str,
}

pub const PART_HEADING: HeadingStyle = HeadingStyle {
    level: 4,
    size: "\\Large",
    command: "part",
};

pub const SECTION_HEADING: HeadingStyle = HeadingStyle {
    level: 6,
    size: "\\large",
    command: "section",
};

const HEADING_STYLES: &[HeadingStyle] = &[PART_HEADING, SECTION_HEADING];

impl HeadingStyle {
    pub fn for_level(level: usize) -> Option<&'static HeadingStyle> {
        HEADING_STYLES.iter().find(|style| style.level == level)
    }

    /// The LaTeX for a heading with the given plain text.
    pub fn render(&self, text: &str) -> String {
        format!(
            "\\textbf{{{size} \\{command}*{{{text}}}}}\\addcontentsline{{toc}}{{{command}}}{{{text}}}",
            size = self.size,
            command = self.command,
            text = text,
        )
    }
}

pub fn rewrite_header(header: Header, _ctx: &mut FilterContext) -> FilterReturn<Header, Blocks> {
    let Some(style) = HeadingStyle::for_level(header.level) else {
        return FilterReturn::Unchanged(header);
    };
    let text = stringify_inlines(&header.content);
    tracing::debug!(level = header.level, text = %text, "rewriting heading");
    FilterReturn::FilterResult(vec![Block::raw("latex", style.render(&text))], false)
}

/// Filter replacing level 4 and level 6 headings with raw LaTeX.
pub fn heading_toc_filter() -> Filter<'static> {
    Filter::new().with_header(rewrite_header)
}
