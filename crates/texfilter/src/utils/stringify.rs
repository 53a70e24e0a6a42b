/*
 * stringify.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Flatten inline and block content to plain text.
//!
//! All formatting is dropped. Every kind of break becomes a single space,
//! quotes are not re-inserted around `Quoted` content, and raw content is
//! discarded, so the result is safe to embed in a single line of LaTeX.

use crate::pandoc::{Block, Inline, Row, Table};

/// Convert a single inline element to plain text
pub fn stringify_inline(inline: &Inline) -> String {
    match inline {
        Inline::Str(s) => s.text.clone(),
        Inline::Space | Inline::SoftBreak | Inline::LineBreak => " ".to_string(),
        Inline::Emph(e) => stringify_inlines(&e.content),
        Inline::Strong(s) => stringify_inlines(&s.content),
        Inline::Underline(u) => stringify_inlines(&u.content),
        Inline::Strikeout(s) => stringify_inlines(&s.content),
        Inline::Superscript(s) => stringify_inlines(&s.content),
        Inline::Subscript(s) => stringify_inlines(&s.content),
        Inline::SmallCaps(s) => stringify_inlines(&s.content),
        Inline::Quoted(q) => stringify_inlines(&q.content),
        Inline::Code(c) => c.text.clone(),
        Inline::Math(m) => m.text.clone(),
        Inline::RawInline(_) => String::new(),
        Inline::Link(l) => stringify_inlines(&l.content),
        Inline::Image(i) => stringify_inlines(&i.content),
        Inline::Span(s) => stringify_inlines(&s.content),
        Inline::Note(n) => stringify_blocks(&n.content),
        // The rendered citation text; prefixes and suffixes already appear in it.
        Inline::Cite(c) => stringify_inlines(&c.content),
    }
}

/// Convert a list of inline elements to plain text
pub fn stringify_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(stringify_inline).collect()
}

fn join_nonempty<I: Iterator<Item = String>>(parts: I) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a single block element to plain text
pub fn stringify_block(block: &Block) -> String {
    match block {
        Block::Paragraph(p) => stringify_inlines(&p.content),
        Block::Plain(p) => stringify_inlines(&p.content),
        Block::Header(h) => stringify_inlines(&h.content),
        Block::CodeBlock(c) => c.text.clone(),
        Block::RawBlock(_) | Block::HorizontalRule => String::new(),
        Block::BlockQuote(b) => stringify_blocks(&b.content),
        Block::BulletList(l) => join_nonempty(l.content.iter().map(|item| stringify_blocks(item))),
        Block::OrderedList(l) => join_nonempty(l.content.iter().map(|item| stringify_blocks(item))),
        Block::DefinitionList(d) => join_nonempty(d.content.iter().map(|(term, defs)| {
            let defs = join_nonempty(defs.iter().map(|def| stringify_blocks(def)));
            join_nonempty([stringify_inlines(term), defs].into_iter())
        })),
        Block::Div(d) => stringify_blocks(&d.content),
        Block::LineBlock(l) => join_nonempty(l.content.iter().map(|line| stringify_inlines(line))),
        Block::Table(t) => stringify_table(t),
        Block::Figure(f) => stringify_blocks(&f.caption.long),
    }
}

fn stringify_row(row: &Row) -> String {
    join_nonempty(row.cells.iter().map(|cell| stringify_blocks(&cell.content)))
}

/// Caption first, then every cell in row order.
fn stringify_table(table: &Table) -> String {
    let body_rows = table
        .bodies
        .iter()
        .flat_map(|body| body.head.iter().chain(body.body.iter()));
    let rows = table
        .head
        .rows
        .iter()
        .chain(body_rows)
        .chain(table.foot.rows.iter())
        .map(stringify_row);
    join_nonempty(std::iter::once(stringify_blocks(&table.caption.long)).chain(rows))
}

/// Convert a list of blocks to plain text, one space between blocks
pub fn stringify_blocks(blocks: &[Block]) -> String {
    join_nonempty(blocks.iter().map(stringify_block))
}
