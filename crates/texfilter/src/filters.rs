/*
 * filters.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::filter_context::FilterContext;
use crate::pandoc::{self, Block, Blocks, Inline, Inlines, Meta, MetaValue};

// filters are destructive and take ownership of the input

pub enum FilterReturn<T, U> {
    Unchanged(T),
    FilterResult(U, bool), // (new content, should recurse)
}

type InlineFilterFn<'a, T> = Box<dyn FnMut(T, &mut FilterContext) -> FilterReturn<T, Inlines> + 'a>;
type BlockFilterFn<'a, T> = Box<dyn FnMut(T, &mut FilterContext) -> FilterReturn<T, Blocks> + 'a>;
type InlineFilterField<'a, T> = Option<InlineFilterFn<'a, T>>;
type BlockFilterField<'a, T> = Option<BlockFilterFn<'a, T>>;

/// A set of node handlers applied during a top-down walk.
///
/// A variant-specific handler (`header`, `table`) takes precedence over the
/// generic `block` handler for the same node.
pub struct Filter<'a> {
    pub blocks: BlockFilterField<'a, Blocks>,

    pub inline: InlineFilterField<'a, Inline>,
    pub block: BlockFilterField<'a, Block>,

    pub header: BlockFilterField<'a, pandoc::Header>,
    pub table: BlockFilterField<'a, pandoc::Table>,
}

impl Default for Filter<'static> {
    fn default() -> Filter<'static> {
        Filter {
            blocks: None,
            inline: None,
            block: None,
            header: None,
            table: None,
        }
    }
}

impl Filter<'static> {
    pub fn new() -> Filter<'static> {
        Self::default()
    }
}

impl<'a> Filter<'a> {
    pub fn with_blocks<F>(mut self, f: F) -> Filter<'a>
    where
        F: FnMut(Blocks, &mut FilterContext) -> FilterReturn<Blocks, Blocks> + 'a,
    {
        self.blocks = Some(Box::new(f));
        self
    }

    pub fn with_block<F>(mut self, f: F) -> Filter<'a>
    where
        F: FnMut(Block, &mut FilterContext) -> FilterReturn<Block, Blocks> + 'a,
    {
        self.block = Some(Box::new(f));
        self
    }

    pub fn with_inline<F>(mut self, f: F) -> Filter<'a>
    where
        F: FnMut(Inline, &mut FilterContext) -> FilterReturn<Inline, Inlines> + 'a,
    {
        self.inline = Some(Box::new(f));
        self
    }
}

macro_rules! define_filter_with_methods {
    ($return:ident, $($field:ident),* $(,)?) => {
        impl<'a> Filter<'a> {

            $(
                paste::paste! {
                    pub fn [<with_ $field>]<F>(mut self, filter: F) -> Filter<'a>
                    where
                        F: FnMut(pandoc::[<$field:camel>], &mut FilterContext) -> FilterReturn<pandoc::[<$field:camel>], $return> + 'a,
                    {
                        self.$field = Some(Box::new(filter));
                        self
                    }
                }
            )*
        }
    };
}

define_filter_with_methods!(Blocks, header, table);

macro_rules! blocks_apply_and_maybe_recurse {
    ($item:expr, $filter_fn:expr, $filter:expr, $ctx:expr) => {
        match $filter_fn($item, $ctx) {
            FilterReturn::Unchanged(block) => vec![block.filter_structure($filter, $ctx)],
            FilterReturn::FilterResult(new_content, recurse) => {
                if !recurse {
                    new_content
                } else {
                    topdown_traverse_blocks(new_content, $filter, $ctx)
                }
            }
        }
    };
}

macro_rules! inlines_apply_and_maybe_recurse {
    ($item:expr, $filter_fn:expr, $filter:expr, $ctx:expr) => {
        match $filter_fn($item, $ctx) {
            FilterReturn::Unchanged(inline) => {
                vec![traverse_inline_structure(inline, $filter, $ctx)]
            }
            FilterReturn::FilterResult(new_content, recurse) => {
                if !recurse {
                    new_content
                } else {
                    topdown_traverse_inlines(new_content, $filter, $ctx)
                }
            }
        }
    };
}

macro_rules! handle_block_filter {
    ($variant:ident, $value:ident, $filter_field:ident, $filter:expr, $ctx:expr) => {
        if let Some(f) = &mut $filter.$filter_field {
            return blocks_apply_and_maybe_recurse!($value, f, $filter, $ctx);
        } else if let Some(f) = &mut $filter.block {
            return blocks_apply_and_maybe_recurse!(Block::$variant($value), f, $filter, $ctx);
        } else {
            vec![traverse_block_structure(
                Block::$variant($value),
                $filter,
                $ctx,
            )]
        }
    };
}

trait BlockFilterableStructure {
    fn filter_structure(self, filter: &mut Filter, ctx: &mut FilterContext) -> Block;
}

impl BlockFilterableStructure for pandoc::Header {
    fn filter_structure(self, filter: &mut Filter, ctx: &mut FilterContext) -> Block {
        traverse_block_nonterminal(Block::Header(self), filter, ctx)
    }
}

impl BlockFilterableStructure for pandoc::Table {
    fn filter_structure(self, filter: &mut Filter, ctx: &mut FilterContext) -> Block {
        traverse_block_nonterminal(Block::Table(self), filter, ctx)
    }
}

impl BlockFilterableStructure for Block {
    fn filter_structure(self, filter: &mut Filter, ctx: &mut FilterContext) -> Block {
        traverse_block_structure(self, filter, ctx)
    }
}

pub fn topdown_traverse_inline(
    inline: Inline,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Inlines {
    if let Some(f) = &mut filter.inline {
        return inlines_apply_and_maybe_recurse!(inline, f, filter, ctx);
    }
    vec![traverse_inline_structure(inline, filter, ctx)]
}

pub fn topdown_traverse_block(
    block: Block,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Blocks {
    match block {
        Block::Header(header) => {
            handle_block_filter!(Header, header, header, filter, ctx)
        }
        Block::Table(table) => {
            handle_block_filter!(Table, table, table, filter, ctx)
        }
        block => {
            if let Some(f) = &mut filter.block {
                return blocks_apply_and_maybe_recurse!(block, f, filter, ctx);
            }
            vec![traverse_block_structure(block, filter, ctx)]
        }
    }
}

pub fn topdown_traverse_inlines(
    vec: Inlines,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Inlines {
    let mut result = vec![];
    for inline in vec {
        result.extend(topdown_traverse_inline(inline, filter, ctx));
    }
    result
}

fn traverse_inline_nonterminal(
    inline: Inline,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Inline {
    match inline {
        Inline::Emph(e) => Inline::Emph(pandoc::Emph {
            content: topdown_traverse_inlines(e.content, filter, ctx),
        }),
        Inline::Underline(u) => Inline::Underline(pandoc::Underline {
            content: topdown_traverse_inlines(u.content, filter, ctx),
        }),
        Inline::Strong(sg) => Inline::Strong(pandoc::Strong {
            content: topdown_traverse_inlines(sg.content, filter, ctx),
        }),
        Inline::Strikeout(st) => Inline::Strikeout(pandoc::Strikeout {
            content: topdown_traverse_inlines(st.content, filter, ctx),
        }),
        Inline::Superscript(sp) => Inline::Superscript(pandoc::Superscript {
            content: topdown_traverse_inlines(sp.content, filter, ctx),
        }),
        Inline::Subscript(sb) => Inline::Subscript(pandoc::Subscript {
            content: topdown_traverse_inlines(sb.content, filter, ctx),
        }),
        Inline::SmallCaps(sc) => Inline::SmallCaps(pandoc::SmallCaps {
            content: topdown_traverse_inlines(sc.content, filter, ctx),
        }),
        Inline::Quoted(q) => Inline::Quoted(pandoc::Quoted {
            content: topdown_traverse_inlines(q.content, filter, ctx),
            ..q
        }),
        Inline::Cite(c) => Inline::Cite(pandoc::Cite {
            citations: c
                .citations
                .into_iter()
                .map(|cit| pandoc::Citation {
                    prefix: topdown_traverse_inlines(cit.prefix, filter, ctx),
                    suffix: topdown_traverse_inlines(cit.suffix, filter, ctx),
                    ..cit
                })
                .collect(),
            content: topdown_traverse_inlines(c.content, filter, ctx),
        }),
        Inline::Link(l) => Inline::Link(pandoc::Link {
            content: topdown_traverse_inlines(l.content, filter, ctx),
            ..l
        }),
        Inline::Image(i) => Inline::Image(pandoc::Image {
            content: topdown_traverse_inlines(i.content, filter, ctx),
            ..i
        }),
        Inline::Note(note) => Inline::Note(pandoc::Note {
            content: topdown_traverse_blocks(note.content, filter, ctx),
        }),
        Inline::Span(span) => Inline::Span(pandoc::Span {
            content: topdown_traverse_inlines(span.content, filter, ctx),
            ..span
        }),
        terminal => terminal,
    }
}

pub fn traverse_inline_structure(
    inline: Inline,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Inline {
    match &inline {
        // terminal inline types
        Inline::Str(_)
        | Inline::Code(_)
        | Inline::Space
        | Inline::SoftBreak
        | Inline::LineBreak
        | Inline::Math(_)
        | Inline::RawInline(_) => inline,
        _ => traverse_inline_nonterminal(inline, filter, ctx),
    }
}

fn traverse_blocks_vec_nonterminal(
    blocks_vec: Vec<Blocks>,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Vec<Blocks> {
    blocks_vec
        .into_iter()
        .map(|blocks| topdown_traverse_blocks(blocks, filter, ctx))
        .collect()
}

fn traverse_caption(
    caption: pandoc::Caption,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> pandoc::Caption {
    pandoc::Caption {
        short: caption
            .short
            .map(|short| topdown_traverse_inlines(short, filter, ctx)),
        long: topdown_traverse_blocks(caption.long, filter, ctx),
    }
}

fn traverse_row(row: pandoc::Row, filter: &mut Filter, ctx: &mut FilterContext) -> pandoc::Row {
    pandoc::Row {
        cells: row
            .cells
            .into_iter()
            .map(|cell| pandoc::Cell {
                content: topdown_traverse_blocks(cell.content, filter, ctx),
                ..cell
            })
            .collect(),
        ..row
    }
}

fn traverse_rows(
    rows: Vec<pandoc::Row>,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Vec<pandoc::Row> {
    rows.into_iter()
        .map(|row| traverse_row(row, filter, ctx))
        .collect()
}

fn traverse_block_nonterminal(block: Block, filter: &mut Filter, ctx: &mut FilterContext) -> Block {
    match block {
        Block::Plain(plain) => Block::Plain(pandoc::Plain {
            content: topdown_traverse_inlines(plain.content, filter, ctx),
        }),
        Block::Paragraph(para) => Block::Paragraph(pandoc::Paragraph {
            content: topdown_traverse_inlines(para.content, filter, ctx),
        }),
        Block::LineBlock(line_block) => Block::LineBlock(pandoc::LineBlock {
            content: line_block
                .content
                .into_iter()
                .map(|line| topdown_traverse_inlines(line, filter, ctx))
                .collect(),
        }),
        Block::BlockQuote(quote) => Block::BlockQuote(pandoc::BlockQuote {
            content: topdown_traverse_blocks(quote.content, filter, ctx),
        }),
        Block::OrderedList(list) => Block::OrderedList(pandoc::OrderedList {
            content: traverse_blocks_vec_nonterminal(list.content, filter, ctx),
            ..list
        }),
        Block::BulletList(list) => Block::BulletList(pandoc::BulletList {
            content: traverse_blocks_vec_nonterminal(list.content, filter, ctx),
        }),
        Block::DefinitionList(list) => Block::DefinitionList(pandoc::DefinitionList {
            content: list
                .content
                .into_iter()
                .map(|(term, def)| {
                    (
                        topdown_traverse_inlines(term, filter, ctx),
                        traverse_blocks_vec_nonterminal(def, filter, ctx),
                    )
                })
                .collect(),
        }),
        Block::Header(header) => Block::Header(pandoc::Header {
            content: topdown_traverse_inlines(header.content, filter, ctx),
            ..header
        }),
        Block::Table(table) => Block::Table(pandoc::Table {
            caption: traverse_caption(table.caption, filter, ctx),
            head: pandoc::TableHead {
                rows: traverse_rows(table.head.rows, filter, ctx),
                ..table.head
            },
            bodies: table
                .bodies
                .into_iter()
                .map(|table_body| pandoc::TableBody {
                    head: traverse_rows(table_body.head, filter, ctx),
                    body: traverse_rows(table_body.body, filter, ctx),
                    ..table_body
                })
                .collect(),
            foot: pandoc::TableFoot {
                rows: traverse_rows(table.foot.rows, filter, ctx),
                ..table.foot
            },
            ..table
        }),
        Block::Figure(figure) => Block::Figure(pandoc::Figure {
            caption: traverse_caption(figure.caption, filter, ctx),
            content: topdown_traverse_blocks(figure.content, filter, ctx),
            ..figure
        }),
        Block::Div(div) => Block::Div(pandoc::Div {
            content: topdown_traverse_blocks(div.content, filter, ctx),
            ..div
        }),
        terminal => terminal,
    }
}

pub fn traverse_block_structure(
    block: Block,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Block {
    match &block {
        // terminal block types
        Block::CodeBlock(_) | Block::RawBlock(_) | Block::HorizontalRule => block,
        _ => traverse_block_nonterminal(block, filter, ctx),
    }
}

pub fn topdown_traverse_blocks(
    vec: Blocks,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Blocks {
    fn walk_vec(vec: Blocks, filter: &mut Filter, ctx: &mut FilterContext) -> Blocks {
        let mut result = vec![];
        for block in vec {
            result.extend(topdown_traverse_block(block, filter, ctx));
        }
        result
    }
    match &mut filter.blocks {
        None => walk_vec(vec, filter, ctx),
        Some(f) => match f(vec, ctx) {
            FilterReturn::Unchanged(blocks) => walk_vec(blocks, filter, ctx),
            FilterReturn::FilterResult(new_content, recurse) => {
                if !recurse {
                    return new_content;
                }
                walk_vec(new_content, filter, ctx)
            }
        },
    }
}

pub fn topdown_traverse_meta_value(
    value: MetaValue,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> MetaValue {
    match value {
        MetaValue::MetaMap(entries) => MetaValue::MetaMap(topdown_traverse_meta(entries, filter, ctx)),
        MetaValue::MetaList(items) => MetaValue::MetaList(
            items
                .into_iter()
                .map(|item| topdown_traverse_meta_value(item, filter, ctx))
                .collect(),
        ),
        MetaValue::MetaBlocks(content) => {
            MetaValue::MetaBlocks(topdown_traverse_blocks(content, filter, ctx))
        }
        MetaValue::MetaInlines(content) => {
            MetaValue::MetaInlines(topdown_traverse_inlines(content, filter, ctx))
        }
        value => value,
    }
}

pub fn topdown_traverse_meta(meta: Meta, filter: &mut Filter, ctx: &mut FilterContext) -> Meta {
    meta.into_iter()
        .map(|(key, value)| (key, topdown_traverse_meta_value(value, filter, ctx)))
        .collect()
}

pub fn topdown_traverse(
    doc: pandoc::Pandoc,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> pandoc::Pandoc {
    pandoc::Pandoc {
        api_version: doc.api_version,
        meta: topdown_traverse_meta(doc.meta, filter, ctx),
        blocks: topdown_traverse_blocks(doc.blocks, filter, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pandoc::{
        Cell, Div, Header, Note, Paragraph, Plain, Row, Str, TableBody, TableFoot, TableHead,
        empty_attr,
    };

    fn para(text: &str) -> Block {
        Block::Paragraph(Paragraph {
            content: vec![Inline::str(text)],
        })
    }

    fn header(level: usize, text: &str) -> Block {
        Block::Header(Header {
            level,
            attr: empty_attr(),
            content: vec![Inline::str(text)],
        })
    }

    fn upcase_str(inline: Inline, _: &mut FilterContext) -> FilterReturn<Inline, Inlines> {
        match inline {
            Inline::Str(Str { text }) => {
                FilterReturn::FilterResult(vec![Inline::str(text.to_uppercase())], false)
            }
            other => FilterReturn::Unchanged(other),
        }
    }

    #[test]
    fn test_header_handler_replaces_nested_headers() {
        let blocks = vec![
            header(2, "keep"),
            Block::Div(Div {
                attr: empty_attr(),
                content: vec![header(6, "inner")],
            }),
        ];
        let mut filter = Filter::new().with_header(|h, _ctx| {
            if h.level == 6 {
                FilterReturn::FilterResult(vec![Block::raw("latex", "replaced")], false)
            } else {
                FilterReturn::Unchanged(h)
            }
        });
        let mut ctx = FilterContext::default();
        let result = topdown_traverse_blocks(blocks, &mut filter, &mut ctx);

        assert_eq!(result[0], header(2, "keep"));
        let Block::Div(div) = &result[1] else {
            panic!("Expected Div");
        };
        assert_eq!(div.content, vec![Block::raw("latex", "replaced")]);
    }

    #[test]
    fn test_replacement_without_recursion_is_not_revisited() {
        let mut calls = 0;
        {
            let mut filter = Filter::new().with_header(|h, _ctx| {
                calls += 1;
                FilterReturn::FilterResult(vec![Block::Header(h)], false)
            });
            let mut ctx = FilterContext::default();
            let result =
                topdown_traverse_blocks(vec![header(6, "once")], &mut filter, &mut ctx);
            assert_eq!(result, vec![header(6, "once")]);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_replacement_with_recursion_is_walked() {
        let mut filter = Filter::new()
            .with_block(|block, _ctx| match block {
                Block::HorizontalRule => FilterReturn::FilterResult(vec![para("a")], true),
                other => FilterReturn::Unchanged(other),
            })
            .with_inline(upcase_str);
        let mut ctx = FilterContext::default();
        let result = topdown_traverse_blocks(vec![Block::HorizontalRule], &mut filter, &mut ctx);
        assert_eq!(result, vec![para("A")]);
    }

    #[test]
    fn test_specific_handler_wins_over_generic_block() {
        let mut filter = Filter::new()
            .with_header(|_h, _ctx| FilterReturn::FilterResult(vec![para("header")], false))
            .with_block(|_b, _ctx| FilterReturn::FilterResult(vec![para("block")], false));
        let mut ctx = FilterContext::default();
        let result = topdown_traverse_blocks(
            vec![header(4, "x"), Block::HorizontalRule],
            &mut filter,
            &mut ctx,
        );
        assert_eq!(result, vec![para("header"), para("block")]);
    }

    #[test]
    fn test_inline_handler_reaches_table_cells_and_notes() {
        let cell = |text: &str| Cell {
            attr: empty_attr(),
            alignment: pandoc::Alignment::Default,
            row_span: 1,
            col_span: 1,
            content: vec![Block::Plain(Plain {
                content: vec![Inline::str(text)],
            })],
        };
        let table = Block::Table(pandoc::Table {
            attr: empty_attr(),
            caption: pandoc::Caption {
                short: None,
                long: vec![para("caption")],
            },
            colspec: vec![(pandoc::Alignment::Default, pandoc::ColWidth::Default)],
            head: TableHead {
                attr: empty_attr(),
                rows: vec![],
            },
            bodies: vec![TableBody {
                attr: empty_attr(),
                rowhead_columns: 0,
                head: vec![],
                body: vec![Row {
                    attr: empty_attr(),
                    cells: vec![cell("cell")],
                }],
            }],
            foot: TableFoot {
                attr: empty_attr(),
                rows: vec![],
            },
        });
        let note = Block::Paragraph(Paragraph {
            content: vec![Inline::Note(Note {
                content: vec![para("note")],
            })],
        });

        let mut filter = Filter::new().with_inline(upcase_str);
        let mut ctx = FilterContext::default();
        let result = topdown_traverse_blocks(vec![table, note], &mut filter, &mut ctx);

        let Block::Table(table) = &result[0] else {
            panic!("Expected Table");
        };
        assert_eq!(table.caption.long, vec![para("CAPTION")]);
        assert_eq!(
            table.bodies[0].body[0].cells[0].content[0].inline_content(),
            Some(&vec![Inline::str("CELL")])
        );
        let Block::Paragraph(p) = &result[1] else {
            panic!("Expected Para");
        };
        assert_eq!(
            p.content,
            vec![Inline::Note(Note {
                content: vec![para("NOTE")],
            })]
        );
    }

    #[test]
    fn test_blocks_handler_sees_every_list() {
        let mut lengths = Vec::new();
        {
            let mut filter = Filter::new().with_blocks(|blocks, _ctx| {
                lengths.push(blocks.len());
                FilterReturn::Unchanged(blocks)
            });
            let mut ctx = FilterContext::default();
            let doc = vec![
                para("a"),
                Block::Div(Div {
                    attr: empty_attr(),
                    content: vec![para("b"), para("c"), para("d")],
                }),
            ];
            topdown_traverse_blocks(doc, &mut filter, &mut ctx);
        }
        assert_eq!(lengths, vec![2, 3]);
    }

    #[test]
    fn test_meta_inlines_are_traversed() {
        let mut meta = Meta::new();
        meta.insert(
            "title".to_string(),
            MetaValue::MetaInlines(vec![Inline::str("report")]),
        );
        meta.insert("draft".to_string(), MetaValue::MetaBool(true));
        let doc = pandoc::Pandoc {
            meta,
            ..Default::default()
        };

        let mut filter = Filter::new().with_inline(upcase_str);
        let mut ctx = FilterContext::default();
        let result = topdown_traverse(doc, &mut filter, &mut ctx);

        assert_eq!(
            result.meta.get("title"),
            Some(&MetaValue::MetaInlines(vec![Inline::str("REPORT")]))
        );
        assert_eq!(result.meta.get("draft"), Some(&MetaValue::MetaBool(true)));
    }
}
