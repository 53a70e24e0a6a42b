/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::pandoc::{
    Alignment, Attr, Block, Caption, Cell, Citation, CitationMode, ColSpec, ColWidth, Inline,
    Inlines, ListAttributes, ListNumberDelim, ListNumberStyle, MathType, Meta, MetaValue, Pandoc,
    QuoteType, Row, Table, TableBody, TableFoot, TableHead,
};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonWriteError {
    #[error("Failed to write JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn write_attr(attr: &Attr) -> Value {
    let kvs: Vec<Value> = attr.2.iter().map(|(k, v)| json!([k, v])).collect();
    json!([attr.0, attr.1, kvs])
}

fn write_citation_mode(mode: &CitationMode) -> Value {
    match mode {
        CitationMode::AuthorInText => json!({"t": "AuthorInText"}),
        CitationMode::SuppressAuthor => json!({"t": "SuppressAuthor"}),
        CitationMode::NormalCitation => json!({"t": "NormalCitation"}),
    }
}

fn write_citation(citation: &Citation) -> Value {
    json!({
        "citationId": citation.id,
        "citationPrefix": write_inlines(&citation.prefix),
        "citationSuffix": write_inlines(&citation.suffix),
        "citationMode": write_citation_mode(&citation.mode),
        "citationNoteNum": citation.note_num,
        "citationHash": citation.hash
    })
}

fn write_quote_type(quote_type: &QuoteType) -> Value {
    match quote_type {
        QuoteType::SingleQuote => json!({"t": "SingleQuote"}),
        QuoteType::DoubleQuote => json!({"t": "DoubleQuote"}),
    }
}

fn write_math_type(math_type: &MathType) -> Value {
    match math_type {
        MathType::InlineMath => json!({"t": "InlineMath"}),
        MathType::DisplayMath => json!({"t": "DisplayMath"}),
    }
}

fn write_inline(inline: &Inline) -> Value {
    match inline {
        Inline::Str(s) => json!({"t": "Str", "c": s.text}),
        Inline::Space => json!({"t": "Space"}),
        Inline::SoftBreak => json!({"t": "SoftBreak"}),
        Inline::LineBreak => json!({"t": "LineBreak"}),
        Inline::Emph(e) => json!({"t": "Emph", "c": write_inlines(&e.content)}),
        Inline::Underline(u) => json!({"t": "Underline", "c": write_inlines(&u.content)}),
        Inline::Strong(s) => json!({"t": "Strong", "c": write_inlines(&s.content)}),
        Inline::Strikeout(s) => json!({"t": "Strikeout", "c": write_inlines(&s.content)}),
        Inline::Superscript(s) => json!({"t": "Superscript", "c": write_inlines(&s.content)}),
        Inline::Subscript(s) => json!({"t": "Subscript", "c": write_inlines(&s.content)}),
        Inline::SmallCaps(s) => json!({"t": "SmallCaps", "c": write_inlines(&s.content)}),
        Inline::Quoted(q) => json!({
            "t": "Quoted",
            "c": [write_quote_type(&q.quote_type), write_inlines(&q.content)]
        }),
        Inline::Cite(c) => {
            let citations: Vec<Value> = c.citations.iter().map(write_citation).collect();
            json!({"t": "Cite", "c": [citations, write_inlines(&c.content)]})
        }
        Inline::Code(c) => json!({"t": "Code", "c": [write_attr(&c.attr), c.text]}),
        Inline::Math(m) => json!({"t": "Math", "c": [write_math_type(&m.math_type), m.text]}),
        Inline::RawInline(r) => json!({"t": "RawInline", "c": [r.format, r.text]}),
        Inline::Link(l) => json!({
            "t": "Link",
            "c": [write_attr(&l.attr), write_inlines(&l.content), [l.target.0, l.target.1]]
        }),
        Inline::Image(i) => json!({
            "t": "Image",
            "c": [write_attr(&i.attr), write_inlines(&i.content), [i.target.0, i.target.1]]
        }),
        Inline::Note(n) => json!({"t": "Note", "c": write_blocks(&n.content)}),
        Inline::Span(s) => json!({
            "t": "Span",
            "c": [write_attr(&s.attr), write_inlines(&s.content)]
        }),
    }
}

fn write_inlines(inlines: &Inlines) -> Value {
    Value::Array(inlines.iter().map(write_inline).collect())
}

fn write_list_attributes(attr: &ListAttributes) -> Value {
    let style = match attr.1 {
        ListNumberStyle::Default => "DefaultStyle",
        ListNumberStyle::Example => "Example",
        ListNumberStyle::Decimal => "Decimal",
        ListNumberStyle::LowerRoman => "LowerRoman",
        ListNumberStyle::UpperRoman => "UpperRoman",
        ListNumberStyle::LowerAlpha => "LowerAlpha",
        ListNumberStyle::UpperAlpha => "UpperAlpha",
    };
    let delim = match attr.2 {
        ListNumberDelim::Default => "DefaultDelim",
        ListNumberDelim::Period => "Period",
        ListNumberDelim::OneParen => "OneParen",
        ListNumberDelim::TwoParens => "TwoParens",
    };
    json!([attr.0, {"t": style}, {"t": delim}])
}

fn write_blockss(items: &[Vec<Block>]) -> Value {
    Value::Array(items.iter().map(|blocks| write_blocks(blocks)).collect())
}

fn write_caption(caption: &Caption) -> Value {
    let short = match &caption.short {
        Some(inlines) => write_inlines(inlines),
        None => Value::Null,
    };
    json!([short, write_blocks(&caption.long)])
}

fn write_alignment(alignment: &Alignment) -> Value {
    match alignment {
        Alignment::Left => json!({"t": "AlignLeft"}),
        Alignment::Center => json!({"t": "AlignCenter"}),
        Alignment::Right => json!({"t": "AlignRight"}),
        Alignment::Default => json!({"t": "AlignDefault"}),
    }
}

fn write_colspec(colspec: &ColSpec) -> Value {
    let width = match colspec.1 {
        ColWidth::Default => json!({"t": "ColWidthDefault"}),
        ColWidth::Percentage(percentage) => json!({"t": "ColWidth", "c": percentage}),
    };
    json!([write_alignment(&colspec.0), width])
}

fn write_cell(cell: &Cell) -> Value {
    json!([
        write_attr(&cell.attr),
        write_alignment(&cell.alignment),
        cell.row_span,
        cell.col_span,
        write_blocks(&cell.content)
    ])
}

fn write_row(row: &Row) -> Value {
    let cells: Vec<Value> = row.cells.iter().map(write_cell).collect();
    json!([write_attr(&row.attr), cells])
}

fn write_rows(rows: &[Row]) -> Value {
    Value::Array(rows.iter().map(write_row).collect())
}

fn write_table_head(head: &TableHead) -> Value {
    json!([write_attr(&head.attr), write_rows(&head.rows)])
}

fn write_table_body(body: &TableBody) -> Value {
    json!([
        write_attr(&body.attr),
        body.rowhead_columns,
        write_rows(&body.head),
        write_rows(&body.body)
    ])
}

fn write_table_foot(foot: &TableFoot) -> Value {
    json!([write_attr(&foot.attr), write_rows(&foot.rows)])
}

fn write_table(table: &Table) -> Value {
    let colspecs: Vec<Value> = table.colspec.iter().map(write_colspec).collect();
    let bodies: Vec<Value> = table.bodies.iter().map(write_table_body).collect();
    json!([
        write_attr(&table.attr),
        write_caption(&table.caption),
        colspecs,
        write_table_head(&table.head),
        bodies,
        write_table_foot(&table.foot)
    ])
}

fn write_block(block: &Block) -> Value {
    match block {
        Block::Plain(p) => json!({"t": "Plain", "c": write_inlines(&p.content)}),
        Block::Paragraph(p) => json!({"t": "Para", "c": write_inlines(&p.content)}),
        Block::LineBlock(l) => {
            let lines: Vec<Value> = l.content.iter().map(write_inlines).collect();
            json!({"t": "LineBlock", "c": lines})
        }
        Block::CodeBlock(c) => json!({"t": "CodeBlock", "c": [write_attr(&c.attr), c.text]}),
        Block::RawBlock(r) => json!({"t": "RawBlock", "c": [r.format, r.text]}),
        Block::BlockQuote(q) => json!({"t": "BlockQuote", "c": write_blocks(&q.content)}),
        Block::OrderedList(l) => json!({
            "t": "OrderedList",
            "c": [write_list_attributes(&l.attr), write_blockss(&l.content)]
        }),
        Block::BulletList(l) => json!({"t": "BulletList", "c": write_blockss(&l.content)}),
        Block::DefinitionList(l) => {
            let items: Vec<Value> = l
                .content
                .iter()
                .map(|(term, definitions)| json!([write_inlines(term), write_blockss(definitions)]))
                .collect();
            json!({"t": "DefinitionList", "c": items})
        }
        Block::Header(h) => json!({
            "t": "Header",
            "c": [h.level, write_attr(&h.attr), write_inlines(&h.content)]
        }),
        Block::HorizontalRule => json!({"t": "HorizontalRule"}),
        Block::Table(t) => json!({"t": "Table", "c": write_table(t)}),
        Block::Figure(f) => json!({
            "t": "Figure",
            "c": [write_attr(&f.attr), write_caption(&f.caption), write_blocks(&f.content)]
        }),
        Block::Div(d) => json!({"t": "Div", "c": [write_attr(&d.attr), write_blocks(&d.content)]}),
    }
}

fn write_blocks(blocks: &[Block]) -> Value {
    Value::Array(blocks.iter().map(write_block).collect())
}

fn write_meta_value(value: &MetaValue) -> Value {
    match value {
        MetaValue::MetaString(s) => json!({"t": "MetaString", "c": s}),
        MetaValue::MetaBool(b) => json!({"t": "MetaBool", "c": b}),
        MetaValue::MetaInlines(inlines) => json!({"t": "MetaInlines", "c": write_inlines(inlines)}),
        MetaValue::MetaBlocks(blocks) => json!({"t": "MetaBlocks", "c": write_blocks(blocks)}),
        MetaValue::MetaList(items) => {
            let items: Vec<Value> = items.iter().map(write_meta_value).collect();
            json!({"t": "MetaList", "c": items})
        }
        MetaValue::MetaMap(map) => json!({"t": "MetaMap", "c": write_meta(map)}),
    }
}

fn write_meta(meta: &Meta) -> Value {
    let mut map = serde_json::Map::new();
    for (key, value) in meta {
        map.insert(key.clone(), write_meta_value(value));
    }
    Value::Object(map)
}

pub fn write_pandoc(pandoc: &Pandoc) -> Value {
    json!({
        "pandoc-api-version": pandoc.api_version.0,
        "meta": write_meta(&pandoc.meta),
        "blocks": write_blocks(&pandoc.blocks)
    })
}

pub fn write<W: std::io::Write>(pandoc: &Pandoc, writer: &mut W) -> Result<(), JsonWriteError> {
    let json = write_pandoc(pandoc);
    serde_json::to_writer(&mut *writer, &json)?;
    writer.flush()?;
    Ok(())
}
