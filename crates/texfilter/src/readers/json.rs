/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::pandoc::{
    Alignment, ApiVersion, Attr, Block, BlockQuote, BulletList, Caption, Cell, Citation,
    CitationMode, Cite, Code, CodeBlock, ColSpec, ColWidth, DefinitionList, Div, Emph, Figure,
    Header, Image, Inline, Inlines, LineBlock, Link, ListAttributes, ListNumberDelim,
    ListNumberStyle, Math, MathType, Meta, MetaValue, Note, OrderedList, Pandoc, Paragraph, Plain,
    QuoteType, Quoted, RawBlock, RawInline, Row, SmallCaps, Span, Str, Strikeout, Strong,
    Subscript, Superscript, Table, TableBody, TableFoot, TableHead, Underline,
};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonReadError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid type: {0}")]
    InvalidType(String),
    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),
}

type Result<T> = std::result::Result<T, JsonReadError>;

fn invalid(message: impl Into<String>) -> JsonReadError {
    JsonReadError::InvalidType(message.into())
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("Expected array for {}", what)))
}

/// An array of exactly `len` elements (Pandoc encodes constructor fields positionally).
fn as_tuple<'a>(value: &'a Value, what: &str, len: usize) -> Result<&'a [Value]> {
    let arr = as_array(value, what)?;
    if arr.len() != len {
        return Err(invalid(format!("{} array must have {} elements", what, len)));
    }
    Ok(arr.as_slice())
}

fn as_string(value: &Value, what: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("{} must be string", what)))
}

fn as_usize(value: &Value, what: &str) -> Result<usize> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| invalid(format!("{} must be a non-negative integer", what)))
}

fn as_i64(value: &Value, what: &str) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| invalid(format!("{} must be integer", what)))
}

/// Split a `{"t": ..., "c": ...}` node into its tag and optional contents.
fn read_node<'a>(value: &'a Value, what: &str) -> Result<(&'a str, Option<&'a Value>)> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(format!("Expected object for {}", what)))?;
    let t = obj
        .get("t")
        .and_then(Value::as_str)
        .ok_or_else(|| JsonReadError::MissingField("t".to_string()))?;
    Ok((t, obj.get("c")))
}

fn contents(c: Option<&Value>) -> Result<&Value> {
    c.ok_or_else(|| JsonReadError::MissingField("c".to_string()))
}

fn read_attr(value: &Value) -> Result<Attr> {
    let arr = as_tuple(value, "Attr", 3)?;

    let id = as_string(&arr[0], "Attr id")?;

    let classes = as_array(&arr[1], "Attr classes")?
        .iter()
        .map(|v| as_string(v, "Class"))
        .collect::<Result<Vec<_>>>()?;

    let kvs = as_array(&arr[2], "Attr key-values")?
        .iter()
        .map(|v| {
            let kv = as_tuple(v, "Key-value pair", 2)?;
            Ok((as_string(&kv[0], "Key")?, as_string(&kv[1], "Value")?))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((id, classes, kvs))
}

fn read_target(value: &Value) -> Result<(String, String)> {
    let arr = as_tuple(value, "Target", 2)?;
    Ok((
        as_string(&arr[0], "Target url")?,
        as_string(&arr[1], "Target title")?,
    ))
}

fn read_quote_type(value: &Value) -> Result<QuoteType> {
    match read_node(value, "QuoteType")?.0 {
        "SingleQuote" => Ok(QuoteType::SingleQuote),
        "DoubleQuote" => Ok(QuoteType::DoubleQuote),
        t => Err(JsonReadError::UnsupportedVariant(format!("QuoteType: {}", t))),
    }
}

fn read_math_type(value: &Value) -> Result<MathType> {
    match read_node(value, "MathType")?.0 {
        "InlineMath" => Ok(MathType::InlineMath),
        "DisplayMath" => Ok(MathType::DisplayMath),
        t => Err(JsonReadError::UnsupportedVariant(format!("MathType: {}", t))),
    }
}

fn read_citation_mode(value: &Value) -> Result<CitationMode> {
    match read_node(value, "CitationMode")?.0 {
        "AuthorInText" => Ok(CitationMode::AuthorInText),
        "SuppressAuthor" => Ok(CitationMode::SuppressAuthor),
        "NormalCitation" => Ok(CitationMode::NormalCitation),
        t => Err(JsonReadError::UnsupportedVariant(format!(
            "CitationMode: {}",
            t
        ))),
    }
}

fn read_citation(value: &Value) -> Result<Citation> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid("Expected object for Citation"))?;
    let field = |name: &str| {
        obj.get(name)
            .ok_or_else(|| JsonReadError::MissingField(name.to_string()))
    };
    Ok(Citation {
        id: as_string(field("citationId")?, "citationId")?,
        prefix: read_inlines(field("citationPrefix")?)?,
        suffix: read_inlines(field("citationSuffix")?)?,
        mode: read_citation_mode(field("citationMode")?)?,
        note_num: as_i64(field("citationNoteNum")?, "citationNoteNum")?,
        hash: as_i64(field("citationHash")?, "citationHash")?,
    })
}

fn read_inline(value: &Value) -> Result<Inline> {
    let (t, c) = read_node(value, "Inline")?;

    match t {
        "Str" => Ok(Inline::Str(Str {
            text: as_string(contents(c)?, "Str content")?,
        })),
        "Space" => Ok(Inline::Space),
        "SoftBreak" => Ok(Inline::SoftBreak),
        "LineBreak" => Ok(Inline::LineBreak),
        "Emph" => Ok(Inline::Emph(Emph {
            content: read_inlines(contents(c)?)?,
        })),
        "Underline" => Ok(Inline::Underline(Underline {
            content: read_inlines(contents(c)?)?,
        })),
        "Strong" => Ok(Inline::Strong(Strong {
            content: read_inlines(contents(c)?)?,
        })),
        "Strikeout" => Ok(Inline::Strikeout(Strikeout {
            content: read_inlines(contents(c)?)?,
        })),
        "Superscript" => Ok(Inline::Superscript(Superscript {
            content: read_inlines(contents(c)?)?,
        })),
        "Subscript" => Ok(Inline::Subscript(Subscript {
            content: read_inlines(contents(c)?)?,
        })),
        "SmallCaps" => Ok(Inline::SmallCaps(SmallCaps {
            content: read_inlines(contents(c)?)?,
        })),
        "Quoted" => {
            let arr = as_tuple(contents(c)?, "Quoted", 2)?;
            Ok(Inline::Quoted(Quoted {
                quote_type: read_quote_type(&arr[0])?,
                content: read_inlines(&arr[1])?,
            }))
        }
        "Cite" => {
            let arr = as_tuple(contents(c)?, "Cite", 2)?;
            let citations = as_array(&arr[0], "Cite citations")?
                .iter()
                .map(read_citation)
                .collect::<Result<Vec<_>>>()?;
            Ok(Inline::Cite(Cite {
                citations,
                content: read_inlines(&arr[1])?,
            }))
        }
        "Code" => {
            let arr = as_tuple(contents(c)?, "Code", 2)?;
            Ok(Inline::Code(Code {
                attr: read_attr(&arr[0])?,
                text: as_string(&arr[1], "Code text")?,
            }))
        }
        "Math" => {
            let arr = as_tuple(contents(c)?, "Math", 2)?;
            Ok(Inline::Math(Math {
                math_type: read_math_type(&arr[0])?,
                text: as_string(&arr[1], "Math text")?,
            }))
        }
        "RawInline" => {
            let arr = as_tuple(contents(c)?, "RawInline", 2)?;
            Ok(Inline::RawInline(RawInline {
                format: as_string(&arr[0], "RawInline format")?,
                text: as_string(&arr[1], "RawInline text")?,
            }))
        }
        "Link" => {
            let arr = as_tuple(contents(c)?, "Link", 3)?;
            Ok(Inline::Link(Link {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
                target: read_target(&arr[2])?,
            }))
        }
        "Image" => {
            let arr = as_tuple(contents(c)?, "Image", 3)?;
            Ok(Inline::Image(Image {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
                target: read_target(&arr[2])?,
            }))
        }
        "Note" => Ok(Inline::Note(Note {
            content: read_blocks(contents(c)?)?,
        })),
        "Span" => {
            let arr = as_tuple(contents(c)?, "Span", 2)?;
            Ok(Inline::Span(Span {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
            }))
        }
        _ => Err(JsonReadError::UnsupportedVariant(format!("Inline: {}", t))),
    }
}

fn read_inlines(value: &Value) -> Result<Inlines> {
    as_array(value, "Inlines")?
        .iter()
        .map(read_inline)
        .collect()
}

// `Null` blocks (API 1.22 and earlier) carry nothing and are dropped.
fn read_blocks(value: &Value) -> Result<Vec<Block>> {
    as_array(value, "Blocks")?
        .iter()
        .filter(|block| !is_null_block(block))
        .map(read_block)
        .collect()
}

fn is_null_block(value: &Value) -> bool {
    value.get("t").and_then(Value::as_str) == Some("Null")
}

fn read_blockss(value: &Value) -> Result<Vec<Vec<Block>>> {
    as_array(value, "list items")?
        .iter()
        .map(read_blocks)
        .collect()
}

fn read_list_attributes(value: &Value) -> Result<ListAttributes> {
    let arr = as_tuple(value, "ListAttributes", 3)?;

    let start = as_i64(&arr[0], "ListAttributes start")?;

    let style = match read_node(&arr[1], "ListNumberStyle")?.0 {
        "DefaultStyle" => ListNumberStyle::Default,
        "Example" => ListNumberStyle::Example,
        "Decimal" => ListNumberStyle::Decimal,
        "LowerRoman" => ListNumberStyle::LowerRoman,
        "UpperRoman" => ListNumberStyle::UpperRoman,
        "LowerAlpha" => ListNumberStyle::LowerAlpha,
        "UpperAlpha" => ListNumberStyle::UpperAlpha,
        t => {
            return Err(JsonReadError::UnsupportedVariant(format!(
                "ListNumberStyle: {}",
                t
            )));
        }
    };

    let delim = match read_node(&arr[2], "ListNumberDelim")?.0 {
        "DefaultDelim" => ListNumberDelim::Default,
        "Period" => ListNumberDelim::Period,
        "OneParen" => ListNumberDelim::OneParen,
        "TwoParens" => ListNumberDelim::TwoParens,
        t => {
            return Err(JsonReadError::UnsupportedVariant(format!(
                "ListNumberDelim: {}",
                t
            )));
        }
    };

    Ok((start, style, delim))
}

fn read_caption(value: &Value) -> Result<Caption> {
    let arr = as_tuple(value, "Caption", 2)?;
    let short = if arr[0].is_null() {
        None
    } else {
        Some(read_inlines(&arr[0])?)
    };
    Ok(Caption {
        short,
        long: read_blocks(&arr[1])?,
    })
}

fn read_alignment(value: &Value) -> Result<Alignment> {
    match read_node(value, "Alignment")?.0 {
        "AlignLeft" => Ok(Alignment::Left),
        "AlignCenter" => Ok(Alignment::Center),
        "AlignRight" => Ok(Alignment::Right),
        "AlignDefault" => Ok(Alignment::Default),
        t => Err(JsonReadError::UnsupportedVariant(format!(
            "Alignment: {}",
            t
        ))),
    }
}

fn read_colwidth(value: &Value) -> Result<ColWidth> {
    let (t, c) = read_node(value, "ColWidth")?;
    match t {
        "ColWidthDefault" => Ok(ColWidth::Default),
        "ColWidth" => {
            let percentage = contents(c)?
                .as_f64()
                .ok_or_else(|| invalid("ColWidth percentage must be number"))?;
            Ok(ColWidth::Percentage(percentage))
        }
        _ => Err(JsonReadError::UnsupportedVariant(format!(
            "ColWidth: {}",
            t
        ))),
    }
}

fn read_colspec(value: &Value) -> Result<ColSpec> {
    let arr = as_tuple(value, "ColSpec", 2)?;
    Ok((read_alignment(&arr[0])?, read_colwidth(&arr[1])?))
}

fn read_cell(value: &Value) -> Result<Cell> {
    let arr = as_tuple(value, "Cell", 5)?;
    Ok(Cell {
        attr: read_attr(&arr[0])?,
        alignment: read_alignment(&arr[1])?,
        row_span: as_usize(&arr[2], "Cell rowSpan")?,
        col_span: as_usize(&arr[3], "Cell colSpan")?,
        content: read_blocks(&arr[4])?,
    })
}

fn read_row(value: &Value) -> Result<Row> {
    let arr = as_tuple(value, "Row", 2)?;
    let cells = as_array(&arr[1], "Row cells")?
        .iter()
        .map(read_cell)
        .collect::<Result<Vec<_>>>()?;
    Ok(Row {
        attr: read_attr(&arr[0])?,
        cells,
    })
}

fn read_rows(value: &Value) -> Result<Vec<Row>> {
    as_array(value, "Rows")?.iter().map(read_row).collect()
}

fn read_table_head(value: &Value) -> Result<TableHead> {
    let arr = as_tuple(value, "TableHead", 2)?;
    Ok(TableHead {
        attr: read_attr(&arr[0])?,
        rows: read_rows(&arr[1])?,
    })
}

fn read_table_body(value: &Value) -> Result<TableBody> {
    let arr = as_tuple(value, "TableBody", 4)?;
    Ok(TableBody {
        attr: read_attr(&arr[0])?,
        rowhead_columns: as_usize(&arr[1], "TableBody rowHeadColumns")?,
        head: read_rows(&arr[2])?,
        body: read_rows(&arr[3])?,
    })
}

fn read_table_foot(value: &Value) -> Result<TableFoot> {
    let arr = as_tuple(value, "TableFoot", 2)?;
    Ok(TableFoot {
        attr: read_attr(&arr[0])?,
        rows: read_rows(&arr[1])?,
    })
}

fn read_table(value: &Value) -> Result<Table> {
    let arr = as_tuple(value, "Table", 6)?;
    let colspec = as_array(&arr[2], "Table colspecs")?
        .iter()
        .map(read_colspec)
        .collect::<Result<Vec<_>>>()?;
    let bodies = as_array(&arr[4], "Table bodies")?
        .iter()
        .map(read_table_body)
        .collect::<Result<Vec<_>>>()?;
    Ok(Table {
        attr: read_attr(&arr[0])?,
        caption: read_caption(&arr[1])?,
        colspec,
        head: read_table_head(&arr[3])?,
        bodies,
        foot: read_table_foot(&arr[5])?,
    })
}

fn read_block(value: &Value) -> Result<Block> {
    let (t, c) = read_node(value, "Block")?;

    match t {
        "Plain" => Ok(Block::Plain(Plain {
            content: read_inlines(contents(c)?)?,
        })),
        "Para" => Ok(Block::Paragraph(Paragraph {
            content: read_inlines(contents(c)?)?,
        })),
        "LineBlock" => {
            let content = as_array(contents(c)?, "LineBlock")?
                .iter()
                .map(read_inlines)
                .collect::<Result<Vec<_>>>()?;
            Ok(Block::LineBlock(LineBlock { content }))
        }
        "CodeBlock" => {
            let arr = as_tuple(contents(c)?, "CodeBlock", 2)?;
            Ok(Block::CodeBlock(CodeBlock {
                attr: read_attr(&arr[0])?,
                text: as_string(&arr[1], "CodeBlock text")?,
            }))
        }
        "RawBlock" => {
            let arr = as_tuple(contents(c)?, "RawBlock", 2)?;
            Ok(Block::RawBlock(RawBlock {
                format: as_string(&arr[0], "RawBlock format")?,
                text: as_string(&arr[1], "RawBlock text")?,
            }))
        }
        "BlockQuote" => Ok(Block::BlockQuote(BlockQuote {
            content: read_blocks(contents(c)?)?,
        })),
        "OrderedList" => {
            let arr = as_tuple(contents(c)?, "OrderedList", 2)?;
            Ok(Block::OrderedList(OrderedList {
                attr: read_list_attributes(&arr[0])?,
                content: read_blockss(&arr[1])?,
            }))
        }
        "BulletList" => Ok(Block::BulletList(BulletList {
            content: read_blockss(contents(c)?)?,
        })),
        "DefinitionList" => {
            let content = as_array(contents(c)?, "DefinitionList")?
                .iter()
                .map(|item| {
                    let pair = as_tuple(item, "DefinitionList item", 2)?;
                    Ok((read_inlines(&pair[0])?, read_blockss(&pair[1])?))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Block::DefinitionList(DefinitionList { content }))
        }
        "Header" => {
            let arr = as_tuple(contents(c)?, "Header", 3)?;
            Ok(Block::Header(Header {
                level: as_usize(&arr[0], "Header level")?,
                attr: read_attr(&arr[1])?,
                content: read_inlines(&arr[2])?,
            }))
        }
        "HorizontalRule" => Ok(Block::HorizontalRule),
        "Table" => Ok(Block::Table(read_table(contents(c)?)?)),
        "Figure" => {
            let arr = as_tuple(contents(c)?, "Figure", 3)?;
            Ok(Block::Figure(Figure {
                attr: read_attr(&arr[0])?,
                caption: read_caption(&arr[1])?,
                content: read_blocks(&arr[2])?,
            }))
        }
        "Div" => {
            let arr = as_tuple(contents(c)?, "Div", 2)?;
            Ok(Block::Div(Div {
                attr: read_attr(&arr[0])?,
                content: read_blocks(&arr[1])?,
            }))
        }
        _ => Err(JsonReadError::UnsupportedVariant(format!("Block: {}", t))),
    }
}

fn read_meta_value(value: &Value) -> Result<MetaValue> {
    let (t, c) = read_node(value, "MetaValue")?;
    match t {
        "MetaMap" => Ok(MetaValue::MetaMap(read_meta(contents(c)?)?)),
        "MetaList" => {
            let items = as_array(contents(c)?, "MetaList")?
                .iter()
                .map(read_meta_value)
                .collect::<Result<Vec<_>>>()?;
            Ok(MetaValue::MetaList(items))
        }
        "MetaBool" => {
            let b = contents(c)?
                .as_bool()
                .ok_or_else(|| invalid("MetaBool value must be boolean"))?;
            Ok(MetaValue::MetaBool(b))
        }
        "MetaString" => Ok(MetaValue::MetaString(as_string(
            contents(c)?,
            "MetaString value",
        )?)),
        "MetaInlines" => Ok(MetaValue::MetaInlines(read_inlines(contents(c)?)?)),
        "MetaBlocks" => Ok(MetaValue::MetaBlocks(read_blocks(contents(c)?)?)),
        _ => Err(JsonReadError::UnsupportedVariant(format!(
            "MetaValue: {}",
            t
        ))),
    }
}

fn read_meta(value: &Value) -> Result<Meta> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid("Expected object for Meta"))?;
    obj.iter()
        .map(|(key, value)| Ok((key.clone(), read_meta_value(value)?)))
        .collect()
}

/// Read only the `pandoc-api-version` of a document.
///
/// This is deliberately separate from [`read_pandoc`] so the version can be
/// checked before any node is decoded.
pub fn read_api_version(value: &Value) -> Result<ApiVersion> {
    let version = value
        .get("pandoc-api-version")
        .ok_or_else(|| JsonReadError::MissingField("pandoc-api-version".to_string()))?;
    let parts = as_array(version, "pandoc-api-version")?
        .iter()
        .map(|part| {
            part.as_u64()
                .ok_or_else(|| invalid("pandoc-api-version parts must be integers"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ApiVersion(parts))
}

pub fn read_pandoc(value: &Value) -> Result<Pandoc> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid("Expected object for Pandoc"))?;

    let api_version = read_api_version(value)?;
    let meta = read_meta(
        obj.get("meta")
            .ok_or_else(|| JsonReadError::MissingField("meta".to_string()))?,
    )?;
    let blocks = read_blocks(
        obj.get("blocks")
            .ok_or_else(|| JsonReadError::MissingField("blocks".to_string()))?,
    )?;

    Ok(Pandoc {
        api_version,
        meta,
        blocks,
    })
}

/// Parse the raw JSON text of a document without decoding it.
pub fn read_value<R: std::io::Read>(reader: &mut R) -> Result<Value> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    Ok(serde_json::from_str(&buffer)?)
}

pub fn read<R: std::io::Read>(reader: &mut R) -> Result<Pandoc> {
    read_pandoc(&read_value(reader)?)
}
