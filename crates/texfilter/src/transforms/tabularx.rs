/*
 * tabularx.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Rewrites tables as boxed LaTeX tabularx environments.
 */

//! Table rewriter.
//!
//! Every table is replaced by five blocks:
//!
//! 1. `\begin{tabularx}{WIDTH}{|L|C|R|} \hline` as a raw block
//! 2. the header row, each cell wrapped in `\textbf{...}`
//! 3. the body rows, cells separated by ` & ` and each row closed by
//!    ` \\ \hline` and a newline
//! 4. `\end{tabularx}` as a raw block
//! 5. the caption wrapped in `\caption{...}`, placed after the table so it
//!    renders below it
//!
//! Cell and caption content is kept as inline content between raw LaTeX
//! fragments, so pandoc still renders formatting inside cells.

use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn};
use crate::pandoc::{
    Alignment, Block, Blocks, Caption, Cell, ColWidth, Inline, Inlines, Paragraph, Row, Table,
};
use crate::utils::stringify::stringify_block;

const CELL_SEPARATOR: &str = " & ";
const ROW_TERMINATOR: &str = " \\\\ \\hline\n";
const HEADER_OPEN: &str = "\\textbf{";
const HEADER_SEPARATOR: &str = "} & \\textbf{";
const HEADER_TERMINATOR: &str = "} \\\\ \\hline";

fn latex(text: &str) -> Inline {
    Inline::raw("latex", text)
}

fn alignment_letter(alignment: Alignment, default_column: char) -> char {
    match alignment {
        Alignment::Default => default_column,
        Alignment::Left => 'L',
        Alignment::Center => 'C',
        Alignment::Right => 'R',
    }
}

/// Column letters surrounded by pipes, e.g. `|L|C|R|`.
pub fn column_spec(aligns: &[Alignment], default_column: char) -> String {
    let mut spec = String::from("|");
    for alignment in aligns {
        spec.push(alignment_letter(*alignment, default_column));
        spec.push('|');
    }
    spec
}

/// Inline content of a cell's blocks.
///
/// `Plain` and `Para` blocks contribute their inlines, separated by a
/// `SoftBreak`; any other block contributes its plain text.
pub fn cell_inlines(blocks: Blocks) -> Inlines {
    let mut result = Inlines::new();
    for block in blocks {
        let inlines = match block {
            Block::Plain(plain) => plain.content,
            Block::Paragraph(para) => para.content,
            other => {
                let text = stringify_block(&other);
                if text.is_empty() {
                    continue;
                }
                vec![Inline::str(text)]
            }
        };
        if inlines.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push(Inline::SoftBreak);
        }
        result.extend(inlines);
    }
    result
}

/// Rows and cells of a table with the pandoc 2.10+ structure collapsed:
/// all head rows form the header, and every body (its intermediate head
/// rows first) followed by the foot rows forms the body.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTable {
    pub caption: Inlines,
    pub aligns: Vec<Alignment>,
    pub widths: Vec<ColWidth>,
    pub headers: Vec<Vec<Inlines>>,
    pub rows: Vec<Vec<Inlines>>,
}

fn row_cells(row: Row) -> Vec<Inlines> {
    row.cells
        .into_iter()
        .map(|cell: Cell| cell_inlines(cell.content))
        .collect()
}

fn caption_inlines(caption: Caption) -> Inlines {
    cell_inlines(caption.long)
}

impl From<Table> for SimpleTable {
    fn from(table: Table) -> Self {
        let (aligns, widths) = table.colspec.into_iter().unzip();
        let headers = table.head.rows.into_iter().map(row_cells).collect();
        let mut rows = Vec::new();
        for body in table.bodies {
            rows.extend(body.head.into_iter().map(row_cells));
            rows.extend(body.body.into_iter().map(row_cells));
        }
        rows.extend(table.foot.rows.into_iter().map(row_cells));
        SimpleTable {
            caption: caption_inlines(table.caption),
            aligns,
            widths,
            headers,
            rows,
        }
    }
}

fn para(content: Inlines) -> Block {
    Block::Paragraph(Paragraph { content })
}

/// The bold header rows, or an empty paragraph when there is no header cell.
pub fn header_block(headers: Vec<Vec<Inlines>>) -> Block {
    let mut result = Inlines::new();
    for row in headers.into_iter().filter(|row| !row.is_empty()) {
        if !result.is_empty() {
            result.push(latex("\n"));
        }
        result.push(latex(HEADER_OPEN));
        for (i, cell) in row.into_iter().enumerate() {
            if i > 0 {
                result.push(latex(HEADER_SEPARATOR));
            }
            result.extend(cell);
        }
        result.push(latex(HEADER_TERMINATOR));
    }
    para(result)
}

/// All body rows in one paragraph; each row ends with ` \\ \hline` and a newline.
pub fn body_block(rows: Vec<Vec<Inlines>>) -> Block {
    let mut result = Inlines::new();
    for row in rows {
        let cell_count = row.len();
        for (i, cell) in row.into_iter().enumerate() {
            result.extend(cell);
            if i + 1 < cell_count {
                result.push(latex(CELL_SEPARATOR));
            }
        }
        result.push(latex(ROW_TERMINATOR));
    }
    para(result)
}

/// `\caption{...}`, or an empty paragraph when the table has no caption.
pub fn caption_block(caption: Inlines) -> Block {
    if caption.is_empty() {
        return para(Inlines::new());
    }
    let mut result = vec![latex("\\caption{")];
    result.extend(caption);
    result.push(latex("}"));
    para(result)
}

/// The blocks replacing `table`.
pub fn tabularx_blocks(table: SimpleTable, ctx: &mut FilterContext) -> Blocks {
    let spec = column_spec(&table.aligns, ctx.config.default_column);

    vec![
        Block::raw(
            "latex",
            format!(
                "\\begin{{tabularx}}{{{}}}{{{}}} \\hline",
                ctx.config.table_width, spec
            ),
        ),
        header_block(table.headers),
        body_block(table.rows),
        Block::raw("latex", "\\end{tabularx}"),
        caption_block(table.caption),
    ]
}

fn all_rows(table: &Table) -> impl Iterator<Item = &Row> {
    table
        .head
        .rows
        .iter()
        .chain(
            table
                .bodies
                .iter()
                .flat_map(|body| body.head.iter().chain(body.body.iter())),
        )
        .chain(table.foot.rows.iter())
}

/// Warn about rows whose cells, counting column spans, do not fill exactly
/// the table's columns; tabularx would misalign them.
pub fn check_row_widths(table: &Table, ctx: &mut FilterContext) {
    let columns = table.colspec.len();
    for (i, row) in all_rows(table).enumerate() {
        let spanned: usize = row.cells.iter().map(|cell| cell.col_span.max(1)).sum();
        if spanned != columns {
            ctx.warn(format!(
                "table row {} spans {} columns but the table has {} columns",
                i + 1,
                spanned,
                columns
            ));
        }
    }
}

pub fn rewrite_table(table: Table, ctx: &mut FilterContext) -> FilterReturn<Table, Blocks> {
    check_row_widths(&table, ctx);
    let table = SimpleTable::from(table);
    tracing::debug!(
        columns = table.aligns.len(),
        rows = table.rows.len(),
        "rewriting table as tabularx"
    );
    FilterReturn::FilterResult(tabularx_blocks(table, ctx), false)
}

/// Filter replacing every table with a boxed tabularx environment.
pub fn tabularx_filter() -> Filter<'static> {
    Filter::new().with_table(rewrite_table)
}
