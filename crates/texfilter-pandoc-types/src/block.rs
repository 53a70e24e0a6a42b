/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::attr::Attr;
use crate::caption::Caption;
use crate::inline::Inlines;
use crate::list::ListAttributes;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Plain(Plain),
    Paragraph(Paragraph),
    LineBlock(LineBlock),
    CodeBlock(CodeBlock),
    RawBlock(RawBlock),
    BlockQuote(BlockQuote),
    OrderedList(OrderedList),
    BulletList(BulletList),
    DefinitionList(DefinitionList),
    Header(Header),
    HorizontalRule,
    Table(Table),
    Figure(Figure),
    Div(Div),
}

pub type Blocks = Vec<Block>;

#[derive(Debug, Clone, PartialEq)]
pub struct Plain {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineBlock {
    pub content: Vec<Inlines>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub attr: Attr,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub format: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockQuote {
    pub content: Blocks,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList {
    pub attr: ListAttributes,
    pub content: Vec<Blocks>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletList {
    pub content: Vec<Blocks>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionList {
    pub content: Vec<(Inlines, Vec<Blocks>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub level: usize,
    pub attr: Attr,
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub attr: Attr,
    pub caption: Caption,
    pub content: Blocks,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Div {
    pub attr: Attr,
    pub content: Blocks,
}

impl Block {
    pub fn raw(format: impl Into<String>, text: impl Into<String>) -> Block {
        Block::RawBlock(RawBlock {
            format: format.into(),
            text: text.into(),
        })
    }

    /// The inline content of `Plain` and `Para`, `None` for every other block.
    pub fn inline_content(&self) -> Option<&Inlines> {
        match self {
            Block::Plain(plain) => Some(&plain.content),
            Block::Paragraph(para) => Some(&para.content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::Inline;

    #[test]
    fn test_inline_content_of_paragraph() {
        let para = Block::Paragraph(Paragraph {
            content: vec![Inline::str("a")],
        });
        assert_eq!(para.inline_content(), Some(&vec![Inline::str("a")]));
    }

    #[test]
    fn test_inline_content_of_plain() {
        let plain = Block::Plain(Plain { content: vec![] });
        assert_eq!(plain.inline_content(), Some(&vec![]));
    }

    #[test]
    fn test_inline_content_of_other_blocks() {
        assert_eq!(Block::HorizontalRule.inline_content(), None);
        assert_eq!(Block::raw("latex", "x").inline_content(), None);
    }
}
