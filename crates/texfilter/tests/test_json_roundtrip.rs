/*
 * test_json_roundtrip.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde_json::{Value, json};
use texfilter::pandoc::{Block, Inline, Pandoc, Paragraph};
use texfilter::readers;
use texfilter::writers;

fn roundtrip(value: &Value) -> Value {
    let pandoc = readers::json::read_pandoc(value).unwrap();
    writers::json::write_pandoc(&pandoc)
}

fn attr(id: &str) -> Value {
    json!([id, ["cls"], [["key", "value"]]])
}

#[test]
fn test_json_roundtrip_simple_paragraph() {
    let original = Pandoc {
        blocks: vec![Block::Paragraph(Paragraph {
            content: vec![Inline::str("Hello,"), Inline::Space, Inline::str("world!")],
        })],
        ..Default::default()
    };

    let mut json_output = Vec::new();
    writers::json::write(&original, &mut json_output).unwrap();

    let mut input = json_output.as_slice();
    let parsed = readers::json::read(&mut input).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_json_roundtrip_every_inline() {
    let citation = json!({
        "citationId": "doe2020",
        "citationPrefix": [{"t": "Str", "c": "see"}],
        "citationSuffix": [{"t": "Str", "c": "p. 3"}],
        "citationMode": {"t": "NormalCitation"},
        "citationNoteNum": 1,
        "citationHash": 0
    });
    let value = json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": [{"t": "Para", "c": [
            {"t": "Str", "c": "a"},
            {"t": "Space"},
            {"t": "SoftBreak"},
            {"t": "LineBreak"},
            {"t": "Emph", "c": [{"t": "Str", "c": "e"}]},
            {"t": "Underline", "c": [{"t": "Str", "c": "u"}]},
            {"t": "Strong", "c": [{"t": "Str", "c": "s"}]},
            {"t": "Strikeout", "c": [{"t": "Str", "c": "k"}]},
            {"t": "Superscript", "c": [{"t": "Str", "c": "2"}]},
            {"t": "Subscript", "c": [{"t": "Str", "c": "i"}]},
            {"t": "SmallCaps", "c": [{"t": "Str", "c": "sc"}]},
            {"t": "Quoted", "c": [{"t": "DoubleQuote"}, [{"t": "Str", "c": "q"}]]},
            {"t": "Cite", "c": [[citation], [{"t": "Str", "c": "[see @doe2020, p. 3]"}]]},
            {"t": "Code", "c": [attr("c1"), "x = 1"]},
            {"t": "Math", "c": [{"t": "InlineMath"}, "x^2"]},
            {"t": "RawInline", "c": ["latex", "\\relax"]},
            {"t": "Link", "c": [attr(""), [{"t": "Str", "c": "link"}], ["https://example.com", "title"]]},
            {"t": "Image", "c": [attr("img"), [], ["figure.png", ""]]},
            {"t": "Note", "c": [{"t": "Para", "c": [{"t": "Str", "c": "note"}]}]},
            {"t": "Span", "c": [attr("sp"), [{"t": "Str", "c": "span"}]]}
        ]}]
    });
    assert_eq!(roundtrip(&value), value);
}

#[test]
fn test_json_roundtrip_every_block() {
    let cell = json!([["", [], []], {"t": "AlignCenter"}, 1, 2,
                      [{"t": "Plain", "c": [{"t": "Str", "c": "cell"}]}]]);
    let value = json!({
        "pandoc-api-version": [1, 22, 2, 1],
        "meta": {
            "title": {"t": "MetaInlines", "c": [{"t": "Str", "c": "Doc"}]},
            "abstract": {"t": "MetaBlocks", "c": [{"t": "Para", "c": [{"t": "Str", "c": "A"}]}]},
            "tags": {"t": "MetaList", "c": [{"t": "MetaString", "c": "x"}, {"t": "MetaBool", "c": false}]},
            "texfilter": {"t": "MetaMap", "c": {"table-width": {"t": "MetaString", "c": "12cm"}}}
        },
        "blocks": [
            {"t": "Plain", "c": [{"t": "Str", "c": "plain"}]},
            {"t": "LineBlock", "c": [[{"t": "Str", "c": "one"}], [{"t": "Str", "c": "two"}]]},
            {"t": "CodeBlock", "c": [attr("code"), "fn main() {}"]},
            {"t": "RawBlock", "c": ["html", "<hr>"]},
            {"t": "BlockQuote", "c": [{"t": "Para", "c": [{"t": "Str", "c": "quote"}]}]},
            {"t": "OrderedList", "c": [[3, {"t": "LowerRoman"}, {"t": "TwoParens"}],
                [[{"t": "Plain", "c": [{"t": "Str", "c": "item"}]}]]]},
            {"t": "BulletList", "c": [[{"t": "Plain", "c": [{"t": "Str", "c": "bullet"}]}], []]},
            {"t": "DefinitionList", "c": [[[{"t": "Str", "c": "term"}],
                [[{"t": "Plain", "c": [{"t": "Str", "c": "def"}]}]]]]},
            {"t": "Header", "c": [2, attr("h"), [{"t": "Str", "c": "Heading"}]]},
            {"t": "HorizontalRule"},
            {"t": "Table", "c": [
                attr("tbl"),
                [[{"t": "Str", "c": "short"}], [{"t": "Plain", "c": [{"t": "Str", "c": "long"}]}]],
                [[{"t": "AlignCenter"}, {"t": "ColWidth", "c": 0.25}],
                 [{"t": "AlignDefault"}, {"t": "ColWidthDefault"}]],
                [["", [], []], [[["", [], []], [cell]]]],
                [[["", [], []], 1, [[["", [], []], [cell]]], [[["", [], []], [cell]]]]],
                [["", [], []], [[["", [], []], [cell]]]]
            ]},
            {"t": "Figure", "c": [attr("fig"), [null, []], [{"t": "Plain", "c": []}]]},
            {"t": "Div", "c": [attr("div"), [{"t": "Para", "c": []}]]}
        ]
    });
    assert_eq!(roundtrip(&value), value);
}

#[test]
fn test_json_roundtrip_repeated_attribute_keys() {
    let value = json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": [{"t": "Div", "c": [
            ["d", [], [["data-x", "1"], ["data-x", "2"]]],
            [{"t": "Para", "c": [{"t": "Span", "c": [
                ["", [], [["k", "a"], ["j", "b"], ["k", "c"]]],
                [{"t": "Str", "c": "x"}]
            ]}]}]
        ]}]
    });
    assert_eq!(roundtrip(&value), value);
}
