//! End-to-end compilation tests.

use docforge::compile::{blocks, Emitter};
use docforge::ops::{text_len, Request, TextRange};
use docforge::{
    compile, Alignment, CalloutStyle, CellOrder, CompileOptions, ContentBlock, DocumentSpec,
    ListItem, ListKind, Run, StyleIntent, TableSpec,
};

fn options() -> CompileOptions {
    CompileOptions::default().with_title_block(false)
}

fn body(blocks: Vec<ContentBlock>) -> DocumentSpec {
    let mut doc = DocumentSpec::new("Test");
    for block in blocks {
        doc.add_block(block);
    }
    doc
}

fn inserted_units(requests: &[Request]) -> usize {
    requests
        .iter()
        .filter_map(|r| match r {
            Request::InsertText(insert) => Some(text_len(&insert.text)),
            _ => None,
        })
        .sum()
}

fn bullets_range(requests: &[Request]) -> (usize, usize) {
    let ranges: Vec<&TextRange> = requests
        .iter()
        .filter_map(|r| match r {
            Request::CreateParagraphBullets(bullets) => Some(&bullets.range),
            _ => None,
        })
        .collect();
    assert_eq!(ranges.len(), 1, "expected exactly one list request");
    (ranges[0].start, ranges[0].end)
}

#[test]
fn test_final_cursor_matches_inserted_text() {
    let doc = body(vec![
        ContentBlock::Rule,
        ContentBlock::heading(1, "Überblick"),
        ContentBlock::paragraph(vec![
            Run::new("Emoji 😀 take two units, "),
            Run::styled("accents one", StyleIntent::new().italic().with_color("#3366CC")),
        ]),
        ContentBlock::heading(3, ""),
        ContentBlock::Rule,
        ContentBlock::text("Closing line."),
    ]);
    let compiled = compile(&doc, &options()).unwrap();

    assert_eq!(compiled.final_cursor, 1 + inserted_units(&compiled.requests));
}

#[test]
fn test_list_levels_adjust_cursor() {
    let doc = body(vec![ContentBlock::list(
        ListKind::Bullet,
        vec![
            ListItem::nested("a", 0),
            ListItem::nested("b", 1),
            ListItem::nested("c", 2),
            ListItem::nested("d", 0),
        ],
    )]);
    let compiled = compile(&doc, &options()).unwrap();

    let written = inserted_units(&compiled.requests);
    assert_eq!(compiled.final_cursor as isize - (1 + written) as isize, -3);
}

#[test]
fn test_flat_bullet_list() {
    let compiled = compile(&body(vec![ContentBlock::bullets(["A", "B", "C"])]), &options()).unwrap();

    assert_eq!(bullets_range(&compiled.requests), (1, 7));
    assert_eq!(compiled.final_cursor, 7);
}

#[test]
fn test_nested_bullet_list() {
    let doc = body(vec![ContentBlock::list(
        ListKind::Bullet,
        vec![
            ListItem::nested("A", 0),
            ListItem::nested("B", 1),
            ListItem::nested("C", 0),
        ],
    )]);
    let compiled = compile(&doc, &options()).unwrap();

    // "A\n\tB\nC\n": the bullet request covers the tab too.
    assert_eq!(bullets_range(&compiled.requests), (1, 8));
    assert_eq!(compiled.final_cursor, 8 - 1);
}

#[test]
fn test_block_after_list_starts_at_adjusted_cursor() {
    let doc = body(vec![
        ContentBlock::list(
            ListKind::Numbered,
            vec![ListItem::new("one"), ListItem::nested("two", 2)],
        ),
        ContentBlock::text("after"),
    ]);
    let compiled = compile(&doc, &options()).unwrap();

    let last_insert = compiled
        .requests
        .iter()
        .rev()
        .find_map(|r| match r {
            Request::InsertText(insert) if insert.text == "after" => Some(insert.location.index),
            _ => None,
        })
        .unwrap();
    // "one\n" + "\t\ttwo\n" is 10 units, two of them tabs.
    assert_eq!(last_insert, 1 + 10 - 2);
}

#[test]
fn test_callout_is_single_cell_table() {
    let doc = body(vec![
        ContentBlock::text("Intro"),
        ContentBlock::callout(CalloutStyle::Critical, "Stop"),
    ]);
    let compiled = compile(&doc, &options()).unwrap();

    let table_start = compiled
        .requests
        .iter()
        .find_map(|r| match r {
            Request::InsertTable(insert) => Some(insert.location.index),
            _ => None,
        })
        .unwrap();
    assert_eq!(table_start, 7);

    let content_at = compiled
        .requests
        .iter()
        .find_map(|r| match r {
            Request::InsertText(insert) if insert.text == "Stop" => Some(insert.location.index),
            _ => None,
        })
        .unwrap();
    assert_eq!(content_at, table_start + 4);
    assert_eq!(compiled.final_cursor, table_start + 6 + 4);
}

#[test]
fn test_code_block_is_single_cell_table() {
    let compiled = compile(&body(vec![ContentBlock::code("x = 1")]), &options()).unwrap();
    assert_eq!(compiled.final_cursor, 1 + 6 + 5);
    assert_eq!(compiled.stats.code_block_count, 1);
}

#[test]
fn test_reset_then_bold_round_trip() {
    let doc = body(vec![ContentBlock::paragraph(vec![
        Run::new("Hello "),
        Run::bold("world"),
    ])]);
    let compiled = compile(&doc, &options()).unwrap();

    let styles: Vec<_> = compiled
        .requests
        .iter()
        .filter_map(|r| match r {
            Request::UpdateTextStyle(style) => Some(style),
            _ => None,
        })
        .collect();
    assert_eq!(styles.len(), 2);

    let (reset, bold) = (styles[0], styles[1]);
    assert_eq!((reset.range.start, reset.range.end), (1, 13));
    assert_eq!(reset.text_style.bold, Some(false));
    assert!(reset.fields.contains("fontSize"));

    assert_eq!((bold.range.start, bold.range.end), (7, 12));
    assert_eq!(bold.fields.to_string(), "bold");
    assert_eq!(bold.text_style.bold, Some(true));
}

#[test]
fn test_every_paragraph_reset_reaches_terminator() {
    let doc = body(vec![
        ContentBlock::heading(2, "Heading"),
        ContentBlock::text("Body"),
        ContentBlock::image("https://example.com/logo.png"),
    ]);
    let compiled = compile(&doc, &options()).unwrap();

    let newlines: Vec<usize> = compiled
        .requests
        .iter()
        .filter_map(|r| match r {
            Request::InsertText(insert) if insert.text.ends_with('\n') => {
                Some(insert.location.index + text_len(&insert.text) - 1)
            }
            _ => None,
        })
        .collect();
    let resets: Vec<(usize, usize)> = compiled
        .requests
        .iter()
        .filter_map(|r| match r {
            Request::UpdateTextStyle(style) if style.fields.contains("fontSize") => {
                Some((style.range.start, style.range.end))
            }
            _ => None,
        })
        .collect();

    for newline in newlines {
        assert!(
            resets.iter().any(|&(s, e)| s <= newline && newline < e),
            "terminator at {} is never reset",
            newline
        );
    }
}

#[test]
fn test_table_cell_order_does_not_change_final_layout() {
    let table = TableSpec::new(["Item", "Qty"])
        .with_text_row(["Apples", "12"])
        .with_text_row(["Pears", "7"]);
    let doc = body(vec![ContentBlock::Table(table), ContentBlock::text("After")]);

    let reverse = compile(&doc, &options()).unwrap();
    let natural = compile(&doc, &options().with_cell_order(CellOrder::Natural)).unwrap();
    assert_eq!(reverse.final_cursor, natural.final_cursor);

    let overlays = |requests: &[Request]| -> Vec<Request> {
        requests
            .iter()
            .filter(|r| !matches!(r, Request::InsertText(_)))
            .cloned()
            .collect()
    };
    assert_eq!(overlays(&reverse.requests), overlays(&natural.requests));
}

#[test]
fn test_table_styles_precede_content() {
    let table = TableSpec::new(["A"]).with_text_row(["b"]);
    let compiled = compile(&body(vec![ContentBlock::Table(table)]), &options()).unwrap();

    let first_text = compiled
        .requests
        .iter()
        .position(|r| matches!(r, Request::InsertText(_)))
        .unwrap();
    let last_cell_style = compiled
        .requests
        .iter()
        .rposition(Request::is_table_style)
        .unwrap();
    assert!(last_cell_style < first_text);
}

#[test]
fn test_table_start_location_follows_insertion() {
    let table = TableSpec::new(["A", "B"]).with_text_row(["c", "d"]);
    let doc = body(vec![ContentBlock::text("Intro"), ContentBlock::Table(table)]);
    let compiled = compile(&doc, &options()).unwrap();

    let inserted_at = compiled
        .requests
        .iter()
        .find_map(|r| match r {
            Request::InsertTable(insert) => Some(insert.location.index),
            _ => None,
        })
        .unwrap();
    let first_style = compiled
        .requests
        .iter()
        .find_map(|r| match r {
            Request::UpdateTableCellStyle(style) => {
                Some(style.table_range.table_cell_location.table_start_location.index)
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(inserted_at, 7);
    assert_eq!(first_style, inserted_at + 1);
}

#[test]
fn test_structural_table_size() {
    let table = TableSpec::default()
        .with_text_row(["", "", ""])
        .with_text_row(["", "", ""]);
    let compiled = compile(&body(vec![ContentBlock::Table(table)]), &options()).unwrap();
    assert_eq!(compiled.final_cursor, 1 + 17);
}

#[test]
fn test_image_and_page_break_units() {
    let doc = body(vec![
        ContentBlock::Image(
            docforge::ImageSpec::new("https://example.com/a.png").align(Alignment::Center),
        ),
        ContentBlock::PageBreak,
        ContentBlock::text("x"),
    ]);
    let compiled = compile(&doc, &options()).unwrap();
    // image, page break, "x\n"
    assert_eq!(compiled.final_cursor, 1 + 1 + 1 + 2);
}

#[test]
fn test_rule_after_image_closes_its_paragraph() {
    let doc = body(vec![
        ContentBlock::image("https://example.com/a.png"),
        ContentBlock::Rule,
    ]);
    let compiled = compile(&doc, &options()).unwrap();

    let border = compiled
        .requests
        .iter()
        .find_map(|r| match r {
            Request::UpdateParagraphStyle(style) if style.paragraph_style.border_bottom.is_some() => {
                Some((style.range.start, style.range.end))
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(border, (2, 3));
    assert_eq!(compiled.final_cursor, 3);
}

#[test]
fn test_emitter_rejects_unwritten_ranges() {
    let options = options();
    let mut out = Emitter::new(&options).unwrap();
    blocks::paragraph(&mut out, &[Run::new("abc")], &Default::default()).unwrap();

    let beyond = out.range(1, out.cursor() + 1);
    assert!(matches!(
        out.reset_range(&beyond),
        Err(docforge::Error::InvalidRange { .. })
    ));
}
