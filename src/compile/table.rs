//! Table translators: tables, callouts and code blocks.
//!
//! Callouts and code blocks render as 1x1 tables. Every table is built in
//! the same order: the empty structure, then cell styles (borders, header
//! background, cell backgrounds, column widths), then cell content, then
//! one reset per cell through its terminator, then overlays.

use super::resolver::{
    merge_cell_styles, resolve_cell_background, resolve_cell_borders, resolve_paragraph_format,
    resolve_text_style,
};
use super::{CompileOptions, Emitter, TableGeometry};
use crate::error::Result;
use crate::model::{CalloutStyle, ParagraphFormat, StyleIntent, TableSpec};
use crate::ops::{text_len, FieldMask, TableCellStyle};

/// Write a table.
///
/// Returns the geometry that was laid out, or `None` for a table with no
/// rows or no columns.
pub fn table(
    out: &mut Emitter,
    options: &CompileOptions,
    spec: &TableSpec,
) -> Result<Option<TableGeometry>> {
    if spec.is_empty() {
        log::debug!("skipping table without rows or columns");
        return Ok(None);
    }

    let grid = spec.grid();
    let geometry = TableGeometry::new(grid.len(), spec.column_count());
    let inserted_at = out.cursor();
    let start = out.insert_table(&geometry);
    let (rows, cols) = (geometry.rows(), geometry.cols());

    let (style, fields) = resolve_cell_borders(&options.border_color, options.border_width)?;
    out.table_cell_style(&start, 0, 0, rows, cols, style, fields)?;

    if spec.has_header() {
        let (style, fields) = resolve_cell_background(&options.header_background)?;
        out.table_cell_style(&start, 0, 0, 1, cols, style, fields)?;
    }

    for (r, row) in grid.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if let Some(ref background) = cell.background {
                let (style, fields) = resolve_cell_background(background)?;
                out.table_cell_style(&start, r, c, 1, 1, style, fields)?;
            }
        }
    }

    if let Some(ref widths) = spec.column_widths {
        for (c, width) in widths.iter().enumerate().take(cols) {
            out.column_width(&start, c, *width)?;
        }
    }

    let lengths: Vec<usize> = grid.iter().flatten().map(|cell| text_len(&cell.text)).collect();
    let mut plan = geometry.write_plan(inserted_at, &lengths, options.cell_order);
    for write in &plan {
        out.insert_text_at(write.insert_at, &grid[write.row][write.col].text)?;
    }

    // Resets and overlays address final offsets, in row-major order.
    plan.sort_by_key(|write| (write.row, write.col));
    for write in &plan {
        out.reset_range(&out.range(write.final_start, write.final_end() + 1))?;
    }

    for write in &plan {
        let cell = &grid[write.row][write.col];
        let header_bold =
            (spec.has_header() && write.row == 0 && options.header_bold).then_some(true);
        let bold = cell.bold.or(header_bold);
        if let (Some(bold), true) = (bold, write.len > 0) {
            let intent = StyleIntent {
                bold: Some(bold),
                ..Default::default()
            };
            let (style, fields) = resolve_text_style(&intent)?;
            out.style_range(&out.range(write.final_start, write.final_end()), style, fields)?;
        }
        if cell.alignment.is_some() {
            let format = ParagraphFormat {
                alignment: cell.alignment,
                spacing: None,
            };
            let (style, fields) = resolve_paragraph_format(&format);
            out.paragraph_style(
                &out.range(write.final_start, write.final_end() + 1),
                style,
                fields,
            )?;
        }
    }

    log::debug!(
        "table {}x{} at {} occupies {} units",
        rows,
        cols,
        inserted_at,
        geometry.filled_size(&lengths)
    );
    Ok(Some(geometry))
}

/// Write a callout box.
pub fn callout(
    out: &mut Emitter,
    options: &CompileOptions,
    style: CalloutStyle,
    text: &str,
) -> Result<()> {
    let colors = options.callout_colors(style);
    let cell_style = merge_cell_styles(
        resolve_cell_borders(&colors.border, options.border_width)?,
        resolve_cell_background(&colors.background)?,
    );
    let overlay = StyleIntent {
        color: colors.text,
        ..Default::default()
    };
    single_cell(out, cell_style, text, &overlay)
}

/// Write a code block.
///
/// Trailing newlines are dropped; the cell's own terminator ends the last line.
pub fn code_block(out: &mut Emitter, options: &CompileOptions, text: &str) -> Result<()> {
    let cell_style = merge_cell_styles(
        resolve_cell_borders(&options.border_color, options.border_width)?,
        resolve_cell_background(&options.code_background)?,
    );
    let overlay = StyleIntent::new()
        .with_font(options.code_font.clone())
        .with_size(options.code_font_size);
    single_cell(out, cell_style, text.trim_end_matches('\n'), &overlay)
}

fn single_cell(
    out: &mut Emitter,
    (style, fields): (TableCellStyle, FieldMask),
    text: &str,
    overlay: &StyleIntent,
) -> Result<()> {
    let geometry = TableGeometry::new(1, 1);
    let inserted_at = out.cursor();
    let start = out.insert_table(&geometry);
    out.table_cell_style(&start, 0, 0, 1, 1, style, fields)?;

    let content = out.insert_text_at(geometry.cell_base(inserted_at, 0, 0), text)?;
    out.reset_range(&content.with_bounds(content.start, content.end + 1))?;

    let (style, fields) = resolve_text_style(overlay)?;
    if !fields.is_empty() && !content.is_empty() {
        out.style_range(&content, style, fields)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::CellOrder;
    use crate::model::{Alignment, TableCellSpec};
    use crate::ops::Request;

    fn setup(options: &CompileOptions) -> Emitter {
        Emitter::new(options).unwrap()
    }

    fn inserts(out: &Emitter) -> Vec<(usize, String)> {
        out.requests()
            .iter()
            .filter_map(|r| match r {
                Request::InsertText(insert) => Some((insert.location.index, insert.text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_callout_geometry() {
        let options = CompileOptions::default();
        let mut out = setup(&options);
        callout(&mut out, &options, CalloutStyle::Warning, "Mind the gap").unwrap();

        match &out.requests()[0] {
            Request::InsertTable(insert) => {
                assert_eq!(insert.location.index, 1);
                assert_eq!((insert.rows, insert.columns), (1, 1));
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert_eq!(inserts(&out), [(5, "Mind the gap".to_string())]);
        assert_eq!(out.cursor(), 1 + 6 + 12);

        let cell_styles = out.requests().iter().filter(|r| r.is_table_style()).count();
        assert_eq!(cell_styles, 1);
    }

    #[test]
    fn test_code_block_overlay() {
        let options = CompileOptions::default();
        let mut out = setup(&options);
        code_block(&mut out, &options, "fn main() {}\n\n").unwrap();

        assert_eq!(inserts(&out), [(5, "fn main() {}".to_string())]);
        match out.requests().last() {
            Some(Request::UpdateTextStyle(overlay)) => {
                assert_eq!(overlay.fields.to_string(), "weightedFontFamily,fontSize");
                assert_eq!((overlay.range.start, overlay.range.end), (5, 17));
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_table_reverse_order() {
        let options = CompileOptions::default();
        let mut out = setup(&options);
        let spec = TableSpec::new(["A", "B"]).with_text_row(["cc", "ddd"]);
        let geometry = table(&mut out, &options, &spec).unwrap().unwrap();

        assert_eq!(geometry.structural_size(), 3 + 2 * 5);
        // Reverse order: last cell first, every write at its unshifted base.
        assert_eq!(
            inserts(&out),
            [
                (1 + 4 + 5 + 2, "ddd".to_string()),
                (1 + 4 + 5, "cc".to_string()),
                (1 + 4 + 2, "B".to_string()),
                (1 + 4, "A".to_string()),
            ]
        );
        assert_eq!(out.cursor(), 1 + 13 + 7);
    }

    #[test]
    fn test_table_natural_order() {
        let options = CompileOptions::default().with_cell_order(CellOrder::Natural);
        let mut out = setup(&options);
        let spec = TableSpec::new(["A", "B"]).with_text_row(["cc", "ddd"]);
        table(&mut out, &options, &spec).unwrap();

        assert_eq!(
            inserts(&out),
            [
                (5, "A".to_string()),
                (8, "B".to_string()),
                (12, "cc".to_string()),
                (16, "ddd".to_string()),
            ]
        );
    }

    #[test]
    fn test_table_request_order() {
        let options = CompileOptions::default();
        let mut out = setup(&options);
        let spec = TableSpec::new(["Name"])
            .with_row(vec![TableCellSpec::text("x")
                .background("#FFEEEE")
                .align(Alignment::End)])
            .with_column_widths(vec![120.0]);
        table(&mut out, &options, &spec).unwrap();

        let names: Vec<&str> = out.requests().iter().map(Request::name).collect();
        assert_eq!(
            names,
            [
                "insertTable",
                "updateTableCellStyle",
                "updateTableCellStyle",
                "updateTableCellStyle",
                "updateTableColumnProperties",
                "insertText",
                "insertText",
                "updateTextStyle",
                "updateTextStyle",
                "updateTextStyle",
                "updateParagraphStyle",
            ]
        );
    }

    #[test]
    fn test_cell_resets_cover_terminators() {
        let options = CompileOptions::default();
        let mut out = setup(&options);
        let spec = TableSpec::default().with_text_row(["ab", ""]);
        table(&mut out, &options, &spec).unwrap();

        let resets: Vec<(usize, usize)> = out
            .requests()
            .iter()
            .filter_map(|r| match r {
                Request::UpdateTextStyle(s) if s.fields.contains("fontSize") => {
                    Some((s.range.start, s.range.end))
                }
                _ => None,
            })
            .collect();
        // 1x2 table at 1: bases 5 and 7, the second shifted past "ab".
        assert_eq!(resets, [(5, 8), (9, 10)]);
    }

    #[test]
    fn test_table_styles_address_table_element() {
        let options = CompileOptions::default();
        let mut out = setup(&options);
        out.insert_text("Intro\n");
        let spec = TableSpec::new(["A", "B"])
            .with_text_row(["c", "d"])
            .with_column_widths(vec![90.0, 90.0]);
        table(&mut out, &options, &spec).unwrap();

        let inserted_at = match &out.requests()[1] {
            Request::InsertTable(insert) => insert.location.index,
            other => panic!("unexpected request {:?}", other),
        };
        assert_eq!(inserted_at, 7);

        let starts: Vec<usize> = out
            .requests()
            .iter()
            .filter_map(|r| match r {
                Request::UpdateTableCellStyle(s) => {
                    Some(s.table_range.table_cell_location.table_start_location.index)
                }
                Request::UpdateTableColumnProperties(p) => Some(p.table_start_location.index),
                _ => None,
            })
            .collect();
        assert_eq!(starts.len(), 4);
        assert!(starts.iter().all(|&start| start == inserted_at + 1));
        // Cell content still counts from the insertion point.
        assert_eq!(inserts(&out)[1].0, 7 + 4 + 5 + 2);
    }

    #[test]
    fn test_callout_style_addresses_table_element() {
        let options = CompileOptions::default();
        let mut out = setup(&options);
        callout(&mut out, &options, CalloutStyle::Info, "Note").unwrap();

        match &out.requests()[1] {
            Request::UpdateTableCellStyle(style) => {
                assert_eq!(style.table_range.table_cell_location.table_start_location.index, 2);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_emits_nothing() {
        let options = CompileOptions::default();
        let mut out = setup(&options);
        assert!(table(&mut out, &options, &TableSpec::default()).unwrap().is_none());
        assert!(out.requests().is_empty());
    }
}
