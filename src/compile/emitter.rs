//! Cursor-tracked request emitter.
//!
//! The emitter owns the cursor (the next free offset in its segment) and the
//! request list. Insertions append a request at the cursor and advance it;
//! style requests target ranges that must already be written. Appended
//! requests are never renumbered.

use super::resolver::neutral_text_style;
use super::{CompileOptions, TableGeometry};
use crate::error::{Error, Result};
use crate::ops::{
    text_len, CreateParagraphBullets, Dimension, FieldMask, InsertInlineImage, InsertPageBreak,
    InsertTable, InsertText, Location, ParagraphStyle, Request, Segment, Size, TableCellLocation,
    TableCellStyle, TableColumnProperties, TableRange, TextRange, TextStyle,
    UpdateParagraphStyle, UpdateTableCellStyle, UpdateTableColumnProperties, UpdateTextStyle,
    WidthType,
};

/// First addressable offset of the body; offset 0 is reserved.
pub const BODY_ORIGIN: usize = 1;

/// First addressable offset of a header or footer segment.
pub const SEGMENT_ORIGIN: usize = 0;

/// Offsets an inline image occupies.
pub const IMAGE_UNITS: usize = 1;

/// Offsets a page break occupies.
pub const PAGE_BREAK_UNITS: usize = 1;

/// Cursor-tracked emitter for one segment of one document build.
#[derive(Debug)]
pub struct Emitter {
    segment: Segment,
    origin: usize,
    cursor: usize,
    requests: Vec<Request>,
    neutral: (TextStyle, FieldMask),
}

impl Emitter {
    /// Create an emitter for the document body.
    pub fn new(options: &CompileOptions) -> Result<Self> {
        Self::with_origin(Segment::Body, BODY_ORIGIN, options)
    }

    /// Create an emitter for a header/footer segment.
    pub fn for_segment(segment: Segment, options: &CompileOptions) -> Result<Self> {
        Self::with_origin(segment, SEGMENT_ORIGIN, options)
    }

    fn with_origin(segment: Segment, origin: usize, options: &CompileOptions) -> Result<Self> {
        Ok(Self {
            segment,
            origin,
            cursor: origin,
            requests: Vec::new(),
            neutral: neutral_text_style(options)?,
        })
    }

    /// The next free offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The first addressable offset.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// The segment this emitter writes into.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Requests emitted so far.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Check if nothing has been written.
    pub fn is_pristine(&self) -> bool {
        self.cursor == self.origin
    }

    /// A location in this segment.
    pub fn location(&self, index: usize) -> Location {
        Location {
            index,
            segment: self.segment.clone(),
        }
    }

    /// A range in this segment.
    pub fn range(&self, start: usize, end: usize) -> TextRange {
        TextRange {
            start,
            end,
            segment: self.segment.clone(),
        }
    }

    /// Insert text at the cursor and advance past it.
    ///
    /// Returns the written range; empty text emits nothing.
    pub fn insert_text(&mut self, text: &str) -> TextRange {
        let start = self.cursor;
        let len = text_len(text);
        if len > 0 {
            self.requests.push(Request::InsertText(InsertText {
                location: self.location(start),
                text: text.to_string(),
            }));
            self.cursor += len;
        }
        self.range(start, start + len)
    }

    /// Insert text inside already-written structure (a table cell).
    ///
    /// Everything after `index` shifts, so the cursor advances by the length.
    pub fn insert_text_at(&mut self, index: usize, text: &str) -> Result<TextRange> {
        if index < self.origin || index > self.cursor {
            return Err(Error::InvalidRange {
                start: index,
                end: index,
                cursor: self.cursor,
            });
        }
        let len = text_len(text);
        if len > 0 {
            self.requests.push(Request::InsertText(InsertText {
                location: self.location(index),
                text: text.to_string(),
            }));
            self.cursor += len;
        }
        Ok(self.range(index, index + len))
    }

    /// Insert an empty table at the cursor and reserve its structural size.
    ///
    /// Returns the location of the table element, one past the insertion
    /// point. Table cell and column requests are addressed by it.
    pub fn insert_table(&mut self, geometry: &TableGeometry) -> Location {
        let inserted_at = self.cursor;
        self.requests.push(Request::InsertTable(InsertTable {
            location: self.location(inserted_at),
            rows: geometry.rows(),
            columns: geometry.cols(),
        }));
        self.cursor += geometry.structural_size();
        self.location(geometry.table_start(inserted_at))
    }

    /// Insert an inline image at the cursor.
    pub fn insert_image(&mut self, uri: &str, size: Option<Size>) -> TextRange {
        let start = self.cursor;
        self.requests
            .push(Request::InsertInlineImage(InsertInlineImage {
                location: self.location(start),
                uri: uri.to_string(),
                object_size: size,
            }));
        self.cursor += IMAGE_UNITS;
        self.range(start, self.cursor)
    }

    /// Insert a page break at the cursor.
    pub fn insert_page_break(&mut self) -> TextRange {
        let start = self.cursor;
        self.requests.push(Request::InsertPageBreak(InsertPageBreak {
            location: self.location(start),
        }));
        self.cursor += PAGE_BREAK_UNITS;
        self.range(start, self.cursor)
    }

    /// Apply a run style over written content.
    pub fn style_range(
        &mut self,
        range: &TextRange,
        style: TextStyle,
        fields: FieldMask,
    ) -> Result<()> {
        self.check_range(range)?;
        self.check_fields(range, &fields)?;
        self.requests.push(Request::UpdateTextStyle(UpdateTextStyle {
            range: range.clone(),
            text_style: style,
            fields,
        }));
        Ok(())
    }

    /// Apply a paragraph style over written content.
    pub fn paragraph_style(
        &mut self,
        range: &TextRange,
        style: ParagraphStyle,
        fields: FieldMask,
    ) -> Result<()> {
        self.check_range(range)?;
        self.check_fields(range, &fields)?;
        self.requests
            .push(Request::UpdateParagraphStyle(UpdateParagraphStyle {
                range: range.clone(),
                paragraph_style: style,
                fields,
            }));
        Ok(())
    }

    /// Force every stylable run property over `range` to its neutral value.
    ///
    /// Callers pass the range through the paragraph terminator so nothing
    /// inherited from earlier content survives into the next block.
    pub fn reset_range(&mut self, range: &TextRange) -> Result<()> {
        let (style, fields) = self.neutral.clone();
        self.style_range(range, style, fields)
    }

    /// Turn the paragraphs in `range` into list items.
    pub fn create_bullets(&mut self, range: &TextRange, preset: &'static str) -> Result<()> {
        self.check_range(range)?;
        self.requests
            .push(Request::CreateParagraphBullets(CreateParagraphBullets {
                range: range.clone(),
                bullet_preset: preset,
            }));
        Ok(())
    }

    /// Style a block of cells of a table that starts at `table_start`.
    #[allow(clippy::too_many_arguments)]
    pub fn table_cell_style(
        &mut self,
        table_start: &Location,
        row: usize,
        col: usize,
        row_span: usize,
        column_span: usize,
        style: TableCellStyle,
        fields: FieldMask,
    ) -> Result<()> {
        self.check_table(table_start)?;
        if fields.is_empty() {
            return Err(Error::EmptyFieldMask {
                start: table_start.index,
                end: table_start.index,
            });
        }
        self.requests
            .push(Request::UpdateTableCellStyle(UpdateTableCellStyle {
                table_range: TableRange {
                    table_cell_location: TableCellLocation {
                        table_start_location: table_start.clone(),
                        row_index: row,
                        column_index: col,
                    },
                    row_span,
                    column_span,
                },
                table_cell_style: style,
                fields,
            }));
        Ok(())
    }

    /// Fix the width of one column.
    pub fn column_width(&mut self, table_start: &Location, col: usize, width: f32) -> Result<()> {
        self.check_table(table_start)?;
        self.requests
            .push(Request::UpdateTableColumnProperties(
                UpdateTableColumnProperties {
                    table_start_location: table_start.clone(),
                    column_indices: vec![col],
                    table_column_properties: TableColumnProperties {
                        width_type: WidthType::FixedWidth,
                        width: Some(Dimension::pt(width)),
                    },
                    fields: FieldMask::new().with("width").with("widthType"),
                },
            ));
        Ok(())
    }

    /// Move the cursor without inserting.
    ///
    /// Only for characters that were written to convey structure and do not
    /// persist remotely (list nesting tabs).
    pub fn adjust_cursor(&mut self, delta: isize) -> Result<()> {
        let target = self.cursor as isize + delta;
        if target < self.origin as isize {
            return Err(Error::CursorUnderflow {
                cursor: self.cursor,
                delta,
                origin: self.origin,
            });
        }
        if delta != 0 {
            log::debug!("cursor adjusted by {} to {}", delta, target);
        }
        self.cursor = target as usize;
        Ok(())
    }

    /// Consume the emitter, returning the requests and the final cursor.
    pub fn finish(self) -> (Vec<Request>, usize) {
        (self.requests, self.cursor)
    }

    fn check_range(&self, range: &TextRange) -> Result<()> {
        if range.segment != self.segment
            || range.start < self.origin
            || range.start >= range.end
            || range.end > self.cursor
        {
            return Err(Error::InvalidRange {
                start: range.start,
                end: range.end,
                cursor: self.cursor,
            });
        }
        Ok(())
    }

    fn check_fields(&self, range: &TextRange, fields: &FieldMask) -> Result<()> {
        if fields.is_empty() {
            return Err(Error::EmptyFieldMask {
                start: range.start,
                end: range.end,
            });
        }
        Ok(())
    }

    fn check_table(&self, table_start: &Location) -> Result<()> {
        if table_start.segment != self.segment
            || table_start.index < self.origin
            || table_start.index >= self.cursor
        {
            return Err(Error::InvalidRange {
                start: table_start.index,
                end: table_start.index + 1,
                cursor: self.cursor,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::SegmentKind;

    fn emitter() -> Emitter {
        Emitter::new(&CompileOptions::default()).unwrap()
    }

    #[test]
    fn test_cursor_starts_at_one() {
        let e = emitter();
        assert_eq!(e.cursor(), 1);
        assert!(e.is_pristine());

        let header =
            Emitter::for_segment(Segment::Pending(SegmentKind::Header), &CompileOptions::default())
                .unwrap();
        assert_eq!(header.cursor(), 0);
    }

    #[test]
    fn test_insert_advances_cursor() {
        let mut e = emitter();
        let first = e.insert_text("Hello\n");
        let second = e.insert_text("World\n");

        assert_eq!((first.start, first.end), (1, 7));
        assert_eq!((second.start, second.end), (7, 13));
        assert_eq!(e.cursor(), 13);
        assert_eq!(e.requests().len(), 2);
    }

    #[test]
    fn test_empty_insert_emits_nothing() {
        let mut e = emitter();
        let range = e.insert_text("");
        assert!(range.is_empty());
        assert!(e.requests().is_empty());
    }

    #[test]
    fn test_style_beyond_cursor_is_rejected() {
        let mut e = emitter();
        e.insert_text("abc");
        let range = e.range(1, 5);
        let err = e.reset_range(&range).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRange {
                start: 1,
                end: 5,
                cursor: 4
            }
        ));
        assert_eq!(e.requests().len(), 1);
    }

    #[test]
    fn test_style_rejects_empty_range_and_mask() {
        let mut e = emitter();
        e.insert_text("abc");
        assert!(e.reset_range(&e.range(2, 2)).is_err());
        assert!(matches!(
            e.style_range(&e.range(1, 2), TextStyle::default(), FieldMask::new()),
            Err(Error::EmptyFieldMask { .. })
        ));
    }

    #[test]
    fn test_style_rejects_other_segment() {
        let mut e = emitter();
        e.insert_text("abc");
        let foreign = TextRange {
            start: 1,
            end: 2,
            segment: Segment::Resolved("h.1".into()),
        };
        assert!(e.reset_range(&foreign).is_err());
    }

    #[test]
    fn test_adjust_cursor() {
        let mut e = emitter();
        e.insert_text("\t\tA\n");
        e.adjust_cursor(-2).unwrap();
        assert_eq!(e.cursor(), 3);
        assert!(matches!(
            e.adjust_cursor(-3),
            Err(Error::CursorUnderflow { .. })
        ));
        assert_eq!(e.cursor(), 3);
    }

    #[test]
    fn test_insert_text_at_bounds() {
        let mut e = emitter();
        let table = e.insert_table(&TableGeometry::new(1, 1));
        assert_eq!(table.index, 2);
        assert_eq!(e.cursor(), 7);

        let cell = e.insert_text_at(5, "hi").unwrap();
        assert_eq!((cell.start, cell.end), (5, 7));
        assert_eq!(e.cursor(), 9);
        assert!(e.insert_text_at(10, "x").is_err());
        assert!(e.insert_text_at(0, "x").is_err());
    }

    #[test]
    fn test_structural_insertions() {
        let mut e = emitter();
        let image = e.insert_image("https://example.com/a.png", None);
        assert_eq!(image.len(), IMAGE_UNITS);
        let page_break = e.insert_page_break();
        assert_eq!(page_break.start, 2);
        assert_eq!(e.cursor(), 3);
    }

    #[test]
    fn test_table_requests_need_written_table() {
        let mut e = emitter();
        let start = e.location(1);
        assert!(e.column_width(&start, 0, 100.0).is_err());

        let start = e.insert_table(&TableGeometry::new(2, 2));
        e.column_width(&start, 1, 120.0).unwrap();
        assert!(e.requests()[1].is_table_style());
    }

    #[test]
    fn test_finish_returns_requests_and_cursor() {
        let mut e = emitter();
        e.insert_text("x\n");
        let (requests, cursor) = e.finish();
        assert_eq!(requests.len(), 1);
        assert_eq!(cursor, 3);
    }
}
