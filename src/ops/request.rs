//! Edit requests addressed by absolute offset.

use super::{
    Dimension, FieldMask, ParagraphStyle, TableCellStyle, TableColumnProperties, TextStyle,
};
use serde::{Serialize, Serializer};
use std::fmt;

/// Kind of a segment that is created on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Page header
    Header,
    /// Page footer
    Footer,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Header => f.write_str("header"),
            SegmentKind::Footer => f.write_str("footer"),
        }
    }
}

/// The buffer a request addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Segment {
    /// The document body
    #[default]
    Body,
    /// A header/footer whose identifier is not known yet
    Pending(SegmentKind),
    /// A header/footer with a server-assigned identifier
    Resolved(String),
}

impl Segment {
    /// Check if this is the body segment.
    pub fn is_body(&self) -> bool {
        matches!(self, Segment::Body)
    }

    /// Check if this segment still waits for an identifier.
    pub fn is_pending(&self) -> bool {
        matches!(self, Segment::Pending(_))
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Segment::Body => serializer.serialize_str(""),
            Segment::Pending(kind) => serializer.serialize_str(&format!("pending:{}", kind)),
            Segment::Resolved(id) => serializer.serialize_str(id),
        }
    }
}

/// A single offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Absolute offset
    pub index: usize,
    /// Target segment
    #[serde(rename = "segmentId", skip_serializing_if = "Segment::is_body")]
    pub segment: Segment,
}

impl Location {
    /// A location in the body.
    pub fn body(index: usize) -> Self {
        Self {
            index,
            segment: Segment::Body,
        }
    }
}

/// A half-open offset range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRange {
    /// First offset
    #[serde(rename = "startIndex")]
    pub start: usize,
    /// One past the last offset
    #[serde(rename = "endIndex")]
    pub end: usize,
    /// Target segment
    #[serde(rename = "segmentId", skip_serializing_if = "Segment::is_body")]
    pub segment: Segment,
}

impl TextRange {
    /// A range in the body.
    pub fn body(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            segment: Segment::Body,
        }
    }

    /// Length in offset units.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Same segment, different bounds.
    pub fn with_bounds(&self, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            segment: self.segment.clone(),
        }
    }
}

/// Insert text at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertText {
    pub location: Location,
    pub text: String,
}

/// Update paragraph style over a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyle {
    pub range: TextRange,
    pub paragraph_style: ParagraphStyle,
    pub fields: FieldMask,
}

/// Update run style over a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    pub range: TextRange,
    pub text_style: TextStyle,
    pub fields: FieldMask,
}

/// Turn the paragraphs in a range into list items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBullets {
    pub range: TextRange,
    pub bullet_preset: &'static str,
}

/// Insert an empty table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertTable {
    pub location: Location,
    pub rows: usize,
    pub columns: usize,
}

/// Cell address inside a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub table_start_location: Location,
    pub row_index: usize,
    pub column_index: usize,
}

/// Rectangular block of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRange {
    pub table_cell_location: TableCellLocation,
    pub row_span: usize,
    pub column_span: usize,
}

/// Update style of a block of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableCellStyle {
    pub table_range: TableRange,
    pub table_cell_style: TableCellStyle,
    pub fields: FieldMask,
}

/// Update column widths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableColumnProperties {
    pub table_start_location: Location,
    pub column_indices: Vec<usize>,
    pub table_column_properties: TableColumnProperties,
    pub fields: FieldMask,
}

/// Which pages a header/footer applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderFooterType {
    #[default]
    Default,
}

/// Create a header segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateHeader {
    #[serde(rename = "type")]
    pub kind: HeaderFooterType,
}

/// Create a footer segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateFooter {
    #[serde(rename = "type")]
    pub kind: HeaderFooterType,
}

/// Display size of an inline object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Size {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

/// Insert an image by URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertInlineImage {
    pub location: Location,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_size: Option<Size>,
}

/// Insert a page break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertPageBreak {
    pub location: Location,
}

/// One primitive edit request.
///
/// Requests are positional snapshots: their offsets are valid only when
/// every request before them has been applied in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    InsertText(InsertText),
    UpdateParagraphStyle(UpdateParagraphStyle),
    UpdateTextStyle(UpdateTextStyle),
    CreateParagraphBullets(CreateParagraphBullets),
    InsertTable(InsertTable),
    UpdateTableCellStyle(UpdateTableCellStyle),
    UpdateTableColumnProperties(UpdateTableColumnProperties),
    CreateHeader(CreateHeader),
    CreateFooter(CreateFooter),
    InsertInlineImage(InsertInlineImage),
    InsertPageBreak(InsertPageBreak),
}

impl Request {
    /// Protocol name of the request.
    pub fn name(&self) -> &'static str {
        match self {
            Request::InsertText(_) => "insertText",
            Request::UpdateParagraphStyle(_) => "updateParagraphStyle",
            Request::UpdateTextStyle(_) => "updateTextStyle",
            Request::CreateParagraphBullets(_) => "createParagraphBullets",
            Request::InsertTable(_) => "insertTable",
            Request::UpdateTableCellStyle(_) => "updateTableCellStyle",
            Request::UpdateTableColumnProperties(_) => "updateTableColumnProperties",
            Request::CreateHeader(_) => "createHeader",
            Request::CreateFooter(_) => "createFooter",
            Request::InsertInlineImage(_) => "insertInlineImage",
            Request::InsertPageBreak(_) => "insertPageBreak",
        }
    }

    /// Check if this request styles an existing table structure.
    ///
    /// These can only resolve once the table exists remotely.
    pub fn is_table_style(&self) -> bool {
        matches!(
            self,
            Request::UpdateTableCellStyle(_) | Request::UpdateTableColumnProperties(_)
        )
    }

    /// The offset range a style or bullet request targets.
    pub fn target_range(&self) -> Option<&TextRange> {
        match self {
            Request::UpdateParagraphStyle(r) => Some(&r.range),
            Request::UpdateTextStyle(r) => Some(&r.range),
            Request::CreateParagraphBullets(r) => Some(&r.range),
            _ => None,
        }
    }

    /// The insertion point of an insertion request.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Request::InsertText(r) => Some(&r.location),
            Request::InsertTable(r) => Some(&r.location),
            Request::InsertInlineImage(r) => Some(&r.location),
            Request::InsertPageBreak(r) => Some(&r.location),
            _ => None,
        }
    }

    /// The segment this request addresses (creation requests address none).
    pub fn segment(&self) -> Option<&Segment> {
        match self {
            Request::UpdateTableCellStyle(r) => {
                Some(&r.table_range.table_cell_location.table_start_location.segment)
            }
            Request::UpdateTableColumnProperties(r) => Some(&r.table_start_location.segment),
            Request::CreateHeader(_) | Request::CreateFooter(_) => None,
            _ => self
                .location()
                .map(|l| &l.segment)
                .or_else(|| self.target_range().map(|r| &r.segment)),
        }
    }

    /// Mutable access to the segment this request addresses.
    pub fn segment_mut(&mut self) -> Option<&mut Segment> {
        match self {
            Request::InsertText(r) => Some(&mut r.location.segment),
            Request::UpdateParagraphStyle(r) => Some(&mut r.range.segment),
            Request::UpdateTextStyle(r) => Some(&mut r.range.segment),
            Request::CreateParagraphBullets(r) => Some(&mut r.range.segment),
            Request::InsertTable(r) => Some(&mut r.location.segment),
            Request::UpdateTableCellStyle(r) => {
                Some(&mut r.table_range.table_cell_location.table_start_location.segment)
            }
            Request::UpdateTableColumnProperties(r) => Some(&mut r.table_start_location.segment),
            Request::InsertInlineImage(r) => Some(&mut r.location.segment),
            Request::InsertPageBreak(r) => Some(&mut r.location.segment),
            Request::CreateHeader(_) | Request::CreateFooter(_) => None,
        }
    }

    /// Check if this request still addresses a pending segment.
    pub fn is_pending(&self) -> bool {
        self.segment().is_some_and(Segment::is_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_text_json_shape() {
        let request = Request::InsertText(InsertText {
            location: Location::body(1),
            text: "Hello\n".to_string(),
        });
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"insertText":{"location":{"index":1},"text":"Hello\n"}}"#
        );
    }

    #[test]
    fn test_segment_serialization() {
        let request = Request::InsertText(InsertText {
            location: Location {
                index: 0,
                segment: Segment::Resolved("kix.abc".to_string()),
            },
            text: "x".to_string(),
        });
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""segmentId":"kix.abc""#));

        let pending = Segment::Pending(SegmentKind::Footer);
        assert_eq!(
            serde_json::to_string(&pending).unwrap(),
            "\"pending:footer\""
        );
    }

    #[test]
    fn test_create_header_shape() {
        let request = Request::CreateHeader(CreateHeader::default());
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"createHeader":{"type":"DEFAULT"}}"#
        );
        assert!(request.segment().is_none());
    }

    #[test]
    fn test_segment_mut_rewrites() {
        let mut request = Request::UpdateTextStyle(UpdateTextStyle {
            range: TextRange {
                start: 0,
                end: 4,
                segment: Segment::Pending(SegmentKind::Header),
            },
            text_style: TextStyle::default(),
            fields: FieldMask::new().with("bold"),
        });
        assert!(request.is_pending());
        if let Some(segment) = request.segment_mut() {
            *segment = Segment::Resolved("h.1".to_string());
        }
        assert!(!request.is_pending());
        assert_eq!(
            request.segment(),
            Some(&Segment::Resolved("h.1".to_string()))
        );
    }

    #[test]
    fn test_text_range() {
        let range = TextRange::body(3, 8);
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());
        assert!(TextRange::body(4, 4).is_empty());
    }
}
