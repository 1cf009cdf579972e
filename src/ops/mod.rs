//! Output model: primitive edit requests in the remote protocol's shape.
//!
//! Offsets are absolute positions in one growing buffer per segment,
//! measured in UTF-16 code units.

mod json;
mod request;
mod style;

pub use json::{to_json, JsonFormat};
pub use request::{
    CreateFooter, CreateHeader, CreateParagraphBullets, HeaderFooterType, InsertInlineImage,
    InsertPageBreak, InsertTable, InsertText, Location, Request, Segment, SegmentKind, Size,
    TableCellLocation, TableRange, TextRange, UpdateParagraphStyle, UpdateTableCellStyle,
    UpdateTableColumnProperties, UpdateTextStyle,
};
pub use style::{
    DashStyle, Dimension, FieldMask, Link, NamedStyleType, OptionalColor,
    ParagraphAlignment, ParagraphBorder, ParagraphStyle, RgbColor, TableCellBorder, TableCellStyle,
    TableColumnProperties, TextStyle, Unit, WeightedFontFamily, WidthType,
};

/// Length of a string in remote offset units (UTF-16 code units).
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_len_counts_utf16_units() {
        assert_eq!(text_len("abc"), 3);
        assert_eq!(text_len("é"), 1);
        assert_eq!(text_len("😀"), 2);
        assert_eq!(text_len(""), 0);
    }
}
