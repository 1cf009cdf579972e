//! Input model: the structured, markup-free document description.
//!
//! These types are produced by the caller (or deserialized from JSON) and
//! are never mutated by the compiler.

mod block;
mod document;
mod run;
mod table;

pub use block::{
    BulletGlyph, CalloutStyle, ContentBlock, ImageSpec, ListItem, ListKind, NumberingStyle,
};
pub use document::{DocumentSpec, HeaderFooterSpec, Metadata};
pub use run::{Alignment, ParagraphFormat, Run, Spacing, StyleIntent};
pub use table::{TableCellSpec, TableSpec};
