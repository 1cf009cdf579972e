//! Protocol style objects and field masks.
//!
//! These mirror the remote document protocol's JSON shapes. Every field is
//! optional: a style object only carries what its field mask names.

use crate::model::Alignment;
use serde::{Serialize, Serializer};
use std::fmt;

/// Explicit list of style properties a style request may modify.
///
/// Properties outside the mask are left untouched remotely. Serialized as the
/// protocol's comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask(Vec<&'static str>);

impl FieldMask {
    /// Create an empty mask.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a field name (ignored if already present).
    pub fn push(&mut self, field: &'static str) {
        if !self.0.contains(&field) {
            self.0.push(field);
        }
    }

    /// Add a field name and return self.
    pub fn with(mut self, field: &'static str) -> Self {
        self.push(field);
        self
    }

    /// Field names in order.
    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }

    /// Check if a field is named.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| *f == field)
    }

    /// Check if no field is named.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of named fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl Serialize for FieldMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColor {
    /// Red channel
    pub red: f32,
    /// Green channel
    pub green: f32,
    /// Blue channel
    pub blue: f32,
}

impl RgbColor {
    /// Build from 8-bit channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: f32::from(red) / 255.0,
            green: f32::from(green) / 255.0,
            blue: f32::from(blue) / 255.0,
        }
    }
}

/// A color that may be transparent.
///
/// Serializes as `{"color": {"rgbColor": {...}}}`, or `{}` for transparent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptionalColor(pub Option<RgbColor>);

impl OptionalColor {
    /// A solid color.
    pub fn solid(color: RgbColor) -> Self {
        Self(Some(color))
    }

    /// Transparent (no color).
    pub fn transparent() -> Self {
        Self(None)
    }
}

impl Serialize for OptionalColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Rgb<'a> {
            rgb_color: &'a RgbColor,
        }

        #[derive(Serialize)]
        struct Repr<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            color: Option<Rgb<'a>>,
        }

        Repr {
            color: self.0.as_ref().map(|rgb_color| Rgb { rgb_color }),
        }
        .serialize(serializer)
    }
}

/// Unit of a [`Dimension`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Unit {
    /// Points
    #[default]
    #[serde(rename = "PT")]
    Pt,
}

/// A magnitude with a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimension {
    /// Magnitude
    pub magnitude: f32,
    /// Unit
    pub unit: Unit,
}

impl Dimension {
    /// A dimension in points.
    pub fn pt(magnitude: f32) -> Self {
        Self {
            magnitude,
            unit: Unit::Pt,
        }
    }
}

/// Font family with weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    /// Family name
    pub font_family: String,
    /// Weight (400 = normal)
    pub weight: u16,
}

/// Hyperlink target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    /// URL
    pub url: String,
}

/// Run-level style object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
}

/// Named paragraph style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NamedStyleType {
    #[serde(rename = "NORMAL_TEXT")]
    NormalText,
    #[serde(rename = "TITLE")]
    Title,
    #[serde(rename = "SUBTITLE")]
    Subtitle,
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
    #[serde(rename = "HEADING_3")]
    Heading3,
    #[serde(rename = "HEADING_4")]
    Heading4,
    #[serde(rename = "HEADING_5")]
    Heading5,
    #[serde(rename = "HEADING_6")]
    Heading6,
}

impl NamedStyleType {
    /// Heading style for a level; levels outside 1-6 are clamped.
    pub fn heading(level: u8) -> Self {
        match level.clamp(1, 6) {
            1 => NamedStyleType::Heading1,
            2 => NamedStyleType::Heading2,
            3 => NamedStyleType::Heading3,
            4 => NamedStyleType::Heading4,
            5 => NamedStyleType::Heading5,
            _ => NamedStyleType::Heading6,
        }
    }
}

/// Paragraph alignment as the protocol spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParagraphAlignment {
    Start,
    Center,
    End,
    Justified,
}

impl From<Alignment> for ParagraphAlignment {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Start => ParagraphAlignment::Start,
            Alignment::Center => ParagraphAlignment::Center,
            Alignment::End => ParagraphAlignment::End,
            Alignment::Justified => ParagraphAlignment::Justified,
        }
    }
}

/// Border dash style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashStyle {
    #[default]
    Solid,
    Dot,
    Dash,
}

/// Border drawn on one side of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphBorder {
    pub color: OptionalColor,
    pub width: Dimension,
    pub padding: Dimension,
    pub dash_style: DashStyle,
}

/// Paragraph-level style object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<NamedStyleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<ParagraphAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_above: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,
    /// Percentage, 100 = single spacing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<ParagraphBorder>,
}

/// Border drawn on one side of a table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellBorder {
    pub color: OptionalColor,
    pub width: Dimension,
    pub dash_style: DashStyle,
}

/// Table-cell style object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<TableCellBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<TableCellBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<TableCellBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<TableCellBorder>,
}

/// How a column's width is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidthType {
    EvenlyDistributed,
    FixedWidth,
}

/// Table column properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnProperties {
    pub width_type: WidthType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
}
