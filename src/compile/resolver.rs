//! Style resolution: declarative intents to protocol style objects and masks.
//!
//! Every function here is pure. A resolved style only carries the fields the
//! caller asked for and its mask names exactly those fields, in a fixed
//! order, so resolving the same intent twice yields identical output.

use std::sync::OnceLock;

use regex::Regex;

use super::CompileOptions;
use crate::error::{Error, Result};
use crate::model::{ParagraphFormat, StyleIntent};
use crate::ops::{
    DashStyle, Dimension, FieldMask, Link, OptionalColor, ParagraphAlignment, ParagraphBorder,
    ParagraphStyle, RgbColor, TableCellBorder, TableCellStyle, TextStyle, WeightedFontFamily,
};

/// Weight used for every font family request; bold is a separate field.
const NORMAL_WEIGHT: u16 = 400;

fn hex_color_regex() -> &'static Regex {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#?([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$").unwrap()
    })
}

/// Parse a `#RRGGBB` (or `RRGGBB`) color into `[0, 1]` channels.
///
/// Anything other than exactly six hex digits is rejected; nothing is clamped.
pub fn parse_hex_color(input: &str) -> Result<RgbColor> {
    let caps = hex_color_regex()
        .captures(input)
        .ok_or_else(|| Error::InvalidColor(input.to_string()))?;

    let channel = |i: usize| {
        u8::from_str_radix(&caps[i], 16).map_err(|_| Error::InvalidColor(input.to_string()))
    };
    Ok(RgbColor::from_rgb8(channel(1)?, channel(2)?, channel(3)?))
}

/// Resolve a run style intent.
///
/// The returned mask is empty when the intent requests nothing.
pub fn resolve_text_style(intent: &StyleIntent) -> Result<(TextStyle, FieldMask)> {
    let mut style = TextStyle::default();
    let mut mask = FieldMask::new();

    if let Some(bold) = intent.bold {
        style.bold = Some(bold);
        mask.push("bold");
    }
    if let Some(italic) = intent.italic {
        style.italic = Some(italic);
        mask.push("italic");
    }
    if let Some(underline) = intent.underline {
        style.underline = Some(underline);
        mask.push("underline");
    }
    if let Some(strikethrough) = intent.strikethrough {
        style.strikethrough = Some(strikethrough);
        mask.push("strikethrough");
    }
    if let Some(ref color) = intent.color {
        style.foreground_color = Some(OptionalColor::solid(parse_hex_color(color)?));
        mask.push("foregroundColor");
    }
    if let Some(ref background) = intent.background {
        style.background_color = Some(OptionalColor::solid(parse_hex_color(background)?));
        mask.push("backgroundColor");
    }
    if let Some(ref url) = intent.link {
        style.link = Some(Link { url: url.clone() });
        mask.push("link");
    }
    if let Some(ref font) = intent.font {
        style.weighted_font_family = Some(WeightedFontFamily {
            font_family: font.clone(),
            weight: NORMAL_WEIGHT,
        });
        mask.push("weightedFontFamily");
    }
    if let Some(size) = intent.size {
        style.font_size = Some(Dimension::pt(size));
        mask.push("fontSize");
    }

    Ok((style, mask))
}

/// Resolve paragraph alignment and spacing.
pub fn resolve_paragraph_format(format: &ParagraphFormat) -> (ParagraphStyle, FieldMask) {
    let mut style = ParagraphStyle::default();
    let mut mask = FieldMask::new();

    if let Some(alignment) = format.alignment {
        style.alignment = Some(ParagraphAlignment::from(alignment));
        mask.push("alignment");
    }
    if let Some(spacing) = format.spacing {
        if let Some(before) = spacing.before {
            style.space_above = Some(Dimension::pt(before));
            mask.push("spaceAbove");
        }
        if let Some(after) = spacing.after {
            style.space_below = Some(Dimension::pt(after));
            mask.push("spaceBelow");
        }
        if let Some(line) = spacing.line {
            style.line_spacing = Some(line * 100.0);
            mask.push("lineSpacing");
        }
    }

    (style, mask)
}

/// The explicit neutral run style written by every reset.
///
/// The protocol has no "unset", so each property is spelled out: not bold,
/// not italic, no underline or strikethrough, body color, transparent
/// highlight, body font family and size.
pub fn neutral_text_style(options: &CompileOptions) -> Result<(TextStyle, FieldMask)> {
    let style = TextStyle {
        bold: Some(false),
        italic: Some(false),
        underline: Some(false),
        strikethrough: Some(false),
        foreground_color: Some(OptionalColor::solid(parse_hex_color(
            &options.default_text_color,
        )?)),
        background_color: Some(OptionalColor::transparent()),
        link: None,
        weighted_font_family: Some(WeightedFontFamily {
            font_family: options.default_font.clone(),
            weight: NORMAL_WEIGHT,
        }),
        font_size: Some(Dimension::pt(options.default_font_size)),
    };
    let mask = FieldMask::new()
        .with("bold")
        .with("italic")
        .with("underline")
        .with("strikethrough")
        .with("foregroundColor")
        .with("backgroundColor")
        .with("weightedFontFamily")
        .with("fontSize");

    Ok((style, mask))
}

/// Cell style setting only the background.
pub fn resolve_cell_background(hex: &str) -> Result<(TableCellStyle, FieldMask)> {
    let style = TableCellStyle {
        background_color: Some(OptionalColor::solid(parse_hex_color(hex)?)),
        ..Default::default()
    };
    Ok((style, FieldMask::new().with("backgroundColor")))
}

/// Cell style drawing the same solid border on all four sides.
pub fn resolve_cell_borders(hex: &str, width: f32) -> Result<(TableCellStyle, FieldMask)> {
    let border = TableCellBorder {
        color: OptionalColor::solid(parse_hex_color(hex)?),
        width: Dimension::pt(width),
        dash_style: DashStyle::Solid,
    };
    let style = TableCellStyle {
        border_left: Some(border.clone()),
        border_right: Some(border.clone()),
        border_top: Some(border.clone()),
        border_bottom: Some(border),
        ..Default::default()
    };
    let mask = FieldMask::new()
        .with("borderLeft")
        .with("borderRight")
        .with("borderTop")
        .with("borderBottom");
    Ok((style, mask))
}

/// Paragraph style drawing a bottom border, used to simulate a rule.
pub fn resolve_rule_border(hex: &str) -> Result<(ParagraphStyle, FieldMask)> {
    let style = ParagraphStyle {
        border_bottom: Some(ParagraphBorder {
            color: OptionalColor::solid(parse_hex_color(hex)?),
            width: Dimension::pt(1.0),
            padding: Dimension::pt(4.0),
            dash_style: DashStyle::Solid,
        }),
        ..Default::default()
    };
    Ok((style, FieldMask::new().with("borderBottom")))
}

/// Merge two cell styles; fields set in `overlay` win.
pub(crate) fn merge_cell_styles(
    (base, base_mask): (TableCellStyle, FieldMask),
    (overlay, overlay_mask): (TableCellStyle, FieldMask),
) -> (TableCellStyle, FieldMask) {
    let style = TableCellStyle {
        background_color: overlay.background_color.or(base.background_color),
        border_left: overlay.border_left.or(base.border_left),
        border_right: overlay.border_right.or(base.border_right),
        border_top: overlay.border_top.or(base.border_top),
        border_bottom: overlay.border_bottom.or(base.border_bottom),
    };
    let mut mask = base_mask;
    for field in overlay_mask.fields() {
        mask.push(field);
    }
    (style, mask)
}
