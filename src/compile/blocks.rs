//! Block translators for the text-flow blocks.
//!
//! Every translator writes at the emitter's cursor and leaves the cursor
//! just past what it wrote. A block that ends a paragraph resets that
//! paragraph's run style through its terminator before layering its own
//! overlays, so no style inherited from earlier content leaks forward.

use super::resolver::{
    resolve_paragraph_format, resolve_rule_border, resolve_text_style,
};
use super::{CompileOptions, Emitter, Notice};
use crate::error::{Error, Result};
use crate::model::{
    BulletGlyph, ImageSpec, ListItem, ListKind, NumberingStyle, ParagraphFormat, Run, StyleIntent,
};
use crate::ops::{Dimension, FieldMask, NamedStyleType, ParagraphStyle, Size, TextRange};

/// Deepest nesting level a list item can express.
pub const MAX_LIST_LEVEL: u8 = 8;

/// Write a title line and an optional subtitle line.
pub fn title(out: &mut Emitter, text: &str, subtitle: Option<&str>) -> Result<()> {
    let range = named_line(out, text, NamedStyleType::Title)?;
    reset_terminator(out, &range)?;
    if let Some(subtitle) = subtitle.filter(|s| !s.is_empty()) {
        let range = named_line(out, subtitle, NamedStyleType::Subtitle)?;
        reset_terminator(out, &range)?;
    }
    Ok(())
}

/// Write a heading.
pub fn heading(out: &mut Emitter, options: &CompileOptions, level: u8, text: &str) -> Result<()> {
    let range = named_line(out, text, NamedStyleType::heading(level))?;

    let emphasis = options.heading_style(level);
    let intent = StyleIntent {
        bold: emphasis.bold,
        color: emphasis.color,
        ..Default::default()
    };
    let (style, fields) = resolve_text_style(&intent)?;
    let text_range = range.with_bounds(range.start, range.end - 1);
    if !fields.is_empty() && !text_range.is_empty() {
        out.style_range(&text_range, style, fields)?;
    }
    reset_terminator(out, &range)
}

/// Insert `text\n` and apply a named style to it.
fn named_line(out: &mut Emitter, text: &str, named: NamedStyleType) -> Result<TextRange> {
    let range = out.insert_text(&format!("{}\n", text));
    let style = ParagraphStyle {
        named_style_type: Some(named),
        ..Default::default()
    };
    out.paragraph_style(&range, style, FieldMask::new().with("namedStyleType"))?;
    Ok(range)
}

/// Reset the terminator of a line, leaving its text styled.
fn reset_terminator(out: &mut Emitter, line: &TextRange) -> Result<()> {
    out.reset_range(&line.with_bounds(line.end - 1, line.end))
}

/// Write a paragraph of runs.
///
/// Returns the paragraph's range, terminator included.
pub fn paragraph(out: &mut Emitter, runs: &[Run], format: &ParagraphFormat) -> Result<TextRange> {
    let start = out.cursor();
    let written: Vec<(TextRange, Option<&StyleIntent>)> = runs
        .iter()
        .map(|run| (out.insert_text(&run.text), run.style.as_ref()))
        .collect();
    out.insert_text("\n");
    let whole = out.range(start, out.cursor());

    if !format.is_empty() {
        let (style, fields) = resolve_paragraph_format(format);
        out.paragraph_style(&whole, style, fields)?;
    }

    out.reset_range(&whole)?;

    for (range, intent) in written {
        let Some(intent) = intent else { continue };
        if range.is_empty() {
            continue;
        }
        let (style, fields) = resolve_text_style(intent)?;
        if !fields.is_empty() {
            out.style_range(&range, style, fields)?;
        }
    }
    Ok(whole)
}

/// Write a bullet or numbered list.
///
/// Nesting is conveyed by leading tabs, which the bullet request consumes;
/// the cursor is pulled back by the total tab count afterwards. Returns the
/// number of items written.
#[allow(clippy::too_many_arguments)]
pub fn list(
    out: &mut Emitter,
    options: &CompileOptions,
    kind: ListKind,
    items: &[ListItem],
    numbering: Option<NumberingStyle>,
    glyph: Option<BulletGlyph>,
    block: Option<usize>,
    notices: &mut Vec<Notice>,
) -> Result<usize> {
    if items.is_empty() {
        return Ok(0);
    }
    let preset = bullet_preset(kind, numbering, glyph, options, block, notices)?;

    let start = out.cursor();
    let mut tabs = 0usize;
    for item in items {
        let level = item.level.min(MAX_LIST_LEVEL);
        // Literal leading tabs are consumed by the bullet request too.
        tabs += usize::from(level) + item.text.chars().take_while(|&c| c == '\t').count();
        let mut line = "\t".repeat(usize::from(level));
        line.push_str(&item.text);
        line.push('\n');
        out.insert_text(&line);
    }
    let whole = out.range(start, out.cursor());

    out.reset_range(&whole)?;
    out.create_bullets(&whole, preset)?;
    out.adjust_cursor(-(tabs as isize))?;

    log::debug!(
        "list of {} items at [{}, {}) with preset {}",
        items.len(),
        whole.start,
        whole.end,
        preset
    );
    Ok(items.len())
}

/// Pick the protocol preset for a list.
fn bullet_preset(
    kind: ListKind,
    numbering: Option<NumberingStyle>,
    glyph: Option<BulletGlyph>,
    options: &CompileOptions,
    block: Option<usize>,
    notices: &mut Vec<Notice>,
) -> Result<&'static str> {
    let preset = match kind {
        ListKind::Bullet => match glyph.unwrap_or_default() {
            BulletGlyph::Disc => "BULLET_DISC_CIRCLE_SQUARE",
            BulletGlyph::Diamond => "BULLET_DIAMONDX_ARROW3D_SQUARE",
            BulletGlyph::Arrow => "BULLET_ARROW_DIAMOND_DISC",
            BulletGlyph::Checkbox => "BULLET_CHECKBOX",
        },
        ListKind::Numbered => match numbering.unwrap_or_default() {
            NumberingStyle::Decimal => "NUMBERED_DECIMAL_ALPHA_ROMAN",
            NumberingStyle::DecimalParens => "NUMBERED_DECIMAL_ALPHA_ROMAN_PARENS",
            NumberingStyle::Nested => "NUMBERED_DECIMAL_NESTED",
            NumberingStyle::UpperAlpha => "NUMBERED_UPPERALPHA_ALPHA_ROMAN",
            NumberingStyle::UpperRoman => "NUMBERED_UPPERROMAN_UPPERALPHA_DECIMAL",
            NumberingStyle::ZeroDecimal => "NUMBERED_ZERODECIMAL_ALPHA_ROMAN",
            NumberingStyle::Legal => {
                if options.strict_features {
                    return Err(Error::UnsupportedFeature(
                        "legal list numbering".to_string(),
                    ));
                }
                log::warn!("legal numbering has no preset, using decimal");
                notices.push(Notice::new(
                    block,
                    "legal numbering rendered as decimal numbering",
                ));
                "NUMBERED_DECIMAL_ALPHA_ROMAN"
            }
        },
    };
    Ok(preset)
}

/// Draw a horizontal rule as a bottom border on the preceding paragraph.
///
/// With `needs_paragraph` set (document start, or right after a table or a
/// break) an empty paragraph is written first to carry the border.
pub fn rule(out: &mut Emitter, options: &CompileOptions, needs_paragraph: bool) -> Result<()> {
    if needs_paragraph || out.is_pristine() {
        let empty = out.insert_text("\n");
        out.reset_range(&empty)?;
    }
    let cursor = out.cursor();
    let (style, fields) = resolve_rule_border(&options.rule_color)?;
    out.paragraph_style(&out.range(cursor - 1, cursor), style, fields)
}

/// Insert a page break.
pub fn page_break(out: &mut Emitter) -> TextRange {
    out.insert_page_break()
}

/// Insert an inline image.
///
/// The image occupies one unit and no terminator; it shares the paragraph
/// that the next block's text closes. Alignment styles that one unit.
pub fn image(out: &mut Emitter, spec: &ImageSpec) -> Result<TextRange> {
    let size = if spec.width.is_some() || spec.height.is_some() {
        Some(Size {
            width: spec.width.map(Dimension::pt),
            height: spec.height.map(Dimension::pt),
        })
    } else {
        None
    };

    let image = out.insert_image(&spec.source, size);
    if spec.alignment.is_some() {
        let format = ParagraphFormat {
            alignment: spec.alignment,
            spacing: None,
        };
        let (style, fields) = resolve_paragraph_format(&format);
        out.paragraph_style(&image, style, fields)?;
    }
    Ok(image)
}
