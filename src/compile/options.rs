//! Compile options and configuration.

use super::CellOrder;
use crate::model::CalloutStyle;

/// Options that control how blocks are translated into requests.
///
/// Colors are hex strings and are validated when first used, so a bad
/// palette entry surfaces as [`crate::Error::InvalidColor`] at compile time.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Body font family
    pub default_font: String,

    /// Body font size in points
    pub default_font_size: f32,

    /// Body text color
    pub default_text_color: String,

    /// Heading emphasis per level (index 0 = level 1)
    pub headings: Vec<HeadingStyle>,

    /// Monospace font for code blocks
    pub code_font: String,

    /// Code block font size in points
    pub code_font_size: f32,

    /// Code block background
    pub code_background: String,

    /// Table border color
    pub border_color: String,

    /// Table border width in points
    pub border_width: f32,

    /// Header row background
    pub header_background: String,

    /// Bold header row text
    pub header_bold: bool,

    /// Color of horizontal rules
    pub rule_color: String,

    /// Order in which table cell contents are inserted
    pub cell_order: CellOrder,

    /// Emit a title block (title + byline) before the body
    pub title_block: bool,

    /// chrono format string for the byline date
    pub date_format: String,

    /// Text shown where a page number was requested
    pub page_number_placeholder: String,

    /// Fail with `UnsupportedFeature` instead of downgrading
    pub strict_features: bool,
}

impl CompileOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body font.
    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.default_font = family.into();
        self.default_font_size = size;
        self
    }

    /// Set the same heading emphasis for every level.
    pub fn with_heading_style(mut self, style: HeadingStyle) -> Self {
        self.headings = vec![style; 6];
        self
    }

    /// Set the table header row background.
    pub fn with_header_background(mut self, hex: impl Into<String>) -> Self {
        self.header_background = hex.into();
        self
    }

    /// Set the table border color and width.
    pub fn with_borders(mut self, hex: impl Into<String>, width: f32) -> Self {
        self.border_color = hex.into();
        self.border_width = width;
        self
    }

    /// Set the cell insertion order.
    pub fn with_cell_order(mut self, order: CellOrder) -> Self {
        self.cell_order = order;
        self
    }

    /// Enable or disable the title block.
    pub fn with_title_block(mut self, enabled: bool) -> Self {
        self.title_block = enabled;
        self
    }

    /// Set the byline date format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Fail on unsupported features instead of downgrading them.
    pub fn strict(mut self) -> Self {
        self.strict_features = true;
        self
    }

    /// Heading emphasis for a level (clamped to 1-6).
    pub fn heading_style(&self, level: u8) -> HeadingStyle {
        let index = usize::from(level.clamp(1, 6)) - 1;
        self.headings.get(index).cloned().unwrap_or_default()
    }

    /// Colors for a callout style.
    pub fn callout_colors(&self, style: CalloutStyle) -> CalloutColors {
        let (background, border, text) = match style {
            CalloutStyle::Info => ("#E8F0FE", "#1A73E8", "#174EA6"),
            CalloutStyle::Warning => ("#FEF7E0", "#F9AB00", "#8D5B00"),
            CalloutStyle::Critical => ("#FCE8E6", "#D93025", "#A50E0E"),
            CalloutStyle::Success => ("#E6F4EA", "#1E8E3E", "#0D652D"),
        };
        CalloutColors {
            background: background.to_string(),
            border: border.to_string(),
            text: Some(text.to_string()),
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            default_font: "Arial".to_string(),
            default_font_size: 11.0,
            default_text_color: "#000000".to_string(),
            headings: vec![HeadingStyle::default(); 6],
            code_font: "Courier New".to_string(),
            code_font_size: 10.0,
            code_background: "#F1F3F4".to_string(),
            border_color: "#BDBDBD".to_string(),
            border_width: 1.0,
            header_background: "#E8EAED".to_string(),
            header_bold: true,
            rule_color: "#BDBDBD".to_string(),
            cell_order: CellOrder::default(),
            title_block: true,
            date_format: "%B %-d, %Y".to_string(),
            page_number_placeholder: "Page #".to_string(),
            strict_features: false,
        }
    }
}

/// Emphasis layered on heading text (the terminator is never styled).
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingStyle {
    /// Heading text color
    pub color: Option<String>,

    /// Force bold on or off
    pub bold: Option<bool>,
}

impl Default for HeadingStyle {
    fn default() -> Self {
        Self {
            color: Some("#1F3864".to_string()),
            bold: None,
        }
    }
}

/// Colors used to draw a callout box.
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutColors {
    /// Box background
    pub background: String,
    /// Box border
    pub border: String,
    /// Text color
    pub text: Option<String>,
}
