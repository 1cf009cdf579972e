//! Content block types.

use super::{Alignment, ParagraphFormat, Run, Spacing, TableSpec};
use serde::{Deserialize, Serialize};

/// A content block in the document description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Document title with an optional subtitle line
    Title {
        /// Title text
        text: String,
        /// Subtitle text (byline, date, ...)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },

    /// A heading
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Heading text
        text: String,
    },

    /// A paragraph made of runs
    Paragraph {
        /// Text runs
        runs: Vec<Run>,
        /// Paragraph alignment
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<Alignment>,
        /// Paragraph spacing
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spacing: Option<Spacing>,
    },

    /// A bullet or numbered list
    List {
        /// List kind
        kind: ListKind,
        /// Items in order
        items: Vec<ListItem>,
        /// Numbering style for numbered lists
        #[serde(default, skip_serializing_if = "Option::is_none")]
        numbering_style: Option<NumberingStyle>,
        /// Glyph set for bullet lists
        #[serde(default, skip_serializing_if = "Option::is_none")]
        glyph: Option<BulletGlyph>,
    },

    /// A table
    Table(TableSpec),

    /// A colored box with text
    Callout {
        /// Callout style
        style: CalloutStyle,
        /// Callout text
        text: String,
    },

    /// A monospace code box
    CodeBlock {
        /// Code text
        text: String,
    },

    /// A horizontal rule
    Rule,

    /// A page break
    PageBreak,

    /// An inline image on its own line
    Image(ImageSpec),
}

impl ContentBlock {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        ContentBlock::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a paragraph from runs.
    pub fn paragraph(runs: Vec<Run>) -> Self {
        ContentBlock::Paragraph {
            runs,
            alignment: None,
            spacing: None,
        }
    }

    /// Create a paragraph with plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::paragraph(vec![Run::new(text)])
    }

    /// Create a bullet list with top-level items.
    pub fn bullets<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        ContentBlock::List {
            kind: ListKind::Bullet,
            items: items.into_iter().map(ListItem::new).collect(),
            numbering_style: None,
            glyph: None,
        }
    }

    /// Create a numbered list with top-level items.
    pub fn numbered<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        ContentBlock::List {
            kind: ListKind::Numbered,
            items: items.into_iter().map(ListItem::new).collect(),
            numbering_style: None,
            glyph: None,
        }
    }

    /// Create a list from items with explicit levels.
    pub fn list(kind: ListKind, items: Vec<ListItem>) -> Self {
        ContentBlock::List {
            kind,
            items,
            numbering_style: None,
            glyph: None,
        }
    }

    /// Create a callout block.
    pub fn callout(style: CalloutStyle, text: impl Into<String>) -> Self {
        ContentBlock::Callout {
            style,
            text: text.into(),
        }
    }

    /// Create a code block.
    pub fn code(text: impl Into<String>) -> Self {
        ContentBlock::CodeBlock { text: text.into() }
    }

    /// Create an image block.
    pub fn image(source: impl Into<String>) -> Self {
        ContentBlock::Image(ImageSpec::new(source))
    }

    /// Short kind name used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Title { .. } => "title",
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::List { .. } => "list",
            ContentBlock::Table(_) => "table",
            ContentBlock::Callout { .. } => "callout",
            ContentBlock::CodeBlock { .. } => "code_block",
            ContentBlock::Rule => "rule",
            ContentBlock::PageBreak => "page_break",
            ContentBlock::Image(_) => "image",
        }
    }

    /// Paragraph format of a paragraph block.
    pub fn paragraph_format(&self) -> Option<ParagraphFormat> {
        match self {
            ContentBlock::Paragraph {
                alignment, spacing, ..
            } => Some(ParagraphFormat {
                alignment: *alignment,
                spacing: *spacing,
            }),
            _ => None,
        }
    }
}

/// List kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Bulleted list
    Bullet,
    /// Numbered list
    Numbered,
}

/// A list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text
    pub text: String,

    /// Nesting level (0 = top level)
    #[serde(default)]
    pub level: u8,
}

impl ListItem {
    /// Create a top-level item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: 0,
        }
    }

    /// Create an item at a nesting level.
    pub fn nested(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Numbering style for numbered lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingStyle {
    /// 1. a. i.
    #[default]
    Decimal,
    /// 1) a) i)
    DecimalParens,
    /// 1. 1.1. 1.1.1.
    Nested,
    /// A. a. i.
    UpperAlpha,
    /// I. A. 1.
    UpperRoman,
    /// 01. a. i.
    ZeroDecimal,
    /// 1. 1.1 1.1.1 (legal outline; no protocol preset)
    Legal,
}

/// Glyph set for bullet lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletGlyph {
    /// ● ○ ■
    #[default]
    Disc,
    /// ❖ ➢ ■
    Diamond,
    /// ➔ ◆ ●
    Arrow,
    /// ☐
    Checkbox,
}

/// Callout style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutStyle {
    /// Informational note
    Info,
    /// Warning
    Warning,
    /// Critical issue
    Critical,
    /// Success / positive outcome
    Success,
}

/// An image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSpec {
    /// Publicly addressable image URL
    pub source: String,

    /// Display width in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,

    /// Display height in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,

    /// Paragraph alignment of the image line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl ImageSpec {
    /// Create an image reference.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            width: None,
            height: None,
            alignment: None,
        }
    }

    /// Set display size in points.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set alignment.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }
}
