//! Runs and declarative style intents.

use serde::{Deserialize, Serialize};

/// A run of text with an optional style intent.
///
/// Runs inside one paragraph concatenate with no implicit separator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// The text content, inserted verbatim
    pub text: String,

    /// Requested styling; `None` leaves the run at the neutral base
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleIntent>,
}

impl Run {
    /// Create an unstyled run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Create a run with a style intent.
    pub fn styled(text: impl Into<String>, style: StyleIntent) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, StyleIntent::new().bold())
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, StyleIntent::new().italic())
    }

    /// Create a hyperlink run.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::styled(text, StyleIntent::new().with_link(url))
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Declarative text style request.
///
/// Every field is optional. Only the fields that are set end up in the
/// emitted style request and its field mask.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleIntent {
    /// Bold text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Italic text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    /// Underlined text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    /// Strikethrough text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    /// Text color (hex, e.g. "#FF0000")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Highlight color (hex)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Hyperlink target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Font family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
}

impl StyleIntent {
    /// Create an empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request bold.
    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    /// Request italic.
    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    /// Request underline.
    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    /// Request strikethrough.
    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = Some(true);
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    /// Set the highlight color.
    pub fn with_background(mut self, hex: impl Into<String>) -> Self {
        self.background = Some(hex.into());
        self
    }

    /// Set a hyperlink.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Set the font family.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the font size in points.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Check if nothing is requested.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Start alignment (default)
    #[default]
    #[serde(alias = "left")]
    Start,
    /// Center alignment
    Center,
    /// End alignment
    #[serde(alias = "right")]
    End,
    /// Justified alignment
    #[serde(alias = "justify")]
    Justified,
}

/// Paragraph spacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Space before the paragraph in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<f32>,

    /// Space after the paragraph in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<f32>,

    /// Line spacing multiplier (1.0 = single, 2.0 = double)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<f32>,
}

/// Paragraph-level formatting request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFormat {
    /// Text alignment
    pub alignment: Option<Alignment>,

    /// Spacing
    pub spacing: Option<Spacing>,
}

impl ParagraphFormat {
    /// Check if nothing is requested.
    pub fn is_empty(&self) -> bool {
        self.alignment.is_none() && self.spacing.map_or(true, |s| s == Spacing::default())
    }
}
