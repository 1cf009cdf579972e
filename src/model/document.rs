//! Document-level types.

use super::{Alignment, ContentBlock, Run};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete document description: title, blocks and page furniture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSpec {
    /// Document title
    #[serde(default)]
    pub title: String,

    /// Identity strings for the title block
    #[serde(default)]
    pub metadata: Metadata,

    /// Body content in order
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,

    /// Page header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderFooterSpec>,

    /// Page footer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<HeaderFooterSpec>,
}

impl DocumentSpec {
    /// Create an empty document with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Parse a document description from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON document description from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add a block.
    pub fn add_block(&mut self, block: ContentBlock) {
        self.blocks.push(block);
    }

    /// Add a block and return self.
    pub fn with_block(mut self, block: ContentBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Set the page header.
    pub fn with_header(mut self, header: HeaderFooterSpec) -> Self {
        self.header = Some(header);
        self
    }

    /// Set the page footer.
    pub fn with_footer(mut self, footer: HeaderFooterSpec) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Check if the document has no body blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Identity strings used by the title block. Opaque to the compiler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Organization name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Document date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Metadata {
    /// Build the subtitle line: organization, author and date joined by " | ".
    ///
    /// Returns `None` when no identity string is set.
    pub fn byline(&self, date_format: &str) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(ref organization) = self.organization {
            parts.push(organization.clone());
        }
        if let Some(ref author) = self.author {
            parts.push(author.clone());
        }
        if let Some(date) = self.date {
            parts.push(date.format(date_format).to_string());
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// Page header or footer content.
///
/// Headers and footers live in their own segments, which only exist after a
/// creation request has been applied remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderFooterSpec {
    /// Text runs
    #[serde(default)]
    pub runs: Vec<Run>,

    /// Paragraph alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// Request page numbers after the text
    #[serde(default)]
    pub page_numbers: bool,
}

impl HeaderFooterSpec {
    /// Create a header/footer with plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::new(text)],
            ..Default::default()
        }
    }

    /// Set alignment.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Request page numbers.
    pub fn with_page_numbers(mut self) -> Self {
        self.page_numbers = true;
        self
    }
}
