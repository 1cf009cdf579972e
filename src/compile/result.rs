//! Compile output with statistics and notices.

use crate::ops::Request;
use crate::phase::{BatchPlan, DeferredIntent};
use serde::{Deserialize, Serialize};

/// Everything one document build produced.
#[derive(Debug, Clone)]
pub struct CompiledDocument {
    /// Document title (for the transport's document creation call)
    pub title: String,

    /// Body requests in emission order
    pub requests: Vec<Request>,

    /// Header/footer content waiting for segment identifiers
    pub deferred: Vec<DeferredIntent>,

    /// Body cursor after the last block
    pub final_cursor: usize,

    /// Per-kind counters
    pub stats: CompileStats,

    /// Downgrades applied during the build
    pub notices: Vec<Notice>,
}

impl CompiledDocument {
    /// Number of body requests.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Check if any header/footer is waiting on a creation round trip.
    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Split into dependency-ordered batches.
    pub fn into_plan(self) -> BatchPlan {
        BatchPlan::new(self.requests, self.deferred)
    }
}

/// A feature that was downgraded instead of failing the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Index of the block, `None` for page furniture
    pub block: Option<usize>,

    /// What was downgraded and how
    pub message: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(block: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            block,
            message: message.into(),
        }
    }
}

/// Statistics collected during compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileStats {
    /// Headings (title block included)
    pub heading_count: u32,

    /// Paragraphs
    pub paragraph_count: u32,

    /// Lists
    pub list_count: u32,

    /// List items across all lists
    pub list_item_count: u32,

    /// Tables (callouts and code blocks excluded)
    pub table_count: u32,

    /// Callouts
    pub callout_count: u32,

    /// Code blocks
    pub code_block_count: u32,

    /// Images
    pub image_count: u32,

    /// Horizontal rules
    pub rule_count: u32,

    /// Page breaks
    pub page_break_count: u32,

    /// Body requests emitted
    pub request_count: u32,
}

impl CompileStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks counted.
    pub fn block_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.list_count
            + self.table_count
            + self.callout_count
            + self.code_block_count
            + self.image_count
            + self.rule_count
            + self.page_break_count
    }
}
