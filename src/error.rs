//! Error types for docforge.

use std::io;
use thiserror::Error;

use crate::phase::Phase;

/// Result type alias for docforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while compiling or submitting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a document description.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document description or a transport reply is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A color was not exactly six hex digits.
    #[error("Invalid color {0:?}: expected six hex digits like \"#1A73E8\"")]
    InvalidColor(String),

    /// A styling or insertion range reaches outside the written content.
    #[error("Invalid range [{start}, {end}) with cursor at {cursor}")]
    InvalidRange {
        /// Range start offset
        start: usize,
        /// Range end offset (exclusive)
        end: usize,
        /// Cursor position when the range was rejected
        cursor: usize,
    },

    /// A style request was about to be emitted without any fields.
    #[error("Style request over [{start}, {end}) names no fields")]
    EmptyFieldMask {
        /// Range start offset
        start: usize,
        /// Range end offset (exclusive)
        end: usize,
    },

    /// A cursor correction would move the cursor before the segment origin.
    #[error("Cursor adjustment by {delta} from {cursor} would pass the segment origin {origin}")]
    CursorUnderflow {
        /// Cursor before the adjustment
        cursor: usize,
        /// Requested delta
        delta: isize,
        /// First addressable offset of the segment
        origin: usize,
    },

    /// A header/footer creation did not yield a segment identifier.
    #[error("No segment id returned for {0}")]
    MissingSegmentId(String),

    /// The transport rejected a batch before anything was applied.
    #[error("{phase} batch failed before any batch was applied: {source}")]
    Upstream {
        /// Phase of the rejected batch
        phase: Phase,
        /// Transport error
        #[source]
        source: Box<Error>,
    },

    /// The transport rejected a batch after earlier batches were applied.
    #[error("{failed} batch failed after {} batch(es) were applied; document is partially built: {source}", applied.len())]
    PartiallyApplied {
        /// Phases whose batches were applied
        applied: Vec<Phase>,
        /// Phase of the rejected batch
        failed: Phase,
        /// Transport error
        #[source]
        source: Box<Error>,
    },

    /// A requested capability has no protocol equivalent.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Translating a content block failed.
    #[error("Block {index} ({kind}) failed: {source}")]
    Block {
        /// Zero-based index of the block in the document
        index: usize,
        /// Block kind name
        kind: &'static str,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// The transport reported an error.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check whether the remote document may have been partially modified.
    pub fn is_partial(&self) -> bool {
        matches!(self, Error::PartiallyApplied { .. })
    }

    /// Wrap an error with the index and kind of the block being translated.
    pub(crate) fn in_block(self, index: usize, kind: &'static str) -> Self {
        Error::Block {
            index,
            kind,
            source: Box::new(self),
        }
    }
}
