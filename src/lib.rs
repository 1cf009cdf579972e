//! # docforge
//!
//! Compiles structured content blocks into offset-exact batch edit requests
//! for remote rich-text documents.
//!
//! A remote document is a single growing buffer addressed by absolute
//! offsets. docforge walks a document description once, tracks the
//! insertion cursor across every block, and emits the insertions and style
//! requests that reproduce the description when replayed in order against
//! an empty document. Requests are then split into dependency-ordered
//! batches and submitted through a caller-supplied [`Transport`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use docforge::{compile, CompileOptions, ContentBlock, DocumentSpec, Run};
//!
//! fn main() -> docforge::Result<()> {
//!     let doc = DocumentSpec::new("Status Report")
//!         .with_block(ContentBlock::heading(1, "Summary"))
//!         .with_block(ContentBlock::paragraph(vec![
//!             Run::new("Shipping is "),
//!             Run::bold("on track"),
//!         ]))
//!         .with_block(ContentBlock::bullets(["Design", "Build", "Launch"]));
//!
//!     let compiled = compile(&doc, &CompileOptions::default())?;
//!     println!("{} requests", compiled.request_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Cursor tracking**: every request is addressed by absolute offset
//! - **Reset-then-layer styling**: no style leaks from one block to the next
//! - **Analytic table geometry**: cell offsets computed in closed form
//! - **Phased submission**: structure before table styling, headers and
//!   footers after their segments exist
//! - **Async transports** behind the `async` feature

pub mod compile;
pub mod error;
pub mod model;
pub mod ops;
pub mod phase;

// Re-export commonly used types
pub use compile::{
    compile, CellOrder, CompileOptions, CompileStats, CompiledDocument, Compiler, HeadingStyle,
    Notice, TableGeometry,
};
pub use error::{Error, Result};
pub use model::{
    Alignment, BulletGlyph, CalloutStyle, ContentBlock, DocumentSpec, HeaderFooterSpec,
    ImageSpec, ListItem, ListKind, Metadata, NumberingStyle, ParagraphFormat, Run, Spacing,
    StyleIntent, TableCellSpec, TableSpec,
};
pub use ops::{JsonFormat, Request};
#[cfg(feature = "async")]
pub use phase::{submit_async, submit_blocking, AsyncTransport};
pub use phase::{
    submit, Batch, BatchPlan, BatchReply, DryRunTransport, Orchestrator, Phase, SubmitReport,
    Transport,
};

use std::path::Path;

/// Compile a JSON document description file.
///
/// # Example
///
/// ```no_run
/// use docforge::{compile_file, CompileOptions};
///
/// let compiled = compile_file("report.json", &CompileOptions::default()).unwrap();
/// println!("final cursor: {}", compiled.final_cursor);
/// ```
pub fn compile_file<P: AsRef<Path>>(path: P, options: &CompileOptions) -> Result<CompiledDocument> {
    let doc = DocumentSpec::from_path(path)?;
    compile(&doc, options)
}

/// Compile a JSON document description.
pub fn compile_json(json: &str, options: &CompileOptions) -> Result<CompiledDocument> {
    let doc = DocumentSpec::from_json(json)?;
    compile(&doc, options)
}

/// Compile a document and split it into batches.
pub fn plan(doc: &DocumentSpec, options: &CompileOptions) -> Result<BatchPlan> {
    Ok(compile(doc, options)?.into_plan())
}

/// Compile a document and submit it through a transport.
///
/// # Example
///
/// ```no_run
/// use docforge::{generate, CompileOptions, ContentBlock, DocumentSpec, DryRunTransport};
///
/// let doc = DocumentSpec::new("Notes").with_block(ContentBlock::text("Hello"));
/// let mut transport = DryRunTransport::new();
/// let report = generate(&doc, &CompileOptions::default(), &mut transport).unwrap();
/// assert_eq!(report.batch_count(), transport.batches().len());
/// ```
pub fn generate<T: Transport + ?Sized>(
    doc: &DocumentSpec,
    options: &CompileOptions,
    transport: &mut T,
) -> Result<SubmitReport> {
    submit(plan(doc, options)?, transport)
}

/// Builder for compiling and submitting documents.
///
/// # Example
///
/// ```no_run
/// use docforge::{Docforge, DryRunTransport};
///
/// let mut transport = DryRunTransport::new();
/// let report = Docforge::new()
///     .with_font("Georgia", 11.0)
///     .without_title_block()
///     .load("report.json")?
///     .submit(&mut transport)?;
/// # Ok::<(), docforge::Error>(())
/// ```
pub struct Docforge {
    options: CompileOptions,
}

impl Docforge {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: CompileOptions::default(),
        }
    }

    /// Replace every option at once.
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the body font.
    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.options = self.options.with_font(family, size);
        self
    }

    /// Set the table cell write order.
    pub fn with_cell_order(mut self, order: CellOrder) -> Self {
        self.options = self.options.with_cell_order(order);
        self
    }

    /// Skip the title block.
    pub fn without_title_block(mut self) -> Self {
        self.options = self.options.with_title_block(false);
        self
    }

    /// Fail on unsupported features instead of downgrading them.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Compile a document.
    pub fn compile(self, doc: &DocumentSpec) -> Result<DocforgeResult> {
        let compiled = compile(doc, &self.options)?;
        Ok(DocforgeResult { compiled })
    }

    /// Load and compile a JSON document description.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<DocforgeResult> {
        let doc = DocumentSpec::from_path(path)?;
        self.compile(&doc)
    }
}

impl Default for Docforge {
    fn default() -> Self {
        Self::new()
    }
}

/// Result wrapper for fluent API.
pub struct DocforgeResult {
    compiled: CompiledDocument,
}

impl DocforgeResult {
    /// Get the compiled document.
    pub fn compiled(&self) -> &CompiledDocument {
        &self.compiled
    }

    /// Take ownership of the compiled document.
    pub fn into_compiled(self) -> CompiledDocument {
        self.compiled
    }

    /// Split into batches.
    pub fn plan(self) -> BatchPlan {
        self.compiled.into_plan()
    }

    /// Render the batches a submission would send, as JSON.
    ///
    /// The plan is submitted through a [`DryRunTransport`], so deferred
    /// batches address the identifiers it fabricates.
    pub fn to_json(self, format: JsonFormat) -> Result<String> {
        let mut transport = DryRunTransport::new();
        self.submit(&mut transport)?;
        ops::to_json(&transport.into_batches(), format)
    }

    /// Submit through a transport.
    pub fn submit<T: Transport + ?Sized>(self, transport: &mut T) -> Result<SubmitReport> {
        submit(self.plan(), transport)
    }
}
