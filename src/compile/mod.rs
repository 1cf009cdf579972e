//! Compilation of a document description into positional edit requests.
//!
//! A [`Compiler`] walks the blocks once, in order, threading one
//! [`Emitter`] through every translator. Header and footer content is
//! compiled against symbolic segments and returned as deferred intents.

pub mod blocks;
mod emitter;
mod geometry;
mod options;
pub mod resolver;
mod result;
pub mod table;

pub use emitter::{Emitter, BODY_ORIGIN, IMAGE_UNITS, PAGE_BREAK_UNITS, SEGMENT_ORIGIN};
pub use geometry::{CellOrder, CellWrite, TableGeometry};
pub use options::{CalloutColors, CompileOptions, HeadingStyle};
pub use resolver::{
    neutral_text_style, parse_hex_color, resolve_paragraph_format, resolve_text_style,
};
pub use result::{CompileStats, CompiledDocument, Notice};

use crate::error::{Error, Result};
use crate::model::{ContentBlock, DocumentSpec, HeaderFooterSpec, ParagraphFormat, Run};
use crate::ops::{Segment, SegmentKind};
use crate::phase::DeferredIntent;

/// Single-use compiler for one document build.
///
/// Consumed by [`Compiler::compile`], so state never carries over between
/// documents.
pub struct Compiler<'a> {
    options: &'a CompileOptions,
    out: Emitter,
    stats: CompileStats,
    notices: Vec<Notice>,
    /// Whether the last thing written was a plain paragraph a rule can border
    ends_in_paragraph: bool,
}

impl<'a> Compiler<'a> {
    /// Create a compiler with fresh state.
    pub fn new(options: &'a CompileOptions) -> Result<Self> {
        Ok(Self {
            options,
            out: Emitter::new(options)?,
            stats: CompileStats::new(),
            notices: Vec::new(),
            ends_in_paragraph: false,
        })
    }

    /// Compile a document description.
    pub fn compile(mut self, doc: &DocumentSpec) -> Result<CompiledDocument> {
        if self.options.title_block && !doc.title.is_empty() {
            let byline = doc.metadata.byline(&self.options.date_format);
            blocks::title(&mut self.out, &doc.title, byline.as_deref())?;
            self.stats.heading_count += 1;
            self.ends_in_paragraph = true;
        }

        for (index, block) in doc.blocks.iter().enumerate() {
            let before = self.out.cursor();
            self.translate(index, block)
                .map_err(|e| e.in_block(index, block.kind()))?;
            log::debug!(
                "block {} ({}) wrote [{}, {})",
                index,
                block.kind(),
                before,
                self.out.cursor()
            );
        }

        let mut deferred = Vec::new();
        if let Some(ref header) = doc.header {
            deferred.push(self.furniture(SegmentKind::Header, header)?);
        }
        if let Some(ref footer) = doc.footer {
            deferred.push(self.furniture(SegmentKind::Footer, footer)?);
        }

        let (requests, final_cursor) = self.out.finish();
        self.stats.request_count = requests.len() as u32;

        Ok(CompiledDocument {
            title: doc.title.clone(),
            requests,
            deferred,
            final_cursor,
            stats: self.stats,
            notices: self.notices,
        })
    }

    fn translate(&mut self, index: usize, block: &ContentBlock) -> Result<()> {
        let options = self.options;
        let out = &mut self.out;
        let mut ends_in_paragraph = true;

        match block {
            ContentBlock::Title { text, subtitle } => {
                blocks::title(out, text, subtitle.as_deref())?;
                self.stats.heading_count += 1;
            }
            ContentBlock::Heading { level, text } => {
                blocks::heading(out, options, *level, text)?;
                self.stats.heading_count += 1;
            }
            ContentBlock::Paragraph { runs, .. } => {
                let format = block.paragraph_format().unwrap_or_default();
                blocks::paragraph(out, runs, &format)?;
                self.stats.paragraph_count += 1;
            }
            ContentBlock::List {
                kind,
                items,
                numbering_style,
                glyph,
            } => {
                let written = blocks::list(
                    out,
                    options,
                    *kind,
                    items,
                    *numbering_style,
                    *glyph,
                    Some(index),
                    &mut self.notices,
                )?;
                if written > 0 {
                    self.stats.list_count += 1;
                    self.stats.list_item_count += written as u32;
                } else {
                    ends_in_paragraph = self.ends_in_paragraph;
                }
            }
            ContentBlock::Table(spec) => {
                if table::table(out, options, spec)?.is_some() {
                    self.stats.table_count += 1;
                    ends_in_paragraph = false;
                } else {
                    ends_in_paragraph = self.ends_in_paragraph;
                }
            }
            ContentBlock::Callout { style, text } => {
                table::callout(out, options, *style, text)?;
                self.stats.callout_count += 1;
                ends_in_paragraph = false;
            }
            ContentBlock::CodeBlock { text } => {
                table::code_block(out, options, text)?;
                self.stats.code_block_count += 1;
                ends_in_paragraph = false;
            }
            ContentBlock::Rule => {
                blocks::rule(out, options, !self.ends_in_paragraph)?;
                self.stats.rule_count += 1;
                // A second rule needs a paragraph of its own.
                ends_in_paragraph = false;
            }
            ContentBlock::PageBreak => {
                blocks::page_break(out);
                self.stats.page_break_count += 1;
                ends_in_paragraph = false;
            }
            ContentBlock::Image(spec) => {
                blocks::image(out, spec)?;
                self.stats.image_count += 1;
                // The image paragraph is still open.
                ends_in_paragraph = false;
            }
        }

        self.ends_in_paragraph = ends_in_paragraph;
        Ok(())
    }

    /// Compile header/footer content against a symbolic segment.
    fn furniture(&mut self, kind: SegmentKind, spec: &HeaderFooterSpec) -> Result<DeferredIntent> {
        let mut out = Emitter::for_segment(Segment::Pending(kind), self.options)?;

        let mut runs = spec.runs.clone();
        if spec.page_numbers {
            if self.options.strict_features {
                return Err(Error::UnsupportedFeature(format!("page numbers in the {}", kind)));
            }
            log::warn!(
                "page numbers in the {} are not supported, writing {:?}",
                kind,
                self.options.page_number_placeholder
            );
            self.notices.push(Notice::new(
                None,
                format!(
                    "{} page numbers replaced by {:?}",
                    kind, self.options.page_number_placeholder
                ),
            ));
            let mut placeholder = self.options.page_number_placeholder.clone();
            if runs.iter().any(|run| !run.is_empty()) {
                placeholder.insert(0, ' ');
            }
            runs.push(Run::new(placeholder));
        }

        let format = ParagraphFormat {
            alignment: spec.alignment,
            spacing: None,
        };
        blocks::paragraph(&mut out, &runs, &format)?;

        let (requests, cursor) = out.finish();
        log::debug!("{} holds {} units in {} requests", kind, cursor, requests.len());
        Ok(DeferredIntent::new(kind, requests))
    }
}

/// Compile a document description with the given options.
pub fn compile(doc: &DocumentSpec, options: &CompileOptions) -> Result<CompiledDocument> {
    Compiler::new(options)?.compile(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CalloutStyle, Metadata, TableSpec};
    use crate::ops::{text_len, Request};

    fn untitled() -> DocumentSpec {
        DocumentSpec::new("")
    }

    #[test]
    fn test_empty_document() {
        let compiled = compile(&untitled(), &CompileOptions::default()).unwrap();
        assert!(compiled.requests.is_empty());
        assert_eq!(compiled.final_cursor, BODY_ORIGIN);
        assert!(!compiled.has_deferred());
    }

    #[test]
    fn test_title_block() {
        let doc = DocumentSpec::new("Quarterly Review").with_metadata(Metadata {
            organization: Some("Acme".to_string()),
            ..Default::default()
        });
        let compiled = compile(&doc, &CompileOptions::default()).unwrap();
        assert_eq!(
            compiled.final_cursor,
            1 + text_len("Quarterly Review\n") + text_len("Acme\n")
        );
        assert_eq!(compiled.stats.heading_count, 1);

        let untitled = compile(&doc, &CompileOptions::default().with_title_block(false)).unwrap();
        assert!(untitled.requests.is_empty());
    }

    #[test]
    fn test_block_error_carries_index() {
        let doc = untitled()
            .with_block(ContentBlock::text("fine"))
            .with_block(ContentBlock::paragraph(vec![Run::styled(
                "broken",
                crate::model::StyleIntent::new().with_color("#12345"),
            )]));
        let err = compile(&doc, &CompileOptions::default()).unwrap_err();
        match err {
            Error::Block { index, kind, source } => {
                assert_eq!(index, 1);
                assert_eq!(kind, "paragraph");
                assert!(matches!(*source, Error::InvalidColor(_)));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_footer_is_deferred() {
        let doc = untitled()
            .with_block(ContentBlock::text("Body"))
            .with_footer(HeaderFooterSpec::text("Confidential"));
        let compiled = compile(&doc, &CompileOptions::default()).unwrap();

        assert_eq!(compiled.deferred.len(), 1);
        let footer = &compiled.deferred[0];
        assert_eq!(footer.kind(), SegmentKind::Footer);
        assert!(footer.requests().iter().all(Request::is_pending));
        match &footer.requests()[0] {
            Request::InsertText(insert) => assert_eq!(insert.location.index, SEGMENT_ORIGIN),
            other => panic!("unexpected request {:?}", other),
        }
        assert!(compiled.requests.iter().all(|r| !r.is_pending()));
    }

    #[test]
    fn test_page_numbers_downgrade() {
        let doc = untitled().with_header(HeaderFooterSpec::text("Draft").with_page_numbers());
        let compiled = compile(&doc, &CompileOptions::default()).unwrap();
        assert_eq!(compiled.notices.len(), 1);
        assert!(compiled.notices[0].block.is_none());

        let texts: Vec<&str> = compiled.deferred[0]
            .requests()
            .iter()
            .filter_map(|r| match r {
                Request::InsertText(insert) => Some(insert.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["Draft", " Page #", "\n"]);

        let err = compile(&doc, &CompileOptions::default().strict()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFeature(_)));
    }

    #[test]
    fn test_rule_after_table_gets_own_paragraph() {
        let doc = untitled()
            .with_block(ContentBlock::callout(CalloutStyle::Info, "Note"))
            .with_block(ContentBlock::Rule);
        let compiled = compile(&doc, &CompileOptions::default()).unwrap();
        // Callout (6 + 4) then an empty paragraph for the border.
        assert_eq!(compiled.final_cursor, 1 + 10 + 1);
        assert_eq!(compiled.stats.rule_count, 1);
    }

    #[test]
    fn test_stats() {
        let doc = untitled()
            .with_block(ContentBlock::heading(1, "Intro"))
            .with_block(ContentBlock::bullets(["a", "b"]))
            .with_block(ContentBlock::Table(TableSpec::new(["x"]).with_text_row(["y"])))
            .with_block(ContentBlock::code("let x = 1;"))
            .with_block(ContentBlock::PageBreak);
        let compiled = compile(&doc, &CompileOptions::default()).unwrap();

        assert_eq!(compiled.stats.block_count(), 5);
        assert_eq!(compiled.stats.list_item_count, 2);
        assert_eq!(compiled.stats.request_count as usize, compiled.requests.len());
    }
}
