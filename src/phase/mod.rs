//! Phase orchestration: splitting compiled requests into dependency-ordered
//! batches and submitting them one at a time.
//!
//! Batches go out in a fixed order: segment creation (only when a header or
//! footer was requested), structural content, table styling, then the
//! deferred header/footer content. Each batch is submitted only after the
//! previous one was applied, because later batches depend on structure or
//! identifiers produced by earlier ones. Empty batches are skipped.

mod deferred;
mod transport;

pub use deferred::{DeferredIntent, SegmentIds};
#[cfg(feature = "async")]
pub use transport::AsyncTransport;
pub use transport::{
    BatchReply, CreateFooterReply, CreateHeaderReply, DryRunTransport, Reply, Transport,
};

use std::fmt;

use serde::Serialize;

use crate::compile::CompiledDocument;
use crate::error::{Error, Result};
use crate::ops::{Request, SegmentKind};

/// A submission phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Header/footer segment creation
    Creation,
    /// Body content and table structure
    Structural,
    /// Styling of table cells and columns
    StyleOnly,
    /// Header/footer content, once segment ids are known
    Deferred,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Creation => f.write_str("creation"),
            Phase::Structural => f.write_str("structural"),
            Phase::StyleOnly => f.write_str("style-only"),
            Phase::Deferred => f.write_str("deferred"),
        }
    }
}

/// One batch of requests, applied atomically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    /// Phase the batch belongs to
    pub phase: Phase,

    /// Requests in application order
    pub requests: Vec<Request>,
}

impl Batch {
    /// Create a batch.
    pub fn new(phase: Phase, requests: Vec<Request>) -> Self {
        Self { phase, requests }
    }

    /// Number of requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Check if the batch holds no requests.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Compiled requests split by phase.
#[derive(Debug, Clone, Default)]
pub struct BatchPlan {
    creation: Vec<Request>,
    structural: Vec<Request>,
    style_only: Vec<Request>,
    deferred: Vec<DeferredIntent>,
}

impl BatchPlan {
    /// Partition body requests and collect creation requests for deferred intents.
    ///
    /// Table styling moves to its own batch; everything else keeps its
    /// original relative order.
    pub fn new(requests: Vec<Request>, deferred: Vec<DeferredIntent>) -> Self {
        let creation = deferred.iter().map(DeferredIntent::creation_request).collect();
        let (style_only, structural): (Vec<Request>, Vec<Request>) =
            requests.into_iter().partition(Request::is_table_style);
        Self {
            creation,
            structural,
            style_only,
            deferred,
        }
    }

    /// Build a plan from a compiled document.
    pub fn from_compiled(compiled: CompiledDocument) -> Self {
        compiled.into_plan()
    }

    /// Segment creation requests.
    pub fn creation(&self) -> &[Request] {
        &self.creation
    }

    /// Body requests applied in the structural batch.
    pub fn structural(&self) -> &[Request] {
        &self.structural
    }

    /// Table styling requests.
    pub fn style_only(&self) -> &[Request] {
        &self.style_only
    }

    /// Header/footer intents.
    pub fn deferred(&self) -> &[DeferredIntent] {
        &self.deferred
    }

    /// Number of batches that will be submitted.
    pub fn batch_count(&self) -> usize {
        let deferred_requests = self.deferred.iter().map(|d| d.requests().len()).sum::<usize>();
        [
            self.creation.len(),
            self.structural.len(),
            self.style_only.len(),
            deferred_requests,
        ]
        .iter()
        .filter(|&&n| n > 0)
        .count()
    }

    /// Total requests across every batch.
    pub fn request_count(&self) -> usize {
        self.creation.len()
            + self.structural.len()
            + self.style_only.len()
            + self.deferred.iter().map(|d| d.requests().len()).sum::<usize>()
    }
}

/// Internal state of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing submitted yet
    Creation,
    /// Segments exist (or none were needed)
    Structural,
    /// Body content applied
    StyleOnly,
    /// Table styling applied
    Deferred,
    /// Every batch handed out
    Done,
}

/// State machine handing out one batch at a time.
///
/// Call [`Orchestrator::next_batch`], apply the batch, then report the reply
/// with [`Orchestrator::record_reply`] before asking for the next one.
#[derive(Debug)]
pub struct Orchestrator {
    plan: BatchPlan,
    state: State,
    segment_ids: SegmentIds,
    applied: Vec<Phase>,
    in_flight: Option<Phase>,
}

impl Orchestrator {
    /// Create an orchestrator for a plan.
    pub fn new(plan: BatchPlan) -> Self {
        Self {
            plan,
            state: State::Creation,
            segment_ids: SegmentIds::new(),
            applied: Vec::new(),
            in_flight: None,
        }
    }

    /// The next non-empty batch, or `None` when everything was handed out.
    pub fn next_batch(&mut self) -> Result<Option<Batch>> {
        if let Some(phase) = self.in_flight {
            return Err(Error::Other(format!(
                "reply for the {} batch was not recorded",
                phase
            )));
        }

        loop {
            let batch = match self.state {
                State::Creation => {
                    self.state = State::Structural;
                    Batch::new(Phase::Creation, self.plan.creation.clone())
                }
                State::Structural => {
                    self.state = State::StyleOnly;
                    Batch::new(Phase::Structural, std::mem::take(&mut self.plan.structural))
                }
                State::StyleOnly => {
                    self.state = State::Deferred;
                    Batch::new(Phase::StyleOnly, std::mem::take(&mut self.plan.style_only))
                }
                State::Deferred => {
                    self.state = State::Done;
                    let mut requests = Vec::new();
                    for intent in &self.plan.deferred {
                        requests.extend(intent.resolve(&self.segment_ids)?);
                    }
                    Batch::new(Phase::Deferred, requests)
                }
                State::Done => return Ok(None),
            };

            if !batch.is_empty() {
                self.in_flight = Some(batch.phase);
                return Ok(Some(batch));
            }
        }
    }

    /// Record the reply to the batch last handed out.
    pub fn record_reply(&mut self, reply: &BatchReply) -> Result<()> {
        let phase = self
            .in_flight
            .take()
            .ok_or_else(|| Error::Other("no batch is awaiting a reply".to_string()))?;
        self.applied.push(phase);

        if phase == Phase::Creation {
            self.segment_ids = SegmentIds::from_reply(&self.plan.creation, reply)?;
            log::debug!("created {} segment(s)", self.segment_ids.len());
        }
        Ok(())
    }

    /// Convert a transport failure of the batch in flight into a phase error.
    pub fn fail(&mut self, source: Error) -> Error {
        let failed = self.in_flight.take().unwrap_or(Phase::Creation);
        self.state = State::Done;
        if self.applied.is_empty() {
            Error::Upstream {
                phase: failed,
                source: Box::new(source),
            }
        } else {
            Error::PartiallyApplied {
                applied: self.applied.clone(),
                failed,
                source: Box::new(source),
            }
        }
    }

    /// Phases applied so far.
    pub fn applied(&self) -> &[Phase] {
        &self.applied
    }

    /// Check if every batch was handed out and answered.
    pub fn is_done(&self) -> bool {
        self.state == State::Done && self.in_flight.is_none()
    }

    /// Summary of the submission.
    pub fn into_report(self) -> SubmitReport {
        SubmitReport {
            applied: self.applied,
            header_id: self.segment_ids.get(SegmentKind::Header).map(str::to_string),
            footer_id: self.segment_ids.get(SegmentKind::Footer).map(str::to_string),
        }
    }
}

/// Outcome of a completed submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmitReport {
    /// Phases applied, in order
    pub applied: Vec<Phase>,

    /// Identifier of the created header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_id: Option<String>,

    /// Identifier of the created footer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_id: Option<String>,
}

impl SubmitReport {
    /// Number of batches applied.
    pub fn batch_count(&self) -> usize {
        self.applied.len()
    }
}

/// Submit a plan through a transport, one batch at a time.
pub fn submit<T: Transport + ?Sized>(plan: BatchPlan, transport: &mut T) -> Result<SubmitReport> {
    let mut orchestrator = Orchestrator::new(plan);
    while let Some(batch) = orchestrator.next_batch()? {
        log::debug!("submitting {} batch of {} requests", batch.phase, batch.len());
        let reply = match transport.apply_batch(&batch) {
            Ok(reply) => reply,
            Err(e) => return Err(orchestrator.fail(e)),
        };
        orchestrator.record_reply(&reply)?;
    }
    Ok(orchestrator.into_report())
}

/// Submit a plan through an async transport, one batch in flight at a time.
#[cfg(feature = "async")]
pub async fn submit_async<T: AsyncTransport>(
    plan: BatchPlan,
    transport: &mut T,
) -> Result<SubmitReport> {
    let mut orchestrator = Orchestrator::new(plan);
    while let Some(batch) = orchestrator.next_batch()? {
        log::debug!("submitting {} batch of {} requests", batch.phase, batch.len());
        let reply = match transport.apply_batch_async(&batch).await {
            Ok(reply) => reply,
            Err(e) => return Err(orchestrator.fail(e)),
        };
        orchestrator.record_reply(&reply)?;
    }
    Ok(orchestrator.into_report())
}

/// Drive an async transport to completion from synchronous code.
///
/// Builds a current-thread tokio runtime for the duration of the submission.
#[cfg(feature = "async")]
pub fn submit_blocking<T: AsyncTransport>(
    plan: BatchPlan,
    transport: &mut T,
) -> Result<SubmitReport> {
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(submit_async(plan, transport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{
        FieldMask, InsertTable, InsertText, Location, Segment, TableCellLocation, TableCellStyle,
        TableRange, UpdateTableCellStyle,
    };

    fn insert(index: usize, text: &str) -> Request {
        Request::InsertText(InsertText {
            location: Location::body(index),
            text: text.to_string(),
        })
    }

    fn cell_style() -> Request {
        Request::UpdateTableCellStyle(UpdateTableCellStyle {
            table_range: TableRange {
                table_cell_location: TableCellLocation {
                    table_start_location: Location::body(1),
                    row_index: 0,
                    column_index: 0,
                },
                row_span: 1,
                column_span: 1,
            },
            table_cell_style: TableCellStyle::default(),
            fields: FieldMask::new().with("backgroundColor"),
        })
    }

    fn footer() -> DeferredIntent {
        DeferredIntent::new(
            SegmentKind::Footer,
            vec![Request::InsertText(InsertText {
                location: Location {
                    index: 0,
                    segment: Segment::Pending(SegmentKind::Footer),
                },
                text: "Page\n".to_string(),
            })],
        )
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::StyleOnly.to_string(), "style-only");
        assert_eq!(
            serde_json::to_string(&Phase::StyleOnly).unwrap(),
            "\"style-only\""
        );
    }

    #[test]
    fn test_plan_partitions_table_styles() {
        let table = Request::InsertTable(InsertTable {
            location: Location::body(1),
            rows: 1,
            columns: 1,
        });
        let plan = BatchPlan::new(vec![table, cell_style(), insert(5, "x")], Vec::new());

        assert_eq!(plan.structural().len(), 2);
        assert_eq!(plan.style_only().len(), 1);
        assert!(plan.creation().is_empty());
        assert_eq!(plan.batch_count(), 2);
        assert_eq!(plan.request_count(), 3);
    }

    #[test]
    fn test_orchestrator_skips_empty_batches() {
        let plan = BatchPlan::new(vec![insert(1, "Hello\n")], Vec::new());
        let mut orchestrator = Orchestrator::new(plan);

        let batch = orchestrator.next_batch().unwrap().unwrap();
        assert_eq!(batch.phase, Phase::Structural);
        orchestrator.record_reply(&BatchReply::empty(1)).unwrap();

        assert!(orchestrator.next_batch().unwrap().is_none());
        assert!(orchestrator.is_done());
        assert_eq!(orchestrator.applied(), [Phase::Structural]);
    }

    #[test]
    fn test_orchestrator_requires_reply() {
        let plan = BatchPlan::new(vec![insert(1, "a")], vec![footer()]);
        let mut orchestrator = Orchestrator::new(plan);
        orchestrator.next_batch().unwrap();
        assert!(orchestrator.next_batch().is_err());
    }

    #[test]
    fn test_submit_resolves_deferred_segments() {
        let plan = BatchPlan::new(vec![insert(1, "Body\n")], vec![footer()]);
        let mut transport = DryRunTransport::new();
        let report = submit(plan, &mut transport).unwrap();

        assert_eq!(
            report.applied,
            [Phase::Creation, Phase::Structural, Phase::Deferred]
        );
        assert_eq!(report.footer_id.as_deref(), Some("dryrun.footer.1"));

        let last = transport.batches().last().unwrap();
        assert_eq!(
            last.requests[0].segment(),
            Some(&Segment::Resolved("dryrun.footer.1".to_string()))
        );
    }

    #[test]
    fn test_missing_segment_id() {
        let plan = BatchPlan::new(Vec::new(), vec![footer()]);
        let mut transport = DryRunTransport::new().without_segment_ids();
        assert!(matches!(
            submit(plan, &mut transport),
            Err(Error::MissingSegmentId(_))
        ));
    }

    #[test]
    fn test_first_batch_failure_is_upstream() {
        let plan = BatchPlan::new(vec![insert(1, "a")], Vec::new());
        let mut transport = DryRunTransport::new().failing_on(Phase::Structural);
        let err = submit(plan, &mut transport).unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream {
                phase: Phase::Structural,
                ..
            }
        ));
        assert!(!err.is_partial());
    }

    #[test]
    fn test_later_failure_is_partial() {
        let plan = BatchPlan::new(vec![insert(1, "a"), cell_style()], Vec::new());
        let mut transport = DryRunTransport::new().failing_on(Phase::StyleOnly);
        match submit(plan, &mut transport).unwrap_err() {
            Error::PartiallyApplied {
                applied, failed, ..
            } => {
                assert_eq!(applied, [Phase::Structural]);
                assert_eq!(failed, Phase::StyleOnly);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
