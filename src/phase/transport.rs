//! Transport boundary: applying one batch remotely and reading the reply.

use serde::{Deserialize, Serialize};

use super::{Batch, Phase};
use crate::error::{Error, Result};
use crate::ops::{Request, SegmentKind};

/// Applies batches to a remote document.
///
/// Implementations must apply a batch atomically and in order, and must not
/// return before the batch is applied.
pub trait Transport {
    /// Apply one batch and return the per-request replies.
    fn apply_batch(&mut self, batch: &Batch) -> Result<BatchReply>;
}

impl<F> Transport for F
where
    F: FnMut(&Batch) -> Result<BatchReply>,
{
    fn apply_batch(&mut self, batch: &Batch) -> Result<BatchReply> {
        self(batch)
    }
}

/// Async counterpart of [`Transport`].
#[cfg(feature = "async")]
pub trait AsyncTransport {
    /// Apply one batch and return the per-request replies.
    fn apply_batch_async(
        &mut self,
        batch: &Batch,
    ) -> impl std::future::Future<Output = Result<BatchReply>> + Send;
}

/// Reply to one batch, one entry per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReply {
    /// Per-request replies; requests without a result reply `{}`
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl BatchReply {
    /// Parse a reply from the protocol's JSON shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A reply with `count` empty entries.
    pub fn empty(count: usize) -> Self {
        Self {
            replies: vec![Reply::default(); count],
        }
    }
}

/// Reply to one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    /// Result of a header creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_header: Option<CreateHeaderReply>,

    /// Result of a footer creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_footer: Option<CreateFooterReply>,
}

impl Reply {
    /// Identifier of a created segment of the given kind.
    pub fn segment_id(&self, kind: SegmentKind) -> Option<&str> {
        match kind {
            SegmentKind::Header => self.create_header.as_ref().map(|r| r.header_id.as_str()),
            SegmentKind::Footer => self.create_footer.as_ref().map(|r| r.footer_id.as_str()),
        }
    }
}

/// Result of a header creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeaderReply {
    /// New header segment id
    pub header_id: String,
}

/// Result of a footer creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFooterReply {
    /// New footer segment id
    pub footer_id: String,
}

/// Transport that applies nothing and records every batch.
///
/// Segment identifiers are fabricated as `dryrun.header.N` /
/// `dryrun.footer.N`. Failures can be injected per phase.
#[derive(Debug, Default)]
pub struct DryRunTransport {
    batches: Vec<Batch>,
    fail_on: Option<Phase>,
    omit_segment_ids: bool,
    next_id: usize,
}

impl DryRunTransport {
    /// Create a transport that accepts every batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the batch of the given phase.
    pub fn failing_on(mut self, phase: Phase) -> Self {
        self.fail_on = Some(phase);
        self
    }

    /// Answer creation requests without identifiers.
    pub fn without_segment_ids(mut self) -> Self {
        self.omit_segment_ids = true;
        self
    }

    /// Batches received so far, in order.
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Consume the transport, returning the recorded batches.
    pub fn into_batches(self) -> Vec<Batch> {
        self.batches
    }

    fn reply_to(&mut self, batch: &Batch) -> Result<BatchReply> {
        if self.fail_on == Some(batch.phase) {
            return Err(Error::Transport(format!(
                "dry run rejected the {} batch",
                batch.phase
            )));
        }
        self.batches.push(batch.clone());

        let mut replies = Vec::with_capacity(batch.requests.len());
        for request in &batch.requests {
            let mut reply = Reply::default();
            if !self.omit_segment_ids {
                match request {
                    Request::CreateHeader(_) => {
                        self.next_id += 1;
                        reply.create_header = Some(CreateHeaderReply {
                            header_id: format!("dryrun.header.{}", self.next_id),
                        });
                    }
                    Request::CreateFooter(_) => {
                        self.next_id += 1;
                        reply.create_footer = Some(CreateFooterReply {
                            footer_id: format!("dryrun.footer.{}", self.next_id),
                        });
                    }
                    _ => {}
                }
            }
            replies.push(reply);
        }
        Ok(BatchReply { replies })
    }
}

impl Transport for DryRunTransport {
    fn apply_batch(&mut self, batch: &Batch) -> Result<BatchReply> {
        self.reply_to(batch)
    }
}

#[cfg(feature = "async")]
impl AsyncTransport for DryRunTransport {
    fn apply_batch_async(
        &mut self,
        batch: &Batch,
    ) -> impl std::future::Future<Output = Result<BatchReply>> + Send {
        let reply = self.reply_to(batch);
        async move { reply }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{CreateHeader, InsertText, Location};

    #[test]
    fn test_reply_parsing() {
        let reply = BatchReply::from_json(
            r#"{"replies":[{"createHeader":{"headerId":"kix.h"}},{}],"writeControl":{}}"#,
        )
        .unwrap();
        assert_eq!(reply.replies.len(), 2);
        assert_eq!(reply.replies[0].segment_id(SegmentKind::Header), Some("kix.h"));
        assert_eq!(reply.replies[1].segment_id(SegmentKind::Header), None);
        assert_eq!(BatchReply::from_json("{}").unwrap(), BatchReply::default());
    }

    #[test]
    fn test_dry_run_fabricates_ids() {
        let mut transport = DryRunTransport::new();
        let batch = Batch::new(
            Phase::Creation,
            vec![Request::CreateHeader(CreateHeader::default())],
        );
        let reply = transport.apply_batch(&batch).unwrap();
        assert_eq!(
            reply.replies[0].segment_id(SegmentKind::Header),
            Some("dryrun.header.1")
        );
        assert_eq!(transport.batches().len(), 1);
    }

    #[test]
    fn test_dry_run_failure_injection() {
        let mut transport = DryRunTransport::new().failing_on(Phase::Structural);
        let batch = Batch::new(
            Phase::Structural,
            vec![Request::InsertText(InsertText {
                location: Location::body(1),
                text: "x".to_string(),
            })],
        );
        assert!(matches!(
            transport.apply_batch(&batch),
            Err(Error::Transport(_))
        ));
        assert!(transport.batches().is_empty());
    }

    #[test]
    fn test_closure_transport() {
        let mut seen = 0;
        let mut transport = |batch: &Batch| {
            seen += batch.len();
            Ok::<_, Error>(BatchReply::empty(batch.len()))
        };
        let batch = Batch::new(Phase::StyleOnly, Vec::new());
        transport.apply_batch(&batch).unwrap();
        assert_eq!(seen, 0);
    }
}
