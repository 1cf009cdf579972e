//! Deferred header/footer intents and segment identifier substitution.

use std::collections::HashMap;

use super::transport::BatchReply;
use crate::error::{Error, Result};
use crate::ops::{CreateFooter, CreateHeader, Request, Segment, SegmentKind};

/// Requests for a segment that does not exist yet.
///
/// The requests address `Segment::Pending(kind)` until the creation reply
/// supplies the real identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredIntent {
    kind: SegmentKind,
    requests: Vec<Request>,
}

impl DeferredIntent {
    /// Create an intent for a segment kind.
    pub fn new(kind: SegmentKind, requests: Vec<Request>) -> Self {
        Self { kind, requests }
    }

    /// Kind of segment this intent populates.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Requests addressing the pending segment.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// The request that creates the segment.
    pub fn creation_request(&self) -> Request {
        match self.kind {
            SegmentKind::Header => Request::CreateHeader(CreateHeader::default()),
            SegmentKind::Footer => Request::CreateFooter(CreateFooter::default()),
        }
    }

    /// Rewrite every pending segment reference with its identifier.
    pub fn resolve(&self, ids: &SegmentIds) -> Result<Vec<Request>> {
        let mut requests = self.requests.clone();
        for request in &mut requests {
            if let Some(segment) = request.segment_mut() {
                if let Segment::Pending(kind) = *segment {
                    let id = ids
                        .get(kind)
                        .ok_or_else(|| Error::MissingSegmentId(kind.to_string()))?;
                    *segment = Segment::Resolved(id.to_string());
                }
            }
        }
        Ok(requests)
    }
}

/// Segment identifiers returned by the creation batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentIds(HashMap<SegmentKind, String>);

impl SegmentIds {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair creation requests with their replies, in order.
    ///
    /// Every creation must be answered with an identifier of its own kind.
    pub fn from_reply(creations: &[Request], reply: &BatchReply) -> Result<Self> {
        let mut ids = Self::new();
        for (i, creation) in creations.iter().enumerate() {
            let kind = match creation {
                Request::CreateHeader(_) => SegmentKind::Header,
                Request::CreateFooter(_) => SegmentKind::Footer,
                _ => continue,
            };
            let id = reply
                .replies
                .get(i)
                .and_then(|r| r.segment_id(kind))
                .filter(|id| !id.is_empty())
                .ok_or_else(|| Error::MissingSegmentId(kind.to_string()))?;
            ids.insert(kind, id);
        }
        Ok(ids)
    }

    /// Record an identifier.
    pub fn insert(&mut self, kind: SegmentKind, id: impl Into<String>) {
        self.0.insert(kind, id.into());
    }

    /// Identifier for a kind.
    pub fn get(&self, kind: SegmentKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no identifier is known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
