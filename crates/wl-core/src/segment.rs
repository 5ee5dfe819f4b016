//! Gap-and-discriminator segmentation.
//!
//! Splits an ordered event log into runs of qualifying events. Every session
//! domain is one [`SegmentPolicy`] over the same loop:
//!
//! 1. Skip events the policy does not qualify
//! 2. The first qualifying event opens a segment (if the policy lets it open one)
//! 3. A later qualifying event joins the open segment when the policy says it
//!    continues (by default: same discriminator and gap `<= max_gap`)
//! 4. Otherwise the open segment is emitted and the event may open a new one
//! 5. The open segment is emitted at end of input
//!
//! Segments hold indices into the log, never copies of events.

use chrono::{Duration, NaiveTime};

use crate::event::{Event, elapsed};
use crate::types::SessionDomain;

/// Domain-specific rules plugged into [`segment`].
pub trait SegmentPolicy {
    /// The domain sessions produced by this policy belong to.
    fn domain(&self) -> SessionDomain;

    /// Whether the event takes part in segmentation at all.
    fn qualifies(&self, event: &Event) -> bool;

    /// The key that must match for events to share a segment.
    /// `None` means the domain has no discriminator.
    fn discriminator<'e>(&self, event: &'e Event) -> Option<&'e str>;

    /// Maximum idle time between consecutive members of a segment.
    fn max_gap(&self) -> Duration;

    /// Whether a qualifying event may open a new segment.
    ///
    /// Events that qualify but cannot open still close the current segment.
    fn opens(&self, _event: &Event) -> bool {
        true
    }

    /// Whether an event continues the open segment.
    ///
    /// `gap` is the time since the segment's last member. A negative gap
    /// (out-of-order input) never continues.
    fn continues(&self, current: Option<&str>, candidate: Option<&str>, gap: Duration) -> bool {
        current == candidate && gap >= Duration::zero() && gap <= self.max_gap()
    }
}

/// A run of qualifying events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Discriminator shared by every member, if the domain has one.
    pub discriminator: Option<String>,
    /// Indices of the member events in the log, ascending. Never empty.
    pub indices: Vec<usize>,
}

impl Segment {
    /// Index of the first member event.
    #[must_use]
    pub fn first(&self) -> usize {
        self.indices[0]
    }

    /// Index of the last member event.
    #[must_use]
    pub fn last(&self) -> usize {
        self.indices[self.indices.len() - 1]
    }

    #[must_use]
    pub fn start(&self, events: &[Event]) -> NaiveTime {
        events[self.first()].timestamp
    }

    #[must_use]
    pub fn end(&self, events: &[Event]) -> NaiveTime {
        events[self.last()].timestamp
    }
}

/// Segment a chronologically ordered event log.
///
/// Out-of-order events are not rejected; they force a break and the result
/// is best effort.
pub fn segment<P: SegmentPolicy + ?Sized>(events: &[Event], policy: &P) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<Segment> = None;

    for (index, event) in events.iter().enumerate() {
        if !policy.qualifies(event) {
            continue;
        }

        let discriminator = policy.discriminator(event);

        if let Some(open) = current.as_mut() {
            let gap = elapsed(open.end(events), event.timestamp);
            if gap < Duration::zero() {
                tracing::warn!(
                    domain = %policy.domain(),
                    index,
                    gap_ms = gap.num_milliseconds(),
                    "event out of chronological order; forcing a break"
                );
            }

            if policy.continues(open.discriminator.as_deref(), discriminator, gap) {
                open.indices.push(index);
                continue;
            }

            if let Some(closed) = current.take() {
                trace_close(policy.domain(), &closed);
                segments.push(closed);
            }
        }

        if policy.opens(event) {
            tracing::trace!(domain = %policy.domain(), index, ?discriminator, "segment opened");
            current = Some(Segment {
                discriminator: discriminator.map(String::from),
                indices: vec![index],
            });
        }
    }

    if let Some(closed) = current {
        trace_close(policy.domain(), &closed);
        segments.push(closed);
    }

    tracing::debug!(
        domain = %policy.domain(),
        segments = segments.len(),
        "segmentation complete"
    );
    segments
}

fn trace_close(domain: SessionDomain, segment: &Segment) {
    tracing::trace!(
        %domain,
        first = segment.first(),
        last = segment.last(),
        members = segment.indices.len(),
        "segment closed"
    );
}
