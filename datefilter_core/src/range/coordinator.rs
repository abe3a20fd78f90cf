//! Coordinates the start and end pickers of one range editor

use chrono::NaiveDateTime;
use log::debug;

use super::types::{RangeEdit, RangeState};
use crate::classify::Precision;
use crate::codec::{RangeBounds, RangeCodec};
use crate::rule::FilterRule;

/// Buffers both endpoints of a range while they are edited independently.
///
/// Each edit is checked against the other endpoint as it is buffered right
/// now, never against the caller's rule, so the two pickers can not drift
/// out of order. Only an edit that leaves both endpoints set completes the
/// range; incomplete ranges stay local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCoordinator {
    codec: RangeCodec,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl RangeCoordinator {
    /// Seed the buffer from the rule's stored endpoints
    pub fn new(codec: RangeCodec, rule: &FilterRule) -> Self {
        let (start, end) = codec.decode(rule);
        Self { codec, start, end }
    }

    pub fn codec(&self) -> &RangeCodec {
        &self.codec
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn state(&self) -> RangeState {
        RangeState::of(self.start, self.end)
    }

    pub fn bounds(&self) -> RangeBounds {
        self.codec.bounds(self.start, self.end)
    }

    /// Edit the start. Accepted when there is no end yet or the new start
    /// is strictly before it; a start can only be cleared while there is no
    /// end.
    pub fn edit_start(&mut self, value: Option<NaiveDateTime>) -> RangeEdit {
        let value = value.map(|v| self.codec.normalize(v));
        let accepted = match (value, self.end) {
            (_, None) => true,
            (Some(start), Some(end)) => start < end,
            (None, Some(_)) => false,
        };

        if !accepted {
            debug!("Rejected range start {:?}, end is {:?}", value, self.end);
            return RangeEdit::Rejected;
        }

        self.start = value;
        self.settle()
    }

    /// Edit the end. Accepted when there is no start yet or the new end is
    /// strictly after it.
    pub fn edit_end(&mut self, value: Option<NaiveDateTime>) -> RangeEdit {
        let value = value.map(|v| self.codec.normalize(v));
        let accepted = match (self.start, value) {
            (None, _) => true,
            (Some(start), Some(end)) => end > start,
            (Some(_), None) => false,
        };

        if !accepted {
            debug!("Rejected range end {:?}, start is {:?}", value, self.start);
            return RangeEdit::Rejected;
        }

        self.end = value;
        self.settle()
    }

    /// Replace both endpoints at once, as a single range picker reports
    /// them. An empty pair is ignored. At day precision a pair with one side
    /// set is a half-open range and is reported as `Open`.
    pub fn edit_pair(
        &mut self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> RangeEdit {
        let start = start.map(|v| self.codec.normalize(v));
        let end = end.map(|v| self.codec.normalize(v));

        match (start, end) {
            (None, None) => RangeEdit::Ignored,
            (Some(s), Some(e)) if s >= e => {
                debug!("Rejected range pair {} .. {}", s, e);
                RangeEdit::Rejected
            }
            _ => {
                self.start = start;
                self.end = end;
                match (self.codec.precision, self.state()) {
                    (Precision::Day, RangeState::StartOnly | RangeState::EndOnly) => {
                        RangeEdit::Open { start, end }
                    }
                    _ => self.settle(),
                }
            }
        }
    }

    /// Re-seed the buffer after the caller replaced the rule
    pub fn sync(&mut self, rule: &FilterRule) {
        let (start, end) = self.codec.decode(rule);
        self.start = start;
        self.end = end;
    }

    fn settle(&self) -> RangeEdit {
        match (self.start, self.end) {
            (Some(start), Some(end)) => RangeEdit::Complete { start, end },
            _ => RangeEdit::Buffered(self.state()),
        }
    }
}
