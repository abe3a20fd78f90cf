//! Range buffer states and edit outcomes

use chrono::NaiveDateTime;

/// Which endpoints the buffer currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    Empty,
    StartOnly,
    EndOnly,
    Both,
}

impl RangeState {
    pub fn of(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        match (start, end) {
            (None, None) => RangeState::Empty,
            (Some(_), None) => RangeState::StartOnly,
            (None, Some(_)) => RangeState::EndOnly,
            (Some(_), Some(_)) => RangeState::Both,
        }
    }
}

/// Result of one endpoint edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEdit {
    /// Nothing to do, the buffer is unchanged
    Ignored,
    /// The edit would break the ordering, the buffer is unchanged
    Rejected,
    /// Accepted, but the range is still incomplete
    Buffered(RangeState),
    /// Accepted and both endpoints are set: `start < end`
    Complete {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Accepted half-open day range, exactly one endpoint set. The missing
    /// side is unbounded.
    Open {
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    },
}
