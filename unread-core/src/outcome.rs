//! Fail-open result of an unread evaluation.

/// Result of computing a user's unread badge.
///
/// `Unknown` means at least one input fetch failed; the boundary maps it to
/// zero instead of surfacing an error, keeping the fallback policy explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadOutcome {
    /// All inputs were available; the count is authoritative for this request.
    Count(usize),
    /// At least one input was unavailable; the true count is indeterminate.
    Unknown,
}

impl UnreadOutcome {
    /// Value shown on the notification badge. `Unknown` degrades to zero —
    /// the badge may under-count on backend trouble, never over-count.
    pub fn badge_value(&self) -> usize {
        match self {
            UnreadOutcome::Count(n) => *n,
            UnreadOutcome::Unknown => 0,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, UnreadOutcome::Count(_))
    }
}
