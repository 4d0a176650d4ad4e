//! Two-phase confirmation rules for status transitions.
//!
//! A detection that disagrees with the committed status only becomes
//! pending. It is committed once a second detection agrees with it,
//! otherwise it is discarded as a flap.

use super::value_object::ConnectionStatus;

/// Result of comparing a fresh detection with the committed status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Detection agrees with the committed status
    Steady,
    /// Detection disagrees; needs confirmation before commit
    Pending(ConnectionStatus),
}

/// Result of the confirmation detection for a pending candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Confirm(ConnectionStatus),
    Discard,
}

/// What a tracker update did to the committed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Only the last-checked time was refreshed
    Unchanged,
    /// The status changed and a history entry was appended
    Committed(ConnectionStatus),
    /// The candidate was not confirmed and was dropped
    Discarded(ConnectionStatus),
}

pub fn evaluate(current: ConnectionStatus, candidate: ConnectionStatus) -> Evaluation {
    if candidate == current {
        Evaluation::Steady
    } else {
        Evaluation::Pending(candidate)
    }
}

pub fn resolve(candidate: ConnectionStatus, confirmed: ConnectionStatus) -> Resolution {
    if confirmed == candidate {
        Resolution::Confirm(candidate)
    } else {
        Resolution::Discard
    }
}
