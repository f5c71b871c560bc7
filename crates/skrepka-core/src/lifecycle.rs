//! # Document Lifecycle
//!
//! Status transition rules for generated documents.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   draft ────► signed ────► sent ────► paid (terminal)                  │
//! │     │            │           │                                          │
//! │     └────────────┴───────────┴──────► cancelled (terminal)             │
//! │                                                                         │
//! │   paid cannot be cancelled; money already moved.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions are checked against an explicit adjacency allow-list. There
//! is no skipping forward (draft cannot jump to paid) and no moving back.
//! Anything not listed is rejected with [`LifecycleError::IllegalTransition`].

use crate::error::LifecycleError;
use crate::types::DocumentStatus;

/// Returns the statuses reachable from `from` in one step.
pub const fn allowed_from(from: DocumentStatus) -> &'static [DocumentStatus] {
    use DocumentStatus::*;
    match from {
        Draft => &[Signed, Cancelled],
        Signed => &[Sent, Cancelled],
        Sent => &[Paid, Cancelled],
        Paid => &[],
        Cancelled => &[],
    }
}

/// Checks whether `from -> to` is an allowed transition.
pub const fn can_transition(from: DocumentStatus, to: DocumentStatus) -> bool {
    use DocumentStatus::*;
    matches!(
        (from, to),
        (Draft, Signed)
            | (Draft, Cancelled)
            | (Signed, Sent)
            | (Signed, Cancelled)
            | (Sent, Paid)
            | (Sent, Cancelled)
    )
}

/// Checks whether a status admits no further transitions.
pub const fn is_terminal(status: DocumentStatus) -> bool {
    matches!(status, DocumentStatus::Paid | DocumentStatus::Cancelled)
}

/// Validates a transition, returning the new status to apply.
///
/// The caller is responsible for the side effect, which is limited to
/// `status` + `updated_at` on the stored row.
///
/// ## Example
/// ```rust
/// use skrepka_core::lifecycle::transition;
/// use skrepka_core::types::DocumentStatus;
///
/// let next = transition(DocumentStatus::Draft, DocumentStatus::Signed).unwrap();
/// assert_eq!(next, DocumentStatus::Signed);
///
/// assert!(transition(DocumentStatus::Paid, DocumentStatus::Cancelled).is_err());
/// ```
pub fn transition(
    from: DocumentStatus,
    to: DocumentStatus,
) -> Result<DocumentStatus, LifecycleError> {
    if can_transition(from, to) {
        Ok(to)
    } else {
        Err(LifecycleError::IllegalTransition { from, to })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use DocumentStatus::*;

    #[test]
    fn test_happy_path_chain() {
        assert_eq!(transition(Draft, Signed).unwrap(), Signed);
        assert_eq!(transition(Signed, Sent).unwrap(), Sent);
        assert_eq!(transition(Sent, Paid).unwrap(), Paid);
    }

    #[test]
    fn test_no_skipping_forward() {
        assert!(transition(Draft, Sent).is_err());
        assert!(transition(Draft, Paid).is_err());
        assert!(transition(Signed, Paid).is_err());
    }

    #[test]
    fn test_no_moving_back() {
        assert!(transition(Signed, Draft).is_err());
        assert!(transition(Sent, Signed).is_err());
        assert!(transition(Paid, Sent).is_err());
    }

    #[test]
    fn test_cancellation_rules() {
        assert!(transition(Draft, Cancelled).is_ok());
        assert!(transition(Signed, Cancelled).is_ok());
        assert!(transition(Sent, Cancelled).is_ok());
        assert!(transition(Paid, Cancelled).is_err());
        assert!(transition(Cancelled, Cancelled).is_err());
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for to in [Draft, Signed, Sent, Paid, Cancelled] {
            assert!(transition(Paid, to).is_err());
            assert!(transition(Cancelled, to).is_err());
        }
        assert!(is_terminal(Paid));
        assert!(is_terminal(Cancelled));
        assert!(!is_terminal(Draft));
    }

    #[test]
    fn test_self_transition_rejected() {
        for s in [Draft, Signed, Sent, Paid, Cancelled] {
            assert!(transition(s, s).is_err());
        }
    }

    #[test]
    fn test_allow_list_matches_predicate() {
        for from in [Draft, Signed, Sent, Paid, Cancelled] {
            for to in [Draft, Signed, Sent, Paid, Cancelled] {
                let listed = allowed_from(from).contains(&to);
                assert_eq!(listed, can_transition(from, to));
            }
        }
    }

    #[test]
    fn test_error_carries_both_states() {
        let err = transition(Draft, Paid).unwrap_err();
        let LifecycleError::IllegalTransition { from, to } = err;
        assert_eq!(from, Draft);
        assert_eq!(to, Paid);
    }
}
