//! The content lifecycle state machine.
//!
//! A content unit lives in exactly one environment at a time and the
//! engine only ever produces three `(environment, status)`
//! combinations: `sandbox/draft`, `sandbox/pending_approval`, and
//! `live/published`. Promotion to live mutates the unit's environment
//! tag in place — there is no separate live copy of a unit.
//!
//! Transitions are total on the legal `(state, action)` pairs; every
//! other pair fails with [`CampusError::IllegalTransition`] and must
//! leave persisted state untouched. There is no unpublish: once a
//! unit reaches `live/published` the only ways forward are
//! superseding its payload through a fresh approved draft, or
//! deleting it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CampusError;

/// Which copy of the site a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Editable, invisible to website visitors.
    Sandbox,
    /// Served to the public.
    Live,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Live => "live",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval stage of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    PendingApproval,
    Published,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::PendingApproval => "pending_approval",
            ContentStatus::Published => "published",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle-changing action an editor or approver can take.
///
/// `create`, `edit`, and `delete` are not listed here: creation fixes
/// the initial state, deletion is legal from any state, and editing
/// changes payload rather than driving the state machine forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Submit,
    Approve,
    Reject,
}

impl LifecycleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleAction::Submit => "submit",
            LifecycleAction::Approve => "approve",
            LifecycleAction::Reject => "reject",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `(environment, status)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleState {
    pub environment: Environment,
    pub status: ContentStatus,
}

impl LifecycleState {
    pub const fn new(environment: Environment, status: ContentStatus) -> Self {
        Self {
            environment,
            status,
        }
    }

    /// The state every unit is created in.
    pub const fn initial() -> Self {
        Self::new(Environment::Sandbox, ContentStatus::Draft)
    }

    /// Whether the public read path may serve a unit in this state.
    pub fn is_publicly_visible(self) -> bool {
        self.environment == Environment::Live && self.status == ContentStatus::Published
    }

    /// Whether an editor may change the unit's payload.
    ///
    /// Published units are not editable; superseding live content
    /// requires a fresh draft.
    pub fn is_editable(self) -> bool {
        self.environment == Environment::Sandbox
            && matches!(
                self.status,
                ContentStatus::Draft | ContentStatus::PendingApproval
            )
    }

    /// Apply an action, returning the successor state.
    ///
    /// Total over the legal pairs; every other `(state, action)` pair
    /// is rejected with [`CampusError::IllegalTransition`] carrying
    /// the current state.
    pub fn apply(self, action: LifecycleAction) -> Result<LifecycleState, CampusError> {
        use ContentStatus::*;
        use Environment::*;

        match (self.environment, self.status, action) {
            (Sandbox, Draft, LifecycleAction::Submit) => {
                Ok(LifecycleState::new(Sandbox, PendingApproval))
            }
            // Approval is the promotion: the environment tag itself
            // flips from sandbox to live.
            (Sandbox, PendingApproval, LifecycleAction::Approve) => {
                Ok(LifecycleState::new(Live, Published))
            }
            (Sandbox, PendingApproval, LifecycleAction::Reject) => {
                Ok(LifecycleState::new(Sandbox, Draft))
            }
            _ => Err(CampusError::IllegalTransition {
                action: action.as_str(),
                environment: self.environment,
                status: self.status,
            }),
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.environment, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [LifecycleState; 3] = [
        LifecycleState::new(Environment::Sandbox, ContentStatus::Draft),
        LifecycleState::new(Environment::Sandbox, ContentStatus::PendingApproval),
        LifecycleState::new(Environment::Live, ContentStatus::Published),
    ];

    const ALL_ACTIONS: [LifecycleAction; 3] = [
        LifecycleAction::Submit,
        LifecycleAction::Approve,
        LifecycleAction::Reject,
    ];

    #[test]
    fn initial_state_is_sandbox_draft() {
        let s = LifecycleState::initial();
        assert_eq!(s.environment, Environment::Sandbox);
        assert_eq!(s.status, ContentStatus::Draft);
    }

    #[test]
    fn submit_moves_draft_to_pending() {
        let next = LifecycleState::initial().apply(LifecycleAction::Submit).unwrap();
        assert_eq!(
            next,
            LifecycleState::new(Environment::Sandbox, ContentStatus::PendingApproval)
        );
    }

    #[test]
    fn approve_promotes_to_live_published() {
        let pending = LifecycleState::new(Environment::Sandbox, ContentStatus::PendingApproval);
        let next = pending.apply(LifecycleAction::Approve).unwrap();
        assert_eq!(
            next,
            LifecycleState::new(Environment::Live, ContentStatus::Published)
        );
    }

    #[test]
    fn reject_returns_pending_to_draft() {
        let pending = LifecycleState::new(Environment::Sandbox, ContentStatus::PendingApproval);
        let next = pending.apply(LifecycleAction::Reject).unwrap();
        assert_eq!(next, LifecycleState::initial());
    }

    /// Every `(state, action)` pair outside the transition table must
    /// fail with `IllegalTransition` — rejected, not silently ignored.
    #[test]
    fn illegal_pairs_are_rejected_exhaustively() {
        let legal = [
            (ALL_STATES[0], LifecycleAction::Submit),
            (ALL_STATES[1], LifecycleAction::Approve),
            (ALL_STATES[1], LifecycleAction::Reject),
        ];

        for state in ALL_STATES {
            for action in ALL_ACTIONS {
                let result = state.apply(action);
                if legal.contains(&(state, action)) {
                    assert!(result.is_ok(), "{state} + {action} should be legal");
                } else {
                    match result {
                        Err(CampusError::IllegalTransition {
                            action: a,
                            environment,
                            status,
                        }) => {
                            assert_eq!(a, action.as_str());
                            assert_eq!(environment, state.environment);
                            assert_eq!(status, state.status);
                        }
                        other => panic!("{state} + {action}: expected IllegalTransition, got {other:?}"),
                    }
                }
            }
        }
    }

    /// Successor states never leave the legal pair set.
    #[test]
    fn transitions_stay_within_legal_states() {
        for state in ALL_STATES {
            for action in ALL_ACTIONS {
                if let Ok(next) = state.apply(action) {
                    assert!(ALL_STATES.contains(&next), "unreachable state {next}");
                }
            }
        }
    }

    #[test]
    fn no_action_leaves_live_published() {
        let live = LifecycleState::new(Environment::Live, ContentStatus::Published);
        for action in ALL_ACTIONS {
            assert!(live.apply(action).is_err(), "{action} must not apply to live");
        }
    }

    #[test]
    fn visibility_and_editability() {
        assert!(!ALL_STATES[0].is_publicly_visible());
        assert!(!ALL_STATES[1].is_publicly_visible());
        assert!(ALL_STATES[2].is_publicly_visible());

        assert!(ALL_STATES[0].is_editable());
        assert!(ALL_STATES[1].is_editable());
        assert!(!ALL_STATES[2].is_editable());
    }
}
