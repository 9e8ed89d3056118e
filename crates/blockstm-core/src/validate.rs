use crate::highlight::HighlightTracker;
use crate::model::StateItem;
use crate::naming::is_valid_state_name;
use crate::notice::Notice;
use serde::Serialize;

/// Independent health checks over the whole model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFlags {
    /// The initial pseudostate exists and its "treat as initial" block is attached.
    pub has_initial: bool,
    pub has_invalid_name: bool,
    pub has_multiple_initial_transitions: bool,
    pub has_duplicate: bool,
    pub has_transition_from_initial: bool,
}

impl HealthFlags {
    /// The notice to render instead of a body, in fixed priority order.
    pub fn first_violation(&self) -> Option<Notice> {
        if !self.has_initial {
            Some(Notice::MissingInitialState)
        } else if self.has_invalid_name {
            Some(Notice::InvalidStateName)
        } else if self.has_multiple_initial_transitions {
            Some(Notice::MultipleInitialTransitions)
        } else if self.has_duplicate {
            Some(Notice::DuplicateState)
        } else if !self.has_transition_from_initial {
            Some(Notice::NoTransitionFromInitial)
        } else {
            None
        }
    }

    fn observe(&mut self, item: &StateItem) {
        if item.is_initial() {
            if item.myself.is_some_and(|m| m.condition) {
                self.has_initial = true;
            }
            if item.transitions.len() >= 2 {
                self.has_multiple_initial_transitions = true;
            }
            if item.targeted_transitions().next().is_some() {
                self.has_transition_from_initial = true;
            }
        }

        if !is_valid_state_name(&item.name)
            || item
                .targeted_transitions()
                .any(|(_, next)| !is_valid_state_name(next))
        {
            self.has_invalid_name = true;
        }

        if item.is_flagged_duplicate() {
            self.has_duplicate = true;
        }
    }
}

/// Computes [`HealthFlags`] in one pass.
pub fn validate(items: &[StateItem]) -> HealthFlags {
    let mut flags = HealthFlags::default();
    for item in items {
        flags.observe(item);
    }
    flags
}

/// The validation pass also picks up the focused "next state" block, which the highlight
/// resolver needs after the body has been emitted.
pub(crate) fn validate_with_clicks(items: &[StateItem]) -> (HealthFlags, HighlightTracker) {
    let mut flags = HealthFlags::default();
    let mut tracker = HighlightTracker::default();
    for item in items {
        flags.observe(item);
        tracker.observe_indexed_click(item);
    }
    (flags, tracker)
}
