use crate::model::StateItem;
use crate::naming::{CURRENT_MARKER, strip_current_marker};
use indexmap::IndexSet;

/// Every state name the model mentions, as declarer or as transition target.
///
/// Declarers come first (in item order), then targets in first-seen order. The active-state
/// marker is removed, whitespace trimmed and empty names dropped.
pub fn collect_states(items: &[StateItem]) -> IndexSet<String> {
    let declared = items.iter().map(|item| item.name.as_str());
    let targets = items
        .iter()
        .flat_map(|item| item.targeted_transitions().map(|(_, next)| next));

    declared
        .chain(targets)
        .filter_map(|raw| {
            let cleaned = strip_current_marker(raw);
            let cleaned = cleaned.trim();
            (!cleaned.is_empty()).then(|| cleaned.to_string())
        })
        .collect()
}

/// The first transition target carrying the active-state marker, verbatim.
pub fn current_state(items: &[StateItem]) -> Option<&str> {
    items
        .iter()
        .flat_map(|item| item.targeted_transitions().map(|(_, next)| next))
        .find(|next| next.contains(CURRENT_MARKER))
}
