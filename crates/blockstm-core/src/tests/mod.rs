mod emitter;

use crate::*;

pub(super) const HEADER: &str = "@startuml\nskinparam defaultFontName \"Noto Sans JP\"\n";

/// Wraps a body with the default header and footer.
pub(super) fn document(body: &str) -> String {
    format!("{HEADER}{body}@enduml")
}

/// A valid initial pseudostate pointing at `target`.
pub(super) fn initial_to(target: &str) -> StateItem {
    StateItem::new(naming::INITIAL_STATE)
        .with_myself(true)
        .with_transition(Transition::to(target))
}

pub(super) fn render(items: &[StateItem]) -> String {
    Transpiler::new().transpile(items)
}
