//! PlantUML text generation.
//!
//! One call walks the items three times: validation (plus indexed-click capture), state
//! collection, then the body itself. Nothing survives the call.

use crate::collect::{collect_states, current_state};
use crate::config::StmConfig;
use crate::highlight::HighlightTracker;
use crate::model::{BehaviorRule, ClickKind, StateItem, Transition};
use crate::naming::{NO_OP_EVENT, is_reserved_state, is_undefined_state, target_token};
use crate::validate::validate_with_clicks;
use indexmap::IndexSet;

const INITIAL_EVENT_NOTE: &str =
    " 'InitialStateEventError\n <b><color:red> 「初期状態」には「イベント」を設定できません\n";
const INITIAL_GUARD_NOTE: &str =
    " 'InitialStateConditionError\n <b><color:red> 「初期状態」には「条件」を設定できません\n";

/// Converts `items` into a complete `@startuml ... @enduml` document.
///
/// Never fails: a semantically invalid model yields a document holding a single
/// [`crate::Notice`] block.
pub fn emit_diagram(items: &[StateItem], config: &StmConfig) -> String {
    let (flags, mut tracker) = validate_with_clicks(items);
    let states = collect_states(items);
    let current = current_state(items);

    let mut out = String::new();
    out.push_str("@startuml\n");
    out.push_str(&format!(
        "skinparam defaultFontName \"{}\"\n",
        config.font_family()
    ));

    match flags.first_violation() {
        Some(notice) => {
            tracing::debug!(%notice, "state machine rejected");
            out.push_str(notice.note_block());
        }
        None => {
            let color = config.highlight_color();
            declare_states(&mut out, &states);
            for item in items {
                tracker.observe_click_node(item);
                if item.is_initial() {
                    emit_initial(&mut out, item, color);
                } else if !item.name.is_empty() {
                    for (transition, next) in item.targeted_transitions() {
                        emit_transition(&mut out, item, transition, next, color);
                    }
                    emit_behaviors(&mut out, item, color);
                }
            }
            emit_highlight(&mut out, &tracker, current, color);
        }
    }

    out.push_str("@enduml");
    out
}

fn declare_states(out: &mut String, states: &IndexSet<String>) {
    for name in states.iter().filter(|name| !is_reserved_state(name)) {
        if is_undefined_state(name) {
            out.push_str(&format!("state {name}#text:red\n"));
        } else {
            out.push_str(&format!("state {name}\n"));
        }
    }
}

fn arrow(item: &StateItem, color: &str) -> String {
    match item.click_kind() {
        Some(kind) if kind.is_conditional_branch() => format!("-[#{color}]->"),
        _ => "-->".to_string(),
    }
}

/// `[*] --> target`, then a note when the edge carries an event or guard, which the initial
/// pseudostate may not have. Only the first transition is rendered.
fn emit_initial(out: &mut String, item: &StateItem, color: &str) {
    let Some(transition) = item.transitions.first() else {
        return;
    };
    let Some(next) = transition.next_state.as_deref() else {
        return;
    };

    out.push_str(&format!("[*] {} {}", arrow(item, color), target_token(next)));
    if let Some(effect) = &transition.effect {
        out.push_str(&format!(" : / {effect}"));
    }
    out.push('\n');

    if transition.event.is_some() || transition.guard.is_some() {
        out.push_str("note on link #FFF8DC\n");
        if transition.event.is_some() {
            out.push_str(INITIAL_EVENT_NOTE);
        }
        if transition.guard.is_some() {
            out.push_str(INITIAL_GUARD_NOTE);
        }
        out.push_str("end note\n");
    }
}

fn emit_transition(
    out: &mut String,
    item: &StateItem,
    transition: &Transition,
    next: &str,
    color: &str,
) {
    out.push_str(&format!(
        "{} {} {}",
        item.name,
        arrow(item, color),
        target_token(next)
    ));
    if let Some(label) = transition_label(transition) {
        out.push_str(" :");
        out.push_str(&label);
    }
    out.push('\n');
}

/// `event [guard] / effect` from whichever parts are present; `None` when there are none.
fn transition_label(transition: &Transition) -> Option<String> {
    let event = transition
        .event
        .as_deref()
        .filter(|event| *event != NO_OP_EVENT);
    if event.is_none() && transition.guard.is_none() && transition.effect.is_none() {
        return None;
    }

    let mut label = String::new();
    if let Some(event) = event {
        label.push_str(event);
    }
    if let Some(guard) = &transition.guard {
        label.push_str(&format!(" [{guard}]"));
    }
    if let Some(effect) = &transition.effect {
        label.push_str(&format!(" / {effect}"));
    }
    Some(label)
}

fn emit_behaviors(out: &mut String, item: &StateItem, color: &str) {
    let focused = item.click_kind().and_then(ClickKind::behavior_rule);
    for (rule, value) in item.behavior.rules() {
        out.push_str(&format!(
            "{} : {} / {value}\n",
            item.name,
            behavior_label(rule, focused, color)
        ));
    }
}

fn behavior_label(rule: BehaviorRule, focused: Option<BehaviorRule>, color: &str) -> String {
    if focused == Some(rule) {
        format!("<color:{color}>{}<color:black>", rule.label())
    } else {
        rule.label().to_string()
    }
}

fn emit_highlight(out: &mut String, tracker: &HighlightTracker, current: Option<&str>, color: &str) {
    if let Some(line) = tracker.resolve(current, color) {
        out.push_str(&line);
        out.push('\n');
    }
}
