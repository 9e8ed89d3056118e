use crate::model::{ClickKind, StateItem};
use crate::naming::{FINAL_STATE, is_undefined_state};

/// Styling template for the state the user is focused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// A "state changes to X" block: outline the target.
    OutgoingTransition,
    /// A "state is named X" block: color the name.
    Name,
    /// A state action block: outline the state.
    Action,
}

impl HighlightKind {
    pub fn from_click(kind: &ClickKind) -> Option<Self> {
        match kind {
            ClickKind::ChangeState => Some(Self::OutgoingTransition),
            ClickKind::StateDefinition => Some(Self::Name),
            ClickKind::StateAction => Some(Self::Action),
            ClickKind::SwitchIf
            | ClickKind::SwitchElseIf
            | ClickKind::Entry
            | ClickKind::DoContinuous
            | ClickKind::DoOnetime
            | ClickKind::Exit
            | ClickKind::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickNode {
    pub state_name: String,
    pub kind: ClickKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickedState {
    pub next_state: String,
}

/// Focus information gathered while walking the items; read once, after the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightTracker {
    /// Last item whose click names a block kind.
    pub click_node: Option<ClickNode>,
    /// Last indexed click whose transition has a target, whatever its block kind.
    pub clicked_state: Option<ClickedState>,
}

impl HighlightTracker {
    pub fn observe_click_node(&mut self, item: &StateItem) {
        if let Some(kind) = item.click_kind() {
            self.click_node = Some(ClickNode {
                state_name: item.name.clone(),
                kind: kind.clone(),
            });
        }
    }

    pub fn observe_indexed_click(&mut self, item: &StateItem) {
        let Some(click) = item.click.as_ref() else {
            return;
        };
        let (Some(_), Some(index)) = (click.kind.as_ref(), click.number) else {
            return;
        };
        let Some(next_state) = item
            .transitions
            .get(index)
            .and_then(|t| t.next_state.as_deref())
        else {
            return;
        };
        self.clicked_state = Some(ClickedState {
            next_state: next_state.to_string(),
        });
    }

    /// The state the highlight line styles: a focused transition target wins over the focused
    /// item itself.
    pub fn target(&self) -> Option<&str> {
        self.clicked_state
            .as_ref()
            .map(|c| c.next_state.as_str())
            .or_else(|| self.click_node.as_ref().map(|c| c.state_name.as_str()))
    }

    /// The template always comes from the click node; without one nothing is styled.
    fn kind(&self) -> Option<HighlightKind> {
        self.click_node
            .as_ref()
            .and_then(|node| HighlightKind::from_click(&node.kind))
    }

    /// The styled `state ...` declaration for the focused state, without a trailing newline.
    ///
    /// `current` is the verbatim active-state identifier (see [`crate::current_state`]).
    pub fn resolve(&self, current: Option<&str>, color: &str) -> Option<String> {
        let target = self.target()?;
        if target == FINAL_STATE {
            return None;
        }
        let kind = self.kind()?;
        let is_current = current.is_some_and(|c| c == target);
        let undefined = if is_undefined_state(target) {
            ";text:red"
        } else {
            ""
        };

        let line = match (kind, is_current) {
            (HighlightKind::OutgoingTransition, false) => {
                format!("state {target} #line:{color};line.bold{undefined}")
            }
            (HighlightKind::OutgoingTransition, true) => {
                format!("state {target};line:{color};line.bold{undefined}")
            }
            (HighlightKind::Name, false) => format!("state {target} #text:{color}"),
            (HighlightKind::Name, true) => format!("state {target};text:{color}"),
            (HighlightKind::Action, false) => {
                format!("state {target} #line:{color};line.bold{undefined}")
            }
            (HighlightKind::Action, true) => {
                format!("state {target} #FF5555;line:{color};line.bold{undefined}")
            }
        };
        Some(line)
    }
}
