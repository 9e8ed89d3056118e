//! Typed view of the block editor's state machine payload.
//!
//! Values are produced by [`crate::reader::read_model`]; field comments name the JSON key the
//! editor writes.

/// One declared state block (`state`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateItem {
    /// `state`. May end with [`crate::naming::CURRENT_MARKER`].
    pub name: String,
    /// `transition`.
    pub transitions: Vec<Transition>,
    /// `behavior`.
    pub behavior: Behavior,
    /// `myself`. Only meaningful on the initial pseudostate.
    pub myself: Option<Myself>,
    /// `current`. Presence only. Kept for input fidelity: the emitter finds the active state
    /// through the name marker instead.
    pub is_current: bool,
    /// `click`.
    pub click: Option<ClickDescriptor>,
    /// `invalid`.
    pub invalid: Option<InvalidFlag>,
}

impl StateItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_myself(mut self, condition: bool) -> Self {
        self.myself = Some(Myself { condition });
        self
    }

    pub fn with_click(mut self, click: ClickDescriptor) -> Self {
        self.click = Some(click);
        self
    }

    pub fn with_invalid(mut self, condition: impl Into<String>) -> Self {
        self.invalid = Some(InvalidFlag {
            condition: condition.into(),
        });
        self
    }

    pub fn is_initial(&self) -> bool {
        self.name == crate::naming::INITIAL_STATE
    }

    /// Click kind of the block the user is focused on, if any.
    pub fn click_kind(&self) -> Option<&ClickKind> {
        self.click.as_ref().and_then(|c| c.kind.as_ref())
    }

    /// `invalid.condition == "true"`: the editor saw this name declared twice.
    pub fn is_flagged_duplicate(&self) -> bool {
        self.invalid.as_ref().is_some_and(|i| i.condition == "true")
    }

    /// Transitions that name a target; the rest are ignored when rendering.
    pub fn targeted_transitions(&self) -> impl Iterator<Item = (&Transition, &str)> {
        self.transitions
            .iter()
            .filter_map(|t| t.next_state.as_deref().map(|next| (t, next)))
    }
}

/// One outgoing edge (`transition[i]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// `nextState`.
    pub next_state: Option<String>,
    pub event: Option<String>,
    pub guard: Option<String>,
    pub effect: Option<String>,
}

impl Transition {
    pub fn to(next_state: impl Into<String>) -> Self {
        Self {
            next_state: Some(next_state.into()),
            ..Default::default()
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Behavior {
    pub entry: Option<String>,
    /// `do`.
    pub do_activity: Option<String>,
    pub exit: Option<String>,
}

impl Behavior {
    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.do_activity.is_none() && self.exit.is_none()
    }

    /// Present fields in rendering order.
    pub fn rules(&self) -> impl Iterator<Item = (BehaviorRule, &str)> {
        [
            (BehaviorRule::Entry, self.entry.as_deref()),
            (BehaviorRule::Do, self.do_activity.as_deref()),
            (BehaviorRule::Exit, self.exit.as_deref()),
        ]
        .into_iter()
        .filter_map(|(rule, value)| value.map(|v| (rule, v)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorRule {
    Entry,
    Do,
    Exit,
}

impl BehaviorRule {
    pub fn label(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Do => "do",
            Self::Exit => "exit",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Myself {
    pub condition: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidFlag {
    pub condition: String,
}

/// Which editor block currently has focus (`click`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickDescriptor {
    /// `type`.
    pub kind: Option<ClickKind>,
    /// `number`: index into the owning item's transitions when a "next state" block is focused.
    pub number: Option<usize>,
    /// `stateName`. Kept for input fidelity; highlighting names the owning item instead.
    pub state_name: Option<String>,
}

impl ClickDescriptor {
    pub fn of_kind(kind: ClickKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn with_number(mut self, number: usize) -> Self {
        self.number = Some(number);
        self
    }
}

/// Editor block categories that carry focus information.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClickKind {
    /// "state changes to X"
    ChangeState,
    /// "state is named X"
    StateDefinition,
    StateAction,
    SwitchIf,
    SwitchElseIf,
    Entry,
    DoContinuous,
    DoOnetime,
    Exit,
    Other(String),
}

impl ClickKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "changeStateType" => Self::ChangeState,
            "stateDefinitionType" => Self::StateDefinition,
            "stateActionType" => Self::StateAction,
            "switchIfType" => Self::SwitchIf,
            "switchElseIfType" => Self::SwitchElseIf,
            "entryType" => Self::Entry,
            "doContinuousType" => Self::DoContinuous,
            "doOnetimeType" => Self::DoOnetime,
            "exitType" => Self::Exit,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ChangeState => "changeStateType",
            Self::StateDefinition => "stateDefinitionType",
            Self::StateAction => "stateActionType",
            Self::SwitchIf => "switchIfType",
            Self::SwitchElseIf => "switchElseIfType",
            Self::Entry => "entryType",
            Self::DoContinuous => "doContinuousType",
            Self::DoOnetime => "doOnetimeType",
            Self::Exit => "exitType",
            Self::Other(raw) => raw,
        }
    }

    /// Conditional-branch blocks color the arrows of the owning state.
    pub fn is_conditional_branch(&self) -> bool {
        matches!(self, Self::SwitchIf | Self::SwitchElseIf)
    }

    /// The behavior label this block edits, if it is a behavior block.
    pub fn behavior_rule(&self) -> Option<BehaviorRule> {
        match self {
            Self::Entry => Some(BehaviorRule::Entry),
            Self::DoContinuous | Self::DoOnetime => Some(BehaviorRule::Do),
            Self::Exit => Some(BehaviorRule::Exit),
            Self::ChangeState
            | Self::StateDefinition
            | Self::StateAction
            | Self::SwitchIf
            | Self::SwitchElseIf
            | Self::Other(_) => None,
        }
    }
}

impl std::fmt::Display for ClickKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
