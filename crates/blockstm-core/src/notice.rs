/// A semantic violation reported inside the diagram instead of a body.
///
/// Variants are listed in priority order; [`crate::HealthFlags::first_violation`] picks at most
/// one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    MissingInitialState,
    InvalidStateName,
    MultipleInitialTransitions,
    DuplicateState,
    NoTransitionFromInitial,
}

impl Notice {
    pub const ALL: [Notice; 5] = [
        Notice::MissingInitialState,
        Notice::InvalidStateName,
        Notice::MultipleInitialTransitions,
        Notice::DuplicateState,
        Notice::NoTransitionFromInitial,
    ];

    /// PlantUML note alias; unique per notice.
    pub fn alias(self) -> &'static str {
        match self {
            Self::MissingInitialState => "InitialStateDefinitionError",
            Self::InvalidStateName => "stateNameNamingError",
            Self::MultipleInitialTransitions => "InvalidStateTransitionError",
            Self::DuplicateState => "DuplicateStateDefinitionError",
            Self::NoTransitionFromInitial => "InitialStateTransitionError",
        }
    }

    /// The complete `note as ... end note` block, newline-terminated.
    pub fn note_block(self) -> &'static str {
        match self {
            Self::MissingInitialState => {
                "note as InitialStateDefinitionError\n <b><color:red>\"初めは「初期状態」としてください\"\n end note\n"
            }
            Self::InvalidStateName => {
                "note as stateNameNamingError\n <b><color:red>\"「状態名」には数字・日本語・アルファベットのみ使用できます\"\n end note\n"
            }
            Self::MultipleInitialTransitions => {
                "note as InvalidStateTransitionError\n <b><color:red>\"「初期状態」から到達できるのは一つの状態だけです\"\n<b><color:red>\"「初期状態」には「イベント」を設定できません\"\n end note\n"
            }
            Self::DuplicateState => {
                "note as DuplicateStateDefinitionError\n <b><color:red>\"同じ状態は複数回定義できません\"\n end note\n"
            }
            Self::NoTransitionFromInitial => {
                "note as InitialStateTransitionError\n <b><color:red>\"「初期状態」の次の状態を決めてください\"\n end note\n"
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.alias())
    }
}
