#![forbid(unsafe_code)]

//! Block-editor state machine -> PlantUML state diagram transpiler (headless).
//!
//! Design goals:
//! - one synchronous call per request, no I/O, no shared mutable state
//! - semantic problems in the model become a note inside the diagram, never an `Err`
//! - deterministic output (byte-identical for identical input)

pub mod collect;
pub mod config;
pub mod emit;
pub mod error;
pub mod highlight;
pub mod model;
pub mod naming;
pub mod notice;
pub mod reader;
pub mod validate;

pub use collect::{collect_states, current_state};
pub use config::StmConfig;
pub use emit::emit_diagram;
pub use error::{Error, Result};
pub use highlight::{HighlightKind, HighlightTracker};
pub use model::{
    Behavior, BehaviorRule, ClickDescriptor, ClickKind, InvalidFlag, Myself, StateItem, Transition,
};
pub use naming::is_valid_state_name;
pub use notice::Notice;
pub use reader::{read_model, read_model_str};
pub use validate::{HealthFlags, validate};

use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    config: StmConfig,
}

impl Transpiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site_config(mut self, site_config: StmConfig) -> Self {
        // Merge overrides onto the defaults so unset keys keep working.
        self.config.deep_merge(site_config.as_value());
        self
    }

    pub fn config(&self) -> &StmConfig {
        &self.config
    }

    /// Emits the diagram for already-read items.
    pub fn transpile(&self, items: &[StateItem]) -> String {
        emit_diagram(items, &self.config)
    }

    /// Reads the editor payload and emits the diagram.
    ///
    /// Only a payload that is not a JSON array is an error; a broken state machine still
    /// produces a diagram carrying a [`Notice`].
    ///
    /// ```
    /// use blockstm_core::Transpiler;
    /// use serde_json::json;
    ///
    /// let data = json!([
    ///     {"state": "初期状態", "myself": {"condition": true}, "transition": [{"nextState": "A"}]},
    ///     {"state": "A", "transition": []},
    /// ]);
    /// let text = Transpiler::new().transpile_value(&data)?;
    /// assert!(text.contains("[*] --> A\n"));
    /// # Ok::<(), blockstm_core::Error>(())
    /// ```
    pub fn transpile_value(&self, data: &Value) -> Result<String> {
        let items = read_model(data)?;
        Ok(self.transpile(&items))
    }

    /// Parses `text` as JSON, then behaves like [`Transpiler::transpile_value`].
    pub fn transpile_str(&self, text: &str) -> Result<String> {
        let items = read_model_str(text)?;
        Ok(self.transpile(&items))
    }

    /// Health flags for a payload, without emitting anything.
    pub fn check(&self, data: &Value) -> Result<HealthFlags> {
        Ok(validate(&read_model(data)?))
    }
}

#[cfg(test)]
mod tests;
