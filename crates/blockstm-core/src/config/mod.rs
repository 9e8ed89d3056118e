use crate::{Error, Result};
use serde_json::{Map, Value, json};

pub const DEFAULT_HIGHLIGHT_COLOR: &str = "orange";
pub const DEFAULT_FONT_FAMILY: &str = "Noto Sans JP";

/// Styling knobs for the emitted diagram, stored as a JSON object addressed by dotted paths
/// (`highlight.color`, `font.family`).
#[derive(Debug, Clone, PartialEq)]
pub struct StmConfig(Value);

impl Default for StmConfig {
    fn default() -> Self {
        Self(json!({
            "highlight": { "color": DEFAULT_HIGHLIGHT_COLOR },
            "font": { "family": DEFAULT_FONT_FAMILY },
        }))
    }
}

impl StmConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Parses a JSON config document. The root must be an object and every styling value must
    /// fit on one line of the diagram (see [`StmConfig::validate`]).
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(Error::Config {
                message: "config root must be a JSON object".to_string(),
            });
        }
        let config = Self(value);
        config.validate()?;
        Ok(config)
    }

    /// Rejects styling values that would break out of their line: a `"` or any control
    /// character in `font.family` or `highlight.color`.
    pub fn validate(&self) -> Result<()> {
        for path in ["font.family", "highlight.color"] {
            let Some(value) = self.get_str(path) else {
                continue;
            };
            if value.chars().any(|c| c == '"' || c.is_control()) {
                return Err(Error::Config {
                    message: format!("{path} must not contain quotes or line breaks: {value:?}"),
                });
            }
        }
        Ok(())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_str()
    }

    pub fn highlight_color(&self) -> &str {
        self.get_str("highlight.color")
            .unwrap_or(DEFAULT_HIGHLIGHT_COLOR)
    }

    pub fn font_family(&self) -> &str {
        self.get_str("font.family").unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
