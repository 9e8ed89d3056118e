//! Lenient normalisation of the editor's JSON payload into [`StateItem`]s.
//!
//! The editor is not schema-versioned. Missing or oddly typed optional fields read as absent;
//! only a non-array root is rejected.

use crate::model::{
    Behavior, ClickDescriptor, ClickKind, InvalidFlag, Myself, StateItem, Transition,
};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Reads the top-level JSON array into state items, preserving order.
pub fn read_model(data: &Value) -> Result<Vec<StateItem>> {
    let Value::Array(elements) = data else {
        return Err(Error::InvalidModel {
            message: format!("expected a JSON array of states, found {}", kind_of(data)),
        });
    };

    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let Value::Object(obj) = element else {
            tracing::debug!(index, kind = kind_of(element), "skipping non-object state entry");
            continue;
        };
        items.push(read_item(obj));
    }
    Ok(items)
}

/// Parses `text` as JSON, then reads it with [`read_model`].
pub fn read_model_str(text: &str) -> Result<Vec<StateItem>> {
    let value: Value = serde_json::from_str(text)?;
    read_model(&value)
}

fn read_item(obj: &Map<String, Value>) -> StateItem {
    let transitions = match obj.get("transition") {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| match entry {
                Value::Object(t) => read_transition(t),
                _ => Transition::default(),
            })
            .collect(),
        _ => Vec::new(),
    };

    StateItem {
        name: obj.get("state").and_then(text_of).unwrap_or_default(),
        transitions,
        behavior: obj
            .get("behavior")
            .and_then(Value::as_object)
            .map(read_behavior)
            .unwrap_or_default(),
        myself: obj.get("myself").map(|m| Myself {
            condition: m.get("condition").is_some_and(truthy),
        }),
        is_current: obj.get("current").is_some_and(|v| !v.is_null()),
        click: obj.get("click").and_then(Value::as_object).map(read_click),
        invalid: obj
            .get("invalid")
            .and_then(Value::as_object)
            .map(|inv| InvalidFlag {
                condition: inv.get("condition").and_then(text_of).unwrap_or_default(),
            }),
    }
}

fn read_transition(obj: &Map<String, Value>) -> Transition {
    Transition {
        next_state: obj.get("nextState").and_then(text_of),
        event: obj.get("event").and_then(text_of),
        guard: obj.get("guard").and_then(text_of),
        effect: obj.get("effect").and_then(text_of),
    }
}

fn read_behavior(obj: &Map<String, Value>) -> Behavior {
    Behavior {
        entry: obj.get("entry").and_then(text_of),
        do_activity: obj.get("do").and_then(text_of),
        exit: obj.get("exit").and_then(text_of),
    }
}

fn read_click(obj: &Map<String, Value>) -> ClickDescriptor {
    ClickDescriptor {
        kind: obj
            .get("type")
            .and_then(text_of)
            .map(|raw| ClickKind::parse(&raw)),
        number: obj.get("number").and_then(index_of),
        state_name: obj.get("stateName").and_then(text_of),
    }
}

/// Scalar-to-text coercion; `null`, arrays and objects have no text.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim() == "true",
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

fn index_of(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
