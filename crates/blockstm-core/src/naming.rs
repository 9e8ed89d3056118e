use regex::Regex;

/// Name of the initial pseudostate block.
pub const INITIAL_STATE: &str = "初期状態";
/// Name of the final pseudostate block. Rendered as `[*]`, never declared.
pub const FINAL_STATE: &str = "終了状態";
/// Substring the editor uses for placeholder states that still need a name.
pub const UNDEFINED_MARKER: &str = "未定義";
/// Color token the editor appends to the name of the active state.
pub const CURRENT_MARKER: &str = "#FF5555";
/// Event that means "no event" and is never rendered on a transition label.
pub const NO_OP_EVENT: &str = "completeEvent";

fn disallowed_char_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[^0-9A-Za-zＡ-Ｚａ-ｚ０-９ぁ-んァ-ヶ一-龥々ー〇]").expect("valid regex")
    })
}

/// Returns `true` when `name` only uses digits, Latin letters (ASCII and full-width), hiragana,
/// katakana, kanji, `々`, `ー` and `〇`.
///
/// The active-state marker is stripped first. The empty string is a valid name.
pub fn is_valid_state_name(name: &str) -> bool {
    !disallowed_char_regex().is_match(&strip_current_marker(name))
}

/// Removes every occurrence of [`CURRENT_MARKER`].
pub fn strip_current_marker(name: &str) -> String {
    name.replace(CURRENT_MARKER, "")
}

pub fn is_reserved_state(name: &str) -> bool {
    name == INITIAL_STATE || name == FINAL_STATE
}

pub fn is_undefined_state(name: &str) -> bool {
    name.contains(UNDEFINED_MARKER)
}

/// Diagram token for a transition target: the final pseudostate becomes `[*]`.
pub fn target_token(next_state: &str) -> &str {
    if next_state == FINAL_STATE {
        "[*]"
    } else {
        next_state
    }
}
