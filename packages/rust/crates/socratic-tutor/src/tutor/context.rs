//! Bounded transcript context for the tutoring prompt.

use crate::contracts::ConversationTurn;

/// Default number of most recent turns kept in the prompt.
pub const CONTEXT_WINDOW_TURNS: usize = 10;

/// Role-tagged lines for the last `window` turns, plus a `CURRENT ARRAY` line when an
/// exercise array is present.
pub fn build_context(turns: &[ConversationTurn], array: Option<&[i64]>, window: usize) -> String {
    let skip = turns.len().saturating_sub(window);
    let mut context = turns[skip..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");
    if let Some(values) = array.filter(|values| !values.is_empty()) {
        if !context.is_empty() {
            context.push_str("\n\n");
        }
        context.push_str("CURRENT ARRAY: ");
        context.push_str(&format_array(values));
    }
    context
}

/// `[3, 1, 2]`.
pub fn format_array(values: &[i64]) -> String {
    let items = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{items}]")
}
