//! Locate the JSON object inside free-form completion text.

use crate::error::{Result, TutorError};

/// Return the substring from the first `{` to the last `}` inclusive.
///
/// Code-fence markers around the object are dropped first; prose before or after the
/// object is ignored. Applying this to its own output returns the same slice.
pub fn extract_json(raw: &str) -> Result<&str> {
    let text = strip_code_fence(raw.trim());
    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(TutorError::MalformedOutput(format!(
            "no JSON object in completion ({} chars)",
            raw.len()
        ))),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}
