// Output formatting: terminal display of loaded artifacts.

pub mod terminal;

/// Cut `text` to at most `max_chars` characters, marking the cut with "...".
///
/// Cuts on a char boundary, so æ, ø and å never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
