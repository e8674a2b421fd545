//! Upstream path template tokenizer.

/// Split a path template into its lower-cased, non-empty segments.
///
/// Placeholders such as `{id}` are kept as opaque text.
pub fn tokenize(template: &str) -> Vec<String> {
    template
        .to_lowercase()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
