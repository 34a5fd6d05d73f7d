//! Word wrapping for text labels.

/// Breaks `text` into lines no wider than `max_width` as reported by `measure`.
///
/// Lines break at whitespace. A single word wider than `max_width` is kept
/// whole on its own line. Explicit newlines always start a new line.
pub fn wrap_text<M>(text: &str, max_width: f32, mut measure: M) -> Vec<String>
where
    M: FnMut(&str) -> f32,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }

    lines
}
