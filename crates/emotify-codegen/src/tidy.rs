//! Light output tidying.
//!
//! Full code style is left to the project's formatter; this only removes
//! the whitespace noise that flattening leaves behind.

/// Trim trailing whitespace, collapse runs of blank lines to one, drop leading
/// and trailing blank lines, and end with a single newline.
pub fn tidy(text: &str) -> String {
    let mut out = String::new();
    let mut pending_blank = false;

    for line in text.lines().map(str::trim_end) {
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}
