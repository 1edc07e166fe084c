//! Output assembler.
//!
//! Emits the module: the runtime import, the variable imports that were
//! actually used, then one declaration per entry in source-line order.
//!
//! ```text
//! .card {...}        →  export const card = css`...`;
//! %box {...}         →  const box = css`...`;
//! @mixin m($a) {...} →  function m(a) { return css`...`; }
//! ```

use crate::{Entry, EntryKind, TransformContext, TransformOptions};

/// Assemble the module text. The result is not yet tidied.
pub fn assemble(ctx: &TransformContext, options: &TransformOptions) -> String {
    let mut out = String::new();

    out.push_str(&options.runtime_import);
    out.push('\n');
    if ctx.uses_special_vars {
        out.push_str(&options.special_import);
        out.push('\n');
    }
    if ctx.uses_local_vars {
        out.push_str(&options.local_import);
        out.push('\n');
    }

    for entry in ctx.sorted_entries() {
        out.push_str(&declaration(entry, &options.template_tag));
    }

    out.push('\n');
    out
}

/// Render one entry as a JavaScript declaration.
pub fn declaration(entry: &Entry, tag: &str) -> String {
    let name = &entry.name;
    let body = escape_template(entry.body.trim_end());

    match entry.kind {
        EntryKind::Mixin => {
            let params = &entry.params;
            format!("\nfunction {name}({params}) {{\n  return {tag}`{body}\n  `;\n}}\n")
        }
        EntryKind::Class => format!("\nexport const {name} = {tag}`{body}\n`;\n"),
        EntryKind::Placeholder => format!("\nconst {name} = {tag}`{body}\n`;\n"),
    }
}

/// Escape backslashes and backticks so CSS text survives inside a template
/// literal. `${...}` interpolations are already JavaScript and are copied as-is.
pub fn escape_template(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("${") {
        escape_text(&rest[..start], &mut out);
        let end = start + interpolation_len(&rest[start..]);
        out.push_str(&rest[start..end]);
        rest = &rest[end..];
    }
    escape_text(rest, &mut out);
    out
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        if c == '\\' || c == '`' {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Length of the `${...}` expression at the start of `text`, up to and
/// including its closing brace. Braces inside JS string literals don't count.
fn interpolation_len(text: &str) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    text.len()
}
