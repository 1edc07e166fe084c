//! Selector classification and literalization.
//!
//! Only simple selectors are recognised: `.class` rules become exported
//! constants and `%placeholder` rules become module-private ones. Everything
//! else (`&:hover`, `a`, `#id`) stays inside whichever body contains it.

use crate::case::camel_case;

/// What kind of top-level construct a rule selector denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// `.name`
    Class,
    /// `%name`
    Placeholder,
}

/// JavaScript reserved words that cannot be used as a `const` name.
const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "import", "in", "instanceof", "let", "new", "null", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Classify a selector by its leading character.
pub fn selector_kind(selector: &str) -> Option<SelectorKind> {
    match selector.trim_start().chars().next() {
        Some('.') => Some(SelectorKind::Class),
        Some('%') => Some(SelectorKind::Placeholder),
        _ => None,
    }
}

pub fn is_class_selector(selector: &str) -> bool {
    selector_kind(selector) == Some(SelectorKind::Class)
}

/// Identifier for a `%placeholder`: the camel-cased name without the `%`.
pub fn placeholder_identifier(selector: &str) -> String {
    safe_identifier(camel_case(selector))
}

/// Identifier for a compound class selector.
///
/// Every non-alphanumeric character separates words, so `.btn.is-active`
/// becomes `btnIsActive` and `.card > .title` becomes `cardTitle`.
pub fn class_identifier(selector: &str) -> String {
    safe_identifier(camel_case(selector))
}

/// Identifier for a mixin or an included mixin call: `ad-exact` becomes `adExact`.
pub fn function_identifier(name: &str) -> String {
    safe_identifier(camel_case(name))
}

/// Prefix identifiers that start with a digit and suffix reserved words.
fn safe_identifier(ident: String) -> String {
    if ident.chars().next().is_some_and(|c| c.is_numeric()) {
        format!("_{ident}")
    } else if RESERVED.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}
