//! Identifier casing.
//!
//! Sass names are dash-separated (`tablet-min-width`); generated JavaScript
//! uses camel case (`tabletMinWidth`).

/// Split text into words.
///
/// Words break on any non-alphanumeric character, on a lower→upper case change
/// (`fooBar`), before the last capital of an acronym run (`XMLHttp` → `XML`,
/// `Http`), and between letters and digits (`size2x` → `size`, `2`, `x`).
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase()))
                || (prev.is_numeric() != c.is_numeric());
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert text to camel case: first word lower-cased, later words capitalised.
///
/// ```
/// use emotify_codegen::case::camel_case;
///
/// assert_eq!(camel_case("tablet-min-width"), "tabletMinWidth");
/// assert_eq!(camel_case("%lrg-desktop"), "lrgDesktop");
/// ```
pub fn camel_case(input: &str) -> String {
    let mut out = String::new();

    for (i, word) in words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}
