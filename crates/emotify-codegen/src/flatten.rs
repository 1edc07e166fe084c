//! Nesting flattener and classifier.
//!
//! Turns every `.class` / `%placeholder` rule and every `@mixin` into an
//! [`Entry`] whose body is the rule's inner text. Rules inside a mixin are
//! skipped: the mixin body already carries them.
//!
//! A class rule nested in another class or placeholder rule is an entry of its
//! own and is cut out of the enclosing body.

use crate::case::camel_case;
use crate::macros::{split_arguments, split_call};
use crate::selector::{
    class_identifier, function_identifier, is_class_selector, placeholder_identifier,
    selector_kind, SelectorKind,
};
use crate::vars::is_nested_in_mixin;
use crate::{CodegenError, Entry, EntryKind, TransformContext, TransformOptions};
use emotify_parser::{Edge, NodeId, NodeKind, Stylesheet};

/// Register an entry for every class and placeholder rule outside a mixin.
pub fn classify_rules(
    sheet: &Stylesheet,
    ctx: &mut TransformContext,
    options: &TransformOptions,
) -> Result<(), CodegenError> {
    for id in sheet.descendants(sheet.root()) {
        let Some(selector) = sheet.kind(id).selector() else {
            continue;
        };
        let Some(kind) = selector_kind(selector) else {
            continue;
        };
        if is_nested_in_mixin(sheet, id) {
            continue;
        }

        let (name, kind) = match kind {
            SelectorKind::Placeholder => (placeholder_identifier(selector), EntryKind::Placeholder),
            SelectorKind::Class => (class_identifier(selector), EntryKind::Class),
        };
        let entry = Entry {
            name,
            kind,
            params: String::new(),
            body: flatten_rule(sheet, id),
            origin_line: sheet.line(id),
        };
        ctx.register(entry, options.collisions)?;
    }
    Ok(())
}

/// Register an entry for every `@mixin`.
pub fn extract_mixins(
    sheet: &Stylesheet,
    ctx: &mut TransformContext,
    options: &TransformOptions,
) -> Result<(), CodegenError> {
    for id in sheet.descendants(sheet.root()) {
        let NodeKind::AtRule { name, params, .. } = sheet.kind(id) else {
            continue;
        };
        if name != "mixin" {
            continue;
        }

        let (binding, parameters) = mixin_signature(params);
        let entry = Entry {
            name: binding,
            kind: EntryKind::Mixin,
            params: parameters,
            body: flatten_mixin(sheet, id),
            origin_line: sheet.line(id),
        };
        ctx.register(entry, options.collisions)?;
    }
    Ok(())
}

/// Serialize the inside of a class or placeholder rule.
///
/// - the rule's own `selector {` and `}` are dropped
/// - nested class rules are dropped with everything inside them
/// - `@extend` / `@include` emit their rewritten params only
/// - everything else is copied as-is
pub fn flatten_rule(sheet: &Stylesheet, rule: NodeId) -> String {
    let mut body = String::new();
    let mut skipping: Option<NodeId> = None;

    sheet.stringify_with(rule, &mut |text: &str, node, edge| {
        if let Some(skipped) = skipping {
            if node == Some(skipped) && edge == Some(Edge::End) {
                skipping = None;
            }
            return;
        }

        let Some(node) = node else {
            body.push_str(text);
            return;
        };
        if node == rule && edge.is_some() {
            return;
        }

        match sheet.kind(node) {
            NodeKind::Rule { selector } if is_class_selector(selector) => {
                if edge == Some(Edge::Start) {
                    skipping = Some(node);
                }
            }
            NodeKind::AtRule { name, params, .. } if is_macro(name) => {
                if edge != Some(Edge::End) {
                    body.push_str(params);
                }
            }
            _ => body.push_str(text),
        }
    });

    body
}

/// Serialize the inside of a `@mixin` block, dropping only its own braces.
pub fn flatten_mixin(sheet: &Stylesheet, mixin: NodeId) -> String {
    let mut body = String::new();

    sheet.stringify_with(mixin, &mut |text: &str, node, edge| {
        let Some(node) = node else {
            body.push_str(text);
            return;
        };
        if node == mixin && edge.is_some() {
            return;
        }

        match sheet.kind(node) {
            NodeKind::AtRule { name, params, .. } if is_macro(name) => {
                if edge != Some(Edge::End) {
                    body.push_str(params);
                }
            }
            _ => body.push_str(text),
        }
    });

    body
}

/// Function name and parameter list for a mixin:
/// `ad-exact($width, $height: 10px)` becomes `("adExact", "width, height = '10px'")`.
pub fn mixin_signature(params: &str) -> (String, String) {
    let (name, arguments) = split_call(params);
    let parameters: Vec<String> = arguments
        .map(split_arguments)
        .unwrap_or_default()
        .into_iter()
        .map(|param| match param.split_once(':') {
            Some((name, default)) => {
                let default = default.trim().trim_matches(|c| c == '\'' || c == '"');
                let default = default.replace('\\', "\\\\").replace('\'', "\\'");
                format!("{} = '{default}'", camel_case(name))
            }
            None => camel_case(param),
        })
        .collect();
    (function_identifier(name), parameters.join(", "))
}

fn is_macro(name: &str) -> bool {
    name == "extend" || name == "include"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite;
    use emotify_parser::Parser;
    use pretty_assertions::assert_eq;

    fn registry(source: &str) -> TransformContext {
        let options = TransformOptions::default();
        let mut sheet = Parser::parse(source).unwrap();
        let mut ctx = TransformContext::new();
        rewrite(&mut sheet, &mut ctx, &options).unwrap();
        classify_rules(&sheet, &mut ctx, &options).unwrap();
        extract_mixins(&sheet, &mut ctx, &options).unwrap();
        ctx
    }

    fn body<'a>(ctx: &'a TransformContext, name: &str) -> &'a str {
        &ctx.entries().iter().find(|e| e.name == name).unwrap().body
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn test_class_and_placeholder_kinds() {
        let ctx = registry("%box { width: 1px; }\n.card { @extend %box; }\na { color: red; }");
        let kinds: Vec<(&str, EntryKind)> = ctx
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![("box", EntryKind::Placeholder), ("card", EntryKind::Class)]
        );
    }

    #[test]
    fn test_origin_lines() {
        let ctx = registry("\n\n.a {\n}\n.b {\n}");
        let lines: Vec<usize> = ctx.entries().iter().map(|e| e.origin_line).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn test_rules_inside_mixin_skipped() {
        let ctx = registry("@mixin m { .inner { color: red; } }");
        let names: Vec<&str> = ctx.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["m"]);
    }

    // =========================================================================
    // Rule bodies
    // =========================================================================

    #[test]
    fn test_rule_body_drops_own_braces() {
        let ctx = registry(".card {\n  color: red;\n}");
        assert_eq!(body(&ctx, "card"), "\n  color: red;\n");
    }

    #[test]
    fn test_macros_emit_rewritten_params() {
        let ctx = registry(".card {\n  @extend %box;\n  @include shadow(2px);\n}");
        assert_eq!(
            body(&ctx, "card"),
            "\n  ${box};\n  ${shadow('2px')};\n"
        );
    }

    #[test]
    fn test_nested_class_cut_out_of_parent() {
        let ctx = registry(
            ".card {\n  color: red;\n  .title {\n    font-weight: bold;\n  }\n  margin: 0;\n}",
        );
        assert_eq!(body(&ctx, "card"), "\n  color: red;\n  \n  margin: 0;\n");
        assert!(!body(&ctx, "card").contains("font-weight"));
        assert_eq!(body(&ctx, "title"), "\n    font-weight: bold;\n  ");
    }

    #[test]
    fn test_nested_class_keeps_its_own_nested_rules() {
        let ctx = registry(".card { .title { &:hover { color: red; } } }");
        assert_eq!(body(&ctx, "card"), "  ");
        assert_eq!(body(&ctx, "title"), " &:hover { color: red; } ");
    }

    #[test]
    fn test_pseudo_and_media_blocks_kept() {
        let ctx = registry(
            ".link {\n  &:hover { color: blue; }\n  @include media('>mobile') { display: none; }\n}",
        );
        assert_eq!(
            body(&ctx, "link"),
            "\n  &:hover { color: blue; }\n  @media (min-width: 321px) { display: none; }\n"
        );
    }

    #[test]
    fn test_nested_placeholder_is_not_cut() {
        let ctx = registry(".a { %b { color: red; } }");
        assert_eq!(body(&ctx, "a"), " %b { color: red; } ");
        assert_eq!(body(&ctx, "b"), " color: red; ");
    }

    // =========================================================================
    // Mixins
    // =========================================================================

    #[test]
    fn test_mixin_signature() {
        assert_eq!(
            mixin_signature("ad-exact($width, $height)"),
            ("adExact".to_string(), "width, height".to_string())
        );
        assert_eq!(
            mixin_signature("clearfix"),
            ("clearfix".to_string(), String::new())
        );
        assert_eq!(
            mixin_signature("gap($size: 10px, $side-name: 'left')"),
            ("gap".to_string(), "size = '10px', sideName = 'left'".to_string())
        );
        assert_eq!(
            mixin_signature("default($icon: '\\f101')"),
            ("default_".to_string(), "icon = '\\\\f101'".to_string())
        );
    }

    #[test]
    fn test_mixin_body_uses_local_interpolations() {
        let ctx = registry("@mixin ad-exact($width, $height) {\n  width: $width;\n  height: $height;\n}");
        let entry = &ctx.entries()[0];
        assert_eq!(entry.name, "adExact");
        assert_eq!(entry.params, "width, height");
        assert_eq!(entry.kind, EntryKind::Mixin);
        assert_eq!(entry.body, "\n  width: ${width};\n  height: ${height};\n");
        assert!(!ctx.uses_local_vars);
    }

    #[test]
    fn test_mixin_body_keeps_nested_rules() {
        let ctx = registry("@mixin m {\n  .x { color: red; }\n  @extend %y;\n}");
        assert_eq!(ctx.entries()[0].body, "\n  .x { color: red; }\n  ${y};\n");
    }
}
