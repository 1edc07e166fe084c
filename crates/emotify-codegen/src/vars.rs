//! Variable resolution.
//!
//! Declaration values that are a Sass variable become template interpolations:
//!
//! | Value | Context | Result |
//! |-------|---------|--------|
//! | `$fe-brary-global-tablet-min-width` | anywhere | `${vars.global.tabletMinWidth}` |
//! | `$gutter-size` | inside `@mixin` | `${gutterSize}` |
//! | `$gutter-size` | elsewhere | `${customVars.gutterSize}` |
//!
//! Any other value is left untouched.

use crate::case::camel_case;
use crate::{TransformContext, TransformOptions};
use emotify_parser::{NodeId, NodeKind, Stylesheet};

/// True if `node` sits anywhere inside a `@mixin` block.
pub fn is_nested_in_mixin(sheet: &Stylesheet, node: NodeId) -> bool {
    sheet
        .ancestors(node)
        .take_while(|&id| id != sheet.root())
        .any(|id| sheet.kind(id).is_at_rule("mixin"))
}

/// Rewrite a single declaration value.
pub fn resolve_value(
    value: &str,
    in_mixin: bool,
    ctx: &mut TransformContext,
    options: &TransformOptions,
) -> String {
    if value.starts_with("${") {
        return value.to_string();
    }

    if let Some(name) = value.strip_prefix(options.special_prefix.as_str()) {
        ctx.uses_special_vars = true;

        let (category, rest) = name.split_once('-').unwrap_or((name, ""));
        let member = camel_case(rest);
        let namespace = &options.special_namespace;
        return if member.is_empty() {
            format!("${{{namespace}.{category}}}")
        } else {
            format!("${{{namespace}.{category}.{member}}}")
        };
    }

    if let Some(name) = value.strip_prefix('$') {
        let ident = camel_case(name);
        if ident.is_empty() {
            return value.to_string();
        }
        if in_mixin {
            return format!("${{{ident}}}");
        }

        ctx.uses_local_vars = true;
        return format!("${{{}.{ident}}}", options.local_namespace);
    }

    value.to_string()
}

/// Rewrite every declaration value in the sheet.
pub fn resolve_declarations(
    sheet: &mut Stylesheet,
    ctx: &mut TransformContext,
    options: &TransformOptions,
) {
    let mut rewritten = 0usize;

    for id in sheet.descendants(sheet.root()) {
        let NodeKind::Decl { value, .. } = sheet.kind(id) else {
            continue;
        };
        let in_mixin = is_nested_in_mixin(sheet, id);
        let resolved = resolve_value(value, in_mixin, ctx, options);

        if let NodeKind::Decl { value, .. } = &mut sheet.node_mut(id).kind {
            if *value != resolved {
                *value = resolved;
                rewritten += 1;
            }
        }
    }

    tracing::debug!(rewritten, "resolved variable references");
}
