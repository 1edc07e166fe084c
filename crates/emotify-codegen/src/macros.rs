//! `@extend` and `@include` normalization.
//!
//! Both at-rules are rewritten in place so the flattener can copy their params
//! straight into a template body:
//!
//! ```text
//! @extend %box;                    → ${box};
//! @include ad-exact(300px, 250px); → ${adExact('300px', '250px')};
//! @include media('>tablet') {...}  → @media (min-width: ${vars.global.tabletMinWidth + 1}) {...}
//! ```

use crate::breakpoints;
use crate::selector::{function_identifier, placeholder_identifier};
use crate::{CodegenError, TransformContext, TransformOptions};
use emotify_parser::{NodeId, NodeKind, Stylesheet};

/// Name of the include-media mixin.
const MEDIA_MACRO: &str = "media";

/// Rewrite every `@extend %name` to `${name};`.
pub fn normalize_extends(sheet: &mut Stylesheet) {
    for id in at_rules(sheet, "extend") {
        if let NodeKind::AtRule { params, .. } = &mut sheet.node_mut(id).kind {
            if !params.starts_with("${") {
                *params = format!("${{{}}};", placeholder_identifier(params));
            }
        }
    }
}

/// Rewrite every `@include`: breakpoint macros become `@media` conditions,
/// anything else becomes a call interpolation. A call with a content block is
/// an error.
pub fn normalize_includes(
    sheet: &mut Stylesheet,
    ctx: &mut TransformContext,
    options: &TransformOptions,
) -> Result<(), CodegenError> {
    let mut media = 0usize;
    let mut calls = 0usize;

    for id in at_rules(sheet, "include") {
        let line = sheet.line(id);
        let NodeKind::AtRule {
            name,
            params,
            has_block,
        } = &mut sheet.node_mut(id).kind
        else {
            continue;
        };
        if params.starts_with("${") {
            continue;
        }

        let (callee, arguments) = split_call(params);
        if callee == MEDIA_MACRO {
            let condition = arguments.and_then(breakpoints::resolve).ok_or_else(|| {
                CodegenError::UnrecognizedBreakpoint {
                    params: params.clone(),
                    line,
                }
            })?;
            if condition.uses_variables() {
                ctx.uses_special_vars = true;
            }
            *name = MEDIA_MACRO.into();
            *params = condition.to_params(&options.special_namespace);
            media += 1;
        } else if *has_block {
            return Err(CodegenError::IncludeContentBlock {
                params: params.clone(),
                line,
            });
        } else {
            *params = format!("${{{}}};", call_expression(callee, arguments));
            calls += 1;
        }
    }

    tracing::debug!(media, calls, "normalized includes");
    Ok(())
}

/// Split `name(args)` into the trimmed name and the text between the parens.
/// Returns `None` for the arguments when there is no parameter list.
pub fn split_call(params: &str) -> (&str, Option<&str>) {
    match params.split_once('(') {
        Some((callee, rest)) => {
            let rest = rest.trim_end();
            let arguments = rest.strip_suffix(')').unwrap_or(rest);
            (callee.trim(), Some(arguments))
        }
        None => (params.trim(), None),
    }
}

/// Split an argument list on top-level commas, ignoring commas inside
/// parentheses or quotes. Empty input yields no arguments.
pub fn split_arguments(arguments: &str) -> Vec<&str> {
    if arguments.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in arguments.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(arguments[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(arguments[start..].trim());
    parts
}

/// Build `camelName('arg', ...)`. Each argument is passed as a string literal.
fn call_expression(callee: &str, arguments: Option<&str>) -> String {
    let args: Vec<String> = arguments
        .map(split_arguments)
        .unwrap_or_default()
        .into_iter()
        .map(quote_argument)
        .collect();
    format!("{}({})", function_identifier(callee), args.join(", "))
}

/// Wrap an argument in single quotes. Sass string quotes are replaced.
fn quote_argument(arg: &str) -> String {
    let inner = arg
        .strip_prefix('\'')
        .and_then(|a| a.strip_suffix('\''))
        .or_else(|| arg.strip_prefix('"').and_then(|a| a.strip_suffix('"')))
        .unwrap_or(arg);
    format!("'{}'", inner.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// All at-rules with the given name, in document order.
fn at_rules(sheet: &Stylesheet, name: &str) -> Vec<NodeId> {
    sheet
        .descendants(sheet.root())
        .into_iter()
        .filter(|&id| sheet.kind(id).is_at_rule(name))
        .collect()
}
