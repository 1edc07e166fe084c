//! emotify Code Generator
//!
//! Rewrites a parsed Sass stylesheet into a JavaScript module of Emotion
//! `css` template literals. Variables become interpolations, `@extend` and
//! `@include` become template references and calls, nested rule bodies are
//! flattened, and every class, placeholder and mixin is emitted in source order.
//!
//! ```text
//! source → Parser → rewrite() → classify() → assemble() → tidy() → module text
//! ```
//!
//! # Example
//!
//! ```
//! use emotify_codegen::{transform, TransformOptions};
//!
//! let out = transform(".card { color: red; }", "card.scss", &TransformOptions::default()).unwrap();
//! assert!(out.code.contains("export const card = css`"));
//! ```

pub mod assemble;
pub mod breakpoints;
pub mod case;
pub mod flatten;
pub mod macros;
pub mod selector;
pub mod tidy;
pub mod vars;

use emotify_parser::{ParseError, Parser, Stylesheet};
use std::collections::HashMap;

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    /// Malformed stylesheet, reported by the parser unchanged.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// `@include media(...)` outside the breakpoint table.
    #[error(
        "Found an unrecognised `@include {params}` at line {line}, please change it to a \
         vanilla CSS media query that uses fe-brary Sass vars then try this transformer again"
    )]
    UnrecognizedBreakpoint { params: String, line: usize },

    /// `@include name { ... }`: the generated functions take no content block.
    #[error(
        "`@include {params}` at line {line} passes a content block, which a generated \
         function cannot receive; move the block next to the include and try again"
    )]
    IncludeContentBlock { params: String, line: usize },

    /// Two constructs produce the same identifier under [`CollisionPolicy::Error`].
    #[error("`{name}` is defined at line {first_line} and again at line {second_line}")]
    Collision {
        name: String,
        first_line: usize,
        second_line: usize,
    },
}

/// What to do when two constructs map to the same identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Keep the later definition and log a warning.
    #[default]
    Warn,
    /// Abort the transform.
    Error,
}

/// Names and imports used in the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Prefix marking a fe-brary variable, e.g. `$fe-brary-global-tablet-min-width`.
    pub special_prefix: String,
    /// Binding the fe-brary variables are imported as.
    pub special_namespace: String,
    pub special_import: String,
    /// Binding the project's own variables are imported as.
    pub local_namespace: String,
    pub local_import: String,
    pub runtime_import: String,
    /// Tag used for every template literal.
    pub template_tag: String,
    pub collisions: CollisionPolicy,
    /// Run [`tidy::tidy`] over the assembled module.
    pub tidy: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            special_prefix: "$fe-brary-".into(),
            special_namespace: "vars".into(),
            special_import: "import { variables as vars } from '@domain-group/fe-brary';".into(),
            local_namespace: "customVars".into(),
            local_import: "import customVars from '../variables';".into(),
            runtime_import: "import { css } from 'emotion';".into(),
            template_tag: "css".into(),
            collisions: CollisionPolicy::Warn,
            tidy: true,
        }
    }
}

/// Kind of an emitted unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `.name` rule, exported.
    Class,
    /// `%name` rule, module-private.
    Placeholder,
    /// `@mixin`, emitted as a function.
    Mixin,
}

/// One emitted unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Binding emitted in the module. Unique per module.
    pub name: String,
    pub kind: EntryKind,
    /// Parameter list of a mixin function, e.g. `width, height = '10px'`.
    /// Empty for rules.
    pub params: String,
    /// Flattened template body.
    pub body: String,
    /// Source line of the defining node. Only used for ordering.
    pub origin_line: usize,
}

/// An identifier produced by more than one construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub name: String,
    pub first_line: usize,
    pub second_line: usize,
}

/// State for a single transform call: the import flags and the entry registry.
///
/// Created at the start of a transform and dropped after assembly.
#[derive(Debug, Default)]
pub struct TransformContext {
    pub uses_special_vars: bool,
    pub uses_local_vars: bool,
    entries: Vec<Entry>,
    /// Entry position by binding name.
    index: HashMap<String, usize>,
    collisions: Vec<Collision>,
}

impl TransformContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry. When the binding name is already taken, the
    /// definition that comes later in the source is kept.
    pub fn register(&mut self, entry: Entry, policy: CollisionPolicy) -> Result<(), CodegenError> {
        let Some(&slot) = self.index.get(&entry.name) else {
            self.index.insert(entry.name.clone(), self.entries.len());
            self.entries.push(entry);
            return Ok(());
        };

        let existing_line = self.entries[slot].origin_line;
        let replaces = entry.origin_line >= existing_line;
        let collision = Collision {
            name: entry.name.clone(),
            first_line: existing_line.min(entry.origin_line),
            second_line: existing_line.max(entry.origin_line),
        };
        if policy == CollisionPolicy::Error {
            return Err(CodegenError::Collision {
                name: collision.name,
                first_line: collision.first_line,
                second_line: collision.second_line,
            });
        }

        tracing::warn!(
            name = %collision.name,
            first_line = collision.first_line,
            second_line = collision.second_line,
            "identifier defined twice, keeping the later definition"
        );
        if replaces {
            self.entries[slot] = entry;
        }
        self.collisions.push(collision);
        Ok(())
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries ordered by source line. Ties keep registration order.
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.origin_line);
        sorted
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}

/// Result of a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// The generated module.
    pub code: String,
    /// Emitted entries in output order.
    pub entries: Vec<Entry>,
    pub collisions: Vec<Collision>,
}

/// Convert stylesheet source into an Emotion module.
///
/// `path` is only used for diagnostics.
pub fn transform(
    source: &str,
    path: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, CodegenError> {
    let _span = tracing::debug_span!("transform", path).entered();

    let mut sheet = Parser::parse(source)?;
    let mut ctx = TransformContext::new();

    rewrite(&mut sheet, &mut ctx, options)?;
    classify(&sheet, &mut ctx, options)?;

    let mut code = assemble::assemble(&ctx, options);
    if options.tidy {
        code = tidy::tidy(&code);
    }

    Ok(TransformOutput {
        code,
        entries: ctx.sorted_entries().into_iter().cloned().collect(),
        collisions: ctx.collisions,
    })
}

/// Run the in-place rewrite passes: `@extend`, `@include`, then declaration values.
///
/// Already rewritten values and params (starting with `${`) are left alone, so
/// running this twice on the same sheet changes nothing.
pub fn rewrite(
    sheet: &mut Stylesheet,
    ctx: &mut TransformContext,
    options: &TransformOptions,
) -> Result<(), CodegenError> {
    macros::normalize_extends(sheet);
    macros::normalize_includes(sheet, ctx, options)?;
    vars::resolve_declarations(sheet, ctx, options);
    Ok(())
}

/// Populate the registry from a rewritten sheet: classes and placeholders,
/// then mixins.
pub fn classify(
    sheet: &Stylesheet,
    ctx: &mut TransformContext,
    options: &TransformOptions,
) -> Result<(), CodegenError> {
    flatten::classify_rules(sheet, ctx, options)?;
    flatten::extract_mixins(sheet, ctx, options)?;
    tracing::debug!(entries = ctx.entries.len(), "classified stylesheet");
    Ok(())
}
