use emotify_codegen::{
    classify, rewrite, transform, CodegenError, CollisionPolicy, EntryKind, TransformContext,
    TransformOptions,
};
use emotify_parser::Parser;
use pretty_assertions::assert_eq;

fn convert(source: &str) -> String {
    transform(source, "test.scss", &TransformOptions::default())
        .unwrap()
        .code
}

const AD: &str = "@mixin ad-exact($width, $height) {
  width: $width;
  height: $height;
}

.ad {
  @include ad-exact(300px, 250px);
  margin: $gutter;

  @include media('>=desktop') {
    margin: 0;
  }

  .ad-label {
    color: $fe-brary-colour-neutral-medium;
  }
}
";

// =========================================================================
// End to end
// =========================================================================

#[test]
fn test_placeholder_and_extending_class() {
    let source = "%box {\n  width: $fe-brary-global-tablet-min-width;\n}\n\n.card {\n  @extend %box;\n}\n";
    assert_eq!(
        convert(source),
        "import { css } from 'emotion';
import { variables as vars } from '@domain-group/fe-brary';

const box = css`
  width: ${vars.global.tabletMinWidth};
`;

export const card = css`
  ${box};
`;
"
    );
}

#[test]
fn test_mixin_include_media_and_nested_class() {
    assert_eq!(
        convert(AD),
        "import { css } from 'emotion';
import { variables as vars } from '@domain-group/fe-brary';
import customVars from '../variables';

function adExact(width, height) {
  return css`
  width: ${width};
  height: ${height};
  `;
}

export const ad = css`
  ${adExact('300px', '250px')};
  margin: ${customVars.gutter};

  @media (min-width: ${vars.global.desktopMinWidth}) {
    margin: 0;
  }
`;

export const adLabel = css`
    color: ${vars.colour.neutralMedium};
`;
"
    );
}

#[test]
fn test_empty_stylesheet() {
    assert_eq!(convert(""), "import { css } from 'emotion';\n");
}

#[test]
fn test_plain_values_need_no_variable_imports() {
    let out = convert(".a { color: red; }");
    assert!(!out.contains("fe-brary"));
    assert!(!out.contains("customVars"));
    assert!(out.contains("export const a = css` color: red;\n`;"));
}

#[test]
fn test_untidied_output() {
    let options = TransformOptions {
        tidy: false,
        ..TransformOptions::default()
    };
    let out = transform(".a {\n  color: red;\n}", "a.scss", &options).unwrap();
    assert_eq!(
        out.code,
        "import { css } from 'emotion';\n\nexport const a = css`\n  color: red;\n`;\n\n"
    );
}

#[test]
fn test_include_arguments_with_quote_and_backslash() {
    let out = convert(".a { @include shadow(\"it's\", \"\\f101\"); }");
    assert!(out.contains("export const a = css` ${shadow('it\\'s', '\\\\f101')};\n`;"));
}

#[test]
fn test_backslash_in_plain_css_is_escaped() {
    let out = convert(".icon { content: '\\f101'; }");
    assert!(out.contains("content: '\\\\f101';"));
}

#[test]
fn test_reserved_mixin_name() {
    let out = convert("@mixin default {\n  color: red;\n}\n.a {\n  @include default;\n}\n");
    assert!(out.contains("function default_() {"));
    assert!(out.contains("${default_()};"));
}

// =========================================================================
// Ordering
// =========================================================================

#[test]
fn test_entries_follow_source_lines() {
    let source = ".first { }\n@mixin second { }\n%third { }\n.fourth { .fifth { } }\n@mixin sixth { }";
    let out = transform(source, "order.scss", &TransformOptions::default()).unwrap();
    let names: Vec<&str> = out.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["first", "second", "third", "fourth", "fifth", "sixth"]
    );

    let positions: Vec<usize> = ["const first", "function second", "const third", "const fourth", "const fifth", "function sixth"]
        .iter()
        .map(|needle| out.code.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_entry_kinds() {
    let out = transform(AD, "ad.scss", &TransformOptions::default()).unwrap();
    let kinds: Vec<EntryKind> = out.entries.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EntryKind::Mixin, EntryKind::Class, EntryKind::Class]
    );
}

// =========================================================================
// Scope
// =========================================================================

#[test]
fn test_same_variable_inside_and_outside_mixin() {
    let out = convert("@mixin m($size) {\n  width: $size;\n}\n.a {\n  width: $size;\n}\n");
    assert!(out.contains("return css`\n  width: ${size};"));
    assert!(out.contains("export const a = css`\n  width: ${customVars.size};"));
    assert!(out.contains("import customVars from '../variables';"));
}

#[test]
fn test_variable_only_inside_mixin_needs_no_import() {
    let out = convert("@mixin m($size) {\n  width: $size;\n}\n");
    assert!(!out.contains("customVars"));
}

#[test]
fn test_nested_class_declarations_not_duplicated() {
    let out = convert(".card {\n  .title {\n    font-weight: bold;\n  }\n}\n");
    assert_eq!(out.matches("font-weight: bold;").count(), 1);
    assert!(out.contains("export const title = css`\n    font-weight: bold;\n`;"));
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_unrecognized_breakpoint_aborts() {
    let result = transform(
        ".a { color: $brand; }\n.b {\n  @include media('>retina') { color: red; }\n}",
        "bad.scss",
        &TransformOptions::default(),
    );
    assert_eq!(
        result.unwrap_err(),
        CodegenError::UnrecognizedBreakpoint {
            params: "media('>retina')".into(),
            line: 3
        }
    );
}

#[test]
fn test_parse_error_aborts() {
    let result = transform(".a { color red }", "bad.scss", &TransformOptions::default());
    assert!(matches!(result, Err(CodegenError::Parse(_))));
}

#[test]
fn test_include_content_block_aborts() {
    let result = transform(
        ".a { @include hover { color: red; } }",
        "block.scss",
        &TransformOptions::default(),
    );
    assert_eq!(
        result.unwrap_err(),
        CodegenError::IncludeContentBlock {
            params: "hover".into(),
            line: 1
        }
    );
}

#[test]
fn test_collision_warns_and_keeps_later() {
    let out = transform(
        ".card { color: red; }\n%card { color: blue; }",
        "dup.scss",
        &TransformOptions::default(),
    )
    .unwrap();
    assert_eq!(out.collisions.len(), 1);
    assert_eq!(out.collisions[0].name, "card");
    assert!(out.code.contains("const card = css` color: blue;"));
    assert!(!out.code.contains("color: red"));
}

#[test]
fn test_collision_error_policy() {
    let options = TransformOptions {
        collisions: CollisionPolicy::Error,
        ..TransformOptions::default()
    };
    let err = transform(".card { }\n.card { }", "dup.scss", &options).unwrap_err();
    assert_eq!(
        err,
        CodegenError::Collision {
            name: "card".into(),
            first_line: 1,
            second_line: 2
        }
    );
}

#[test]
fn test_mixins_with_same_name_collide() {
    let out = transform(
        "@mixin m($a) {\n  width: $a;\n}\n@mixin m($b) {\n  height: $b;\n}\n",
        "dup.scss",
        &TransformOptions::default(),
    )
    .unwrap();
    assert_eq!(out.collisions.len(), 1);
    assert_eq!(out.collisions[0].first_line, 1);
    assert_eq!(out.collisions[0].second_line, 4);
    assert!(out.code.contains("function m(b) {"));
    assert!(!out.code.contains("function m(a)"));
}

#[test]
fn test_mixin_and_class_with_same_name_collide() {
    let out = transform(
        ".m {\n  color: red;\n}\n@mixin m {\n  color: blue;\n}\n",
        "dup.scss",
        &TransformOptions::default(),
    )
    .unwrap();
    assert_eq!(out.collisions.len(), 1);
    assert_eq!(out.entries.len(), 1);
    assert_eq!(out.entries[0].kind, EntryKind::Mixin);
    assert!(out.code.contains("function m() {"));
    assert!(!out.code.contains("export const m"));
}

#[test]
fn test_earlier_mixin_loses_to_later_class() {
    let out = transform(
        "@mixin m {\n  color: blue;\n}\n.m {\n  color: red;\n}\n",
        "dup.scss",
        &TransformOptions::default(),
    )
    .unwrap();
    assert_eq!(out.collisions.len(), 1);
    assert!(out.code.contains("export const m = css`"));
    assert!(!out.code.contains("function m"));
}

#[test]
fn test_mixin_collision_error_policy() {
    let options = TransformOptions {
        collisions: CollisionPolicy::Error,
        ..TransformOptions::default()
    };
    let err = transform(
        "@mixin m($a) { width: $a; }\n@mixin m($b) { width: $b; }\n.m { color: red; }",
        "dup.scss",
        &options,
    )
    .unwrap_err();
    assert_eq!(
        err,
        CodegenError::Collision {
            name: "m".into(),
            first_line: 1,
            second_line: 3
        }
    );
}

// =========================================================================
// Idempotence
// =========================================================================

#[test]
fn test_rewrite_twice_matches_single_run() {
    let options = TransformOptions::default();
    let mut sheet = Parser::parse(AD).unwrap();
    let mut ctx = TransformContext::new();

    rewrite(&mut sheet, &mut ctx, &options).unwrap();
    let once = sheet.to_css();
    rewrite(&mut sheet, &mut ctx, &options).unwrap();
    assert_eq!(sheet.to_css(), once);

    classify(&sheet, &mut ctx, &options).unwrap();
    let code = emotify_codegen::tidy::tidy(&emotify_codegen::assemble::assemble(&ctx, &options));
    assert_eq!(code, convert(AD));
}
