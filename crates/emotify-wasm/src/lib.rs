//! WASM bindings for the emotify converter.
//!
//! Exposes `transform()` to JavaScript via wasm-bindgen.
//! Returns a JS object `{ code, exports }` or throws on error.

use emotify_codegen::{EntryKind, TransformOptions};
use wasm_bindgen::prelude::*;

/// Convert Sass source into an Emotion module.
///
/// Returns a JS object with `{ code: string, exports: string[] }`, where
/// `exports` lists the exported class constants in output order.
/// Throws a JS error if parsing or conversion fails.
#[wasm_bindgen]
pub fn transform(source: &str, path: &str) -> Result<JsValue, JsError> {
    let output = emotify_codegen::transform(source, path, &TransformOptions::default())
        .map_err(|e| JsError::new(&e.to_string()))?;

    let exports = js_sys::Array::new();
    for name in exported_names(&output) {
        exports.push(&JsValue::from_str(&name));
    }

    // Serialize to a plain JS object { code, exports }
    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"code".into(), &output.code.into())
        .map_err(|_| JsError::new("Failed to set code property"))?;
    js_sys::Reflect::set(&js_obj, &"exports".into(), &exports.into())
        .map_err(|_| JsError::new("Failed to set exports property"))?;

    Ok(js_obj.into())
}

/// Get the converter version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn exported_names(output: &emotify_codegen::TransformOutput) -> Vec<String> {
    output
        .entries
        .iter()
        .filter(|e| e.kind == EntryKind::Class)
        .map(|e| e.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM)
    // =========================================================================

    fn native_transform(source: &str) -> emotify_codegen::TransformOutput {
        emotify_codegen::transform(source, "test.scss", &TransformOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_document() {
        let output = native_transform("");
        assert_eq!(output.code, "import { css } from 'emotion';\n");
        assert!(exported_names(&output).is_empty());
    }

    #[test]
    fn test_exported_names_skip_private_entries() {
        let output = native_transform("%box { }\n@mixin m { }\n.card { @extend %box; }\n.card-title { }");
        assert_eq!(exported_names(&output), vec!["card", "cardTitle"]);
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_multiple_transforms() {
        // No flag leakage between calls
        let out1 = native_transform(".a { width: $fe-brary-global-tablet-min-width; }");
        let out2 = native_transform(".b { width: $gap; }");
        assert!(out1.code.contains("@domain-group/fe-brary"));
        assert!(!out1.code.contains("customVars"));
        assert!(out2.code.contains("customVars"));
        assert!(!out2.code.contains("@domain-group/fe-brary"));
    }

    #[test]
    fn test_error_is_reported() {
        let result = emotify_codegen::transform(
            ".a { @include media('>watch') { } }",
            "test.scss",
            &TransformOptions::default(),
        );
        assert!(result.unwrap_err().to_string().contains("vanilla CSS media query"));
    }
}
