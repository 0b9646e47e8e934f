use log::trace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    comments::strip_comments,
    parser::ExtractOptions,
    types::{SpecKind, Specifier},
};

// One alternation so matches never overlap: `import x = require("y")` must
// not also count as a `require` call.
static RE_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"\b(?:export\s+)?import\s+[\w$]+\s*=\s*require\s*\(\s*["'](?P<equals>[^"'\n]+)["']\s*\)"#,
        r#"|\bexport\s+(?:type\s+)?(?:\*(?:\s*as\s+[\w$]+)?|\{[^}]*\})\s*from\s*["'](?P<reexport>[^"'\n]+)["']"#,
        r#"|\bimport\s*(?P<type>type\s+)?(?:[\w$*{}\s,]+?\s*from\s*)?["'](?P<static>[^"'\n]+)["']"#,
        r#"|\b(?:require|import)\s*\(\s*["'](?P<dynamic>[^"'\n]+)["']\s*\)"#,
    ))
    .expect("import pattern is valid")
});

/// Pattern-based import scan over comment-stripped text.
///
/// Used when the parser cannot recover a syntax tree. Every declaration shape
/// the parser recognizes is matched, in source order. Import-like text inside
/// string literals is matched too.
pub fn scan_imports(source_text: &str, options: &ExtractOptions) -> Vec<Specifier> {
    let stripped = strip_comments(source_text);

    RE_IMPORT
        .captures_iter(&stripped)
        .filter_map(|caps| specifier_from(&caps, options))
        .collect()
}

fn specifier_from(caps: &Captures, options: &ExtractOptions) -> Option<Specifier> {
    let (request, kind) = if let Some(m) = caps.name("equals") {
        (m, SpecKind::ImportEquals)
    } else if let Some(m) = caps.name("reexport") {
        (m, SpecKind::ReExport)
    } else if let Some(m) = caps.name("static") {
        let kind = if caps.name("type").is_some() { SpecKind::TypeOnly } else { SpecKind::Static };
        (m, kind)
    } else {
        let m = caps.name("dynamic")?;
        if !options.include_dynamic {
            return None;
        }
        (m, SpecKind::Dynamic)
    };

    trace!("Scanned {:?} import: '{}'", kind, request.as_str());
    Some(Specifier { request: request.as_str().to_string(), kind })
}
