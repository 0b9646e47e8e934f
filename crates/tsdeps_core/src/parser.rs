use anyhow::{Context, Result};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{fs, path::Path};

use crate::{
    scanner::scan_imports,
    types::{SpecKind, Specifier},
};

/// Controls which import forms are collected besides declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Also collect `require("x")` calls and `import("x")` expressions.
    pub include_dynamic: bool,
}

/// Returns the specifiers of every import declaration in `source_text`, in
/// source order, exactly as written.
///
/// The text is parsed as a TypeScript module. Comments never contribute
/// matches since they are not part of the syntax tree.
pub fn extract(source_text: &str) -> Vec<String> {
    parse_imports(source_text, typescript_module(), &ExtractOptions::default())
        .into_iter()
        .map(|s| s.request)
        .collect()
}

/// Reads `file` and extracts its import specifiers.
pub fn imports_for(file: &Path, options: &ExtractOptions) -> Result<Vec<Specifier>> {
    trace!("Parsing file for imports: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let specs = parse_imports(&src, source_type_for(file), options);
    debug!("Found {} import specifiers in {}", specs.len(), file.display());
    Ok(specs)
}

pub fn parse_imports(
    source_text: &str,
    source_type: SourceType,
    options: &ExtractOptions,
) -> Vec<Specifier> {
    let allocator = Allocator::default();
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(&allocator, source_text, source_type).parse();

    if !errors.is_empty() {
        debug!("Parser reported {} syntax errors", errors.len());
    }
    if panicked || (!errors.is_empty() && program.body.is_empty()) {
        debug!("Parser gave up without a syntax tree; scanning the text instead");
        return scan_imports(source_text, options);
    }

    let mut specs: Vec<Specifier> = Vec::new();

    for stmt in &program.body {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                // Type-only imports are kept: compilers erase them, dependency
                // tracking must not.
                let kind = if decl.import_kind.is_type() {
                    SpecKind::TypeOnly
                } else {
                    SpecKind::Static
                };
                push(&mut specs, decl.source.value.as_str(), kind);
            }
            Statement::TSImportEqualsDeclaration(decl) => {
                import_equals_source(decl, &mut specs);
            }
            Statement::ExportAllDeclaration(decl) => {
                push(&mut specs, decl.source.value.as_str(), SpecKind::ReExport);
            }
            Statement::ExportNamedDeclaration(decl) => {
                if let Some(source) = &decl.source {
                    push(&mut specs, source.value.as_str(), SpecKind::ReExport);
                } else if let Some(Declaration::TSImportEqualsDeclaration(inner)) =
                    &decl.declaration
                {
                    // export import x = require("y")
                    import_equals_source(inner, &mut specs);
                }
            }
            Statement::ExpressionStatement(es) if options.include_dynamic => {
                extract_dynamic_from_expression(&es.expression, &mut specs);
            }
            Statement::VariableDeclaration(vd) if options.include_dynamic => {
                // const x = require('...') or const x = someFunc(require('...'))
                for decl in &vd.declarations {
                    if let Some(init) = &decl.init {
                        extract_dynamic_from_expression(init, &mut specs);
                    }
                }
            }
            _ => {}
        }
    }

    specs
}

fn push(specs: &mut Vec<Specifier>, request: &str, kind: SpecKind) {
    trace!("Found {:?} import: '{}'", kind, request);
    specs.push(Specifier { request: request.to_string(), kind });
}

fn import_equals_source(decl: &TSImportEqualsDeclaration, specs: &mut Vec<Specifier>) {
    // `import x = A.B` aliases a namespace and names no module.
    if let TSModuleReference::ExternalModuleReference(reference) = &decl.module_reference {
        push(specs, reference.expression.value.as_str(), SpecKind::ImportEquals);
    }
}

fn extract_dynamic_from_expression(expr: &Expression, specs: &mut Vec<Specifier>) {
    match expr {
        Expression::CallExpression(ce) => {
            if let Expression::Identifier(callee_ident) = &ce.callee
                && callee_ident.name.as_str() == "require"
                && !ce.arguments.is_empty()
                && let Some(Expression::StringLiteral(sl)) = ce.arguments[0].as_expression()
            {
                push(specs, sl.value.as_str(), SpecKind::Dynamic);
            }
            for arg in &ce.arguments {
                if let Some(arg_expr) = arg.as_expression() {
                    extract_dynamic_from_expression(arg_expr, specs);
                }
            }
            extract_dynamic_from_expression(&ce.callee, specs);
        }
        Expression::ImportExpression(ie) => {
            if let Expression::StringLiteral(sl) = &ie.source {
                push(specs, sl.value.as_str(), SpecKind::Dynamic);
            }
        }
        Expression::AwaitExpression(ae) => {
            extract_dynamic_from_expression(&ae.argument, specs);
        }
        Expression::ArrayExpression(ae) => {
            for elem in &ae.elements {
                if let Some(expr) = elem.as_expression() {
                    extract_dynamic_from_expression(expr, specs);
                }
            }
        }
        Expression::ObjectExpression(oe) => {
            for prop in &oe.properties {
                if let Some(expr) = prop.as_property() {
                    extract_dynamic_from_expression(&expr.value, specs);
                }
            }
        }
        Expression::ConditionalExpression(ce) => {
            extract_dynamic_from_expression(&ce.test, specs);
            extract_dynamic_from_expression(&ce.consequent, specs);
            extract_dynamic_from_expression(&ce.alternate, specs);
        }
        Expression::AssignmentExpression(ae) => {
            extract_dynamic_from_expression(&ae.right, specs);
        }
        Expression::ParenthesizedExpression(pe) => {
            extract_dynamic_from_expression(&pe.expression, specs);
        }
        _ => {}
    }
}

pub(crate) fn typescript_module() -> SourceType {
    SourceType::default().with_typescript(true).with_module(true)
}

/// Picks the parser dialect from the file extension. Anything that is not a
/// known JavaScript extension is parsed as TypeScript. JavaScript always
/// allows JSX; TypeScript only in `.tsx`, where `<T>` casts are not valid.
pub fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    let is_javascript = matches!(ext, Some("js") | Some("jsx") | Some("mjs") | Some("cjs"));

    SourceType::default()
        .with_typescript(!is_javascript)
        .with_jsx(is_javascript || matches!(ext, Some("tsx")))
        .with_module(!matches!(ext, Some("cjs")))
}
