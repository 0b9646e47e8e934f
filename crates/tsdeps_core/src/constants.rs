//! File names and extension lists shared by extraction, resolution and
//! module collection.

/// Project configuration file searched for in every ancestor directory.
pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Upper bound on ancestor directories visited while looking for
/// [`TSCONFIG_FILE`]. Guards against symlink loops in odd layouts.
pub const MAX_CONFIG_SEARCH_DEPTH: usize = 256;

/// Extensions probed by the resolver, in priority order.
pub const RESOLVE_EXTENSIONS: &[&str] = &[".ts", ".js"];

/// File extensions for JavaScript/TypeScript files that can be analyzed
pub const JS_TS_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
    "js",  // JavaScript
    "jsx", // JavaScript with JSX
    "mjs", // JavaScript module
    "cjs", // JavaScript CommonJS
];
