//! Static dependency extraction for TypeScript modules.
//!
//! Given a module path, [`get_dependencies`] returns the files that module
//! imports, resolved on disk and expressed relative to the module's
//! directory. This crate provides:
//! - Import extraction from the oxc syntax tree (all declaration forms,
//!   including type-only and `import x = require()` imports), with a
//!   pattern scan for sources the parser cannot recover
//! - tsconfig.json discovery and `baseUrl`/`paths` loading
//! - Path-mapping resolution followed by extension-probing resolution
//! - Module collection for whole-project walks

mod collector;
mod comments;
mod config;
mod constants;
mod parser;
mod paths;
mod provider;
mod resolver;
mod scanner;
mod types;

// Re-export public API
pub use collector::collect_modules;
pub use comments::strip_comments;
pub use config::{
    find_git_root, load as load_config, load_for as load_config_for, locate as locate_config,
};
pub use constants::{JS_TS_EXTENSIONS, MAX_CONFIG_SEARCH_DEPTH, RESOLVE_EXTENSIONS, TSCONFIG_FILE};
pub use oxc_span::SourceType;
pub use parser::{ExtractOptions, extract, imports_for, parse_imports, source_type_for};
pub use paths::{make_relative, to_slash};
pub use provider::{DependencyProvider, ProviderOptions, get_dependencies};
pub use resolver::ModuleResolver;
pub use scanner::scan_imports;
pub use types::{AliasMapping, ResolutionConfig, SpecKind, Specifier};
