use std::path::PathBuf;

/// An import specifier exactly as written in the module source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub request: String,
    pub kind: SpecKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    /// `import ... from "x"` or `import "x"`
    Static,
    /// `import type { T } from "x"`, erased by compilers but still a dependency
    TypeOnly,
    /// `import x = require("x")`
    ImportEquals,
    /// `export * from "x"` or `export { a } from "x"`
    ReExport,
    /// `require("x")` or `import("x")` inside an expression
    Dynamic,
}

/// A `paths` entry from tsconfig, with wildcard markers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasMapping {
    pub prefix: String,
    pub target: PathBuf,
}

/// Path-mapping policy derived from the nearest tsconfig.json.
///
/// Built once per dependency request and never mutated afterwards. Mappings
/// are only populated when a base directory is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionConfig {
    pub base_dir: Option<PathBuf>,
    pub mappings: Vec<AliasMapping>,
}

impl ResolutionConfig {
    pub fn is_empty(&self) -> bool {
        self.base_dir.is_none() && self.mappings.is_empty()
    }
}
