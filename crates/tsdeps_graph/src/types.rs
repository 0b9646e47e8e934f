use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDependencies {
    /// Module path relative to the project root, `/`-separated.
    pub module: String,
    /// Dependencies relative to the module's own directory.
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyGraph {
    pub root: PathBuf,
    /// Sorted by module path.
    pub modules: Vec<ModuleDependencies>,
}

impl DependencyGraph {
    pub fn edge_count(&self) -> usize {
        self.modules.iter().map(|m| m.dependencies.len()).sum()
    }
}
