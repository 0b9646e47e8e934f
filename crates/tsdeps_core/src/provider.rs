use anyhow::{Context, Result, ensure};
use log::{debug, trace};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config,
    constants::RESOLVE_EXTENSIONS,
    parser::{ExtractOptions, parse_imports, source_type_for, typescript_module},
    paths::{make_relative, to_slash},
    resolver::ModuleResolver,
};

#[derive(Debug, Clone)]
pub struct ProviderOptions {
    /// Probed in order by the fallback resolver, leading dot included.
    pub extensions: Vec<String>,
    pub extract: ExtractOptions,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            extensions: RESOLVE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            extract: ExtractOptions::default(),
        }
    }
}

/// Lists the files a TypeScript module depends on.
///
/// Holds only options: every [`DependencyProvider::get_dependencies`] call
/// loads its own tsconfig and builds its own resolver, so one provider can be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct DependencyProvider {
    options: ProviderOptions,
}

impl DependencyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ProviderOptions) -> Self {
        Self { options }
    }

    /// Import specifiers of `source_text`, unresolved, in source order.
    pub fn import_sources_from_str(&self, source_text: &str) -> Vec<String> {
        parse_imports(source_text, typescript_module(), &self.options.extract)
            .into_iter()
            .map(|s| s.request)
            .collect()
    }

    /// Resolves every import of `module_path` to a file and returns the
    /// paths relative to the module's directory, `/`-separated, in import
    /// order. Imports that resolve to nothing are left out.
    ///
    /// Fails only when `module_path` is not an existing regular file or cannot
    /// be read.
    pub fn get_dependencies(&self, module_path: &Path) -> Result<Vec<String>> {
        ensure!(
            module_path.is_file(),
            "Module path {} is not an existing regular file",
            module_path.display()
        );

        let module_path = module_path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize {}", module_path.display()))?;
        let src = fs::read_to_string(&module_path)
            .with_context(|| format!("Failed to read {}", module_path.display()))?;
        let module_dir = module_path.parent().map(Path::to_path_buf).unwrap_or_else(PathBuf::new);

        let resolution_config = config::load_for(&module_dir);
        let resolver = ModuleResolver::new(self.options.extensions.clone());

        let specs = parse_imports(&src, source_type_for(&module_path), &self.options.extract);
        trace!("Extracted {} specifiers from {}", specs.len(), module_path.display());

        let dependencies: Vec<String> = specs
            .iter()
            .filter_map(|spec| {
                let resolved = resolver.resolve(&module_dir, &spec.request, &resolution_config);
                if resolved.is_none() {
                    trace!("Dropping unresolved import: '{}'", spec.request);
                }
                resolved
            })
            .filter_map(|resolved| make_relative(&resolved, &module_dir))
            .map(|relative| to_slash(&relative))
            .collect();

        debug!(
            "Resolved {} of {} imports in {}",
            dependencies.len(),
            specs.len(),
            module_path.display()
        );
        Ok(dependencies)
    }
}

/// [`DependencyProvider::get_dependencies`] with default options.
pub fn get_dependencies(module_path: &Path) -> Result<Vec<String>> {
    DependencyProvider::new().get_dependencies(module_path)
}
