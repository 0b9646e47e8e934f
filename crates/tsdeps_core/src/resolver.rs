use log::trace;
use oxc_resolver::{ResolveOptions, Resolver};
use std::path::{Path, PathBuf};

use crate::{constants::RESOLVE_EXTENSIONS, types::ResolutionConfig};

/// Extension-probing module resolution confined to local files.
///
/// Package directories (`node_modules`) are never searched, so bare package
/// names only resolve through a path mapping.
pub struct ModuleResolver {
    resolver: Resolver,
}

impl Default for ModuleResolver {
    fn default() -> Self {
        Self::new(RESOLVE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect())
    }
}

impl ModuleResolver {
    /// `extensions` are probed in order and must include the leading dot.
    pub fn new(extensions: Vec<String>) -> Self {
        let options = ResolveOptions { extensions, modules: vec![], ..ResolveOptions::default() };
        Self { resolver: Resolver::new(options) }
    }

    /// Mapped resolution first, then default resolution from `start_dir`.
    pub fn resolve(
        &self,
        start_dir: &Path,
        specifier: &str,
        config: &ResolutionConfig,
    ) -> Option<PathBuf> {
        self.resolve_mapped(specifier, config)
            .or_else(|| self.resolve_default(start_dir, specifier))
    }

    /// Tries every alias whose prefix matches `specifier`, in declaration
    /// order, and returns the first candidate that exists on disk.
    pub fn resolve_mapped(&self, specifier: &str, config: &ResolutionConfig) -> Option<PathBuf> {
        for mapping in &config.mappings {
            let Some(rest) = specifier.strip_prefix(mapping.prefix.as_str()) else {
                continue;
            };
            let remainder = rest.strip_prefix('/').unwrap_or(rest);
            let candidate = format!("./{remainder}");
            trace!(
                "Matched alias '{}' for '{}', trying '{}' in {:?}",
                mapping.prefix, specifier, candidate, mapping.target
            );

            if let Some(resolved) = self.resolve_default(&mapping.target, &candidate) {
                trace!("Resolved alias '{}' to {:?}", mapping.prefix, resolved);
                return Some(resolved);
            }
        }
        None
    }

    /// Resolves `specifier` relative to `start_dir`. Every resolver error is
    /// reported as `None`.
    pub fn resolve_default(&self, start_dir: &Path, specifier: &str) -> Option<PathBuf> {
        match self.resolver.resolve(start_dir, specifier) {
            Ok(resolution) => {
                let path = resolution.into_path_buf();
                trace!("Resolved '{}' from {:?} to {:?}", specifier, start_dir, path);
                Some(path)
            }
            Err(e) => {
                trace!("Failed to resolve '{}' from {:?}: {}", specifier, start_dir, e);
                None
            }
        }
    }
}
