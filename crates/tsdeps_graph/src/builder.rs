use anyhow::{Result, anyhow};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::thread;

use tsdeps_core::{
    DependencyProvider, ExtractOptions, ProviderOptions, collect_modules, make_relative, to_slash,
};

use crate::{
    config::Config,
    types::{DependencyGraph, ModuleDependencies},
};

/// Collects every module under the configured root and resolves the
/// dependencies of each one in parallel.
pub fn build_graph(mut cfg: Config) -> Result<DependencyGraph> {
    info!("Building dependency graph");

    cfg.initialize()?;
    let root = cfg.root()?.clone();

    debug!("Collecting modules with filter: {:?}", cfg.filter);
    let modules = collect_modules(&root, cfg.filter.as_deref())?;
    if modules.is_empty() {
        warn!("No modules found under {}", root.display());
        return Err(anyhow!("No modules found under {}", root.display()));
    }
    info!("Found {} modules", modules.len());

    let provider = DependencyProvider::with_options(ProviderOptions {
        extract: ExtractOptions { include_dynamic: cfg.dynamic },
        ..ProviderOptions::default()
    });

    let mut graph_modules: Vec<ModuleDependencies> = modules
        .par_iter()
        .map(|module| {
            let thread_id = thread::current().id();
            trace!("Thread {:?} processing: {}", thread_id, module.display());

            let rel_module = make_relative(module, &root)
                .map(|p| to_slash(&p))
                .unwrap_or_else(|| module.to_string_lossy().to_string());

            let dependencies = match provider.get_dependencies(module) {
                Ok(deps) => deps,
                Err(e) => {
                    warn!("Error resolving dependencies for {}: {}", module.display(), e);
                    Vec::new()
                }
            };
            debug!("{} has {} dependencies", rel_module, dependencies.len());

            ModuleDependencies { module: rel_module, dependencies }
        })
        .collect();

    graph_modules.sort_by(|a, b| a.module.cmp(&b.module));

    let graph = DependencyGraph { root, modules: graph_modules };
    info!(
        "Dependency graph complete: {} modules, {} edges",
        graph.modules.len(),
        graph.edge_count()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        fs,
        path::{Path, PathBuf},
    };
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn config_for(root: &Path) -> Config {
        Config { root: Some(root.to_path_buf()), filter: None, dynamic: false, json: false }
    }

    #[test]
    fn test_build_graph() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "~/*": ["src/*"] } } }"#,
        );
        create_test_file(root, "src/index.ts", "import './a';\nimport { b } from '~/lib/b';");
        create_test_file(root, "src/a.ts", "import '../shared';");
        create_test_file(root, "src/lib/b.js", "export const b = 1;");
        create_test_file(root, "shared.ts", "import 'lodash';");

        let graph = build_graph(config_for(root)).unwrap();
        assert_eq!(
            graph.modules,
            vec![
                ModuleDependencies { module: "shared.ts".to_string(), dependencies: vec![] },
                ModuleDependencies {
                    module: "src/a.ts".to_string(),
                    dependencies: vec!["../shared.ts".to_string()],
                },
                ModuleDependencies {
                    module: "src/index.ts".to_string(),
                    dependencies: vec!["a.ts".to_string(), "lib/b.js".to_string()],
                },
                ModuleDependencies { module: "src/lib/b.js".to_string(), dependencies: vec![] },
            ]
        );
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_build_graph_with_filter() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "apps/web/main.ts", "import './util';");
        create_test_file(root, "apps/web/util.ts", "");
        create_test_file(root, "packages/ui/button.ts", "");

        let mut cfg = config_for(root);
        cfg.filter = Some("main".to_string());
        let graph = build_graph(cfg).unwrap();
        assert_eq!(graph.modules.len(), 1);
        assert_eq!(graph.modules[0].module, "apps/web/main.ts");
        assert_eq!(graph.modules[0].dependencies, vec!["util.ts"]);
    }

    #[test]
    fn test_build_graph_empty_project() {
        let temp_dir = TempDir::new().unwrap();
        assert!(build_graph(config_for(temp_dir.path())).is_err());
    }
}
