use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::constants::JS_TS_EXTENSIONS;

/// Walks `root` (honoring `.gitignore`) and returns every JS/TS source file,
/// sorted. When `filter` is set, only files whose root-relative path contains
/// it are kept.
pub fn collect_modules(root: &Path, filter: Option<&str>) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(root).hidden(false).ignore(true).git_ignore(true).build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        let Ok(rel_path) = p.strip_prefix(root) else {
            continue;
        };
        if rel_path.components().any(|c| c.as_os_str() == "node_modules") {
            trace!("Skipping package file: {}", rel_path.display());
            continue;
        }

        let Some(ext) = p.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !JS_TS_EXTENSIONS.contains(&ext) {
            continue;
        }

        if let Some(pattern) = filter
            && !rel_path.to_string_lossy().contains(pattern)
        {
            trace!("Filtered out by '{}': {}", pattern, rel_path.display());
            continue;
        }

        trace!("Found module: {}", rel_path.display());
        files.push(p.to_path_buf());
    }

    files.sort();
    debug!("Collected {} module files", files.len());
    Ok(files)
}
