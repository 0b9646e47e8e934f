use anyhow::{Result, anyhow};
use log::{debug, trace, warn};
use path_clean::clean;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    comments::strip_comments,
    constants::{MAX_CONFIG_SEARCH_DEPTH, TSCONFIG_FILE},
    types::{AliasMapping, ResolutionConfig},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfigFile {
    compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    /// Kept as a raw map so key order follows the file (`preserve_order`).
    paths: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PathTargets {
    One(String),
    Many(Vec<String>),
}

impl PathTargets {
    fn into_vec(self) -> Vec<String> {
        match self {
            PathTargets::One(target) => vec![target],
            PathTargets::Many(targets) => targets,
        }
    }
}

/// Walks up from `start_dir` and returns the first `tsconfig.json` found.
pub fn locate(start_dir: &Path) -> Option<PathBuf> {
    trace!("Searching for {} from {:?}", TSCONFIG_FILE, start_dir);
    let mut current_dir = start_dir;

    for _ in 0..MAX_CONFIG_SEARCH_DEPTH {
        let candidate = current_dir.join(TSCONFIG_FILE);
        trace!("Checking for tsconfig at: {:?}", candidate);
        if candidate.is_file() {
            debug!("Found tsconfig at: {:?}", candidate);
            return Some(candidate);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent,
            None => {
                debug!("No {} in any ancestor of {:?}", TSCONFIG_FILE, start_dir);
                return None;
            }
        }
    }

    warn!(
        "Gave up looking for {} after {} directories above {:?}",
        TSCONFIG_FILE, MAX_CONFIG_SEARCH_DEPTH, start_dir
    );
    None
}

/// Builds the path-mapping policy from a tsconfig file.
///
/// Never fails: unreadable or malformed files and files without
/// `compilerOptions.baseUrl` all yield an empty config.
pub fn load(config_path: &Path) -> ResolutionConfig {
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", config_path.display(), e);
            return ResolutionConfig::default();
        }
    };

    let json = strip_trailing_commas(&strip_comments(&content));
    let parsed: TsConfigFile = match serde_json::from_str(&json) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Ignoring malformed {}: {}", config_path.display(), e);
            return ResolutionConfig::default();
        }
    };

    let Some(compiler_options) = parsed.compiler_options else {
        debug!("No compilerOptions in {}", config_path.display());
        return ResolutionConfig::default();
    };

    // Wildcard aliases are only meaningful relative to a base directory.
    let Some(base_url) = compiler_options.base_url else {
        debug!("No baseUrl in {}, skipping path mappings", config_path.display());
        return ResolutionConfig::default();
    };

    let config_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    let base_dir = clean(config_dir.join(base_url));
    trace!("Resolved baseUrl to {:?}", base_dir);

    let mappings = compiler_options
        .paths
        .map(|paths| alias_mappings(paths, &base_dir, config_path))
        .unwrap_or_default();

    debug!("Loaded {} path mappings from {}", mappings.len(), config_path.display());
    ResolutionConfig { base_dir: Some(base_dir), mappings }
}

/// Locates and loads the config governing modules in `start_dir`.
pub fn load_for(start_dir: &Path) -> ResolutionConfig {
    locate(start_dir).map(|path| load(&path)).unwrap_or_default()
}

fn alias_mappings(
    paths: Map<String, Value>,
    base_dir: &Path,
    config_path: &Path,
) -> Vec<AliasMapping> {
    let mut mappings = Vec::new();

    for (alias, targets) in paths {
        let targets = match serde_json::from_value::<PathTargets>(targets) {
            Ok(targets) => targets.into_vec(),
            Err(_) => {
                warn!("Ignoring non-string targets for '{}' in {}", alias, config_path.display());
                continue;
            }
        };

        let prefix = strip_wildcard(&alias);
        for target in targets {
            let target = clean(base_dir.join(strip_wildcard(&target)));
            trace!("Found tsconfig path alias: '{}' -> {:?}", prefix, target);
            mappings.push(AliasMapping { prefix: prefix.to_string(), target });
        }
    }

    mappings
}

fn strip_wildcard(pattern: &str) -> &str {
    pattern.strip_suffix("/*").unwrap_or(pattern)
}

/// Drops commas that directly precede `}` or `]`, as tsc tolerates them.
/// Expects comment-free input.
fn strip_trailing_commas(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut chars = json.char_indices();
    let mut in_string = false;

    while let Some((i, c)) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' if matches!(json[i + 1..].trim_start().chars().next(), Some('}' | ']')) => {}
            _ => out.push(c),
        }
    }

    out
}

/// Finds the nearest ancestor of `start_dir` (inclusive) containing `.git`.
pub fn find_git_root(start_dir: &Path) -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = start_dir.to_path_buf();
    trace!("Starting search from: {:?}", current_dir);

    loop {
        let git_dir = current_dir.join(".git");
        trace!("Checking for .git at: {:?}", git_dir);
        if git_dir.exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                debug!("Could not find .git directory in any parent folder");
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}
