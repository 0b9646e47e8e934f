use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, info};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "graph")]
#[command(about = "Print the dependency graph of every module in a project")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Only analyze modules whose root-relative path contains this string
    #[arg(long)]
    pub filter: Option<String>,

    /// Also follow require() calls and import() expressions
    #[arg(long)]
    pub dynamic: bool,

    /// Emit JSON instead of a tree
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Resolves the root directory: the provided one, canonicalized, or the
    /// git root above the current directory.
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, searching for git root");
            tsdeps_core::find_git_root(&env::current_dir()?)?
        };
        info!("Using root directory: {}", root.display());

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_requires_initialize() {
        let cfg = Config { root: None, filter: None, dynamic: false, json: false };
        assert!(cfg.root().is_err());
    }

    #[test]
    fn test_initialize_canonicalizes_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = Config {
            root: Some(temp_dir.path().join(".")),
            filter: None,
            dynamic: false,
            json: false,
        };
        cfg.initialize().unwrap();
        assert_eq!(cfg.root().unwrap(), &temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_parse_flags() {
        let cfg =
            Config::parse_from(["graph", "--root", "/tmp/x", "--filter", "src/", "--dynamic"]);
        assert_eq!(cfg.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(cfg.filter.as_deref(), Some("src/"));
        assert!(cfg.dynamic);
        assert!(!cfg.json);
    }
}
