//! Whole-project dependency graphs for JavaScript/TypeScript codebases.
//!
//! Every module under a project root is run through
//! [`tsdeps_core::DependencyProvider`] in parallel and the results are
//! reported as a tree or as JSON.
//!
//! # Examples
//!
//! ```no_run
//! use tsdeps_graph::{Config, build_graph};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     filter: None,
//!     dynamic: false,
//!     json: false,
//! };
//!
//! let graph = build_graph(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! tsdeps_graph::print_graph_tree(&mut stdout, &graph)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod reporter;
mod types;

// Re-export public API
pub use builder::build_graph;
pub use config::Config;
pub use reporter::{print_dependencies, print_graph_json, print_graph_tree, print_modules_json};
pub use types::{DependencyGraph, ModuleDependencies};
