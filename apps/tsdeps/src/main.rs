use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tsdeps_core::{DependencyProvider, ExtractOptions, ProviderOptions};
use tsdeps_graph::{Config, ModuleDependencies};

#[derive(Parser)]
#[command(name = "tsdeps")]
#[command(about = "Static dependency extraction for TypeScript modules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the resolved dependencies of one or more modules
    Deps(DepsArgs),
    /// Print the dependency graph of every module in a project
    Graph(Config),
}

#[derive(Debug, Args)]
struct DepsArgs {
    /// Module files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Also follow require() calls and import() expressions
    #[arg(long)]
    dynamic: bool,

    /// Emit JSON instead of a tree
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Deps(args) => {
            info!("Resolving dependencies of {} modules", args.files.len());
            let provider = DependencyProvider::with_options(ProviderOptions {
                extract: ExtractOptions { include_dynamic: args.dynamic },
                ..ProviderOptions::default()
            });

            let results: Vec<_> = args
                .files
                .par_iter()
                .map(|file| (file, provider.get_dependencies(file)))
                .collect();

            let mut modules = Vec::new();
            let mut failed = 0;
            for (file, result) in results {
                match result {
                    Ok(dependencies) => modules.push(ModuleDependencies {
                        module: file.to_string_lossy().to_string(),
                        dependencies,
                    }),
                    Err(e) => {
                        warn!("Skipping {}: {:#}", file.display(), e);
                        eprintln!("{} {:#}", "error:".red().bold(), e);
                        failed += 1;
                    }
                }
            }

            if args.json {
                tsdeps_graph::print_modules_json(&mut stdout, &modules)?;
            } else {
                for module in &modules {
                    tsdeps_graph::print_dependencies(
                        &mut stdout,
                        &module.module,
                        &module.dependencies,
                    )?;
                }
                stdout.flush()?;
            }

            if failed > 0 {
                // Non-zero exit so scripts notice bad inputs
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Graph(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Building dependency graph (using {} threads)", num_threads);
            debug!("Config: root={:?}, filter={:?}", cfg.root, cfg.filter);

            let json = cfg.json;
            let graph = tsdeps_graph::build_graph(cfg)?;

            if json {
                tsdeps_graph::print_graph_json(&mut stdout, &graph)?;
                return Ok(());
            }

            tsdeps_graph::print_graph_tree(&mut stdout, &graph)?;
            let elapsed_ms = start.elapsed().as_millis();
            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                graph.modules.len().to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;
            Ok(())
        }
    }
}
