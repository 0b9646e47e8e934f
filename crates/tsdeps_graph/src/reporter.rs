use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use crate::types::{DependencyGraph, ModuleDependencies};

/// Prints one module followed by its dependencies as a tree.
pub fn print_dependencies<W: Write>(
    writer: &mut W,
    module: &str,
    dependencies: &[String],
) -> io::Result<()> {
    if dependencies.is_empty() {
        writeln!(writer, "{} {}", module.bright_white().bold(), "(no dependencies)".dimmed())?;
        return Ok(());
    }

    writeln!(
        writer,
        "{} ({} dependencies)",
        module.bright_white().bold(),
        dependencies.len().to_string().cyan()
    )?;
    for (idx, dependency) in dependencies.iter().enumerate() {
        let is_last = idx == dependencies.len() - 1;
        let prefix = if is_last { "└──" } else { "├──" };
        writeln!(writer, "{}  {}", prefix.dimmed(), dependency.blue())?;
    }
    Ok(())
}

pub fn print_graph_tree<W: Write>(writer: &mut W, graph: &DependencyGraph) -> io::Result<()> {
    debug!("Printing dependency tree for {} modules", graph.modules.len());
    writeln!(writer, "{} {}\n", "●".bright_blue(), graph.root.display().to_string().bold())?;

    for ModuleDependencies { module, dependencies } in &graph.modules {
        print_dependencies(writer, module, dependencies)?;
        writeln!(writer)?;
    }

    print_summary(writer, graph)?;
    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, graph: &DependencyGraph) -> io::Result<()> {
    let isolated = graph.modules.iter().filter(|m| m.dependencies.is_empty()).count();
    let busiest = graph.modules.iter().max_by_key(|m| m.dependencies.len());

    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Modules: {}", graph.modules.len().to_string().cyan().bold())?;
    writeln!(writer, "  Dependencies: {}", graph.edge_count().to_string().cyan().bold())?;
    writeln!(writer, "  Without dependencies: {}", isolated.to_string().yellow())?;
    if let Some(busiest) = busiest
        && !busiest.dependencies.is_empty()
    {
        writeln!(
            writer,
            "  Most dependencies: {} ({})",
            busiest.module.blue(),
            busiest.dependencies.len().to_string().red()
        )?;
    }
    Ok(())
}

pub fn print_graph_json<W: Write>(writer: &mut W, graph: &DependencyGraph) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, graph)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// JSON listing for modules analyzed outside a project graph.
pub fn print_modules_json<W: Write>(
    writer: &mut W,
    modules: &[ModuleDependencies],
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, modules)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_graph() -> DependencyGraph {
        DependencyGraph {
            root: PathBuf::from("/project"),
            modules: vec![
                ModuleDependencies {
                    module: "src/index.ts".to_string(),
                    dependencies: vec!["a.ts".to_string(), "../shared.js".to_string()],
                },
                ModuleDependencies { module: "src/a.ts".to_string(), dependencies: vec![] },
            ],
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_dependencies_tree() {
        let out = render(|w| {
            print_dependencies(w, "src/index.ts", &["a.ts".to_string(), "b.ts".to_string()])
        });
        assert_eq!(out, "src/index.ts (2 dependencies)\n├──  a.ts\n└──  b.ts\n");
    }

    #[test]
    fn test_print_dependencies_empty() {
        let out = render(|w| print_dependencies(w, "src/a.ts", &[]));
        assert_eq!(out, "src/a.ts (no dependencies)\n");
    }

    #[test]
    fn test_print_graph_tree_summary() {
        let graph = sample_graph();
        let out = render(|w| print_graph_tree(w, &graph));
        assert!(out.contains("src/index.ts (2 dependencies)"));
        assert!(out.contains("  Modules: 2"));
        assert!(out.contains("  Dependencies: 2"));
        assert!(out.contains("  Without dependencies: 1"));
        assert!(out.contains("  Most dependencies: src/index.ts (2)"));
    }

    #[test]
    fn test_print_graph_json() {
        let graph = sample_graph();
        let out = render(|w| print_graph_json(w, &graph));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["root"], "/project");
        assert_eq!(value["modules"][0]["module"], "src/index.ts");
        assert_eq!(value["modules"][0]["dependencies"][1], "../shared.js");
        assert_eq!(value["modules"][1]["dependencies"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_print_modules_json() {
        let graph = sample_graph();
        let out = render(|w| print_modules_json(w, &graph.modules));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["dependencies"][0], "a.ts");
    }
}
