use clap::{Parser, Subcommand};
use docs_sidebar::config::{self, ProjectConfig};
use docs_sidebar::docs::{self, ContentCollection};
use docs_sidebar::{SidebarCollection, SidebarTree, check, declaration, output, render};
use std::path::{Path, PathBuf};

/// Shared flags for commands that can be narrowed to one sidebar.
#[derive(clap::Args, Clone)]
struct SidebarArgs {
    /// Only this sidebar (default: all sidebars)
    #[arg(long)]
    sidebar: Option<String>,
}

#[derive(Parser)]
#[command(name = "docs-sidebar")]
#[command(about = "Validate and inspect documentation sidebars")]
#[command(long_about = "\
Validate and inspect documentation sidebars

Sidebars are declared in a JSON or TOML file as named trees of categories
and document references. Documents are the markdown files under the docs
directory; their ids are their paths without extension or number prefixes.

Project structure:

  project/
  ├── docs-sidebar.toml            # Optional config (see gen-config)
  ├── sidebars.json                # Sidebar declarations
  └── docs/
      ├── 01-intro/
      │   └── 010-overview.md      # id: intro/overview
      └── sdk/
          └── installation.md      # id: sdk/installation

Declaration items:
  \"intro/overview\"                          doc ref shorthand
  {\"type\": \"doc\", \"id\": \"intro/overview\"}     doc ref
  {\"type\": \"category\", \"label\": ..., \"collapsed\": ..., \"link\": ..., \"items\": [...]}

Run 'docs-sidebar gen-config' to generate a documented docs-sidebar.toml.")]
#[command(version)]
struct Cli {
    /// Project root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/docs-sidebar.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate sidebars and cross-check them against the docs directory
    Check,
    /// Print sidebars as an indented table of contents
    Tree(SidebarArgs),
    /// List every document id the sidebars reference
    Ids(SidebarArgs),
    /// Show where a document sits: breadcrumb and previous/next pages
    Locate {
        /// Document id, e.g. sdk/installation
        id: String,
    },
    /// Render one sidebar as HTML
    Render {
        /// Sidebar to render
        #[arg(long)]
        sidebar: String,
        /// Document id of the page being viewed
        #[arg(long)]
        current: Option<String>,
    },
    /// Print a stock docs-sidebar.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let project = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&cli.root)?,
    };

    match cli.command {
        Command::Check => {
            let sidebars_path = project.sidebars_path(&cli.root);
            println!("==> Loading sidebars from {}", sidebars_path.display());
            let sidebars = declaration::load(&sidebars_path)?;
            println!("==> Scanning docs in {}", project.docs_path(&cli.root).display());
            let docs = docs::scan_docs(&project.docs_path(&cli.root), &project.docs.extensions)?;
            let report = check::check(&sidebars, &docs);
            output::print_check_output(&report);
            if !report.passes(project.check.fail_on_unlisted) {
                return Err("sidebar check failed".into());
            }
            println!("==> Sidebars are valid");
        }
        Command::Tree(args) => {
            let sidebars = declaration::load(&project.sidebars_path(&cli.root))?;
            let docs = load_docs_if_present(&cli.root, &project)?;
            for (name, tree) in selected(&sidebars, args.sidebar.as_deref())? {
                output::print_tree_output(name, tree, docs.as_ref(), &project.render);
            }
        }
        Command::Ids(args) => {
            let sidebars = declaration::load(&project.sidebars_path(&cli.root))?;
            let mut ids = std::collections::BTreeSet::new();
            for (_, tree) in selected(&sidebars, args.sidebar.as_deref())? {
                ids.extend(tree.resolve_document_ids());
            }
            for id in ids {
                println!("{}", id);
            }
        }
        Command::Locate { id } => {
            let sidebars = declaration::load(&project.sidebars_path(&cli.root))?;
            let docs = load_docs_if_present(&cli.root, &project)?;
            let found: Vec<_> = sidebars
                .locate(&id)
                .into_iter()
                .map(|(name, path)| {
                    let pagination = sidebars.get(name).and_then(|tree| tree.pagination(&id));
                    (name, path, pagination)
                })
                .collect();
            output::print_locate_output(&id, &found, docs.as_ref());
            if found.is_empty() {
                return Err(format!("document `{id}` is not in any sidebar").into());
            }
        }
        Command::Render { sidebar, current } => {
            let sidebars = declaration::load(&project.sidebars_path(&cli.root))?;
            let docs = load_docs_if_present(&cli.root, &project)?;
            let tree = sidebars
                .get(&sidebar)
                .ok_or_else(|| unknown_sidebar(&sidebars, &sidebar))?;
            if let Some(current) = current.as_deref() {
                println!(
                    "{}",
                    render::render_breadcrumb(tree, current, docs.as_ref()).into_string()
                );
            }
            let markup = render::render_sidebar(
                tree,
                current.as_deref(),
                docs.as_ref(),
                &project.render.base_url,
            );
            println!("{}", markup.into_string());
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

/// Scan the docs directory for labels, if the project has one.
///
/// Display commands work without documents (labels fall back to ids);
/// only `check` requires them.
fn load_docs_if_present(
    root: &Path,
    project: &ProjectConfig,
) -> Result<Option<ContentCollection>, docs::DocsError> {
    let docs_path = project.docs_path(root);
    if !docs_path.is_dir() {
        return Ok(None);
    }
    docs::scan_docs(&docs_path, &project.docs.extensions).map(Some)
}

/// All sidebars, or just the named one.
fn selected<'a>(
    sidebars: &'a SidebarCollection,
    name: Option<&str>,
) -> Result<Vec<(&'a str, &'a SidebarTree)>, String> {
    match name {
        None => Ok(sidebars.iter().collect()),
        Some(name) => sidebars
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|entry| vec![entry])
            .ok_or_else(|| unknown_sidebar(sidebars, name)),
    }
}

fn unknown_sidebar(sidebars: &SidebarCollection, name: &str) -> String {
    let available: Vec<&str> = sidebars.names().collect();
    format!("no sidebar named `{name}` (available: {})", available.join(", "))
}
