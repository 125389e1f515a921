//! oxide-routes CLI
//!
//! Compiles the route files of a source tree and prints the result.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_file_routes::{
    module_loader, CompilerOptions, FileMap, PageModule, RouteCompiler, RouteFiles,
};

/// Inspect the route tree compiled from page, layout, error, 404 and
/// loading files.
#[derive(Parser)]
#[command(name = "oxide-routes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source root containing the app directory.
    #[arg(short, long, env = "OXIDE_ROUTES_ROOT", default_value = ".")]
    root: PathBuf,

    /// JSON file with compiler options.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extension of route files.
    #[arg(short, long, default_value = "tsx")]
    extension: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented outline.
    Tree,
    /// JSON manifest.
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CompilerOptions::from_json(&json)?
        }
        None => CompilerOptions::default(),
    };

    let files = discover(&cli.root, &options, &cli.extension)?;
    info!("Found {} files under {}", files.len(), cli.root.display());

    let classified = RouteFiles::classify(&files, &options);
    let tree = RouteCompiler::new(options).compile(&classified)?;
    let manifest = tree.manifest();

    match cli.format {
        Format::Tree => print!("{manifest}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&manifest)?),
    }

    Ok(())
}

/// Collects `<root>/<root_dir>` files with `extension` as `./`-relative
/// virtual paths, each backed by a placeholder module.
fn discover(root: &Path, options: &CompilerOptions, extension: &str) -> anyhow::Result<FileMap> {
    let app = root.join(&options.root_dir);
    anyhow::ensure!(app.is_dir(), "no {} directory found", app.display());

    let mut paths = Vec::new();
    for entry in walkdir::WalkDir::new(&app) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != extension) {
            continue;
        }
        let relative = path.strip_prefix(root)?;
        let virtual_path = format!(
            "./{}",
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        );
        debug!(file = %virtual_path, "Discovered route file");
        paths.push(virtual_path);
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| {
            let source = path.clone();
            let module = module_loader(move || {
                let source = source.clone();
                async move { Ok(PageModule::new(source)) }
            });
            (path, module)
        })
        .collect())
}
