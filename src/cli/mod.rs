//! CLI module for rs2html

mod args;

pub use args::Args;

use crate::config::Config;
use crate::discovery::{Discoverer, LanguageId, PatternRegistry};
use crate::error::{Error, Result};
use crate::highlight::{brightness, SyntectBackend, ThemeCatalog};
use crate::output::{root_name, PageAssembler};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn, Level};

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_logging(args.verbose);

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(args: Args) -> Result<()> {
    if args.list_styles {
        return list_styles(args.config.as_deref());
    }

    let mut cfg = Config::discover(args.config.as_deref())?;
    cfg.merge_cli(args.style, args.recursive, args.exclude);
    cfg.validate()?;

    let backend = SyntectBackend::from_config(&cfg.highlight)?;

    let style = cfg.output.style.clone();
    if !backend.has_theme(&style) {
        return Err(Error::UnknownTheme(style));
    }

    let directory = args
        .directory
        .ok_or_else(|| Error::other("directory is required (use --list-styles to see available styles)"))?;
    let root = resolve_root(&directory)?;

    if args.verbose {
        println!("Scanning: {}", root.display());
        println!("Recursive: {}", cfg.discovery.recursive);
        println!("Style: {}", style);
        if !cfg.discovery.exclude.is_empty() {
            println!("Exclude: {:?}", cfg.discovery.exclude);
        }
    }

    let registry = PatternRegistry::with_overrides(&cfg.discovery.patterns);
    let files = Discoverer::new(&registry)
        .with_excludes(&cfg.discovery.exclude)?
        .discover(&root, cfg.discovery.recursive)?;

    let output = args
        .output
        .unwrap_or_else(|| default_output(&root, &cfg.output.suffix));
    debug!("Writing {} files to {}", files.len(), output.display());

    let html = PageAssembler::new(&registry, &backend)?
        .with_default_language(LanguageId::new(cfg.highlight.default_language.clone()))
        .with_lang(cfg.output.lang.clone())
        .with_progress(args.verbose)
        .render(&files, &root, &style)?;

    std::fs::write(&output, html).map_err(|e| Error::write_file(&output, e))?;

    let shade = brightness(&backend, &style)?;
    println!(
        "Output: {} ({} files, style: {} [{}])",
        output.display(),
        files.len(),
        style,
        shade
    );
    for file in &files {
        println!("  - {}", file.label());
    }

    Ok(())
}

/// Print the theme listing. Every other option is ignored and config
/// problems only cost the extra theme folder.
fn list_styles(config: Option<&Path>) -> Result<()> {
    let cfg = Config::discover_or_default(config);
    let backend = match SyntectBackend::from_config(&cfg.highlight) {
        Ok(backend) => backend,
        Err(e) => {
            warn!("Ignoring highlight settings: {}", e);
            SyntectBackend::new()?
        }
    };

    println!("Available styles:");
    for line in style_listing(&backend)? {
        println!("{}", line);
    }
    Ok(())
}

/// One line per theme, name padded and annotated dark/light
pub fn style_listing<C: ThemeCatalog + ?Sized>(catalog: &C) -> Result<Vec<String>> {
    let mut names = catalog.theme_names();
    names.sort();
    names
        .into_iter()
        .map(|name| {
            let shade = brightness(catalog, &name)?;
            Ok(format!("  {:24} ({})", name, shade))
        })
        .collect()
}

/// Absolute form of the target directory, which must exist
fn resolve_root(directory: &Path) -> Result<PathBuf> {
    if !directory.is_dir() {
        return Err(Error::DirectoryNotFound(directory.to_path_buf()));
    }
    Ok(directory.canonicalize()?)
}

/// `<dirname>_<suffix>.html` in the working directory
pub fn default_output(root: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}_{}.html", root_name(root), suffix))
}
