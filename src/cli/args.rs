//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Convert Rust source files to syntax-highlighted HTML for printing
#[derive(Parser, Debug)]
#[command(name = "rs2html")]
#[command(about = "Convert Rust source files to syntax-highlighted HTML for printing")]
#[command(version)]
pub struct Args {
    /// Target directory
    #[arg(required_unless_present = "list_styles")]
    pub directory: Option<PathBuf>,

    /// Scan subdirectories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Output filename (default: <dirname>_rust.html)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Color style (default: InspiredGitHub)
    #[arg(short, long)]
    pub style: Option<String>,

    /// List available styles and exit
    #[arg(long)]
    pub list_styles: bool,

    /// Glob of relative paths to skip (can be repeated)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Config file path (default: ./rs2html.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["rs2html", "./src"]).unwrap();
        assert_eq!(args.directory, Some(PathBuf::from("./src")));
        assert!(!args.recursive);
        assert_eq!(args.output, None);
        assert_eq!(args.style, None);
        assert!(!args.list_styles);
        assert!(args.exclude.is_empty());
        assert!(!args.verbose);
    }

    #[test]
    fn test_with_options() {
        let args = Args::try_parse_from([
            "rs2html", "./project",
            "-r",
            "-o", "out.html",
            "-s", "base16-ocean.dark",
            "--exclude", "vendor/**",
            "--exclude", "benches/**",
            "--config", "custom.toml",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(args.directory, Some(PathBuf::from("./project")));
        assert!(args.recursive);
        assert_eq!(args.output, Some(PathBuf::from("out.html")));
        assert_eq!(args.style.as_deref(), Some("base16-ocean.dark"));
        assert_eq!(args.exclude, vec!["vendor/**".to_string(), "benches/**".to_string()]);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert!(args.verbose);
    }

    #[test]
    fn test_long_forms() {
        let args = Args::try_parse_from([
            "rs2html", "dir", "--recursive", "--output", "x.html", "--style", "InspiredGitHub",
        ])
        .unwrap();
        assert!(args.recursive);
        assert_eq!(args.output, Some(PathBuf::from("x.html")));
        assert_eq!(args.style.as_deref(), Some("InspiredGitHub"));
    }

    #[test]
    fn test_directory_required() {
        let result = Args::try_parse_from(["rs2html"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_styles_without_directory() {
        let args = Args::try_parse_from(["rs2html", "--list-styles"]).unwrap();
        assert!(args.list_styles);
        assert_eq!(args.directory, None);
    }

    #[test]
    fn test_list_styles_with_directory() {
        let args = Args::try_parse_from(["rs2html", "--list-styles", "/nonexistent"]).unwrap();
        assert!(args.list_styles);
        assert_eq!(args.directory, Some(PathBuf::from("/nonexistent")));
    }
}
