use std::path::PathBuf;
use thiserror::Error;

/// rs2html error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("unknown style '{0}' (use --list-styles to see available styles)")]
    UnknownTheme(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("No Rust-related files found in {0}")]
    NoFilesFound(PathBuf),

    #[error("Highlighting error: {0}")]
    Highlight(#[from] syntect::Error),

    #[error("Failed to load syntax definition: {0}")]
    SyntaxLoad(#[from] syntect::parsing::ParseSyntaxError),

    #[error("Failed to load highlighting assets: {0}")]
    AssetLoad(#[from] syntect::LoadingError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for rs2html operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a file read error
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a file write error
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid color error
    pub fn invalid_color(color: impl Into<String>) -> Self {
        Error::InvalidColor(color.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
