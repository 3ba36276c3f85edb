//! Filename patterns and the highlighting target each one selects.

use crate::config::PatternConfig;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Identifier handed to the highlighter (a syntax name or file extension)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn rust() -> Self {
        Self::new("Rust")
    }

    pub fn toml() -> Self {
        Self::new("TOML")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a pattern selects for a matching file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    Language(LanguageId),
    PlainText,
}

/// Result of asking the registry about a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Language(&'a LanguageId),
    PlainText,
    NoMatch,
}

impl Lookup<'_> {
    pub fn is_match(&self) -> bool {
        !matches!(self, Lookup::NoMatch)
    }
}

/// A single filename rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    pattern: String,
    kind: FileKind,
}

impl FilePattern {
    pub fn new(pattern: impl Into<String>, kind: FileKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }

    pub fn language(pattern: impl Into<String>, language: LanguageId) -> Self {
        Self::new(pattern, FileKind::Language(language))
    }

    pub fn plain(pattern: impl Into<String>) -> Self {
        Self::new(pattern, FileKind::PlainText)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> &FileKind {
        &self.kind
    }

    /// Patterns containing a `/` are anchored to a relative subpath
    pub fn is_subpath(&self) -> bool {
        self.pattern.contains('/')
    }

    /// Match against a basename: `*suffix` compares the tail, anything
    /// else must be equal.
    pub fn matches_name(&self, name: &str) -> bool {
        match self.pattern.strip_prefix('*') {
            Some(suffix) => name.ends_with(suffix),
            None => name == self.pattern,
        }
    }

    /// Component-wise suffix match of the pattern against `path`
    pub fn matches_subpath(&self, path: &Path) -> bool {
        let anchor: PathBuf = self.pattern.split('/').filter(|s| !s.is_empty()).collect();
        let normalized: PathBuf = path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        !anchor.as_os_str().is_empty() && normalized.ends_with(&anchor)
    }

    fn lookup(&self) -> Lookup<'_> {
        match &self.kind {
            FileKind::Language(id) => Lookup::Language(id),
            FileKind::PlainText => Lookup::PlainText,
        }
    }
}

/// Ordered tables of basename rules and subpath-anchored rules
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    primary: Vec<FilePattern>,
    secondary: Vec<FilePattern>,
}

impl PatternRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules for Rust projects
    pub fn rust() -> Self {
        let mut registry = Self::new();
        registry.push(FilePattern::language("*.rs", LanguageId::rust()));
        registry.push(FilePattern::language("Cargo.toml", LanguageId::toml()));
        registry.push(FilePattern::language("rust-toolchain.toml", LanguageId::toml()));
        registry.push(FilePattern::language("build.rs", LanguageId::rust()));
        registry.push(FilePattern::plain("memory.x"));
        registry.push(FilePattern::plain("*.ld"));
        registry.push(FilePattern::language(".cargo/config.toml", LanguageId::toml()));
        registry
    }

    /// Built-in rules preceded by user-declared ones
    pub fn with_overrides(patterns: &[PatternConfig]) -> Self {
        let mut registry = Self::new();
        for p in patterns {
            let kind = match &p.language {
                Some(lang) => FileKind::Language(LanguageId::new(lang.clone())),
                None => FileKind::PlainText,
            };
            registry.push(FilePattern::new(p.pattern.trim(), kind));
        }
        let builtin = Self::rust();
        registry.primary.extend(builtin.primary);
        registry.secondary.extend(builtin.secondary);
        registry
    }

    /// Append a rule to the table its shape belongs to
    pub fn push(&mut self, pattern: FilePattern) {
        if pattern.is_subpath() {
            self.secondary.push(pattern);
        } else {
            self.primary.push(pattern);
        }
    }

    pub fn primary(&self) -> &[FilePattern] {
        &self.primary
    }

    pub fn secondary(&self) -> &[FilePattern] {
        &self.secondary
    }

    /// Match on the basename only
    pub fn lookup_primary(&self, path: &Path) -> Lookup<'_> {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return Lookup::NoMatch;
        };
        self.primary
            .iter()
            .find(|p| p.matches_name(&name))
            .map_or(Lookup::NoMatch, FilePattern::lookup)
    }

    /// Match on the trailing components of the path
    pub fn lookup_secondary(&self, path: &Path) -> Lookup<'_> {
        self.secondary
            .iter()
            .find(|p| p.matches_subpath(path))
            .map_or(Lookup::NoMatch, FilePattern::lookup)
    }

    /// Basename rules first, then subpath rules; first hit wins
    pub fn lookup(&self, path: &Path) -> Lookup<'_> {
        match self.lookup_primary(path) {
            Lookup::NoMatch => self.lookup_secondary(path),
            hit => hit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_pattern() {
        let registry = PatternRegistry::rust();
        for name in ["main.rs", "lib.rs", "x.rs", ".rs"] {
            assert_eq!(
                registry.lookup(Path::new(name)),
                Lookup::Language(&LanguageId::rust()),
                "{name}"
            );
        }
    }

    #[test]
    fn test_exact_names() {
        let registry = PatternRegistry::rust();
        assert_eq!(
            registry.lookup(Path::new("Cargo.toml")),
            Lookup::Language(&LanguageId::toml())
        );
        assert_eq!(
            registry.lookup(Path::new("nested/rust-toolchain.toml")),
            Lookup::Language(&LanguageId::toml())
        );
        assert_eq!(registry.lookup(Path::new("memory.x")), Lookup::PlainText);
        assert_eq!(registry.lookup(Path::new("link/stm32.ld")), Lookup::PlainText);
    }

    #[test]
    fn test_no_match() {
        let registry = PatternRegistry::rust();
        for name in ["README.md", "cargo.toml", "main.rs.bak", "config.toml", "memory.xx"] {
            assert_eq!(registry.lookup(Path::new(name)), Lookup::NoMatch, "{name}");
        }
    }

    #[test]
    fn test_subpath_pattern() {
        let registry = PatternRegistry::rust();
        assert_eq!(
            registry.lookup(Path::new(".cargo/config.toml")),
            Lookup::Language(&LanguageId::toml())
        );
        assert_eq!(
            registry.lookup(Path::new("crates/core/.cargo/config.toml")),
            Lookup::Language(&LanguageId::toml())
        );
        assert_eq!(registry.lookup(Path::new("x.cargo/config.toml")), Lookup::NoMatch);
        assert_eq!(registry.lookup(Path::new("cargo/config.toml")), Lookup::NoMatch);
    }

    #[test]
    fn test_subpath_with_dot_components() {
        let pattern = FilePattern::language(".cargo/config.toml", LanguageId::toml());
        assert!(pattern.matches_subpath(Path::new("./.cargo/config.toml")));
    }

    #[test]
    fn test_primary_lookup_ignores_subpath_rules() {
        let registry = PatternRegistry::rust();
        assert_eq!(registry.lookup_primary(Path::new(".cargo/config.toml")), Lookup::NoMatch);
        assert!(registry.lookup_secondary(Path::new(".cargo/config.toml")).is_match());
    }

    #[test]
    fn test_push_sorts_into_tables() {
        let registry = PatternRegistry::rust();
        assert_eq!(registry.primary().len(), 6);
        assert_eq!(registry.secondary().len(), 1);
        assert_eq!(registry.secondary()[0].pattern(), ".cargo/config.toml");
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = PatternRegistry::new();
        registry.push(FilePattern::plain("build.rs"));
        registry.push(FilePattern::language("*.rs", LanguageId::rust()));
        assert_eq!(registry.lookup(Path::new("build.rs")), Lookup::PlainText);
        assert_eq!(
            registry.lookup(Path::new("main.rs")),
            Lookup::Language(&LanguageId::rust())
        );
    }

    #[test]
    fn test_overrides_come_first() {
        let registry = PatternRegistry::with_overrides(&[
            PatternConfig {
                pattern: "*.md".to_string(),
                language: Some("Markdown".to_string()),
            },
            PatternConfig {
                pattern: "build.rs".to_string(),
                language: None,
            },
            PatternConfig {
                pattern: "config/app.toml".to_string(),
                language: Some("TOML".to_string()),
            },
        ]);

        assert_eq!(
            registry.lookup(Path::new("README.md")),
            Lookup::Language(&LanguageId::new("Markdown"))
        );
        assert_eq!(registry.lookup(Path::new("build.rs")), Lookup::PlainText);
        assert!(registry.lookup(Path::new("config/app.toml")).is_match());
        assert_eq!(registry.primary().len(), 8);
        assert_eq!(registry.secondary().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_basename_matches_suffix() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let registry = PatternRegistry::rust();
        let path = Path::new(OsStr::from_bytes(b"src/caf\xff.rs"));
        assert_eq!(registry.lookup(path), Lookup::Language(&LanguageId::rust()));
        assert_eq!(
            registry.lookup(Path::new(OsStr::from_bytes(b"caf\xff.md"))),
            Lookup::NoMatch
        );
    }
}
