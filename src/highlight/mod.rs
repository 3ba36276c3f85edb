//! Syntax highlighting backend.
//!
//! The rest of the crate talks to highlighting through two small traits:
//! [`Highlighter`] turns code into HTML and a theme into CSS, and
//! [`ThemeCatalog`] answers questions about the installed themes.
//! [`SyntectBackend`] implements both on top of syntect's bundled
//! syntaxes and themes, plus an embedded TOML grammar.

pub mod style;

pub use style::*;

use crate::config::HighlightConfig;
use crate::discovery::LanguageId;
use crate::error::{Error, Result};
use crate::output::html_escape;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxDefinition, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::{debug, warn};

/// Theme used when none is requested
pub const DEFAULT_THEME: &str = "InspiredGitHub";

const TOML_SYNTAX: &str = include_str!("../../syntaxes/TOML.sublime-syntax");

/// How a piece of code should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax<'a> {
    Language(&'a LanguageId),
    PlainText,
}

/// Turns code and themes into HTML and CSS
pub trait Highlighter {
    /// Highlighted markup for `code`, with no enclosing `<pre>` or document
    fn highlight(&self, code: &str, syntax: Syntax<'_>, theme: &str) -> Result<String>;

    /// CSS rules for `theme`, scoped under the `scope` selector
    fn stylesheet(&self, theme: &str, scope: &str) -> Result<String>;
}

/// The set of installed themes
pub trait ThemeCatalog {
    /// All theme names, sorted
    fn theme_names(&self) -> Vec<String>;

    /// Declared background as `#rrggbb`, `None` when the theme has none
    fn background(&self, theme: &str) -> Result<Option<String>>;

    fn has_theme(&self, theme: &str) -> bool {
        self.theme_names().iter().any(|name| name == theme)
    }
}

/// syntect-backed highlighter and theme catalog
pub struct SyntectBackend {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl SyntectBackend {
    /// Bundled syntaxes and themes plus the TOML grammar
    pub fn new() -> Result<Self> {
        Self::from_config(&HighlightConfig::default())
    }

    /// Bundled assets extended with the configured syntax and theme folders
    pub fn from_config(config: &HighlightConfig) -> Result<Self> {
        let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
        builder.add(SyntaxDefinition::load_from_str(TOML_SYNTAX, true, Some("TOML"))?);

        if let Some(dir) = &config.syntax_dir {
            debug!("Loading syntax definitions from {}", dir.display());
            builder.add_from_folder(dir, true)?;
        }

        let mut themes = ThemeSet::load_defaults();
        if let Some(dir) = &config.theme_dir {
            debug!("Loading themes from {}", dir.display());
            themes.add_from_folder(dir)?;
        }

        Ok(Self {
            syntaxes: builder.build(),
            themes,
        })
    }

    fn theme(&self, name: &str) -> Result<&Theme> {
        self.themes
            .themes
            .get(name)
            .ok_or_else(|| Error::UnknownTheme(name.to_string()))
    }

    fn find_syntax(&self, language: &LanguageId) -> Option<&SyntaxReference> {
        self.syntaxes
            .find_syntax_by_name(language.as_str())
            .or_else(|| self.syntaxes.find_syntax_by_token(language.as_str()))
    }

    /// Whether `language` resolves to a loaded syntax
    pub fn has_syntax(&self, language: &LanguageId) -> bool {
        self.find_syntax(language).is_some()
    }
}

impl Highlighter for SyntectBackend {
    fn highlight(&self, code: &str, syntax: Syntax<'_>, theme: &str) -> Result<String> {
        let theme = self.theme(theme)?;

        let syntax = match syntax {
            Syntax::PlainText => return Ok(html_escape(code)),
            Syntax::Language(language) => match self.find_syntax(language) {
                Some(found) => found,
                None => {
                    warn!("No syntax for '{}', rendering as plain text", language);
                    return Ok(html_escape(code));
                }
            },
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut html = String::with_capacity(code.len() * 4);
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntaxes)?;
            html.push_str(&styled_line_to_highlighted_html(&regions, IncludeBackground::No)?);
        }

        Ok(html)
    }

    fn stylesheet(&self, theme: &str, scope: &str) -> Result<String> {
        let settings = &self.theme(theme)?.settings;

        let mut rules = Vec::new();
        if let Some(bg) = settings.background {
            rules.push(format!("background: {};", css_color(bg)));
        }
        if let Some(fg) = settings.foreground {
            rules.push(format!("color: {};", css_color(fg)));
        }

        let mut css = format!("{} {{ {} }}\n", scope, rules.join(" "));
        if let Some(selection) = settings.selection {
            css.push_str(&format!(
                "{} ::selection {{ background: {}; }}\n",
                scope,
                css_color(selection)
            ));
        }

        Ok(css)
    }
}

impl ThemeCatalog for SyntectBackend {
    fn theme_names(&self) -> Vec<String> {
        self.themes.themes.keys().cloned().collect()
    }

    fn background(&self, theme: &str) -> Result<Option<String>> {
        let settings = &self.theme(theme)?.settings;
        Ok(settings.background.map(|c| Rgb { r: c.r, g: c.g, b: c.b }.to_string()))
    }

    fn has_theme(&self, theme: &str) -> bool {
        self.themes.themes.contains_key(theme)
    }
}

/// `#rrggbb`, or `rgba(...)` when the color is translucent
fn css_color(c: Color) -> String {
    if c.a == 0xff {
        Rgb { r: c.r, g: c.g, b: c.b }.to_string()
    } else {
        format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, f64::from(c.a) / 255.0)
    }
}
