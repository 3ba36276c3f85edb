// Page assembly
//
// Reads every discovered file, highlights it and stitches the sections
// into one self-contained HTML document.

use crate::discovery::{slash_path, DiscoveredFile, LanguageId, Lookup, PatternRegistry};
use crate::error::{Error, Result};
use crate::highlight::{brightness, Highlighter, Syntax, ThemeCatalog, DEFAULT_BACKGROUND};
use crate::output::templates::{html_escape, PageContext, Section, TemplateEngine};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Selector the highlighted code lives under
const CODE_SCOPE: &str = ".highlight";

/// Builds the output document from discovered files
pub struct PageAssembler<'a, B> {
    registry: &'a PatternRegistry,
    backend: &'a B,
    templates: TemplateEngine,
    default_language: LanguageId,
    lang: String,
    show_progress: bool,
}

impl<'a, B: Highlighter + ThemeCatalog> PageAssembler<'a, B> {
    pub fn new(registry: &'a PatternRegistry, backend: &'a B) -> Result<Self> {
        Ok(Self {
            registry,
            backend,
            templates: TemplateEngine::new()?,
            default_language: LanguageId::rust(),
            lang: "en".to_string(),
            show_progress: false,
        })
    }

    /// Language for files no pattern claims
    pub fn with_default_language(mut self, language: LanguageId) -> Self {
        self.default_language = language;
        self
    }

    /// Document `lang` attribute
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Show a progress bar while rendering sections
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Render `files` (already sorted) into a complete HTML document.
    ///
    /// Fails on the first file that cannot be read as UTF-8.
    pub fn render(&self, files: &[DiscoveredFile], root: &Path, theme: &str) -> Result<String> {
        let css = self.page_css(theme)?;

        let progress = self.progress_bar(files.len());
        let mut sections = Vec::with_capacity(files.len());
        for file in files {
            progress.set_message(file.label());
            sections.push(self.render_section(file, root, theme)?);
            progress.inc(1);
        }
        progress.finish_and_clear();

        let title = html_escape(&document_title(root));
        let lang = html_escape(&self.lang);
        self.templates.render_page(&PageContext {
            title: &title,
            lang: &lang,
            css: &css,
            sections: &sections,
        })
    }

    /// Page-level CSS adapted to the theme's background
    pub fn page_css(&self, theme: &str) -> Result<String> {
        let brightness = brightness(self.backend, theme)?;
        let code_bg = self
            .backend
            .background(theme)?
            .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());
        let highlight_css = self.backend.stylesheet(theme, CODE_SCOPE)?;

        debug!("Theme {} is {} ({})", theme, brightness, code_bg);
        self.templates.render_css(brightness, &code_bg, &highlight_css)
    }

    fn render_section(&self, file: &DiscoveredFile, root: &Path, theme: &str) -> Result<Section> {
        let relative = file.path.strip_prefix(root).unwrap_or(&file.relative);
        let code = fs::read_to_string(&file.path).map_err(|e| Error::read_file(&file.path, e))?;

        let syntax = match self.registry.lookup(relative) {
            Lookup::Language(language) => Syntax::Language(language),
            Lookup::PlainText => Syntax::PlainText,
            Lookup::NoMatch => Syntax::Language(&self.default_language),
        };
        debug!("Rendering {} as {:?}", relative.display(), syntax);

        Ok(Section {
            label: html_escape(&slash_path(relative)),
            code: self.backend.highlight(&code, syntax, theme)?,
        })
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    }
}

/// Base name of the scanned directory
pub fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// Heading and `<title>` of the document
pub fn document_title(root: &Path) -> String {
    format!("{} - Rust Source", root_name(root))
}
