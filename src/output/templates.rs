// Template engine for the page shell and page-level CSS

use crate::error::Result;
use crate::highlight::Brightness;
use serde::Serialize;
use tera::{Context, Tera};

/// One file's rendered block
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    /// Escaped relative path shown above the code
    pub label: String,
    /// Highlighted markup
    pub code: String,
}

/// Values for the document shell. Every field must already be HTML-safe.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub lang: &'a str,
    pub css: &'a str,
    pub sections: &'a [Section],
}

/// Template engine wrapping Tera with the embedded templates
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates.
    ///
    /// Names carry no `.html` suffix so Tera leaves values alone; callers
    /// escape what they insert.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("page", include_str!("../../templates/page.html.tera")),
            ("dark.css", include_str!("../../templates/dark.css.tera")),
            ("light.css", include_str!("../../templates/light.css.tera")),
        ])?;

        Ok(Self { tera })
    }

    /// Page CSS for a background of the given brightness
    pub fn render_css(&self, brightness: Brightness, code_bg: &str, highlight_css: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("code_bg", code_bg);
        context.insert("highlight_css", highlight_css);

        let template = match brightness {
            Brightness::Dark => "dark.css",
            Brightness::Light => "light.css",
        };

        Ok(self.tera.render(template, &context)?)
    }

    /// The complete document
    pub fn render_page(&self, page: &PageContext<'_>) -> Result<String> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render("page", &context)?)
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<div>"), "&lt;div&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#39;s");
        assert_eq!(html_escape("src/main.rs"), "src/main.rs");
    }

    #[test]
    fn test_both_css_templates_have_print_rules() {
        let engine = TemplateEngine::new().unwrap();
        for brightness in [Brightness::Dark, Brightness::Light] {
            let css = engine.render_css(brightness, "#123456", ".highlight { color: red; }").unwrap();
            assert!(css.contains("@media print"), "{brightness}");
            assert!(css.contains("break-inside: avoid"), "{brightness}");
            assert!(css.contains("font-size: 9pt"), "{brightness}");
            assert!(css.contains("background: #123456"), "{brightness}");
            assert!(css.contains(".highlight { color: red; }"), "{brightness}");
        }
    }

    #[test]
    fn test_css_palettes_differ() {
        let engine = TemplateEngine::new().unwrap();
        let dark = engine.render_css(Brightness::Dark, "#000000", "").unwrap();
        let light = engine.render_css(Brightness::Light, "#ffffff", "").unwrap();
        assert!(dark.contains("background: #2b2b2b"));
        assert!(light.contains("background: #f5f5f5"));
    }

    #[test]
    fn test_render_page() {
        let engine = TemplateEngine::new().unwrap();
        let sections = vec![
            Section {
                label: "a.rs".to_string(),
                code: "<span>fn</span> a() {}".to_string(),
            },
            Section {
                label: "src/b.rs".to_string(),
                code: "b".to_string(),
            },
        ];
        let html = engine
            .render_page(&PageContext {
                title: "demo - Rust Source",
                lang: "en",
                css: "body { margin: 0; }",
                sections: &sections,
            })
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<title>demo - Rust Source</title>"));
        assert!(html.contains("<h1>demo - Rust Source</h1>"));
        assert!(html.contains("body { margin: 0; }"));
        assert!(html.contains("<div class=\"file-name\">[a.rs]</div>"));
        assert!(html.contains("<pre><span>fn</span> a() {}</pre>"));
        assert!(html.find("[a.rs]").unwrap() < html.find("[src/b.rs]").unwrap());
        assert_eq!(html.matches("class=\"file-section\"").count(), 2);
    }
}
