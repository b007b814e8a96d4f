//! Page titles and descriptions.
//!
//! The terminal gets the page title as its window title; exported pages get
//! the usual `<head>` tags.

use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::{terminal::SetTitle, ExecutableCommand};

use crate::export::escape_html;
use crate::models::Section;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: Option<String>,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            canonical: None,
        }
    }

    /// "Ventilation Principles - HNC Module 8 | Study Centre"
    pub fn for_section(site: &str, module_title: &str, section: &Section) -> Self {
        Self::new(
            format!("{} - {} | {site}", section.title, module_title),
            section.description.clone(),
        )
    }

    /// Point the canonical link at `route` under `base_url`, if there is one.
    pub fn with_canonical(mut self, base_url: Option<&str>, route: &str) -> Self {
        self.canonical = base_url.map(|base| format!("{}{route}", base.trim_end_matches('/')));
        self
    }

    /// `<head>` tags for an exported page.
    pub fn head_html(&self) -> String {
        let title = escape_html(&self.title);
        let description = escape_html(&self.description);

        let mut head = String::new();
        let _ = writeln!(head, "<title>{title}</title>");
        let _ = writeln!(head, r#"<meta name="description" content="{description}">"#);
        let _ = writeln!(head, r#"<meta property="og:title" content="{title}">"#);
        let _ = writeln!(head, r#"<meta property="og:description" content="{description}">"#);
        if let Some(canonical) = &self.canonical {
            let canonical = escape_html(canonical);
            let _ = writeln!(head, r#"<link rel="canonical" href="{canonical}">"#);
            let _ = writeln!(head, r#"<meta property="og:url" content="{canonical}">"#);
        }
        head
    }
}

/// Show the page title in the terminal's title bar.
pub fn use_seo<W: Write>(out: &mut W, meta: &PageMeta) -> io::Result<()> {
    out.execute(SetTitle(&meta.title))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Section {
        Section {
            slug: "section-2-1".to_string(),
            title: "Ventilation Principles".to_string(),
            description: "Air change rates & CO2 <1000 ppm".to_string(),
            blocks: Vec::new(),
            inline_checks: Vec::new(),
            quiz: Vec::new(),
            faqs: Vec::new(),
            previous: None,
            next: None,
        }
    }

    #[test]
    fn section_title_format() {
        let meta = PageMeta::for_section("Study Centre", "HNC Module 8", &section());
        assert_eq!(meta.title, "Ventilation Principles - HNC Module 8 | Study Centre");
        assert_eq!(meta.canonical, None);
    }

    #[test]
    fn head_tags_are_escaped() {
        let meta = PageMeta::for_section("Study Centre", "HNC Module 8", &section());
        let head = meta.head_html();
        assert!(head.contains(r#"<meta name="description" content="Air change rates &amp; CO2 &lt;1000 ppm">"#));
        assert!(!head.contains("canonical"));
    }

    #[test]
    fn canonical_joins_base_and_route() {
        let meta = PageMeta::new("t", "d")
            .with_canonical(Some("https://example.org/study/"), "/hnc/module-8/section-2-1");
        assert_eq!(
            meta.canonical.as_deref(),
            Some("https://example.org/study/hnc/module-8/section-2-1")
        );
        assert!(meta.head_html().contains(r#"<link rel="canonical""#));
    }

    #[test]
    fn terminal_title_is_written() {
        let mut out = Vec::new();
        use_seo(&mut out, &PageMeta::new("Ventilation Principles", "")).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("Ventilation Principles"));
    }
}
