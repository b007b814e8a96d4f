//! Static HTML export.
//!
//! Each section becomes `{route}/index.html`. Links between pages are
//! relative so the output can be browsed straight from disk. Quiz answers
//! sit in `<details>` disclosures; no scripting is involved.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::error::{Error, Result, RouteError};
use crate::models::{Block, Catalog, InlineCheckQuestion, Module, QuizQuestion, Section};
use crate::routes::{Router, SectionRef};
use crate::seo::PageMeta;

const OPTION_LABELS: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

fn option_label(index: usize) -> char {
    OPTION_LABELS.get(index).copied().unwrap_or('?')
}

/// Number of `/`-separated segments in a route.
fn depth(route: &str) -> usize {
    route.split('/').filter(|s| !s.is_empty()).count()
}

/// Relative link from the page at `from` to the page at `to`.
pub fn relative_href(from: &str, to: &str) -> String {
    let up = "../".repeat(depth(from));
    let target = to.trim_matches('/');
    if target.is_empty() {
        format!("{up}index.html")
    } else {
        format!("{up}{target}/index.html")
    }
}

/// File a route is written to under `root`.
pub fn page_path(root: &Path, route: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in route.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.join("index.html")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub root: PathBuf,
    pub pages: usize,
}

/// Write the whole site under `out`.
pub fn export_site(catalog: &Catalog, router: &Router, site: &SiteConfig, out: &Path) -> Result<ExportSummary> {
    let mut pages = 0;
    if router.is_empty() {
        warn!("no course sections to export; writing the index only");
    }

    write_page(&page_path(out, "/"), &render_index(catalog, router, site))?;
    pages += 1;

    for route in router.routes() {
        let at = router.lookup(route)?;
        let (module, section) =
            locate(catalog, at).ok_or_else(|| RouteError::NotFound(route.to_string()))?;
        let html = render_section(catalog, router, site, route, module, section);
        write_page(&page_path(out, route), &html)?;
        pages += 1;
    }

    info!(out = %out.display(), pages, "exported site");
    Ok(ExportSummary {
        root: out.to_path_buf(),
        pages,
    })
}

fn locate(catalog: &Catalog, at: SectionRef) -> Option<(&Module, &Section)> {
    let module = catalog.courses.get(at.course)?.modules.get(at.module)?;
    Some((module, module.sections.get(at.section)?))
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    fs::write(path, html).map_err(|e| Error::io_with_path(e, path))?;
    debug!(path = %path.display(), "wrote page");
    Ok(())
}

fn document(meta: &PageMeta, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en-GB\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         {}</head>\n<body>\n{body}</body>\n</html>\n",
        meta.head_html()
    )
}

/// The landing page listing every course, module and section.
pub fn render_index(catalog: &Catalog, router: &Router, site: &SiteConfig) -> String {
    let meta = PageMeta::new(
        site.name.clone(),
        format!("{} courses for electrical and trades apprentices", catalog.courses.len()),
    )
    .with_canonical(site.base_url.as_deref(), "/");

    let mut body = format!("<h1>{}</h1>\n", escape_html(&site.name));
    for (ci, course) in catalog.courses.iter().enumerate() {
        let _ = writeln!(body, "<section class=\"course\">\n<h2>{}</h2>", escape_html(&course.title));
        if !course.summary.is_empty() {
            let _ = writeln!(body, "<p>{}</p>", escape_html(&course.summary));
        }
        for (mi, module) in course.modules.iter().enumerate() {
            let _ = writeln!(body, "<h3>{}</h3>\n<ul>", escape_html(&module.title));
            for (si, section) in module.sections.iter().enumerate() {
                let at = SectionRef {
                    course: ci,
                    module: mi,
                    section: si,
                };
                if let Some(route) = router.route_of(at) {
                    let _ = writeln!(
                        body,
                        "<li><a href=\"{}\">{}</a></li>",
                        escape_html(&relative_href("/", route)),
                        escape_html(&section.title)
                    );
                }
            }
            body.push_str("</ul>\n");
        }
        body.push_str("</section>\n");
    }

    document(&meta, &body)
}

/// One section page.
pub fn render_section(
    catalog: &Catalog,
    router: &Router,
    site: &SiteConfig,
    route: &str,
    module: &Module,
    section: &Section,
) -> String {
    let meta = PageMeta::for_section(&site.name, &module.title, section)
        .with_canonical(site.base_url.as_deref(), route);

    let mut body = String::new();
    let _ = writeln!(
        body,
        "<nav class=\"breadcrumb\"><a href=\"{}\">{}</a> / {}</nav>",
        escape_html(&relative_href(route, "/")),
        escape_html(&site.name),
        escape_html(&module.title)
    );
    let _ = writeln!(body, "<article>\n<h1>{}</h1>", escape_html(&section.title));
    if !section.description.is_empty() {
        let _ = writeln!(body, "<p class=\"lead\">{}</p>", escape_html(&section.description));
    }

    for block in &section.blocks {
        render_block(&mut body, section, block);
    }

    if !section.faqs.is_empty() {
        body.push_str("<section class=\"faqs\">\n<h2>Common Questions</h2>\n");
        for faq in &section.faqs {
            let _ = writeln!(
                body,
                "<h3>{}</h3>\n<p>{}</p>",
                escape_html(&faq.question),
                escape_html(&faq.answer)
            );
        }
        body.push_str("</section>\n");
    }

    if !section.quiz.is_empty() {
        body.push_str("<section class=\"quiz\">\n<h2>Test Your Knowledge</h2>\n<ol>\n");
        for question in &section.quiz {
            render_quiz_question(&mut body, question);
        }
        body.push_str("</ol>\n</section>\n");
    }

    render_navigation(&mut body, catalog, router, route, section);
    body.push_str("</article>\n");

    document(&meta, &body)
}

fn render_block(body: &mut String, section: &Section, block: &Block) {
    match block {
        Block::Heading { text } => {
            let _ = writeln!(body, "<h2>{}</h2>", escape_html(text));
        }
        Block::Paragraph { text } => {
            let _ = writeln!(body, "<p>{}</p>", escape_html(text));
        }
        Block::List { items } => {
            body.push_str("<ul>\n");
            for item in items {
                let _ = writeln!(body, "<li>{}</li>", escape_html(item));
            }
            body.push_str("</ul>\n");
        }
        Block::Table { headers, rows } => {
            body.push_str("<table>\n<thead><tr>");
            for header in headers {
                let _ = write!(body, "<th>{}</th>", escape_html(header));
            }
            body.push_str("</tr></thead>\n<tbody>\n");
            for row in rows {
                body.push_str("<tr>");
                for cell in row {
                    let _ = write!(body, "<td>{}</td>", escape_html(cell));
                }
                body.push_str("</tr>\n");
            }
            body.push_str("</tbody>\n</table>\n");
        }
        Block::WorkedExample {
            title,
            steps,
            answer,
        } => {
            let _ = writeln!(
                body,
                "<section class=\"worked-example\">\n<h3>{}</h3>\n<ol>",
                escape_html(title)
            );
            for step in steps {
                let _ = writeln!(body, "<li>{}</li>", escape_html(step));
            }
            let _ = writeln!(
                body,
                "</ol>\n<p class=\"answer\"><strong>Answer:</strong> {}</p>\n</section>",
                escape_html(answer)
            );
        }
        Block::Callout { title, body: text } => {
            let _ = writeln!(
                body,
                "<aside class=\"callout\">\n<h3>{}</h3>\n<p>{}</p>\n</aside>",
                escape_html(title),
                escape_html(text)
            );
        }
        Block::Check { id } => {
            if let Some(check) = section.inline_check(id) {
                render_inline_check(body, check);
            }
        }
    }
}

fn render_options(body: &mut String, options: &[String]) {
    body.push_str("<ol type=\"A\">\n");
    for option in options {
        let _ = writeln!(body, "<li>{}</li>", escape_html(option));
    }
    body.push_str("</ol>\n");
}

fn render_answer(body: &mut String, index: usize, option: Option<&str>, explanation: &str) {
    let option = option.map(|o| escape_html(o)).unwrap_or_default();
    let _ = writeln!(
        body,
        "<details>\n<summary>Show answer</summary>\n<p><strong>{}. {option}</strong></p>",
        option_label(index)
    );
    if !explanation.is_empty() {
        let _ = writeln!(body, "<p>{}</p>", escape_html(explanation));
    }
    body.push_str("</details>\n");
}

fn render_inline_check(body: &mut String, check: &InlineCheckQuestion) {
    let _ = writeln!(
        body,
        "<div class=\"inline-check\" id=\"{}\">\n<p class=\"question\">{}</p>",
        escape_html(&check.id),
        escape_html(&check.text)
    );
    render_options(body, &check.options);
    render_answer(
        body,
        check.correct_index,
        check.options.get(check.correct_index).map(String::as_str),
        &check.explanation,
    );
    body.push_str("</div>\n");
}

fn render_quiz_question(body: &mut String, question: &QuizQuestion) {
    let _ = writeln!(body, "<li>\n<p class=\"question\">{}</p>", escape_html(&question.text));
    render_options(body, &question.options);
    render_answer(
        body,
        question.correct_answer,
        question.correct_option(),
        &question.explanation,
    );
    body.push_str("</li>\n");
}

fn render_navigation(body: &mut String, catalog: &Catalog, router: &Router, route: &str, section: &Section) {
    let previous = router.previous(route).map(|target| {
        let label = section
            .previous
            .as_ref()
            .map(|link| link.label.clone())
            .unwrap_or_else(|| format!("Previous: {}", title_of(catalog, router, target)));
        (target, label)
    });
    let next = router.next(route).map(|target| {
        let label = section
            .next
            .as_ref()
            .map(|link| link.label.clone())
            .unwrap_or_else(|| format!("Next: {}", title_of(catalog, router, target)));
        (target, label)
    });

    if previous.is_none() && next.is_none() {
        return;
    }

    body.push_str("<nav class=\"pager\">\n");
    for (rel, (target, label)) in [("prev", previous), ("next", next)]
        .into_iter()
        .filter_map(|(rel, link)| link.map(|l| (rel, l)))
    {
        let _ = writeln!(
            body,
            "<a rel=\"{rel}\" href=\"{}\">{}</a>",
            escape_html(&relative_href(route, target)),
            escape_html(&label)
        );
    }
    body.push_str("</nav>\n");
}

fn title_of(catalog: &Catalog, router: &Router, route: &str) -> String {
    router
        .section(catalog, route)
        .map(|section| section.title.clone())
        .unwrap_or_else(|| route.to_string())
}
