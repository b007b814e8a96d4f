use std::collections::HashSet;
use std::fmt;

use crate::models::{Block, Catalog, MockExam, Section, NUM_QUIZ_OPTIONS};
use crate::routes::{course_route, exam_route, module_route, resolve, section_route};

/// Longest page description search engines show in full.
pub const MAX_DESCRIPTION_LEN: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A content problem and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub location: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{label}: {}: {}", self.location, self.message)
    }
}

#[derive(Default)]
struct Issues(Vec<Issue>);

impl Issues {
    fn error(&mut self, location: &str, message: impl Into<String>) {
        self.push(Severity::Error, location, message.into());
    }

    fn warn(&mut self, location: &str, message: impl Into<String>) {
        self.push(Severity::Warning, location, message.into());
    }

    fn push(&mut self, severity: Severity, location: &str, message: String) {
        self.0.push(Issue {
            severity,
            location: location.to_string(),
            message,
        });
    }
}

/// Check a catalog against the content rules. Errors make the catalog
/// unusable; warnings are worth fixing but harmless.
pub fn validate_catalog(catalog: &Catalog) -> Vec<Issue> {
    let mut issues = Issues::default();

    if catalog.is_empty() {
        issues.error("/", "no courses or mock exams");
    }

    let routes = known_routes(catalog);
    let mut course_slugs = HashSet::new();

    for course in &catalog.courses {
        let course_at = course_route(&course.slug);
        if !course_slugs.insert(course.slug.as_str()) {
            issues.error(&course_at, "duplicate course slug");
        }
        if course.section_count() == 0 {
            issues.error(&course_at, "course has no sections");
        }

        let mut module_slugs = HashSet::new();
        for module in &course.modules {
            let module_at = module_route(&course.slug, &module.slug);
            if !module_slugs.insert(module.slug.as_str()) {
                issues.error(&module_at, "duplicate module slug");
            }

            let mut section_slugs = HashSet::new();
            for section in &module.sections {
                let route = section_route(&course.slug, &module.slug, &section.slug);
                if !section_slugs.insert(section.slug.as_str()) {
                    issues.error(&route, "duplicate section slug");
                }
                check_section(&mut issues, &route, section, &routes);
            }
        }
    }

    let mut exam_ids = HashSet::new();
    for exam in &catalog.exams {
        let at = exam_route(&exam.config.id);
        if !exam_ids.insert(exam.config.id.as_str()) {
            issues.error(&at, "duplicate exam id");
        }
        check_exam(&mut issues, &at, exam);
    }

    issues.0
}

/// Routes a previous/next link may point at: courses and modules land on
/// their first section. Mock exams are left out because the pager only
/// moves between reading pages.
fn known_routes(catalog: &Catalog) -> HashSet<String> {
    let mut routes = HashSet::new();
    for course in &catalog.courses {
        routes.insert(course_route(&course.slug));
        for module in &course.modules {
            routes.insert(module_route(&course.slug, &module.slug));
            for section in &module.sections {
                routes.insert(section_route(&course.slug, &module.slug, &section.slug));
            }
        }
    }
    routes
}

fn check_section(issues: &mut Issues, at: &str, section: &Section, routes: &HashSet<String>) {
    if section.description.trim().is_empty() {
        issues.warn(at, "missing page description");
    } else if section.description.chars().count() > MAX_DESCRIPTION_LEN {
        issues.warn(
            at,
            format!("page description longer than {MAX_DESCRIPTION_LEN} characters"),
        );
    }

    let mut quiz_ids = HashSet::new();
    for question in &section.quiz {
        if !quiz_ids.insert(question.id) {
            issues.error(at, format!("duplicate quiz question id {}", question.id));
        }
        if question.correct_answer >= NUM_QUIZ_OPTIONS {
            issues.error(
                at,
                format!(
                    "quiz question {} marks option {} correct but has {NUM_QUIZ_OPTIONS}",
                    question.id, question.correct_answer
                ),
            );
        }
    }

    let mut check_ids = HashSet::new();
    for check in &section.inline_checks {
        if !check_ids.insert(check.id.as_str()) {
            issues.error(at, format!("duplicate inline check id '{}'", check.id));
        }
        if check.options.len() < 2 {
            issues.error(at, format!("inline check '{}' needs at least two options", check.id));
        }
        if check.correct_index >= check.options.len() {
            issues.error(
                at,
                format!(
                    "inline check '{}' marks option {} correct but has {}",
                    check.id,
                    check.correct_index,
                    check.options.len()
                ),
            );
        }
    }

    let mut placed = HashSet::new();
    for block in &section.blocks {
        if let Block::Check { id } = block {
            if section.inline_check(id).is_none() {
                issues.error(at, format!("check block refers to unknown inline check '{id}'"));
            }
            placed.insert(id.as_str());
        }
    }
    for check in &section.inline_checks {
        if !placed.contains(check.id.as_str()) {
            issues.warn(at, format!("inline check '{}' is never placed", check.id));
        }
    }

    for link in [&section.previous, &section.next].into_iter().flatten() {
        let target = resolve(at, &link.to);
        if !routes.contains(&target) {
            issues.error(at, format!("link '{}' leads to unknown page {target}", link.label));
        }
    }
}

fn check_exam(issues: &mut Issues, at: &str, exam: &MockExam) {
    let config = &exam.config;
    if config.pass_threshold > 100 {
        issues.error(at, format!("pass threshold {}% is above 100%", config.pass_threshold));
    }
    if config.total_questions == 0 {
        issues.error(at, "exam draws no questions");
    }
    if config.categories.is_empty() {
        issues.error(at, "exam has no categories");
    }
    if exam.questions.is_empty() {
        issues.error(at, "exam bank has no questions");
    } else if exam.questions.len() < config.total_questions {
        issues.warn(
            at,
            format!(
                "bank holds {} questions, fewer than the {} drawn",
                exam.questions.len(),
                config.total_questions
            ),
        );
    }

    let categories: HashSet<&str> = config.categories.iter().map(String::as_str).collect();
    let mut ids = HashSet::new();
    for bank in &exam.questions {
        let question = &bank.question;
        if !ids.insert(question.id) {
            issues.error(at, format!("duplicate bank question id {}", question.id));
        }
        if question.correct_answer >= NUM_QUIZ_OPTIONS {
            issues.error(
                at,
                format!("bank question {} has no option {}", question.id, question.correct_answer),
            );
        }
        if !categories.contains(bank.category.as_str()) {
            issues.error(
                at,
                format!("bank question {} uses unknown category '{}'", question.id, bank.category),
            );
        }
    }
}
