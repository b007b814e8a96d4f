use std::collections::HashMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::{Error, Result, RouteError};
use crate::models::{AppState, Block, Catalog, InlineCheckQuestion, MockExam, Module, Section};
use crate::quiz::{ExamResult, ExamSession, InlineCheckState, QuizPhase, QuizSession};
use crate::routes::{normalize, Page, Router, SectionRef};
use crate::seo::PageMeta;

/// One row of the catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry {
    Course(usize),
    Module(usize, usize),
    Section(SectionRef),
    Exam(usize),
}

/// The section being read and its inline check answers.
#[derive(Debug, Clone)]
pub struct Reading {
    pub route: String,
    pub at: SectionRef,
    pub scroll: u16,
    /// Index into the section's placed checks.
    pub focus: Option<usize>,
    pub checks: HashMap<String, InlineCheckState>,
}

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub site_name: String,
    /// Questions per mock exam attempt; the exam's own count when `None`.
    pub exam_count: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            site_name: "Study Centre".to_string(),
            exam_count: None,
            seed: None,
        }
    }
}

pub struct App {
    pub state: AppState,
    catalog: Catalog,
    router: Router,
    options: AppOptions,
    entries: Vec<CatalogEntry>,
    catalog_cursor: usize,
    reading: Option<Reading>,
    quiz: Option<QuizSession>,
    result_scroll: u16,
    exam: Option<ExamSession>,
    rng: StdRng,
    now: Instant,
    page: PageMeta,
    page_changed: bool,
}

impl App {
    pub fn new(catalog: Catalog, options: AppOptions) -> Result<Self> {
        let router = Router::from_catalog(&catalog)?;
        let entries = catalog_entries(&catalog);
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let page = PageMeta::new(options.site_name.clone(), "");

        Ok(Self {
            state: AppState::Catalog,
            catalog,
            router,
            options,
            entries,
            catalog_cursor: 0,
            reading: None,
            quiz: None,
            result_scroll: 0,
            exam: None,
            rng,
            now: Instant::now(),
            page,
            page_changed: true,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn site_name(&self) -> &str {
        &self.options.site_name
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn catalog_cursor(&self) -> usize {
        self.catalog_cursor
    }

    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn exam(&self) -> Option<&ExamSession> {
        self.exam.as_ref()
    }

    pub fn exam_result(&self) -> Option<&ExamResult> {
        self.exam.as_ref().and_then(ExamSession::result)
    }

    pub fn result_scroll(&self) -> u16 {
        self.result_scroll
    }

    /// Last time the app was ticked.
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn page(&self) -> &PageMeta {
        &self.page
    }

    /// The page metadata, once per change.
    pub fn take_page_change(&mut self) -> Option<PageMeta> {
        std::mem::take(&mut self.page_changed).then(|| self.page.clone())
    }

    fn set_page(&mut self, page: PageMeta) {
        if page != self.page {
            self.page = page;
            self.page_changed = true;
        }
    }

    /// The module and section under a section reference.
    pub fn locate(&self, at: SectionRef) -> Option<(&Module, &Section)> {
        let module = self.catalog.courses.get(at.course)?.modules.get(at.module)?;
        Some((module, module.sections.get(at.section)?))
    }

    pub fn current_section(&self) -> Option<&Section> {
        let reading = self.reading.as_ref()?;
        self.locate(reading.at).map(|(_, section)| section)
    }

    // Catalog

    pub fn select_next_entry(&mut self) {
        if !self.entries.is_empty() {
            self.catalog_cursor = (self.catalog_cursor + 1) % self.entries.len();
        }
    }

    pub fn select_previous_entry(&mut self) {
        if !self.entries.is_empty() {
            let len = self.entries.len();
            self.catalog_cursor = (self.catalog_cursor + len - 1) % len;
        }
    }

    /// Open the highlighted row: a course or module opens its first section.
    pub fn open_selected(&mut self) -> Result<()> {
        let Some(&entry) = self.entries.get(self.catalog_cursor) else {
            return Ok(());
        };

        match entry {
            CatalogEntry::Exam(index) => self.start_exam_at(index),
            CatalogEntry::Section(at) => self.open_section(at),
            CatalogEntry::Course(course) => match self.first_section_where(|at| at.course == course) {
                Some(at) => self.open_section(at),
                None => Ok(()),
            },
            CatalogEntry::Module(course, module) => {
                match self.first_section_where(|at| at.course == course && at.module == module) {
                    Some(at) => self.open_section(at),
                    None => Ok(()),
                }
            }
        }
    }

    fn first_section_where(&self, wanted: impl Fn(&SectionRef) -> bool) -> Option<SectionRef> {
        self.entries.iter().find_map(|entry| match entry {
            CatalogEntry::Section(at) if wanted(at) => Some(*at),
            _ => None,
        })
    }

    // Reading

    /// Show the page at `route`. Courses and modules open their first
    /// section; `/exams/{id}` starts that mock exam.
    pub fn open_route(&mut self, route: &str) -> Result<()> {
        let at = match self.router.page(route)? {
            Page::Section(at) => at,
            Page::Exam(index) => return self.start_exam_at(index),
            Page::Course(_) | Page::Module(..) => {
                let landing = self
                    .router
                    .landing(route)
                    .ok_or_else(|| RouteError::NotFound(normalize(route)))?;
                self.router.lookup(landing)?
            }
        };
        self.open_section(at)
    }

    fn open_section(&mut self, at: SectionRef) -> Result<()> {
        let route = self
            .router
            .route_of(at)
            .ok_or_else(|| RouteError::NotFound(format!("{at:?}")))?
            .to_string();
        let (module, section) = self
            .locate(at)
            .ok_or_else(|| RouteError::NotFound(route.clone()))?;
        let page = PageMeta::for_section(&self.options.site_name, &module.title, section);

        info!(route = %route, "opened section");
        if let Some(index) = self.entries.iter().position(|e| *e == CatalogEntry::Section(at)) {
            self.catalog_cursor = index;
        }
        self.reading = Some(Reading {
            route,
            at,
            scroll: 0,
            focus: None,
            checks: HashMap::new(),
        });
        self.quiz = None;
        self.state = AppState::Reading;
        self.set_page(page);
        Ok(())
    }

    pub fn scroll_down(&mut self) {
        if let Some(reading) = self.reading.as_mut() {
            reading.scroll = reading.scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(reading) = self.reading.as_mut() {
            reading.scroll = reading.scroll.saturating_sub(1);
        }
    }

    /// Inline checks in the order they appear in the prose.
    pub fn placed_checks(&self) -> Vec<&InlineCheckQuestion> {
        self.current_section().map(placed_checks).unwrap_or_default()
    }

    pub fn focused_check(&self) -> Option<&InlineCheckQuestion> {
        let focus = self.reading.as_ref()?.focus?;
        self.placed_checks().get(focus).copied()
    }

    /// Move focus to the next inline check, wrapping back to none.
    pub fn focus_next_check(&mut self) {
        let count = self.placed_checks().len();
        if let Some(reading) = self.reading.as_mut() {
            reading.focus = match reading.focus {
                None if count > 0 => Some(0),
                Some(index) if index + 1 < count => Some(index + 1),
                _ => None,
            };
        }
    }

    /// Answer the focused check with option `index` (zero-based).
    pub fn answer_focused_check(&mut self, index: usize) {
        let Some(check) = self.focused_check().cloned() else {
            return;
        };
        if let Some(reading) = self.reading.as_mut() {
            let state = reading.checks.entry(check.id.clone()).or_default();
            if state.choose(&check, index) {
                debug!(check = %check.id, correct = ?state.is_correct(&check), "inline check answered");
            }
        }
    }

    pub fn reset_focused_check(&mut self) {
        let Some(id) = self.focused_check().map(|check| check.id.clone()) else {
            return;
        };
        if let Some(state) = self.reading.as_mut().and_then(|r| r.checks.get_mut(&id)) {
            state.reset();
        }
    }

    pub fn next_section(&mut self) -> Result<()> {
        self.follow(|router, route| router.next(route).map(str::to_string))
    }

    pub fn previous_section(&mut self) -> Result<()> {
        self.follow(|router, route| router.previous(route).map(str::to_string))
    }

    fn follow(&mut self, step: impl Fn(&Router, &str) -> Option<String>) -> Result<()> {
        let Some(reading) = self.reading.as_ref() else {
            return Ok(());
        };
        match step(&self.router, &reading.route) {
            Some(target) => self.open_route(&target),
            None => Ok(()),
        }
    }

    pub fn back_to_catalog(&mut self) {
        self.state = AppState::Catalog;
        let page = PageMeta::new(self.options.site_name.clone(), "");
        self.set_page(page);
    }

    // Section quiz

    pub fn start_section_quiz(&mut self) {
        let Some(questions) = self.current_section().map(|s| s.quiz.clone()) else {
            return;
        };
        if questions.is_empty() {
            return;
        }
        self.quiz = Some(QuizSession::new(questions));
        self.state = AppState::Quiz;
    }

    pub fn quiz_next_option(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.select_next_option();
        }
    }

    pub fn quiz_previous_option(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.select_previous_option();
        }
    }

    /// Enter: submit the highlighted option, or move past a revealed one.
    pub fn quiz_confirm(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        match quiz.phase() {
            QuizPhase::Answering => quiz.submit_answer(),
            QuizPhase::Revealed => quiz.advance(),
            QuizPhase::Finished => {}
        }

        if quiz.is_finished() {
            info!(
                score = quiz.calculate_score(),
                total = quiz.total_questions(),
                "section quiz finished"
            );
            self.result_scroll = 0;
            self.state = AppState::QuizResult;
        }
    }

    pub fn scroll_results_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(1);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn retry_quiz(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.restart();
            self.state = AppState::Quiz;
        }
    }

    pub fn back_to_reading(&mut self) {
        if self.reading.is_some() {
            self.state = AppState::Reading;
        } else {
            self.back_to_catalog();
        }
    }

    // Mock exams

    pub fn start_exam(&mut self, id: &str) -> Result<()> {
        let index = self
            .catalog
            .exams
            .iter()
            .position(|exam| exam.config.id == id)
            .ok_or_else(|| Error::UnknownExam(id.to_string()))?;
        self.start_exam_at(index)
    }

    fn start_exam_at(&mut self, index: usize) -> Result<()> {
        let exam: &MockExam = self
            .catalog
            .exams
            .get(index)
            .ok_or_else(|| Error::UnknownExam(index.to_string()))?;
        let session = ExamSession::start(exam, self.options.exam_count, &mut self.rng, self.now);
        let page = PageMeta::new(
            format!("{} | {}", exam.config.title, self.options.site_name),
            "",
        );

        self.exam = Some(session);
        self.result_scroll = 0;
        self.state = AppState::Exam;
        self.set_page(page);
        Ok(())
    }

    /// A fresh draw of the exam just taken.
    pub fn retry_exam(&mut self) -> Result<()> {
        match self.exam.as_ref().map(|exam| exam.config().id.clone()) {
            Some(id) => self.start_exam(&id),
            None => Ok(()),
        }
    }

    pub fn exam_next_option(&mut self) {
        if let Some(exam) = self.exam.as_mut() {
            exam.select_next_option();
        }
    }

    pub fn exam_previous_option(&mut self) {
        if let Some(exam) = self.exam.as_mut() {
            exam.select_previous_option();
        }
    }

    /// Record the highlighted option and move to the next question.
    pub fn exam_choose(&mut self) {
        if let Some(exam) = self.exam.as_mut() {
            exam.choose();
            exam.next_question();
        }
    }

    pub fn exam_next_question(&mut self) {
        if let Some(exam) = self.exam.as_mut() {
            exam.next_question();
        }
    }

    pub fn exam_previous_question(&mut self) {
        if let Some(exam) = self.exam.as_mut() {
            exam.previous_question();
        }
    }

    pub fn submit_exam(&mut self) {
        let now = self.now;
        if let Some(exam) = self.exam.as_mut() {
            exam.submit(now);
            self.result_scroll = 0;
            self.state = AppState::ExamResult;
        }
    }

    /// Advance the clock; ends a mock exam whose time is up.
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        if self.state != AppState::Exam {
            return;
        }
        if let Some(exam) = self.exam.as_mut() {
            if exam.tick(now) {
                self.result_scroll = 0;
                self.state = AppState::ExamResult;
            }
        }
    }
}

fn catalog_entries(catalog: &Catalog) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();
    for (ci, course) in catalog.courses.iter().enumerate() {
        entries.push(CatalogEntry::Course(ci));
        for (mi, module) in course.modules.iter().enumerate() {
            entries.push(CatalogEntry::Module(ci, mi));
            for si in 0..module.sections.len() {
                entries.push(CatalogEntry::Section(SectionRef {
                    course: ci,
                    module: mi,
                    section: si,
                }));
            }
        }
    }
    entries.extend((0..catalog.exams.len()).map(CatalogEntry::Exam));
    entries
}

/// A section's inline checks in the order the prose places them.
pub fn placed_checks(section: &Section) -> Vec<&InlineCheckQuestion> {
    section
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::Check { id } => section.inline_check(id),
            _ => None,
        })
        .collect()
}
