//! # study-centre
//!
//! A terminal study centre for electrical and trades apprentices: course
//! sections with worked examples, inline checks and end-of-section quizzes,
//! plus timed mock exams drawn from category-balanced question banks.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use study_centre::{AppOptions, StudyCentre};
//!
//! fn main() -> study_centre::Result<()> {
//!     // Load courses and exams from a content directory
//!     let centre = StudyCentre::from_path("content", AppOptions::default())?;
//!
//!     // Browse them in the terminal
//!     centre.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod quiz;
pub mod routes;
pub mod seo;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{info, warn};

pub use app::{placed_checks, App, AppOptions, CatalogEntry, Reading};
pub use data::{load_catalog, LoadError};
pub use error::{Error, Result};
pub use models::{AppState, Catalog};
pub use ui::{render, section_lines};

/// How often the event loop wakes without input, for the exam clock.
const TICK_RATE: Duration = Duration::from_millis(250);

/// A study session that can be run in the terminal.
pub struct StudyCentre {
    app: App,
}

impl StudyCentre {
    pub fn new(catalog: Catalog, options: AppOptions) -> Result<Self> {
        Ok(Self {
            app: App::new(catalog, options)?,
        })
    }

    /// Load content from a JSON file or content directory.
    pub fn from_path<P: AsRef<Path>>(path: P, options: AppOptions) -> Result<Self> {
        let catalog = load_catalog(path)?;
        Self::new(catalog, options)
    }

    /// Start on the section at `route` instead of the catalog.
    pub fn open(&mut self, route: &str) -> Result<()> {
        self.app.open_route(route)
    }

    /// Start straight into the mock exam with this id.
    pub fn start_exam(&mut self, id: &str) -> Result<()> {
        self.app.start_exam(id)
    }

    /// Run in the terminal until the user quits.
    pub fn run(mut self) -> Result<()> {
        let mut guard = terminal::TerminalGuard::new()?;
        info!("terminal session started");
        let result = run_event_loop(&mut guard.terminal, &mut self.app);
        info!("terminal session ended");
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(page) = app.take_page_change() {
            seo::use_seo(&mut io::stdout(), &page)?;
        }

        if !event::poll(TICK_RATE)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Catch up the clock so a late submit sees the expired limit.
            app.tick(Instant::now());

            match handle_input(app, key.code) {
                Ok(true) => break,
                Ok(false) => {}
                // A bad link should not end the session.
                Err(e) => warn!("{e}"),
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
pub fn handle_input(app: &mut App, key: KeyCode) -> Result<bool> {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return Ok(true);
    }

    match app.state {
        AppState::Catalog => handle_catalog_input(app, key)?,
        AppState::Reading => handle_reading_input(app, key)?,
        AppState::Quiz => handle_quiz_input(app, key)?,
        AppState::QuizResult => handle_quiz_result_input(app, key)?,
        AppState::Exam => handle_exam_input(app, key)?,
        AppState::ExamResult => handle_exam_result_input(app, key)?,
    }
    Ok(false)
}

fn handle_catalog_input(app: &mut App, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_entry(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_entry(),
        KeyCode::Enter => app.open_selected()?,
        _ => {}
    }
    Ok(())
}

fn handle_reading_input(app: &mut App, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::Tab => app.focus_next_check(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.answer_focused_check(index);
        }
        KeyCode::Char('x') => app.reset_focused_check(),
        KeyCode::Char('n') | KeyCode::Right => app.next_section()?,
        KeyCode::Char('p') | KeyCode::Left => app.previous_section()?,
        KeyCode::Char('t') => app.start_section_quiz(),
        KeyCode::Esc => app.back_to_catalog(),
        _ => {}
    }
    Ok(())
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.quiz_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.quiz_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.quiz_confirm(),
        KeyCode::Esc => app.back_to_reading(),
        _ => {}
    }
    Ok(())
}

fn handle_quiz_result_input(app: &mut App, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retry_quiz(),
        KeyCode::Esc => app.back_to_reading(),
        _ => {}
    }
    Ok(())
}

fn handle_exam_input(app: &mut App, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.exam_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.exam_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.exam_choose(),
        KeyCode::Right | KeyCode::Char('l') => app.exam_next_question(),
        KeyCode::Left | KeyCode::Char('h') => app.exam_previous_question(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.submit_exam(),
        _ => {}
    }
    Ok(())
}

fn handle_exam_result_input(app: &mut App, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retry_exam()?,
        KeyCode::Esc => app.back_to_catalog(),
        _ => {}
    }
    Ok(())
}
