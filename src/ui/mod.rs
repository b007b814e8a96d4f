mod catalog;
mod exam;
mod quiz;
mod result;
mod section;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub use section::section_lines;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Catalog => catalog::render(frame, area, app),
        AppState::Reading => section::render(frame, area, app),
        AppState::Quiz => quiz::render(frame, area, app),
        AppState::QuizResult => result::render(frame, area, app),
        AppState::Exam => exam::render(frame, area, app),
        AppState::ExamResult => exam::render_result(frame, area, app),
    }
}

/// Footer line listing the keys for the current view.
fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = ratatui::widgets::Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn option_label(index: usize) -> char {
    const LABELS: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];
    LABELS.get(index).copied().unwrap_or('?')
}
