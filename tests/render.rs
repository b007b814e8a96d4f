mod common;

use ratatui::backend::TestBackend;
use ratatui::text::Line;
use ratatui::Terminal;
use study_centre::{render, section_lines, App, AppOptions};

fn app() -> App {
    let options = AppOptions {
        seed: Some(3),
        ..AppOptions::default()
    };
    App::new(common::catalog(), options).unwrap()
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
    terminal.draw(|frame| render(frame, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn plain(lines: &[Line]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
        .collect()
}

#[test]
fn catalog_lists_courses_and_exams() {
    let text = screen(&app());
    assert!(text.contains("STUDY CENTRE"));
    assert!(text.contains("3 sections · 1 mock exams"));
    assert!(text.contains("HNC Building Services"));
    assert!(text.contains("Mock exam: AM2 Mock Exam"));
}

#[test]
fn reading_view_shows_title_route_and_checks() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();
    let text = screen(&app);
    assert!(text.contains("Ventilation Principles"));
    assert!(text.contains("/hnc/module-1/section-1"));
    assert!(text.contains("? Quick check"));
    assert!(text.contains("Worked example: Air change rate"));
}

#[test]
fn section_lines_mark_answered_checks() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();
    app.focus_next_check();
    app.answer_focused_check(0);

    let section = app.current_section().unwrap();
    let reading = app.reading().unwrap();
    let lines = plain(&section_lines(section, reading, Some("air-changes")));

    assert!(lines.iter().any(|l| l.contains("✗ 1. Yes")));
    assert!(lines.iter().any(|l| l.contains("✓ 2. No")));
    assert!(lines.iter().any(|l| l.starts_with("  Not quite. Because of air-changes.")));
    assert!(lines.contains(&"COMMON QUESTIONS".to_string()));
    assert!(lines.contains(&"Press t to take the 3-question quiz".to_string()));
    // The second check is still unanswered.
    assert!(lines.iter().all(|l| !l.contains("Because of fresh-air")));
}

#[test]
fn quiz_view_shows_progress_and_explanation_once_revealed() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();
    app.start_section_quiz();

    let text = screen(&app);
    assert!(text.contains("Test Your Knowledge  1/3"));
    assert!(text.contains("Quiz question 1"));
    assert!(!text.contains("Explanation 1"));

    app.quiz_confirm();
    let text = screen(&app);
    assert!(text.contains("Correct"));
    assert!(text.contains("Explanation 1"));
}

#[test]
fn quiz_results_show_score() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();
    app.start_section_quiz();
    for _ in 0..6 {
        app.quiz_confirm();
    }
    let text = screen(&app);
    assert!(text.contains("RESULTS"));
    assert!(text.contains("1 / 3"));
}

#[test]
fn exam_view_shows_clock_and_result() {
    let mut app = app();
    app.start_exam("am2").unwrap();

    let text = screen(&app);
    assert!(text.contains("AM2 Mock Exam  1/6  (0 answered)"));
    assert!(text.contains("10:00"));

    app.submit_exam();
    let text = screen(&app);
    assert!(text.contains("FAIL  0 / 6"));
    assert!(text.contains("pass mark 80%"));
}

#[test]
fn exam_view_explains_an_empty_draw() {
    let options = AppOptions {
        seed: Some(3),
        exam_count: Some(0),
        ..AppOptions::default()
    };
    let mut app = App::new(common::catalog(), options).unwrap();
    app.start_exam("am2").unwrap();

    let text = screen(&app);
    assert!(text.contains("AM2 Mock Exam  0/0  (0 answered)"));
    assert!(text.contains("No questions were drawn for this attempt."));
    assert!(text.contains("s submit"));

    app.submit_exam();
    assert!(screen(&app).contains("FAIL  0 / 0"));
}
