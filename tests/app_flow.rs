mod common;

use std::time::Duration;

use crossterm::event::KeyCode;
use study_centre::{handle_input, App, AppOptions, AppState, Error};

fn app() -> App {
    let options = AppOptions {
        seed: Some(7),
        ..AppOptions::default()
    };
    App::new(common::catalog(), options).unwrap()
}

fn reading_route(app: &App) -> &str {
    &app.reading().unwrap().route
}

#[test]
fn opening_a_course_shows_its_first_section() {
    let mut app = app();
    assert_eq!(app.state, AppState::Catalog);
    assert_eq!(app.take_page_change().unwrap().title, "Study Centre");

    app.open_selected().unwrap();

    assert_eq!(app.state, AppState::Reading);
    assert_eq!(reading_route(&app), "/hnc/module-1/section-1");
    let page = app.take_page_change().unwrap();
    assert_eq!(
        page.title,
        "Ventilation Principles - Module 1: Ventilation | Study Centre"
    );
    assert_eq!(page.description, "Ventilation Principles for apprentices.");
    assert!(app.take_page_change().is_none());
}

#[test]
fn unknown_route_is_an_error_and_keeps_state() {
    let mut app = app();
    let err = app.open_route("/hnc/module-9/section-1").unwrap_err();
    assert!(matches!(err, Error::Route(_)));
    assert_eq!(app.state, AppState::Catalog);
}

#[test]
fn routes_are_normalized_before_lookup() {
    let mut app = app();
    app.open_route("/hnc/module-1/./section-2/").unwrap();
    assert_eq!(reading_route(&app), "/hnc/module-1/section-2");
}

#[test]
fn next_and_previous_follow_links_then_reading_order() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();

    app.next_section().unwrap();
    assert_eq!(reading_route(&app), "/hnc/module-1/section-2");

    app.next_section().unwrap();
    assert_eq!(reading_route(&app), "/hnc/module-2/section-1");

    // Last section of the course.
    app.next_section().unwrap();
    assert_eq!(reading_route(&app), "/hnc/module-2/section-1");

    app.previous_section().unwrap();
    assert_eq!(reading_route(&app), "/hnc/module-1/section-2");
}

#[test]
fn course_and_module_routes_open_their_first_section() {
    let mut app = app();
    app.open_route("/hnc").unwrap();
    assert_eq!(reading_route(&app), "/hnc/module-1/section-1");

    app.open_route("/hnc/module-2/").unwrap();
    assert_eq!(app.state, AppState::Reading);
    assert_eq!(reading_route(&app), "/hnc/module-2/section-1");
}

#[test]
fn exam_route_starts_the_exam() {
    let mut app = app();
    app.open_route("/exams/am2").unwrap();
    assert_eq!(app.state, AppState::Exam);
    assert_eq!(app.exam().unwrap().config().id, "am2");
    assert_eq!(app.take_page_change().unwrap().title, "AM2 Mock Exam | Study Centre");

    assert!(matches!(app.open_route("/exams/nope"), Err(Error::Route(_))));
}

#[test]
fn inline_checks_lock_on_first_choice_until_reset() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();
    assert_eq!(app.placed_checks().len(), 2);
    assert!(app.focused_check().is_none());

    app.focus_next_check();
    let check = app.focused_check().unwrap().clone();
    assert_eq!(check.id, "air-changes");

    app.answer_focused_check(0);
    app.answer_focused_check(1);
    let state = &app.reading().unwrap().checks["air-changes"];
    assert_eq!(state.selected(), Some(0));
    assert_eq!(state.is_correct(&check), Some(false));

    app.reset_focused_check();
    assert!(!app.reading().unwrap().checks["air-changes"].is_answered());

    app.answer_focused_check(1);
    let state = &app.reading().unwrap().checks["air-changes"];
    assert_eq!(state.is_correct(&check), Some(true));
    assert_eq!(state.explanation(&check), Some("Because of air-changes."));
}

#[test]
fn check_focus_cycles_through_placed_checks() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();

    app.focus_next_check();
    app.focus_next_check();
    assert_eq!(app.focused_check().unwrap().id, "fresh-air");
    app.focus_next_check();
    assert!(app.focused_check().is_none());
}

#[test]
fn out_of_range_check_answer_is_ignored() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();
    app.focus_next_check();
    app.answer_focused_check(8);
    assert!(app.reading().unwrap().checks.values().all(|s| !s.is_answered()));
}

#[test]
fn section_quiz_reveals_each_answer_then_scores() {
    let mut app = app();
    app.open_route("/hnc/module-1/section-1").unwrap();
    app.start_section_quiz();
    assert_eq!(app.state, AppState::Quiz);

    // Question 1: correct answer is A.
    app.quiz_confirm();
    assert_eq!(app.quiz().unwrap().current_answer(), Some(0));
    app.quiz_confirm();

    // Question 2: correct answer is D.
    app.quiz_previous_option();
    app.quiz_confirm();
    app.quiz_confirm();

    // Question 3: answer A, correct is B.
    app.quiz_confirm();
    assert_eq!(app.state, AppState::Quiz);
    app.quiz_confirm();

    assert_eq!(app.state, AppState::QuizResult);
    let quiz = app.quiz().unwrap();
    assert_eq!(quiz.calculate_score(), 2);
    assert_eq!(quiz.total_questions(), 3);

    app.retry_quiz();
    assert_eq!(app.state, AppState::Quiz);
    assert_eq!(app.quiz().unwrap().calculate_score(), 0);

    app.back_to_reading();
    assert_eq!(app.state, AppState::Reading);
}

#[test]
fn section_without_quiz_stays_on_reading() {
    let mut app = app();
    app.open_route("/hnc/module-2/section-1").unwrap();
    app.start_section_quiz();
    assert_eq!(app.state, AppState::Reading);
}

#[test]
fn mock_exam_draws_balanced_and_scores_on_submit() {
    let mut app = app();
    app.start_exam("am2").unwrap();
    assert_eq!(app.state, AppState::Exam);
    assert_eq!(app.take_page_change().unwrap().title, "AM2 Mock Exam | Study Centre");

    let count = app.exam().unwrap().questions().len();
    assert_eq!(count, 6);
    for _ in 0..count {
        app.exam_choose();
    }
    assert_eq!(app.exam().unwrap().answered_count(), 6);

    app.submit_exam();
    assert_eq!(app.state, AppState::ExamResult);
    let result = app.exam_result().unwrap();
    assert_eq!(result.score, 6);
    assert!(result.passed);
    assert!(!result.timed_out);
    assert_eq!(result.by_category.len(), 2);
    assert!(result.by_category.iter().all(|c| c.total == 3 && c.correct == 3));
}

#[test]
fn exam_answers_can_change_before_submit() {
    let mut app = app();
    app.start_exam("am2").unwrap();
    app.exam_choose();
    app.exam_previous_question();
    assert_eq!(app.exam().unwrap().cursor(), 0);

    app.exam_next_option();
    app.exam_choose();
    assert_eq!(app.exam().unwrap().answers()[0], Some(1));
}

#[test]
fn mock_exam_submits_itself_when_time_runs_out() {
    let mut app = app();
    app.start_exam("am2").unwrap();
    app.exam_choose();

    let started = app.now();
    app.tick(started + Duration::from_secs(599));
    assert_eq!(app.state, AppState::Exam);

    app.tick(started + Duration::from_secs(601));
    assert_eq!(app.state, AppState::ExamResult);
    let result = app.exam_result().unwrap();
    assert!(result.timed_out);
    assert_eq!(result.score, 1);
    assert_eq!(result.elapsed, Duration::from_secs(600));
    assert!(!result.passed);
}

#[test]
fn retrying_an_exam_starts_a_new_attempt() {
    let mut app = app();
    app.start_exam("am2").unwrap();
    let first = app.exam().unwrap().attempt();
    app.submit_exam();

    app.retry_exam().unwrap();
    assert_eq!(app.state, AppState::Exam);
    assert_ne!(app.exam().unwrap().attempt(), first);
    assert!(app.exam_result().is_none());
}

#[test]
fn unknown_exam_is_an_error() {
    let mut app = app();
    assert!(matches!(app.start_exam("nope"), Err(Error::UnknownExam(id)) if id == "nope"));
}

#[test]
fn keys_drive_the_reading_view() {
    let mut app = app();
    assert!(!handle_input(&mut app, KeyCode::Enter).unwrap());
    assert_eq!(app.state, AppState::Reading);

    handle_input(&mut app, KeyCode::Tab).unwrap();
    handle_input(&mut app, KeyCode::Char('2')).unwrap();
    let check = app.focused_check().unwrap().clone();
    let state = &app.reading().unwrap().checks[&check.id];
    assert_eq!(state.is_correct(&check), Some(true));

    handle_input(&mut app, KeyCode::Char('n')).unwrap();
    assert_eq!(reading_route(&app), "/hnc/module-1/section-2");

    handle_input(&mut app, KeyCode::Esc).unwrap();
    assert_eq!(app.state, AppState::Catalog);

    assert!(handle_input(&mut app, KeyCode::Char('q')).unwrap());
}
