use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuizQuestion;
use crate::quiz::{QuizPhase, QuizSession};

use super::option_label;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = app.quiz() else {
        return;
    };
    let Some(question) = quiz.current_question() else {
        return;
    };
    let revealed = quiz.phase() == QuizPhase::Revealed;

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], quiz);
    render_question_text(frame, chunks[1], &question.text);
    render_options(frame, chunks[2], question, quiz);
    if revealed {
        render_explanation(frame, chunks[3], question, quiz.current_answer());
    }

    let controls = if revealed {
        "enter continue  ·  esc back to section  ·  q quit"
    } else {
        "j/k navigate  ·  enter select  ·  esc back to section  ·  q quit"
    };
    super::render_controls(frame, chunks[4], controls);
}

fn render_progress(frame: &mut Frame, area: Rect, quiz: &QuizSession) {
    let progress = format!(
        "Test Your Knowledge  {}/{}",
        quiz.current_question_number(),
        quiz.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, question: &QuizQuestion, quiz: &QuizSession) {
    let answer = quiz.current_answer();
    let selected = quiz.selected_option();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let style = match answer {
            Some(_) if question.is_correct(index) => Style::default().fg(Color::Green).bold(),
            Some(given) if given == index => Style::default().fg(Color::Red).bold(),
            Some(_) => Style::default().fg(Color::DarkGray),
            None if index == selected => Style::default().fg(Color::Cyan).bold(),
            None => Style::default().fg(Color::Gray),
        };
        let marker = match answer {
            Some(_) if question.is_correct(index) => "✓",
            Some(given) if given == index => "✗",
            None if index == selected => ">",
            _ => " ",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.clone(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_explanation(frame: &mut Frame, area: Rect, question: &QuizQuestion, answer: Option<usize>) {
    let correct = answer.is_some_and(|a| question.is_correct(a));
    let (verdict, color) = if correct {
        ("Correct", Color::Green)
    } else {
        ("Incorrect", Color::Red)
    };

    let content = vec![
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(Span::styled(
            question.explanation.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];
    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
