use std::time::Duration;

use ratatui::{
    prelude::*,
    widgets::{Block, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::quiz::ExamSession;

use super::option_label;
use super::result::{grade_color, render_score_summary, truncate};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(exam) = app.exam() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_status(frame, chunks[0], exam, exam.remaining(app.now()));
    super::render_controls(
        frame,
        chunks[4],
        "j/k navigate  ·  enter answer  ·  h/l question  ·  s submit  ·  q quit",
    );

    let Some(bank) = exam.current_question() else {
        let empty = Paragraph::new("No questions were drawn for this attempt. Press s to see the result.")
            .wrap(Wrap { trim: true })
            .fg(Color::Yellow);
        frame.render_widget(empty, chunks[2]);
        return;
    };
    let question = &bank.question;

    let category = Paragraph::new(bank.category.clone()).fg(Color::DarkGray);
    frame.render_widget(category, chunks[1]);

    let text = Paragraph::new(question.text.clone())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(text, chunks[2]);

    let answer = exam.answers()[exam.current_index()];
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);
    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == exam.cursor();
        let is_answer = answer == Some(index);
        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else if is_answer {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = match (is_cursor, is_answer) {
            (_, true) => "●",
            (true, false) => ">",
            _ => " ",
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.clone(), style),
        ]));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), chunks[3]);
}

fn render_status(frame: &mut Frame, area: Rect, exam: &ExamSession, remaining: Option<Duration>) {
    let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let total = exam.questions().len();
    let progress = format!(
        "{}  {}/{}  ({} answered)",
        exam.config().title,
        (exam.current_index() + 1).min(total),
        total,
        exam.answered_count()
    );
    frame.render_widget(Paragraph::new(progress).fg(Color::DarkGray), columns[0]);

    if let Some(remaining) = remaining {
        let color = if remaining < Duration::from_secs(60) {
            Color::Red
        } else {
            Color::DarkGray
        };
        let widget = Paragraph::new(format_clock(remaining))
            .alignment(Alignment::Right)
            .fg(color);
        frame.render_widget(widget, columns[1]);
    }
}

/// `mm:ss`, rounding part seconds up so the clock reads 00:00 only at
/// expiry.
pub fn format_clock(remaining: Duration) -> String {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(exam), Some(result)) = (app.exam(), app.exam_result()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let verdict = if result.passed { "PASS" } else { "FAIL" };
    let color = if result.passed {
        grade_color(result.percentage)
    } else {
        Color::Red
    };
    render_score_summary(
        frame,
        chunks[1],
        &format!(
            "{verdict}  {} / {}  ({:.0}%, pass mark {}%)",
            result.score,
            result.total,
            result.percentage,
            exam.config().pass_threshold
        ),
        color,
    );

    let mut lines: Vec<Line> = Vec::new();
    if result.timed_out {
        lines.push(Line::from(Span::styled(
            " Time ran out; unanswered questions scored as incorrect.",
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(" Time taken {}", format_clock(result.elapsed)),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    for category in &result.by_category {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:>3}/{:<3} ", category.correct, category.total),
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled(category.category.clone(), Style::default().fg(Color::Gray)),
        ]));
    }
    lines.push(Line::from(""));

    for (index, (bank, answer)) in exam.questions().iter().zip(exam.answers()).enumerate() {
        let correct = answer.is_some_and(|a| bank.question.is_correct(a));
        let (symbol, color) = if correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(format!("{:2}. ", index + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(truncate(&bank.question.text), Style::default().fg(Color::Gray)),
        ]));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll(), 0));
    frame.render_widget(widget, chunks[2]);

    super::render_controls(frame, chunks[3], "j/k scroll  ·  r new attempt  ·  esc catalog  ·  q quit");
}
