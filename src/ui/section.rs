use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, Reading};
use crate::models::{Block as ContentBlock, InlineCheckQuestion, Section};
use crate::quiz::{InlineCheckState, OptionMark};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(reading), Some(section)) = (app.reading(), app.current_section()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], &reading.route, section);

    let focus = app.focused_check().map(|check| check.id.as_str());
    let widget = Paragraph::new(section_lines(section, reading, focus))
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((reading.scroll, 0));
    frame.render_widget(widget, chunks[1]);

    super::render_controls(
        frame,
        chunks[2],
        "j/k scroll  ·  tab check  ·  1-9 answer  ·  x reset  ·  n/p section  ·  t quiz  ·  esc back",
    );
}

fn render_title(frame: &mut Frame, area: Rect, route: &str, section: &Section) {
    let content = vec![Line::from(vec![
        Span::styled(section.title.clone(), Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("  {route}"), Style::default().fg(Color::DarkGray)),
    ])];
    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

/// The section body as styled lines, inline checks drawn with their
/// current answer state.
pub fn section_lines(section: &Section, reading: &Reading, focus: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !section.description.is_empty() {
        lines.push(Line::from(Span::styled(
            section.description.clone(),
            Style::default().fg(Color::Gray).italic(),
        )));
        lines.push(Line::from(""));
    }

    for block in &section.blocks {
        push_block(&mut lines, section, block, reading, focus);
        lines.push(Line::from(""));
    }

    if !section.faqs.is_empty() {
        lines.push(heading("Common Questions"));
        for faq in &section.faqs {
            lines.push(Line::from(Span::styled(
                faq.question.clone(),
                Style::default().fg(Color::White).bold(),
            )));
            lines.push(Line::from(faq.answer.clone()));
            lines.push(Line::from(""));
        }
    }

    if !section.quiz.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Press t to take the {}-question quiz", section.quiz.len()),
            Style::default().fg(Color::Green),
        )));
    }

    lines
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_uppercase(),
        Style::default().fg(Color::Cyan).bold(),
    ))
}

fn push_block(
    lines: &mut Vec<Line<'static>>,
    section: &Section,
    block: &ContentBlock,
    reading: &Reading,
    focus: Option<&str>,
) {
    match block {
        ContentBlock::Heading { text } => lines.push(heading(text)),
        ContentBlock::Paragraph { text } => lines.push(Line::from(text.clone())),
        ContentBlock::List { items } => {
            for item in items {
                lines.push(Line::from(format!("  • {item}")));
            }
        }
        ContentBlock::Table { headers, rows } => {
            lines.push(Line::from(Span::styled(
                headers.join("  │  "),
                Style::default().fg(Color::White).bold(),
            )));
            for row in rows {
                lines.push(Line::from(row.join("  │  ")));
            }
        }
        ContentBlock::WorkedExample {
            title,
            steps,
            answer,
        } => {
            lines.push(Line::from(Span::styled(
                format!("Worked example: {title}"),
                Style::default().fg(Color::Yellow).bold(),
            )));
            for (number, step) in steps.iter().enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("  {}. {step}", number + 1),
                    Style::default().fg(Color::Yellow),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!("  Answer: {answer}"),
                Style::default().fg(Color::Yellow).bold(),
            )));
        }
        ContentBlock::Callout { title, body } => {
            lines.push(Line::from(Span::styled(
                format!("▌ {title}"),
                Style::default().fg(Color::Magenta).bold(),
            )));
            lines.push(Line::from(Span::styled(
                format!("▌ {body}"),
                Style::default().fg(Color::Magenta),
            )));
        }
        ContentBlock::Check { id } => {
            if let Some(check) = section.inline_check(id) {
                let state = reading.checks.get(id).cloned().unwrap_or_default();
                push_check(lines, check, &state, focus == Some(id.as_str()));
            }
        }
    }
}

fn push_check(
    lines: &mut Vec<Line<'static>>,
    check: &InlineCheckQuestion,
    state: &InlineCheckState,
    focused: bool,
) {
    let frame_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    lines.push(Line::from(vec![
        Span::styled("? Quick check  ", frame_style),
        Span::styled(check.text.clone(), Style::default().fg(Color::White).bold()),
    ]));

    for (index, option) in check.options.iter().enumerate() {
        let (marker, style) = match state.mark(check, index) {
            OptionMark::Correct => ("✓", Style::default().fg(Color::Green).bold()),
            OptionMark::Wrong => ("✗", Style::default().fg(Color::Red).bold()),
            OptionMark::Plain => (" ", Style::default().fg(Color::Gray)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {marker} {}. ", index + 1), style),
            Span::styled(option.clone(), style),
        ]));
    }

    if let Some(explanation) = state.explanation(check) {
        let verdict = if state.is_correct(check) == Some(true) {
            Span::styled("Correct. ", Style::default().fg(Color::Green).bold())
        } else {
            Span::styled("Not quite. ", Style::default().fg(Color::Red).bold())
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            verdict,
            Span::styled(explanation.to_string(), Style::default().fg(Color::Gray)),
        ]));
    }
}
