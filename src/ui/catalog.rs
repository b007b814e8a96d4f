use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::{App, CatalogEntry};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_entries(frame, chunks[1], app);
    super::render_controls(frame, chunks[2], "j/k navigate  ·  enter open  ·  q quit");
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let sections = app.router().len();
    let exams = app.catalog().exams.len();
    let content = vec![
        Line::from(Span::styled(
            app.site_name().to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            format!("{sections} sections · {exams} mock exams"),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_entries(frame: &mut Frame, area: Rect, app: &App) {
    let catalog = app.catalog();
    let cursor = app.catalog_cursor();

    let lines: Vec<Line> = app
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let is_selected = index == cursor;
            let (indent, text, base) = match *entry {
                CatalogEntry::Course(c) => (
                    "",
                    catalog.courses[c].title.clone(),
                    Style::default().fg(Color::White).bold(),
                ),
                CatalogEntry::Module(c, m) => (
                    "  ",
                    catalog.courses[c].modules[m].title.clone(),
                    Style::default().fg(Color::Gray),
                ),
                CatalogEntry::Section(at) => (
                    "    ",
                    catalog.courses[at.course].modules[at.module].sections[at.section]
                        .title
                        .clone(),
                    Style::default().fg(Color::Gray),
                ),
                CatalogEntry::Exam(e) => (
                    "",
                    format!("Mock exam: {}", catalog.exams[e].config.title),
                    Style::default().fg(Color::Yellow),
                ),
            };
            let style = if is_selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                base
            };
            let marker = if is_selected { ">" } else { " " };

            Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(indent, style),
                Span::styled(text, style),
            ])
        })
        .collect();

    // Keep the cursor on screen.
    let height = area.height.saturating_sub(1) as usize;
    let scroll = cursor.saturating_sub(height.saturating_sub(1));

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}
