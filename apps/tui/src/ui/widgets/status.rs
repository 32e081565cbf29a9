use crate::app::App;
use crate::ui::theme::Palette;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

pub fn render_spinner(app: &App, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let row = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area)[1];
    let cell = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(row)[1];

    let throbber = Throbber::default()
        .label("Loading...")
        .style(Style::default().fg(palette.muted))
        .throbber_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX);

    // Frames advance on tick; drawing never mutates the app
    let mut state = app.throbber.clone();
    f.render_stateful_widget(throbber, cell, &mut state);
}

pub fn render_error(f: &mut Frame<'_>, area: Rect, message: &str, palette: &Palette) {
    let lines = vec![
        TextLine::from(Span::styled(
            format!("Error: {message}"),
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled("r", palette.key()),
            Span::styled(": retry   ", Style::default().fg(palette.muted)),
            Span::styled("Esc", palette.key()),
            Span::styled(": back", Style::default().fg(palette.muted)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.error)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

/// Footer: section notices or status on the left, shortcuts on the right
pub fn render_footer(
    app: &App,
    f: &mut Frame<'_>,
    area: Rect,
    notices: &[String],
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let mut status = Vec::new();
    if !app.id_input.is_empty() {
        status.push(Span::styled(
            format!("Go to id: {}_", app.id_input.as_str()),
            palette.key(),
        ));
    } else if let Some(notice) = notices.first() {
        let more = notices.len() - 1;
        let text = if more > 0 {
            format!("⚠ {notice} (+{more} more)")
        } else {
            format!("⚠ {notice}")
        };
        status.push(Span::styled(text, Style::default().fg(palette.warning)));
    } else if !app.status_message.is_empty() {
        status.push(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(palette.text),
        ));
    } else if let Some(at) = app.refreshed_at {
        status.push(Span::styled(
            format!("Loaded {} at {}", app.route(), at.format("%H:%M:%S")),
            Style::default().fg(palette.muted),
        ));
    }

    f.render_widget(
        Paragraph::new(TextLine::from(status))
            .block(Block::default().borders(Borders::TOP).border_style(palette.border())),
        chunks[0],
    );

    let shortcuts = TextLine::from(vec![
        Span::styled("h/d/c/s", palette.key()),
        Span::styled(": pages  ", Style::default().fg(palette.muted)),
        Span::styled("r", palette.key()),
        Span::styled(": reload  ", Style::default().fg(palette.muted)),
        Span::styled("t", palette.key()),
        Span::styled(": theme  ", Style::default().fg(palette.muted)),
        Span::styled("?", palette.key()),
        Span::styled(": help  ", Style::default().fg(palette.muted)),
        Span::styled("q", palette.key()),
        Span::styled(": quit", Style::default().fg(palette.muted)),
    ]);

    f.render_widget(
        Paragraph::new(shortcuts)
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::TOP).border_style(palette.border())),
        chunks[1],
    );
}
