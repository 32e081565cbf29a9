use crate::app::App;
use crate::ui::theme::Palette;
use crate::ui::widgets::status::{render_error, render_spinner};
use crate::ui::widgets::tables::render_directory_table;
use f1_dashboard_core::view::{screen, Screen};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_directory(app: &App, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let state = app.directory.state();
    let entries = match screen(&state) {
        Screen::Blank | Screen::Spinner => return render_spinner(app, f, area, palette),
        Screen::Error(message) => return render_error(f, area, message, palette),
        Screen::Content(entries) => entries,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let route = app.route();
    render_directory_table(
        f,
        chunks[0],
        route.label(),
        entries,
        app.selected_index,
        palette,
    );

    // Seasons have no profile page to open
    if route.entry(0).is_some() {
        let hint = TextLine::from(vec![
            Span::styled("↑/↓", palette.key()),
            Span::styled(": select   ", Style::default().fg(palette.muted)),
            Span::styled("Enter", palette.key()),
            Span::styled(": open profile   ", Style::default().fg(palette.muted)),
            Span::styled("0-9", palette.key()),
            Span::styled(": jump to id", Style::default().fg(palette.muted)),
        ]);
        f.render_widget(Paragraph::new(hint), chunks[1]);
    }
}
