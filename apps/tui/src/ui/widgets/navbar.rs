use crate::app::App;
use crate::ui::theme::Palette;
use f1_dashboard_core::Route;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

pub fn render_navbar(app: &App, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(20)])
        .split(inner);

    let brand = Paragraph::new(TextLine::from(vec![
        Span::styled("F1 Dashboard ", palette.title()),
        Span::styled(
            "Formula 1 Analytics & Statistics",
            Style::default().fg(palette.muted),
        ),
    ]));
    f.render_widget(brand, chunks[0]);

    let current = app.route();
    let selected = Route::NAVBAR
        .iter()
        .position(|section| current.within(*section));
    let titles = Route::NAVBAR
        .iter()
        .map(|route| TextLine::from(format!(" {} ", route.label())));

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, chunks[1]);
}
