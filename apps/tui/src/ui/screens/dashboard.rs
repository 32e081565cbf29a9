use crate::app::App;
use crate::ui::theme::Palette;
use crate::ui::widgets::cards::render_cards;
use crate::ui::widgets::chart::{render_chart, render_placeholder};
use crate::ui::widgets::status::{render_error, render_spinner};
use crate::ui::widgets::tables::render_race_table;
use f1_dashboard_core::view::{
    dashboard_view, screen, ChartCard, Screen, CHAMPIONSHIP_CHART_TITLE, CONSTRUCTOR_CHART_TITLE,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let state = app.dashboard.state();
    let dashboard = match screen(&state) {
        Screen::Blank | Screen::Spinner => return render_spinner(app, f, area, palette),
        Screen::Error(message) => return render_error(f, area, message, palette),
        Screen::Content(dashboard) => dashboard,
    };
    let view = dashboard_view(dashboard);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(55),
            Constraint::Min(5),
        ])
        .split(area);

    render_cards(f, rows[0], &view.kpis, palette);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_chart_card(
        f,
        charts[0],
        view.championship.as_ref(),
        CHAMPIONSHIP_CHART_TITLE,
        palette,
    );
    render_chart_card(
        f,
        charts[1],
        view.constructors.as_ref(),
        CONSTRUCTOR_CHART_TITLE,
        palette,
    );

    render_race_table(f, rows[2], &view.races, palette);
}

// A missing chart keeps its slot so the layout does not jump
fn render_chart_card(
    f: &mut Frame<'_>,
    area: Rect,
    card: Option<&ChartCard<'_>>,
    fallback_title: &str,
    palette: &Palette,
) {
    match card {
        Some(card) => render_chart(f, area, card.title, card.spec, palette),
        None => {
            let block = Block::default()
                .title(Span::styled(fallback_title.to_string(), palette.title()))
                .borders(Borders::ALL)
                .border_style(palette.border());
            render_placeholder(f, area, block, "Chart unavailable", palette);
        }
    }
}
