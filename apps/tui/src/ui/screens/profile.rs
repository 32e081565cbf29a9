use crate::app::App;
use crate::ui::theme::Palette;
use crate::ui::widgets::cards::render_cards;
use crate::ui::widgets::chart::render_chart;
use crate::ui::widgets::status::{render_error, render_spinner};
use f1_dashboard_core::model::{Profile, ProfileKind};
use f1_dashboard_core::view::{profile_view, screen, Screen};
use f1_dashboard_core::ViewState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Header with title and bio details, then stat cards, then the chart.
///
/// Sections without data are left out rather than drawn empty.
pub fn render_profile<B: ProfileKind>(
    app: &App,
    f: &mut Frame<'_>,
    area: Rect,
    state: &ViewState<Profile<B>>,
    palette: &Palette,
) {
    let profile = match screen(state) {
        Screen::Blank | Screen::Spinner => return render_spinner(app, f, area, palette),
        Screen::Error(message) => return render_error(f, area, message, palette),
        Screen::Content(profile) => profile,
    };
    let view = profile_view(profile);

    let mut constraints = vec![Constraint::Length(4)];
    if view.stats.is_some() {
        constraints.push(Constraint::Length(3));
    }
    if view.chart.is_some() {
        constraints.push(Constraint::Min(8));
    }
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut slots = rows.iter().copied();

    if let Some(header) = slots.next() {
        let details = view
            .details
            .iter()
            .flatten()
            .flat_map(|(label, value)| {
                [
                    Span::styled(format!("{label}: "), Style::default().fg(palette.muted)),
                    Span::styled(format!("{value}   "), Style::default().fg(palette.text)),
                ]
            })
            .collect::<Vec<_>>();

        let paragraph = Paragraph::new(vec![TextLine::from(details)]).block(
            Block::default()
                .title(Span::styled(view.title.clone(), palette.title()))
                .borders(Borders::ALL)
                .border_style(palette.border()),
        );
        f.render_widget(paragraph, header);
    }

    if let Some(stats) = &view.stats {
        if let Some(slot) = slots.next() {
            render_cards(f, slot, stats, palette);
        }
    }

    if let Some(spec) = view.chart {
        if let Some(slot) = slots.next() {
            render_chart(f, slot, B::CHART_HEADING, spec, palette);
        }
    }
}
