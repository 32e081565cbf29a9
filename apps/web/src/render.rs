use f1_dashboard_core::model::{Profile, ProfileKind};
use f1_dashboard_core::plot::{self, TraceKind};
use f1_dashboard_core::view::{
    dashboard_view, profile_view, screen, Card, Screen, CHAMPIONSHIP_CHART_TITLE,
    CONSTRUCTOR_CHART_TITLE, RACE_COLUMNS,
};
use f1_dashboard_core::{ChartSpec, Route, Theme, ViewState};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::animation::spinner_frame;
use crate::app::WebApp;

const SERIES_COLORS: [Color; 6] = [
    Color::Rgb(31, 119, 180),
    Color::Rgb(255, 127, 14),
    Color::Rgb(44, 160, 44),
    Color::Rgb(214, 39, 40),
    Color::Rgb(148, 103, 189),
    Color::Rgb(140, 86, 75),
];

#[derive(Clone, Copy)]
struct Colors {
    background: Color,
    text: Color,
    muted: Color,
    accent: Color,
}

const fn colors(theme: Theme) -> Colors {
    match theme {
        Theme::Dark => Colors {
            background: Color::Rgb(21, 21, 30),
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Rgb(225, 6, 0),
        },
        Theme::Light => Colors {
            background: Color::Rgb(245, 245, 247),
            text: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Rgb(200, 0, 0),
        },
    }
}

pub fn render(app: &WebApp, f: &mut Frame<'_>) {
    let colors = colors(app.theme);
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().fg(colors.text).bg(colors.background)),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    render_navbar(app.route, f, layout[0], colors);

    let notices = match app.route {
        Route::Home => render_home(app, f, layout[1], colors),
        Route::Driver(_) => {
            render_profile(app, &app.driver.state(), f, layout[1], colors);
            Vec::new()
        }
        Route::Constructor(_) => {
            render_profile(app, &app.constructor.state(), f, layout[1], colors);
            Vec::new()
        }
        Route::Drivers | Route::Constructors | Route::Seasons => {
            render_directory(app, f, layout[1], colors);
            Vec::new()
        }
    };

    render_footer(app, &notices, f, layout[2], colors);

    if app.show_help {
        render_help(f, area, colors);
    }
}

fn render_navbar(route: Route, f: &mut Frame<'_>, area: Rect, colors: Colors) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(colors.accent));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(20)])
        .split(inner);

    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled(
                "F1 Dashboard ",
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Formula 1 Analytics & Statistics",
                Style::default().fg(colors.muted),
            ),
        ])),
        chunks[0],
    );

    let selected = Route::NAVBAR
        .iter()
        .position(|section| route.within(*section))
        .unwrap_or(0);
    let tabs = Tabs::new(
        Route::NAVBAR
            .iter()
            .map(|section| TextLine::from(format!(" {} ", section.label())))
            .collect::<Vec<_>>(),
    )
    .select(selected)
    .style(Style::default().fg(colors.muted))
    .highlight_style(
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD),
    )
    .divider(Span::raw("|"));
    f.render_widget(tabs, chunks[1]);
}

/// Draws loading and failure states; returns the content when Ready
fn ready<'a, T>(
    app: &WebApp,
    state: &'a ViewState<T>,
    f: &mut Frame<'_>,
    area: Rect,
    colors: Colors,
) -> Option<&'a T> {
    let message = match screen(state) {
        Screen::Content(data) => return Some(data),
        Screen::Blank | Screen::Spinner => Span::styled(
            format!("{} Loading...", spinner_frame(app.spinner)),
            Style::default().fg(colors.muted),
        ),
        Screen::Error(message) => Span::styled(
            format!("Error: {message}"),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
    };
    f.render_widget(
        Paragraph::new(TextLine::from(message)).alignment(Alignment::Center),
        Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        },
    );
    None
}

fn render_home(app: &WebApp, f: &mut Frame<'_>, area: Rect, colors: Colors) -> Vec<String> {
    let state = app.dashboard.state();
    let Some(dashboard) = ready(app, &state, f, area, colors) else {
        return Vec::new();
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
    render_cards(&view.kpis, f, rows[0], colors);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    for (slot, (card, fallback)) in charts.iter().zip([
        (&view.championship, CHAMPIONSHIP_CHART_TITLE),
        (&view.constructors, CONSTRUCTOR_CHART_TITLE),
    ]) {
        match card {
            Some(card) => render_chart(card.title, card.spec, f, *slot, colors),
            None => render_panel_message(fallback, "Chart unavailable", f, *slot, colors),
        }
    }

    let header = Row::new(RACE_COLUMNS.iter().copied().map(Cell::from)).style(
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD),
    );
    let body = view
        .races
        .iter()
        .map(|row| Row::new(row.iter().map(|value| Cell::from(value.clone()))));
    let table = Table::new(
        body,
        [
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(panel("Recent Race Results", colors))
    .column_spacing(1);
    f.render_widget(table, rows[2]);

    view.notices
}

fn render_profile<B: ProfileKind>(
    app: &WebApp,
    state: &ViewState<Profile<B>>,
    f: &mut Frame<'_>,
    area: Rect,
    colors: Colors,
) {
    let Some(profile) = ready(app, state, f, area, colors) else {
        return;
    };
    let view = profile_view(profile);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let details = view
        .details
        .iter()
        .flatten()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("   ");
    f.render_widget(
        Paragraph::new(details)
            .style(Style::default().fg(colors.text))
            .block(panel(&view.title, colors)),
        rows[0],
    );

    if let Some(stats) = &view.stats {
        render_cards(stats, f, rows[1], colors);
    }
    if let Some(spec) = view.chart {
        render_chart(B::CHART_HEADING, spec, f, rows[2], colors);
    }
}

fn render_directory(app: &WebApp, f: &mut Frame<'_>, area: Rect, colors: Colors) {
    let state = app.directory.state();
    let Some(entries) = ready(app, &state, f, area, colors) else {
        return;
    };

    let visible = usize::from(area.height.saturating_sub(3)).max(1);
    let offset = app.selected_index.saturating_sub(visible - 1);
    let rows = entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, entry)| {
            let style = if index == app.selected_index {
                Style::default()
                    .fg(colors.background)
                    .bg(colors.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };
            Row::new(vec![
                Cell::from(entry.id.to_string()),
                Cell::from(entry.name.clone()),
            ])
            .style(style)
        });

    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(10)])
        .header(Row::new(vec!["ID", "Name"]).style(Style::default().fg(colors.accent)))
        .block(panel(
            &format!("{} ({})", app.route.label(), entries.len()),
            colors,
        ))
        .column_spacing(2);
    f.render_widget(table, area);
}

fn render_cards(cards: &[Card], f: &mut Frame<'_>, area: Rect, colors: Colors) {
    if cards.is_empty() {
        return;
    }
    #[allow(clippy::cast_possible_truncation)]
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        f.render_widget(
            Paragraph::new(Span::styled(
                card.value.clone(),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(Span::styled(card.label, Style::default().fg(colors.muted)))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.muted)),
            ),
            *column,
        );
    }
}

fn panel(title: &str, colors: Colors) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.muted))
}

fn render_panel_message(title: &str, message: &str, f: &mut Frame<'_>, area: Rect, colors: Colors) {
    f.render_widget(
        Paragraph::new(Span::styled(
            message.to_string(),
            Style::default().fg(colors.muted),
        ))
        .alignment(Alignment::Center)
        .block(panel(title, colors)),
        area,
    );
}

// Lines and markers go through the Chart widget; bars and pies become share bars
fn render_chart(heading: &str, spec: &ChartSpec, f: &mut Frame<'_>, area: Rect, colors: Colors) {
    let series = plot::series(spec);
    let Some(first) = series.first() else {
        return render_panel_message(heading, "No chart data", f, area, colors);
    };

    if matches!(first.kind, TraceKind::Bar | TraceKind::Pie) {
        let slices = if first.slices.is_empty() {
            first
                .points
                .iter()
                .map(|(x, y)| (x.to_string(), *y))
                .collect()
        } else {
            first.slices.clone()
        };
        let block = panel(heading, colors);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let max = slices.iter().map(|(_, value)| *value).fold(0.0_f64, f64::max);
        let label_width = slices.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let width = usize::from(inner.width).saturating_sub(label_width + 10).max(1);
        let lines = slices
            .iter()
            .enumerate()
            .map(|(index, (label, value))| {
                let ratio = if max > 0.0 { value.max(0.0) / max } else { 0.0 };
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let fill = ((ratio * width as f64).round() as usize).min(width);
                let color = SERIES_COLORS[index % SERIES_COLORS.len()];
                TextLine::from(vec![
                    Span::styled(format!("{label:<label_width$} "), Style::default().fg(colors.text)),
                    Span::styled(
                        format!("{}{}", "█".repeat(fill), "░".repeat(width - fill)),
                        Style::default().fg(color),
                    ),
                    Span::raw(format!("  {value}")),
                ])
            })
            .collect::<Vec<_>>();
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let Some((x_bounds, y_bounds)) = plot::bounds(&series) else {
        return render_panel_message(heading, "No chart data", f, area, colors);
    };
    let sign = if plot::y_reversed(spec) { -1.0 } else { 1.0 };
    let y_draw = if sign < 0.0 {
        [-y_bounds[1], -y_bounds[0]]
    } else {
        y_bounds
    };
    let points = series
        .iter()
        .map(|series| {
            series
                .points
                .iter()
                .map(|&(x, y)| (x, y * sign))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let datasets = series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(index, (series, data))| {
            Dataset::default()
                .name(series.name.clone())
                .marker(Marker::Braille)
                .graph_type(if series.kind == TraceKind::Line {
                    GraphType::Line
                } else {
                    GraphType::Scatter
                })
                .style(Style::default().fg(SERIES_COLORS[index % SERIES_COLORS.len()]))
                .data(data)
        })
        .collect::<Vec<_>>();

    let chart = Chart::new(datasets)
        .block(panel(heading, colors))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(colors.muted))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, 1.0)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(colors.muted))
                .bounds(y_draw)
                .labels(axis_labels(y_draw, sign)),
        );
    f.render_widget(chart, area);
}

// `sign` undoes the negation used to draw a reversed axis
fn axis_labels(bounds: [f64; 2], sign: f64) -> Vec<Span<'static>> {
    bounds
        .iter()
        .map(|value| Span::raw(format!("{:.0}", value * sign)))
        .collect()
}

fn render_footer(app: &WebApp, notices: &[String], f: &mut Frame<'_>, area: Rect, colors: Colors) {
    let status = if !app.id_input.is_empty() {
        Span::styled(
            format!("Go to id: {}_", app.id_input.as_str()),
            Style::default().fg(Color::Yellow),
        )
    } else if !notices.is_empty() {
        Span::styled(
            format!("⚠ {}", notices.join(" · ")),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(
            "h/d/c/s pages  ←/→ tabs  r reload  t theme  ? help",
            Style::default().fg(colors.muted),
        )
    };
    f.render_widget(Paragraph::new(TextLine::from(status)), area);
}

fn render_help(f: &mut Frame<'_>, area: Rect, colors: Colors) {
    let width = area.width.min(56);
    let height = area.height.min(14);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    f.render_widget(Clear, popup);

    let lines = [
        ("h d c s", "Home, Drivers, Constructors, Races"),
        ("←/→", "Previous / next page"),
        ("↑/↓", "Move selection"),
        ("Enter", "Open selected profile"),
        ("0-9 Enter", "Jump to a driver or constructor id"),
        ("Esc", "Back"),
        ("r", "Reload"),
        ("t", "Toggle light / dark theme"),
        ("?", "Close help"),
    ]
    .into_iter()
    .map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(format!(" {key:<10}"), Style::default().fg(Color::Yellow)),
            Span::styled(action, Style::default().fg(colors.text)),
        ])
    })
    .collect::<Vec<_>>();

    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(colors.background))
            .block(panel("Keyboard Shortcuts", colors)),
        popup,
    );
}
