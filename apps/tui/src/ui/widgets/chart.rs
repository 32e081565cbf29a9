use crate::ui::theme::{series_color, Palette};
use f1_dashboard_core::plot::{self, Series, TraceKind};
use f1_dashboard_core::ChartSpec;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, LegendPosition,
    Paragraph,
};
use ratatui::Frame;

/// Draws a chart document inside a titled panel.
///
/// The first trace decides the chart type; pies and bars only draw traces of
/// their own kind.
pub fn render_chart(
    f: &mut Frame<'_>,
    area: Rect,
    heading: &str,
    spec: &ChartSpec,
    palette: &Palette,
) {
    let title = match plot::title(spec) {
        Some(subtitle) if subtitle != heading => format!("{heading} - {subtitle}"),
        _ => heading.to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border());

    let series = plot::series(spec);
    match series.first().map(|series| series.kind) {
        None => render_placeholder(f, area, block, "No chart data", palette),
        Some(TraceKind::Pie) => render_pie(f, area, block, &series[0], palette),
        Some(TraceKind::Bar) => render_bars(f, area, block, &series, palette),
        Some(TraceKind::Line | TraceKind::Scatter) => {
            render_xy(f, area, block, &series, plot::y_reversed(spec), palette);
        }
    }
}

pub fn render_placeholder(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    message: &str,
    palette: &Palette,
) {
    let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(palette.muted)))
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_xy(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    series: &[Series],
    reversed: bool,
    palette: &Palette,
) {
    let drawable: Vec<&Series> = series
        .iter()
        .filter(|series| matches!(series.kind, TraceKind::Line | TraceKind::Scatter))
        .collect();
    let Some((x_bounds, y_bounds)) = plot::bounds(series) else {
        render_placeholder(f, area, block, "No chart data", palette);
        return;
    };

    // A reversed axis is drawn by negating y so the smallest value sits on top
    let sign = if reversed { -1.0 } else { 1.0 };
    let points: Vec<Vec<(f64, f64)>> = drawable
        .iter()
        .map(|series| series.points.iter().map(|&(x, y)| (x, y * sign)).collect())
        .collect();
    let y_draw = if reversed {
        [-y_bounds[1], -y_bounds[0]]
    } else {
        y_bounds
    };

    let datasets = drawable
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(index, (series, data))| {
            let graph_type = if series.kind == TraceKind::Line {
                GraphType::Line
            } else {
                GraphType::Scatter
            };
            Dataset::default()
                .name(series.name.clone())
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(series_color(series.color.as_deref(), index)))
                .data(data)
        })
        .collect::<Vec<_>>();

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette.muted))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, false)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette.muted))
                .bounds(y_draw)
                .labels(axis_labels(y_draw, reversed)),
        );

    f.render_widget(chart, area);
}

fn render_bars(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    series: &[Series],
    palette: &Palette,
) {
    let groups: Vec<(usize, Vec<(String, f64)>)> = series
        .iter()
        .enumerate()
        .filter(|(_, series)| series.kind == TraceKind::Bar)
        .map(|(index, series)| (index, bar_values(series)))
        .collect();

    let max = groups
        .iter()
        .flat_map(|(_, values)| values.iter().map(|(_, value)| *value))
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        render_placeholder(f, area, block, "No chart data", palette);
        return;
    }

    let mut chart = BarChart::default()
        .block(block)
        .bar_gap(1)
        .group_gap(2)
        .bar_width(bar_width(area.width, groups.iter().map(|(_, v)| v.len()).sum()))
        .max(to_bar_value(max));

    for (index, values) in &groups {
        let color = series_color(series[*index].color.as_deref(), *index);
        let bars: Vec<Bar<'_>> = values
            .iter()
            .map(|(label, value)| {
                Bar::default()
                    .value(to_bar_value(*value))
                    .label(TextLine::from(label.clone()))
                    .style(Style::default().fg(color))
                    .value_style(
                        Style::default()
                            .fg(palette.background)
                            .bg(color)
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();
        chart = chart.data(BarGroup::default().bars(&bars));
    }

    f.render_widget(chart, area);
}

fn render_pie(f: &mut Frame<'_>, area: Rect, block: Block<'_>, series: &Series, palette: &Palette) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let total: f64 = series.slices.iter().map(|(_, value)| value.max(0.0)).sum();
    if total <= 0.0 {
        f.render_widget(
            Paragraph::new(Span::styled("No chart data", Style::default().fg(palette.muted)))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let label_width = series
        .slices
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let bar_room = usize::from(inner.width).saturating_sub(label_width + 12).max(1);

    let lines: Vec<TextLine<'_>> = series
        .slices
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let share = value.max(0.0) / total;
            let color = series_color(None, index);
            TextLine::from(vec![
                Span::styled(
                    format!("{label:<label_width$} "),
                    Style::default().fg(palette.text),
                ),
                Span::styled(share_bar(share, bar_room), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>5.1}%", share * 100.0),
                    Style::default().fg(palette.muted),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

// Bars prefer categorical labels; otherwise x positions become labels
fn bar_values(series: &Series) -> Vec<(String, f64)> {
    if series.slices.is_empty() {
        series
            .points
            .iter()
            .map(|&(x, y)| (format_tick(x), y))
            .collect()
    } else {
        series.slices.clone()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_bar_value(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

fn bar_width(area_width: u16, bars: usize) -> u16 {
    let bars = u16::try_from(bars.max(1)).unwrap_or(u16::MAX);
    (area_width.saturating_sub(2) / bars).saturating_sub(1).clamp(1, 9)
}

/// Proportion bar filled with `█` and padded with `░`
pub fn share_bar(share: f64, width: usize) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let fill = ((share.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(fill), "░".repeat(width - fill))
}

fn axis_labels(bounds: [f64; 2], reversed: bool) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(|value| Span::raw(format_tick(if reversed { -value } else { value })))
        .collect()
}

fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
