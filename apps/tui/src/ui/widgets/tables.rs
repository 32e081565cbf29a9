use crate::ui::theme::Palette;
use f1_dashboard_core::model::DirectoryEntry;
use f1_dashboard_core::view::RACE_COLUMNS;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

fn header<'a>(columns: impl IntoIterator<Item = &'a str>, palette: &Palette) -> Row<'a> {
    Row::new(columns.into_iter().map(Cell::from)).style(
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn render_race_table(f: &mut Frame<'_>, area: Rect, rows: &[[String; 4]], palette: &Palette) {
    let body = rows.iter().enumerate().map(|(index, row)| {
        let style = if index % 2 == 0 {
            Style::default().fg(palette.text)
        } else {
            Style::default().fg(palette.text).bg(palette.highlight)
        };
        Row::new(row.iter().map(|value| Cell::from(value.as_str()))).style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
    ];

    let table = Table::new(body, widths)
        .header(header(RACE_COLUMNS, palette))
        .block(
            Block::default()
                .title(Span::styled("Recent Race Results", palette.title()))
                .borders(Borders::ALL)
                .border_style(palette.border()),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

/// Directory listing with the selected row highlighted and kept in view
pub fn render_directory_table(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    entries: &[DirectoryEntry],
    selected_index: usize,
    palette: &Palette,
) {
    // Borders and header take three rows
    let max_visible_rows = usize::from(area.height.saturating_sub(3)).max(1);
    let offset = scroll_offset(entries.len(), max_visible_rows, selected_index);

    let rows = entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, entry)| {
            let style = if index == selected_index {
                Style::default()
                    .fg(palette.text)
                    .bg(palette.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            Row::new(vec![
                Cell::from(entry.id.to_string()),
                Cell::from(entry.name.as_str()),
            ])
            .style(style)
        });

    let position = if entries.is_empty() {
        0
    } else {
        selected_index + 1
    };

    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(10)])
        .header(header(["ID", "Name"], palette))
        .block(
            Block::default()
                .title(Span::styled(
                    format!("{title} ({position} of {})", entries.len()),
                    palette.title(),
                ))
                .borders(Borders::ALL)
                .border_style(palette.border()),
        )
        .column_spacing(2);

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::scroll_offset;

    #[test]
    fn scroll_offset_stays_zero_when_rows_fit() {
        assert_eq!(scroll_offset(5, 10, 0), 0);
        assert_eq!(scroll_offset(5, 10, 4), 0);
    }

    #[test]
    fn scroll_offset_keeps_selection_on_last_visible_row() {
        assert_eq!(scroll_offset(20, 10, 0), 0);
        assert_eq!(scroll_offset(20, 10, 9), 0);
        assert_eq!(scroll_offset(20, 10, 10), 1);
        assert_eq!(scroll_offset(20, 10, 19), 10);
    }
}
