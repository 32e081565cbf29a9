use crate::ui::theme::Palette;
use f1_dashboard_core::view::Card;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Lays the cards out side by side in equal columns
pub fn render_cards(f: &mut Frame<'_>, area: Rect, cards: &[Card], palette: &Palette) {
    if cards.is_empty() {
        return;
    }

    #[allow(clippy::cast_possible_truncation)]
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let block = Block::default()
            .title(Span::styled(card.label, Style::default().fg(palette.muted)))
            .borders(Borders::ALL)
            .border_style(palette.border());

        let value = Paragraph::new(TextLine::from(Span::styled(
            card.value.as_str(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);

        f.render_widget(value, *column);
    }
}
