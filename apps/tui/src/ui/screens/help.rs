use crate::cli::CliArgs;
use crate::ui::theme::Palette;
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const KEYS: [(&str, &str); 11] = [
    ("h d c s", "Home, Drivers, Constructors, Races"),
    ("←/→ Tab", "Previous / next page"),
    ("↑/↓ j/k", "Move selection"),
    ("PgUp/PgDn", "Move selection by ten rows"),
    ("Enter", "Open selected profile"),
    ("0-9 Enter", "Jump to a driver or constructor id"),
    ("Esc", "Back"),
    ("r", "Reload current page"),
    ("t", "Toggle light / dark theme"),
    ("? F1", "Toggle this help"),
    ("q", "Quit"),
];

pub fn render_help_popup(f: &mut Frame<'_>, palette: &Palette) {
    let area: Rect = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![TextLine::from("")];
    lines.extend(KEYS.iter().map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(format!("  {key:<12}"), palette.key()),
            Span::styled(*action, Style::default().fg(palette.text)),
        ])
    }));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled("  Command line", palette.title())));
    for line in CliArgs::help_text().lines() {
        lines.push(TextLine::from(Span::styled(
            format!("  {line}"),
            Style::default().fg(palette.muted),
        )));
    }

    let help = Paragraph::new(lines).style(palette.base()).block(
        Block::default()
            .title(Span::styled(" Keyboard Shortcuts ", palette.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    );

    f.render_widget(help, area);
}
