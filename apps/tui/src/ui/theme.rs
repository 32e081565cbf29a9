use f1_dashboard_core::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight: Color,
    pub error: Color,
    pub warning: Color,
}

// Plotly's default trace colours, used when a trace does not name one
const SERIES_COLORS: [Color; 6] = [
    Color::Rgb(31, 119, 180),
    Color::Rgb(255, 127, 14),
    Color::Rgb(44, 160, 44),
    Color::Rgb(214, 39, 40),
    Color::Rgb(148, 103, 189),
    Color::Rgb(140, 86, 75),
];

impl Palette {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(21, 21, 30),
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Rgb(225, 6, 0),
                border: Color::DarkGray,
                highlight: Color::Rgb(56, 56, 72),
                error: Color::LightRed,
                warning: Color::Yellow,
            },
            Theme::Light => Self {
                background: Color::Rgb(245, 245, 247),
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Rgb(200, 0, 0),
                border: Color::Gray,
                highlight: Color::Rgb(220, 220, 228),
                error: Color::Red,
                warning: Color::Rgb(180, 110, 0),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn key(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }
}

/// Colour for the `index`th series, honouring an explicit trace colour
pub fn series_color(explicit: Option<&str>, index: usize) -> Color {
    explicit
        .and_then(parse_color)
        .unwrap_or(SERIES_COLORS[index % SERIES_COLORS.len()])
}

/// Parses `#rrggbb`, `#rgb` and `rgb(r, g, b)` colour strings
pub fn parse_color(raw: &str) -> Option<Color> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix('#') {
        return match hex.len() {
            6 => {
                let value = u32::from_str_radix(hex, 16).ok()?;
                let [_, r, g, b] = value.to_be_bytes();
                Some(Color::Rgb(r, g, b))
            }
            3 => {
                let mut channels = hex
                    .chars()
                    .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d * 17).ok()));
                Some(Color::Rgb(
                    channels.next()??,
                    channels.next()??,
                    channels.next()??,
                ))
            }
            _ => None,
        };
    }

    let inner = raw
        .strip_prefix("rgba(")
        .or_else(|| raw.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut channels = inner.split(',').map(|part| part.trim().parse::<u8>().ok());
    Some(Color::Rgb(
        channels.next()??,
        channels.next()??,
        channels.next()??,
    ))
}
