//! Colors and styles for the board.
//!
//! All colors are 256-color palette indices, so the board looks the same
//! across terminal themes.
//!
//! # Cards
//!
//! | Card | Border |
//! |------|--------|
//! | Selected | yellow (226) |
//! | Blocked | red (196) |
//! | Tagged | color of the first tag |
//! | Other | gray (240) |

use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use taskwatch_config::ParsedThreshold;
use taskwatch_protocol::Priority;

/// Palette that tag names hash into.
pub const TAG_PALETTE: [u8; 8] = [33, 36, 35, 32, 91, 34, 93, 96];

/// Muted text: hints, indicators, body previews.
pub const DIM: Color = Color::Indexed(241);

const CARD_BORDER: Color = Color::Indexed(240);
const SELECTED_BORDER: Color = Color::Indexed(226);
const BLOCKED_BORDER: Color = Color::Indexed(196);
const ERROR: Color = Color::Indexed(196);
const TOOL: Color = Color::Indexed(66);
const ACCENT: Color = Color::Indexed(62);

/// 32-bit FNV-1a over the bytes of `s`.
#[must_use]
pub fn fnv1a(s: &str) -> u32 {
    const OFFSET: u32 = 2_166_136_261;
    const PRIME: u32 = 16_777_619;
    s.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(PRIME))
}

/// Stable color for a tag (or any label), picked from [`TAG_PALETTE`].
///
/// # Examples
///
/// ```
/// use taskwatch_tui::theme::tag_color;
///
/// assert_eq!(tag_color("backend"), tag_color("backend"));
/// ```
#[must_use]
pub fn tag_color(tag: &str) -> Color {
    let index = fnv1a(tag) as usize % TAG_PALETTE.len();
    Color::Indexed(TAG_PALETTE[index])
}

/// Color for a task of the given age.
///
/// `thresholds` must be sorted shortest first. The longest threshold not
/// exceeding `age` wins; younger tasks get [`DIM`].
#[must_use]
pub fn age_color(thresholds: &[ParsedThreshold], age: Duration) -> Color {
    thresholds
        .iter()
        .rev()
        .find(|t| age >= t.after)
        .map_or(DIM, |t| Color::Indexed(t.color))
}

/// Marker drawn on the top border of urgent cards.
#[must_use]
pub fn priority_marker(priority: Priority) -> Option<Span<'static>> {
    match priority {
        Priority::Critical => Some(Span::styled(
            "!!",
            Style::default()
                .fg(Color::Indexed(196))
                .add_modifier(Modifier::BOLD),
        )),
        Priority::High => Some(Span::styled("!", Style::default().fg(Color::Indexed(214)))),
        Priority::Medium | Priority::Low => None,
    }
}

/// How a card border is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Plain,
    Tagged(Color),
    Blocked,
    Selected,
}

impl CardTone {
    /// Picks the tone for a card. Selection wins over blocked, blocked over
    /// tag color.
    #[must_use]
    pub fn for_card(selected: bool, blocked: bool, tag: Option<&str>) -> Self {
        if selected {
            Self::Selected
        } else if blocked {
            Self::Blocked
        } else {
            tag.map_or(Self::Plain, |tag| Self::Tagged(tag_color(tag)))
        }
    }

    #[must_use]
    pub fn border_style(self) -> Style {
        let color = match self {
            Self::Plain => CARD_BORDER,
            Self::Tagged(color) => color,
            Self::Blocked => BLOCKED_BORDER,
            Self::Selected => SELECTED_BORDER,
        };
        Style::default().fg(color)
    }
}

/// Column header, highlighted for the active column.
#[must_use]
pub fn header_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Indexed(230))
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Indexed(252)).bg(Color::Indexed(236))
    }
}

#[must_use]
pub fn dim_style() -> Style {
    Style::default().fg(DIM)
}

/// Claim line on cards picked up by an agent.
#[must_use]
pub fn tool_style() -> Style {
    Style::default().fg(TOOL)
}

#[must_use]
pub fn error_style() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

#[must_use]
pub fn dialog_border_style() -> Style {
    Style::default().fg(ACCENT)
}
