//! Colors and styles for the profile form
//!
//! The palette follows the text-mode installer the menu runs inside: a blue
//! field, white text, cyan for focus and red for anything that blocks a
//! submit. The only other colors on screen come from the classification
//! banner preview.
//!
//! ```rust
//! use kickstart_tui::theme::{Severity, Styles, Theme};
//!
//! let border = Theme::severity_color(Severity::Warning);
//! let heading = Styles::title();
//! ```

use crate::types::ClassificationLevel;
use ratatui::style::{Color, Modifier, Style};

/// Named colors.
pub struct Colors;

impl Colors {
    /// Panel field, close to the installer's blue.
    pub const BG_PRIMARY: Color = Color::Rgb(0, 0, 110);
    /// Notice field for errors.
    pub const BG_DANGER: Color = Color::Rgb(90, 0, 0);

    pub const FG_PRIMARY: Color = Color::White;
    pub const FG_SECONDARY: Color = Color::Gray;
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Titles and the focused panel.
    pub const PRIMARY: Color = Color::LightCyan;
    /// Field labels and toggles that are on.
    pub const SECONDARY: Color = Color::LightYellow;

    pub const SUCCESS: Color = Color::LightGreen;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::LightRed;

    pub const BORDER_ACTIVE: Color = Self::PRIMARY;
    pub const BORDER_INACTIVE: Color = Color::Gray;

    /// Focused row: inverted, like newt.
    pub const SELECTED_BG: Color = Color::Gray;
    pub const SELECTED_FG: Color = Color::Black;

    pub const NAV_HINT: Color = Color::Gray;
}

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

fn bold(color: Color) -> Style {
    fg(color).add_modifier(Modifier::BOLD)
}

/// Styles shared by the panels and dialogs.
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        fg(Colors::FG_SECONDARY)
    }

    pub fn title() -> Style {
        bold(Colors::PRIMARY)
    }

    /// Field labels in the options panel.
    pub fn category() -> Style {
        bold(Colors::SECONDARY)
    }

    pub fn border_active() -> Style {
        fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        fg(Colors::BORDER_INACTIVE)
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    pub fn panel_bg_danger() -> Style {
        Style::default().bg(Colors::BG_DANGER)
    }

    pub fn selected() -> Style {
        bold(Colors::SELECTED_FG).bg(Colors::SELECTED_BG)
    }

    pub fn success() -> Style {
        fg(Colors::SUCCESS)
    }

    pub fn error() -> Style {
        bold(Colors::ERROR)
    }

    /// The OK button while focused.
    pub fn button_active() -> Style {
        bold(Colors::BG_PRIMARY).bg(Colors::FG_PRIMARY)
    }

    pub fn button_inactive() -> Style {
        fg(Colors::FG_PRIMARY)
    }

    pub fn nav_hint() -> Style {
        fg(Colors::NAV_HINT)
    }
}

/// How serious a notice is; picks its border and text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// Lookups that depend on runtime values.
pub struct Theme;

impl Theme {
    pub fn severity_color(severity: Severity) -> Color {
        match severity {
            Severity::Info => Colors::PRIMARY,
            Severity::Warning => Colors::WARNING,
            Severity::Danger => Colors::ERROR,
        }
    }

    pub fn severity_style(severity: Severity) -> Style {
        match severity {
            Severity::Info => Styles::text(),
            Severity::Warning => fg(Colors::WARNING),
            Severity::Danger => bold(Colors::ERROR),
        }
    }

    /// Banner preview style matching the desktop classification banner.
    pub fn classification_style(level: ClassificationLevel) -> Style {
        let (text, field) = level.colors();
        bold(hex_color(text)).bg(hex_color(field))
    }
}

/// `#RRGGBB` to an RGB color; anything malformed renders white.
fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
    };
    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}
