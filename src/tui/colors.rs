//! Colour palettes for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Theme};

/// Colours used to draw one theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

/// Used for the light theme accent
pub const INDIGO: Color = Color::Rgb(99, 102, 241);
/// Used for the dark theme accent
pub const LAVENDER: Color = Color::Rgb(165, 180, 252);
/// Used for high priority
pub const DARK_RED: Color = Color::Rgb(185, 28, 28);
/// Used for medium priority
pub const AMBER: Color = Color::Rgb(217, 119, 6);
/// Used for low priority
pub const DARK_GREEN: Color = Color::Rgb(21, 128, 61);

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg: Color::Rgb(248, 250, 252),
            fg: Color::Rgb(15, 23, 42),
            muted: Color::Rgb(148, 163, 184),
            accent: INDIGO,
            bar_bg: INDIGO,
            bar_fg: Color::White,
            highlight_bg: Color::Rgb(224, 231, 255),
            highlight_fg: Color::Rgb(15, 23, 42),
        },
        Theme::Dark => Palette {
            bg: Color::Rgb(15, 23, 42),
            fg: Color::Rgb(226, 232, 240),
            muted: Color::Rgb(100, 116, 139),
            accent: LAVENDER,
            bar_bg: Color::Rgb(49, 46, 129),
            bar_fg: Color::Rgb(226, 232, 240),
            highlight_bg: Color::Rgb(51, 65, 85),
            highlight_fg: Color::White,
        },
    }
}

pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => DARK_RED,
        Priority::Medium => AMBER,
        Priority::Low => DARK_GREEN,
    }
}

/// Badge colour for a category tag; unknown tags share one colour.
pub fn category_color(category: &str) -> Color {
    match category {
        "work" => Color::Blue,
        "personal" => Color::Magenta,
        "shopping" => Color::Cyan,
        "health" => Color::Green,
        _ => Color::Gray,
    }
}
