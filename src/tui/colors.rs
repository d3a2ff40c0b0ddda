//! Color palettes for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Theme;

/// Link/hover blue, shared by both themes
pub const ACCENT_BLUE: Color = Color::Rgb(58, 124, 253);
/// Check mark colour on dark backgrounds
pub const CHECK_CYAN: Color = Color::Rgb(85, 221, 255);
/// Check mark colour on light backgrounds
pub const CHECK_VIOLET: Color = Color::Rgb(192, 88, 243);

/// Every colour a screen needs for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub done: Color,
    pub border: Color,
    pub accent: Color,
    pub check: Color,
}

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(250, 250, 250),
    surface: Color::Rgb(255, 255, 255),
    text: Color::Rgb(73, 76, 107),
    muted: Color::Rgb(91, 94, 126),
    done: Color::Rgb(164, 167, 178),
    border: Color::Rgb(227, 228, 241),
    accent: ACCENT_BLUE,
    check: CHECK_VIOLET,
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(24, 23, 35),
    surface: Color::Rgb(37, 39, 61),
    text: Color::Rgb(200, 203, 231),
    muted: Color::Rgb(118, 121, 146),
    done: Color::Rgb(77, 80, 103),
    border: Color::Rgb(57, 58, 75),
    accent: ACCENT_BLUE,
    check: CHECK_CYAN,
};

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}
