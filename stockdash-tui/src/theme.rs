//! Light and dark theme tokens for the dashboard.
//!
//! # Color Palette
//! - **Accent**: titles, focus, the price line
//! - **Positive**: gains (green)
//! - **Negative**: losses (red)
//! - **Neutral**: unknown or flat change
//! - **Warning**: non-fatal notices
//! - **Muted**: labels, hints, borders
//! - **Text**: primary values

use ratatui::style::{Color, Modifier, Style};

use stockdash_core::ChangeClass;

/// Which palette is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Surface behind every panel
    pub background: Color,
    /// Titles, focus, chart line
    pub accent: Color,
    /// Gains
    pub positive: Color,
    /// Losses
    pub negative: Color,
    /// No sign information
    pub neutral: Color,
    /// Non-fatal notices
    pub warning: Color,
    /// Labels and hints
    pub muted: Color,
    /// Primary values
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 200, 255),
            positive: Color::Rgb(0, 220, 120),
            negative: Color::Rgb(255, 80, 80),
            neutral: Color::Rgb(150, 150, 160),
            warning: Color::Rgb(255, 170, 0),
            muted: Color::Rgb(110, 130, 160),
            text: Color::Rgb(235, 235, 235),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 248),
            accent: Color::Rgb(0, 90, 180),
            positive: Color::Rgb(0, 130, 60),
            negative: Color::Rgb(200, 30, 30),
            neutral: Color::Rgb(110, 110, 110),
            warning: Color::Rgb(190, 110, 0),
            muted: Color::Rgb(100, 110, 125),
            text: Color::Rgb(25, 25, 30),
        }
    }

    /// Color for a classified change value.
    pub fn change_color(&self, class: ChangeClass) -> Color {
        match class {
            ChangeClass::Positive => self.positive,
            ChangeClass::Negative => self.negative,
            ChangeClass::Neutral => self.neutral,
        }
    }

    pub fn change_style(&self, class: ChangeClass) -> Style {
        Style::default().fg(self.change_color(class))
    }

    // ── Style helpers ────────────────────────────────────────────────

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn accent_bold(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn negative(&self) -> Style {
        Style::default().fg(self.negative)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dark() {
        assert_eq!(Theme::default(), Theme::dark());
        assert_eq!(ThemeMode::default().theme(), Theme::dark());
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.theme(), Theme::light());
    }

    #[test]
    fn change_classes_map_onto_palette() {
        for theme in [Theme::dark(), Theme::light()] {
            assert_eq!(theme.change_color(ChangeClass::Positive), theme.positive);
            assert_eq!(theme.change_color(ChangeClass::Negative), theme.negative);
            assert_eq!(theme.change_color(ChangeClass::Neutral), theme.neutral);
            assert_eq!(
                theme.change_style(ChangeClass::Negative).fg,
                Some(theme.negative)
            );
        }
    }

    #[test]
    fn palettes_differ() {
        assert_ne!(Theme::dark().background, Theme::light().background);
        assert_ne!(Theme::dark().text, Theme::light().text);
    }
}
