// Theme system for the TUI
//
// Runtime-switchable color themes covering every UI element.

use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    /// Parse a config/CLI theme name; unknown names fall back to Dark
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "nord" => ThemeKind::Nord,
            _ => ThemeKind::Dark,
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub border: Color,
    pub title: Color,
    pub status_bar: Color,

    // Section tabs
    pub tab_active: Color,
    pub tab_inactive: Color,

    // Content
    pub intro: Color,
    pub card_title: Color,
    pub card_unrevealed: Color,
    pub selected_fg: Color,
    pub kpi_value: Color,
    pub kpi_caption: Color,
    pub timeline: Color,
    pub fragment: Color,

    // Bottom panels
    pub event_kind: Color,
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            border: Color::Gray,
            title: Color::Cyan,
            status_bar: Color::Green,

            tab_active: Color::Yellow,
            tab_inactive: Color::Gray,

            intro: Color::Gray,
            card_title: Color::Cyan,
            card_unrevealed: Color::DarkGray,
            selected_fg: Color::Yellow,
            kpi_value: Color::LightGreen,
            kpi_caption: Color::Gray,
            timeline: Color::Magenta,
            fragment: Color::LightBlue,

            event_kind: Color::Cyan,
            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            border: Color::DarkGray,
            title: Color::Blue,
            status_bar: Color::DarkGray,

            tab_active: Color::Blue,
            tab_inactive: Color::DarkGray,

            intro: Color::DarkGray,
            card_title: Color::Blue,
            card_unrevealed: Color::Gray,
            selected_fg: Color::Magenta,
            kpi_value: Color::Green,
            kpi_caption: Color::DarkGray,
            timeline: Color::Magenta,
            fragment: Color::Blue,

            event_kind: Color::Blue,
            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::Gray,
        }
    }

    pub fn nord() -> Self {
        Self {
            fg: Color::Rgb(236, 239, 244),
            border: Color::Rgb(76, 86, 106),
            title: Color::Rgb(136, 192, 208),
            status_bar: Color::Rgb(163, 190, 140),

            tab_active: Color::Rgb(235, 203, 139),
            tab_inactive: Color::Rgb(76, 86, 106),

            intro: Color::Rgb(129, 161, 193),
            card_title: Color::Rgb(136, 192, 208),
            card_unrevealed: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(235, 203, 139),
            kpi_value: Color::Rgb(163, 190, 140),
            kpi_caption: Color::Rgb(129, 161, 193),
            timeline: Color::Rgb(180, 142, 173),
            fragment: Color::Rgb(129, 161, 193),

            event_kind: Color::Rgb(136, 192, 208),
            log_error: Color::Rgb(191, 97, 106),
            log_warn: Color::Rgb(235, 203, 139),
            log_info: Color::Rgb(129, 161, 193),
            log_debug: Color::Rgb(76, 86, 106),
        }
    }

    // Style helpers

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_bar)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_visits_all_and_wraps() {
        let mut kind = ThemeKind::Dark;
        let mut seen = Vec::new();
        for _ in 0..ThemeKind::all().len() {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
        assert_eq!(seen.len(), ThemeKind::all().len());
    }

    #[test]
    fn unknown_theme_name_falls_back_to_dark() {
        assert_eq!(ThemeKind::from_name("dracula"), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_name("NORD"), ThemeKind::Nord);
    }
}
