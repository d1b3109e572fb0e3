//! Color and modifier palette for the dashboard chrome and panels

use crate::logging::LogLevel;
use crate::runtime::FlashLevel;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Styles {
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub text: Style,
    pub muted: Style,
    pub selection: Style,
    pub logo: Style,
    /// Feature menu and sub menu mnemonic, e.g. `<F1>`
    pub menu_key: Style,
    /// Digit mnemonics in the sub menu
    pub menu_digit: Style,
    pub menu_desc: Style,
    /// Feature matching the top component's identifier
    pub menu_active: Style,
    pub crumb: Style,
    pub crumb_active: Style,
    pub dialog_border: Style,
    pub button: Style,
    pub button_focused: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::White),
            muted: Style::default().fg(Color::DarkGray),
            selection: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            logo: Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
            menu_key: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            menu_digit: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            menu_desc: Style::default().fg(Color::Gray),
            menu_active: Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            crumb: Style::default().fg(Color::Black).bg(Color::Gray),
            crumb_active: Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            dialog_border: Style::default().fg(Color::LightYellow),
            button: Style::default().fg(Color::Gray),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Styles {
    pub fn level(&self, level: LogLevel) -> Style {
        match level {
            LogLevel::Error => Style::default().fg(Color::Red),
            LogLevel::Warn => Style::default().fg(Color::Yellow),
            LogLevel::Info => Style::default().fg(Color::White),
            LogLevel::Debug => Style::default().fg(Color::DarkGray),
            LogLevel::Trace => Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        }
    }

    pub fn flash(&self, level: FlashLevel) -> Style {
        match level {
            FlashLevel::Info => Style::default().fg(Color::LightGreen),
            FlashLevel::Warn => Style::default().fg(Color::LightYellow),
            FlashLevel::Error => Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        }
    }
}
