//! Splash screen and header logo

use crate::config::VERSION;
use crate::runtime::RenderContext;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LOGO_BIG: [&str; 6] = [
    r" _     __   __ ______",
    r"| |    \ \ / /|___  /",
    r"| |     \ V /    / / ",
    r"| |     /   \   / /  ",
    r"| |____/ /^\ \./ /___",
    r"\_____/\/   \/\_____/",
];

const LOGO_SMALL: [&str; 4] = [
    "▗▖   ▗▖  ▗▖▗▄▄▄▄▖",
    "▐▌    ▝▚▞▘    ▗▞▘",
    "▐▌     ▐▌   ▗▞▘  ",
    "▐▙▄▄▖▗▞▘▝▚▖▐▙▄▄▄▖",
];

/// Columns the header logo needs
pub const LOGO_WIDTH: u16 = 18;

/// Full-screen splash: big logo and version, vertically centered
pub fn render(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let height = LOGO_BIG.len() as u16 + 2;
    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    let mut lines: Vec<Line> = LOGO_BIG
        .iter()
        .map(|row| Line::from(Span::styled(*row, ctx.styles.logo)))
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Version ", ctx.styles.text),
        Span::styled(VERSION, ctx.styles.title),
    ]));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}

/// Small logo for the right edge of the header
pub fn render_logo(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let lines: Vec<Line> = LOGO_SMALL
        .iter()
        .take(area.height as usize)
        .map(|row| Line::from(Span::styled(*row, ctx.styles.logo)))
        .collect();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Right), area);
}
