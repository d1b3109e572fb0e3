// UI rendering - screen layout
//
// ┌ menu ─────┬ sub menu hints ─────────────────────┬ logo ┐   header (Ctrl-E)
// ├ crumbs ───┴─────────────────────────────────────┴──────┤
// │ top component            (dialog drawn centered above) │
// ├ flash ─────────────────────────────────────────────────┤

use super::components::{crumbs::Crumbs, flash_bar, menu::Menu, splash, sub_menu};
use super::styles::Styles;
use crate::runtime::{App, DispatchState, Flash, RenderContext};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

pub const HEADER_HEIGHT: u16 = 4;
const MENU_WIDTH: u16 = 20;

/// Chrome that lives outside the stack
pub struct Screen {
    pub styles: Styles,
    pub menu: Menu,
    pub crumbs: Crumbs,
    pub flash: Flash,
    pub no_icons: bool,
}

pub fn draw(f: &mut Frame, app: &App, screen: &Screen) {
    let area = f.area();
    let dialog_up = app.state() == DispatchState::DialogActive;
    let ctx = RenderContext::new(&screen.styles, screen.no_icons, !dialog_up);

    if app.chrome().splash {
        splash::render(f, area, &ctx);
        return;
    }

    let header_height = if app.chrome().show_header {
        HEADER_HEIGHT
    } else {
        0
    };
    let [header, crumbs, content, flash] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    if header_height > 0 {
        draw_header(f, header, app, screen, &ctx);
    }
    screen.crumbs.render(f, crumbs, &ctx);

    if let Some(top) = app.pages().top() {
        top.render(f, content, &ctx);
    }
    if let Some(dialog) = app.pages().dialog() {
        let dialog_ctx = RenderContext::new(&screen.styles, screen.no_icons, true);
        dialog.render(f, content, &dialog_ctx);
    }

    flash_bar::render(f, flash, &screen.flash, &ctx);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, screen: &Screen, ctx: &RenderContext) {
    let [menu, hints, logo] = Layout::horizontal([
        Constraint::Length(MENU_WIDTH),
        Constraint::Min(0),
        Constraint::Length(splash::LOGO_WIDTH),
    ])
    .areas(area);

    screen.menu.render(f, menu, ctx);
    sub_menu::render(f, hints, &app.hints(), ctx);
    splash::render_logo(f, logo, ctx);
}
