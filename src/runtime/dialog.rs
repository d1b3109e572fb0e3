//! Dialog contract
//!
//! A dialog is a modal surface above the content stack. While one is shown
//! it owns all input: only its own bindings fire and everything else is
//! swallowed. Dialogs never enter the stack, so showing one neither stops
//! nor removes the component beneath it.

use super::command::Commands;
use super::component::RenderContext;
use super::hints::MenuHints;
use super::keys::Dispatch;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub trait Dialog: Send {
    fn name(&self) -> &str;

    /// Offer a key to the dialog's registry. Dismissal is requested through
    /// `cmds.dismiss_dialog()`.
    fn dispatch(&mut self, cmds: &mut Commands, event: KeyEvent) -> Dispatch;

    fn hints(&self) -> MenuHints {
        MenuHints::default()
    }

    /// Draw centered over `area` (the whole content region)
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
