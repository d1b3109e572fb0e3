// Dialogs - modal overlays above the content stack
//
// Each dialog owns a small key registry. Anything it doesn't bind is
// swallowed by the App while it is shown.

use crate::runtime::{
    ActionOwner, Commands, Dialog, Dispatch, Key, KeyAction, KeyActions, MenuHint, MenuHints,
    RenderContext,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Calculate centered rect for a dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn frame_block<'a>(title: &'a str, ctx: &RenderContext) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(ctx.styles.dialog_border)
        .title(Span::styled(format!(" {} ", title), ctx.styles.title))
        .title_alignment(Alignment::Center)
}

// ─────────────────────────────────────────────────────────────────────────────
// Confirm
// ─────────────────────────────────────────────────────────────────────────────

type OnConfirm = Box<dyn FnOnce(&mut Commands) + Send>;

/// OK / Cancel question. `on_ok` runs at most once, then the dialog closes.
pub struct ConfirmDialog {
    title: String,
    message: String,
    ok_focused: bool,
    on_ok: Option<OnConfirm>,
    actions: KeyActions<ConfirmDialog>,
}

impl ConfirmDialog {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        on_ok: impl FnOnce(&mut Commands) + Send + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ok_focused: true,
            on_ok: Some(Box::new(on_ok)),
            actions: Self::bindings(),
        }
    }

    /// Start with Cancel focused (destructive questions)
    pub fn cancel_by_default(mut self) -> Self {
        self.ok_focused = false;
        self
    }

    fn bindings() -> KeyActions<ConfirmDialog> {
        let toggle = |d: &mut ConfirmDialog, _: &mut Commands, _| {
            d.ok_focused = !d.ok_focused;
            None
        };
        [
            (Key::Enter, KeyAction::new("Select", |d: &mut ConfirmDialog, cmds: &mut Commands, _| {
                d.select(cmds);
                None
            })),
            (Key::Esc, KeyAction::new("Cancel", |_: &mut ConfirmDialog, cmds: &mut Commands, _| {
                cmds.dismiss_dialog();
                None
            })),
            (Key::Tab, KeyAction::new("Next", toggle)),
            (Key::Left, KeyAction::new("Next", toggle).hidden()),
            (Key::Right, KeyAction::new("Next", toggle).hidden()),
        ]
        .into_iter()
        .collect()
    }

    fn select(&mut self, cmds: &mut Commands) {
        cmds.dismiss_dialog();
        if self.ok_focused {
            if let Some(on_ok) = self.on_ok.take() {
                on_ok(cmds);
            }
        }
    }

    #[allow(dead_code)]
    pub fn ok_focused(&self) -> bool {
        self.ok_focused
    }
}

impl ActionOwner for ConfirmDialog {
    fn actions(&self) -> &KeyActions<Self> {
        &self.actions
    }
}

impl Dialog for ConfirmDialog {
    fn name(&self) -> &str {
        "Confirm"
    }

    fn dispatch(&mut self, cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        self.run_action(cmds, event)
    }

    fn hints(&self) -> MenuHints {
        self.actions.hints()
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let rect = centered_rect(50, 8, area);
        let (ok, cancel) = if self.ok_focused {
            (ctx.styles.button_focused, ctx.styles.button)
        } else {
            (ctx.styles.button, ctx.styles.button_focused)
        };

        let text = Text::from(vec![
            Line::raw(""),
            Line::styled(self.message.clone(), ctx.styles.text),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  OK  ", ok),
                Span::raw("    "),
                Span::styled(" Cancel ", cancel),
            ]),
        ]);

        let body = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(frame_block(&self.title, ctx));

        f.render_widget(Clear, rect);
        f.render_widget(body, rect);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Help
// ─────────────────────────────────────────────────────────────────────────────

/// Keyboard reference: the current panel's bindings and the global ones
pub struct HelpDialog {
    sections: Vec<(String, MenuHints)>,
    actions: KeyActions<HelpDialog>,
}

impl HelpDialog {
    pub fn new(sections: Vec<(String, MenuHints)>) -> Self {
        let close = |_: &mut HelpDialog, cmds: &mut Commands, _| {
            cmds.dismiss_dialog();
            None
        };
        let actions = [
            (Key::Esc, KeyAction::new("Close", close)),
            (Key::Char('?'), KeyAction::new("Close", close).hidden()),
            (Key::Char('q'), KeyAction::new("Close", close).hidden()),
        ]
        .into_iter()
        .collect();

        Self {
            sections: sections
                .into_iter()
                .filter(|(_, hints)| !hints.is_empty())
                .collect(),
            actions,
        }
    }

    #[allow(dead_code)]
    pub fn sections(&self) -> &[(String, MenuHints)] {
        &self.sections
    }
}

impl ActionOwner for HelpDialog {
    fn actions(&self) -> &KeyActions<Self> {
        &self.actions
    }
}

impl Dialog for HelpDialog {
    fn name(&self) -> &str {
        "Help"
    }

    fn dispatch(&mut self, cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        self.run_action(cmds, event)
    }

    fn hints(&self) -> MenuHints {
        self.actions.hints()
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let kb = |hint: &MenuHint| -> Line<'static> {
            Line::from(vec![
                Span::raw("    "),
                Span::styled(format!("{:<12}", format!("<{}>", hint.mnemonic())), ctx.styles.menu_key),
                Span::styled(hint.description.clone(), ctx.styles.text),
            ])
        };

        let mut lines = Vec::new();
        for (title, hints) in &self.sections {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(format!("  {}", title), ctx.styles.title)));
            lines.extend(hints.iter().map(kb));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Press Esc or ? to close",
            ctx.styles.muted,
        )));

        let height = (lines.len() as u16).saturating_add(2);
        let rect = centered_rect(48, height, area);
        f.render_widget(Clear, rect);
        f.render_widget(Paragraph::new(lines).block(frame_block("Help", ctx)), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::{char_key, key};
    use crossterm::event::KeyCode;

    fn kinds(cmds: Commands) -> Vec<String> {
        cmds.into_iter().map(|c| format!("{:?}", c)).collect()
    }

    #[test]
    fn test_confirm_ok_runs_callback_once() {
        let mut dialog = ConfirmDialog::new("Quit", "Quit lxz?", |cmds| cmds.quit());

        let mut cmds = Commands::default();
        assert_eq!(dialog.dispatch(&mut cmds, key(KeyCode::Enter)), Dispatch::Consumed);
        assert_eq!(kinds(cmds), vec!["DismissDialog", "Quit"]);

        // The callback is gone after the first confirm
        let mut cmds = Commands::default();
        dialog.dispatch(&mut cmds, key(KeyCode::Enter));
        assert_eq!(kinds(cmds), vec!["DismissDialog"]);
    }

    #[test]
    fn test_confirm_cancel_paths() {
        let mut dialog =
            ConfirmDialog::new("Clear", "Clear all logs?", |cmds| cmds.quit()).cancel_by_default();
        assert!(!dialog.ok_focused());

        let mut cmds = Commands::default();
        dialog.dispatch(&mut cmds, key(KeyCode::Enter));
        assert_eq!(kinds(cmds), vec!["DismissDialog"]);

        let mut cmds = Commands::default();
        dialog.dispatch(&mut cmds, key(KeyCode::Tab));
        assert!(dialog.ok_focused());
        dialog.dispatch(&mut cmds, key(KeyCode::Esc));
        assert_eq!(kinds(cmds), vec!["DismissDialog"]);
    }

    #[test]
    fn test_confirm_leaves_other_keys_unbound() {
        let mut dialog = ConfirmDialog::new("Quit", "Quit lxz?", |cmds| cmds.quit());
        let mut cmds = Commands::default();
        assert!(matches!(
            dialog.dispatch(&mut cmds, char_key('x')),
            Dispatch::Unbound(_)
        ));
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_help_drops_empty_sections_and_closes() {
        let hints: MenuHints = [MenuHint::new(Key::Char('f'), "Follow")].into_iter().collect();
        let mut dialog = HelpDialog::new(vec![
            ("Logs".to_string(), hints),
            ("General".to_string(), MenuHints::new()),
        ]);
        assert_eq!(dialog.sections().len(), 1);

        let mut cmds = Commands::default();
        assert_eq!(dialog.dispatch(&mut cmds, char_key('?')), Dispatch::Consumed);
        assert_eq!(kinds(cmds), vec!["DismissDialog"]);
    }
}
