//! Scratch pad: free text entry
//!
//! Plain keys reach the pad through the widget passthrough. `?` is bound
//! locally only to hand it straight back, so it types instead of opening
//! help.

use crate::runtime::{
    ActionOwner, Commands, Component, Context, Dispatch, Handled, Interactive, Key, KeyAction,
    KeyActions, MenuHints, RenderContext,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct ScratchPanel {
    text: String,
    actions: KeyActions<ScratchPanel>,
}

impl ScratchPanel {
    pub fn new() -> Self {
        let actions = [
            (
                Key::Ctrl('l'),
                KeyAction::new("Clear", |p: &mut ScratchPanel, _: &mut Commands, _| {
                    p.text.clear();
                    None
                }),
            ),
            (
                Key::Char('?'),
                KeyAction::new("Type ?", |_: &mut ScratchPanel, _: &mut Commands, event| {
                    Some(event)
                })
                .hidden(),
            ),
        ]
        .into_iter()
        .collect();

        Self {
            text: String::new(),
            actions,
        }
    }

    #[allow(dead_code)]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for ScratchPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for ScratchPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push(c)
            }
            KeyCode::Enter => self.text.push('\n'),
            KeyCode::Backspace => {
                self.text.pop();
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

impl ActionOwner for ScratchPanel {
    fn actions(&self) -> &KeyActions<Self> {
        &self.actions
    }
}

impl Component for ScratchPanel {
    fn name(&self) -> &str {
        "Scratch"
    }

    fn identifier(&self) -> &str {
        "scratch"
    }

    fn init(&mut self, _ctx: &Context) -> anyhow::Result<()> {
        Ok(())
    }

    fn hints(&self) -> MenuHints {
        self.actions.hints()
    }

    fn dispatch(&mut self, cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        self.run_action(cmds, event)
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive> {
        Some(self)
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let title = format!(" Scratch ({} chars) ", self.text.chars().count());
        let body = Paragraph::new(format!("{}▏", self.text))
            .style(ctx.styles.text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(ctx.border_style())
                    .title(Span::styled(title, ctx.styles.title)),
            );
        f.render_widget(body, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::queue;
    use crate::runtime::testing::{char_key, key, RecordingFlash};
    use crate::runtime::{App, Routed};
    use std::sync::Arc;
    use std::time::Duration;

    fn app_with_scratch() -> App {
        let (tx, _queue) = queue::channel(4, Duration::from_millis(10));
        let mut app = App::new(tx, Arc::new(RecordingFlash::default()));
        app.actions_mut().add(
            Key::Char('?'),
            KeyAction::new("Help", |_: &mut App, _, _| None),
        );
        app.inject(Box::new(ScratchPanel::new()), false).unwrap();
        app
    }

    fn text(app: &App) -> String {
        app.pages()
            .top()
            .and_then(|c| c.as_any().downcast_ref::<ScratchPanel>())
            .map(|p| p.text().to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_typing_reaches_the_pad() {
        let mut app = app_with_scratch();
        assert_eq!(app.handle_key(char_key('h')), Routed::Widget);
        app.handle_key(char_key('i'));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(text(&app), "h\n");
    }

    #[test]
    fn test_question_mark_types_instead_of_help() {
        let mut app = app_with_scratch();
        assert_eq!(app.handle_key(char_key('?')), Routed::Local);
        assert_eq!(text(&app), "?");
    }

    #[test]
    fn test_ctrl_l_clears() {
        let mut app = app_with_scratch();
        app.handle_key(char_key('x'));
        let mut ctrl_l = char_key('l');
        ctrl_l.modifiers = KeyModifiers::CONTROL;

        assert_eq!(app.handle_key(ctrl_l), Routed::Local);
        assert_eq!(text(&app), "");
    }
}
