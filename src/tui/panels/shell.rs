//! Shell panel: hands the terminal to an interactive process and takes it
//! back when the process exits

use crate::runtime::{
    ActionOwner, Commands, Component, Context, Dispatch, ExternalCommand, FlashLevel, Key,
    KeyAction, KeyActions, MenuHints, RenderContext,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::path::PathBuf;

pub struct ShellPanel {
    shell: ExternalCommand,
    config_path: Option<PathBuf>,
    actions: KeyActions<ShellPanel>,
}

impl ShellPanel {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let actions = [
            (
                Key::Enter,
                KeyAction::new("Open Shell", |p: &mut ShellPanel, cmds: &mut Commands, _| {
                    cmds.suspend(p.shell.clone());
                    None
                }),
            ),
            (
                Key::Char('e'),
                KeyAction::new("Edit Config", |p: &mut ShellPanel, cmds: &mut Commands, _| {
                    match &p.config_path {
                        Some(path) => cmds.suspend(ExternalCommand::editor(path)),
                        None => cmds.flash(FlashLevel::Warn, "No config location on this system"),
                    }
                    None
                }),
            ),
        ]
        .into_iter()
        .collect();

        Self {
            shell: ExternalCommand::shell(),
            config_path,
            actions,
        }
    }
}

impl ActionOwner for ShellPanel {
    fn actions(&self) -> &KeyActions<Self> {
        &self.actions
    }
}

impl Component for ShellPanel {
    fn name(&self) -> &str {
        "Shell"
    }

    fn identifier(&self) -> &str {
        "shell"
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

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let config = self
            .config_path
            .as_ref()
            .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());

        let lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled("  Shell   ", ctx.styles.title),
                Span::styled(self.shell.to_string(), ctx.styles.text),
            ]),
            Line::from(vec![
                Span::styled("  Config  ", ctx.styles.title),
                Span::styled(config, ctx.styles.text),
            ]),
            Line::raw(""),
            Line::styled(
                "  <Enter> opens the shell, <e> edits the config. The dashboard comes back when the process exits.",
                ctx.styles.muted,
            ),
        ];

        let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ctx.border_style())
                .title(Span::styled(" Shell ", ctx.styles.title)),
        );
        f.render_widget(body, area);
    }
}
