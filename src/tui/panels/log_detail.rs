//! Full view of a single log entry

use crate::logging::LogEntry;
use crate::runtime::{
    ActionOwner, Commands, Component, Context, Dispatch, Key, KeyAction, KeyActions, MenuHints,
    RenderContext,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct LogDetail {
    entry: LogEntry,
    scroll: u16,
    actions: KeyActions<LogDetail>,
}

impl LogDetail {
    pub fn new(entry: LogEntry) -> Self {
        let down = |d: &mut LogDetail, _: &mut Commands, _| {
            d.scroll = d.scroll.saturating_add(1);
            None
        };
        let up = |d: &mut LogDetail, _: &mut Commands, _| {
            d.scroll = d.scroll.saturating_sub(1);
            None
        };
        let actions = [
            (Key::Char('j'), KeyAction::new("Down", down)),
            (Key::Down, KeyAction::new("Down", down).hidden()),
            (Key::Char('k'), KeyAction::new("Up", up)),
            (Key::Up, KeyAction::new("Up", up).hidden()),
        ]
        .into_iter()
        .collect();

        Self {
            entry,
            scroll: 0,
            actions,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }
}

impl ActionOwner for LogDetail {
    fn actions(&self) -> &KeyActions<Self> {
        &self.actions
    }
}

impl Component for LogDetail {
    fn name(&self) -> &str {
        "Log Detail"
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
        let label = |name: &str, value: String| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("{:<10}", name), ctx.styles.title),
                Span::styled(value, ctx.styles.text),
            ])
        };

        let entry = &self.entry;
        let mut lines = vec![
            label("Time", entry.timestamp.to_rfc3339()),
            Line::from(vec![
                Span::styled(format!("{:<10}", "Level"), ctx.styles.title),
                Span::styled(entry.level.as_str().to_string(), ctx.styles.level(entry.level)),
            ]),
            label("Target", entry.target.clone()),
        ];
        for field in &entry.fields {
            let (key, value) = field.split_once('=').unwrap_or((field.as_str(), ""));
            lines.push(label(key, value.to_string()));
        }
        lines.push(Line::raw(""));
        lines.extend(
            entry
                .message
                .lines()
                .map(|l| Line::styled(l.to_string(), ctx.styles.text)),
        );

        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(ctx.border_style())
                    .title(Span::styled(" Log Detail ", ctx.styles.title)),
            );
        f.render_widget(body, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use crate::runtime::testing::char_key;
    use chrono::Local;

    #[test]
    fn test_scroll_saturates_at_top() {
        let mut detail = LogDetail::new(LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Error,
            target: "lxz::tui".to_string(),
            message: "boom".to_string(),
            fields: vec!["surface=Logs-1".to_string()],
        });
        let mut cmds = Commands::default();

        detail.dispatch(&mut cmds, char_key('k'));
        assert_eq!(detail.scroll(), 0);
        detail.dispatch(&mut cmds, char_key('j'));
        detail.dispatch(&mut cmds, char_key('j'));
        assert_eq!(detail.scroll(), 2);
        assert_eq!(detail.identifier(), "");
    }
}
