// Logs panel - live view of the captured tracing output
//
// A worker polls the shared LogBuffer and ships fresh snapshots to the UI
// task through the update queue. The worker runs only while the panel is
// the visible top.

use super::log_detail::LogDetail;
use crate::logging::{LogBuffer, LogEntry};
use crate::runtime::{
    ActionOwner, App, Commands, Component, Context, Dispatch, FlashLevel, FlashSink, Handle, Key,
    KeyAction, KeyActions, MenuHints, QueueError, RenderContext, UpdateSender, Worker,
};
use crate::tui::dialogs::ConfirmDialog;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct LogsPanel {
    buffer: LogBuffer,
    entries: Vec<LogEntry>,
    /// Buffer generation the snapshot was taken at
    generation: u64,
    selected: usize,
    /// Keep the newest entry selected
    follow: bool,
    refresh: Duration,
    watch: Option<(Handle<LogsPanel>, UpdateSender<App>)>,
    flash: Option<Arc<dyn FlashSink>>,
    worker: Option<Worker>,
    actions: KeyActions<LogsPanel>,
}

impl LogsPanel {
    pub fn new(buffer: LogBuffer, refresh: Duration) -> Self {
        Self {
            buffer,
            entries: Vec::new(),
            generation: 0,
            selected: 0,
            follow: true,
            refresh,
            watch: None,
            flash: None,
            worker: None,
            actions: Self::bindings(),
        }
    }

    fn bindings() -> KeyActions<LogsPanel> {
        let down = |p: &mut LogsPanel, _: &mut Commands, _| {
            p.select_next();
            None
        };
        let up = |p: &mut LogsPanel, _: &mut Commands, _| {
            p.select_prev();
            None
        };
        let follow = |p: &mut LogsPanel, _: &mut Commands, _| {
            p.toggle_follow();
            None
        };
        [
            (Key::Char('j'), KeyAction::new("Down", down)),
            (Key::Down, KeyAction::new("Down", down).hidden()),
            (Key::Char('k'), KeyAction::new("Up", up)),
            (Key::Up, KeyAction::new("Up", up).hidden()),
            (
                Key::Char('g'),
                KeyAction::new("Top", |p: &mut LogsPanel, _: &mut Commands, _| {
                    p.follow = false;
                    p.selected = 0;
                    None
                }),
            ),
            (
                Key::Char('G'),
                KeyAction::new("Bottom", |p: &mut LogsPanel, _: &mut Commands, _| {
                    p.follow = true;
                    p.selected = p.entries.len().saturating_sub(1);
                    None
                }),
            ),
            (
                Key::Char('f'),
                KeyAction::new("Toggle Follow", follow),
            ),
            // Also works from the detail view pushed on top
            (Key::Ctrl('f'), KeyAction::new("Follow Logs", follow).shared()),
            (
                Key::Enter,
                KeyAction::new("View", |p: &mut LogsPanel, cmds: &mut Commands, _| {
                    match p.selected_entry() {
                        Some(entry) => cmds.push(LogDetail::new(entry.clone())),
                        None => cmds.flash(FlashLevel::Warn, "No log entry selected"),
                    }
                    None
                }),
            ),
            (
                Key::Char('c'),
                KeyAction::new("Clear", |p: &mut LogsPanel, cmds: &mut Commands, _| {
                    let buffer = p.buffer.clone();
                    cmds.show_dialog(
                        ConfirmDialog::new("Clear", "Clear all captured logs?", move |cmds| {
                            buffer.clear();
                            cmds.flash(FlashLevel::Info, "Logs cleared");
                        })
                        .cancel_by_default(),
                    );
                    None
                })
                .dangerous(),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[allow(dead_code)]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn selected_entry(&self) -> Option<&LogEntry> {
        self.entries.get(self.selected)
    }

    #[allow(dead_code)]
    pub fn is_following(&self) -> bool {
        self.follow
    }

    #[allow(dead_code)]
    pub fn is_watching(&self) -> bool {
        self.worker.is_some()
    }

    /// Snapshot shipped by the worker. Updates still in the queue when the
    /// panel stopped are dropped; `start` reloads anyway.
    fn receive_snapshot(&mut self, generation: u64, entries: Vec<LogEntry>) {
        if self.worker.is_none() {
            tracing::trace!(generation, "Snapshot for stopped logs panel dropped");
            return;
        }
        self.set_entries(generation, entries);
    }

    fn set_entries(&mut self, generation: u64, entries: Vec<LogEntry>) {
        self.generation = generation;
        self.entries = entries;
        let last = self.entries.len().saturating_sub(1);
        if self.follow {
            self.selected = last;
        } else {
            self.selected = self.selected.min(last);
        }
    }

    fn reload(&mut self) {
        let generation = self.buffer.generation();
        let entries = self.buffer.get_all();
        self.set_entries(generation, entries);
    }

    fn select_next(&mut self) {
        let last = self.entries.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(last);
        // Reaching the bottom resumes following
        self.follow = self.selected == last;
    }

    fn select_prev(&mut self) {
        self.follow = false;
        self.selected = self.selected.saturating_sub(1);
    }

    fn toggle_follow(&mut self) {
        self.follow = !self.follow;
        if self.follow {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }
}

/// Poll the buffer and forward snapshots until stopped
async fn watch_logs(
    cancel: CancellationToken,
    buffer: LogBuffer,
    handle: Handle<LogsPanel>,
    updates: UpdateSender<App>,
    every: Duration,
    mut seen: u64,
) {
    let mut tick = tokio::time::interval(every);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tick.tick() => {
                let generation = buffer.generation();
                if generation == seen {
                    continue;
                }
                seen = generation;
                let entries = buffer.get_all();
                let update = updates
                    .update_component(handle.clone(), move |panel: &mut LogsPanel| {
                        panel.receive_snapshot(generation, entries)
                    })
                    .await;
                match update {
                    Ok(()) => {}
                    Err(QueueError::Closed) => break,
                    // Try again with a fresher snapshot next tick
                    Err(_) => seen = 0,
                }
            }
        }
    }
}

impl ActionOwner for LogsPanel {
    fn actions(&self) -> &KeyActions<Self> {
        &self.actions
    }
}

impl Component for LogsPanel {
    fn name(&self) -> &str {
        "Logs"
    }

    fn identifier(&self) -> &str {
        "logs"
    }

    fn init(&mut self, ctx: &Context) -> anyhow::Result<()> {
        if ctx.read_only() {
            self.actions.clear_dangerous();
        }
        ctx.share_actions(&self.actions);
        self.watch = Some((ctx.handle(), ctx.updates().clone()));
        self.flash = Some(Arc::clone(ctx.flash()));
        self.reload();
        tracing::debug!(surface = %ctx.surface(), entries = self.entries.len(), "Logs panel ready");
        Ok(())
    }

    fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }
        let Some((handle, updates)) = self.watch.clone() else {
            return;
        };
        // Catch up on whatever arrived while stopped
        self.reload();

        let buffer = self.buffer.clone();
        let every = self.refresh;
        let seen = self.generation;
        match Worker::spawn("logs-watch", move |cancel| {
            watch_logs(cancel, buffer, handle, updates, every, seen)
        }) {
            Ok(worker) => self.worker = Some(worker),
            Err(e) => {
                tracing::warn!("Logs panel will not refresh: {:#}", e);
                if let Some(flash) = &self.flash {
                    flash.warn("Logs will not refresh automatically");
                }
            }
        }
    }

    fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop();
        }
    }

    fn hints(&self) -> MenuHints {
        let mut hints = self.actions.hints();
        hints.extend(self.actions.shared_hints());
        hints
    }

    fn dispatch(&mut self, cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        self.run_action(cmds, event)
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let mut spans = vec![
                    Span::styled(
                        format!("{} ", entry.timestamp.format("%H:%M:%S%.3f")),
                        ctx.styles.muted,
                    ),
                    Span::styled(
                        format!("{:<5} ", entry.level.as_str()),
                        ctx.styles.level(entry.level),
                    ),
                    Span::styled(entry.message.clone(), ctx.styles.text),
                ];
                if !entry.fields.is_empty() {
                    spans.push(Span::styled(
                        format!(" {}", entry.fields.join(" ")),
                        ctx.styles.muted,
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let title = format!(
            " Logs ({}){} ",
            self.entries.len(),
            if self.follow { " [follow]" } else { "" }
        );
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(ctx.border_style())
                    .title(Span::styled(title, ctx.styles.title)),
            )
            .highlight_style(ctx.styles.selection);

        let mut state = ListState::default();
        if !self.entries.is_empty() {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use crate::runtime::component::SurfaceId;
    use crate::runtime::queue;
    use crate::runtime::{DispatchState, Routed};
    use crate::runtime::testing::{char_key, key, RecordingFlash};
    use crossterm::event::KeyModifiers;
    use chrono::Local;
    use crossterm::event::KeyCode;
    use std::sync::Arc;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Info,
            target: "lxz::test".to_string(),
            message: message.to_string(),
            fields: Vec::new(),
        }
    }

    fn ctrl_key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn panel_with(n: usize) -> LogsPanel {
        let mut panel = LogsPanel::new(LogBuffer::new(), Duration::from_millis(10));
        panel.set_entries(1, (0..n).map(|i| entry(&format!("line {}", i))).collect());
        panel
    }

    fn kinds(cmds: Commands) -> Vec<String> {
        cmds.into_iter().map(|c| format!("{:?}", c)).collect()
    }

    #[test]
    fn test_follow_tracks_newest_entry() {
        let mut panel = panel_with(3);
        assert_eq!(panel.selected_entry().unwrap().message, "line 2");

        let mut cmds = Commands::default();
        panel.dispatch(&mut cmds, char_key('k'));
        assert!(!panel.is_following());

        panel.set_entries(2, (0..5).map(|i| entry(&format!("line {}", i))).collect());
        assert_eq!(panel.selected_entry().unwrap().message, "line 1");

        panel.dispatch(&mut cmds, char_key('f'));
        assert!(panel.is_following());
        assert_eq!(panel.selected_entry().unwrap().message, "line 4");
    }

    #[test]
    fn test_moving_to_bottom_resumes_follow() {
        let mut panel = panel_with(2);
        let mut cmds = Commands::default();
        panel.dispatch(&mut cmds, key(KeyCode::Up));
        assert!(!panel.is_following());

        panel.dispatch(&mut cmds, char_key('j'));
        assert!(panel.is_following());
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_enter_pushes_detail() {
        let mut panel = panel_with(2);
        let mut cmds = Commands::default();
        assert_eq!(panel.dispatch(&mut cmds, key(KeyCode::Enter)), Dispatch::Consumed);
        assert_eq!(
            kinds(cmds),
            vec!["Inject { component: \"Log Detail\", clear_stack: false }"]
        );

        let mut empty = panel_with(0);
        let mut cmds = Commands::default();
        empty.dispatch(&mut cmds, key(KeyCode::Enter));
        assert_eq!(
            kinds(cmds),
            vec!["Flash(Warn, \"No log entry selected\")"]
        );
    }

    #[test]
    fn test_clear_asks_first() {
        let mut panel = panel_with(2);
        let mut cmds = Commands::default();
        panel.dispatch(&mut cmds, char_key('c'));
        assert_eq!(kinds(cmds), vec!["ShowDialog(\"Confirm\")"]);
    }

    #[tokio::test]
    async fn test_read_only_drops_clear() {
        let (tx, _queue) = queue::channel(16, Duration::from_millis(50));
        let mut app = App::new(tx, Arc::new(RecordingFlash::default()));
        app.set_read_only(true);
        app.inject(
            Box::new(LogsPanel::new(LogBuffer::new(), Duration::from_millis(5))),
            false,
        )
        .unwrap();

        assert_eq!(app.handle_key(char_key('c')), Routed::Unhandled);
        assert_eq!(app.state(), DispatchState::NoDialogActive);
        assert_eq!(app.handle_key(char_key('g')), Routed::Local);
    }

    #[tokio::test]
    async fn test_follow_reachable_from_detail() {
        let (tx, _queue) = queue::channel(16, Duration::from_millis(50));
        let mut app = App::new(tx, Arc::new(RecordingFlash::default()));
        let buffer = LogBuffer::new();
        buffer.add(entry("hello"));
        app.inject(
            Box::new(LogsPanel::new(buffer, Duration::from_millis(5))),
            false,
        )
        .unwrap();
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Routed::Local);
        assert_eq!(app.pages().stack().names(), vec!["Logs", "Log Detail"]);

        assert_eq!(app.handle_key(ctrl_key('f')), Routed::Global);
        assert!(app.back());
        let panel = app
            .pages()
            .top()
            .and_then(|c| c.as_any().downcast_ref::<LogsPanel>())
            .unwrap();
        assert!(!panel.is_following());
    }

    #[tokio::test]
    async fn test_worker_ships_new_entries() {
        let (tx, mut queue) = queue::channel(16, Duration::from_millis(50));
        let mut app = App::new(tx, Arc::new(RecordingFlash::default()));
        let buffer = LogBuffer::new();

        app.inject(
            Box::new(LogsPanel::new(buffer.clone(), Duration::from_millis(5))),
            false,
        )
        .unwrap();
        buffer.add(entry("hello"));

        let update = tokio::time::timeout(Duration::from_secs(2), queue.recv())
            .await
            .unwrap()
            .unwrap();
        queue.apply(&mut app, update);

        let panel = app
            .pages()
            .top()
            .and_then(|c| c.as_any().downcast_ref::<LogsPanel>())
            .unwrap();
        assert_eq!(panel.entries().len(), 1);
        assert_eq!(panel.entries()[0].message, "hello");
        assert!(panel.is_watching());
    }

    #[tokio::test]
    async fn test_stop_halts_worker() {
        let (tx, _queue) = queue::channel(16, Duration::from_millis(50));
        let mut panel = LogsPanel::new(LogBuffer::new(), Duration::from_millis(5));
        let ctx = Context::new(
            SurfaceId::new("Logs", 1),
            tx,
            Arc::new(RecordingFlash::default()),
        );
        panel.init(&ctx).unwrap();

        panel.start();
        assert!(panel.is_watching());
        panel.stop();
        panel.stop();
        assert!(!panel.is_watching());
    }

    #[tokio::test]
    async fn test_snapshot_after_stop_is_dropped() {
        let (tx, _queue) = queue::channel(16, Duration::from_millis(50));
        let buffer = LogBuffer::new();
        buffer.add(entry("kept"));
        let mut panel = LogsPanel::new(buffer, Duration::from_millis(5));
        let ctx = Context::new(
            SurfaceId::new("Logs", 1),
            tx,
            Arc::new(RecordingFlash::default()),
        );
        panel.init(&ctx).unwrap();
        panel.start();
        panel.stop();

        panel.receive_snapshot(99, vec![entry("stale"), entry("stale")]);
        assert_eq!(panel.entries().len(), 1);
        assert_eq!(panel.entries()[0].message, "kept");

        panel.start();
        panel.receive_snapshot(99, vec![entry("fresh")]);
        assert_eq!(panel.entries()[0].message, "fresh");
    }

    #[test]
    fn test_start_without_runtime_warns() {
        let (tx, _queue) = queue::channel(16, Duration::from_millis(50));
        let flash = Arc::new(RecordingFlash::default());
        let mut panel = LogsPanel::new(LogBuffer::new(), Duration::from_millis(5));
        let ctx = Context::new(SurfaceId::new("Logs", 1), tx, flash.clone());
        panel.init(&ctx).unwrap();

        panel.start();
        assert!(!panel.is_watching());
        assert_eq!(
            flash.messages(),
            vec![(FlashLevel::Warn, "Logs will not refresh automatically".to_string())]
        );
    }
}
