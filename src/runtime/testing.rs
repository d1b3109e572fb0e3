//! Test doubles shared by the runtime tests

use super::command::Commands;
use super::component::{Component, Context, Handle, Handled, Interactive, RenderContext};
use super::dialog::Dialog;
use super::flash::{FlashLevel, FlashSink};
use super::hints::MenuHints;
use super::keys::{ActionOwner, Dispatch, Key, KeyAction, KeyActions};
use super::stack::StackListener;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of what happened
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Drain the journal
pub fn take(journal: &Journal) -> Vec<String> {
    std::mem::take(&mut *journal.lock().unwrap())
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Component that journals its lifecycle and key handling
pub struct Stub {
    name: String,
    identifier: String,
    log: Journal,
    fail_init: bool,
    panic_init: bool,
    text_entry: bool,
    actions: KeyActions<Stub>,
    handle: Arc<Mutex<Option<Handle<Stub>>>>,
}

impl Stub {
    pub fn new(name: &str, log: Journal) -> Self {
        Self {
            name: name.to_string(),
            identifier: name.to_string(),
            log,
            fail_init: false,
            panic_init: false,
            text_entry: false,
            actions: KeyActions::new(),
            handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Menu identifier (defaults to the name; empty for none)
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = identifier.to_string();
        self
    }

    /// `init` returns an error
    pub fn failing(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// `init` panics
    pub fn exploding(mut self) -> Self {
        self.panic_init = true;
        self
    }

    /// Accept unbound keys as text
    pub fn with_text_entry(mut self) -> Self {
        self.text_entry = true;
        self
    }

    /// Bind `key` to a handler that journals `label`
    pub fn bind(self, key: Key, label: &'static str) -> Self {
        self.with_binding(
            key,
            KeyAction::new(label, move |p: &mut Stub, _, _| {
                p.record(label);
                None
            }),
        )
    }

    /// Like [`Stub::bind`], but shared application-wide
    pub fn bind_shared(self, key: Key, label: &'static str) -> Self {
        self.with_binding(
            key,
            KeyAction::new(label, move |p: &mut Stub, _, _| {
                p.record(label);
                None
            })
            .shared(),
        )
    }

    pub fn with_binding(mut self, key: Key, action: KeyAction<Stub>) -> Self {
        self.actions.add(key, action);
        self
    }

    /// Slot that receives the typed handle during `init`
    pub fn handle_slot(&self) -> Arc<Mutex<Option<Handle<Stub>>>> {
        self.handle.clone()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }
}

impl ActionOwner for Stub {
    fn actions(&self) -> &KeyActions<Self> {
        &self.actions
    }
}

impl Component for Stub {
    fn name(&self) -> &str {
        &self.name
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn init(&mut self, ctx: &Context) -> anyhow::Result<()> {
        self.record(format!("init:{}", self.name));
        if self.fail_init {
            anyhow::bail!("{} refused to start", self.name);
        }
        if self.panic_init {
            panic!("{} blew up", self.name);
        }
        *self.handle.lock().unwrap() = Some(ctx.handle());
        ctx.share_actions(&self.actions);
        Ok(())
    }

    fn start(&mut self) {
        self.record(format!("start:{}", self.name));
    }

    fn stop(&mut self) {
        self.record(format!("stop:{}", self.name));
    }

    fn hints(&self) -> MenuHints {
        self.actions.hints()
    }

    fn dispatch(&mut self, cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        self.run_action(cmds, event)
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive> {
        if self.text_entry {
            Some(self)
        } else {
            None
        }
    }

    fn render(&self, _f: &mut Frame, _area: Rect, _ctx: &RenderContext) {}
}

impl Interactive for Stub {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Char(c) => {
                self.record(format!("type:{}", c));
                Handled::Yes
            }
            _ => Handled::No,
        }
    }
}

/// Dialog with its own journaling registry
pub struct StubDialog {
    log: Journal,
    actions: KeyActions<StubDialog>,
}

impl StubDialog {
    pub fn new(log: Journal) -> Self {
        Self {
            log,
            actions: KeyActions::new(),
        }
    }

    /// Bind `key` to journal `label` and dismiss
    pub fn bind(mut self, key: Key, label: &'static str) -> Self {
        self.actions.add(
            key,
            KeyAction::new(label, move |d: &mut StubDialog, cmds, _| {
                d.log.lock().unwrap().push(label.to_string());
                cmds.dismiss_dialog();
                None
            }),
        );
        self
    }
}

impl ActionOwner for StubDialog {
    fn actions(&self) -> &KeyActions<Self> {
        &self.actions
    }
}

impl Dialog for StubDialog {
    fn name(&self) -> &str {
        "StubDialog"
    }

    fn dispatch(&mut self, cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        self.run_action(cmds, event)
    }

    fn hints(&self) -> MenuHints {
        self.actions.hints()
    }

    fn render(&self, _f: &mut Frame, _area: Rect, _ctx: &RenderContext) {}
}

/// Dialog that binds nothing
pub struct NullDialog;

impl Dialog for NullDialog {
    fn name(&self) -> &str {
        "NullDialog"
    }

    fn dispatch(&mut self, _cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        Dispatch::Unbound(event)
    }

    fn render(&self, _f: &mut Frame, _area: Rect, _ctx: &RenderContext) {}
}

/// Listener that journals every notification
pub struct RecordingListener {
    log: Journal,
}

impl RecordingListener {
    pub fn new(log: Journal) -> Self {
        Self { log }
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

impl StackListener for RecordingListener {
    fn stack_pushed(&mut self, component: &dyn Component) {
        self.record(format!("pushed:{}", component.name()));
    }

    fn stack_popped(&mut self, removed: &dyn Component, top: Option<&dyn Component>) {
        let top = top.map_or("none", |c| c.name());
        self.record(format!("popped:{}->{}", removed.name(), top));
    }

    fn stack_top(&mut self, component: &dyn Component) {
        self.record(format!("top:{}", component.name()));
    }
}

/// Flash sink that keeps everything
#[derive(Default)]
pub struct RecordingFlash {
    messages: Mutex<Vec<(FlashLevel, String)>>,
}

impl RecordingFlash {
    pub fn messages(&self) -> Vec<(FlashLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| *level == FlashLevel::Error)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl FlashSink for RecordingFlash {
    fn flash(&self, level: FlashLevel, message: String) {
        self.messages.lock().unwrap().push((level, message));
    }
}
