//! Key identities and the two-tier action registry
//!
//! A [`KeyActions`] registry maps a normalized [`Key`] to a named handler.
//! Every component owns one for its local bindings and the [`App`] owns the
//! global one. Registration is last-write-wins: adding a key that is already
//! bound replaces the previous action. Panels rely on this to rebind keys
//! after construction.
//!
//! Handlers receive the registry owner mutably plus a [`Commands`] buffer
//! for structural changes (push, back, dialogs). Returning `None` consumes
//! the event; returning `Some(event)` hands it on to the focused widget.
//!
//! [`App`]: super::app::App

use super::command::Commands;
use super::hints::{MenuHint, MenuHints};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Normalized key identity.
///
/// Variant order is the natural code order used to sort hints: control
/// chords, then editing keys, then printable runes, then navigation and
/// function keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Ctrl(char),
    Backspace,
    Tab,
    Enter,
    Esc,
    Char(char),
    Alt(char),
    Up,
    Down,
    Right,
    Left,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    BackTab,
    F(u8),
}

impl Key {
    /// Normalize a terminal key event. Returns `None` for keys we never bind
    /// (media keys, lone modifiers, ...).
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);

        let key = match event.code {
            KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
            KeyCode::Char(c) if alt => Key::Alt(c),
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Right => Key::Right,
            KeyCode::Left => Key::Left,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(key)
    }

    /// Numeric value for digit keys, used to sort numeric mnemonics first
    pub fn digit(&self) -> Option<u32> {
        match self {
            Key::Char(c) => c.to_digit(10),
            _ => None,
        }
    }

    /// Display name shown in hint bars ("Esc", "Ctrl-E", "F1", "j")
    pub fn name(&self) -> String {
        match self {
            Key::Ctrl(c) => format!("Ctrl-{}", c.to_ascii_uppercase()),
            Key::Alt(c) => format!("Alt-{}", c),
            Key::Char(' ') => "Space".to_string(),
            Key::Char(c) => c.to_string(),
            Key::F(n) => format!("F{}", n),
            Key::Backspace => "Backspace".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::BackTab => "Shift-Tab".to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Esc => "Esc".to_string(),
            Key::Up => "Up".to_string(),
            Key::Down => "Down".to_string(),
            Key::Right => "Right".to_string(),
            Key::Left => "Left".to_string(),
            Key::Home => "Home".to_string(),
            Key::End => "End".to_string(),
            Key::PageUp => "PgUp".to_string(),
            Key::PageDown => "PgDn".to_string(),
            Key::Insert => "Ins".to_string(),
            Key::Delete => "Del".to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Handler invoked when a bound key fires
pub type ActionHandler<T> =
    Arc<dyn Fn(&mut T, &mut Commands, KeyEvent) -> Option<KeyEvent> + Send + Sync>;

/// Visibility flags for a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOpts {
    /// Listed in hint bars
    pub visible: bool,
    /// Reachable application-wide (shown in the header menu, not the sub menu)
    pub shared: bool,
    /// Destructive action, removable in bulk via `clear_dangerous`
    pub dangerous: bool,
}

impl Default for ActionOpts {
    fn default() -> Self {
        Self {
            visible: true,
            shared: false,
            dangerous: false,
        }
    }
}

/// A named key binding
pub struct KeyAction<T> {
    pub description: String,
    pub action: ActionHandler<T>,
    pub opts: ActionOpts,
}

impl<T> KeyAction<T> {
    pub fn new<F>(description: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut T, &mut Commands, KeyEvent) -> Option<KeyEvent> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            action: Arc::new(action),
            opts: ActionOpts::default(),
        }
    }

    /// Mark as visible application-wide
    pub fn shared(mut self) -> Self {
        self.opts.shared = true;
        self
    }

    /// Keep out of hint bars
    pub fn hidden(mut self) -> Self {
        self.opts.visible = false;
        self
    }

    pub fn dangerous(mut self) -> Self {
        self.opts.dangerous = true;
        self
    }
}

// Manual impl: derive would require T: Clone
impl<T> Clone for KeyAction<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            action: Arc::clone(&self.action),
            opts: self.opts,
        }
    }
}

impl<T> fmt::Debug for KeyAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyAction")
            .field("description", &self.description)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

/// Registry of key bindings owned by `T`
pub struct KeyActions<T> {
    actions: HashMap<Key, KeyAction<T>>,
}

impl<T> Default for KeyActions<T> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }
}

impl<T> Clone for KeyActions<T> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
        }
    }
}

impl<T> fmt::Debug for KeyActions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.actions.iter()).finish()
    }
}

impl<T> KeyActions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Key) -> Option<&KeyAction<T>> {
        self.actions.get(key)
    }

    /// Bind `key`, replacing any existing binding. Returns the replaced action.
    pub fn add(&mut self, key: Key, action: KeyAction<T>) -> Option<KeyAction<T>> {
        let replaced = self.actions.insert(key, action);
        if let Some(old) = &replaced {
            tracing::debug!(
                key = %key,
                previous = %old.description,
                "Key rebound"
            );
        }
        replaced
    }

    /// Bind many keys at once, same overwrite rule as [`KeyActions::add`]
    pub fn bulk(&mut self, actions: impl IntoIterator<Item = (Key, KeyAction<T>)>) {
        for (key, action) in actions {
            self.add(key, action);
        }
    }

    /// Copy every binding of `other` into `self`. Collisions take `other`'s action.
    pub fn merge(&mut self, other: &KeyActions<T>) {
        for (key, action) in &other.actions {
            self.add(*key, action.clone());
        }
    }

    pub fn delete(&mut self, keys: &[Key]) {
        for key in keys {
            self.actions.remove(key);
        }
    }

    /// Drop every binding flagged dangerous (read-only mode)
    pub fn clear_dangerous(&mut self) {
        self.actions.retain(|_, action| !action.opts.dangerous);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &KeyAction<T>)> {
        self.actions.iter()
    }

    /// Handler bound to this event, cloned out so the caller can hand the
    /// owner to it mutably.
    pub fn handler(&self, event: &KeyEvent) -> Option<ActionHandler<T>> {
        let key = Key::from_event(event)?;
        self.actions.get(&key).map(|a| Arc::clone(&a.action))
    }

    /// Visible, non-shared bindings in display order
    pub fn hints(&self) -> MenuHints {
        self.collect_hints(false)
    }

    /// Visible, shared bindings in display order
    pub fn shared_hints(&self) -> MenuHints {
        self.collect_hints(true)
    }

    fn collect_hints(&self, shared: bool) -> MenuHints {
        self.iter()
            .filter(|(_, a)| a.opts.visible && a.opts.shared == shared)
            .map(|(key, a)| MenuHint::new(*key, a.description.clone()))
            .collect()
    }
}

impl<T> FromIterator<(Key, KeyAction<T>)> for KeyActions<T> {
    fn from_iter<I: IntoIterator<Item = (Key, KeyAction<T>)>>(iter: I) -> Self {
        let mut actions = Self::new();
        actions.bulk(iter);
        actions
    }
}

/// Outcome of offering an event to one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A binding fired and consumed the event
    Consumed,
    /// A binding fired and handed the event on for widget passthrough
    Passed(KeyEvent),
    /// Nothing bound to this key
    Unbound(KeyEvent),
}

/// Implemented by anything that owns a `KeyActions<Self>` registry.
///
/// Gives components and dialogs a ready-made `dispatch` body.
pub trait ActionOwner: Sized {
    fn actions(&self) -> &KeyActions<Self>;

    fn run_action(&mut self, cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        let Some(handler) = self.actions().handler(&event) else {
            return Dispatch::Unbound(event);
        };
        match handler(self, cmds, event) {
            None => Dispatch::Consumed,
            Some(event) => Dispatch::Passed(event),
        }
    }
}
