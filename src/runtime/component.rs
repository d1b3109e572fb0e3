//! Component contract - what every pluggable panel implements
//!
//! The mandatory surface is small: identity, lifecycle, hints, key dispatch
//! and rendering. Optional capabilities (plain text entry) are queried through
//! accessor methods that return `None` by default, so a panel only writes
//! code for what it actually supports.
//!
//! # Lifecycle
//!
//! ```text
//! Constructed ──init──▶ Initialized ──start──▶ Running
//!                                               │  ▲
//!                                          stop │  │ start (top again after a pop)
//!                                               ▼  │
//!                                             Stopped
//! ```
//!
//! `init` runs once, before the component enters the stack. `start`/`stop`
//! bracket "is the visible top". `stop` may be called repeatedly and must halt
//! any worker the component owns.

use super::app::App;
use super::command::Commands;
use super::flash::FlashSink;
use super::hints::MenuHints;
use super::keys::{Dispatch, KeyActions};
use super::queue::UpdateSender;
use crate::tui::styles::Styles;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Upcast to `Any` so the App can hand a typed `&mut T` back to a worker
pub trait AsAny: Any {
    #[allow(dead_code)]
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Result of offering a key to a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled
    No,
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Optional capability: raw keyboard input (text entry, free navigation).
///
/// Receives whatever no registry claimed.
pub trait Interactive {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;
}

/// A lifecycle-managed UI panel living in one stack slot
pub trait Component: AsAny + Send {
    /// Stable display name (breadcrumbs, surface ids)
    fn name(&self) -> &str;

    /// Machine key for menu highlighting; empty when the panel has none
    fn identifier(&self) -> &str {
        ""
    }

    /// One-time construction: build children, wire the local registry.
    /// An error aborts the push.
    fn init(&mut self, ctx: &Context) -> anyhow::Result<()>;

    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn hints(&self) -> MenuHints {
        MenuHints::default()
    }

    /// Offer a key event to the local registry
    fn dispatch(&mut self, _cmds: &mut Commands, event: KeyEvent) -> Dispatch {
        Dispatch::Unbound(event)
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive> {
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}

/// Surface identity: component name plus a per-App instance counter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(name: &str, instance: u64) -> Self {
        Self(format!("{}-{}", name, instance))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed address of a component in the stack.
///
/// Workers hold one of these instead of a reference; the App resolves it on
/// the UI task. Resolving a handle whose component is gone yields nothing.
pub struct Handle<T> {
    surface: SurfaceId,
    _type: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub fn surface(&self) -> &SurfaceId {
        &self.surface
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.surface).finish()
    }
}

/// Everything a component may keep from its `init`
pub struct Context {
    surface: SurfaceId,
    updates: UpdateSender<App>,
    flash: Arc<dyn FlashSink>,
    read_only: bool,
    /// Shared bindings lifted to the App, published once the push succeeds
    shared: RefCell<KeyActions<App>>,
}

impl Context {
    pub fn new(surface: SurfaceId, updates: UpdateSender<App>, flash: Arc<dyn FlashSink>) -> Self {
        Self {
            surface,
            updates,
            flash,
            read_only: false,
            shared: RefCell::new(KeyActions::new()),
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Dangerous bindings should be dropped
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn surface(&self) -> &SurfaceId {
        &self.surface
    }

    /// Sender for the redraw queue, for workers
    pub fn updates(&self) -> &UpdateSender<App> {
        &self.updates
    }

    pub fn flash(&self) -> &Arc<dyn FlashSink> {
        &self.flash
    }

    /// Typed handle to the component being initialized
    pub fn handle<T: Component>(&self) -> Handle<T> {
        Handle {
            surface: self.surface.clone(),
            _type: PhantomData,
        }
    }

    /// Make the `shared` bindings of `actions` reachable from the global
    /// registry while this component is stacked, even when it is not the top.
    /// Calling it again adds to what was shared before.
    pub fn share_actions<T: Component>(&self, actions: &KeyActions<T>) {
        let lifted = actions.lift_shared(&self.handle::<T>());
        self.shared.borrow_mut().merge(&lifted);
    }

    pub(crate) fn take_shared(&self) -> KeyActions<App> {
        self.shared.take()
    }
}

/// Read-only state passed to components while drawing
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub styles: &'a Styles,
    /// Emoji decorations off
    pub no_icons: bool,
    /// False while a dialog owns input
    pub focused: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(styles: &'a Styles, no_icons: bool, focused: bool) -> Self {
        Self {
            styles,
            no_icons,
            focused,
        }
    }

    /// Border style for a panel depending on focus
    pub fn border_style(&self) -> ratatui::style::Style {
        if self.focused {
            self.styles.border_focused
        } else {
            self.styles.border
        }
    }
}
