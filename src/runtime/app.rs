//! App shell: owns the overlay manager and the global registry, and routes
//! every key event.
//!
//! # Routing
//!
//! ```text
//! KeyEvent
//!    │
//!    ├─ dialog shown? ──▶ dialog registry only (everything else swallowed)
//!    │
//!    ├─ stack top's local registry
//!    │
//!    ├─ global registry
//!    │
//!    └─ top component's Interactive capability (plain text entry)
//! ```
//!
//! The first binding that fires ends the lookup. A handler that returns the
//! event hands it to the widget, never to a lower registry. Handlers, and
//! then each command they queued, run inside `catch_unwind`; a panic is
//! logged and flashed, and whatever commands remain are thrown away.
//!
//! # Shared bindings
//!
//! A component's `shared` bindings are lifted into the global registry when
//! it is pushed, so they stay reachable while other components sit above it.
//! They are retracted when the component leaves the stack.

use super::command::{Command, Commands, ExternalCommand};
use super::component::{Component, Context, Handle, Handled, SurfaceId};
use super::dialog::Dialog;
use super::error::{panic_message, QueueError, RuntimeError};
use super::flash::FlashSink;
use super::hints::MenuHints;
use super::keys::{ActionHandler, Dispatch, Key, KeyAction, KeyActions};
use super::pages::Pages;
use super::queue::UpdateSender;
use super::stack::{Entry, StackListener};
use crossterm::event::KeyEvent;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Input routing state, derived from the overlay manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    NoDialogActive,
    DialogActive,
}

/// Where a key event ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// A dialog binding fired
    Dialog,
    /// A dialog was shown and had no binding for the key
    Swallowed,
    Local,
    Global,
    /// No binding; the top component's widget took it
    Widget,
    Unhandled,
    /// The handler panicked and was recovered
    Panicked,
}

/// Shell decorations toggled by bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub show_header: bool,
    /// Splash screen still up
    pub splash: bool,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            show_header: true,
            splash: true,
        }
    }
}

/// A global binding lifted from a stacked component
struct Published {
    surface: SurfaceId,
    key: Key,
    action: ActionHandler<App>,
    /// Global binding it replaced
    previous: Option<KeyAction<App>>,
}

pub struct App {
    pages: Pages,
    actions: KeyActions<App>,
    /// Oldest first
    published: Vec<Published>,
    flash: Arc<dyn FlashSink>,
    updates: UpdateSender<App>,
    chrome: Chrome,
    running: bool,
    read_only: bool,
    suspend: Option<ExternalCommand>,
    fatal: Option<RuntimeError>,
    instances: u64,
}

impl App {
    pub fn new(updates: UpdateSender<App>, flash: Arc<dyn FlashSink>) -> Self {
        Self {
            pages: Pages::new(),
            actions: KeyActions::new(),
            published: Vec::new(),
            flash,
            updates,
            chrome: Chrome::default(),
            running: true,
            read_only: false,
            suspend: None,
            fatal: None,
            instances: 0,
        }
    }

    pub fn state(&self) -> DispatchState {
        if self.pages.is_top_dialog() {
            DispatchState::DialogActive
        } else {
            DispatchState::NoDialogActive
        }
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    pub fn actions(&self) -> &KeyActions<App> {
        &self.actions
    }

    #[allow(dead_code)]
    pub fn actions_mut(&mut self) -> &mut KeyActions<App> {
        &mut self.actions
    }

    /// Fold bindings into the global registry (last write wins)
    pub fn add_actions(&mut self, actions: &KeyActions<App>) {
        self.actions.merge(actions);
        tracing::debug!(added = actions.len(), total = self.actions.len(), "Global keys bound");
    }

    /// Components pushed from now on drop their dangerous bindings
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn add_listener(&mut self, listener: Box<dyn StackListener>) {
        self.pages.add_listener(listener);
    }

    pub fn flash(&self) -> &Arc<dyn FlashSink> {
        &self.flash
    }

    pub fn updates(&self) -> &UpdateSender<App> {
        &self.updates
    }

    pub fn chrome(&self) -> Chrome {
        self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut Chrome {
        &mut self.chrome
    }

    fn next_surface(&mut self, name: &str) -> SurfaceId {
        self.instances += 1;
        SurfaceId::new(name, self.instances)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Initialize `component` and make it the top.
    ///
    /// `init` runs before anything is touched: on failure the stack is left
    /// as it was, `start` is never called, and the error is flashed.
    pub fn inject(
        &mut self,
        mut component: Box<dyn Component>,
        clear_stack: bool,
    ) -> Result<(), RuntimeError> {
        let surface = self.next_surface(component.name());
        let ctx = Context::new(
            surface.clone(),
            self.updates.clone(),
            Arc::clone(&self.flash),
        )
        .with_read_only(self.read_only);

        if let Err(source) = component.init(&ctx) {
            let err = RuntimeError::Initialization {
                component: component.name().to_string(),
                source,
            };
            tracing::error!(component = component.name(), "{}", err);
            self.flash.err(err.to_string());
            return Err(err);
        }

        if clear_stack {
            let removed = self.pages.clear();
            let gone: Vec<SurfaceId> = removed.iter().map(|e| e.surface.clone()).collect();
            self.retract(&gone);
        }
        tracing::info!(component = component.name(), surface = %surface, "Viewing");
        self.pages.push(Entry::new(surface.clone(), component));
        self.publish(&surface, ctx.take_shared());
        tracing::debug!(trail = ?self.pages.stack().names(), "Stack");
        Ok(())
    }

    /// Bind a freshly pushed component's shared keys globally
    fn publish(&mut self, surface: &SurfaceId, shared: KeyActions<App>) {
        if shared.is_empty() {
            return;
        }
        tracing::debug!(surface = %surface, keys = shared.len(), "Shared keys published");
        for (key, action) in shared.iter() {
            let previous = self.actions.add(*key, action.clone());
            self.published.push(Published {
                surface: surface.clone(),
                key: *key,
                action: Arc::clone(&action.action),
                previous,
            });
        }
    }

    /// Undo what `publish` did for components that left the stack.
    ///
    /// Newest first, so stacked publications of one key unwind in order. A key
    /// rebound since publishing is left alone.
    fn retract(&mut self, gone: &[SurfaceId]) {
        let (retracted, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.published)
            .into_iter()
            .partition(|p| gone.contains(&p.surface));
        self.published = kept;

        for published in retracted.into_iter().rev() {
            let ours = self
                .actions
                .get(&published.key)
                .is_some_and(|a| Arc::ptr_eq(&a.action, &published.action));
            if !ours {
                tracing::trace!(key = %published.key, "Shared key rebound, not restored");
                continue;
            }
            match published.previous {
                Some(previous) => {
                    self.actions.add(published.key, previous);
                }
                None => self.actions.delete(&[published.key]),
            }
        }
    }

    /// Inject the root component. If it fails with nothing on screen the app
    /// can't continue: the error is recorded and the loop told to quit.
    pub fn launch(&mut self, root: Box<dyn Component>) {
        self.chrome.splash = false;
        if let Err(err) = self.inject(root, true) {
            if self.pages.stack().is_empty() {
                tracing::error!("Root component failed, nothing to display");
                self.fatal = Some(err);
                self.quit();
            }
        }
    }

    /// Go back one page. Ignored at the root and while a dialog is shown.
    pub fn back(&mut self) -> bool {
        match self.pages.pop() {
            Some(entry) => {
                self.retract(&[entry.surface]);
                true
            }
            None => false,
        }
    }

    pub fn show_dialog(&mut self, dialog: Box<dyn Dialog>) -> bool {
        let surface = self.next_surface(dialog.name());
        self.pages.show_dialog(surface, dialog)
    }

    pub fn dismiss_dialog(&mut self) -> bool {
        self.pages.dismiss_dialog().is_some()
    }

    /// Run `f` against the component behind `handle`, if it is still stacked
    pub fn with_component<T, R>(&mut self, handle: &Handle<T>, f: impl FnOnce(&mut T) -> R) -> Option<R>
    where
        T: Component,
    {
        let component = self.pages.find_mut(handle.surface())?;
        let typed = component.as_any_mut().downcast_mut::<T>()?;
        Some(f(typed))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Route one key event and apply whatever the handler asked for
    pub fn handle_key(&mut self, event: KeyEvent) -> Routed {
        let mut cmds = Commands::default();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.route(&mut cmds, event)));

        let routed = match outcome {
            Ok(routed) => routed,
            Err(payload) => {
                self.report_panic(&event, payload.as_ref(), cmds.len());
                return Routed::Panicked;
            }
        };
        tracing::trace!(key = ?event.code, ?routed, state = ?self.state(), "Key routed");
        if cmds.is_empty() {
            return routed;
        }

        // init/start of a pushed component run here, so they get the same net
        let mut pending = cmds.into_iter();
        while let Some(cmd) = pending.next() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| self.apply_one(cmd))) {
                self.report_panic(&event, payload.as_ref(), pending.len());
                return Routed::Panicked;
            }
        }
        routed
    }

    fn report_panic(&self, event: &KeyEvent, payload: &(dyn Any + Send), discarded: usize) {
        let err = RuntimeError::DispatchPanic {
            key: Key::from_event(event)
                .map(|k| k.name())
                .unwrap_or_else(|| format!("{:?}", event.code)),
            message: panic_message(payload),
        };
        tracing::error!(discarded, "{}", err);
        self.flash.err(err.to_string());
    }

    fn route(&mut self, cmds: &mut Commands, event: KeyEvent) -> Routed {
        if let Some(dialog) = self.pages.dialog_mut() {
            return match dialog.dispatch(cmds, event) {
                Dispatch::Consumed => Routed::Dialog,
                Dispatch::Passed(_) | Dispatch::Unbound(_) => Routed::Swallowed,
            };
        }

        if let Some(top) = self.pages.top_mut() {
            match top.dispatch(cmds, event) {
                Dispatch::Consumed => return Routed::Local,
                Dispatch::Passed(event) => {
                    self.passthrough(event);
                    return Routed::Local;
                }
                Dispatch::Unbound(_) => {}
            }
        }

        if let Some(handler) = self.actions.handler(&event) {
            if let Some(event) = handler(self, cmds, event) {
                self.passthrough(event);
            }
            return Routed::Global;
        }

        match self.passthrough(event) {
            Handled::Yes => Routed::Widget,
            Handled::No => Routed::Unhandled,
        }
    }

    fn passthrough(&mut self, event: KeyEvent) -> Handled {
        let Some(top) = self.pages.top_mut() else {
            return Handled::No;
        };
        match top.interactive() {
            Some(widget) => widget.handle_key(event),
            None => Handled::No,
        }
    }

    fn apply_one(&mut self, cmd: Command) {
        match cmd {
            Command::Inject {
                component,
                clear_stack,
            } => {
                // Failure is already logged and flashed
                let _ = self.inject(component, clear_stack);
            }
            Command::Back => {
                self.back();
            }
            Command::ShowDialog(dialog) => {
                self.show_dialog(dialog);
            }
            Command::DismissDialog => {
                self.dismiss_dialog();
            }
            Command::Flash(level, message) => self.flash.flash(level, message),
            Command::Suspend(external) => self.suspend = Some(external),
            Command::Quit => self.quit(),
        }
    }

    /// Hints for the sub menu: the dialog's while one is shown, otherwise
    /// the top's local hints over the non-shared globals
    pub fn hints(&self) -> MenuHints {
        if let Some(dialog) = self.pages.dialog() {
            return dialog.hints();
        }
        let mut hints = self.actions.hints();
        if let Some(top) = self.pages.top() {
            hints.extend(top.hints());
        }
        hints
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loop control
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Tear down every surface so running components stop their workers
    pub fn shutdown(&mut self) {
        self.pages.dismiss_dialog();
        let removed = self.pages.clear();
        let gone: Vec<SurfaceId> = removed.iter().map(|e| e.surface.clone()).collect();
        self.retract(&gone);
        tracing::debug!(components = removed.len(), "App shut down");
    }

    /// External process waiting for the terminal
    pub fn take_suspend(&mut self) -> Option<ExternalCommand> {
        self.suspend.take()
    }

    pub fn take_fatal(&mut self) -> Option<RuntimeError> {
        self.fatal.take()
    }
}

impl<T: Component> KeyActions<T> {
    /// Global counterparts of the `shared` bindings, each running against the
    /// component behind `handle`. Keys whose component is gone fall through
    /// to the widget.
    pub fn lift_shared(&self, handle: &Handle<T>) -> KeyActions<App> {
        self.iter()
            .filter(|(_, a)| a.opts.shared)
            .map(|(key, a)| {
                let handle = handle.clone();
                let action = Arc::clone(&a.action);
                let mut lifted = KeyAction::new(
                    a.description.clone(),
                    move |app: &mut App, cmds: &mut Commands, event: KeyEvent| {
                        app.with_component(&handle, |c| action(c, cmds, event))
                            .unwrap_or(Some(event))
                    },
                );
                lifted.opts = a.opts;
                (*key, lifted)
            })
            .collect()
    }
}

impl UpdateSender<App> {
    /// Queue a mutation of the component behind `handle`.
    /// A handle whose component has left the stack is a no-op.
    pub async fn update_component<T, F>(&self, handle: Handle<T>, f: F) -> Result<(), QueueError>
    where
        T: Component,
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.queue(move |app: &mut App| {
            if app.with_component(&handle, f).is_none() {
                tracing::trace!(surface = %handle.surface(), "Update for stale handle dropped");
            }
        })
        .await
    }
}
