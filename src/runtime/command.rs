//! Deferred structural changes requested by key handlers
//!
//! Handlers never reach into the stack while routing is in progress.
//! They append to a [`Commands`] buffer which the App applies once the
//! handler has returned. If the handler panics the buffer is discarded,
//! which keeps the stack unchanged.

use super::component::Component;
use super::dialog::Dialog;
use super::flash::FlashLevel;
use std::fmt;
use std::path::Path;

/// A single deferred change
pub enum Command {
    /// Init the component and push it (optionally clearing history first)
    Inject {
        component: Box<dyn Component>,
        clear_stack: bool,
    },
    /// Navigation-level pop ("go back")
    Back,
    ShowDialog(Box<dyn Dialog>),
    DismissDialog,
    Flash(FlashLevel, String),
    /// Hand the terminal to an external process
    Suspend(ExternalCommand),
    Quit,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Inject {
                component,
                clear_stack,
            } => f
                .debug_struct("Inject")
                .field("component", &component.name())
                .field("clear_stack", clear_stack)
                .finish(),
            Command::Back => write!(f, "Back"),
            Command::ShowDialog(d) => f.debug_tuple("ShowDialog").field(&d.name()).finish(),
            Command::DismissDialog => write!(f, "DismissDialog"),
            Command::Flash(level, msg) => f.debug_tuple("Flash").field(level).field(msg).finish(),
            Command::Suspend(cmd) => f.debug_tuple("Suspend").field(cmd).finish(),
            Command::Quit => write!(f, "Quit"),
        }
    }
}

/// Ordered buffer of commands produced while routing one key event
#[derive(Debug, Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    /// Push a component on top of the current one
    pub fn push(&mut self, component: impl Component + 'static) {
        self.queue.push(Command::Inject {
            component: Box::new(component),
            clear_stack: false,
        });
    }

    /// Push an already boxed component, optionally clearing history first
    pub fn inject(&mut self, component: Box<dyn Component>, clear_stack: bool) {
        self.queue.push(Command::Inject {
            component,
            clear_stack,
        });
    }

    pub fn back(&mut self) {
        self.queue.push(Command::Back);
    }

    pub fn show_dialog(&mut self, dialog: impl Dialog + 'static) {
        self.queue.push(Command::ShowDialog(Box::new(dialog)));
    }

    pub fn dismiss_dialog(&mut self) {
        self.queue.push(Command::DismissDialog);
    }

    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.queue.push(Command::Flash(level, message.into()));
    }

    pub fn suspend(&mut self, command: ExternalCommand) {
        self.queue.push(Command::Suspend(command));
    }

    pub fn quit(&mut self) {
        self.queue.push(Command::Quit);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl IntoIterator for Commands {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.queue.into_iter()
    }
}

/// An interactive process that temporarily owns the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The user's login shell ($SHELL, falling back to /bin/sh)
    pub fn shell() -> Self {
        let program = std::env::var("SHELL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "/bin/sh".to_string());
        Self::new(program, Vec::new())
    }

    /// Open `path` in the configured editor ($LXZ_EDITOR, $EDITOR, then vi)
    pub fn editor(path: &Path) -> Self {
        let program = ["LXZ_EDITOR", "EDITOR"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string());
        Self::new(program, vec![path.display().to_string()])
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
