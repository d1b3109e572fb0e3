//! Navigation stack with browser-history semantics
//!
//! Push enters a panel, pop returns to the previous one. The top is the
//! visible, running component. Listeners (breadcrumbs, menu) are notified
//! synchronously in registration order.

use super::component::{Component, SurfaceId};
use super::error::invariant_violation;

/// Observer of stack transitions
pub trait StackListener: Send {
    /// `component` became the new top by being pushed
    fn stack_pushed(&mut self, component: &dyn Component);

    /// `removed` left the stack. `top` is the exposed component, or `None`
    /// when nothing is resumed (empty stack, or a clear in progress).
    fn stack_popped(&mut self, removed: &dyn Component, top: Option<&dyn Component>);

    /// `component` is the top again after a pop
    fn stack_top(&mut self, component: &dyn Component);
}

/// A component and the surface it is drawn on
pub struct Entry {
    pub surface: SurfaceId,
    pub component: Box<dyn Component>,
}

impl Entry {
    pub fn new(surface: SurfaceId, component: Box<dyn Component>) -> Self {
        Self { surface, component }
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("surface", &self.surface)
            .field("component", &self.component.name())
            .finish()
    }
}

#[derive(Default)]
pub struct Stack {
    entries: Vec<Entry>,
    listeners: Vec<Box<dyn StackListener>>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Box<dyn StackListener>) {
        self.listeners.push(listener);
    }

    /// Make an initialized component the new top.
    ///
    /// The previous top is stopped first; the new one is started, then
    /// listeners hear about it.
    pub fn push(&mut self, mut entry: Entry) {
        if let Some(top) = self.entries.last_mut() {
            top.component.stop();
        }

        tracing::debug!(
            component = entry.component.name(),
            surface = %entry.surface,
            depth = self.entries.len() + 1,
            "Stack push"
        );

        entry.component.start();
        for listener in &mut self.listeners {
            listener.stack_pushed(entry.component.as_ref());
        }
        self.entries.push(entry);
    }

    /// Remove and stop the top, then resume whatever is exposed.
    ///
    /// Popping an empty stack is a programming error.
    pub fn pop(&mut self) -> Option<Entry> {
        let Some(mut removed) = self.entries.pop() else {
            invariant_violation("pop on an empty stack");
            return None;
        };

        removed.component.stop();
        tracing::debug!(
            component = removed.component.name(),
            surface = %removed.surface,
            depth = self.entries.len(),
            "Stack pop"
        );

        let top = self.entries.last().map(|e| e.component.as_ref());
        for listener in &mut self.listeners {
            listener.stack_popped(removed.component.as_ref(), top);
        }

        if let Some(top) = self.entries.last_mut() {
            top.component.start();
            for listener in &mut self.listeners {
                listener.stack_top(top.component.as_ref());
            }
        }

        Some(removed)
    }

    /// Stop and remove everything, top to bottom.
    ///
    /// One popped notification per element; nothing is resumed in between.
    /// Returned entries are in removal order.
    pub fn clear(&mut self) -> Vec<Entry> {
        let mut removed = Vec::with_capacity(self.entries.len());
        while let Some(mut entry) = self.entries.pop() {
            entry.component.stop();
            for listener in &mut self.listeners {
                listener.stack_popped(entry.component.as_ref(), None);
            }
            removed.push(entry);
        }
        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), "Stack cleared");
        }
        removed
    }

    pub fn top(&self) -> Option<&dyn Component> {
        self.entries.last().map(|e| e.component.as_ref())
    }

    pub fn top_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        self.entries.last_mut().map(|e| e.component.as_mut())
    }

    pub fn top_surface(&self) -> Option<&SurfaceId> {
        self.entries.last().map(|e| &e.surface)
    }

    pub fn find_mut(&mut self, surface: &SurfaceId) -> Option<&mut (dyn Component + 'static)> {
        self.entries
            .iter_mut()
            .find(|e| &e.surface == surface)
            .map(|e| e.component.as_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exactly one element left; "go back" is disabled at the root
    pub fn is_last(&self) -> bool {
        self.entries.len() == 1
    }

    /// Component names bottom to top
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.component.name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::{journal, take, Stub, RecordingListener};

    fn entry(name: &str, n: u64, log: &crate::runtime::testing::Journal) -> Entry {
        Entry::new(SurfaceId::new(name, n), Box::new(Stub::new(name, log.clone())))
    }

    #[test]
    fn test_push_pop_invariants() {
        let log = journal();
        let mut stack = Stack::new();
        assert!(stack.top().is_none());
        assert!(stack.is_empty());
        assert!(!stack.is_last());

        stack.push(entry("a", 1, &log));
        assert!(stack.is_last());
        assert_eq!(stack.top().unwrap().name(), "a");

        stack.push(entry("b", 2, &log));
        assert!(!stack.is_last());
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.names(), vec!["a", "b"]);

        let popped = stack.pop().unwrap();
        assert_eq!(popped.component.name(), "b");
        assert!(stack.is_last());

        stack.pop();
        assert!(stack.top().is_none());
        assert!(stack.is_empty());
        assert!(!stack.is_last());
    }

    #[test]
    fn test_lifecycle_brackets_top() {
        let log = journal();
        let mut stack = Stack::new();
        stack.push(entry("a", 1, &log));
        stack.push(entry("b", 2, &log));
        stack.pop();

        assert_eq!(
            take(&log),
            vec!["start:a", "stop:a", "start:b", "stop:b", "start:a"]
        );
    }

    #[test]
    fn test_listener_notifications() {
        let log = journal();
        let events = journal();
        let mut stack = Stack::new();
        stack.add_listener(Box::new(RecordingListener::new(events.clone())));

        stack.push(entry("a", 1, &log));
        stack.push(entry("b", 2, &log));
        stack.pop();

        assert_eq!(
            take(&events),
            vec!["pushed:a", "pushed:b", "popped:b->a", "top:a"]
        );
    }

    #[test]
    fn test_clear_notifies_top_to_bottom() {
        let log = journal();
        let events = journal();
        let mut stack = Stack::new();
        stack.add_listener(Box::new(RecordingListener::new(events.clone())));

        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            stack.push(entry(name, i as u64, &log));
        }
        take(&events);
        take(&log);

        let removed = stack.clear();
        assert_eq!(removed.len(), 3);
        assert!(stack.is_empty());
        assert_eq!(
            take(&events),
            vec!["popped:c->none", "popped:b->none", "popped:a->none"]
        );
        // stop is idempotent, so already-stopped entries get it again; nobody restarts
        assert_eq!(take(&log), vec!["stop:c", "stop:b", "stop:a"]);
    }

    #[test]
    fn test_find_mut_by_surface() {
        let log = journal();
        let mut stack = Stack::new();
        stack.push(entry("a", 1, &log));
        stack.push(entry("b", 2, &log));

        let found = stack.find_mut(&SurfaceId::new("a", 1)).unwrap();
        assert_eq!(found.name(), "a");
        assert!(stack.find_mut(&SurfaceId::new("a", 9)).is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "pop on an empty stack")]
    fn test_pop_empty_panics_in_debug() {
        let mut stack = Stack::new();
        stack.pop();
    }
}
