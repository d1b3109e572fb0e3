//! Overlay manager: binds the stack to layered surfaces
//!
//! Each stacked component has a content surface. Separately there is at most
//! one dialog surface, always above every content surface. The one question
//! the dispatcher asks is [`Pages::is_top_dialog`].

use super::component::{Component, SurfaceId};
use super::dialog::Dialog;
use super::error::invariant_violation;
use super::stack::{Entry, Stack, StackListener};

/// One visual layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub id: SurfaceId,
    pub is_dialog: bool,
}

struct ActiveDialog {
    surface: SurfaceId,
    dialog: Box<dyn Dialog>,
}

#[derive(Default)]
pub struct Pages {
    stack: Stack,
    /// Back to front
    surfaces: Vec<Surface>,
    dialog: Option<ActiveDialog>,
}

impl Pages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Box<dyn StackListener>) {
        self.stack.add_listener(listener);
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Add a content surface for `entry`, push it, and bring it to the front
    pub fn push(&mut self, entry: Entry) {
        let id = entry.surface.clone();
        self.surfaces.push(Surface {
            id: id.clone(),
            is_dialog: false,
        });
        self.stack.push(entry);
        self.show(&id);
    }

    /// Navigation-level pop ("go back").
    ///
    /// Refused at the root and while a dialog owns the overlay.
    pub fn pop(&mut self) -> Option<Entry> {
        if self.stack.is_empty() || self.stack.is_last() || self.is_top_dialog() {
            tracing::trace!(
                depth = self.stack.len(),
                dialog = self.is_top_dialog(),
                "Back ignored"
            );
            return None;
        }

        let entry = self.stack.pop()?;
        self.remove_surface(&entry.surface);
        if let Some(top) = self.stack.top_surface().cloned() {
            self.show(&top);
        }
        Some(entry)
    }

    /// Drop the whole history (switching to an unrelated feature)
    pub fn clear(&mut self) -> Vec<Entry> {
        let removed = self.stack.clear();
        for entry in &removed {
            self.remove_surface(&entry.surface);
        }
        removed
    }

    /// Bring a content surface to the front of the content layer.
    /// Dialog surfaces stay above it.
    pub fn show(&mut self, id: &SurfaceId) -> bool {
        let Some(pos) = self
            .surfaces
            .iter()
            .position(|s| &s.id == id && !s.is_dialog)
        else {
            tracing::warn!(surface = %id, "Show for unknown surface");
            return false;
        };

        let surface = self.surfaces.remove(pos);
        let first_dialog = self
            .surfaces
            .iter()
            .position(|s| s.is_dialog)
            .unwrap_or(self.surfaces.len());
        self.surfaces.insert(first_dialog, surface);
        true
    }

    /// Whether the front-most surface is a dialog
    pub fn is_top_dialog(&self) -> bool {
        self.surfaces.last().is_some_and(|s| s.is_dialog)
    }

    /// Show a dialog above the content stack. The content top keeps running.
    ///
    /// A second dialog while one is active is an invariant violation and is
    /// ignored.
    pub fn show_dialog(&mut self, surface: SurfaceId, dialog: Box<dyn Dialog>) -> bool {
        if let Some(active) = &self.dialog {
            invariant_violation(format!(
                "dialog {} shown while {} is active",
                dialog.name(),
                active.dialog.name()
            ));
            return false;
        }

        tracing::debug!(dialog = dialog.name(), surface = %surface, "Dialog shown");
        self.surfaces.push(Surface {
            id: surface.clone(),
            is_dialog: true,
        });
        self.dialog = Some(ActiveDialog { surface, dialog });
        true
    }

    /// Remove the dialog surface; input goes back to the content top
    pub fn dismiss_dialog(&mut self) -> Option<Box<dyn Dialog>> {
        let active = self.dialog.take()?;
        self.remove_surface(&active.surface);
        tracing::debug!(dialog = active.dialog.name(), "Dialog dismissed");
        Some(active.dialog)
    }

    pub fn dialog(&self) -> Option<&dyn Dialog> {
        self.dialog.as_ref().map(|d| d.dialog.as_ref())
    }

    pub fn dialog_mut(&mut self) -> Option<&mut (dyn Dialog + 'static)> {
        self.dialog.as_mut().map(|d| d.dialog.as_mut())
    }

    pub fn top(&self) -> Option<&dyn Component> {
        self.stack.top()
    }

    pub fn top_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        self.stack.top_mut()
    }

    pub fn find_mut(&mut self, surface: &SurfaceId) -> Option<&mut (dyn Component + 'static)> {
        self.stack.find_mut(surface)
    }

    /// Back to front
    #[allow(dead_code)]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    fn remove_surface(&mut self, id: &SurfaceId) {
        self.surfaces.retain(|s| &s.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::{journal, NullDialog, Stub};

    fn pages_with(names: &[&str]) -> Pages {
        let log = journal();
        let mut pages = Pages::new();
        for (i, name) in names.iter().enumerate() {
            pages.push(Entry::new(
                SurfaceId::new(name, i as u64),
                Box::new(Stub::new(name, log.clone())),
            ));
        }
        pages
    }

    fn front(pages: &Pages) -> &str {
        pages.surfaces().last().unwrap().id.as_str()
    }

    #[test]
    fn test_push_brings_surface_to_front() {
        let pages = pages_with(&["a", "b"]);
        assert_eq!(front(&pages), "b-1");
        assert!(!pages.is_top_dialog());
    }

    #[test]
    fn test_dialog_stays_on_top() {
        let mut pages = pages_with(&["a"]);
        assert!(pages.show_dialog(SurfaceId::new("confirm", 9), Box::new(NullDialog)));
        assert!(pages.is_top_dialog());

        pages.push(Entry::new(
            SurfaceId::new("b", 2),
            Box::new(Stub::new("b", journal())),
        ));
        assert!(pages.is_top_dialog());
        assert_eq!(front(&pages), "confirm-9");
        assert_eq!(pages.surfaces()[1].id.as_str(), "b-2");
    }

    #[test]
    fn test_pop_refused_at_root_and_under_dialog() {
        let mut pages = pages_with(&["a"]);
        assert!(pages.pop().is_none());
        assert_eq!(pages.stack().len(), 1);

        let mut pages = pages_with(&["a", "b"]);
        pages.show_dialog(SurfaceId::new("confirm", 9), Box::new(NullDialog));
        assert!(pages.pop().is_none());
        assert_eq!(pages.stack().len(), 2);

        pages.dismiss_dialog();
        assert!(!pages.is_top_dialog());
        assert_eq!(pages.pop().unwrap().component.name(), "b");
        assert_eq!(front(&pages), "a-0");
    }

    #[test]
    fn test_pop_on_empty_is_ignored() {
        let mut pages = Pages::new();
        assert!(pages.pop().is_none());
    }

    #[test]
    fn test_clear_removes_all_surfaces() {
        let mut pages = pages_with(&["a", "b", "c"]);
        let removed = pages.clear();
        assert_eq!(removed.len(), 3);
        assert!(pages.surfaces().is_empty());
    }

    #[test]
    fn test_dialog_does_not_stop_content() {
        let log = journal();
        let mut pages = Pages::new();
        pages.push(Entry::new(
            SurfaceId::new("a", 0),
            Box::new(Stub::new("a", log.clone())),
        ));
        pages.show_dialog(SurfaceId::new("confirm", 1), Box::new(NullDialog));
        pages.dismiss_dialog();

        assert_eq!(crate::runtime::testing::take(&log), vec!["start:a"]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "while NullDialog is active")]
    fn test_second_dialog_panics_in_debug() {
        let mut pages = pages_with(&["a"]);
        pages.show_dialog(SurfaceId::new("one", 1), Box::new(NullDialog));
        pages.show_dialog(SurfaceId::new("two", 2), Box::new(NullDialog));
    }
}
