//! Breadcrumbs: one crumb per stacked component, newest last

use crate::runtime::{Component, RenderContext, StackListener};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Default)]
pub struct Crumbs {
    trail: Arc<Mutex<Vec<String>>>,
}

impl Crumbs {
    pub fn new() -> Self {
        Self::default()
    }

    fn trail(&self) -> MutexGuard<'_, Vec<String>> {
        self.trail.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn names(&self) -> Vec<String> {
        self.trail().clone()
    }

    pub fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let trail = self.names();
        let last = trail.len().saturating_sub(1);
        let mut spans = Vec::with_capacity(trail.len() * 2);
        for (i, name) in trail.iter().enumerate() {
            let style = if i == last {
                ctx.styles.crumb_active
            } else {
                ctx.styles.crumb
            };
            spans.push(Span::styled(format!(" <{}> ", name.to_lowercase()), style));
            spans.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl StackListener for Crumbs {
    fn stack_pushed(&mut self, component: &dyn Component) {
        self.trail().push(component.name().to_string());
    }

    fn stack_popped(&mut self, _removed: &dyn Component, _top: Option<&dyn Component>) {
        self.trail().pop();
    }

    fn stack_top(&mut self, _component: &dyn Component) {}
}
