//! Feature menu: the function-key panel switcher in the header
//!
//! Listens to the stack and highlights the feature whose identifier matches
//! the component on top.

use crate::config::StartPanel;
use crate::runtime::{Component, Key, RenderContext, StackListener};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::sync::{Arc, Mutex};

/// A top-level panel reachable from anywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub key: Key,
    pub title: &'static str,
    pub panel: StartPanel,
}

impl Feature {
    pub fn identifier(&self) -> &'static str {
        self.panel.as_str()
    }
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        key: Key::F(1),
        title: "Logs",
        panel: StartPanel::Logs,
    },
    Feature {
        key: Key::F(2),
        title: "Shell",
        panel: StartPanel::Shell,
    },
    Feature {
        key: Key::F(3),
        title: "Scratch",
        panel: StartPanel::Scratch,
    },
];

/// Shared handle; one clone is registered as a listener, one draws
#[derive(Clone, Default)]
pub struct Menu {
    active: Arc<Mutex<String>>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> String {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    // Panels without an identifier (detail views) keep the current highlight
    fn highlight(&self, component: &dyn Component) {
        let id = component.identifier();
        if !id.is_empty() {
            *self.active.lock().unwrap_or_else(|e| e.into_inner()) = id.to_string();
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let active = self.active();
        let lines: Vec<Line> = FEATURES
            .iter()
            .take(area.height as usize)
            .map(|feature| {
                let title_style = if feature.identifier() == active {
                    ctx.styles.menu_active
                } else {
                    ctx.styles.menu_desc
                };
                Line::from(vec![
                    Span::styled(format!("<{}>", feature.key), ctx.styles.menu_key),
                    Span::raw(" "),
                    Span::styled(format!(" {} ", feature.title), title_style),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }
}

impl StackListener for Menu {
    fn stack_pushed(&mut self, component: &dyn Component) {
        self.highlight(component);
    }

    fn stack_popped(&mut self, _removed: &dyn Component, _top: Option<&dyn Component>) {}

    fn stack_top(&mut self, component: &dyn Component) {
        self.highlight(component);
    }
}
