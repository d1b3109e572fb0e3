//! Flash bar: the latest live flash message, bottom of the screen

use crate::runtime::{Flash, RenderContext};
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};

pub fn render(f: &mut Frame, area: Rect, flash: &Flash, ctx: &RenderContext) {
    let Some(message) = flash.current() else {
        return;
    };

    let text = if ctx.no_icons {
        format!(" {}", message.text)
    } else {
        format!(" {} {}", message.level.icon(), message.text)
    };
    let line = Span::styled(text, ctx.styles.flash(message.level));
    f.render_widget(Paragraph::new(line), area);
}
