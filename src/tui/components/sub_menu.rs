//! Sub menu: the hint grid in the header
//!
//! Hints are laid out top to bottom in columns of at most [`MAX_ROWS`].
//! Digit mnemonics get leading columns of their own so numbered choices
//! never share a column with ordinary bindings.

use crate::runtime::{MenuHint, MenuHints, RenderContext};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub const MAX_ROWS: usize = 3;

/// Gap between columns
const COLUMN_GAP: usize = 2;

/// Arrange `hints` (already in display order) into columns
pub fn columns(hints: &MenuHints, max_rows: usize) -> Vec<Vec<MenuHint>> {
    let max_rows = max_rows.max(1);
    let (digits, others): (Vec<&MenuHint>, Vec<&MenuHint>) =
        hints.iter().partition(|h| h.is_digit());

    let mut cols: Vec<Vec<MenuHint>> = Vec::new();
    for group in [digits, others] {
        for chunk in group.chunks(max_rows) {
            cols.push(chunk.iter().map(|h| (*h).clone()).collect());
        }
    }
    cols
}

fn cell_width(hint: &MenuHint) -> usize {
    // "<key> description"
    hint.mnemonic().width() + 2 + 1 + hint.description.width()
}

/// Render the hint grid, dropping trailing columns that don't fit
pub fn render(f: &mut Frame, area: Rect, hints: &MenuHints, ctx: &RenderContext) {
    let cols = columns(hints, MAX_ROWS);
    let key_widths: Vec<usize> = cols
        .iter()
        .map(|col| col.iter().map(|h| h.mnemonic().width()).max().unwrap_or(0))
        .collect();
    let widths: Vec<usize> = cols
        .iter()
        .zip(&key_widths)
        .map(|(col, key_w)| {
            col.iter()
                .map(|h| cell_width(h) + key_w - h.mnemonic().width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    // Keep as many whole columns as fit
    let mut used = 0;
    let visible = widths
        .iter()
        .take_while(|w| {
            used += *w + COLUMN_GAP;
            used <= area.width as usize + COLUMN_GAP
        })
        .count();

    let rows = (area.height as usize).min(MAX_ROWS);
    let mut lines = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut spans = Vec::new();
        for (c, col) in cols.iter().take(visible).enumerate() {
            let width = widths[c] + COLUMN_GAP;
            match col.get(row) {
                Some(hint) => {
                    let key_style = if hint.is_digit() {
                        ctx.styles.menu_digit
                    } else {
                        ctx.styles.menu_key
                    };
                    let key = format!("<{}>", hint.mnemonic());
                    let pad = key_widths[c] - hint.mnemonic().width();
                    let used_w = key.width() + pad + 1 + hint.description.width();
                    spans.push(Span::styled(key, key_style));
                    spans.push(Span::raw(" ".repeat(pad + 1)));
                    spans.push(Span::styled(hint.description.clone(), ctx.styles.menu_desc));
                    spans.push(Span::raw(" ".repeat(width.saturating_sub(used_w))));
                }
                None => spans.push(Span::raw(" ".repeat(width))),
            }
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}
