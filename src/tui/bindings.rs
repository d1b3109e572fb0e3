// Global key bindings - reachable from every panel unless a local binding
// shadows them

use super::components::menu::FEATURES;
use super::dialogs::{ConfirmDialog, HelpDialog};
use super::panels::Panels;
use crate::runtime::{App, Commands, Key, KeyAction, KeyActions};

/// Build the App-level registry
pub fn global_actions(panels: &Panels) -> KeyActions<App> {
    let mut actions = KeyActions::new();

    actions.add(
        Key::Esc,
        KeyAction::new("Back", |_: &mut App, cmds: &mut Commands, _| {
            cmds.back();
            None
        })
        .shared(),
    );

    for feature in FEATURES {
        let panels = panels.clone();
        actions.add(
            feature.key,
            KeyAction::new(feature.title, move |_: &mut App, cmds: &mut Commands, _| {
                cmds.inject(panels.build(feature.panel), true);
                None
            })
            .shared(),
        );
    }

    actions.add(
        Key::Ctrl('e'),
        KeyAction::new("Toggle Header", |app: &mut App, _: &mut Commands, _| {
            let chrome = app.chrome_mut();
            chrome.show_header = !chrome.show_header;
            None
        }),
    );

    actions.add(
        Key::Char('?'),
        KeyAction::new("Help", |app: &mut App, cmds: &mut Commands, _| {
            let title = app
                .pages()
                .top()
                .map_or_else(|| "Panel".to_string(), |c| c.name().to_string());
            cmds.show_dialog(HelpDialog::new(vec![
                (title, app.hints()),
                ("General".to_string(), app.actions().shared_hints()),
            ]));
            None
        }),
    );

    actions.add(
        Key::Ctrl('c'),
        KeyAction::new("Quit", |_: &mut App, cmds: &mut Commands, _| {
            cmds.show_dialog(ConfirmDialog::new("Quit", "Quit lxz?", |cmds| cmds.quit()));
            None
        }),
    );

    actions
}
