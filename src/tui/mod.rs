// TUI module - Terminal User Interface
//
// This module hosts the runtime on a real terminal. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, queued updates)
// - Splash hand-off to the root panel
// - Suspending for external processes (shell, editor)

pub mod bindings;
pub mod components;
pub mod dialogs;
pub mod panels;
pub mod styles;
pub mod terminal;
pub mod ui;

use crate::config::{Config, StartPanel, VERSION};
use crate::logging::LogBuffer;
use crate::runtime::queue;
use crate::runtime::{
    App, ExternalCommand, Flash, FlashSink, QueueError, UpdateQueue, UpdateSender,
};
use anyhow::{Context, Result};
use components::{crumbs::Crumbs, menu::Menu};
use crossterm::event::{self, Event, KeyEventKind};
use panels::Panels;
use std::sync::Arc;
use std::time::Duration;
use styles::Styles;
use terminal::Tui;
use ui::Screen;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and cleans up when done.
/// A root panel that cannot start is returned as an error.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let flash = Flash::new(config.ui.flash_duration());
    let (updates, mut queue) =
        queue::channel::<App>(config.queue.capacity, config.queue.send_timeout());
    let mut app = App::new(updates.clone(), Arc::new(flash.clone()));
    app.chrome_mut().show_header = !config.ui.headless;
    app.set_read_only(config.ui.read_only);

    let menu = Menu::new();
    let crumbs = Crumbs::new();
    app.add_listener(Box::new(menu.clone()));
    app.add_listener(Box::new(crumbs.clone()));

    let panels = Panels::new(log_buffer, config.ui.refresh_rate(), Config::config_path());
    app.add_actions(&bindings::global_actions(&panels));

    let screen = Screen {
        styles: Styles::default(),
        menu,
        crumbs,
        flash,
        no_icons: config.ui.no_icons,
    };

    tracing::info!(
        version = VERSION,
        panel = config.ui.default_panel.as_str(),
        "Starting dashboard"
    );

    let mut tui = Tui::enter()?;

    let root = config.ui.default_panel;
    if config.ui.splashless {
        app.launch(panels.build(root));
    } else {
        tokio::spawn(leave_splash(updates, panels, root, config.ui.splash_delay()));
    }

    let result = run_event_loop(
        &mut tui,
        &mut app,
        &mut queue,
        &screen,
        config.ui.refresh_rate(),
    )
    .await;

    app.shutdown();
    tui.release()?;
    result?;

    if let Some(err) = app.take_fatal() {
        return Err(err).context("Nothing to display");
    }
    tracing::info!("Dashboard closed");
    Ok(())
}

/// Keep the splash up for `delay`, then ask the UI task to show the root
async fn leave_splash(
    updates: UpdateSender<App>,
    panels: Panels,
    root: StartPanel,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;
    loop {
        let panels = panels.clone();
        match updates
            .queue(move |app: &mut App| app.launch(panels.build(root)))
            .await
        {
            Ok(()) | Err(QueueError::Closed) => return,
            Err(e) => tracing::warn!("Splash hand-off delayed: {}", e),
        }
    }
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input, routed through the App
/// 2. Timer ticks, so expiring flashes and spinners redraw
/// 3. Queued updates from workers, applied in order
async fn run_event_loop(
    tui: &mut Tui,
    app: &mut App,
    queue: &mut UpdateQueue<App>,
    screen: &Screen,
    refresh: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(refresh);

    loop {
        tui.draw(|f| ui::draw(f, app, screen))?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        // Release/repeat events would double-fire bindings.
                        // The splash takes no input.
                        Ok(Event::Key(key_event))
                            if key_event.kind == KeyEventKind::Press && !app.chrome().splash =>
                        {
                            app.handle_key(key_event);
                        }
                        Ok(_) => {}
                        Err(e) => tracing::warn!("Failed to read terminal event: {}", e),
                    }
                }
            } => {}

            _ = tick_interval.tick() => {}

            Some(update) = queue.recv() => queue.apply(app, update),
        }
        queue.drain(app);

        if let Some(command) = app.take_suspend() {
            let flash = Arc::clone(app.flash());
            run_external(tui, queue, &flash, command).await?;
        }

        if !app.is_running() {
            break;
        }
    }

    Ok(())
}

/// Give the terminal to `command` until it exits.
///
/// Updates queued meanwhile are held back and applied on return. Only
/// failing to take the terminal back is an error.
async fn run_external(
    tui: &mut Tui,
    queue: &mut UpdateQueue<App>,
    flash: &Arc<dyn FlashSink>,
    command: ExternalCommand,
) -> Result<()> {
    queue.suspend();
    tracing::info!(command = %command, "Suspending for external command");

    let outcome = match tui.release() {
        Ok(()) => tokio::process::Command::new(&command.program)
            .args(&command.args)
            .status()
            .await
            .with_context(|| format!("Could not run {}", command.program)),
        Err(e) => Err(e),
    };

    tui.reclaim()?;
    queue.resume();

    match outcome {
        Ok(status) if status.success() => {
            tracing::info!(command = %command, "External command finished");
        }
        Ok(status) => {
            tracing::warn!(command = %command, %status, "External command failed");
            flash.warn(format!("{} exited with {}", command.program, status));
        }
        Err(e) => {
            tracing::error!("Exec failed: {:#}", e);
            flash.err(format!("Exec failed: {:#}", e));
        }
    }
    Ok(())
}
