// Terminal ownership - raw mode and the alternate screen
//
// The guard restores the terminal when dropped, so an early return or a
// panic unwinding through run_tui never leaves the shell in raw mode.

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Raw mode + alternate screen currently in effect
    active: bool,
}

impl Tui {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to setup terminal");
        }
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal
            .draw(render)
            .context("Failed to draw terminal")?;
        Ok(())
    }

    /// Hand the terminal back to the shell. Idempotent.
    pub fn release(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }

    /// Take the terminal back after an external process exits
    pub fn reclaim(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)
            .context("Failed to setup terminal")?;
        self.active = true;
        // Whatever the process printed is not ours to diff against
        self.terminal.clear().context("Failed to clear terminal")?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!("Terminal restore failed: {:#}", e);
        }
    }
}
