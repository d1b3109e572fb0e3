// CLI module - command-line argument parsing and handlers
//
// Top-level flags tweak the dashboard for one run. The config subcommand
// manages the config file:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --update: Rewrite config with the latest layout, keeping values
// - config --path: Print the config file location

use crate::config::{Config, Overrides, StartPanel, VERSION};
use crate::runtime::ExternalCommand;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// lxz - terminal dashboard
#[derive(Parser, Debug)]
#[command(name = "lxz")]
#[command(version = VERSION)]
#[command(about = "Terminal dashboard for switching between browser panels", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Skip the splash screen
    #[arg(long)]
    pub splashless: bool,

    /// Start with the header hidden
    #[arg(long)]
    pub headless: bool,

    /// Hide destructive actions
    #[arg(long)]
    pub read_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Panel to open after startup
    #[arg(long, value_name = "NAME", value_parser = parse_panel)]
    pub panel: Option<StartPanel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn parse_panel(s: &str) -> Result<StartPanel, String> {
    StartPanel::parse(s).ok_or_else(|| format!("unknown panel '{}' (logs, shell, scratch)", s))
}

impl Cli {
    /// Flags that override the config for this run
    pub fn overrides(&self) -> Overrides {
        Overrides {
            splashless: self.splashless,
            headless: self.headless,
            read_only: self.read_only,
            log_level: self.log_level.clone(),
            panel: self.panel,
        }
    }
}

/// Handle CLI subcommands. Returns true if one was handled (exit after).
pub fn handle_cli(cli: &Cli) -> Result<bool> {
    let Some(Commands::Config {
        show,
        reset,
        edit,
        update,
        path,
    }) = &cli.command
    else {
        return Ok(false); // No subcommand, run the dashboard
    };

    if *path {
        handle_config_path()?;
    } else if *show {
        handle_config_show(&cli.overrides())?;
    } else if *reset {
        handle_config_reset()?;
    } else if *edit {
        handle_config_edit()?;
    } else if *update {
        handle_config_update()?;
    } else {
        // No flag provided, show help
        println!("Usage: lxz config [--show|--reset|--edit|--update|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --update  Update config with new defaults (preserves user values)");
        println!("  --path    Show config file path");
    }
    Ok(true)
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path (no home directory)")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show(overrides: &Overrides) -> Result<()> {
    let config = Config::load(overrides)?;

    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default().write_to(&path)?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    // Ensure config exists
    if !path.exists() {
        Config::default().write_to(&path)?;
        println!("Created new config file: {}", path.display());
    }

    let editor = ExternalCommand::editor(&path);
    println!("Opening {}", editor);

    let status = Command::new(&editor.program)
        .args(&editor.args)
        .status()
        .with_context(|| {
            format!(
                "Failed to launch editor '{}' (set $EDITOR to your preferred editor)",
                editor.program
            )
        })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

fn handle_config_update() -> Result<()> {
    update_config_file(&config_path()?)
}

fn update_config_file(path: &Path) -> Result<()> {
    if !path.exists() {
        // No existing config, just create default
        Config::default().write_to(path)?;
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    // File values only; LXZ_* overrides stay out of the rewritten file
    let existing = Config::load_from(Some(path))?;

    // Backup existing
    let backup_path = path.with_extension("toml.bak");
    match std::fs::copy(path, &backup_path) {
        Ok(_) => println!("Backup created: {}", backup_path.display()),
        Err(e) => eprintln!("Warning: Could not create backup: {}", e),
    }

    existing.write_to(path)?;
    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "lxz",
            "--splashless",
            "--read-only",
            "--log-level",
            "debug",
            "--panel",
            "scratch",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert!(overrides.splashless);
        assert!(!overrides.headless);
        assert!(overrides.read_only);
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(overrides.panel, Some(StartPanel::Scratch));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unknown_panel_rejected() {
        assert!(Cli::try_parse_from(["lxz", "--panel", "docker"]).is_err());
    }

    #[test]
    fn test_update_keeps_environment_out_of_file() {
        let dir = std::env::temp_dir().join(format!("lxz-cli-update-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[ui]\nheadless = true\n").unwrap();

        std::env::set_var("LXZ_DEFAULT_PANEL", "scratch");
        let result = update_config_file(&path);
        std::env::remove_var("LXZ_DEFAULT_PANEL");
        result.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("headless = true"));
        assert!(written.contains("default_panel = \"logs\""));
        assert!(dir.join("config.toml.bak").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["lxz", "config", "--path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config { path: true, .. })
        ));
    }
}
