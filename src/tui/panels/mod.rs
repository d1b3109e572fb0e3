// Panels - the components the feature menu switches between

pub mod log_detail;
pub mod logs;
pub mod scratch;
pub mod shell;

use crate::config::StartPanel;
use crate::logging::LogBuffer;
use crate::runtime::Component;
use std::path::PathBuf;
use std::time::Duration;

pub use logs::LogsPanel;
pub use scratch::ScratchPanel;
pub use shell::ShellPanel;

/// Builds fresh panel instances; cheap to clone into key handlers
#[derive(Clone)]
pub struct Panels {
    logs: LogBuffer,
    refresh: Duration,
    config_path: Option<PathBuf>,
}

impl Panels {
    pub fn new(logs: LogBuffer, refresh: Duration, config_path: Option<PathBuf>) -> Self {
        Self {
            logs,
            refresh,
            config_path,
        }
    }

    pub fn build(&self, panel: StartPanel) -> Box<dyn Component> {
        match panel {
            StartPanel::Logs => Box::new(LogsPanel::new(self.logs.clone(), self.refresh)),
            StartPanel::Shell => Box::new(ShellPanel::new(self.config_path.clone())),
            StartPanel::Scratch => Box::new(ScratchPanel::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_identifier() {
        let panels = Panels::new(LogBuffer::new(), Duration::from_millis(100), None);
        for panel in [StartPanel::Logs, StartPanel::Shell, StartPanel::Scratch] {
            assert_eq!(panels.build(panel).identifier(), panel.as_str());
        }
    }
}
