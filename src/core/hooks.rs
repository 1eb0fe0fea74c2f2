//! External side channels: regenerate the deposit summary before reading it,
//! and tell the server to reload ServerInfo after writing.
//!
//! Both are optional shell commands. Their outcome is logged and never changes
//! the result of the update.

use std::io;
use std::process::{Child, Command, ExitStatus};

/// Shell commands run around an update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hooks {
    /// Regenerates `DepositBoxSummary.json`. Awaited before the summary is read.
    pub regenerate: Option<String>,
    /// Reloads the ServerInfo plugin. Spawned after a successful write, not awaited.
    pub reload: Option<String>,
}

fn shell(command: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

fn run(command: &str) -> io::Result<ExitStatus> {
    shell(command).status()
}

fn spawn(command: &str) -> io::Result<Child> {
    shell(command).spawn()
}

impl Hooks {
    pub fn regenerate_summary(&self) {
        let Some(command) = self.regenerate.as_deref() else {
            log::debug!("No regenerate command configured");
            return;
        };
        match run(command) {
            Ok(status) if status.success() => log::info!("Regenerated deposit summary"),
            Ok(status) => log::warn!("Regenerate command exited with {}", status),
            Err(e) => log::warn!("Regenerate command failed to start: {}", e),
        }
    }

    pub fn trigger_reload(&self) {
        let Some(command) = self.reload.as_deref() else {
            log::debug!("No reload command configured");
            return;
        };
        match spawn(command) {
            Ok(child) => log::info!("Reload triggered (pid {})", child.id()),
            Err(e) => log::warn!("Reload command failed to start: {}", e),
        }
    }
}
