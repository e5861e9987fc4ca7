use crate::reconciler::{DirectoryReconciler, list_unit_files};
use crate::runner::CommandRunner;
use std::io;
use tracing::{error, info, warn};

/// A best-effort step that failed for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStep {
    Stop,
    Disable,
    Remove,
}

/// Outcome of tearing down one installed unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTeardown {
    pub unit: String,
    pub failures: Vec<TeardownStep>,
}

impl UnitTeardown {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemTeardown {
    SkippedNotElevated,
    /// The system unit directory could not be listed.
    DirectoryUnavailable { reason: String },
    NoUnits,
    Processed { units: Vec<UnitTeardown>, reload_ok: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalTeardown {
    DirectoryMissing,
    /// The working directory exists but could not be listed.
    Unreadable { reason: String },
    NoUnits,
    Removed { removed: Vec<String>, failed: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub system: SystemTeardown,
    pub local: LocalTeardown,
}

impl<R: CommandRunner> DirectoryReconciler<R> {
    /// Removes every `tradebot_*.service` unit, from systemd when elevated
    /// and from the working directory always. Never fails; see the report.
    pub async fn teardown(&self) -> TeardownReport {
        let system = if self.ctx.elevated {
            self.teardown_system().await
        } else {
            info!("Not running as root; skipping system-level service deletion.");
            SystemTeardown::SkippedNotElevated
        };
        let local = self.teardown_local().await;

        TeardownReport { system, local }
    }

    async fn teardown_system(&self) -> SystemTeardown {
        let dir = &self.ctx.system_unit_dir;
        let names = match list_unit_files(dir).await {
            Ok(names) => names,
            Err(e) => {
                warn!("Cannot list {}: {}; nothing to remove there.", dir.display(), e);
                return SystemTeardown::DirectoryUnavailable { reason: e.to_string() };
            }
        };
        if names.is_empty() {
            info!("No tradebot services found in {}.", dir.display());
            return SystemTeardown::NoUnits;
        }

        let mut units = Vec::with_capacity(names.len());
        for unit in names {
            let mut failures = Vec::new();

            if let Err(e) = self.systemctl.stop(&unit).await {
                warn!(unit = %unit, error = %e, "Failed to stop service.");
                failures.push(TeardownStep::Stop);
            }
            if let Err(e) = self.systemctl.disable(&unit).await {
                warn!(unit = %unit, error = %e, "Failed to disable service.");
                failures.push(TeardownStep::Disable);
            }
            let path = dir.join(&unit);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => info!("Removed {}", path.display()),
                Err(e) => {
                    error!(unit = %unit, error = %e, "Failed to remove {}.", path.display());
                    failures.push(TeardownStep::Remove);
                }
            }

            units.push(UnitTeardown { unit, failures });
        }

        let reload_ok = match self.systemctl.daemon_reload().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "daemon-reload failed after removing services.");
                false
            }
        };

        SystemTeardown::Processed { units, reload_ok }
    }

    async fn teardown_local(&self) -> LocalTeardown {
        let dir = &self.ctx.working_dir;
        let names = match list_unit_files(dir).await {
            Ok(names) => names,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Working directory {} does not exist; nothing to delete.", dir.display());
                return LocalTeardown::DirectoryMissing;
            }
            Err(e) => {
                warn!("Cannot list {}: {}", dir.display(), e);
                return LocalTeardown::Unreadable { reason: e.to_string() };
            }
        };
        if names.is_empty() {
            info!("No tradebot service files found in {}.", dir.display());
            return LocalTeardown::NoUnits;
        }

        let mut removed = Vec::new();
        let mut failed = Vec::new();
        for name in names {
            let path = dir.join(&name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    info!("Deleted local service file: {}", path.display());
                    removed.push(name);
                }
                Err(e) => {
                    error!(error = %e, "Failed to delete {}.", path.display());
                    failed.push(name);
                }
            }
        }

        LocalTeardown::Removed { removed, failed }
    }
}
