use crate::context::ExecutionContext;
use crate::error::DeployError;
use crate::reconciler::DirectoryReconciler;
use crate::runner::CommandRunner;
use core_types::SymbolRanking;
use std::path::PathBuf;
use tracing::{error, info, warn};
use units::UnitDefaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    Copy,
    Enable,
    Start,
}

/// Outcome of installing one unit into systemd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInstall {
    pub unit: String,
    pub failures: Vec<InstallStep>,
}

impl UnitInstall {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A unit file that made it into the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenUnit {
    pub symbol: String,
    pub unit: String,
    pub path: PathBuf,
}

/// A ranked symbol whose unit file could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUnit {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Installation {
    /// Not elevated: nothing was installed, the operator has to run these.
    Manual { instructions: String },
    /// Elevated: units were copied, reloaded, enabled and started.
    Automatic { reload_ok: bool, units: Vec<UnitInstall> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub written: Vec<WrittenUnit>,
    pub skipped: Vec<SkippedUnit>,
    pub installation: Installation,
}

impl<R: CommandRunner> DirectoryReconciler<R> {
    /// Writes one unit file per ranked symbol and, when elevated, installs them.
    ///
    /// Only a working directory that cannot be created is fatal.
    pub async fn install(
        &self,
        ranking: &SymbolRanking,
        defaults: &UnitDefaults,
    ) -> Result<InstallReport, DeployError> {
        // 1. Working directory
        self.ensure_working_dir().await?;

        // 2. Unit files
        let (written, skipped) = self.write_units(ranking, defaults).await;

        // 3./4. System installation or instructions
        let installation = if self.ctx.elevated {
            self.install_into_system(&written).await
        } else {
            let instructions = manual_instructions(&self.ctx, &written, defaults);
            warn!(
                "Not running as root. Services generated but not installed. \
                 Run this program with sudo for automatic installation."
            );
            info!("To install and run manually:\n{}", instructions);
            Installation::Manual { instructions }
        };

        Ok(InstallReport {
            written,
            skipped,
            installation,
        })
    }

    async fn ensure_working_dir(&self) -> Result<(), DeployError> {
        let dir = &self.ctx.working_dir;
        let existed = tokio::fs::metadata(dir).await.is_ok();

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| DeployError::WorkingDirectory {
                path: dir.clone(),
                source,
            })?;

        if !existed {
            info!("Created working directory: {}", dir.display());
        }
        Ok(())
    }

    async fn write_units(
        &self,
        ranking: &SymbolRanking,
        defaults: &UnitDefaults,
    ) -> (Vec<WrittenUnit>, Vec<SkippedUnit>) {
        let mut written = Vec::new();
        let mut skipped = Vec::new();

        for symbol in ranking.symbols() {
            let spec = defaults.spec_for(symbol);
            let text = match units::render(&spec) {
                Ok(text) => text,
                Err(e) => {
                    error!(symbol, error = %e, "Cannot render service file; skipping.");
                    skipped.push(SkippedUnit {
                        symbol: symbol.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let path = self.ctx.working_dir.join(&spec.service_name);
            match tokio::fs::write(&path, text).await {
                Ok(()) => {
                    info!("Generated service file: {}", path.display());
                    written.push(WrittenUnit {
                        symbol: spec.symbol,
                        unit: spec.service_name,
                        path,
                    });
                }
                Err(e) => {
                    error!(symbol, error = %e, "Failed to write {}; skipping.", path.display());
                    skipped.push(SkippedUnit {
                        symbol: symbol.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        (written, skipped)
    }

    async fn install_into_system(&self, written: &[WrittenUnit]) -> Installation {
        let mut units = Vec::with_capacity(written.len());

        for w in written {
            let target = self.ctx.system_unit_dir.join(&w.unit);
            let failures = match tokio::fs::copy(&w.path, &target).await {
                Ok(_) => Vec::new(),
                Err(e) => {
                    error!(unit = %w.unit, error = %e, "Failed to copy into {}.", target.display());
                    vec![InstallStep::Copy]
                }
            };
            units.push(UnitInstall {
                unit: w.unit.clone(),
                failures,
            });
        }

        let reload_ok = match self.systemctl.daemon_reload().await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "daemon-reload failed.");
                false
            }
        };

        for unit in units.iter_mut().filter(|u| u.succeeded()) {
            if let Err(e) = self.systemctl.enable(&unit.unit).await {
                error!(unit = %unit.unit, error = %e, "Failed to enable service.");
                unit.failures.push(InstallStep::Enable);
            }
            if let Err(e) = self.systemctl.start(&unit.unit).await {
                error!(unit = %unit.unit, error = %e, "Failed to start service.");
                unit.failures.push(InstallStep::Start);
            }
        }

        let failed = units.iter().filter(|u| !u.succeeded()).count();
        if failed == 0 && reload_ok {
            info!("Services installed, enabled, and started automatically.");
        } else {
            warn!("{} of {} services did not install cleanly; see errors above.", failed, units.len());
        }
        info!("Monitor with: systemctl status tradebot_<symbol>.service (run as sudo if needed)");

        Installation::Automatic { reload_ok, units }
    }
}

/// The exact commands an operator has to run to do what an elevated run would.
pub fn manual_instructions(ctx: &ExecutionContext, written: &[WrittenUnit], defaults: &UnitDefaults) -> String {
    let mut lines = vec![
        format!(
            "sudo cp {} {}/",
            units::unit_glob(&ctx.working_dir),
            ctx.system_unit_dir.display()
        ),
        "sudo systemctl daemon-reload".to_string(),
    ];
    for w in written {
        lines.push(format!("sudo systemctl enable {}", w.unit));
        lines.push(format!("sudo systemctl start {}", w.unit));
    }
    lines.push("Monitor with: sudo systemctl status tradebot_<symbol>.service".to_string());
    lines.push(format!(
        "Logs in: {}",
        units::log_path(&ctx.working_dir, "<symbol>", defaults.log_layout).display()
    ));
    lines.join("\n")
}
