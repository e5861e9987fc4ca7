//! # Deployer
//!
//! Reconciles the bot service units on disk and in systemd with the ranked
//! symbol set.
//!
//! - `ExecutionContext`: user, home and privilege level (from the effective
//!   uid), resolved once.
//! - `CommandRunner` / `Systemctl`: the only way this crate touches the
//!   service manager, so tests can run against a fake.
//! - `DirectoryReconciler`: `install` (render, write, copy, reload, enable,
//!   start) and `teardown` (stop, disable, remove, reload), both reporting
//!   per-unit outcomes instead of stopping at the first failure.

pub mod context;
pub mod error;
pub mod install;
pub mod reconciler;
pub mod runner;
pub mod systemctl;
pub mod teardown;

#[cfg(test)]
mod testing;

pub use context::{EffectiveUser, ExecutionContext};
pub use error::DeployError;
pub use install::{InstallReport, InstallStep, Installation, SkippedUnit, UnitInstall, WrittenUnit};
pub use reconciler::DirectoryReconciler;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use systemctl::Systemctl;
pub use teardown::{LocalTeardown, SystemTeardown, TeardownReport, TeardownStep, UnitTeardown};
