use crate::context::ExecutionContext;
use crate::runner::CommandRunner;
use crate::systemctl::Systemctl;
use std::io;
use std::path::Path;

/// Makes the unit files on disk, and the units systemd knows about, match
/// the desired set of bots.
///
/// Every filesystem operation and every `systemctl` call is awaited before the
/// next one starts. Per-unit failures are logged and collected into the
/// returned report; only failures that leave nothing useful to do are errors.
pub struct DirectoryReconciler<R> {
    pub(crate) ctx: ExecutionContext,
    pub(crate) systemctl: Systemctl<R>,
}

impl<R: CommandRunner> DirectoryReconciler<R> {
    pub fn new(ctx: ExecutionContext, systemctl: Systemctl<R>) -> Self {
        Self { ctx, systemctl }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }
}

/// Names of `tradebot_*.service` entries in `dir`, sorted.
pub(crate) async fn list_unit_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if let Some(name) = entry.file_name().to_str() {
            if units::is_unit_file_name(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
