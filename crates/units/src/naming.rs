use core_types::{LogLayout, UnitSpec};
use std::path::{Path, PathBuf};

pub const UNIT_PREFIX: &str = "tradebot_";
pub const UNIT_SUFFIX: &str = ".service";

/// `BTCUSDC` -> `tradebot_btcusdc.service`
pub fn service_name(symbol: &str) -> String {
    format!("{}{}{}", UNIT_PREFIX, symbol.to_lowercase(), UNIT_SUFFIX)
}

/// True for file names matching `tradebot_*.service`.
pub fn is_unit_file_name(name: &str) -> bool {
    name.len() >= UNIT_PREFIX.len() + UNIT_SUFFIX.len()
        && name.starts_with(UNIT_PREFIX)
        && name.ends_with(UNIT_SUFFIX)
}

/// The glob an operator would type to address every unit in `dir`.
pub fn unit_glob(dir: &Path) -> String {
    format!("{}/{}*{}", dir.display(), UNIT_PREFIX, UNIT_SUFFIX)
}

pub fn log_path(dir: &Path, symbol: &str, layout: LogLayout) -> PathBuf {
    match layout {
        LogLayout::PerSymbol => dir.join(format!("output_{}.log", symbol.to_lowercase())),
        LogLayout::Shared => dir.join("output.log"),
    }
}

/// The per-run values every unit shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDefaults {
    pub working_directory: PathBuf,
    pub launcher: String,
    pub jar_path: PathBuf,
    pub run_as_user: String,
    pub log_layout: LogLayout,
}

impl UnitDefaults {
    pub fn spec_for(&self, symbol: &str) -> UnitSpec {
        UnitSpec {
            symbol: symbol.to_string(),
            service_name: service_name(symbol),
            working_directory: self.working_directory.display().to_string(),
            launcher: self.launcher.clone(),
            jar_path: self.jar_path.display().to_string(),
            log_path: log_path(&self.working_directory, symbol, self.log_layout)
                .display()
                .to_string(),
            run_as_user: self.run_as_user.clone(),
        }
    }
}
