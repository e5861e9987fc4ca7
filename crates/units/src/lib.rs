//! Systemd unit rendering for the trading bots.
//!
//! Nothing in here touches the filesystem; callers decide where the text goes.

pub mod error;
pub mod naming;
pub mod render;

pub use error::UnitError;
pub use naming::{UnitDefaults, is_unit_file_name, log_path, service_name, unit_glob};
pub use render::{render, validate};
