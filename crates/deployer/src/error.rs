use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Cannot resolve the execution environment: {0}")]
    Environment(String),

    #[error("Failed to create working directory {path}: {source}")]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Command '{command}' failed with exit code {}",
        .exit_code.map_or_else(|| "<killed by signal>".to_string(), |c| c.to_string())
    )]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },
}
