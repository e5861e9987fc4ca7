use crate::error::DeployError;
use crate::runner::CommandRunner;

/// Thin adapter over `systemctl` that turns exit codes into errors.
pub struct Systemctl<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> Systemctl<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            program: "systemctl".to_string(),
        }
    }

    pub async fn daemon_reload(&self) -> Result<(), DeployError> {
        self.invoke(&["daemon-reload"]).await
    }

    pub async fn enable(&self, unit: &str) -> Result<(), DeployError> {
        self.invoke(&["enable", unit]).await
    }

    pub async fn start(&self, unit: &str) -> Result<(), DeployError> {
        self.invoke(&["start", unit]).await
    }

    pub async fn stop(&self, unit: &str) -> Result<(), DeployError> {
        self.invoke(&["stop", unit]).await
    }

    pub async fn disable(&self, unit: &str) -> Result<(), DeployError> {
        self.invoke(&["disable", unit]).await
    }

    async fn invoke(&self, args: &[&str]) -> Result<(), DeployError> {
        let argv: Vec<String> = std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();
        let command = argv.join(" ");

        let out = self.runner.run(&argv).await.map_err(|source| DeployError::Spawn {
            command: command.clone(),
            source,
        })?;

        for line in out.output.lines() {
            tracing::info!(target: "systemctl", "{}", line);
        }

        if out.success() {
            Ok(())
        } else {
            Err(DeployError::CommandFailed {
                command,
                exit_code: out.exit_code,
                output: out.output,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockRunner, scripted};
    use std::io;

    #[tokio::test]
    async fn builds_expected_command_lines() {
        let runner = scripted(
            &[
                "systemctl daemon-reload",
                "systemctl enable tradebot_btcusdc.service",
                "systemctl stop tradebot_btcusdc.service",
            ],
            &[],
        );
        let systemctl = Systemctl::new(runner);

        systemctl.daemon_reload().await.unwrap();
        systemctl.enable("tradebot_btcusdc.service").await.unwrap();
        systemctl.stop("tradebot_btcusdc.service").await.unwrap();
    }

    #[tokio::test]
    async fn non_zero_exit_becomes_command_failed() {
        let runner = scripted(
            &["systemctl start tradebot_ethusdc.service"],
            &[("systemctl start tradebot_ethusdc.service", 5)],
        );
        let systemctl = Systemctl::new(runner);

        let err = systemctl.start("tradebot_ethusdc.service").await.unwrap_err();
        match err {
            DeployError::CommandFailed {
                command,
                exit_code,
                output,
            } => {
                assert_eq!(command, "systemctl start tradebot_ethusdc.service");
                assert_eq!(exit_code, Some(5));
                assert_eq!(output, "systemctl start tradebot_ethusdc.service: failed\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() {
        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "no such program")));
        let systemctl = Systemctl::new(runner);

        let err = systemctl.daemon_reload().await.unwrap_err();
        assert!(matches!(err, DeployError::Spawn { ref command, .. } if command == "systemctl daemon-reload"));
    }
}
