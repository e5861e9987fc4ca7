use crate::context::ExecutionContext;
use crate::runner::{CommandOutput, CommandRunner};
use async_trait::async_trait;
use core_types::{RankedSymbol, SymbolRanking};
use mockall::{Sequence, mock};
use std::io;
use std::path::Path;

mock! {
    pub Runner {}

    #[async_trait]
    impl CommandRunner for Runner {
        async fn run(&self, argv: &[String]) -> io::Result<CommandOutput>;
    }
}

/// Expects `command` as the next call in `seq` and answers with `exit_code`.
pub fn expect_command(runner: &mut MockRunner, seq: &mut Sequence, command: &str, exit_code: i32) {
    let expected = command.to_string();
    runner
        .expect_run()
        .withf(move |argv| argv.join(" ") == expected)
        .times(1)
        .in_sequence(seq)
        .returning(move |argv| {
            Ok(CommandOutput {
                exit_code: Some(exit_code),
                output: if exit_code == 0 {
                    String::new()
                } else {
                    format!("{}: failed\n", argv.join(" "))
                },
            })
        });
}

/// A runner that answers `commands` in order, each with exit code 0 unless
/// listed in `failing`. Any other call panics.
pub fn scripted(commands: &[&str], failing: &[(&str, i32)]) -> MockRunner {
    let mut runner = MockRunner::new();
    let mut seq = Sequence::new();
    for command in commands {
        let code = failing
            .iter()
            .find(|(c, _)| c == command)
            .map_or(0, |(_, code)| *code);
        expect_command(&mut runner, &mut seq, command, code);
    }
    runner
}

/// A context rooted in a scratch directory: `<root>/trader_bots` for the
/// units and `<root>/system` standing in for the systemd unit directory.
pub fn context(root: &Path, elevated: bool) -> ExecutionContext {
    ExecutionContext {
        user: "alice".to_string(),
        home: root.to_path_buf(),
        elevated,
        working_dir: root.join("trader_bots"),
        system_unit_dir: root.join("system"),
    }
}

pub fn ranking(symbols: &[&str]) -> SymbolRanking {
    SymbolRanking {
        entries: symbols
            .iter()
            .enumerate()
            .map(|(i, s)| RankedSymbol {
                symbol: s.to_string(),
                quote_volume: (symbols.len() - i) as f64 * 1000.0,
            })
            .collect(),
    }
}
