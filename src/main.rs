use anyhow::Context;
use api_client::{BinanceClient, MarketDataClient};
use clap::{Parser, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::settings::Config;
use core_types::SymbolRanking;
use deployer::{
    CommandRunner, DirectoryReconciler, ExecutionContext, Installation, LocalTeardown, SystemRunner, SystemTeardown,
    Systemctl,
};
use ranking::PairSelector;
use tracing::{info, warn};

/// The main entry point for the trading bot orchestrator.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Credentials may come from a .env file as TRADEBOT_API__KEY / TRADEBOT_API__SECRET.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config().context("Failed to load configuration")?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let ctx = ExecutionContext::from_env(&config.deployment)?;
    info!(
        user = %ctx.user,
        elevated = ctx.elevated,
        working_dir = %ctx.working_dir.display(),
        "Resolved execution context."
    );
    let reconciler = DirectoryReconciler::new(ctx, Systemctl::new(SystemRunner));

    // Execute the appropriate mode
    match cli.mode {
        Some(Mode::Delete) => handle_delete(&reconciler).await,
        None => {
            config.api.validate()?;
            info!("Loaded API credentials from configuration.");
            let client = BinanceClient::new(&config.api)?;
            handle_generate(&config, &client, &reconciler).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Generates, installs and starts one systemd service per top-volume trading pair.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pass `delete` to stop, disable and remove every generated service instead.
    #[arg(value_enum, ignore_case = true)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Delete,
}

// ==============================================================================
// Generate Mode
// ==============================================================================

/// Fetches market data, ranks pairs and installs one unit per ranked pair.
async fn handle_generate<C, R>(config: &Config, client: &C, reconciler: &DirectoryReconciler<R>) -> anyhow::Result<()>
where
    C: MarketDataClient + ?Sized,
    R: CommandRunner,
{
    let tickers = ranking::load_tickers(client, config.selection.policy)
        .await
        .context("Failed to fetch market data")?;

    let selector = PairSelector::from_config(&config.selection);
    let ranked = selector.select(&tickers)?;

    if ranked.is_empty() {
        info!("No {} pairs found. Exiting.", selector.quote_asset());
        return Ok(());
    }
    println!("{}", ranking_table(&ranked, selector.quote_asset()));

    let defaults = reconciler.context().unit_defaults(&config.deployment);
    let report = reconciler.install(&ranked, &defaults).await?;

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Service files generated in {}.",
        reconciler.context().working_dir.display()
    );
    if let Installation::Automatic { units, .. } = &report.installation {
        let started = units.iter().filter(|u| u.succeeded()).count();
        info!("{} of {} services running.", started, units.len());
    }
    Ok(())
}

fn ranking_table(ranked: &SymbolRanking, quote_asset: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#".to_string(), "Symbol".to_string(), format!("24h Volume ({quote_asset})")]);
    for (i, entry) in ranked.entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.symbol.clone(),
            format!("{:.2}", entry.quote_volume),
        ]);
    }
    table
}

// ==============================================================================
// Delete Mode
// ==============================================================================

async fn handle_delete<R: CommandRunner>(reconciler: &DirectoryReconciler<R>) -> anyhow::Result<()> {
    let report = reconciler.teardown().await;

    if let SystemTeardown::Processed { units, reload_ok } = &report.system {
        let failed = units.iter().filter(|u| !u.succeeded()).count();
        if failed > 0 || !reload_ok {
            warn!("{} of {} system services were not removed cleanly.", failed, units.len());
        } else {
            info!("Removed {} system services.", units.len());
        }
    }
    if let LocalTeardown::Removed { removed, failed } = &report.local {
        info!(removed = removed.len(), failed = failed.len(), "Local service files cleaned up.");
    }
    Ok(())
}
