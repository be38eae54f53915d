use anyhow::bail;
use clap::Parser;
use market_data::{
    cli::commands::{Cli, Commands, resolve_config, run_skips},
    models::date_range::DateRange,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Skips {
            bars,
            symbol,
            timeframe,
            from,
            to,
        } => {
            let range = DateRange::from_yyyymmdd(from, to)?;
            let report = run_skips(&config, &bars, &symbol, timeframe, range).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if let Some(reason) = report.rejection {
                bail!(reason);
            }
        }
    }

    Ok(())
}
