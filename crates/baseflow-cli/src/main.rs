//! baseflow - separate baseflow from daily discharge records.

use clap::Parser;

mod commands;
mod input;

#[derive(Parser)]
#[command(
    name = "baseflow",
    version,
    about = "Baseflow separation for daily streamflow CSV files"
)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    commands::run(cli.command)
}
