mod cmd;
mod core;
mod lcd;
mod utils;

use clap::{Parser, Subcommand};
use cmd::{
    convert::ConvertCommand, convert_csv::ConvertCsvCommand, ibc_hash::IbcHashCommand,
    resolve::ResolveCommand, schema::SchemaCommand, tables::TablesCommand,
};

#[derive(Parser, Debug)]
#[command(
    name = "denomtax",
    version,
    about = "Normalize Cosmos denoms and raw amounts for tax reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a raw amount and denom into a scaled amount and symbol
    Convert(ConvertCommand),
    /// Convert a CSV of raw amounts and denoms
    ConvertCsv(ConvertCsvCommand),
    /// Resolve an ibc reference to its base denom
    Resolve(ResolveCommand),
    /// Derive the ibc reference for a base denom and channel path
    IbcHash(IbcHashCommand),
    /// Show the built-in denom override tables
    Tables(TablesCommand),
    /// Print the cache file or CSV formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(cmd) => cmd.exec(),
        Command::ConvertCsv(cmd) => cmd.exec(),
        Command::Resolve(cmd) => cmd.exec(),
        Command::IbcHash(cmd) => cmd.exec(),
        Command::Tables(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
