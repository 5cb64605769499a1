//! Schema command - print the cache file and batch csv formats

use crate::cmd::convert_csv::{InputRow, OUTPUT_COLUMNS};
use crate::core::CacheFile;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// What to print
    #[arg(value_enum, default_value = "cache")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the ibc address cache file
    Cache,
    /// JSON Schema for a convert-csv input row
    Input,
    /// CSV header row written by convert-csv
    CsvHeader,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::Cache => {
                let schema = schema_for!(CacheFile);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Input => {
                let schema = schema_for!(InputRow);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => println!("{}", OUTPUT_COLUMNS.join(",")),
        }
        Ok(())
    }
}
