//! Convert-csv command - normalize a batch of raw amounts

use super::LookupArgs;
use crate::core::{DenomKind, RawAmount};
use crate::utils;
use anyhow::Context;
use clap::Args;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ConvertCsvCommand {
    /// CSV file with id,amount,denom columns. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    #[command(flatten)]
    lookup: LookupArgs,
}

/// One row of raw input
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InputRow {
    /// Optional identifier carried through to the output, e.g. a tx hash
    #[serde(default)]
    pub id: Option<String>,
    /// Raw amount in the smallest unit of the denom
    pub amount: String,
    /// On-chain denom; empty passes the amount through unchanged
    #[serde(default)]
    pub denom: Option<String>,
}

/// One row of normalized output
#[derive(Debug, Clone, Serialize)]
pub struct OutputRow {
    pub id: Option<String>,
    pub raw_amount: String,
    pub raw_denom: Option<String>,
    pub kind: Option<String>,
    pub amount: f64,
    pub currency: Option<String>,
}

pub const OUTPUT_COLUMNS: &[&str] = &[
    "id",
    "raw_amount",
    "raw_denom",
    "kind",
    "amount",
    "currency",
];

impl ConvertCsvCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rows = read_rows(self.open()?)?;
        log::info!("Read {} csv rows", rows.len());

        let output = self.lookup.with_session(|session| {
            rows.into_iter()
                .enumerate()
                .map(|(i, row)| -> anyhow::Result<OutputRow> {
                    let raw = row
                        .amount
                        .parse::<RawAmount>()
                        .with_context(|| format!("row {}", i + 1))?;
                    let result = session.amount_currency(raw, row.denom.as_deref());
                    Ok(OutputRow {
                        kind: row.denom.as_deref().map(|d| DenomKind::classify(d).to_string()),
                        id: row.id,
                        raw_amount: row.amount,
                        raw_denom: row.denom,
                        amount: result.amount,
                        currency: result.currency,
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })?;

        utils::write_csv(&output, io::stdout())
    }

    fn open(&self) -> anyhow::Result<Box<dyn Read>> {
        if self.file.as_os_str() == "-" {
            return Ok(Box::new(io::stdin()));
        }
        let file = File::open(&self.file)
            .with_context(|| format!("opening {}", self.file.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn read_rows<R: Read>(reader: R) -> anyhow::Result<Vec<InputRow>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let rows: Result<Vec<InputRow>, _> = rdr.deserialize().collect();
    Ok(rows?)
}
