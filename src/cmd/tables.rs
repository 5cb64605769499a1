//! Tables command - show the built-in denom overrides

use crate::core::{CURRENCY_RAW_MAP, IBC_ADDRESSES_TO_DENOM};
use clap::Args;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct TablesCommand {}

#[derive(Debug, Clone, Tabled)]
struct IbcOverrideRow {
    #[tabled(rename = "IBC Reference")]
    reference: &'static str,
    #[tabled(rename = "Denom")]
    denom: &'static str,
}

#[derive(Debug, Clone, Tabled)]
struct CurrencyOverrideRow {
    #[tabled(rename = "Raw Denom")]
    raw: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "Exponent")]
    exponent: u32,
}

impl TablesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let ibc_rows = IBC_ADDRESSES_TO_DENOM
            .iter()
            .map(|&(reference, denom)| IbcOverrideRow { reference, denom });
        let currency_rows = CURRENCY_RAW_MAP
            .iter()
            .map(|&(raw, entry)| CurrencyOverrideRow {
                raw,
                symbol: entry.symbol,
                exponent: entry.exponent,
            });

        println!();
        println!("IBC OVERRIDES");
        println!();
        let table = Table::new(ibc_rows).with(Style::rounded()).to_string();
        println!("{}", table);
        println!();
        println!("CURRENCY OVERRIDES");
        println!();
        let table = Table::new(currency_rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}
