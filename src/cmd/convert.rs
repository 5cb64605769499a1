//! Convert command - normalize a single raw amount and denom

use super::LookupArgs;
use crate::core::RawAmount;
use clap::Args;

#[derive(Args, Debug)]
pub struct ConvertCommand {
    /// Raw on-chain amount in the smallest unit (e.g. 1000000)
    amount: String,

    /// On-chain denom (e.g. uosmo, ibc/27394F..., gamm/pool/6). Passed through when omitted.
    denom: Option<String>,

    #[command(flatten)]
    lookup: LookupArgs,

    /// Output as JSON instead of "<amount> <currency>"
    #[arg(long)]
    json: bool,
}

impl ConvertCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let raw: RawAmount = self.amount.parse()?;
        let result = self
            .lookup
            .with_session(|session| Ok(session.amount_currency(raw, self.denom.as_deref())))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} {}",
                result.amount,
                result.currency.as_deref().unwrap_or("-")
            );
        }
        Ok(())
    }
}
