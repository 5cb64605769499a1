//! Resolve command - look up the base denom behind an ibc reference

use super::LookupArgs;
use crate::core::{convert, IbcReference, RawAmount};
use clap::Args;

#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// IBC reference, e.g. ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2
    reference: IbcReference,

    #[command(flatten)]
    lookup: LookupArgs,
}

impl ResolveCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let denom = self
            .lookup
            .with_session(|session| Ok(session.resolve(&self.reference)?))?;

        match denom {
            Some(denom) => {
                let symbol = convert(RawAmount::default(), &denom).symbol;
                println!("{} {}", denom, symbol);
            }
            None => {
                log::warn!("Could not resolve {}", self.reference);
                println!("unresolved");
            }
        }
        Ok(())
    }
}
