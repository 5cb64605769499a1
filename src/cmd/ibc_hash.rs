//! Ibc-hash command - derive the ibc reference for a denom trace

use crate::core::IbcReference;
use clap::Args;

#[derive(Args, Debug)]
pub struct IbcHashCommand {
    /// Base denom on the source chain (e.g. uatom)
    base_denom: String,

    /// Port/channel hops the denom travelled over
    #[arg(short, long, default_value = "transfer/channel-0")]
    path: String,
}

impl IbcHashCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.base_denom.trim().is_empty() {
            anyhow::bail!("base denom cannot be empty");
        }
        let reference = IbcReference::from_trace(&self.path, &self.base_denom);
        println!("{}", reference);
        Ok(())
    }
}
