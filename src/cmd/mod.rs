pub mod convert;
pub mod convert_csv;
pub mod ibc_hash;
pub mod resolve;
pub mod schema;
pub mod tables;

use crate::core::{DenomLookup, JsonFileStore, Session};
use crate::lcd::LcdClient;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// How unknown ibc denoms get resolved, shared by the converting commands
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// LCD node used to resolve ibc denoms (offline when omitted)
    #[arg(long, env = "DENOMTAX_NODE")]
    node: Option<String>,

    /// JSON file caching resolved ibc denoms between runs
    #[arg(long, env = "DENOMTAX_CACHE")]
    cache: Option<PathBuf>,

    /// Timeout for LCD requests, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

impl LookupArgs {
    fn client(&self) -> anyhow::Result<Option<LcdClient>> {
        let Some(node) = &self.node else {
            return Ok(None);
        };
        log::info!("Resolving ibc denoms with {}", node);
        let client = LcdClient::new(node, Duration::from_secs(self.timeout_secs))?;
        Ok(Some(client))
    }

    /// Run `f` in a session, loading the cache before and saving it after.
    pub fn with_session<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut Session<'_>) -> anyhow::Result<T>,
    {
        let client = self.client()?;
        let lookup = client.as_ref().map(|c| c as &dyn DenomLookup);
        let store = self.cache.as_ref().map(JsonFileStore::new);

        let mut session = match &store {
            Some(store) => {
                log::debug!("Using ibc address cache {}", store.path().display());
                Session::load(lookup, store)?
            }
            None => Session::new(lookup),
        };
        let result = f(&mut session)?;
        match &store {
            Some(store) => session.flush(store)?,
            None => log::debug!(
                "Discarding {} ibc addresses, no cache file configured",
                session.cache().len()
            ),
        }
        Ok(result)
    }
}
