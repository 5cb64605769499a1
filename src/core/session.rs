use super::amount::RawAmount;
use super::denom::IbcReference;
use super::normalize::{self, AmountCurrency};
use super::resolver::{self, DenomLookup, IbcAddressCache, LookupError};
use super::store::{CacheStore, StoreError};

/// One wallet-history run: an optional lookup plus the cache it fills.
///
/// Load the cache from a store at the start, convert, then [`Session::flush`]
/// so later runs skip the lookups already made.
pub struct Session<'a> {
    lookup: Option<&'a dyn DenomLookup>,
    cache: IbcAddressCache,
}

impl<'a> Session<'a> {
    pub fn new(lookup: Option<&'a dyn DenomLookup>) -> Self {
        Session {
            lookup,
            cache: IbcAddressCache::new(),
        }
    }

    pub fn load(
        lookup: Option<&'a dyn DenomLookup>,
        store: &dyn CacheStore,
    ) -> Result<Self, StoreError> {
        let cache = IbcAddressCache::from(store.get_ibc_addresses()?);
        if cache.is_empty() {
            log::debug!("Starting with an empty ibc address cache");
        } else {
            log::info!("Loaded {} ibc addresses from cache", cache.len());
        }
        Ok(Session { lookup, cache })
    }

    pub fn amount_currency(&mut self, raw: RawAmount, currency: Option<&str>) -> AmountCurrency {
        normalize::amount_currency_from_raw(raw, currency, self.lookup, &mut self.cache)
    }

    pub fn resolve(&mut self, reference: &IbcReference) -> Result<Option<String>, LookupError> {
        resolver::resolve(self.lookup, reference, &mut self.cache)
    }

    pub fn cache(&self) -> &IbcAddressCache {
        &self.cache
    }

    pub fn flush(&self, store: &dyn CacheStore) -> Result<(), StoreError> {
        store.set_ibc_addresses(self.cache.entries())?;
        log::info!("Saved {} ibc addresses to cache", self.cache.len());
        Ok(())
    }
}
