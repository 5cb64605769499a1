use super::denom::IbcReference;
use super::tables;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("lookup of {reference} failed: {source}")]
    Transport {
        reference: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("unexpected status {status} looking up {reference}")]
    Status { reference: String, status: u16 },
    #[error("malformed denom trace for {reference}: {reason}")]
    Malformed { reference: String, reason: String },
}

/// Remote resolution of an IBC reference to its base denom.
///
/// `Ok(None)` means the service answered but knows no denom for the reference.
pub trait DenomLookup {
    fn ibc_address_to_denom(&self, reference: &IbcReference)
        -> Result<Option<String>, LookupError>;
}

impl<F> DenomLookup for F
where
    F: Fn(&IbcReference) -> Result<Option<String>, LookupError>,
{
    fn ibc_address_to_denom(
        &self,
        reference: &IbcReference,
    ) -> Result<Option<String>, LookupError> {
        self(reference)
    }
}

/// Memoized IBC reference -> base denom resolutions for one run.
///
/// Entries are only ever added. A `None` value records that the lookup was
/// made and returned nothing, so it is not repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IbcAddressCache {
    entries: BTreeMap<String, Option<String>>,
}

impl IbcAddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reference: &str) -> Option<&Option<String>> {
        self.entries.get(reference)
    }

    /// Record a resolution unless one already exists; returns the stored value.
    pub fn insert(&mut self, reference: String, denom: Option<String>) -> &Option<String> {
        self.entries.entry(reference).or_insert(denom)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, Option<String>> {
        &self.entries
    }
}

impl From<BTreeMap<String, Option<String>>> for IbcAddressCache {
    fn from(entries: BTreeMap<String, Option<String>>) -> Self {
        IbcAddressCache { entries }
    }
}

/// Resolve an IBC reference to its base denom.
///
/// Order: static overrides, then (only when a lookup is available) the cache,
/// then the lookup itself. Only a remote lookup writes to `cache`. Lookup
/// errors are returned as-is and leave the cache untouched.
pub fn resolve(
    lookup: Option<&dyn DenomLookup>,
    reference: &IbcReference,
    cache: &mut IbcAddressCache,
) -> Result<Option<String>, LookupError> {
    if let Some(denom) = tables::ibc_override(reference.as_str()) {
        return Ok(Some(denom.to_string()));
    }
    let Some(lookup) = lookup else {
        log::debug!("No lookup configured, cannot resolve {}", reference);
        return Ok(None);
    };
    if let Some(denom) = cache.get(reference.as_str()) {
        return Ok(denom.clone());
    }

    let denom = lookup.ibc_address_to_denom(reference)?;
    log::debug!("Resolved {} to {:?}", reference, denom);
    Ok(cache.insert(reference.to_string(), denom).clone())
}
