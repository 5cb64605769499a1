use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

pub const IBC_PREFIX: &str = "ibc/";
pub const GAMM_PREFIX: &str = "gamm/";

const IBC_HASH_LEN: usize = 64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DenomError {
    #[error("not an ibc reference: '{0}'")]
    NotIbc(String),
    #[error("malformed ibc hash in '{0}', expected 64 uppercase hex characters")]
    MalformedHash(String),
}

/// Broad shape of an on-chain denom string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenomKind {
    /// `ibc/<hash>`, needs resolving to a base denom first
    Ibc,
    /// `gamm/pool/<N>` liquidity pool share
    Pool,
    /// Anything else, e.g. `uosmo`, `aevmos`, `stujuno`
    Native,
}

impl DenomKind {
    pub fn classify(denom: &str) -> Self {
        if denom.starts_with(IBC_PREFIX) {
            DenomKind::Ibc
        } else if denom.starts_with(GAMM_PREFIX) {
            DenomKind::Pool
        } else {
            DenomKind::Native
        }
    }
}

impl fmt::Display for DenomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DenomKind::Ibc => "ibc",
            DenomKind::Pool => "pool",
            DenomKind::Native => "native",
        };
        write!(f, "{s}")
    }
}

/// Pool number of a `gamm/pool/<N>` denom. Only exactly three segments are accepted.
pub fn pool_id(denom: &str) -> Option<&str> {
    let mut segments = denom.split('/');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some("gamm"), Some(_), Some(id), None) => Some(id),
        _ => None,
    }
}

/// A validated `ibc/<HASH>` denom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IbcReference(String);

impl IbcReference {
    pub fn parse(s: &str) -> Result<Self, DenomError> {
        let hash = s
            .strip_prefix(IBC_PREFIX)
            .ok_or_else(|| DenomError::NotIbc(s.to_string()))?;
        let well_formed = hash.len() == IBC_HASH_LEN
            && hash
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c));
        if !well_formed {
            return Err(DenomError::MalformedHash(s.to_string()));
        }
        Ok(IbcReference(s.to_string()))
    }

    /// Derive the reference a chain assigns to `base_denom` received over `path`
    /// (e.g. `transfer/channel-0`): `ibc/` + uppercase hex SHA-256 of the full trace.
    pub fn from_trace(path: &str, base_denom: &str) -> Self {
        let full_trace = if path.is_empty() {
            base_denom.to_string()
        } else {
            format!("{path}/{base_denom}")
        };
        let digest = Sha256::digest(full_trace.as_bytes());
        IbcReference(format!("{IBC_PREFIX}{}", hex::encode_upper(digest)))
    }

    pub fn hash(&self) -> &str {
        &self.0[IBC_PREFIX.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for IbcReference {
    type Err = DenomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IbcReference::parse(s)
    }
}

impl fmt::Display for IbcReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
