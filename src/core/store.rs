use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub type IbcAddresses = BTreeMap<String, Option<String>>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cache file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cache file {} is not valid: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Persistence for resolved IBC addresses between runs.
pub trait CacheStore {
    fn get_ibc_addresses(&self) -> Result<IbcAddresses, StoreError>;
    fn set_ibc_addresses(&self, addresses: &IbcAddresses) -> Result<(), StoreError>;
}

/// On-disk format of [`JsonFileStore`]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheFile {
    /// When the cache was last written
    pub updated_at: DateTime<Utc>,
    /// IBC reference -> base denom, `null` when the LCD knew no denom
    #[serde(default)]
    pub ibc_addresses: IbcAddresses,
}

/// Cache kept in a single JSON file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl CacheStore for JsonFileStore {
    fn get_ibc_addresses(&self) -> Result<IbcAddresses, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No cache file at {}", self.path.display());
                return Ok(IbcAddresses::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };
        let cache: CacheFile =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| self.json_error(e))?;
        Ok(cache.ibc_addresses)
    }

    fn set_ibc_addresses(&self, addresses: &IbcAddresses) -> Result<(), StoreError> {
        let cache = CacheFile {
            updated_at: Utc::now(),
            ibc_addresses: addresses.clone(),
        };
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &cache).map_err(|e| self.json_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;
        Ok(())
    }
}
