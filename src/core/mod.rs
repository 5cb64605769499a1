pub mod amount;
pub mod denom;
pub mod normalize;
pub mod resolver;
pub mod session;
pub mod store;
pub mod tables;

// Flat public surface for domain types and functions.
#[allow(unused_imports)]
pub use amount::{AmountError, RawAmount};
#[allow(unused_imports)]
pub use denom::{DenomError, DenomKind, IbcReference};
#[allow(unused_imports)]
pub use normalize::{
    amount_currency_from_raw, convert, try_amount_currency_from_raw, AmountCurrency,
    ConversionError, Converted,
};
#[allow(unused_imports)]
pub use resolver::{resolve, DenomLookup, IbcAddressCache, LookupError};
pub use session::Session;
#[allow(unused_imports)]
pub use store::{CacheFile, CacheStore, JsonFileStore, StoreError};
pub use tables::{CURRENCY_RAW_MAP, IBC_ADDRESSES_TO_DENOM};
