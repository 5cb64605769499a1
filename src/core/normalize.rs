use super::amount::RawAmount;
use super::denom::{self, DenomError, DenomKind, IbcReference, GAMM_PREFIX};
use super::resolver::{self, DenomLookup, IbcAddressCache, LookupError};
use super::tables;
use serde::Serialize;

pub const UNKNOWN_PREFIX: &str = "unknown_";

const STAKED_PREFIX: &str = "st";
const DEFAULT_EXPONENT: u32 = 6;
const WEI_SUFFIX: &str = "-wei";
const WEI_EXPONENT: u32 = 18;

/// Unit prefixes, tested in this order. `nano` must come before `n`.
const UNIT_PREFIXES: &[(&str, u32)] = &[("a", 18), ("nano", 9), ("n", 9), ("u", 6)];

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Denom(#[from] DenomError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("no denom found for {reference}")]
    Unresolved {
        reference: String,
        /// What the resolver returned, `Some("")` for an empty answer
        denom: Option<String>,
    },
}

impl ConversionError {
    /// Base denom obtained before the conversion failed, if any.
    pub fn denom(&self) -> Option<&str> {
        match self {
            ConversionError::Unresolved { denom, .. } => denom.as_deref(),
            ConversionError::Denom(_) | ConversionError::Lookup(_) => None,
        }
    }
}

/// Scaled amount and display symbol for a known denom.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub amount: f64,
    pub symbol: String,
}

impl Converted {
    fn new(amount: f64, symbol: impl Into<String>) -> Self {
        Converted {
            amount,
            symbol: symbol.into(),
        }
    }
}

/// Result of the top-level conversion. `currency` is `None` only when the
/// input had no currency, in which case `amount` is the raw value untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountCurrency {
    pub amount: f64,
    pub currency: Option<String>,
}

impl From<Converted> for AmountCurrency {
    fn from(converted: Converted) -> Self {
        AmountCurrency {
            amount: converted.amount,
            currency: Some(converted.symbol),
        }
    }
}

/// Convert a raw amount and on-chain currency, falling back to
/// `unknown_<currency>` when an IBC reference cannot be converted.
///
/// Never fails: any error on the IBC path is logged as a warning and replaced
/// with `raw / 10^6`.
pub fn amount_currency_from_raw(
    raw: RawAmount,
    currency: Option<&str>,
    lookup: Option<&dyn DenomLookup>,
    cache: &mut IbcAddressCache,
) -> AmountCurrency {
    match try_amount_currency_from_raw(raw, currency, lookup, cache) {
        Ok(converted) => converted,
        Err(err) => {
            // only the ibc path returns errors, so there is always a currency
            let currency = currency.unwrap_or_default();
            log::warn!(
                "Unable to find symbol for ibc address {}, denom={:?}, error={}",
                currency,
                err.denom(),
                err
            );
            AmountCurrency {
                amount: raw.scale(DEFAULT_EXPONENT),
                currency: Some(format!("{UNKNOWN_PREFIX}{currency}")),
            }
        }
    }
}

/// Same as [`amount_currency_from_raw`] but returns IBC failures to the caller.
pub fn try_amount_currency_from_raw(
    raw: RawAmount,
    currency: Option<&str>,
    lookup: Option<&dyn DenomLookup>,
    cache: &mut IbcAddressCache,
) -> Result<AmountCurrency, ConversionError> {
    let Some(currency) = currency else {
        return Ok(AmountCurrency {
            amount: raw.value(),
            currency: None,
        });
    };

    let converted = match DenomKind::classify(currency) {
        DenomKind::Ibc => {
            let reference = IbcReference::parse(currency)?;
            match resolver::resolve(lookup, &reference, cache)? {
                Some(denom) if !denom.is_empty() => convert(raw, &denom),
                denom => {
                    return Err(ConversionError::Unresolved {
                        reference: currency.to_string(),
                        denom,
                    })
                }
            }
        }
        DenomKind::Pool | DenomKind::Native => convert(raw, currency),
    };
    Ok(converted.into())
}

/// Scale `raw` and derive a display symbol from a (non-IBC) denom.
///
/// Rules, first match wins: the override table, `gamm/pool/N`, `-wei` suffix,
/// the `a`/`nano`/`n`/`u` unit prefixes, then `st` which strips itself and
/// starts over, prefixing the final symbol with `st`. Anything else becomes
/// `unknown_<currency>` at the default 10^6 scale and is logged as an error.
///
/// A leading `a`, `n` or `u` is trusted blindly, so e.g. `atom` scales as
/// atto-`TOM`.
pub fn convert(raw: RawAmount, currency: &str) -> Converted {
    let mut rest = currency;
    let mut staked = 0;
    loop {
        if let Some(converted) = convert_structural(raw, rest) {
            return Converted {
                symbol: format!("{}{}", STAKED_PREFIX.repeat(staked), converted.symbol),
                ..converted
            };
        }
        match rest.strip_prefix(STAKED_PREFIX) {
            Some(inner) if !inner.is_empty() => {
                staked += 1;
                rest = inner;
            }
            _ => break,
        }
    }

    log::error!(
        "No conversion rule for amount_raw={}, currency_raw={}",
        raw,
        currency
    );
    Converted::new(
        raw.scale(DEFAULT_EXPONENT),
        format!("{}{UNKNOWN_PREFIX}{rest}", STAKED_PREFIX.repeat(staked)),
    )
}

fn convert_structural(raw: RawAmount, currency: &str) -> Option<Converted> {
    if let Some(entry) = tables::currency_override(currency) {
        return Some(Converted::new(raw.scale(entry.exponent), entry.symbol));
    }
    if currency.starts_with(GAMM_PREFIX) {
        return denom::pool_id(currency)
            .map(|id| Converted::new(raw.scale(WEI_EXPONENT), format!("GAMM-{id}")));
    }
    if let Some(stem) = currency.strip_suffix(WEI_SUFFIX) {
        return Some(Converted::new(raw.scale(WEI_EXPONENT), stem.to_uppercase()));
    }
    UNIT_PREFIXES.iter().find_map(|(prefix, exponent)| {
        currency
            .strip_prefix(prefix)
            .map(|stem| Converted::new(raw.scale(*exponent), stem.to_uppercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::CURRENCY_RAW_MAP;
    use log::Level;
    use std::cell::{Cell, RefCell};
    use std::sync::Once;

    const ATOM: &str = "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2";
    const CRO_OVERRIDE: &str =
        "ibc/E6931F78057F7CC5DA0FD6CEF82FF39373A6E0452BF1FD76910B93292CF356C1";

    fn raw(value: u64) -> RawAmount {
        RawAmount::from(value)
    }

    fn converted(amount: f64, symbol: &str) -> Converted {
        Converted::new(amount, symbol)
    }

    fn resolves_to(
        denom: &'static str,
    ) -> impl Fn(&IbcReference) -> Result<Option<String>, LookupError> {
        move |_| Ok(Some(denom.to_string()))
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
    }

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    /// Records log lines per thread so parallel tests don't see each other.
    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            RECORDS.with(|records| {
                records
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT_LOGGER: Once = Once::new();

    fn captured_logs(f: impl FnOnce()) -> Vec<(Level, String)> {
        INIT_LOGGER.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
        RECORDS.with(|records| records.borrow_mut().clear());
        f();
        RECORDS.with(|records| records.take())
    }

    #[test]
    fn micro_prefix() {
        assert_eq!(convert(raw(1_000_000), "uosmo"), converted(1.0, "OSMO"));
        assert_eq!(convert(raw(2_500_000), "ujuno"), converted(2.5, "JUNO"));
    }

    #[test]
    fn atto_prefix() {
        assert_eq!(convert(raw(1), "aevmos"), converted(1e-18, "EVMOS"));
    }

    #[test]
    fn nano_prefixes() {
        assert_eq!(
            convert(raw(3_000_000_000), "nanolike"),
            converted(3.0, "LIKE")
        );
        assert_eq!(convert(raw(1_000_000_000), "nstars"), converted(1.0, "STARS"));
    }

    #[test]
    fn wei_suffix() {
        assert_eq!(
            convert(raw(2_000_000_000_000_000_000), "gravity-wei"),
            converted(2.0, "GRAVITY")
        );
    }

    #[test]
    fn wei_suffix_checked_before_atto_prefix() {
        assert_eq!(convert(raw(1), "afoo-wei"), converted(1e-18, "AFOO"));
        assert_eq!(
            convert(raw(1_000_000_000_000_000_000), "ufoo-wei"),
            converted(1.0, "UFOO")
        );
    }

    #[test]
    fn pool_shares() {
        assert_eq!(convert(raw(500), "gamm/pool/6"), converted(5e-16, "GAMM-6"));
    }

    #[test]
    fn malformed_pool_is_unknown() {
        assert_eq!(
            convert(raw(1_000_000), "gamm/pool"),
            converted(1.0, "unknown_gamm/pool")
        );
    }

    #[test]
    fn staked_prefix_recurses() {
        assert_eq!(convert(raw(1_000_000), "stujuno"), converted(1.0, "stJUNO"));
        assert_eq!(convert(raw(1_000_000), "stuosmo"), converted(1.0, "stOSMO"));
        assert_eq!(
            convert(raw(1_000_000_000_000_000_000), "stinj"),
            converted(1.0, "stINJ")
        );
        assert_eq!(convert(raw(1), "staevmos"), converted(1e-18, "stEVMOS"));
    }

    #[test]
    fn staked_prefix_same_amount_as_inner() {
        let inner = convert(raw(1_234_567), "ujuno");
        let staked = convert(raw(1_234_567), "stujuno");
        assert_eq!(staked.amount, inner.amount);
        assert_eq!(staked.symbol, format!("st{}", inner.symbol));
    }

    #[test]
    fn staked_prefix_with_unknown_inner() {
        assert_eq!(
            convert(raw(1_000_000), "stxyz"),
            converted(1.0, "stunknown_xyz")
        );
    }

    #[test]
    fn bare_staked_prefix_is_unknown() {
        assert_eq!(convert(raw(1_000_000), "st"), converted(1.0, "unknown_st"));
        assert_eq!(
            convert(raw(1_000_000), "stst"),
            converted(1.0, "stunknown_st")
        );
    }

    #[test]
    fn repeated_staked_prefix_terminates() {
        let denom = format!("{}uatom", "st".repeat(50));
        let result = convert(raw(1_000_000), &denom);
        assert_eq!(result.amount, 1.0);
        assert_eq!(result.symbol, format!("{}ATOM", "st".repeat(50)));
    }

    #[test]
    fn unrecognized_denom() {
        assert_eq!(
            convert(raw(5_000_000), "xyz123"),
            converted(5.0, "unknown_xyz123")
        );
        assert_eq!(convert(raw(1_000_000), ""), converted(1.0, "unknown_"));
    }

    #[test]
    fn default_rule_logs_an_error() {
        let logs = captured_logs(|| {
            convert(raw(5_000_000), "xyz123");
        });
        assert!(logs.iter().any(|(level, message)| {
            *level == Level::Error && message.contains("currency_raw=xyz123")
        }));

        let logs = captured_logs(|| {
            convert(raw(5_000_000), "stujuno");
            convert(raw(5_000_000), "gamm/pool/1");
        });
        assert!(logs.iter().all(|(level, _)| *level != Level::Error));
    }

    #[test]
    fn table_takes_precedence() {
        // would otherwise match the `u` prefix rule
        assert_eq!(convert(raw(1_000_000), "uusd"), converted(1.0, "USTC"));
        assert_eq!(
            convert(raw(1_000_000_000_000_000_000), "rowan"),
            converted(1.0, "ROWAN")
        );
        assert_eq!(convert(raw(100_000_000), "basecro"), converted(1.0, "CRO"));
        assert_eq!(convert(raw(1_000_000), "osmo"), converted(1.0, "OSMO"));
        assert_eq!(
            convert(raw(1_000_000_000_000_000_000), "inj"),
            converted(1.0, "INJ")
        );
    }

    #[test]
    fn table_entries_scale_by_their_exponent() {
        for (currency, entry) in CURRENCY_RAW_MAP {
            let amount = raw(123_456_789);
            let result = convert(amount, currency);
            assert_eq!(result.symbol, entry.symbol);
            let recovered = result.amount * 10f64.powi(entry.exponent as i32);
            assert!(
                approx_eq(recovered, amount.value()),
                "{currency}: {recovered} != {}",
                amount.value()
            );
        }
    }

    #[test]
    fn prefix_quirk_is_preserved() {
        assert_eq!(
            convert(raw(1_000_000_000_000_000_000), "atom"),
            converted(1.0, "TOM")
        );
    }

    #[test]
    fn missing_currency_passes_through() {
        let mut cache = IbcAddressCache::new();
        let result = amount_currency_from_raw(raw(1234), None, None, &mut cache);
        assert_eq!(
            result,
            AmountCurrency {
                amount: 1234.0,
                currency: None
            }
        );
    }

    #[test]
    fn native_denom_skips_resolver() {
        let calls = Cell::new(0);
        let lookup = |_: &IbcReference| -> Result<Option<String>, LookupError> {
            calls.set(calls.get() + 1);
            Ok(None)
        };
        let mut cache = IbcAddressCache::new();

        let result =
            amount_currency_from_raw(raw(1_000_000), Some("uosmo"), Some(&lookup), &mut cache);

        assert_eq!(result.currency.as_deref(), Some("OSMO"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn ibc_denom_resolves_then_converts() {
        let lookup = resolves_to("uatom");
        let mut cache = IbcAddressCache::new();

        let result =
            amount_currency_from_raw(raw(2_000_000), Some(ATOM), Some(&lookup), &mut cache);

        assert_eq!(
            result,
            AmountCurrency {
                amount: 2.0,
                currency: Some("ATOM".to_string())
            }
        );
        assert_eq!(cache.get(ATOM), Some(&Some("uatom".to_string())));
    }

    #[test]
    fn ibc_override_chains_into_currency_table() {
        let mut cache = IbcAddressCache::new();
        let result =
            amount_currency_from_raw(raw(100_000_000), Some(CRO_OVERRIDE), None, &mut cache);
        assert_eq!(result.amount, 1.0);
        assert_eq!(result.currency.as_deref(), Some("CRO"));
    }

    #[test]
    fn ibc_lookup_failure_falls_back() {
        let failing = |r: &IbcReference| -> Result<Option<String>, LookupError> {
            Err(LookupError::Malformed {
                reference: r.to_string(),
                reason: "boom".to_string(),
            })
        };
        let mut cache = IbcAddressCache::new();

        let result =
            amount_currency_from_raw(raw(3_000_000), Some(ATOM), Some(&failing), &mut cache);

        assert_eq!(result.amount, 3.0);
        assert_eq!(result.currency, Some(format!("unknown_{ATOM}")));
        assert!(cache.is_empty());
    }

    #[test]
    fn ibc_lookup_failure_is_visible_in_fallible_variant() {
        let failing = |r: &IbcReference| -> Result<Option<String>, LookupError> {
            Err(LookupError::Status {
                reference: r.to_string(),
                status: 503,
            })
        };
        let mut cache = IbcAddressCache::new();

        let err = try_amount_currency_from_raw(raw(1), Some(ATOM), Some(&failing), &mut cache)
            .unwrap_err();

        assert!(matches!(
            err,
            ConversionError::Lookup(LookupError::Status { status: 503, .. })
        ));
        assert_eq!(err.denom(), None);
    }

    #[test]
    fn unresolved_ibc_denom_falls_back() {
        let mut cache = IbcAddressCache::new();

        let offline = amount_currency_from_raw(raw(1_000_000), Some(ATOM), None, &mut cache);
        assert_eq!(offline.currency, Some(format!("unknown_{ATOM}")));
        assert_eq!(offline.amount, 1.0);

        let nothing = |_: &IbcReference| -> Result<Option<String>, LookupError> { Ok(None) };
        let missing =
            amount_currency_from_raw(raw(1_000_000), Some(ATOM), Some(&nothing), &mut cache);
        assert_eq!(missing.currency, Some(format!("unknown_{ATOM}")));

        let err = try_amount_currency_from_raw(raw(1), Some(ATOM), Some(&nothing), &mut cache)
            .unwrap_err();
        assert!(matches!(err, ConversionError::Unresolved { denom: None, .. }));
    }

    #[test]
    fn empty_resolved_denom_is_unresolved() {
        let lookup = resolves_to("");
        let mut cache = IbcAddressCache::new();
        let result =
            amount_currency_from_raw(raw(1_000_000), Some(ATOM), Some(&lookup), &mut cache);
        assert_eq!(result.currency, Some(format!("unknown_{ATOM}")));

        let err = try_amount_currency_from_raw(raw(1), Some(ATOM), Some(&lookup), &mut cache)
            .unwrap_err();
        assert_eq!(err.denom(), Some(""));
    }

    #[test]
    fn fallback_warning_names_the_resolved_denom() {
        let lookup = resolves_to("");
        let mut cache = IbcAddressCache::new();

        let logs = captured_logs(|| {
            amount_currency_from_raw(raw(1_000_000), Some(ATOM), Some(&lookup), &mut cache);
        });
        let warning = logs
            .iter()
            .find(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message.as_str())
            .unwrap();
        assert!(warning.contains(ATOM), "{warning}");
        assert!(warning.contains(r#"denom=Some("")"#), "{warning}");

        let logs = captured_logs(|| {
            amount_currency_from_raw(raw(1_000_000), Some(ATOM), None, &mut IbcAddressCache::new());
        });
        assert!(logs
            .iter()
            .any(|(level, message)| *level == Level::Warn && message.contains("denom=None")));
    }

    #[test]
    fn malformed_ibc_reference_falls_back() {
        let mut cache = IbcAddressCache::new();
        let result =
            amount_currency_from_raw(raw(1_000_000), Some("ibc/nothex"), None, &mut cache);
        assert_eq!(result.amount, 1.0);
        assert_eq!(result.currency.as_deref(), Some("unknown_ibc/nothex"));
    }
}
