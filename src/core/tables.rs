//! Hard-coded exceptions to the lookup and heuristic rules.
//!
//! Both tables are consulted before anything else and always win.

use std::collections::HashMap;
use std::sync::LazyLock;

pub const CUR_CRO: &str = "CRO";
pub const CUR_INJ: &str = "INJ";
pub const CUR_MOBX: &str = "MOBX";
pub const CUR_OSMO: &str = "OSMO";
pub const CUR_PSTAKE: &str = "PSTAKE";
pub const CUR_USTC: &str = "USTC";

/// IBC references the LCD cannot resolve, or resolves to something unhelpful.
pub const IBC_ADDRESSES_TO_DENOM: &[(&str, &str)] = &[
    (
        "ibc/ED07A3391A112B175915CD8FAF43A2DA8E4790EDE12566649D0C2F97716B8518",
        "uosmo",
    ),
    (
        "ibc/E6931F78057F7CC5DA0FD6CEF82FF39373A6E0452BF1FD76910B93292CF356C1",
        CUR_CRO,
    ),
    (
        "ibc/8318B7E036E50C0CF799848F23ED84778AAA8749D9C0BCD4FF3F4AF73C53387F",
        "uloop",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyOverride {
    pub symbol: &'static str,
    pub exponent: u32,
}

const fn symbol(symbol: &'static str, exponent: u32) -> CurrencyOverride {
    CurrencyOverride { symbol, exponent }
}

/// Raw denoms that follow no prefix convention.
pub const CURRENCY_RAW_MAP: &[(&str, CurrencyOverride)] = &[
    (CUR_CRO, symbol(CUR_CRO, 8)),
    (CUR_MOBX, symbol(CUR_MOBX, 9)),
    (
        "gravity0xfB5c6815cA3AC72Ce9F5006869AE67f18bF77006",
        symbol(CUR_PSTAKE, 18),
    ),
    ("inj", symbol(CUR_INJ, 18)),
    ("OSMO", symbol(CUR_OSMO, 6)),
    ("osmo", symbol(CUR_OSMO, 6)),
    ("rowan", symbol("ROWAN", 18)),
    ("basecro", symbol(CUR_CRO, 8)),
    ("uusd", symbol(CUR_USTC, 6)),
];

static IBC_OVERRIDES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IBC_ADDRESSES_TO_DENOM.iter().copied().collect());

static CURRENCY_OVERRIDES: LazyLock<HashMap<&'static str, CurrencyOverride>> =
    LazyLock::new(|| CURRENCY_RAW_MAP.iter().copied().collect());

pub fn ibc_override(reference: &str) -> Option<&'static str> {
    IBC_OVERRIDES.get(reference).copied()
}

pub fn currency_override(currency: &str) -> Option<CurrencyOverride> {
    CURRENCY_OVERRIDES.get(currency).copied()
}
