use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("invalid raw amount: '{0}'")]
    Invalid(String),
}

/// Count of the smallest unit of a denom, before any decimal scaling.
///
/// The scale is not known until the denom has been resolved, so the value is
/// kept as-is and only divided down by [`RawAmount::scale`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct RawAmount(f64);

impl RawAmount {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Divide by `10^exponent`.
    pub fn scale(self, exponent: u32) -> f64 {
        self.0 / 10f64.powi(exponent as i32)
    }
}

impl FromStr for RawAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| AmountError::Invalid(s.to_string()))?;
        if !value.is_finite() {
            return Err(AmountError::Invalid(s.to_string()));
        }
        Ok(RawAmount(value))
    }
}

impl From<u64> for RawAmount {
    fn from(value: u64) -> Self {
        RawAmount(value as f64)
    }
}

impl From<u128> for RawAmount {
    fn from(value: u128) -> Self {
        RawAmount(value as f64)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount(value)
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
