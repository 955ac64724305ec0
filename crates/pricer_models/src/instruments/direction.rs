//! Contract direction.
//!
//! The direction of an option is a mandatory input. It is never inferred from
//! the relative magnitude of spot and strike: a call requested on a
//! configuration where strike exceeds spot is still a call.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of an option contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionDirection;
///
/// let call: OptionDirection = "Call".parse().unwrap();
/// assert_eq!(call, OptionDirection::Call);
/// assert_eq!(call.to_string(), "call");
///
/// assert!("straddle".parse::<OptionDirection>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase", try_from = "String")
)]
pub enum OptionDirection {
    /// Right to buy at the strike: max(S - K, 0)
    Call,
    /// Right to sell at the strike: max(K - S, 0)
    Put,
}

impl OptionDirection {
    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionDirection::Call)
    }

    /// Returns `true` for a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionDirection::Put)
    }

    /// Lower-case name used in configuration and logs.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionDirection::Call => "call",
            OptionDirection::Put => "put",
        }
    }
}

impl fmt::Display for OptionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionDirection {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionDirection::Call),
            "put" => Ok(OptionDirection::Put),
            _ => Err(PricingError::UnrecognizedDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for OptionDirection {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
