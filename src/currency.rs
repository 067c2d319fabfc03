use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency an account is denominated in.
///
/// The set is closed: unknown codes never make it past the boundary
/// (see [`Currency::from_code`]), so inside the crate a currency value
/// is always valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Sek,
    Eur,
    Usd,
}

impl Currency {
    /// Looks up a currency by its uppercase code.
    ///
    /// Returns `None` for anything outside the supported set; callers
    /// decide whether to drop the input or fall back to the default
    /// (deserializing an account does the latter).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SEK" => Some(Self::Sek),
            "EUR" => Some(Self::Eur),
            "USD" => Some(Self::Usd),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Sek => "SEK",
            Self::Eur => "EUR",
            Self::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
