//! Supported currencies and exchange-rate records

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

macro_rules! supported_currencies {
    ($($code:ident => $country:literal),+ $(,)?) => {
        /// Closed set of currency codes the application recognizes.
        ///
        /// Variants are declared in alphabetical order so the derived `Ord`
        /// matches the order of the codes as strings.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
        pub enum CurrencyCode {
            $($code),+
        }

        impl CurrencyCode {
            pub const ALL: &'static [CurrencyCode] = &[$(CurrencyCode::$code),+];

            /// Exact, case-sensitive lookup of an ISO-4217 code.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $(stringify!($code) => Some(CurrencyCode::$code),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$code => stringify!($code),)+
                }
            }

            pub fn country(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$code => $country,)+
                }
            }
        }
    };
}

supported_currencies! {
    AED => "United Arab Emirates",
    AUD => "Australia",
    BGN => "Bulgaria",
    BRL => "Brazil",
    CAD => "Canada",
    CHF => "Switzerland",
    CNY => "China",
    CZK => "Czech Republic",
    DKK => "Denmark",
    EUR => "European Union",
    GBP => "United Kingdom",
    HKD => "Hong Kong",
    HUF => "Hungary",
    IDR => "Indonesia",
    ILS => "Israel",
    INR => "India",
    ISK => "Iceland",
    JPY => "Japan",
    KRW => "South Korea",
    MXN => "Mexico",
    MYR => "Malaysia",
    NOK => "Norway",
    NZD => "New Zealand",
    PHP => "Philippines",
    PLN => "Poland",
    RON => "Romania",
    SAR => "Saudi Arabia",
    SEK => "Sweden",
    SGD => "Singapore",
    THB => "Thailand",
    TRY => "Turkey",
    USD => "United States",
    ZAR => "South Africa",
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::from_code(&s.trim().to_uppercase())
            .ok_or_else(|| anyhow!("Unsupported currency code: {}", s))
    }
}

/// Exchange rate of a currency relative to the provider's base currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: CurrencyCode,
    pub value: f64,
}

impl Currency {
    pub fn new(code: CurrencyCode, value: f64) -> Self {
        Self { code, value }
    }
}

/// Converts `amount` from `source` to `target` through the shared base.
/// Returns `None` when the source rate is zero.
pub fn convert(amount: f64, source: &Currency, target: &Currency) -> Option<f64> {
    if source.value == 0.0 {
        return None;
    }
    Some(amount * target.value / source.value)
}
