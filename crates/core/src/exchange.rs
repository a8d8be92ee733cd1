//! Exchange identifiers and types.

use serde::{Deserialize, Serialize};

/// Exchange identifier.
///
/// Paribu and BtcTurk are TRY-quoted local markets; Binance is the
/// USDT-quoted reference market the locals are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Exchange {
    Paribu = 1,  // TRY spot market
    Btcturk = 2, // TRY spot market
    Binance = 3, // USDT reference market
}

impl Exchange {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Exchange::Paribu),
            2 => Some(Exchange::Btcturk),
            3 => Some(Exchange::Binance),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Whether this exchange trades in TRY.
    #[inline]
    pub fn is_local(self) -> bool {
        !matches!(self, Exchange::Binance)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Exchange::Paribu => "Paribu",
            Exchange::Btcturk => "BtcTurk",
            Exchange::Binance => "Binance",
        }
    }

    /// TRY-quoted exchanges.
    pub fn locals() -> &'static [Exchange] {
        &[Exchange::Paribu, Exchange::Btcturk]
    }

    /// The reference market quoted in USDT.
    #[inline]
    pub fn reference() -> Exchange {
        Exchange::Binance
    }
}
