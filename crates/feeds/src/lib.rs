//! Ticker collection from exchange REST endpoints.
//!
//! This crate polls the public ticker endpoints of Paribu, BtcTurk and
//! Binance and turns their responses into `ExchangeTickers` for the
//! engine to price.
//!
//! ## Architecture
//!
//! - `rest` - Per-exchange fetchers and response parsing
//! - `source` - The `TickerSource` seam the poll loop runs against
//! - `error` - Feed error taxonomy

pub mod error;
pub mod rest;
pub mod source;

pub use error::*;
pub use rest::*;
pub use source::*;
