//! Core data types for the lira arbitrage monitor.

pub mod catalog;
pub mod exchange;
pub mod opportunity;
pub mod settings;
pub mod snapshot;
pub mod ticker;

pub use catalog::*;
pub use exchange::*;
pub use opportunity::*;
pub use settings::*;
pub use snapshot::*;
pub use ticker::*;
