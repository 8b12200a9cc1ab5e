//! Analysis modules.
//!
//! Reading aggregation lives in [`aggregator`]; the per-page statistic
//! cards are computed in [`stats`].

pub mod aggregator;
pub mod stats;

pub use aggregator::*;
pub use stats::*;
