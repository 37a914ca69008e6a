pub mod commands;
pub mod model;
pub mod normalizer;
pub mod reconcile;
pub mod target;

pub use commands::{BidFlow, BidFlowState, BidOutcome};
pub use target::{Biddable, ListingKind};
