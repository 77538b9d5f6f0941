// ============================================================================
// Domain Models Module
// Public rank value types built on the numeric engine
// ============================================================================

pub mod bucket;
pub mod errors;
pub mod rank;

pub use bucket::Bucket;
pub use errors::{RankError, RankResult};
pub use rank::Rank;
