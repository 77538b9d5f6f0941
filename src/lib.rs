// ============================================================================
// LexoRank Library
// Sortable string ranks for reorderable collections
// ============================================================================

//! # lexorank
//!
//! A fractional-indexing rank engine: string-valued, lexicographically
//! sortable ranks that let items be inserted into or moved within an ordered
//! collection without rewriting the rank of any other item.
//!
//! ## Features
//!
//! - **Exact arithmetic** in an arbitrary radix (base-36 by default); no
//!   floating point anywhere
//! - **Shortest midpoints**: `between` returns the fewest digits that stay
//!   strictly inside the bounds, keeping ranks short under repeated insertion
//! - **Bucket rotation** for external rebalancing policies
//! - **Immutable value types**: every operation is a pure function, safe to
//!   share across threads without locking
//!
//! ## Example
//!
//! ```rust
//! use lexorank::prelude::*;
//!
//! // seed a list
//! let first = Rank::middle();
//! let second = first.gen_next();
//! assert!(first < second);
//!
//! // insert between neighbors without touching them
//! let wedge = first.between(&second).unwrap();
//! assert!(first < wedge && wedge < second);
//!
//! // ranks persist as plain strings
//! let stored = wedge.to_string();
//! assert_eq!(Rank::parse(&stored).unwrap(), wedge);
//!
//! // callers with string neighbors use the one-shot form
//! let head = Rank::calculate_between(None, Some(first.as_str())).unwrap();
//! assert!(head < first);
//! ```

pub mod domain;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{Bucket, Rank, RankError, RankResult};
    pub use crate::numeric::{
        DigitSystem, NumericError, NumericResult, RadixDecimal, RadixInt, BASE_36,
    };
}
