// ============================================================================
// Bucket Domain Model
// ============================================================================

use crate::domain::errors::RankError;
use crate::numeric::{DigitSystem, BASE_36};
use std::fmt;
use std::str::FromStr;

/// One of the three cyclic partitions of rank space.
///
/// Buckets support coarse rebalancing: an external policy can move a dense
/// bucket's items into the next bucket with freshly spaced ranks, without
/// touching individual item order. The cycle closes: `B2.next() == B0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Bucket {
    B0 = 0,
    B1 = 1,
    B2 = 2,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::B0, Bucket::B1, Bucket::B2];

    /// Cyclic successor.
    pub fn next(self) -> Self {
        match self {
            Bucket::B0 => Bucket::B1,
            Bucket::B1 => Bucket::B2,
            Bucket::B2 => Bucket::B0,
        }
    }

    /// Cyclic predecessor.
    pub fn prev(self) -> Self {
        match self {
            Bucket::B0 => Bucket::B2,
            Bucket::B1 => Bucket::B0,
            Bucket::B2 => Bucket::B1,
        }
    }

    fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            0 => Some(Bucket::B0),
            1 => Some(Bucket::B1),
            2 => Some(Bucket::B2),
            _ => None,
        }
    }

    /// Parse a bucket tag: the digit system's character for 0, 1, or 2.
    ///
    /// # Errors
    /// `UnknownBucket` for anything else, including multi-character tags.
    pub fn parse(tag: &str, sys: &DigitSystem) -> Result<Self, RankError> {
        let mut chars = tag.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(bucket) = sys.to_digit(c).ok().and_then(Self::from_digit) {
                return Ok(bucket);
            }
        }
        Err(RankError::UnknownBucket(tag.to_string()))
    }

    /// The tag character under the given digit system.
    pub fn format(self, sys: &DigitSystem) -> char {
        sys.to_char(self as u32)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(&BASE_36))
    }
}

impl FromStr for Bucket {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &BASE_36)
    }
}
