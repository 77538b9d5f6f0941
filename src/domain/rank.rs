// ============================================================================
// Rank Domain Model
// Sortable string ranks with shortest-midpoint insertion
// ============================================================================

use crate::domain::bucket::Bucket;
use crate::domain::errors::{RankError, RankResult};
use crate::numeric::{DigitSystem, NumericError, RadixDecimal, RadixInt, BASE_36};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

/// Separator between the bucket tag and the decimal component.
const BUCKET_SEPARATOR: char = '|';

/// Width the integer portion is zero-padded to in the canonical form. Also
/// bounds the decimal band: legal values are `[0, base^INTEGER_WIDTH - 1]`.
const INTEGER_WIDTH: usize = 6;

fn system() -> &'static DigitSystem {
    &BASE_36
}

// Process-wide constants, initialized once and never mutated.
static MIN_DECIMAL: LazyLock<RadixDecimal> =
    LazyLock::new(|| RadixDecimal::from_integer(RadixInt::zero(system())));

static MAX_DECIMAL: LazyLock<RadixDecimal> = LazyLock::new(|| {
    let top = system().to_char(system().base() - 1);
    let literal: String = std::iter::repeat(top).take(INTEGER_WIDTH).collect();
    RadixDecimal::parse(&literal, system()).expect("maximum decimal literal")
});

static MID_DECIMAL: LazyLock<RadixDecimal> =
    LazyLock::new(|| decimal_between(&MIN_DECIMAL, &MAX_DECIMAL));

/// Fixed stepping increment for `gen_next`/`gen_prev`.
static STEP_DECIMAL: LazyLock<RadixDecimal> =
    LazyLock::new(|| RadixDecimal::from_integer(RadixInt::from_u64(system(), 8)));

/// First rank handed out when stepping forward off the minimum sentinel.
static INITIAL_MIN_DECIMAL: LazyLock<RadixDecimal> =
    LazyLock::new(|| RadixDecimal::parse("100000", system()).expect("initial minimum literal"));

/// First rank handed out when stepping backward off the maximum sentinel.
static INITIAL_MAX_DECIMAL: LazyLock<RadixDecimal> = LazyLock::new(|| {
    let top = system().to_char(system().base() - 2);
    RadixDecimal::parse(&format!("{top}00000"), system()).expect("initial maximum literal")
});

/// A sortable rank: a bucket tag plus a decimal position, cached in its
/// canonical string form.
///
/// The canonical form is
/// `"<bucket>|<integer, >=6 digits zero-padded><radix point><fraction>"`
/// with fraction trailing zeros stripped. Zero-padding makes plain ordinal
/// string comparison agree with numeric comparison, so `Ord`, `Eq`, and
/// `Hash` all work on the cached string.
///
/// Ranks are immutable; every generation operation returns a new value.
///
/// # Example
/// ```
/// use lexorank::prelude::*;
///
/// let first = Rank::middle();
/// let second = first.gen_next();
/// let wedge = first.between(&second).unwrap();
/// assert!(first < wedge && wedge < second);
/// ```
#[derive(Debug, Clone)]
pub struct Rank {
    bucket: Bucket,
    decimal: RadixDecimal,
    serialized: String,
}

impl Rank {
    /// Internal constructor for decimals already known to be legal.
    fn with_decimal(bucket: Bucket, decimal: RadixDecimal) -> Self {
        let serialized = serialize(bucket, &decimal);
        Self {
            bucket,
            decimal,
            serialized,
        }
    }

    /// Build a rank from a bucket and a decimal position.
    ///
    /// # Errors
    /// `SystemMismatch` (wrapped) when the decimal was built under a digit
    /// system other than the rank system; `OutOfRange` when it falls outside
    /// `[min, max]`.
    pub fn from_decimal(bucket: Bucket, decimal: RadixDecimal) -> RankResult<Self> {
        if !std::ptr::eq(decimal.system(), system()) {
            return Err(RankError::Numeric(NumericError::SystemMismatch));
        }
        if decimal < *MIN_DECIMAL || decimal > *MAX_DECIMAL {
            return Err(RankError::OutOfRange);
        }
        Ok(Self::with_decimal(bucket, decimal))
    }

    /// Parse a canonical rank string.
    ///
    /// Both halves are validated independently; the canonical form is then
    /// reconstructed, so parsing and construction agree byte-for-byte.
    ///
    /// # Errors
    /// `MissingBucketSeparator`, `UnknownBucket`, a wrapped numeric error
    /// for a malformed decimal, or `OutOfRange`.
    pub fn parse(input: &str) -> RankResult<Self> {
        let (bucket_part, decimal_part) = input
            .split_once(BUCKET_SEPARATOR)
            .ok_or(RankError::MissingBucketSeparator)?;
        let bucket = Bucket::parse(bucket_part, system())?;
        let decimal = RadixDecimal::parse(decimal_part, system())?;
        Self::from_decimal(bucket, decimal)
    }

    /// The minimum rank, `"0|000000:"`.
    pub fn min() -> Self {
        Self::with_decimal(Bucket::B0, MIN_DECIMAL.clone())
    }

    /// The maximum rank in bucket 0, `"0|zzzzzz:"`.
    pub fn max() -> Self {
        Self::max_in(Bucket::B0)
    }

    /// The maximum rank in the given bucket.
    pub fn max_in(bucket: Bucket) -> Self {
        Self::with_decimal(bucket, MAX_DECIMAL.clone())
    }

    /// The middle rank, `"0|hzzzzz:"`, the midpoint of min and max.
    pub fn middle() -> Self {
        Self::with_decimal(Bucket::B0, MID_DECIMAL.clone())
    }

    /// Seed a rank from a point in time: seconds since the Unix epoch,
    /// wrapped modulo `base^6` to fit the six-digit integer portion.
    /// Relative chronological ordering holds only within one modulus period.
    pub fn from_timestamp(at: DateTime<Utc>, bucket: Bucket) -> Self {
        let modulus = (system().base() as i64).pow(INTEGER_WIDTH as u32);
        let seconds = at.timestamp().rem_euclid(modulus);
        let decimal = RadixDecimal::from_integer(RadixInt::from_u64(system(), seconds as u64));
        Self::with_decimal(bucket, decimal)
    }

    #[inline]
    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    #[inline]
    pub fn decimal(&self) -> &RadixDecimal {
        &self.decimal
    }

    /// The canonical string form.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    #[inline]
    pub fn is_min(&self) -> bool {
        self.decimal == *MIN_DECIMAL
    }

    #[inline]
    pub fn is_max(&self) -> bool {
        self.decimal == *MAX_DECIMAL
    }

    /// The shortest rank strictly between this rank and `other`.
    ///
    /// Operand order does not matter; the result always lies strictly inside
    /// the open interval and carries no more fractional digits than staying
    /// inside requires.
    ///
    /// # Errors
    /// `CrossBucket` when the ranks live in different buckets;
    /// `EmptyInterval` when their decimals are equal.
    pub fn between(&self, other: &Rank) -> RankResult<Self> {
        if self.bucket != other.bucket {
            return Err(RankError::CrossBucket);
        }
        let (left, right) = match self.decimal.cmp(&other.decimal) {
            Ordering::Equal => return Err(RankError::EmptyInterval),
            Ordering::Less => (&self.decimal, &other.decimal),
            Ordering::Greater => (&other.decimal, &self.decimal),
        };
        Ok(Self::with_decimal(self.bucket, decimal_between(left, right)))
    }

    /// The next rank after this one: ceiling plus a fixed step, falling back
    /// to the midpoint with the maximum when the step would reach it. From
    /// the minimum sentinel, returns the fixed initial rank instead.
    ///
    /// # Panics
    /// Panics on the maximum rank; nothing exists after it. Use
    /// [`Rank::calculate_between`] for a fallible entry point.
    pub fn gen_next(&self) -> Self {
        if self.is_min() {
            return Self::with_decimal(self.bucket, INITIAL_MIN_DECIMAL.clone());
        }
        assert!(!self.is_max(), "no rank exists after the maximum rank");
        let ceiling = RadixDecimal::from_integer(self.decimal.ceil());
        let mut next = &ceiling + &STEP_DECIMAL;
        if next >= *MAX_DECIMAL {
            tracing::debug!(rank = %self, "fixed step reached the maximum, inserting at midpoint");
            next = decimal_between(&self.decimal, &MAX_DECIMAL);
        }
        Self::with_decimal(self.bucket, next)
    }

    /// The previous rank before this one: floor minus a fixed step, falling
    /// back to the midpoint with the minimum when the step would reach it.
    /// From the maximum sentinel, returns the fixed initial rank instead.
    ///
    /// # Panics
    /// Panics on the minimum rank; nothing exists before it. Use
    /// [`Rank::calculate_between`] for a fallible entry point.
    pub fn gen_prev(&self) -> Self {
        if self.is_max() {
            return Self::with_decimal(self.bucket, INITIAL_MAX_DECIMAL.clone());
        }
        assert!(!self.is_min(), "no rank exists before the minimum rank");
        let floor = RadixDecimal::from_integer(self.decimal.floor());
        let mut prev = &floor - &STEP_DECIMAL;
        if prev <= *MIN_DECIMAL {
            tracing::debug!(rank = %self, "fixed step reached the minimum, inserting at midpoint");
            prev = decimal_between(&MIN_DECIMAL, &self.decimal);
        }
        Self::with_decimal(self.bucket, prev)
    }

    /// The same position in an explicit bucket.
    pub fn in_bucket(&self, bucket: Bucket) -> Self {
        Self::with_decimal(bucket, self.decimal.clone())
    }

    /// The same position in the cyclically next bucket.
    pub fn in_next_bucket(&self) -> Self {
        self.in_bucket(self.bucket.next())
    }

    /// The same position in the cyclically previous bucket.
    pub fn in_prev_bucket(&self) -> Self {
        self.in_bucket(self.bucket.prev())
    }

    /// Compute a rank between two optional neighbors, given as canonical
    /// strings: an absent `prev` means "before `next`", an absent `next`
    /// means "after `prev`", both absent means the global middle.
    ///
    /// # Errors
    /// Any parse error from either string; `OutOfRange` when asked for a
    /// rank before the global minimum or after the global maximum;
    /// `EmptyInterval`/`CrossBucket` from the underlying `between`.
    pub fn calculate_between(prev: Option<&str>, next: Option<&str>) -> RankResult<Self> {
        let prev = prev.map(Self::parse).transpose()?;
        let next = next.map(Self::parse).transpose()?;
        match (prev, next) {
            (None, None) => Ok(Self::middle()),
            (Some(prev), None) => {
                if prev.is_max() {
                    return Err(RankError::OutOfRange);
                }
                Ok(prev.gen_next())
            },
            (None, Some(next)) => {
                if next.is_min() {
                    return Err(RankError::OutOfRange);
                }
                Ok(next.gen_prev())
            },
            (Some(prev), Some(next)) => prev.between(&next),
        }
    }
}

// ============================================================================
// Canonical Serialization
// ============================================================================

fn serialize(bucket: Bucket, decimal: &RadixDecimal) -> String {
    let sys = system();
    let rendered = decimal.format();
    let point = sys.radix_point_char();
    let (int_part, frac_part) = match rendered.split_once(point) {
        Some((i, f)) => (i, f),
        None => (rendered.as_str(), ""),
    };
    let zero = sys.to_char(0);
    let mut out = String::with_capacity(INTEGER_WIDTH + frac_part.len() + 3);
    out.push(bucket.format(sys));
    out.push(BUCKET_SEPARATOR);
    for _ in int_part.len()..INTEGER_WIDTH {
        out.push(zero);
    }
    out.push_str(int_part);
    out.push(point);
    out.push_str(frac_part);
    out
}

// ============================================================================
// Midpoint Search
// ============================================================================

/// The shortest decimal strictly between `o_left` and `o_right`.
///
/// Requires `o_left < o_right`. Four stages: align the bounds to the coarser
/// scale, walk the scales toward zero until the rounded bounds meet or
/// cross, fall back to the exact arithmetic mean, then trim the result to
/// the fewest fractional digits that keep it strictly inside the original
/// open interval.
fn decimal_between(o_left: &RadixDecimal, o_right: &RadixDecimal) -> RadixDecimal {
    debug_assert!(o_left < o_right);
    let mut left = o_left.clone();
    let mut right = o_right.clone();

    // align to the coarser scale; if rounding collapses the bracket, only
    // the mean can answer
    if o_left.scale() < o_right.scale() {
        let shrunk = o_right.set_scale(o_left.scale(), false);
        if *o_left >= shrunk {
            return shorten(checked_mean(o_left, o_right, o_left, o_right), o_left, o_right);
        }
        right = shrunk;
    }
    if o_left.scale() > right.scale() {
        let shrunk = o_left.set_scale(right.scale(), true);
        if shrunk >= right {
            return shorten(checked_mean(o_left, o_right, o_left, o_right), o_left, o_right);
        }
        left = shrunk;
    }

    // drop one fractional digit at a time, ceiling-rounding the left bound
    // and floor-rounding the right; the first scale where they meet is the
    // shortest common truncation
    let mut scale = left.scale();
    while scale > 0 {
        let target = scale - 1;
        let low = left.set_scale(target, true);
        let high = right.set_scale(target, false);
        match low.cmp(&high) {
            Ordering::Equal => return shorten(bounded(o_left, o_right, low), o_left, o_right),
            Ordering::Greater => break,
            Ordering::Less => {
                scale = target;
                left = low;
                right = high;
            },
        }
    }

    tracing::trace!(left = %o_left, right = %o_right, "rounded bounds crossed, taking the arithmetic mean");
    shorten(checked_mean(o_left, o_right, &left, &right), o_left, o_right)
}

/// Mean of the working pair, re-verified against the original bounds.
fn checked_mean(
    lbound: &RadixDecimal,
    rbound: &RadixDecimal,
    left: &RadixDecimal,
    right: &RadixDecimal,
) -> RadixDecimal {
    bounded(lbound, rbound, mean(left, right))
}

/// Keep `candidate` only if it lies strictly inside `(lbound, rbound)`;
/// otherwise replace it with the mean of the bounds themselves, which always
/// does.
fn bounded(lbound: &RadixDecimal, rbound: &RadixDecimal, candidate: RadixDecimal) -> RadixDecimal {
    if *lbound >= candidate || candidate >= *rbound {
        return mean(lbound, rbound);
    }
    candidate
}

/// Exact arithmetic mean `(left + right) × half`, shrunk back to the larger
/// operand scale when that keeps it strictly inside the operands.
fn mean(left: &RadixDecimal, right: &RadixDecimal) -> RadixDecimal {
    let sum = left + right;
    let mid = &sum * &RadixDecimal::half(left.system());
    let scale = left.scale().max(right.scale());
    if mid.scale() > scale {
        let down = mid.set_scale(scale, false);
        if down > *left {
            return down;
        }
        let up = mid.set_scale(scale, true);
        if up < *right {
            return up;
        }
    }
    mid
}

/// Drop fractional digits while the floor-rounded result stays strictly
/// inside the original open interval. Guarantees the minimum digit length
/// consistent with the requested ordering.
fn shorten(mut mid: RadixDecimal, lbound: &RadixDecimal, rbound: &RadixDecimal) -> RadixDecimal {
    while mid.scale() > 0 {
        let candidate = mid.set_scale(mid.scale() - 1, false);
        if candidate <= *lbound || candidate >= *rbound {
            break;
        }
        mid = candidate;
    }
    mid
}

// ============================================================================
// Trait Implementations
// ============================================================================

// Ordinal comparison on the canonical string is numeric comparison, because
// bucket tags and the zero-padded integer portion align significance.
impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.serialized == other.serialized
    }
}

impl Eq for Rank {}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.serialized.cmp(&other.serialized)
    }
}

impl Hash for Rank {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialized.hash(state);
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl FromStr for Rank {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Serde (canonical string form)
// ============================================================================

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Rank;
    use serde::de::{Deserializer, Error, Unexpected, Visitor};
    use serde::ser::Serializer;
    use serde::{Deserialize, Serialize};
    use std::fmt;

    impl Serialize for Rank {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> Deserialize<'de> for Rank {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct RankVisitor;

            impl Visitor<'_> for RankVisitor {
                type Value = Rank;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "a canonical rank string")
                }

                fn visit_str<E>(self, value: &str) -> Result<Rank, E>
                where
                    E: Error,
                {
                    Rank::parse(value)
                        .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
                }
            }

            deserializer.deserialize_str(RankVisitor)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(s: &str) -> Rank {
        Rank::parse(s).unwrap()
    }

    #[test]
    fn test_sentinel_literals() {
        assert_eq!(Rank::min().as_str(), "0|000000:");
        assert_eq!(Rank::max().as_str(), "0|zzzzzz:");
        assert_eq!(Rank::middle().as_str(), "0|hzzzzz:");
        assert_eq!(Rank::max_in(Bucket::B2).as_str(), "2|zzzzzz:");
    }

    #[test]
    fn test_parse_round_trip() {
        for s in [
            "0|000000:",
            "0|zzzzzz:",
            "1|hzzzzz:",
            "2|000001:i",
            "0|123abc:x0z",
        ] {
            assert_eq!(rank(s).as_str(), s);
            assert_eq!(rank(s).to_string(), s);
        }
    }

    #[test]
    fn test_parse_reconstructs_canonical_form() {
        // non-canonical but valid inputs re-serialize canonically
        assert_eq!(rank("0|1:i").as_str(), "0|000001:i");
        assert_eq!(rank("0|0000001:").as_str(), "0|000001:");
        assert_eq!(rank("0|000001:i0").as_str(), "0|000001:i");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Rank::parse("000000:"), Err(RankError::MissingBucketSeparator));
        assert_eq!(
            Rank::parse("3|000000:"),
            Err(RankError::UnknownBucket("3".to_string()))
        );
        assert_eq!(
            Rank::parse("0|00:00:00"),
            Err(RankError::Numeric(NumericError::DuplicateRadixPoint))
        );
        assert_eq!(
            Rank::parse("0|00!000:"),
            Err(RankError::Numeric(NumericError::InvalidCharacter('!')))
        );
        assert_eq!(Rank::parse("0|"), Err(RankError::Numeric(NumericError::EmptyDigits)));
        assert_eq!(Rank::parse("0|1000000:"), Err(RankError::OutOfRange));
        assert_eq!(Rank::parse("0|-000001:"), Err(RankError::OutOfRange));
    }

    #[test]
    fn test_string_order_is_numeric_order() {
        let mut ranks = vec![
            rank("0|000002:"),
            rank("0|000001:1"),
            rank("0|000001:"),
            rank("0|zzzzzz:"),
            rank("0|000000:"),
        ];
        ranks.sort();
        let sorted: Vec<&str> = ranks.iter().map(Rank::as_str).collect();
        assert_eq!(
            sorted,
            [
                "0|000000:",
                "0|000001:",
                "0|000001:1",
                "0|000002:",
                "0|zzzzzz:"
            ]
        );
    }

    #[test]
    fn test_between_min_max() {
        let mid = Rank::min().between(&Rank::max()).unwrap();
        assert!(Rank::min() < mid);
        assert!(mid < Rank::max());
        assert_eq!(mid, Rank::middle());
    }

    #[test]
    fn test_between_is_order_independent() {
        let a = rank("0|000005:");
        let b = rank("0|00000a:");
        assert_eq!(a.between(&b).unwrap(), b.between(&a).unwrap());
    }

    #[test]
    fn test_between_adjacent_integers_extends_scale() {
        let m = rank("0|000001:").between(&rank("0|000002:")).unwrap();
        assert_eq!(m.as_str(), "0|000001:i");
    }

    #[test]
    fn test_between_prefers_shorter_representation() {
        // an integer gap exists, so no fraction should appear
        let m = rank("0|000001:").between(&rank("0|000002:8")).unwrap();
        assert_eq!(m.as_str(), "0|000002:");

        // the shortest answer needs exactly two fractional digits
        let m = rank("0|000001:1234").between(&rank("0|000001:2")).unwrap();
        assert_eq!(m.as_str(), "0|000001:1j");
    }

    #[test]
    fn test_between_trims_even_after_digit_scan() {
        let left = rank("0|000001:");
        let right = rank("0|000001:01");
        let m = left.between(&right).unwrap();
        assert!(left < m && m < right);
        // dropping one more fractional digit must leave the open interval
        let scale = m.decimal().scale();
        assert!(scale > 0);
        let shorter = m.decimal().set_scale(scale - 1, false);
        assert!(shorter <= *left.decimal() || shorter >= *right.decimal());
    }

    #[test]
    fn test_between_rejects_degenerate_input() {
        let a = rank("0|000005:");
        assert_eq!(a.between(&a.clone()), Err(RankError::EmptyInterval));

        let other_bucket = a.in_next_bucket();
        assert_eq!(a.between(&other_bucket), Err(RankError::CrossBucket));
    }

    #[test]
    fn test_between_repeated_front_insertion_stays_ordered() {
        let left = Rank::min();
        let mut right = Rank::max();
        for _ in 0..100 {
            let m = left.between(&right).unwrap();
            assert!(left < m && m < right);
            right = m;
        }
    }

    #[test]
    fn test_gen_next_from_min_is_initial_constant() {
        assert_eq!(Rank::min().gen_next().as_str(), "0|100000:");
    }

    #[test]
    fn test_gen_prev_from_max_is_initial_constant() {
        assert_eq!(Rank::max().gen_prev().as_str(), "0|y00000:");
    }

    #[test]
    fn test_gen_next_steps_by_eight() {
        assert_eq!(rank("0|hzzzzz:").gen_next().as_str(), "0|i00007:");
        // a fractional rank is ceiled before stepping
        assert_eq!(rank("0|000001:i").gen_next().as_str(), "0|00000a:");
    }

    #[test]
    fn test_gen_prev_steps_by_eight() {
        assert_eq!(rank("0|i00007:").gen_prev().as_str(), "0|hzzzzz:");
        // a fractional rank is floored before stepping
        assert_eq!(rank("0|00000a:i").gen_prev().as_str(), "0|000002:");
    }

    #[test]
    fn test_gen_next_falls_back_near_max() {
        let near = rank("0|zzzzzw:");
        let next = near.gen_next();
        assert!(near < next);
        assert!(next < Rank::max());
        assert_eq!(next.as_str(), "0|zzzzzx:");
    }

    #[test]
    fn test_gen_prev_falls_back_near_min() {
        let near = rank("0|000003:");
        let prev = near.gen_prev();
        assert!(prev < near);
        assert!(Rank::min() < prev);
        assert_eq!(prev.as_str(), "0|000001:");
    }

    #[test]
    #[should_panic(expected = "no rank exists after the maximum rank")]
    fn test_gen_next_panics_on_max() {
        let _ = Rank::max().gen_next();
    }

    #[test]
    #[should_panic(expected = "no rank exists before the minimum rank")]
    fn test_gen_prev_panics_on_min() {
        let _ = Rank::min().gen_prev();
    }

    #[test]
    fn test_bucket_rotation_preserves_decimal() {
        let r = rank("1|00abc3:x");
        let rotated = r.in_next_bucket();
        assert_eq!(rotated.as_str(), "2|00abc3:x");
        assert_eq!(rotated.decimal(), r.decimal());
        assert_eq!(r.in_next_bucket().in_next_bucket().in_next_bucket(), r);
        assert_eq!(r.in_prev_bucket().in_prev_bucket().in_prev_bucket(), r);
    }

    #[test]
    fn test_from_timestamp() {
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(Rank::from_timestamp(epoch, Bucket::B0).as_str(), "0|000000:");

        let one = DateTime::from_timestamp(1, 0).unwrap();
        assert_eq!(Rank::from_timestamp(one, Bucket::B0).as_str(), "0|000001:");

        let early = DateTime::from_timestamp(100, 0).unwrap();
        let later = DateTime::from_timestamp(200, 0).unwrap();
        assert!(
            Rank::from_timestamp(early, Bucket::B1) < Rank::from_timestamp(later, Bucket::B1)
        );
    }

    #[test]
    fn test_from_timestamp_wraps_deterministically() {
        let modulus = 36i64.pow(6);
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        let wrapped = DateTime::from_timestamp(modulus, 0).unwrap();
        assert_eq!(
            Rank::from_timestamp(epoch, Bucket::B0),
            Rank::from_timestamp(wrapped, Bucket::B0)
        );
    }

    #[test]
    fn test_calculate_between_both_absent() {
        assert_eq!(Rank::calculate_between(None, None).unwrap(), Rank::middle());
    }

    #[test]
    fn test_calculate_between_one_side_absent() {
        let after = Rank::calculate_between(Some("0|hzzzzz:"), None).unwrap();
        assert!(after > Rank::middle());

        let before = Rank::calculate_between(None, Some("0|hzzzzz:")).unwrap();
        assert!(before < Rank::middle());
    }

    #[test]
    fn test_calculate_between_both_present() {
        let between = Rank::calculate_between(Some("0|000001:"), Some("0|000002:")).unwrap();
        assert_eq!(between.as_str(), "0|000001:i");
    }

    #[test]
    fn test_calculate_between_exhaustion_errors() {
        let min = Rank::min().to_string();
        let max = Rank::max().to_string();
        assert_eq!(
            Rank::calculate_between(Some(&min), Some(&min)),
            Err(RankError::EmptyInterval)
        );
        assert_eq!(
            Rank::calculate_between(Some(&max), Some(&max)),
            Err(RankError::EmptyInterval)
        );
        assert_eq!(
            Rank::calculate_between(None, Some(&min)),
            Err(RankError::OutOfRange)
        );
        assert_eq!(
            Rank::calculate_between(Some(&max), None),
            Err(RankError::OutOfRange)
        );
    }

    #[test]
    fn test_from_decimal_validates_range() {
        let decimal = RadixDecimal::parse("1000000", system()).unwrap();
        assert_eq!(
            Rank::from_decimal(Bucket::B0, decimal),
            Err(RankError::OutOfRange)
        );

        let decimal = RadixDecimal::parse("zzzzzz", system()).unwrap();
        assert!(Rank::from_decimal(Bucket::B1, decimal).is_ok());
    }

    #[test]
    fn test_from_decimal_rejects_foreign_system() {
        static BASE_10: DigitSystem = DigitSystem::new(b"0123456789", '+', '-', '.');
        let decimal = RadixDecimal::parse("5", &BASE_10).unwrap();
        assert_eq!(
            Rank::from_decimal(Bucket::B0, decimal),
            Err(RankError::Numeric(NumericError::SystemMismatch))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_canonical_string() {
        let r = rank("0|000001:i");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"0|000001:i\"");
        let back: Rank = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
        assert!(serde_json::from_str::<Rank>("\"junk\"").is_err());
    }
}
