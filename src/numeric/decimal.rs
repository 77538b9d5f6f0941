// ============================================================================
// Radix Decimal
// Exact fixed-point decimal built on RadixInt
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::integer::RadixInt;
use super::system::DigitSystem;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

/// Exact fixed-point value `magnitude × base^-scale`.
///
/// `scale` counts fractional digits; scale 0 is a plain integer. All
/// construction paths funnel through [`RadixDecimal::make`], which strips
/// trailing fractional zero digits and collapses zero to scale 0, so two
/// decimals representing the same number always compare and hash equal.
///
/// No operation rounds implicitly: addition aligns scales exactly,
/// multiplication adds scales. Precision is only ever dropped through
/// [`RadixDecimal::set_scale`].
#[derive(Debug, Clone)]
pub struct RadixDecimal {
    mag: RadixInt,
    scale: usize,
}

impl RadixDecimal {
    /// The canonicalizing constructor.
    pub fn make(mag: RadixInt, scale: usize) -> Self {
        if mag.is_zero() {
            return Self { mag, scale: 0 };
        }
        let mut mag = mag;
        let mut scale = scale;
        while scale > 0 && mag.digit_at(0) == 0 {
            mag = mag.shift_right(1);
            scale -= 1;
        }
        Self { mag, scale }
    }

    pub fn from_integer(mag: RadixInt) -> Self {
        Self::make(mag, 0)
    }

    /// One half, as the system writes it: magnitude `base/2`, scale 1.
    pub fn half(sys: &'static DigitSystem) -> Self {
        Self::make(RadixInt::from_u64(sys, (sys.base() / 2) as u64), 1)
    }

    /// Parse a decimal literal: optional sign, digits, at most one radix
    /// point. Digits on both sides of the point concatenate into the
    /// magnitude; the scale is the number of digits after the point.
    ///
    /// # Errors
    /// `DuplicateRadixPoint` for a second point; otherwise whatever
    /// [`RadixInt::parse`] reports for the digit run.
    pub fn parse(input: &str, sys: &'static DigitSystem) -> NumericResult<Self> {
        let mut parts = input.splitn(3, sys.radix_point_char());
        let head = parts.next().unwrap_or("");
        let tail = parts.next();
        if parts.next().is_some() {
            return Err(NumericError::DuplicateRadixPoint);
        }
        match tail {
            None => Ok(Self::make(RadixInt::parse(head, sys)?, 0)),
            Some(frac) => {
                let digits = format!("{head}{frac}");
                Ok(Self::make(RadixInt::parse(&digits, sys)?, frac.len()))
            },
        }
    }

    #[inline]
    pub fn system(&self) -> &'static DigitSystem {
        self.mag.system()
    }

    #[inline]
    pub fn scale(&self) -> usize {
        self.scale
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mag.is_zero()
    }

    /// True iff the fractional part is entirely zero digits.
    pub fn is_exact(&self) -> bool {
        if self.scale == 0 {
            return true;
        }
        (0..self.scale).all(|i| self.mag.digit_at(i) == 0)
    }

    /// The integer part: magnitude with the fractional digits dropped
    /// (truncation toward zero, matching [`RadixInt::shift_right`]).
    pub fn floor(&self) -> RadixInt {
        self.mag.shift_right(self.scale)
    }

    /// The integer part, rounded away from it when any fractional digit is
    /// non-zero.
    pub fn ceil(&self) -> RadixInt {
        if self.is_exact() {
            return self.floor();
        }
        &self.floor() + &RadixInt::one(self.system())
    }

    /// Drop fractional digits down to `scale`. A request at or above the
    /// current scale returns the value unchanged (no spurious precision is
    /// ever added). With `round_up` the shrunk magnitude is incremented,
    /// guaranteeing the result is never below the true value.
    pub fn set_scale(&self, scale: usize, round_up: bool) -> Self {
        if scale >= self.scale {
            return self.clone();
        }
        let mut mag = self.mag.shift_right(self.scale - scale);
        if round_up {
            mag = &mag + &RadixInt::one(self.system());
        }
        Self::make(mag, scale)
    }

    /// Shift both magnitudes to the larger scale so they share a unit.
    fn aligned(lhs: &Self, rhs: &Self) -> (RadixInt, RadixInt, usize) {
        match lhs.scale.cmp(&rhs.scale) {
            Ordering::Equal => (lhs.mag.clone(), rhs.mag.clone(), lhs.scale),
            Ordering::Less => (
                lhs.mag.shift_left(rhs.scale - lhs.scale),
                rhs.mag.clone(),
                rhs.scale,
            ),
            Ordering::Greater => (
                lhs.mag.clone(),
                rhs.mag.shift_left(lhs.scale - rhs.scale),
                lhs.scale,
            ),
        }
    }

    /// Exact addition at the common scale.
    ///
    /// # Errors
    /// `SystemMismatch` when the operands belong to different digit systems.
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        let (a, b, scale) = Self::aligned(self, rhs);
        Ok(Self::make(a.checked_add(&b)?, scale))
    }

    /// Exact subtraction at the common scale.
    ///
    /// # Errors
    /// `SystemMismatch` when the operands belong to different digit systems.
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        let (a, b, scale) = Self::aligned(self, rhs);
        Ok(Self::make(a.checked_sub(&b)?, scale))
    }

    /// Exact multiplication: magnitudes multiply, scales add.
    ///
    /// # Errors
    /// `SystemMismatch` when the operands belong to different digit systems.
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        Ok(Self::make(
            self.mag.checked_mul(&rhs.mag)?,
            self.scale + rhs.scale,
        ))
    }

    /// Render with the radix point reinserted at `digits − scale` from the
    /// right, zero-padded so the integer part always has at least one digit,
    /// with any sign character ahead of the padding.
    pub fn format(&self) -> String {
        if self.scale == 0 {
            return self.mag.format();
        }
        let sys = self.system();
        let rendered = self.mag.format();
        let (negative, digits) = match rendered.strip_prefix(sys.negative_char()) {
            Some(rest) => (true, rest),
            None => (false, rendered.as_str()),
        };
        let zero = sys.to_char(0);
        // digit characters are single-byte ASCII, so byte positions are
        // character positions
        let mut body = String::with_capacity(digits.len() + self.scale + 2);
        if negative {
            body.push(sys.negative_char());
        }
        for _ in digits.len()..self.scale + 1 {
            body.push(zero);
        }
        body.push_str(digits);
        let point_at = body.len() - self.scale;
        body.insert(point_at, sys.radix_point_char());
        body
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

// Canonical form makes field equality value equality.
impl PartialEq for RadixDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.scale == other.scale && self.mag == other.mag
    }
}

impl Eq for RadixDecimal {}

impl PartialOrd for RadixDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RadixDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = Self::aligned(self, other);
        a.cmp(&b)
    }
}

impl Hash for RadixDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scale.hash(state);
        self.mag.hash(state);
    }
}

// Infallible operators for same-system values (panic on mismatch - use
// checked_* when the operands may come from different systems)
impl Add for &RadixDecimal {
    type Output = RadixDecimal;

    fn add(self, rhs: &RadixDecimal) -> RadixDecimal {
        self.checked_add(rhs).expect("radix decimal digit system mismatch")
    }
}

impl Sub for &RadixDecimal {
    type Output = RadixDecimal;

    fn sub(self, rhs: &RadixDecimal) -> RadixDecimal {
        self.checked_sub(rhs).expect("radix decimal digit system mismatch")
    }
}

impl Mul for &RadixDecimal {
    type Output = RadixDecimal;

    fn mul(self, rhs: &RadixDecimal) -> RadixDecimal {
        self.checked_mul(rhs).expect("radix decimal digit system mismatch")
    }
}

impl fmt::Display for RadixDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

// ============================================================================
// Tests
// ============================================================================
