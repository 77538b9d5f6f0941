// ============================================================================
// Radix Integer
// Arbitrary-precision signed integer in a configurable radix
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::system::DigitSystem;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

/// Digit magnitude, least-significant digit first. Rank magnitudes rarely
/// exceed six integer digits plus a few fractional digits, so they stay
/// inline.
pub(crate) type Digits = SmallVec<[u32; 8]>;

/// Sign of a [`RadixInt`]. The variant order gives `Negative < Zero < Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    fn flip(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// Arbitrary-precision signed integer over a [`DigitSystem`].
///
/// Stores a sign and a least-significant-first digit magnitude. Values are
/// immutable; every operation returns a new value. Canonical form: zero is
/// sign `Zero` with magnitude `[0]`, and a non-zero magnitude never carries
/// a most-significant zero digit.
///
/// Arithmetic between values from different digit systems fails with
/// `SystemMismatch` through the `checked_*` methods; the operator impls are
/// same-system sugar and panic on mismatch.
#[derive(Debug, Clone)]
pub struct RadixInt {
    sys: &'static DigitSystem,
    sign: Sign,
    mag: Digits,
}

impl RadixInt {
    pub fn zero(sys: &'static DigitSystem) -> Self {
        Self {
            sys,
            sign: Sign::Zero,
            mag: smallvec![0],
        }
    }

    pub fn one(sys: &'static DigitSystem) -> Self {
        Self {
            sys,
            sign: Sign::Positive,
            mag: smallvec![1],
        }
    }

    /// Decompose an unsigned machine integer into digits of the system's base.
    pub fn from_u64(sys: &'static DigitSystem, value: u64) -> Self {
        if value == 0 {
            return Self::zero(sys);
        }
        let base = sys.base() as u64;
        let mut mag = Digits::new();
        let mut rest = value;
        while rest > 0 {
            mag.push((rest % base) as u32);
            rest /= base;
        }
        Self {
            sys,
            sign: Sign::Positive,
            mag,
        }
    }

    /// Canonicalizing constructor: trims most-significant zero digits and
    /// collapses an all-zero magnitude to canonical zero.
    fn make(sys: &'static DigitSystem, sign: Sign, mut mag: Digits) -> Self {
        while mag.len() > 1 && mag.last() == Some(&0) {
            mag.pop();
        }
        if mag.is_empty() || (mag.len() == 1 && mag[0] == 0) {
            return Self::zero(sys);
        }
        Self { sys, sign, mag }
    }

    /// Parse an optionally signed numeral.
    ///
    /// An optional leading sign character (default positive) followed by one
    /// or more digit characters. Leading zero digits are normalized away.
    ///
    /// # Errors
    /// `EmptyDigits` when no digit characters remain after the sign;
    /// `InvalidCharacter` for anything outside the alphabet.
    pub fn parse(input: &str, sys: &'static DigitSystem) -> NumericResult<Self> {
        let (sign, digits) = if let Some(rest) = input.strip_prefix(sys.negative_char()) {
            (Sign::Negative, rest)
        } else if let Some(rest) = input.strip_prefix(sys.positive_char()) {
            (Sign::Positive, rest)
        } else {
            (Sign::Positive, input)
        };
        if digits.is_empty() {
            return Err(NumericError::EmptyDigits);
        }
        let mut mag = Digits::with_capacity(digits.len());
        for c in digits.chars().rev() {
            mag.push(sys.to_digit(c)?);
        }
        Ok(Self::make(sys, sign, mag))
    }

    /// Render as a numeral, most-significant digit first. Zero is the single
    /// zero character with no sign; positive values carry no sign character.
    pub fn format(&self) -> String {
        if self.is_zero() {
            return self.sys.to_char(0).to_string();
        }
        let mut out = String::with_capacity(self.mag.len() + 1);
        if self.sign == Sign::Negative {
            out.push(self.sys.negative_char());
        }
        for &d in self.mag.iter().rev() {
            out.push(self.sys.to_char(d));
        }
        out
    }

    #[inline]
    pub fn system(&self) -> &'static DigitSystem {
        self.sys
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    /// Digit at magnitude position `i` (0 = least significant); positions
    /// beyond the stored length read as zero.
    #[inline]
    pub fn digit_at(&self, i: usize) -> u32 {
        self.mag.get(i).copied().unwrap_or(0)
    }

    #[inline]
    pub fn digit_count(&self) -> usize {
        self.mag.len()
    }

    /// Multiply by `base^n` by appending `n` low zero digits.
    pub fn shift_left(&self, n: usize) -> Self {
        if n == 0 || self.is_zero() {
            return self.clone();
        }
        let mut mag = Digits::with_capacity(self.mag.len() + n);
        mag.extend(std::iter::repeat(0).take(n));
        mag.extend_from_slice(&self.mag);
        Self {
            sys: self.sys,
            sign: self.sign,
            mag,
        }
    }

    /// Integer-divide by `base^n` by dropping the `n` low digits, discarding
    /// the remainder.
    pub fn shift_right(&self, n: usize) -> Self {
        if n == 0 {
            return self.clone();
        }
        if n >= self.mag.len() {
            return Self::zero(self.sys);
        }
        Self::make(self.sys, self.sign, Digits::from_slice(&self.mag[n..]))
    }

    fn ensure_same_system(&self, rhs: &Self) -> NumericResult<()> {
        if std::ptr::eq(self.sys, rhs.sys) {
            Ok(())
        } else {
            Err(NumericError::SystemMismatch)
        }
    }

    /// Signed addition.
    ///
    /// # Errors
    /// `SystemMismatch` when the operands belong to different digit systems.
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_system(rhs)?;
        if self.is_zero() {
            return Ok(rhs.clone());
        }
        if rhs.is_zero() {
            return Ok(self.clone());
        }
        let base = self.sys.base();
        if self.sign == rhs.sign {
            return Ok(Self::make(
                self.sys,
                self.sign,
                add_mag(base, &self.mag, &rhs.mag),
            ));
        }
        // opposite signs: subtract the smaller magnitude from the larger,
        // result takes the sign of the larger
        Ok(match cmp_mag(&self.mag, &rhs.mag) {
            Ordering::Equal => Self::zero(self.sys),
            Ordering::Greater => {
                Self::make(self.sys, self.sign, sub_mag(base, &self.mag, &rhs.mag))
            },
            Ordering::Less => Self::make(self.sys, rhs.sign, sub_mag(base, &rhs.mag, &self.mag)),
        })
    }

    /// Signed subtraction.
    ///
    /// # Errors
    /// `SystemMismatch` when the operands belong to different digit systems.
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        self.checked_add(&rhs.clone().neg())
    }

    /// Schoolbook multiplication.
    ///
    /// # Errors
    /// `SystemMismatch` when the operands belong to different digit systems.
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_system(rhs)?;
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::zero(self.sys));
        }
        let sign = if self.sign == rhs.sign {
            Sign::Positive
        } else {
            Sign::Negative
        };
        Ok(Self::make(
            self.sys,
            sign,
            mul_mag(self.sys.base(), &self.mag, &rhs.mag),
        ))
    }
}

// ============================================================================
// Magnitude Arithmetic
// Little-endian digit sequences in the given base
// ============================================================================

/// Compare magnitudes. The no-leading-zero invariant makes length decisive.
fn cmp_mag(a: &[u32], b: &[u32]) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {
            for i in (0..a.len()).rev() {
                match a[i].cmp(&b[i]) {
                    Ordering::Equal => {},
                    other => return other,
                }
            }
            Ordering::Equal
        },
        other => other,
    }
}

fn add_mag(base: u32, a: &[u32], b: &[u32]) -> Digits {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Digits::with_capacity(long.len() + 1);
    let mut carry = 0u32;
    for (i, &d) in long.iter().enumerate() {
        let sum = d + short.get(i).copied().unwrap_or(0) + carry;
        out.push(sum % base);
        carry = sum / base;
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// Requires `|a| >= |b|`; high zero digits are trimmed by the caller.
fn sub_mag(base: u32, a: &[u32], b: &[u32]) -> Digits {
    let mut out = Digits::with_capacity(a.len());
    let mut borrow = 0u32;
    for (i, &d) in a.iter().enumerate() {
        let take = b.get(i).copied().unwrap_or(0) + borrow;
        if d >= take {
            out.push(d - take);
            borrow = 0;
        } else {
            out.push(d + base - take);
            borrow = 1;
        }
    }
    out
}

fn mul_mag(base: u32, a: &[u32], b: &[u32]) -> Digits {
    let wide_base = base as u64;
    let mut out: Digits = smallvec![0; a.len() + b.len()];
    for (i, &da) in a.iter().enumerate() {
        let mut carry = 0u64;
        for (j, &db) in b.iter().enumerate() {
            let acc = out[i + j] as u64 + da as u64 * db as u64 + carry;
            out[i + j] = (acc % wide_base) as u32;
            carry = acc / wide_base;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let acc = out[k] as u64 + carry;
            out[k] = (acc % wide_base) as u32;
            carry = acc / wide_base;
            k += 1;
        }
    }
    out
}

// ============================================================================
// Trait Implementations
// ============================================================================

// Comparison and hashing are over (sign, magnitude) only; values are only
// ever compared within one digit system (arithmetic enforces the match).
impl PartialEq for RadixInt {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.mag == other.mag
    }
}

impl Eq for RadixInt {}

impl PartialOrd for RadixInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RadixInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => match self.sign {
                Sign::Zero => Ordering::Equal,
                Sign::Positive => cmp_mag(&self.mag, &other.mag),
                Sign::Negative => cmp_mag(&other.mag, &self.mag),
            },
            unequal => unequal,
        }
    }
}

impl Hash for RadixInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.mag.hash(state);
    }
}

impl Neg for RadixInt {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.sign = self.sign.flip();
        self
    }
}

// Infallible operators for same-system values (panic on mismatch - use
// checked_* when the operands may come from different systems)
impl Add for &RadixInt {
    type Output = RadixInt;

    fn add(self, rhs: &RadixInt) -> RadixInt {
        self.checked_add(rhs).expect("radix integer digit system mismatch")
    }
}

impl Sub for &RadixInt {
    type Output = RadixInt;

    fn sub(self, rhs: &RadixInt) -> RadixInt {
        self.checked_sub(rhs).expect("radix integer digit system mismatch")
    }
}

impl Mul for &RadixInt {
    type Output = RadixInt;

    fn mul(self, rhs: &RadixInt) -> RadixInt {
        self.checked_mul(rhs).expect("radix integer digit system mismatch")
    }
}

impl fmt::Display for RadixInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

// ============================================================================
// Tests
// ============================================================================
