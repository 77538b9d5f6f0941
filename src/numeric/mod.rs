// ============================================================================
// Numeric Module
// Exact arbitrary-radix arithmetic for rank computation
// ============================================================================
//
// This module provides:
// - DigitSystem: the pluggable radix/alphabet capability (BASE_36 default)
// - RadixInt: arbitrary-precision signed integer in the configured radix
// - RadixDecimal: exact fixed-point decimal built on RadixInt
// - NumericError: error types for parsing and arithmetic
//
// Design principles:
// - No floating-point operations; every result is exact
// - Immutable value types; every operation returns a new value
// - Canonical forms enforced on construction (no trailing zeros)
// - Fallible entry points return Result; operators are same-system sugar

mod decimal;
mod errors;
mod integer;
mod system;

pub use decimal::RadixDecimal;
pub use errors::{NumericError, NumericResult};
pub use integer::{RadixInt, Sign};
pub use system::{DigitSystem, BASE_36};
