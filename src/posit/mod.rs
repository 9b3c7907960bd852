//! This module and its submodules contain the posit type itself, and everything needed to decode,
//! compute with, round, and encode it.
//!
//! Every arithmetic operation follows the same pipeline:
//!
//! ```text
//! bits ──decode──▶ Fields ──to_real──▶ Real ──kernel──▶ Unrounded ──round──▶ Fields ──encode──▶ bits
//! ```
//!
//! with early exits for zero and NaR before the kernel. Only the very last step (`round` into
//! `encode_round`) ever discards information, which is what makes every operator correctly
//! rounded.
//!
//! Some notation used in the comments:
//!
//!   - **Leftmost bits/msb**: most-significant bits.
//!   - **Rightmost bits/lsb**: least-significant bits.
//!   - **Scale**: the power of two of the leading bit of a value, i.e. `floor(log2(|x|))`.
//!   - **Left-aligned**: a fraction stored so that its first bit (weight ½) is the msb of the word.

/// A Posit floating point number with `N` bits and `ES` exponent bits, using `Int` as its
/// underlying storage type.
///
/// Examples:
///
/// ```
/// # use tapered_posit::Posit;
/// type Foo = Posit::<32, 2, i32>;  // A 32-bit posit with 2-bit exponent field, stored in a
///                                  // 32-bit machine type
/// type Bar = Posit::<6, 1, i8>;  // A 6-bit posit with 1-bit exponent field, stored in an
///                                // 8-bit machine type.
/// ```
#[derive(Clone, Copy)]
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash)]  // Eq and Ord are the same as for two's complement int
pub struct Posit<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> (Int);

/// Basics: bit access, compile-time checks on `N` and `ES`.
mod basics;

/// Constants (zero, NaR, min, max, min_positive, etc.)
mod consts;

/// Bit pattern ⇄ decomposed field record.
pub mod codec;

/// Decomposed record ⇄ exact or extended-precision real values, and rounding.
pub(crate) mod real;

/// Add, sub, mul, div, sqrt, fused multiply-add.
mod ops;
#[cfg(feature = "bench")]
pub(crate) use ops::{add_kernel, div_kernel, mul_kernel};

/// Negation, absolute value, next, prior, and ulp.
mod unary;

/// Conversions to and from ints, floats, and other posit types.
pub mod convert;

/// Text formatting and parsing.
mod fmt;
pub use fmt::{Layout, Triple};

/// The exact accumulator.
mod quire;
pub use quire::Quire;

/// Arbitrary-precision reference used to test all of the above.
#[cfg(test)]
mod rational;
