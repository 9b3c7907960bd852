//! Conversions between posits and other numeric types (floats, ints, posits of another format).

use super::*;

/// Used to do value-to-value conversions that may *round* the input. It is the reciprocal of
/// [`RoundInto`].
///
/// The interface is identical to the standard [`From`], but unlike the [convention for the `From`
/// trait](core::convert::From#when-to-implement-from), these conversions are _not necessarily
/// lossless_.
///
/// Prefer implementing [`RoundFrom`] over [`RoundInto`], because the former provides the latter
/// for free, and prefer [`RoundInto`] when specifying trait bounds on a generic function. There's
/// also a blanket implementation of `RoundFrom<T> for T`.
///
/// # Rounding
///
/// Into a posit, conversions round in the same way as arithmetic does:
///
///   - If the value is greater in absolute value than the biggest posit, round to it (i.e., never
///     overflow).
///   - If the value is nonzero but smaller in absolute value than the smallest positive posit,
///     round to it (i.e., never underflow).
///   - Otherwise, round to the nearest bit pattern, or in case of a tie, to the even bit pattern.
///
/// Out of a posit, conversions round the way the target type does: to nearest, ties to even, for
/// floats; and likewise, saturating at the ends, for ints.
///
/// # Examples
///
/// Rounding from ints, floats:
/// ```
/// # use tapered_posit::*;
/// assert!(p16::round_from(1) == p16::round_from(1.00000001));
/// assert!(p32::round_from(1) <  p32::round_from(1.00000001));
///
/// assert_eq!(p32::round_from(f64::NAN), p32::NAR);
/// ```
///
/// Rounding to ints, floats:
/// ```
/// # use tapered_posit::*;
/// assert_eq!(f32::round_from(p16::MIN_POSITIVE), 1.3877788e-17);
/// assert_eq!(i64::round_from(p8::MAX), 1 << 24);
///
/// assert!(f64::round_from(p32::NAR).is_nan());
/// ```
pub trait RoundFrom<T> {
  /// Converts to this type from the input type, rounding if needed (see
  /// [Rounding](RoundFrom#rounding)).
  ///
  /// If you're looking for the usual Rust-y conversions ([`From`] if exact, [`TryFrom`] if
  /// fallible), use those traits instead.
  #[must_use]
  fn round_from(value: T) -> Self;
}

/// Used to do value-to-value conversions that may *round* the input. It is the reciprocal of
/// [`RoundFrom`], and is implemented for every pair of types that one is implemented for.
///
/// # Examples
///
/// ```
/// # use tapered_posit::*;
/// assert_eq!(p16::ONE.next(), 1.0004883_f64.round_into());
/// assert_eq!(p32::NAR, f64::NAN.round_into());
/// assert_eq!(1_i64 << 56, p16::MAX.round_into());
/// ```
pub trait RoundInto<T> {
  /// Converts this type into the (usually inferred) input type, rounding if needed (see
  /// [Rounding](RoundFrom#rounding)).
  #[must_use]
  fn round_into(self) -> T;
}

impl<T> RoundFrom<T> for T {
  fn round_from(value: T) -> Self {
    value
  }
}

impl<T, U> RoundInto<U> for T where U: RoundFrom<T> {
  fn round_into(self) -> U {
    U::round_from(self)
  }
}

mod float;
mod int;
mod posit;
