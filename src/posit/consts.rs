use super::*;
use crate::underlying::const_of_i64;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The pattern `0b1000…0`, sign-extended to 64 bits. Every other special pattern is derived
  /// from it.
  const SIGN_ONLY: i64 = i64::MIN >> (64 - N);

  /// Zero (`0`), the additive identity element.
  pub const ZERO: Self = Self(Int::ZERO);

  /// Not-a-real (`NaR`), the result of every undefined operation.
  //
  // Represented by the bit pattern `0b1000…0`.
  pub const NAR: Self = Self(const_of_i64(Self::SIGN_ONLY));

  /// Largest representable value (*maxpos*), equal to `-MIN`.
  //
  // Represented by the bit pattern `0b0111…1`.
  pub const MAX: Self = Self(const_of_i64(!Self::SIGN_ONLY));

  /// Smallest representable value (*maxneg*), equal to `-MAX`.
  ///
  /// Not to be confused with the smallest absolute value, i.e. [`Self::MIN_POSITIVE`]!
  //
  // Represented by the bit pattern `0b100…01`.
  pub const MIN: Self = Self(const_of_i64(Self::SIGN_ONLY + 1));

  /// Smallest *positive* value (*minpos*), equal to `-MAX_NEGATIVE`.
  //
  // Represented by the bit pattern `0b000…01`.
  pub const MIN_POSITIVE: Self = Self(const_of_i64(1));

  /// Largest *negative* value (*minneg*), equal to `-MIN_POSITIVE`.
  //
  // Represented by the bit pattern `0b111…1`.
  pub const MAX_NEGATIVE: Self = Self(const_of_i64(-1));

  /// One (`1`), the multiplicative identity element.
  //
  // Represented by the bit pattern `0b0100…0`.
  pub const ONE: Self = Self(const_of_i64(-(Self::SIGN_ONLY >> 1)));

  /// Negative one (`-1`).
  //
  // Represented by the bit pattern `0b1100…0`.
  pub const MINUS_ONE: Self = Self(const_of_i64(Self::SIGN_ONLY >> 1));

  /// The largest scale; [`Self::MAX`] = 2<sup>[`Self::MAX_SCALE`]</sup>.
  pub const MAX_SCALE: i32 = ((N - 2) << ES) as i32;

  /// The smallest scale; [`Self::MIN_POSITIVE`] = 2<sup>[`Self::MIN_SCALE`]</sup>.
  pub const MIN_SCALE: i32 = -Self::MAX_SCALE;

  /// The number of fraction bits of the values with the most precision (those with magnitude in
  /// `[1/useed, useed)`).
  pub const FRACTION_BITS: u32 = N.saturating_sub(3 + ES);

  /// log<sub>2</sub> of *useed*, the factor between consecutive regimes.
  pub const USEED_LOG2: u32 = 1 << ES;

  /// The difference between 1 and the next posit above it (*machine epsilon*).
  pub fn epsilon() -> Self {
    Self::ONE.next() - Self::ONE
  }
}
