//! An arbitrary-precision reference implementation of posit decoding and rounding, using
//! [malachite] rationals. Everything in the crate is tested against this.
//!
//! This is deliberately written in the most explicit way possible, walking the pattern bit by bit
//! and sharing no code with the codec, since it is what we check the codec against.

use super::*;

use core::cmp::Ordering;
use malachite::rational::Rational;
use malachite::base::num::arithmetic::traits::{Abs, PowerOf2};

/// The error type returned when a [Posit] cannot be converted to a [Rational] because it is
/// [NaR](Posit::NAR).
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub struct IsNaR;

/// The value of the positive `n`-bit pattern `bits` (with `es` exponent bits), for `n` up to 65.
pub fn value_of(bits: u128, n: u32, es: u32) -> Rational {
  assert!(bits > 0 && bits < 1 << (n - 1), "{bits:b} is not a positive {n}-bit pattern");
  // The `i`th bit after the sign bit, or 0 past the end of the pattern.
  let bit = |i: u32| i < n - 1 && (bits >> (n - 2 - i)) & 1 == 1;

  // Regime: a run of identical bits. A run of `r` 1s is `r - 1`, a run of `r` 0s is `-r`.
  let first = bit(0);
  let mut i = 0;
  while i < n - 1 && bit(i) == first {
    i += 1;
  }
  let regime = if first { i as i64 - 1 } else { -(i as i64) };
  // Skip the terminating bit.
  i += 1;

  // Exponent: the next `es` bits, where bits past the end of the pattern are 0.
  let mut exponent = 0i64;
  for _ in 0 .. es {
    exponent = 2 * exponent + i64::from(bit(i));
    i += 1;
  }

  // Fraction: the rest, with the hidden bit.
  let mut fraction = Rational::from(1);
  let mut weight = Rational::from_signeds(1, 2);
  while i < n - 1 {
    if bit(i) {
      fraction += &weight;
    }
    weight /= Rational::from(2);
    i += 1;
  }

  Rational::power_of_2(regime * (1 << es) + exponent) * fraction
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> TryFrom<Posit<N, ES, Int>> for Rational {
  type Error = IsNaR;

  fn try_from(value: Posit<N, ES, Int>) -> Result<Self, Self::Error> {
    let bits = value.as_i64();
    if value == Posit::ZERO {
      Ok(Rational::from(0))
    } else if value == Posit::NAR {
      Err(IsNaR)
    } else if bits < 0 {
      Ok(-value_of(u128::from(bits.unsigned_abs()), N, ES))
    } else {
      Ok(value_of(bits as u128, N, ES))
    }
  }
}

/// The correctly rounded posit for a value `x` of sign `negative`, whose magnitude is only known
/// through `cmp`: `cmp(c)` compares a candidate magnitude `c` with `|x|`.
///
/// Rounding is to nearest, where the tie point between two adjacent posits `lo` and `hi` is the
/// value of the `N+1`-bit pattern made of `lo` followed by a `1` (rounding the bit pattern, not
/// the value). Ties go to the even pattern. Nothing rounds to 0 or NaR.
pub fn round_with<const N: u32, const ES: u32, Int: crate::Int>(
  negative: bool,
  cmp: impl Fn(&Rational) -> Ordering,
) -> Posit<N, ES, Int> {
  let value = |p: u64| value_of(u128::from(p), N, ES);
  let max = (1u64 << (N - 1)) - 1;
  let magnitude =
    if cmp(&value(max)) != Ordering::Greater {
      max
    } else if cmp(&value(1)) != Ordering::Less {
      1
    } else {
      // Invariant: value(lo) < |x| < value(hi)
      let (mut lo, mut hi) = (1, max);
      while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        match cmp(&value(mid)) {
          Ordering::Less => lo = mid,
          Ordering::Greater => hi = mid,
          Ordering::Equal => { lo = mid; hi = mid + 1; break }
        }
      }
      if cmp(&value(lo)) == Ordering::Equal {
        lo
      } else {
        let tie = value_of(u128::from(lo) << 1 | 1, N + 1, ES);
        match cmp(&tie) {
          Ordering::Greater => lo,
          Ordering::Less => hi,
          Ordering::Equal => if lo % 2 == 0 { lo } else { hi },
        }
      }
    };
  let magnitude = magnitude as i64;
  Posit::from_i64(if negative { -magnitude } else { magnitude })
}

/// The correctly rounded posit for an exact value.
pub fn round<const N: u32, const ES: u32, Int: crate::Int>(exact: &Rational) -> Posit<N, ES, Int> {
  if *exact == 0 {
    return Posit::ZERO
  }
  let magnitude = exact.abs();
  round_with(*exact < 0, |c| c.cmp(&magnitude))
}

/// The correctly rounded square root of an exact nonnegative value.
pub fn round_sqrt<const N: u32, const ES: u32, Int: crate::Int>(exact: &Rational) -> Posit<N, ES, Int> {
  assert!(*exact >= 0);
  if *exact == 0 {
    return Posit::ZERO
  }
  round_with(false, |c| (c * c).cmp(exact))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn posit_6_2() {
    // A hand-checked table of all positive patterns of a 6-bit posit with 2 exponent bits.
    let table: [(u128, i64, i64); 31] = [
      (0b00001, 1, -16),
      (0b00010, 1, -12),
      (0b00011, 1, -10),
      (0b00100, 1, -8),
      (0b00101, 1, -7),
      (0b00110, 1, -6),
      (0b00111, 1, -5),
      (0b01000, 2, -4 - 1),
      (0b01001, 3, -4 - 1),
      (0b01010, 2, -3 - 1),
      (0b01011, 3, -3 - 1),
      (0b01100, 2, -2 - 1),
      (0b01101, 3, -2 - 1),
      (0b01110, 2, -1 - 1),
      (0b01111, 3, -1 - 1),
      (0b10000, 2, 0 - 1),
      (0b10001, 3, 0 - 1),
      (0b10010, 2, 1 - 1),
      (0b10011, 3, 1 - 1),
      (0b10100, 2, 2 - 1),
      (0b10101, 3, 2 - 1),
      (0b10110, 2, 3 - 1),
      (0b10111, 3, 3 - 1),
      (0b11000, 1, 4),
      (0b11001, 1, 5),
      (0b11010, 1, 6),
      (0b11011, 1, 7),
      (0b11100, 1, 8),
      (0b11101, 1, 10),
      (0b11110, 1, 12),
      (0b11111, 1, 16),
    ];
    for (bits, mantissa, exp) in table {
      assert_eq!(
        value_of(bits, 6, 2),
        Rational::from(mantissa) * Rational::power_of_2(exp),
        "{bits:05b}",
      );
    }
  }

  #[test]
  fn try_from() {
    assert_eq!(Rational::try_from(crate::p8::ZERO), Ok(Rational::from(0)));
    assert_eq!(Rational::try_from(crate::p8::NAR), Err(IsNaR));
    assert_eq!(Rational::try_from(crate::p8::MINUS_ONE), Ok(Rational::from(-1)));
    assert_eq!(Rational::try_from(crate::p64::ONE), Ok(Rational::from(1)));
  }

  #[test]
  fn round_exact_values() {
    for p in Posit::<8, 2, i8>::cases_exhaustive() {
      let x = Rational::try_from(p).unwrap();
      assert_eq!(round::<8, 2, i8>(&x), p);
    }
  }

  #[test]
  fn round_ties() {
    type P = Posit<6, 2, i8>;
    let r = |x: Rational| round::<6, 2, i8>(&x).to_bits();
    // Between 1 (0b010000) and 1.5 (0b010001), the tie is 1.25: to even.
    assert_eq!(r(Rational::from_signeds(5, 4)), 0b010000);
    assert_eq!(r(Rational::from_signeds(21, 16)), 0b010001);
    // Between 2^-8 (0b000100) and 2^-7 (0b000101) the next bit would be a fraction bit, so the tie
    // is the arithmetic mean 1.5 × 2^-8.
    assert_eq!(r(Rational::from_signeds(3, 512)), 0b000100);
    // Between 2^-12 (0b000010) and 2^-10 (0b000011) the next bit would be an exponent bit, so the
    // tie is 2^-11, the geometric mean, not the arithmetic one (2.5 × 2^-12).
    assert_eq!(r(Rational::from_signeds(7, 1 << 14)), 0b000010);
    assert_eq!(r(Rational::from_signeds(9, 1 << 14)), 0b000011);
    // Never to zero or NaR.
    assert_eq!(round::<6, 2, i8>(&Rational::from_signeds(1, 1 << 30)), P::MIN_POSITIVE);
    assert_eq!(round::<6, 2, i8>(&Rational::from(-(1 << 30))), P::MIN);
  }
}
