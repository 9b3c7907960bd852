use super::*;

use crate::observe::{Observer, Op};
use crate::policy::Outcome;
use crate::posit::real::Unrounded;
use crate::Invalid;

/// The layout of an IEEE 754 binary floating point type, so that conversions can be written once
/// for both [`f32`] and [`f64`].
trait Ieee: Copy {
  /// Width of the type.
  const BITS: u32;
  /// Significand bits, including the hidden bit.
  const MANTISSA_DIGITS: u32;
  /// Exponent bias (the unbiased exponent of 1.0 is 0).
  const BIAS: i32;

  fn to_raw(self) -> u64;
  fn of_raw(raw: u64) -> Self;

  const EXP_MASK: u64 = (1 << (Self::BITS - Self::MANTISSA_DIGITS)) - 1;
  const MANTISSA_MASK: u64 = (1 << (Self::MANTISSA_DIGITS - 1)) - 1;
}

impl Ieee for f32 {
  const BITS: u32 = 32;
  const MANTISSA_DIGITS: u32 = f32::MANTISSA_DIGITS;
  const BIAS: i32 = f32::MAX_EXP - 1;

  #[inline]
  fn to_raw(self) -> u64 { u64::from(self.to_bits()) }

  #[inline]
  fn of_raw(raw: u64) -> Self { f32::from_bits(raw as u32) }
}

impl Ieee for f64 {
  const BITS: u32 = 64;
  const MANTISSA_DIGITS: u32 = f64::MANTISSA_DIGITS;
  const BIAS: i32 = f64::MAX_EXP - 1;

  #[inline]
  fn to_raw(self) -> u64 { self.to_bits() }

  #[inline]
  fn of_raw(raw: u64) -> Self { f64::from_bits(raw) }
}

/// The exact value of a float, or `Err(is_nan_or_inf)` if it is not finite and nonzero.
fn float_to_unrounded<F: Ieee>(x: F) -> Result<Unrounded, bool> {
  let raw = x.to_raw();
  let sign = raw >> (F::BITS - 1) == 1;
  let exponent = (raw >> (F::MANTISSA_DIGITS - 1)) & F::EXP_MASK;
  let mantissa = raw & F::MANTISSA_MASK;
  if exponent == F::EXP_MASK {
    return Err(true)
  }
  // Normals have a hidden bit and a biased exponent; subnormals have neither, and share the
  // exponent of the smallest normals.
  let significand = if exponent != 0 { mantissa | 1 << (F::MANTISSA_DIGITS - 1) } else { mantissa };
  if significand == 0 {
    return Err(false)
  }
  let lsb_scale = (exponent.max(1) as i32) - F::BIAS - (F::MANTISSA_DIGITS as i32 - 1);
  Ok(Unrounded::normalise(sign, lsb_scale + 127, u128::from(significand), false))
}

/// Round the exact value `(-1)^sign × significand × 2^(scale - 63)` to the nearest float, ties to
/// even, with overflow to infinity and gradual underflow to subnormals and 0.
fn round_to_float<F: Ieee>(sign: bool, scale: i32, significand: u64) -> F {
  debug_assert!(significand >> 63 == 1);
  let sign_bit = u64::from(sign) << (F::BITS - 1);
  let biased = scale + F::BIAS;
  if biased > 2 * F::BIAS {
    return F::of_raw(sign_bit | F::EXP_MASK << (F::MANTISSA_DIGITS - 1))
  }
  // The number of low bits of `significand` that do not fit, which is more for subnormals.
  let drop = (64 - F::MANTISSA_DIGITS) as i32 + if biased >= 1 { 0 } else { 1 - biased };
  let drop = drop.min(127) as u32;
  let significand = u128::from(significand);
  let kept = significand >> drop;
  let round = (significand >> (drop - 1)) & 1 == 1;
  let sticky = significand & ((1 << (drop - 1)) - 1) != 0;
  let kept = (kept + u128::from(round && (sticky || kept & 1 == 1))) as u64;
  // Adding `kept` (hidden bit included) on top of `biased - 1` lets a carry out of the mantissa
  // bump the exponent: from the largest subnormal to the smallest normal, or from the largest
  // finite to infinity.
  let base = if biased >= 1 { ((biased - 1) as u64) << (F::MANTISSA_DIGITS - 1) } else { 0 };
  F::of_raw(sign_bit | (base + kept))
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  fn from_float_with<F: Ieee>(value: F, obs: &mut impl Observer) -> Outcome<Self> {
    match float_to_unrounded(value) {
      Ok(exact) => exact.round_observed(Op::Convert, obs),
      Err(true) => Self::invalid(Op::Convert, Invalid::NarOperand, obs),
      Err(false) => Self::exact(Op::Convert, Self::ZERO, obs),
    }
  }

  /// Convert an `f64` into a posit, rounding it, together with any condition met, telling `obs`
  /// about each step. Infinities and NaNs convert to NaR, and count as a NaR operand.
  pub fn from_f64_with(value: f64, obs: &mut impl Observer) -> Outcome<Self> {
    Self::from_float_with(value, obs)
  }

  /// Convert an `f32` into a posit. See [`Self::from_f64_with`].
  pub fn from_f32_with(value: f32, obs: &mut impl Observer) -> Outcome<Self> {
    Self::from_float_with(value, obs)
  }

  /// As [`Self::round_from`], but an error if `value` is not finite or is out of range.
  ///
  /// ```
  /// # use tapered_posit::{p8, PositError, RoundFrom};
  /// assert_eq!(p8::checked_from_f64(1e6), Ok(p8::round_from(1e6)));
  /// assert_eq!(p8::checked_from_f64(1e9), Err(PositError::Overflow));
  /// ```
  pub fn checked_from_f64(value: f64) -> Result<Self, crate::PositError> {
    Self::from_f64_with(value, &mut crate::Silent).into_result()
  }

  /// As [`Self::checked_from_f64`], for `f32`.
  pub fn checked_from_f32(value: f32) -> Result<Self, crate::PositError> {
    Self::from_f32_with(value, &mut crate::Silent).into_result()
  }

  fn to_float<F: Ieee>(self, nan: F, zero: F) -> F {
    match self.to_real() {
      Ok(x) => round_to_float(x.sign, x.scale, x.significand),
      Err(true) => nan,
      Err(false) => zero,
    }
  }

  /// The `f64` nearest to `self` (NaN if `self` is NaR).
  #[inline]
  pub fn to_f64(self) -> f64 {
    self.to_float(f64::NAN, 0.)
  }

  /// The `f32` nearest to `self` (NaN if `self` is NaR, infinity if `self` is beyond
  /// [`f32::MAX`]).
  #[inline]
  pub fn to_f32(self) -> f32 {
    self.to_float(f32::NAN, 0.)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<f32> for Posit<N, ES, Int> {
  /// Convert an `f32` into a `Posit`, rounding it (if necessary). Infinities and NaNs convert to
  /// [NaR](Posit::NAR).
  fn round_from(value: f32) -> Self {
    Self::from_float_with(value, &mut crate::Silent).value
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<f64> for Posit<N, ES, Int> {
  /// Convert an `f64` into a `Posit`, rounding it (if necessary). Infinities and NaNs convert to
  /// [NaR](Posit::NAR).
  fn round_from(value: f64) -> Self {
    Self::from_float_with(value, &mut crate::Silent).value
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<Posit<N, ES, Int>> for f32 {
  /// See [`Posit::to_f32`].
  fn round_from(value: Posit<N, ES, Int>) -> Self {
    value.to_f32()
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<Posit<N, ES, Int>> for f64 {
  /// See [`Posit::to_f64`].
  fn round_from(value: Posit<N, ES, Int>) -> Self {
    value.to_f64()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::rational::Rational;
  use malachite::base::num::conversion::traits::RoundingFrom;
  use malachite::base::rounding_modes::RoundingMode;

  #[test]
  fn scenario_tenth() {
    let p = crate::p16::round_from(0.1);
    let error = (p.to_f64() - 0.1).abs();
    assert!(error <= p.ulp().to_f64(), "{p:?}");
    assert_eq!(p.to_f64(), 0.10000610351562500);
  }

  #[test]
  fn floats_out_of_range() {
    use crate::{p8, p64};
    assert_eq!(p8::round_from(1e300), p8::MAX);
    assert_eq!(p8::round_from(-1e300), p8::MIN);
    assert_eq!(p8::round_from(1e-300), p8::MIN_POSITIVE);
    assert_eq!(p8::round_from(-5e-324), p8::MAX_NEGATIVE);
    assert_eq!(p8::round_from(f64::INFINITY), p8::NAR);
    assert_eq!(p8::round_from(-0.0f32), p8::ZERO);
    assert_eq!(p64::MAX.to_f32(), f32::INFINITY);
    assert_eq!(p64::MIN.to_f32(), f32::NEG_INFINITY);
    assert_eq!(p64::MIN_POSITIVE.to_f32(), 0.);
    assert_eq!(p64::MAX.to_f64(), 2f64.powi(248));
    assert_eq!(p8::checked_from_f64(f64::NAN), Err(Invalid::NarOperand.into()));
    assert_eq!(p8::checked_from_f64(1e-300), Ok(p8::MIN_POSITIVE));
  }

  #[test]
  fn float_subnormals() {
    // The smallest f64 subnormal is 2^-1074, which p64 cannot reach but a wider ES can.
    assert_eq!(crate::p64::round_from(f64::from_bits(1)), crate::p64::MIN_POSITIVE);
    assert_eq!(Posit::<64, 5, i64>::round_from(f64::from_bits(1)).to_f64(), f64::from_bits(1));
    assert_eq!(crate::p64::round_from(f32::from_bits(1)).to_f64(), 2f64.powi(-149));
    assert_eq!(crate::p64::round_from(f32::from_bits(3)).to_f64(), 3. * 2f64.powi(-149));
    // Rounding into the subnormals of the target.
    let tiny = crate::p64::round_from(2f64.powi(-140));
    assert_eq!(tiny.to_f32(), f32::from_bits(1 << 9));
    let tiny = crate::p64::round_from(3. * 2f64.powi(-150));
    assert_eq!(tiny.to_f32(), f32::from_bits(2));
  }

  #[test]
  fn round_to_float_ties() {
    // 1 + 2^-24 is halfway between 1 and the next f32: ties to even, i.e. to 1.
    assert_eq!(round_to_float::<f32>(false, 0, 1 << 63 | 1 << 39), 1.);
    // 1 + 3 × 2^-24 is halfway between two f32s, and goes up to the even one.
    assert_eq!(round_to_float::<f32>(false, 0, 1 << 63 | 3 << 39), 1. + 2. * f32::EPSILON);
    assert_eq!(round_to_float::<f32>(false, 0, 1 << 63 | 1 << 39 | 1), 1. + f32::EPSILON);
    // Largest finite, and just past it.
    assert_eq!(round_to_float::<f32>(true, 127, !0 << 40), f32::MIN);
    assert_eq!(round_to_float::<f32>(false, 127, !0), f32::INFINITY);
    // Largest subnormal rounding up to the smallest normal.
    assert_eq!(round_to_float::<f64>(false, -1023, !0), f64::MIN_POSITIVE);
  }

  /// Every posit of up to 53 bits is exactly representable as an `f64`.
  fn exact_in_f64<const N: u32, const ES: u32, Int: crate::Int>() {
    for p in Posit::<N, ES, Int>::cases_exhaustive_all() {
      let float = p.to_f64();
      match Rational::try_from(p) {
        Ok(exact) => assert_eq!(Rational::try_from(float).ok(), Some(exact), "{p:?}"),
        Err(_) => assert!(float.is_nan()),
      }
      assert_eq!(Posit::<N, ES, Int>::round_from(float), p);
      assert_eq!(Posit::<N, ES, Int>::round_from(p.to_f32()), p);
    }
  }

  #[test]
  fn p8_exact() { exact_in_f64::<8, 2, i8>() }

  #[test]
  fn posit_10_0_exact() { exact_in_f64::<10, 0, i16>() }

  #[test]
  fn posit_10_3_exact() { exact_in_f64::<10, 3, i16>() }

  #[test]
  fn p16_exact() { exact_in_f64::<16, 2, i16>() }

  mod sampled {
    use super::*;
    use ::proptest::prelude::*;

    /// Instantiate the tests of rounding from a float type into a posit type.
    macro_rules! test_from_float {
      ($name:ident, $float:ty, $posit:ty) => {
        proptest!{
          #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
          #[test]
          fn $name(float: $float) {
            let posit = <$posit>::round_from(float);
            match Rational::try_from(float) {
              Ok(exact) => prop_assert_eq!(posit, crate::posit::rational::round(&exact)),
              Err(_) => prop_assert_eq!(posit, <$posit>::NAR),
            }
          }
        }
      };
    }

    /// Instantiate the tests of rounding from a posit type into a float type, for posit types
    /// whose range the float type covers.
    macro_rules! test_to_float {
      ($name:ident, $posit:ty, $float:ty) => {
        proptest!{
          #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
          #[test]
          fn $name(posit in <$posit>::cases_proptest()) {
            let exact = Rational::try_from(posit).unwrap();
            let (expected, _) = <$float>::rounding_from(&exact, RoundingMode::Nearest);
            prop_assert_eq!(<$float>::round_from(posit), expected);
          }
        }
      };
    }

    test_from_float!{f64_p8, f64, crate::p8}
    test_from_float!{f64_p16, f64, crate::p16}
    test_from_float!{f64_p32, f64, crate::p32}
    test_from_float!{f64_p64, f64, crate::p64}
    test_from_float!{f64_posit_10_3, f64, Posit::<10, 3, i16>}
    test_from_float!{f32_p8, f32, crate::p8}
    test_from_float!{f32_p16, f32, crate::p16}
    test_from_float!{f32_p32, f32, crate::p32}
    test_from_float!{f32_p64, f32, crate::p64}

    test_to_float!{p32_f32, crate::p32, f32}
    test_to_float!{p64_f64, crate::p64, f64}
    test_to_float!{p16_f32, crate::p16, f32}
  }
}
