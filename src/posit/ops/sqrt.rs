use super::*;
use crate::posit::real::{Real, Unrounded};

/// The square root of a positive value, to 64 significant bits, plus a sticky bit.
fn sqrt_kernel(x: Real) -> Unrounded {
  debug_assert!(!x.sign);
  // The value is `significand × 2^(scale - 63)`. Shift the significand left so that the power of
  // two left over is even (63 places if `scale` is even, 64 if it is odd), and so that the
  // radicand fills as much of a u128 as possible, giving a 64-bit root.
  let odd = x.scale & 1;
  let radicand = u128::from(x.significand) << (63 + odd);
  let exponent = x.scale - 126 - odd;
  let root = radicand.isqrt();
  let sticky = root * root != radicand;
  // `root` is in [2^63, 2^64), with a scale of 2^(exponent / 2).
  Unrounded::normalise(false, exponent / 2 + 127, root, sticky)
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Return the correctly rounded square root of `self`, together with any condition met (NaR or
  /// negative operand), telling `obs` about each step.
  pub fn sqrt_with(self, obs: &mut impl Observer) -> Outcome<Self> {
    let op = Op::Sqrt;
    let x = match self.to_real() {
      Ok(x) if x.sign => return Self::invalid(op, Invalid::NegativeSqrt, obs),
      Ok(x) => x,
      Err(true) => return Self::nar_operand(op, obs),
      Err(false) => return Self::exact(op, Self::ZERO, obs),
    };
    let x = x.observed(op, 0, obs);
    sqrt_kernel(x).round_observed(op, obs)
  }

  /// Return the correctly rounded square root of `self`. NaR if `self` is negative or NaR.
  ///
  /// The square root of a posit is always within range, so this never saturates.
  ///
  /// ```
  /// # use tapered_posit::p32;
  /// let four = p32::ONE + p32::ONE + p32::ONE + p32::ONE;
  /// assert_eq!(four.sqrt(), p32::ONE + p32::ONE);
  /// assert_eq!(p32::MINUS_ONE.sqrt(), p32::NAR);
  /// ```
  #[inline]
  pub fn sqrt(self) -> Self {
    self.sqrt_with(&mut crate::Silent).value
  }

  /// As [`Self::sqrt`], but an error if `self` is negative or NaR.
  pub fn checked_sqrt(self) -> Result<Self, crate::PositError> {
    self.sqrt_with(&mut crate::Silent).into_result()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::rational::Rational;
  use proptest::prelude::*;

  fn expected<const N: u32, const ES: u32, Int: crate::Int>(a: Posit<N, ES, Int>) -> Posit<N, ES, Int> {
    match Rational::try_from(a) {
      Ok(exact) if exact >= 0 => crate::posit::rational::round_sqrt(&exact),
      _ => Posit::NAR,
    }
  }

  #[test]
  fn specials() {
    assert_eq!(crate::p16::ZERO.sqrt(), crate::p16::ZERO);
    assert_eq!(crate::p16::NAR.sqrt(), crate::p16::NAR);
    assert_eq!(crate::p16::ONE.sqrt(), crate::p16::ONE);
    assert_eq!(crate::p16::MIN_POSITIVE.checked_sqrt().map(|x| x * x), Ok(crate::p16::MIN_POSITIVE));
    assert_eq!(crate::p16::MINUS_ONE.checked_sqrt(), Err(Invalid::NegativeSqrt.into()));
    assert_eq!(crate::p16::MAX_NEGATIVE.sqrt(), crate::p16::NAR);
  }

  #[test]
  fn kernel_exact() {
    // √(2^-5 × 1.5625) = 2^-3 × 1.25 × √2, and √(2^-6 × 1.5625) = 2^-3 × 1.25
    let x = Real { sign: false, scale: -6, significand: 0b11001 << 59 };
    let root = sqrt_kernel(x);
    assert_eq!(root, Unrounded { sign: false, scale: -3, significand: 0b101 << 125, sticky: false });
    let y = sqrt_kernel(Real { scale: -5, ..x });
    assert!(y.sticky);
    assert_eq!(y.scale, -3);
  }

  macro_rules! test_exhaustive {
    ($name:ident, $posit:ty) => {
      #[test]
      fn $name() {
        for a in <$posit>::cases_exhaustive_all() {
          assert_eq!(a.sqrt(), expected(a), "{:?}", a)
        }
      }
    };
  }

  macro_rules! test_proptest {
    ($name:ident, $posit:ty) => {
      proptest!{
        #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
        #[test]
        fn $name(a in <$posit>::cases_proptest_all()) {
          prop_assert_eq!(a.sqrt(), expected(a), "{:?}", a)
        }
      }
    };
  }

  test_exhaustive!{posit_3_0_exhaustive, Posit::<3, 0, i8>}
  test_exhaustive!{posit_5_1_exhaustive, Posit::<5, 1, i8>}
  test_exhaustive!{posit_6_3_exhaustive, Posit::<6, 3, i8>}
  test_exhaustive!{posit_8_0_exhaustive, Posit::<8, 0, i8>}
  test_exhaustive!{p8_exhaustive, crate::p8}
  test_exhaustive!{posit_10_1_exhaustive, Posit::<10, 1, i16>}
  test_exhaustive!{p16_exhaustive, crate::p16}
  test_proptest!{posit_20_4_proptest, Posit::<20, 4, i32>}

  test_proptest!{p32_proptest, crate::p32}
  test_proptest!{posit_40_3_proptest, Posit::<40, 3, i64>}
  test_proptest!{p64_proptest, crate::p64}
}
