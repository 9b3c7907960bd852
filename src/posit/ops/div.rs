use super::*;
use core::ops::{Div, DivAssign};
use crate::posit::real::{Real, Unrounded};

/// The quotient of two values, to 64 significant bits, plus a sticky bit.
///
/// The widest fraction is 61 bits, so this leaves at least 2 guard bits (round bit and one more)
/// before the sticky bit, which is set exactly when the division has a nonzero remainder.
pub(crate) fn div_kernel(x: Real, y: Real) -> Unrounded {
  let dividend = u128::from(x.significand) << 64;
  let divisor = u128::from(y.significand);
  let quotient = dividend / divisor;
  let remainder = dividend % divisor;
  // `x.significand / y.significand` is in (½, 2), so `quotient` is in (2^63, 2^65), with a scale
  // of 2^-64: bit 127 of it is 63 above the difference of the scales.
  Unrounded::normalise(x.sign != y.sign, x.scale - y.scale + 63, quotient, remainder != 0)
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  fn quotient(self, rhs: Self, op: Op, obs: &mut impl Observer) -> Outcome<Self> {
    let (x, y) = match (self.to_real(), rhs.to_real()) {
      (Ok(x), Ok(y)) => (x, y),
      (Err(true), _) | (_, Err(true)) => return Self::nar_operand(op, obs),
      (_, Err(false)) => return Self::invalid(op, Invalid::DivideByZero, obs),
      (Err(false), _) => return Self::exact(op, Self::ZERO, obs),
    };
    let x = x.observed(op, 0, obs);
    let y = y.observed(op, 1, obs);
    div_kernel(x, y).round_observed(op, obs)
  }

  /// Return the correctly rounded result of `self ÷ rhs`, together with any condition met (NaR
  /// operand, division by zero, overflow), telling `obs` about each step.
  pub fn div_with(self, rhs: Self, obs: &mut impl Observer) -> Outcome<Self> {
    self.quotient(rhs, Op::Div, obs)
  }

  /// Return the correctly rounded result of `self ÷ rhs`.
  ///
  /// NaR if either operand is NaR, or if `rhs` is 0.
  #[inline]
  pub fn div(self, rhs: Self) -> Self {
    self.quotient(rhs, Op::Div, &mut crate::Silent).value
  }

  /// As [`Self::div`], but an error if an operand is NaR, `rhs` is 0, or the result overflows.
  pub fn checked_div(self, rhs: Self) -> Result<Self, crate::PositError> {
    self.div_with(rhs, &mut crate::Silent).into_result()
  }

  /// Return the correctly rounded result of `1 ÷ self`, together with any condition met, telling
  /// `obs` about each step.
  pub fn recip_with(self, obs: &mut impl Observer) -> Outcome<Self> {
    Self::ONE.quotient(self, Op::Recip, obs)
  }

  /// Return the correctly rounded result of `1 ÷ self`. NaR if `self` is 0 or NaR.
  ///
  /// Note that, unlike IEEE floats, the reciprocal of a posit is not always exact even when
  /// `self` is a power of two (powers of two at the extremes have no exact reciprocal when some of
  /// their exponent bits are cut off).
  #[inline]
  pub fn recip(self) -> Self {
    self.recip_with(&mut crate::Silent).value
  }
}

mk_ops!{Div, DivAssign, div, div_assign}
