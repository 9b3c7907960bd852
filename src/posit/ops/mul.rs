use super::*;
use core::ops::{Mul, MulAssign};
use crate::posit::real::{Real, Unrounded};

/// The exact product of two values.
///
/// Both significands are 64 bits wide, so their full product fits in 128 bits and nothing needs
/// to be rounded or jammed here.
pub(crate) fn mul_kernel(x: Real, y: Real) -> Unrounded {
  let product = u128::from(x.significand) * u128::from(y.significand);
  // Significands are in [2^63, 2^64), with a scale of 2^-63, so the product is in [2^126, 2^128)
  // with a scale of 2^-126: bit 127 of the product is 1 above the sum of the scales.
  Unrounded::normalise(x.sign != y.sign, x.scale + y.scale + 1, product, false)
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Return the correctly rounded result of `self × rhs`, together with any condition met (NaR
  /// operand, overflow), telling `obs` about each step.
  pub fn mul_with(self, rhs: Self, obs: &mut impl Observer) -> Outcome<Self> {
    let op = Op::Mul;
    let (x, y) = match (self.to_real(), rhs.to_real()) {
      (Ok(x), Ok(y)) => (x, y),
      (Err(true), _) | (_, Err(true)) => return Self::nar_operand(op, obs),
      // 0 absorbs anything but NaR.
      (Err(false), _) | (_, Err(false)) => return Self::exact(op, Self::ZERO, obs),
    };
    let x = x.observed(op, 0, obs);
    let y = y.observed(op, 1, obs);
    mul_kernel(x, y).round_observed(op, obs)
  }

  /// Return the correctly rounded result of `self × rhs`.
  ///
  /// NaR if either operand is NaR. Saturates to [`Self::MAX`] or [`Self::MIN`] if the result
  /// exceeds them, and to [`Self::MIN_POSITIVE`] or [`Self::MAX_NEGATIVE`] if it is nonzero but
  /// smaller than them.
  #[inline]
  pub fn mul(self, rhs: Self) -> Self {
    self.mul_with(rhs, &mut crate::Silent).value
  }

  /// As [`Self::mul`], but an error if an operand is NaR or the result overflows.
  pub fn checked_mul(self, rhs: Self) -> Result<Self, crate::PositError> {
    self.mul_with(rhs, &mut crate::Silent).into_result()
  }
}

mk_ops!{Mul, MulAssign, mul, mul_assign}
