use super::*;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use crate::posit::real::Unrounded;

/// The sum of two exact values, or `None` if it is exactly zero.
///
/// The operands are aligned in a 128-bit window (one bit of which is headroom for the carry).
/// Whatever bits of the smaller operand fall off the right end of the window are not lost: they
/// are *jammed* into its lsb, i.e. the lsb is set if any of them was 1. That is enough for
/// correct rounding, because the rounding position is always far to the left of the lsb:
///
///   - If the operands are at most 1 bit apart in scale, no bits fall off at all, and the sum is
///     exact, even in the case of massive cancellation.
///   - Otherwise, the result is normalised by at most 1 bit to the left, and the jammed lsb is a
///     valid stand-in for all the bits to its right.
///
/// Both operands must be exact (not `sticky`), with a 0 lsb, which is the case for any decoded
/// posit and for any exact product of two of them.
pub(crate) fn add_kernel(x: Unrounded, y: Unrounded) -> Option<Unrounded> {
  debug_assert!(!x.sticky && !y.sticky);
  debug_assert!(x.significand & 1 == 0 && y.significand & 1 == 0);
  let (big, small) =
    if (x.scale, x.significand) >= (y.scale, y.significand) { (x, y) } else { (y, x) };

  let shift = big.scale.abs_diff(small.scale);
  let a = big.significand >> 1;
  let b = small.significand >> 1;
  let b =
    if shift == 0 {
      b
    } else if shift < 128 {
      (b >> shift) | u128::from(b << (128 - shift) != 0)
    } else {
      1
    };

  // `a > b` (or both are equal and `shift` is 0) so this never underflows; and both are below
  // 2^127, so the sum never overflows.
  let sum = if big.sign == small.sign { a + b } else { a - b };
  if sum == 0 {
    return None
  }
  // Bit 126 of `a` has the scale of `big`, so bit 127 of the sum has one more.
  Some(Unrounded::normalise(big.sign, big.scale + 1, sum, false))
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Return the correctly rounded result of `self + rhs`, together with any condition met (NaR
  /// operand, overflow), telling `obs` about each step.
  pub fn add_with(self, rhs: Self, obs: &mut impl Observer) -> Outcome<Self> {
    self.sum(rhs, Op::Add, obs)
  }

  /// Return the correctly rounded result of `self - rhs`, together with any condition met (NaR
  /// operand, overflow), telling `obs` about each step.
  pub fn sub_with(self, rhs: Self, obs: &mut impl Observer) -> Outcome<Self> {
    self.sum(-rhs, Op::Sub, obs)
  }

  fn sum(self, rhs: Self, op: Op, obs: &mut impl Observer) -> Outcome<Self> {
    let (x, y) = match (self.to_real(), rhs.to_real()) {
      (Ok(x), Ok(y)) => (x, y),
      (Err(true), _) | (_, Err(true)) => return Self::nar_operand(op, obs),
      // 0 is the identity.
      (Err(false), _) => return Self::exact(op, rhs, obs),
      (_, Err(false)) => return Self::exact(op, self, obs),
    };
    let x = x.observed(op, 0, obs);
    let y = y.observed(op, 1, obs);
    match add_kernel(x.into(), y.into()) {
      Some(sum) => sum.round_observed(op, obs),
      None => {
        obs.observe(&Event::ExactZero { op });
        Outcome::ok(Self::ZERO)
      }
    }
  }

  /// Return the correctly rounded result of `self + rhs`.
  ///
  /// NaR if either operand is NaR. Saturates to [`Self::MAX`] or [`Self::MIN`] if the result
  /// exceeds them.
  #[inline]
  pub fn add(self, rhs: Self) -> Self {
    self.sum(rhs, Op::Add, &mut crate::Silent).value
  }

  /// Return the correctly rounded result of `self - rhs`.
  ///
  /// NaR if either operand is NaR. Saturates to [`Self::MAX`] or [`Self::MIN`] if the result
  /// exceeds them.
  #[inline]
  pub fn sub(self, rhs: Self) -> Self {
    self.sum(-rhs, Op::Sub, &mut crate::Silent).value
  }

  /// As [`Self::add`], but an error if an operand is NaR or the result overflows.
  pub fn checked_add(self, rhs: Self) -> Result<Self, crate::PositError> {
    self.add_with(rhs, &mut crate::Silent).into_result()
  }

  /// As [`Self::sub`], but an error if an operand is NaR or the result overflows.
  pub fn checked_sub(self, rhs: Self) -> Result<Self, crate::PositError> {
    self.sub_with(rhs, &mut crate::Silent).into_result()
  }
}

mk_ops!{Add, AddAssign, add, add_assign}
mk_ops!{Sub, SubAssign, sub, sub_assign}
