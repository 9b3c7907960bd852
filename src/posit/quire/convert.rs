use super::*;
use crate::observe::{Observer, Op, Silent};
use crate::policy::{Context, ErrorPolicy, Outcome};
use crate::posit::real::Unrounded;
use crate::{PositError, RoundFrom};

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
> Quire<N, ES, LIMBS> {
  /// Aux function: the absolute value of the register, and whether it is negative.
  fn magnitude(&self) -> ([u64; LIMBS], bool) {
    let negative = self.is_negative();
    let mut limbs = self.limbs;
    if negative {
      let mut carry = true;
      for limb in &mut limbs {
        (*limb, carry) = (!*limb).overflowing_add(u64::from(carry));
      }
    }
    (limbs, negative)
  }

  /// Aux function: the 128 bits of `limbs` starting at bit index `lo`, and whether any bit below
  /// `lo` is set. `lo` may be negative, in which case the window is padded with 0s on the right.
  fn window(limbs: &[u64; LIMBS], lo: i32) -> (u128, bool) {
    let limb = |i: i32| usize::try_from(i).ok().and_then(|i| limbs.get(i)).copied().unwrap_or(0);
    let word = lo.div_euclid(64);
    let bit = lo.rem_euclid(64) as u32;
    let low = u128::from(limb(word + 1)) << 64 | u128::from(limb(word));
    let window =
      if bit == 0 { low } else { low >> bit | u128::from(limb(word + 2)) << (128 - bit) };
    let sticky = lo > 0 && (
      limbs.iter().take(word as usize).any(|&x| x != 0)
      || limb(word) & ((1 << bit) - 1) != 0
    );
    (window, sticky)
  }

  /// Round the quire to the nearest posit, telling `obs` about the value before and after
  /// rounding.
  ///
  /// A NaR quire gives NaR (and an [invalid operation](crate::Invalid::NarOperand) condition);
  /// an overflowed one gives NaR and [`PositError::QuireOverflow`]. A sum larger than
  /// [`Posit::MAX`] saturates to it with [`PositError::Overflow`].
  pub fn to_value_with<Int: crate::Int>(&self, obs: &mut impl Observer) -> Outcome<Posit<N, ES, Int>> {
    let op = Op::QuireToValue;
    match self.state {
      State::NaR => return Posit::nar_operand(op, obs),
      State::Overflowed => return Outcome::failed(Posit::NAR, PositError::QuireOverflow),
      State::Finite => (),
    }
    let (limbs, negative) = self.magnitude();
    let Some(top) = limbs.iter().rposition(|&x| x != 0) else {
      return Posit::exact(op, Posit::ZERO, obs)
    };
    // Bit `top_bit` of the register is the leading 1; it and the 127 bits after it are the
    // significand, and anything below is sticky.
    let top_bit = top as i32 * 64 + 63 - limbs[top].leading_zeros() as i32;
    let (significand, sticky) = Self::window(&limbs, top_bit - 127);
    let scale = top_bit - Self::FIXED_POINT as i32;
    Unrounded::normalise(negative, scale, significand, sticky).round_observed(op, obs)
  }

  /// Round the quire to the nearest posit. This is the final step to do after a series of
  /// calculations in the quire, and the *only* step that actually rounds.
  ///
  /// The only error is [`PositError::QuireOverflow`], if the quire has overflowed. A NaR quire
  /// gives NaR, and a sum larger than [`Posit::MAX`] saturates to it.
  ///
  /// Standard: "**qToP**".
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// let mut q = q32::new();
  /// q += p32::round_from(1e10);
  /// q += p32::round_from(0.5);
  /// q -= p32::round_from(1e10);
  /// assert_eq!(q.to_value(), Ok(p32::round_from(0.5)));
  /// ```
  pub fn to_value<Int: crate::Int>(&self) -> Result<Posit<N, ES, Int>, PositError> {
    Context::new(ErrorPolicy::Quiet).settle(self.to_value_with(&mut Silent))
  }

  /// The dot product of the `pairs`, `a₀ × b₀ + a₁ × b₁ + …`, rounded only once.
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// let a = [1e4, 1., -1e4].map(p16::round_from);
  /// let b = [1e4, 1., 1e4].map(p16::round_from);
  /// assert_eq!(q16::fused_dot(a.into_iter().zip(b)), Ok(p16::ONE));
  /// assert_eq!(a[0] * b[0] + a[1] * b[1] + a[2] * b[2], p16::ZERO);
  /// ```
  pub fn fused_dot<Int: crate::Int>(
    pairs: impl IntoIterator<Item = (Posit<N, ES, Int>, Posit<N, ES, Int>)>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let mut quire = Self::new();
    for (a, b) in pairs {
      quire.accumulate(a, b)?;
    }
    quire.to_value()
  }
}

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
  Int: crate::Int,
> RoundFrom<&'_ Quire<N, ES, LIMBS>> for Posit<N, ES, Int> {
  /// Round a quire back to a posit, as [`Quire::to_value`]. An overflowed quire gives NaR.
  fn round_from(value: &'_ Quire<N, ES, LIMBS>) -> Self {
    value.to_value_with(&mut Silent).value
  }
}
