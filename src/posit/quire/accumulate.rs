use super::*;
use crate::policy::{Context, ErrorPolicy, Outcome};
use crate::{Invalid, PositError};

/// `a + b + carry`, and the carry out.
#[inline]
fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
  let (sum, c1) = a.overflowing_add(b);
  let (sum, c2) = sum.overflowing_add(u64::from(carry));
  (sum, c1 | c2)
}

/// `a - b - borrow`, and the borrow out.
#[inline]
fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
  let (diff, b1) = a.overflowing_sub(b);
  let (diff, b2) = diff.overflowing_sub(u64::from(borrow));
  (diff, b1 | b2)
}

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
> Quire<N, ES, LIMBS> {
  /// Add `magnitude × 2^position` to the register (or subtract it, if `negate`), where `position`
  /// is a bit index. `position` may be negative only if the bits of `magnitude` that would fall
  /// below bit 0 are all 0.
  ///
  /// If the result does not fit, the quire is poisoned and this returns
  /// [`PositError::QuireOverflow`].
  pub(crate) fn add_shifted(
    &mut self,
    magnitude: u128,
    position: i32,
    negate: bool,
  ) -> Result<(), PositError> {
    let (magnitude, position) =
      if position < 0 {
        let shift = position.unsigned_abs();
        debug_assert!(shift < 128 && magnitude & ((1 << shift) - 1) == 0, "bits below the quire lsb");
        (magnitude >> shift, 0)
      } else {
        (magnitude, position as u32)
      };

    // Split `magnitude << position` into the (up to) three words it touches.
    let word = (position / 64) as usize;
    let bit = position % 64;
    let shifted = magnitude << bit;
    let addend = [
      shifted as u64,
      (shifted >> 64) as u64,
      if bit == 0 { 0 } else { (magnitude >> (128 - bit)) as u64 },
    ];
    debug_assert!(
      addend.iter().skip(LIMBS.saturating_sub(word)).all(|&x| x == 0),
      "term does not fit in the quire",
    );

    let was_negative = self.is_negative();
    let mut carry = false;
    for (i, limb) in self.limbs.iter_mut().enumerate().skip(word) {
      let j = i - word;
      if j >= addend.len() && !carry { break }
      let term = addend.get(j).copied().unwrap_or(0);
      (*limb, carry) =
        if negate { borrowing_sub(*limb, term, carry) } else { carrying_add(*limb, term, carry) };
    }

    // The term is smaller in magnitude than half the register, so the sum overflowed iff adding
    // made a non-negative register negative (or subtracting made a negative one non-negative).
    let is_negative = self.is_negative();
    let overflowed = if negate { was_negative && !is_negative } else { !was_negative && is_negative };
    if overflowed {
      return Err(self.poison())
    }
    Ok(())
  }

  /// Mark the quire as overflowed.
  #[cold]
  fn poison(&mut self) -> PositError {
    log::warn!(
      "quire of {} bits ({} carry bits) overflowed, and must be cleared",
      Self::BITS,
      Self::CAPACITY,
    );
    self.state = State::Overflowed;
    PositError::QuireOverflow
  }

  /// Aux function: the early exits shared by all accumulating operations. Returns `Some` if the
  /// operation is already settled, otherwise `None`.
  #[inline]
  fn settled_early(&mut self, any_nar: bool) -> Option<Outcome<()>> {
    if self.state == State::Overflowed {
      Some(Outcome::failed((), PositError::QuireOverflow))
    } else if any_nar {
      self.state = State::NaR;
      Some(Outcome::failed((), Invalid::NarOperand.into()))
    } else if self.state == State::NaR {
      Some(Outcome::ok(()))
    } else {
      None
    }
  }

  #[inline]
  fn into_outcome(result: Result<(), PositError>) -> Outcome<()> {
    match result {
      Ok(()) => Outcome::ok(()),
      Err(e) => Outcome::failed((), e),
    }
  }

  /// Add `a × b` to the quire (or subtract it, if `negate`), reporting any condition met in the
  /// [`Outcome`].
  pub(crate) fn accumulate_outcome<Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
    negate: bool,
  ) -> Outcome<()> {
    let (a, b) = (a.to_real(), b.to_real());
    if let Some(outcome) = self.settled_early(a == Err(true) || b == Err(true)) {
      return outcome
    }
    let (Ok(x), Ok(y)) = (a, b) else { return Outcome::ok(()) };
    // Each significand is `sig × 2^(scale - 63)`, so their product is `product × 2^(scale_x +
    // scale_y - 126)`, and bit 0 of it lands at that offset from the fixed point.
    let product = u128::from(x.significand) * u128::from(y.significand);
    let position = Self::FIXED_POINT as i32 + x.scale + y.scale - 126;
    Self::into_outcome(self.add_shifted(product, position, x.sign ^ y.sign ^ negate))
  }

  /// Add `p` to the quire (or subtract it, if `negate`), reporting any condition met in the
  /// [`Outcome`].
  pub(crate) fn add_posit_outcome<Int: crate::Int>(
    &mut self,
    p: Posit<N, ES, Int>,
    negate: bool,
  ) -> Outcome<()> {
    let p = p.to_real();
    if let Some(outcome) = self.settled_early(p == Err(true)) {
      return outcome
    }
    let Ok(x) = p else { return Outcome::ok(()) };
    let position = Self::FIXED_POINT as i32 + x.scale - 63;
    Self::into_outcome(self.add_shifted(u128::from(x.significand), position, x.sign ^ negate))
  }

  /// Quire overflow is always an error; anything else is quiet (NaR is recorded in the quire).
  #[inline]
  fn quietly(outcome: Outcome<()>) -> Result<(), PositError> {
    Context::new(ErrorPolicy::Quiet).settle(outcome)
  }

  /// Add the product `a × b` to the quire, exactly.
  ///
  /// If `a` or `b` is NaR, the quire becomes NaR. The only error is
  /// [`PositError::QuireOverflow`], if the sum no longer fits (after which the quire is unusable
  /// until [cleared](Self::clear)).
  ///
  /// Standard: "**qMulAdd**".
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// let mut q = q8::new();
  /// q.accumulate(p8::round_from(3), p8::round_from(5))?;
  /// q.accumulate(p8::round_from(0.25), p8::round_from(-4))?;
  /// assert_eq!(q.to_value()?, p8::round_from(14));
  /// # Ok::<(), PositError>(())
  /// ```
  pub fn accumulate<Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<(), PositError> {
    Self::quietly(self.accumulate_outcome(a, b, false))
  }

  /// Subtract the product `a × b` from the quire, exactly. Otherwise the same as
  /// [`Self::accumulate`].
  ///
  /// Standard: "**qMulSub**".
  pub fn accumulate_negated<Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<(), PositError> {
    Self::quietly(self.accumulate_outcome(a, b, true))
  }

  /// Add `p` to the quire, exactly. Otherwise the same as [`Self::accumulate`].
  ///
  /// Standard: "**qAddP**".
  pub fn add_posit<Int: crate::Int>(&mut self, p: Posit<N, ES, Int>) -> Result<(), PositError> {
    Self::quietly(self.add_posit_outcome(p, false))
  }

  /// Subtract `p` from the quire, exactly. Otherwise the same as [`Self::accumulate`].
  ///
  /// Standard: "**qSubP**".
  pub fn sub_posit<Int: crate::Int>(&mut self, p: Posit<N, ES, Int>) -> Result<(), PositError> {
    Self::quietly(self.add_posit_outcome(p, true))
  }

  /// Add the contents of `other` to the quire (or subtract them, if `negate`), reporting any
  /// condition met in the [`Outcome`].
  pub(crate) fn add_quire_outcome(&mut self, other: &Self, negate: bool) -> Outcome<()> {
    if other.state == State::Overflowed && self.state != State::Overflowed {
      return Outcome::failed((), self.poison())
    }
    if let Some(outcome) = self.settled_early(other.state == State::NaR) {
      return outcome
    }

    let was_negative = self.is_negative();
    let other_negative = other.is_negative();
    let mut carry = false;
    for (limb, &term) in self.limbs.iter_mut().zip(other.limbs.iter()) {
      (*limb, carry) =
        if negate { borrowing_sub(*limb, term, carry) } else { carrying_add(*limb, term, carry) };
    }

    // Adding two registers of the same sign (or subtracting one of the opposite sign) overflowed
    // iff the sign of the result changed.
    let same_direction = was_negative == (other_negative ^ negate);
    if same_direction && self.is_negative() != was_negative {
      return Outcome::failed((), self.poison())
    }
    Outcome::ok(())
  }

  /// Add the contents of `other` to the quire, exactly.
  ///
  /// This is how to combine partial sums, for instance from quires filled by different threads.
  /// If `other` is NaR, the quire becomes NaR. The only error is [`PositError::QuireOverflow`],
  /// if either quire had overflowed or the sum no longer fits, after which this quire is unusable
  /// until [cleared](Self::clear).
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// let mut left = q8::new();
  /// left.accumulate(p8::round_from(3), p8::round_from(5))?;
  /// let mut right = q8::new();
  /// right.accumulate(p8::round_from(0.25), p8::round_from(-4))?;
  /// left.add_quire(&right)?;
  /// assert_eq!(left.to_value()?, p8::round_from(14));
  /// # Ok::<(), PositError>(())
  /// ```
  pub fn add_quire(&mut self, other: &Self) -> Result<(), PositError> {
    Self::quietly(self.add_quire_outcome(other, false))
  }

  /// Subtract the contents of `other` from the quire, exactly. Otherwise the same as
  /// [`Self::add_quire`].
  pub fn sub_quire(&mut self, other: &Self) -> Result<(), PositError> {
    Self::quietly(self.add_quire_outcome(other, true))
  }
}

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
  Int: crate::Int,
> From<Posit<N, ES, Int>> for Quire<N, ES, LIMBS> {
  /// A quire holding exactly `value`.
  ///
  /// Standard: "**pToQ**".
  fn from(value: Posit<N, ES, Int>) -> Self {
    let mut quire = Self::new();
    // A single posit always fits.
    let _ = quire.add_posit_outcome(value, false);
    quire
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{p8, RoundFrom};

  type Small = Posit<17, 0, i32>;
  type SmallQuire = Quire<17, 0, 1>;

  #[test]
  fn placement() {
    let mut q = crate::q8::new();
    q.accumulate(p8::ONE, p8::ONE).unwrap();
    assert_eq!(q.limbs, [1 << 48, 0]);
    q.clear();
    q.accumulate(p8::MIN_POSITIVE, p8::MIN_POSITIVE).unwrap();
    assert_eq!(q.limbs, [1, 0]);
    q.clear();
    q.accumulate(p8::MAX, p8::MAX).unwrap();
    assert_eq!(q.limbs, [0, 1 << 32]);
    q.clear();
    q.add_posit(p8::MIN_POSITIVE).unwrap();
    assert_eq!(q.limbs, [1 << 24, 0]);
  }

  #[test]
  fn negative() {
    let mut q = crate::q8::new();
    q.accumulate_negated(p8::ONE, p8::ONE).unwrap();
    assert_eq!(q.limbs, [!0 << 48, !0]);
    assert!(q.is_negative());
    q.accumulate(p8::MINUS_ONE, p8::MINUS_ONE).unwrap();
    assert!(q.is_zero());
    q.sub_posit(p8::MINUS_ONE).unwrap();
    assert_eq!(q.limbs, [1 << 48, 0]);
  }

  #[test]
  fn carry_across_limbs() {
    let mut q = crate::q8::new();
    let x = p8::round_from(1 << 15);
    q.add_posit(x).unwrap();
    assert_eq!(q.limbs, [1 << 63, 0]);
    q.add_posit(x).unwrap();
    assert_eq!(q.limbs, [0, 1]);
    q.sub_posit(p8::MIN_POSITIVE).unwrap();
    assert_eq!(q.limbs, [!0 << 24, 0]);
    q.add_posit(p8::MIN_POSITIVE).unwrap();
    q.sub_posit(x).unwrap();
    q.sub_posit(x).unwrap();
    assert!(q.is_zero());
  }

  #[test]
  fn from_posit() {
    let q = crate::q8::from(p8::round_from(-3));
    assert_eq!(q, {
      let mut q = crate::q8::new();
      q.accumulate(p8::round_from(3), p8::MINUS_ONE).unwrap();
      q
    });
    assert!(crate::q8::from(p8::NAR).is_nar());
    assert!(crate::q8::from(p8::ZERO).is_zero());
  }

  #[test]
  fn nar_is_sticky() {
    let mut q = crate::q16::new();
    q.accumulate(crate::p16::ONE, crate::p16::ONE).unwrap();
    assert_eq!(q.accumulate(crate::p16::NAR, crate::p16::ZERO), Ok(()));
    assert!(q.is_nar());
    q.accumulate(crate::p16::ONE, crate::p16::ONE).unwrap();
    q.sub_posit(crate::p16::MAX).unwrap();
    assert!(q.is_nar());
    assert_eq!(
      q.accumulate_outcome(crate::p16::ONE, crate::p16::NAR, false).error,
      Some(Invalid::NarOperand.into()),
    );
    q.clear();
    assert!(q.is_zero());
  }

  #[test]
  fn overflow() {
    // MAX² is 2^30, so the 1 integer bit plus 2 carry bits of this quire hold 7 of them.
    let mut q = SmallQuire::new();
    for _ in 0 .. 7 {
      assert_eq!(q.accumulate(Small::MAX, Small::MAX), Ok(()));
    }
    assert_eq!(q.accumulate(Small::MAX, Small::MAX), Err(PositError::QuireOverflow));
    assert!(q.is_overflowed());
    // Poisoned: even operations that would fit, or NaR, keep failing.
    assert_eq!(q.accumulate_negated(Small::MAX, Small::MAX), Err(PositError::QuireOverflow));
    assert_eq!(q.add_posit(Small::NAR), Err(PositError::QuireOverflow));
    assert!(!q.is_nar());
    q.clear();
    assert_eq!(q.accumulate(Small::MAX, Small::MAX), Ok(()));
  }

  #[test]
  fn overflow_negative() {
    // Two's complement has room for one more negative term.
    let mut q = SmallQuire::new();
    for _ in 0 .. 8 {
      assert_eq!(q.accumulate_negated(Small::MAX, Small::MAX), Ok(()));
    }
    assert_eq!(q.accumulate(Small::MIN, Small::MAX), Err(PositError::QuireOverflow));
    q.clear();
    for _ in 0 .. 8 {
      assert_eq!(q.accumulate(Small::MIN, Small::MAX), Ok(()));
    }
    assert_eq!(q.sub_posit(Small::ONE), Err(PositError::QuireOverflow));
  }

  #[test]
  fn add_quire() {
    let mut left = crate::q16::new();
    left.accumulate(crate::p16::round_from(3), crate::p16::round_from(-7)).unwrap();
    left.add_posit(crate::p16::MIN_POSITIVE).unwrap();
    let mut right = crate::q16::new();
    right.accumulate(crate::p16::round_from(2), crate::p16::round_from(10)).unwrap();
    let mut both = left.clone();
    both.add_quire(&right).unwrap();
    let mut expected = crate::q16::new();
    expected.accumulate(crate::p16::round_from(3), crate::p16::round_from(-7)).unwrap();
    expected.add_posit(crate::p16::MIN_POSITIVE).unwrap();
    expected.accumulate(crate::p16::round_from(2), crate::p16::round_from(10)).unwrap();
    assert_eq!(both, expected);
    both.sub_quire(&right).unwrap();
    assert_eq!(both, left);
    both.sub_quire(&left).unwrap();
    assert!(both.is_zero());
  }

  #[test]
  fn add_quire_overflow() {
    let mut half = SmallQuire::new();
    for _ in 0 .. 4 {
      half.accumulate(Small::MAX, Small::MAX).unwrap();
    }
    let mut q = half.clone();
    assert_eq!(q.add_quire(&half), Err(PositError::QuireOverflow));
    assert!(q.is_overflowed());
    assert_eq!(q.sub_quire(&half), Err(PositError::QuireOverflow));

    // Subtracting the opposite sign is the same as adding.
    let mut negative = SmallQuire::new();
    for _ in 0 .. 4 {
      negative.accumulate_negated(Small::MAX, Small::MAX).unwrap();
    }
    let mut q = half.clone();
    assert_eq!(q.sub_quire(&negative), Err(PositError::QuireOverflow));
    // But the most negative value fits.
    let mut q = negative.clone();
    assert_eq!(q.add_quire(&negative), Ok(()));
    assert_eq!(q.add_quire(&half), Ok(()));
    assert_eq!(q, negative);

    // An overflowed operand poisons the quire it is added to.
    let mut poisoned = half.clone();
    poisoned.add_quire(&half).unwrap_err();
    let mut q = SmallQuire::new();
    assert_eq!(q.add_quire(&poisoned), Err(PositError::QuireOverflow));
    assert!(q.is_overflowed());
  }

  #[test]
  fn add_quire_nar() {
    let nar = crate::q8::from(p8::NAR);
    let mut q = crate::q8::from(p8::ONE);
    assert_eq!(q.add_quire(&nar), Ok(()));
    assert!(q.is_nar());
    assert_eq!(q.add_quire_outcome(&crate::q8::new(), false), Outcome::ok(()));
    assert!(q.is_nar());
    let mut q = crate::q8::from(p8::ONE);
    assert_eq!(q.add_quire_outcome(&nar, true).error, Some(Invalid::NarOperand.into()));
    assert!(q.is_nar());
  }

  #[test]
  fn capacity_is_a_guarantee() {
    let mut q = SmallQuire::new();
    for _ in 0 .. 1 << SmallQuire::CAPACITY {
      q.accumulate(Small::MIN, Small::MIN).unwrap();
    }
    for _ in 0 .. 2 << SmallQuire::CAPACITY {
      q.accumulate(Small::MIN, Small::MAX).unwrap();
    }
  }
}
