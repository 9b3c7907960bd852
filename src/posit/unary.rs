use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Returns the posit whose bit pattern follows that of `self` in the total order.
  ///
  /// Note that, unlike every other function of a posit, `next` and `prior` do not produce a
  /// [NaR](Posit::NAR) output on a [NaR](Posit::NAR) input: the pattern wraps around, so that
  /// `MAX.next()` is NaR and `NAR.next()` is [`MIN`](Posit::MIN).
  #[inline]
  pub fn next(self) -> Self {
    Self::from_i64(self.as_i64().wrapping_add(1))
  }

  /// Returns the posit whose bit pattern precedes that of `self` in the total order.
  ///
  /// See [`Self::next`] for the behaviour at the ends.
  #[inline]
  pub fn prior(self) -> Self {
    Self::from_i64(self.as_i64().wrapping_sub(1))
  }

  /// Return the absolute value of `self`. Exact, and NaR on NaR.
  #[inline]
  pub fn abs(self) -> Self {
    Self::from_i64(self.as_i64().wrapping_abs())
  }

  /// The gap between `self` and the next posit up, rounded to a posit.
  ///
  /// NaR for [`Self::MAX`] and for NaR, which have no next posit.
  pub fn ulp(self) -> Self {
    let next = self.next();
    if next.is_nar() {
      return Self::NAR
    }
    next - self
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
core::ops::Neg for Posit<N, ES, Int> {
  type Output = Posit<N, ES, Int>;

  /// Exact: negating the bit pattern negates the value. 0 and NaR map to themselves.
  #[inline]
  fn neg(self) -> Self::Output {
    Posit::from_i64(self.as_i64().wrapping_neg())
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
core::ops::Neg for &Posit<N, ES, Int> {
  type Output = Posit<N, ES, Int>;

  #[inline]
  fn neg(self) -> Self::Output {
    -*self
  }
}
