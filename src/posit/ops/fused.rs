use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Return the correctly rounded result of `self × b + c`, with a single rounding at the end,
  /// together with any condition met (NaR operand, overflow), telling `obs` about each step.
  pub fn mul_add_with(self, b: Self, c: Self, obs: &mut impl Observer) -> Outcome<Self> {
    let op = Op::MulAdd;
    let (x, y, z) = match (self.to_real(), b.to_real(), c.to_real()) {
      (Err(true), _, _) | (_, Err(true), _) | (_, _, Err(true)) => return Self::nar_operand(op, obs),
      // The product is 0, and so the result is exactly `c`.
      (Err(false), _, _) | (_, Err(false), _) => return Self::exact(op, c, obs),
      (Ok(x), Ok(y), z) => (x, y, z),
    };
    let x = x.observed(op, 0, obs);
    let y = y.observed(op, 1, obs);
    let product = mul_kernel(x, y);
    let Ok(z) = z else {
      return product.round_observed(op, obs)
    };
    let z = z.observed(op, 2, obs);
    match add_kernel(product, z.into()) {
      Some(sum) => sum.round_observed(op, obs),
      None => {
        obs.observe(&Event::ExactZero { op });
        Outcome::ok(Self::ZERO)
      }
    }
  }

  /// Return the correctly rounded result of `self × b + c`, with a single rounding at the end.
  ///
  /// NaR if any operand is NaR. Saturates to [`Self::MAX`] or [`Self::MIN`] if the result exceeds
  /// them.
  ///
  /// ```
  /// # use tapered_posit::p8;
  /// // 2^-12 × 2^-12 + 1 rounds to 1, but the product alone does not vanish.
  /// let tiny = p8::from_bits(0b0_0001_00_0);
  /// assert_eq!(tiny.mul_add(tiny, p8::ONE), p8::ONE);
  /// assert_eq!(tiny.mul_add(tiny, p8::ZERO), tiny * tiny);
  /// ```
  #[inline]
  pub fn mul_add(self, b: Self, c: Self) -> Self {
    self.mul_add_with(b, c, &mut crate::Silent).value
  }

  /// As [`Self::mul_add`], but an error if an operand is NaR or the result overflows.
  pub fn checked_mul_add(self, b: Self, c: Self) -> Result<Self, crate::PositError> {
    self.mul_add_with(b, c, &mut crate::Silent).into_result()
  }
}
