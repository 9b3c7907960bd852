use super::*;

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
> Quire<N, ES, LIMBS> {
  /// Auxiliary const: the maximum scale of a `Posit<N, ES, _>`, i.e. the scale of
  /// [`Posit::MAX`]. The size of the quire is directly related to this (see
  /// [`Self::MIN_BITS`]).
  pub(crate) const MAX_SCALE: u32 = {
    assert!(N >= 3 && ES + 3 <= N, "Not a valid posit format");
    assert!(ES <= 20, "Cannot use the quire with very high ES (> 20)");
    (N - 2) << ES
  };

  /// The position of the fixed point: 1.0 is represented in the quire as the bit at this index.
  /// Below it there are enough bits for the smallest product, [`Posit::MIN_POSITIVE`]².
  pub(crate) const FIXED_POINT: u32 = 2 * Self::MAX_SCALE;

  /// The minimum number of bits of a quire for `Posit<N, ES, _>`.
  ///
  /// At worst, the quire needs to represent [`Posit::MAX`]² and [`Posit::MIN_POSITIVE`]² as a
  /// fixed-point number: that is `2 × MAX_SCALE` fraction bits, `2 × MAX_SCALE + 1` integer bits,
  /// and a sign bit.
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// assert_eq!(q16::MIN_BITS, 226);
  /// ```
  pub const MIN_BITS: u32 = 4 * Self::MAX_SCALE + 2;

  /// The quire size in bits.
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// assert_eq!(q16::BITS, 256);
  /// ```
  pub const BITS: u32 = {
    let bits = 64 * LIMBS as u32;
    assert!(bits >= Self::MIN_BITS, "This quire type has fewer than the minimum number of bits");
    bits
  };

  /// The number of carry bits: any 2<sup>`CAPACITY`</sup> products (or fewer) can be accumulated
  /// without overflow, whatever their magnitude.
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// assert_eq!(q32::CAPACITY, 30);
  /// assert_eq!(Quire::<32, 2, 9>::CAPACITY, 94);
  /// ```
  pub const CAPACITY: u32 = Self::BITS - Self::MIN_BITS;

  /// A quire holding 0.
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// let q = q8::new();
  /// assert!(q.is_zero());
  /// assert_eq!(q.to_value(), Ok(p8::ZERO));
  /// ```
  pub const fn new() -> Self {
    let _ = Self::BITS;
    Quire { limbs: [0; LIMBS], state: State::Finite }
  }

  /// Reset `self` to 0. This is also the only way to recover a quire that is NaR or has
  /// overflowed.
  pub fn clear(&mut self) {
    *self = Self::new()
  }

  /// Checks whether `self` is NaR, i.e. whether a NaR has been accumulated into it since it was
  /// last cleared.
  ///
  /// # Example
  ///
  /// ```
  /// # use tapered_posit::*;
  /// let mut q = q32::new();
  /// q += p32::NAR;
  /// q += p32::ONE;
  /// assert!(q.is_nar());
  /// ```
  pub const fn is_nar(&self) -> bool {
    matches!(self.state, State::NaR)
  }

  /// Checks whether `self` has overflowed (and must be cleared before it can be used again).
  pub const fn is_overflowed(&self) -> bool {
    matches!(self.state, State::Overflowed)
  }

  /// Checks whether `self` holds exactly 0.
  pub fn is_zero(&self) -> bool {
    self.state == State::Finite && self.limbs.iter().all(|&limb| limb == 0)
  }

  /// Whether the value in the register is negative.
  #[inline]
  pub(crate) fn is_negative(&self) -> bool {
    (self.limbs[LIMBS - 1] as i64) < 0
  }
}

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
> Default for Quire<N, ES, LIMBS> {
  fn default() -> Self {
    Self::new()
  }
}

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
> core::fmt::Debug for Quire<N, ES, LIMBS> {
  /// The register in hex, most significant word first.
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Quire<{N}, {ES}>(")?;
    match self.state {
      State::NaR => write!(f, "NaR")?,
      State::Overflowed => write!(f, "overflowed")?,
      State::Finite => {
        write!(f, "0x")?;
        for (i, limb) in self.limbs.iter().rev().enumerate() {
          if i > 0 { write!(f, "_")? }
          write!(f, "{limb:016x}")?;
        }
      }
    }
    write!(f, ")")
  }
}


mod tests_compile_fail {
  /// ```compile_fail
  /// use tapered_posit::Quire;
  /// let q: Quire<8, 2, 1> = Quire::new();
  /// ```
  #[allow(dead_code)]
  fn quire_too_small_8() {}

  /// ```compile_fail
  /// use tapered_posit::Quire;
  /// let q: Quire<16, 2, 3> = Quire::new();
  /// ```
  #[allow(dead_code)]
  fn quire_too_small_16() {}

  /// ```compile_fail
  /// use tapered_posit::Quire;
  /// let q: Quire<32, 2, 7> = Quire::new();
  /// ```
  #[allow(dead_code)]
  fn quire_too_small_32() {}

  /// ```compile_fail
  /// use tapered_posit::Quire;
  /// let q: Quire<64, 2, 15> = Quire::new();
  /// ```
  #[allow(dead_code)]
  fn quire_too_small_64() {}
}
