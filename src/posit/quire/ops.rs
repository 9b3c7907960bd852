use super::*;

macro_rules! mk_assign {
  ($trait:ident, $name:ident, $negate:literal, $std:literal) => {
    impl<
      const N: u32,
      const ES: u32,
      const LIMBS: usize,
      Int: crate::Int,
    > core::ops::$trait<Posit<N, ES, Int>> for Quire<N, ES, LIMBS> {
      #[doc = concat!("Standard: \"**", $std, "**\".")]
      ///
      /// An overflow cannot be reported here, but it poisons the quire, so it is reported by the
      /// next fallible operation (e.g. [`Quire::to_value`]).
      #[inline]
      fn $name(&mut self, rhs: Posit<N, ES, Int>) {
        let _ = self.add_posit_outcome(rhs, $negate);
      }
    }

    impl<
      const N: u32,
      const ES: u32,
      const LIMBS: usize,
      Int: crate::Int,
    > core::ops::$trait<&Posit<N, ES, Int>> for Quire<N, ES, LIMBS> {
      #[doc = concat!("Standard: \"**", $std, "**\".")]
      #[inline]
      fn $name(&mut self, rhs: &Posit<N, ES, Int>) {
        let _ = self.add_posit_outcome(*rhs, $negate);
      }
    }
  }
}

mk_assign!{AddAssign, add_assign, false, "qAddP"}
mk_assign!{SubAssign, sub_assign, true, "qSubP"}

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
> core::ops::AddAssign<&Quire<N, ES, LIMBS>> for Quire<N, ES, LIMBS> {
  /// See [`Quire::add_quire`]. As with the other operators, an overflow poisons the quire.
  #[inline]
  fn add_assign(&mut self, rhs: &Quire<N, ES, LIMBS>) {
    let _ = self.add_quire_outcome(rhs, false);
  }
}

impl<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
> core::ops::SubAssign<&Quire<N, ES, LIMBS>> for Quire<N, ES, LIMBS> {
  /// See [`Quire::sub_quire`].
  #[inline]
  fn sub_assign(&mut self, rhs: &Quire<N, ES, LIMBS>) {
    let _ = self.add_quire_outcome(rhs, true);
  }
}
