use super::*;

use crate::posit::real::Unrounded;

impl<
  const N1: u32,
  const ES1: u32,
  Int1: crate::Int,
> Posit<N1, ES1, Int1> {
  /// Convert `self` into a posit of another format, rounding it (if necessary).
  ///
  /// 0 and NaR convert to 0 and NaR. Converting to a format with at least as many bits and the
  /// same `ES` is always exact.
  ///
  /// ```
  /// # use tapered_posit::*;
  /// let x = p32::round_from(3.1415926);
  /// assert_eq!(x.convert::<16, 2, i16>(), p16::round_from(3.1415926));
  /// assert_eq!(x.convert::<16, 2, i16>().convert::<32, 2, i32>(), p32::round_from(3.1416015625));
  /// ```
  ///
  /// Since the `N` and `ES` of the result are const parameters, this cannot be a [`RoundFrom`]
  /// impl (it would overlap with the blanket `RoundFrom<T> for T`).
  pub fn convert<
    const N2: u32,
    const ES2: u32,
    Int2: crate::Int,
  >(self) -> Posit<N2, ES2, Int2> {
    match self.to_real() {
      Ok(x) => Unrounded::from(x).round().0,
      Err(true) => Posit::NAR,
      Err(false) => Posit::ZERO,
    }
  }
}
