use super::*;

use crate::posit::real::Unrounded;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The posit nearest to `±magnitude`, where `magnitude` is nonzero.
  fn round_from_magnitude(negative: bool, magnitude: u64) -> Self {
    // Bit 0 of the magnitude has scale 0, so bit 127 has scale 127.
    Unrounded::normalise(negative, 127, u128::from(magnitude), false).round().0
  }

  /// The integer nearest to `self` (ties to even), clamped to `[min, max]`; `min` if `self` is
  /// NaR.
  fn round_to_int(self, min: i128, max: i128) -> i128 {
    let x = match self.to_real() {
      Ok(x) => x,
      Err(true) => return min,
      Err(false) => return 0,
    };
    // The value is `significand × 2^(scale - 63)`; anything of scale 64 or above saturates any
    // type up to 64 bits, and anything of scale below -1 is less than ½.
    let magnitude: i128 =
      if x.scale >= 64 {
        i128::MAX
      } else if x.scale < -1 {
        0
      } else {
        let shift = (63 - x.scale) as u32;
        let significand = u128::from(x.significand);
        let int = significand >> shift;
        let round = shift > 0 && (significand >> (shift - 1)) & 1 == 1;
        let sticky = shift > 1 && significand & ((1 << (shift - 1)) - 1) != 0;
        (int + u128::from(round && (sticky || int & 1 == 1))) as i128
      };
    let value = if x.sign { -magnitude } else { magnitude };
    value.clamp(min, max)
  }
}

macro_rules! make_impl {
  ($signed:ty, $unsigned:ty) => {
    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<$signed> for Posit<N, ES, Int> {
      #[doc = concat!("Convert an `", stringify!($signed), "` into a `Posit`, rounding it (if necessary).")]
      ///
      #[doc = concat!("[`", stringify!($signed), "::MIN`] (the value where the most significant bit is 1 and the rest are 0) converts to [NaR](Posit::NAR), mirroring the conversion the other way.")]
      fn round_from(value: $signed) -> Self {
        if value == 0 { return Posit::ZERO }
        if value == <$signed>::MIN { return Posit::NAR }
        Self::round_from_magnitude(value < 0, value.unsigned_abs() as u64)
      }
    }

    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<$unsigned> for Posit<N, ES, Int> {
      #[doc = concat!("Convert a `", stringify!($unsigned), "` into a `Posit`, rounding it (if necessary).")]
      fn round_from(value: $unsigned) -> Self {
        if value == 0 { return Posit::ZERO }
        Self::round_from_magnitude(false, value as u64)
      }
    }

    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<Posit<N, ES, Int>> for $signed {
      #[doc = concat!("Convert a `Posit` into the nearest `", stringify!($signed), "` (ties to even).")]
      ///
      /// Values beyond the range of the int saturate to its `MIN` or `MAX`, and
      /// [NaR](Posit::NAR) converts to `MIN`.
      fn round_from(value: Posit<N, ES, Int>) -> Self {
        value.round_to_int(<$signed>::MIN.into(), <$signed>::MAX.into()) as $signed
      }
    }

    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<Posit<N, ES, Int>> for $unsigned {
      #[doc = concat!("Convert a `Posit` into the nearest `", stringify!($unsigned), "` (ties to even).")]
      ///
      /// Negative values and [NaR](Posit::NAR) convert to 0; values beyond `MAX` saturate to it.
      fn round_from(value: Posit<N, ES, Int>) -> Self {
        value.round_to_int(0, <$unsigned>::MAX.into()) as $unsigned
      }
    }
  }
}

make_impl!{i8, u8}
make_impl!{i16, u16}
make_impl!{i32, u32}
make_impl!{i64, u64}
