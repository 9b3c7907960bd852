//! The real-value converter: exact values decoded from a posit, the extended-precision results of
//! the arithmetic kernels, and the single rounding step back into a posit.

use super::*;
use crate::observe::{Event, Observer, Op};
use crate::policy::Outcome;
use crate::{Fields, PositError, Saturation};
use codec::Decoded;

/// The exact value of a posit which is not 0 or NaR:
///
/// ```text
/// (-1)^sign × significand × 2^(scale - 63)
/// ```
///
/// where `significand` has its msb (the hidden bit) set, i.e. it is in `[2^63, 2^64)`. Every
/// posit of up to 64 bits has a fraction of at most 61 bits, so this is always exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Real {
  pub sign: bool,
  pub scale: i32,
  pub significand: u64,
}

/// A value to be rounded into a posit:
///
/// ```text
/// (-1)^sign × (significand + ε) × 2^(scale - 127)
/// ```
///
/// where `significand` has its msb set, and `ε` is `0` if not `sticky`. If `sticky`, `ε` is some
/// unknown positive amount, smaller than the lowest set bit of `significand` could be rounded by.
/// In other words, `sticky` stands for the "infinitely many bits" to the right of `significand`.
///
/// All arithmetic kernels produce one of these, which is then rounded by [`Self::round`], and
/// that is the one and only place where a result is rounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Unrounded {
  pub sign: bool,
  pub scale: i32,
  pub significand: u128,
  pub sticky: bool,
}

impl<const N: u32, const ES: u32> Fields<N, ES> {
  /// The exact value represented by these fields.
  pub(crate) fn to_real(self) -> Real {
    debug_assert!(self.fraction_width <= 63);
    Real {
      sign: self.sign,
      scale: (self.regime << ES) + self.exponent as i32,
      significand: 1 << 63 | (self.fraction >> 65) as u64,
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The exact value of `self`, or `Err(is_nar)` if `self` is 0 or NaR.
  #[inline]
  pub(crate) fn to_real(self) -> Result<Real, bool> {
    match self.decode() {
      Decoded::Fields(fields) => Ok(fields.to_real()),
      Decoded::Zero => Err(false),
      Decoded::NaR => Err(true),
    }
  }
}

impl Real {
  /// Tell `obs` that `self` is operand number `index` of `op`.
  #[inline]
  pub fn observed(self, op: Op, index: u8, obs: &mut impl Observer) -> Self {
    let Real { sign, scale, significand } = self;
    obs.observe(&Event::Operand { op, index, sign, scale, significand });
    self
  }
}

impl From<Real> for Unrounded {
  #[inline]
  fn from(x: Real) -> Self {
    Unrounded { sign: x.sign, scale: x.scale, significand: u128::from(x.significand) << 64, sticky: false }
  }
}

impl Unrounded {
  /// Build a value from a nonzero `significand` that is not necessarily normalised, where
  /// `top_scale` is the scale of bit 127 of `significand`.
  #[inline]
  pub fn normalise(sign: bool, top_scale: i32, significand: u128, sticky: bool) -> Self {
    debug_assert!(significand != 0);
    let shift = significand.leading_zeros();
    Unrounded { sign, scale: top_scale - shift as i32, significand: significand << shift, sticky }
  }

  /// Round `self` to the nearest posit (ties to even bit pattern), never rounding to 0 or NaR.
  pub fn round<const N: u32, const ES: u32, Int: crate::Int>(self) -> (Posit<N, ES, Int>, Saturation) {
    debug_assert!(self.significand >> 127 == 1);
    // Split the scale into regime and exponent; `>>` on a negative scale rounds towards -∞, which
    // is what we want: e.g. with ES = 2, scale -1 is regime -1, exponent 3.
    let regime = self.scale >> ES;
    let exponent = (self.scale - (regime << ES)) as u32;
    let fields = Fields::<N, ES> {
      sign: self.sign,
      regime,
      exponent,
      fraction: self.significand << 1,
      fraction_width: 127,
    };
    fields.encode_round(self.sticky)
  }

  /// As [`Self::round`], telling `obs` about the value before and after rounding, and reporting
  /// overflow in the returned [`Outcome`].
  pub fn round_observed<const N: u32, const ES: u32, Int: crate::Int>(
    self,
    op: Op,
    obs: &mut impl Observer,
  ) -> Outcome<Posit<N, ES, Int>> {
    let Unrounded { sign, scale, significand, sticky } = self;
    obs.observe(&Event::Unrounded { op, sign, scale, significand, sticky });
    let (value, saturation) = self.round();
    obs.observe(&Event::Encoded { op, bits: value.as_i64(), saturation });
    match saturation {
      Saturation::Overflow => Outcome::failed(value, PositError::Overflow),
      Saturation::Within | Saturation::Underflow => Outcome::ok(value),
    }
  }
}
