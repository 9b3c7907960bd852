//! The bit-level codec: a posit bit pattern ⇄ its decomposed fields.
//!
//! A posit with `N` bits and `ES` exponent bits is laid out, from msb to lsb, as
//!
//! ```text
//! [sign: 1] [regime: run of identical bits + opposite terminator] [exponent: ≤ ES] [fraction: rest]
//! ```
//!
//! where, for negative posits, the regime, exponent, and fraction are read from the two's
//! complement of the pattern (not from the raw bits). The regime is variable length, so the
//! boundaries between fields move with the magnitude of the value; in particular the exponent and
//! fraction can be cut short or be missing altogether.
//!
//! The represented value is `(-1)^sign × 2^(regime × 2^ES + exponent) × (1 + fraction)`, where
//! `fraction` is read as a binary number in `[0, 1)`.

use super::*;

/// The decomposed fields of a posit which is not 0 or NaR.
///
/// `N` and `ES` are those of the posit type the fields are read from or will be written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fields<const N: u32, const ES: u32> {
  /// Whether the posit is negative.
  pub sign: bool,
  /// The regime `k`: a run of `k+1` ones for `k ≥ 0`, or of `-k` zeros for `k < 0`.
  pub regime: i32,
  /// The exponent, in `0 .. 2^ES`. If some exponent bits did not fit in the pattern, they read as
  /// `0` (they are the lowest bits of the exponent, since it is written msb first).
  pub exponent: u32,
  /// The fraction bits, left-aligned: the msb has weight ½.
  pub fraction: u128,
  /// How many bits of [`Self::fraction`] are meaningful. All bits past this must be zero.
  pub fraction_width: u32,
}

/// The result of decoding a posit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded<const N: u32, const ES: u32> {
  Zero,
  NaR,
  Fields(Fields<N, ES>),
}

/// Whether rounding a value into a posit had to clamp it to the representable range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Saturation {
  /// The value was within `[MIN_POSITIVE, MAX]` in magnitude (possibly after rounding).
  Within,
  /// The magnitude was larger than [`Posit::MAX`], and was clamped to it.
  Overflow,
  /// The magnitude was smaller than [`Posit::MIN_POSITIVE`], and was clamped to it.
  Underflow,
}

/// The states of the decoder: the fields of a posit are read one after the other, each state
/// consuming the bits of one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reading {
  Regime,
  Exponent,
  Fraction,
  Done,
}

/// `x << n`, but `0` rather than overflowing if `n` is 64.
#[inline]
fn shl(x: u64, n: u32) -> u64 {
  x.checked_shl(n).unwrap_or(0)
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Decompose `self` into its [`Fields`], or report it as 0 or NaR.
  ///
  /// ```
  /// # use tapered_posit::{Posit, Decoded};
  /// let Decoded::Fields(f) = Posit::<8, 0, i8>::from_bits(0b0_110_1000).decode() else { panic!() };
  /// assert_eq!((f.sign, f.regime, f.exponent, f.fraction_width), (false, 1, 0, 4));
  /// assert_eq!(f.fraction >> 124, 0b1000);
  /// ```
  pub fn decode(self) -> Decoded<N, ES> {
    if self == Self::ZERO {
      return Decoded::Zero
    }
    if self == Self::NAR {
      return Decoded::NaR
    }

    let bits = self.as_i64();
    let sign = bits < 0;
    // The magnitude is below 2^(N-1). Put its `N-1` bits at the very left of a word, so that
    // each field is consumed from the left by shifting it out.
    let magnitude_bits = Self::BITS - 1;
    let mut rest = bits.unsigned_abs() << (64 - magnitude_bits);
    let mut remaining = magnitude_bits;

    let mut fields = Fields { sign, regime: 0, exponent: 0, fraction: 0, fraction_width: 0 };
    let mut state = Reading::Regime;
    loop {
      state = match state {
        Reading::Regime => {
          // A run of 1s (k ≥ 0) or of 0s (k < 0), terminated by the opposite bit or by the end of
          // the pattern. Bits past `remaining` are 0, so cap the run there.
          let ones = rest >> 63 == 1;
          let run = if ones { rest.leading_ones() } else { rest.leading_zeros() }.min(remaining);
          fields.regime = if ones { run as i32 - 1 } else { -(run as i32) };
          let consumed = (run + 1).min(remaining);
          rest = shl(rest, consumed);
          remaining -= consumed;
          Reading::Exponent
        }
        Reading::Exponent => {
          let taken = Self::ES.min(remaining);
          if taken > 0 {
            fields.exponent = ((rest >> (64 - taken)) as u32) << (ES - taken);
          }
          rest = shl(rest, taken);
          remaining -= taken;
          Reading::Fraction
        }
        Reading::Fraction => {
          fields.fraction = u128::from(rest) << 64;
          fields.fraction_width = remaining;
          Reading::Done
        }
        Reading::Done => break,
      }
    }
    Decoded::Fields(fields)
  }
}

impl<const N: u32, const ES: u32> Fields<N, ES> {
  /// The largest regime, that of [`Posit::MAX`].
  const MAX_REGIME: i32 = N as i32 - 2;

  /// Encode these fields into a posit. The fields are assumed to be exact; if the fraction or the
  /// exponent do not fit in the space left by the regime, they are rounded as in
  /// [`Self::encode_round`].
  pub fn encode<Int: crate::Int>(self) -> Posit<N, ES, Int> {
    self.encode_round(false).0
  }

  /// Encode these fields into a posit, rounding to nearest (ties to even bit pattern).
  ///
  /// `sticky` stands for any further nonzero bits of the fraction after [`Self::fraction`], which
  /// are not represented: if `true`, the exact value lies strictly above the one described by the
  /// fields, by less than one unit in the last place of `fraction`.
  ///
  /// Never rounds to 0 or NaR: values beyond the representable range are clamped to
  /// [`Posit::MAX`] or [`Posit::MIN_POSITIVE`] (in magnitude), and this is reported in the
  /// returned [`Saturation`].
  pub fn encode_round<Int: crate::Int>(self, sticky: bool) -> (Posit<N, ES, Int>, Saturation) {
    let magnitude_bits = Posit::<N, ES, Int>::BITS - 1;
    let max_magnitude = (1u64 << magnitude_bits) - 1;

    let (magnitude, saturation) =
      if self.regime > Self::MAX_REGIME {
        (max_magnitude, Saturation::Overflow)
      } else if self.regime < -Self::MAX_REGIME {
        (1, Saturation::Underflow)
      } else {
        // Lay out regime, exponent, and fraction one after the other in a 128-bit window, from
        // the left. The regime is at most N ≤ 64 bits long, so it always fits.
        let (run, regime_bits) =
          if self.regime >= 0 {
            let run = self.regime as u32 + 1;
            (run, ((1u128 << run) - 1) << 1)
          } else {
            (self.regime.unsigned_abs(), 1u128)
          };
        let regime_width = run + 1;
        let mut window = regime_bits << (128 - regime_width);
        let mut used = regime_width;

        let es = Posit::<N, ES, Int>::ES;
        if es > 0 {
          window |= u128::from(self.exponent) << (128 - used - es);
        }
        used += es;

        // Whatever part of the fraction falls off the right of the window is folded into `sticky`.
        let sticky = sticky || self.fraction << (128 - used) != 0;
        window |= self.fraction >> used;

        // Keep the first `magnitude_bits` bits, and round on the rest. Recall the rule: "round to
        // nearest, if tied round to even bit pattern".
        //
        //   kept | round | sticky | result
        //   ...x | 0     | x      | round down (+0)
        //   ...0 | 1     | 0      | round down to even (+0)
        //   ...1 | 1     | 0      | round up to even (+1)
        //   ...x | 1     | 1      | round up (+1)
        let kept = (window >> (128 - magnitude_bits)) as u64;
        let round = (window >> (127 - magnitude_bits)) & 1 == 1;
        let sticky = sticky || window << (magnitude_bits + 1) != 0;
        let round_up = round && (sticky || kept & 1 == 1);

        // The regime is at most `MAX_REGIME`, so `kept` can only be all ones if it is exactly
        // the regime of maxpos, in which case the round bit is its terminating 0. Likewise the
        // regime is at least `-MAX_REGIME`, so `kept` has a 1 somewhere.
        let magnitude = kept + u64::from(round_up);
        let overflow = self.regime == Self::MAX_REGIME && (self.exponent != 0 || self.fraction != 0 || sticky);
        (magnitude, if overflow { Saturation::Overflow } else { Saturation::Within })
      };

    debug_assert!(magnitude >= 1 && magnitude <= max_magnitude);
    let bits = if self.sign { (magnitude as i64).wrapping_neg() } else { magnitude as i64 };
    (Posit::from_i64(bits), saturation)
  }
}
