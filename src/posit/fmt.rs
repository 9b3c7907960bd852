use super::*;

use core::fmt;
use core::str::FromStr;
use crate::ParsePositError;
use codec::Decoded;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The `N` bits of `self`, without the junk bits above them.
  #[inline]
  fn bits_unsigned(self) -> u64 {
    (self.as_i64() as u64) & (u64::MAX >> (64 - Self::BITS))
  }

  /// The widths of the regime, exponent, and fraction fields of `self`.
  fn field_widths(self) -> (u32, u32, u32) {
    let magnitude_bits = Self::BITS - 1;
    match self.decode() {
      Decoded::Fields(fields) => {
        let run = if fields.regime >= 0 { fields.regime as u32 + 1 } else { fields.regime.unsigned_abs() };
        let regime = (run + 1).min(magnitude_bits);
        let exponent = Self::ES.min(magnitude_bits - regime);
        (regime, exponent, fields.fraction_width)
      }
      Decoded::Zero | Decoded::NaR => (magnitude_bits, 0, 0),
    }
  }

  /// Show the bits of `self`, with its sign, regime, exponent, and fraction separated by dots. For
  /// negative posits, the fields shown are those of its absolute value.
  ///
  /// ```
  /// # use tapered_posit::p8;
  /// assert_eq!(p8::ONE.layout().to_string(), "0b0.10.00.000");
  /// assert_eq!(p8::MINUS_ONE.layout().to_string(), "0b1.10.00.000");
  /// assert_eq!(p8::MAX.layout().to_string(), "0b0.1111111..");
  /// ```
  pub fn layout(self) -> Layout<N, ES, Int> {
    Layout(self)
  }

  /// Show `self` as a triple of sign, scale (the power of two), and fraction bits.
  ///
  /// ```
  /// # use tapered_posit::p8;
  /// assert_eq!(p8::ONE.triple().to_string(), "(+, 0, 000)");
  /// assert_eq!(p8::from_bits(0b1100_0011_u8 as i8).triple().to_string(), "(-, -1, 101)");
  /// assert_eq!(p8::NAR.triple().to_string(), "nar");
  /// ```
  pub fn triple(self) -> Triple<N, ES, Int> {
    Triple(self)
  }
}

/// The [`Display`](fmt::Display)-able result of [`Posit::layout`].
#[derive(Clone, Copy, Debug)]
pub struct Layout<const N: u32, const ES: u32, Int: crate::Int>(Posit<N, ES, Int>);

/// The [`Display`](fmt::Display)-able result of [`Posit::triple`].
#[derive(Clone, Copy, Debug)]
pub struct Triple<const N: u32, const ES: u32, Int: crate::Int>(Posit<N, ES, Int>);

/// Write the `width` bits of `bits` starting `skip` bits from the left of an `total`-bit word.
fn write_field(f: &mut fmt::Formatter<'_>, bits: u64, total: u32, skip: u32, width: u32) -> fmt::Result {
  for i in skip .. skip + width {
    let bit = (bits >> (total - 1 - i)) & 1;
    write!(f, "{bit}")?;
  }
  Ok(())
}

impl<const N: u32, const ES: u32, Int: crate::Int> fmt::Display for Layout<N, ES, Int> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let p = self.0;
    let total = Posit::<N, ES, Int>::BITS;
    let sign = u8::from(p.as_i64() < 0);
    let magnitude = if p.is_nar() { 0 } else { p.as_i64().unsigned_abs() };
    let (regime, exponent, fraction) = p.field_widths();
    // The magnitude has a 0 where the sign bit is, so skip it.
    write!(f, "0b{sign}.")?;
    write_field(f, magnitude, total, 1, regime)?;
    f.write_str(".")?;
    write_field(f, magnitude, total, 1 + regime, exponent)?;
    f.write_str(".")?;
    write_field(f, magnitude, total, 1 + regime + exponent, fraction)
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int> fmt::Display for Triple<N, ES, Int> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let fields = match self.0.decode() {
      Decoded::Fields(fields) => fields,
      Decoded::Zero => return f.write_str("zero"),
      Decoded::NaR => return f.write_str("nar"),
    };
    let sign = if fields.sign { '-' } else { '+' };
    let scale = (fields.regime << ES) + fields.exponent as i32;
    write!(f, "({sign}, {scale}, ")?;
    for i in 0 .. fields.fraction_width {
      let bit = (fields.fraction >> (127 - i)) & 1;
      write!(f, "{bit}")?;
    }
    f.write_str(")")
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> fmt::Debug for Posit<N, ES, Int> {
  /// Shows the format and the `N` bits of the pattern, e.g. `Posit<8, 2>(0b01000000)`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let bits = self.bits_unsigned();
    write!(f, "Posit<{N}, {ES}>(0b{bits:0w$b})", w = Self::BITS as usize)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> fmt::Display for Posit<N, ES, Int> {
  /// Shows the value in decimal, going through the nearest `f64` (so posits wider than 53 bits
  /// may show rounded), or `NaR`. Formatting options are those of `f64`.
  ///
  /// ```
  /// # use tapered_posit::{p16, RoundFrom};
  /// assert_eq!(p16::round_from(2.5).to_string(), "2.5");
  /// assert_eq!(format!("{:.3}", p16::round_from(0.1)), "0.100");
  /// assert_eq!(p16::NAR.to_string(), "NaR");
  /// ```
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_nar() {
      f.write_str("NaR")
    } else {
      fmt::Display::fmt(&self.to_f64(), f)
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> fmt::Binary for Posit<N, ES, Int> {
  /// The `N` bits of the pattern, zero-padded.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let bits = self.bits_unsigned();
    if f.alternate() {
      f.write_str("0b")?;
    }
    write!(f, "{bits:0w$b}", w = Self::BITS as usize)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> fmt::LowerHex for Posit<N, ES, Int> {
  /// The hex posit format `N.ESxHEXp`, where `HEX` are the `N` bits of the pattern, in uppercase
  /// hex digits, zero-padded. This is also accepted by [`FromStr`].
  ///
  /// ```
  /// # use tapered_posit::{p16, Posit};
  /// assert_eq!(format!("{:x}", p16::ONE), "16.2x4000p");
  /// assert_eq!(format!("{:x}", Posit::<6, 1, i8>::NAR), "6.1x20p");
  /// ```
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let bits = self.bits_unsigned();
    write!(f, "{N}.{ES}x{bits:0w$X}p", w = Self::BITS.div_ceil(4) as usize)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> FromStr for Posit<N, ES, Int> {
  type Err = ParsePositError;

  /// Parse a posit from either:
  ///
  ///   - the hex posit format `N.ESxHEXp` (see [`LowerHex`](fmt::LowerHex)), which must be for
  ///     this very format;
  ///   - `nar` (in any case), for NaR;
  ///   - a decimal number, which is parsed as an `f64` and then rounded.
  ///
  /// Note that a decimal number is therefore rounded twice: first to the nearest `f64`, then to
  /// the nearest posit. This is only different from rounding it once if the `f64` lands exactly on
  /// a tie between two posits, which needs more significant digits than an `f64` has, but then
  /// the result can be one ulp away from the correctly rounded posit. Use the hex format for exact
  /// values.
  ///
  /// ```
  /// # use tapered_posit::{p8, p16, ParsePositError};
  /// assert_eq!("16.2x4000p".parse(), Ok(p16::ONE));
  /// assert_eq!("NaR".parse(), Ok(p16::NAR));
  /// assert_eq!("-1".parse(), Ok(p16::MINUS_ONE));
  /// assert!(matches!("16.2x4000p".parse::<p8>(), Err(ParsePositError::FormatMismatch { .. })));
  /// ```
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.eq_ignore_ascii_case("nar") {
      return Ok(Self::NAR)
    }
    if let Some((format, digits)) = s.split_once('x') {
      return Self::parse_hex(format, digits)
    }
    let value: f64 = s.parse().map_err(|_| ParsePositError::Syntax)?;
    Ok(<Self as crate::RoundFrom<f64>>::round_from(value))
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Parse the two halves of `N.ESxHEXp`, split at the `x`.
  fn parse_hex(format: &str, digits: &str) -> Result<Self, ParsePositError> {
    let (nbits, es) = format.split_once('.').ok_or(ParsePositError::Syntax)?;
    let nbits: u32 = nbits.parse().map_err(|_| ParsePositError::Syntax)?;
    let es: u32 = es.parse().map_err(|_| ParsePositError::Syntax)?;
    if (nbits, es) != (N, ES) {
      return Err(ParsePositError::FormatMismatch { nbits, es, expected_nbits: N, expected_es: ES })
    }
    let digits = digits.strip_suffix('p').ok_or(ParsePositError::Syntax)?;
    // `from_str_radix` would accept a sign.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
      return Err(ParsePositError::Syntax)
    }
    let bits = u64::from_str_radix(digits, 16).map_err(|_| ParsePositError::Syntax)?;
    if bits >> (Self::BITS - 1) > 1 {
      return Err(ParsePositError::Syntax)
    }
    Ok(Self::from_i64(bits as i64))
  }
}
