//! Error conditions of posit arithmetic.
//!
//! With the default, quiet behaviour, none of these abort anything: an invalid operation yields
//! [NaR](crate::Posit::NAR), and an overflow saturates to [`MAX`](crate::Posit::MAX) or
//! [`MIN`](crate::Posit::MIN). The exception is [`PositError::QuireOverflow`], which is always
//! reported, since saturating the quire would silently round the sum.

/// Why an operation was invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(thiserror::Error)]
pub enum Invalid {
  #[error("an operand is NaR")]
  NarOperand,
  #[error("division by zero")]
  DivideByZero,
  #[error("square root of a negative number")]
  NegativeSqrt,
}

/// A condition met by a posit operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(thiserror::Error)]
pub enum PositError {
  /// The result is NaR: an operand was NaR, or the operation is undefined for these operands.
  #[error("invalid operation: {0}")]
  InvalidOperation(#[from] Invalid),
  /// The magnitude of the exact result exceeds the largest representable posit.
  #[error("result magnitude exceeds the largest representable posit")]
  Overflow,
  /// The running sum in a quire exceeded its integer capacity. The quire is unusable until
  /// cleared.
  #[error("quire overflowed its carry capacity")]
  QuireOverflow,
}

/// The error returned when parsing a posit from text fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(thiserror::Error)]
pub enum ParsePositError {
  #[error("text is neither a hex posit (`N.ESxHEXp`), `nar`, nor a decimal number")]
  Syntax,
  #[error("hex posit is for a {nbits}-bit posit with {es} exponent bits, expected {expected_nbits}.{expected_es}")]
  FormatMismatch { nbits: u32, es: u32, expected_nbits: u32, expected_es: u32 },
}
