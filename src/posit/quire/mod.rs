use super::*;

/// A *quire*, for a posit type with `N` bits and `ES` exponent bits, which is `LIMBS` 64-bit words
/// long.
///
/// A quire is a fixed-point accumulator that lets sums and dot products of posits be calculated
/// with **no** intermediate rounding whatsoever: every product is added exactly, and the sum is
/// rounded only once, when it is read back with [`to_value`](Self::to_value).
///
/// `LIMBS` is bounded from below by the number of bits needed to hold the product of any two
/// posits (fewer `LIMBS` is a compile-time error). Every bit above that is a *carry* bit: with
/// [`CAPACITY`](Self::CAPACITY) carry bits, at least 2<sup>`CAPACITY`</sup> products of any
/// magnitude can be accumulated without overflow. The standard quires ([`q8`](crate::q8),
/// [`q16`](crate::q16), [`q32`](crate::q32), [`q64`](crate::q64)) have 30.
///
/// A NaR operand makes the quire NaR, and it stays NaR until [cleared](Self::clear). If the sum
/// does exceed the register, the operation fails with [`PositError::QuireOverflow`] and the quire
/// is *poisoned*: every later operation fails the same way, until it is cleared.
///
/// A quire is single-writer: every operation that changes it takes `&mut self`, and there is no
/// internal locking. To accumulate from several threads, give each one its own quire and combine
/// them with [`add_quire`](Self::add_quire).
///
/// # Examples
///
/// ```
/// # use tapered_posit::*;
/// let mut q = q16::new();
/// let big = p16::round_from(1e8);
/// q.accumulate(big, big)?;
/// q.add_posit(p16::ONE)?;
/// q.accumulate_negated(big, big)?;
/// assert_eq!(q.to_value()?, p16::ONE);
///
/// // Rounding after every step loses the 1 entirely.
/// assert_eq!(big * big + p16::ONE - big * big, p16::ZERO);
/// # Ok::<(), PositError>(())
/// ```
//
// The register is a two's complement fixed-point number, stored as an array of `u64`s in
// little-endian order (`limbs[0]` holds the least significant bits). The value 1.0 is the bit at
// index `FIXED_POINT`.
#[derive(Clone)]
#[derive(PartialEq, Eq, Hash)]
pub struct Quire<
  const N: u32,
  const ES: u32,
  const LIMBS: usize,
> {
  pub(crate) limbs: [u64; LIMBS],
  pub(crate) state: State,
}

/// Whether the register of a quire holds a number.
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub(crate) enum State {
  Finite,
  NaR,
  Overflowed,
}

/// Basic constants and functions, such as the position of the fixed point, the compile-time check
/// that `LIMBS` is enough, etc.
mod basics;

/// Adding products and posits to the quire, with exact carry propagation.
mod accumulate;

/// Rounding the quire back into a posit.
mod convert;

/// The `+=` and `-=` operators.
mod ops;
