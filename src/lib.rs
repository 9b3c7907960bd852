#![cfg_attr(not(test), no_std)]
//! This crate is a software implementation of
//! [posit arithmetic](https://posithub.org/docs/posit_standard-2.pdf): a tapered-precision binary
//! number format, with correctly rounded operators and an exact fused accumulator (the *quire*).
//!
//! # Introduction
//!
//! A posit packs a sign, a run-length encoded *regime*, up to `ES` exponent bits, and a fraction
//! into `N` bits. Because the regime grows and shrinks with the magnitude of the value, precision
//! is highest near ±1 and tapers off towards the extremes. There are exactly two special values:
//! [zero](Posit::ZERO) and [NaR](Posit::NAR) ("not a real"), which stands in for every infinity
//! and every undefined result.
//!
//! Every operator of this crate rounds **exactly once**, to the nearest representable posit (ties
//! to the even bit pattern), and never rounds a nonzero value to zero or to NaR.
//!
//! # Usage
//!
//! ```
//! # use tapered_posit::Posit;
//! use tapered_posit::{p8, p16, p32, p64};  // Standard: n bits, 2 exponent bits
//! type MyPosit = Posit<24, 3, i32>;  // Non-standard: 24 bits, 3 exponent bits
//!
//! // Create posits from ints, IEEE floats, strings, constants, or a raw bit representation.
//! # use tapered_posit::{RoundFrom, RoundInto};
//! let a = p32::round_from(2.71_f64);
//! let b = p32::round_from(42_i32);
//! let c = p32::from_bits(0x7f001337);
//! let d: p16 = "16.2x4000p".parse().unwrap();
//! assert_eq!(d, p16::ONE);
//!
//! // Perform basic arithmetic and comparisons with the usual operators.
//! assert!(p16::round_from(2.25_f32) + p16::ONE == 3.25_f32.round_into());
//! assert!(p16::MIN_POSITIVE < 1e-15_f32.round_into());
//!
//! // Convert posits back to ints, IEEE floats, strings, or a raw bit representation.
//! assert_eq!(p8::ONE.to_bits(), 0b01000000);
//! assert_eq!(f64::round_from(p64::MINUS_ONE), -1.0);
//! ```
//!
//! Sums of products can be computed with no intermediate rounding at all using a [`Quire`]:
//!
//! ```
//! # use tapered_posit::{p32, q32, RoundFrom};
//! let a = [3.2e8, 1., -1., 8e7].map(p32::round_from);
//! let b = [4e7, 1., -1., -1.6e8].map(p32::round_from);
//! let dot = q32::fused_dot(a.into_iter().zip(b)).unwrap();
//! assert_eq!(dot, p32::round_from(2_i32));
//! ```
//!
//! # Errors
//!
//! The operators never fail: an invalid operation yields NaR and an overflow saturates to the
//! largest representable magnitude. Callers who want to be told about these conditions can use
//! the `checked_*` methods, a [`Context`] with [`ErrorPolicy::Signal`], or the panicking
//! [`Strict`] wrapper. Quire overflow is always reported.
//!
//! # Tracing
//!
//! Every operator has a `*_with` variant that takes an [`Observer`], which is called with the
//! intermediate values of the computation. [`LogObserver`] forwards them to the [`log`] crate.

mod posit;
mod underlying;

mod error;
mod observe;
mod policy;

pub use posit::{Layout, Posit, Quire, Triple};
pub use posit::codec::{Decoded, Fields, Saturation};
pub use underlying::Int;

pub use error::{Invalid, ParsePositError, PositError};
pub use observe::{Event, LogObserver, Observer, Op, Silent};
pub use policy::{Context, ErrorPolicy, Outcome, Strict};

/// Standard-defined 8-bit posit (with 2-bit exponent).
#[allow(non_camel_case_types)]
pub type p8 = Posit<8, 2, i8>;

/// Standard-defined 16-bit posit (with 2-bit exponent).
#[allow(non_camel_case_types)]
pub type p16 = Posit<16, 2, i16>;

/// Standard-defined 32-bit posit (with 2-bit exponent).
#[allow(non_camel_case_types)]
pub type p32 = Posit<32, 2, i32>;

/// Standard-defined 64-bit posit (with 2-bit exponent).
#[allow(non_camel_case_types)]
pub type p64 = Posit<64, 2, i64>;

/// Quire for [`p8`], with 30 bits of carry capacity (128 bits in total).
#[allow(non_camel_case_types)]
pub type q8 = Quire<8, 2, 2>;

/// Quire for [`p16`], with 30 bits of carry capacity (256 bits in total).
#[allow(non_camel_case_types)]
pub type q16 = Quire<16, 2, 4>;

/// Quire for [`p32`], with 30 bits of carry capacity (512 bits in total).
#[allow(non_camel_case_types)]
pub type q32 = Quire<32, 2, 8>;

/// Quire for [`p64`], with 30 bits of carry capacity (1024 bits in total).
#[allow(non_camel_case_types)]
pub type q64 = Quire<64, 2, 16>;

pub use posit::convert::{RoundFrom, RoundInto};

/// Re-export some internals for benchmarking purposes, only on `feature = "bench"`.
#[cfg(feature = "bench")]
mod bench;

/// Number of cases for each proptest.
#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) { 0x2000 } else { 0x20000 };
