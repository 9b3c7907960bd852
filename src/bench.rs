//! Re-export some internals for benchmarking purposes; available with feature = "bench".

use crate::posit::real::{Real, Unrounded};
use crate::posit::{add_kernel, div_kernel, mul_kernel};
use crate::{Decoded, Fields, Posit, RoundInto};

/// An exact or unrounded value, as plain numbers: `(sign, scale, significand, sticky)`, where the
/// significand is left-aligned in a `u128`.
pub type BenchValue = (bool, i32, u128, bool);

impl From<Unrounded> for BenchValue {
  fn from(x: Unrounded) -> Self {
    (x.sign, x.scale, x.significand, x.sticky)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  fn bench_real(self) -> Option<Real> {
    self.to_real().ok()
  }

  /// The exact value of `self`, or `None` for 0 and NaR.
  pub fn bench_to_real(self) -> Option<BenchValue> {
    self.bench_real().map(|x| Unrounded::from(x).into())
  }

  /// The unrounded sum of two posits, or `None` if either is 0 or NaR, or the sum is 0.
  pub fn bench_add_kernel(self, rhs: Self) -> Option<BenchValue> {
    let (x, y) = (self.bench_real()?, rhs.bench_real()?);
    add_kernel(x.into(), y.into()).map(Into::into)
  }

  /// The unrounded product of two posits, or `None` if either is 0 or NaR.
  pub fn bench_mul_kernel(self, rhs: Self) -> Option<BenchValue> {
    Some(mul_kernel(self.bench_real()?, rhs.bench_real()?).into())
  }

  /// The unrounded quotient of two posits, or `None` if either is 0 or NaR.
  pub fn bench_div_kernel(self, rhs: Self) -> Option<BenchValue> {
    Some(div_kernel(self.bench_real()?, rhs.bench_real()?).into())
  }

  /// Round an unrounded value, as returned by the kernels above, into a posit.
  pub fn bench_round((sign, scale, significand, sticky): BenchValue) -> Self {
    Unrounded { sign, scale, significand, sticky }.round().0
  }
}

// Export these for inspection with `cargo asm`.

#[unsafe(no_mangle)]
pub fn decode_32(arg: Posit<32, 2, i32>) -> Decoded<32, 2> {
  arg.decode()
}

#[unsafe(no_mangle)]
pub fn decode_64(arg: Posit<64, 2, i64>) -> Decoded<64, 2> {
  arg.decode()
}

#[unsafe(no_mangle)]
pub fn encode_round_32(arg: Fields<32, 2>, sticky: bool) -> Posit<32, 2, i32> {
  arg.encode_round(sticky).0
}

#[unsafe(no_mangle)]
pub fn encode_round_64(arg: Fields<64, 2>, sticky: bool) -> Posit<64, 2, i64> {
  arg.encode_round(sticky).0
}

//

#[unsafe(no_mangle)]
pub fn add_32(x: Posit<32, 2, i32>, y: Posit<32, 2, i32>) -> Posit<32, 2, i32> {
  x.add(y)
}

#[unsafe(no_mangle)]
pub fn add_64(x: Posit<64, 2, i64>, y: Posit<64, 2, i64>) -> Posit<64, 2, i64> {
  x.add(y)
}

#[unsafe(no_mangle)]
pub fn mul_32(x: Posit<32, 2, i32>, y: Posit<32, 2, i32>) -> Posit<32, 2, i32> {
  x.mul(y)
}

#[unsafe(no_mangle)]
pub fn mul_64(x: Posit<64, 2, i64>, y: Posit<64, 2, i64>) -> Posit<64, 2, i64> {
  x.mul(y)
}

#[unsafe(no_mangle)]
pub fn div_32(x: Posit<32, 2, i32>, y: Posit<32, 2, i32>) -> Posit<32, 2, i32> {
  x.div(y)
}

#[unsafe(no_mangle)]
pub fn div_64(x: Posit<64, 2, i64>, y: Posit<64, 2, i64>) -> Posit<64, 2, i64> {
  x.div(y)
}

#[unsafe(no_mangle)]
pub fn sqrt_32(x: Posit<32, 2, i32>) -> Posit<32, 2, i32> {
  x.sqrt()
}

//

#[unsafe(no_mangle)]
pub fn quire_accumulate_32(quire: &mut crate::q32, a: crate::p32, b: crate::p32) {
  let _ = quire.accumulate(a, b);
}

#[unsafe(no_mangle)]
pub fn quire_accumulate_64(quire: &mut crate::q64, a: crate::p64, b: crate::p64) {
  let _ = quire.accumulate(a, b);
}

//

#[unsafe(no_mangle)]
pub fn round_f64_to_p32(num: f64) -> crate::p32 {
  num.round_into()
}

#[unsafe(no_mangle)]
pub fn round_p32_to_f64(num: crate::p32) -> f64 {
  num.round_into()
}

#[unsafe(no_mangle)]
pub fn round_p32_to_p16(num: crate::p32) -> crate::p16 {
  num.convert()
}
