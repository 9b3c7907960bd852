use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The size of this Posit type in bits (i.e. parameter `N`).
  ///
  /// Note: this is the logical size, not necessarily the size of the underlying type.
  pub const BITS: u32 = {
    assert!(
      N >= 3,
      "A posit cannot have fewer than 3 bits",
    );
    assert!(
      N <= Int::BITS,
      "Cannot store an n-bit Posit in an underlying Int machine type with fewer bits.",
    );
    N
  };

  /// The number of exponent bits (i.e. parameter `ES`).
  pub const ES: u32 = {
    assert!(
      ES + 3 <= N,
      "A posit needs room for the sign, a two-bit regime, and all ES exponent bits",
    );
    // Scales are tracked in an `i32`. The widest intermediate is the scale of a quire holding
    // 2^64 products of maxpos, so we keep (N-2) << ES, the largest scale, under 2^24.
    assert!(
      ES <= 20 && ((N - 2) as u64) << ES < 1 << 24,
      "The chosen ES is too big for this N: the largest scale (N-2) * 2^ES must stay below 2^24",
    );
    ES
  };

  /// When storing an `N`-bit posit in a machine type whose width is `M`, the leftmost `M - N`
  /// bits are copies of bit `N-1`. Those are the *junk* bits.
  pub(crate) const JUNK_BITS: u32 = Int::BITS - Self::BITS;

  /// Take an `i64` and sign-extend from [`Self::BITS`] (logical width of posit) to 64 bits.
  #[inline]
  pub(crate) const fn sign_extend(x: i64) -> i64 {
    (x << (64 - Self::BITS)) >> (64 - Self::BITS)
  }

  /// Construct a posit from its raw bit representation. Bits higher (more significant) than the
  /// lowest `N` ([`Self::BITS`]) bits, if any, are ignored.
  #[inline]
  pub fn from_bits(bits: Int) -> Self {
    Self::from_i64(bits.as_i64())
  }

  /// Return the underlying bit representation of `self` as a machine int. Bits higher
  /// (more significant) than the lowest `N` ([`Self::BITS`]) bits, if any, are set equal to the
  /// `N-1`th bit (i.e. sign-extended).
  #[inline]
  pub const fn to_bits(self) -> Int {
    self.0
  }

  /// The bits of `self`, sign-extended to an `i64`.
  #[inline]
  pub(crate) fn as_i64(self) -> i64 {
    self.0.as_i64()
  }

  /// The posit whose lowest `N` bits are the lowest `N` bits of `bits`.
  #[inline]
  pub(crate) fn from_i64(bits: i64) -> Self {
    Self(Int::of_i64(Self::sign_extend(bits)))
  }

  /// Whether `self` is [NaR](Self::NAR).
  #[inline]
  pub fn is_nar(self) -> bool {
    self == Self::NAR
  }

  /// Whether `self` is [zero](Self::ZERO).
  #[inline]
  pub fn is_zero(self) -> bool {
    self == Self::ZERO
  }

  /// Checks whether `self` is an exception ([0](Self::ZERO) or [NaR](Self::NAR)).
  #[inline]
  pub fn is_special(self) -> bool {
    self.as_i64() << (64 - Self::BITS + 1) == 0
  }

  /// Whether `self` is strictly below zero (NaR is not).
  #[inline]
  pub fn is_negative(self) -> bool {
    self.as_i64() < 0 && !self.is_nar()
  }
}


/// Compile-time checks on the parameters.
///
/// ```compile_fail
/// use tapered_posit::Posit;
/// pub fn foo() -> Posit::<2, 0, i8> { Posit::<2, 0, i8>::ONE + Posit::<2, 0, i8>::ONE }
/// foo();
/// ```
///
/// ```compile_fail
/// use tapered_posit::Posit;
/// pub fn foo() -> Posit::<8, 6, i8> { Posit::<8, 6, i8>::ONE + Posit::<8, 6, i8>::ONE }
/// foo();
/// ```
///
/// ```compile_fail
/// use tapered_posit::Posit;
/// pub fn foo() -> Posit::<16, 2, i8> { Posit::<16, 2, i8>::ONE + Posit::<16, 2, i8>::ONE }
/// foo();
/// ```
///
/// ```
/// use tapered_posit::Posit;
/// pub fn foo() -> Posit::<8, 5, i8> { Posit::<8, 5, i8>::ONE + Posit::<8, 5, i8>::ONE }
/// foo();
/// ```
#[allow(dead_code)]
fn tests_compile_fail() {}
