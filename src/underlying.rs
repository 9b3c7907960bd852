//! The machine integer types that can hold the bits of a posit. The end-user only sees the sealed
//! [`Int`] trait, implemented for `i8`, `i16`, `i32`, and `i64`.
//!
//! All the arithmetic of this crate happens on `u64`/`u128` words after a posit is decoded, so
//! the storage type only needs to convert losslessly to and from `i64`.

/// The trait for the underlying machine integer types that can be used to store a posit (only
/// satisfied by `i8`, `i16`, `i32`, and `i64`).
///
/// This is a *sealed* type.
pub trait Int: Sealed {}

/// Actual operations implemented here.
pub trait Sealed:
  Copy + Clone + Default +
  Eq + Ord + core::hash::Hash +
  core::fmt::Debug + core::fmt::Display + core::fmt::Binary + core::fmt::LowerHex
{
  const ZERO: Self;
  const BITS: u32;

  /// Sign-extending widening to `i64`.
  fn as_i64(self) -> i64;

  /// Truncating narrowing from `i64` (the same as the keyword `as`).
  fn of_i64(x: i64) -> Self;
}

macro_rules! impl_int {
  ($($t:ty),*) => {$(
    impl Int for $t {}

    impl Sealed for $t {
      const ZERO: Self = 0;
      const BITS: u32 = <$t>::BITS;

      #[inline]
      fn as_i64(self) -> i64 { self as i64 }

      #[inline]
      fn of_i64(x: i64) -> Self { x as $t }
    }
  )*}
}

impl_int!{i8, i16, i32, i64}

/// A `const` version of [`Sealed::of_i64`], needed to build the constants of a generic posit type
/// (trait methods cannot be called in `const` context).
///
/// ```ignore
/// assert_eq!(const_of_i64::<i8>(0x1ff), -1i8);
/// ```
pub(crate) const fn const_of_i64<T: Int>(x: i64) -> T {
  macro_rules! arm {
    ($t:ty) => {
      if T::BITS == <$t>::BITS {
        let narrow = x as $t;
        // SAFETY: `T` is sealed to the `iX` types, so a `T` with as many bits as `$t` is `$t`.
        return unsafe { core::mem::transmute_copy::<$t, T>(&narrow) }
      }
    }
  }
  arm!(i8);
  arm!(i16);
  arm!(i32);
  arm!(i64);
  unreachable!()
}
