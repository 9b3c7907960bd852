use super::*;

use crate::observe::{Event, Observer, Op};
use crate::policy::Outcome;
use crate::Invalid;

/// Addition and subtraction (both use the same addition algorithm, and `a - b` is simply
/// `a + (-b)`).
mod add;

/// Multiplication.
mod mul;

/// Division and reciprocal.
mod div;

/// Square root.
mod sqrt;

/// Fused multiply-add.
mod fused;

pub(crate) use add::add_kernel;
pub(crate) use mul::mul_kernel;
#[cfg(feature = "bench")]
pub(crate) use div::div_kernel;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Early exit: an operand of `op` is NaR, so the result is NaR.
  #[inline]
  pub(crate) fn nar_operand(op: Op, obs: &mut impl Observer) -> Outcome<Self> {
    Self::invalid(op, Invalid::NarOperand, obs)
  }

  /// Early exit: `op` is undefined for its operands, so the result is NaR.
  #[inline]
  pub(crate) fn invalid(op: Op, why: Invalid, obs: &mut impl Observer) -> Outcome<Self> {
    obs.observe(&Event::Special { op, nar: true });
    Outcome::failed(Self::NAR, why.into())
  }

  /// Early exit: an operand of `op` is 0, so the result is known to be `value`.
  #[inline]
  pub(crate) fn exact(op: Op, value: Self, obs: &mut impl Observer) -> Outcome<Self> {
    obs.observe(&Event::Special { op, nar: false });
    Outcome::ok(value)
  }
}

/// Helper macro for implementing operators for all combinations of value and reference
macro_rules! mk_ops {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident) => {
    impl<const N: u32, const ES: u32, Int: crate::Int>
    $trait<Posit<N, ES, Int>> for Posit<N, ES, Int> {
      type Output = Posit<N, ES, Int>;

      #[inline]
      fn $name(self, rhs: Self) -> Self::Output { self.$name(rhs) }
    }

    impl<const N: u32, const ES: u32, Int: crate::Int>
    $trait<&Posit<N, ES, Int>> for Posit<N, ES, Int> {
      type Output = Posit<N, ES, Int>;

      #[inline]
      fn $name(self, rhs: &Self) -> Self::Output { self.$name(*rhs) }
    }

    impl<const N: u32, const ES: u32, Int: crate::Int>
    $trait<Posit<N, ES, Int>> for &Posit<N, ES, Int> {
      type Output = Posit<N, ES, Int>;

      #[inline]
      fn $name(self, rhs: Posit<N, ES, Int>) -> Self::Output { (*self).$name(rhs) }
    }

    impl<const N: u32, const ES: u32, Int: crate::Int>
    $trait<&Posit<N, ES, Int>> for &Posit<N, ES, Int> {
      type Output = Posit<N, ES, Int>;

      #[inline]
      fn $name(self, rhs: &Posit<N, ES, Int>) -> Self::Output { (*self).$name(*rhs) }
    }

    impl<const N: u32, const ES: u32, Int: crate::Int>
    $trait_assign<Posit<N, ES, Int>> for Posit<N, ES, Int> {
      #[inline]
      fn $name_assign(&mut self, rhs: Posit<N, ES, Int>) { *self = self.$name(rhs) }
    }

    impl<const N: u32, const ES: u32, Int: crate::Int>
    $trait_assign<&Posit<N, ES, Int>> for Posit<N, ES, Int> {
      #[inline]
      fn $name_assign(&mut self, rhs: &Posit<N, ES, Int>) { *self = self.$name(*rhs) }
    }
  }
}

pub(crate) use mk_ops;

/// Macro for instantiating the suite of tests for a binary operator of posits: every result must
/// be the correctly rounded exact result, as computed by [`crate::posit::rational`].
#[cfg(test)]
macro_rules! mk_tests {
  ($op:tt, $op_assign:tt) => {
    use crate::Posit;
    use malachite::rational::Rational;
    use proptest::prelude::*;

    #[allow(dead_code)]
    fn ops() {
      let mut a = crate::p32::ONE;
      let mut b = crate::p32::MINUS_ONE;
      let _ = a $op b;
      let _ = &a $op b;
      let _ = a $op &b;
      let _ = &a $op &b;
      a $op_assign b;
      b $op_assign &a;
    }

    /// Aux function: the correctly rounded value of `a $op b`.
    fn expected<const N: u32, const ES: u32, Int: crate::Int>(
      a: Posit<N, ES, Int>,
      b: Posit<N, ES, Int>,
    ) -> Posit<N, ES, Int> {
      match (Rational::try_from(a), Rational::try_from(b)) {
        (Ok(a), Ok(b)) => {
          if stringify!($op) == "/" && b == 0 {
            return Posit::NAR
          }
          crate::posit::rational::round(&(a $op b))
        }
        _ => Posit::NAR,
      }
    }

    macro_rules! test_exhaustive {
      ($name:ident, $posit:ty) => {
        #[test]
        fn $name() {
          for a in <$posit>::cases_exhaustive_all() {
            for b in <$posit>::cases_exhaustive_all() {
              assert_eq!(a $op b, expected(a, b), "{:?} {} {:?}", a, stringify!($op), b)
            }
          }
        }
      };
    }

    macro_rules! test_proptest {
      ($name:ident, $posit:ty) => {
        proptest!{
          #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
          #[test]
          fn $name(
            a in <$posit>::cases_proptest_all(),
            b in <$posit>::cases_proptest_all(),
          ) {
            prop_assert_eq!(a $op b, expected(a, b), "{:?} {} {:?}", a, stringify!($op), b)
          }
        }
      };
    }

    test_exhaustive!{posit_3_0_exhaustive, Posit::<3, 0, i8>}
    test_exhaustive!{posit_4_0_exhaustive, Posit::<4, 0, i8>}
    test_exhaustive!{posit_4_1_exhaustive, Posit::<4, 1, i8>}
    test_exhaustive!{posit_6_3_exhaustive, Posit::<6, 3, i8>}
    test_exhaustive!{posit_7_1_exhaustive, Posit::<7, 1, i8>}

    test_exhaustive!{posit_8_0_exhaustive, Posit::<8, 0, i8>}
    test_exhaustive!{posit_8_1_exhaustive, Posit::<8, 1, i8>}
    test_exhaustive!{p8_exhaustive, crate::p8}
    test_exhaustive!{posit_8_3_exhaustive, Posit::<8, 3, i8>}

    test_exhaustive!{posit_10_0_exhaustive, Posit::<10, 0, i16>}
    test_exhaustive!{posit_10_1_exhaustive, Posit::<10, 1, i16>}
    test_exhaustive!{posit_10_2_exhaustive, Posit::<10, 2, i16>}
    test_exhaustive!{posit_10_3_exhaustive, Posit::<10, 3, i16>}

    // Beyond 10 bits, testing every pair of operands gets too slow, so sample instead.
    test_proptest!{posit_12_2_proptest, Posit::<12, 2, i16>}
    test_proptest!{p16_proptest, crate::p16}
    test_proptest!{posit_20_4_proptest, Posit::<20, 4, i32>}
    test_proptest!{p32_proptest, crate::p32}
    test_proptest!{p64_proptest, crate::p64}
  }
}

#[cfg(test)]
pub(crate) use mk_tests;
