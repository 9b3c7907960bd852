//! What to do about the error conditions met by posit operations.
//!
//! Every operation internally produces an [`Outcome`]: the quiet result (NaR, or a saturated
//! extreme) together with the [`PositError`] condition, if any. The various APIs differ only in what
//! they do with it:
//!
//!   - The operators (`+`, `*`, …) and plain methods (`a.sqrt()`) keep the quiet value.
//!   - The `checked_*` methods turn any condition into an `Err`.
//!   - A [`Context`] does one or the other depending on its [`ErrorPolicy`].
//!   - The [`Strict`] wrapper panics.

use crate::observe::{Observer, Silent};
use crate::{Posit, PositError, Quire};

/// The result of an operation: the value it evaluates to, plus the condition it met, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
  /// The result under the quiet policy: NaR for invalid operations, a saturated extreme for
  /// overflow.
  pub value: T,
  /// The condition met, if any.
  pub error: Option<PositError>,
}

impl<T> Outcome<T> {
  #[inline]
  pub(crate) fn ok(value: T) -> Self {
    Outcome { value, error: None }
  }

  #[inline]
  pub(crate) fn failed(value: T, error: PositError) -> Self {
    Outcome { value, error: Some(error) }
  }

  /// `Ok(value)` if no condition was met, otherwise the condition.
  #[inline]
  pub fn into_result(self) -> Result<T, PositError> {
    match self.error {
      None => Ok(self.value),
      Some(e) => Err(e),
    }
  }
}

/// Whether invalid operations and overflow are reported as errors or quietly turned into NaR or
/// a saturated value.
///
/// Underflow is never reported: a nonzero result below [`Posit::MIN_POSITIVE`] in magnitude is
/// rounded to it. Quire overflow is always reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorPolicy {
  /// Produce NaR or the saturated value, and carry on.
  #[default]
  Quiet,
  /// Return an error at the operation where the condition was met.
  Signal,
}

/// An evaluation context: an [`ErrorPolicy`] and an [`Observer`] that are applied to every
/// operation performed through it.
///
/// ```
/// # use tapered_posit::{p16, Context, ErrorPolicy, PositError, Invalid};
/// let mut quiet = Context::new(ErrorPolicy::Quiet);
/// assert_eq!(quiet.div(p16::ONE, p16::ZERO), Ok(p16::NAR));
///
/// let mut strict = Context::new(ErrorPolicy::Signal);
/// assert_eq!(strict.div(p16::ONE, p16::ZERO), Err(PositError::InvalidOperation(Invalid::DivideByZero)));
/// assert_eq!(strict.mul(p16::MAX, p16::MAX), Err(PositError::Overflow));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Context<O = Silent> {
  pub policy: ErrorPolicy,
  pub observer: O,
}

impl Context<Silent> {
  /// A context with the given policy, which observes nothing.
  pub const fn new(policy: ErrorPolicy) -> Self {
    Context { policy, observer: Silent }
  }
}

impl<O: Observer> Context<O> {
  /// A context with the given policy and observer.
  pub const fn with_observer(policy: ErrorPolicy, observer: O) -> Self {
    Context { policy, observer }
  }

  /// Apply the policy of `self` to `outcome`.
  #[inline]
  pub fn settle<T>(&self, outcome: Outcome<T>) -> Result<T, PositError> {
    match (self.policy, outcome.error) {
      (_, Some(PositError::QuireOverflow)) | (ErrorPolicy::Signal, Some(_)) => outcome.into_result(),
      (ErrorPolicy::Quiet, _) | (_, None) => Ok(outcome.value),
    }
  }

  pub fn add<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = a.add_with(b, &mut self.observer);
    self.settle(outcome)
  }

  pub fn sub<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = a.sub_with(b, &mut self.observer);
    self.settle(outcome)
  }

  pub fn mul<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = a.mul_with(b, &mut self.observer);
    self.settle(outcome)
  }

  pub fn div<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = a.div_with(b, &mut self.observer);
    self.settle(outcome)
  }

  pub fn recip<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = a.recip_with(&mut self.observer);
    self.settle(outcome)
  }

  pub fn sqrt<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = a.sqrt_with(&mut self.observer);
    self.settle(outcome)
  }

  pub fn mul_add<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
    c: Posit<N, ES, Int>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = a.mul_add_with(b, c, &mut self.observer);
    self.settle(outcome)
  }

  /// Add `a × b` to `quire`. Under [`ErrorPolicy::Signal`], a NaR operand is an error (the quire
  /// still becomes NaR).
  pub fn accumulate<const N: u32, const ES: u32, const LIMBS: usize, Int: crate::Int>(
    &mut self,
    quire: &mut Quire<N, ES, LIMBS>,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<(), PositError> {
    let outcome = quire.accumulate_outcome(a, b, false);
    self.settle(outcome)
  }

  /// Subtract `a × b` from `quire`. See [`Self::accumulate`].
  pub fn accumulate_negated<const N: u32, const ES: u32, const LIMBS: usize, Int: crate::Int>(
    &mut self,
    quire: &mut Quire<N, ES, LIMBS>,
    a: Posit<N, ES, Int>,
    b: Posit<N, ES, Int>,
  ) -> Result<(), PositError> {
    let outcome = quire.accumulate_outcome(a, b, true);
    self.settle(outcome)
  }

  /// Add `p` to `quire`. See [`Self::accumulate`].
  pub fn add_posit<const N: u32, const ES: u32, const LIMBS: usize, Int: crate::Int>(
    &mut self,
    quire: &mut Quire<N, ES, LIMBS>,
    p: Posit<N, ES, Int>,
  ) -> Result<(), PositError> {
    let outcome = quire.add_posit_outcome(p, false);
    self.settle(outcome)
  }

  pub fn sub_posit<const N: u32, const ES: u32, const LIMBS: usize, Int: crate::Int>(
    &mut self,
    quire: &mut Quire<N, ES, LIMBS>,
    p: Posit<N, ES, Int>,
  ) -> Result<(), PositError> {
    let outcome = quire.add_posit_outcome(p, true);
    self.settle(outcome)
  }

  /// Add the contents of `other` to `quire`. Under [`ErrorPolicy::Signal`], a NaR `other` is an
  /// error.
  pub fn add_quire<const N: u32, const ES: u32, const LIMBS: usize>(
    &mut self,
    quire: &mut Quire<N, ES, LIMBS>,
    other: &Quire<N, ES, LIMBS>,
  ) -> Result<(), PositError> {
    let outcome = quire.add_quire_outcome(other, false);
    self.settle(outcome)
  }

  /// Convert `value` to a posit. Under [`ErrorPolicy::Signal`], infinities and NaN are an
  /// invalid operation, and values beyond [`Posit::MAX`] an overflow.
  ///
  /// ```
  /// # use tapered_posit::{p8, Context, ErrorPolicy, PositError};
  /// let mut strict = Context::new(ErrorPolicy::Signal);
  /// assert_eq!(strict.convert_f64(1e9), Err::<p8, _>(PositError::Overflow));
  /// assert_eq!(Context::new(ErrorPolicy::Quiet).convert_f64(1e9), Ok(p8::MAX));
  /// ```
  pub fn convert_f64<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    value: f64,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = Posit::from_f64_with(value, &mut self.observer);
    self.settle(outcome)
  }

  pub fn convert_f32<const N: u32, const ES: u32, Int: crate::Int>(
    &mut self,
    value: f32,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = Posit::from_f32_with(value, &mut self.observer);
    self.settle(outcome)
  }

  /// Round the value of `quire` to a posit.
  pub fn quire_value<const N: u32, const ES: u32, const LIMBS: usize, Int: crate::Int>(
    &mut self,
    quire: &Quire<N, ES, LIMBS>,
  ) -> Result<Posit<N, ES, Int>, PositError> {
    let outcome = quire.to_value_with(&mut self.observer);
    self.settle(outcome)
  }
}

/// A posit whose operators panic on any error condition (invalid operation or overflow) instead
/// of producing NaR or a saturated value.
///
/// ```should_panic
/// # use tapered_posit::{p32, Strict};
/// let _ = Strict(p32::ONE) / Strict(p32::ZERO);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strict<P>(pub P);

macro_rules! strict_op {
  ($trait:ident, $name:ident, $checked:ident, $what:literal) => {
    impl<const N: u32, const ES: u32, Int: crate::Int>
    core::ops::$trait for Strict<Posit<N, ES, Int>> {
      type Output = Self;

      #[inline]
      #[track_caller]
      fn $name(self, rhs: Self) -> Self {
        match self.0.$checked(rhs.0) {
          Ok(value) => Strict(value),
          Err(e) => panic!("posit {}: {e}", $what),
        }
      }
    }
  }
}

strict_op!{Add, add, checked_add, "addition"}
strict_op!{Sub, sub, checked_sub, "subtraction"}
strict_op!{Mul, mul, checked_mul, "multiplication"}
strict_op!{Div, div, checked_div, "division"}

impl<const N: u32, const ES: u32, Int: crate::Int>
core::ops::Neg for Strict<Posit<N, ES, Int>> {
  type Output = Self;

  #[inline]
  #[track_caller]
  fn neg(self) -> Self {
    if self.0.is_nar() {
      panic!("posit negation: {}", PositError::InvalidOperation(crate::Invalid::NarOperand))
    }
    Strict(-self.0)
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int> Strict<Posit<N, ES, Int>> {
  #[track_caller]
  pub fn sqrt(self) -> Self {
    match self.0.checked_sqrt() {
      Ok(value) => Strict(value),
      Err(e) => panic!("posit square root: {e}"),
    }
  }
}
