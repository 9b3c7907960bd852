//! Observing the intermediate steps of a computation.
//!
//! Each arithmetic operator has a `*_with` variant (e.g. [`Posit::add_with`]) which takes an
//! [`Observer`] and calls it with an [`Event`] at each step of the pipeline: the decoded operands,
//! the exact or extended-precision result before rounding, and the final encoded pattern. Nothing
//! here is global; an observer only sees the calls it is passed to.
//!
//! [`Posit::add_with`]: crate::Posit::add_with

use crate::Saturation;

/// The operation an [`Event`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
  Add,
  Sub,
  Mul,
  Div,
  Sqrt,
  Recip,
  MulAdd,
  Convert,
  QuireToValue,
}

impl core::fmt::Display for Op {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let name = match self {
      Op::Add => "add",
      Op::Sub => "sub",
      Op::Mul => "mul",
      Op::Div => "div",
      Op::Sqrt => "sqrt",
      Op::Recip => "recip",
      Op::MulAdd => "mul_add",
      Op::Convert => "convert",
      Op::QuireToValue => "quire_to_value",
    };
    f.write_str(name)
  }
}

/// One step of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
  /// Operand number `index` was decoded to `(-1)^sign × significand × 2^(scale - 63)`.
  Operand { op: Op, index: u8, sign: bool, scale: i32, significand: u64 },
  /// One of the operands was 0 or NaR, and the result is known without computing.
  Special { op: Op, nar: bool },
  /// The result before rounding: `(-1)^sign × significand × 2^(scale - 127)`, plus `sticky` if
  /// there were further nonzero bits not represented in `significand`.
  Unrounded { op: Op, sign: bool, scale: i32, significand: u128, sticky: bool },
  /// The result was exactly zero (e.g. `x - x`).
  ExactZero { op: Op },
  /// The result was rounded and encoded into the pattern `bits` (sign-extended).
  Encoded { op: Op, bits: i64, saturation: Saturation },
}

/// Something that is told about each step of an operation.
///
/// Any closure `FnMut(&Event)` is an observer.
pub trait Observer {
  fn observe(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> Observer for F {
  #[inline]
  fn observe(&mut self, event: &Event) {
    self(event)
  }
}

/// The observer that ignores everything. This is what the plain operators use.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Observer for Silent {
  #[inline(always)]
  fn observe(&mut self, _event: &Event) {}
}

/// An observer that forwards every event to the [`log`] crate, at `trace` level, under the target
/// `tapered_posit`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
  fn observe(&mut self, event: &Event) {
    match *event {
      Event::Operand { op, index, sign, scale, significand } => log::trace!(
        target: "tapered_posit",
        "{op}: operand {index} = {}0x{significand:016x} × 2^({scale} - 63)",
        if sign { "-" } else { "+" },
      ),
      Event::Special { op, nar } => log::trace!(
        target: "tapered_posit",
        "{op}: special operand, result is {}",
        if nar { "NaR" } else { "exact" },
      ),
      Event::Unrounded { op, sign, scale, significand, sticky } => log::trace!(
        target: "tapered_posit",
        "{op}: unrounded {}0x{significand:032x} × 2^({scale} - 127), sticky {sticky}",
        if sign { "-" } else { "+" },
      ),
      Event::ExactZero { op } => log::trace!(target: "tapered_posit", "{op}: exact zero"),
      Event::Encoded { op, bits, saturation } => log::trace!(
        target: "tapered_posit",
        "{op}: encoded 0x{bits:x} ({saturation:?})",
      ),
    }
  }
}
