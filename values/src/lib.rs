//! Value domain for the brick bytecode VM.
//!
//! Every operand the compiler hands to the VM is an [`EvalAddr`]: a
//! [`ValueKind`] tag plus 16 bits of payload. Most kinds name something an
//! instruction can read directly (a variable slot, an immediate constant, a
//! timer). A few are pseudo-values that only the `Set` instruction may read;
//! [`KindMask::ARITHMETIC`] is the set of kinds that are safe everywhere.
//!
//! # Example
//!
//! ```
//! use brickc_values::{EvalAddr, KindMask, ValueKind, VarId};
//!
//! let x = EvalAddr::variable(VarId(3));
//! assert!(KindMask::ARITHMETIC.allows(x.kind));
//!
//! let r = EvalAddr::pseudo(ValueKind::Random, 100);
//! assert!(!KindMask::ARITHMETIC.allows(r.kind));
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

mod addr;
mod kind;

pub use addr::{EvalAddr, VarId};
pub use kind::{KindMask, ValueKind};
