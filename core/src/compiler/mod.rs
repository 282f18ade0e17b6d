//! Instruction sink and the reference bytecode builder.
//!
//! Nodes never talk to a concrete code buffer. Every emission hook receives a
//! `&mut dyn InstructionSink`, which can append instructions, hand out and
//! bind labels, lend temporaries, and collect diagnostics. [`Bytecode`] is the
//! sink used by the driver and the tests.
//!
//! ## Design
//!
//! - Emission never fails outright; problems are reported to the sink and
//!   surface from [`Bytecode::finalize`]
//! - Labels are symbolic until finalization, so forward branches need no
//!   patching
//! - Temporaries are plain variable slots drawn from configured pools

mod bytecode;
mod error;
mod sink;


pub use bytecode::Bytecode;
pub use error::CompileError;
pub use sink::InstructionSink;
