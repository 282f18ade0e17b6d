//! brickc - code generation core for a small brick-controller language
//!
//! # Overview
//!
//! Front ends build a tree of statements and expressions; this crate turns it
//! into bytecode for a register-style VM whose operands are tagged
//! [`EvalAddr`]esses. Every node kind plugs into a fixed emission protocol
//! with sensible defaults, so a new kind only overrides the hooks it can
//! improve on.
//!
//! # Quick Start
//!
//! ```
//! use brickc::{Bytecode, CompileOptions, ExecutionOptions, SourceLoc, Vm};
//! use brickc::expr::{AtomExpr, RelExpr};
//! use brickc::stmt::{AssignStmt, WhileStmt};
//! use brickc::values::VarId;
//! use brickc::vm::{MathOp, Relation};
//!
//! let i = VarId(0);
//! let at = SourceLoc::at;
//!
//! // while i < 10 { i += 1 }
//! let program = WhileStmt::new(
//!     at(1, 1),
//!     Box::new(RelExpr::new(
//!         at(1, 7),
//!         Relation::Lt,
//!         Box::new(AtomExpr::var(at(1, 7), i)),
//!         Box::new(AtomExpr::constant(at(1, 11), 10)),
//!     )),
//!     Some(AssignStmt::new(
//!         at(2, 5),
//!         Box::new(AtomExpr::var(at(2, 5), i)),
//!         Some(MathOp::Add),
//!         Box::new(AtomExpr::constant(at(2, 10), 1)),
//!     )),
//! );
//!
//! let code = Bytecode::compile(&*program, CompileOptions::default()).unwrap();
//! let mut vm = Vm::new(&code, ExecutionOptions::default());
//! vm.run().unwrap();
//! assert_eq!(vm.var(i), 10);
//! ```
//!
//! # Writing passes
//!
//! Analyses walk trees with [`visitor::apply`]; see [`analysis`] for the
//! ones that ship with the crate.

pub use brickc_core::{analysis, expr, inline, loc, mapping, prelude, stmt, values, visitor, vm};

pub use brickc_core::api::{CompileOptions, ExecutionOptions};
pub use brickc_core::compiler::{Bytecode, CompileError, InstructionSink};
pub use brickc_core::loc::SourceLoc;
pub use brickc_core::mapping::Mapping;
pub use brickc_core::vm::{Code, ExecutionError, Vm};
pub use brickc_values::{EvalAddr, KindMask, ValueKind, VarId};
