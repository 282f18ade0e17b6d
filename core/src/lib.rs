#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, rc::Rc, rc::Weak, vec, vec::Vec};

pub mod analysis;
pub mod api;
pub mod compiler;
pub mod expr;
pub mod inline;
pub mod loc;
pub mod mapping;
pub mod stmt;
pub mod visitor;
pub mod vm;

pub use brickc_values as values;

/// Everything a node implementation or a pass usually needs in scope.
pub mod prelude {
    pub use crate::compiler::{Bytecode, CompileError, InstructionSink};
    pub use crate::expr::{Expr, ExprEmit};
    pub use crate::loc::SourceLoc;
    pub use crate::mapping::Mapping;
    pub use crate::stmt::{Stmt, StmtExt};
    pub use crate::visitor::{TreeView, Walk, apply};
    pub use brickc_values::{EvalAddr, KindMask, ValueKind, VarId};
}
