mod code;
mod error;
mod instruction_set;
mod runtime;

pub use code::{Code, Edge, EdgeKind};
pub use error::ExecutionError;
pub use instruction_set::{Instruction, Label, MathOp, Relation};
pub use runtime::{Machine, Vm};
