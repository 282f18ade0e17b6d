//! Errors raised by the reference VM.

use thiserror::Error;

use brickc_values::{EvalAddr, VarId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("step limit of {limit} instructions exceeded")]
    StepLimit { limit: usize },

    #[error("division by zero at instruction {pc}")]
    DivideByZero { pc: usize },

    #[error("instruction {pc} jumps outside the code")]
    BadJump { pc: usize },

    #[error("variable {var} is outside the variable file")]
    UnknownVariable { var: VarId },

    #[error("instruction {pc} cannot read {addr}")]
    IllegalOperand { pc: usize, addr: EvalAddr },
}
