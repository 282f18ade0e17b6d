//! Brick VM Instructions
//!
//! This module defines the instruction vocabulary the code generator targets.
//!
//! # Design Principles
//!
//! - **Register/accumulator style**: instructions name their operands as
//!   [`EvalAddr`]s and write results into variable slots. There is no operand
//!   stack.
//! - **Symbolic labels**: branch targets are [`Label`]s, bound to instruction
//!   indices by the sink and resolved once when the code is finalized.
//! - **Fused tests**: a comparison and the branch it guards are a single
//!   `Test` instruction, so boolean conditions rarely need materializing.
//!
//! # Operand Restrictions
//!
//! Only `Set` may read a pseudo-value (`Random`, `Program`, `Counter`). Every
//! other instruction expects operands within [`KindMask::ARITHMETIC`].

use core::fmt;

use brickc_values::{EvalAddr, KindMask, VarId};

/// A symbolic branch target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl Label {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Arithmetic applied in place: `dst = dst op src`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
}

impl MathOp {
    /// Apply with the VM's 16-bit wrapping semantics.
    ///
    /// Returns `None` for division by zero.
    pub fn apply(self, a: i16, b: i16) -> Option<i16> {
        Some(match self {
            MathOp::Add => a.wrapping_add(b),
            MathOp::Sub => a.wrapping_sub(b),
            MathOp::Mul => a.wrapping_mul(b),
            MathOp::Div => a.checked_div(b).or_else(|| (b == -1).then(|| a.wrapping_neg()))?,
            MathOp::And => a & b,
            MathOp::Or => a | b,
        })
    }

    /// True if `a op b == b op a` for every operand.
    pub fn is_commutative(self) -> bool {
        matches!(self, MathOp::Add | MathOp::Mul | MathOp::And | MathOp::Or)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MathOp::Add => "+",
            MathOp::Sub => "-",
            MathOp::Mul => "*",
            MathOp::Div => "/",
            MathOp::And => "&",
            MathOp::Or => "|",
        }
    }
}

/// Relation checked by `Test`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Relation {
    /// The relation that holds exactly when `self` does not.
    pub fn negate(self) -> Self {
        match self {
            Relation::Eq => Relation::Ne,
            Relation::Ne => Relation::Eq,
            Relation::Lt => Relation::Ge,
            Relation::Gt => Relation::Le,
            Relation::Le => Relation::Gt,
            Relation::Ge => Relation::Lt,
        }
    }

    pub fn holds(self, a: i16, b: i16) -> bool {
        match self {
            Relation::Eq => a == b,
            Relation::Ne => a != b,
            Relation::Lt => a < b,
            Relation::Gt => a > b,
            Relation::Le => a <= b,
            Relation::Ge => a >= b,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Eq => "==",
            Relation::Ne => "!=",
            Relation::Lt => "<",
            Relation::Gt => ">",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        }
    }
}

/// A single VM instruction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Copy a value into a variable: `dst = src`
    ///
    /// The only instruction that accepts pseudo-value sources.
    Set { dst: VarId, src: EvalAddr },

    /// In-place arithmetic: `dst = dst op src`
    Math { op: MathOp, dst: VarId, src: EvalAddr },

    /// Jump to `target` when `lhs rel rhs` holds, fall through otherwise.
    Test {
        lhs: EvalAddr,
        rel: Relation,
        rhs: EvalAddr,
        target: Label,
    },

    /// Unconditional jump.
    Jump(Label),

    /// Stop the current task.
    Halt,
}

impl Instruction {
    /// The label this instruction may transfer control to.
    pub fn target(&self) -> Option<Label> {
        match self {
            Instruction::Test { target, .. } | Instruction::Jump(target) => Some(*target),
            _ => None,
        }
    }

    /// True if control never reaches the next instruction.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Instruction::Jump(_) | Instruction::Halt)
    }

    /// True if every operand is a kind this instruction may read.
    pub fn operands_legal(&self) -> bool {
        match self {
            Instruction::Set { .. } | Instruction::Jump(_) | Instruction::Halt => true,
            Instruction::Math { src, .. } => KindMask::ARITHMETIC.allows(src.kind),
            Instruction::Test { lhs, rhs, .. } => {
                KindMask::ARITHMETIC.allows(lhs.kind) && KindMask::ARITHMETIC.allows(rhs.kind)
            }
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { dst, src } => write!(f, "{:6} {}, {}", "set", dst, src),
            Self::Math { op, dst, src } => write!(f, "{:6} {} {}= {}", "math", dst, op.symbol(), src),
            Self::Test {
                lhs,
                rel,
                rhs,
                target,
            } => write!(f, "{:6} {} {} {} -> {}", "test", lhs, rel.symbol(), rhs, target),
            Self::Jump(target) => write!(f, "{:6} {}", "jmp", target),
            Self::Halt => write!(f, "halt"),
        }
    }
}
