use core::fmt;

use brickc_values::{EvalAddr, VarId};

use crate::{
    Box, Vec,
    compiler::InstructionSink,
    loc::SourceLoc,
    mapping::Mapping,
    vec,
    vm::Label,
};

use super::{Expr, ExprEmit, emit_bool_any, emit_bool_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        })
    }
}

/// Short-circuit `&&` / `||`. Compiled to control flow, never to arithmetic.
#[derive(Debug)]
pub struct LogicalExpr {
    loc: SourceLoc,
    op: LogicalOp,
    lhs: Box<dyn Expr>,
    rhs: Box<dyn Expr>,
}

impl LogicalExpr {
    pub fn new(loc: SourceLoc, op: LogicalOp, lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Self {
        Self { loc, op, lhs, rhs }
    }
}

impl Expr for LogicalExpr {
    fn loc(&self) -> SourceLoc {
        self.loc
    }

    fn set_loc(&mut self, loc: SourceLoc) {
        self.loc = loc;
    }

    fn clone_mapped(&self, mapping: Option<&Mapping>) -> Box<dyn Expr> {
        Box::new(LogicalExpr {
            loc: self.loc,
            op: self.op,
            lhs: self.lhs.clone_mapped(mapping),
            rhs: self.rhs.clone_mapped(mapping),
        })
    }

    fn evaluate(&self) -> Option<i16> {
        let lhs = self.lhs.evaluate()? != 0;
        let decided = match self.op {
            LogicalOp::And => !lhs,
            LogicalOp::Or => lhs,
        };
        if decided {
            return Some(i16::from(lhs));
        }
        Some(i16::from(self.rhs.evaluate()? != 0))
    }

    fn promise_constant(&self) -> bool {
        self.lhs.promise_constant() && self.rhs.promise_constant()
    }

    fn contains(&self, var: VarId) -> bool {
        self.lhs.contains(var) || self.rhs.contains(var)
    }

    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        vec![&*self.lhs, &*self.rhs]
    }

    fn emit_any_impl(&self, b: &mut dyn InstructionSink) -> Option<EvalAddr> {
        emit_bool_any(self, b)
    }

    fn emit_to_impl(&self, b: &mut dyn InstructionSink, dst: VarId) -> bool {
        emit_bool_to(self, b, dst)
    }

    fn emit_side_impl(&self, b: &mut dyn InstructionSink) -> bool {
        // rhs runs only when lhs does not decide the result
        let skip = b.new_label();
        self.lhs.emit_branch(b, skip, self.op == LogicalOp::Or);
        self.rhs.emit_side(b);
        b.set_label(skip);
        true
    }

    fn emit_branch_impl(&self, b: &mut dyn InstructionSink, label: Label, condition: bool) -> bool {
        if (self.op == LogicalOp::And) == condition {
            // Both operands must agree with `condition`; bail out on the first
            // that does not.
            let skip = b.new_label();
            self.lhs.emit_branch(b, skip, !condition);
            self.rhs.emit_branch(b, label, condition);
            b.set_label(skip);
        } else {
            self.lhs.emit_branch(b, label, condition);
            self.rhs.emit_branch(b, label, condition);
        }
        true
    }
}

/// Logical negation: 1 when the operand is zero, 0 otherwise.
#[derive(Debug)]
pub struct NotExpr {
    loc: SourceLoc,
    operand: Box<dyn Expr>,
}

impl NotExpr {
    pub fn new(loc: SourceLoc, operand: Box<dyn Expr>) -> Self {
        Self { loc, operand }
    }
}

impl Expr for NotExpr {
    fn loc(&self) -> SourceLoc {
        self.loc
    }

    fn set_loc(&mut self, loc: SourceLoc) {
        self.loc = loc;
    }

    fn clone_mapped(&self, mapping: Option<&Mapping>) -> Box<dyn Expr> {
        Box::new(NotExpr {
            loc: self.loc,
            operand: self.operand.clone_mapped(mapping),
        })
    }

    fn evaluate(&self) -> Option<i16> {
        Some(i16::from(self.operand.evaluate()? == 0))
    }

    fn promise_constant(&self) -> bool {
        self.operand.promise_constant()
    }

    fn contains(&self, var: VarId) -> bool {
        self.operand.contains(var)
    }

    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        vec![&*self.operand]
    }

    fn emit_any_impl(&self, b: &mut dyn InstructionSink) -> Option<EvalAddr> {
        emit_bool_any(self, b)
    }

    fn emit_to_impl(&self, b: &mut dyn InstructionSink, dst: VarId) -> bool {
        emit_bool_to(self, b, dst)
    }

    fn emit_side_impl(&self, b: &mut dyn InstructionSink) -> bool {
        self.operand.emit_side(b)
    }

    fn emit_branch_impl(&self, b: &mut dyn InstructionSink, label: Label, condition: bool) -> bool {
        self.operand.emit_branch(b, label, !condition);
        true
    }
}
