use brickc_values::{EvalAddr, VarId};

use crate::{
    Box, Vec,
    compiler::InstructionSink,
    loc::SourceLoc,
    mapping::Mapping,
    vm::{Instruction, MathOp},
    vec,
};

use super::{Expr, ExprEmit};

/// `lhs op rhs`, compiled as a move followed by in-place arithmetic.
#[derive(Debug)]
pub struct BinaryExpr {
    loc: SourceLoc,
    op: MathOp,
    lhs: Box<dyn Expr>,
    rhs: Box<dyn Expr>,
}

impl BinaryExpr {
    pub fn new(loc: SourceLoc, op: MathOp, lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Self {
        Self { loc, op, lhs, rhs }
    }

    pub fn op(&self) -> MathOp {
        self.op
    }
}

impl Expr for BinaryExpr {
    fn loc(&self) -> SourceLoc {
        self.loc
    }

    fn set_loc(&mut self, loc: SourceLoc) {
        self.loc = loc;
    }

    fn clone_mapped(&self, mapping: Option<&Mapping>) -> Box<dyn Expr> {
        Box::new(BinaryExpr {
            loc: self.loc,
            op: self.op,
            lhs: self.lhs.clone_mapped(mapping),
            rhs: self.rhs.clone_mapped(mapping),
        })
    }

    fn evaluate(&self) -> Option<i16> {
        self.op.apply(self.lhs.evaluate()?, self.rhs.evaluate()?)
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
        let temp = self.get_temp_var(b, true)?;
        self.emit_to(b, temp);
        Some(EvalAddr::variable(temp))
    }

    fn emit_to_impl(&self, b: &mut dyn InstructionSink, dst: VarId) -> bool {
        // dst is overwritten by the first operand before the second is read
        let (first, second) = if !self.rhs.contains(dst) {
            (&self.lhs, &self.rhs)
        } else if self.op.is_commutative() && !self.lhs.contains(dst) {
            (&self.rhs, &self.lhs)
        } else {
            let Some(temp) = self.get_temp_var(b, true) else {
                return false;
            };
            self.emit_to(b, temp);
            b.add_move(dst, EvalAddr::variable(temp));
            b.release_temp(EvalAddr::variable(temp));
            return true;
        };

        first.emit_to(b, dst);
        if let Some(src) = second.emit_math(b) {
            b.add(Instruction::Math {
                op: self.op,
                dst,
                src,
            });
            second.release_result(b, src);
        }
        true
    }
}
