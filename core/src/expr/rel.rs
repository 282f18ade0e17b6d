use brickc_values::{EvalAddr, VarId};

use crate::{
    Box, Vec,
    compiler::InstructionSink,
    loc::SourceLoc,
    mapping::Mapping,
    vec,
    vm::{Label, Relation},
};

use super::{Expr, ExprEmit, emit_bool_any, emit_bool_to};

/// A comparison. Its value is 1 when the relation holds and 0 otherwise.
#[derive(Debug)]
pub struct RelExpr {
    loc: SourceLoc,
    rel: Relation,
    lhs: Box<dyn Expr>,
    rhs: Box<dyn Expr>,
}

impl RelExpr {
    pub fn new(loc: SourceLoc, rel: Relation, lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Self {
        Self { loc, rel, lhs, rhs }
    }
}

impl Expr for RelExpr {
    fn loc(&self) -> SourceLoc {
        self.loc
    }

    fn set_loc(&mut self, loc: SourceLoc) {
        self.loc = loc;
    }

    fn clone_mapped(&self, mapping: Option<&Mapping>) -> Box<dyn Expr> {
        Box::new(RelExpr {
            loc: self.loc,
            rel: self.rel,
            lhs: self.lhs.clone_mapped(mapping),
            rhs: self.rhs.clone_mapped(mapping),
        })
    }

    fn evaluate(&self) -> Option<i16> {
        let holds = self.rel.holds(self.lhs.evaluate()?, self.rhs.evaluate()?);
        Some(i16::from(holds))
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
        self.lhs.emit_side(b);
        self.rhs.emit_side(b);
        true
    }

    fn emit_branch_impl(&self, b: &mut dyn InstructionSink, label: Label, condition: bool) -> bool {
        let rel = if condition { self.rel } else { self.rel.negate() };

        let Some(lhs) = self.lhs.emit_math(b) else {
            return false;
        };
        // A temporary holding lhs must not be handed out again for rhs
        let Some(rhs) = self.rhs.emit_math(b) else {
            self.lhs.release_result(b, lhs);
            return false;
        };

        b.add_test(lhs, rel, rhs, label);
        self.lhs.release_result(b, lhs);
        self.rhs.release_result(b, rhs);
        true
    }
}
