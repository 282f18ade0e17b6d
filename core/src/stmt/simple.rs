use brickc_values::VarId;

use crate::{
    Box, Rc, Vec,
    compiler::{CompileError, InstructionSink},
    expr::{Expr, ExprEmit},
    loc::SourceLoc,
    mapping::Mapping,
    vec,
    vm::{Instruction, MathOp},
};

use super::{Stmt, StmtBase, StmtExt, adopt_child, adopting};

/// `lhs = rhs`, or `lhs op= rhs` when `op` is set.
#[derive(Debug)]
pub struct AssignStmt {
    base: StmtBase,
    lhs: Box<dyn Expr>,
    op: Option<MathOp>,
    rhs: Box<dyn Expr>,
}

impl AssignStmt {
    pub fn new(
        loc: SourceLoc,
        lhs: Box<dyn Expr>,
        op: Option<MathOp>,
        rhs: Box<dyn Expr>,
    ) -> Rc<Self> {
        Rc::new(Self {
            base: StmtBase::new(loc),
            lhs,
            op,
            rhs,
        })
    }

    fn target(&self) -> Option<VarId> {
        if !self.lhs.potential_lvalue() {
            return None;
        }
        self.lhs.lvalue()
    }
}

impl Stmt for AssignStmt {
    fn base(&self) -> &StmtBase {
        &self.base
    }

    fn children(&self) -> Vec<&(dyn Stmt + 'static)> {
        Vec::new()
    }

    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        vec![&*self.lhs, &*self.rhs]
    }

    fn emit_actual(&self, b: &mut dyn InstructionSink) {
        let Some(dst) = self.target() else {
            let loc = if self.lhs.loc().is_known() {
                self.lhs.loc()
            } else {
                self.loc()
            };
            b.report(CompileError::NotAnLValue { loc });
            return;
        };

        match self.op {
            None => {
                self.rhs.emit_to(b, dst);
            }
            Some(op) => {
                if let Some(src) = self.rhs.emit_math(b) {
                    b.add(Instruction::Math { op, dst, src });
                    self.rhs.release_result(b, src);
                }
            }
        }
    }

    fn clone_actual(&self, mapping: Option<&Mapping>) -> Rc<dyn Stmt> {
        AssignStmt::new(
            self.loc(),
            self.lhs.clone_mapped(mapping),
            self.op,
            self.rhs.clone_mapped(mapping),
        )
    }
}

/// An expression evaluated for its side effects.
#[derive(Debug)]
pub struct ExprStmt {
    base: StmtBase,
    expr: Box<dyn Expr>,
}

impl ExprStmt {
    pub fn new(loc: SourceLoc, expr: Box<dyn Expr>) -> Rc<Self> {
        Rc::new(Self {
            base: StmtBase::new(loc),
            expr,
        })
    }
}

impl Stmt for ExprStmt {
    fn base(&self) -> &StmtBase {
        &self.base
    }

    fn children(&self) -> Vec<&(dyn Stmt + 'static)> {
        Vec::new()
    }

    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        vec![&*self.expr]
    }

    fn emit_actual(&self, b: &mut dyn InstructionSink) {
        self.expr.emit_side(b);
    }

    fn clone_actual(&self, mapping: Option<&Mapping>) -> Rc<dyn Stmt> {
        ExprStmt::new(self.loc(), self.expr.clone_mapped(mapping))
    }
}

/// A sequence of statements run in order.
#[derive(Debug)]
pub struct BlockStmt {
    base: StmtBase,
    body: Vec<Rc<dyn Stmt>>,
}

impl BlockStmt {
    pub fn new(loc: SourceLoc, body: Vec<Rc<dyn Stmt>>) -> Rc<Self> {
        adopting(|me| Self {
            base: StmtBase::new(loc),
            body: body.into_iter().map(|stmt| adopt_child(me, stmt)).collect(),
        })
    }
}

impl Stmt for BlockStmt {
    fn base(&self) -> &StmtBase {
        &self.base
    }

    fn children(&self) -> Vec<&(dyn Stmt + 'static)> {
        self.body.iter().map(|stmt| &**stmt).collect()
    }

    fn emit_actual(&self, b: &mut dyn InstructionSink) {
        for stmt in &self.body {
            stmt.emit(b);
        }
    }

    fn clone_actual(&self, mapping: Option<&Mapping>) -> Rc<dyn Stmt> {
        let body = self
            .body
            .iter()
            .map(|stmt| stmt.clone_mapped(mapping))
            .collect();
        BlockStmt::new(self.loc(), body)
    }
}
