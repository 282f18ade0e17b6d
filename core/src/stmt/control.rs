use tracing::trace;

use crate::{
    Box, Rc, Vec,
    compiler::InstructionSink,
    expr::{Expr, ExprEmit},
    loc::SourceLoc,
    mapping::Mapping,
    vec,
};

use super::{Pair, Single, Stmt, StmtBase, StmtExt, adopting};

/// `if cond then [else otherwise]`
#[derive(Debug)]
pub struct IfStmt {
    base: StmtBase,
    cond: Box<dyn Expr>,
    arms: Pair,
}

impl IfStmt {
    pub fn new(
        loc: SourceLoc,
        cond: Box<dyn Expr>,
        then: Rc<dyn Stmt>,
        otherwise: Option<Rc<dyn Stmt>>,
    ) -> Rc<Self> {
        adopting(|me| Self {
            base: StmtBase::new(loc),
            cond,
            arms: Pair::new(me, then, otherwise),
        })
    }
}

impl Stmt for IfStmt {
    fn base(&self) -> &StmtBase {
        &self.base
    }

    fn children(&self) -> Vec<&(dyn Stmt + 'static)> {
        self.arms.children()
    }

    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        vec![&*self.cond]
    }

    fn emit_actual(&self, b: &mut dyn InstructionSink) {
        let end = b.new_label();
        match self.arms.secondary() {
            None => {
                self.cond.emit_branch(b, end, false);
                self.arms.primary().emit(b);
            }
            Some(otherwise) => {
                let else_label = b.new_label();
                self.cond.emit_branch(b, else_label, false);
                self.arms.primary().emit(b);
                b.add_jump(end);
                b.set_label(else_label);
                otherwise.emit(b);
            }
        }
        b.set_label(end);
    }

    fn clone_actual(&self, mapping: Option<&Mapping>) -> Rc<dyn Stmt> {
        IfStmt::new(
            self.loc(),
            self.cond.clone_mapped(mapping),
            self.arms.primary().clone_mapped(mapping),
            self.arms.secondary().map(|stmt| stmt.clone_mapped(mapping)),
        )
    }
}

/// `while cond body`: test at the top, jump back at the bottom.
#[derive(Debug)]
pub struct WhileStmt {
    base: StmtBase,
    cond: Box<dyn Expr>,
    body: Single,
}

impl WhileStmt {
    pub fn new(loc: SourceLoc, cond: Box<dyn Expr>, body: Option<Rc<dyn Stmt>>) -> Rc<Self> {
        adopting(|me| Self {
            base: StmtBase::new(loc),
            cond,
            body: Single::new(me, body),
        })
    }

    pub fn cond(&self) -> &dyn Expr {
        &*self.cond
    }

    pub fn body(&self) -> Option<&Rc<dyn Stmt>> {
        self.body.body()
    }
}

impl Stmt for WhileStmt {
    fn base(&self) -> &StmtBase {
        &self.base
    }

    fn children(&self) -> Vec<&(dyn Stmt + 'static)> {
        self.body.children()
    }

    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        vec![&*self.cond]
    }

    fn emit_actual(&self, b: &mut dyn InstructionSink) {
        let entry = b.new_label();
        let exit = b.new_label();
        trace!(loc = %self.loc(), %entry, %exit, "while loop");

        b.set_label(entry);
        self.cond.emit_branch(b, exit, false);
        if let Some(body) = self.body.body() {
            body.emit(b);
        }
        b.add_jump(entry);
        b.set_label(exit);
    }

    fn clone_actual(&self, mapping: Option<&Mapping>) -> Rc<dyn Stmt> {
        WhileStmt::new(
            self.loc(),
            self.cond.clone_mapped(mapping),
            self.body.body().map(|body| body.clone_mapped(mapping)),
        )
    }
}

/// `do body while cond`: the body runs at least once.
#[derive(Debug)]
pub struct DoStmt {
    base: StmtBase,
    body: Single,
    cond: Box<dyn Expr>,
}

impl DoStmt {
    pub fn new(loc: SourceLoc, body: Option<Rc<dyn Stmt>>, cond: Box<dyn Expr>) -> Rc<Self> {
        adopting(|me| Self {
            base: StmtBase::new(loc),
            body: Single::new(me, body),
            cond,
        })
    }
}

impl Stmt for DoStmt {
    fn base(&self) -> &StmtBase {
        &self.base
    }

    fn children(&self) -> Vec<&(dyn Stmt + 'static)> {
        self.body.children()
    }

    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        vec![&*self.cond]
    }

    fn emit_actual(&self, b: &mut dyn InstructionSink) {
        let top = b.new_label();
        b.set_label(top);
        if let Some(body) = self.body.body() {
            body.emit(b);
        }
        self.cond.emit_branch(b, top, true);
    }

    fn clone_actual(&self, mapping: Option<&Mapping>) -> Rc<dyn Stmt> {
        DoStmt::new(
            self.loc(),
            self.body.body().map(|body| body.clone_mapped(mapping)),
            self.cond.clone_mapped(mapping),
        )
    }
}
