//! Inline expansion of routines.
//!
//! An inline routine is compiled by cloning its body at every call site with
//! the formals replaced by the actual arguments.

use brickc_values::VarId;
use tracing::debug;

use crate::{
    Box, Rc, Vec,
    compiler::CompileError,
    expr::Expr,
    loc::SourceLoc,
    mapping::Mapping,
    stmt::{Stmt, StmtExt},
};

/// Clone `body` with `mapping` applied everywhere.
///
/// The result is a new root with no parent that shares nothing with `body`.
pub fn expand(body: &dyn Stmt, mapping: &Mapping) -> Rc<dyn Stmt> {
    body.clone_mapped(Some(mapping))
}

/// A routine whose calls are replaced by a copy of its body.
#[derive(Debug)]
pub struct Routine {
    formals: Vec<VarId>,
    body: Rc<dyn Stmt>,
}

impl Routine {
    pub fn new(formals: Vec<VarId>, body: Rc<dyn Stmt>) -> Self {
        Self { formals, body }
    }

    pub fn formals(&self) -> &[VarId] {
        &self.formals
    }

    pub fn body(&self) -> &dyn Stmt {
        &*self.body
    }

    /// Expand a call at `loc`.
    ///
    /// Each formal is bound to the matching actual argument. Variables the
    /// body uses for its own storage can be moved elsewhere with
    /// `renamed_locals`, given as `(old, new)` pairs.
    pub fn expand(
        &self,
        loc: SourceLoc,
        actuals: Vec<Box<dyn Expr>>,
        renamed_locals: &[(VarId, VarId)],
    ) -> Result<Rc<dyn Stmt>, CompileError> {
        if actuals.len() != self.formals.len() {
            return Err(CompileError::ArityMismatch {
                loc,
                expected: self.formals.len(),
                found: actuals.len(),
            });
        }

        let mut mapping = Mapping::new();
        for (&formal, actual) in self.formals.iter().zip(actuals) {
            mapping.add(formal, actual);
        }
        for &(old, new) in renamed_locals {
            mapping.add_var(old, new);
        }

        debug!(%loc, substitutions = mapping.len(), "expanding inline routine");
        let copy = expand(&*self.body, &mapping);
        copy.set_location(loc);
        Ok(copy)
    }
}
