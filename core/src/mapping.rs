//! Variable substitution tables for inline expansion.

use brickc_values::VarId;
use hashbrown::HashMap;

use crate::{Box, expr::AtomExpr, expr::Expr, loc::SourceLoc};

/// Maps a routine's formal variables to the expressions that replace them at
/// one call site.
///
/// Variables with no entry are left as they are.
#[derive(Debug, Default)]
pub struct Mapping {
    table: HashMap<VarId, Box<dyn Expr>>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute `expr` for every reference to `formal`.
    ///
    /// A later entry for the same variable replaces the earlier one.
    pub fn add(&mut self, formal: VarId, expr: Box<dyn Expr>) {
        self.table.insert(formal, expr);
    }

    /// Rename `formal` to `actual`.
    pub fn add_var(&mut self, formal: VarId, actual: VarId) {
        self.add(formal, Box::new(AtomExpr::var(SourceLoc::UNKNOWN, actual)));
    }

    pub fn get(&self, var: VarId) -> Option<&dyn Expr> {
        self.table.get(&var).map(|expr| &**expr)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
