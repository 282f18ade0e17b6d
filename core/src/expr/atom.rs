use brickc_values::{EvalAddr, ValueKind, VarId};

use crate::{Box, compiler::InstructionSink, loc::SourceLoc, mapping::Mapping};

use super::Expr;

/// A leaf: a constant, a variable, or a read of a machine source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomExpr {
    loc: SourceLoc,
    addr: EvalAddr,
    read_only: bool,
}

impl AtomExpr {
    pub fn constant(loc: SourceLoc, value: i16) -> Self {
        Self::new(loc, EvalAddr::constant(value), true)
    }

    pub fn var(loc: SourceLoc, var: VarId) -> Self {
        Self::new(loc, EvalAddr::variable(var), false)
    }

    /// A variable that may be read but never assigned.
    pub fn const_var(loc: SourceLoc, var: VarId) -> Self {
        Self::new(loc, EvalAddr::variable(var), true)
    }

    /// A timer, sensor or other machine value.
    pub fn source(loc: SourceLoc, kind: ValueKind, data: i16) -> Self {
        Self::new(loc, EvalAddr::new(kind, data), true)
    }

    fn new(loc: SourceLoc, addr: EvalAddr, read_only: bool) -> Self {
        Self {
            loc,
            addr,
            read_only,
        }
    }

    pub fn addr(&self) -> EvalAddr {
        self.addr
    }
}

impl Expr for AtomExpr {
    fn loc(&self) -> SourceLoc {
        self.loc
    }

    fn set_loc(&mut self, loc: SourceLoc) {
        self.loc = loc;
    }

    fn clone_mapped(&self, mapping: Option<&Mapping>) -> Box<dyn Expr> {
        let replacement = self
            .addr
            .as_var()
            .and_then(|var| mapping.and_then(|m| m.get(var)));

        match replacement {
            Some(expr) => {
                // Substitutes belong to the caller and are not mapped again.
                let mut copy = expr.clone_mapped(None);
                if !copy.loc().is_known() {
                    copy.set_loc(self.loc);
                }
                copy
            }
            None => Box::new(*self),
        }
    }

    fn evaluate(&self) -> Option<i16> {
        self.addr.as_constant()
    }

    fn potential_lvalue(&self) -> bool {
        !self.read_only && self.addr.kind == ValueKind::Variable
    }

    fn lvalue(&self) -> Option<VarId> {
        if self.read_only {
            return None;
        }
        self.addr.as_var()
    }

    fn promise_constant(&self) -> bool {
        !self.addr.kind.is_volatile()
    }

    fn contains(&self, var: VarId) -> bool {
        self.addr.as_var() == Some(var)
    }

    fn emit_any_impl(&self, _b: &mut dyn InstructionSink) -> Option<EvalAddr> {
        Some(self.addr)
    }

    fn emit_to_impl(&self, b: &mut dyn InstructionSink, dst: VarId) -> bool {
        b.add_move(dst, self.addr);
        false
    }

    fn emit_side_impl(&self, _b: &mut dyn InstructionSink) -> bool {
        true
    }

    fn static_ea_impl(&self) -> Option<EvalAddr> {
        Some(self.addr)
    }
}
