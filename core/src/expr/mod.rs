//! Expression nodes and their code generation protocol.
//!
//! An expression kind implements [`Expr`]. Only three methods are required:
//! its position, how to clone it, and [`Expr::emit_any_impl`], which puts the
//! value wherever is most natural. Everything else has a working default, so
//! a new kind is correct as soon as it compiles and only needs more hooks
//! where it can produce better code.
//!
//! Callers never invoke the `*_impl` hooks directly. They go through
//! [`ExprEmit`], which is implemented once for every expression and wraps each
//! hook with the logic shared by all kinds (constant folding, mask checks,
//! temporary management).
//!
//! ## Emission entry points
//!
//! | entry point         | hook                 | default                              |
//! |---------------------|----------------------|--------------------------------------|
//! | `emit_any`          | `emit_any_impl`      | required                             |
//! | `emit_to`           | `emit_to_impl`       | `emit_any`, then move                |
//! | `emit_constrained`  | –                    | static address or a temporary        |
//! | `emit_side`         | `emit_side_impl`     | `emit_any`, then discard             |
//! | `emit_branch`       | `emit_branch_impl`   | `emit_math`, then test against zero  |
//! | `emit_math`         | –                    | `emit_constrained` with `ARITHMETIC` |
//! | `static_ea`         | `static_ea_impl`     | none                                 |

mod atom;
mod binary;
mod logical;
mod rel;


use core::fmt;

use brickc_values::{EvalAddr, KindMask, ValueKind, VarId};
use tracing::trace;

use crate::{
    Box, Vec,
    compiler::{CompileError, InstructionSink},
    loc::SourceLoc,
    mapping::Mapping,
    vm::{Label, Relation},
};

pub use atom::AtomExpr;
pub use binary::BinaryExpr;
pub use logical::{LogicalExpr, LogicalOp, NotExpr};
pub use rel::RelExpr;

/// A value-producing node.
///
/// Children are owned exclusively through `Box<dyn Expr>`; there is no
/// sharing between trees.
pub trait Expr: fmt::Debug {
    fn loc(&self) -> SourceLoc;

    fn set_loc(&mut self, loc: SourceLoc);

    /// Deep copy, replacing every variable found in `mapping` by a copy of
    /// the expression it maps to.
    ///
    /// Used to expand inline routines (see [`crate::inline`]).
    fn clone_mapped(&self, mapping: Option<&Mapping>) -> Box<dyn Expr>;

    /// The value of the expression if it is known at compile time.
    fn evaluate(&self) -> Option<i16> {
        None
    }

    /// Determine if an expression obeys the syntactic rules for an lvalue:
    /// a non-constant variable, not a calculated value. This does not mean
    /// it is assignable on every target.
    fn potential_lvalue(&self) -> bool {
        false
    }

    /// The variable an assignment to this expression writes.
    ///
    /// Only meaningful when [`potential_lvalue`](Self::potential_lvalue) is
    /// true.
    fn lvalue(&self) -> Option<VarId> {
        None
    }

    /// True when evaluating the expression twice, with no variable changed
    /// in between, gives the same value and has no side effects.
    fn promise_constant(&self) -> bool {
        true
    }

    /// True if `var` is read or written anywhere in this subtree.
    fn contains(&self, _var: VarId) -> bool {
        false
    }

    /// Immediate sub-expressions, in evaluation order.
    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        Vec::new()
    }

    // === Emission hooks ===

    /// Evaluate into whatever location is natural for this kind.
    fn emit_any_impl(&self, b: &mut dyn InstructionSink) -> Option<EvalAddr>;

    /// Evaluate into `dst`. Returns true if a specialized sequence was used.
    fn emit_to_impl(&self, b: &mut dyn InstructionSink, dst: VarId) -> bool {
        if let Some(ea) = self.emit_any(b) {
            b.add_move(dst, ea);
            self.release_result(b, ea);
        }
        false
    }

    /// Evaluate for side effects only.
    fn emit_side_impl(&self, b: &mut dyn InstructionSink) -> bool {
        if let Some(ea) = self.emit_any(b) {
            self.release_result(b, ea);
        }
        false
    }

    /// Jump to `label` when the value's truth equals `condition`.
    ///
    /// The default materializes the value and tests it against zero.
    fn emit_branch_impl(&self, b: &mut dyn InstructionSink, label: Label, condition: bool) -> bool {
        if let Some(ea) = self.emit_math(b) {
            let rel = if condition { Relation::Ne } else { Relation::Eq };
            b.add_test(ea, rel, EvalAddr::constant(0), label);
            self.release_result(b, ea);
        }
        false
    }

    /// Address of the result when it is known without emitting any code.
    fn static_ea_impl(&self) -> Option<EvalAddr> {
        None
    }
}

/// Fixed entry points of the emission protocol.
///
/// Implemented for every [`Expr`]; not meant to be implemented by hand.
pub trait ExprEmit: Expr {
    /// Address of the result if no code is needed to compute it.
    ///
    /// Compile-time constants always have one. Recomputed on each call.
    fn static_ea(&self) -> Option<EvalAddr> {
        match self.evaluate() {
            Some(value) => Some(EvalAddr::constant(value)),
            None => self.static_ea_impl(),
        }
    }

    /// Evaluate into whatever location is natural.
    ///
    /// The result may be a temporary, which the caller gives back with
    /// [`release_result`](Self::release_result).
    fn emit_any(&self, b: &mut dyn InstructionSink) -> Option<EvalAddr> {
        match self.static_ea() {
            Some(ea) => Some(ea),
            None => self.emit_any_impl(b),
        }
    }

    /// Force the result into `dst`.
    ///
    /// Returns whether a specialized sequence was used; the value ends up in
    /// `dst` either way.
    fn emit_to(&self, b: &mut dyn InstructionSink, dst: VarId) -> bool {
        if let Some(value) = self.evaluate() {
            b.add_move(dst, EvalAddr::constant(value));
            return true;
        }
        self.emit_to_impl(b, dst)
    }

    /// Produce a result whose kind is in `mask`.
    ///
    /// When the natural result is not allowed, the value is materialized
    /// into a temporary, which the caller must release. `can_use_locals`
    /// is passed on to the temporary allocator.
    fn emit_constrained(
        &self,
        b: &mut dyn InstructionSink,
        mask: KindMask,
        can_use_locals: bool,
    ) -> Option<EvalAddr> {
        if let Some(ea) = self.static_ea() {
            if mask.allows(ea.kind) {
                return Some(ea);
            }
        }

        if !mask.allows(ValueKind::Variable) {
            // Nowhere to materialize: the natural result is the only hope
            let ea = self.emit_any(b)?;
            if mask.allows(ea.kind) {
                return Some(ea);
            }
            self.release_result(b, ea);
            b.report(CompileError::UnsatisfiableMask {
                loc: self.loc(),
                kind: ea.kind,
                allowed: mask,
            });
            return None;
        }

        let dst = self.get_temp_var(b, can_use_locals)?;
        trace!(loc = %self.loc(), temp = %dst, ?mask, "materializing into temporary");
        self.emit_to(b, dst);
        Some(EvalAddr::variable(dst))
    }

    /// Evaluate purely for side effects.
    fn emit_side(&self, b: &mut dyn InstructionSink) -> bool {
        self.emit_side_impl(b)
    }

    /// Emit a jump to `label` taken when the expression's truth equals
    /// `condition`; control falls through otherwise.
    fn emit_branch(&self, b: &mut dyn InstructionSink, label: Label, condition: bool) -> bool {
        if let Some(value) = self.evaluate() {
            if (value != 0) == condition {
                b.add_jump(label);
            }
            return true;
        }
        self.emit_branch_impl(b, label, condition)
    }

    /// Evaluate into something an arithmetic instruction can read.
    fn emit_math(&self, b: &mut dyn InstructionSink) -> Option<EvalAddr> {
        self.emit_constrained(b, KindMask::ARITHMETIC, true)
    }

    /// Give back a result obtained from this expression.
    ///
    /// Only temporaries allocated while emitting are returned to the pool. A
    /// static address names storage the expression merely reads, which may
    /// be a temporary someone else still holds.
    fn release_result(&self, b: &mut dyn InstructionSink, ea: EvalAddr) {
        if self.static_ea() != Some(ea) {
            b.release_temp(ea);
        }
    }

    /// Reserve a temporary, reporting an error at this expression when none
    /// is left.
    fn get_temp_var(&self, b: &mut dyn InstructionSink, can_use_locals: bool) -> Option<VarId> {
        let var = b.get_temp_var(can_use_locals);
        if var.is_none() {
            b.report(CompileError::NoTempAvailable { loc: self.loc() });
        }
        var
    }
}

impl<T: Expr + ?Sized> ExprEmit for T {}

/// Materialize a boolean expression as 0 or 1 in `dst` through its branch
/// form. For kinds whose natural result is a truth value rather than a
/// number.
pub fn emit_bool_to<E: Expr + ?Sized>(expr: &E, b: &mut dyn InstructionSink, dst: VarId) -> bool {
    if expr.contains(dst) {
        // dst is written before the condition is read
        let Some(temp) = expr.get_temp_var(b, true) else {
            return false;
        };
        emit_bool_to(expr, b, temp);
        b.add_move(dst, EvalAddr::variable(temp));
        b.release_temp(EvalAddr::variable(temp));
        return true;
    }

    let done = b.new_label();
    b.add_move(dst, EvalAddr::constant(1));
    expr.emit_branch(b, done, true);
    b.add_move(dst, EvalAddr::constant(0));
    b.set_label(done);
    true
}

/// [`emit_bool_to`] into a fresh temporary.
pub fn emit_bool_any<E: Expr + ?Sized>(expr: &E, b: &mut dyn InstructionSink) -> Option<EvalAddr> {
    let dst = expr.get_temp_var(b, true)?;
    emit_bool_to(expr, b, dst);
    Some(EvalAddr::variable(dst))
}
