use brickc_values::{EvalAddr, VarId};

use crate::compiler::CompileError;
use crate::loc::SourceLoc;
use crate::vm::{Instruction, Label, Relation};

/// Append-only destination for emitted code.
///
/// Labels are allocated with [`new_label`](Self::new_label), referenced by
/// branch instructions, and placed exactly once with
/// [`set_label`](Self::set_label). Temporaries obtained from
/// [`get_temp_var`](Self::get_temp_var) stay reserved until released.
pub trait InstructionSink {
    fn add(&mut self, instruction: Instruction);

    fn new_label(&mut self) -> Label;

    /// Bind `label` to the position of the next instruction added.
    fn set_label(&mut self, label: Label);

    /// Reserve a scratch variable.
    ///
    /// With `can_use_locals = false` the slot is guaranteed not to be
    /// task-local storage. Returns `None` when no slot is free.
    fn get_temp_var(&mut self, can_use_locals: bool) -> Option<VarId>;

    /// Return a temporary to the pool. Addresses that are not live
    /// temporaries are ignored, so callers may release any result they got.
    fn release_temp(&mut self, ea: EvalAddr);

    fn is_temp(&self, var: VarId) -> bool;

    fn report(&mut self, error: CompileError);

    /// Note that the following instructions come from the statement at `loc`.
    fn set_source_loc(&mut self, _loc: SourceLoc) {}

    /// `dst = src`, skipped when it would be a self-move.
    fn add_move(&mut self, dst: VarId, src: EvalAddr) {
        if src != EvalAddr::variable(dst) {
            self.add(Instruction::Set { dst, src });
        }
    }

    fn add_jump(&mut self, target: Label) {
        self.add(Instruction::Jump(target));
    }

    fn add_test(&mut self, lhs: EvalAddr, rel: Relation, rhs: EvalAddr, target: Label) {
        self.add(Instruction::Test {
            lhs,
            rel,
            rhs,
            target,
        });
    }
}
