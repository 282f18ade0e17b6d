//! Bytecode builder implementation.

use brickc_values::{EvalAddr, VarId};
use tracing::{debug, trace, warn};

use crate::{
    Vec,
    api::CompileOptions,
    compiler::{CompileError, InstructionSink},
    loc::SourceLoc,
    stmt::{Stmt, StmtExt},
    vm::{Code, Instruction, Label},
};

/// Instruction buffer that the code generator writes into.
///
/// Tracks label placement, the temporary pools and the source map, and keeps
/// every diagnostic reported during emission.
pub struct Bytecode {
    options: CompileOptions,

    /// Bytecode instructions
    instructions: Vec<Instruction>,

    /// Instruction index each label was bound to, `None` while unplaced
    labels: Vec<Option<usize>>,

    /// Temporaries currently handed out
    live_temps: hashbrown::HashSet<VarId>,

    /// Start of each statement's code, in emission order
    source_map: Vec<(usize, SourceLoc)>,

    /// Diagnostics in the order they were reported
    errors: Vec<CompileError>,
}

impl Bytecode {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            instructions: Vec::new(),
            labels: Vec::new(),
            live_temps: hashbrown::HashSet::new(),
            source_map: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Convenience method to compile a statement tree in one call.
    pub fn compile(root: &dyn Stmt, options: CompileOptions) -> Result<Code, CompileError> {
        let mut bytecode = Self::new(options);
        root.emit(&mut bytecode);
        bytecode.finalize()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    /// Number of temporaries that have been requested and not yet released.
    pub fn live_temps(&self) -> usize {
        self.live_temps.len()
    }

    /// Finish the unit and resolve every label.
    ///
    /// Fails with the first diagnostic reported during emission, or with
    /// [`CompileError::UnboundLabel`] if a branch targets a label that was
    /// never placed.
    pub fn finalize(mut self) -> Result<Code, CompileError> {
        if !self.errors.is_empty() {
            debug!(count = self.errors.len(), "emission reported errors");
            return Err(self.errors.swap_remove(0));
        }

        for instruction in &self.instructions {
            if let Some(label) = instruction.target() {
                if self.labels[label.index()].is_none() {
                    return Err(CompileError::UnboundLabel { label });
                }
            }
        }

        // Labels that were allocated but neither placed nor used resolve to
        // the end of the unit
        let end = self.instructions.len();
        let labels = self
            .labels
            .into_iter()
            .map(|target| target.unwrap_or(end))
            .collect();

        debug!(
            instructions = self.instructions.len(),
            temps_leaked = self.live_temps.len(),
            "finalized bytecode"
        );

        Ok(Code {
            instructions: self.instructions,
            labels,
            source_map: self.source_map,
        })
    }

    fn first_free(&self, pool: core::ops::Range<u16>) -> Option<VarId> {
        pool.map(VarId).find(|var| !self.live_temps.contains(var))
    }

    fn in_pool(&self, var: VarId) -> bool {
        self.options.global_temps.contains(&var.0) || self.options.local_temps.contains(&var.0)
    }
}

impl Default for Bytecode {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

impl InstructionSink for Bytecode {
    fn add(&mut self, instruction: Instruction) {
        debug_assert!(
            instruction.operands_legal(),
            "illegal operand in {:?}",
            instruction
        );
        self.instructions.push(instruction);
    }

    fn new_label(&mut self) -> Label {
        let label = Label(self.labels.len() as u32);
        self.labels.push(None);
        label
    }

    fn set_label(&mut self, label: Label) {
        let slot = &mut self.labels[label.index()];
        if slot.is_some() {
            self.report(CompileError::LabelRebound { label });
            return;
        }
        *slot = Some(self.instructions.len());
    }

    fn get_temp_var(&mut self, can_use_locals: bool) -> Option<VarId> {
        let local = if can_use_locals {
            self.first_free(self.options.local_temps.clone())
        } else {
            None
        };
        let var = local.or_else(|| self.first_free(self.options.global_temps.clone()))?;
        self.live_temps.insert(var);
        trace!(%var, can_use_locals, "temporary reserved");
        Some(var)
    }

    fn release_temp(&mut self, ea: EvalAddr) {
        if let Some(var) = ea.as_var() {
            if self.live_temps.remove(&var) {
                trace!(%var, "temporary released");
            }
        }
    }

    fn is_temp(&self, var: VarId) -> bool {
        self.in_pool(var)
    }

    fn report(&mut self, error: CompileError) {
        warn!(%error, "code generation diagnostic");
        self.errors.push(error);
    }

    fn set_source_loc(&mut self, loc: SourceLoc) {
        if !loc.is_known() {
            return;
        }
        let pc = self.instructions.len();
        match self.source_map.last_mut() {
            // A nested statement that starts where its parent does wins
            Some((start, last)) if *start == pc => *last = loc,
            Some((_, last)) if *last == loc => {}
            _ => self.source_map.push((pc, loc)),
        }
    }
}
