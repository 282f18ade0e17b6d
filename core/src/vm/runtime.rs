use brickc_values::{EvalAddr, ValueKind, VarId};

use super::{Code, ExecutionError, Instruction};
use crate::{Vec, api::ExecutionOptions, vec};

/// Readings the VM reports for its non-variable sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Machine {
    pub timers: [i16; 4],
    pub sensors: [i16; 4],
    pub program: i16,
    pub counter: i16,
}

/// Reference interpreter for finalized [`Code`].
///
/// Execution starts at instruction 0 and ends on `Halt` or when control
/// leaves the code.
pub struct Vm<'c> {
    code: &'c Code,
    options: ExecutionOptions,
    machine: Machine,
    vars: Vec<i16>,
    rng: u32,
}

impl<'c> Vm<'c> {
    pub fn new(code: &'c Code, options: ExecutionOptions) -> Self {
        Vm {
            code,
            vars: vec![0; options.num_vars],
            rng: options.random_seed,
            options,
            machine: Machine::default(),
        }
    }

    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machine = machine;
        self
    }

    pub fn var(&self, var: VarId) -> i16 {
        self.vars[var.index()]
    }

    pub fn set_var(&mut self, var: VarId, value: i16) -> Result<(), ExecutionError> {
        *self
            .vars
            .get_mut(var.index())
            .ok_or(ExecutionError::UnknownVariable { var })? = value;
        Ok(())
    }

    /// Run to completion and return the number of instructions executed.
    pub fn run(&mut self) -> Result<usize, ExecutionError> {
        let mut pc = 0;
        let mut steps = 0;
        while pc < self.code.len() {
            if steps == self.options.max_steps {
                return Err(ExecutionError::StepLimit {
                    limit: self.options.max_steps,
                });
            }
            steps += 1;

            let next = match self.code.instructions[pc] {
                Instruction::Set { dst, src } => {
                    let value = self.read(pc, src)?;
                    self.set_var(dst, value)?;
                    pc + 1
                }
                Instruction::Math { op, dst, src } => {
                    let rhs = self.read(pc, src)?;
                    let lhs = self.read(pc, EvalAddr::variable(dst))?;
                    let value = op.apply(lhs, rhs).ok_or(ExecutionError::DivideByZero { pc })?;
                    self.set_var(dst, value)?;
                    pc + 1
                }
                Instruction::Test {
                    lhs,
                    rel,
                    rhs,
                    target,
                } => {
                    let a = self.read(pc, lhs)?;
                    let b = self.read(pc, rhs)?;
                    if rel.holds(a, b) {
                        self.jump_target(pc, target.index())?
                    } else {
                        pc + 1
                    }
                }
                Instruction::Jump(target) => self.jump_target(pc, target.index())?,
                Instruction::Halt => break,
            };
            pc = next;
        }
        Ok(steps)
    }

    fn jump_target(&self, pc: usize, label: usize) -> Result<usize, ExecutionError> {
        self.code
            .labels
            .get(label)
            .copied()
            .filter(|&target| target <= self.code.len())
            .ok_or(ExecutionError::BadJump { pc })
    }

    fn read(&mut self, pc: usize, addr: EvalAddr) -> Result<i16, ExecutionError> {
        let slot = |table: &[i16]| {
            table
                .get(addr.data as usize)
                .copied()
                .ok_or(ExecutionError::IllegalOperand { pc, addr })
        };
        match addr.kind {
            ValueKind::Variable => {
                let var = VarId(addr.data as u16);
                self.vars
                    .get(var.index())
                    .copied()
                    .ok_or(ExecutionError::UnknownVariable { var })
            }
            ValueKind::Constant => Ok(addr.data),
            ValueKind::Timer => slot(&self.machine.timers),
            ValueKind::Sensor => slot(&self.machine.sensors),
            ValueKind::Program => Ok(self.machine.program),
            ValueKind::Counter => Ok(self.machine.counter),
            ValueKind::Random => {
                // xorshift32; the bound is inclusive
                self.rng ^= self.rng << 13;
                self.rng ^= self.rng >> 17;
                self.rng ^= self.rng << 5;
                let bound = addr.data.max(0) as u32 + 1;
                Ok((self.rng % bound) as i16)
            }
        }
    }
}
