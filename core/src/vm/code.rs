use smallvec::SmallVec;

use crate::{Vec, loc::SourceLoc, vm::Instruction, vm::Label};

/// Finalized output of one compiled unit.
///
/// Labels are resolved: `labels[l]` is the index of the instruction that
/// label `l` was bound before. A label may point one past the last
/// instruction, which means "leave the unit".
#[derive(Clone, PartialEq, Eq)]
pub struct Code {
    pub instructions: Vec<Instruction>,
    pub labels: Vec<usize>,
    /// Instruction index at which each tagged statement starts.
    pub source_map: Vec<(usize, SourceLoc)>,
}

/// How control reaches a successor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Falling off the end of a non-jumping instruction, or a `Test` whose
    /// relation did not hold.
    Fallthrough,
    /// A `Test` whose relation held.
    Taken,
    /// An unconditional jump.
    Jump,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub to: usize,
    pub kind: EdgeKind,
}

impl Code {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn target(&self, label: Label) -> usize {
        self.labels[label.index()]
    }

    /// Control-flow successors of the instruction at `pc`.
    pub fn successors(&self, pc: usize) -> SmallVec<[Edge; 2]> {
        let mut out = SmallVec::new();
        let instr = self.instructions[pc];
        if !instr.is_terminator() {
            out.push(Edge {
                to: pc + 1,
                kind: EdgeKind::Fallthrough,
            });
        }
        if let Some(label) = instr.target() {
            let kind = match instr {
                Instruction::Jump(_) => EdgeKind::Jump,
                _ => EdgeKind::Taken,
            };
            out.push(Edge {
                to: self.target(label),
                kind,
            });
        }
        out
    }

    /// Source position of the statement that emitted the instruction at `pc`.
    pub fn source_loc(&self, pc: usize) -> Option<SourceLoc> {
        self.source_map
            .iter()
            .take_while(|(start, _)| *start <= pc)
            .last()
            .map(|(_, loc)| *loc)
    }
}

impl core::fmt::Debug for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Code {{")?;
        writeln!(f, "  instructions:")?;

        // Labels sorted by target so each address prints them in a stable order
        let mut bound: Vec<(usize, usize)> = self
            .labels
            .iter()
            .enumerate()
            .map(|(label, &addr)| (addr, label))
            .collect();
        bound.sort();

        let mut next = bound.iter().peekable();
        for (addr, instr) in self.instructions.iter().enumerate() {
            while let Some((_, label)) = next.next_if(|(at, _)| *at == addr) {
                writeln!(f, "       L{}:", label)?;
            }
            writeln!(f, "    {:4}  {:?}", addr, instr)?;
        }
        for (_, label) in next {
            writeln!(f, "       L{}:", label)?;
        }

        write!(f, "}}")
    }
}
