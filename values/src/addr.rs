//! Evaluation addresses and variable identifiers.

use core::fmt;

use crate::ValueKind;

/// Identifier of a variable slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub u16);

impl VarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Where a computed value lives in the VM's value space.
///
/// The meaning of `data` depends on `kind`: a slot number for variables,
/// timers and sensors, the value itself for constants, the upper bound for
/// random numbers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EvalAddr {
    pub kind: ValueKind,
    pub data: i16,
}

impl EvalAddr {
    pub const fn new(kind: ValueKind, data: i16) -> Self {
        Self { kind, data }
    }

    pub const fn variable(var: VarId) -> Self {
        Self::new(ValueKind::Variable, var.0 as i16)
    }

    pub const fn constant(value: i16) -> Self {
        Self::new(ValueKind::Constant, value)
    }

    pub const fn pseudo(kind: ValueKind, data: i16) -> Self {
        Self::new(kind, data)
    }

    /// The variable this address names, if it names one.
    pub fn as_var(self) -> Option<VarId> {
        match self.kind {
            ValueKind::Variable => Some(VarId(self.data as u16)),
            _ => None,
        }
    }

    pub fn as_constant(self) -> Option<i16> {
        match self.kind {
            ValueKind::Constant => Some(self.data),
            _ => None,
        }
    }

    pub fn is_pseudo(self) -> bool {
        self.kind.is_pseudo()
    }
}

impl From<VarId> for EvalAddr {
    fn from(var: VarId) -> Self {
        Self::variable(var)
    }
}

impl fmt::Display for EvalAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValueKind::Variable => write!(f, "v{}", self.data as u16),
            ValueKind::Constant => write!(f, "#{}", self.data),
            kind => write!(f, "{}({})", kind, self.data),
        }
    }
}
