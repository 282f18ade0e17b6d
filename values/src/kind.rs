//! Value kinds and the masks used to constrain them.

use bitflags::bitflags;
use core::fmt;

/// Where a value lives, or where it comes from.
///
/// The discriminants are stable; [`KindMask`] uses them as bit positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ValueKind {
    /// A variable slot. Temporaries are variable slots too.
    Variable = 0,

    /// One of the VM's countdown timers.
    Timer = 1,

    /// An immediate constant.
    Constant = 2,

    /// A sensor reading.
    Sensor = 3,

    /// A fresh random number in `0..=data`.
    Random = 4,

    /// The number of the program currently selected on the brick.
    Program = 5,

    /// The hardware event counter.
    Counter = 6,
}

impl ValueKind {
    pub const ALL: [ValueKind; 7] = [
        ValueKind::Variable,
        ValueKind::Timer,
        ValueKind::Constant,
        ValueKind::Sensor,
        ValueKind::Random,
        ValueKind::Program,
        ValueKind::Counter,
    ];

    /// Pseudo-values can be copied into a variable but never used as a
    /// general operand.
    pub fn is_pseudo(self) -> bool {
        matches!(
            self,
            ValueKind::Random | ValueKind::Program | ValueKind::Counter
        )
    }

    /// Returns true if reading this kind twice may give different answers
    /// even when no variable changed in between.
    pub fn is_volatile(self) -> bool {
        matches!(
            self,
            ValueKind::Timer | ValueKind::Sensor | ValueKind::Random | ValueKind::Counter
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Variable => "var",
            ValueKind::Timer => "timer",
            ValueKind::Constant => "const",
            ValueKind::Sensor => "sensor",
            ValueKind::Random => "random",
            ValueKind::Program => "program",
            ValueKind::Counter => "counter",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// A set of acceptable [`ValueKind`]s for one emission site.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct KindMask: u16 {
        const VARIABLE = 1 << ValueKind::Variable as u16;
        const TIMER = 1 << ValueKind::Timer as u16;
        const CONSTANT = 1 << ValueKind::Constant as u16;
        const SENSOR = 1 << ValueKind::Sensor as u16;
        const RANDOM = 1 << ValueKind::Random as u16;
        const PROGRAM = 1 << ValueKind::Program as u16;
        const COUNTER = 1 << ValueKind::Counter as u16;

        /// Every kind; used where the consumer is a plain `Set`.
        const ANY = Self::VARIABLE.bits()
            | Self::TIMER.bits()
            | Self::CONSTANT.bits()
            | Self::SENSOR.bits()
            | Self::RANDOM.bits()
            | Self::PROGRAM.bits()
            | Self::COUNTER.bits();

        /// Every kind except the pseudo-values.
        const ARITHMETIC = Self::ANY.bits()
            & !(Self::RANDOM.bits() | Self::PROGRAM.bits() | Self::COUNTER.bits());
    }
}

impl KindMask {
    /// The mask containing exactly `kind`.
    pub const fn of(kind: ValueKind) -> Self {
        Self::from_bits_retain(1 << kind as u16)
    }

    pub fn allows(self, kind: ValueKind) -> bool {
        self.contains(Self::of(kind))
    }
}

impl From<ValueKind> for KindMask {
    fn from(kind: ValueKind) -> Self {
        Self::of(kind)
    }
}
