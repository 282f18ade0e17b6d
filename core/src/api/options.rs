//! Configuration options for compilation and execution.

use core::ops::Range;

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use brickc_core::api::CompileOptions;
///
/// let options = CompileOptions {
///     global_temps: 40..48,
///     local_temps: 48..64,
/// };
/// assert_eq!(options.global_temps.len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Variable slots reserved for temporaries that may live anywhere.
    ///
    /// Default: 24..32
    pub global_temps: Range<u16>,

    /// Variable slots reserved for temporaries scoped to the current task.
    ///
    /// These are handed out first, but never when the caller asks for a
    /// temporary that must not be local.
    ///
    /// Default: 32..48
    pub local_temps: Range<u16>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            global_temps: 24..32,
            local_temps: 32..48,
        }
    }
}

/// Configuration options for the reference VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum number of instructions to execute before giving up.
    ///
    /// Default: 100_000
    pub max_steps: usize,

    /// Seed for the VM's pseudo-random source.
    ///
    /// Default: 0x2545
    pub random_seed: u32,

    /// Size of the variable file.
    ///
    /// Default: 48
    pub num_vars: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_steps: 100_000,
            random_seed: 0x2545,
            num_vars: 48,
        }
    }
}
