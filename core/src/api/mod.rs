//! Configuration surface shared by the compiler and the reference VM.

mod options;

pub use options::{CompileOptions, ExecutionOptions};
