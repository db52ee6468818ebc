//! Core of the MiniByte virtual machine.
//!
//! MiniByte is a small 8-bit CPU: eight general-purpose registers, a flag
//! register, 256 bytes of flat RAM shared by code and data, and a fixed set
//! of single-byte opcodes. Programs are loaded at address 0 and run until a
//! HLT instruction or a fault.
//!
//! This crate is the execution engine only. Reading program images from
//! disk and turning run outcomes into process exit codes is the job of the
//! `minibyte` binary crate.

mod cpu;
mod error;
mod opcode;

pub use cpu::{AluOp, Cpu, Flag, Output, State, StdoutOutput};
pub use error::Fault;
pub use opcode::Opcode;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;
/// Size of RAM in bytes. Instructions and data share the same space.
pub const RAM_SIZE: usize = 256;
/// Register index reserved for the stack pointer.
pub const SP: usize = 7;
