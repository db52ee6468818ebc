//! Faults raised by the execution engine.

use thiserror::Error;

/// A fault is fatal to the current run: the execution loop stops and the
/// machine keeps the state it had when the fault was raised. None of these
/// are retried or recovered internally.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Fault {
    /// The byte at the program counter does not name an instruction.
    #[error("unrecognized opcode {opcode:#010b} at {pc:#04x}")]
    UnknownOpcode { opcode: u8, pc: usize },

    /// An operand named a register outside the register file.
    #[error("register index {index} out of range at {pc:#04x}")]
    BadRegister { index: u8, pc: usize },

    /// The program counter left the address space, either by running off
    /// the end of a program or through a call pushed past the last cell.
    #[error("program counter {pc:#x} outside memory")]
    PcOutOfRange { pc: usize },

    /// The end of memory was reached before all of an instruction's
    /// operand bytes could be fetched.
    #[error("instruction at {pc:#04x} truncated by end of memory")]
    TruncatedInstruction { pc: usize },

    /// A program image does not fit in memory at the requested base.
    #[error("{len} byte image does not fit at base {base:#04x}")]
    ImageTooLarge { base: usize, len: usize },
}
