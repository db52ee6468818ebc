//! Arithmetic-logic unit.

use super::{Cpu, Flag};
use crate::error::Fault;

/// Operations the ALU performs on a pair of general-purpose registers.
///
/// Only these three exist; the opcode match is the sole producer, so there
/// is no "unsupported operation" path at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// `a <- a + b`, wrapping at the register width.
    Add,
    /// `a <- a * b`, wrapping at the register width.
    Mul,
    /// Set the Equal flag to `a == b` without touching either register.
    Cmp,
}

impl Cpu {
    /// Apply `op` to the registers named by `reg_a` and `reg_b`.
    ///
    /// Registers are 8 bits wide and arithmetic wraps modulo 256, like the
    /// hardware being modeled.
    pub fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), Fault> {
        let a = self.reg(reg_a)?;
        let b = self.reg(reg_b)?;
        match op {
            AluOp::Add => self.set_reg(reg_a, a.wrapping_add(b))?,
            AluOp::Mul => self.set_reg(reg_a, a.wrapping_mul(b))?,
            AluOp::Cmp => self.set_flag(Flag::Equal, a == b),
        }
        Ok(())
    }
}
