mod alu;

pub use alu::AluOp;

use crate::error::Fault;
use crate::opcode::Opcode;
use crate::{NUM_REGS, RAM_SIZE, SP};

/// Sink for the PRN instruction.
///
/// Printing a register is an architectural side effect of the instruction,
/// not diagnostics, so the CPU hands each value to a sink instead of
/// touching stdout itself. The binary prints one decimal per line; tests
/// record the values.
pub trait Output {
    fn print(&mut self, value: u8);
}

/// Prints each value as a decimal line on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn print(&mut self, value: u8) {
        println!("{value}");
    }
}

/// Whether the machine wants another cycle after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// Bit positions in the flag register.
///
/// Only the Equal flag is architecturally defined: CMP writes it and the
/// conditional jumps read it. The remaining bits always hold zero.
#[derive(Clone, Copy, Debug)]
pub enum Flag {
    Equal = 7,
}

/// The MiniByte machine: registers, flags, RAM and program counter.
///
/// Each instance owns its state outright, so independent machines can run
/// side by side; cloning one gives a snapshot that evolves separately.
#[derive(Clone)]
pub struct Cpu {
    /// General-purpose registers. Index 7 doubles as the stack pointer.
    reg: [u8; NUM_REGS],
    /// Flag register, one bit per flag.
    fl: u8,
    ram: [u8; RAM_SIZE],
    /// Address of the next instruction byte to fetch.
    pc: usize,
}

impl Default for Cpu {
    fn default() -> Self {
        // The stack grows down from the top of RAM. SP holds 0 at reset,
        // which is one past the highest address modulo 256, so the first
        // push lands at 0xFF.
        Self {
            reg: [0; NUM_REGS],
            fl: 0,
            ram: [0; RAM_SIZE],
            pc: 0,
        }
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all state to its reset values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Address of the next instruction byte.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Read a general-purpose register.
    pub fn reg(&self, index: u8) -> Result<u8, Fault> {
        self.reg
            .get(index as usize)
            .copied()
            .ok_or(Fault::BadRegister { index, pc: self.pc })
    }

    /// Write a general-purpose register.
    pub fn set_reg(&mut self, index: u8, value: u8) -> Result<(), Fault> {
        let pc = self.pc;
        let slot = self
            .reg
            .get_mut(index as usize)
            .ok_or(Fault::BadRegister { index, pc })?;
        *slot = value;
        Ok(())
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        (self.fl & (1 << flag as u8)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.fl |= 1 << bit;
        } else {
            self.fl &= !(1 << bit);
        }
    }

    /// Byte at `addr`. All RAM traffic funnels through this and
    /// [`ram_write`](Self::ram_write), the one place address policy lives.
    /// Addresses are a full byte wide and RAM holds 256 cells, so every
    /// address a program can form is in range.
    pub fn ram_read(&self, addr: u8) -> u8 {
        self.ram[addr as usize]
    }

    /// Store a byte at `addr`.
    pub fn ram_write(&mut self, addr: u8, value: u8) {
        self.ram[addr as usize] = value;
    }

    /// Copy a program image into RAM starting at address 0 and leave the
    /// program counter there.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Fault> {
        self.load_at(0, image)
    }

    /// Copy an image into RAM at `base`. Used for whole programs and for
    /// placing subroutines or data blocks at fixed addresses.
    pub fn load_at(&mut self, base: usize, image: &[u8]) -> Result<(), Fault> {
        let end = base
            .checked_add(image.len())
            .filter(|&end| end <= RAM_SIZE)
            .ok_or(Fault::ImageTooLarge {
                base,
                len: image.len(),
            })?;
        self.ram[base..end].copy_from_slice(image);
        Ok(())
    }

    fn push(&mut self, value: u8) {
        let sp = self.reg[SP].wrapping_sub(1);
        self.reg[SP] = sp;
        self.ram_write(sp, value);
    }

    fn pop(&mut self) -> u8 {
        let sp = self.reg[SP];
        let value = self.ram_read(sp);
        self.reg[SP] = sp.wrapping_add(1);
        value
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// Instructions that do not branch advance the program counter by their
    /// own width; control flow sets it directly. Returns whether the
    /// machine is still running, or the fault that stopped it — nothing is
    /// mutated once a fault is raised.
    pub fn step<O: Output>(&mut self, out: &mut O) -> Result<State, Fault> {
        let pc = self.pc;
        let byte = *self.ram.get(pc).ok_or(Fault::PcOutOfRange { pc })?;
        let opcode = Opcode::decode(byte).ok_or(Fault::UnknownOpcode { opcode: byte, pc })?;

        // Fetch exactly the operand bytes the opcode calls for. An
        // instruction cut off by the end of RAM faults instead of reading
        // wrapped-around bytes.
        let mut operands = [0u8; 2];
        for (i, slot) in operands.iter_mut().enumerate().take(opcode.width() - 1) {
            *slot = *self
                .ram
                .get(pc + 1 + i)
                .ok_or(Fault::TruncatedInstruction { pc })?;
        }
        let [a, b] = operands;

        log::trace!("{pc:#04x}: {} {a:#04x} {b:#04x}", opcode.mnemonic());

        match opcode {
            Opcode::Ldi => {
                self.set_reg(a, b)?;
                self.pc = pc + 3;
            }
            Opcode::Prn => {
                out.print(self.reg(a)?);
                self.pc = pc + 2;
            }
            Opcode::Add => {
                self.alu(AluOp::Add, a, b)?;
                self.pc = pc + 3;
            }
            Opcode::Mul => {
                self.alu(AluOp::Mul, a, b)?;
                self.pc = pc + 3;
            }
            Opcode::Cmp => {
                self.alu(AluOp::Cmp, a, b)?;
                self.pc = pc + 3;
            }
            Opcode::Hlt => return Ok(State::Halted),
            Opcode::Push => {
                let value = self.reg(a)?;
                self.push(value);
                self.pc = pc + 2;
            }
            Opcode::Pop => {
                // Validate the destination first so a bad register index
                // leaves the stack pointer where it was.
                self.reg(a)?;
                let value = self.pop();
                self.set_reg(a, value)?;
                self.pc = pc + 2;
            }
            Opcode::Call => {
                let target = self.reg(a)?;
                // The return address must fit in a memory cell; a CALL in
                // the last two cells would resume past the end of RAM.
                let ret = u8::try_from(pc + 2).map_err(|_| Fault::PcOutOfRange { pc: pc + 2 })?;
                self.push(ret);
                self.pc = target as usize;
            }
            Opcode::Ret => {
                self.pc = self.pop() as usize;
            }
            Opcode::Jmp => {
                self.pc = self.reg(a)? as usize;
            }
            Opcode::Jeq => {
                self.pc = if self.flag(Flag::Equal) {
                    self.reg(a)? as usize
                } else {
                    pc + 2
                };
            }
            Opcode::Jne => {
                self.pc = if self.flag(Flag::Equal) {
                    pc + 2
                } else {
                    self.reg(a)? as usize
                };
            }
        }

        Ok(State::Running)
    }

    /// Run until the program halts or faults.
    pub fn run<O: Output>(&mut self, out: &mut O) -> Result<(), Fault> {
        while self.step(out)? == State::Running {}
        log::debug!("halted at {:#04x}", self.pc);
        Ok(())
    }
}
