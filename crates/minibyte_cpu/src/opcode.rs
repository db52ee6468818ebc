//! The MiniByte instruction set.
//!
//! An instruction is one opcode byte followed by zero, one or two operand
//! bytes. Operands are register indices or immediate values depending on
//! the instruction; the opcode alone determines how many there are.

/// Opcodes understood by the CPU. The discriminants are the raw
/// instruction bytes as they appear in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// `LDI reg, value`: load an immediate into a register.
    Ldi = 0b1000_0010,
    /// `PRN reg`: emit the register value on the machine output, one
    /// decimal per line. An architectural side effect, not logging.
    Prn = 0b0100_0111,
    /// `ADD reg_a, reg_b`: `reg_a <- reg_a + reg_b`, wrapping.
    Add = 0b1010_0000,
    /// `MUL reg_a, reg_b`: `reg_a <- reg_a * reg_b`, wrapping.
    Mul = 0b1010_0010,
    /// `CMP reg_a, reg_b`: set the Equal flag to `reg_a == reg_b`.
    Cmp = 0b1010_0111,
    /// `HLT`: stop the machine cleanly.
    Hlt = 0b0000_0001,
    /// `PUSH reg`: decrement SP, store the register at `ram[SP]`.
    Push = 0b0100_0101,
    /// `POP reg`: load `ram[SP]` into the register, increment SP.
    Pop = 0b0100_0110,
    /// `CALL reg`: push the address of the next instruction, jump to the
    /// address held in the register.
    Call = 0b0101_0000,
    /// `RET`: pop the return address into the program counter.
    Ret = 0b0001_0001,
    /// `JEQ reg`: jump to the address in the register if Equal is set.
    Jeq = 0b0101_0101,
    /// `JNE reg`: jump to the address in the register if Equal is clear.
    Jne = 0b0101_0110,
    /// `JMP reg`: jump to the address in the register unconditionally.
    Jmp = 0b0101_0100,
}

impl Opcode {
    /// Decode a raw instruction byte. `None` for bytes that do not name an
    /// instruction; the caller turns those into a fault.
    pub fn decode(byte: u8) -> Option<Opcode> {
        match byte {
            0b1000_0010 => Some(Opcode::Ldi),
            0b0100_0111 => Some(Opcode::Prn),
            0b1010_0000 => Some(Opcode::Add),
            0b1010_0010 => Some(Opcode::Mul),
            0b1010_0111 => Some(Opcode::Cmp),
            0b0000_0001 => Some(Opcode::Hlt),
            0b0100_0101 => Some(Opcode::Push),
            0b0100_0110 => Some(Opcode::Pop),
            0b0101_0000 => Some(Opcode::Call),
            0b0001_0001 => Some(Opcode::Ret),
            0b0101_0101 => Some(Opcode::Jeq),
            0b0101_0110 => Some(Opcode::Jne),
            0b0101_0100 => Some(Opcode::Jmp),
            _ => None,
        }
    }

    /// Instruction width in bytes, opcode included. The fetch reads exactly
    /// this many bytes, so a 1-byte instruction in the last RAM cell is
    /// still executable.
    pub fn width(self) -> usize {
        match self {
            Opcode::Hlt | Opcode::Ret => 1,
            Opcode::Prn
            | Opcode::Push
            | Opcode::Pop
            | Opcode::Call
            | Opcode::Jeq
            | Opcode::Jne
            | Opcode::Jmp => 2,
            Opcode::Ldi | Opcode::Add | Opcode::Mul | Opcode::Cmp => 3,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Ldi => "LDI",
            Opcode::Prn => "PRN",
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Cmp => "CMP",
            Opcode::Hlt => "HLT",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Jmp => "JMP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Opcode;

    const ALL: [Opcode; 13] = [
        Opcode::Ldi,
        Opcode::Prn,
        Opcode::Add,
        Opcode::Mul,
        Opcode::Cmp,
        Opcode::Hlt,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Jmp,
    ];

    #[test]
    fn decode_inverts_the_instruction_byte() {
        for op in ALL {
            assert_eq!(Opcode::decode(op as u8), Some(op));
        }
    }

    #[test]
    fn decode_rejects_unassigned_bytes() {
        let assigned: Vec<u8> = ALL.iter().map(|&op| op as u8).collect();
        for byte in 0..=u8::MAX {
            if !assigned.contains(&byte) {
                assert_eq!(Opcode::decode(byte), None, "byte {byte:#010b}");
            }
        }
    }

    #[test]
    fn widths_match_operand_counts() {
        assert_eq!(Opcode::Hlt.width(), 1);
        assert_eq!(Opcode::Ret.width(), 1);
        assert_eq!(Opcode::Prn.width(), 2);
        assert_eq!(Opcode::Call.width(), 2);
        assert_eq!(Opcode::Ldi.width(), 3);
        assert_eq!(Opcode::Cmp.width(), 3);
        for op in ALL {
            assert!((1..=3).contains(&op.width()));
        }
    }
}
