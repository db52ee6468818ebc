//! MiniByte: an 8-bit virtual machine.
//!
//! The execution engine lives in [`minibyte_cpu`]; this crate adds the
//! textual program-image loader and the command-line front end.

use anyhow::{Context, Result};
use minibyte_cpu::{Cpu, Fault, StdoutOutput};

/// Parse a textual program image into instruction bytes.
///
/// One byte per line, written as an 8-bit binary literal. `#` starts a
/// comment and blank lines are skipped:
///
/// ```text
/// 10000010 # LDI r0, 8
/// 00000000
/// 00001000
/// ```
pub fn parse_image(source: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let code = match line.split_once('#') {
            Some((code, _comment)) => code,
            None => line,
        };
        let code = code.trim();
        if code.is_empty() {
            continue;
        }
        let byte = u8::from_str_radix(code, 2)
            .with_context(|| format!("bad instruction byte {code:?} on line {}", index + 1))?;
        bytes.push(byte);
    }
    Ok(bytes)
}

/// Read a program image from disk and parse it.
pub fn load_image(path: &str) -> Result<Vec<u8>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read program image {path:?}"))?;
    parse_image(&source).with_context(|| format!("failed to parse program image {path:?}"))
}

/// Run a program on a fresh machine, printing PRN output to stdout.
///
/// A clean HLT returns `Ok`; a fault comes back to the caller so the
/// process can exit with a status distinct from a clean halt.
pub fn run(program: &[u8]) -> Result<(), Fault> {
    let mut cpu = Cpu::new();
    cpu.load(program)?;
    cpu.run(&mut StdoutOutput)
}
