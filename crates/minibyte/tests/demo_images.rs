//! End-to-end runs of the bundled demo images.

use minibyte_cpu::{Cpu, Output};

#[derive(Default)]
struct Recorder {
    values: Vec<u8>,
}

impl Output for Recorder {
    fn print(&mut self, value: u8) {
        self.values.push(value);
    }
}

fn run_image(source: &str) -> Vec<u8> {
    let program = minibyte::parse_image(source).unwrap();
    let mut cpu = Cpu::new();
    cpu.load(&program).unwrap();
    let mut out = Recorder::default();
    cpu.run(&mut out).expect("demo image should halt cleanly");
    out.values
}

#[test]
fn print_eight_demo_prints_eight() {
    let source = include_str!("../../../assets/programs/print_eight.mb8");
    assert_eq!(run_image(source), [8]);
}

#[test]
fn multiply_demo_prints_twelve() {
    let source = include_str!("../../../assets/programs/multiply.mb8");
    assert_eq!(run_image(source), [12]);
}

#[test]
fn subroutine_demo_prints_one() {
    let source = include_str!("../../../assets/programs/subroutine.mb8");
    assert_eq!(run_image(source), [1]);
}
