//! Demonstration unit: prints a multiplication table.

use std::io::Write;

use anyhow::Result;

use crate::unit::ProgramUnit;

const TABLE_SIZE: u32 = 10;

pub struct ArithmeticTableUnit;

impl ProgramUnit for ArithmeticTableUnit {
    fn run(&mut self) -> Result<()> {
        let stdout = std::io::stdout();
        write_table(&mut stdout.lock())?;
        Ok(())
    }
}

fn write_table(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Multiplication table 1..{TABLE_SIZE}")?;
    for row in 1..=TABLE_SIZE {
        for col in 1..=TABLE_SIZE {
            write!(out, "{:4}", row * col)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
