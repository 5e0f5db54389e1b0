//! Demonstration unit: prints a literal greeting.

use anyhow::Result;

use crate::unit::ProgramUnit;

pub struct GreetingUnit;

impl ProgramUnit for GreetingUnit {
    fn run(&mut self) -> Result<()> {
        println!("Hello! This program was discovered and launched from the menu.");
        Ok(())
    }
}
