//! Interactive menu loop.
//!
//! Thin console front-end over the catalog: render the discovered labels
//! with stable 1-based indices, read a selection, run the chosen unit.
//! Invalid selections are rejected and re-prompted, never propagated. The
//! loop ends only on an explicit `0` or end-of-input, and a failing unit is
//! reported without taking the menu down with it.

use std::io::{BufRead, Write};

use tracing::{error, info};

use crate::error::Result;
use crate::registry::Catalog;

/// Run the menu against the console.
pub fn run_menu(catalog: &Catalog) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu_loop(catalog, &mut stdin.lock(), &mut stdout.lock())
}

/// Run the menu against explicit streams.
pub fn menu_loop(catalog: &Catalog, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    // Discovery failures are reported once, before the first render, with
    // enough context to fix the offending file.
    for failure in catalog.failures() {
        writeln!(out, "warning: {failure}")?;
    }

    if catalog.is_empty() {
        writeln!(out, "No program units discovered.")?;
        return Ok(());
    }

    loop {
        render(catalog, out)?;
        write!(out, "Enter option: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input counts as an exit signal.
            writeln!(out)?;
            break;
        }
        let choice = line.trim();

        if choice == "0" {
            writeln!(out, "Goodbye!")?;
            break;
        }

        let selected = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| catalog.get(index));
        let Some(descriptor) = selected else {
            writeln!(out, "Invalid selection.")?;
            continue;
        };

        info!(unit = descriptor.id(), "running selected unit");
        let mut unit = descriptor.instantiate();
        if let Err(err) = unit.run() {
            // The unit is broken, the menu is not.
            error!(unit = descriptor.id(), "unit failed: {err:#}");
            writeln!(out, "'{}' failed: {err:#}", descriptor.label())?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn render(catalog: &Catalog, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "========================")?;
    writeln!(out, "        MAIN MENU")?;
    writeln!(out, "========================")?;
    for (index, descriptor) in catalog.units().iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, descriptor.label())?;
    }
    writeln!(out, "0. Exit")?;
    writeln!(out)?;
    Ok(())
}
