//! Front-end unit for the persistent Recaman sequence engine.
//!
//! A run is: storage health check (with a continue-or-reset prompt when the
//! store has grown past the threshold), load, extend by one batch, persist,
//! print the new terms. The engine itself stays free of console I/O; this
//! unit owns the prompt and the printing, with the streams injected so tests
//! can drive the decision.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::engine::{SequenceConfig, SequenceEngine};
use crate::unit::ProgramUnit;

pub struct RecamanUnit {
    config: SequenceConfig,
}

impl RecamanUnit {
    pub fn new(config: SequenceConfig) -> Self {
        Self { config }
    }

    /// Run against explicit streams. `run()` wires these to the console.
    pub fn run_with_io(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
        if let Some(size) = SequenceEngine::health_check(&self.config)? {
            self.prompt_reset(size, input, out)?;
        }

        let mut engine = SequenceEngine::load(&self.config)?;
        let start = engine.len();

        writeln!(out, "Recaman's sequence: {} terms on record", start)?;
        writeln!(out)?;

        let appended = engine.extend(self.config.batch_size);
        for (offset, term) in appended.iter().enumerate() {
            writeln!(out, "a({}) = {}", start + offset, term)?;
        }

        engine.persist()?;
        info!(
            appended = appended.len(),
            total = engine.len(),
            "sequence extended and persisted"
        );
        writeln!(out)?;
        writeln!(
            out,
            "Appended {} new terms; {} on record.",
            appended.len(),
            engine.len()
        )?;
        Ok(())
    }

    /// Put the continue-or-reset decision to the user. Anything other than an
    /// explicit yes keeps the store.
    fn prompt_reset(
        &self,
        size: u64,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<()> {
        writeln!(
            out,
            "The sequence store '{}' has grown to {} bytes (threshold {}).",
            self.config.store_path.display(),
            size,
            self.config.health_threshold
        )?;
        write!(out, "Discard it and restart the sequence from 0? [y/N] ")?;
        out.flush()?;

        let mut line = String::new();
        input
            .read_line(&mut line)
            .context("failed to read reset decision")?;

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => {
                SequenceEngine::reset_store(&self.config)?;
                writeln!(out, "Store discarded; the sequence restarts from 0.")?;
            }
            _ => {
                writeln!(out, "Keeping the existing store.")?;
            }
        }
        Ok(())
    }
}

impl ProgramUnit for RecamanUnit {
    fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with_io(&mut stdin.lock(), &mut stdout.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn small_config(dir: &tempfile::TempDir) -> SequenceConfig {
        SequenceConfig {
            store_path: dir.path().join("seq.json"),
            batch_size: 5,
            health_threshold: 10,
        }
    }

    fn run_unit(config: &SequenceConfig, input: &str) -> (Result<()>, String) {
        let mut unit = RecamanUnit::new(config.clone());
        let mut output = Vec::new();
        let result = unit.run_with_io(&mut Cursor::new(input), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_first_run_seeds_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);

        let (result, output) = run_unit(&config, "");
        result.unwrap();

        assert!(output.contains("a(0) = 0"));
        assert!(output.contains("a(1) = 1"));
        assert!(output.contains("Appended 5 new terms; 5 on record."));

        let engine = SequenceEngine::load(&config).unwrap();
        assert_eq!(engine.terms(), &[0, 1, 3, 6, 2]);
    }

    #[test]
    fn test_second_run_continues_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(&dir);
        config.health_threshold = 1024 * 1024;

        run_unit(&config, "").0.unwrap();
        let (result, output) = run_unit(&config, "");
        result.unwrap();

        assert!(output.contains(": 5 terms on record"));
        assert!(output.contains("a(5) = 7"));
    }

    #[test]
    fn test_over_threshold_decline_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);

        // First run persists a store larger than the 10-byte threshold.
        run_unit(&config, "").0.unwrap();

        let (result, output) = run_unit(&config, "n\n");
        result.unwrap();

        assert!(output.contains("Discard it and restart"));
        assert!(output.contains("Keeping the existing store."));

        let engine = SequenceEngine::load(&config).unwrap();
        assert_eq!(engine.len(), 10);
        assert_eq!(&engine.terms()[..5], &[0, 1, 3, 6, 2]);
    }

    #[test]
    fn test_over_threshold_accept_reseeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);

        run_unit(&config, "").0.unwrap();

        let (result, output) = run_unit(&config, "y\n");
        result.unwrap();

        assert!(output.contains("Store discarded"));
        assert!(output.contains(": 0 terms on record"));

        let engine = SequenceEngine::load(&config).unwrap();
        assert_eq!(engine.terms(), &[0, 1, 3, 6, 2]);
    }

    #[test]
    fn test_end_of_input_on_prompt_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);

        run_unit(&config, "").0.unwrap();
        let (result, output) = run_unit(&config, "");
        result.unwrap();

        assert!(output.contains("Keeping the existing store."));
    }

    #[test]
    fn test_corrupt_store_aborts_with_instruction() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(&dir);
        std::fs::write(&config.store_path, "garbage").unwrap();

        let (result, _) = run_unit(&config, "n\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Delete the file by hand"));

        // The corrupt store is left for the user to inspect.
        assert_eq!(std::fs::read_to_string(&config.store_path).unwrap(), "garbage");
    }
}
