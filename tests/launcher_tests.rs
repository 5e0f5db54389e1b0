// Integration tests for menurun
//
// These drive the whole path a user exercises: discovery over a real
// directory of manifests, the menu loop over injected streams, and the
// sequence unit persisting state across repeated runs.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use menurun::{Catalog, LauncherConfig, SequenceConfig, SequenceEngine, discover, menu};

fn write_manifest(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn standard_units(dir: &Path) {
    write_manifest(
        dir,
        "unit_greeting.json",
        r#"{"units": [{"kind": "greeting", "label": "Greeting"}]}"#,
    );
    write_manifest(
        dir,
        "unit_arithmetic.json",
        r#"{"units": [{"kind": "arithmetic_table", "label": "Multiplication Table"}]}"#,
    );
    write_manifest(
        dir,
        "unit_recaman.json",
        r#"{"units": [{"kind": "recaman_sequence", "label": "Recaman's Sequence"}]}"#,
    );
}

fn config_for(dir: &tempfile::TempDir) -> LauncherConfig {
    LauncherConfig {
        units_dir: dir.path().to_path_buf(),
        store_file: dir.path().join("recaman_sequence.json"),
    }
}

fn drive_menu(catalog: &Catalog, input: &str) -> String {
    let mut output = Vec::new();
    menu::menu_loop(catalog, &mut Cursor::new(input), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_shipped_manifests_discover_cleanly() {
    // The manifests checked into units/ must resolve against the registered
    // kinds; a rename in one place without the other is a packaging bug.
    let config = LauncherConfig {
        units_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("units"),
        store_file: Path::new(env!("CARGO_MANIFEST_DIR")).join("recaman_sequence.json"),
    };

    let catalog = discover(&config).unwrap();
    assert_eq!(catalog.len(), 3);
    assert!(catalog.failures().is_empty());
    assert!(catalog.find("recaman").is_some());
}

#[test]
fn test_menu_runs_discovered_unit_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    standard_units(dir.path());
    let config = config_for(&dir);

    let catalog = discover(&config).unwrap();
    // Catalog is in file-name order: arithmetic, greeting, recaman.
    let output = drive_menu(&catalog, "3\n0\n");

    assert!(output.contains("3. Recaman's Sequence"));
    assert!(output.contains("Goodbye!"));

    // The selected unit really ran: its store exists and holds one batch of
    // terms, starting at the seed.
    let engine = SequenceEngine::load(&config.sequence_config()).unwrap();
    assert_eq!(engine.len(), 100);
    assert_eq!(engine.terms()[0], 0);
}

#[test]
fn test_sequence_survives_repeated_menu_runs() {
    let dir = tempfile::tempdir().unwrap();
    standard_units(dir.path());
    let config = config_for(&dir);

    let catalog = discover(&config).unwrap();
    drive_menu(&catalog, "3\n0\n");
    drive_menu(&catalog, "3\n3\n0\n");

    let engine = SequenceEngine::load(&config.sequence_config()).unwrap();
    assert_eq!(engine.len(), 300);

    let unique: std::collections::HashSet<u64> = engine.terms().iter().copied().collect();
    assert_eq!(unique.len(), 300);
}

#[test]
fn test_broken_candidate_leaves_rest_of_catalog_usable() {
    let dir = tempfile::tempdir().unwrap();
    standard_units(dir.path());
    write_manifest(dir.path(), "unit_zz_broken.json", "syntax error {");

    let catalog = discover(&config_for(&dir)).unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.failures().len(), 1);

    let output = drive_menu(&catalog, "0\n");
    assert!(output.contains("warning:"));
    assert!(output.contains("unit_zz_broken.json"));
    assert!(output.contains("1. Multiplication Table"));
}

#[test]
fn test_corrupt_store_fails_unit_but_not_menu() {
    let dir = tempfile::tempdir().unwrap();
    standard_units(dir.path());
    let config = config_for(&dir);
    fs::write(&config.store_file, "definitely not json").unwrap();

    let catalog = discover(&config).unwrap();
    // Run the broken sequence unit, then the greeting, then exit.
    let output = drive_menu(&catalog, "3\n2\n0\n");

    assert!(output.contains("'Recaman's Sequence' failed:"));
    assert!(output.contains("Delete the file by hand"));
    assert!(output.contains("Goodbye!"));

    // Nothing touched the corrupt store.
    assert_eq!(
        fs::read_to_string(&config.store_file).unwrap(),
        "definitely not json"
    );
}

#[test]
fn test_health_prompt_round_trip_through_unit() {
    // Tiny threshold so the second run crosses it; the declining answer must
    // preserve every term already on disk.
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("seq.json");
    let config = SequenceConfig {
        store_path: store.clone(),
        batch_size: 10,
        health_threshold: 20,
    };

    let mut unit = menurun::RecamanUnit::new(config.clone());
    let mut out = Vec::new();
    unit.run_with_io(&mut Cursor::new(""), &mut out).unwrap();

    let mut unit = menurun::RecamanUnit::new(config.clone());
    let mut out = Vec::new();
    unit.run_with_io(&mut Cursor::new("no\n"), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Keeping the existing store."));

    let engine = SequenceEngine::load(&config).unwrap();
    assert_eq!(engine.len(), 20);

    // Accepting the reset discards the store; generation restarts from 0.
    let mut unit = menurun::RecamanUnit::new(config.clone());
    let mut out = Vec::new();
    unit.run_with_io(&mut Cursor::new("yes\n"), &mut out).unwrap();

    let engine = SequenceEngine::load(&config).unwrap();
    assert_eq!(engine.len(), 10);
    assert_eq!(engine.terms()[0], 0);
}
