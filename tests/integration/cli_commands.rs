//! Integration tests for the `charsheet` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use super::common::fixtures::list_files;

/// Run the binary against an isolated data dir and a config file that does
/// not exist, so the user's own config is never read
fn charsheet(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("charsheet").expect("binary not built");
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--data-dir")
        .arg(dir.path().join("character_data"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_on_empty_directory() {
    let dir = TempDir::new().unwrap();
    charsheet(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No characters yet."));

    assert!(dir.path().join("character_data").is_dir());
}

#[test]
fn test_create_edit_list_delete() {
    let dir = TempDir::new().unwrap();

    charsheet(&dir)
        .args(["new", "Thorin", "--class", "Fighter", "--level", "5"])
        .args(["--str", "16", "--dex", "12", "--con", "14"])
        .args(["--int", "8", "--wis", "10", "--cha", "13"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved Thorin"))
        .stdout(predicate::str::contains("1 character in"));

    assert_eq!(
        list_files(&dir.path().join("character_data")),
        vec!["Thorin.json"]
    );

    charsheet(&dir)
        .args(["edit", "Thorin", "--level", "6"])
        .assert()
        .success();

    charsheet(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("Thorin -- Fighter (Level 6)\n");

    charsheet(&dir)
        .args(["show", "Thorin"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "STR 16  DEX 12  CON 14  INT 8  WIS 10  CHA 13",
        ));

    charsheet(&dir)
        .args(["delete", "Thorin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 characters in"));

    charsheet(&dir)
        .args(["delete", "Thorin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Character not found: Thorin"));
}

#[test]
fn test_new_validates_form_rules() {
    let dir = TempDir::new().unwrap();

    charsheet(&dir)
        .args(["new", "Aria", "--class", "Ranger", "--level", "21"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Level 21 is outside 1-20"));

    charsheet(&dir)
        .args(["new", "Aria", "--class", "Necromancer"])
        .assert()
        .failure();

    assert!(list_files(&dir.path().join("character_data")).is_empty());
}

#[test]
fn test_config_file_sets_data_dir() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("party");
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("[storage]\ndata_dir = {:?}\n", data_dir.to_string_lossy()),
    )
    .unwrap();

    Command::cargo_bin("charsheet")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["new", "Aria", "-c", "Bard"])
        .assert()
        .success();

    assert_eq!(list_files(&data_dir), vec!["Aria.json"]);
}

#[test]
fn test_strict_load_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("character_data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("a.json"), r#"{"name": "Twin"}"#).unwrap();
    fs::write(data_dir.join("b.json"), r#"{"name": "Twin"}"#).unwrap();

    charsheet(&dir).arg("list").assert().success().stdout("Twin --  (Level 1)\n");

    fs::write(
        dir.path().join("config.toml"),
        "[storage]\nstrict_load = true\n",
    )
    .unwrap();
    charsheet(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate character name"));
}

#[test]
fn test_classes_lists_all() {
    let dir = TempDir::new().unwrap();
    charsheet(&dir)
        .arg("classes")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Barbarian\nBard\n"))
        .stdout(predicate::str::ends_with("Warlock\nWizard\n"));
}
