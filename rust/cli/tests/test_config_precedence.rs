mod helpers;

use helpers::{clear_env, run_cli, set_env};
use serde_json::Value;
use serial_test::serial;
use std::io::Write;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn file_values_are_reported_as_file() {
    clear_env();
    let file = config_file("seed = 456\nrows = 2\ncols = 2\n");
    set_env("GAMEMORY_CONFIG", file.path());

    let res = run_cli(&["cfg"]);
    clear_env();
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["seed"]["value"], 456);
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["rows"]["value"], 2);
    assert_eq!(json["cols"]["source"], "file");
    assert_eq!(json["resolve_delay_ms"]["source"], "default");
}

#[test]
#[serial]
fn env_beats_file_and_flags_beat_env() {
    clear_env();
    let file = config_file("seed = 456\n");
    set_env("GAMEMORY_CONFIG", file.path());
    set_env("GAMEMORY_SEED", "789");

    let cfg = run_cli(&["cfg"]);
    let json: Value = serde_json::from_str(&cfg.stdout).unwrap();
    assert_eq!(json["seed"]["value"], 789);
    assert_eq!(json["seed"]["source"], "env");

    let from_env = run_cli(&["deal"]);
    let from_flag = run_cli(&["deal", "--seed", "5"]);
    clear_env();

    let env_doc: Value = serde_json::from_str(&from_env.stdout).unwrap();
    let flag_doc: Value = serde_json::from_str(&from_flag.stdout).unwrap();
    assert_eq!(env_doc["seed"], 789);
    assert_eq!(flag_doc["seed"], 5);
}

#[test]
#[serial]
fn grid_from_env_drives_deal() {
    clear_env();
    set_env("GAMEMORY_ROWS", "2");
    set_env("GAMEMORY_COLS", "3");
    let res = run_cli(&["deal", "--seed", "3"]);
    clear_env();

    let doc: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(doc["cards"].as_array().unwrap().len(), 6);
    assert!(doc["cards"][0]["symbol"].as_str().unwrap().starts_with("pair-"));
}

#[test]
#[serial]
fn broken_config_file_fails_every_command() {
    clear_env();
    let file = config_file("rows = \"many\"\n");
    set_env("GAMEMORY_CONFIG", file.path());
    let cfg = run_cli(&["cfg"]);
    let deal = run_cli(&["deal"]);
    clear_env();

    assert_eq!(cfg.code, 2);
    assert!(cfg.stderr.contains("cannot parse config file"));
    assert_eq!(deal.code, 2);
}

#[test]
#[serial]
fn missing_config_file_is_an_io_config_error() {
    clear_env();
    set_env("GAMEMORY_CONFIG", "/nonexistent/gamemory.toml");
    let res = run_cli(&["cfg"]);
    clear_env();
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("cannot read config file"));
}

#[test]
#[serial]
fn oversized_env_grid_is_a_config_error() {
    clear_env();
    set_env("GAMEMORY_ROWS", "18446744073709551615");
    set_env("GAMEMORY_COLS", "2");
    let cfg = run_cli(&["cfg"]);
    let deal = run_cli(&["deal", "--seed", "1"]);
    clear_env();

    assert_eq!(cfg.code, 2);
    assert!(cfg.stderr.contains("Invalid rows"), "stderr: {}", cfg.stderr);
    assert!(cfg.stdout.is_empty());
    assert_eq!(deal.code, 2);
    assert!(deal.stderr.contains("Invalid rows"));
}
