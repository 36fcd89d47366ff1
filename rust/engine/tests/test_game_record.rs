use std::fs;
use std::path::PathBuf;

use gamemory_engine::cards::CardId;
use gamemory_engine::logger::{FlipRecord, GameLogger, GameRecord};

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn record() -> GameRecord {
    GameRecord {
        game_id: "20250102-000001".to_string(),
        seed: Some(1),
        rows: 4,
        cols: 4,
        flips: vec![
            FlipRecord {
                card: CardId(0),
                at_ms: 0,
            },
            FlipRecord {
                card: CardId(5),
                at_ms: 0,
            },
        ],
        attempts: 1,
        mismatches: 1,
        matched_pairs: 0,
        completed: false,
        elapsed_ms: 1_000,
        ts: None,
        meta: None,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("gamelog");
    let mut logger = GameLogger::create(&path).expect("create logger");
    logger.write(&record()).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
}

#[test]
fn sequential_ids_increment() {
    let mut logger = GameLogger::detached("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("gamelog_ts");
    let mut logger = GameLogger::create(&path).expect("create logger");
    logger.write(&record()).expect("write");
    let line = String::from_utf8(fs::read(&path).unwrap()).unwrap();
    assert!(line.contains("\"ts\":"), "ts should be injected");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec2 = GameRecord {
        ts: Some(preset.clone()),
        ..record()
    };
    logger.write(&rec2).expect("write2");
    let content = String::from_utf8(fs::read(&path).unwrap()).unwrap();
    assert!(content.contains(&preset), "preset ts must be kept");
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn record_round_trips_through_json() {
    let rec = record();
    let line = serde_json::to_string(&rec).unwrap();
    assert!(line.contains("\"card\":5"));
    let back: GameRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(back, rec);
}
