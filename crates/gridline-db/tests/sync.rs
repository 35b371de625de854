//! Decode-then-synchronize behavior against in-memory stores.

mod common;

use std::sync::Arc;

use arrow_array::{Float64Array, Int32Array, StringArray};
use common::{games_file, parquet_file, roster_file, weekly_file, FailingStore};
use gridline_connectors::{decode_roster, decode_schedules, decode_weekly_stats};
use gridline_core::{EntityKind, KeyValue, NaturalKey, RosterEntry};
use gridline_db::SyncEngine;
use gridline_storage::{DocumentFilter, DocumentStore, MemoryStore};
use serde_json::json;

fn roster_2024() -> Vec<RosterEntry> {
    let bytes = roster_file(&[
        (Some("00-0033873"), "Patrick Mahomes", "KC", "QB"),
        (Some("00-0036212"), "Travis Kelce", "KC", "TE"),
        (None, "Practice Squad Signing", "KC", "WR"),
        (Some("00-0038120"), "Xavier Worthy", "KC", "WR"),
    ]);
    decode_roster(bytes, 2024).unwrap()
}

#[test]
fn test_roster_scenario() {
    let roster = roster_2024();
    assert_eq!(roster.len(), 4);
    assert_eq!(roster.iter().filter(|r| r.player_id.is_empty()).count(), 1);
    assert!(roster.iter().all(|r| r.season == 2024));

    let store = MemoryStore::new();
    let engine = SyncEngine::new(&store);

    let first = engine.sync(&roster);
    assert_eq!((first.applied, first.skipped, first.failed), (3, 1, 0));
    let count_after_first = store.count("players", &DocumentFilter::all()).unwrap();
    assert_eq!(count_after_first, 3);

    let second = engine.sync(&roster);
    assert_eq!((second.applied, second.skipped, second.failed), (3, 1, 0));
    assert_eq!(second.replaced, 3);
    assert_eq!(
        store.count("players", &DocumentFilter::all()).unwrap(),
        count_after_first
    );
}

#[test]
fn test_sync_twice_equals_sync_once() {
    let games = decode_schedules(games_file(&[
        ("2024_01_BAL_KC", 2024, 1, Some(27)),
        ("2024_02_CIN_KC", 2024, 2, None),
        ("2024_01_BAL_KC", 2024, 1, Some(27)),
    ]))
    .unwrap();

    let once = MemoryStore::new();
    SyncEngine::new(&once).sync(&games);

    let twice = MemoryStore::new();
    SyncEngine::new(&twice).sync(&games);
    SyncEngine::new(&twice).sync(&games);

    assert_eq!(once.documents("games"), twice.documents("games"));
    assert_eq!(twice.count("games", &DocumentFilter::all()).unwrap(), 2);
}

#[test]
fn test_weekly_update_replaces_single_entity() {
    let store = MemoryStore::new();
    let engine = SyncEngine::new(&store);

    let first = decode_weekly_stats(
        weekly_file(&[("P1", 1, 54.0), ("P1", 2, 71.0), ("P1", 3, 12.0)]),
        2023,
    )
    .unwrap();
    engine.sync(&first);

    let second = decode_weekly_stats(
        weekly_file(&[("P1", 1, 54.0), ("P1", 2, 71.0), ("P1", 3, 103.0)]),
        2023,
    )
    .unwrap();
    let report = engine.sync(&second);
    assert_eq!(report.replaced, 3);

    let week3 = DocumentFilter::all()
        .where_eq("player_id", "P1")
        .where_eq("season", 2023)
        .where_eq("week", 3);
    assert_eq!(store.count("player_weekly_stats", &week3).unwrap(), 1);
    assert_eq!(
        store.count("player_weekly_stats", &DocumentFilter::all()).unwrap(),
        3
    );

    let key = NaturalKey::new(vec![
        ("player_id", KeyValue::from("P1")),
        ("season", KeyValue::Int(2023)),
        ("week", KeyValue::Int(3)),
    ]);
    let stored = store.get("player_weekly_stats", &key).unwrap().unwrap();
    assert_eq!(stored.get("receiving_yards"), Some(&json!(103.0)));
    assert_eq!(stored.get("season_type"), Some(&json!("REG")));
}

#[test]
fn test_weekly_rows_without_week_are_skipped() {
    let bytes = parquet_file(vec![
        ("player_id", Arc::new(StringArray::from(vec!["P1", "P1", "P1"]))),
        ("player_name", Arc::new(StringArray::from(vec!["J.Doe"; 3]))),
        ("week", Arc::new(Int32Array::from(vec![None, None, Some(4)]))),
        ("receiving_yards", Arc::new(Float64Array::from(vec![10.0, 99.0, 41.0]))),
    ]);
    let stats = decode_weekly_stats(bytes, 2023).unwrap();
    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0].week, None);

    let store = MemoryStore::new();
    let report = SyncEngine::new(&store).sync(&stats);
    assert_eq!((report.applied, report.skipped, report.failed), (1, 2, 0));
    assert_eq!(report.inserted, 1);
    assert_eq!(report.replaced, 0);

    let all = store.count("player_weekly_stats", &DocumentFilter::all()).unwrap();
    assert_eq!(all, 1);
    let week0 = DocumentFilter::all().where_eq("week", 0);
    assert_eq!(store.count("player_weekly_stats", &week0).unwrap(), 0);
}

#[test]
fn test_failed_upsert_does_not_abort_batch() {
    let bytes = roster_file(&[
        (Some("P1"), "One", "KC", "QB"),
        (None, "Nobody", "KC", "WR"),
        (Some("P2"), "Two", "KC", "RB"),
        (Some("P3"), "Three", "KC", "WR"),
        (Some("P4"), "Four", "KC", "TE"),
        (Some("P5"), "Five", "KC", "K"),
    ]);
    let roster = decode_roster(bytes, 2024).unwrap();
    let m = roster.len();

    // third upsert call is record index 3 (P3); index 1 is skipped
    let store = FailingStore::new(3);
    let report = SyncEngine::new(&store).sync(&roster);

    assert_eq!(report.attempted, m);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.applied, m - 1 - report.skipped);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 3);
    assert_eq!(
        report.failures[0].key.as_ref().map(ToString::to_string).as_deref(),
        Some("player_id=P3, season=2024")
    );
    assert!(report.failures[0].message.contains("connection reset"));

    let descriptor = EntityKind::Roster.descriptor();
    let players = store.inner().documents(descriptor.collection);
    let ids: Vec<_> = players
        .iter()
        .filter_map(|d| d.get("player_id").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(ids, vec!["P1", "P2", "P4", "P5"]);
}

#[test]
fn test_rerun_after_failure_heals() {
    let roster = roster_2024();
    let store = FailingStore::new(2);

    let first = SyncEngine::new(&store).sync(&roster);
    assert_eq!(first.failed, 1);
    assert_eq!(store.count("players", &DocumentFilter::all()).unwrap(), 2);

    let second = SyncEngine::new(&store).sync(&roster);
    assert!(second.is_clean());
    assert_eq!((second.inserted, second.replaced), (1, 2));
    assert_eq!(store.count("players", &DocumentFilter::all()).unwrap(), 3);
}
