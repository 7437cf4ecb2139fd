use super::{InMemoryProductionLog, ProductionLogRepository, SqliteProductionLog};
use crate::domain::production::{EventFilter, ProductionEvent, StagedEntry};
use crate::domain::types::{AreaId, ModelId, Period};
use crate::repository::error::RepositoryError;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = crate::db::open_in_memory_connection().unwrap();
    crate::db::ensure_schema(&conn).unwrap();
    Arc::new(Mutex::new(conn))
}

fn repos() -> Vec<(&'static str, Box<dyn ProductionLogRepository>)> {
    vec![
        ("memory", Box::new(InMemoryProductionLog::new()) as Box<dyn ProductionLogRepository>),
        ("sqlite", Box::new(SqliteProductionLog::new(setup_test_db())) as Box<dyn ProductionLogRepository>),
    ]
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, day)
        .unwrap()
        .and_hms_opt(hour, 30, 0)
        .unwrap()
}

fn event(area: &str, model: &str, qty: u32, ts: NaiveDateTime) -> ProductionEvent {
    ProductionEvent::from_staged(
        &AreaId::from(area),
        &StagedEntry::new("Ravi", "Chest Freezer", model, qty),
        ts,
    )
}

#[test]
fn test_append_and_query_in_insertion_order() {
    for (name, repo) in repos() {
        let batch = vec![
            event("Pre-Assembly", "CF-Model-200", 2, at(3, 9)),
            event("Pre-Assembly", "CF-Model-100", 5, at(3, 8)),
        ];
        assert_eq!(repo.append_batch(&batch).unwrap(), 2, "{}", name);
        repo.append(&event("CF Final Line", "CF-Model-100", 4, at(3, 10)))
            .unwrap();

        let all = repo.query(&EventFilter::default()).unwrap();
        assert_eq!(all.len(), 3, "{}", name);
        assert_eq!(all[0].model, ModelId::from("CF-Model-200"), "{}", name);
        assert_eq!(all[1].model, ModelId::from("CF-Model-100"), "{}", name);
        assert_eq!(all[0], batch[0], "{}", name);
        assert_eq!(repo.count().unwrap(), 3, "{}", name);
    }
}

#[test]
fn test_invalid_event_rejects_whole_batch() {
    for (name, repo) in repos() {
        let mut bad = event("Pre-Assembly", "CF-Model-100", 1, at(3, 8));
        bad.supervisor = " ".to_string();
        let batch = vec![event("Pre-Assembly", "CF-Model-100", 5, at(3, 8)), bad];

        let err = repo.append_batch(&batch).unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError(_)), "{}", name);
        assert_eq!(repo.count().unwrap(), 0, "{}", name);
    }
}

#[test]
fn test_query_by_day_area_and_month() {
    for (name, repo) in repos() {
        repo.append_batch(&[
            event("Pre-Assembly", "CF-Model-100", 5, at(3, 8)),
            event("CF Final Line", "CF-Model-100", 4, at(3, 9)),
            event("CF Final Line", "CF-Model-100", 7, at(4, 9)),
        ])
        .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let on_day = repo.query(&EventFilter::on_day(day)).unwrap();
        assert_eq!(on_day.len(), 2, "{}", name);

        let final_line = AreaId::from("CF Final Line");
        let filtered = repo
            .query(&EventFilter::on_day(day).with_area(Some(&final_line)))
            .unwrap();
        assert_eq!(filtered.len(), 1, "{}", name);
        assert_eq!(filtered[0].quantity, 4, "{}", name);

        let month = repo
            .query(&EventFilter::in_month(Period::new(2025, 11).unwrap()))
            .unwrap();
        assert_eq!(month.len(), 3, "{}", name);
        let dec = repo
            .query(&EventFilter::in_month(Period::new(2025, 12).unwrap()))
            .unwrap();
        assert!(dec.is_empty(), "{}", name);
    }
}

#[test]
fn test_sqlite_round_trips_minute_timestamp() {
    let repo = SqliteProductionLog::new(setup_test_db());
    let e = event("Door Foaming", "CF-Model-200", 3, at(30, 23));
    repo.append(&e).unwrap();

    let stored = repo.query(&EventFilter::default()).unwrap();
    assert_eq!(stored[0].recorded_at_text(), "2025-11-30 23:30");
    assert_eq!(stored[0].event_id, e.event_id);
}
