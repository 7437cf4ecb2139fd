use super::{validate_batch, ProductionLogRepository};
use crate::domain::production::{EventFilter, ProductionEvent};
use crate::domain::types::{AreaId, ModelId, ENTRY_TS_FORMAT};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// SqliteProductionLog - SQLite 生产记录
// ==========================================
// 表: production_event (seq 自增保证追加顺序)
pub struct SqliteProductionLog {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProductionLog {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<ProductionEvent> {
        let recorded_at: String = row.get(1)?;
        let recorded_at = NaiveDateTime::parse_from_str(&recorded_at, ENTRY_TS_FORMAT)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(ProductionEvent {
            event_id: row.get(0)?,
            recorded_at,
            area: AreaId::new(row.get::<_, String>(2)?),
            supervisor: row.get(3)?,
            category: row.get(4)?,
            model: ModelId::new(row.get::<_, String>(5)?),
            quantity: row.get(6)?,
        })
    }
}

impl ProductionLogRepository for SqliteProductionLog {
    fn append_batch(&self, events: &[ProductionEvent]) -> RepositoryResult<usize> {
        validate_batch(events)?;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        for event in events {
            tx.execute(
                r#"
                INSERT INTO production_event (
                    event_id, recorded_at, report_date, area,
                    supervisor, category, model, quantity
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    event.event_id,
                    event.recorded_at_text(),
                    event.report_date().format(DATE_FORMAT).to_string(),
                    event.area.as_str(),
                    event.supervisor,
                    event.category,
                    event.model.as_str(),
                    event.quantity,
                ],
            )?;
        }

        tx.commit()?;
        Ok(events.len())
    }

    fn query(&self, filter: &EventFilter) -> RepositoryResult<Vec<ProductionEvent>> {
        let conn = self.get_conn()?;

        // 日期范围下推到 SQL, 其余条件统一由 EventFilter::matches 判定
        let events = match filter.dates {
            Some(scope) => {
                let (from, to) = scope.bounds();
                let mut stmt = conn.prepare(
                    r#"
                    SELECT event_id, recorded_at, area, supervisor, category, model, quantity
                    FROM production_event
                    WHERE report_date BETWEEN ?1 AND ?2
                    ORDER BY seq
                    "#,
                )?;
                let rows = stmt
                    .query_map(
                        params![
                            from.format(DATE_FORMAT).to_string(),
                            to.format(DATE_FORMAT).to_string()
                        ],
                        Self::map_row,
                    )?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT event_id, recorded_at, area, supervisor, category, model, quantity
                    FROM production_event
                    ORDER BY seq
                    "#,
                )?;
                let rows = stmt
                    .query_map([], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
        };

        Ok(events.into_iter().filter(|e| filter.matches(e)).collect())
    }

    fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM production_event", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
