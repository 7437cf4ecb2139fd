use super::PlanRepository;
use crate::domain::plan::PlanGranularity;
use crate::domain::types::{ModelId, Period};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// SqlitePlanRepository - SQLite 计划仓储
// ==========================================
// 表: monthly_plan / daily_plan / plan_default
pub struct SqlitePlanRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePlanRepository {
    /// 创建新的计划仓储 (表结构由 db::ensure_schema 负责)
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn upsert_default(
        tx: &rusqlite::Transaction<'_>,
        model: &ModelId,
        granularity: PlanGranularity,
        qty: u32,
    ) -> RepositoryResult<()> {
        tx.execute(
            r#"
            INSERT INTO plan_default (model, granularity, qty) VALUES (?1, ?2, ?3)
            ON CONFLICT(model, granularity) DO UPDATE SET qty = ?3
            "#,
            params![model.as_str(), granularity.to_db_str(), qty],
        )?;
        Ok(())
    }

    fn list_table(&self, sql: &str, key: String) -> RepositoryResult<BTreeMap<ModelId, u32>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params![key], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })?;

        let mut map = BTreeMap::new();
        for row in rows {
            let (model, qty) = row?;
            map.insert(ModelId::new(model), qty);
        }
        Ok(map)
    }
}

impl PlanRepository for SqlitePlanRepository {
    fn save_monthly(
        &self,
        period: Period,
        entries: &[(ModelId, u32)],
        update_defaults: bool,
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let period_key = period.to_string();
        for (model, qty) in entries {
            tx.execute(
                r#"
                INSERT INTO monthly_plan (period, model, qty) VALUES (?1, ?2, ?3)
                ON CONFLICT(period, model) DO UPDATE SET qty = ?3
                "#,
                params![period_key, model.as_str(), qty],
            )?;
            if update_defaults {
                Self::upsert_default(&tx, model, PlanGranularity::Monthly, *qty)?;
            }
        }

        tx.commit()?;
        Ok(entries.len())
    }

    fn save_daily(
        &self,
        date: NaiveDate,
        entries: &[(ModelId, u32)],
        update_defaults: bool,
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let date_key = date.format(DATE_FORMAT).to_string();
        for (model, qty) in entries {
            tx.execute(
                r#"
                INSERT INTO daily_plan (plan_date, model, qty) VALUES (?1, ?2, ?3)
                ON CONFLICT(plan_date, model) DO UPDATE SET qty = ?3
                "#,
                params![date_key, model.as_str(), qty],
            )?;
            if update_defaults {
                Self::upsert_default(&tx, model, PlanGranularity::Daily, *qty)?;
            }
        }

        tx.commit()?;
        Ok(entries.len())
    }

    fn find_monthly(&self, period: Period, model: &ModelId) -> RepositoryResult<Option<u32>> {
        let conn = self.get_conn()?;
        let qty = conn
            .query_row(
                "SELECT qty FROM monthly_plan WHERE period = ?1 AND model = ?2",
                params![period.to_string(), model.as_str()],
                |row| row.get::<_, u32>(0),
            )
            .optional()?;
        Ok(qty)
    }

    fn find_daily(&self, date: NaiveDate, model: &ModelId) -> RepositoryResult<Option<u32>> {
        let conn = self.get_conn()?;
        let qty = conn
            .query_row(
                "SELECT qty FROM daily_plan WHERE plan_date = ?1 AND model = ?2",
                params![date.format(DATE_FORMAT).to_string(), model.as_str()],
                |row| row.get::<_, u32>(0),
            )
            .optional()?;
        Ok(qty)
    }

    fn find_default(
        &self,
        model: &ModelId,
        granularity: PlanGranularity,
    ) -> RepositoryResult<Option<u32>> {
        let conn = self.get_conn()?;
        let qty = conn
            .query_row(
                "SELECT qty FROM plan_default WHERE model = ?1 AND granularity = ?2",
                params![model.as_str(), granularity.to_db_str()],
                |row| row.get::<_, u32>(0),
            )
            .optional()?;
        Ok(qty)
    }

    fn list_monthly(&self, period: Period) -> RepositoryResult<BTreeMap<ModelId, u32>> {
        self.list_table(
            "SELECT model, qty FROM monthly_plan WHERE period = ?1 ORDER BY model",
            period.to_string(),
        )
    }

    fn list_daily(&self, date: NaiveDate) -> RepositoryResult<BTreeMap<ModelId, u32>> {
        self.list_table(
            "SELECT model, qty FROM daily_plan WHERE plan_date = ?1 ORDER BY model",
            date.format(DATE_FORMAT).to_string(),
        )
    }
}
