use super::RegistryRepository;
use crate::domain::registry::{Category, ProductModel};
use crate::domain::types::{ModelId, ProductLine};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// SqliteRegistryRepository - SQLite 注册表
// ==========================================
// 表: product_model / product_category
pub struct SqliteRegistryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRegistryRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn parse_line(idx: usize, raw: String) -> SqliteResult<ProductLine> {
        raw.parse::<ProductLine>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                e.into(),
            )
        })
    }
}

impl RegistryRepository for SqliteRegistryRepository {
    fn insert_model(&self, model: &ProductModel) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO product_model (model_id, line, active) VALUES (?1, ?2, ?3)",
            params![
                model.model_id.as_str(),
                model.line.to_db_str(),
                model.active as i32
            ],
        )?;
        Ok(())
    }

    fn set_model_active(&self, model_id: &ModelId, active: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE product_model SET active = ?1 WHERE model_id = ?2",
            params![active as i32, model_id.as_str()],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ProductModel".to_string(),
                id: model_id.to_string(),
            });
        }
        Ok(())
    }

    fn list_models(&self) -> RepositoryResult<Vec<ProductModel>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT model_id, line, active FROM product_model ORDER BY seq")?;
        let models = stmt
            .query_map([], |row| {
                Ok(ProductModel {
                    model_id: ModelId::new(row.get::<_, String>(0)?),
                    line: Self::parse_line(1, row.get(1)?)?,
                    active: row.get::<_, i32>(2)? != 0,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(models)
    }

    fn insert_category(&self, category: &Category) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO product_category (name, line) VALUES (?1, ?2)",
            params![category.name, category.line.to_db_str()],
        )?;
        Ok(())
    }

    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT name, line FROM product_category ORDER BY seq")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    name: row.get(0)?,
                    line: Self::parse_line(1, row.get(1)?)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(categories)
    }
}
