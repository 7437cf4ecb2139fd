use super::RegistryRepository;
use crate::domain::registry::{Category, ProductModel};
use crate::domain::types::ModelId;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct RegistryTables {
    models: Vec<ProductModel>,
    categories: Vec<Category>,
}

// ==========================================
// InMemoryRegistryRepository - 内存注册表
// ==========================================
#[derive(Debug, Default)]
pub struct InMemoryRegistryRepository {
    tables: Mutex<RegistryTables>,
}

impl InMemoryRegistryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, RegistryTables>> {
        self.tables
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl RegistryRepository for InMemoryRegistryRepository {
    fn insert_model(&self, model: &ProductModel) -> RepositoryResult<()> {
        let mut tables = self.lock()?;
        if tables.models.iter().any(|m| m.model_id == model.model_id) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "product_model.model_id={}",
                model.model_id
            )));
        }
        tables.models.push(model.clone());
        Ok(())
    }

    fn set_model_active(&self, model_id: &ModelId, active: bool) -> RepositoryResult<()> {
        let mut tables = self.lock()?;
        let model = tables
            .models
            .iter_mut()
            .find(|m| &m.model_id == model_id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "ProductModel".to_string(),
                id: model_id.to_string(),
            })?;
        model.active = active;
        Ok(())
    }

    fn list_models(&self) -> RepositoryResult<Vec<ProductModel>> {
        Ok(self.lock()?.models.clone())
    }

    fn insert_category(&self, category: &Category) -> RepositoryResult<()> {
        let mut tables = self.lock()?;
        if !tables.categories.contains(category) {
            tables.categories.push(category.clone());
        }
        Ok(())
    }

    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.lock()?.categories.clone())
    }
}
