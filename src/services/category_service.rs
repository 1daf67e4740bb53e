use crate::api::error::AppError;
use crate::entities::categories;
use crate::repositories::page::{Page, PageRequest};
use crate::repositories::{CategoryRepository, VideoRepository};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

pub struct CategoryService;

impl CategoryService {
    pub async fn get_all_active(db: &DatabaseConnection) -> Result<Vec<categories::Model>, AppError> {
        CategoryRepository::find_active(db).await
    }

    pub async fn get_all_active_paged(
        db: &DatabaseConnection,
        req: &PageRequest,
    ) -> Result<Page<categories::Model>, AppError> {
        CategoryRepository::find_active_paged(db, req).await
    }

    pub async fn search(
        db: &DatabaseConnection,
        keyword: &str,
        req: &PageRequest,
    ) -> Result<Page<categories::Model>, AppError> {
        CategoryRepository::search_active(db, keyword, req).await
    }

    pub async fn get_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<categories::Model>, AppError> {
        CategoryRepository::find_by_id(db, id).await
    }

    /// Inactive records behave as absent here; `get_by_id` is the
    /// active-state-blind accessor used for lifecycle toggles.
    pub async fn get_active_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<categories::Model>, AppError> {
        Ok(CategoryRepository::find_by_id(db, id)
            .await?
            .filter(|category| category.is_active))
    }

    pub async fn create(
        db: &DatabaseConnection,
        name: String,
        description: Option<String>,
    ) -> Result<categories::Model, AppError> {
        // Duplicate probe covers inactive records too
        if CategoryRepository::exists_by_name(db, &name).await? {
            return Err(AppError::DuplicateName(name));
        }

        let now = Utc::now();
        let category = categories::ActiveModel {
            name: Set(name),
            description: Set(description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        CategoryRepository::insert(db, category).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        name: String,
        description: Option<String>,
        is_active: bool,
    ) -> Result<categories::Model, AppError> {
        let existing = CategoryRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        if CategoryRepository::exists_by_name_excluding(db, &name, id).await? {
            return Err(AppError::DuplicateName(name));
        }

        let mut category: categories::ActiveModel = existing.into();
        category.name = Set(name);
        category.description = Set(description);
        category.is_active = Set(is_active);
        category.updated_at = Set(Utc::now());

        CategoryRepository::update(db, category).await
    }

    pub async fn deactivate(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        Self::set_active(db, id, false).await
    }

    pub async fn activate(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        Self::set_active(db, id, true).await
    }

    async fn set_active(db: &DatabaseConnection, id: i64, target: bool) -> Result<(), AppError> {
        let existing = CategoryRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        // Already in the target state: nothing to persist
        if existing.is_active == target {
            return Ok(());
        }

        let mut category: categories::ActiveModel = existing.into();
        category.is_active = Set(target);
        category.updated_at = Set(Utc::now());
        CategoryRepository::update(db, category).await?;
        Ok(())
    }

    /// Permanent removal. Dependent videos go with it, in one transaction.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        let category = CategoryRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        let txn = db.begin().await?;
        let removed = VideoRepository::delete_by_category(&txn, id).await?;
        CategoryRepository::delete(&txn, category).await?;
        txn.commit().await?;

        if removed > 0 {
            tracing::info!("🗑️ Removed {} videos while deleting category {}", removed, id);
        }
        Ok(())
    }

    pub async fn count_active(db: &DatabaseConnection) -> Result<u64, AppError> {
        CategoryRepository::count_active(db).await
    }

    pub async fn exists_by_name(db: &DatabaseConnection, name: &str) -> Result<bool, AppError> {
        CategoryRepository::exists_by_name(db, name).await
    }
}
