use crate::api::error::AppError;
use crate::entities::{categories, prelude::*};
use sea_orm::sea_query::{BinOper, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use super::page::{Page, PageRequest, fetch_page};

pub struct CategoryRepository;

impl CategoryRepository {
    fn sort_column(field: &str) -> Result<categories::Column, AppError> {
        match field {
            "id" => Ok(categories::Column::Id),
            "name" => Ok(categories::Column::Name),
            "description" => Ok(categories::Column::Description),
            "is_active" => Ok(categories::Column::IsActive),
            "created_at" => Ok(categories::Column::CreatedAt),
            "updated_at" => Ok(categories::Column::UpdatedAt),
            other => Err(AppError::InvalidSortField(other.to_string())),
        }
    }

    // Case-insensitive substring match over name and description.
    // Postgres: ILIKE, SQLite: LOWER LIKE
    fn keyword_condition(backend: DbBackend, keyword: &str) -> Condition {
        if backend == DbBackend::Postgres {
            let pattern = format!("%{}%", keyword);
            Condition::any()
                .add(
                    Expr::col(categories::Column::Name)
                        .binary(BinOper::Custom("ILIKE"), Expr::val(pattern.as_str())),
                )
                .add(
                    Expr::col(categories::Column::Description)
                        .binary(BinOper::Custom("ILIKE"), Expr::val(pattern.as_str())),
                )
        } else {
            let pattern = format!("%{}%", keyword.to_lowercase());
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(categories::Column::Name)))
                        .like(pattern.as_str()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(categories::Column::Description)))
                        .like(pattern.as_str()),
                )
        }
    }

    pub async fn find_active<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<categories::Model>, AppError> {
        Ok(Categories::find()
            .filter(categories::Column::IsActive.eq(true))
            .all(db)
            .await?)
    }

    pub async fn find_active_paged<C: ConnectionTrait>(
        db: &C,
        req: &PageRequest,
    ) -> Result<Page<categories::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Categories::find()
            .filter(categories::Column::IsActive.eq(true))
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn search_active<C: ConnectionTrait>(
        db: &C,
        keyword: &str,
        req: &PageRequest,
    ) -> Result<Page<categories::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Categories::find()
            .filter(
                Condition::all()
                    .add(categories::Column::IsActive.eq(true))
                    .add(Self::keyword_condition(db.get_database_backend(), keyword)),
            )
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<categories::Model>, AppError> {
        Ok(Categories::find_by_id(id).one(db).await?)
    }

    pub async fn exists_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, AppError> {
        let count = Categories::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(categories::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn exists_by_name_excluding<C: ConnectionTrait>(
        db: &C,
        name: &str,
        id: i64,
    ) -> Result<bool, AppError> {
        let count = Categories::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(categories::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .filter(categories::Column::Id.ne(id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn count_active<C: ConnectionTrait>(db: &C) -> Result<u64, AppError> {
        Ok(Categories::find()
            .filter(categories::Column::IsActive.eq(true))
            .count(db)
            .await?)
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        model: categories::ActiveModel,
    ) -> Result<categories::Model, AppError> {
        Ok(model.insert(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        model: categories::ActiveModel,
    ) -> Result<categories::Model, AppError> {
        Ok(model.update(db).await?)
    }

    pub async fn delete<C: ConnectionTrait>(
        db: &C,
        model: categories::Model,
    ) -> Result<(), AppError> {
        model.delete(db).await?;
        Ok(())
    }
}
