use crate::api::error::AppError;
use crate::entities::{prelude::*, videos};
use chrono::Utc;
use sea_orm::sea_query::{BinOper, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use super::page::{Page, PageRequest, fetch_page, fetch_page_at};

pub struct VideoRepository;

impl VideoRepository {
    fn sort_column(field: &str) -> Result<videos::Column, AppError> {
        match field {
            "id" => Ok(videos::Column::Id),
            "title" => Ok(videos::Column::Title),
            "description" => Ok(videos::Column::Description),
            "url" => Ok(videos::Column::Url),
            "duration" => Ok(videos::Column::Duration),
            "views" => Ok(videos::Column::Views),
            "likes" => Ok(videos::Column::Likes),
            "is_active" => Ok(videos::Column::IsActive),
            "category_id" => Ok(videos::Column::CategoryId),
            "user_id" => Ok(videos::Column::UserId),
            "created_at" => Ok(videos::Column::CreatedAt),
            "updated_at" => Ok(videos::Column::UpdatedAt),
            other => Err(AppError::InvalidSortField(other.to_string())),
        }
    }

    // Case-insensitive substring match over title and description.
    fn keyword_condition(backend: DbBackend, keyword: &str) -> Condition {
        if backend == DbBackend::Postgres {
            let pattern = format!("%{}%", keyword);
            Condition::any()
                .add(
                    Expr::col(videos::Column::Title)
                        .binary(BinOper::Custom("ILIKE"), Expr::val(pattern.as_str())),
                )
                .add(
                    Expr::col(videos::Column::Description)
                        .binary(BinOper::Custom("ILIKE"), Expr::val(pattern.as_str())),
                )
        } else {
            let pattern = format!("%{}%", keyword.to_lowercase());
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(videos::Column::Title))).like(pattern.as_str()))
                .add(
                    Expr::expr(Func::lower(Expr::col(videos::Column::Description)))
                        .like(pattern.as_str()),
                )
        }
    }

    fn active_filter(extra: Option<Condition>) -> Condition {
        let mut cond = Condition::all().add(videos::Column::IsActive.eq(true));
        if let Some(extra) = extra {
            cond = cond.add(extra);
        }
        cond
    }

    pub async fn find_active<C: ConnectionTrait>(db: &C) -> Result<Vec<videos::Model>, AppError> {
        Ok(Videos::find()
            .filter(videos::Column::IsActive.eq(true))
            .all(db)
            .await?)
    }

    pub async fn find_active_paged<C: ConnectionTrait>(
        db: &C,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Videos::find()
            .filter(videos::Column::IsActive.eq(true))
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn search_active<C: ConnectionTrait>(
        db: &C,
        keyword: &str,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Videos::find()
            .filter(Self::active_filter(Some(Self::keyword_condition(
                db.get_database_backend(),
                keyword,
            ))))
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<videos::Model>, AppError> {
        Ok(Videos::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_category<C: ConnectionTrait>(
        db: &C,
        category_id: i64,
    ) -> Result<Vec<videos::Model>, AppError> {
        Ok(Videos::find()
            .filter(videos::Column::CategoryId.eq(category_id))
            .filter(videos::Column::IsActive.eq(true))
            .all(db)
            .await?)
    }

    pub async fn find_by_category_paged<C: ConnectionTrait>(
        db: &C,
        category_id: i64,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Videos::find()
            .filter(videos::Column::CategoryId.eq(category_id))
            .filter(videos::Column::IsActive.eq(true))
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn find_by_user<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Vec<videos::Model>, AppError> {
        Ok(Videos::find()
            .filter(videos::Column::UserId.eq(user_id))
            .filter(videos::Column::IsActive.eq(true))
            .all(db)
            .await?)
    }

    pub async fn find_by_user_paged<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Videos::find()
            .filter(videos::Column::UserId.eq(user_id))
            .filter(videos::Column::IsActive.eq(true))
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn find_by_category_and_user<C: ConnectionTrait>(
        db: &C,
        category_id: i64,
        user_id: i64,
    ) -> Result<Vec<videos::Model>, AppError> {
        Ok(Videos::find()
            .filter(videos::Column::CategoryId.eq(category_id))
            .filter(videos::Column::UserId.eq(user_id))
            .filter(videos::Column::IsActive.eq(true))
            .all(db)
            .await?)
    }

    pub async fn find_by_category_and_user_paged<C: ConnectionTrait>(
        db: &C,
        category_id: i64,
        user_id: i64,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Videos::find()
            .filter(videos::Column::CategoryId.eq(category_id))
            .filter(videos::Column::UserId.eq(user_id))
            .filter(videos::Column::IsActive.eq(true))
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn find_most_viewed<C: ConnectionTrait>(
        db: &C,
        page: u64,
        size: u64,
    ) -> Result<Page<videos::Model>, AppError> {
        let select = Videos::find()
            .filter(videos::Column::IsActive.eq(true))
            .order_by_desc(videos::Column::Views);
        fetch_page_at(db, select, page, size).await
    }

    pub async fn find_most_liked<C: ConnectionTrait>(
        db: &C,
        page: u64,
        size: u64,
    ) -> Result<Page<videos::Model>, AppError> {
        let select = Videos::find()
            .filter(videos::Column::IsActive.eq(true))
            .order_by_desc(videos::Column::Likes);
        fetch_page_at(db, select, page, size).await
    }

    pub async fn find_recent<C: ConnectionTrait>(
        db: &C,
        page: u64,
        size: u64,
    ) -> Result<Page<videos::Model>, AppError> {
        let select = Videos::find()
            .filter(videos::Column::IsActive.eq(true))
            .order_by_desc(videos::Column::CreatedAt);
        fetch_page_at(db, select, page, size).await
    }

    pub async fn count_active<C: ConnectionTrait>(db: &C) -> Result<u64, AppError> {
        Ok(Videos::find()
            .filter(videos::Column::IsActive.eq(true))
            .count(db)
            .await?)
    }

    pub async fn count_by_category<C: ConnectionTrait>(
        db: &C,
        category_id: i64,
    ) -> Result<u64, AppError> {
        Ok(Videos::find()
            .filter(videos::Column::CategoryId.eq(category_id))
            .filter(videos::Column::IsActive.eq(true))
            .count(db)
            .await?)
    }

    pub async fn count_by_user<C: ConnectionTrait>(db: &C, user_id: i64) -> Result<u64, AppError> {
        Ok(Videos::find()
            .filter(videos::Column::UserId.eq(user_id))
            .filter(videos::Column::IsActive.eq(true))
            .count(db)
            .await?)
    }

    /// Single-statement `views = views + 1`. Returns the affected row count
    /// so the caller can distinguish a missing id.
    pub async fn increment_views<C: ConnectionTrait>(db: &C, id: i64) -> Result<u64, AppError> {
        let result = Videos::update_many()
            .col_expr(
                videos::Column::Views,
                Expr::col(videos::Column::Views).add(1),
            )
            .col_expr(videos::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(videos::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn increment_likes<C: ConnectionTrait>(db: &C, id: i64) -> Result<u64, AppError> {
        let result = Videos::update_many()
            .col_expr(
                videos::Column::Likes,
                Expr::col(videos::Column::Likes).add(1),
            )
            .col_expr(videos::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(videos::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_category<C: ConnectionTrait>(
        db: &C,
        category_id: i64,
    ) -> Result<u64, AppError> {
        let result = Videos::delete_many()
            .filter(videos::Column::CategoryId.eq(category_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_user<C: ConnectionTrait>(db: &C, user_id: i64) -> Result<u64, AppError> {
        let result = Videos::delete_many()
            .filter(videos::Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        model: videos::ActiveModel,
    ) -> Result<videos::Model, AppError> {
        Ok(model.insert(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        model: videos::ActiveModel,
    ) -> Result<videos::Model, AppError> {
        Ok(model.update(db).await?)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, model: videos::Model) -> Result<(), AppError> {
        model.delete(db).await?;
        Ok(())
    }
}
