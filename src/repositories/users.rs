use crate::api::error::AppError;
use crate::entities::{prelude::*, users};
use sea_orm::sea_query::{BinOper, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use super::page::{Page, PageRequest, fetch_page};
use crate::entities::users::UserRole;

pub struct UserRepository;

impl UserRepository {
    fn sort_column(field: &str) -> Result<users::Column, AppError> {
        match field {
            "id" => Ok(users::Column::Id),
            "username" => Ok(users::Column::Username),
            "email" => Ok(users::Column::Email),
            "full_name" => Ok(users::Column::FullName),
            "role" => Ok(users::Column::Role),
            "is_active" => Ok(users::Column::IsActive),
            "created_at" => Ok(users::Column::CreatedAt),
            "updated_at" => Ok(users::Column::UpdatedAt),
            other => Err(AppError::InvalidSortField(other.to_string())),
        }
    }

    // Case-insensitive substring match over username, email and full name.
    fn keyword_condition(backend: DbBackend, keyword: &str) -> Condition {
        if backend == DbBackend::Postgres {
            let pattern = format!("%{}%", keyword);
            Condition::any()
                .add(
                    Expr::col(users::Column::Username)
                        .binary(BinOper::Custom("ILIKE"), Expr::val(pattern.as_str())),
                )
                .add(
                    Expr::col(users::Column::Email)
                        .binary(BinOper::Custom("ILIKE"), Expr::val(pattern.as_str())),
                )
                .add(
                    Expr::col(users::Column::FullName)
                        .binary(BinOper::Custom("ILIKE"), Expr::val(pattern.as_str())),
                )
        } else {
            let pattern = format!("%{}%", keyword.to_lowercase());
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(users::Column::Username))).like(pattern.as_str()))
                .add(Expr::expr(Func::lower(Expr::col(users::Column::Email))).like(pattern.as_str()))
                .add(Expr::expr(Func::lower(Expr::col(users::Column::FullName))).like(pattern.as_str()))
        }
    }

    pub async fn find_active<C: ConnectionTrait>(db: &C) -> Result<Vec<users::Model>, AppError> {
        Ok(Users::find()
            .filter(users::Column::IsActive.eq(true))
            .all(db)
            .await?)
    }

    pub async fn find_active_paged<C: ConnectionTrait>(
        db: &C,
        req: &PageRequest,
    ) -> Result<Page<users::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Users::find()
            .filter(users::Column::IsActive.eq(true))
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn search_active<C: ConnectionTrait>(
        db: &C,
        keyword: &str,
        req: &PageRequest,
    ) -> Result<Page<users::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Users::find()
            .filter(
                Condition::all()
                    .add(users::Column::IsActive.eq(true))
                    .add(Self::keyword_condition(db.get_database_backend(), keyword)),
            )
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<users::Model>, AppError> {
        Ok(Users::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<Option<users::Model>, AppError> {
        Ok(Users::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?)
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<users::Model>, AppError> {
        Ok(Users::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?)
    }

    pub async fn find_by_role<C: ConnectionTrait>(
        db: &C,
        role: UserRole,
    ) -> Result<Vec<users::Model>, AppError> {
        Ok(Users::find()
            .filter(users::Column::Role.eq(role))
            .filter(users::Column::IsActive.eq(true))
            .all(db)
            .await?)
    }

    pub async fn find_by_role_paged<C: ConnectionTrait>(
        db: &C,
        role: UserRole,
        req: &PageRequest,
    ) -> Result<Page<users::Model>, AppError> {
        let column = Self::sort_column(&req.sort_by)?;
        let select = Users::find()
            .filter(users::Column::Role.eq(role))
            .filter(users::Column::IsActive.eq(true))
            .order_by(column, req.sort_dir.into_order());
        fetch_page(db, select, req).await
    }

    pub async fn exists_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<bool, AppError> {
        let count = Users::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(users::Column::Username)))
                    .eq(username.to_lowercase()),
            )
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn exists_by_username_excluding<C: ConnectionTrait>(
        db: &C,
        username: &str,
        id: i64,
    ) -> Result<bool, AppError> {
        let count = Users::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(users::Column::Username)))
                    .eq(username.to_lowercase()),
            )
            .filter(users::Column::Id.ne(id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn exists_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, AppError> {
        let count = Users::find()
            .filter(Expr::expr(Func::lower(Expr::col(users::Column::Email))).eq(email.to_lowercase()))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn exists_by_email_excluding<C: ConnectionTrait>(
        db: &C,
        email: &str,
        id: i64,
    ) -> Result<bool, AppError> {
        let count = Users::find()
            .filter(Expr::expr(Func::lower(Expr::col(users::Column::Email))).eq(email.to_lowercase()))
            .filter(users::Column::Id.ne(id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn count_active<C: ConnectionTrait>(db: &C) -> Result<u64, AppError> {
        Ok(Users::find()
            .filter(users::Column::IsActive.eq(true))
            .count(db)
            .await?)
    }

    pub async fn count_by_role<C: ConnectionTrait>(db: &C, role: UserRole) -> Result<u64, AppError> {
        Ok(Users::find()
            .filter(users::Column::Role.eq(role))
            .filter(users::Column::IsActive.eq(true))
            .count(db)
            .await?)
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        model: users::ActiveModel,
    ) -> Result<users::Model, AppError> {
        Ok(model.insert(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        model: users::ActiveModel,
    ) -> Result<users::Model, AppError> {
        Ok(model.update(db).await?)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, model: users::Model) -> Result<(), AppError> {
        model.delete(db).await?;
        Ok(())
    }
}
