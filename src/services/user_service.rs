use crate::api::error::AppError;
use crate::entities::users::{self, UserRole};
use crate::repositories::page::{Page, PageRequest};
use crate::repositories::{UserRepository, VideoRepository};
use crate::utils::password;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

pub struct UserService;

impl UserService {
    pub async fn get_all_active(db: &DatabaseConnection) -> Result<Vec<users::Model>, AppError> {
        UserRepository::find_active(db).await
    }

    pub async fn get_all_active_paged(
        db: &DatabaseConnection,
        req: &PageRequest,
    ) -> Result<Page<users::Model>, AppError> {
        UserRepository::find_active_paged(db, req).await
    }

    pub async fn search(
        db: &DatabaseConnection,
        keyword: &str,
        req: &PageRequest,
    ) -> Result<Page<users::Model>, AppError> {
        UserRepository::search_active(db, keyword, req).await
    }

    pub async fn get_by_role(
        db: &DatabaseConnection,
        role: UserRole,
    ) -> Result<Vec<users::Model>, AppError> {
        UserRepository::find_by_role(db, role).await
    }

    pub async fn get_by_role_paged(
        db: &DatabaseConnection,
        role: UserRole,
        req: &PageRequest,
    ) -> Result<Page<users::Model>, AppError> {
        UserRepository::find_by_role_paged(db, role, req).await
    }

    pub async fn get_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<users::Model>, AppError> {
        UserRepository::find_by_id(db, id).await
    }

    pub async fn get_active_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<users::Model>, AppError> {
        Ok(UserRepository::find_by_id(db, id)
            .await?
            .filter(|user| user.is_active))
    }

    pub async fn get_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<users::Model>, AppError> {
        UserRepository::find_by_username(db, username).await
    }

    pub async fn get_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<users::Model>, AppError> {
        UserRepository::find_by_email(db, email).await
    }

    pub async fn create(
        db: &DatabaseConnection,
        username: String,
        email: String,
        full_name: String,
        plaintext_password: &str,
        role: UserRole,
    ) -> Result<users::Model, AppError> {
        if UserRepository::exists_by_username(db, &username).await? {
            return Err(AppError::DuplicateUsername(username));
        }
        if UserRepository::exists_by_email(db, &email).await? {
            return Err(AppError::DuplicateEmail(email));
        }

        let password_hash = password::hash(plaintext_password)?;

        let now = Utc::now();
        let user = users::ActiveModel {
            username: Set(username),
            email: Set(email),
            full_name: Set(full_name),
            password_hash: Set(password_hash),
            role: Set(role),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        UserRepository::insert(db, user).await
    }

    /// A `None` or empty password keeps the stored hash untouched.
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        username: String,
        email: String,
        full_name: String,
        plaintext_password: Option<String>,
        role: UserRole,
        is_active: bool,
    ) -> Result<users::Model, AppError> {
        let existing = UserRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        if UserRepository::exists_by_username_excluding(db, &username, id).await? {
            return Err(AppError::DuplicateUsername(username));
        }
        if UserRepository::exists_by_email_excluding(db, &email, id).await? {
            return Err(AppError::DuplicateEmail(email));
        }

        let mut user: users::ActiveModel = existing.into();
        user.username = Set(username);
        user.email = Set(email);
        user.full_name = Set(full_name);
        user.role = Set(role);
        user.is_active = Set(is_active);
        user.updated_at = Set(Utc::now());

        if let Some(plaintext) = plaintext_password
            && !plaintext.is_empty()
        {
            user.password_hash = Set(password::hash(&plaintext)?);
        }

        UserRepository::update(db, user).await
    }

    pub async fn deactivate(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        Self::set_active(db, id, false).await
    }

    pub async fn activate(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        Self::set_active(db, id, true).await
    }

    async fn set_active(db: &DatabaseConnection, id: i64, target: bool) -> Result<(), AppError> {
        let existing = UserRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        if existing.is_active == target {
            return Ok(());
        }

        let mut user: users::ActiveModel = existing.into();
        user.is_active = Set(target);
        user.updated_at = Set(Utc::now());
        UserRepository::update(db, user).await?;
        Ok(())
    }

    /// Permanent removal, cascading to the user's videos.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        let user = UserRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        let txn = db.begin().await?;
        let removed = VideoRepository::delete_by_user(&txn, id).await?;
        UserRepository::delete(&txn, user).await?;
        txn.commit().await?;

        if removed > 0 {
            tracing::info!("🗑️ Removed {} videos while deleting user {}", removed, id);
        }
        Ok(())
    }

    pub async fn count_active(db: &DatabaseConnection) -> Result<u64, AppError> {
        UserRepository::count_active(db).await
    }

    pub async fn count_by_role(db: &DatabaseConnection, role: UserRole) -> Result<u64, AppError> {
        UserRepository::count_by_role(db, role).await
    }

    pub async fn exists_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<bool, AppError> {
        UserRepository::exists_by_username(db, username).await
    }

    pub async fn exists_by_email(db: &DatabaseConnection, email: &str) -> Result<bool, AppError> {
        UserRepository::exists_by_email(db, email).await
    }
}
