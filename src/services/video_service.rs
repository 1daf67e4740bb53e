use crate::api::error::AppError;
use crate::entities::videos;
use crate::repositories::VideoRepository;
use crate::repositories::page::{Page, PageRequest};
use crate::services::category_service::CategoryService;
use crate::services::user_service::UserService;
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};

pub struct VideoService;

impl VideoService {
    pub async fn get_all_active(db: &DatabaseConnection) -> Result<Vec<videos::Model>, AppError> {
        VideoRepository::find_active(db).await
    }

    pub async fn get_all_active_paged(
        db: &DatabaseConnection,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        VideoRepository::find_active_paged(db, req).await
    }

    pub async fn search(
        db: &DatabaseConnection,
        keyword: &str,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        VideoRepository::search_active(db, keyword, req).await
    }

    pub async fn get_by_category(
        db: &DatabaseConnection,
        category_id: i64,
    ) -> Result<Vec<videos::Model>, AppError> {
        VideoRepository::find_by_category(db, category_id).await
    }

    pub async fn get_by_category_paged(
        db: &DatabaseConnection,
        category_id: i64,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        VideoRepository::find_by_category_paged(db, category_id, req).await
    }

    pub async fn get_by_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<videos::Model>, AppError> {
        VideoRepository::find_by_user(db, user_id).await
    }

    pub async fn get_by_user_paged(
        db: &DatabaseConnection,
        user_id: i64,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        VideoRepository::find_by_user_paged(db, user_id, req).await
    }

    pub async fn get_by_category_and_user(
        db: &DatabaseConnection,
        category_id: i64,
        user_id: i64,
    ) -> Result<Vec<videos::Model>, AppError> {
        VideoRepository::find_by_category_and_user(db, category_id, user_id).await
    }

    pub async fn get_by_category_and_user_paged(
        db: &DatabaseConnection,
        category_id: i64,
        user_id: i64,
        req: &PageRequest,
    ) -> Result<Page<videos::Model>, AppError> {
        VideoRepository::find_by_category_and_user_paged(db, category_id, user_id, req).await
    }

    pub async fn get_most_viewed(
        db: &DatabaseConnection,
        page: u64,
        size: u64,
    ) -> Result<Page<videos::Model>, AppError> {
        VideoRepository::find_most_viewed(db, page, size).await
    }

    pub async fn get_most_liked(
        db: &DatabaseConnection,
        page: u64,
        size: u64,
    ) -> Result<Page<videos::Model>, AppError> {
        VideoRepository::find_most_liked(db, page, size).await
    }

    pub async fn get_recent(
        db: &DatabaseConnection,
        page: u64,
        size: u64,
    ) -> Result<Page<videos::Model>, AppError> {
        VideoRepository::find_recent(db, page, size).await
    }

    pub async fn get_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<videos::Model>, AppError> {
        VideoRepository::find_by_id(db, id).await
    }

    pub async fn get_active_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<videos::Model>, AppError> {
        Ok(VideoRepository::find_by_id(db, id)
            .await?
            .filter(|video| video.is_active))
    }

    pub async fn create(
        db: &DatabaseConnection,
        title: String,
        description: Option<String>,
        url: String,
        duration: Option<i32>,
        category_id: i64,
        user_id: i64,
    ) -> Result<videos::Model, AppError> {
        // Both references are resolved fresh; caller-supplied nested data
        // is never persisted verbatim.
        let category = CategoryService::get_active_by_id(db, category_id)
            .await?
            .ok_or_else(|| {
                AppError::ReferenceInvalid(format!(
                    "Category {} does not exist or is inactive",
                    category_id
                ))
            })?;
        let user = UserService::get_active_by_id(db, user_id).await?.ok_or_else(|| {
            AppError::ReferenceInvalid(format!("User {} does not exist or is inactive", user_id))
        })?;

        let now = Utc::now();
        let video = videos::ActiveModel {
            title: Set(title),
            description: Set(description),
            url: Set(url),
            duration: Set(duration),
            views: Set(0),
            likes: Set(0),
            is_active: Set(true),
            category_id: Set(category.id),
            user_id: Set(user.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        VideoRepository::insert(db, video).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        title: String,
        description: Option<String>,
        url: String,
        duration: Option<i32>,
        category_id: i64,
        user_id: i64,
        is_active: bool,
    ) -> Result<videos::Model, AppError> {
        let existing = VideoRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video with id {} not found", id)))?;

        let category = CategoryService::get_active_by_id(db, category_id)
            .await?
            .ok_or_else(|| {
                AppError::ReferenceInvalid(format!(
                    "Category {} does not exist or is inactive",
                    category_id
                ))
            })?;
        let user = UserService::get_active_by_id(db, user_id).await?.ok_or_else(|| {
            AppError::ReferenceInvalid(format!("User {} does not exist or is inactive", user_id))
        })?;

        let mut video: videos::ActiveModel = existing.into();
        video.title = Set(title);
        video.description = Set(description);
        video.url = Set(url);
        video.duration = Set(duration);
        video.is_active = Set(is_active);
        video.category_id = Set(category.id);
        video.user_id = Set(user.id);
        video.updated_at = Set(Utc::now());

        VideoRepository::update(db, video).await
    }

    pub async fn deactivate(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        Self::set_active(db, id, false).await
    }

    pub async fn activate(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        Self::set_active(db, id, true).await
    }

    async fn set_active(db: &DatabaseConnection, id: i64, target: bool) -> Result<(), AppError> {
        let existing = VideoRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video with id {} not found", id)))?;

        if existing.is_active == target {
            return Ok(());
        }

        let mut video: videos::ActiveModel = existing.into();
        video.is_active = Set(target);
        video.updated_at = Set(Utc::now());
        VideoRepository::update(db, video).await?;
        Ok(())
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        let video = VideoRepository::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video with id {} not found", id)))?;
        VideoRepository::delete(db, video).await
    }

    pub async fn increment_views(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        let affected = VideoRepository::increment_views(db, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Video with id {} not found", id)));
        }
        Ok(())
    }

    pub async fn increment_likes(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        let affected = VideoRepository::increment_likes(db, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Video with id {} not found", id)));
        }
        Ok(())
    }

    pub async fn count_active(db: &DatabaseConnection) -> Result<u64, AppError> {
        VideoRepository::count_active(db).await
    }

    pub async fn count_by_category(
        db: &DatabaseConnection,
        category_id: i64,
    ) -> Result<u64, AppError> {
        VideoRepository::count_by_category(db, category_id).await
    }

    pub async fn count_by_user(db: &DatabaseConnection, user_id: i64) -> Result<u64, AppError> {
        VideoRepository::count_by_user(db, user_id).await
    }
}
