use crate::config::AppConfig;
use crate::entities::prelude::Users;
use crate::entities::users::UserRole;
use crate::services::UserService;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tracing::{info, warn};

/// Creates the initial admin account when the users table is empty so a
/// fresh deployment is reachable. Credentials come from ADMIN_* env vars.
pub async fn seed_initial_data(db: &DatabaseConnection, config: &AppConfig) -> anyhow::Result<()> {
    if !config.seed_admin {
        return Ok(());
    }

    if Users::find().count(db).await? > 0 {
        return Ok(());
    }

    info!("🌱 Seeding initial admin account '{}'...", config.admin_username);

    match UserService::create(
        db,
        config.admin_username.clone(),
        config.admin_email.clone(),
        "Administrator".to_string(),
        &config.admin_password,
        UserRole::Admin,
    )
    .await
    {
        Ok(admin) => info!("✅ Admin account created (id {})", admin.id),
        // A concurrent instance may have seeded first; not fatal
        Err(e) => warn!("⚠️ Admin seed skipped: {}", e),
    }

    Ok(())
}
