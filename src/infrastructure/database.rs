use crate::config::AppConfig;
use crate::entities::{categories, users, videos};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};
use std::env;
use std::time::Duration;
use tracing::info;

pub async fn setup_database(config: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    info!("📂 Database: {}", db_url);

    let mut opt = ConnectOptions::new(&db_url);
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    crate::infrastructure::seed::seed_initial_data(&db, config).await?;

    Ok(db)
}

pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    if db.get_database_backend() == DbBackend::Postgres {
        info!("🔄 Running SQLx migrations for PostgreSQL...");
        let db_url = env::var("DATABASE_URL")?;
        let pool = sqlx::PgPool::connect(&db_url).await?;
        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            info!("⚠️ SQLx migration error: {}. Skipping.", e);
        }
    } else {
        info!("🔄 Running SeaORM auto-migrations for SQLite/Other...");
        let builder = db.get_database_backend();
        let schema = Schema::new(builder);

        let stmts = vec![
            schema
                .create_table_from_entity(categories::Entity)
                .if_not_exists()
                .to_owned(),
            schema
                .create_table_from_entity(users::Entity)
                .if_not_exists()
                .to_owned(),
            schema
                .create_table_from_entity(videos::Entity)
                .if_not_exists()
                .to_owned(),
        ];

        for stmt in stmts {
            let stmt = builder.build(&stmt);
            db.execute(stmt).await?;
        }

        // Lookup indexes for the video filter queries
        let _ = db
            .execute(sea_orm::Statement::from_string(
                builder,
                "CREATE INDEX IF NOT EXISTS idx_videos_category_id ON videos(category_id);"
                    .to_string(),
            ))
            .await;
        let _ = db
            .execute(sea_orm::Statement::from_string(
                builder,
                "CREATE INDEX IF NOT EXISTS idx_videos_user_id ON videos(user_id);".to_string(),
            ))
            .await;
    }

    Ok(())
}
