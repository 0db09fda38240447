use std::sync::Arc;

use anyhow::Context;
use utoipa::OpenApi;
use workout_storage::{Database, GymStore, MemoryStore};

mod config;
mod error;
mod extract;
mod features;
mod routes;
mod state;

use config::{Config, StorageBackend};
use features::{athletes, categories, training_centers};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "WorkoutApi"),
    paths(
        categories::handlers::create_category,
        categories::handlers::list_categories,
        categories::handlers::get_category,
        training_centers::handlers::create_training_center,
        training_centers::handlers::list_training_centers,
        training_centers::handlers::get_training_center,
        athletes::handlers::create_athlete,
        athletes::handlers::list_athletes,
        athletes::handlers::get_athlete,
        athletes::handlers::get_athlete_by_nome,
        athletes::handlers::get_athlete_by_cpf,
        athletes::handlers::update_athlete,
        athletes::handlers::delete_athlete,
    ),
    components(
        schemas(
            workout_storage::dto::category::CreateCategoryRequest,
            workout_storage::dto::category::CategoryResponse,
            workout_storage::dto::training_center::CreateTrainingCenterRequest,
            workout_storage::dto::training_center::TrainingCenterResponse,
            workout_storage::dto::athlete::CreateAthleteRequest,
            workout_storage::dto::athlete::UpdateAthleteRequest,
            workout_storage::dto::athlete::AthleteResponse,
            workout_storage::dto::athlete::AthleteListItem,
            workout_storage::dto::athlete::CategoryRef,
            workout_storage::dto::athlete::TrainingCenterRef,
        )
    ),
    tags(
        (name = "categorias", description = "Athlete categories"),
        (name = "centros_treinamento", description = "Training centers"),
        (name = "atletas", description = "Athletes"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting WorkoutApi");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let store: Arc<dyn GymStore> = match &config.storage {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(database_url, *max_connections)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");

            db.ensure_schema()
                .await
                .context("Failed to create database schema")?;
            tracing::info!("Database schema ready");

            Arc::new(db)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let app = routes::router(AppState::new(store));

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
