use std::sync::Arc;

use skirmish::{
    attendee::repository::InMemoryAttendeeDirectory,
    round::repository::{
        InMemoryPlayerGameRepository, PlayerGameRepository, PostgresPlayerGameRepository,
    },
    AppError, AppState, Settings, TokenConfig, TournamentCatalog,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;

    let catalog = match &settings.events_file {
        Some(path) => {
            info!(path = %path.display(), "Loading events file");
            TournamentCatalog::from_events_file(path)?
        }
        None => {
            info!("No EVENTS_FILE set, serving the demo event");
            TournamentCatalog::demo()?
        }
    };
    info!(events = catalog.events().len(), "Tournament catalog loaded");

    let game_repository: Arc<dyn PlayerGameRepository + Send + Sync> =
        match &settings.database_url {
            Some(database_url) => {
                let pool = sqlx::PgPool::connect(database_url)
                    .await
                    .map_err(|e| AppError::Config(format!("Database connection failed: {}", e)))?;
                info!("Using PostgreSQL game repository");
                Arc::new(PostgresPlayerGameRepository::new(pool))
            }
            None => {
                info!("No DATABASE_URL set, games are kept in memory");
                Arc::new(InMemoryPlayerGameRepository::new())
            }
        };

    let app_state = AppState::new(
        Arc::new(catalog),
        Arc::new(InMemoryAttendeeDirectory::new()),
        game_repository,
        TokenConfig::with_secret(&settings.organiser_token_secret),
    );

    let app = skirmish::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_address)
        .await
        .map_err(|e| AppError::Config(format!("Cannot bind {}: {}", settings.bind_address, e)))?;
    info!("Server running on http://{}", settings.bind_address);

    axum::serve(listener, app).await.map_err(|e| {
        error!(error = %e, "Server stopped");
        AppError::Internal
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skirmish tournament server");

    if let Err(e) = run().await {
        error!(error = %e, "Startup failed");
        std::process::exit(1);
    }
}
