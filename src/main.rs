//! G2L Learning Game Backend
//!
//! Hosts the session controller that turns a video, a PDF or a short description into a playable
//! lesson or web app, and keeps the user's library, shared games and ratings in SQLite.

mod api;
mod catalog;
mod config;
mod db;
mod errors;
mod generation;
mod models;
mod persistence;
mod scenarios;
mod session;
mod simulation;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::SqliteStore;
use generation::{GeminiClient, Orchestrator};
use scenarios::ScenarioMatcher;
use session::{SessionController, SharedSession};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub orchestrator: Arc<Orchestrator>,
    pub scenarios: Arc<ScenarioMatcher>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!("Starting G2L Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Gemini model: {}", config.gemini_model);

    if config.gemini_api_key.is_none() {
        tracing::warn!("No Gemini API key configured (GEMINI_API_KEY). Generation requests will fail!");
    }
    if config.demo_scenarios {
        tracing::info!("Demo scenarios enabled ({:?} delay)", config.demo_delay);
    }

    // Initialize database and load the session
    let pool = db::init_database(&config.db_path).await?;
    let store = Arc::new(SqliteStore::new(pool));
    let session = SessionController::load(store).await.into_shared();

    let api = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());

    // Create application state
    let state = AppState {
        session,
        orchestrator: Arc::new(Orchestrator::new(Arc::new(api))),
        scenarios: Arc::new(ScenarioMatcher::with_demo_rules(
            config.demo_scenarios,
            config.demo_delay,
        )),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let session_routes = Router::new()
        .route("/", get(api::get_session))
        .route("/page", put(api::select_page))
        .route("/subject", post(api::select_subject))
        .route("/back", post(api::go_back))
        .route("/inputs", put(api::update_inputs))
        .route("/inputs/file", post(api::upload_file).delete(api::clear_file))
        .route("/generate", post(api::generate))
        .route("/rpg/choice", post(api::choose_option))
        .route("/rpg/continue", post(api::continue_lesson))
        .route("/exit", post(api::exit_game))
        .route("/save", post(api::save_game))
        .route("/play", post(api::play_game))
        .route("/simulation/country", post(api::simulation_country))
        .route("/simulation/choice", post(api::simulation_choice))
        .route("/simulation/continue", post(api::simulation_continue))
        .route("/simulation/restart", post(api::simulation_restart));

    // API routes
    let api_routes = Router::new()
        // Library
        .route("/library", get(api::get_library))
        .route("/library/{id}", delete(api::delete_game))
        .route("/library/{id}/visibility", post(api::toggle_visibility))
        .route("/favorites/toggle", post(api::toggle_favorite))
        // Community
        .route("/community", get(api::list_community))
        .route("/community/{id}/rating", post(api::rate_game))
        // Catalog
        .route("/catalog/subjects", get(api::list_subjects))
        .route("/catalog/top-rated", get(api::list_top_rated))
        // Settings
        .route("/settings", get(api::get_settings).put(api::update_settings))
        .nest("/session", session_routes);

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
