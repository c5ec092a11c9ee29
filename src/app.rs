use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::config;
use crate::database::Repository;
use crate::handlers::{health, practitioners, schedules};

/// Shared handler state: the storage backend behind the trait seam
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
}

impl AppState {
    pub fn new(repository: impl Repository + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

/// Full router with global middleware applied
pub fn app(state: AppState) -> Router {
    let config = config();

    let mut router = Router::new()
        .route("/health", get(health::health))
        .merge(schedule_routes())
        .merge(practitioner_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schedules", get(schedules::list).post(schedules::create))
        .route("/schedules/:id", get(schedules::get).put(schedules::update))
        .route("/schedules/toggleActive/:id", put(schedules::toggle_active))
}

fn practitioner_routes() -> Router<AppState> {
    Router::new()
        .route("/practitioners", get(practitioners::list).post(practitioners::create))
        .route("/practitioners/:id", get(practitioners::get).put(practitioners::update))
        .route("/practitioners/toggleActive/:id", put(practitioners::toggle_active))
}
