use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{cards as card_handlers, profiles as profile_handlers};
use crate::store::ProfileStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
}

pub fn create_router(store: Arc<dyn ProfileStore>) -> Router {
    let state = AppState { store };

    // Profile routes
    let profile_routes = Router::new()
        .route("/", get(profile_handlers::list_profiles))
        .route("/", post(profile_handlers::create_profile))
        .route("/:id", get(profile_handlers::get_profile))
        .route("/:id", put(profile_handlers::update_profile))
        .route("/:id", delete(profile_handlers::delete_profile))
        .route("/:id/vcard", get(profile_handlers::download_vcard));

    // Card routes
    let card_routes = Router::new()
        .route("/", get(card_handlers::list_cards))
        .route("/", post(card_handlers::create_card))
        .route("/:id", get(card_handlers::get_card))
        .route("/:id", put(card_handlers::update_card))
        .route("/:id", delete(card_handlers::delete_card));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/users", profile_routes)
        .nest("/api/cards", card_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::handlers::test_support::{raw, test_app};

    #[tokio::test]
    async fn test_health_check() {
        let (status, _, body) = raw(&test_app(), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _, _) = raw(&test_app(), "GET", "/api/nothing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
