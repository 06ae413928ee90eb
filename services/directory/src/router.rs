use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use directory_core::health::healthz;
use directory_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::login,
    health::readyz,
    image::{add_image, list_images, remove_image},
    provider::{
        delete_provider, get_provider, list_providers, register_provider, update_provider,
        update_provider_by_id,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/login", post(login))
        // Providers
        .route(
            "/providers",
            get(list_providers)
                .post(register_provider)
                .put(update_provider),
        )
        .route(
            "/providers/{id}",
            get(get_provider)
                .put(update_provider_by_id)
                .delete(delete_provider),
        )
        // Images
        .route(
            "/providers/{id}/images",
            get(list_images).post(add_image).delete(remove_image),
        )
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
