use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    extract::BODY_LIMIT,
    handler::*,
    middleware::{cors_layer, mw_hide_method_not_allowed},
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todo", get(get_todos).post(create_todo))
        .route(
            "/todo/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/users", post(signup))
        .route("/users/:username", post(login))
        .fallback(route_not_found)
        .layer(from_fn(mw_hide_method_not_allowed))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(app_state)
}
