use axum::{
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::CorsLayer;

// A known path hit with an unsupported method is reported like any other
// unknown route: a bare 404 instead of 405 with an Allow header.
pub async fn mw_hide_method_not_allowed<B>(request: Request<B>, next: Next<B>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        tracing::debug!(%method, path = %path, "method not routed");
        return StatusCode::NOT_FOUND.into_response();
    }
    response
}

// Any origin, method and header, like a bare `cors()` in front of the API
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
