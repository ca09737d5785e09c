mod blogs;
mod health;
mod images;
mod state;

pub use state::AdminState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    response::Redirect,
    routing::{get, post},
};

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState, upload_body_limit: usize) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/blogs", get(blogs::admin_blogs))
        .route("/blogs/new", get(blogs::admin_blog_new))
        .route(
            "/blogs/create",
            post(blogs::admin_blog_create).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/blogs/{id}", get(blogs::admin_blog_detail))
        .route(
            "/blogs/{id}/edit",
            get(blogs::admin_blog_edit)
                .post(blogs::admin_blog_update)
                .layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/blogs/{id}/delete", post(blogs::admin_blog_delete))
        .route("/blogs/{id}/status", post(blogs::admin_blog_status))
        .route("/img/{*path}", get(images::serve_image))
        .route("/_health/db", get(health::admin_health))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn root_redirect() -> Redirect {
    Redirect::to("/blogs")
}
