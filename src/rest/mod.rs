// rest/mod.rs — HTTP server: browser UI + JSON task API.
//
// Endpoints:
//   GET  /                  home page
//   GET  /tasks             task list page
//   POST /tasks             create from UI form, redirect back
//   GET  /api/tasks
//   POST /api/tasks
//   GET  /api/tasks/{id}
//   PATCH  /api/tasks/{id}
//   DELETE /api/tasks/{id}
//   GET  /api/health

pub mod routes;

use anyhow::Result;
use axum::{
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::AppContext;

pub async fn start_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = ctx.config.bind_addr();
    let router = build_router(ctx);

    info!("taskboard listening on http://{}", bind);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Browser UI
        .route("/", get(crate::views::home))
        .route(
            "/tasks",
            get(crate::views::show_tasks).post(crate::views::create_task_form),
        )
        // JSON API
        .route(
            "/api/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/tasks/{id}",
            get(routes::tasks::get_task)
                .patch(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        // Health (no UI equivalent)
        .route("/api/health", get(routes::health::health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Catch-all for any method+path no handler matches.
async fn not_found(uri: axum::http::Uri) -> (StatusCode, Json<Value>) {
    error!(%uri, "no route matched");
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
