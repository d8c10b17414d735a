//! HTML views — handlebars rendering over embedded templates, plus the
//! browser-facing handlers.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use handlebars::Handlebars;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::store::Task;
use crate::AppContext;

/// Templates are compiled into the binary; there is nothing to deploy
/// alongside it.
const HOME_TEMPLATE: &str = include_str!("../../templates/home.hbs");
const TASKS_TEMPLATE: &str = include_str!("../../templates/tasks.hbs");

/// Renders the two HTML pages. Registered once at startup and shared
/// read-only by the handlers.
pub struct ViewRenderer {
    hbs: Handlebars<'static>,
}

impl ViewRenderer {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut hbs = Handlebars::new();
        hbs.register_template_string("home", HOME_TEMPLATE)?;
        hbs.register_template_string("tasks", TASKS_TEMPLATE)?;
        Ok(Self { hbs })
    }

    pub fn home(&self) -> Result<String, handlebars::RenderError> {
        self.hbs.render("home", &json!({}))
    }

    pub fn tasks(&self, tasks: &[Task]) -> Result<String, handlebars::RenderError> {
        self.hbs.render("tasks", &json!({ "tasks": tasks }))
    }
}

type ViewError = (StatusCode, Json<Value>);

fn render_failed(e: handlebars::RenderError) -> ViewError {
    error!(err = %e, "template rendering failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
}

pub async fn home(State(ctx): State<Arc<AppContext>>) -> Result<Html<String>, ViewError> {
    info!("home endpoint called");
    ctx.views.home().map(Html).map_err(render_failed)
}

pub async fn show_tasks(State(ctx): State<Arc<AppContext>>) -> Result<Html<String>, ViewError> {
    info!("displaying all tasks in UI");
    let tasks = ctx.store.list().await;
    ctx.views.tasks(&tasks).map(Html).map_err(render_failed)
}

#[derive(Deserialize)]
pub struct NewTaskForm {
    #[serde(default)]
    pub title: String,
}

/// `POST /tasks` — create from the UI form. An empty or missing title is a
/// silent no-op; either way the browser lands back on the task list.
pub async fn create_task_form(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<NewTaskForm>,
) -> Redirect {
    info!("creating a new task from UI form");
    if !form.title.trim().is_empty() {
        ctx.store.create(form.title).await;
    }
    Redirect::to("/tasks")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_register_cleanly() {
        assert!(ViewRenderer::new().is_ok());
    }

    #[test]
    fn tasks_page_lists_every_record() {
        let views = ViewRenderer::new().unwrap();
        let tasks = vec![
            Task {
                id: 1,
                title: "Complete DevOps Assignment".into(),
                done: false,
            },
            Task {
                id: 2,
                title: "Push code to Azure Repos".into(),
                done: true,
            },
        ];
        let html = views.tasks(&tasks).unwrap();
        assert!(html.contains("Complete DevOps Assignment"));
        assert!(html.contains("Push code to Azure Repos"));
        // The create form posts back to the UI route.
        assert!(html.contains(r#"action="/tasks""#));
        assert!(html.contains(r#"name="title""#));
    }

    #[test]
    fn home_page_renders_without_data() {
        let views = ViewRenderer::new().unwrap();
        let html = views.home().unwrap();
        assert!(html.contains("<html"));
    }
}
