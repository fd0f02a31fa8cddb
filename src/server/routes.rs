// Routes for the recommendation form and its JSON twin.
// Failures never leak partial results: a run either renders both insights
// and song, or a single failure notice.

use axum::{extract::State, response::Html, Form, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::views::{render_page, Outcome};
use super::AppState;
use crate::domain::{Description, Recommendation};
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub model: String,
}

/// GET / - empty form
pub async fn index() -> Html<String> {
    Html(render_page("", Outcome::Empty))
}

/// POST / - form submission
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RecommendForm>,
) -> Html<String> {
    let description = match Description::new(&form.description) {
        Ok(description) => description,
        Err(AppError::InvalidInput(message)) => {
            return Html(render_page(&form.description, Outcome::Warning(&message)));
        }
        Err(e) => {
            log::error!("Rejected submission: {}", e);
            return Html(render_page(&form.description, Outcome::Failure));
        }
    };

    match state.pipeline.run_description(&description).await {
        Ok(recommendation) => Html(render_page(
            &form.description,
            Outcome::Success(&recommendation),
        )),
        Err(e) => {
            log::error!("Recommendation failed: {}", e);
            Html(render_page(&form.description, Outcome::Failure))
        }
    }
}

/// POST /api/recommend
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<Recommendation>> {
    let recommendation = state.pipeline.run(&request.description).await?;
    Ok(Json(recommendation))
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.provider_name.clone(),
        model: state.model.clone(),
    })
}
