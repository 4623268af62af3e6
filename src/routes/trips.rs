use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    error::AppError,
    models::{
        form::TripForm,
        plan::{ListTier, TripPlan},
        trip::TripRequest,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(plan_from_json))
        .route("/form", post(plan_from_form))
        .route("/current", get(current_plan))
        .route("/current/toggle", post(toggle_item))
}

async fn plan_from_json(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TripPlan>, AppError> {
    let plan = plan_and_store(&state, &request).await?;
    Ok(Json(plan))
}

async fn plan_from_form(
    State(state): State<AppState>,
    Form(form): Form<TripForm>,
) -> Result<Json<TripPlan>, AppError> {
    let request = form.into_request(&state.config.intake)?;
    let plan = plan_and_store(&state, &request).await?;
    Ok(Json(plan))
}

async fn current_plan(State(state): State<AppState>) -> Result<Json<TripPlan>, AppError> {
    let _guard = state.plan_lock.lock().await;
    if let Some(plan) = state.store.load_plan().await? {
        return Ok(Json(plan));
    }
    info!("no stored plan, planning the sample trip");
    let plan = store_new_plan(&state, &TripRequest::sample()).await?;
    Ok(Json(plan))
}

#[derive(Deserialize)]
struct ToggleRequest {
    tier: ListTier,
    name: String,
}

async fn toggle_item(
    State(state): State<AppState>,
    Json(toggle): Json<ToggleRequest>,
) -> Result<Json<TripPlan>, AppError> {
    let _guard = state.plan_lock.lock().await;
    let mut plan = state.store.load_plan().await?.ok_or(AppError::NotFound)?;
    plan.shopping_list
        .toggle(toggle.tier, &toggle.name)
        .ok_or(AppError::NotFound)?;
    state.store.save_plan(&plan).await?;
    Ok(Json(plan))
}

async fn plan_and_store(state: &AppState, request: &TripRequest) -> Result<TripPlan, AppError> {
    let _guard = state.plan_lock.lock().await;
    store_new_plan(state, request).await
}

/// Callers must hold `plan_lock`.
async fn store_new_plan(state: &AppState, request: &TripRequest) -> Result<TripPlan, AppError> {
    let plan = state.planner.plan(request)?;
    state.store.save_plan(&plan).await?;
    info!(
        score = plan.summary.efficiency_score,
        alerts = plan.alerts.len(),
        "planned trip"
    );
    Ok(plan)
}
