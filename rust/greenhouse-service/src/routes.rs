use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use greenhouse_core::{Newsletter, NewsletterFields, Plant, PlantFields};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Healthz {
    pub status: &'static str,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/version", get(version))
        .route("/plants", get(list_plants).post(create_plant))
        .route(
            "/plants/:id",
            get(get_plant).patch(update_plant).delete(delete_plant),
        )
        .route("/newsletters", get(list_newsletters).post(create_newsletter))
        .route(
            "/newsletters/:id",
            get(get_newsletter)
                .patch(update_newsletter)
                .delete(delete_newsletter),
        )
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(Healthz { status: "ok" }))
}

async fn version() -> impl IntoResponse {
    let svc_version = env!("CARGO_PKG_VERSION");
    let core_version = greenhouse_core::version();
    (
        StatusCode::OK,
        Json(json!({"service_version": svc_version, "core_version": core_version})),
    )
}

// -------- plants --------

fn check_price(fields: &PlantFields) -> Result<(), AppError> {
    match fields.price {
        Some(p) if p < 0.0 => Err(AppError::BadRequest(format!("price must not be negative, got {p}"))),
        _ => Ok(()),
    }
}

async fn list_plants(State(state): State<AppState>) -> Result<Json<Vec<Plant>>, AppError> {
    let db = state.db.lock().unwrap();
    let plants = db.list_plants()?;
    Ok(Json(plants))
}

async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Plant>, AppError> {
    let db = state.db.lock().unwrap();
    match db.get_plant(id)? {
        Some(plant) => Ok(Json(plant)),
        None => Err(AppError::NotFound(format!("plant {id}"))),
    }
}

async fn create_plant(
    State(state): State<AppState>,
    Json(fields): Json<PlantFields>,
) -> Result<impl IntoResponse, AppError> {
    check_price(&fields)?;
    let db = state.db.lock().unwrap();
    let plant = db.create_plant(&fields)?;
    info!(id = plant.id, "plant created");
    Ok((StatusCode::CREATED, Json(plant)))
}

async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<PlantFields>,
) -> Result<Json<Plant>, AppError> {
    check_price(&patch)?;
    let db = state.db.lock().unwrap();
    match db.update_plant(id, &patch)? {
        Some(plant) => {
            info!(id, "plant updated");
            Ok(Json(plant))
        }
        None => Err(AppError::NotFound(format!("plant {id}"))),
    }
}

async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    if db.delete_plant(id)? {
        info!(id, "plant deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("plant {id}")))
    }
}

// -------- newsletters --------

async fn list_newsletters(State(state): State<AppState>) -> Result<Json<Vec<Newsletter>>, AppError> {
    let db = state.db.lock().unwrap();
    let newsletters = db.list_newsletters()?;
    Ok(Json(newsletters))
}

async fn get_newsletter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Newsletter>, AppError> {
    let db = state.db.lock().unwrap();
    match db.get_newsletter(id)? {
        Some(newsletter) => Ok(Json(newsletter)),
        None => Err(AppError::NotFound(format!("newsletter {id}"))),
    }
}

async fn create_newsletter(
    State(state): State<AppState>,
    Json(fields): Json<NewsletterFields>,
) -> Result<impl IntoResponse, AppError> {
    let db = state.db.lock().unwrap();
    let newsletter = db.create_newsletter(&fields)?;
    info!(id = newsletter.id, "newsletter created");
    Ok((StatusCode::CREATED, Json(newsletter)))
}

async fn update_newsletter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<NewsletterFields>,
) -> Result<Json<Newsletter>, AppError> {
    let db = state.db.lock().unwrap();
    match db.update_newsletter(id, &patch)? {
        Some(newsletter) => {
            info!(id, "newsletter updated");
            Ok(Json(newsletter))
        }
        None => Err(AppError::NotFound(format!("newsletter {id}"))),
    }
}

async fn delete_newsletter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    if db.delete_newsletter(id)? {
        info!(id, "newsletter deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("newsletter {id}")))
    }
}
