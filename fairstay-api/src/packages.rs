use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use fairstay_catalog::{NewPackage, Package, PackagePatch};

use crate::error::AppError;
use crate::middleware::auth::admin_auth_middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = from_fn_with_state(state, admin_auth_middleware);

    Router::new()
        .route("/api/packages", get(list_packages))
        .route("/api/packages/{id}", get(get_package))
        .route("/api/packages", post(create_package).layer(admin.clone()))
        .route(
            "/api/packages/{id}",
            put(update_package).layer(admin.clone()),
        )
        .route("/api/packages/{id}", delete(delete_package).layer(admin))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/packages
async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<Package>>, AppError> {
    let packages = state
        .packages
        .list()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(packages))
}

/// GET /api/packages/:id
async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Package>, AppError> {
    let package = state
        .packages
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Package not found".to_string()))?;
    Ok(Json(package))
}

/// POST /api/packages (admin)
async fn create_package(
    State(state): State<AppState>,
    Json(new): Json<NewPackage>,
) -> Result<(StatusCode, Json<Package>), AppError> {
    let package = new.build()?;
    state
        .packages
        .create(package.clone())
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!("Package created: {} ({})", package.name, package.id);
    Ok((StatusCode::CREATED, Json(package)))
}

/// PUT /api/packages/:id (admin)
/// Merge-patch: only the provided fields overwrite.
async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PackagePatch>,
) -> Result<Json<Package>, AppError> {
    let mut package = state
        .packages
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Package not found".to_string()))?;

    patch.apply(&mut package)?;

    state
        .packages
        .update(package.clone())
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(package))
}

/// DELETE /api/packages/:id (admin)
async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .packages
        .delete(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Package not found".to_string()))?;

    tracing::info!("Package deleted: {}", id);
    Ok(Json(json!({ "message": "Package deleted successfully" })))
}
