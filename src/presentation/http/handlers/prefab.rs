//! Prefab Handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::application::dto::{CreatePrefabRequest, PrefabResponse, UpdatePrefabRequest};
use crate::application::services::{
    CreatePrefabDto, PrefabError, PrefabService, PrefabServiceImpl, UpdatePrefabDto,
};
use crate::domain::Prefab;
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::ValidatedJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn prefab_service(state: &AppState) -> impl PrefabService {
    PrefabServiceImpl::new(state.prefabs.clone())
}

/// Count the outcome, then convert to the HTTP result.
fn finish(operation: &str, result: Result<Prefab, PrefabError>) -> Result<Json<PrefabResponse>, AppError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_prefab_operation(operation, outcome);

    Ok(Json(PrefabResponse::from(result?)))
}

/// Get prefab by ID
pub async fn get_prefab(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(prefab_id): Path<String>,
) -> Result<Json<PrefabResponse>, AppError> {
    let result = prefab_service(&state)
        .get_prefab(&prefab_id, &auth.user_id)
        .await;

    finish("read", result)
}

/// Update prefab
pub async fn update_prefab(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(prefab_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdatePrefabRequest>,
) -> Result<Json<PrefabResponse>, AppError> {
    let update = UpdatePrefabDto {
        name: body.prefab.name,
        rack: body.prefab.rack,
    };

    let result = prefab_service(&state)
        .update_prefab(&prefab_id, &auth.user_id, update)
        .await;

    finish("update", result)
}

/// Delete prefab, returning the removed record
pub async fn delete_prefab(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(prefab_id): Path<String>,
) -> Result<Json<PrefabResponse>, AppError> {
    let result = prefab_service(&state)
        .delete_prefab(&prefab_id, &auth.user_id)
        .await;

    finish("delete", result)
}

/// Create a prefab owned by the caller
pub async fn create_prefab(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreatePrefabRequest>,
) -> Result<Json<PrefabResponse>, AppError> {
    let request = CreatePrefabDto {
        name: body.prefab.name,
        rack: body.prefab.rack,
    };

    let result = prefab_service(&state)
        .create_prefab(&auth.user_id, request)
        .await;

    finish("create", result)
}
