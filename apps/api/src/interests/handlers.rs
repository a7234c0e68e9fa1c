use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AdminUser, CurrentUser};
use crate::errors::{map_unique_violation, AppError};
use crate::interests::queries;
use crate::models::profile::InterestRow;
use crate::state::AppState;
use crate::users::queries::find_user_by_id;

#[derive(Debug, Deserialize)]
pub struct InterestPayload {
    pub nome: String,
}

fn validate_nome(nome: &str) -> Result<(), AppError> {
    if nome.trim().is_empty() {
        return Err(AppError::Validation("'nome' must not be blank".to_string()));
    }
    Ok(())
}

async fn attach_by_name(
    state: &AppState,
    usuario_id: Uuid,
    nome: &str,
) -> Result<InterestRow, AppError> {
    validate_nome(nome)?;
    let interest = queries::find_or_create(&state.db, nome.trim()).await?;
    queries::attach(&state.db, usuario_id, interest.id).await?;
    Ok(interest)
}

/// POST /api/v1/me/interesses
pub async fn handle_attach_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<InterestPayload>,
) -> Result<Json<InterestRow>, AppError> {
    let interest = attach_by_name(&state, user.id, &req.nome).await?;
    Ok(Json(interest))
}

/// GET /api/v1/me/interesses
pub async fn handle_list_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<InterestRow>>, AppError> {
    Ok(Json(queries::list_for_user(&state.db, user.id).await?))
}

/// DELETE /api/v1/me/interesses/:id
/// Detaches only; the interest row keeps existing for other holders.
pub async fn handle_detach_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(interesse_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    queries::get(&state.db, interesse_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interest {interesse_id} not found")))?;
    queries::detach(&state.db, user.id, interesse_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/:user_id/interesses
pub async fn handle_admin_attach(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<InterestPayload>,
) -> Result<Json<InterestRow>, AppError> {
    find_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    let interest = attach_by_name(&state, user_id, &req.nome).await?;
    Ok(Json(interest))
}

/// GET /api/v1/admin/users/:user_id/interesses
pub async fn handle_admin_list_for_user(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<InterestRow>>, AppError> {
    find_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(queries::list_for_user(&state.db, user_id).await?))
}

/// DELETE /api/v1/admin/users/:user_id/interesses/:interesse_id
pub async fn handle_admin_detach(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path((user_id, interesse_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    queries::get(&state.db, interesse_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interest {interesse_id} not found")))?;
    queries::detach(&state.db, user_id, interesse_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/interesses/:id
pub async fn handle_admin_get(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterestRow>, AppError> {
    let interest = queries::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interest {id} not found")))?;
    Ok(Json(interest))
}

/// PUT /api/v1/admin/interesses/:id
pub async fn handle_admin_rename(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<InterestPayload>,
) -> Result<Json<InterestRow>, AppError> {
    validate_nome(&req.nome)?;
    let interest = queries::rename(&state.db, id, req.nome.trim())
        .await
        .map_err(|e| map_unique_violation(e, &[("interesses_nome_key", "nome")]))?
        .ok_or_else(|| AppError::NotFound(format!("Interest {id} not found")))?;
    Ok(Json(interest))
}

/// DELETE /api/v1/admin/interesses/:id
/// The only path that deletes an interest record outright.
pub async fn handle_admin_delete(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !queries::delete(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Interest {id} not found")));
    }
    info!("Admin {} deleted interest {}", admin.id, id);
    Ok(StatusCode::NO_CONTENT)
}
