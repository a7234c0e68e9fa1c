use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extract::{AdminUser, CurrentUser};
use crate::errors::AppError;
use crate::models::profile::AcademicBackgroundRow;
use crate::profile::{ensure_owner, ensure_user_exists};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAcademicBackground {
    pub curso: String,
    pub instituicao: String,
    pub ano_inicio: i32,
    pub ano_conclusao: i32,
    pub semestre: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAcademicBackground {
    pub curso: Option<String>,
    pub instituicao: Option<String>,
    pub ano_inicio: Option<i32>,
    pub ano_conclusao: Option<i32>,
    pub semestre: Option<i32>,
}

async fn insert(
    pool: &PgPool,
    usuario_id: Uuid,
    req: &CreateAcademicBackground,
) -> Result<AcademicBackgroundRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO formacoes_academicas
            (usuario_id, curso, instituicao, ano_inicio, ano_conclusao, semestre)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(usuario_id)
    .bind(&req.curso)
    .bind(&req.instituicao)
    .bind(req.ano_inicio)
    .bind(req.ano_conclusao)
    .bind(req.semestre)
    .fetch_one(pool)
    .await
}

async fn list(pool: &PgPool, usuario_id: Uuid) -> Result<Vec<AcademicBackgroundRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM formacoes_academicas WHERE usuario_id = $1 ORDER BY curso")
        .bind(usuario_id)
        .fetch_all(pool)
        .await
}

async fn get(pool: &PgPool, id: Uuid) -> Result<AcademicBackgroundRow, AppError> {
    sqlx::query_as("SELECT * FROM formacoes_academicas WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Academic background {id} not found")))
}

async fn update(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateAcademicBackground,
) -> Result<AcademicBackgroundRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE formacoes_academicas SET
            curso         = COALESCE($2, curso),
            instituicao   = COALESCE($3, instituicao),
            ano_inicio    = COALESCE($4, ano_inicio),
            ano_conclusao = COALESCE($5, ano_conclusao),
            semestre      = COALESCE($6, semestre)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.curso.as_deref())
    .bind(req.instituicao.as_deref())
    .bind(req.ano_inicio)
    .bind(req.ano_conclusao)
    .bind(req.semestre)
    .fetch_one(pool)
    .await
}

async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM formacoes_academicas WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// POST /api/v1/me/formacoes-academicas
pub async fn handle_create_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateAcademicBackground>,
) -> Result<Json<AcademicBackgroundRow>, AppError> {
    Ok(Json(insert(&state.db, user.id, &req).await?))
}

/// GET /api/v1/me/formacoes-academicas
pub async fn handle_list_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<AcademicBackgroundRow>>, AppError> {
    Ok(Json(list(&state.db, user.id).await?))
}

/// PUT /api/v1/me/formacoes-academicas/:id
pub async fn handle_update_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAcademicBackground>,
) -> Result<Json<AcademicBackgroundRow>, AppError> {
    let existing = get(&state.db, id).await?;
    ensure_owner(existing.usuario_id, user.id)?;
    Ok(Json(update(&state.db, id, &req).await?))
}

/// DELETE /api/v1/me/formacoes-academicas/:id
pub async fn handle_delete_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let existing = get(&state.db, id).await?;
    ensure_owner(existing.usuario_id, user.id)?;
    delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/:user_id/formacoes-academicas
pub async fn handle_admin_create(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<CreateAcademicBackground>,
) -> Result<Json<AcademicBackgroundRow>, AppError> {
    ensure_user_exists(&state.db, user_id).await?;
    Ok(Json(insert(&state.db, user_id, &req).await?))
}

/// GET /api/v1/admin/users/:user_id/formacoes-academicas
pub async fn handle_admin_list(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AcademicBackgroundRow>>, AppError> {
    ensure_user_exists(&state.db, user_id).await?;
    Ok(Json(list(&state.db, user_id).await?))
}

/// GET /api/v1/admin/formacoes-academicas/:id
pub async fn handle_admin_get(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicBackgroundRow>, AppError> {
    Ok(Json(get(&state.db, id).await?))
}

/// PUT /api/v1/admin/formacoes-academicas/:id
pub async fn handle_admin_update(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAcademicBackground>,
) -> Result<Json<AcademicBackgroundRow>, AppError> {
    get(&state.db, id).await?;
    Ok(Json(update(&state.db, id, &req).await?))
}

/// DELETE /api/v1/admin/formacoes-academicas/:id
pub async fn handle_admin_delete(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    get(&state.db, id).await?;
    delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
