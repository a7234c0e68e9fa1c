use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extract::{AdminUser, CurrentUser};
use crate::errors::AppError;
use crate::models::profile::WorkExperienceRow;
use crate::profile::{ensure_owner, ensure_user_exists};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateWorkExperience {
    pub cargo: String,
    pub empresa: String,
    pub ano_inicio: i32,
    pub ano_fim: Option<i32>,
    pub descricao: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkExperience {
    pub cargo: Option<String>,
    pub empresa: Option<String>,
    pub ano_inicio: Option<i32>,
    pub ano_fim: Option<i32>,
    pub descricao: Option<String>,
}

async fn insert(
    pool: &PgPool,
    usuario_id: Uuid,
    req: &CreateWorkExperience,
) -> Result<WorkExperienceRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO experiencias_profissionais
            (usuario_id, cargo, empresa, ano_inicio, ano_fim, descricao)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(usuario_id)
    .bind(&req.cargo)
    .bind(&req.empresa)
    .bind(req.ano_inicio)
    .bind(req.ano_fim)
    .bind(req.descricao.as_deref())
    .fetch_one(pool)
    .await
}

async fn list(pool: &PgPool, usuario_id: Uuid) -> Result<Vec<WorkExperienceRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM experiencias_profissionais WHERE usuario_id = $1 ORDER BY cargo")
        .bind(usuario_id)
        .fetch_all(pool)
        .await
}

async fn get(pool: &PgPool, id: Uuid) -> Result<WorkExperienceRow, AppError> {
    sqlx::query_as("SELECT * FROM experiencias_profissionais WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Work experience {id} not found")))
}

async fn update(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateWorkExperience,
) -> Result<WorkExperienceRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE experiencias_profissionais SET
            cargo      = COALESCE($2, cargo),
            empresa    = COALESCE($3, empresa),
            ano_inicio = COALESCE($4, ano_inicio),
            ano_fim    = COALESCE($5, ano_fim),
            descricao  = COALESCE($6, descricao)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.cargo.as_deref())
    .bind(req.empresa.as_deref())
    .bind(req.ano_inicio)
    .bind(req.ano_fim)
    .bind(req.descricao.as_deref())
    .fetch_one(pool)
    .await
}

async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM experiencias_profissionais WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// POST /api/v1/me/experiencias-profissionais
pub async fn handle_create_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateWorkExperience>,
) -> Result<Json<WorkExperienceRow>, AppError> {
    Ok(Json(insert(&state.db, user.id, &req).await?))
}

/// GET /api/v1/me/experiencias-profissionais
pub async fn handle_list_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<WorkExperienceRow>>, AppError> {
    Ok(Json(list(&state.db, user.id).await?))
}

/// PUT /api/v1/me/experiencias-profissionais/:id
pub async fn handle_update_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWorkExperience>,
) -> Result<Json<WorkExperienceRow>, AppError> {
    let existing = get(&state.db, id).await?;
    ensure_owner(existing.usuario_id, user.id)?;
    Ok(Json(update(&state.db, id, &req).await?))
}

/// DELETE /api/v1/me/experiencias-profissionais/:id
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

/// POST /api/v1/admin/users/:user_id/experiencias-profissionais
pub async fn handle_admin_create(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<CreateWorkExperience>,
) -> Result<Json<WorkExperienceRow>, AppError> {
    ensure_user_exists(&state.db, user_id).await?;
    Ok(Json(insert(&state.db, user_id, &req).await?))
}

/// GET /api/v1/admin/users/:user_id/experiencias-profissionais
pub async fn handle_admin_list(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<WorkExperienceRow>>, AppError> {
    ensure_user_exists(&state.db, user_id).await?;
    Ok(Json(list(&state.db, user_id).await?))
}

/// GET /api/v1/admin/experiencias-profissionais/:id
pub async fn handle_admin_get(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkExperienceRow>, AppError> {
    Ok(Json(get(&state.db, id).await?))
}

/// PUT /api/v1/admin/experiencias-profissionais/:id
pub async fn handle_admin_update(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWorkExperience>,
) -> Result<Json<WorkExperienceRow>, AppError> {
    get(&state.db, id).await?;
    Ok(Json(update(&state.db, id, &req).await?))
}

/// DELETE /api/v1/admin/experiencias-profissionais/:id
pub async fn handle_admin_delete(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    get(&state.db, id).await?;
    delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
