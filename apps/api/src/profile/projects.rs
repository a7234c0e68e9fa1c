use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extract::{AdminUser, CurrentUser};
use crate::errors::AppError;
use crate::models::profile::ProjectRow;
use crate::profile::{ensure_owner, ensure_user_exists};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub nome: String,
    pub descricao: Option<String>,
    pub link: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub link: Option<String>,
}

fn validate_link(link: &str) -> Result<(), AppError> {
    if link.starts_with("http://") || link.starts_with("https://") {
        Ok(())
    } else {
        Err(AppError::Validation(
            "'link' must be an http(s) URL".to_string(),
        ))
    }
}

async fn insert(pool: &PgPool, usuario_id: Uuid, req: &CreateProject) -> Result<ProjectRow, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO projetos (usuario_id, nome, descricao, link) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(usuario_id)
    .bind(&req.nome)
    .bind(req.descricao.as_deref())
    .bind(&req.link)
    .fetch_one(pool)
    .await
}

async fn list(pool: &PgPool, usuario_id: Uuid) -> Result<Vec<ProjectRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM projetos WHERE usuario_id = $1 ORDER BY nome")
        .bind(usuario_id)
        .fetch_all(pool)
        .await
}

async fn get(pool: &PgPool, id: Uuid) -> Result<ProjectRow, AppError> {
    sqlx::query_as("SELECT * FROM projetos WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))
}

async fn update(pool: &PgPool, id: Uuid, req: &UpdateProject) -> Result<ProjectRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE projetos SET
            nome      = COALESCE($2, nome),
            descricao = COALESCE($3, descricao),
            link      = COALESCE($4, link)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.nome.as_deref())
    .bind(req.descricao.as_deref())
    .bind(req.link.as_deref())
    .fetch_one(pool)
    .await
}

async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM projetos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// POST /api/v1/me/projetos
pub async fn handle_create_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateProject>,
) -> Result<Json<ProjectRow>, AppError> {
    validate_link(&req.link)?;
    Ok(Json(insert(&state.db, user.id, &req).await?))
}

/// GET /api/v1/me/projetos
pub async fn handle_list_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    Ok(Json(list(&state.db, user.id).await?))
}

/// PUT /api/v1/me/projetos/:id
pub async fn handle_update_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<ProjectRow>, AppError> {
    if let Some(link) = &req.link {
        validate_link(link)?;
    }
    let existing = get(&state.db, id).await?;
    ensure_owner(existing.usuario_id, user.id)?;
    Ok(Json(update(&state.db, id, &req).await?))
}

/// DELETE /api/v1/me/projetos/:id
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

/// POST /api/v1/admin/users/:user_id/projetos
pub async fn handle_admin_create(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<CreateProject>,
) -> Result<Json<ProjectRow>, AppError> {
    validate_link(&req.link)?;
    ensure_user_exists(&state.db, user_id).await?;
    Ok(Json(insert(&state.db, user_id, &req).await?))
}

/// GET /api/v1/admin/users/:user_id/projetos
pub async fn handle_admin_list(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    ensure_user_exists(&state.db, user_id).await?;
    Ok(Json(list(&state.db, user_id).await?))
}

/// GET /api/v1/admin/projetos/:id
pub async fn handle_admin_get(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectRow>, AppError> {
    Ok(Json(get(&state.db, id).await?))
}

/// PUT /api/v1/admin/projetos/:id
pub async fn handle_admin_update(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<ProjectRow>, AppError> {
    if let Some(link) = &req.link {
        validate_link(link)?;
    }
    get(&state.db, id).await?;
    Ok(Json(update(&state.db, id, &req).await?))
}

/// DELETE /api/v1/admin/projetos/:id
pub async fn handle_admin_delete(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    get(&state.db, id).await?;
    delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_must_be_http() {
        assert!(validate_link("https://github.com/ana/robo").is_ok());
        assert!(validate_link("http://example.com").is_ok());
        assert!(validate_link("ftp://example.com").is_err());
        assert!(validate_link("github.com/ana/robo").is_err());
    }
}
