use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extract::{AdminUser, CurrentUser};
use crate::errors::AppError;
use crate::models::profile::{SkillRow, NIVEL_MAX, NIVEL_MIN};
use crate::profile::{ensure_owner, ensure_user_exists};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSkill {
    pub nome: String,
    pub nivel: i16,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSkill {
    pub nome: Option<String>,
    pub nivel: Option<i16>,
}

fn validate_nivel(nivel: i16) -> Result<(), AppError> {
    if (NIVEL_MIN..=NIVEL_MAX).contains(&nivel) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "'nivel' must be between {NIVEL_MIN} (beginner) and {NIVEL_MAX} (advanced)"
        )))
    }
}

async fn insert(pool: &PgPool, usuario_id: Uuid, req: &CreateSkill) -> Result<SkillRow, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO habilidades (usuario_id, nome, nivel) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(usuario_id)
    .bind(&req.nome)
    .bind(req.nivel)
    .fetch_one(pool)
    .await
}

async fn list(pool: &PgPool, usuario_id: Uuid) -> Result<Vec<SkillRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM habilidades WHERE usuario_id = $1 ORDER BY nome")
        .bind(usuario_id)
        .fetch_all(pool)
        .await
}

async fn get(pool: &PgPool, id: Uuid) -> Result<SkillRow, AppError> {
    sqlx::query_as("SELECT * FROM habilidades WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))
}

async fn update(pool: &PgPool, id: Uuid, req: &UpdateSkill) -> Result<SkillRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE habilidades SET
            nome  = COALESCE($2, nome),
            nivel = COALESCE($3, nivel)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.nome.as_deref())
    .bind(req.nivel)
    .fetch_one(pool)
    .await
}

async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM habilidades WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// POST /api/v1/me/habilidades
pub async fn handle_create_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateSkill>,
) -> Result<Json<SkillRow>, AppError> {
    validate_nivel(req.nivel)?;
    Ok(Json(insert(&state.db, user.id, &req).await?))
}

/// GET /api/v1/me/habilidades
pub async fn handle_list_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<SkillRow>>, AppError> {
    Ok(Json(list(&state.db, user.id).await?))
}

/// PUT /api/v1/me/habilidades/:id
pub async fn handle_update_own(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSkill>,
) -> Result<Json<SkillRow>, AppError> {
    if let Some(nivel) = req.nivel {
        validate_nivel(nivel)?;
    }
    let existing = get(&state.db, id).await?;
    ensure_owner(existing.usuario_id, user.id)?;
    Ok(Json(update(&state.db, id, &req).await?))
}

/// DELETE /api/v1/me/habilidades/:id
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

/// POST /api/v1/admin/users/:user_id/habilidades
pub async fn handle_admin_create(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<CreateSkill>,
) -> Result<Json<SkillRow>, AppError> {
    validate_nivel(req.nivel)?;
    ensure_user_exists(&state.db, user_id).await?;
    Ok(Json(insert(&state.db, user_id, &req).await?))
}

/// GET /api/v1/admin/users/:user_id/habilidades
pub async fn handle_admin_list(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<SkillRow>>, AppError> {
    ensure_user_exists(&state.db, user_id).await?;
    Ok(Json(list(&state.db, user_id).await?))
}

/// GET /api/v1/admin/habilidades/:id
pub async fn handle_admin_get(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SkillRow>, AppError> {
    Ok(Json(get(&state.db, id).await?))
}

/// PUT /api/v1/admin/habilidades/:id
/// Admin bypasses the ownership check.
pub async fn handle_admin_update(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSkill>,
) -> Result<Json<SkillRow>, AppError> {
    if let Some(nivel) = req.nivel {
        validate_nivel(nivel)?;
    }
    get(&state.db, id).await?;
    Ok(Json(update(&state.db, id, &req).await?))
}

/// DELETE /api/v1/admin/habilidades/:id
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
    fn test_nivel_bounds() {
        assert!(validate_nivel(0).is_err());
        assert!(validate_nivel(1).is_ok());
        assert!(validate_nivel(3).is_ok());
        assert!(validate_nivel(4).is_err());
    }

    #[test]
    fn test_update_payload_is_partial() {
        let req: UpdateSkill = serde_json::from_str(r#"{"nivel": 2}"#).unwrap();
        assert!(req.nome.is_none());
        assert_eq!(req.nivel, Some(2));
    }
}
