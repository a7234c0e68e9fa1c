use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::AdminUser;
use crate::errors::{map_unique_violation, AppError};
use crate::mail::filters::RecipientFilter;
use crate::models::user::{PublicUser, UserProfile};
use crate::state::AppState;
use crate::users::handlers::{create_account, CreateUserRequest, UpdateUserRequest, USER_UNIQUE_FIELDS};
use crate::users::queries::{delete_user, find_user_by_id, load_profile, list_users, update_user};

/// GET /api/v1/admin/users
/// Lists non-staff users; accepts the same filter parameters as the
/// bulk-email audience selector.
pub async fn handle_list_users(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Query(filter): Query<RecipientFilter>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = list_users(&state.db, &filter).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

/// POST /api/v1/admin/users
pub async fn handle_create_user(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = create_account(&state, req, false, false).await?;
    Ok(Json(profile))
}

/// POST /api/v1/admin/users/superuser
/// Same validation path as registration, with both permission flags set.
pub async fn handle_create_superuser(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = create_account(&state, req, true, true).await?;
    info!("Admin {} created superuser {}", admin.id, profile.user.id);
    Ok(Json(profile))
}

/// GET /api/v1/admin/users/:user_id
pub async fn handle_get_user(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    let user = find_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(load_profile(&state.db, user).await?))
}

/// PUT /api/v1/admin/users/:user_id
pub async fn handle_update_user(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let updated = update_user(&state.db, user_id, &req.into())
        .await
        .map_err(|e| map_unique_violation(e, USER_UNIQUE_FIELDS))?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(load_profile(&state.db, updated).await?))
}

/// DELETE /api/v1/admin/users/:user_id
pub async fn handle_delete_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !delete_user(&state.db, user_id).await? {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }
    info!("Admin {} deleted user {}", admin.id, user_id);
    Ok(StatusCode::NO_CONTENT)
}
