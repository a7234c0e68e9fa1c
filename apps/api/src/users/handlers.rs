use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::extract::CurrentUser;
use crate::auth::password::hash_password;
use crate::errors::{map_unique_violation, AppError};
use crate::models::user::{Genero, UserProfile};
use crate::state::AppState;
use crate::users::queries::{delete_user, insert_user, load_profile, update_user, NewUser, UserPatch};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub nome: String,
    pub idade: i32,
    pub genero: Genero,
    pub telefone: String,
    #[serde(default)]
    pub deficiencia: bool,
    pub resumo: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub nome: Option<String>,
    pub idade: Option<i32>,
    pub genero: Option<Genero>,
    pub telefone: Option<String>,
    pub deficiencia: Option<bool>,
    pub resumo: Option<String>,
    pub avatar: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            nome: req.nome,
            idade: req.idade,
            genero: req.genero,
            telefone: req.telefone,
            deficiencia: req.deficiencia,
            resumo: req.resumo,
            avatar: req.avatar,
        }
    }
}

/// Blank email/password must fail loudly, never default. Serde already rejects
/// absent fields; this catches empty strings.
pub fn validate_registration(req: &CreateUserRequest) -> Result<(), AppError> {
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::Validation(
            "'email' must be a valid email address".to_string(),
        ));
    }
    if req.password.trim().is_empty() {
        return Err(AppError::Validation("'password' must not be blank".to_string()));
    }
    if req.nome.trim().is_empty() {
        return Err(AppError::Validation("'nome' must not be blank".to_string()));
    }
    Ok(())
}

/// Uniqueness constraints surfaced as field-level validation errors.
pub const USER_UNIQUE_FIELDS: &[(&str, &str)] = &[
    ("usuarios_email_key", "email"),
    ("usuarios_nome_key", "nome"),
];

pub async fn create_account(
    state: &AppState,
    req: CreateUserRequest,
    is_staff: bool,
    is_superuser: bool,
) -> Result<UserProfile, AppError> {
    validate_registration(&req)?;
    let password_hash = hash_password(&req.password)?;

    let user = insert_user(
        &state.db,
        NewUser {
            email: &req.email,
            nome: &req.nome,
            idade: req.idade,
            genero: req.genero,
            telefone: &req.telefone,
            deficiencia: req.deficiencia,
            resumo: req.resumo.as_deref(),
            avatar: req.avatar.as_deref(),
            password_hash: &password_hash,
            is_staff,
            is_superuser,
        },
    )
    .await
    .map_err(|e| map_unique_violation(e, USER_UNIQUE_FIELDS))?;

    info!("Created user {} ({})", user.id, user.email);
    Ok(load_profile(&state.db, user).await?)
}

/// POST /api/v1/me
/// Registration. The only unauthenticated write endpoint.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = create_account(&state, req, false, false).await?;
    Ok(Json(profile))
}

/// GET /api/v1/me
pub async fn handle_get_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(load_profile(&state.db, user).await?))
}

/// PUT /api/v1/me
/// Partial merge: absent fields are left unchanged.
pub async fn handle_update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let updated = update_user(&state.db, user.id, &req.into())
        .await
        .map_err(|e| map_unique_violation(e, USER_UNIQUE_FIELDS))?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;
    Ok(Json(load_profile(&state.db, updated).await?))
}

/// DELETE /api/v1/me
pub async fn handle_delete_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    delete_user(&state.db, user.id).await?;
    info!("User {} deleted their account", user.id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            email: "ana@example.com".to_string(),
            password: "hunter2!".to_string(),
            nome: "Ana Souza".to_string(),
            idade: 23,
            genero: Genero::Feminino,
            telefone: "+55 11 91234-5678".to_string(),
            deficiencia: false,
            resumo: None,
            avatar: None,
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(validate_registration(&valid_request()).is_ok());
    }

    #[test]
    fn test_blank_email_rejected() {
        let mut req = valid_request();
        req.email = "   ".to_string();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn test_email_without_at_rejected() {
        let mut req = valid_request();
        req.email = "ana.example.com".to_string();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn test_blank_password_rejected() {
        let mut req = valid_request();
        req.password = String::new();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn test_missing_fields_rejected_by_serde() {
        // No password key at all: deserialization itself must fail.
        let err = serde_json::from_str::<CreateUserRequest>(
            r#"{"email": "ana@example.com", "nome": "Ana", "idade": 23,
                "genero": "F", "telefone": "11 91234-5678"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_deficiencia_defaults_false() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"email": "ana@example.com", "password": "hunter2!", "nome": "Ana",
                "idade": 23, "genero": "F", "telefone": "11 91234-5678"}"#,
        )
        .unwrap();
        assert!(!req.deficiencia);
    }
}
