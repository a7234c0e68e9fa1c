use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::AdminUser;
use crate::errors::AppError;
use crate::mail::filters::RecipientFilter;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub subject: String,
    pub message: String,
    /// Extra recipients appended to the filtered audience.
    #[serde(default)]
    pub emails: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedEmailRequest {
    pub subject: String,
    pub message: String,
    pub user_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub message: String,
    pub recipients: usize,
}

fn validate_email_body(subject: &str, message: &str) -> Result<(), AppError> {
    if subject.trim().is_empty() {
        return Err(AppError::Validation("'subject' must not be blank".to_string()));
    }
    if message.trim().is_empty() {
        return Err(AppError::Validation("'message' must not be blank".to_string()));
    }
    Ok(())
}

/// Appends extras, skipping addresses already present.
fn merge_recipients(mut recipients: Vec<String>, extras: &[String]) -> Vec<String> {
    for extra in extras {
        if !recipients.iter().any(|r| r.eq_ignore_ascii_case(extra)) {
            recipients.push(extra.clone());
        }
    }
    recipients
}

/// POST /api/v1/send-email
/// Broadcasts to every non-staff user matching ALL supplied filter criteria,
/// plus the explicit extra recipient list.
pub async fn handle_send_email(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Query(filter): Query<RecipientFilter>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    validate_email_body(&req.subject, &req.message)?;

    let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        "SELECT u.email FROM usuarios u WHERE u.is_superuser = FALSE AND u.is_staff = FALSE",
    );
    filter.push_conditions(&mut qb);
    let matched: Vec<String> = qb.build_query_scalar().fetch_all(&state.db).await?;

    let recipients = merge_recipients(matched, &req.emails);
    state
        .mailer
        .send(&req.subject, &req.message, &recipients)
        .await?;

    info!(
        "Admin {} broadcast '{}' to {} recipients",
        admin.id,
        req.subject,
        recipients.len()
    );
    Ok(Json(EmailResponse {
        message: format!("Email sent to {} users", recipients.len()),
        recipients: recipients.len(),
    }))
}

/// POST /api/v1/admin/users/send-email
/// The admin bulk action: email an explicitly selected set of users.
pub async fn handle_send_email_to_selected(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<SelectedEmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    validate_email_body(&req.subject, &req.message)?;

    let recipients: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT email FROM usuarios
        WHERE id = ANY($1) AND is_superuser = FALSE AND is_staff = FALSE
        "#,
    )
    .bind(&req.user_ids)
    .fetch_all(&state.db)
    .await?;

    state
        .mailer
        .send(&req.subject, &req.message, &recipients)
        .await?;

    info!(
        "Admin {} emailed {} selected users",
        admin.id,
        recipients.len()
    );
    Ok(Json(EmailResponse {
        message: format!("Email sent to {} users", recipients.len()),
        recipients: recipients.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_subject_rejected() {
        assert!(validate_email_body("  ", "corpo").is_err());
        assert!(validate_email_body("Assunto", "").is_err());
        assert!(validate_email_body("Assunto", "corpo").is_ok());
    }

    #[test]
    fn test_merge_skips_duplicates() {
        let merged = merge_recipients(
            vec!["ana@example.com".to_string()],
            &["ANA@example.com".to_string(), "bia@example.com".to_string()],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], "bia@example.com");
    }

    #[test]
    fn test_extra_emails_default_empty() {
        let req: EmailRequest =
            serde_json::from_str(r#"{"subject": "Oi", "message": "Olá!"}"#).unwrap();
        assert!(req.emails.is_empty());
    }
}
