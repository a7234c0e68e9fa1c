//! User-owned profile sub-resources: skills, academic background, work
//! experience and projects. Each row belongs to exactly one user and cascades
//! away with them; update/delete on the self-service routes demand ownership.

pub mod academics;
pub mod experiences;
pub mod projects;
pub mod skills;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::users::queries::find_user_by_id;

/// Only the owning user may update or delete a child record.
pub(crate) fn ensure_owner(owner_id: Uuid, requester_id: Uuid) -> Result<(), AppError> {
    if owner_id == requester_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub(crate) async fn ensure_user_exists(pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    find_user_by_id(pool, user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_may_proceed() {
        let id = Uuid::new_v4();
        assert!(ensure_owner(id, id).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let err = ensure_owner(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
