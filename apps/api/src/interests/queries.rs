use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::InterestRow;

/// Looks up an interest by name, creating it when absent. The upsert keeps
/// this race-free: two concurrent attaches of the same name converge on one
/// row.
pub async fn find_or_create(pool: &PgPool, nome: &str) -> Result<InterestRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO interesses (nome) VALUES ($1)
        ON CONFLICT (nome) DO UPDATE SET nome = EXCLUDED.nome
        RETURNING id, nome
        "#,
    )
    .bind(nome)
    .fetch_one(pool)
    .await
}

pub async fn attach(pool: &PgPool, usuario_id: Uuid, interesse_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO usuarios_interesses (usuario_id, interesse_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(usuario_id)
    .bind(interesse_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Removes the association only; the interest row itself survives.
pub async fn detach(pool: &PgPool, usuario_id: Uuid, interesse_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM usuarios_interesses WHERE usuario_id = $1 AND interesse_id = $2")
        .bind(usuario_id)
        .bind(interesse_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_for_user(pool: &PgPool, usuario_id: Uuid) -> Result<Vec<InterestRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT i.id, i.nome FROM interesses i
        JOIN usuarios_interesses ui ON ui.interesse_id = i.id
        WHERE ui.usuario_id = $1
        ORDER BY i.nome
        "#,
    )
    .bind(usuario_id)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<InterestRow>, sqlx::Error> {
    sqlx::query_as("SELECT id, nome FROM interesses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn rename(
    pool: &PgPool,
    id: Uuid,
    nome: &str,
) -> Result<Option<InterestRow>, sqlx::Error> {
    sqlx::query_as("UPDATE interesses SET nome = $2 WHERE id = $1 RETURNING id, nome")
        .bind(id)
        .bind(nome)
        .fetch_optional(pool)
        .await
}

/// Hard delete of the interest row itself (admin only); associations cascade.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM interesses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
