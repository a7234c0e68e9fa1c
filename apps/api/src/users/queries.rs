use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::mail::filters::RecipientFilter;
use crate::models::profile::{
    AcademicBackgroundRow, InterestRow, ProjectRow, SkillRow, WorkExperienceRow,
};
use crate::models::user::{Genero, UserProfile, UserRow};

const USER_COLUMNS: &str = "id, email, nome, idade, genero, telefone, deficiencia, resumo, \
     avatar, password_hash, is_staff, is_superuser, is_active, created_at";

pub struct NewUser<'a> {
    pub email: &'a str,
    pub nome: &'a str,
    pub idade: i32,
    pub genero: Genero,
    pub telefone: &'a str,
    pub deficiencia: bool,
    pub resumo: Option<&'a str>,
    pub avatar: Option<&'a str>,
    pub password_hash: &'a str,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Fields of a partial user update. `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct UserPatch {
    pub nome: Option<String>,
    pub idade: Option<i32>,
    pub genero: Option<Genero>,
    pub telefone: Option<String>,
    pub deficiencia: Option<bool>,
    pub resumo: Option<String>,
    pub avatar: Option<String>,
}

pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM usuarios WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM usuarios WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn insert_user(pool: &PgPool, user: NewUser<'_>) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        INSERT INTO usuarios
            (email, nome, idade, genero, telefone, deficiencia, resumo, avatar,
             password_hash, is_staff, is_superuser)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user.email)
    .bind(user.nome)
    .bind(user.idade)
    .bind(user.genero)
    .bind(user.telefone)
    .bind(user.deficiencia)
    .bind(user.resumo)
    .bind(user.avatar)
    .bind(user.password_hash)
    .bind(user.is_staff)
    .bind(user.is_superuser)
    .fetch_one(pool)
    .await
}

/// Partial-merge update: absent fields keep their stored values.
pub async fn update_user(
    pool: &PgPool,
    id: Uuid,
    patch: &UserPatch,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        UPDATE usuarios SET
            nome        = COALESCE($2, nome),
            idade       = COALESCE($3, idade),
            genero      = COALESCE($4, genero),
            telefone    = COALESCE($5, telefone),
            deficiencia = COALESCE($6, deficiencia),
            resumo      = COALESCE($7, resumo),
            avatar      = COALESCE($8, avatar)
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(patch.nome.as_deref())
    .bind(patch.idade)
    .bind(patch.genero)
    .bind(patch.telefone.as_deref())
    .bind(patch.deficiencia)
    .bind(patch.resumo.as_deref())
    .bind(patch.avatar.as_deref())
    .fetch_optional(pool)
    .await
}

/// Deletes a user. Owned children cascade at the schema level; interest
/// associations go with them, the interest rows themselves survive.
pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Non-staff users matching the admin list filters, ordered by display name.
pub async fn list_users(
    pool: &PgPool,
    filter: &RecipientFilter,
) -> Result<Vec<UserRow>, sqlx::Error> {
    let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        "SELECT u.* FROM usuarios u WHERE u.is_superuser = FALSE AND u.is_staff = FALSE",
    );
    filter.push_conditions(&mut qb);
    qb.push(" ORDER BY u.nome");
    qb.build_query_as().fetch_all(pool).await
}

/// Expands a user row into the nested read schema.
pub async fn load_profile(pool: &PgPool, user: UserRow) -> Result<UserProfile, sqlx::Error> {
    let interesses: Vec<InterestRow> = sqlx::query_as(
        r#"
        SELECT i.id, i.nome FROM interesses i
        JOIN usuarios_interesses ui ON ui.interesse_id = i.id
        WHERE ui.usuario_id = $1
        ORDER BY i.nome
        "#,
    )
    .bind(user.id)
    .fetch_all(pool)
    .await?;

    let habilidades: Vec<SkillRow> =
        sqlx::query_as("SELECT * FROM habilidades WHERE usuario_id = $1 ORDER BY nome")
            .bind(user.id)
            .fetch_all(pool)
            .await?;

    let formacoes_academicas: Vec<AcademicBackgroundRow> =
        sqlx::query_as("SELECT * FROM formacoes_academicas WHERE usuario_id = $1 ORDER BY curso")
            .bind(user.id)
            .fetch_all(pool)
            .await?;

    let experiencias_profissionais: Vec<WorkExperienceRow> = sqlx::query_as(
        "SELECT * FROM experiencias_profissionais WHERE usuario_id = $1 ORDER BY cargo",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await?;

    let projetos: Vec<ProjectRow> =
        sqlx::query_as("SELECT * FROM projetos WHERE usuario_id = $1 ORDER BY nome")
            .bind(user.id)
            .fetch_all(pool)
            .await?;

    Ok(UserProfile {
        user: user.into(),
        interesses,
        habilidades,
        formacoes_academicas,
        experiencias_profissionais,
        projetos,
    })
}
