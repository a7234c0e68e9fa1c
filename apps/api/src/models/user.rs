use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::profile::{
    AcademicBackgroundRow, InterestRow, ProjectRow, SkillRow, WorkExperienceRow,
};

/// Gender choices, stored as the `genero` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "genero")]
pub enum Genero {
    #[sqlx(rename = "M")]
    #[serde(rename = "M")]
    Masculino,
    #[sqlx(rename = "F")]
    #[serde(rename = "F")]
    Feminino,
    #[sqlx(rename = "O")]
    #[serde(rename = "O")]
    Outro,
}

/// A full `usuarios` row. Never serialized directly: the password hash and
/// permission flags stay server-side, responses go through [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub nome: String,
    pub idade: i32,
    pub genero: Genero,
    pub telefone: String,
    pub deficiencia: bool,
    pub resumo: Option<String>,
    pub avatar: Option<String>,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The flat, safe-to-expose slice of a user row.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub nome: String,
    pub idade: i32,
    pub genero: Genero,
    pub telefone: String,
    pub deficiencia: bool,
    pub resumo: Option<String>,
    pub avatar: Option<String>,
}

impl From<UserRow> for PublicUser {
    fn from(row: UserRow) -> Self {
        PublicUser {
            id: row.id,
            email: row.email,
            nome: row.nome,
            idade: row.idade,
            genero: row.genero,
            telefone: row.telefone,
            deficiencia: row.deficiencia,
            resumo: row.resumo,
            avatar: row.avatar,
        }
    }
}

/// Read schema for a user: the public fields plus every expanded relationship.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub interesses: Vec<InterestRow>,
    pub habilidades: Vec<SkillRow>,
    pub formacoes_academicas: Vec<AcademicBackgroundRow>,
    pub experiencias_profissionais: Vec<WorkExperienceRow>,
    pub projetos: Vec<ProjectRow>,
}
