use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named tag shared many-to-many with users via `usuarios_interesses`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterestRow {
    pub id: Uuid,
    pub nome: String,
}

/// Skill proficiency runs 1 (beginner) to 3 (advanced).
pub const NIVEL_MIN: i16 = 1;
pub const NIVEL_MAX: i16 = 3;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub usuario_id: Uuid,
    pub nome: String,
    pub nivel: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AcademicBackgroundRow {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub usuario_id: Uuid,
    pub curso: String,
    pub instituicao: String,
    pub ano_inicio: i32,
    pub ano_conclusao: i32,
    pub semestre: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkExperienceRow {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub usuario_id: Uuid,
    pub cargo: String,
    pub empresa: String,
    pub ano_inicio: i32,
    pub ano_fim: Option<i32>,
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub usuario_id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
    pub link: String,
}
