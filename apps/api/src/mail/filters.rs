use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::models::user::Genero;

/// Declarative audience selector for the bulk-email broadcast and the admin
/// user list. Every supplied criterion narrows the result set: composition is
/// strictly conjunctive (AND), matching nothing means an empty audience.
///
/// `interesses` and `habilidades` take comma-separated name lists; the user
/// must hold every listed name.
#[derive(Debug, Default, Deserialize)]
pub struct RecipientFilter {
    pub genero: Option<Genero>,
    pub ativo: Option<bool>,
    pub deficiencia: Option<bool>,
    pub idade_maior_que: Option<i32>,
    pub idade_menor_que: Option<i32>,
    pub curso: Option<String>,
    pub instituicao: Option<String>,
    pub semestre_minimo: Option<i32>,
    pub semestre_maximo: Option<i32>,
    pub interesses: Option<String>,
    pub habilidades: Option<String>,
    pub nivel: Option<i16>,
    pub projeto_nome: Option<String>,
    pub projeto_link: Option<String>,
}

/// Splits a comma-separated name list, trimming whitespace and dropping
/// empty segments.
fn csv_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl RecipientFilter {
    /// Appends one `AND ...` conjunct per supplied criterion. The base query
    /// must select from `usuarios u`.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(genero) = self.genero {
            qb.push(" AND u.genero = ").push_bind(genero);
        }
        if let Some(ativo) = self.ativo {
            qb.push(" AND u.is_active = ").push_bind(ativo);
        }
        if let Some(deficiencia) = self.deficiencia {
            qb.push(" AND u.deficiencia = ").push_bind(deficiencia);
        }
        if let Some(idade) = self.idade_maior_que {
            qb.push(" AND u.idade > ").push_bind(idade);
        }
        if let Some(idade) = self.idade_menor_que {
            qb.push(" AND u.idade < ").push_bind(idade);
        }

        if let Some(curso) = &self.curso {
            qb.push(
                " AND EXISTS (SELECT 1 FROM formacoes_academicas f \
                 WHERE f.usuario_id = u.id AND f.curso ILIKE ",
            )
            .push_bind(format!("%{curso}%"))
            .push(")");
        }
        if let Some(instituicao) = &self.instituicao {
            qb.push(
                " AND EXISTS (SELECT 1 FROM formacoes_academicas f \
                 WHERE f.usuario_id = u.id AND f.instituicao ILIKE ",
            )
            .push_bind(format!("%{instituicao}%"))
            .push(")");
        }
        if let Some(semestre) = self.semestre_minimo {
            qb.push(
                " AND EXISTS (SELECT 1 FROM formacoes_academicas f \
                 WHERE f.usuario_id = u.id AND f.semestre >= ",
            )
            .push_bind(semestre)
            .push(")");
        }
        if let Some(semestre) = self.semestre_maximo {
            qb.push(
                " AND EXISTS (SELECT 1 FROM formacoes_academicas f \
                 WHERE f.usuario_id = u.id AND f.semestre <= ",
            )
            .push_bind(semestre)
            .push(")");
        }

        // Conjoined set-membership: one EXISTS per listed interest name.
        if let Some(raw) = &self.interesses {
            for nome in csv_names(raw) {
                qb.push(
                    " AND EXISTS (SELECT 1 FROM usuarios_interesses ui \
                     JOIN interesses i ON i.id = ui.interesse_id \
                     WHERE ui.usuario_id = u.id AND i.nome = ",
                )
                .push_bind(nome)
                .push(")");
            }
        }

        // Skill names are conjoined like interests; `nivel` sets a minimum
        // proficiency on each match (or stands alone when no names are given).
        let skill_names = self.habilidades.as_deref().map(csv_names).unwrap_or_default();
        if skill_names.is_empty() {
            if let Some(nivel) = self.nivel {
                qb.push(
                    " AND EXISTS (SELECT 1 FROM habilidades h \
                     WHERE h.usuario_id = u.id AND h.nivel >= ",
                )
                .push_bind(nivel)
                .push(")");
            }
        } else {
            for nome in skill_names {
                qb.push(
                    " AND EXISTS (SELECT 1 FROM habilidades h \
                     WHERE h.usuario_id = u.id AND h.nome = ",
                )
                .push_bind(nome);
                if let Some(nivel) = self.nivel {
                    qb.push(" AND h.nivel >= ").push_bind(nivel);
                }
                qb.push(")");
            }
        }

        if let Some(nome) = &self.projeto_nome {
            qb.push(
                " AND EXISTS (SELECT 1 FROM projetos p \
                 WHERE p.usuario_id = u.id AND p.nome ILIKE ",
            )
            .push_bind(format!("%{nome}%"))
            .push(")");
        }
        if let Some(link) = &self.projeto_link {
            qb.push(
                " AND EXISTS (SELECT 1 FROM projetos p \
                 WHERE p.usuario_id = u.id AND p.link ILIKE ",
            )
            .push_bind(format!("%{link}%"))
            .push(")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str =
        "SELECT u.email FROM usuarios u WHERE u.is_superuser = FALSE AND u.is_staff = FALSE";

    fn built_sql(filter: &RecipientFilter) -> String {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(BASE);
        filter.push_conditions(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn test_empty_filter_adds_no_conditions() {
        assert_eq!(built_sql(&RecipientFilter::default()), BASE);
    }

    #[test]
    fn test_criteria_compose_conjunctively() {
        let filter = RecipientFilter {
            genero: Some(Genero::Feminino),
            idade_maior_que: Some(20),
            interesses: Some("IA,Robótica".to_string()),
            ..Default::default()
        };
        let sql = built_sql(&filter);
        assert!(sql.contains("AND u.genero = "));
        assert!(sql.contains("AND u.idade > "));
        // One EXISTS per listed interest: the user must hold both.
        assert_eq!(sql.matches("FROM usuarios_interesses").count(), 2);
        assert_eq!(sql.matches(" AND EXISTS").count(), 2);
    }

    #[test]
    fn test_substring_filters_use_ilike() {
        let filter = RecipientFilter {
            curso: Some("Engenharia".to_string()),
            instituicao: Some("UFMG".to_string()),
            projeto_nome: Some("robo".to_string()),
            projeto_link: Some("github".to_string()),
            ..Default::default()
        };
        let sql = built_sql(&filter);
        assert_eq!(sql.matches("ILIKE").count(), 4);
    }

    #[test]
    fn test_semester_range_is_two_conjuncts() {
        let filter = RecipientFilter {
            semestre_minimo: Some(3),
            semestre_maximo: Some(8),
            ..Default::default()
        };
        let sql = built_sql(&filter);
        assert!(sql.contains("f.semestre >= "));
        assert!(sql.contains("f.semestre <= "));
    }

    #[test]
    fn test_nivel_alone_filters_any_skill() {
        let filter = RecipientFilter {
            nivel: Some(2),
            ..Default::default()
        };
        let sql = built_sql(&filter);
        assert_eq!(sql.matches("FROM habilidades").count(), 1);
        assert!(sql.contains("h.nivel >= "));
    }

    #[test]
    fn test_nivel_constrains_each_named_skill() {
        let filter = RecipientFilter {
            habilidades: Some("Rust, SQL".to_string()),
            nivel: Some(3),
            ..Default::default()
        };
        let sql = built_sql(&filter);
        assert_eq!(sql.matches("FROM habilidades").count(), 2);
        assert_eq!(sql.matches("h.nivel >= ").count(), 2);
    }

    #[test]
    fn test_csv_names_trims_and_drops_empties() {
        assert_eq!(csv_names(" IA , Robótica ,,"), vec!["IA", "Robótica"]);
        assert!(csv_names("  ").is_empty());
    }
}
