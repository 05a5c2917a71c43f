//! Analysis Plan - The ordered question pairs each analysis runs over.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Pairs the built-in plan crosses, with their chart titles.
const SURVEY_PAIRS: &[(&str, &str, &str)] = &[
    ("GrupoMinoritario", "SegurancaPsicologica", "Grupo Minoritário x Segurança psicológica"),
    ("GrupoMinoritario", "ImpactoDesempenho", "Grupo Minoritário x Impacto no desempenho"),
    ("GrupoMinoritario", "LiderancaInclusiva", "Grupo Minoritário x Liderança inclusiva"),
    ("Discriminacao", "SegurancaPsicologica", "Discriminação x Segurança psicológica"),
    ("Discriminacao", "ImpactoDesempenho", "Discriminação x Impacto no desempenho"),
    ("Genero", "BemEstarEmocional", "Gênero x Bem-estar emocional"),
    ("Genero", "SegurancaPsicologica", "Gênero x Segurança psicológica"),
    ("FaixaEtaria", "SegurancaPsicologica", "Faixa etária x Segurança psicológica"),
    ("FaixaEtaria", "BemEstarEmocional", "Faixa etária x Bem-estar emocional"),
    ("Escolaridade", "SegurancaPsicologica", "Escolaridade x Segurança psicológica"),
    ("Escolaridade", "BemEstarEmocional", "Escolaridade x Bem-estar emocional"),
    ("SegurancaPsicologica", "BemEstarEmocional", "Segurança psicológica x Bem-estar emocional"),
    ("ExperienciaAgil", "SegurancaPsicologica", "Experiência ágil x Segurança psicológica"),
    ("ExperienciaAgil", "BemEstarEmocional", "Experiência ágil x Bem-estar emocional"),
    ("Diversidade", "SegurancaPsicologica", "Diversidade x Segurança psicológica"),
    ("Representatividade", "SegurancaPsicologica", "Representatividade x Segurança psicológica"),
    (
        "RepresentatividadeNaLideranca",
        "SegurancaPsicologica",
        "Representatividade na liderança x Segurança psicológica",
    ),
    ("LiderancaInclusiva", "SegurancaPsicologica", "Liderança inclusiva x Segurança psicológica"),
    ("LiderancaInclusiva", "BemEstarEmocional", "Liderança inclusiva x Bem-estar emocional"),
    ("Inseguranca", "SegurancaPsicologica", "Insegurança x Segurança psicológica"),
    ("Inseguranca", "ImpactoDesempenho", "Insegurança x Impacto no desempenho"),
    ("Representatividade", "ImpactoDesempenho", "Representatividade x Impacto no desempenho"),
];

/// Two questions to cross, and the title their chart carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPair {
    pub row: String,
    pub column: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl AnalysisPair {
    pub fn new(row: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            column: column.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Chart title, defaulting to `"<row> x <column>"`.
    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} x {}", self.row, self.column))
    }

    /// File-name-safe identifier, e.g. `genero_x_bemestaremocional`.
    pub fn slug(&self) -> String {
        let raw = format!("{}_x_{}", self.row, self.column);
        raw.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

/// Ordered list of pairs to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPlan {
    pub pairs: Vec<AnalysisPair>,
}

impl AnalysisPlan {
    pub fn new(pairs: Vec<AnalysisPair>) -> Self {
        Self { pairs }
    }

    /// The 22 pairs of the survey study, in publication order.
    pub fn survey_default() -> Self {
        Self::new(
            SURVEY_PAIRS
                .iter()
                .map(|(row, column, title)| AnalysisPair::new(*row, *column).with_title(*title))
                .collect(),
        )
    }

    /// Parses a plan from YAML:
    ///
    /// ```yaml
    /// pairs:
    ///   - row: Genero
    ///     column: BemEstarEmocional
    ///     title: "Gênero x Bem-estar emocional"
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, DomainError> {
        let plan: Self = serde_yaml::from_str(source)
            .map_err(|e| DomainError::new(ErrorCode::InvalidPlan, e.to_string()))?;
        plan.validate()?;
        Ok(plan)
    }

    /// Reads and parses a YAML plan file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, DomainError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            DomainError::new(ErrorCode::InvalidPlan, e.to_string())
                .with_detail("path", path.display().to_string())
        })?;
        Self::from_yaml(&source)
    }

    /// Rejects empty plans, blank or self-crossed pairs, and pairs whose
    /// chart file names would collide.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.pairs.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InvalidPlan,
                "Analysis plan has no pairs",
            ));
        }
        for (index, pair) in self.pairs.iter().enumerate() {
            if pair.row.trim().is_empty() || pair.column.trim().is_empty() {
                return Err(DomainError::new(
                    ErrorCode::InvalidPlan,
                    "Pair has an empty column name",
                )
                .with_detail("index", index.to_string()));
            }
            if pair.row == pair.column {
                return Err(DomainError::new(
                    ErrorCode::InvalidPlan,
                    format!("Pair crosses '{}' with itself", pair.row),
                )
                .with_detail("index", index.to_string()));
            }
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (index, pair) in self.pairs.iter().enumerate() {
            let slug = pair.slug();
            if let Some(first) = seen.insert(slug.clone(), index) {
                return Err(DomainError::new(
                    ErrorCode::InvalidPlan,
                    format!("Pairs {} and {} share the chart name '{}'", first, index, slug),
                )
                .with_detail("index", index.to_string()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisPair> {
        self.pairs.iter()
    }
}

impl Default for AnalysisPlan {
    fn default() -> Self {
        Self::survey_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn survey_default_has_all_pairs_in_order() {
        let plan = AnalysisPlan::survey_default();

        assert_eq!(plan.len(), 22);
        assert_eq!(plan.pairs[0].row, "GrupoMinoritario");
        assert_eq!(plan.pairs[0].column, "SegurancaPsicologica");
        assert_eq!(plan.pairs[21].title(), "Representatividade x Impacto no desempenho");
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn escolaridade_pair_crosses_psychological_safety() {
        let plan = AnalysisPlan::survey_default();
        let pair = plan
            .iter()
            .find(|p| p.title() == "Escolaridade x Segurança psicológica")
            .unwrap();

        assert_eq!(pair.column, "SegurancaPsicologica");
    }

    #[test]
    fn title_defaults_to_column_names() {
        assert_eq!(AnalysisPair::new("A", "B").title(), "A x B");
        assert_eq!(AnalysisPair::new("A", "B").with_title("T").title(), "T");
    }

    #[test]
    fn slug_is_file_safe() {
        let pair = AnalysisPair::new("Genero", "Bem Estar/Emocional");
        assert_eq!(pair.slug(), "genero_x_bem_estar_emocional");
    }

    #[test]
    fn parses_yaml_plan() {
        let plan = AnalysisPlan::from_yaml(
            "pairs:\n  - row: Genero\n    column: BemEstarEmocional\n  - row: A\n    column: B\n    title: Custom\n",
        )
        .unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.pairs[0].title(), "Genero x BemEstarEmocional");
        assert_eq!(plan.pairs[1].title(), "Custom");
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = AnalysisPlan::from_yaml("pairs: [1, 2").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPlan);
    }

    #[test]
    fn rejects_empty_and_self_crossed_plans() {
        assert!(AnalysisPlan::from_yaml("pairs: []").is_err());

        let err = AnalysisPlan::from_yaml("pairs:\n  - row: A\n    column: A\n").unwrap_err();
        assert_eq!(err.details.get("index"), Some(&"0".to_string()));
    }

    #[test]
    fn rejects_pairs_with_colliding_chart_names() {
        let plan = AnalysisPlan::new(vec![
            AnalysisPair::new("A B", "C"),
            AnalysisPair::new("A_B", "C"),
        ]);
        let err = plan.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPlan);
        assert_eq!(err.details.get("index"), Some(&"1".to_string()));

        let err = AnalysisPlan::from_yaml(
            "pairs:\n  - row: X\n    column: Y\n  - row: X\n    column: Y\n    title: Again\n",
        )
        .unwrap_err();
        assert!(err.message.contains("x_x_y"));
    }

    #[test]
    fn reads_plan_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pairs:\n  - row: X\n    column: Y").unwrap();

        let plan = AnalysisPlan::from_yaml_file(file.path()).unwrap();
        assert_eq!(plan.pairs, vec![AnalysisPair::new("X", "Y")]);
    }

    #[test]
    fn missing_plan_file_is_reported() {
        let err = AnalysisPlan::from_yaml_file(Path::new("/nonexistent/plan.yaml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPlan);
        assert!(err.details.contains_key("path"));
    }
}
