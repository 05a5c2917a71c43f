//! Survey Preparer - The shared cleaning pipeline applied before any analysis.

use tracing::debug;

use super::{standardize_multiselect, QuestionCatalog, SurveyDataset, TIMESTAMP_COLUMN};

/// Cleans a raw survey export into analysis-ready form.
///
/// Steps, in order:
/// 1. normalize headers and map catalogued questions to identifiers
/// 2. drop columns that carry no categorical signal
/// 3. canonicalize multi-select answers
#[derive(Debug, Clone)]
pub struct SurveyPreparer {
    catalog: QuestionCatalog,
    dropped_columns: Vec<String>,
    multiselect_columns: Vec<String>,
}

impl Default for SurveyPreparer {
    fn default() -> Self {
        Self {
            catalog: QuestionCatalog::survey().clone(),
            dropped_columns: vec![TIMESTAMP_COLUMN.to_string()],
            multiselect_columns: vec!["GrupoMinoritario".to_string()],
        }
    }
}

impl SurveyPreparer {
    /// Creates a preparer with the questionnaire defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the columns removed after renaming.
    pub fn with_dropped_columns(mut self, columns: Vec<String>) -> Self {
        self.dropped_columns = columns;
        self
    }

    /// Sets the columns holding multi-select answers.
    pub fn with_multiselect_columns(mut self, columns: Vec<String>) -> Self {
        self.multiselect_columns = columns;
        self
    }

    /// Runs the cleaning pipeline on a raw dataset.
    pub fn prepare(&self, mut dataset: SurveyDataset) -> SurveyDataset {
        dataset.map_headers(|raw| self.catalog.resolve(raw));

        for column in &self.dropped_columns {
            if !dataset.drop_column(column) {
                debug!(column = %column, "Column to drop not present");
            }
        }

        for column in &self.multiselect_columns {
            if dataset.map_column(column, standardize_multiselect) {
                debug!(column = %column, "Standardized multi-select answers");
            } else {
                debug!(column = %column, "Multi-select column not present");
            }
        }

        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_export() -> SurveyDataset {
        SurveyDataset::from_records(
            vec![
                "Carimbo de data/hora".to_string(),
                " Gênero ".to_string(),
                "A qual ou quais grupo(s) minoritário(s)\nvocê pertence?".to_string(),
            ],
            vec![
                vec!["2024/05/01 10:00", "Feminino", "Pessoa negra, Mulher"],
                vec!["2024/05/01 10:05", "Masculino", "Mulher;Pessoa negra"],
                vec!["2024/05/01 10:09", "Masculino", ""],
            ],
        )
    }

    #[test]
    fn prepare_renames_catalogued_questions() {
        let dataset = SurveyPreparer::new().prepare(raw_export());
        assert_eq!(
            dataset.columns(),
            &["Genero".to_string(), "GrupoMinoritario".to_string()]
        );
    }

    #[test]
    fn prepare_canonicalizes_multiselect() {
        let dataset = SurveyPreparer::new().prepare(raw_export());
        let groups = dataset.column_values("GrupoMinoritario").unwrap();
        assert_eq!(
            groups,
            vec![Some("Mulher;Pessoa negra"), Some("Mulher;Pessoa negra"), None]
        );
    }

    #[test]
    fn prepare_tolerates_missing_optional_columns() {
        let dataset = SurveyDataset::from_records(
            vec!["Escolaridade".to_string()],
            vec![vec!["Superior completo"]],
        );
        let prepared = SurveyPreparer::new().prepare(dataset);
        assert_eq!(prepared.columns(), &["Escolaridade".to_string()]);
    }

    #[test]
    fn custom_multiselect_columns_are_honored() {
        let dataset = SurveyDataset::from_records(
            vec!["Ferramentas".to_string()],
            vec![vec!["Jira, Trello"]],
        );
        let prepared = SurveyPreparer::new()
            .with_multiselect_columns(vec!["Ferramentas".to_string()])
            .prepare(dataset);

        assert_eq!(
            prepared.column_values("Ferramentas").unwrap(),
            vec![Some("Jira;Trello")]
        );
    }
}
