//! Analysis configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::analysis::{AnalysisPlan, LabelLayout, PLANE_COMPONENTS};
use crate::domain::foundation::{DomainError, SignificanceLevel};
use crate::domain::survey::{SurveyPreparer, TIMESTAMP_COLUMN};

/// Statistical and cleaning settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Alpha for the chi-square decision
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,

    /// Components kept by the correspondence analysis
    #[serde(default = "default_max_components")]
    pub max_components: usize,

    /// YAML plan replacing the built-in question pairs
    #[serde(default)]
    pub plan_file: Option<PathBuf>,

    /// Columns holding comma-separated multi-select answers
    #[serde(default = "default_multiselect_columns")]
    pub multiselect_columns: Vec<String>,

    /// Columns removed before analysis
    #[serde(default = "default_dropped_columns")]
    pub dropped_columns: Vec<String>,

    /// Biplot label placement tuning
    #[serde(default)]
    pub layout: LabelLayout,
}

impl AnalysisConfig {
    /// Returns the validated significance level.
    pub fn significance(&self) -> Result<SignificanceLevel, ValidationError> {
        SignificanceLevel::try_new(self.significance_level)
            .map_err(|_| ValidationError::InvalidSignificanceLevel(self.significance_level))
    }

    /// Loads the configured plan, or the built-in survey pairs.
    pub fn plan(&self) -> Result<AnalysisPlan, DomainError> {
        match &self.plan_file {
            Some(path) => AnalysisPlan::from_yaml_file(path),
            None => Ok(AnalysisPlan::survey_default()),
        }
    }

    /// Builds the cleaning pipeline these settings describe.
    pub fn preparer(&self) -> SurveyPreparer {
        SurveyPreparer::new()
            .with_dropped_columns(self.dropped_columns.clone())
            .with_multiselect_columns(self.multiselect_columns.clone())
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.significance()?;

        if self.max_components == 0 {
            return Err(ValidationError::InvalidMaxComponents);
        }

        if matches!(&self.plan_file, Some(path) if path.as_os_str().is_empty()) {
            return Err(ValidationError::MissingRequired("analysis.plan_file"));
        }

        let layout = &self.layout;
        if layout.max_iterations == 0 {
            return Err(ValidationError::InvalidLayout("max_iterations must be positive"));
        }
        if !(layout.text_force > 0.0 && layout.text_force <= 1.0)
            || !(layout.point_force > 0.0 && layout.point_force <= 1.0)
        {
            return Err(ValidationError::InvalidLayout("forces must be in (0, 1]"));
        }
        if layout.point_radius < 0.0 || layout.text_padding < 0.0 || layout.leader_threshold < 0.0 {
            return Err(ValidationError::InvalidLayout("distances must not be negative"));
        }

        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_level: default_significance_level(),
            max_components: default_max_components(),
            plan_file: None,
            multiselect_columns: default_multiselect_columns(),
            dropped_columns: default_dropped_columns(),
            layout: LabelLayout::default(),
        }
    }
}

fn default_significance_level() -> f64 {
    SignificanceLevel::FIVE_PERCENT.value()
}

fn default_max_components() -> usize {
    PLANE_COMPONENTS
}

fn default_multiselect_columns() -> Vec<String> {
    vec!["GrupoMinoritario".to_string()]
}

fn default_dropped_columns() -> Vec<String> {
    vec![TIMESTAMP_COLUMN.to_string()]
}
