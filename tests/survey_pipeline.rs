//! End-to-end run over a small questionnaire export.
//!
//! Drives the real CSV source, the SVG renderer and the console report
//! through the application handlers.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use survey_insights::adapters::{ConsoleReportWriter, CsvSurveySource, SvgBiplotRenderer};
use survey_insights::application::{
    AssociationHandler, CorrespondenceHandler, InspectColumnsHandler, LoadSurveyHandler,
    PairOutcome, RunAssociationCommand, RunCorrespondenceCommand, RunSummary,
};
use survey_insights::domain::analysis::{AnalysisPair, AnalysisPlan};
use survey_insights::domain::survey::{SurveyDataset, SurveyPreparer, TIMESTAMP_COLUMN};
use survey_insights::ports::{NoticeKind, SurveySource};

const GENDER: &str = "Gênero";
const AGE: &str = "Faixa Etária";
const MINORITY: &str = "A qual ou quais grupo(s) minoritário(s) você pertence?";
const SAFETY: &str = "Nas equipes em que você atuou/atua, você sentiu/sente liberdade para expressar opiniões e dúvidas sem medo de julgamento?";
const WELLBEING: &str =
    "Como você avalia seu bem-estar emocional nos ambientes ágeis em que atuou/atua?";

const RESPONSES: &[[&str; 6]] = &[
    ["2024/05/01 10:00", "Feminino", "25-34", "Mulher, Pessoa negra", "Sim", "Bom"],
    ["2024/05/01 10:05", "Feminino", "25-34", "Pessoa negra,Mulher", "Sim", "Bom"],
    ["2024/05/01 10:10", "Feminino", "25-34", "Mulher", "Não", "Regular"],
    ["2024/05/01 10:15", "Feminino", "25-34", "Mulher", "Sim", "Bom"],
    ["2024/05/01 10:20", "Masculino", "25-34", "Pessoa negra", "Não", "Ruim"],
    ["2024/05/01 10:25", "Masculino", "25-34", "Pessoa negra", "Não", "Ruim"],
    ["2024/05/01 10:30", "Masculino", "25-34", "LGBTQIAPN+", "Sim", "Regular"],
    ["2024/05/01 10:35", "Masculino", "25-34", "", "Não", "Ruim"],
    ["2024/05/01 10:40", "Feminino", "25-34", "Mulher", "Às vezes", "Bom"],
    ["2024/05/01 10:45", "Masculino", "25-34", "Pessoa negra", "Às vezes", "Regular"],
    ["2024/05/01 10:50", "Feminino", "25-34", "Mulher, Pessoa negra", "Sim", "Bom"],
    ["2024/05/01 10:55", "Masculino", "25-34", "LGBTQIAPN+", "Não", "Ruim"],
];

fn write_export(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("respostas.csv");
    let mut writer = csv::Writer::from_path(&path).unwrap();
    let age = format!(" {} ", AGE);
    // Form exports carry a byte-order mark and stray whitespace in headers.
    writer
        .write_record([
            "\u{feff}Carimbo de data/hora",
            GENDER,
            age.as_str(),
            MINORITY,
            SAFETY,
            WELLBEING,
        ])
        .unwrap();
    for response in RESPONSES {
        writer.write_record(response).unwrap();
    }
    writer.flush().unwrap();
    path
}

fn plan() -> AnalysisPlan {
    AnalysisPlan::new(vec![
        AnalysisPair::new("Genero", "BemEstarEmocional").with_title("Gênero x Bem-estar emocional"),
        AnalysisPair::new("GrupoMinoritario", "SegurancaPsicologica"),
        AnalysisPair::new("FaixaEtaria", "SegurancaPsicologica"),
        AnalysisPair::new("Discriminacao", "SegurancaPsicologica"),
    ])
}

fn load(source: Arc<dyn SurveySource>) -> SurveyDataset {
    LoadSurveyHandler::new(source, SurveyPreparer::new())
        .handle()
        .unwrap()
}

#[test]
fn columns_are_listed_as_exported() {
    let dir = TempDir::new().unwrap();
    let source: Arc<dyn SurveySource> = Arc::new(CsvSurveySource::new(write_export(dir.path())));
    let mut report = ConsoleReportWriter::new(Vec::new());

    let result = InspectColumnsHandler::new(source).handle(&mut report).unwrap();

    assert_eq!(result.columns.len(), 6);
    let text = String::from_utf8(report.into_inner()).unwrap();
    assert!(text.contains("--- Colunas do arquivo ---"));
    assert!(text.contains(WELLBEING));
}

#[test]
fn preparation_renames_drops_and_normalizes() {
    let dir = TempDir::new().unwrap();
    let dataset = load(Arc::new(CsvSurveySource::new(write_export(dir.path()))));

    assert_eq!(dataset.respondent_count(), 12);
    assert!(!dataset.has_column(TIMESTAMP_COLUMN));
    for column in [
        "Genero",
        "FaixaEtaria",
        "GrupoMinoritario",
        "SegurancaPsicologica",
        "BemEstarEmocional",
    ] {
        assert!(dataset.has_column(column), "missing {}", column);
    }

    let groups = dataset.column_values("GrupoMinoritario").unwrap();
    assert_eq!(groups[0], Some("Mulher;Pessoa negra"));
    assert_eq!(groups[1], Some("Mulher;Pessoa negra"));
    assert_eq!(groups[7], None);
}

#[test]
fn correspondence_renders_charts_and_skips_unusable_pairs() {
    let dir = TempDir::new().unwrap();
    let plots = dir.path().join("plots");
    let dataset = load(Arc::new(CsvSurveySource::new(write_export(dir.path()))));
    let handler = CorrespondenceHandler::new(Arc::new(SvgBiplotRenderer::new(&plots)));
    let mut report = ConsoleReportWriter::new(Vec::new());

    let outcomes = handler
        .handle(&RunCorrespondenceCommand::new(plan()), &dataset, &mut report)
        .unwrap();

    let summary = RunSummary::of(&outcomes);
    assert_eq!((summary.completed, summary.skipped, summary.failed), (2, 2, 0));

    let gender = outcomes[0].completed().unwrap();
    assert_eq!(gender.shape, (2, 3));
    assert_eq!(gender.eigenvalues.len(), 1);
    assert_eq!(gender.chart_path, plots.join("genero_x_bemestaremocional.svg"));
    assert!(gender.chart_path.exists());
    assert!(plots.join("genero_x_bemestaremocional_legend.svg").exists());

    let groups = outcomes[1].completed().unwrap();
    assert_eq!(groups.shape, (4, 3));
    assert_eq!(groups.eigenvalues.len(), 2);
    assert_eq!(groups.legend.len(), 4);

    match &outcomes[2] {
        PairOutcome::Skipped(notice) => {
            assert_eq!(notice.kind, NoticeKind::Skipped);
            assert_eq!(notice.shape, Some((1, 3)));
        }
        other => panic!("expected skipped age pair, got {:?}", other.is_completed()),
    }
    match &outcomes[3] {
        PairOutcome::Skipped(notice) => assert_eq!(notice.shape, None),
        other => panic!("expected skipped unknown column, got {:?}", other.is_completed()),
    }

    let chart = std::fs::read_to_string(plots.join("genero_x_bemestaremocional.svg")).unwrap();
    assert!(chart.contains("<svg"));
    let text = String::from_utf8(report.into_inner()).unwrap();
    assert!(text.contains("Ignorado FaixaEtaria x SegurancaPsicologica"));
}

#[test]
fn association_reports_significance_and_effect_size() {
    let dir = TempDir::new().unwrap();
    let dataset = load(Arc::new(CsvSurveySource::new(write_export(dir.path()))));
    let mut report = ConsoleReportWriter::new(Vec::new());

    let outcomes = AssociationHandler::new()
        .handle(&RunAssociationCommand::new(plan()), &dataset, &mut report)
        .unwrap();

    let gender = outcomes[0].completed().unwrap();
    assert_eq!(gender.degrees_of_freedom, 2);
    assert!(!gender.continuity_corrected);
    assert!((gender.statistic - 28.0 / 3.0).abs() < 1e-9);
    assert!(gender.p_value < 0.05);
    assert!(gender.significant);
    assert!(gender.cramers_v.is_some());

    assert!(matches!(outcomes[2], PairOutcome::Skipped(_)));
    assert!(matches!(outcomes[3], PairOutcome::Skipped(_)));

    let text = String::from_utf8(report.into_inner()).unwrap();
    assert!(text.contains("V de Cramér = "));
    assert!(text.contains("Associação estatisticamente significativa"));
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(CsvSurveySource::new(dir.path().join("absent.csv")));

    let result = LoadSurveyHandler::new(source, SurveyPreparer::new()).handle();

    assert!(result.is_err());
}
