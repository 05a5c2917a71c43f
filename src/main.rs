//! survey-insights - command-line entry point.
//!
//! Loads configuration from the environment, applies command-line
//! overrides, and runs the requested analyses over one survey export.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use survey_insights::adapters::{
    ConsoleReportWriter, CsvSurveySource, JsonReportWriter, SvgBiplotRenderer,
};
use survey_insights::application::{
    AppError, AssociationHandler, CorrespondenceHandler, InspectColumnsHandler, LoadSurveyHandler,
    RunAssociationCommand, RunCorrespondenceCommand,
};
use survey_insights::config::{
    AppConfig, ConfigError, LogFormat, LoggingConfig, ReportFormat, ValidationError,
};
use survey_insights::domain::foundation::DomainError;
use survey_insights::ports::{ReportWriter, SurveySource};

#[derive(Debug, Parser)]
#[command(
    name = "survey-insights",
    about = "Correspondence analysis and chi-square tests for categorical survey data",
    version
)]
struct Cli {
    /// Survey export (CSV)
    #[arg(long, global = true, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Directory receiving the SVG charts
    #[arg(long = "output-dir", global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// YAML file listing the question pairs to analyze
    #[arg(long, global = true, value_name = "FILE")]
    plan: Option<PathBuf>,

    /// Significance level for the chi-square decision
    #[arg(long, global = true, value_name = "F")]
    alpha: Option<f64>,

    /// Report style on standard output (table or json)
    #[arg(long, global = true, value_name = "FORMAT")]
    format: Option<ReportFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// List the raw column headers of the input file
    Columns,
    /// Render a correspondence-analysis biplot per question pair
    Correspondence,
    /// Run a chi-square test per question pair
    Association,
    /// Columns, correspondence analysis, then association tests
    All,
}

/// One step of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Columns,
    Correspondence,
    Association,
}

impl Command {
    fn stages(self) -> &'static [Stage] {
        match self {
            Command::Columns => &[Stage::Columns],
            Command::Correspondence => &[Stage::Correspondence],
            Command::Association => &[Stage::Association],
            Command::All => &[Stage::Columns, Stage::Correspondence, Stage::Association],
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Could not load analysis plan: {0}")]
    Plan(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => apply_overrides(config, &cli),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(input) = &cli.input {
        config.input.path = input.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(plan) = &cli.plan {
        config.analysis.plan_file = Some(plan.clone());
    }
    if let Some(alpha) = cli.alpha {
        config.analysis.significance_level = alpha;
    }
    if let Some(format) = cli.format {
        config.output.report_format = format;
    }
    config
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }
}

fn run(cli: &Cli, config: &AppConfig) -> Result<(), CliError> {
    config.validate()?;

    let source: Arc<dyn SurveySource> = Arc::new(
        CsvSurveySource::new(&config.input.path).with_delimiter(config.input.delimiter_byte()),
    );
    let mut report: Box<dyn ReportWriter> = match config.output.report_format {
        ReportFormat::Table => Box::new(ConsoleReportWriter::stdout()),
        ReportFormat::Json => Box::new(JsonReportWriter::stdout()),
    };

    info!(input = %config.input.path.display(), "Starting survey analysis");

    let stages = cli.command.stages();
    if stages.contains(&Stage::Columns) {
        InspectColumnsHandler::new(source.clone()).handle(report.as_mut())?;
    }
    if stages == [Stage::Columns] {
        return Ok(());
    }

    let plan = config.analysis.plan()?;
    let dataset = LoadSurveyHandler::new(source, config.analysis.preparer()).handle()?;

    for stage in stages {
        match stage {
            Stage::Columns => {}
            Stage::Correspondence => {
                let renderer = SvgBiplotRenderer::new(&config.output.directory)
                    .with_size(config.output.width, config.output.height)
                    .with_layout(config.analysis.layout);
                let mut cmd = RunCorrespondenceCommand::new(plan.clone());
                cmd.max_components = config.analysis.max_components;
                CorrespondenceHandler::new(Arc::new(renderer))
                    .handle(&cmd, &dataset, report.as_mut())?;
            }
            Stage::Association => {
                let cmd = RunAssociationCommand::new(plan.clone())
                    .with_significance_level(config.analysis.significance()?);
                AssociationHandler::new().handle(&cmd, &dataset, report.as_mut())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("survey-insights").chain(args.iter().copied()))
    }

    #[test]
    fn no_flags_keep_loaded_config() {
        let cli = parse(&["association"]);
        let config = apply_overrides(AppConfig::default(), &cli);

        assert_eq!(config.input.path, PathBuf::from("respostas.csv"));
        assert_eq!(config.output.directory, PathBuf::from("plots"));
        assert_eq!(config.analysis.plan_file, None);
        assert_eq!(config.analysis.significance_level, 0.05);
        assert_eq!(config.output.report_format, ReportFormat::Table);
    }

    #[test]
    fn input_flag_overrides_config() {
        let config = apply_overrides(
            AppConfig::default(),
            &parse(&["--input", "export.csv", "columns"]),
        );
        assert_eq!(config.input.path, PathBuf::from("export.csv"));
    }

    #[test]
    fn output_dir_flag_overrides_config() {
        let config = apply_overrides(
            AppConfig::default(),
            &parse(&["correspondence", "--output-dir", "charts"]),
        );
        assert_eq!(config.output.directory, PathBuf::from("charts"));
    }

    #[test]
    fn plan_flag_overrides_config() {
        let config = apply_overrides(
            AppConfig::default(),
            &parse(&["--plan", "pairs.yaml", "all"]),
        );
        assert_eq!(config.analysis.plan_file, Some(PathBuf::from("pairs.yaml")));
    }

    #[test]
    fn alpha_flag_overrides_config() {
        let config = apply_overrides(AppConfig::default(), &parse(&["association", "--alpha", "0.01"]));
        assert_eq!(config.analysis.significance_level, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn format_flag_overrides_config() {
        let config = apply_overrides(AppConfig::default(), &parse(&["--format", "json", "all"]));
        assert_eq!(config.output.report_format, ReportFormat::Json);
    }

    #[test]
    fn unknown_format_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["survey-insights", "--format", "xml", "all"]);
        assert!(result.is_err());
    }

    #[test]
    fn alpha_outside_unit_interval_fails_validation() {
        let config = apply_overrides(AppConfig::default(), &parse(&["association", "--alpha", "1.5"]));
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidSignificanceLevel(1.5))
        );
    }

    #[test]
    fn all_runs_columns_then_correspondence_then_association() {
        assert_eq!(
            parse(&["all"]).command.stages(),
            &[Stage::Columns, Stage::Correspondence, Stage::Association]
        );
    }

    #[test]
    fn single_commands_run_one_stage() {
        assert_eq!(parse(&["columns"]).command.stages(), &[Stage::Columns]);
        assert_eq!(
            parse(&["correspondence"]).command.stages(),
            &[Stage::Correspondence]
        );
        assert_eq!(parse(&["association"]).command.stages(), &[Stage::Association]);
    }
}
