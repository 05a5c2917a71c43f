//! Console Report Writer - Implementation of ReportWriter for terminals.

use std::io::{self, Write};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::ports::{
    AssociationReport, CorrespondenceReport, NoticeKind, PairNotice, ReportError, ReportWriter,
};

/// One principal axis in the inertia summary.
#[derive(Tabled)]
struct AxisRow {
    #[tabled(rename = "Eixo")]
    axis: usize,
    #[tabled(rename = "Autovalor")]
    eigenvalue: String,
    #[tabled(rename = "Inércia explicada")]
    explained: String,
}

/// Writes reports as plain text tables to any `io::Write`.
#[derive(Debug)]
pub struct ConsoleReportWriter<W: Write> {
    out: W,
}

impl ConsoleReportWriter<io::Stdout> {
    /// Creates a writer on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for ConsoleReportWriter<W> {
    fn columns(&mut self, columns: &[String]) -> Result<(), ReportError> {
        write!(self.out, "{}", format_columns(columns))?;
        Ok(())
    }

    fn correspondence(&mut self, report: &CorrespondenceReport) -> Result<(), ReportError> {
        write!(self.out, "{}", format_correspondence(report))?;
        Ok(())
    }

    fn association(&mut self, report: &AssociationReport) -> Result<(), ReportError> {
        write!(self.out, "{}", format_association(report))?;
        Ok(())
    }

    fn notice(&mut self, notice: &PairNotice) -> Result<(), ReportError> {
        writeln!(self.out, "{}", format_notice(notice))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}

fn format_columns(columns: &[String]) -> String {
    let mut text = String::from("\n--- Colunas do arquivo ---\n");
    for column in columns {
        text.push_str(&format!("- {}\n", column));
    }
    text.push_str("---------------------------\n\n");
    text
}

fn format_correspondence(report: &CorrespondenceReport) -> String {
    let rows: Vec<AxisRow> = report
        .eigenvalues
        .iter()
        .zip(&report.explained_inertia)
        .enumerate()
        .map(|(i, (eigenvalue, explained))| AxisRow {
            axis: i + 1,
            eigenvalue: format!("{:.4}", eigenvalue),
            explained: explained.to_string(),
        })
        .collect();
    let mut axes = Table::new(rows);
    axes.with(Style::modern());

    let mut text = format!(
        "\nAnálise de Correspondência: {} ({} x {})\n",
        report.pair.title(),
        report.pair.row,
        report.pair.column
    );
    text.push_str(&format!(
        "Tabela: {} x {}, inércia total = {:.4}\n",
        report.shape.0, report.shape.1, report.total_inertia
    ));
    text.push_str(&format!("{}\n", axes));
    text.push_str(&format!("{}:\n", report.legend_title));
    for entry in &report.legend {
        text.push_str(&format!("  {}: {}\n", entry.key, entry.category));
    }
    text.push_str(&format!("Gráfico: {}\n", report.chart_path.display()));
    text.push_str(&format!("Legenda: {}\n", report.legend_path.display()));
    text
}

fn format_association(report: &AssociationReport) -> String {
    let mut builder = Builder::default();
    let mut header = vec![String::new()];
    header.extend(report.column_labels.iter().cloned());
    builder.push_record(header);
    for (label, expected) in report.row_labels.iter().zip(&report.expected) {
        let mut record = vec![label.clone()];
        record.extend(expected.iter().map(|e| format!("{:.2}", e)));
        builder.push_record(record);
    }
    let mut table = builder.build();
    table.with(Style::modern());

    let cramers_v = report
        .cramers_v
        .map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "indefinido".to_string());

    let mut text = String::from("\nFrequências esperadas:\n");
    text.push_str(&format!("{}\n", table));
    text.push_str(&format!("\n{} x {}\n", report.pair.row, report.pair.column));
    text.push_str(&format!(
        "χ² = {:.3}, gl = {}, valor-p = {:.4}{}\n",
        report.statistic,
        report.degrees_of_freedom,
        report.p_value,
        if report.continuity_corrected {
            " (Yates)"
        } else {
            ""
        }
    ));
    text.push_str(&format!("V de Cramér = {}\n", cramers_v));
    text.push_str(&format!("→ {} ({})\n", capitalize(report.verdict()), report.significance_level));
    text
}

fn format_notice(notice: &PairNotice) -> String {
    let kind = match notice.kind {
        NoticeKind::Skipped => "Ignorado",
        NoticeKind::Failed => "Falhou",
    };
    let mut text = format!(
        "{} {} x {}: {}",
        kind, notice.pair.row, notice.pair.column, notice.reason
    );
    if let Some((rows, columns)) = notice.shape {
        text.push_str(&format!(" (formato da tabela: {} x {})", rows, columns));
    }
    text
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisPair;
    use crate::domain::foundation::{Percentage, SignificanceLevel};
    use crate::ports::LegendEntry;
    use std::path::PathBuf;

    fn association() -> AssociationReport {
        AssociationReport {
            pair: AnalysisPair::new("Genero", "SegurancaPsicologica"),
            row_labels: vec!["F".to_string(), "M".to_string()],
            column_labels: vec!["Não".to_string(), "Sim".to_string()],
            expected: vec![vec![15.0, 15.0], vec![15.0, 15.0]],
            statistic: 5.4,
            degrees_of_freedom: 1,
            p_value: 0.020136,
            continuity_corrected: true,
            cramers_v: Some(0.27263),
            significance_level: SignificanceLevel::FIVE_PERCENT,
            significant: true,
        }
    }

    #[test]
    fn association_report_formats_numbers() {
        let text = format_association(&association());

        assert!(text.contains("15.00"));
        assert!(text.contains("χ² = 5.400, gl = 1, valor-p = 0.0201 (Yates)"));
        assert!(text.contains("V de Cramér = 0.273"));
        assert!(text.contains("→ Associação estatisticamente significativa"));
    }

    #[test]
    fn undefined_cramers_v_is_reported() {
        let mut report = association();
        report.cramers_v = None;
        report.significant = false;

        let text = format_association(&report);
        assert!(text.contains("V de Cramér = indefinido"));
        assert!(text.contains("Sem evidência estatística de associação"));
    }

    #[test]
    fn correspondence_report_lists_axes_and_legend() {
        let report = CorrespondenceReport {
            pair: AnalysisPair::new("Genero", "BemEstarEmocional").with_title("Gênero x Bem-estar"),
            shape: (3, 3),
            eigenvalues: vec![0.12, 0.03],
            explained_inertia: vec![Percentage::new(80.0), Percentage::new(20.0)],
            total_inertia: 0.15,
            legend_title: "Legenda das Categorias de Genero".to_string(),
            legend: vec![LegendEntry {
                key: "1".to_string(),
                category: "Feminino".to_string(),
            }],
            chart_path: PathBuf::from("plots/g.svg"),
            legend_path: PathBuf::from("plots/g_legend.svg"),
        };

        let text = format_correspondence(&report);
        assert!(text.contains("Gênero x Bem-estar"));
        assert!(text.contains("0.1200"));
        assert!(text.contains("80.0%"));
        assert!(text.contains("1: Feminino"));
        assert!(text.contains("plots/g_legend.svg"));
    }

    #[test]
    fn notice_includes_shape() {
        let pair = AnalysisPair::new("A", "B");
        let text = format_notice(&PairNotice::skipped(&pair, "degenerate table", Some((1, 4))));
        assert_eq!(text, "Ignorado A x B: degenerate table (formato da tabela: 1 x 4)");
    }

    #[test]
    fn writes_columns_to_stream() {
        let mut writer = ConsoleReportWriter::new(Vec::new());
        writer
            .columns(&["Gênero".to_string(), "Faixa Etária".to_string()])
            .unwrap();
        writer.finish().unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.starts_with("\n--- Colunas do arquivo ---\n"));
        assert!(text.contains("- Gênero\n"));
        assert!(text.contains("- Faixa Etária\n"));
    }
}
