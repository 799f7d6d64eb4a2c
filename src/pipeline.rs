//! Pipeline Module
//! One flow for both input sources: ingest, analyze each table, prepare export.

use crate::config::AppConfig;
use crate::data::{DataLoader, Dataset, ExportFile};
use crate::error::DataError;
use crate::remote::{fetch_tables, DocumentSource, HttpFetcher};
use crate::stats::{TrendAnalyzer, TrendSummary};
use std::path::PathBuf;
use tracing::{info, warn};

/// User input for one action.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Pasted CSV text.
    CsvText(String),
    /// CSV file on disk.
    CsvFile(PathBuf),
    /// Page to extract HTML tables from.
    Url(String),
}

impl Source {
    fn export_stem(&self, index: usize) -> String {
        match self {
            Source::CsvText(_) => "manual_data".to_string(),
            Source::CsvFile(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "csv_file".to_string()),
            Source::Url(_) => format!("table_{}", index + 1),
        }
    }
}

/// Trend analysis outcome for one table.
#[derive(Debug)]
pub enum Analysis {
    Completed(TrendSummary),
    /// The table was kept but analysis could not run.
    Skipped(DataError),
}

impl Analysis {
    pub fn summary(&self) -> Option<&TrendSummary> {
        match self {
            Analysis::Completed(summary) => Some(summary),
            Analysis::Skipped(_) => None,
        }
    }
}

/// Everything the presentation layer needs for one table.
#[derive(Debug)]
pub struct TableReport {
    /// Zero-based position among the tables of this action.
    pub index: usize,
    /// Ingested table, with the moving average column appended when analysis ran.
    pub dataset: Dataset,
    pub analysis: Analysis,
    pub export: ExportFile,
}

/// Ingest, analyze and export with one configuration.
pub struct Pipeline {
    config: AppConfig,
    documents: Box<dyn DocumentSource + Send + Sync>,
}

impl Pipeline {
    /// Pipeline fetching remote pages over HTTP.
    pub fn new(config: AppConfig) -> Result<Self, DataError> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        Ok(Self::with_source(config, Box::new(fetcher)))
    }

    /// Pipeline with a custom document source.
    pub fn with_source(config: AppConfig, documents: Box<dyn DocumentSource + Send + Sync>) -> Self {
        Self { config, documents }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run one action. Errors here mean no table could be produced at all.
    pub fn run(&self, source: &Source) -> Result<Vec<TableReport>, DataError> {
        let datasets = match source {
            Source::CsvText(text) => vec![DataLoader::parse_csv(text)?],
            Source::CsvFile(path) => vec![DataLoader::load_csv(path)?],
            Source::Url(url) => fetch_tables(self.documents.as_ref(), url)?,
        };

        let reports = datasets
            .into_iter()
            .enumerate()
            .map(|(index, dataset)| self.report(source, index, dataset))
            .collect::<Result<Vec<_>, _>>()?;

        info!(tables = reports.len(), "pipeline finished");
        Ok(reports)
    }

    fn report(&self, source: &Source, index: usize, dataset: Dataset) -> Result<TableReport, DataError> {
        let analysis_cfg = &self.config.analysis;
        let stem = source.export_stem(index);

        let (dataset, analysis, file_name) =
            match TrendAnalyzer::analyze(&dataset, &analysis_cfg.column, analysis_cfg.window) {
                Ok(summary) => {
                    info!(
                        table = index + 1,
                        signal = %summary.signal,
                        latest = ?summary.latest_value,
                        average = ?summary.latest_average,
                        "trend analysis complete"
                    );
                    let with_average = summary.append_to(&dataset);
                    (
                        with_average,
                        Analysis::Completed(summary),
                        format!("{}_with_analysis.csv", stem),
                    )
                }
                Err(err) => {
                    warn!(table = index + 1, error = %err, "trend analysis skipped");
                    let file_name = match source {
                        Source::CsvText(_) | Source::CsvFile(_) => format!("{}_table.csv", stem),
                        Source::Url(_) => format!("{}.csv", stem),
                    };
                    (dataset, Analysis::Skipped(err), file_name)
                }
            };

        let export = ExportFile::new(&dataset, file_name)?;
        Ok(TableReport {
            index,
            dataset,
            analysis,
            export,
        })
    }
}
