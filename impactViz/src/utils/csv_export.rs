use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use crate::models::inputs::SimulationInputs;
use crate::models::metrics::DerivedMetrics;

pub const METRICS_CSV_NAME: &str = "metricas.csv";

#[derive(Debug, Error)]
pub enum RunOutputError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One CSV row: the input tuple followed by its derived metrics
#[derive(Debug, Serialize)]
pub struct MetricsRecord {
    pub waste_processed: f64,
    pub recovery_rate: f64,
    pub landfill_emission_factor: f64,
    pub substitution_emission_factor: f64,
    pub protein_price: f64,
    pub valorized_waste: f64,
    pub avoided_emissions_landfill: f64,
    pub avoided_emissions_substitution: f64,
    pub total_avoided_emissions: f64,
    pub estimated_revenue: f64,
    pub jobs_created: u32,
    pub supply_chain_interactions: u32,
}

impl MetricsRecord {
    pub fn new(inputs: &SimulationInputs, metrics: &DerivedMetrics) -> Self {
        Self {
            waste_processed: inputs.waste_processed,
            recovery_rate: inputs.recovery_rate,
            landfill_emission_factor: inputs.landfill_emission_factor,
            substitution_emission_factor: inputs.substitution_emission_factor,
            protein_price: inputs.protein_price,
            valorized_waste: metrics.valorized_waste,
            avoided_emissions_landfill: metrics.avoided_emissions_landfill,
            avoided_emissions_substitution: metrics.avoided_emissions_substitution,
            total_avoided_emissions: metrics.total_avoided_emissions(),
            estimated_revenue: metrics.estimated_revenue,
            jobs_created: metrics.jobs_created,
            supply_chain_interactions: metrics.supply_chain_interactions,
        }
    }
}

/// Create `<root>/<YYYYMMDD_HHMMSS>` for one export run
pub fn create_run_directory(root: &Path) -> Result<PathBuf, RunOutputError> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = root.join(timestamp);
    fs::create_dir_all(&path).map_err(|source| RunOutputError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub fn write_metrics_csv(
    dir: &Path,
    inputs: &SimulationInputs,
    metrics: &DerivedMetrics,
) -> Result<PathBuf, RunOutputError> {
    let path = dir.join(METRICS_CSV_NAME);
    let mut writer = csv::Writer::from_path(&path)?;
    writer.serialize(MetricsRecord::new(inputs, metrics))?;
    writer.flush().map_err(|source| RunOutputError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics_calculation::compute;
    use tempfile::tempdir;

    #[test]
    fn writes_header_and_single_row() {
        let dir = tempdir().expect("tempdir");
        let inputs = SimulationInputs::default();
        let path = write_metrics_csv(dir.path(), &inputs, &compute(inputs)).expect("write csv");

        let mut reader = csv::Reader::from_path(&path).expect("open csv");
        let headers = reader.headers().expect("headers").clone();
        assert_eq!(headers.get(0), Some("waste_processed"));
        assert_eq!(headers.get(10), Some("jobs_created"));

        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(0), Some("15.0"));
        assert_eq!(rows[0].get(11), Some("3"));
        let revenue: f64 = rows[0].get(9).and_then(|v| v.parse().ok()).expect("revenue");
        assert!((revenue - 24_000.0).abs() < 1e-6);
    }

    #[test]
    fn missing_directory_is_a_csv_error() {
        let root = tempdir().expect("tempdir");
        let inputs = SimulationInputs::default();
        let err = write_metrics_csv(&root.path().join("absent"), &inputs, &compute(inputs)).unwrap_err();
        assert!(matches!(err, RunOutputError::Csv(_)));
    }

    #[test]
    fn run_directory_is_created_under_root() {
        let root = tempdir().expect("tempdir");
        let run = create_run_directory(root.path()).expect("run dir");
        assert!(run.is_dir());
        assert_eq!(run.parent(), Some(root.path()));
    }
}
