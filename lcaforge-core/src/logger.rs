use crate::error::LcaError;
use chrono::{DateTime, Utc};
use csv::{Writer, WriterBuilder};
use lcaforge_schemas::{product::Product, results::LcaResults};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// One row of the results log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsLogEntry {
    pub timestamp: DateTime<Utc>,
    pub product_id: String,
    pub product_name: String,
    pub total_co2e: f64,
    pub materials_co2e: f64,
    pub manufacturing_co2e: f64,
    pub transport_co2e: f64,
    pub use_co2e: f64,
    pub end_of_life_co2e: f64,
    pub energy_kwh: f64,
    pub water_l: f64,
    pub waste_kg: f64,
    pub recyclability_score: f64,
    pub sustainability_score: f64,
    pub material_efficiency: f64,
    pub recommendation_count: usize,
}

impl ResultsLogEntry {
    pub fn new(product: &Product, results: &LcaResults, timestamp: DateTime<Utc>) -> Self {
        let stages = &results.carbon_footprint_by_stage;
        Self {
            timestamp,
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            total_co2e: results.total_carbon_footprint,
            materials_co2e: stages.materials,
            manufacturing_co2e: stages.manufacturing,
            transport_co2e: stages.transport,
            use_co2e: stages.use_phase,
            end_of_life_co2e: stages.end_of_life,
            energy_kwh: results.energy_consumption,
            water_l: results.water_usage,
            waste_kg: results.waste_generation,
            recyclability_score: results.recyclability_score,
            sustainability_score: results.sustainability_score,
            material_efficiency: results.material_efficiency,
            recommendation_count: results.recommendations.len(),
        }
    }
}

/// Appends one CSV row per calculation. The header is written only when the file is new.
pub struct ResultsLogger {
    path: String,
    writer: Writer<fs::File>,
}

impl ResultsLogger {
    pub fn open(path: &str) -> Result<Self, LcaError> {
        let is_new = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LcaError::FileIO(path.to_string(), e))?;
        let writer = WriterBuilder::new().has_headers(is_new).from_writer(file);
        Ok(Self {
            path: path.to_string(),
            writer,
        })
    }

    pub fn log_results(&mut self, product: &Product, results: &LcaResults) -> Result<(), LcaError> {
        let entry = ResultsLogEntry::new(product, results, Utc::now());
        self.writer
            .serialize(entry)
            .map_err(|e| LcaError::CsvError(self.path.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| LcaError::FileIO(self.path.clone(), e))?;
        Ok(())
    }
}

/// Reads every row of a results log.
pub fn read_results_log<P: AsRef<Path>>(path: P) -> Result<Vec<ResultsLogEntry>, LcaError> {
    let display = path.as_ref().display().to_string();
    let mut reader = csv::Reader::from_path(path.as_ref())
        .map_err(|e| LcaError::CsvError(display.clone(), e))?;
    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let entry: ResultsLogEntry = result.map_err(|e| LcaError::CsvError(display.clone(), e))?;
        entries.push(entry);
    }
    Ok(entries)
}
