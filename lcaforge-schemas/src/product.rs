//! The aggregate root of an assessment: a product and everything that goes into it.

use crate::{
    end_of_life::{default_end_of_life_split, EndOfLifeScenario},
    material::Material,
    process::ProcessStep,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product described by its bill of materials, its process steps, and how it is disposed of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// The basis of comparison, e.g. "1 kg" or "1 unit".
    pub functional_unit: String,
    /// Expected service life in years.
    pub lifespan: f64,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub processes: Vec<ProcessStep>,
    #[serde(default = "default_end_of_life_split")]
    pub end_of_life_scenarios: Vec<EndOfLifeScenario>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates an empty product with the default end-of-life split.
    pub fn new(id: &str, name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            functional_unit: "1 unit".to_string(),
            lifespan: 10.0,
            materials: Vec::new(),
            processes: Vec::new(),
            end_of_life_scenarios: default_end_of_life_split(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamps `updated_at` with the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Sum of all scenario percentages. Not required to be 100.
    pub fn end_of_life_total(&self) -> f64 {
        self.end_of_life_scenarios.iter().map(|s| s.percentage).sum()
    }

    pub fn total_material_quantity(&self) -> f64 {
        self.materials.iter().map(|m| m.quantity).sum()
    }

    pub fn find_material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn find_process(&self, id: &str) -> Option<&ProcessStep> {
        self.processes.iter().find(|p| p.id == id)
    }
}
