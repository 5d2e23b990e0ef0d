use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOfLifeType {
    Recycle,
    Reuse,
    EnergyRecovery,
    Landfill,
    Incineration,
}

/// A disposal pathway applied to `percentage` percent of the product mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndOfLifeScenario {
    pub id: String,
    pub name: String,
    /// Share of the product mass, in `[0, 100]`.
    pub percentage: f64,
    pub scenario_type: EndOfLifeType,
    /// kg CO2e emission factor for the pathway, weighted by `percentage / 100`.
    pub emissions: f64,
    /// kWh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_recovery: Option<f64>,
    /// kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_recovery: Option<f64>,
}

impl EndOfLifeScenario {
    pub fn new(
        id: &str,
        name: &str,
        scenario_type: EndOfLifeType,
        percentage: f64,
        emissions: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            percentage,
            scenario_type,
            emissions,
            energy_recovery: None,
            material_recovery: None,
        }
    }
}

/// The split a freshly created product starts with: 65% recycled, 20% landfilled, 15% incinerated.
pub fn default_end_of_life_split() -> Vec<EndOfLifeScenario> {
    vec![
        EndOfLifeScenario::new("1", "Recycling", EndOfLifeType::Recycle, 65.0, 0.1),
        EndOfLifeScenario::new("2", "Landfill", EndOfLifeType::Landfill, 20.0, 0.8),
        EndOfLifeScenario::new("3", "Incineration", EndOfLifeType::Incineration, 15.0, 0.6),
    ]
}
