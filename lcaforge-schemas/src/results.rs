use serde::{Deserialize, Serialize};

/// The five fixed buckets the carbon footprint is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Materials,
    Manufacturing,
    Transport,
    Use,
    EndOfLife,
}

impl LifecycleStage {
    pub const ALL: [LifecycleStage; 5] = [
        LifecycleStage::Materials,
        LifecycleStage::Manufacturing,
        LifecycleStage::Transport,
        LifecycleStage::Use,
        LifecycleStage::EndOfLife,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LifecycleStage::Materials => "Materials",
            LifecycleStage::Manufacturing => "Manufacturing",
            LifecycleStage::Transport => "Transport",
            LifecycleStage::Use => "Use",
            LifecycleStage::EndOfLife => "End of life",
        }
    }
}

/// kg CO2e per life-cycle stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageBreakdown {
    pub materials: f64,
    pub manufacturing: f64,
    pub transport: f64,
    #[serde(rename = "use")]
    pub use_phase: f64,
    pub end_of_life: f64,
}

impl StageBreakdown {
    pub fn get(&self, stage: LifecycleStage) -> f64 {
        match stage {
            LifecycleStage::Materials => self.materials,
            LifecycleStage::Manufacturing => self.manufacturing,
            LifecycleStage::Transport => self.transport,
            LifecycleStage::Use => self.use_phase,
            LifecycleStage::EndOfLife => self.end_of_life,
        }
    }

    pub fn get_mut(&mut self, stage: LifecycleStage) -> &mut f64 {
        match stage {
            LifecycleStage::Materials => &mut self.materials,
            LifecycleStage::Manufacturing => &mut self.manufacturing,
            LifecycleStage::Transport => &mut self.transport,
            LifecycleStage::Use => &mut self.use_phase,
            LifecycleStage::EndOfLife => &mut self.end_of_life,
        }
    }

    pub fn total(&self) -> f64 {
        LifecycleStage::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// The outcome of one impact calculation. Every numeric field is rounded to two decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LcaResults {
    /// kg CO2e across all stages.
    pub total_carbon_footprint: f64,
    pub carbon_footprint_by_stage: StageBreakdown,
    /// kWh.
    pub energy_consumption: f64,
    /// Liters.
    pub water_usage: f64,
    /// kg.
    pub waste_generation: f64,
    /// 0-100.
    pub recyclability_score: f64,
    /// 0-100.
    pub sustainability_score: f64,
    /// 0-100.
    pub material_efficiency: f64,
    pub recommendations: Vec<String>,
}
