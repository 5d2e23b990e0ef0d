use serde::{Deserialize, Serialize};
use std::fmt;

/// The life-cycle stage a process step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    Manufacturing,
    Transport,
    Use,
    EndOfLife,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyType {
    Grid,
    Renewable,
    Fossil,
}

impl EnergyType {
    pub const ALL: [EnergyType; 3] = [EnergyType::Grid, EnergyType::Renewable, EnergyType::Fossil];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Truck,
    Ship,
    Train,
    Air,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Truck,
        TransportMode::Ship,
        TransportMode::Train,
        TransportMode::Air,
    ];
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnergyType::Grid => "grid",
            EnergyType::Renewable => "renewable",
            EnergyType::Fossil => "fossil",
        })
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransportMode::Truck => "truck",
            TransportMode::Ship => "ship",
            TransportMode::Train => "train",
            TransportMode::Air => "air",
        })
    }
}

/// One discrete activity in a product's life cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub id: String,
    pub name: String,
    pub process_type: ProcessType,
    /// kWh consumed by the step.
    pub energy_consumption: f64,
    pub energy_type: EnergyType,
    /// Direct kg CO2e, added on top of the energy-derived emissions.
    pub emissions: f64,
    /// Liters.
    pub water_usage: f64,
    /// kg.
    pub waste_generated: f64,
    pub duration: f64,
    /// km travelled. Only meaningful for transport steps, together with `transport_mode`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
}

impl ProcessStep {
    pub fn is_transport(&self) -> bool {
        self.process_type == ProcessType::Transport
    }
}

/// A partial update for a `ProcessStep`. Only the `Some` fields are applied.
///
/// `distance` and `transport_mode` are doubly optional so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessStepPatch {
    pub name: Option<String>,
    pub process_type: Option<ProcessType>,
    pub energy_consumption: Option<f64>,
    pub energy_type: Option<EnergyType>,
    pub emissions: Option<f64>,
    pub water_usage: Option<f64>,
    pub waste_generated: Option<f64>,
    pub duration: Option<f64>,
    pub distance: Option<Option<f64>>,
    pub transport_mode: Option<Option<TransportMode>>,
}

impl ProcessStep {
    pub fn apply(&mut self, patch: ProcessStepPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(process_type) = patch.process_type {
            self.process_type = process_type;
        }
        if let Some(energy) = patch.energy_consumption {
            self.energy_consumption = energy;
        }
        if let Some(energy_type) = patch.energy_type {
            self.energy_type = energy_type;
        }
        if let Some(emissions) = patch.emissions {
            self.emissions = emissions;
        }
        if let Some(water) = patch.water_usage {
            self.water_usage = water;
        }
        if let Some(waste) = patch.waste_generated {
            self.waste_generated = waste;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(distance) = patch.distance {
            self.distance = distance;
        }
        if let Some(mode) = patch.transport_mode {
            self.transport_mode = mode;
        }
    }
}
