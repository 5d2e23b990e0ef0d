//! Static emission-factor tables consumed by the impact calculation.
//!
//! Tables are plain data: built once (from the defaults below or from a
//! factor file) and only read afterwards.

use crate::{
    material::MaterialType,
    process::{EnergyType, TransportMode},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-unit intensities of one material variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityFactors {
    /// kg CO2e per unit.
    pub carbon: f64,
    /// MJ per unit, summed into the energy total as-is.
    pub energy: f64,
    /// Liters per unit.
    pub water: f64,
}

impl IntensityFactors {
    pub const fn new(carbon: f64, energy: f64, water: f64) -> Self {
        Self { carbon, energy, water }
    }
}

/// Raw and recycled-content rows for one material family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialFactors {
    pub raw: IntensityFactors,
    pub recycled: IntensityFactors,
}

impl MaterialFactors {
    pub fn select(&self, is_recycled: bool) -> &IntensityFactors {
        if is_recycled {
            &self.recycled
        } else {
            &self.raw
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTables {
    pub materials: BTreeMap<MaterialType, MaterialFactors>,
    /// kg CO2e per kWh.
    pub energy: BTreeMap<EnergyType, f64>,
    /// kg CO2e per km.
    pub transport: BTreeMap<TransportMode, f64>,
}

const DEFAULT_MATERIALS: [(MaterialType, MaterialFactors); 8] = [
    (
        MaterialType::Aluminum,
        MaterialFactors {
            raw: IntensityFactors::new(8.2, 150.0, 1500.0),
            recycled: IntensityFactors::new(2.1, 45.0, 450.0),
        },
    ),
    (
        MaterialType::Steel,
        MaterialFactors {
            raw: IntensityFactors::new(6.5, 125.0, 1200.0),
            recycled: IntensityFactors::new(1.8, 38.0, 380.0),
        },
    ),
    (
        MaterialType::Plastic,
        MaterialFactors {
            raw: IntensityFactors::new(4.8, 85.0, 850.0),
            recycled: IntensityFactors::new(2.9, 51.0, 510.0),
        },
    ),
    (
        MaterialType::Glass,
        MaterialFactors {
            raw: IntensityFactors::new(3.2, 75.0, 750.0),
            recycled: IntensityFactors::new(1.5, 35.0, 350.0),
        },
    ),
    (
        MaterialType::Paper,
        MaterialFactors {
            raw: IntensityFactors::new(2.1, 45.0, 450.0),
            recycled: IntensityFactors::new(0.8, 18.0, 180.0),
        },
    ),
    (
        MaterialType::Wood,
        MaterialFactors {
            raw: IntensityFactors::new(0.5, 15.0, 150.0),
            recycled: IntensityFactors::new(0.3, 10.0, 100.0),
        },
    ),
    (
        MaterialType::Concrete,
        MaterialFactors {
            raw: IntensityFactors::new(5.5, 95.0, 950.0),
            recycled: IntensityFactors::new(2.2, 38.0, 380.0),
        },
    ),
    (
        MaterialType::Other,
        MaterialFactors {
            raw: IntensityFactors::new(3.0, 60.0, 600.0),
            recycled: IntensityFactors::new(1.5, 30.0, 300.0),
        },
    ),
];

const DEFAULT_ENERGY: [(EnergyType, f64); 3] = [
    (EnergyType::Grid, 0.5),
    (EnergyType::Renewable, 0.05),
    (EnergyType::Fossil, 0.8),
];

const DEFAULT_TRANSPORT: [(TransportMode, f64); 4] = [
    (TransportMode::Truck, 0.12),
    (TransportMode::Ship, 0.015),
    (TransportMode::Train, 0.045),
    (TransportMode::Air, 0.67),
];

impl Default for FactorTables {
    fn default() -> Self {
        Self {
            materials: DEFAULT_MATERIALS.into_iter().collect(),
            energy: DEFAULT_ENERGY.into_iter().collect(),
            transport: DEFAULT_TRANSPORT.into_iter().collect(),
        }
    }
}

impl FactorTables {
    /// Looks up the row for a material variant.
    pub fn material(
        &self,
        material_type: MaterialType,
        is_recycled: bool,
    ) -> Option<&IntensityFactors> {
        self.materials.get(&material_type).map(|f| f.select(is_recycled))
    }

    pub fn energy_factor(&self, energy_type: EnergyType) -> Option<f64> {
        self.energy.get(&energy_type).copied()
    }

    pub fn transport_factor(&self, mode: TransportMode) -> Option<f64> {
        self.transport.get(&mode).copied()
    }

    /// Checks that every enum variant has a row, no factor is negative, and no
    /// recycled intensity exceeds its raw counterpart. Returns a description of
    /// the first problem found.
    pub fn check(&self) -> Result<(), String> {
        for material_type in MaterialType::ALL {
            let row = self
                .materials
                .get(&material_type)
                .ok_or_else(|| format!("no factors for material '{}'", material_type))?;
            for (label, raw, recycled) in [
                ("carbon", row.raw.carbon, row.recycled.carbon),
                ("energy", row.raw.energy, row.recycled.energy),
                ("water", row.raw.water, row.recycled.water),
            ] {
                if !(raw >= 0.0 && recycled >= 0.0) {
                    return Err(format!(
                        "negative {} factor for material '{}'",
                        label, material_type
                    ));
                }
                if recycled > raw {
                    return Err(format!(
                        "recycled {} factor exceeds raw factor for material '{}'",
                        label, material_type
                    ));
                }
            }
        }
        for energy_type in EnergyType::ALL {
            match self.energy.get(&energy_type) {
                Some(v) if *v >= 0.0 => {}
                Some(_) => return Err(format!("negative factor for energy type '{}'", energy_type)),
                None => return Err(format!("no factor for energy type '{}'", energy_type)),
            }
        }
        for mode in TransportMode::ALL {
            match self.transport.get(&mode) {
                Some(v) if *v >= 0.0 => {}
                Some(_) => return Err(format!("negative factor for transport mode '{}'", mode)),
                None => return Err(format!("no factor for transport mode '{}'", mode)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_complete_and_consistent() {
        let tables = FactorTables::default();
        assert_eq!(tables.check(), Ok(()));
        assert_eq!(tables.material(MaterialType::Aluminum, false).map(|f| f.carbon), Some(8.2));
        assert_eq!(tables.material(MaterialType::Aluminum, true).map(|f| f.carbon), Some(2.1));
        assert_eq!(tables.energy_factor(EnergyType::Grid), Some(0.5));
        assert_eq!(tables.transport_factor(TransportMode::Air), Some(0.67));
    }

    #[test]
    fn check_flags_missing_and_inverted_rows() {
        let mut tables = FactorTables::default();
        tables.transport.remove(&TransportMode::Train);
        assert!(tables.check().unwrap_err().contains("train"));

        let mut tables = FactorTables::default();
        if let Some(row) = tables.materials.get_mut(&MaterialType::Glass) {
            row.recycled.water = row.raw.water + 1.0;
        }
        assert!(tables.check().unwrap_err().contains("glass"));
    }

    #[test]
    fn tables_deserialize_from_snake_case_keys() {
        let json = serde_json::to_string(&FactorTables::default()).unwrap();
        assert!(json.contains("\"aluminum\""));
        assert!(json.contains("\"renewable\""));
        let parsed: FactorTables = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, FactorTables::default());
    }
}
