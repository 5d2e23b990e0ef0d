use serde::{Deserialize, Serialize};
use std::fmt;

/// The unit a material quantity is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialUnit {
    Kg,
    Ton,
    Pieces,
    Liters,
    M3,
}

/// The material families covered by the factor tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Aluminum,
    Steel,
    Plastic,
    Glass,
    Paper,
    Wood,
    Concrete,
    Other,
}

impl MaterialType {
    pub const ALL: [MaterialType; 8] = [
        MaterialType::Aluminum,
        MaterialType::Steel,
        MaterialType::Plastic,
        MaterialType::Glass,
        MaterialType::Paper,
        MaterialType::Wood,
        MaterialType::Concrete,
        MaterialType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Aluminum => "aluminum",
            MaterialType::Steel => "steel",
            MaterialType::Plastic => "plastic",
            MaterialType::Glass => "glass",
            MaterialType::Paper => "paper",
            MaterialType::Wood => "wood",
            MaterialType::Concrete => "concrete",
            MaterialType::Other => "other",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input substance consumed in producing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    /// Amount consumed, expressed in `unit`. Never negative.
    pub quantity: f64,
    pub unit: MaterialUnit,
    pub material_type: MaterialType,
    pub is_recycled: bool,
    /// Fraction of the material that can be recovered at end of life, in `[0, 1]`.
    pub recyclability: f64,
    /// kg CO2e per unit. Informational; the engine re-derives intensities from the factor table.
    pub carbon_intensity: f64,
    /// MJ per unit.
    pub energy_intensity: f64,
    /// Liters per unit.
    pub water_intensity: f64,
}

/// A partial update for a `Material`. Only the `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<MaterialUnit>,
    pub material_type: Option<MaterialType>,
    pub is_recycled: Option<bool>,
    pub recyclability: Option<f64>,
    pub carbon_intensity: Option<f64>,
    pub energy_intensity: Option<f64>,
    pub water_intensity: Option<f64>,
}

impl Material {
    pub fn apply(&mut self, patch: MaterialPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(material_type) = patch.material_type {
            self.material_type = material_type;
        }
        if let Some(is_recycled) = patch.is_recycled {
            self.is_recycled = is_recycled;
        }
        if let Some(recyclability) = patch.recyclability {
            self.recyclability = recyclability;
        }
        if let Some(v) = patch.carbon_intensity {
            self.carbon_intensity = v;
        }
        if let Some(v) = patch.energy_intensity {
            self.energy_intensity = v;
        }
        if let Some(v) = patch.water_intensity {
            self.water_intensity = v;
        }
    }
}
