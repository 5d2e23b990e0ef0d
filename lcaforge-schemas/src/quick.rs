use crate::material::MaterialType;
use serde::{Deserialize, Serialize};

/// Aggregate production figures for a single-material product.
///
/// This is the shortcut input path: instead of listing materials and steps,
/// a caller gives a handful of totals and a product is synthesised from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickInputs {
    pub material_type: MaterialType,
    #[serde(default)]
    pub raw_material_kg: f64,
    #[serde(default)]
    pub electricity_kwh: f64,
    #[serde(default)]
    pub natural_gas_m3: f64,
    #[serde(default)]
    pub water_l: f64,
    #[serde(default)]
    pub sulfuric_acid_kg: f64,
    #[serde(default)]
    pub caustic_soda_kg: f64,
    #[serde(default)]
    pub lubricants_kg: f64,
    #[serde(default)]
    pub waste_water_m3: f64,
    #[serde(default)]
    pub solid_waste_kg: f64,
    #[serde(default)]
    pub transport_km: f64,
}

impl QuickInputs {
    pub fn new(material_type: MaterialType) -> Self {
        Self {
            material_type,
            raw_material_kg: 0.0,
            electricity_kwh: 0.0,
            natural_gas_m3: 0.0,
            water_l: 0.0,
            sulfuric_acid_kg: 0.0,
            caustic_soda_kg: 0.0,
            lubricants_kg: 0.0,
            waste_water_m3: 0.0,
            solid_waste_kg: 0.0,
            transport_km: 0.0,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 10] {
        [
            ("raw_material_kg", self.raw_material_kg),
            ("electricity_kwh", self.electricity_kwh),
            ("natural_gas_m3", self.natural_gas_m3),
            ("water_l", self.water_l),
            ("sulfuric_acid_kg", self.sulfuric_acid_kg),
            ("caustic_soda_kg", self.caustic_soda_kg),
            ("lubricants_kg", self.lubricants_kg),
            ("waste_water_m3", self.waste_water_m3),
            ("solid_waste_kg", self.solid_waste_kg),
            ("transport_km", self.transport_km),
        ]
    }

    /// Names of the inputs still left at zero, in declaration order.
    pub fn missing_parameters(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, v)| *v == 0.0)
            .map(|(name, _)| name)
            .collect()
    }

    /// The first input that is negative or not finite, if any.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        self.fields().into_iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0))
    }
}

/// Per-kg factors the quick path uses for the raw material itself.
///
/// These are separate from the engine's `FactorTables`: the quick path folds
/// the raw material's own footprint into its manufacturing step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickMaterialFactor {
    /// kg CO2e per kg.
    pub co2: f64,
    /// Liters per kg.
    pub water: f64,
    /// m2 of land per kg.
    pub land: f64,
}

impl QuickMaterialFactor {
    pub const fn new(co2: f64, water: f64, land: f64) -> Self {
        Self { co2, water, land }
    }

    /// Megajoules per kg, derived from the carbon factor.
    pub fn energy(&self) -> f64 {
        self.co2 * QUICK_ENERGY_PER_CO2
    }
}

/// Ratio between the derived energy intensity and the carbon factor.
pub const QUICK_ENERGY_PER_CO2: f64 = 2.5;

/// The quick factor of a material type.
pub fn quick_material_factor(material_type: MaterialType) -> QuickMaterialFactor {
    match material_type {
        MaterialType::Aluminum => QuickMaterialFactor::new(8.24, 15.2, 0.003),
        MaterialType::Steel => QuickMaterialFactor::new(2.29, 5.4, 0.002),
        MaterialType::Plastic => QuickMaterialFactor::new(3.4, 2.1, 0.001),
        MaterialType::Glass => QuickMaterialFactor::new(0.85, 0.8, 0.001),
        MaterialType::Paper => QuickMaterialFactor::new(1.06, 20.3, 0.02),
        MaterialType::Wood => QuickMaterialFactor::new(0.42, 1.2, 0.05),
        MaterialType::Concrete => QuickMaterialFactor::new(0.13, 1.0, 0.001),
        MaterialType::Other => QuickMaterialFactor::new(2.0, 3.0, 0.002),
    }
}
