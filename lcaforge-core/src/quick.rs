//! Synthesises a single-material product from aggregate production figures.

use crate::{builder::ProductBuilder, error::LcaError};
use lcaforge_schemas::{
    material::{Material, MaterialUnit},
    process::{EnergyType, ProcessStep, ProcessType},
    product::Product,
    quick::{quick_material_factor, QuickInputs},
};

/// kg CO2 per kWh of grid electricity.
pub const ELECTRICITY_CO2_PER_KWH: f64 = 0.3;
/// kg CO2 per m3 of natural gas.
pub const NATURAL_GAS_CO2_PER_M3: f64 = 1.9;
/// kg CO2 per km of transport.
pub const TRANSPORT_CO2_PER_KM: f64 = 0.003;
pub const SULFURIC_ACID_CO2_PER_KG: f64 = 0.15;
pub const CAUSTIC_SODA_CO2_PER_KG: f64 = 0.12;
pub const LUBRICANTS_CO2_PER_KG: f64 = 0.08;
/// kg CO2 per m3 of waste water treated.
pub const WASTE_WATER_CO2_PER_M3: f64 = 0.17;
/// Liters of process water attributed to each m3 of waste water.
pub const WASTE_WATER_WATER_FACTOR: f64 = 1.2;

const DEFAULT_RECYCLABILITY: f64 = 0.8;

/// Direct kg CO2 of the non-material inputs, using the fixed conversion constants.
pub fn direct_emissions(inputs: &QuickInputs) -> f64 {
    inputs.electricity_kwh * ELECTRICITY_CO2_PER_KWH
        + inputs.natural_gas_m3 * NATURAL_GAS_CO2_PER_M3
        + inputs.transport_km * TRANSPORT_CO2_PER_KM
        + inputs.sulfuric_acid_kg * SULFURIC_ACID_CO2_PER_KG
        + inputs.caustic_soda_kg * CAUSTIC_SODA_CO2_PER_KG
        + inputs.lubricants_kg * LUBRICANTS_CO2_PER_KG
        + inputs.waste_water_m3 * WASTE_WATER_CO2_PER_M3
}

/// kg CO2 of the raw material, from the quick factor of its type.
pub fn material_emissions(inputs: &QuickInputs) -> f64 {
    inputs.raw_material_kg * quick_material_factor(inputs.material_type).co2
}

/// Liters of water attributed to the manufacturing step. Includes the raw
/// material's quick water factor and waste water treatment.
pub fn process_water(inputs: &QuickInputs) -> f64 {
    inputs.water_l
        + inputs.raw_material_kg * quick_material_factor(inputs.material_type).water
        + inputs.waste_water_m3 * WASTE_WATER_WATER_FACTOR
}

/// Builds a product with one raw material and one grid-powered manufacturing
/// step from `inputs`. The end-of-life split is the default one.
///
/// The manufacturing step carries the whole quick footprint, raw material
/// included, so the material also shows up in the engine's materials stage.
pub fn quick_assessment_product(id: &str, inputs: &QuickInputs) -> Result<Product, LcaError> {
    if let Some((field, value)) = inputs.first_invalid() {
        return Err(LcaError::InvalidProduct(format!(
            "quick input '{}' must be a non-negative number, got {}",
            field, value
        )));
    }

    let material_type = inputs.material_type;
    let row = quick_material_factor(material_type);

    let material = Material {
        id: format!("{}-material", id),
        name: material_type.to_string(),
        quantity: inputs.raw_material_kg,
        unit: MaterialUnit::Kg,
        material_type,
        is_recycled: false,
        recyclability: DEFAULT_RECYCLABILITY,
        carbon_intensity: row.co2,
        energy_intensity: row.energy(),
        water_intensity: row.water,
    };

    let process = ProcessStep {
        id: format!("{}-manufacturing", id),
        name: "Manufacturing Process".to_string(),
        process_type: ProcessType::Manufacturing,
        energy_consumption: inputs.electricity_kwh,
        energy_type: EnergyType::Grid,
        emissions: direct_emissions(inputs) + material_emissions(inputs),
        water_usage: process_water(inputs),
        waste_generated: inputs.solid_waste_kg,
        duration: 1.0,
        distance: None,
        transport_mode: None,
    };

    let mut name = material_type.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    ProductBuilder::new()
        .with_id(id)
        .with_name(&format!("{} Product", name))
        .with_description(&format!("Product made from {}", material_type))
        .with_functional_unit(&format!("{} kg", inputs.raw_material_kg))
        .with_material(material)
        .with_process(process)
        .build()
}
