use crate::error::LcaError;
use chrono::Utc;
use lcaforge_schemas::{
    end_of_life::{default_end_of_life_split, EndOfLifeScenario},
    factors::FactorTables,
    material::{Material, MaterialType, MaterialUnit},
    process::ProcessStep,
    product::Product,
};
use std::collections::HashSet;

/// A fluent builder for constructing a validated `Product`.
///
/// Unset fields fall back to the same defaults a freshly created product gets:
/// a "1 unit" functional unit, a ten year lifespan, and the default
/// end-of-life split.
#[derive(Default)]
pub struct ProductBuilder {
    id: Option<String>,
    name: Option<String>,
    description: String,
    functional_unit: Option<String>,
    lifespan: Option<f64>,
    materials: Vec<Material>,
    processes: Vec<ProcessStep>,
    end_of_life_scenarios: Option<Vec<EndOfLifeScenario>>,
}

impl ProductBuilder {
    /// Creates a new, empty `ProductBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_functional_unit(mut self, functional_unit: &str) -> Self {
        self.functional_unit = Some(functional_unit.to_string());
        self
    }

    /// Sets the expected service life in years.
    pub fn with_lifespan(mut self, years: f64) -> Self {
        self.lifespan = Some(years);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }

    pub fn with_materials(mut self, materials: Vec<Material>) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_process(mut self, process: ProcessStep) -> Self {
        self.processes.push(process);
        self
    }

    pub fn with_processes(mut self, processes: Vec<ProcessStep>) -> Self {
        self.processes = processes;
        self
    }

    /// Replaces the default end-of-life split. An empty list is allowed.
    pub fn with_end_of_life_scenarios(mut self, scenarios: Vec<EndOfLifeScenario>) -> Self {
        self.end_of_life_scenarios = Some(scenarios);
        self
    }

    /// Consumes the builder and returns the product.
    ///
    /// # Errors
    ///
    /// Returns an `LcaError` if the id or name is missing, or if any material,
    /// process step, or scenario breaks its invariants.
    pub fn build(self) -> Result<Product, LcaError> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| LcaError::InvalidProduct("an id is required".to_string()))?;
        let name = self
            .name
            .ok_or_else(|| LcaError::InvalidProduct(format!("product '{}' has no name", id)))?;

        let now = Utc::now();
        let product = Product {
            id,
            name,
            description: self.description,
            functional_unit: self.functional_unit.unwrap_or_else(|| "1 unit".to_string()),
            lifespan: self.lifespan.unwrap_or(10.0),
            materials: self.materials,
            processes: self.processes,
            end_of_life_scenarios: self
                .end_of_life_scenarios
                .unwrap_or_else(default_end_of_life_split),
            created_at: now,
            updated_at: now,
        };
        validate_product(&product)?;
        Ok(product)
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

pub fn validate_material(material: &Material) -> Result<(), LcaError> {
    let invalid = |reason: &str| LcaError::InvalidMaterial {
        id: material.id.clone(),
        reason: reason.to_string(),
    };
    if !non_negative(material.quantity) {
        return Err(invalid("quantity must be a non-negative number"));
    }
    if !(0.0..=1.0).contains(&material.recyclability) {
        return Err(invalid("recyclability must lie within [0, 1]"));
    }
    Ok(())
}

/// Transport steps carry both a distance and a mode or neither; other steps carry neither.
pub fn validate_process(process: &ProcessStep) -> Result<(), LcaError> {
    let invalid = |reason: &str| LcaError::InvalidProcess {
        id: process.id.clone(),
        reason: reason.to_string(),
    };
    for (label, value) in [
        ("energy consumption", process.energy_consumption),
        ("water usage", process.water_usage),
        ("waste generated", process.waste_generated),
    ] {
        if !non_negative(value) {
            return Err(invalid(&format!("{} must be a non-negative number", label)));
        }
    }
    if !process.emissions.is_finite() {
        return Err(invalid("emissions must be a finite number"));
    }
    if !(process.duration.is_finite() && process.duration > 0.0) {
        return Err(invalid("duration must be greater than zero"));
    }

    match (process.distance, process.transport_mode) {
        (Some(distance), Some(_)) if process.is_transport() => {
            if !non_negative(distance) {
                return Err(invalid("distance must be a non-negative number"));
            }
        }
        (None, None) => {}
        (Some(_), None) | (None, Some(_)) if process.is_transport() => {
            return Err(invalid("transport steps need both a distance and a transport mode"));
        }
        _ => return Err(invalid("only transport steps may carry a distance or transport mode")),
    }
    Ok(())
}

pub fn validate_scenario(scenario: &EndOfLifeScenario) -> Result<(), LcaError> {
    if !(0.0..=100.0).contains(&scenario.percentage) {
        return Err(LcaError::InvalidScenario {
            id: scenario.id.clone(),
            reason: "percentage must lie within [0, 100]".to_string(),
        });
    }
    if !scenario.emissions.is_finite() {
        return Err(LcaError::InvalidScenario {
            id: scenario.id.clone(),
            reason: "emissions must be a finite number".to_string(),
        });
    }
    Ok(())
}

/// Checks every invariant of a product and its parts, including id uniqueness
/// within the material and process lists.
pub fn validate_product(product: &Product) -> Result<(), LcaError> {
    if !(product.lifespan.is_finite() && product.lifespan > 0.0) {
        return Err(LcaError::InvalidProduct(format!(
            "product '{}' must have a lifespan greater than zero",
            product.id
        )));
    }

    let mut seen = HashSet::new();
    for material in &product.materials {
        validate_material(material)?;
        if !seen.insert(material.id.as_str()) {
            return Err(LcaError::DuplicateId(material.id.clone()));
        }
    }

    let mut seen = HashSet::new();
    for process in &product.processes {
        validate_process(process)?;
        if !seen.insert(process.id.as_str()) {
            return Err(LcaError::DuplicateId(process.id.clone()));
        }
    }

    for scenario in &product.end_of_life_scenarios {
        validate_scenario(scenario)?;
    }
    Ok(())
}

/// Creates a material whose stored intensities are taken from the factor table row
/// matching its type and recycled flag.
#[allow(clippy::too_many_arguments)]
pub fn material_from_factors(
    id: &str,
    name: &str,
    material_type: MaterialType,
    quantity: f64,
    unit: MaterialUnit,
    is_recycled: bool,
    recyclability: f64,
    factors: &FactorTables,
) -> Result<Material, LcaError> {
    let row = factors.material(material_type, is_recycled).ok_or_else(|| {
        LcaError::InvalidFactorTable(format!("no factors for material '{}'", material_type))
    })?;
    let material = Material {
        id: id.to_string(),
        name: name.to_string(),
        quantity,
        unit,
        material_type,
        is_recycled,
        recyclability,
        carbon_intensity: row.carbon,
        energy_intensity: row.energy,
        water_intensity: row.water,
    };
    validate_material(&material)?;
    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::calculate_lca;
    use lcaforge_schemas::{
        end_of_life::EndOfLifeType,
        process::{EnergyType, ProcessType, TransportMode},
    };

    fn step(process_type: ProcessType) -> ProcessStep {
        ProcessStep {
            id: "s1".to_string(),
            name: "Step".to_string(),
            process_type,
            energy_consumption: 1.0,
            energy_type: EnergyType::Grid,
            emissions: 0.0,
            water_usage: 0.0,
            waste_generated: 0.0,
            duration: 1.0,
            distance: None,
            transport_mode: None,
        }
    }

    fn steel(quantity: f64) -> Material {
        material_from_factors(
            "m1",
            "Steel sheet",
            MaterialType::Steel,
            quantity,
            MaterialUnit::Kg,
            false,
            0.9,
            &FactorTables::default(),
        )
        .unwrap()
    }

    #[test]
    fn build_applies_defaults() {
        let product = ProductBuilder::new().with_id("p1").with_name("Bottle").build().unwrap();
        assert_eq!(product.functional_unit, "1 unit");
        assert_eq!(product.lifespan, 10.0);
        assert_eq!(product.end_of_life_scenarios.len(), 3);
        assert_eq!(product.end_of_life_total(), 100.0);
        assert!(product.materials.is_empty());
    }

    #[test]
    fn build_requires_id_and_name() {
        assert!(matches!(
            ProductBuilder::new().with_name("x").build(),
            Err(LcaError::InvalidProduct(_))
        ));
        assert!(matches!(
            ProductBuilder::new().with_id("p1").build(),
            Err(LcaError::InvalidProduct(_))
        ));
    }

    #[test]
    fn material_from_factors_copies_table_intensities() {
        let material = steel(2.0);
        assert_eq!(material.carbon_intensity, 6.5);
        assert_eq!(material.energy_intensity, 125.0);
        assert_eq!(material.water_intensity, 1200.0);
    }

    #[test]
    fn invalid_materials_are_rejected() {
        let mut material = steel(1.0);
        material.quantity = -1.0;
        assert!(matches!(validate_material(&material), Err(LcaError::InvalidMaterial { .. })));

        let mut material = steel(1.0);
        material.recyclability = 1.5;
        assert!(matches!(validate_material(&material), Err(LcaError::InvalidMaterial { .. })));
    }

    #[test]
    fn transport_fields_must_come_together() {
        let mut transport = step(ProcessType::Transport);
        assert!(validate_process(&transport).is_ok());

        transport.distance = Some(100.0);
        assert!(validate_process(&transport).is_err());

        transport.transport_mode = Some(TransportMode::Train);
        assert!(validate_process(&transport).is_ok());

        let mut manufacturing = step(ProcessType::Manufacturing);
        manufacturing.distance = Some(5.0);
        manufacturing.transport_mode = Some(TransportMode::Truck);
        assert!(validate_process(&manufacturing).is_err());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut process = step(ProcessType::Use);
        process.duration = 0.0;
        assert!(matches!(validate_process(&process), Err(LcaError::InvalidProcess { .. })));
    }

    #[test]
    fn duplicate_material_ids_are_rejected() {
        let result = ProductBuilder::new()
            .with_id("p1")
            .with_name("Frame")
            .with_material(steel(1.0))
            .with_material(steel(2.0))
            .build();
        assert!(matches!(result, Err(LcaError::DuplicateId(id)) if id == "m1"));
    }

    #[test]
    fn scenario_percentage_is_bounded_but_sum_is_not() {
        let scenarios = vec![
            EndOfLifeScenario::new("a", "Reuse", EndOfLifeType::Reuse, 90.0, 0.0),
            EndOfLifeScenario::new("b", "Landfill", EndOfLifeType::Landfill, 90.0, 0.8),
        ];
        let product = ProductBuilder::new()
            .with_id("p1")
            .with_name("Chair")
            .with_end_of_life_scenarios(scenarios)
            .build()
            .unwrap();
        assert_eq!(product.end_of_life_total(), 180.0);

        let over = EndOfLifeScenario::new("c", "Landfill", EndOfLifeType::Landfill, 120.0, 0.8);
        assert!(validate_scenario(&over).is_err());
    }

    #[test]
    fn emission_credits_build_and_score_within_bounds() {
        let mut credit = step(ProcessType::EndOfLife);
        credit.energy_consumption = 0.0;
        credit.emissions = -1000.0;
        let product = ProductBuilder::new()
            .with_id("p1")
            .with_name("Pallet")
            .with_material(steel(1.0))
            .with_process(credit)
            .with_end_of_life_scenarios(vec![EndOfLifeScenario::new(
                "r",
                "Energy recovery",
                EndOfLifeType::EnergyRecovery,
                100.0,
                -50.0,
            )])
            .build()
            .unwrap();

        let results = calculate_lca(&product, &FactorTables::default());
        assert!(results.total_carbon_footprint < 0.0);
        assert!((0.0..=100.0).contains(&results.sustainability_score));
    }
}
