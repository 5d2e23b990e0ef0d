//! The impact calculation engine.
//!
//! `calculate_lca` is a pure function of a product and the factor tables: it
//! performs no I/O, holds no state, and produces a fresh `LcaResults` on every
//! call. Intensities are always taken from the factor tables by material type
//! and recycled flag; the intensity fields stored on a `Material` are display
//! values and are not read here.

use lcaforge_schemas::{
    end_of_life::EndOfLifeType,
    factors::FactorTables,
    material::Material,
    process::{EnergyType, ProcessStep, ProcessType, TransportMode},
    product::Product,
    results::{LcaResults, LifecycleStage, StageBreakdown},
};
use serde::Serialize;
use tracing::{debug, warn};

pub const MAX_RECOMMENDATIONS: usize = 5;

const LANDFILL_THRESHOLD_PERCENT: f64 = 20.0;
const MATERIAL_EFFICIENCY_THRESHOLD: f64 = 50.0;
const RECYCLABILITY_THRESHOLD: f64 = 30.0;
const CARBON_SCORE_WEIGHT: f64 = 10.0;
const ENERGY_SCORE_WEIGHT: f64 = 0.1;

/// Unrounded scores the recommendation rules are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreMetrics {
    pub total_carbon_footprint: f64,
    pub recyclability_score: f64,
    pub material_efficiency: f64,
    pub sustainability_score: f64,
}

/// Where a line of the contribution breakdown comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSource {
    Material,
    Process,
    EndOfLife,
}

/// One line of the carbon contribution table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionEntry {
    pub id: String,
    pub label: String,
    pub source: ContributionSource,
    pub stage: LifecycleStage,
    /// kg CO2e, rounded to two decimals.
    pub co2e: f64,
    /// Share of the total footprint in percent, rounded to two decimals.
    pub percentage: f64,
}

/// Rounds to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn stage_for(process_type: ProcessType) -> LifecycleStage {
    match process_type {
        ProcessType::Manufacturing => LifecycleStage::Manufacturing,
        ProcessType::Transport => LifecycleStage::Transport,
        ProcessType::Use => LifecycleStage::Use,
        ProcessType::EndOfLife => LifecycleStage::EndOfLife,
    }
}

struct MaterialImpact {
    carbon: f64,
    energy: f64,
    water: f64,
}

fn material_impact(material: &Material, factors: &FactorTables) -> MaterialImpact {
    match factors.material(material.material_type, material.is_recycled) {
        Some(f) => MaterialImpact {
            carbon: material.quantity * f.carbon,
            energy: material.quantity * f.energy,
            water: material.quantity * f.water,
        },
        None => {
            warn!(
                material = %material.material_type,
                "no factor row for material type, counting as zero"
            );
            MaterialImpact { carbon: 0.0, energy: 0.0, water: 0.0 }
        }
    }
}

/// kg CO2e of one process step: energy-derived, direct, and (for transport steps) distance-derived.
fn process_emissions(process: &ProcessStep, factors: &FactorTables) -> f64 {
    let energy_factor = factors.energy_factor(process.energy_type).unwrap_or_else(|| {
        warn!(energy_type = %process.energy_type, "no factor for energy type, counting as zero");
        0.0
    });
    let mut emissions = process.energy_consumption * energy_factor + process.emissions;

    if process.process_type == ProcessType::Transport {
        if let (Some(distance), Some(mode)) = (process.distance, process.transport_mode) {
            let transport_factor = factors.transport_factor(mode).unwrap_or_else(|| {
                warn!(mode = %mode, "no factor for transport mode, counting as zero");
                0.0
            });
            emissions += distance * transport_factor;
        }
    }
    emissions
}

/// Recycled share of the total material mass in percent, unrounded.
///
/// Zero when the product has no material mass.
pub fn recycled_share(product: &Product) -> f64 {
    let total_weight = product.total_material_quantity();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let recycled_weight: f64 = product
        .materials
        .iter()
        .filter(|m| m.is_recycled)
        .map(|m| m.quantity)
        .sum();
    recycled_weight / total_weight * 100.0
}

/// Computes the life-cycle impact summary of `product`.
///
/// An empty product yields all-zero figures. Its recommendations are the two
/// score rules only, since both scores are zero.
pub fn calculate_lca(product: &Product, factors: &FactorTables) -> LcaResults {
    let mut stages = StageBreakdown::default();
    let mut total_energy = 0.0;
    let mut total_water = 0.0;
    let mut total_waste = 0.0;

    for material in &product.materials {
        let impact = material_impact(material, factors);
        stages.materials += impact.carbon;
        total_energy += impact.energy;
        total_water += impact.water;
    }
    debug!(
        product = %product.id,
        materials = product.materials.len(),
        co2e = stages.materials,
        "materials pass"
    );

    for process in &product.processes {
        let emissions = process_emissions(process, factors);
        *stages.get_mut(stage_for(process.process_type)) += emissions;

        total_energy += process.energy_consumption;
        total_water += process.water_usage;
        total_waste += process.waste_generated;
    }
    debug!(product = %product.id, processes = product.processes.len(), "process pass");

    for scenario in &product.end_of_life_scenarios {
        stages.end_of_life += scenario.emissions * (scenario.percentage / 100.0);
    }
    debug!(
        product = %product.id,
        scenarios = product.end_of_life_scenarios.len(),
        share = product.end_of_life_total(),
        "end-of-life pass"
    );

    let total_carbon_footprint = stages.total();
    let total_weight = product.total_material_quantity();
    let recyclability_score = recycled_share(product);

    let avg_recyclability = if product.materials.is_empty() {
        0.0
    } else {
        let sum: f64 = product.materials.iter().map(|m| m.recyclability).sum();
        sum / product.materials.len() as f64 * 100.0
    };

    let material_efficiency = (recyclability_score + avg_recyclability) / 2.0;

    // Direct emissions may be negative credits, so the footprint can drop below zero.
    let (carbon_score, energy_score) = if total_weight > 0.0 {
        let per_kg_carbon = total_carbon_footprint / total_weight;
        let per_kg_energy = total_energy / total_weight;
        (
            (100.0 - per_kg_carbon * CARBON_SCORE_WEIGHT).clamp(0.0, 100.0),
            (100.0 - per_kg_energy * ENERGY_SCORE_WEIGHT).clamp(0.0, 100.0),
        )
    } else {
        (0.0, 0.0)
    };
    let sustainability_score = (carbon_score + energy_score + material_efficiency) / 3.0;

    let metrics = ScoreMetrics {
        total_carbon_footprint,
        recyclability_score,
        material_efficiency,
        sustainability_score,
    };
    let recommendations = generate_recommendations(product, &metrics);

    let rounded_stages = StageBreakdown {
        materials: round2(stages.materials),
        manufacturing: round2(stages.manufacturing),
        transport: round2(stages.transport),
        use_phase: round2(stages.use_phase),
        end_of_life: round2(stages.end_of_life),
    };

    let results = LcaResults {
        // The reported total is the sum of the reported stages.
        total_carbon_footprint: round2(rounded_stages.total()),
        carbon_footprint_by_stage: rounded_stages,
        energy_consumption: round2(total_energy),
        water_usage: round2(total_water),
        waste_generation: round2(total_waste),
        recyclability_score: round2(recyclability_score),
        sustainability_score: round2(sustainability_score),
        material_efficiency: round2(material_efficiency),
        recommendations,
    };

    debug!(
        product = %product.id,
        total_co2e = results.total_carbon_footprint,
        sustainability = results.sustainability_score,
        "calculation finished"
    );
    results
}

/// Evaluates the recommendation rules in their fixed order and keeps at most
/// `MAX_RECOMMENDATIONS` of them.
pub fn generate_recommendations(product: &Product, metrics: &ScoreMetrics) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(material) = product.materials.iter().find(|m| !m.is_recycled) {
        recommendations.push(format!(
            "Consider using recycled {} to reduce carbon footprint by up to 60%",
            material.material_type
        ));
    }

    if product.processes.iter().any(|p| p.energy_type == EnergyType::Fossil) {
        recommendations.push(
            "Switch to renewable energy sources to reduce emissions by up to 90%".to_string(),
        );
    }

    if product.processes.iter().any(|p| p.transport_mode == Some(TransportMode::Air)) {
        recommendations.push(
            "Consider alternative transport modes (ship/train) to reduce transport emissions"
                .to_string(),
        );
    }

    if product
        .end_of_life_scenarios
        .iter()
        .any(|s| {
            s.scenario_type == EndOfLifeType::Landfill
                && s.percentage > LANDFILL_THRESHOLD_PERCENT
        })
    {
        recommendations.push(
            "Improve product design for better recyclability to reduce landfill waste".to_string(),
        );
    }

    if metrics.material_efficiency < MATERIAL_EFFICIENCY_THRESHOLD {
        recommendations.push(
            "Focus on design for disassembly and material selection for better recyclability"
                .to_string(),
        );
    }

    if metrics.recyclability_score < RECYCLABILITY_THRESHOLD {
        recommendations
            .push("Increase use of recycled materials in product composition".to_string());
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Breaks the carbon footprint down per material, per process step, and per
/// end-of-life scenario, largest contributor first.
///
/// Returns an empty list when the total footprint is zero.
pub fn material_contributions(product: &Product, factors: &FactorTables) -> Vec<ContributionEntry> {
    let mut raw: Vec<(String, String, ContributionSource, LifecycleStage, f64)> = Vec::new();

    for material in &product.materials {
        let impact = material_impact(material, factors);
        raw.push((
            material.id.clone(),
            material.name.clone(),
            ContributionSource::Material,
            LifecycleStage::Materials,
            impact.carbon,
        ));
    }
    for process in &product.processes {
        raw.push((
            process.id.clone(),
            process.name.clone(),
            ContributionSource::Process,
            stage_for(process.process_type),
            process_emissions(process, factors),
        ));
    }
    for scenario in &product.end_of_life_scenarios {
        raw.push((
            scenario.id.clone(),
            scenario.name.clone(),
            ContributionSource::EndOfLife,
            LifecycleStage::EndOfLife,
            scenario.emissions * (scenario.percentage / 100.0),
        ));
    }

    let total: f64 = raw.iter().map(|r| r.4).sum();
    if total == 0.0 {
        return Vec::new();
    }

    let mut entries: Vec<ContributionEntry> = raw
        .into_iter()
        .map(|(id, label, source, stage, co2e)| ContributionEntry {
            id,
            label,
            source,
            stage,
            co2e: round2(co2e),
            percentage: round2(co2e / total * 100.0),
        })
        .collect();
    entries.sort_by(|a, b| b.co2e.partial_cmp(&a.co2e).unwrap_or(std::cmp::Ordering::Equal));
    entries
}
