use lcaforge_core::{
    analysis::{calculate_lca, MAX_RECOMMENDATIONS},
    builder::{material_from_factors, ProductBuilder},
};
use lcaforge_schemas::{
    end_of_life::{EndOfLifeScenario, EndOfLifeType},
    factors::FactorTables,
    material::{Material, MaterialType, MaterialUnit},
    process::{EnergyType, ProcessStep, ProcessType, TransportMode},
    product::Product,
};
use proptest::prelude::*;

fn arb_material_type() -> impl Strategy<Value = MaterialType> {
    prop::sample::select(MaterialType::ALL.to_vec())
}

fn arb_energy_type() -> impl Strategy<Value = EnergyType> {
    prop::sample::select(EnergyType::ALL.to_vec())
}

fn arb_transport_mode() -> impl Strategy<Value = TransportMode> {
    prop::sample::select(TransportMode::ALL.to_vec())
}

fn arb_process_type() -> impl Strategy<Value = ProcessType> {
    prop::sample::select(vec![
        ProcessType::Manufacturing,
        ProcessType::Transport,
        ProcessType::Use,
        ProcessType::EndOfLife,
    ])
}

fn arb_scenario_type() -> impl Strategy<Value = EndOfLifeType> {
    prop::sample::select(vec![
        EndOfLifeType::Recycle,
        EndOfLifeType::Reuse,
        EndOfLifeType::EnergyRecovery,
        EndOfLifeType::Landfill,
        EndOfLifeType::Incineration,
    ])
}

fn arb_material() -> impl Strategy<Value = (MaterialType, f64, bool, f64)> {
    (arb_material_type(), 0.0..1000.0f64, any::<bool>(), 0.0..=1.0f64)
}

fn arb_process() -> impl Strategy<Value = (ProcessType, f64, EnergyType, f64, f64, TransportMode)> {
    (
        arb_process_type(),
        0.0..5000.0f64,
        arb_energy_type(),
        -100.0..100.0f64,
        0.0..10000.0f64,
        arb_transport_mode(),
    )
}

fn arb_product() -> impl Strategy<Value = Product> {
    (
        prop::collection::vec(arb_material(), 0..6),
        prop::collection::vec(arb_process(), 0..6),
        prop::collection::vec((arb_scenario_type(), 0.0..=100.0f64, -5.0..5.0f64), 0..4),
    )
        .prop_map(|(materials, processes, scenarios)| {
            let mut product = Product::new("prop", "Generated");
            product.materials = materials
                .into_iter()
                .enumerate()
                .map(|(i, (material_type, quantity, is_recycled, recyclability))| Material {
                    id: format!("m{}", i),
                    name: material_type.to_string(),
                    quantity,
                    unit: MaterialUnit::Kg,
                    material_type,
                    is_recycled,
                    recyclability,
                    carbon_intensity: 0.0,
                    energy_intensity: 0.0,
                    water_intensity: 0.0,
                })
                .collect();
            product.processes = processes
                .into_iter()
                .enumerate()
                .map(|(i, (process_type, energy, energy_type, emissions, distance, mode))| {
                    let is_transport = process_type == ProcessType::Transport;
                    ProcessStep {
                        id: format!("s{}", i),
                        name: format!("step {}", i),
                        process_type,
                        energy_consumption: energy,
                        energy_type,
                        emissions,
                        water_usage: energy / 10.0,
                        waste_generated: emissions / 2.0,
                        duration: 1.0,
                        distance: is_transport.then_some(distance),
                        transport_mode: is_transport.then_some(mode),
                    }
                })
                .collect();
            product.end_of_life_scenarios = scenarios
                .into_iter()
                .enumerate()
                .map(|(i, (scenario_type, percentage, emissions))| {
                    let id = format!("e{}", i);
                    EndOfLifeScenario::new(&id, "scenario", scenario_type, percentage, emissions)
                })
                .collect();
            product
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The total always equals the sum of the stage buckets within a cent.
    #[test]
    fn prop_total_is_sum_of_stages(product in arb_product()) {
        let results = calculate_lca(&product, &FactorTables::default());
        let stages = results.carbon_footprint_by_stage.total();
        prop_assert!((results.total_carbon_footprint - stages).abs() <= 0.01);
    }

    /// Scores stay within [0, 100] and are never NaN, emission credits included.
    #[test]
    fn prop_scores_are_bounded(product in arb_product()) {
        let results = calculate_lca(&product, &FactorTables::default());
        for score in [
            results.recyclability_score,
            results.sustainability_score,
            results.material_efficiency,
        ] {
            prop_assert!(score.is_finite());
            prop_assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn prop_recommendations_are_capped(product in arb_product()) {
        let results = calculate_lca(&product, &FactorTables::default());
        prop_assert!(results.recommendations.len() <= MAX_RECOMMENDATIONS);
    }

    /// Switching one material to recycled content never raises the material stage
    /// and strictly raises the recyclability score when the material's share of
    /// the mass is large enough to show after rounding to two decimals.
    #[test]
    fn prop_recycled_content_is_monotone(
        product in arb_product(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(product.materials.iter().any(|m| !m.is_recycled));
        let candidates: Vec<usize> = product
            .materials
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_recycled)
            .map(|(i, _)| i)
            .collect();
        let index = candidates[pick.index(candidates.len())];

        let mut recycled = product.clone();
        recycled.materials[index].is_recycled = true;

        let before = calculate_lca(&product, &FactorTables::default());
        let after = calculate_lca(&recycled, &FactorTables::default());
        let (after_materials, before_materials) = (
            after.carbon_footprint_by_stage.materials,
            before.carbon_footprint_by_stage.materials,
        );
        prop_assert!(after_materials <= before_materials);
        let share = product.materials[index].quantity / product.total_material_quantity();
        if share > 2e-4 {
            prop_assert!(after.recyclability_score > before.recyclability_score);
        } else {
            prop_assert!(after.recyclability_score >= before.recyclability_score);
        }
    }

    /// The same product always yields the same results.
    #[test]
    fn prop_calculation_is_deterministic(product in arb_product()) {
        let factors = FactorTables::default();
        prop_assert_eq!(calculate_lca(&product, &factors), calculate_lca(&product, &factors));
    }
}

fn aluminum_product(is_recycled: bool) -> Product {
    let factors = FactorTables::default();
    ProductBuilder::new()
        .with_id("alu")
        .with_name("Aluminium housing")
        .with_functional_unit("1 kg")
        .with_material(
            material_from_factors(
                "m1",
                "Housing",
                MaterialType::Aluminum,
                100.0,
                MaterialUnit::Kg,
                is_recycled,
                0.8,
                &factors,
            )
            .unwrap(),
        )
        .with_process(ProcessStep {
            id: "s1".to_string(),
            name: "Extrusion".to_string(),
            process_type: ProcessType::Manufacturing,
            energy_consumption: 500.0,
            energy_type: EnergyType::Grid,
            emissions: 0.0,
            water_usage: 0.0,
            waste_generated: 0.0,
            duration: 8.0,
            distance: None,
            transport_mode: None,
        })
        .with_end_of_life_scenarios(Vec::new())
        .build()
        .unwrap()
}

#[test]
fn recycled_aluminum_cuts_footprint() {
    let factors = FactorTables::default();
    let raw = calculate_lca(&aluminum_product(false), &factors);
    let recycled = calculate_lca(&aluminum_product(true), &factors);

    assert_eq!(raw.total_carbon_footprint, 1070.0);
    assert_eq!(recycled.total_carbon_footprint, 460.0);
    assert_eq!(raw.recyclability_score, 0.0);
    assert_eq!(recycled.recyclability_score, 100.0);
    assert_eq!(
        raw.recommendations,
        vec![
            "Consider using recycled aluminum to reduce carbon footprint by up to 60%".to_string(),
            "Focus on design for disassembly and material selection for better recyclability"
                .to_string(),
            "Increase use of recycled materials in product composition".to_string(),
        ]
    );
}

#[test]
fn zero_quantity_materials_do_not_divide_by_zero() {
    let mut product = aluminum_product(false);
    product.materials[0].quantity = 0.0;
    let results = calculate_lca(&product, &FactorTables::default());
    assert_eq!(results.carbon_footprint_by_stage.materials, 0.0);
    assert_eq!(results.recyclability_score, 0.0);
    // avg recyclability still counts: (0 + 80) / 2, carbon and energy scores are 0
    assert_eq!(results.material_efficiency, 40.0);
    assert_eq!(results.sustainability_score, 13.33);
}

#[test]
fn results_serialize_with_fixed_stage_keys() {
    let results = calculate_lca(&aluminum_product(false), &FactorTables::default());
    let json = serde_json::to_value(&results).unwrap();
    let stages = json["carbon_footprint_by_stage"].as_object().unwrap();
    let mut keys: Vec<&str> = stages.keys().map(|k| k.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["end_of_life", "manufacturing", "materials", "transport", "use"]);
}
