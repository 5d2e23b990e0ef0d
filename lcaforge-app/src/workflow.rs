use crate::plotting;
use crate::OutputArgs;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lcaforge_core::{
    analysis::{self, ContributionEntry},
    logger::ResultsLogger,
    quick,
    store::JsonFileStore,
    LcaSession,
};
use lcaforge_schemas::{
    factors::FactorTables,
    product::Product,
    quick::QuickInputs,
    results::{LcaResults, LifecycleStage},
};
use serde::Serialize;
use std::{fs, path::Path};

/// Everything recorded about one assessed product in `results.json`.
#[derive(Debug, Serialize)]
pub struct AssessmentRecord {
    pub product_id: String,
    pub product_name: String,
    pub functional_unit: String,
    pub calculated_at: DateTime<Utc>,
    pub results: LcaResults,
    pub contributions: Vec<ContributionEntry>,
}

/// Calculates every product, saves it to the store, appends the CSV log, and
/// writes `results.json` plus charts into `output_dir`.
pub fn run_assessments(
    products: Vec<Product>,
    factors: FactorTables,
    store_path: &Path,
    output_dir: &Path,
    args: &OutputArgs,
) -> Result<Vec<AssessmentRecord>> {
    println!("\n--- [Workflow] Assessing {} product(s) ---", products.len());

    let mut store = JsonFileStore::new(store_path);
    let mut session = LcaSession::restore(factors, &store)
        .with_context(|| format!("Failed to read product store {}", store_path.display()))?;

    if let Some(parent) = Path::new(&args.log).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
    }
    let mut logger = ResultsLogger::open(&args.log)?;

    let mut records = Vec::with_capacity(products.len());
    for product in products {
        let results = session.calculate_product(product)?;
        session.save_product()?;

        let current = session.current_product().context("Calculated product is no longer current")?;
        logger.log_results(current, &results)?;
        let contributions = analysis::material_contributions(current, session.factors());
        print_summary_report(current, &results, &contributions);

        records.push(AssessmentRecord {
            product_id: current.id.clone(),
            product_name: current.name.clone(),
            functional_unit: current.functional_unit.clone(),
            calculated_at: session.state().last_calculated.unwrap_or_else(Utc::now),
            results,
            contributions,
        });
    }

    session.persist(&mut store)?;
    println!("\nSaved {} product(s) to '{}'.", session.products().len(), store.path().display());

    let results_path = output_dir.join("results.json");
    fs::write(&results_path, serde_json::to_string_pretty(&records)?)
        .with_context(|| format!("Failed to write {}", results_path.display()))?;

    if !args.no_plots && !records.is_empty() {
        let runs: Vec<(String, LcaResults)> = records
            .iter()
            .map(|r| (r.product_id.clone(), r.results.clone()))
            .collect();
        plotting::generate_all_plots(output_dir, &runs, session.factors())?;
    }

    Ok(records)
}

/// Synthesises a product from aggregate inputs and assesses it like any other.
pub fn run_quick_assessment(
    id: &str,
    inputs: &QuickInputs,
    factors: FactorTables,
    store_path: &Path,
    output_dir: &Path,
    args: &OutputArgs,
) -> Result<Vec<AssessmentRecord>> {
    let missing = inputs.missing_parameters();
    if !missing.is_empty() {
        println!("Missing data (treated as zero): {}", missing.join(", "));
    }

    let product = quick::quick_assessment_product(id, inputs)?;
    fs::write(
        output_dir.join("quick_inputs.yaml"),
        serde_yaml::to_string(inputs).context("Failed to serialize quick inputs")?,
    )?;

    run_assessments(vec![product], factors, store_path, output_dir, args)
}

pub fn print_product_list(products: &[Product]) {
    if products.is_empty() {
        println!("No saved products.");
        return;
    }
    println!("{:<16} | {:<28} | {:>9} | {:>9} | Updated", "ID", "Name", "Materials", "Processes");
    println!("{}", "-".repeat(90));
    for product in products {
        println!(
            "{:<16} | {:<28} | {:>9} | {:>9} | {}",
            product.id,
            product.name,
            product.materials.len(),
            product.processes.len(),
            product.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn print_summary_report(
    product: &Product,
    results: &LcaResults,
    contributions: &[ContributionEntry],
) {
    println!("\n\n--- [Summary Report] {} ---", product.name);
    println!("========================================");
    println!("Functional unit: {} | Lifespan: {} years", product.functional_unit, product.lifespan);
    println!("Total Carbon Footprint: {:.2} kg CO2e", results.total_carbon_footprint);
    println!("----------------------------------------");

    println!("\nCarbon Footprint by Stage:");
    for stage in LifecycleStage::ALL {
        let value = results.carbon_footprint_by_stage.get(stage);
        let share = if results.total_carbon_footprint > 0.0 {
            value / results.total_carbon_footprint * 100.0
        } else {
            0.0
        };
        println!("  - {:<14}: {:>12.2} kg CO2e ({:>5.1}%)", stage.label(), value, share);
    }

    println!("\nResource Use:");
    println!("  - Energy: {:>12.2} kWh", results.energy_consumption);
    println!("  - Water:  {:>12.2} L", results.water_usage);
    println!("  - Waste:  {:>12.2} kg", results.waste_generation);

    println!("\nScores:");
    println!("  - Recyclability:       {:>6.2}", results.recyclability_score);
    println!("  - Material Efficiency: {:>6.2}", results.material_efficiency);
    println!("  - Sustainability:      {:>6.2}", results.sustainability_score);

    if !contributions.is_empty() {
        println!("\nTop Contributors:");
        for entry in contributions.iter().take(5) {
            println!(
                "  - {:<28}: {:>12.2} kg CO2e ({:>5.1}%)",
                entry.label, entry.co2e, entry.percentage
            );
        }
    }

    if !results.recommendations.is_empty() {
        println!("\nRecommendations:");
        for (i, recommendation) in results.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, recommendation);
        }
    }
    println!("========================================");
}
