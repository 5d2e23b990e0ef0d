use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lcaforge_core::store::JsonFileStore;
use lcaforge_core::LcaSession;
use lcaforge_schemas::{factors::FactorTables, material::MaterialType, quick::QuickInputs};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod config;
mod plotting;
mod workflow;

#[derive(Parser, Debug)]
#[command(name = "lcaforge")]
#[command(version, about = "Rule-based life cycle assessment of products", long_about = None)]
struct Cli {
    /// Log filter, e.g. `info` or `lcaforge_core=debug`
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// JSON file holding the saved product collection
    #[arg(long, default_value = "./data/products.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assess the products described in a YAML file or directory
    Assess {
        /// Product YAML file, or a directory of them
        #[arg(short, long)]
        products: String,

        /// Only assess the product with this id
        #[arg(long)]
        product: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Assess a single-material product from aggregate production figures
    Quick {
        #[arg(long, default_value = "quick")]
        id: String,

        /// Material category: aluminum, steel, plastic, glass, paper, wood, concrete or other
        #[arg(long, value_parser = parse_material_type)]
        material: MaterialType,

        #[arg(long, default_value_t = 0.0)]
        raw_material_kg: f64,
        #[arg(long, default_value_t = 0.0)]
        electricity_kwh: f64,
        #[arg(long, default_value_t = 0.0)]
        natural_gas_m3: f64,
        #[arg(long, default_value_t = 0.0)]
        water_l: f64,
        #[arg(long, default_value_t = 0.0)]
        sulfuric_acid_kg: f64,
        #[arg(long, default_value_t = 0.0)]
        caustic_soda_kg: f64,
        #[arg(long, default_value_t = 0.0)]
        lubricants_kg: f64,
        #[arg(long, default_value_t = 0.0)]
        waste_water_m3: f64,
        #[arg(long, default_value_t = 0.0)]
        solid_waste_kg: f64,
        #[arg(long, default_value_t = 0.0)]
        transport_km: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the products in the saved collection
    #[command(alias = "ls")]
    List,
}

#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// YAML factor table overriding the built-in one
    #[arg(long)]
    pub factors: Option<String>,

    /// Directory for run artefacts; defaults to a timestamped folder under ./data/runs
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// CSV file every calculation is appended to
    #[arg(long, default_value = "./data/lca_results.csv")]
    pub log: String,

    /// Skip chart rendering
    #[arg(long)]
    pub no_plots: bool,
}

fn parse_material_type(value: &str) -> Result<MaterialType, String> {
    MaterialType::ALL
        .iter()
        .copied()
        .find(|m| m.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown material type '{}'", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!("--- LCA Forge ---");

    match cli.command {
        Commands::Assess { products, product, output } => {
            let catalog = config::Catalog::load(&products, output.factors.as_deref())?;
            let selected: Vec<_> = match product {
                Some(id) => match catalog.products.get(&id) {
                    Some(p) => vec![p.clone()],
                    None => bail!("Product '{}' not found in {}", id, products),
                },
                None => catalog.products.values().cloned().collect(),
            };
            let output_dir = prepare_output_dir(&output, "Assess")?;
            workflow::run_assessments(selected, catalog.factors, &cli.store, &output_dir, &output)?;
            println!("\nAssessment complete. Results are in '{}'", output_dir.display());
        }
        Commands::Quick {
            id,
            material,
            raw_material_kg,
            electricity_kwh,
            natural_gas_m3,
            water_l,
            sulfuric_acid_kg,
            caustic_soda_kg,
            lubricants_kg,
            waste_water_m3,
            solid_waste_kg,
            transport_km,
            output,
        } => {
            let inputs = QuickInputs {
                material_type: material,
                raw_material_kg,
                electricity_kwh,
                natural_gas_m3,
                water_l,
                sulfuric_acid_kg,
                caustic_soda_kg,
                lubricants_kg,
                waste_water_m3,
                solid_waste_kg,
                transport_km,
            };
            let factors = match output.factors.as_deref() {
                Some(path) => lcaforge_core::factors::load_factor_tables(path)?,
                None => FactorTables::default(),
            };
            let output_dir = prepare_output_dir(&output, "Quick")?;
            workflow::run_quick_assessment(
                &id,
                &inputs,
                factors,
                &cli.store,
                &output_dir,
                &output,
            )?;
            println!("\nQuick assessment complete. Results are in '{}'", output_dir.display());
        }
        Commands::List => {
            let store = JsonFileStore::new(&cli.store);
            let session = LcaSession::restore(FactorTables::default(), &store)
                .with_context(|| format!("Failed to read product store {}", cli.store.display()))?;
            workflow::print_product_list(session.products());
        }
    }

    Ok(())
}

fn prepare_output_dir(args: &OutputArgs, prefix: &str) -> Result<PathBuf> {
    let dir = match &args.output {
        Some(dir) => dir.clone(),
        None => PathBuf::from(format!(
            "./data/runs/{}_{}",
            prefix,
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        )),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn material_help_lists_every_material_type() {
        let command = Cli::command();
        let quick = command.find_subcommand("quick").unwrap();
        let material = quick.get_arguments().find(|a| a.get_id() == "material").unwrap();
        let help = material.get_help().unwrap().to_string();
        for material_type in MaterialType::ALL {
            assert!(help.contains(material_type.as_str()), "help misses {}", material_type);
        }
    }

    #[test]
    fn material_names_parse_case_insensitively() {
        assert_eq!(parse_material_type("Aluminum"), Ok(MaterialType::Aluminum));
        assert!(parse_material_type("unobtainium").is_err());
    }
}
