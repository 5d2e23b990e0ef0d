use anyhow::{Context, Result};
use lcaforge_core::{builder::validate_product, factors::load_factor_tables};
use lcaforge_schemas::{factors::FactorTables, file_formats::ProductFile, product::Product};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::warn;

/// Everything an assessment run reads from disk: the factor tables and the products to assess.
pub struct Catalog {
    pub factors: FactorTables,
    pub products: BTreeMap<String, Product>,
}

impl Catalog {
    /// Loads products from a YAML file or from every YAML file in a directory.
    /// The built-in factor tables are used unless `factors_path` is given.
    pub fn load(products_path: &str, factors_path: Option<&str>) -> Result<Self> {
        println!("Loading products from '{}'...", products_path);

        let factors = match factors_path {
            Some(path) => load_factor_tables(path)
                .with_context(|| format!("Failed to load factor tables from {}", path))?,
            None => FactorTables::default(),
        };

        let path = Path::new(products_path);
        let products = if path.is_dir() {
            load_yaml_files_into_map(
                path,
                |file: ProductFile| file.products,
                |item: &Product| item.id.clone(),
            )?
        } else {
            let mut map = BTreeMap::new();
            for product in read_product_file(path)? {
                map.insert(product.id.clone(), product);
            }
            map
        };

        for product in products.values() {
            validate_product(product)
                .with_context(|| format!("Product '{}' is invalid", product.id))?;
            if let Some(share) = end_of_life_mismatch(product) {
                warn!(
                    product = %product.id,
                    share,
                    "end-of-life scenarios do not add up to 100%, shares are used as given"
                );
            }
        }

        println!("Loaded {} product(s).", products.len());
        Ok(Self { factors, products })
    }
}

/// The end-of-life share total when scenarios are present and it is not 100%.
fn end_of_life_mismatch(product: &Product) -> Option<f64> {
    let share = product.end_of_life_total();
    (!product.end_of_life_scenarios.is_empty() && (share - 100.0).abs() > 1e-6).then_some(share)
}

fn read_product_file(path: &Path) -> Result<Vec<Product>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let file: ProductFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
    Ok(file.products)
}

/// Generic helper to load all YAML files in a directory into a map.
fn load_yaml_files_into_map<P, F, E, T, K>(
    dir_path: P,
    extract_vec: E,
    get_key: K,
) -> Result<BTreeMap<String, T>>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., ProductFile)
    E: Fn(F) -> Vec<T>,                  // A closure to extract the Vec<T> from the wrapper
    K: Fn(&T) -> String,                 // A closure to get the key for the map from an item T
{
    let mut map = BTreeMap::new();
    for entry in fs::read_dir(dir_path.as_ref())
        .with_context(|| format!("Failed to read directory: {:?}", dir_path.as_ref()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            let content = fs::read_to_string(&path)?;
            let file_wrapper: F = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

            for item in extract_vec(file_wrapper) {
                map.insert(get_key(&item), item);
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCTS: &str = r#"
schema_version: "1.0"
products:
  - id: bottle
    name: Water bottle
    functional_unit: 1 unit
    lifespan: 2
    materials:
      - id: pet
        name: PET body
        quantity: 0.03
        unit: kg
        material_type: plastic
        is_recycled: true
        recyclability: 0.9
        carbon_intensity: 2.9
        energy_intensity: 51
        water_intensity: 510
    processes:
      - id: ship
        name: Sea freight
        process_type: transport
        energy_consumption: 0
        energy_type: fossil
        emissions: 0
        water_usage: 0
        waste_generated: 0
        duration: 240
        distance: 8000
        transport_mode: ship
"#;

    #[test]
    fn loads_a_single_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.yaml");
        fs::write(&path, PRODUCTS).unwrap();

        let catalog = Catalog::load(path.to_str().unwrap(), None).unwrap();
        let bottle = &catalog.products["bottle"];
        assert_eq!(bottle.materials.len(), 1);
        // omitted scenarios fall back to the default split
        assert_eq!(bottle.end_of_life_scenarios.len(), 3);
        assert_eq!(catalog.factors, FactorTables::default());
    }

    #[test]
    fn loads_every_yaml_file_in_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), PRODUCTS).unwrap();
        fs::write(dir.path().join("b.yml"), PRODUCTS.replace("id: bottle", "id: flask")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = Catalog::load(dir.path().to_str().unwrap(), None).unwrap();
        let ids: Vec<&String> = catalog.products.keys().collect();
        assert_eq!(ids, vec!["bottle", "flask"]);
    }

    #[test]
    fn end_of_life_mismatch_reports_the_share() {
        let mut product = Product::new("p1", "Tray");
        assert_eq!(end_of_life_mismatch(&product), None);
        product.end_of_life_scenarios[0].percentage = 50.0;
        assert_eq!(end_of_life_mismatch(&product), Some(85.0));
        product.end_of_life_scenarios.clear();
        assert_eq!(end_of_life_mismatch(&product), None);
    }

    #[test]
    fn unknown_material_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.yaml");
        let broken = PRODUCTS.replace("material_type: plastic", "material_type: unobtainium");
        fs::write(&path, broken).unwrap();
        assert!(Catalog::load(path.to_str().unwrap(), None).is_err());
    }
}
