use crate::error::LcaError;
use lcaforge_schemas::{factors::FactorTables, file_formats::FactorFile};
use std::fs;
use tracing::info;

/// Rejects a table that misses a row, carries a negative factor, or has a
/// recycled intensity above the raw one.
pub fn validate_factor_tables(tables: &FactorTables) -> Result<(), LcaError> {
    tables.check().map_err(LcaError::InvalidFactorTable)
}

/// Loads and validates a YAML factor file.
pub fn load_factor_tables(path: &str) -> Result<FactorTables, LcaError> {
    let content = fs::read_to_string(path).map_err(|e| LcaError::FileIO(path.to_string(), e))?;
    let file: FactorFile =
        serde_yaml::from_str(&content).map_err(|e| LcaError::YamlParsing(path.to_string(), e))?;
    validate_factor_tables(&file.factors)?;
    info!(path, schema_version = %file.schema_version, "loaded factor tables");
    Ok(file.factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcaforge_schemas::material::MaterialType;

    const PARTIAL_FILE: &str = r#"
schema_version: "1.0"
factors:
  materials:
    aluminum:
      raw: { carbon: 8.0, energy: 140.0, water: 1400.0 }
      recycled: { carbon: 2.0, energy: 40.0, water: 400.0 }
  energy:
    grid: 0.4
    renewable: 0.02
    fossil: 0.9
  transport:
    truck: 0.1
    ship: 0.01
    train: 0.04
    air: 0.6
"#;

    #[test]
    fn incomplete_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factors.yaml");
        fs::write(&path, PARTIAL_FILE).unwrap();
        let err = load_factor_tables(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LcaError::InvalidFactorTable(ref msg) if msg.contains("steel")));
    }

    #[test]
    fn complete_file_loads() {
        let mut tables = FactorTables::default();
        if let Some(row) = tables.materials.get_mut(&MaterialType::Wood) {
            row.raw.carbon = 0.6;
        }
        let file = FactorFile {
            schema_version: "1.0".to_string(),
            factors: tables.clone(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factors.yaml");
        fs::write(&path, serde_yaml::to_string(&file).unwrap()).unwrap();

        let loaded = load_factor_tables(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, tables);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_factor_tables("/definitely/not/here.yaml"),
            Err(LcaError::FileIO(..))
        ));
    }
}
