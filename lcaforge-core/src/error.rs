use thiserror::Error;

#[derive(Debug, Error)]
pub enum LcaError {
    #[error("No product selected for calculation")]
    NoProductSelected,

    #[error("Product '{0}' not found")]
    ProductNotFound(String),

    #[error("Material '{0}' not found in current product")]
    MaterialNotFound(String),

    #[error("Process step '{0}' not found in current product")]
    ProcessNotFound(String),

    #[error("Invalid material '{id}': {reason}")]
    InvalidMaterial { id: String, reason: String },

    #[error("Invalid process step '{id}': {reason}")]
    InvalidProcess { id: String, reason: String },

    #[error("Invalid end-of-life scenario '{id}': {reason}")]
    InvalidScenario { id: String, reason: String },

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Duplicate identifier '{0}'")]
    DuplicateId(String),

    #[error("Invalid factor table: {0}")]
    InvalidFactorTable(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
