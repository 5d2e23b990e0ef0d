use crate::{factors::FactorTables, product::Product};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductFile {
    pub schema_version: String,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FactorFile {
    pub schema_version: String,
    pub factors: FactorTables,
}
