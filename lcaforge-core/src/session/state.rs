use chrono::{DateTime, Utc};
use lcaforge_schemas::{product::Product, results::LcaResults};
use serde::{Deserialize, Serialize};

/// Everything one assessment session holds: the product being edited, the
/// saved products, and the latest calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LcaState {
    pub current_product: Option<Product>,
    pub products: Vec<Product>,
    pub calculations: Option<LcaResults>,
    pub last_calculated: Option<DateTime<Utc>>,
}
