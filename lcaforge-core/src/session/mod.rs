//! Caller-owned assessment state and the operations that edit it.
//!
//! A session owns one `LcaState`. Nothing here is global: callers create one
//! session per user or request, and `&mut self` serialises writers.
//! Persisting to a `ProductStore` is a separate call made after a successful
//! `save_product`.

pub mod state;

use crate::{
    analysis,
    builder::{validate_material, validate_process, validate_product},
    error::LcaError,
    store::ProductStore,
};
use chrono::Utc;
use lcaforge_schemas::{
    factors::FactorTables,
    material::{Material, MaterialPatch},
    process::{ProcessStep, ProcessStepPatch},
    product::Product,
    results::LcaResults,
};
use state::LcaState;
use tracing::{debug, info};

pub struct LcaSession {
    state: LcaState,
    factors: FactorTables,
}

impl LcaSession {
    pub fn new(factors: FactorTables) -> Self {
        Self {
            state: LcaState::default(),
            factors,
        }
    }

    /// Starts a session with the products previously persisted in `store`.
    pub fn restore(factors: FactorTables, store: &impl ProductStore) -> Result<Self, LcaError> {
        let mut session = Self::new(factors);
        session.state.products = store.load_all()?;
        info!(count = session.state.products.len(), "restored saved products");
        Ok(session)
    }

    pub fn state(&self) -> &LcaState {
        &self.state
    }

    pub fn factors(&self) -> &FactorTables {
        &self.factors
    }

    pub fn current_product(&self) -> Option<&Product> {
        self.state.current_product.as_ref()
    }

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn calculations(&self) -> Option<&LcaResults> {
        self.state.calculations.as_ref()
    }

    pub fn set_current_product(&mut self, product: Product) -> Result<(), LcaError> {
        validate_product(&product)?;
        debug!(product = %product.id, "current product set");
        self.state.current_product = Some(product);
        Ok(())
    }

    fn current_mut(&mut self) -> Result<&mut Product, LcaError> {
        self.state.current_product.as_mut().ok_or(LcaError::NoProductSelected)
    }

    pub fn add_material(&mut self, material: Material) -> Result<(), LcaError> {
        validate_material(&material)?;
        let product = self.current_mut()?;
        if product.find_material(&material.id).is_some() {
            return Err(LcaError::DuplicateId(material.id));
        }
        product.materials.push(material);
        product.touch();
        Ok(())
    }

    /// Merges `patch` into the material with `id`. The material is left untouched
    /// if the merged result would be invalid.
    pub fn update_material(&mut self, id: &str, patch: MaterialPatch) -> Result<(), LcaError> {
        let product = self.current_mut()?;
        let slot = product
            .materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| LcaError::MaterialNotFound(id.to_string()))?;
        let mut updated = slot.clone();
        updated.apply(patch);
        validate_material(&updated)?;
        *slot = updated;
        product.touch();
        Ok(())
    }

    pub fn remove_material(&mut self, id: &str) -> Result<(), LcaError> {
        let product = self.current_mut()?;
        let before = product.materials.len();
        product.materials.retain(|m| m.id != id);
        if product.materials.len() == before {
            return Err(LcaError::MaterialNotFound(id.to_string()));
        }
        product.touch();
        Ok(())
    }

    pub fn add_process(&mut self, process: ProcessStep) -> Result<(), LcaError> {
        validate_process(&process)?;
        let product = self.current_mut()?;
        if product.find_process(&process.id).is_some() {
            return Err(LcaError::DuplicateId(process.id));
        }
        product.processes.push(process);
        product.touch();
        Ok(())
    }

    pub fn update_process(&mut self, id: &str, patch: ProcessStepPatch) -> Result<(), LcaError> {
        let product = self.current_mut()?;
        let slot = product
            .processes
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LcaError::ProcessNotFound(id.to_string()))?;
        let mut updated = slot.clone();
        updated.apply(patch);
        validate_process(&updated)?;
        *slot = updated;
        product.touch();
        Ok(())
    }

    pub fn remove_process(&mut self, id: &str) -> Result<(), LcaError> {
        let product = self.current_mut()?;
        let before = product.processes.len();
        product.processes.retain(|p| p.id != id);
        if product.processes.len() == before {
            return Err(LcaError::ProcessNotFound(id.to_string()));
        }
        product.touch();
        Ok(())
    }

    /// Runs the impact calculation on the current product and keeps the results.
    ///
    /// # Errors
    ///
    /// Returns `LcaError::NoProductSelected` when no product is current.
    pub fn calculate(&mut self) -> Result<LcaResults, LcaError> {
        let product = self.state.current_product.as_ref().ok_or(LcaError::NoProductSelected)?;
        let results = analysis::calculate_lca(product, &self.factors);
        info!(
            product = %product.id,
            total_co2e = results.total_carbon_footprint,
            recommendations = results.recommendations.len(),
            "calculation stored"
        );
        self.state.calculations = Some(results.clone());
        self.state.last_calculated = Some(Utc::now());
        Ok(results)
    }

    /// Makes `product` current and calculates it in one step.
    pub fn calculate_product(&mut self, product: Product) -> Result<LcaResults, LcaError> {
        self.set_current_product(product)?;
        self.calculate()
    }

    /// Upserts the current product into the saved collection: an entry with the
    /// same id is replaced in place, otherwise the product is appended.
    pub fn save_product(&mut self) -> Result<(), LcaError> {
        let product = self.state.current_product.clone().ok_or(LcaError::NoProductSelected)?;
        match self.state.products.iter().position(|p| p.id == product.id) {
            Some(index) => self.state.products[index] = product,
            None => self.state.products.push(product),
        }
        Ok(())
    }

    /// Writes the saved collection to `store`.
    pub fn persist(&self, store: &mut impl ProductStore) -> Result<(), LcaError> {
        store.save_all(&self.state.products)?;
        info!(count = self.state.products.len(), "products persisted");
        Ok(())
    }

    /// Makes a saved product current and drops the previous calculation.
    pub fn load_product(&mut self, id: &str) -> Result<(), LcaError> {
        let product = self
            .state
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| LcaError::ProductNotFound(id.to_string()))?;
        self.state.current_product = Some(product);
        self.state.calculations = None;
        Ok(())
    }

    pub fn reset_calculation(&mut self) {
        self.state.calculations = None;
        self.state.last_calculated = None;
    }
}
