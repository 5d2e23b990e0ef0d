//! Data types shared by the LCA Forge crates.
//!
//! Everything here is plain serde data. The calculation itself lives in
//! `lcaforge-core`.

pub mod end_of_life;
pub mod factors;
pub mod file_formats;
pub mod material;
pub mod process;
pub mod product;
pub mod quick;
pub mod results;
