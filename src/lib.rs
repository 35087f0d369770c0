//! Space estimation for Digital Product Passport logistics.
//!
//! Given product and batch dimensions, computes unit and batch volumes,
//! storage capacity state, EUR pallet loads, freight container counts and
//! the best fitting standard shipping cartons with carrier compliance.
//! The calculation modules are pure; [`api`] exposes them over HTTP.

pub mod api;
pub mod carton;
pub mod config;
pub mod container;
pub mod dimensions;
pub mod geometry;
pub mod model;
pub mod pallet;
pub mod reference;
pub mod summary;
pub mod telemetry;
pub mod types;
pub mod volume;
