//! Configuration loading and management for the money-funnel engine.
//!
//! This module provides the parameter defaults for both funnel models and
//! the household chore catalog, either built in or loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use fickpengar::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sweden").unwrap();
//! println!("VAT rate: {}", config.entrepreneur_defaults().vat_pct);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ChoreCatalog, DefaultsConfig, PerTier, TierRates};
