//! Configuration loading for the TJM engine.
//!
//! This module loads engine metadata, public holiday rules and default
//! calculator parameters from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use tjm_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/fr").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DefaultsConfig, EngineConfig, EngineMetadata};
