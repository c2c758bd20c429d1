//! Configuration loading and management for the payroll engine.
//!
//! This module loads organisation wage defaults, the charity project list and
//! per-agent stored settings from YAML files, and resolves them into a fully
//! specified [`WageSettings`](crate::models::WageSettings) for each agent.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/iceland").unwrap();
//! println!("Projects: {:?}", config.project_names());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AgentConfig, DefaultsConfig, PayrollConfig, Project, ProjectsConfig};
