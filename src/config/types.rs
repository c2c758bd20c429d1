//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{WageSettings, WageSettingsOverride};

/// Structure of `defaults.yaml`.
///
/// Fields left out fall back to the built-in [`WageSettings::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Organisation-wide wage settings.
    #[serde(default)]
    pub wage_settings: WageSettingsOverride,
}

/// A charity project agents can record sales against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// The project name, as recorded on each sale.
    pub name: String,
    /// A short description of the charity.
    #[serde(default)]
    pub description: String,
}

/// Structure of `projects.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsConfig {
    /// The fixed set of projects.
    pub projects: Vec<Project>,
}

/// Stored settings for one agent, one file per agent under `agents/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// The agent's identifier.
    pub agent_id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Settings that differ from the organisation defaults.
    #[serde(default)]
    pub wage_settings: WageSettingsOverride,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Resolved organisation defaults.
    defaults: WageSettings,
    /// Known charity projects.
    projects: Vec<Project>,
    /// Stored agent settings keyed by agent id.
    agents: HashMap<String, AgentConfig>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(defaults: WageSettings, projects: Vec<Project>, agents: Vec<AgentConfig>) -> Self {
        Self {
            defaults,
            projects,
            agents: agents
                .into_iter()
                .map(|agent| (agent.agent_id.clone(), agent))
                .collect(),
        }
    }

    /// Returns the organisation defaults.
    pub fn defaults(&self) -> &WageSettings {
        &self.defaults
    }

    /// Returns the configured projects.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns all stored agent settings.
    pub fn agents(&self) -> &HashMap<String, AgentConfig> {
        &self.agents
    }
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self::new(WageSettings::default(), Vec::new(), Vec::new())
    }
}
