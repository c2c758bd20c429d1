//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files and resolving per-agent wage settings.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{WageSettings, WageSettingsOverride};

use super::types::{AgentConfig, DefaultsConfig, PayrollConfig, Project, ProjectsConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/iceland/
/// ├── defaults.yaml   # Organisation wage defaults
/// ├── projects.yaml   # Charity projects sales may be recorded against
/// └── agents/         # Optional, one file per agent
///     └── agent_001.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/iceland").unwrap();
/// let settings = loader.wage_settings_for("agent_001").unwrap();
/// println!("Day rate: {}", settings.day_rate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `defaults.yaml` or `projects.yaml` is missing or
    /// invalid, or if any file under `agents/` fails to parse. A missing
    /// `agents/` directory means no agent has stored settings.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let defaults_config = Self::load_yaml::<DefaultsConfig>(&path.join("defaults.yaml"))?;
        let defaults = defaults_config
            .wage_settings
            .resolve(&WageSettings::default());
        defaults.validate()?;

        let projects_config = Self::load_yaml::<ProjectsConfig>(&path.join("projects.yaml"))?;

        let agents = Self::load_agents(&path.join("agents"))?;

        info!(
            config_path = %path.display(),
            project_count = projects_config.projects.len(),
            agent_count = agents.len(),
            "Payroll configuration loaded"
        );

        Ok(Self {
            config: PayrollConfig::new(defaults, projects_config.projects, agents),
        })
    }

    /// Builds a loader from in-memory parts.
    pub fn from_parts(
        defaults: WageSettings,
        projects: Vec<Project>,
        agents: Vec<AgentConfig>,
    ) -> Self {
        Self {
            config: PayrollConfig::new(defaults, projects, agents),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every agent file from the agents directory.
    fn load_agents(agents_dir: &Path) -> EngineResult<Vec<AgentConfig>> {
        if !agents_dir.exists() {
            debug!(path = %agents_dir.display(), "No agents directory, using defaults for everyone");
            return Ok(Vec::new());
        }

        let agents_dir_str = agents_dir.display().to_string();
        let entries = fs::read_dir(agents_dir).map_err(|_| EngineError::ConfigNotFound {
            path: agents_dir_str.clone(),
        })?;

        let mut agents = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: agents_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let agent = Self::load_yaml::<AgentConfig>(&path)?;
                agents.push(agent);
            }
        }

        Ok(agents)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the organisation default wage settings.
    pub fn defaults(&self) -> &WageSettings {
        self.config.defaults()
    }

    /// Names of every configured project.
    pub fn project_names(&self) -> Vec<String> {
        self.config
            .projects()
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    /// Resolves the wage settings for an agent.
    ///
    /// Stored agent settings are layered over the organisation defaults;
    /// agents without stored settings get the defaults.
    pub fn wage_settings_for(&self, agent_id: &str) -> EngineResult<WageSettings> {
        self.resolve_settings(agent_id, None)
    }

    /// Resolves the wage settings for an agent with an optional request override.
    ///
    /// Precedence: request override, then stored agent settings, then defaults.
    pub fn resolve_settings(
        &self,
        agent_id: &str,
        request: Option<&WageSettingsOverride>,
    ) -> EngineResult<WageSettings> {
        let stored = self
            .config
            .agents()
            .get(agent_id)
            .map(|agent| agent.wage_settings.clone())
            .unwrap_or_default();

        let layered = match request {
            Some(request) => request.merged_over(&stored),
            None => stored,
        };

        let settings = layered.resolve(self.config.defaults());
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/iceland"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn in_memory_loader() -> ConfigLoader {
        ConfigLoader::from_parts(
            WageSettings::default(),
            vec![Project {
                name: "UNICEF".to_string(),
                description: String::new(),
            }],
            vec![AgentConfig {
                agent_id: "agent_senior".to_string(),
                name: None,
                wage_settings: WageSettingsOverride {
                    day_rate: Some(dec("3100")),
                    allowance_usage: Some(dec("0.5")),
                    ..Default::default()
                },
            }],
        )
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.defaults(), &WageSettings::default());
        assert!(loader.project_names().contains(&"UNICEF".to_string()));
    }

    #[test]
    fn test_loaded_agent_overrides_apply() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let settings = loader.wage_settings_for("agent_002").unwrap();
        assert_eq!(settings.allowance_usage, dec("0.5"));
        assert_eq!(settings.day_rate, dec("2724.88"));
    }

    #[test]
    fn test_unknown_agent_gets_defaults() {
        let loader = in_memory_loader();
        let settings = loader.wage_settings_for("nobody").unwrap();
        assert_eq!(settings, WageSettings::default());
    }

    #[test]
    fn test_stored_agent_settings_layer_over_defaults() {
        let loader = in_memory_loader();
        let settings = loader.wage_settings_for("agent_senior").unwrap();
        assert_eq!(settings.day_rate, dec("3100"));
        assert_eq!(settings.evening_rate, dec("3768.47"));
        assert_eq!(settings.allowance_usage, dec("0.5"));
    }

    #[test]
    fn test_request_override_wins_over_stored_settings() {
        let loader = in_memory_loader();
        let request = WageSettingsOverride {
            allowance_usage: Some(dec("1")),
            ..Default::default()
        };
        let settings = loader
            .resolve_settings("agent_senior", Some(&request))
            .unwrap();
        assert_eq!(settings.day_rate, dec("3100"));
        assert_eq!(settings.allowance_usage, dec("1"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let loader = in_memory_loader();
        let request = WageSettingsOverride {
            allowance_usage: Some(dec("2")),
            ..Default::default()
        };
        let result = loader.resolve_settings("agent_senior", Some(&request));
        assert!(matches!(result, Err(EngineError::InvalidSettings { .. })));
    }

    #[test]
    fn test_default_loader_has_no_projects() {
        let loader = ConfigLoader::default();
        assert!(loader.project_names().is_empty());
        assert_eq!(loader.defaults(), &WageSettings::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("defaults.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
